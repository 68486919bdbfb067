//! SeaORM implementation of SpotRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, warn};
use validator::Validate;

use super::db_err;
use crate::domain::spot::{NewSpot, Spot, SpotFilter, SpotPatch, SpotRepository, SpotType};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{location, spot};

pub struct SeaOrmSpotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSpotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: spot::Model) -> Spot {
    let spot_type = SpotType::parse(&m.spot_type).unwrap_or_else(|| {
        warn!(spot_id = m.id, spot_type = %m.spot_type, "Unknown spot type, using standard");
        SpotType::Standard
    });
    Spot {
        id: m.id,
        location_id: m.location_id,
        spot_number: m.spot_number,
        level: m.level,
        section: m.section,
        is_available: m.is_available,
        spot_type,
        created_at: m.created_at,
    }
}

#[async_trait]
impl SpotRepository for SeaOrmSpotRepository {
    async fn create(&self, s: NewSpot) -> DomainResult<Spot> {
        s.validate()?;
        let location_id = s.location_id;
        let txn = self.db.begin().await.map_err(db_err)?;

        let parent = location::Entity::find_by_id(location_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Location", location_id))?;

        let model = spot::ActiveModel {
            id: NotSet,
            location_id: Set(s.location_id),
            spot_number: Set(s.spot_number),
            level: Set(s.level),
            section: Set(s.section),
            is_available: Set(true),
            spot_type: Set(s.spot_type.as_str().to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        // Counted after the insert, so this transaction already holds the write lock.
        let count = spot::Entity::find()
            .filter(spot::Column::LocationId.eq(location_id))
            .count(&txn)
            .await
            .map_err(db_err)?;
        let count = i32::try_from(count).unwrap_or(i32::MAX);
        if count > parent.total_spots {
            let mut active: location::ActiveModel = parent.into();
            active.total_spots = Set(count);
            active.update(&txn).await.map_err(db_err)?;
        }
        txn.commit().await.map_err(db_err)?;

        debug!(spot_id = model.id, location_id, total_spots = count, "Created spot");
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Spot>> {
        let model = spot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_where(&self, filter: SpotFilter) -> DomainResult<Vec<Spot>> {
        let mut query = spot::Entity::find();
        if let Some(location_id) = filter.location_id {
            query = query.filter(spot::Column::LocationId.eq(location_id));
        }
        if let Some(available) = filter.is_available {
            query = query.filter(spot::Column::IsAvailable.eq(available));
        }
        if let Some(spot_type) = filter.spot_type {
            query = query.filter(spot::Column::SpotType.eq(spot_type.as_str()));
        }
        let models = query
            .order_by_asc(spot::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, patch: SpotPatch) -> DomainResult<Spot> {
        let existing = spot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Spot", id))?;

        let mut active: spot::ActiveModel = existing.into();
        if let Some(number) = patch.spot_number {
            active.spot_number = Set(number);
        }
        if let Some(level) = patch.level {
            active.level = Set(Some(level));
        }
        if let Some(section) = patch.section {
            active.section = Set(Some(section));
        }
        if let Some(spot_type) = patch.spot_type {
            active.spot_type = Set(spot_type.as_str().to_string());
        }
        if let Some(available) = patch.is_available {
            active.is_available = Set(available);
        }
        let model = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }
}
