//! SeaORM implementation of LocationRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use validator::Validate;

use super::{db_err, from_cents, to_cents};
use crate::domain::location::{Location, LocationPatch, LocationRepository, NewLocation};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::location;

pub struct SeaOrmLocationRepository {
    db: DatabaseConnection,
}

impl SeaOrmLocationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: location::Model) -> Location {
    Location {
        id: m.id,
        name: m.name,
        address: m.address,
        latitude: m.latitude,
        longitude: m.longitude,
        total_spots: m.total_spots,
        hourly_rate: from_cents(m.hourly_rate_cents),
        rating: m.rating,
        review_count: m.review_count,
        has_transit_access: m.has_transit_access,
        created_at: m.created_at,
    }
}

#[async_trait]
impl LocationRepository for SeaOrmLocationRepository {
    async fn create(&self, l: NewLocation) -> DomainResult<Location> {
        l.validate()?;
        let model = location::ActiveModel {
            id: NotSet,
            name: Set(l.name),
            address: Set(l.address),
            latitude: Set(l.latitude),
            longitude: Set(l.longitude),
            total_spots: Set(l.total_spots),
            hourly_rate_cents: Set(to_cents(l.hourly_rate)?),
            rating: Set(0.0),
            review_count: Set(0),
            has_transit_access: Set(l.has_transit_access),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        debug!(location_id = model.id, "Created location");
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Location>> {
        let model = location::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Location>> {
        let models = location::Entity::find()
            .order_by_asc(location::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, patch: LocationPatch) -> DomainResult<Location> {
        let existing = location::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Location", id))?;

        let mut active: location::ActiveModel = existing.into();
        if let Some(rate) = patch.hourly_rate {
            active.hourly_rate_cents = Set(to_cents(rate)?);
        }
        if let Some(rating) = patch.rating {
            active.rating = Set(rating);
        }
        if let Some(count) = patch.review_count {
            active.review_count = Set(count);
        }
        let model = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn add_review(&self, id: i32, score: f64) -> DomainResult<Location> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // Both right-hand sides see the pre-update review_count.
        let result = location::Entity::update_many()
            .col_expr(
                location::Column::Rating,
                Expr::cust_with_values(
                    "(rating * review_count + ?) / (review_count + 1)",
                    [score],
                ),
            )
            .col_expr(
                location::Column::ReviewCount,
                Expr::col(location::Column::ReviewCount).add(1),
            )
            .filter(location::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Location", id));
        }

        let model = location::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Location", id))?;
        txn.commit().await.map_err(db_err)?;

        debug!(location_id = id, review_count = model.review_count, "Added review");
        Ok(model_to_domain(model))
    }
}
