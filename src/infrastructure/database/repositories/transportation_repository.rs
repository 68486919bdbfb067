//! SeaORM implementation of TransportationRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::error;
use validator::Validate;

use super::{db_err, from_cents, to_cents};
use crate::domain::booking::BookingStatus;
use crate::domain::transportation::{
    NewTransportationBooking, NewTransportationType, TransportationBooking,
    TransportationRepository, TransportationType,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{transportation_booking, transportation_type};

pub struct SeaOrmTransportationRepository {
    db: DatabaseConnection,
}

impl SeaOrmTransportationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn type_to_domain(m: transportation_type::Model) -> TransportationType {
    TransportationType {
        id: m.id,
        name: m.name,
        icon: m.icon,
        base_rate: from_cents(m.base_rate_cents),
        per_km_rate: from_cents(m.per_km_rate_cents),
    }
}

fn booking_to_domain(m: transportation_booking::Model) -> DomainResult<TransportationBooking> {
    let status = BookingStatus::parse(&m.status).ok_or_else(|| {
        error!(transportation_booking_id = m.id, status = %m.status, "Unknown ride status");
        DomainError::Storage(format!("ride {} has unknown status '{}'", m.id, m.status))
    })?;
    Ok(TransportationBooking {
        id: m.id,
        user_id: m.user_id,
        transportation_type_id: m.transportation_type_id,
        parking_booking_id: m.parking_booking_id,
        pickup_location: m.pickup_location,
        dropoff_location: m.dropoff_location,
        pickup_time: m.pickup_time,
        is_shared: m.is_shared,
        status,
        amount: from_cents(m.amount_cents),
        created_at: m.created_at,
    })
}

#[async_trait]
impl TransportationRepository for SeaOrmTransportationRepository {
    async fn create_type(&self, t: NewTransportationType) -> DomainResult<TransportationType> {
        t.validate()?;
        let model = transportation_type::ActiveModel {
            id: NotSet,
            name: Set(t.name),
            icon: Set(t.icon),
            base_rate_cents: Set(to_cents(t.base_rate)?),
            per_km_rate_cents: Set(to_cents(t.per_km_rate)?),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(type_to_domain(model))
    }

    async fn find_type(&self, id: i32) -> DomainResult<Option<TransportationType>> {
        let model = transportation_type::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(type_to_domain))
    }

    async fn list_types(&self) -> DomainResult<Vec<TransportationType>> {
        let models = transportation_type::Entity::find()
            .order_by_asc(transportation_type::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(type_to_domain).collect())
    }

    async fn create_booking(
        &self,
        b: NewTransportationBooking,
    ) -> DomainResult<TransportationBooking> {
        b.validate()?;
        let model = transportation_booking::ActiveModel {
            id: NotSet,
            user_id: Set(b.user_id),
            transportation_type_id: Set(b.transportation_type_id),
            parking_booking_id: Set(b.parking_booking_id),
            pickup_location: Set(b.pickup_location),
            dropoff_location: Set(b.dropoff_location),
            pickup_time: Set(b.pickup_time),
            is_shared: Set(b.is_shared),
            status: Set(b.status.unwrap_or_default().as_str().to_string()),
            amount_cents: Set(to_cents(b.amount)?),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        booking_to_domain(model)
    }

    async fn find_booking(&self, id: i32) -> DomainResult<Option<TransportationBooking>> {
        let model = transportation_booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(booking_to_domain).transpose()
    }

    async fn find_bookings_by_user(
        &self,
        user_id: i32,
    ) -> DomainResult<Vec<TransportationBooking>> {
        let models = transportation_booking::Entity::find()
            .filter(transportation_booking::Column::UserId.eq(user_id))
            .order_by_asc(transportation_booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(booking_to_domain).collect()
    }

    async fn update_booking_status(
        &self,
        id: i32,
        status: BookingStatus,
    ) -> DomainResult<TransportationBooking> {
        let existing = transportation_booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("TransportationBooking", id))?;

        let mut active: transportation_booking::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        let model = active.update(&self.db).await.map_err(db_err)?;
        booking_to_domain(model)
    }
}
