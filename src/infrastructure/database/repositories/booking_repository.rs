//! SeaORM implementation of BookingRepository
//!
//! `commit` and `release` run inside a database transaction so the booking
//! row and the spot flag always change together.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, error};

use super::{db_err, from_cents, to_cents};
use crate::domain::booking::{
    Booking, BookingFilter, BookingPatch, BookingRepository, BookingStatus, NewBooking,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, spot};

const ACTIVE_STATUSES: [&str; 2] = ["pending", "confirmed"];

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

/// Rows with an unrecognised status are reported, never guessed at: a
/// wrong guess would change which bookings hold their spot.
fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let status = BookingStatus::parse(&m.status).ok_or_else(|| {
        error!(booking_id = m.id, status = %m.status, "Unknown booking status in storage");
        DomainError::Storage(format!(
            "booking {} has unknown status '{}'",
            m.id, m.status
        ))
    })?;
    Ok(Booking {
        id: m.id,
        user_id: m.user_id,
        vehicle_id: m.vehicle_id,
        spot_id: m.spot_id,
        location_id: m.location_id,
        start_time: m.start_time,
        end_time: m.end_time,
        status,
        booking_code: m.booking_code,
        total_amount: from_cents(m.total_amount_cents),
        created_at: m.created_at,
        is_favorite: m.is_favorite,
    })
}

fn new_active_model(b: NewBooking) -> DomainResult<booking::ActiveModel> {
    check_interval(b.start_time, b.end_time)?;
    Ok(booking::ActiveModel {
        id: NotSet,
        user_id: Set(b.user_id),
        vehicle_id: Set(b.vehicle_id),
        spot_id: Set(b.spot_id),
        location_id: Set(b.location_id),
        start_time: Set(b.start_time),
        end_time: Set(b.end_time),
        status: Set(b.status.unwrap_or_default().as_str().to_string()),
        booking_code: Set(b.booking_code),
        total_amount_cents: Set(to_cents(b.total_amount)?),
        created_at: Set(Utc::now()),
        is_favorite: Set(false),
    })
}

fn check_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<()> {
    if end <= start {
        return Err(DomainError::InvalidInterval(
            "end_time must be after start_time".to_string(),
        ));
    }
    Ok(())
}

async fn find_model<C: ConnectionTrait>(conn: &C, id: i32) -> DomainResult<booking::Model> {
    booking::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| DomainError::not_found("Booking", id))
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, b: NewBooking) -> DomainResult<Booking> {
        let model = new_active_model(b)?
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        model_to_domain(model)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_where(&self, filter: BookingFilter) -> DomainResult<Vec<Booking>> {
        let mut query = booking::Entity::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(booking::Column::UserId.eq(user_id));
        }
        if let Some(location_id) = filter.location_id {
            query = query.filter(booking::Column::LocationId.eq(location_id));
        }
        if let Some(spot_id) = filter.spot_id {
            query = query.filter(booking::Column::SpotId.eq(spot_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(booking::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_active_for_location(&self, location_id: i32) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::LocationId.eq(location_id))
            .filter(booking::Column::Status.is_in(ACTIVE_STATUSES))
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, id: i32, patch: BookingPatch) -> DomainResult<Booking> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let existing = find_model(&txn, id).await?;

        let start = patch.start_time.unwrap_or(existing.start_time);
        let end = patch.end_time.unwrap_or(existing.end_time);
        check_interval(start, end)?;
        if patch.is_empty() {
            txn.commit().await.map_err(db_err)?;
            return model_to_domain(existing);
        }

        // Only patched columns are written; the rest stay Unchanged.
        let mut active: booking::ActiveModel = existing.into();
        if let Some(vehicle_id) = patch.vehicle_id {
            active.vehicle_id = Set(vehicle_id);
        }
        if let Some(start_time) = patch.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = patch.end_time {
            active.end_time = Set(end_time);
        }
        if let Some(is_favorite) = patch.is_favorite {
            active.is_favorite = Set(is_favorite);
        }
        let model = active.update(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        model_to_domain(model)
    }

    async fn commit(&self, b: NewBooking) -> DomainResult<Booking> {
        let spot_id = b.spot_id;
        let new_model = new_active_model(b)?;

        let txn = self.db.begin().await.map_err(db_err)?;

        let claimed = spot::Entity::find_by_id(spot_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Spot", spot_id))?;

        let model = new_model.insert(&txn).await.map_err(db_err)?;

        let mut spot_active: spot::ActiveModel = claimed.into();
        spot_active.is_available = Set(false);
        spot_active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        debug!(booking_id = model.id, spot_id, "Committed booking");
        model_to_domain(model)
    }

    async fn release(&self, id: i32, status: BookingStatus) -> DomainResult<Booking> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = find_model(&txn, id).await?;
        let spot_id = existing.spot_id;

        let mut active: booking::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        let model = active.update(&txn).await.map_err(db_err)?;

        let others = booking::Entity::find()
            .filter(booking::Column::SpotId.eq(spot_id))
            .filter(booking::Column::Id.ne(id))
            .filter(booking::Column::Status.is_in(ACTIVE_STATUSES))
            .count(&txn)
            .await
            .map_err(db_err)?;
        let still_held = others > 0;

        spot::Entity::update_many()
            .col_expr(spot::Column::IsAvailable, Expr::value(!still_held))
            .filter(spot::Column::Id.eq(spot_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        debug!(booking_id = id, spot_id, %status, still_held, "Released booking");
        model_to_domain(model)
    }
}
