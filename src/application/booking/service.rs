//! Booking orchestration
//!
//! Turns an availability answer into a confirmed booking and handles the
//! symmetric release paths (cancel, complete). Every path that reads or
//! changes the bookings of a location holds that location's lock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::availability::{validate_interval, AvailabilityResolver};
use super::code::generate_booking_code;
use super::fare::{FareCalculator, DEFAULT_BOOKING_FEE};
use super::locks::LocationLocks;
use crate::domain::{
    Booking, BookingFilter, BookingPatch, BookingStatus, DomainError, DomainResult, NewBooking,
    RepositoryProvider, Spot,
};

/// Tunables for booking creation
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPolicy {
    /// Reject requests whose start time is already in the past
    pub reject_past_start: bool,
    pub booking_fee: Decimal,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            reject_past_start: false,
            booking_fee: DEFAULT_BOOKING_FEE,
        }
    }
}

/// Parking booking request with parsed times
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub user_id: i32,
    pub vehicle_id: i32,
    pub location_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Parse an RFC 3339 / ISO 8601 timestamp
pub fn parse_timestamp(field: &str, value: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::InvalidInterval(format!("invalid {} '{}': {}", field, value, e)))
}

/// Service for parking booking operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    resolver: AvailabilityResolver,
    locks: LocationLocks,
    fares: FareCalculator,
    policy: BookingPolicy,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self::with_policy(repos, BookingPolicy::default())
    }

    pub fn with_policy(repos: Arc<dyn RepositoryProvider>, policy: BookingPolicy) -> Self {
        Self {
            resolver: AvailabilityResolver::new(repos.clone()),
            repos,
            locks: LocationLocks::new(),
            fares: FareCalculator::new(policy.booking_fee),
            policy,
        }
    }

    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    // ── Availability & fares ───────────────────────────────────

    /// Spots at the location free for the whole interval, in creation order
    pub async fn list_available_spots(
        &self,
        location_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Spot>> {
        validate_interval(start, end)?;
        self.resolver.available_spots(location_id, start, end).await
    }

    /// `list_available_spots` taking ISO 8601 timestamps
    pub async fn list_available_spots_iso(
        &self,
        location_id: i32,
        start: &str,
        end: &str,
    ) -> DomainResult<Vec<Spot>> {
        let start = parse_timestamp("start_time", start)?;
        let end = parse_timestamp("end_time", end)?;
        self.list_available_spots(location_id, start, end).await
    }

    pub fn compute_fare(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        hourly_rate: Decimal,
    ) -> DomainResult<Decimal> {
        self.fares.fare(start, end, hourly_rate)
    }

    // ── Creation ───────────────────────────────────────────────

    /// Book the first free spot at the location and confirm it.
    ///
    /// Vehicle ownership is not checked here.
    pub async fn create_booking(&self, request: BookingRequest) -> DomainResult<Booking> {
        let location_id = request.location_id;
        let result = self.try_create(request).await;

        match &result {
            Ok(booking) => {
                metrics::counter!("bookings_created_total").increment(1);
                info!(
                    booking_id = booking.id,
                    booking_code = %booking.booking_code,
                    spot_id = booking.spot_id,
                    location_id,
                    total_amount = %booking.total_amount,
                    "Parking booking confirmed"
                );
            }
            Err(e) => {
                metrics::counter!("bookings_rejected_total", "reason" => e.kind()).increment(1);
                warn!(location_id, error = %e, "Parking booking rejected");
            }
        }
        result
    }

    /// `create_booking` taking ISO 8601 timestamps
    pub async fn create_parking_booking(
        &self,
        user_id: i32,
        vehicle_id: i32,
        location_id: i32,
        start: &str,
        end: &str,
    ) -> DomainResult<Booking> {
        let start_time = parse_timestamp("start_time", start)?;
        let end_time = parse_timestamp("end_time", end)?;
        self.create_booking(BookingRequest {
            user_id,
            vehicle_id,
            location_id,
            start_time,
            end_time,
        })
        .await
    }

    async fn try_create(&self, request: BookingRequest) -> DomainResult<Booking> {
        validate_interval(request.start_time, request.end_time)?;
        if self.policy.reject_past_start && request.start_time < Utc::now() {
            return Err(DomainError::InvalidInterval(
                "start_time is in the past".to_string(),
            ));
        }

        let _guard = self.locks.acquire(request.location_id).await;

        let spot = self
            .resolver
            .available_spots(request.location_id, request.start_time, request.end_time)
            .await?
            .into_iter()
            .next()
            .ok_or(DomainError::NoAvailability {
                location_id: request.location_id,
            })?;

        let location = self
            .repos
            .locations()
            .find_by_id(request.location_id)
            .await?
            .ok_or(DomainError::LocationNotFound(request.location_id))?;

        let total_amount =
            self.fares
                .fare(request.start_time, request.end_time, location.hourly_rate)?;

        debug!(spot_id = spot.id, spot_number = %spot.spot_number, "Claiming spot");

        self.repos
            .bookings()
            .commit(NewBooking {
                user_id: request.user_id,
                vehicle_id: request.vehicle_id,
                spot_id: spot.id,
                location_id: request.location_id,
                start_time: request.start_time,
                end_time: request.end_time,
                status: Some(BookingStatus::Confirmed),
                booking_code: generate_booking_code(),
                total_amount,
            })
            .await
    }

    // ── Release paths ──────────────────────────────────────────

    /// Cancel an active booking owned by `user_id` and free its spot.
    ///
    /// Cancelling a booking that is no longer active fails with `NotFound`.
    pub async fn cancel_booking(&self, booking_id: i32, user_id: i32) -> DomainResult<Booking> {
        let booking = self
            .release(booking_id, user_id, BookingStatus::Canceled)
            .await?;
        metrics::counter!("bookings_canceled_total").increment(1);
        info!(booking_id, spot_id = booking.spot_id, "Parking booking canceled");
        Ok(booking)
    }

    /// `cancel_booking` without the returned record
    pub async fn cancel_parking_booking(&self, booking_id: i32, user_id: i32) -> DomainResult<()> {
        self.cancel_booking(booking_id, user_id).await.map(|_| ())
    }

    /// Mark an active booking as completed and free its spot
    pub async fn complete_booking(&self, booking_id: i32, user_id: i32) -> DomainResult<Booking> {
        let booking = self
            .release(booking_id, user_id, BookingStatus::Completed)
            .await?;
        info!(booking_id, spot_id = booking.spot_id, "Parking booking completed");
        Ok(booking)
    }

    async fn release(
        &self,
        booking_id: i32,
        user_id: i32,
        status: BookingStatus,
    ) -> DomainResult<Booking> {
        let booking = self.owned_booking(booking_id, user_id).await?;
        let _guard = self.locks.acquire(booking.location_id).await;

        // Re-read under the lock: a concurrent release may have won.
        let current = self.owned_booking(booking_id, user_id).await?;
        if !current.is_active() {
            return Err(DomainError::NotFound {
                entity: "ActiveBooking",
                field: "id",
                value: booking_id.to_string(),
            });
        }

        self.repos.bookings().release(booking_id, status).await
    }

    // ── Owner operations ───────────────────────────────────────

    /// Partial update by the owner.
    ///
    /// Changing the interval does not re-check availability against other
    /// bookings on the spot.
    pub async fn modify_booking(
        &self,
        booking_id: i32,
        user_id: i32,
        patch: BookingPatch,
    ) -> DomainResult<Booking> {
        if patch.is_empty() {
            return Err(DomainError::Validation("nothing to update".to_string()));
        }
        let booking = self.owned_booking(booking_id, user_id).await?;
        let _guard = self.locks.acquire(booking.location_id).await;

        let updated = self.repos.bookings().update(booking_id, patch).await?;
        info!(booking_id, "Parking booking modified");
        Ok(updated)
    }

    pub async fn set_favorite(
        &self,
        booking_id: i32,
        user_id: i32,
        is_favorite: bool,
    ) -> DomainResult<Booking> {
        let booking = self.owned_booking(booking_id, user_id).await?;
        let _guard = self.locks.acquire(booking.location_id).await;

        self.repos
            .bookings()
            .update(
                booking_id,
                BookingPatch {
                    is_favorite: Some(is_favorite),
                    ..Default::default()
                },
            )
            .await
    }

    /// Booking visible to its owner only
    pub async fn get_booking(&self, booking_id: i32, user_id: i32) -> DomainResult<Booking> {
        self.owned_booking(booking_id, user_id).await
    }

    pub async fn list_user_bookings(&self, user_id: i32) -> DomainResult<Vec<Booking>> {
        self.repos
            .bookings()
            .find_where(BookingFilter::for_user(user_id))
            .await
    }

    async fn owned_booking(&self, booking_id: i32, user_id: i32) -> DomainResult<Booking> {
        let booking = self
            .repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))?;
        if !booking.is_owned_by(user_id) {
            return Err(DomainError::Forbidden(format!(
                "booking {} belongs to another user",
                booking_id
            )));
        }
        Ok(booking)
    }
}
