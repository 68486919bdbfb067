//! Booking domain entity

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingStatus {
    /// Created but not yet confirmed
    #[default]
    Pending,
    /// Spot claimed
    Confirmed,
    /// Cancelled by the owner
    Canceled,
    /// Parking session finished
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "canceled" => Some(Self::Canceled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Active bookings hold their spot and take part in conflict detection
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether two intervals collide for booking purposes.
///
/// Boundaries are inclusive: a booking ending at 10:00 conflicts with one
/// starting at 10:00.
pub fn intervals_conflict(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Parking booking
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub spot_id: i32,
    /// Denormalized from the spot for per-location queries
    pub location_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    /// Human-shareable code, e.g. `PARK-7K2Q9XMA`
    pub booking_code: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub is_favorite: bool,
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Whether this booking blocks its spot for `[start, end]`
    pub fn blocks(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.is_active() && intervals_conflict(self.start_time, self.end_time, start, end)
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    pub fn apply(&mut self, patch: &BookingPatch) {
        if let Some(vehicle_id) = patch.vehicle_id {
            self.vehicle_id = vehicle_id;
        }
        if let Some(start) = patch.start_time {
            self.start_time = start;
        }
        if let Some(end) = patch.end_time {
            self.end_time = end;
        }
        if let Some(favorite) = patch.is_favorite {
            self.is_favorite = favorite;
        }
    }
}

/// Input for storing a booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i32,
    pub vehicle_id: i32,
    pub spot_id: i32,
    pub location_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Defaults to `Pending` when not given
    pub status: Option<BookingStatus>,
    pub booking_code: String,
    pub total_amount: Decimal,
}

/// Owner-editable booking fields.
///
/// Spot, location and owner cannot be changed, and status only moves
/// through cancel/complete so the spot flag stays in step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub vehicle_id: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_favorite: Option<bool>,
}

impl BookingPatch {
    pub fn is_empty(&self) -> bool {
        self.vehicle_id.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.is_favorite.is_none()
    }
}

/// Equality filter for booking queries; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub user_id: Option<i32>,
    pub location_id: Option<i32>,
    pub spot_id: Option<i32>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn for_user(user_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    pub fn for_spot(spot_id: i32) -> Self {
        Self {
            spot_id: Some(spot_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.user_id.map_or(true, |id| booking.user_id == id)
            && self.location_id.map_or(true, |id| booking.location_id == id)
            && self.spot_id.map_or(true, |id| booking.spot_id == id)
            && self.status.map_or(true, |s| booking.status == s)
    }
}

// ── Tests ──────────────────────────────────────────────────────
