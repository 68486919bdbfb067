//! Spot domain entity

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::domain::repositories::not_blank;

/// Kind of parking bay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpotType {
    #[default]
    Standard,
    Accessible,
    /// Bay with an EV charger
    Ev,
}

impl SpotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Accessible => "accessible",
            Self::Ev => "ev",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(Self::Standard),
            "accessible" => Some(Self::Accessible),
            "ev" => Some(Self::Ev),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parking spot
///
/// `is_available` is a cached hint maintained on booking commit and release.
/// Whether a spot is free for an interval is always decided from the active
/// bookings, never from this flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    pub id: i32,
    pub location_id: i32,
    pub spot_number: String,
    pub level: Option<String>,
    pub section: Option<String>,
    pub is_available: bool,
    pub spot_type: SpotType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewSpot {
    pub location_id: i32,
    #[validate(custom(function = "not_blank"))]
    pub spot_number: String,
    pub level: Option<String>,
    pub section: Option<String>,
    pub spot_type: SpotType,
}

/// Mutable spot fields. The owning location cannot be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotPatch {
    pub spot_number: Option<String>,
    pub level: Option<String>,
    pub section: Option<String>,
    pub spot_type: Option<SpotType>,
    pub is_available: Option<bool>,
}

impl Spot {
    pub fn apply(&mut self, patch: &SpotPatch) {
        if let Some(number) = &patch.spot_number {
            self.spot_number = number.clone();
        }
        if let Some(level) = &patch.level {
            self.level = Some(level.clone());
        }
        if let Some(section) = &patch.section {
            self.section = Some(section.clone());
        }
        if let Some(spot_type) = patch.spot_type {
            self.spot_type = spot_type;
        }
        if let Some(available) = patch.is_available {
            self.is_available = available;
        }
    }
}

/// Equality filter for spot queries; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotFilter {
    pub location_id: Option<i32>,
    pub is_available: Option<bool>,
    pub spot_type: Option<SpotType>,
}

impl SpotFilter {
    pub fn at_location(location_id: i32) -> Self {
        Self {
            location_id: Some(location_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, spot: &Spot) -> bool {
        self.location_id.map_or(true, |id| spot.location_id == id)
            && self.is_available.map_or(true, |a| spot.is_available == a)
            && self.spot_type.map_or(true, |t| spot.spot_type == t)
    }
}
