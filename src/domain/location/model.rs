//! Location domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use validator::Validate;

use crate::domain::repositories::not_blank;

/// Parking facility at a transit hub
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Declared capacity, raised by spot creation so it never falls below
    /// the number of spot rows
    pub total_spots: i32,
    pub hourly_rate: Decimal,
    /// Average review score (0.0 – 5.0)
    pub rating: f64,
    pub review_count: i32,
    pub has_transit_access: bool,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn apply(&mut self, patch: &LocationPatch) {
        if let Some(rate) = patch.hourly_rate {
            self.hourly_rate = rate;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(count) = patch.review_count {
            self.review_count = count;
        }
    }

    /// Fold one more review score into the running average.
    pub fn with_review(&self, score: f64) -> LocationPatch {
        let count = self.review_count + 1;
        let rating = (self.rating * self.review_count as f64 + score) / count as f64;
        LocationPatch {
            rating: Some(rating),
            review_count: Some(count),
            ..Default::default()
        }
    }
}

/// Input for provisioning a location
#[derive(Debug, Clone, Validate)]
pub struct NewLocation {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0))]
    pub total_spots: i32,
    pub hourly_rate: Decimal,
    pub has_transit_access: bool,
}

/// The only mutable fields of a location
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub hourly_rate: Option<Decimal>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
}

impl LocationPatch {
    pub fn is_empty(&self) -> bool {
        self.hourly_rate.is_none() && self.rating.is_none() && self.review_count.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_location() -> Location {
        Location {
            id: 1,
            name: "Central Station P+R".into(),
            address: "1 Station Square".into(),
            latitude: 52.52,
            longitude: 13.405,
            total_spots: 40,
            hourly_rate: Decimal::new(500, 2),
            rating: 4.0,
            review_count: 3,
            has_transit_access: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn apply_only_touches_set_fields() {
        let mut loc = sample_location();
        loc.apply(&LocationPatch {
            hourly_rate: Some(Decimal::new(650, 2)),
            ..Default::default()
        });
        assert_eq!(loc.hourly_rate, Decimal::new(650, 2));
        assert_eq!(loc.rating, 4.0);
        assert_eq!(loc.review_count, 3);
    }

    #[test]
    fn review_updates_running_average() {
        let loc = sample_location();
        let patch = loc.with_review(5.0);
        assert_eq!(patch.review_count, Some(4));
        assert_eq!(patch.rating, Some(4.25));
        assert!(patch.hourly_rate.is_none());
    }

    #[test]
    fn blank_name_fails_validation() {
        let new = NewLocation {
            name: "   ".into(),
            address: "Somewhere".into(),
            latitude: 0.0,
            longitude: 0.0,
            total_spots: 1,
            hourly_rate: Decimal::ONE,
            has_transit_access: false,
        };
        assert!(new.validate().is_err());
    }

    #[test]
    fn out_of_range_latitude_fails_validation() {
        let new = NewLocation {
            name: "North".into(),
            address: "Pole".into(),
            latitude: 91.0,
            longitude: 0.0,
            total_spots: 1,
            hourly_rate: Decimal::ONE,
            has_transit_access: false,
        };
        assert!(new.validate().is_err());
    }
}
