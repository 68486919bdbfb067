//! Provisioning service
//!
//! Locations and spots are created by operators; vehicles are registered
//! by their owners. Locations are never deleted.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Location, LocationPatch, NewLocation, NewSpot, NewVehicle,
    RepositoryProvider, Spot, SpotFilter, Vehicle,
};

pub struct ProvisioningService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProvisioningService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Locations ──────────────────────────────────────────────

    pub async fn create_location(&self, new: NewLocation) -> DomainResult<Location> {
        let location = self.repos.locations().create(new).await?;
        info!(location_id = location.id, name = %location.name, "Location created");
        Ok(location)
    }

    pub async fn get_location(&self, location_id: i32) -> DomainResult<Location> {
        self.repos
            .locations()
            .find_by_id(location_id)
            .await?
            .ok_or(DomainError::LocationNotFound(location_id))
    }

    pub async fn list_locations(&self) -> DomainResult<Vec<Location>> {
        self.repos.locations().find_all().await
    }

    pub async fn update_location(
        &self,
        location_id: i32,
        patch: LocationPatch,
    ) -> DomainResult<Location> {
        if patch.is_empty() {
            return Err(DomainError::Validation("nothing to update".to_string()));
        }
        if patch.hourly_rate.is_some_and(|r| r.is_sign_negative()) {
            return Err(DomainError::Validation(
                "hourly_rate must not be negative".to_string(),
            ));
        }
        self.get_location(location_id).await?;
        let updated = self.repos.locations().update(location_id, patch).await?;
        info!(location_id, hourly_rate = %updated.hourly_rate, "Location updated");
        Ok(updated)
    }

    /// Fold a 1–5 review score into the location's rating
    pub async fn rate_location(&self, location_id: i32, score: f64) -> DomainResult<Location> {
        if !(1.0..=5.0).contains(&score) {
            return Err(DomainError::Validation(format!(
                "score {} outside 1..=5",
                score
            )));
        }
        let location = self
            .repos
            .locations()
            .add_review(location_id, score)
            .await
            .map_err(|e| match e {
                DomainError::NotFound {
                    entity: "Location", ..
                } => DomainError::LocationNotFound(location_id),
                other => other,
            })?;
        info!(
            location_id,
            rating = location.rating,
            review_count = location.review_count,
            "Review recorded"
        );
        Ok(location)
    }

    // ── Spots ──────────────────────────────────────────────────

    pub async fn add_spot(&self, new: NewSpot) -> DomainResult<Spot> {
        let location_id = new.location_id;
        self.get_location(location_id).await?;
        let spot = self.repos.spots().create(new).await?;
        info!(spot_id = spot.id, location_id, spot_number = %spot.spot_number, "Spot added");
        Ok(spot)
    }

    /// All spots of a location in creation order
    pub async fn list_spots(&self, location_id: i32) -> DomainResult<Vec<Spot>> {
        self.get_location(location_id).await?;
        self.repos
            .spots()
            .find_where(SpotFilter::at_location(location_id))
            .await
    }

    // ── Vehicles ───────────────────────────────────────────────

    pub async fn register_vehicle(&self, new: NewVehicle) -> DomainResult<Vehicle> {
        let vehicle = self.repos.vehicles().create(new).await?;
        info!(vehicle_id = vehicle.id, user_id = vehicle.user_id, "Vehicle registered");
        Ok(vehicle)
    }

    pub async fn list_vehicles(&self, user_id: i32) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_by_user(user_id).await
    }

    pub async fn remove_vehicle(&self, vehicle_id: i32, user_id: i32) -> DomainResult<()> {
        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", vehicle_id))?;
        if vehicle.user_id != user_id {
            return Err(DomainError::Forbidden(format!(
                "vehicle {} belongs to another user",
                vehicle_id
            )));
        }
        self.repos.vehicles().delete(vehicle_id).await?;
        info!(vehicle_id, "Vehicle removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SpotType;
    use crate::infrastructure::InMemoryStore;
    use rust_decimal::Decimal;

    fn service() -> ProvisioningService {
        ProvisioningService::new(Arc::new(InMemoryStore::new()))
    }

    fn hub() -> NewLocation {
        NewLocation {
            name: "East Hub".into(),
            address: "12 Rail Way".into(),
            latitude: 48.1,
            longitude: 11.6,
            total_spots: 2,
            hourly_rate: Decimal::new(300, 2),
            has_transit_access: true,
        }
    }

    #[tokio::test]
    async fn spot_needs_existing_location() {
        let service = service();
        let err = service
            .add_spot(NewSpot {
                location_id: 77,
                spot_number: "A1".into(),
                level: None,
                section: None,
                spot_type: SpotType::Ev,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::LocationNotFound(77)));
    }

    #[tokio::test]
    async fn update_and_rate_location() {
        let service = service();
        let loc = service.create_location(hub()).await.unwrap();

        let updated = service
            .update_location(
                loc.id,
                LocationPatch {
                    hourly_rate: Some(Decimal::new(450, 2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.hourly_rate, Decimal::new(450, 2));

        let rated = service.rate_location(loc.id, 4.0).await.unwrap();
        assert_eq!(rated.review_count, 1);
        assert_eq!(rated.rating, 4.0);

        assert!(matches!(
            service.rate_location(loc.id, 9.0).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.update_location(loc.id, LocationPatch::default()).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn simultaneous_reviews_all_land() {
        let service = Arc::new(service());
        let loc = service.create_location(hub()).await.unwrap();

        let handles: Vec<_> = (0..30)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.rate_location(loc.id, 2.0).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let rated = service.get_location(loc.id).await.unwrap();
        assert_eq!(rated.review_count, 30);
        assert_eq!(rated.rating, 2.0);
        assert!(matches!(
            service.rate_location(404, 3.0).await,
            Err(DomainError::LocationNotFound(404))
        ));
    }

    #[tokio::test]
    async fn vehicle_removal_is_owner_only() {
        let service = service();
        let vehicle = service
            .register_vehicle(NewVehicle {
                user_id: 3,
                license_plate: "B-XY 123".into(),
                make: Some("Skoda".into()),
                model: None,
                color: None,
            })
            .await
            .unwrap();

        assert!(matches!(
            service.remove_vehicle(vehicle.id, 4).await,
            Err(DomainError::Forbidden(_))
        ));
        service.remove_vehicle(vehicle.id, 3).await.unwrap();
        assert!(service.list_vehicles(3).await.unwrap().is_empty());
        assert!(matches!(
            service.remove_vehicle(vehicle.id, 3).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
