//! Transportation business logic service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::{
    BookingStatus, DomainError, DomainResult, NewTransportationBooking, NewTransportationType,
    RepositoryProvider, TransportationBooking, TransportationType,
};

/// A ride request from a user
#[derive(Debug, Clone, PartialEq)]
pub struct TransportationRequest {
    pub transportation_type_id: i32,
    pub parking_booking_id: Option<i32>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: DateTime<Utc>,
    pub is_shared: bool,
    /// Trip length used for the per-km component; zero when unknown
    pub distance_km: Option<Decimal>,
}

/// Reference rows inserted on first start
pub fn default_transportation_types() -> Vec<NewTransportationType> {
    vec![
        NewTransportationType {
            name: "Cab".into(),
            icon: "taxi".into(),
            base_rate: Decimal::new(350, 2),
            per_km_rate: Decimal::new(150, 2),
        },
        NewTransportationType {
            name: "Shuttle".into(),
            icon: "bus".into(),
            base_rate: Decimal::new(200, 2),
            per_km_rate: Decimal::new(25, 2),
        },
    ]
}

/// Service for ride bookings at transit hubs
pub struct TransportationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TransportationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Insert the default types when the table is empty. Returns how many were added.
    pub async fn seed_default_types(&self) -> DomainResult<usize> {
        if !self.repos.transportation().list_types().await?.is_empty() {
            return Ok(0);
        }
        let defaults = default_transportation_types();
        let count = defaults.len();
        for t in defaults {
            self.repos.transportation().create_type(t).await?;
        }
        info!(count, "Seeded transportation types");
        Ok(count)
    }

    pub async fn list_transportation_types(&self) -> DomainResult<Vec<TransportationType>> {
        self.repos.transportation().list_types().await
    }

    pub async fn book_transportation(
        &self,
        user_id: i32,
        request: TransportationRequest,
    ) -> DomainResult<TransportationBooking> {
        let ride_type = self
            .repos
            .transportation()
            .find_type(request.transportation_type_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("TransportationType", request.transportation_type_id)
            })?;

        if let Some(parking_id) = request.parking_booking_id {
            let parking = self
                .repos
                .bookings()
                .find_by_id(parking_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Booking", parking_id))?;
            if !parking.is_owned_by(user_id) {
                return Err(DomainError::Forbidden(format!(
                    "booking {} belongs to another user",
                    parking_id
                )));
            }
            if !parking.is_active() {
                return Err(DomainError::NotFound {
                    entity: "ActiveBooking",
                    field: "id",
                    value: parking_id.to_string(),
                });
            }
        }

        let distance = request.distance_km.unwrap_or(Decimal::ZERO);
        if distance.is_sign_negative() {
            return Err(DomainError::Validation(
                "distance_km must not be negative".to_string(),
            ));
        }

        let ride = self
            .repos
            .transportation()
            .create_booking(NewTransportationBooking {
                user_id,
                transportation_type_id: ride_type.id,
                parking_booking_id: request.parking_booking_id,
                pickup_location: request.pickup_location,
                dropoff_location: request.dropoff_location,
                pickup_time: request.pickup_time,
                is_shared: request.is_shared,
                status: Some(BookingStatus::Confirmed),
                amount: ride_type.quote(distance),
            })
            .await?;

        info!(
            ride_id = ride.id,
            user_id,
            transportation_type = %ride_type.name,
            amount = %ride.amount,
            "Transportation booked"
        );
        Ok(ride)
    }

    pub async fn cancel_transportation(
        &self,
        ride_id: i32,
        user_id: i32,
    ) -> DomainResult<TransportationBooking> {
        let ride = self
            .repos
            .transportation()
            .find_booking(ride_id)
            .await?
            .filter(|r| r.status.is_active())
            .ok_or_else(|| DomainError::not_found("TransportationBooking", ride_id))?;
        if ride.user_id != user_id {
            return Err(DomainError::Forbidden(format!(
                "ride {} belongs to another user",
                ride_id
            )));
        }

        let canceled = self
            .repos
            .transportation()
            .update_booking_status(ride_id, BookingStatus::Canceled)
            .await?;
        info!(ride_id, "Transportation canceled");
        Ok(canceled)
    }

    pub async fn list_user_transportation(
        &self,
        user_id: i32,
    ) -> DomainResult<Vec<TransportationBooking>> {
        self.repos
            .transportation()
            .find_bookings_by_user(user_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingRepository, NewBooking};
    use crate::infrastructure::InMemoryStore;
    use chrono::TimeZone;

    fn ride(type_id: i32, parking: Option<i32>) -> TransportationRequest {
        TransportationRequest {
            transportation_type_id: type_id,
            parking_booking_id: parking,
            pickup_location: "North Hub P+R".into(),
            dropoff_location: "Office Park".into(),
            pickup_time: Utc.with_ymd_and_hms(2030, 5, 1, 8, 30, 0).unwrap(),
            is_shared: true,
            distance_km: Some(Decimal::new(40, 1)),
        }
    }

    async fn service() -> (Arc<InMemoryStore>, TransportationService) {
        let store = Arc::new(InMemoryStore::new());
        let service = TransportationService::new(store.clone());
        service.seed_default_types().await.unwrap();
        (store, service)
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let (_, service) = service().await;
        assert_eq!(service.seed_default_types().await.unwrap(), 0);
        assert_eq!(service.list_transportation_types().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ride_amount_uses_quote() {
        let (_, service) = service().await;
        let booked = service.book_transportation(5, ride(1, None)).await.unwrap();
        // 3.50 + 1.50 * 4.0
        assert_eq!(booked.amount, Decimal::new(950, 2));
        assert_eq!(booked.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn unknown_type_is_not_found() {
        let (_, service) = service().await;
        let err = service.book_transportation(5, ride(42, None)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    async fn parking_for(store: &InMemoryStore, user_id: i32) -> crate::domain::Booking {
        let start = Utc.with_ymd_and_hms(2030, 5, 1, 8, 0, 0).unwrap();
        BookingRepository::create(
            store,
            NewBooking {
                user_id,
                vehicle_id: 1,
                spot_id: 1,
                location_id: 1,
                start_time: start,
                end_time: start + chrono::Duration::hours(1),
                status: None,
                booking_code: "PARK-TEST0001".into(),
                total_amount: Decimal::ONE,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn parking_booking_must_belong_to_rider() {
        let (store, service) = service().await;
        let parking = parking_for(&store, 9).await;

        let err = service
            .book_transportation(5, ride(1, Some(parking.id)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(service.book_transportation(9, ride(1, Some(parking.id))).await.is_ok());
    }

    #[tokio::test]
    async fn ride_cannot_attach_to_finished_parking() {
        let (store, service) = service().await;
        let canceled = parking_for(&store, 9).await;
        BookingRepository::release(store.as_ref(), canceled.id, BookingStatus::Canceled)
            .await
            .unwrap();
        let completed = parking_for(&store, 9).await;
        BookingRepository::release(store.as_ref(), completed.id, BookingStatus::Completed)
            .await
            .unwrap();

        for parking_id in [canceled.id, completed.id] {
            let err = service
                .book_transportation(9, ride(1, Some(parking_id)))
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::NotFound { entity: "ActiveBooking", .. }));
        }
        assert!(service.list_user_transportation(9).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancel_twice_fails() {
        let (_, service) = service().await;
        let booked = service.book_transportation(5, ride(2, None)).await.unwrap();

        assert!(matches!(
            service.cancel_transportation(booked.id, 6).await,
            Err(DomainError::Forbidden(_))
        ));
        service.cancel_transportation(booked.id, 5).await.unwrap();
        assert!(matches!(
            service.cancel_transportation(booked.id, 5).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
