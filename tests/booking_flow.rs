//! End-to-end booking scenarios through `BookingService`, run against both
//! storage backends.

mod common;

use std::sync::Arc;

use rust_decimal::Decimal;

use common::{at, seed_location, seed_vehicle};
use transit_parking::application::{BookingRequest, BookingService};
use transit_parking::domain::{
    BookingPatch, BookingStatus, DomainError, RepositoryProvider, SpotPatch,
};

fn request(user_id: i32, location_id: i32, start: (u32, u32), end: (u32, u32)) -> BookingRequest {
    BookingRequest {
        user_id,
        vehicle_id: 1,
        location_id,
        start_time: at(start.0, start.1),
        end_time: at(end.0, end.1),
    }
}

async fn books_first_free_spot_with_fare(repos: Arc<dyn RepositoryProvider>) {
    let (location, spots) = seed_location(repos.as_ref(), 3).await;
    let service = BookingService::new(repos.clone());

    // 2.5h at 5.00 bills as 3h, plus the 1.50 fee
    let booking = service
        .create_booking(request(1, location.id, (9, 0), (11, 30)))
        .await
        .unwrap();
    assert_eq!(booking.spot_id, spots[0].id);
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.total_amount, Decimal::new(1650, 2));
    assert!(booking.booking_code.starts_with("PARK-"));

    let second = service
        .create_booking(request(2, location.id, (10, 0), (12, 0)))
        .await
        .unwrap();
    assert_eq!(second.spot_id, spots[1].id);

    let free = service
        .list_available_spots(location.id, at(9, 0), at(12, 0))
        .await
        .unwrap();
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].id, spots[2].id);
}

async fn full_location_reports_no_availability(repos: Arc<dyn RepositoryProvider>) {
    let (location, _) = seed_location(repos.as_ref(), 1).await;
    let service = BookingService::new(repos.clone());

    service
        .create_booking(request(1, location.id, (9, 0), (10, 0)))
        .await
        .unwrap();

    let err = service
        .create_booking(request(2, location.id, (9, 30), (11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NoAvailability { location_id } if location_id == location.id));
}

async fn touching_intervals_conflict(repos: Arc<dyn RepositoryProvider>) {
    let (location, _) = seed_location(repos.as_ref(), 1).await;
    let service = BookingService::new(repos.clone());

    service
        .create_booking(request(1, location.id, (9, 0), (10, 0)))
        .await
        .unwrap();

    let err = service
        .create_booking(request(2, location.id, (10, 0), (11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NoAvailability { .. }));

    // strictly later is fine
    service
        .create_booking(request(2, location.id, (10, 1), (11, 0)))
        .await
        .unwrap();
}

async fn cancel_frees_the_spot(repos: Arc<dyn RepositoryProvider>) {
    let (location, spots) = seed_location(repos.as_ref(), 1).await;
    let service = BookingService::new(repos.clone());

    let booking = service
        .create_booking(request(1, location.id, (9, 0), (10, 0)))
        .await
        .unwrap();
    let spot = repos.spots().find_by_id(spots[0].id).await.unwrap().unwrap();
    assert!(!spot.is_available);

    let canceled = service.cancel_booking(booking.id, 1).await.unwrap();
    assert_eq!(canceled.status, BookingStatus::Canceled);
    let spot = repos.spots().find_by_id(spots[0].id).await.unwrap().unwrap();
    assert!(spot.is_available);

    let rebooked = service
        .create_booking(request(2, location.id, (9, 0), (10, 0)))
        .await
        .unwrap();
    assert_eq!(rebooked.spot_id, spots[0].id);
}

async fn second_cancel_is_not_found(repos: Arc<dyn RepositoryProvider>) {
    let (location, _) = seed_location(repos.as_ref(), 1).await;
    let service = BookingService::new(repos.clone());

    let booking = service
        .create_booking(request(1, location.id, (9, 0), (10, 0)))
        .await
        .unwrap();
    service.cancel_parking_booking(booking.id, 1).await.unwrap();

    let err = service
        .cancel_parking_booking(booking.id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "ActiveBooking", .. }));

    let err = service.cancel_parking_booking(9_999, 1).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

async fn stale_flag_does_not_hide_free_spot(repos: Arc<dyn RepositoryProvider>) {
    let (location, spots) = seed_location(repos.as_ref(), 1).await;
    let service = BookingService::new(repos.clone());

    // an evening booking clears the flag, the morning is still free
    service
        .create_booking(request(1, location.id, (18, 0), (20, 0)))
        .await
        .unwrap();
    let morning = service
        .create_booking(request(2, location.id, (7, 0), (9, 0)))
        .await
        .unwrap();
    assert_eq!(morning.spot_id, spots[0].id);

    // nor does a set flag free an interval that is booked
    repos
        .spots()
        .update(
            spots[0].id,
            SpotPatch {
                is_available: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let err = service
        .create_booking(request(3, location.id, (8, 0), (8, 30)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NoAvailability { .. }));
}

async fn vehicle_of_another_user_is_accepted(repos: Arc<dyn RepositoryProvider>) {
    let (location, _) = seed_location(repos.as_ref(), 1).await;
    let theirs = seed_vehicle(repos.as_ref(), 50).await;
    let service = BookingService::new(repos.clone());

    let booking = service
        .create_booking(BookingRequest {
            vehicle_id: theirs.id,
            ..request(7, location.id, (9, 0), (10, 0))
        })
        .await
        .unwrap();
    assert_eq!(booking.user_id, 7);
    assert_eq!(booking.vehicle_id, theirs.id);
}

async fn concurrent_requests_claim_one_spot_once(repos: Arc<dyn RepositoryProvider>) {
    const CONTENDERS: i32 = 8;

    let (location, spots) = seed_location(repos.as_ref(), 1).await;
    let service = Arc::new(BookingService::new(repos.clone()));

    let mut tasks = Vec::new();
    for user_id in 1..=CONTENDERS {
        let service = service.clone();
        let location_id = location.id;
        tasks.push(tokio::spawn(async move {
            service
                .create_booking(request(user_id, location_id, (9, 0), (10, 0)))
                .await
        }));
    }

    let mut confirmed = Vec::new();
    let mut rejected = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(booking) => confirmed.push(booking),
            Err(DomainError::NoAvailability { .. }) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(confirmed.len(), 1);
    assert_eq!(rejected, CONTENDERS - 1);
    assert_eq!(confirmed[0].spot_id, spots[0].id);

    let active = repos
        .bookings()
        .find_active_for_location(location.id)
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

async fn concurrent_cancel_and_book_stay_consistent(repos: Arc<dyn RepositoryProvider>) {
    let (location, spots) = seed_location(repos.as_ref(), 1).await;
    let service = Arc::new(BookingService::new(repos.clone()));

    let held = service
        .create_booking(request(1, location.id, (9, 0), (10, 0)))
        .await
        .unwrap();

    let canceler = {
        let service = service.clone();
        tokio::spawn(async move { service.cancel_booking(held.id, 1).await })
    };
    let booker = {
        let service = service.clone();
        let location_id = location.id;
        tokio::spawn(async move {
            service
                .create_booking(request(2, location_id, (9, 30), (10, 30)))
                .await
        })
    };

    canceler.await.unwrap().unwrap();
    let booked = booker.await.unwrap();

    let active = repos
        .bookings()
        .find_active_for_location(location.id)
        .await
        .unwrap();
    let spot = repos.spots().find_by_id(spots[0].id).await.unwrap().unwrap();
    match booked {
        // ran after the cancel
        Ok(booking) => {
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].id, booking.id);
            assert!(!spot.is_available);
        }
        // ran before the cancel
        Err(DomainError::NoAvailability { .. }) => {
            assert!(active.is_empty());
            assert!(spot.is_available);
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
}

async fn favorite_toggles_do_not_undo_a_move(repos: Arc<dyn RepositoryProvider>) {
    const TOGGLES: usize = 20;
    let (location, _) = seed_location(repos.as_ref(), 1).await;
    let service = Arc::new(BookingService::new(repos.clone()));

    let booking = service
        .create_booking(request(1, location.id, (9, 0), (10, 0)))
        .await
        .unwrap();

    let mut tasks: Vec<_> = (0..TOGGLES)
        .map(|n| {
            let service = service.clone();
            tokio::spawn(async move { service.set_favorite(booking.id, 1, n % 2 == 0).await })
        })
        .collect();
    let mover = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .modify_booking(
                    booking.id,
                    1,
                    BookingPatch {
                        vehicle_id: Some(3),
                        start_time: Some(at(14, 0)),
                        end_time: Some(at(15, 0)),
                        ..Default::default()
                    },
                )
                .await
        })
    };
    tasks.insert(TOGGLES / 2, mover);
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let favored = service.set_favorite(booking.id, 1, true).await.unwrap();
    assert!(favored.is_favorite);

    let stored = repos
        .bookings()
        .find_by_id(booking.id)
        .await
        .unwrap()
        .expect("stored booking");
    assert_eq!(stored.start_time, at(14, 0));
    assert_eq!(stored.end_time, at(15, 0));
    assert_eq!(stored.vehicle_id, 3);
    assert!(stored.is_favorite);
    assert_eq!(stored.status, BookingStatus::Confirmed);
}

macro_rules! booking_flow {
    ($backend:ident, $factory:path) => {
        mod $backend {
            use super::*;

            booking_flow!(@cases $factory;
                books_first_free_spot_with_fare,
                full_location_reports_no_availability,
                touching_intervals_conflict,
                cancel_frees_the_spot,
                second_cancel_is_not_found,
                stale_flag_does_not_hide_free_spot,
                vehicle_of_another_user_is_accepted,
            );

            booking_flow!(@racing $factory;
                concurrent_requests_claim_one_spot_once,
                concurrent_cancel_and_book_stay_consistent,
                favorite_toggles_do_not_undo_a_move,
            );
        }
    };
    (@cases $factory:path; $($case:ident),* $(,)?) => {
        $(
            #[tokio::test]
            async fn $case() {
                super::$case($factory().await).await;
            }
        )*
    };
    (@racing $factory:path; $($case:ident),* $(,)?) => {
        $(
            #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
            async fn $case() {
                super::$case($factory().await).await;
            }
        )*
    };
}

booking_flow!(memory, common::memory_store);
booking_flow!(sqlite, common::sqlite_store);
