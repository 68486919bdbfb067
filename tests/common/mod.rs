//! Shared fixtures for the integration suites
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm_migration::MigratorTrait;

use transit_parking::domain::{
    Location, NewLocation, NewSpot, NewVehicle, RepositoryProvider, Spot, SpotType, Vehicle,
};
use transit_parking::infrastructure::database::migrator::Migrator;
use transit_parking::{init_database, DatabaseConfig, InMemoryStore, SeaOrmRepositoryProvider};

pub async fn memory_store() -> Arc<dyn RepositoryProvider> {
    Arc::new(InMemoryStore::new())
}

/// Fresh, migrated, private SQLite database
pub async fn sqlite_store() -> Arc<dyn RepositoryProvider> {
    let db = init_database(&DatabaseConfig::sqlite_memory())
        .await
        .expect("connect to sqlite memory db");
    Migrator::up(&db, None).await.expect("run migrations");
    Arc::new(SeaOrmRepositoryProvider::new(db))
}

/// 2030-05-01 at `hour:minute` UTC
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 5, 1, hour, minute, 0).unwrap()
}

pub fn new_location(name: &str, hourly_rate: Decimal) -> NewLocation {
    NewLocation {
        name: name.to_string(),
        address: format!("{} Station Road", name),
        latitude: 51.5,
        longitude: -0.12,
        total_spots: 0,
        hourly_rate,
        has_transit_access: true,
    }
}

pub fn new_spot(location_id: i32, number: &str) -> NewSpot {
    NewSpot {
        location_id,
        spot_number: number.to_string(),
        level: Some("G".to_string()),
        section: None,
        spot_type: SpotType::Standard,
    }
}

/// Location with `spots` spots numbered S-1.., hourly rate 5.00
pub async fn seed_location(
    repos: &dyn RepositoryProvider,
    spots: usize,
) -> (Location, Vec<Spot>) {
    let location = repos
        .locations()
        .create(new_location("Riverside", Decimal::new(500, 2)))
        .await
        .expect("create location");
    let mut created = Vec::with_capacity(spots);
    for n in 1..=spots {
        let spot = repos
            .spots()
            .create(new_spot(location.id, &format!("S-{}", n)))
            .await
            .expect("create spot");
        created.push(spot);
    }
    (location, created)
}

pub async fn seed_vehicle(repos: &dyn RepositoryProvider, user_id: i32) -> Vehicle {
    repos
        .vehicles()
        .create(NewVehicle {
            user_id,
            license_plate: format!("U{}-CAR", user_id),
            make: None,
            model: None,
            color: None,
        })
        .await
        .expect("create vehicle")
}
