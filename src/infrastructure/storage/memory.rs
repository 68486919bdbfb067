//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;
use validator::Validate;

use crate::domain::booking::{
    Booking, BookingFilter, BookingPatch, BookingRepository, BookingStatus, NewBooking,
};
use crate::domain::location::{Location, LocationPatch, LocationRepository, NewLocation};
use crate::domain::spot::{NewSpot, Spot, SpotFilter, SpotPatch, SpotRepository};
use crate::domain::transportation::{
    NewTransportationBooking, NewTransportationType, TransportationBooking,
    TransportationRepository, TransportationType,
};
use crate::domain::vehicle::{NewVehicle, Vehicle, VehicleRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Per-table ID sequence starting at 1
struct Sequence(AtomicI32);

impl Sequence {
    fn new() -> Self {
        Self(AtomicI32::new(1))
    }

    fn next(&self) -> i32 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// In-memory storage for development and testing.
///
/// Lock order for multi-table writes is locations, then spots, then bookings.
pub struct InMemoryStore {
    locations: DashMap<i32, Location>,
    spots: DashMap<i32, Spot>,
    bookings: DashMap<i32, Booking>,
    vehicles: DashMap<i32, Vehicle>,
    transportation_types: DashMap<i32, TransportationType>,
    transportation_bookings: DashMap<i32, TransportationBooking>,
    location_seq: Sequence,
    spot_seq: Sequence,
    booking_seq: Sequence,
    vehicle_seq: Sequence,
    transportation_type_seq: Sequence,
    transportation_booking_seq: Sequence,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            locations: DashMap::new(),
            spots: DashMap::new(),
            bookings: DashMap::new(),
            vehicles: DashMap::new(),
            transportation_types: DashMap::new(),
            transportation_bookings: DashMap::new(),
            location_seq: Sequence::new(),
            spot_seq: Sequence::new(),
            booking_seq: Sequence::new(),
            vehicle_seq: Sequence::new(),
            transportation_type_seq: Sequence::new(),
            transportation_booking_seq: Sequence::new(),
        }
    }

    fn sorted<T: Clone>(map: &DashMap<i32, T>, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<(i32, T)> = map
            .iter()
            .filter(|e| keep(e.value()))
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, v)| v).collect()
    }

    fn booking_from(&self, id: i32, b: NewBooking) -> Booking {
        Booking {
            id,
            user_id: b.user_id,
            vehicle_id: b.vehicle_id,
            spot_id: b.spot_id,
            location_id: b.location_id,
            start_time: b.start_time,
            end_time: b.end_time,
            status: b.status.unwrap_or_default(),
            booking_code: b.booking_code,
            total_amount: b.total_amount,
            created_at: Utc::now(),
            is_favorite: false,
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStore {
    fn locations(&self) -> &dyn LocationRepository {
        self
    }

    fn spots(&self) -> &dyn SpotRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        self
    }

    fn transportation(&self) -> &dyn TransportationRepository {
        self
    }
}

fn check_interval(start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> DomainResult<()> {
    if end <= start {
        return Err(DomainError::InvalidInterval(
            "end_time must be after start_time".to_string(),
        ));
    }
    Ok(())
}

// ── Locations ───────────────────────────────────────────────────

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn create(&self, l: NewLocation) -> DomainResult<Location> {
        l.validate()?;
        let location = Location {
            id: self.location_seq.next(),
            name: l.name,
            address: l.address,
            latitude: l.latitude,
            longitude: l.longitude,
            total_spots: l.total_spots,
            hourly_rate: l.hourly_rate,
            rating: 0.0,
            review_count: 0,
            has_transit_access: l.has_transit_access,
            created_at: Utc::now(),
        };
        self.locations.insert(location.id, location.clone());
        Ok(location)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Location>> {
        Ok(self.locations.get(&id).map(|l| l.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Location>> {
        Ok(Self::sorted(&self.locations, |_| true))
    }

    async fn update(&self, id: i32, patch: LocationPatch) -> DomainResult<Location> {
        let mut location = self
            .locations
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Location", id))?;
        location.apply(&patch);
        Ok(location.clone())
    }

    async fn add_review(&self, id: i32, score: f64) -> DomainResult<Location> {
        let mut location = self
            .locations
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Location", id))?;
        let patch = location.with_review(score);
        location.apply(&patch);
        Ok(location.clone())
    }
}

// ── Spots ───────────────────────────────────────────────────────

#[async_trait]
impl SpotRepository for InMemoryStore {
    async fn create(&self, s: NewSpot) -> DomainResult<Spot> {
        s.validate()?;
        // Held across the insert so concurrent additions count each other.
        let mut location = self
            .locations
            .get_mut(&s.location_id)
            .ok_or_else(|| DomainError::not_found("Location", s.location_id))?;
        let spot = Spot {
            id: self.spot_seq.next(),
            location_id: s.location_id,
            spot_number: s.spot_number,
            level: s.level,
            section: s.section,
            is_available: true,
            spot_type: s.spot_type,
            created_at: Utc::now(),
        };
        self.spots.insert(spot.id, spot.clone());

        let count = self
            .spots
            .iter()
            .filter(|s| s.location_id == spot.location_id)
            .count() as i32;
        location.total_spots = location.total_spots.max(count);
        Ok(spot)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Spot>> {
        Ok(self.spots.get(&id).map(|s| s.clone()))
    }

    async fn find_where(&self, filter: SpotFilter) -> DomainResult<Vec<Spot>> {
        Ok(Self::sorted(&self.spots, |s| filter.matches(s)))
    }

    async fn update(&self, id: i32, patch: SpotPatch) -> DomainResult<Spot> {
        let mut spot = self
            .spots
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Spot", id))?;
        spot.apply(&patch);
        Ok(spot.clone())
    }
}

// ── Bookings ────────────────────────────────────────────────────

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create(&self, b: NewBooking) -> DomainResult<Booking> {
        check_interval(b.start_time, b.end_time)?;
        let booking = self.booking_from(self.booking_seq.next(), b);
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_where(&self, filter: BookingFilter) -> DomainResult<Vec<Booking>> {
        Ok(Self::sorted(&self.bookings, |b| filter.matches(b)))
    }

    async fn find_active_for_location(&self, location_id: i32) -> DomainResult<Vec<Booking>> {
        Ok(Self::sorted(&self.bookings, |b| {
            b.location_id == location_id && b.is_active()
        }))
    }

    async fn update(&self, id: i32, patch: BookingPatch) -> DomainResult<Booking> {
        let mut booking = self
            .bookings
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Booking", id))?;
        let mut updated = booking.clone();
        updated.apply(&patch);
        check_interval(updated.start_time, updated.end_time)?;
        *booking = updated.clone();
        Ok(updated)
    }

    async fn commit(&self, b: NewBooking) -> DomainResult<Booking> {
        check_interval(b.start_time, b.end_time)?;
        let mut spot = self
            .spots
            .get_mut(&b.spot_id)
            .ok_or_else(|| DomainError::not_found("Spot", b.spot_id))?;

        let booking = self.booking_from(self.booking_seq.next(), b);
        self.bookings.insert(booking.id, booking.clone());
        spot.is_available = false;

        debug!(booking_id = booking.id, spot_id = spot.id, "Committed booking");
        Ok(booking)
    }

    async fn release(&self, id: i32, status: BookingStatus) -> DomainResult<Booking> {
        let spot_id = self
            .bookings
            .get(&id)
            .map(|b| b.spot_id)
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        let mut spot = self.spots.get_mut(&spot_id);

        let released = {
            let mut booking = self
                .bookings
                .get_mut(&id)
                .ok_or_else(|| DomainError::not_found("Booking", id))?;
            booking.status = status;
            booking.clone()
        };

        let still_held = self
            .bookings
            .iter()
            .any(|b| b.spot_id == spot_id && b.id != id && b.is_active());
        if let Some(spot) = spot.as_mut() {
            spot.is_available = !still_held;
        }

        debug!(booking_id = id, spot_id, %status, still_held, "Released booking");
        Ok(released)
    }
}

// ── Vehicles ────────────────────────────────────────────────────

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn create(&self, v: NewVehicle) -> DomainResult<Vehicle> {
        v.validate()?;
        let vehicle = Vehicle {
            id: self.vehicle_seq.next(),
            user_id: v.user_id,
            license_plate: v.license_plate,
            make: v.make,
            model: v.model,
            color: v.color,
            created_at: Utc::now(),
        };
        self.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(&id).map(|v| v.clone()))
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Vehicle>> {
        Ok(Self::sorted(&self.vehicles, |v| v.user_id == user_id))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.vehicles
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Vehicle", id))?;
        Ok(())
    }
}

// ── Transportation ──────────────────────────────────────────────

#[async_trait]
impl TransportationRepository for InMemoryStore {
    async fn create_type(&self, t: NewTransportationType) -> DomainResult<TransportationType> {
        t.validate()?;
        let kind = TransportationType {
            id: self.transportation_type_seq.next(),
            name: t.name,
            icon: t.icon,
            base_rate: t.base_rate,
            per_km_rate: t.per_km_rate,
        };
        self.transportation_types.insert(kind.id, kind.clone());
        Ok(kind)
    }

    async fn find_type(&self, id: i32) -> DomainResult<Option<TransportationType>> {
        Ok(self.transportation_types.get(&id).map(|t| t.clone()))
    }

    async fn list_types(&self) -> DomainResult<Vec<TransportationType>> {
        Ok(Self::sorted(&self.transportation_types, |_| true))
    }

    async fn create_booking(
        &self,
        b: NewTransportationBooking,
    ) -> DomainResult<TransportationBooking> {
        b.validate()?;
        let booking = TransportationBooking {
            id: self.transportation_booking_seq.next(),
            user_id: b.user_id,
            transportation_type_id: b.transportation_type_id,
            parking_booking_id: b.parking_booking_id,
            pickup_location: b.pickup_location,
            dropoff_location: b.dropoff_location,
            pickup_time: b.pickup_time,
            is_shared: b.is_shared,
            status: b.status.unwrap_or_default(),
            amount: b.amount,
            created_at: Utc::now(),
        };
        self.transportation_bookings
            .insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_booking(&self, id: i32) -> DomainResult<Option<TransportationBooking>> {
        Ok(self.transportation_bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_bookings_by_user(
        &self,
        user_id: i32,
    ) -> DomainResult<Vec<TransportationBooking>> {
        Ok(Self::sorted(&self.transportation_bookings, |b| {
            b.user_id == user_id
        }))
    }

    async fn update_booking_status(
        &self,
        id: i32,
        status: BookingStatus,
    ) -> DomainResult<TransportationBooking> {
        let mut booking = self
            .transportation_bookings
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("TransportationBooking", id))?;
        booking.status = status;
        Ok(booking.clone())
    }
}
