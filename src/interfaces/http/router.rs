//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, ProvisioningService, TransportationService};

use super::common::{ApiResponse, EmptyData};
use super::modules::bookings::{self, dto as booking_dto, BookingAppState};
use super::modules::health::{self, HealthState};
use super::modules::locations::{self, dto as location_dto, LocationAppState};
use super::modules::metrics::{self as metrics_module, http_metrics_middleware, MetricsState};
use super::modules::transportation::{self, dto as ride_dto, TransportationAppState};
use super::modules::vehicles::{self, dto as vehicle_dto, VehicleAppState};

/// Everything the router needs from the runtime
#[derive(Clone)]
pub struct ApiContext {
    pub bookings: Arc<BookingService>,
    pub transportation: Arc<TransportationService>,
    pub provisioning: Arc<ProvisioningService>,
    pub health: HealthState,
    pub prometheus: PrometheusHandle,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Locations & spots
        locations::list_locations,
        locations::create_location,
        locations::get_location,
        locations::update_location,
        locations::review_location,
        locations::list_spots,
        locations::create_spot,
        locations::get_availability,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::update_booking,
        bookings::cancel_booking,
        bookings::complete_booking,
        bookings::set_favorite,
        bookings::preview_fare,
        // Transportation
        transportation::list_types,
        transportation::create_ride,
        transportation::list_rides,
        transportation::cancel_ride,
        // Vehicles
        vehicles::create_vehicle,
        vehicles::list_vehicles,
        vehicles::delete_vehicle,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            location_dto::LocationDto,
            location_dto::CreateLocationRequest,
            location_dto::UpdateLocationRequest,
            location_dto::ReviewRequest,
            location_dto::SpotDto,
            location_dto::SpotTypeDto,
            location_dto::CreateSpotRequest,
            location_dto::AvailabilityDto,
            booking_dto::BookingDto,
            booking_dto::CreateBookingRequest,
            booking_dto::UpdateBookingRequest,
            booking_dto::FavoriteRequest,
            booking_dto::FarePreviewDto,
            ride_dto::TransportationTypeDto,
            ride_dto::CreateRideRequest,
            ride_dto::RideDto,
            vehicle_dto::VehicleDto,
            vehicle_dto::CreateVehicleRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Locations", description = "Transit hub parking facilities"),
        (name = "Spots", description = "Parking spots and interval availability"),
        (name = "Bookings", description = "Parking bookings for the X-User-Id caller"),
        (name = "Fares", description = "Fare previews"),
        (name = "Transportation", description = "Last-mile cabs and shuttles"),
        (name = "Vehicles", description = "Vehicles used on bookings"),
    ),
    info(
        title = "Transit Parking API",
        version = "1.0.0",
        description = "Parking spot booking and last-mile transportation at transit hubs",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let location_state = LocationAppState {
        provisioning: ctx.provisioning.clone(),
        bookings: ctx.bookings.clone(),
    };
    let booking_state = BookingAppState {
        bookings: ctx.bookings.clone(),
    };
    let transportation_state = TransportationAppState {
        transportation: ctx.transportation.clone(),
    };
    let vehicle_state = VehicleAppState {
        provisioning: ctx.provisioning.clone(),
    };

    let location_routes = Router::new()
        .route(
            "/",
            get(locations::list_locations).post(locations::create_location),
        )
        .route(
            "/{id}",
            get(locations::get_location).patch(locations::update_location),
        )
        .route("/{id}/reviews", post(locations::review_location))
        .route(
            "/{id}/spots",
            get(locations::list_spots).post(locations::create_spot),
        )
        .route("/{id}/availability", get(locations::get_availability))
        .with_state(location_state);

    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/{id}",
            get(bookings::get_booking).patch(bookings::update_booking),
        )
        .route("/{id}/cancel", post(bookings::cancel_booking))
        .route("/{id}/complete", post(bookings::complete_booking))
        .route("/{id}/favorite", put(bookings::set_favorite))
        .with_state(booking_state.clone());

    let fare_routes = Router::new()
        .route("/preview", get(bookings::preview_fare))
        .with_state(booking_state);

    let transportation_routes = Router::new()
        .route("/types", get(transportation::list_types))
        .route(
            "/bookings",
            get(transportation::list_rides).post(transportation::create_ride),
        )
        .route("/bookings/{id}/cancel", post(transportation::cancel_ride))
        .with_state(transportation_state);

    let vehicle_routes = Router::new()
        .route(
            "/",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route("/{id}", axum::routing::delete(vehicles::delete_vehicle))
        .with_state(vehicle_state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route(
            "/health",
            get(health::health_check).with_state(ctx.health),
        )
        .route(
            "/metrics",
            get(metrics_module::prometheus_metrics).with_state(MetricsState {
                handle: ctx.prometheus,
            }),
        )
        .nest("/api/v1/locations", location_routes)
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/fares", fare_routes)
        .nest("/api/v1/transportation", transportation_routes)
        .nest("/api/v1/vehicles", vehicle_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
