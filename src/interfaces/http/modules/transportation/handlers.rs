//! Transportation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::booking::parse_timestamp;
use crate::application::{TransportationRequest, TransportationService};
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, RequesterId, ValidatedJson,
};

use super::dto::*;

#[derive(Clone)]
pub struct TransportationAppState {
    pub transportation: Arc<TransportationService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/transportation/types",
    tag = "Transportation",
    responses((status = 200, description = "Ride types", body = ApiResponse<Vec<TransportationTypeDto>>))
)]
pub async fn list_types(
    State(state): State<TransportationAppState>,
) -> ApiResult<Vec<TransportationTypeDto>> {
    let types = state
        .transportation
        .list_transportation_types()
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        types.into_iter().map(TransportationTypeDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/transportation/bookings",
    tag = "Transportation",
    params(("X-User-Id" = i32, Header, description = "Requesting user")),
    request_body = CreateRideRequest,
    responses(
        (status = 201, description = "Ride booked", body = ApiResponse<RideDto>),
        (status = 403, description = "Parking booking belongs to another user"),
        (status = 404, description = "Unknown ride type, or parking booking missing or no longer active")
    )
)]
pub async fn create_ride(
    State(state): State<TransportationAppState>,
    RequesterId(user_id): RequesterId,
    ValidatedJson(request): ValidatedJson<CreateRideRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RideDto>>), ApiError<RideDto>> {
    let pickup_time = parse_timestamp("pickup_time", &request.pickup_time).map_err(domain_error)?;
    let ride = state
        .transportation
        .book_transportation(
            user_id,
            TransportationRequest {
                transportation_type_id: request.transportation_type_id,
                parking_booking_id: request.parking_booking_id,
                pickup_location: request.pickup_location,
                dropoff_location: request.dropoff_location,
                pickup_time,
                is_shared: request.is_shared,
                distance_km: request.distance_km,
            },
        )
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(ride.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/transportation/bookings",
    tag = "Transportation",
    params(("X-User-Id" = i32, Header, description = "Requesting user")),
    responses((status = 200, description = "Caller's rides", body = ApiResponse<Vec<RideDto>>))
)]
pub async fn list_rides(
    State(state): State<TransportationAppState>,
    RequesterId(user_id): RequesterId,
) -> ApiResult<Vec<RideDto>> {
    let rides = state
        .transportation
        .list_user_transportation(user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        rides.into_iter().map(RideDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/transportation/bookings/{id}/cancel",
    tag = "Transportation",
    params(
        ("id" = i32, Path, description = "Ride ID"),
        ("X-User-Id" = i32, Header, description = "Requesting user")
    ),
    responses(
        (status = 200, description = "Ride canceled", body = ApiResponse<RideDto>),
        (status = 403, description = "Ride belongs to another user"),
        (status = 404, description = "Ride not found or no longer active")
    )
)]
pub async fn cancel_ride(
    State(state): State<TransportationAppState>,
    RequesterId(user_id): RequesterId,
    Path(id): Path<i32>,
) -> ApiResult<RideDto> {
    let ride = state
        .transportation
        .cancel_transportation(id, user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(ride.into())))
}
