//! Location HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::{BookingService, ProvisioningService};
use crate::domain::LocationPatch;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson,
};

use super::dto::*;

#[derive(Clone)]
pub struct LocationAppState {
    pub provisioning: Arc<ProvisioningService>,
    pub bookings: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/locations",
    tag = "Locations",
    responses((status = 200, description = "All locations", body = ApiResponse<Vec<LocationDto>>))
)]
pub async fn list_locations(State(state): State<LocationAppState>) -> ApiResult<Vec<LocationDto>> {
    let locations = state
        .provisioning
        .list_locations()
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        locations.into_iter().map(LocationDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/locations",
    tag = "Locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = ApiResponse<LocationDto>),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_location(
    State(state): State<LocationAppState>,
    ValidatedJson(request): ValidatedJson<CreateLocationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LocationDto>>), ApiError<LocationDto>> {
    let location = state
        .provisioning
        .create_location(request.into())
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(location.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}",
    tag = "Locations",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location", body = ApiResponse<LocationDto>),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_location(
    State(state): State<LocationAppState>,
    Path(id): Path<i32>,
) -> ApiResult<LocationDto> {
    let location = state
        .provisioning
        .get_location(id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(location.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/locations/{id}",
    tag = "Locations",
    params(("id" = i32, Path, description = "Location ID")),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationDto>),
        (status = 400, description = "Nothing to update or negative rate"),
        (status = 404, description = "Location not found")
    )
)]
pub async fn update_location(
    State(state): State<LocationAppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateLocationRequest>,
) -> ApiResult<LocationDto> {
    let patch = LocationPatch {
        hourly_rate: request.hourly_rate,
        ..Default::default()
    };
    let location = state
        .provisioning
        .update_location(id, patch)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(location.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/locations/{id}/reviews",
    tag = "Locations",
    params(("id" = i32, Path, description = "Location ID")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Rating updated", body = ApiResponse<LocationDto>),
        (status = 404, description = "Location not found")
    )
)]
pub async fn review_location(
    State(state): State<LocationAppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<ReviewRequest>,
) -> ApiResult<LocationDto> {
    let location = state
        .provisioning
        .rate_location(id, request.score)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(location.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}/spots",
    tag = "Spots",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Spots in creation order", body = ApiResponse<Vec<SpotDto>>),
        (status = 404, description = "Location not found")
    )
)]
pub async fn list_spots(
    State(state): State<LocationAppState>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<SpotDto>> {
    let spots = state
        .provisioning
        .list_spots(id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        spots.into_iter().map(SpotDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/locations/{id}/spots",
    tag = "Spots",
    params(("id" = i32, Path, description = "Location ID")),
    request_body = CreateSpotRequest,
    responses(
        (status = 201, description = "Spot added", body = ApiResponse<SpotDto>),
        (status = 404, description = "Location not found")
    )
)]
pub async fn create_spot(
    State(state): State<LocationAppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CreateSpotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SpotDto>>), ApiError<SpotDto>> {
    let spot = state
        .provisioning
        .add_spot(request.into_new_spot(id))
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(spot.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}/availability",
    tag = "Spots",
    params(("id" = i32, Path, description = "Location ID"), AvailabilityQuery),
    responses(
        (status = 200, description = "Spots free for the whole interval", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Malformed or inverted interval")
    )
)]
pub async fn get_availability(
    State(state): State<LocationAppState>,
    Path(id): Path<i32>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<AvailabilityDto> {
    let spots = state
        .bookings
        .list_available_spots_iso(id, &query.start_time, &query.end_time)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(AvailabilityDto {
        location_id: id,
        start_time: query.start_time,
        end_time: query.end_time,
        available_count: spots.len(),
        spots: spots.into_iter().map(SpotDto::from).collect(),
    })))
}
