//! Vehicle HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::ProvisioningService;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, EmptyData, RequesterId, ValidatedJson,
};

use super::dto::*;

#[derive(Clone)]
pub struct VehicleAppState {
    pub provisioning: Arc<ProvisioningService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(("X-User-Id" = i32, Header, description = "Owner")),
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle registered", body = ApiResponse<VehicleDto>),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_vehicle(
    State(state): State<VehicleAppState>,
    RequesterId(user_id): RequesterId,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), ApiError<VehicleDto>> {
    let vehicle = state
        .provisioning
        .register_vehicle(request.into_new_vehicle(user_id))
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(vehicle.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(("X-User-Id" = i32, Header, description = "Owner")),
    responses((status = 200, description = "Caller's vehicles", body = ApiResponse<Vec<VehicleDto>>))
)]
pub async fn list_vehicles(
    State(state): State<VehicleAppState>,
    RequesterId(user_id): RequesterId,
) -> ApiResult<Vec<VehicleDto>> {
    let vehicles = state
        .provisioning
        .list_vehicles(user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleDto::from).collect(),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(
        ("id" = i32, Path, description = "Vehicle ID"),
        ("X-User-Id" = i32, Header, description = "Owner")
    ),
    responses(
        (status = 200, description = "Vehicle removed", body = ApiResponse<EmptyData>),
        (status = 403, description = "Vehicle belongs to another user"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn delete_vehicle(
    State(state): State<VehicleAppState>,
    RequesterId(user_id): RequesterId,
    Path(id): Path<i32>,
) -> ApiResult<EmptyData> {
    state
        .provisioning
        .remove_vehicle(id, user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
