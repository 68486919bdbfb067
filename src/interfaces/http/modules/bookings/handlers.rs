//! Booking HTTP handlers
//!
//! All booking routes act on behalf of the `X-User-Id` caller.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;

use crate::application::booking::{parse_timestamp, FareCalculator};
use crate::application::BookingService;
use crate::domain::BookingPatch;
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiError, ApiResponse, ApiResult, RequesterId, ValidatedJson,
};

use super::dto::*;

#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(("X-User-Id" = i32, Header, description = "Requesting user")),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = ApiResponse<BookingDto>),
        (status = 400, description = "Malformed or inverted interval"),
        (status = 404, description = "Location not found"),
        (status = 409, description = "No spot free for the interval")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    RequesterId(user_id): RequesterId,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError<BookingDto>> {
    let booking = state
        .bookings
        .create_parking_booking(
            user_id,
            request.vehicle_id,
            request.location_id,
            &request.start_time,
            &request.end_time,
        )
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(booking.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(("X-User-Id" = i32, Header, description = "Requesting user")),
    responses((status = 200, description = "Caller's bookings", body = ApiResponse<Vec<BookingDto>>))
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
    RequesterId(user_id): RequesterId,
) -> ApiResult<Vec<BookingDto>> {
    let bookings = state
        .bookings
        .list_user_bookings(user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(BookingDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "Booking ID"),
        ("X-User-Id" = i32, Header, description = "Requesting user")
    ),
    responses(
        (status = 200, description = "Booking", body = ApiResponse<BookingDto>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    RequesterId(user_id): RequesterId,
    Path(id): Path<i32>,
) -> ApiResult<BookingDto> {
    let booking = state
        .bookings
        .get_booking(id, user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "Booking ID"),
        ("X-User-Id" = i32, Header, description = "Requesting user")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Empty patch or bad interval"),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking(
    State(state): State<BookingAppState>,
    RequesterId(user_id): RequesterId,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> ApiResult<BookingDto> {
    let start_time = request
        .start_time
        .as_deref()
        .map(|s| parse_timestamp("start_time", s))
        .transpose()
        .map_err(domain_error)?;
    let end_time = request
        .end_time
        .as_deref()
        .map(|s| parse_timestamp("end_time", s))
        .transpose()
        .map_err(domain_error)?;

    let patch = BookingPatch {
        vehicle_id: request.vehicle_id,
        start_time,
        end_time,
        is_favorite: request.is_favorite,
    };
    let booking = state
        .bookings
        .modify_booking(id, user_id, patch)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "Booking ID"),
        ("X-User-Id" = i32, Header, description = "Requesting user")
    ),
    responses(
        (status = 200, description = "Booking canceled and spot released", body = ApiResponse<BookingDto>),
        (status = 403, description = "Booking belongs to another user"),
        (status = 404, description = "Booking not found or no longer active")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    RequesterId(user_id): RequesterId,
    Path(id): Path<i32>,
) -> ApiResult<BookingDto> {
    let booking = state
        .bookings
        .cancel_booking(id, user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/complete",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "Booking ID"),
        ("X-User-Id" = i32, Header, description = "Requesting user")
    ),
    responses(
        (status = 200, description = "Booking completed and spot released", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found or no longer active")
    )
)]
pub async fn complete_booking(
    State(state): State<BookingAppState>,
    RequesterId(user_id): RequesterId,
    Path(id): Path<i32>,
) -> ApiResult<BookingDto> {
    let booking = state
        .bookings
        .complete_booking(id, user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}/favorite",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "Booking ID"),
        ("X-User-Id" = i32, Header, description = "Requesting user")
    ),
    request_body = FavoriteRequest,
    responses((status = 200, description = "Favorite flag set", body = ApiResponse<BookingDto>))
)]
pub async fn set_favorite(
    State(state): State<BookingAppState>,
    RequesterId(user_id): RequesterId,
    Path(id): Path<i32>,
    Json(request): Json<FavoriteRequest>,
) -> ApiResult<BookingDto> {
    let booking = state
        .bookings
        .set_favorite(id, user_id, request.is_favorite)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/fares/preview",
    tag = "Fares",
    params(FarePreviewQuery),
    responses(
        (status = 200, description = "Fare for the interval", body = ApiResponse<FarePreviewDto>),
        (status = 400, description = "Bad interval or rate")
    )
)]
pub async fn preview_fare(
    State(state): State<BookingAppState>,
    Query(query): Query<FarePreviewQuery>,
) -> ApiResult<FarePreviewDto> {
    let hourly_rate = Decimal::from_str(query.hourly_rate.trim())
        .map_err(|e| bad_request(format!("Invalid hourly_rate: {}", e)))?;
    if hourly_rate.is_sign_negative() {
        return Err(bad_request("hourly_rate must not be negative"));
    }
    let start = parse_timestamp("start_time", &query.start_time).map_err(domain_error)?;
    let end = parse_timestamp("end_time", &query.end_time).map_err(domain_error)?;

    let billable_hours = FareCalculator::billable_hours(start, end).map_err(domain_error)?;
    let total = state
        .bookings
        .compute_fare(start, end, hourly_rate)
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(FarePreviewDto {
        billable_hours,
        hourly_rate,
        booking_fee: state.bookings.policy().booking_fee,
        total,
    })))
}
