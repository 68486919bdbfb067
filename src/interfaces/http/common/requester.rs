//! Requesting-user extractor
//!
//! Authentication lives in front of this service; it forwards the caller's
//! user ID in `X-User-Id`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;

use super::{ApiError, ApiResponse, EmptyData};

pub const USER_ID_HEADER: &str = "x-user-id";

/// ID of the user making the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequesterId(pub i32);

impl<S> FromRequestParts<S> for RequesterId
where
    S: Send + Sync,
{
    type Rejection = ApiError<EmptyData>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ApiResponse::error("Missing X-User-Id header")),
                )
            })?;

        raw.trim()
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(RequesterId)
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Invalid X-User-Id header: {}", raw))),
                )
            })
    }
}
