use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::services::{
    maps_client::types::maps_service_error::MapsServiceError,
    overpass_client::types::overpass_service_error::OverpassServiceError,
};

#[derive(Debug)]
pub struct AppError {
    pub code: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(code: StatusCode, message: &str) -> Self {
        AppError {
            code,
            message: message.to_string(),
        }
    }

    pub fn no_location() -> Self {
        AppError::new(
            StatusCode::BAD_REQUEST,
            "A valid location (lat, lon) is required",
        )
    }

    pub fn no_results(radius_m: u32) -> Self {
        AppError::new(
            StatusCode::NOT_FOUND,
            format!("No matching places found within {} m", radius_m).as_str(),
        )
    }
}

impl From<OverpassServiceError> for AppError {
    fn from(e: OverpassServiceError) -> Self {
        error!("Failed to search OpenStreetMap places: {}", e);
        match e {
            OverpassServiceError::InvalidResponse(_) => AppError::new(
                StatusCode::BAD_GATEWAY,
                "Invalid response from the Overpass API",
            ),
            _ => AppError::new(
                StatusCode::BAD_GATEWAY,
                "Failed to fetch places from the Overpass API",
            ),
        }
    }
}

impl From<MapsServiceError> for AppError {
    fn from(e: MapsServiceError) -> Self {
        error!("Failed to search Google places: {}", e);
        AppError::new(
            StatusCode::BAD_GATEWAY,
            "Failed to fetch places from Google Places",
        )
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponseJson {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response<Body> {
        (
            self.code,
            Json(ErrorResponseJson {
                message: self.message,
            }),
        )
            .into_response()
    }
}
