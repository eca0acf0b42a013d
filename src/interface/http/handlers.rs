use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{HistoryError, WeatherService};
use crate::domain::Snapshot;

/// Header carrying the shared secret for the write-trigger endpoint.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
    pub admin_token: Option<String>,
}

/// Response for /api/observations
#[derive(Debug, Serialize)]
pub struct ObservationsResponse {
    pub snapshots: Vec<Snapshot>,
}

/// Response for /api/locations
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub time: String,
    pub locations: Vec<LocationInfo>,
}

#[derive(Debug, Serialize)]
pub struct LocationInfo {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Response for POST /api/archive
#[derive(Debug, Serialize)]
pub struct ArchiveResponse {
    pub key: String,
}

fn history_error_response(err: HistoryError) -> Response {
    match err {
        HistoryError::NotConfigured => {
            (StatusCode::SERVICE_UNAVAILABLE, "history store is not configured").into_response()
        }
        HistoryError::NoForecast => {
            (StatusCode::NOT_FOUND, "no forecast data available").into_response()
        }
        HistoryError::Persistence(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Handler for GET /api/health
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "wxproxy"
        })),
    )
}

/// Handler for GET /api/forecast
#[debug_handler]
pub async fn forecast_handler(State(state): State<AppState>) -> Response {
    match state.service.latest_forecast() {
        Some(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        None => (StatusCode::NOT_FOUND, "no forecast data available").into_response(),
    }
}

/// Handler for GET /api/observations
pub async fn observations_handler(State(state): State<AppState>) -> Response {
    let snapshots = state.service.observation_history();
    if snapshots.is_empty() {
        return (StatusCode::NOT_FOUND, "no observation data available").into_response();
    }

    (StatusCode::OK, Json(ObservationsResponse { snapshots })).into_response()
}

/// Handler for GET /api/locations
pub async fn locations_handler(State(state): State<AppState>) -> Response {
    match state.service.latest_forecast() {
        Some(snapshot) => {
            let locations = snapshot
                .data
                .iter()
                .map(|series| LocationInfo {
                    id: series.id.clone(),
                    name: series.name.clone(),
                    lat: series.lat,
                    lon: series.lon,
                })
                .collect();

            (StatusCode::OK, Json(LocationsResponse {
                time: snapshot.time.to_rfc3339(),
                locations,
            })).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no forecast data available").into_response(),
    }
}

/// Handler for GET /api/locations/{id}
pub async fn location_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.service.location(&id) {
        Some(series) => (StatusCode::OK, Json(series)).into_response(),
        None => (StatusCode::NOT_FOUND, "no data for that location").into_response(),
    }
}

/// Handler for GET /api/history
#[debug_handler]
pub async fn history_handler(State(state): State<AppState>) -> Response {
    match state.service.historic_series().await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => history_error_response(e),
    }
}

/// Handler for POST /api/archive (gated write-trigger)
pub async fn archive_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let supplied = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    let authorized = matches!(
        (&state.admin_token, supplied),
        (Some(expected), Some(token)) if expected == token
    );
    if !authorized {
        return (StatusCode::FORBIDDEN, "admin token mismatch").into_response();
    }

    match state.service.archive_forecast().await {
        Ok(key) => (StatusCode::OK, Json(ArchiveResponse { key })).into_response(),
        Err(e) => history_error_response(e),
    }
}
