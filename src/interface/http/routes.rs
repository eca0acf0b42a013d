use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::application::WeatherService;

use super::handlers::{
    archive_handler, forecast_handler, health_handler, history_handler, location_handler,
    locations_handler, observations_handler, AppState,
};

pub fn create_router(service: Arc<WeatherService>, admin_token: Option<String>) -> Router {
    let state = AppState {
        service,
        admin_token,
    };

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/forecast", get(forecast_handler))
        .route("/api/observations", get(observations_handler))
        .route("/api/locations", get(locations_handler))
        .route("/api/locations/{id}", get(location_handler))
        .route("/api/history", get(history_handler))
        .route("/api/archive", post(archive_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
