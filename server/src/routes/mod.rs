use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::{events, health_check};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(events::ALL_PATH, get(events::all))
        .route("/event/create", post(events::create))
        .route("/event/join", post(events::join))
        .route(events::JOINED_PATH, get(events::joined))
        .route("/event/leave", get(events::leave).post(events::leave))
        .route("/event/add", get(events::add_form).post(events::add))
        .route("/event/details", get(events::details))
        .route("/event/edit", get(events::edit_form).post(events::edit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(config.production))
        .layer(create_cors_layer(&config.allowed_origins))
}
