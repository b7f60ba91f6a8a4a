use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::state::AppState;
use crate::utils::response::success;

pub mod events;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    store: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "gather-api",
        store: state.events.backend_tag(),
    };

    success(payload, "Health check successful")
}
