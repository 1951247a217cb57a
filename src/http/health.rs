use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::handler::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub tier: &'static str,
    pub version: &'static str,
}

pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        tier: state.role.as_str(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
