use axum::Json;
use serde::Serialize;

/// Fixed body of the health endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

pub const RUNNING: HealthStatus = HealthStatus {
    status: "OK",
    message: "Car Photo Generator Server is running",
};

/// Health check handler
pub async fn health_handler() -> Json<HealthStatus> {
    Json(RUNNING)
}
