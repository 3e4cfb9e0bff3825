// src/handlers/health.rs

use axum::Json;

use crate::models::config::HealthResponse;

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Servidor no ar", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "CRM Backend is running".to_string(),
    })
}
