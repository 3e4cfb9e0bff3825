// src/handlers/dashboard.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    common::{error::AppError, response::Envelope},
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::{dashboard::DashboardMetrics, lead::Lead},
};

// GET /api/pipeline/stats
#[utoipa::path(
    get,
    path = "/api/pipeline/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Leads ativos por etapa, na ordem do funil: { success, data: { etapa: { count, value } } }")
    )
)]
pub async fn get_pipeline_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {

    let stats = app_state.dashboard_service.get_pipeline_stats().await?;

    Ok((StatusCode::OK, Json(Envelope::data(stats))))
}

// GET /api/cobranza
#[utoipa::path(
    get,
    path = "/api/cobranza",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Leads a crédito com saldo pendente: { success, data, count, total }", body = Vec<Lead>)
    )
)]
pub async fn get_cobranza(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {

    let report = app_state.dashboard_service.get_collections().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "count": report.leads.len(),
            "data": report.leads,
            "total": report.total_pendiente,
        })),
    ))
}

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo dos leads ativos: { success, data }", body = DashboardMetrics)
    )
)]
pub async fn get_dashboard_metrics(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {

    let metrics = app_state.dashboard_service.get_metrics().await?;

    Ok((StatusCode::OK, Json(Envelope::data(metrics))))
}
