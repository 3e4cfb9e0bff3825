// src/handlers/leads.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    common::{
        error::AppError,
        extract::{JsonBody, PathParam},
        response::Envelope,
    },
    config::AppState,
    models::lead::{Lead, LeadPayload},
};

// GET /api/leads
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    responses(
        (status = 200, description = "Todos os leads da planilha: { success, data, count }", body = Vec<Lead>),
        (status = 500, description = "Planilha indisponível ou não configurada")
    )
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {

    let leads = app_state.lead_service.list_leads().await?;
    let count = leads.len();

    Ok((StatusCode::OK, Json(Envelope::data(leads).with_count(count))))
}

// GET /api/leads/{id}
#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    tag = "Leads",
    params(
        ("id" = u32, Path, description = "Posição do lead na planilha (1-based)")
    ),
    responses(
        (status = 200, description = "Lead encontrado: { success, data }", body = Lead),
        (status = 404, description = "Lead no encontrado")
    )
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    PathParam(id): PathParam<u32>,
) -> Result<impl IntoResponse, AppError> {

    let lead = app_state.lead_service.get_lead(id).await?;

    Ok((StatusCode::OK, Json(Envelope::data(lead))))
}

// POST /api/leads
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = LeadPayload,
    responses(
        (status = 201, description = "Lead criado: { success, id }"),
        (status = 400, description = "Campo requerido ausente (nombre, telefono)")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<LeadPayload>,
) -> Result<impl IntoResponse, AppError> {

    let id = app_state.lead_service.create_lead(&payload).await?;

    Ok((StatusCode::CREATED, Json(json!({ "success": true, "id": id }))))
}

// PUT /api/leads/{id}
#[utoipa::path(
    put,
    path = "/api/leads/{id}",
    tag = "Leads",
    request_body = LeadPayload,
    params(
        ("id" = u32, Path, description = "Posição do lead na planilha (1-based)")
    ),
    responses(
        (status = 200, description = "Lead atualizado: { success }"),
        (status = 404, description = "Lead no encontrado")
    )
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    PathParam(id): PathParam<u32>,
    JsonBody(payload): JsonBody<LeadPayload>,
) -> Result<impl IntoResponse, AppError> {

    app_state.lead_service.update_lead(id, &payload).await?;

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

// DELETE /api/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/leads/{id}",
    tag = "Leads",
    params(
        ("id" = u32, Path, description = "Posição do lead na planilha (1-based)")
    ),
    responses(
        (status = 200, description = "Lead marcado como Inactivo (a linha continua na planilha)"),
        (status = 404, description = "Lead no encontrado")
    )
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    PathParam(id): PathParam<u32>,
) -> Result<impl IntoResponse, AppError> {

    app_state.lead_service.delete_lead(id).await?;

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
