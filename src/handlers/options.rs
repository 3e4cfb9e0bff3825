// src/handlers/options.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{JsonBody, PathParam},
        response::Envelope,
    },
    config::AppState,
    models::options::{AddOptionPayload, AddOptionResponse, OptionField, OptionsCatalog, UpdateOptionPayload},
};

// GET /api/options
#[utoipa::path(
    get,
    path = "/api/options",
    tag = "Options",
    responses(
        (status = 200, description = "Opções dos quatro campos governados: { success, data }", body = OptionsCatalog)
    )
)]
pub async fn list_options(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {

    let catalog = app_state.options_service.list_options().await?;

    Ok((StatusCode::OK, Json(Envelope::data(catalog))))
}

// GET /api/options/{field}
#[utoipa::path(
    get,
    path = "/api/options/{field}",
    tag = "Options",
    params(
        ("field" = OptionField, Path, description = "fuente | pipeline | estado | vendedor")
    ),
    responses(
        (status = 200, description = "Opções do campo: { success, data }", body = Vec<String>),
        (status = 400, description = "Campo no válido")
    )
)]
pub async fn get_field_options(
    State(app_state): State<AppState>,
    PathParam(field): PathParam<String>,
) -> Result<impl IntoResponse, AppError> {

    let field: OptionField = field.parse()?;
    let options = app_state.options_service.field_options(field).await?;

    Ok((StatusCode::OK, Json(Envelope::data(options))))
}

// POST /api/options/{field}
#[utoipa::path(
    post,
    path = "/api/options/{field}",
    tag = "Options",
    request_body = AddOptionPayload,
    params(
        ("field" = OptionField, Path, description = "fuente | pipeline | estado | vendedor")
    ),
    responses(
        (status = 201, description = "Opção aceita, mas NÃO gravada: só existe quando um lead a usar", body = AddOptionResponse),
        (status = 400, description = "Campo no válido ou opção vazia"),
        (status = 409, description = "A opção já existe")
    )
)]
pub async fn add_option(
    State(app_state): State<AppState>,
    PathParam(field): PathParam<String>,
    payload: Result<JsonBody<AddOptionPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {

    // O campo é conferido antes do corpo
    let field: OptionField = field.parse()?;
    let JsonBody(payload) = payload?;
    payload.validate()?;

    app_state.options_service.add_option(field, &payload.option).await?;

    let body = AddOptionResponse {
        success: true,
        message: format!("Opción '{}' disponible para '{}'", payload.option, field),
        persisted: false,
    };
    Ok((StatusCode::CREATED, Json(body)))
}

// PUT /api/options/{field}/{option}
#[utoipa::path(
    put,
    path = "/api/options/{field}/{option}",
    tag = "Options",
    request_body = UpdateOptionPayload,
    params(
        ("field" = OptionField, Path, description = "fuente | pipeline | estado | vendedor"),
        ("option" = String, Path, description = "Valor atual")
    ),
    responses(
        (status = 200, description = "Leads reescritos: { success, count }"),
        (status = 400, description = "Campo no válido ou nova opção vazia")
    )
)]
pub async fn update_option(
    State(app_state): State<AppState>,
    PathParam((field, option)): PathParam<(String, String)>,
    payload: Result<JsonBody<UpdateOptionPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {

    let field: OptionField = field.parse()?;
    let JsonBody(payload) = payload?;
    payload.validate()?;

    let count = app_state
        .options_service
        .update_option(field, &option, &payload.new_option)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "success": true, "count": count }))))
}

// DELETE /api/options/{field}/{option}
#[utoipa::path(
    delete,
    path = "/api/options/{field}/{option}",
    tag = "Options",
    params(
        ("field" = OptionField, Path, description = "fuente | pipeline | estado | vendedor"),
        ("option" = String, Path, description = "Valor a remover dos leads")
    ),
    responses(
        (status = 200, description = "Células esvaziadas: { success, count }"),
        (status = 400, description = "Campo no válido")
    )
)]
pub async fn delete_option(
    State(app_state): State<AppState>,
    PathParam((field, option)): PathParam<(String, String)>,
) -> Result<impl IntoResponse, AppError> {

    let field: OptionField = field.parse()?;
    let count = app_state.options_service.delete_option(field, &option).await?;

    Ok((StatusCode::OK, Json(json!({ "success": true, "count": count }))))
}
