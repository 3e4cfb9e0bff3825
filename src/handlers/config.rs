// src/handlers/config.rs

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::JsonBody},
    config::AppState,
    models::config::{AuthConfigPayload, MessageResponse, SpreadsheetConfigPayload},
};

// POST /api/config/spreadsheet
#[utoipa::path(
    post,
    path = "/api/config/spreadsheet",
    tag = "Config",
    request_body = SpreadsheetConfigPayload,
    responses(
        (status = 200, description = "Planilha selecionada", body = MessageResponse),
        (status = 400, description = "spreadsheet_id es requerido")
    )
)]
pub async fn set_spreadsheet(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<SpreadsheetConfigPayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    app_state.sheets.set_spreadsheet_id(payload.spreadsheet_id.clone()).await;
    tracing::info!("✅ Planilha configurada: {}", payload.spreadsheet_id);

    Ok((StatusCode::OK, Json(MessageResponse::ok("Spreadsheet configurado correctamente"))))
}

// POST /api/config/auth
// O corpo é opcional: sem ele, vale a credencial carregada do ambiente.
#[utoipa::path(
    post,
    path = "/api/config/auth",
    tag = "Config",
    request_body(content = AuthConfigPayload, description = "Opcional"),
    responses(
        (status = 200, description = "Autenticación exitosa", body = MessageResponse),
        (status = 500, description = "Credencial ausente ou rejeitada")
    )
)]
pub async fn authenticate(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {

    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        AuthConfigPayload::default()
    } else {
        serde_json::from_slice::<AuthConfigPayload>(&body)
            .map_err(|e| AppError::Validation(format!("JSON inválido: {e}")))?
    };

    let credentials = payload
        .credentials_base64
        .filter(|value| !value.trim().is_empty())
        .or_else(|| app_state.settings.credentials_base64.clone())
        .ok_or_else(|| AppError::Authentication("Credenciales no configuradas".to_string()))?;

    app_state.sheets.authenticate(&credentials).await?;
    tracing::info!("✅ Autenticado no backend '{}'", app_state.sheets.backend_tag());

    Ok((StatusCode::OK, Json(MessageResponse::ok("Autenticación exitosa"))))
}
