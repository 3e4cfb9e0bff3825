// src/common/error.rs

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erro único da aplicação. Cada variante sabe qual status HTTP devolver.
#[derive(Debug, Error)]
pub enum AppError {
    // Validações explícitas feitas nos handlers (campo obrigatório, campo inválido)
    #[error("{0}")]
    Validation(String),

    #[error("Uno o más campos son inválidos")]
    InvalidPayload(#[from] validator::ValidationErrors),

    #[error("Lead no encontrado")]
    LeadNotFound,

    #[error("Usuario no encontrado")]
    UserNotFound,

    #[error("La opción '{0}' ya existe")]
    DuplicateOption(String),

    #[error("El usuario o el e-mail ya existen")]
    UserAlreadyExists,

    // Credenciais ausentes, Base64/JSON inválido ou grant recusado pelo Google
    #[error("Error al autenticar con Google Sheets: {0}")]
    Authentication(String),

    #[error("Servicio no autenticado o spreadsheet_id no establecido")]
    NotConfigured,

    // Falha de transporte ou resposta não-2xx da API remota
    #[error("Error en la API de Google Sheets: {0}")]
    Upstream(String),

    #[error("Error de base de datos")]
    Database(#[from] sqlx::Error),

    #[error("Error interno del servidor")]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Upstream(e.to_string())
    }
}

// Corpo ausente, sem Content-Type JSON ou mal formado
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Se esperaba un cuerpo JSON (Content-Type: application/json)".to_string()
            }
            JsonRejection::JsonSyntaxError(e) => format!("JSON mal formado: {}", e.body_text()),
            other => format!("Cuerpo inválido: {}", other.body_text()),
        };
        AppError::Validation(message)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(format!("Parámetro de ruta inválido: {}", rejection.body_text()))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::LeadNotFound | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateOption(_) | AppError::UserAlreadyExists => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Erros de validação do `validator` devolvem também o detalhe por campo.
        if let AppError::InvalidPayload(errors) = &self {
            let mut details = std::collections::HashMap::new();
            let mut first_message = None;
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                if first_message.is_none() {
                    first_message = messages.first().cloned();
                }
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "success": false,
                "error": first_message.unwrap_or_else(|| self.to_string()),
                "details": details,
            }));
            return (status, body).into_response();
        }

        if status.is_server_error() {
            // O `Debug` carrega a causa original (sqlx, anyhow); o cliente só vê a mensagem.
            tracing::error!("🔥 Erro interno: {:?}", self);
        }

        let body = Json(json!({ "success": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(AppError::Validation("Campo no válido".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::LeadNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::DuplicateOption("Web".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotConfigured.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Upstream("503".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::Authentication("sin credenciales".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_message_keeps_remote_text() {
        let err = AppError::Upstream("403 Forbidden: caller does not have permission".into());
        assert!(err.to_string().contains("caller does not have permission"));
    }
}
