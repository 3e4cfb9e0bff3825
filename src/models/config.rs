// src/models/config.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SpreadsheetConfigPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "spreadsheet_id es requerido"))]
    #[schema(example = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms")]
    pub spreadsheet_id: String,
}

/// Corpo opcional do POST /api/config/auth. Sem ele, usa a credencial do ambiente.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AuthConfigPayload {
    pub credentials_base64: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "CRM Backend is running")]
    pub message: String,
}
