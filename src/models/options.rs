// src/models/options.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::error::AppError, models::lead::LeadColumn};

// --- CAMPOS GOVERNADOS ---

/// Campos categóricos cujos valores válidos são derivados dos próprios leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OptionField {
    Fuente,
    Pipeline,
    Estado,
    Vendedor,
}

impl OptionField {
    pub const ALL: [OptionField; 4] = [
        OptionField::Fuente,
        OptionField::Pipeline,
        OptionField::Estado,
        OptionField::Vendedor,
    ];

    pub const fn column(self) -> LeadColumn {
        match self {
            OptionField::Fuente => LeadColumn::Fuente,
            OptionField::Pipeline => LeadColumn::Pipeline,
            OptionField::Estado => LeadColumn::Estado,
            OptionField::Vendedor => LeadColumn::Vendedor,
        }
    }

    pub const fn as_str(self) -> &'static str {
        self.column().key()
    }
}

impl fmt::Display for OptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AppError::Validation("Campo no válido".to_string()))
    }
}

// --- CATÁLOGO ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct OptionsCatalog {
    pub fuente: Vec<String>,
    pub pipeline: Vec<String>,
    pub estado: Vec<String>,
    pub vendedor: Vec<String>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddOptionPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "Opción requerida"))]
    #[schema(example = "Instagram")]
    pub option: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOptionPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "Nueva opción requerida"))]
    #[schema(example = "Instagram Ads")]
    pub new_option: String,
}

/// Resposta do POST de opção. `persisted` é sempre `false`: a opção só passa a
/// existir quando algum lead for gravado com esse valor.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddOptionResponse {
    pub success: bool,
    pub message: String,
    pub persisted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_governed_fields() {
        assert_eq!("vendedor".parse::<OptionField>().unwrap(), OptionField::Vendedor);
        assert_eq!("pipeline".parse::<OptionField>().unwrap().column(), LeadColumn::Pipeline);
        assert!(matches!("nombre".parse::<OptionField>(), Err(AppError::Validation(_))));
        assert!("Fuente".parse::<OptionField>().is_err());
    }

    #[test]
    fn empty_option_fails_validation() {
        let payload: AddOptionPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.validate().is_err());

        let payload: UpdateOptionPayload = serde_json::from_str(r#"{"new_option":"Web"}"#).unwrap();
        assert!(payload.validate().is_ok());
    }
}
