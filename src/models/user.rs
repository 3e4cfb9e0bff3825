// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Representa um usuário vindo da tabela `users`
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "ana")]
    pub username: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserPayload {
    #[validate(length(min = 1, max = 80, message = "El nombre de usuario es requerido"))]
    pub username: String,
    #[validate(email(message = "El e-mail no es válido"))]
    pub email: String,
}

// Campos ausentes mantêm o valor atual
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, max = 80, message = "El nombre de usuario no puede estar vacío"))]
    pub username: Option<String>,
    #[validate(email(message = "El e-mail no es válido"))]
    pub email: Option<String>,
}
