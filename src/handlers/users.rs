// src/handlers/users.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{JsonBody, PathParam},
    },
    config::AppState,
    models::user::{CreateUserPayload, UpdateUserPayload, User},
};

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Lista de usuários", body = Vec<User>)
    )
)]
pub async fn list_users(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = app_state.user_repo.list_users().await?;
    Ok(Json(users))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Usuário ou e-mail já cadastrado")
    )
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state
        .user_repo
        .create_user(payload.username.trim(), payload.email.trim())
        .await?;
    tracing::info!("✅ Usuário criado: {} (id {})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/users/{id}
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário encontrado", body = User),
        (status = 404, description = "Usuario no encontrado")
    )
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<User>, AppError> {
    let user = app_state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(user))
}

// PUT /api/users/{id}
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    request_body = UpdateUserPayload,
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 404, description = "Usuario no encontrado"),
        (status = 409, description = "Usuário ou e-mail já cadastrado")
    )
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(payload): JsonBody<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    let user = app_state
        .user_repo
        .update_user(id, payload.username.as_deref(), payload.email.as_deref())
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(user))
}

// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário removido"),
        (status = 404, description = "Usuario no encontrado")
    )
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    if !app_state.user_repo.delete_user(id).await? {
        return Err(AppError::UserNotFound);
    }
    tracing::info!("🗑️ Usuário {} removido", id);
    Ok(StatusCode::NO_CONTENT)
}
