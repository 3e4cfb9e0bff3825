// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Leads CRM API", description = "CRM de leads sobre Google Sheets"),
    paths(
        // --- Leads ---
        handlers::leads::list_leads,
        handlers::leads::get_lead,
        handlers::leads::create_lead,
        handlers::leads::update_lead,
        handlers::leads::delete_lead,

        // --- Options ---
        handlers::options::list_options,
        handlers::options::get_field_options,
        handlers::options::add_option,
        handlers::options::update_option,
        handlers::options::delete_option,

        // --- Dashboard ---
        handlers::dashboard::get_pipeline_stats,
        handlers::dashboard::get_cobranza,
        handlers::dashboard::get_dashboard_metrics,

        // --- Config ---
        handlers::config::set_spreadsheet,
        handlers::config::authenticate,
        handlers::health::health,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
    ),
    components(
        schemas(
            // --- Leads ---
            models::lead::Lead,
            models::lead::LeadPayload,

            // --- Options ---
            models::options::OptionField,
            models::options::OptionsCatalog,
            models::options::AddOptionPayload,
            models::options::UpdateOptionPayload,
            models::options::AddOptionResponse,

            // --- Dashboard ---
            models::dashboard::StageStats,
            models::dashboard::UpcomingTask,
            models::dashboard::DashboardMetrics,

            // --- Config ---
            models::config::SpreadsheetConfigPayload,
            models::config::AuthConfigPayload,
            models::config::MessageResponse,
            models::config::HealthResponse,

            // --- Users ---
            models::user::User,
            models::user::CreateUserPayload,
            models::user::UpdateUserPayload,
        )
    ),
    tags(
        (name = "Leads", description = "Cadastro de leads (uma linha da planilha por lead)"),
        (name = "Options", description = "Valores de fuente, pipeline, estado e vendedor"),
        (name = "Dashboard", description = "Funil, cobrança e indicadores"),
        (name = "Config", description = "Planilha e credenciais do Google"),
        (name = "Health", description = "Verificação de vida"),
        (name = "Users", description = "Cadastro local de usuários")
    )
)]
pub struct ApiDoc;

// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/leads",
            "/api/leads/{id}",
            "/api/options/{field}/{option}",
            "/api/cobranza",
            "/api/config/auth",
            "/api/users/{id}",
        ] {
            assert!(paths.contains(&expected), "rota ausente: {expected}");
        }
    }
}
