// src/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use crate::{config::AppState, docs, handlers};

pub fn router(app_state: AppState) -> Router {
    let lead_routes = Router::new()
        .route("/", get(handlers::leads::list_leads).post(handlers::leads::create_lead))
        .route(
            "/{id}",
            get(handlers::leads::get_lead)
                .put(handlers::leads::update_lead)
                .delete(handlers::leads::delete_lead),
        );

    let option_routes = Router::new()
        .route("/", get(handlers::options::list_options))
        .route(
            "/{field}",
            get(handlers::options::get_field_options).post(handlers::options::add_option),
        )
        .route(
            "/{field}/{option}",
            axum::routing::put(handlers::options::update_option)
                .delete(handlers::options::delete_option),
        );

    let config_routes = Router::new()
        .route("/spreadsheet", post(handlers::config::set_spreadsheet))
        .route("/auth", post(handlers::config::authenticate));

    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users).post(handlers::users::create_user))
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        );

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/pipeline/stats", get(handlers::dashboard::get_pipeline_stats))
        .route("/api/cobranza", get(handlers::dashboard::get_cobranza))
        .route("/api/dashboard/metrics", get(handlers::dashboard::get_dashboard_metrics))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api/leads", lead_routes)
        .nest("/api/options", option_routes)
        .nest("/api/config", config_routes)
        .nest("/api/users", user_routes)
        .with_state(app_state)
}
