//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod routes;
mod services;

use crate::config::{AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env é opcional: em produção as variáveis vêm do ambiente.
    dotenvy::dotenv().ok();

    // Inicializa o logger (RUST_LOG sobrescreve o nível padrão)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let addr = settings.bind_addr();

    let app_state = AppState::new(settings).await?;
    let app = routes::router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
