// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::{bail, Context};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::{GoogleSheetsClient, LeadRepository, MemorySheet, SheetsBackend, UserRepository},
    services::{DashboardService, LeadService, OptionsService},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetsBackendKind {
    Google,
    Memory,
}

// Configuração lida do ambiente (.env incluído) na inicialização.
// Sem Debug de propósito: carrega a credencial.
#[derive(Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub spreadsheet_id: Option<String>,
    pub credentials_base64: Option<String>,
    pub sheets_backend: SheetsBackendKind,
    pub sheet_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: "sqlite://app.db".to_string(),
            spreadsheet_id: None,
            credentials_base64: None,
            sheets_backend: SheetsBackendKind::Google,
            sheet_name: "Leads".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta as configurações a partir de uma função de busca (o ambiente, nos binários).
    /// Valores vazios contam como ausentes.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(port) => port.parse::<u16>().context("PORT deve ser um número entre 0 e 65535")?,
            None => defaults.port,
        };

        let sheets_backend = match var("SHEETS_BACKEND").as_deref() {
            None | Some("google") => SheetsBackendKind::Google,
            Some("memory") => SheetsBackendKind::Memory,
            Some(other) => bail!("SHEETS_BACKEND inválido: '{other}' (use 'google' ou 'memory')"),
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            spreadsheet_id: var("SPREADSHEET_ID"),
            credentials_base64: var("GOOGLE_CREDENTIALS_BASE64"),
            sheets_backend,
            sheet_name: var("SHEET_NAME").unwrap_or(defaults.sheet_name),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn SheetsBackend>,
    pub settings: Arc<Settings>,
    pub lead_service: LeadService,
    pub options_service: OptionsService,
    pub dashboard_service: DashboardService,
    pub user_repo: UserRepository,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        let connect_options = SqliteConnectOptions::from_str(&settings.database_url)
            .with_context(|| format!("DATABASE_URL inválida: {}", settings.database_url))?
            .create_if_missing(true);

        // Cada conexão a ":memory:" abre um banco próprio; nesse caso o pool fica com uma só.
        let max_connections = if settings.database_url.contains(":memory:") { 1 } else { 5 };

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(connect_options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let sheets: Arc<dyn SheetsBackend> = match settings.sheets_backend {
            SheetsBackendKind::Google => Arc::new(GoogleSheetsClient::new()),
            SheetsBackendKind::Memory => {
                tracing::warn!("⚠️ Usando planilha em memória: os leads somem ao reiniciar.");
                Arc::new(MemorySheet::new())
            }
        };

        if let Some(spreadsheet_id) = &settings.spreadsheet_id {
            sheets.set_spreadsheet_id(spreadsheet_id.clone()).await;
        }

        // Credencial inválida não derruba o servidor: dá para corrigir via /api/config/auth.
        if let Some(credentials) = &settings.credentials_base64 {
            if let Err(e) = sheets.authenticate(credentials).await {
                tracing::warn!("⚠️ Falha ao autenticar no Google Sheets na inicialização: {}", e);
            }
        }

        Self::from_parts(db_pool, sheets, settings).await
    }

    /// Monta o gráfico de dependências a partir de peças já criadas.
    pub async fn from_parts(
        db_pool: SqlitePool,
        sheets: Arc<dyn SheetsBackend>,
        settings: Settings,
    ) -> anyhow::Result<Self> {
        let user_repo = UserRepository::new(db_pool);
        user_repo.ensure_schema().await?;

        let lead_repo = LeadRepository::new(sheets.clone(), settings.sheet_name.clone());

        Ok(Self {
            sheets,
            settings: Arc::new(settings),
            lead_service: LeadService::new(lead_repo.clone()),
            options_service: OptionsService::new(lead_repo.clone()),
            dashboard_service: DashboardService::new(lead_repo),
            user_repo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.bind_addr(), "0.0.0.0:5000");
        assert_eq!(settings.sheet_name, "Leads");
        assert_eq!(settings.sheets_backend, SheetsBackendKind::Google);
        assert!(settings.spreadsheet_id.is_none());
    }

    #[test]
    fn reads_values_and_ignores_blank_ones() {
        let settings = Settings::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("SPREADSHEET_ID", " abc123 "),
            ("GOOGLE_CREDENTIALS_BASE64", ""),
            ("SHEETS_BACKEND", "memory"),
        ]))
        .unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.spreadsheet_id.as_deref(), Some("abc123"));
        assert!(settings.credentials_base64.is_none());
        assert_eq!(settings.sheets_backend, SheetsBackendKind::Memory);
    }

    #[test]
    fn rejects_bad_port_and_backend() {
        assert!(Settings::from_lookup(lookup(&[("PORT", "cinco mil")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("SHEETS_BACKEND", "excel")])).is_err());
    }

    #[tokio::test]
    async fn builds_state_with_memory_backend() {
        let settings = Settings {
            database_url: "sqlite::memory:".to_string(),
            spreadsheet_id: Some("local".to_string()),
            sheets_backend: SheetsBackendKind::Memory,
            ..Settings::default()
        };

        let state = AppState::new(settings).await.unwrap();
        assert_eq!(state.sheets.backend_tag(), "memory");
        assert!(state.lead_service.list_leads().await.unwrap().is_empty());
    }
}
