// src/db/sheets.rs

use std::fmt;

use async_trait::async_trait;

use crate::common::error::AppError;

pub const FIRST_COLUMN: &str = "A";
pub const LAST_COLUMN: &str = "T";

/// Endereço A1 restrito às colunas A..T de uma aba.
/// Linhas ausentes deixam o intervalo aberto (`Leads!A2:T`, `Leads!A:T`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet: String,
    pub first_row: Option<u32>,
    pub last_row: Option<u32>,
}

impl SheetRange {
    /// Tudo abaixo do cabeçalho.
    pub fn data(sheet: &str) -> Self {
        Self { sheet: sheet.to_string(), first_row: Some(2), last_row: None }
    }

    /// Uma única linha da planilha (1-based, a linha 1 é o cabeçalho).
    pub fn row(sheet: &str, row: u32) -> Self {
        Self { sheet: sheet.to_string(), first_row: Some(row), last_row: Some(row) }
    }

    /// A tabela inteira; usado como alvo do append.
    pub fn table(sheet: &str) -> Self {
        Self { sheet: sheet.to_string(), first_row: None, last_row: None }
    }
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Nomes com espaço ou acento precisam de aspas simples no A1.
        if self.sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            write!(f, "{}!", self.sheet)?;
        } else {
            write!(f, "'{}'!", self.sheet.replace('\'', "''"))?;
        }
        write!(f, "{FIRST_COLUMN}")?;
        if let Some(row) = self.first_row {
            write!(f, "{row}")?;
        }
        write!(f, ":{LAST_COLUMN}")?;
        if let Some(row) = self.last_row {
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Acesso em nível de linha à planilha que serve de banco para os leads.
#[async_trait]
pub trait SheetsBackend: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    async fn set_spreadsheet_id(&self, spreadsheet_id: String);

    /// Decodifica a credencial (Base64 de um JSON de conta de serviço) e abre a sessão.
    async fn authenticate(&self, credentials_base64: &str) -> Result<(), AppError>;

    async fn read_range(&self, range: &SheetRange) -> Result<Vec<Vec<String>>, AppError>;

    async fn append_row(&self, range: &SheetRange, values: Vec<String>) -> Result<(), AppError>;

    async fn update_range(&self, range: &SheetRange, values: Vec<Vec<String>>) -> Result<(), AppError>;
}
