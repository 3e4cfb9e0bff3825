// src/db/lead_repo.rs

use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use crate::{
    common::error::AppError,
    db::sheets::{SheetRange, SheetsBackend},
    models::lead::{pad_row, Lead, LeadColumn, LeadPayload, ESTADO_ACTIVO, ESTADO_INACTIVO, LEAD_COLUMNS, PIPELINE_STAGES},
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

// O repositório de leads: cada lead é uma linha da aba configurada.
#[derive(Clone)]
pub struct LeadRepository {
    sheets: Arc<dyn SheetsBackend>,
    sheet_name: String,
    // Serializa "contar + anexar" dentro do processo para não repetir ids.
    create_lock: Arc<Mutex<()>>,
}

impl LeadRepository {
    pub fn new(sheets: Arc<dyn SheetsBackend>, sheet_name: impl Into<String>) -> Self {
        Self {
            sheets,
            sheet_name: sheet_name.into(),
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Lê todas as linhas de dados. O id de cada lead é a sua posição (1-based).
    pub async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        let rows = self.sheets.read_range(&SheetRange::data(&self.sheet_name)).await?;
        Ok(rows
            .into_iter()
            .zip(1u32..)
            .map(|(row, id)| Lead::from_row(id, row))
            .collect())
    }

    pub async fn get_lead(&self, id: u32) -> Result<Option<Lead>, AppError> {
        Ok(self.list_leads().await?.into_iter().find(|lead| lead.id == id))
    }

    /// Anexa uma nova linha e devolve o id atribuído (quantidade atual + 1).
    pub async fn create_lead(&self, payload: &LeadPayload) -> Result<u32, AppError> {
        let _guard = self.create_lock.lock().await;

        let next_id = self.list_leads().await?.len() as u32 + 1;
        let stamp = now_timestamp();

        let mut row = vec![String::new(); LEAD_COLUMNS];
        row[LeadColumn::Id.index()] = next_id.to_string();
        row[LeadColumn::Registro.index()] = today();
        row[LeadColumn::Estado.index()] = ESTADO_ACTIVO.to_string();
        row[LeadColumn::Pipeline.index()] = PIPELINE_STAGES[0].to_string();
        // Campo enviado (mesmo vazio) vence o padrão.
        for (column, value) in payload.changes() {
            row[column.index()] = value.to_string();
        }
        row[LeadColumn::FechaCreacion.index()] = stamp.clone();
        row[LeadColumn::FechaModificacion.index()] = stamp;

        self.sheets
            .append_row(&SheetRange::table(&self.sheet_name), row)
            .await?;

        Ok(next_id)
    }

    /// Reescreve a linha `id + 1` com os campos presentes no payload e carimba a modificação.
    /// Uma linha em branco no meio dos dados continua sendo um lead válido.
    pub async fn update_lead(&self, id: u32, payload: &LeadPayload) -> Result<(), AppError> {
        let row_number = match id.checked_add(1) {
            Some(row) if id > 0 => row,
            _ => return Err(AppError::LeadNotFound),
        };

        let rows = self.sheets.read_range(&SheetRange::data(&self.sheet_name)).await?;
        let current = rows
            .into_iter()
            .nth(id as usize - 1)
            .ok_or(AppError::LeadNotFound)?;

        let range = SheetRange::row(&self.sheet_name, row_number);
        let mut row = pad_row(current);
        for (column, value) in payload.changes() {
            row[column.index()] = value.to_string();
        }
        row[LeadColumn::FechaModificacion.index()] = now_timestamp();

        self.sheets.update_range(&range, vec![row]).await
    }

    /// Soft delete: só marca o lead como inativo, a linha continua lá.
    pub async fn delete_lead(&self, id: u32) -> Result<(), AppError> {
        self.update_lead(id, &LeadPayload::single(LeadColumn::Estado, ESTADO_INACTIVO))
            .await
    }
}
