// src/db/memory_sheet.rs

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    common::error::AppError,
    db::sheets::{SheetRange, SheetsBackend},
    models::lead::LeadColumn,
};

/// Planilha mantida em memória, com a mesma semântica de linhas do Google Sheets
/// (linha 1 = cabeçalho, células vazias do fim omitidas na leitura).
/// Serve para desenvolvimento local (`SHEETS_BACKEND=memory`) e para os testes.
pub struct MemorySheet {
    grid: Mutex<Vec<Vec<String>>>,
    spreadsheet_id: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    writes_left: Mutex<Option<usize>>,
}

impl Default for MemorySheet {
    fn default() -> Self {
        Self::with_rows(Vec::new())
    }
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cabeçalho padrão seguido das linhas de dados informadas.
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        let mut grid = vec![LeadColumn::header_row()];
        grid.extend(rows);
        Self {
            grid: Mutex::new(grid),
            spreadsheet_id: Mutex::new(None),
            fail_reads: AtomicBool::new(false),
            writes_left: Mutex::new(None),
        }
    }

    /// Linhas de dados (sem o cabeçalho), exatamente como estão guardadas.
    pub async fn data_rows(&self) -> Vec<Vec<String>> {
        self.grid.lock().await.iter().skip(1).cloned().collect()
    }

    pub async fn spreadsheet_id(&self) -> Option<String> {
        self.spreadsheet_id.lock().await.clone()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Depois de `n` escritas bem-sucedidas, as próximas falham.
    pub async fn fail_writes_after(&self, n: usize) {
        *self.writes_left.lock().await = Some(n);
    }

    async fn take_write_permit(&self) -> Result<(), AppError> {
        let mut left = self.writes_left.lock().await;
        match left.as_mut() {
            Some(0) => Err(AppError::Upstream("503 Service Unavailable: escritura simulada falló".to_string())),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

fn trim_trailing_empty(mut row: Vec<String>) -> Vec<String> {
    while row.last().is_some_and(|cell| cell.is_empty()) {
        row.pop();
    }
    row
}

#[async_trait]
impl SheetsBackend for MemorySheet {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn set_spreadsheet_id(&self, spreadsheet_id: String) {
        *self.spreadsheet_id.lock().await = Some(spreadsheet_id);
    }

    async fn authenticate(&self, _credentials_base64: &str) -> Result<(), AppError> {
        tracing::info!("Planilha em memória: autenticação ignorada");
        Ok(())
    }

    async fn read_range(&self, range: &SheetRange) -> Result<Vec<Vec<String>>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("503 Service Unavailable: lectura simulada falló".to_string()));
        }

        let grid = self.grid.lock().await;
        let first = range.first_row.unwrap_or(1).max(1) as usize - 1;
        let last = range
            .last_row
            .map(|row| row as usize)
            .unwrap_or(grid.len())
            .min(grid.len());
        if first >= last {
            return Ok(Vec::new());
        }

        let mut rows: Vec<Vec<String>> = grid[first..last]
            .iter()
            .cloned()
            .map(trim_trailing_empty)
            .collect();
        // Como a API real, linhas vazias no fim não voltam.
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        Ok(rows)
    }

    async fn append_row(&self, _range: &SheetRange, values: Vec<String>) -> Result<(), AppError> {
        self.take_write_permit().await?;
        self.grid.lock().await.push(values);
        Ok(())
    }

    async fn update_range(&self, range: &SheetRange, values: Vec<Vec<String>>) -> Result<(), AppError> {
        self.take_write_permit().await?;
        let mut grid = self.grid.lock().await;
        let first = range.first_row.unwrap_or(1).max(1) as usize - 1;
        for (offset, row) in values.into_iter().enumerate() {
            let index = first + offset;
            if grid.len() <= index {
                grid.resize(index + 1, Vec::new());
            }
            grid[index] = row;
        }
        Ok(())
    }
}
