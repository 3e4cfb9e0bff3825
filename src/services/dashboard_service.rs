// src/services/dashboard_service.rs

use std::{collections::BTreeMap, str::FromStr};

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::LeadRepository,
    models::{
        dashboard::{CollectionsReport, DashboardMetrics, PipelineStats, UpcomingTask},
        lead::{Lead, PIPELINE_STAGES, TIPO_PAGO_CREDITO},
    },
};

const UPCOMING_TASKS_LIMIT: usize = 10;

/// Lê `monto_pendiente` como número; texto que não é número vira `None`.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

pub fn pipeline_stats(leads: &[Lead]) -> PipelineStats {
    let mut stats = PipelineStats::with_stages(PIPELINE_STAGES);
    for lead in leads.iter().filter(|lead| lead.is_active()) {
        // Etapas desconhecidas ficam de fora de todos os baldes.
        stats.increment(&lead.pipeline);
    }
    stats
}

pub fn collections_report(leads: &[Lead]) -> CollectionsReport {
    let mut total_pendiente = Decimal::ZERO;
    let leads = leads
        .iter()
        .filter(|lead| lead.tipo_pago == TIPO_PAGO_CREDITO)
        .filter_map(|lead| {
            let amount = parse_amount(&lead.monto_pendiente)
                .filter(|amount| amount.is_sign_positive() && !amount.is_zero())?;
            total_pendiente += amount;
            Some(lead.clone())
        })
        .collect();

    CollectionsReport { leads, total_pendiente }
}

pub fn dashboard_metrics(leads: &[Lead]) -> DashboardMetrics {
    let active: Vec<&Lead> = leads.iter().filter(|lead| lead.is_active()).collect();

    let mut pipeline_distribution = BTreeMap::new();
    let mut source_distribution = BTreeMap::new();
    for lead in &active {
        *pipeline_distribution.entry(lead.pipeline.clone()).or_insert(0) += 1;
        *source_distribution.entry(lead.fuente.clone()).or_insert(0) += 1;
    }

    let upcoming_tasks = active
        .iter()
        .filter(|lead| !lead.proxima_accion.is_empty() && !lead.fecha_proxima_accion.is_empty())
        .take(UPCOMING_TASKS_LIMIT)
        .map(|lead| UpcomingTask {
            lead_id: lead.id,
            lead_name: lead.nombre.clone(),
            action: lead.proxima_accion.clone(),
            date: lead.fecha_proxima_accion.clone(),
        })
        .collect();

    DashboardMetrics {
        total_leads: active.len(),
        pipeline_distribution,
        source_distribution,
        upcoming_tasks,
    }
}

// Todas as agregações relêem a planilha inteira a cada chamada.
#[derive(Clone)]
pub struct DashboardService {
    repo: LeadRepository,
}

impl DashboardService {
    pub fn new(repo: LeadRepository) -> Self {
        Self { repo }
    }

    pub async fn get_pipeline_stats(&self) -> Result<PipelineStats, AppError> {
        Ok(pipeline_stats(&self.repo.list_leads().await?))
    }

    pub async fn get_collections(&self) -> Result<CollectionsReport, AppError> {
        Ok(collections_report(&self.repo.list_leads().await?))
    }

    pub async fn get_metrics(&self) -> Result<DashboardMetrics, AppError> {
        Ok(dashboard_metrics(&self.repo.list_leads().await?))
    }
}
