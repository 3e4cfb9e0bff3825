// src/models/dashboard.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{ser::SerializeMap, Serialize, Serializer};
use utoipa::ToSchema;

use crate::models::lead::Lead;

// 1. Estatísticas do funil
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct StageStats {
    pub count: u32,
    // Mantido pelo formato que o frontend já consome; hoje é sempre 0.
    pub value: u32,
}

/// Contagem por etapa, serializada como objeto na ordem do funil:
/// `{"Prospección": {"count": 0, "value": 0}, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineStats {
    stages: Vec<(String, StageStats)>,
}

impl PipelineStats {
    pub fn with_stages<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            stages: names
                .into_iter()
                .map(|name| (name.to_string(), StageStats::default()))
                .collect(),
        }
    }

    /// Soma 1 na etapa; devolve `false` se a etapa não é conhecida.
    pub fn increment(&mut self, stage: &str) -> bool {
        match self.stages.iter_mut().find(|(name, _)| name == stage) {
            Some((_, stats)) => {
                stats.count += 1;
                true
            }
            None => false,
        }
    }

    pub fn count(&self, stage: &str) -> Option<u32> {
        self.stages
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, stats)| stats.count)
    }
}

impl Serialize for PipelineStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stages.len()))?;
        for (name, stats) in &self.stages {
            map.serialize_entry(name, stats)?;
        }
        map.end()
    }
}

// 2. Cobrança (leads a crédito com saldo pendente)
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionsReport {
    pub leads: Vec<Lead>,
    pub total_pendiente: Decimal,
}

// 3. Métricas gerais do dashboard
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UpcomingTask {
    #[schema(example = 4)]
    pub lead_id: u32,
    #[schema(example = "Ana Pérez")]
    pub lead_name: String,
    #[schema(example = "Llamar para cotización")]
    pub action: String,
    #[schema(example = "2024-05-20")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardMetrics {
    pub total_leads: usize,
    pub pipeline_distribution: BTreeMap<String, usize>,
    pub source_distribution: BTreeMap<String, usize>,
    pub upcoming_tasks: Vec<UpcomingTask>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pipeline_stats_serialize_in_stage_order() {
        let mut stats = PipelineStats::with_stages(["Prospección", "Contacto"]);
        assert!(stats.increment("Contacto"));
        assert!(!stats.increment("Perdido"));

        let text = serde_json::to_string(&stats).unwrap();
        assert!(text.find("Prospección").unwrap() < text.find("Contacto").unwrap());
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({
                "Prospección": { "count": 0, "value": 0 },
                "Contacto": { "count": 1, "value": 0 }
            })
        );
    }
}
