// src/services/options_service.rs

use std::collections::BTreeSet;

use crate::{
    common::error::AppError,
    db::LeadRepository,
    models::{
        lead::{Lead, LeadPayload, DEFAULT_ESTADOS, PIPELINE_STAGES},
        options::{OptionField, OptionsCatalog},
    },
};

/// Valores distintos e não vazios de um campo, em ordem lexicográfica.
/// `pipeline` e `estado` caem nas listas padrão quando não há dados.
fn distinct_values(leads: &[Lead], field: OptionField) -> Vec<String> {
    let values: BTreeSet<&str> = leads
        .iter()
        .map(|lead| lead.get(field.column()))
        .filter(|value| !value.is_empty())
        .collect();

    if values.is_empty() {
        return match field {
            OptionField::Pipeline => PIPELINE_STAGES.iter().map(|s| s.to_string()).collect(),
            OptionField::Estado => DEFAULT_ESTADOS.iter().map(|s| s.to_string()).collect(),
            OptionField::Fuente | OptionField::Vendedor => Vec::new(),
        };
    }
    values.into_iter().map(str::to_string).collect()
}

pub fn catalog_from_leads(leads: &[Lead]) -> OptionsCatalog {
    OptionsCatalog {
        fuente: distinct_values(leads, OptionField::Fuente),
        pipeline: distinct_values(leads, OptionField::Pipeline),
        estado: distinct_values(leads, OptionField::Estado),
        vendedor: distinct_values(leads, OptionField::Vendedor),
    }
}

// Registro de opções: nada é guardado à parte, tudo sai da varredura dos leads.
#[derive(Clone)]
pub struct OptionsService {
    repo: LeadRepository,
}

impl OptionsService {
    pub fn new(repo: LeadRepository) -> Self {
        Self { repo }
    }

    pub async fn list_options(&self) -> Result<OptionsCatalog, AppError> {
        let leads = self.repo.list_leads().await.inspect_err(|e| {
            tracing::error!("Erro ao varrer leads para as opções: {}", e);
        })?;
        Ok(catalog_from_leads(&leads))
    }

    pub async fn field_options(&self, field: OptionField) -> Result<Vec<String>, AppError> {
        let leads = self.repo.list_leads().await?;
        Ok(distinct_values(&leads, field))
    }

    /// Só valida. Não grava nada: a opção passa a existir quando um lead usar o valor.
    pub async fn add_option(&self, field: OptionField, option: &str) -> Result<(), AppError> {
        let existing = self.field_options(field).await?;
        if existing.iter().any(|value| value == option) {
            return Err(AppError::DuplicateOption(option.to_string()));
        }
        tracing::info!("Opção '{}' aceita para '{}' (não persistida)", option, field);
        Ok(())
    }

    /// Renomeia o valor em todas as linhas que o usam; devolve quantas foram alteradas.
    pub async fn update_option(&self, field: OptionField, old: &str, new: &str) -> Result<usize, AppError> {
        self.rewrite_matching(field, old, new).await
    }

    /// Esvazia a célula em todas as linhas que usam o valor.
    pub async fn delete_option(&self, field: OptionField, option: &str) -> Result<usize, AppError> {
        self.rewrite_matching(field, option, "").await
    }

    // Uma escrita por linha afetada, sem rollback: se falhar no meio,
    // as linhas anteriores já ficaram alteradas.
    async fn rewrite_matching(&self, field: OptionField, from: &str, to: &str) -> Result<usize, AppError> {
        let leads = self.repo.list_leads().await?;
        let change = LeadPayload::single(field.column(), to);

        let mut touched = 0;
        for lead in leads.iter().filter(|lead| lead.get(field.column()) == from) {
            if let Err(e) = self.repo.update_lead(lead.id, &change).await {
                tracing::error!(
                    "Falha ao reescrever '{}' no lead {} ({} linhas já alteradas): {}",
                    field, lead.id, touched, e
                );
                return Err(e);
            }
            touched += 1;
        }

        tracing::info!("Opção '{}' de '{}' reescrita em {} leads", from, field, touched);
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemorySheet;
    use std::sync::Arc;

    fn lead_row(id: &str, fuente: &str, estado: &str, pipeline: &str, vendedor: &str) -> Vec<String> {
        let mut row = vec![String::new(); 10];
        row[0] = id.into();
        row[1] = format!("Lead {id}");
        row[4] = fuente.into();
        row[7] = estado.into();
        row[8] = pipeline.into();
        row[9] = vendedor.into();
        row
    }

    fn service_with(rows: Vec<Vec<String>>) -> (Arc<MemorySheet>, OptionsService) {
        let sheet = Arc::new(MemorySheet::with_rows(rows));
        let repo = LeadRepository::new(sheet.clone(), "Leads");
        (sheet, OptionsService::new(repo))
    }

    #[tokio::test]
    async fn empty_dataset_uses_defaults_for_pipeline_and_estado() {
        let (_, service) = service_with(Vec::new());
        let catalog = service.list_options().await.unwrap();

        assert_eq!(catalog.pipeline, vec!["Prospección", "Contacto", "Negociación", "Cierre"]);
        assert_eq!(catalog.estado, vec!["Activo", "Inactivo"]);
        assert!(catalog.fuente.is_empty());
        assert!(catalog.vendedor.is_empty());
    }

    #[tokio::test]
    async fn collects_sorted_distinct_non_empty_values() {
        let (_, service) = service_with(vec![
            lead_row("1", "Web", "Activo", "Cierre", "Rosa"),
            lead_row("2", "Facebook", "Activo", "Contacto", ""),
            lead_row("3", "Web", "Inactivo", "Cierre", "Beto"),
        ]);
        let catalog = service.list_options().await.unwrap();

        assert_eq!(catalog.fuente, vec!["Facebook", "Web"]);
        assert_eq!(catalog.pipeline, vec!["Cierre", "Contacto"]);
        assert_eq!(catalog.vendedor, vec!["Beto", "Rosa"]);
        assert_eq!(
            service.field_options(OptionField::Estado).await.unwrap(),
            vec!["Activo", "Inactivo"]
        );
    }

    #[tokio::test]
    async fn add_option_rejects_duplicates_and_persists_nothing() {
        let (sheet, service) = service_with(vec![lead_row("1", "Web", "Activo", "Cierre", "Rosa")]);

        let err = service.add_option(OptionField::Fuente, "Web").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateOption(_)));

        // Padrões contam como existentes.
        let err = service.add_option(OptionField::Estado, "Activo").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateOption(_)));

        let before = sheet.data_rows().await;
        service.add_option(OptionField::Fuente, "Instagram").await.unwrap();
        assert_eq!(sheet.data_rows().await, before);
        assert!(!service.list_options().await.unwrap().fuente.contains(&"Instagram".to_string()));
    }

    #[tokio::test]
    async fn update_option_rewrites_every_matching_row() {
        let (_, service) = service_with(vec![
            lead_row("1", "Web", "Activo", "Cierre", "Rosa"),
            lead_row("2", "Facebook", "Activo", "Contacto", "Rosa"),
            lead_row("3", "Web", "Activo", "Cierre", "Beto"),
        ]);

        let count = service.update_option(OptionField::Vendedor, "Rosa", "Rosario").await.unwrap();
        assert_eq!(count, 2);

        let catalog = service.list_options().await.unwrap();
        assert_eq!(catalog.vendedor, vec!["Beto", "Rosario"]);
        let leads = service.repo.list_leads().await.unwrap();
        assert!(!leads[0].fecha_modificacion.is_empty());
        assert!(leads[2].fecha_modificacion.is_empty());
    }

    #[tokio::test]
    async fn delete_option_blanks_cells() {
        let (_, service) = service_with(vec![
            lead_row("1", "Web", "Activo", "Cierre", "Rosa"),
            lead_row("2", "Facebook", "Activo", "Contacto", "Rosa"),
        ]);

        let count = service.delete_option(OptionField::Fuente, "Web").await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(service.list_options().await.unwrap().fuente, vec!["Facebook"]);
        assert_eq!(service.delete_option(OptionField::Fuente, "Nada").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn partial_failure_leaves_earlier_rows_updated() {
        let (sheet, service) = service_with(vec![
            lead_row("1", "Web", "Activo", "Cierre", "Rosa"),
            lead_row("2", "Web", "Activo", "Cierre", "Rosa"),
            lead_row("3", "Web", "Activo", "Cierre", "Rosa"),
        ]);
        sheet.fail_writes_after(1).await;

        let err = service.update_option(OptionField::Fuente, "Web", "Sitio").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));

        let leads = service.repo.list_leads().await.unwrap();
        assert_eq!(leads[0].fuente, "Sitio");
        assert_eq!(leads[1].fuente, "Web");
        assert_eq!(leads[2].fuente, "Web");
    }

    #[tokio::test]
    async fn scan_failure_is_surfaced_not_faked() {
        let (sheet, service) = service_with(Vec::new());
        sheet.fail_reads(true);

        assert!(matches!(service.list_options().await, Err(AppError::Upstream(_))));
    }
}
