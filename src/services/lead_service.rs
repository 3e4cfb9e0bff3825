// src/services/lead_service.rs

use crate::{
    common::error::AppError,
    db::LeadRepository,
    models::lead::{Lead, LeadColumn, LeadPayload},
};

/// Campos sem os quais um lead não é criado.
const REQUIRED_ON_CREATE: [LeadColumn; 2] = [LeadColumn::Nombre, LeadColumn::Telefono];

#[derive(Clone)]
pub struct LeadService {
    repo: LeadRepository,
}

impl LeadService {
    pub fn new(repo: LeadRepository) -> Self {
        Self { repo }
    }

    pub async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        self.repo.list_leads().await.inspect_err(|e| {
            tracing::error!("Erro ao obter leads: {}", e);
        })
    }

    pub async fn get_lead(&self, id: u32) -> Result<Lead, AppError> {
        self.repo.get_lead(id).await?.ok_or(AppError::LeadNotFound)
    }

    pub async fn create_lead(&self, payload: &LeadPayload) -> Result<u32, AppError> {
        for column in REQUIRED_ON_CREATE {
            if payload.get(column).is_none_or(str::is_empty) {
                return Err(AppError::Validation(format!("Campo requerido: {}", column.key())));
            }
        }

        let id = self.repo.create_lead(payload).await.inspect_err(|e| {
            tracing::error!("Erro ao criar lead: {}", e);
        })?;
        tracing::info!("✅ Lead {} criado", id);
        Ok(id)
    }

    pub async fn update_lead(&self, id: u32, payload: &LeadPayload) -> Result<(), AppError> {
        self.repo.update_lead(id, payload).await.inspect_err(|e| {
            tracing::error!("Erro ao atualizar lead {}: {}", id, e);
        })?;
        tracing::info!("✏️ Lead {} atualizado", id);
        Ok(())
    }

    pub async fn delete_lead(&self, id: u32) -> Result<(), AppError> {
        self.repo.delete_lead(id).await.inspect_err(|e| {
            tracing::error!("Erro ao inativar lead {}: {}", id, e);
        })?;
        tracing::info!("🗑️ Lead {} marcado como Inactivo", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemorySheet;
    use std::sync::Arc;

    fn service() -> LeadService {
        LeadService::new(LeadRepository::new(Arc::new(MemorySheet::new()), "Leads"))
    }

    #[tokio::test]
    async fn create_requires_nombre_and_telefono() {
        let service = service();

        let only_name = LeadPayload { nombre: Some("Ana".into()), ..LeadPayload::default() };
        let err = service.create_lead(&only_name).await.unwrap_err();
        assert_eq!(err.to_string(), "Campo requerido: telefono");

        let empty_name = LeadPayload {
            nombre: Some(String::new()),
            telefono: Some("555".into()),
            ..LeadPayload::default()
        };
        let err = service.create_lead(&empty_name).await.unwrap_err();
        assert_eq!(err.to_string(), "Campo requerido: nombre");

        assert!(service.list_leads().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_unknown_lead_is_not_found() {
        let err = service().get_lead(3).await.unwrap_err();
        assert!(matches!(err, AppError::LeadNotFound));
    }
}
