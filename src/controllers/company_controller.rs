use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::database::{DocumentStore, StoreError};
use crate::dto::company_dto::CompanyRequest;
use crate::models::company::Company;
use crate::repositories::company_repository::CompanyRepository;
use crate::utils::errors::AppError;
use crate::utils::serde_ext::now;

pub struct CompanyController {
    repository: CompanyRepository,
}

impl CompanyController {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repository: CompanyRepository::new(store),
        }
    }

    pub async fn get(&self) -> Result<Company, AppError> {
        self.repository
            .find_singleton()
            .await?
            .ok_or_else(|| AppError::NotFound("Company information not found".to_string()))
    }

    /// Crear o reemplazar la empresa. Devuelve el documento guardado y si fue creado.
    ///
    /// Sin bloqueos: con dos guardados simultáneos gana el último, pero
    /// `createdAt` siempre es el del documento que llegó primero al store.
    pub async fn save(&self, request: CompanyRequest) -> Result<(Company, bool), AppError> {
        request.validate()?;

        let timestamp = now();
        let mut company = request.into_company(timestamp, timestamp);

        if let Some(existing) = self.repository.find_singleton().await? {
            company.created_at = existing.created_at;
            if self.repository.replace(&company).await? {
                info!("🏢 Empresa actualizada: {}", company.name);
                return Ok((company, false));
            }
            company.created_at = timestamp;
        }

        self.create_singleton(company).await
    }

    /// Inserta la empresa; si otro guardado la creó antes, la reemplaza
    /// conservando su `createdAt`.
    async fn create_singleton(&self, mut company: Company) -> Result<(Company, bool), AppError> {
        match self.repository.create(&company).await {
            Ok(()) => {
                info!("🏢 Empresa creada: {}", company.name);
                Ok((company, true))
            }
            Err(AppError::Store(duplicate @ StoreError::Duplicate { .. })) => {
                let existing = self
                    .repository
                    .find_singleton()
                    .await?
                    .ok_or(AppError::Store(duplicate))?;

                company.created_at = existing.created_at;
                self.repository.replace(&company).await?;
                info!("🏢 Empresa actualizada: {}", company.name);
                Ok((company, false))
            }
            Err(e) => Err(e),
        }
    }
}
