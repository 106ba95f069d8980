use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::database::{DocumentQuery, DocumentStore};
use crate::dto::api_response::{page_window, status_filter, Listing};
use crate::dto::driver_dto::{DriverListQuery, DriverRequest};
use crate::models::document_id::DocumentId;
use crate::models::driver::{Driver, DriverStatus, DRIVER_SEARCH_FIELDS};
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::serde_ext::now;

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repository: DriverRepository::new(store),
        }
    }

    /// Listado de conductores; el estado se compara con el valor guardado
    /// (`on_leave` incluido), no con la vista resumida
    pub async fn list(&self, filters: &DriverListQuery) -> Result<Listing<Driver>, AppError> {
        let mut query = DocumentQuery::new().sorted_desc_by("createdAt");

        if let Some(status) = status_filter::<DriverStatus>(filters.status.as_deref())? {
            query = query.with_filter("status", status.as_str());
        }
        if let Some(search) = filters.search.as_deref() {
            query = query.with_search(search, DRIVER_SEARCH_FIELDS);
        }

        let total = self.repository.count(&query.unpaged()).await?;
        if let Some(window) = page_window(filters.page, filters.limit)? {
            query = query.paginate(window.skip, window.limit);
        }

        let items = self.repository.find(&query).await?;
        Ok(Listing { items, total })
    }

    pub async fn get_by_id(&self, id: &DocumentId) -> Result<Driver, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))
    }

    pub async fn create(&self, request: DriverRequest) -> Result<Driver, AppError> {
        request.validate()?;

        let timestamp = now();
        let driver = request.into_driver(DocumentId::generate(), timestamp, timestamp)?;
        self.repository.create(&driver).await?;

        info!("👤 Conductor creado: {} ({})", driver.id, driver.full_name());
        Ok(driver)
    }

    pub async fn update(&self, id: &DocumentId, request: DriverRequest) -> Result<Driver, AppError> {
        request.validate()?;

        let current = self.get_by_id(id).await?;
        let driver = request.into_driver(id.clone(), current.created_at, now())?;

        if !self.repository.replace(&driver).await? {
            return Err(not_found_error("Driver"));
        }

        info!("👤 Conductor actualizado: {}", driver.id);
        Ok(driver)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Driver"));
        }

        info!("🗑️ Conductor eliminado: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryDocumentStore;
    use serde_json::json;

    fn controller() -> DriverController {
        DriverController::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn request(first: &str, last: &str, status: &str) -> DriverRequest {
        serde_json::from_value(json!({
            "firstName": first,
            "lastName": last,
            "email": format!("{}@example.com", first.to_lowercase()),
            "phone": "0600000000",
            "address": "1 rue de Lyon",
            "licenseNumber": "DL-001",
            "licenseType": "C",
            "licenseExpiryDate": "2027-05-01",
            "status": status,
            "emergencyContact": "Contact",
            "emergencyPhone": "0611111111"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn status_and_search_combine_with_and() {
        let controller = controller();
        controller.create(request("Jane", "Smith", "active")).await.unwrap();
        controller.create(request("Jane", "Doe", "on_leave")).await.unwrap();
        controller.create(request("Paul", "Smith", "active")).await.unwrap();

        let filters = DriverListQuery {
            status: Some("active".to_string()),
            search: Some("JANE".to_string()),
            ..Default::default()
        };
        let listing = controller.list(&filters).await.unwrap();

        assert_eq!(listing.total, 1);
        assert_eq!(listing.items[0].last_name, "Smith");
    }

    #[tokio::test]
    async fn on_leave_filter_matches_stored_status() {
        let controller = controller();
        controller.create(request("Jane", "Doe", "on_leave")).await.unwrap();

        let filters = DriverListQuery {
            status: Some("on_leave".to_string()),
            ..Default::default()
        };
        assert_eq!(controller.list(&filters).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn unknown_status_filter_is_rejected() {
        let filters = DriverListQuery {
            status: Some("retired".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            controller().list(&filters).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn update_keeps_creation_time() {
        let controller = controller();
        let created = controller.create(request("Jane", "Smith", "active")).await.unwrap();

        let updated = controller
            .update(&created.id, request("Jane", "Smith", "inactive"))
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.status, DriverStatus::Inactive);
    }

    #[tokio::test]
    async fn delete_missing_driver_is_not_found() {
        assert!(matches!(
            controller().delete(&DocumentId::generate()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
