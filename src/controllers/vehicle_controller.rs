use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::database::{DocumentQuery, DocumentStore};
use crate::dto::api_response::{page_window, status_filter, Listing};
use crate::dto::vehicle_dto::{VehicleListQuery, VehicleRequest, VehicleStatsResponse};
use crate::models::document_id::DocumentId;
use crate::models::vehicle::{Vehicle, VehicleStatus, VEHICLE_SEARCH_FIELDS};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::serde_ext::now;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repository: VehicleRepository::new(store),
        }
    }

    /// Listado filtrado en el servidor: estado AND búsqueda, más recientes primero
    pub async fn list(&self, filters: VehicleListQuery) -> Result<Listing<Vehicle>, AppError> {
        let mut query = DocumentQuery::new().sorted_desc_by("createdAt");

        if let Some(status) = status_filter::<VehicleStatus>(filters.status.as_deref())? {
            query = query.with_filter("status", status.as_str());
        }
        if let Some(search) = filters.search.as_deref() {
            query = query.with_search(search, VEHICLE_SEARCH_FIELDS);
        }

        let total = self.repository.count(&query.unpaged()).await?;
        if let Some(window) = page_window(filters.page, filters.limit)? {
            query = query.paginate(window.skip, window.limit);
        }

        let items = self.repository.find(&query).await?;
        Ok(Listing { items, total })
    }

    pub async fn get_by_id(&self, id: &DocumentId) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))
    }

    pub async fn create(&self, request: VehicleRequest) -> Result<Vehicle, AppError> {
        request.validate()?;

        let timestamp = now();
        let vehicle = request.into_vehicle(DocumentId::generate(), timestamp, timestamp)?;
        self.repository.create(&vehicle).await?;

        info!("🚗 Vehículo creado: {} ({})", vehicle.id, vehicle.license_plate);
        Ok(vehicle)
    }

    /// Reemplazo completo del documento; conserva `_id` y `createdAt`
    pub async fn update(&self, id: &DocumentId, request: VehicleRequest) -> Result<Vehicle, AppError> {
        request.validate()?;

        let current = self.get_by_id(id).await?;
        let vehicle = request.into_vehicle(id.clone(), current.created_at, now())?;

        if !self.repository.replace(&vehicle).await? {
            return Err(not_found_error("Vehicle"));
        }

        info!("🚗 Vehículo actualizado: {}", vehicle.id);
        Ok(vehicle)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle"));
        }

        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }

    pub async fn stats(&self) -> Result<VehicleStatsResponse, AppError> {
        self.repository.stats().await
    }
}
