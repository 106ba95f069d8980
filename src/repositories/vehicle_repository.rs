use crate::database::{Collection, DocumentQuery};
use crate::dto::vehicle_dto::VehicleStatsResponse;
use crate::models::document_id::DocumentId;
use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};
use crate::utils::errors::AppError;

use super::{DocumentRepository, StoredDocument};

impl StoredDocument for Vehicle {
    const COLLECTION: Collection = Collection::Vehicles;

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

pub type VehicleRepository = DocumentRepository<Vehicle>;

impl DocumentRepository<Vehicle> {
    /// Contadores por estado y por tipo
    pub async fn stats(&self) -> Result<VehicleStatsResponse, AppError> {
        let mut stats = VehicleStatsResponse {
            total: self.count(&DocumentQuery::new()).await?,
            ..Default::default()
        };

        for status in VehicleStatus::ALL {
            let count = self
                .count(&DocumentQuery::new().with_filter("status", status.as_str()))
                .await?;
            match status {
                VehicleStatus::Active => stats.active = count,
                VehicleStatus::Maintenance => stats.maintenance = count,
                VehicleStatus::Inactive => stats.inactive = count,
            }
        }

        for vehicle_type in VehicleType::ALL {
            let count = self
                .count(&DocumentQuery::new().with_filter("type", vehicle_type.as_str()))
                .await?;
            stats.by_type.insert(vehicle_type.as_str(), count);
        }

        Ok(stats)
    }
}
