use crate::database::Collection;
use crate::models::document_id::DocumentId;
use crate::models::driver::Driver;

use super::{DocumentRepository, StoredDocument};

impl StoredDocument for Driver {
    const COLLECTION: Collection = Collection::Drivers;

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

pub type DriverRepository = DocumentRepository<Driver>;
