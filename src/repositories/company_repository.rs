use crate::database::Collection;
use crate::models::company::Company;
use crate::models::document_id::DocumentId;
use crate::utils::errors::AppError;

use super::{DocumentRepository, StoredDocument};

impl StoredDocument for Company {
    const COLLECTION: Collection = Collection::Company;

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

pub type CompanyRepository = DocumentRepository<Company>;

impl DocumentRepository<Company> {
    /// La empresa vive siempre bajo el identificador fijo
    pub async fn find_singleton(&self) -> Result<Option<Company>, AppError> {
        self.find_by_id(&Company::singleton_id()).await
    }
}
