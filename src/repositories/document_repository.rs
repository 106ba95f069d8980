use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::database::document_store::{from_document, to_document};
use crate::database::{Collection, DocumentQuery, DocumentStore};
use crate::models::DocumentId;
use crate::utils::errors::AppError;

/// Modelo guardado en una colección propia
pub trait StoredDocument: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> &DocumentId;
}

/// Repositorio genérico sobre una colección
pub struct DocumentRepository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<T>,
}

impl<T: StoredDocument> DocumentRepository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub async fn find(&self, query: &DocumentQuery) -> Result<Vec<T>, AppError> {
        let documents = self.store.find(T::COLLECTION, query).await?;
        documents
            .into_iter()
            .map(|doc| from_document(doc).map_err(AppError::from))
            .collect()
    }

    pub async fn count(&self, query: &DocumentQuery) -> Result<u64, AppError> {
        Ok(self.store.count(T::COLLECTION, query).await?)
    }

    pub async fn find_by_id(&self, id: &DocumentId) -> Result<Option<T>, AppError> {
        match self.store.find_by_id(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, record: &T) -> Result<(), AppError> {
        let document = to_document(record)?;
        self.store.insert(T::COLLECTION, record.id(), document).await?;
        debug!("💾 Documento {} creado en '{}'", record.id(), T::COLLECTION.name());
        Ok(())
    }

    /// Reemplazo completo; `false` si el documento no existe
    pub async fn replace(&self, record: &T) -> Result<bool, AppError> {
        let document = to_document(record)?;
        Ok(self.store.replace(T::COLLECTION, record.id(), document).await?)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<bool, AppError> {
        let deleted = self.store.delete(T::COLLECTION, id).await?;
        debug!("🗑️ Documento {} en '{}' (eliminado: {})", id, T::COLLECTION.name(), deleted);
        Ok(deleted)
    }
}
