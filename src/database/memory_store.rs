//! Document store en memoria
//!
//! Mismo contrato que el backend PostgreSQL; se usa en tests y en desarrollo
//! local cuando no hay `DATABASE_URL`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::document_store::{
    Collection, DocumentQuery, DocumentStore, StoreError, StoreInfo, StoreResult,
};
use crate::models::DocumentId;

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, BTreeMap<String, Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_key<'a>(document: &'a Value, field: &str) -> &'a str {
    document.get(field).and_then(Value::as_str).unwrap_or_default()
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find(&self, collection: Collection, query: &DocumentQuery) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        let mut documents: Vec<(&String, &Value)> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|(_, doc)| query.matches(doc)).collect())
            .unwrap_or_default();

        // Desempate por id descendente, igual que el backend PostgreSQL
        if let Some(field) = query.sort_desc {
            documents.sort_by(|(id_a, a), (id_b, b)| {
                sort_key(b, field)
                    .cmp(sort_key(a, field))
                    .then_with(|| id_b.cmp(id_a))
            });
        }

        let documents = documents
            .into_iter()
            .skip(query.skip)
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|(_, doc)| doc.clone())
            .collect::<Vec<_>>();

        debug!("📥 memory find en '{}': {} documentos", collection.name(), documents.len());
        Ok(documents)
    }

    async fn count(&self, collection: Collection, query: &DocumentQuery) -> StoreResult<u64> {
        let collections = self.collections.read().await;
        let count = collections
            .get(&collection)
            .map(|docs| docs.values().filter(|doc| query.matches(doc)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn find_by_id(&self, collection: Collection, id: &DocumentId) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id.as_str()))
            .cloned())
    }

    async fn insert(&self, collection: Collection, id: &DocumentId, document: Value) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        if docs.contains_key(id.as_str()) {
            return Err(StoreError::Duplicate {
                collection: collection.name(),
                id: id.to_string(),
            });
        }
        docs.insert(id.to_string(), document);
        Ok(())
    }

    async fn replace(&self, collection: Collection, id: &DocumentId, document: Value) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        match collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id.as_str()))
        {
            Some(existing) => {
                *existing = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: Collection, id: &DocumentId) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(&collection)
            .and_then(|docs| docs.remove(id.as_str()))
            .is_some())
    }

    async fn ping(&self) -> StoreResult<StoreInfo> {
        Ok(StoreInfo {
            backend: self.backend(),
            version: None,
            collections: Collection::ALL.iter().map(Collection::name).collect(),
        })
    }
}
