//! Contrato del document store
//!
//! Los handlers nunca ven el driver de base de datos: trabajan contra este
//! trait, que guarda documentos JSON en colecciones con nombre.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::DocumentId;

/// Errores del document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document '{id}' already exists in '{collection}'")]
    Duplicate { collection: &'static str, id: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Colecciones del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Vehicles,
    Drivers,
    Company,
    Diagnostics,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Vehicles,
        Collection::Drivers,
        Collection::Company,
        Collection::Diagnostics,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Vehicles => "vehicles",
            Collection::Drivers => "drivers",
            Collection::Company => "company",
            Collection::Diagnostics => "diagnostics",
        }
    }
}

/// Búsqueda de texto: contiene `term` (sin distinguir mayúsculas) en alguno de `fields`
#[derive(Debug, Clone, PartialEq)]
pub struct TextSearch {
    pub term: String,
    pub fields: &'static [&'static str],
}

/// Consulta sobre una colección.
///
/// Los filtros de igualdad y la búsqueda de texto se combinan con AND; dentro
/// de la búsqueda, los campos se combinan con OR.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    pub filters: Vec<(&'static str, String)>,
    pub search: Option<TextSearch>,
    pub sort_desc: Option<&'static str>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.filters.push((field, value.into()));
        self
    }

    /// Agregar búsqueda de texto; un término vacío no filtra nada
    pub fn with_search(mut self, term: &str, fields: &'static [&'static str]) -> Self {
        let term = term.trim();
        if !term.is_empty() {
            self.search = Some(TextSearch {
                term: term.to_string(),
                fields,
            });
        }
        self
    }

    pub fn sorted_desc_by(mut self, field: &'static str) -> Self {
        self.sort_desc = Some(field);
        self
    }

    pub fn paginate(mut self, skip: usize, limit: usize) -> Self {
        self.skip = skip;
        self.limit = Some(limit);
        self
    }

    /// Misma consulta sin orden ni paginación (para contar)
    pub fn unpaged(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            search: self.search.clone(),
            ..Self::default()
        }
    }

    /// Evalúa filtros y búsqueda sobre un documento en memoria
    pub fn matches(&self, document: &Value) -> bool {
        let filters_match = self
            .filters
            .iter()
            .all(|(field, expected)| {
                document.get(*field).and_then(Value::as_str) == Some(expected.as_str())
            });

        let search_match = match &self.search {
            None => true,
            Some(search) => {
                let needle = search.term.to_lowercase();
                search.fields.iter().any(|field| {
                    document
                        .get(*field)
                        .and_then(Value::as_str)
                        .map(|value| value.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
            }
        };

        filters_match && search_match
    }
}

/// Información básica del backend (ruta de diagnóstico)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub backend: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub collections: Vec<&'static str>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Nombre del backend ("postgres", "memory")
    fn backend(&self) -> &'static str;

    async fn find(&self, collection: Collection, query: &DocumentQuery) -> StoreResult<Vec<Value>>;

    async fn count(&self, collection: Collection, query: &DocumentQuery) -> StoreResult<u64>;

    async fn find_by_id(&self, collection: Collection, id: &DocumentId) -> StoreResult<Option<Value>>;

    /// `StoreError::Duplicate` si el id ya existe
    async fn insert(&self, collection: Collection, id: &DocumentId, document: Value) -> StoreResult<()>;

    /// Reemplaza el documento completo; `false` si no existe
    async fn replace(&self, collection: Collection, id: &DocumentId, document: Value) -> StoreResult<bool>;

    /// `false` si no existía
    async fn delete(&self, collection: Collection, id: &DocumentId) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<StoreInfo>;
}

/// Serializar un modelo a documento
pub fn to_document<T: Serialize>(value: &T) -> StoreResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Deserializar un documento a modelo
pub fn from_document<T: DeserializeOwned>(document: Value) -> StoreResult<T> {
    Ok(serde_json::from_value(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[&str] = &["firstName", "lastName"];

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let doc = json!({ "firstName": "John", "lastName": "Smith", "status": "active" });

        assert!(DocumentQuery::new().with_search("SMI", FIELDS).matches(&doc));
        assert!(DocumentQuery::new().with_search("john", FIELDS).matches(&doc));
        assert!(!DocumentQuery::new().with_search("doe", FIELDS).matches(&doc));
    }

    #[test]
    fn filters_and_search_combine_with_and() {
        let doc = json!({ "firstName": "John", "lastName": "Smith", "status": "inactive" });
        let query = DocumentQuery::new()
            .with_filter("status", "active")
            .with_search("smith", FIELDS);

        assert!(!query.matches(&doc));
    }

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(DocumentQuery::new().with_search("   ", FIELDS).search, None);
    }
}
