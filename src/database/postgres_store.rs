//! Document store sobre PostgreSQL
//!
//! Cada colección es una tabla `(id TEXT PRIMARY KEY, data JSONB)`. Los
//! filtros y la búsqueda se traducen a expresiones sobre `data->>'campo'`.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::document_store::{
    Collection, DocumentQuery, DocumentStore, StoreError, StoreInfo, StoreResult,
};
use crate::models::DocumentId;

#[derive(Debug, Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear las tablas de todas las colecciones (idempotente)
    pub async fn ensure_collections(&self) -> StoreResult<()> {
        for collection in Collection::ALL {
            let table = collection.name();
            let create_table = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id         TEXT PRIMARY KEY,
                    data       JSONB NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
                )
                "#
            );
            let create_index = format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON {table} ((data->>'createdAt'))"
            );
            sqlx::query(&create_table).execute(&self.pool).await?;
            sqlx::query(&create_index).execute(&self.pool).await?;
            debug!("🗄️ Colección '{}' lista", table);
        }
        info!("✅ Colecciones del document store verificadas");
        Ok(())
    }
}

/// Escapar comodines de LIKE para búsqueda literal
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, query: &DocumentQuery) {
    builder.push(" WHERE TRUE");

    for (field, value) in &query.filters {
        builder.push(" AND data->>");
        builder.push_bind(*field);
        builder.push(" = ");
        builder.push_bind(value.clone());
    }

    if let Some(search) = &query.search {
        let pattern = like_pattern(&search.term);
        builder.push(" AND (FALSE");
        for field in search.fields {
            builder.push(" OR data->>");
            builder.push_bind(*field);
            builder.push(" ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" ESCAPE '\\'");
        }
        builder.push(")");
    }
}

/// Orden descendente con desempate por id. El campo va literal en el SQL,
/// igual que en el índice `idx_<colección>_created_at`.
fn push_order(builder: &mut QueryBuilder<'_, Postgres>, query: &DocumentQuery) {
    if let Some(field) = query.sort_desc {
        builder.push(format!(" ORDER BY data->>'{}' DESC, id DESC", field));
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn find(&self, collection: Collection, query: &DocumentQuery) -> StoreResult<Vec<Value>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT data FROM {}", collection.name()));
        push_conditions(&mut builder, query);

        push_order(&mut builder, query);
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit as i64);
        }
        if query.skip > 0 {
            builder.push(" OFFSET ");
            builder.push_bind(query.skip as i64);
        }

        let documents = builder
            .build_query_scalar::<Value>()
            .fetch_all(&self.pool)
            .await?;

        debug!("📥 postgres find en '{}': {} documentos", collection.name(), documents.len());
        Ok(documents)
    }

    async fn count(&self, collection: Collection, query: &DocumentQuery) -> StoreResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", collection.name()));
        push_conditions(&mut builder, query);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn find_by_id(&self, collection: Collection, id: &DocumentId) -> StoreResult<Option<Value>> {
        let sql = format!("SELECT data FROM {} WHERE id = $1", collection.name());
        let document = sqlx::query_scalar::<_, Value>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(document)
    }

    async fn insert(&self, collection: Collection, id: &DocumentId, document: Value) -> StoreResult<()> {
        let sql = format!(
            "INSERT INTO {} (id, data, created_at) VALUES ($1, $2, now())",
            collection.name()
        );
        sqlx::query(&sql)
            .bind(id.as_str())
            .bind(&document)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate {
                    collection: collection.name(),
                    id: id.to_string(),
                },
                _ => StoreError::Database(e),
            })?;
        Ok(())
    }

    async fn replace(&self, collection: Collection, id: &DocumentId, document: Value) -> StoreResult<bool> {
        let sql = format!("UPDATE {} SET data = $2 WHERE id = $1", collection.name());
        let result = sqlx::query(&sql)
            .bind(id.as_str())
            .bind(&document)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: Collection, id: &DocumentId) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", collection.name());
        let result = sqlx::query(&sql)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<StoreInfo> {
        let version = sqlx::query_scalar::<_, String>("SELECT version()")
            .fetch_one(&self.pool)
            .await?;
        Ok(StoreInfo {
            backend: self.backend(),
            version: Some(version),
            collections: Collection::ALL.iter().map(Collection::name).collect(),
        })
    }
}
