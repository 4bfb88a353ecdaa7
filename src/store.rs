//! Catalog Store - read-only access to the seeded part collections
//!
//! One Postgres table per category under the `catalog` schema, each row a
//! JSONB document plus a monotonic `seq` that preserves seeding order.
//! This layer only reads; population of the collections happens outside
//! this system.

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::model::Category;

#[derive(Clone, Debug)]
pub struct CatalogStore {
    pool: PgPool,
}

impl CatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// All documents for a category, in seeding order.
    ///
    /// Documents are served verbatim; field names (`_id`, `Brand`,
    /// `Price_THB`, ...) reach the wire exactly as stored.
    pub async fn list_category(&self, category: Category) -> Result<Vec<JsonValue>> {
        // table name comes from the closed Category enum, never from input
        let query = format!(
            r#"SELECT doc FROM catalog."{}" ORDER BY seq"#,
            category.route()
        );
        sqlx::query_scalar::<_, JsonValue>(&query)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list catalog collection '{category}'"))
    }

    /// Document count for a category
    pub async fn count_category(&self, category: Category) -> Result<i64> {
        let query = format!(r#"SELECT COUNT(*) FROM catalog."{}""#, category.route());
        sqlx::query_scalar::<_, i64>(&query)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to count catalog collection '{category}'"))
    }
}
