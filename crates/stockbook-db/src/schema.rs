//! # Schema Bootstrap
//!
//! Embedded DDL for the product catalog.
//!
//! There is exactly one table and it never migrates; `IF NOT EXISTS` makes
//! the statement idempotent, so [`ensure_schema`] can run at every startup.
//! The original MySQL deployment issued `CREATE DATABASE IF NOT EXISTS`
//! first; with an embedded store, file creation is handled by the connect
//! options and only the table remains to bootstrap.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::{DbError, DbResult};

/// DDL for the products table.
///
/// `price_cents` stores the two-fractional-digit price as integer cents so
/// round trips are exact. `id` is assigned by the store on insert.
pub const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    description TEXT,
    price_cents INTEGER NOT NULL,
    quantity    INTEGER NOT NULL,
    category    TEXT    NOT NULL
)
"#;

/// Creates the products table if it does not exist.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Never touches existing rows
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    info!("Ensuring product schema");

    sqlx::query(CREATE_PRODUCTS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    info!("Product schema ready");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{ConnectionManager, DbConfig};

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let manager = ConnectionManager::new(DbConfig::in_memory());
        let pool = manager.acquire().await.unwrap();

        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
