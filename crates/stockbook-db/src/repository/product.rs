//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Failure Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  How Store Failures Are Handled                         │
//! │                                                                         │
//! │  repo.insert(&product)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  try_insert() ── acquire handle ── run statement                       │
//! │       │                   │              │                              │
//! │       │              DbError         DbError                            │
//! │       │                   └──────┬───────┘                              │
//! │       ▼                          ▼                                      │
//! │  rows_affected == 1?     error!(..) logged, ONCE, here                 │
//! │       │                          │                                      │
//! │       ▼                          ▼                                      │
//! │  true / false            benign result (false / [] / None)             │
//! │                                                                         │
//! │  The public API never returns an error and never panics: a dead       │
//! │  store makes every operation report "nothing happened".                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Parameterization
//! Every statement binds user values as parameters; no value is ever
//! concatenated into SQL text. Search fragments additionally have their
//! LIKE wildcards escaped so they match literally.

use tracing::{debug, error};

use crate::connection::ConnectionManager;
use crate::error::DbResult;
use stockbook_core::Product;

/// Repository for product catalog operations.
///
/// Every operation obtains the current connection handle from the
/// [`ConnectionManager`] before executing; the repository never owns or
/// closes connections itself. Stateless apart from the manager clone, so
/// it is cheap to create and clone.
///
/// ## Usage
/// ```rust,ignore
/// let repo = manager.products();
///
/// if repo.insert(&product).await {
///     let all = repo.list_all().await;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    manager: ConnectionManager,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(manager: ConnectionManager) -> Self {
        ProductRepository { manager }
    }

    /// Inserts a new product.
    ///
    /// The store assigns the row id; `product.id` is not bound.
    ///
    /// ## Returns
    /// * `true` - exactly one row was written
    /// * `false` - any store failure (logged)
    pub async fn insert(&self, product: &Product) -> bool {
        debug!(name = %product.name, "Inserting product");

        match self.try_insert(product).await {
            Ok(inserted) => inserted,
            Err(e) => {
                error!(error = %e, "Product insert failed");
                false
            }
        }
    }

    async fn try_insert(&self, product: &Product) -> DbResult<bool> {
        let pool = self.manager.acquire().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price_cents, quantity, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.quantity)
        .bind(&product.category)
        .execute(&pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Lists the whole catalog, ordered by id ascending.
    ///
    /// With no intervening writes, repeated calls return identical
    /// sequences. On store failure, returns an empty vec (logged).
    pub async fn list_all(&self) -> Vec<Product> {
        debug!("Listing all products");

        match self.try_list_all().await {
            Ok(products) => products,
            Err(e) => {
                error!(error = %e, "Product listing failed");
                Vec::new()
            }
        }
    }

    async fn try_list_all(&self) -> DbResult<Vec<Product>> {
        let pool = self.manager.acquire().await?;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, quantity, category
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Some(Product)` - row found
    /// * `None` - no such id, or store failure (logged)
    pub async fn find_by_id(&self, id: i64) -> Option<Product> {
        debug!(id, "Fetching product");

        match self.try_find_by_id(id).await {
            Ok(product) => product,
            Err(e) => {
                error!(error = %e, id, "Product lookup failed");
                None
            }
        }
    }

    async fn try_find_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let pool = self.manager.acquire().await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, quantity, category
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&pool)
        .await?;

        Ok(product)
    }

    /// Finds products whose name contains the fragment, ordered by name.
    ///
    /// Matching is case-insensitive. An empty fragment matches the whole
    /// catalog. `%`, `_` and `\` in the fragment are matched literally,
    /// never as wildcards.
    pub async fn search_by_name(&self, fragment: &str) -> Vec<Product> {
        debug!(fragment = %fragment, "Searching products by name");

        match self.try_search_by_name(fragment).await {
            Ok(products) => products,
            Err(e) => {
                error!(error = %e, "Product search failed");
                Vec::new()
            }
        }
    }

    async fn try_search_by_name(&self, fragment: &str) -> DbResult<Vec<Product>> {
        let pool = self.manager.acquire().await?;

        let pattern = format!("%{}%", escape_like(fragment));

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, quantity, category
            FROM products
            WHERE name LIKE ?1 ESCAPE '\'
            ORDER BY name COLLATE NOCASE
            "#,
        )
        .bind(pattern)
        .fetch_all(&pool)
        .await?;

        Ok(products)
    }

    /// Replaces all fields of an existing product, keyed on its id.
    ///
    /// ## Returns
    /// * `true` - exactly one row was modified
    /// * `false` - no row carries this id (including `id = None`), or
    ///   store failure (logged). The catalog is unchanged either way.
    pub async fn update(&self, product: &Product) -> bool {
        debug!(id = ?product.id, "Updating product");

        match self.try_update(product).await {
            Ok(updated) => updated,
            Err(e) => {
                error!(error = %e, "Product update failed");
                false
            }
        }
    }

    async fn try_update(&self, product: &Product) -> DbResult<bool> {
        let pool = self.manager.acquire().await?;

        // An absent id binds NULL, matches no row, and reports false
        // without a special case.
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                quantity = ?5,
                category = ?6
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.quantity)
        .bind(&product.category)
        .execute(&pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Deletes a product by its id. Permanent; there is no soft delete.
    ///
    /// ## Returns
    /// * `true` - exactly one row was removed
    /// * `false` - no such id, or store failure (logged)
    pub async fn delete(&self, id: i64) -> bool {
        debug!(id, "Deleting product");

        match self.try_delete(id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                error!(error = %e, id, "Product delete failed");
                false
            }
        }
    }

    async fn try_delete(&self, id: i64) -> DbResult<bool> {
        let pool = self.manager.acquire().await?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Lists the distinct category values in use, alphabetically.
    ///
    /// Feeds category pickers; a category disappears from the list when
    /// its last product does. On store failure, returns an empty vec
    /// (logged).
    pub async fn list_categories(&self) -> Vec<String> {
        debug!("Listing categories");

        match self.try_list_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                error!(error = %e, "Category listing failed");
                Vec::new()
            }
        }
    }

    async fn try_list_categories(&self) -> DbResult<Vec<String>> {
        let pool = self.manager.acquire().await?;

        let categories = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category
            FROM products
            ORDER BY category COLLATE NOCASE
            "#,
        )
        .fetch_all(&pool)
        .await?;

        Ok(categories)
    }

    /// Counts catalog rows (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let pool = self.manager.acquire().await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await?;

        Ok(count)
    }
}

/// Escapes LIKE wildcards so a fragment matches literally.
///
/// `%` and `_` are pattern characters in SQL LIKE; a search for "100%"
/// must not match "100 Pack". The escape character itself is escaped too.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DbConfig;
    use std::time::Duration;
    use stockbook_core::Money;

    /// Fresh in-memory store with the schema applied.
    async fn memory_manager() -> ConnectionManager {
        let manager = ConnectionManager::new(DbConfig::in_memory());
        manager.initialize().await.unwrap();
        manager
    }

    fn pen() -> Product {
        Product::new("Pen", None, Money::from_cents(150), 10, "Office")
    }

    fn product(name: &str, category: &str) -> Product {
        Product::new(name, None, Money::from_cents(500), 1, category)
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like(""), "");
    }

    #[tokio::test]
    async fn test_insert_then_find_round_trips_every_field() {
        let manager = memory_manager().await;
        let repo = manager.products();

        let original = Product::new(
            "Stapler",
            Some("Full strip, metal body".to_string()),
            Money::from_cents(899),
            35,
            "Office",
        );
        assert!(repo.insert(&original).await);

        let all = repo.list_all().await;
        assert_eq!(all.len(), 1);
        let saved = &all[0];
        assert!(saved.is_persisted());

        let found = repo.find_by_id(saved.id.unwrap()).await.unwrap();
        assert_eq!(&found, saved);
        assert_eq!(found.name, original.name);
        assert_eq!(found.description, original.description);
        assert_eq!(found.price_cents, original.price_cents);
        assert_eq!(found.quantity, original.quantity);
        assert_eq!(found.category, original.category);
    }

    #[tokio::test]
    async fn test_find_by_id_returns_none_for_unknown_id() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.find_by_id(42).await.is_none());
    }

    #[tokio::test]
    async fn test_list_all_is_stable_and_ordered_by_id() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&product("Plate", "Kitchen")).await);
        assert!(repo.insert(&product("Cup", "Kitchen")).await);
        assert!(repo.insert(&product("Bowl", "Kitchen")).await);

        let first = repo.list_all().await;
        let second = repo.list_all().await;
        assert_eq!(first, second);

        // Ids ascend in insertion order, not name order.
        let ids: Vec<i64> = first.iter().map(|p| p.id.unwrap()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(first[0].name, "Plate");
        assert_eq!(first[2].name, "Bowl");
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&pen()).await);
        let mut saved = repo.list_all().await.remove(0);

        saved.name = "Gel Pen".to_string();
        saved.description = Some("0.5mm black".to_string());
        saved.price_cents = 250;
        saved.quantity = 7;
        saved.category = "Stationery".to_string();

        assert!(repo.update(&saved).await);

        let found = repo.find_by_id(saved.id.unwrap()).await.unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_update_with_unknown_id_changes_nothing() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&pen()).await);
        let before = repo.list_all().await;

        let mut ghost = pen();
        ghost.id = Some(9999);
        ghost.name = "Ghost Pen".to_string();

        assert!(!repo.update(&ghost).await);
        assert_eq!(repo.list_all().await, before);
    }

    #[tokio::test]
    async fn test_update_without_id_reports_false() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&pen()).await);
        assert!(!repo.update(&pen()).await);

        // The existing row is untouched.
        assert_eq!(repo.list_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_the_row() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&pen()).await);
        let id = repo.list_all().await[0].id.unwrap();

        assert!(repo.delete(id).await);
        assert!(repo.find_by_id(id).await.is_none());

        // Second delete of the same id finds nothing.
        assert!(!repo.delete(id).await);
    }

    #[tokio::test]
    async fn test_categories_are_distinct_and_sorted() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&product("Hammer", "Tools")).await);
        assert!(repo.insert(&product("Coffee", "Food")).await);
        assert!(repo.insert(&product("Wrench", "Tools")).await);

        assert_eq!(repo.list_categories().await, vec!["Food", "Tools"]);
    }

    #[tokio::test]
    async fn test_categories_empty_catalog() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.list_categories().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_matches_fragment_case_insensitively() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&product("Red Cup", "Kitchen")).await);
        assert!(repo.insert(&product("Blue Cup", "Kitchen")).await);
        assert!(repo.insert(&product("Plate", "Kitchen")).await);

        let hits = repo.search_by_name("cup").await;
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Blue Cup", "Red Cup"]);
    }

    #[tokio::test]
    async fn test_empty_search_returns_whole_catalog_by_name() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&product("Red Cup", "Kitchen")).await);
        assert!(repo.insert(&product("Blue Cup", "Kitchen")).await);
        assert!(repo.insert(&product("Plate", "Kitchen")).await);

        let hits = repo.search_by_name("").await;
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Blue Cup", "Plate", "Red Cup"]);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_as_literals() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&product("100% Cotton Tote", "Apparel")).await);
        assert!(repo.insert(&product("100 Pack Napkins", "Kitchen")).await);

        // Unescaped, "100%" would match both names.
        let hits = repo.search_by_name("100%").await;
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["100% Cotton Tote"]);

        // A bare "%" finds literal percent signs, not every row.
        let hits = repo.search_by_name("%").await;
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["100% Cotton Tote"]);
    }

    /// End to end: insert a 1.50 pen, see it listed with an assigned id,
    /// delete it, see the catalog empty again.
    #[tokio::test]
    async fn test_pen_catalog_scenario() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert!(repo.insert(&pen()).await);

        let all = repo.list_all().await;
        assert_eq!(all.len(), 1);
        let row = &all[0];
        assert!(row.id.is_some());
        assert_eq!(row.name, "Pen");
        assert_eq!(row.price(), Money::from_major_minor(1, 50));
        assert_eq!(row.quantity, 10);
        assert_eq!(row.category, "Office");

        assert!(repo.delete(row.id.unwrap()).await);
        assert!(repo.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_count_tracks_inserts() {
        let manager = memory_manager().await;
        let repo = manager.products();

        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.insert(&pen()).await);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    /// A store that cannot even be opened makes every public operation
    /// report its benign result instead of failing.
    #[tokio::test]
    async fn test_store_failures_yield_benign_results() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-directory");
        std::fs::write(&blocker, b"plain file").unwrap();

        let config = DbConfig::new(blocker.join("stockbook.db"))
            .connect_timeout(Duration::from_secs(1));
        let manager = ConnectionManager::new(config);
        let repo = manager.products();

        let mut ghost = pen();
        ghost.id = Some(1);

        assert!(!repo.insert(&pen()).await);
        assert!(repo.list_all().await.is_empty());
        assert!(repo.find_by_id(1).await.is_none());
        assert!(repo.search_by_name("pen").await.is_empty());
        assert!(!repo.update(&ghost).await);
        assert!(!repo.delete(1).await);
        assert!(repo.list_categories().await.is_empty());
        assert!(!manager.is_connected().await);
    }
}
