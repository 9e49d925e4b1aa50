//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Stock-level listings (all / low / high, shortages)
//! - Substring search over name, description and code
//! - CRUD, including a sparse UPDATE assembled from the supplied fields
//!
//! ## Sparse Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PATCH /inventario/7   { "stockActual": 40, "ubicacion": "" }          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductChanges { current_stock: Some(40), location: Some(None), .. }  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE products SET current_stock = ?, location = ?, updated_at = ?   │
//! │  WHERE id = ?                                                          │
//! │                                                                         │
//! │  Only supplied columns appear. Values are always bound, never spliced. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use botica_core::{Product, ProductChanges, ProductDraft, StockLevel};

const PRODUCT_COLUMNS: &str = r#"
    id,
    code,
    name,
    description,
    current_stock,
    minimum_stock,
    maximum_stock,
    unit_of_measure,
    purchase_price_cents,
    sale_price_cents,
    location,
    batch,
    expiration_date,
    category_id,
    supplier_id,
    status,
    created_at,
    updated_at
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products, newest first, optionally filtered by stock level.
    ///
    /// ## Filters
    /// - `Low`: current < minimum
    /// - `High`: maximum set and current > maximum
    pub async fn list(&self, level: StockLevel) -> DbResult<Vec<Product>> {
        debug!(level = ?level, "Listing products");

        let filter = match level {
            StockLevel::All => "",
            StockLevel::Low => "WHERE current_stock < minimum_stock",
            StockLevel::High => {
                "WHERE maximum_stock IS NOT NULL AND current_stock > maximum_stock"
            }
        };

        let sql = format!(
            "SELECT {} FROM products {} ORDER BY id DESC",
            PRODUCT_COLUMNS, filter
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Lists every product below its minimum stock, most urgent first.
    pub async fn list_shortages(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM products
            WHERE current_stock < minimum_stock
            ORDER BY current_stock ASC, id ASC
            "#,
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Substring search on name, description or code, ordered by name.
    ///
    /// Matching follows SQLite `LIKE`: case folds for ASCII letters only,
    /// so `ibu` finds `Ibuprofeno` but `ÉTER` does not find `éter`.
    ///
    /// `%` and `_` in the term match literally.
    pub async fn search(&self, term: &str) -> DbResult<Vec<Product>> {
        debug!(term = %term, "Searching products");

        let pattern = format!("%{}%", escape_like(term));
        let sql = format!(
            r#"
            SELECT {}
            FROM products
            WHERE name LIKE ?1 ESCAPE '\'
               OR description LIKE ?1 ESCAPE '\'
               OR code LIKE ?1 ESCAPE '\'
            ORDER BY name ASC, id ASC
            "#,
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Checks whether a product row exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found != 0)
    }

    /// Inserts a new product and returns its store-assigned id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - code already exists
    /// * `DbError::ForeignKeyViolation` - unknown category or supplier
    pub async fn insert(&self, draft: &ProductDraft) -> DbResult<i64> {
        debug!(name = %draft.name, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                code, name, description,
                current_stock, minimum_stock, maximum_stock,
                unit_of_measure, purchase_price_cents, sale_price_cents,
                location, batch, expiration_date,
                category_id, supplier_id, status,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3,
                ?4, ?5, ?6,
                ?7, ?8, ?9,
                ?10, ?11, ?12,
                ?13, ?14, ?15,
                ?16, ?17
            )
            "#,
        )
        .bind(&draft.code)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.current_stock)
        .bind(draft.minimum_stock)
        .bind(draft.maximum_stock)
        .bind(&draft.unit_of_measure)
        .bind(draft.purchase_price.cents())
        .bind(draft.sale_price.cents())
        .bind(&draft.location)
        .bind(&draft.batch)
        .bind(draft.expiration_date)
        .bind(draft.category_id)
        .bind(draft.supplier_id)
        .bind(draft.status)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Product inserted");
        Ok(id)
    }

    /// Replaces every mutable column of an existing product.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no product with this id
    pub async fn replace(&self, id: i64, draft: &ProductDraft) -> DbResult<()> {
        debug!(id, "Replacing product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                code = ?2,
                name = ?3,
                description = ?4,
                current_stock = ?5,
                minimum_stock = ?6,
                maximum_stock = ?7,
                unit_of_measure = ?8,
                purchase_price_cents = ?9,
                sale_price_cents = ?10,
                location = ?11,
                batch = ?12,
                expiration_date = ?13,
                category_id = ?14,
                supplier_id = ?15,
                status = ?16,
                updated_at = ?17
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&draft.code)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.current_stock)
        .bind(draft.minimum_stock)
        .bind(draft.maximum_stock)
        .bind(&draft.unit_of_measure)
        .bind(draft.purchase_price.cents())
        .bind(draft.sale_price.cents())
        .bind(&draft.location)
        .bind(&draft.batch)
        .bind(draft.expiration_date)
        .bind(draft.category_id)
        .bind(draft.supplier_id)
        .bind(draft.status)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Writes only the columns present in `changes`, plus `updated_at`.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no product with this id
    pub async fn apply_changes(&self, id: i64, changes: &ProductChanges) -> DbResult<()> {
        debug!(id, fields = changes.field_count(), "Patching product");

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE products SET ");
        let mut set = qb.separated(", ");

        if let Some(code) = &changes.code {
            set.push("code = ").push_bind_unseparated(code.clone());
        }
        if let Some(name) = &changes.name {
            set.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(description) = &changes.description {
            set.push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(current) = changes.current_stock {
            set.push("current_stock = ").push_bind_unseparated(current);
        }
        if let Some(minimum) = changes.minimum_stock {
            set.push("minimum_stock = ").push_bind_unseparated(minimum);
        }
        if let Some(maximum) = changes.maximum_stock {
            set.push("maximum_stock = ").push_bind_unseparated(maximum);
        }
        if let Some(unit) = &changes.unit_of_measure {
            set.push("unit_of_measure = ").push_bind_unseparated(unit.clone());
        }
        if let Some(price) = changes.purchase_price {
            set.push("purchase_price_cents = ")
                .push_bind_unseparated(price.cents());
        }
        if let Some(price) = changes.sale_price {
            set.push("sale_price_cents = ")
                .push_bind_unseparated(price.cents());
        }
        if let Some(location) = &changes.location {
            set.push("location = ").push_bind_unseparated(location.clone());
        }
        if let Some(batch) = &changes.batch {
            set.push("batch = ").push_bind_unseparated(batch.clone());
        }
        if let Some(expiration) = changes.expiration_date {
            set.push("expiration_date = ")
                .push_bind_unseparated(expiration);
        }
        if let Some(category_id) = changes.category_id {
            set.push("category_id = ").push_bind_unseparated(category_id);
        }
        if let Some(supplier_id) = changes.supplier_id {
            set.push("supplier_id = ").push_bind_unseparated(supplier_id);
        }
        if let Some(status) = changes.status {
            set.push("status = ").push_bind_unseparated(status);
        }
        set.push("updated_at = ").push_bind_unseparated(Utc::now());

        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Hard-deletes a product.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no product with this id
    /// * `DbError::ForeignKeyViolation` - quotation lines still reference it
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Escapes LIKE wildcards so user input matches literally (`ESCAPE '\'`).
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
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
    use crate::{Database, DbConfig};
    use botica_core::{Money, ProductStatus};
    use chrono::NaiveDate;

    fn draft(name: &str, current: i64, minimum: i64, maximum: Option<i64>) -> ProductDraft {
        ProductDraft {
            code: None,
            name: name.to_string(),
            description: String::new(),
            current_stock: current,
            minimum_stock: minimum,
            maximum_stock: maximum,
            unit_of_measure: "box".to_string(),
            purchase_price: Money::from_cents(100),
            sale_price: Money::from_cents(150),
            location: None,
            batch: None,
            expiration_date: None,
            category_id: None,
            supplier_id: None,
            status: ProductStatus::Active,
        }
    }

    async fn repo() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let repo = repo().await;

        let mut input = draft("Amoxicilina 500mg", 30, 10, Some(100));
        input.code = Some("AMOX-500".to_string());
        input.description = "Antibiótico".to_string();
        input.location = Some("REFRIGERATOR".to_string());
        input.batch = Some("L-2291".to_string());
        input.expiration_date = NaiveDate::from_ymd_opt(2026, 3, 31);

        let id = repo.insert(&input).await.unwrap();
        assert!(id > 0);

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.code.as_deref(), Some("AMOX-500"));
        assert_eq!(product.name, "Amoxicilina 500mg");
        assert_eq!(product.description, "Antibiótico");
        assert_eq!(product.current_stock, 30);
        assert_eq!(product.maximum_stock, Some(100));
        assert_eq!(product.sale_price(), Money::from_cents(150));
        assert_eq!(product.location.as_deref(), Some("REFRIGERATOR"));
        assert_eq!(product.expiration_date, NaiveDate::from_ymd_opt(2026, 3, 31));
        assert_eq!(product.status, ProductStatus::Active);

        assert!(repo.exists(id).await.unwrap());
        assert!(repo.get_by_id(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_order() {
        let repo = repo().await;

        let low = repo.insert(&draft("Low", 2, 10, None)).await.unwrap();
        let high = repo.insert(&draft("High", 50, 1, Some(20))).await.unwrap();
        let normal = repo.insert(&draft("Normal", 10, 10, None)).await.unwrap();

        let all: Vec<i64> = repo
            .list(StockLevel::All)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(all, vec![normal, high, low]);

        let lows = repo.list(StockLevel::Low).await.unwrap();
        assert_eq!(lows.len(), 1);
        assert_eq!(lows[0].id, low);

        let highs = repo.list(StockLevel::High).await.unwrap();
        assert_eq!(highs.len(), 1);
        assert_eq!(highs[0].id, high);
    }

    #[tokio::test]
    async fn test_shortages_ordered_by_stock() {
        let repo = repo().await;

        let a = repo.insert(&draft("A", 5, 10, None)).await.unwrap();
        let b = repo.insert(&draft("B", 0, 3, None)).await.unwrap();
        repo.insert(&draft("C", 20, 3, None)).await.unwrap();

        let ids: Vec<i64> = repo
            .list_shortages()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[tokio::test]
    async fn test_search_matches_name_description_code() {
        let repo = repo().await;

        let mut ibu = draft("Ibuprofeno 400mg", 1, 0, None);
        ibu.code = Some("IBU-400".to_string());
        repo.insert(&ibu).await.unwrap();

        let mut para = draft("Paracetamol", 1, 0, None);
        para.description = "Analgésico, alivia dolor".to_string();
        repo.insert(&para).await.unwrap();

        repo.insert(&draft("Alcohol 70% 1L", 1, 0, None)).await.unwrap();

        assert_eq!(repo.search("ibu").await.unwrap().len(), 1);
        assert_eq!(repo.search("DOLOR").await.unwrap()[0].name, "Paracetamol");
        assert_eq!(repo.search("400").await.unwrap().len(), 1);

        // Accented letters only match in their stored case
        assert_eq!(repo.search("analgésico").await.unwrap().len(), 1);
        assert!(repo.search("ANALGÉSICO").await.unwrap().is_empty());

        // Wildcards are literal
        assert_eq!(repo.search("70%").await.unwrap().len(), 1);
        assert!(repo.search("%").await.unwrap().len() == 1);
        assert!(repo.search("_").await.unwrap().is_empty());

        let names: Vec<String> = repo
            .search("a")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_replace() {
        let repo = repo().await;
        let id = repo.insert(&draft("Old", 1, 1, None)).await.unwrap();

        let mut updated = draft("New", 7, 2, Some(9));
        updated.status = ProductStatus::Inactive;
        repo.replace(id, &updated).await.unwrap();

        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.name, "New");
        assert_eq!(product.current_stock, 7);
        assert_eq!(product.maximum_stock, Some(9));
        assert_eq!(product.status, ProductStatus::Inactive);

        let err = repo.replace(id + 100, &updated).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_apply_changes_touches_only_supplied_columns() {
        let repo = repo().await;

        let mut input = draft("Loratadina", 3, 5, Some(50));
        input.location = Some("A1".to_string());
        let id = repo.insert(&input).await.unwrap();
        let before = repo.get_by_id(id).await.unwrap().unwrap();

        let changes = ProductChanges {
            current_stock: Some(40),
            ..Default::default()
        };
        repo.apply_changes(id, &changes).await.unwrap();

        let after = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(after.current_stock, 40);
        assert_eq!(after.name, before.name);
        assert_eq!(after.minimum_stock, before.minimum_stock);
        assert_eq!(after.maximum_stock, before.maximum_stock);
        assert_eq!(after.location, before.location);
        assert_eq!(after.sale_price_cents, before.sale_price_cents);
        assert!(after.updated_at >= before.updated_at);

        // Some(None) clears a nullable column
        let changes = ProductChanges {
            location: Some(None),
            maximum_stock: Some(None),
            ..Default::default()
        };
        repo.apply_changes(id, &changes).await.unwrap();

        let after = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(after.location, None);
        assert_eq!(after.maximum_stock, None);
        assert_eq!(after.current_stock, 40);
    }

    #[tokio::test]
    async fn test_apply_changes_missing_row() {
        let repo = repo().await;
        let changes = ProductChanges {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };

        let err = repo.apply_changes(999, &changes).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let id = repo.insert(&draft("Temp", 1, 0, None)).await.unwrap();

        repo.delete(id).await.unwrap();
        assert!(!repo.exists(id).await.unwrap());

        let err = repo.delete(id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_constraint_violations() {
        let repo = repo().await;

        let mut first = draft("One", 1, 0, None);
        first.code = Some("DUP".to_string());
        repo.insert(&first).await.unwrap();

        let err = repo.insert(&first).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        let mut orphan = draft("Orphan", 1, 0, None);
        orphan.category_id = Some(404);
        let err = repo.insert(&orphan).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
