//! # Category Repository
//!
//! Product groupings that clients use to fill `idCategoria`.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use botica_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    /// Inserts a category and returns its id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - name already exists
    pub async fn insert(&self, name: &str) -> DbResult<i64> {
        debug!(name = %name, "Inserting category");

        let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }
}
