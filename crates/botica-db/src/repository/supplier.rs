//! # Supplier Repository
//!
//! Suppliers are the addressees of quotations. Only listing and existence
//! checks are exposed over HTTP; `insert` feeds the seed binary and tests.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use botica_core::{NewSupplier, Supplier};

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists all suppliers ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, email, phone FROM suppliers ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Checks whether a supplier row exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Inserts a supplier and returns its id.
    pub async fn insert(&self, supplier: &NewSupplier) -> DbResult<i64> {
        debug!(name = %supplier.name, "Inserting supplier");

        let result = sqlx::query("INSERT INTO suppliers (name, email, phone) VALUES (?1, ?2, ?3)")
            .bind(&supplier.name)
            .bind(&supplier.email)
            .bind(&supplier.phone)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Counts suppliers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
