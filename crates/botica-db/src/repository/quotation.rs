//! # Quotation Repository
//!
//! Persists a quotation header and its lines as one atomic unit.
//!
//! ## Transaction Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    INSERT INTO quotations (...)            → quotation_id               │
//! │    INSERT INTO quotation_items (... q_id)  ← line 1                     │
//! │    INSERT INTO quotation_items (... q_id)  ← line 2   ✗ fails           │
//! │  (tx dropped without commit) → ROLLBACK: header and line 1 are gone    │
//! │                                                                         │
//! │  All lines ok → COMMIT                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every statement inside the transaction runs on `&mut *tx`. Going through
//! the pool instead would escape the transaction (and deadlock an in-memory
//! database, which has exactly one connection).

use chrono::{Local, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use botica_core::quotation::QuotationDraft;
use botica_core::{Quotation, QuotationItem, QuotationStatus};

/// Repository for quotation database operations.
#[derive(Debug, Clone)]
pub struct QuotationRepository {
    pool: SqlitePool,
}

impl QuotationRepository {
    /// Creates a new QuotationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        QuotationRepository { pool }
    }

    /// Inserts the header (status `PENDING`, today's date) and one row per
    /// line inside a single transaction. Returns the quotation id.
    ///
    /// The draft is trusted: supplier and product existence were checked by
    /// the caller, and any constraint failure here rolls everything back.
    pub async fn create(&self, draft: &QuotationDraft) -> DbResult<i64> {
        let total = draft.total();
        debug!(
            supplier_id = draft.supplier_id,
            lines = draft.lines().len(),
            total_cents = total.cents(),
            "Creating quotation"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let header = sqlx::query(
            r#"
            INSERT INTO quotations (
                supplier_id, requested_on, status, remarks, total_cents, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(draft.supplier_id)
        .bind(Local::now().date_naive())
        .bind(QuotationStatus::Pending)
        .bind(&draft.remarks)
        .bind(total.cents())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let quotation_id = header.last_insert_rowid();

        for line in draft.lines() {
            sqlx::query(
                r#"
                INSERT INTO quotation_items (
                    quotation_id, product_id, quantity, unit_price_cents, subtotal_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(quotation_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price.map(|p| p.cents()))
            .bind(line.subtotal().cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            quotation_id,
            supplier_id = draft.supplier_id,
            lines = draft.lines().len(),
            "Quotation persisted"
        );
        Ok(quotation_id)
    }

    /// Gets a quotation header by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Quotation>> {
        let quotation = sqlx::query_as::<_, Quotation>(
            r#"
            SELECT
                id,
                supplier_id,
                requested_on,
                status,
                remarks,
                total_cents,
                created_at
            FROM quotations
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quotation)
    }

    /// Gets the lines of a quotation in insertion order.
    pub async fn get_items(&self, quotation_id: i64) -> DbResult<Vec<QuotationItem>> {
        let items = sqlx::query_as::<_, QuotationItem>(
            r#"
            SELECT
                id,
                quotation_id,
                product_id,
                quantity,
                unit_price_cents,
                subtotal_cents
            FROM quotation_items
            WHERE quotation_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(quotation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts quotation headers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts quotation lines across all quotations.
    pub async fn count_items(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotation_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
