//! # Quotation Service
//!
//! Supplier listing and the quotation submission workflow.
//!
//! ## Submission Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Shape       proveedorId present, at least one item (no store access)│
//! │  2. Supplier    suppliers().exists(proveedorId)       else NOT_FOUND    │
//! │  3. Each item   productoId, cantidad > 0, precioUnitario ≥ 0            │
//! │                 products().exists(productoId)         else NOT_FOUND    │
//! │  4. Compute     subtotal = cantidad × precio (missing price = 0)        │
//! │                 total    = Σ subtotal      overflow → INVALID_ARGUMENT  │
//! │  5. Persist     header + lines in ONE transaction                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written until every check has passed, and the write itself
//! is all-or-nothing.

use std::time::Instant;

use tracing::info;

use botica_core::quotation::{QuotationDraft, QuotationLine};
use botica_core::validation::{
    optional_text, optional_unit_price, parse_id, required_reference, validate_item_count,
    validate_quantity,
};
use botica_core::{CoreError, Supplier, ValidationError};
use botica_db::Database;

use crate::dto::{QuotationDto, QuotationRequest};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct QuotationService {
    db: Database,
}

impl QuotationService {
    pub fn new(db: Database) -> Self {
        QuotationService { db }
    }

    pub fn from_state(state: &AppState) -> Self {
        QuotationService::new(state.db.clone())
    }

    /// Suppliers ordered by name.
    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        Ok(self.db.suppliers().list().await?)
    }

    /// Validates and persists a quotation request, returning its id.
    pub async fn submit(&self, request: QuotationRequest) -> Result<i64, ApiError> {
        let start = Instant::now();

        let supplier_id = required_reference("proveedorId", request.proveedor_id.as_ref())?;
        validate_item_count("items", request.items.len())?;

        if !self.db.suppliers().exists(supplier_id).await? {
            return Err(CoreError::SupplierNotFound(supplier_id).into());
        }

        let mut lines = Vec::with_capacity(request.items.len());
        for (index, item) in request.items.iter().enumerate() {
            let product_id = required_reference(
                &format!("items[{}].productoId", index),
                item.producto_id.as_ref(),
            )?;
            let quantity = validate_quantity(
                &format!("items[{}].cantidad", index),
                item.cantidad.as_ref(),
            )?;
            let unit_price = optional_unit_price(
                &format!("items[{}].precioUnitario", index),
                item.precio_unitario.as_ref(),
            )?;
            let line = QuotationLine::new(product_id, quantity, unit_price).ok_or_else(|| {
                ValidationError::amount_out_of_range(format!("items[{}].subtotal", index))
            })?;

            if !self.db.products().exists(product_id).await? {
                return Err(CoreError::ProductNotFound(product_id).into());
            }

            lines.push(line);
        }

        let draft = QuotationDraft::new(
            supplier_id,
            lines,
            optional_text(request.observaciones.as_deref()),
        )
        .ok_or_else(|| ValidationError::amount_out_of_range("total"))?;
        let total = draft.total();

        let id = self.db.quotations().create(&draft).await?;

        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            quotation_id = id,
            supplier_id,
            lines = draft.lines().len(),
            total = %total,
            "Quotation submitted"
        );
        Ok(id)
    }

    /// A stored quotation with its lines.
    pub async fn get(&self, raw_id: &str) -> Result<QuotationDto, ApiError> {
        let id = parse_id("id", raw_id)?;

        let quotations = self.db.quotations();
        let quotation = quotations
            .get_by_id(id)
            .await?
            .ok_or(CoreError::QuotationNotFound(id))?;
        let items = quotations.get_items(id).await?;

        Ok(QuotationDto::new(quotation, items))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
