//! # Domain Types
//!
//! Core domain types used throughout Botica.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Quotation     │   │ QuotationItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  quotation_id   │       │
//! │  │  code           │   │  supplier_id ───┼─┐ │  product_id     │       │
//! │  │  stock levels   │   │  status         │ │ │  quantity       │       │
//! │  │  prices (cents) │   │  total_cents    │ │ │  subtotal_cents │       │
//! │  └────────┬────────┘   └─────────────────┘ │ └─────────────────┘       │
//! │           │                                 │                           │
//! │  ┌────────▼────────┐   ┌─────────────────┐ │                           │
//! │  │    Category     │   │    Supplier     │◄┘                           │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are store-assigned positive integers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Status
// =============================================================================

/// Whether a product is still offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    /// Parses a status keyword (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Some(ProductStatus::Active),
            "INACTIVE" => Some(ProductStatus::Inactive),
            _ => None,
        }
    }

    /// Wire/storage spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Inactive => "INACTIVE",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stocked item with quantity thresholds and pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Business code (barcode, internal SKU). Unique when present.
    pub code: Option<String>,

    /// Display name.
    pub name: String,

    /// Free-text description (empty string when not given).
    pub description: String,

    /// Units currently on hand.
    pub current_stock: i64,

    /// Reorder threshold. A product is low on stock below this value.
    pub minimum_stock: i64,

    /// Optional ceiling. A product is overstocked above this value.
    pub maximum_stock: Option<i64>,

    /// One of the catalog units (tablet, box, ...).
    pub unit_of_measure: String,

    pub purchase_price_cents: i64,

    pub sale_price_cents: i64,

    /// One of the catalog location codes, or `None` when unassigned.
    pub location: Option<String>,

    /// Manufacturer batch / lot number.
    pub batch: Option<String>,

    #[ts(as = "Option<String>")]
    pub expiration_date: Option<NaiveDate>,

    pub category_id: Option<i64>,

    pub supplier_id: Option<i64>,

    pub status: ProductStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }
}

// =============================================================================
// Product Draft (validated full record)
// =============================================================================

/// Every mutable product field, already validated.
///
/// Produced by create and full-replace update; the store assigns `id` and
/// timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub code: Option<String>,
    pub name: String,
    pub description: String,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub maximum_stock: Option<i64>,
    pub unit_of_measure: String,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub location: Option<String>,
    pub batch: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub status: ProductStatus,
}

// =============================================================================
// Product Changes (validated sparse patch)
// =============================================================================

/// The subset of product fields a partial update supplies.
///
/// `None` means "leave the column alone". For nullable columns the inner
/// `Option` carries the new value, so `Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub code: Option<Option<String>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub current_stock: Option<i64>,
    pub minimum_stock: Option<i64>,
    pub maximum_stock: Option<Option<i64>>,
    pub unit_of_measure: Option<String>,
    pub purchase_price: Option<Money>,
    pub sale_price: Option<Money>,
    pub location: Option<Option<String>>,
    pub batch: Option<Option<String>>,
    pub expiration_date: Option<Option<NaiveDate>>,
    pub category_id: Option<Option<i64>>,
    pub supplier_id: Option<Option<i64>>,
    pub status: Option<ProductStatus>,
}

impl ProductChanges {
    /// Number of columns this patch writes.
    pub fn field_count(&self) -> usize {
        [
            self.code.is_some(),
            self.name.is_some(),
            self.description.is_some(),
            self.current_stock.is_some(),
            self.minimum_stock.is_some(),
            self.maximum_stock.is_some(),
            self.unit_of_measure.is_some(),
            self.purchase_price.is_some(),
            self.sale_price.is_some(),
            self.location.is_some(),
            self.batch.is_some(),
            self.expiration_date.is_some(),
            self.category_id.is_some(),
            self.supplier_id.is_some(),
            self.status.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }
}

// =============================================================================
// Stock Level Filter
// =============================================================================

/// Stock-level filter for the inventory listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockLevel {
    /// No filter.
    #[default]
    All,
    /// current < minimum
    Low,
    /// maximum set and current > maximum
    High,
}

impl StockLevel {
    /// Maps the `nivel` query keyword. Unknown or absent keywords mean
    /// [`StockLevel::All`].
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::StockLevel;
    ///
    /// assert_eq!(StockLevel::from_keyword(Some("BAJO")), StockLevel::Low);
    /// assert_eq!(StockLevel::from_keyword(Some("alto")), StockLevel::High);
    /// assert_eq!(StockLevel::from_keyword(Some("todos")), StockLevel::All);
    /// assert_eq!(StockLevel::from_keyword(None), StockLevel::All);
    /// ```
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword.map(|k| k.trim().to_lowercase()).as_deref() {
            Some("bajo") | Some("low") => StockLevel::Low,
            Some("alto") | Some("high") => StockLevel::High,
            _ => StockLevel::All,
        }
    }
}

// =============================================================================
// Supplier & Category
// =============================================================================

/// A vendor that quotations are addressed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Supplier fields for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplier {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Product grouping (analgesics, antibiotics, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Quotation
// =============================================================================

/// Lifecycle of a supplier price request. Only `Pending` is produced here;
/// later states are set by the purchasing workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuotationStatus {
    #[default]
    Pending,
}

/// Quotation header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Quotation {
    pub id: i64,
    pub supplier_id: i64,
    #[ts(as = "String")]
    pub requested_on: NaiveDate,
    pub status: QuotationStatus,
    pub remarks: Option<String>,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Quotation {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Quotation line row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct QuotationItem {
    pub id: i64,
    pub quotation_id: i64,
    pub product_id: i64,
    pub quantity: f64,
    /// `None` when the requester left the price for the supplier to fill.
    pub unit_price_cents: Option<i64>,
    pub subtotal_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            code: Some("PARA-500".to_string()),
            name: "Paracetamol 500mg".to_string(),
            description: String::new(),
            current_stock: 5,
            minimum_stock: 10,
            maximum_stock: Some(100),
            unit_of_measure: "tablet".to_string(),
            purchase_price_cents: 120,
            sale_price_cents: 250,
            location: None,
            batch: None,
            expiration_date: None,
            category_id: None,
            supplier_id: None,
            status: ProductStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_price_accessors() {
        let product = sample_product();
        assert_eq!(product.purchase_price(), Money::from_cents(120));
        assert_eq!(product.sale_price().to_major(), 2.5);
    }

    #[test]
    fn test_product_status_parse() {
        assert_eq!(ProductStatus::parse("active"), Some(ProductStatus::Active));
        assert_eq!(ProductStatus::parse(" INACTIVE "), Some(ProductStatus::Inactive));
        assert_eq!(ProductStatus::parse("archived"), None);
        assert_eq!(ProductStatus::default().as_str(), "ACTIVE");
    }

    #[test]
    fn test_changes_field_count() {
        let mut changes = ProductChanges::default();
        assert!(changes.is_empty());

        changes.current_stock = Some(4);
        changes.location = Some(None);
        assert_eq!(changes.field_count(), 2);
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_stock_level_keywords() {
        assert_eq!(StockLevel::from_keyword(Some("bajo")), StockLevel::Low);
        assert_eq!(StockLevel::from_keyword(Some("  Alto ")), StockLevel::High);
        assert_eq!(StockLevel::from_keyword(Some("")), StockLevel::All);
    }
}
