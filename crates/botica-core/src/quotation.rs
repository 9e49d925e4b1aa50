//! # Quotation Pricing
//!
//! A validated quotation request and its totals, computed before anything
//! touches the store.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Line 1:  2.0 × 10.50  = 21.00                                         │
//! │  Line 2:  1.0 × (none) =  0.00   ← missing price counts as zero        │
//! │  Line 3:  2.5 ×  3.33  =  8.33   ← 832.5 cents rounds to 833           │
//! │                          ──────                                         │
//! │  Total                   29.33   ← sum of rounded subtotals            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;

/// One requested product with its quantity, optional price and subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationLine {
    pub product_id: i64,
    pub quantity: f64,
    /// `None` when the price is left for the supplier to quote.
    pub unit_price: Option<Money>,
    subtotal: Money,
}

impl QuotationLine {
    /// Prices the line. `None` when quantity × price does not fit in cents.
    pub fn new(product_id: i64, quantity: f64, unit_price: Option<Money>) -> Option<Self> {
        let subtotal = unit_price.unwrap_or_default().multiply_quantity(quantity)?;

        Some(QuotationLine {
            product_id,
            quantity,
            unit_price,
            subtotal,
        })
    }

    /// quantity × unit price, rounded to the cent.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }
}

/// A fully validated quotation ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationDraft {
    pub supplier_id: i64,
    pub remarks: Option<String>,
    lines: Vec<QuotationLine>,
    total: Money,
}

impl QuotationDraft {
    /// Sums the line subtotals. `None` when the total overflows.
    pub fn new(
        supplier_id: i64,
        lines: Vec<QuotationLine>,
        remarks: Option<String>,
    ) -> Option<Self> {
        let total = lines
            .iter()
            .try_fold(Money::zero(), |acc, line| acc.checked_add(line.subtotal()))?;

        Some(QuotationDraft {
            supplier_id,
            remarks,
            lines,
            total,
        })
    }

    pub fn lines(&self) -> &[QuotationLine] {
        &self.lines
    }

    /// Sum of line subtotals.
    pub fn total(&self) -> Money {
        self.total
    }
}
