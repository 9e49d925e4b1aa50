//! # botica-core: Pure Business Logic for Botica
//!
//! Domain types and rules for the pharmacy inventory and supplier quotation
//! backend. Everything here is a pure function over plain data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Botica Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 botica-api (axum REST server)                   │   │
//! │  │   /inventario ──► InventoryService   /cotizaciones ──► Quotes   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ botica-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   units   │  │   rules   │  │   │
//! │  │   │ Quotation │  │  (cents)  │  │ locations │  │  coercion │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  botica-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Supplier, Quotation, etc.)
//! - [`money`] - Money type with integer arithmetic (cents)
//! - [`catalog`] - Allowed units of measure and storage locations
//! - [`quotation`] - Line subtotal and order total computation
//! - [`validation`] - Field rules and lenient numeric coercion
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use botica_core::money::Money;
//! use botica_core::quotation::{QuotationDraft, QuotationLine};
//!
//! let draft = QuotationDraft::new(
//!     1,
//!     vec![
//!         QuotationLine::new(10, 2.0, Some(Money::from_cents(1050))).unwrap(),
//!         QuotationLine::new(11, 1.0, None).unwrap(),
//!     ],
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(draft.total().cents(), 2100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod quotation;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;
