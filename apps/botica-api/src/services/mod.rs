//! # Services
//!
//! Request-level workflows between the HTTP handlers and the repositories.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  routes::inventory ──► InventoryService ──► db.products() / categories()│
//! │  routes::quotation ──► QuotationService ──► db.suppliers() / products() │
//! │                                             db.quotations() (tx)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Services validate first and only then touch the store. Every method
//! returns `Result<_, ApiError>`, so handlers stay one-liners.

pub mod inventory;
pub mod quotation;

pub use inventory::InventoryService;
pub use quotation::QuotationService;
