//! # Repository Module
//!
//! Database repository implementations for Botica.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Service (botica-api)                                                  │
//! │       │                                                                 │
//! │       │  db.products().list(StockLevel::Low)                           │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list / list_shortages / search                                    │
//! │  ├── get_by_id / exists                                                │
//! │  ├── insert / replace / apply_changes                                  │
//! │  └── delete                                                            │
//! │       │                                                                 │
//! │       │  Parameterized SQL                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD, stock filters, search
//! - [`SupplierRepository`](supplier::SupplierRepository) - Supplier lookup
//! - [`CategoryRepository`](category::CategoryRepository) - Product categories
//! - [`QuotationRepository`](quotation::QuotationRepository) - Transactional quotation header + lines

pub mod category;
pub mod product;
pub mod quotation;
pub mod supplier;
