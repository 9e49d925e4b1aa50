//! # botica-db: Database Layer for Botica
//!
//! This crate provides database access for the Botica backend.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Botica Data Flow                                 │
//! │                                                                         │
//! │  axum handler (POST /cotizaciones/enviar)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuotationService (validation, existence checks)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     botica-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SupplierRepo  │    │ 001_initial  │  │   │
//! │  │   │               │    │ CategoryRepo  │    │ _schema.sql  │  │   │
//! │  │   │               │    │ QuotationRepo │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (./botica.db by default) or :memory: in tests             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use botica_db::{Database, DbConfig};
//! use botica_core::StockLevel;
//!
//! let db = Database::new(DbConfig::new("./botica.db")).await?;
//! let low = db.products().list(StockLevel::Low).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::quotation::QuotationRepository;
pub use repository::supplier::SupplierRepository;
