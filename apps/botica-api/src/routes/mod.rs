//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /health                     health::check                       │
//! │                                                                         │
//! │  GET    /inventario                 inventory::list_products            │
//! │  POST   /inventario                 inventory::create_product           │
//! │  GET    /inventario/faltantes       inventory::list_shortages           │
//! │  GET    /inventario/buscar          inventory::search_products          │
//! │  GET    /inventario/categorias      inventory::list_categories          │
//! │  GET    /inventario/:id             inventory::get_product              │
//! │  PUT    /inventario/:id             inventory::replace_product          │
//! │  PATCH  /inventario/:id             inventory::patch_product            │
//! │  DELETE /inventario/:id             inventory::delete_product           │
//! │                                                                         │
//! │  GET    /cotizaciones/proveedores   quotation::list_suppliers           │
//! │  POST   /cotizaciones/enviar        quotation::submit_quotation         │
//! │  GET    /cotizaciones/:id           quotation::get_quotation            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Static segments win over `:id`, so `/inventario/faltantes` never reaches
//! the id parser.

pub mod health;
pub mod inventory;
pub mod quotation;
