//! Wire DTOs.
//!
//! The JSON contract keeps the Spanish camelCase field names existing clients
//! already send (`nombre`, `stockActual`, `proveedorId`, ...). Money goes out
//! as decimal major units; integer cents never leave the server.
//!
//! ## Request Bodies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductPayload   POST / PUT    every field optional, validated later   │
//! │  ProductPatch     PATCH         absent ≠ null (see `present`)           │
//! │  QuotationRequest POST enviar   proveedorId + items[] + observaciones   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Product fields are kept as raw `serde_json::Value` so the services can
//! apply lenient coercion instead of failing deserialization: numbers may
//! arrive as strings, and text (barcodes, batch numbers) may arrive as
//! numbers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use botica_core::{Category, Money, Product, ProductStatus, Quotation, QuotationItem, QuotationStatus, Supplier};

// =============================================================================
// Responses
// =============================================================================

/// Product as returned by `/inventario`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub codigo: Option<String>,
    pub nombre: String,
    pub descripcion: String,
    pub stock_actual: i64,
    pub stock_minimo: i64,
    pub stock_maximo: Option<i64>,
    pub unidad_medida: String,
    pub precio_compra: f64,
    pub precio_venta: f64,
    pub ubicacion: Option<String>,
    pub lote: Option<String>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub id_categoria: Option<i64>,
    pub id_proveedor: Option<i64>,
    pub estado: ProductStatus,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            precio_compra: p.purchase_price().to_major(),
            precio_venta: p.sale_price().to_major(),
            codigo: p.code,
            nombre: p.name,
            descripcion: p.description,
            stock_actual: p.current_stock,
            stock_minimo: p.minimum_stock,
            stock_maximo: p.maximum_stock,
            unidad_medida: p.unit_of_measure,
            ubicacion: p.location,
            lote: p.batch,
            fecha_vencimiento: p.expiration_date,
            id_categoria: p.category_id,
            id_proveedor: p.supplier_id,
            estado: p.status,
            fecha_creacion: p.created_at,
            fecha_actualizacion: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    pub id: i64,
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
}

impl From<Supplier> for SupplierDto {
    fn from(s: Supplier) -> Self {
        SupplierDto {
            id: s.id,
            nombre: s.name,
            email: s.email,
            telefono: s.phone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub nombre: String,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        CategoryDto {
            id: c.id,
            nombre: c.name,
        }
    }
}

/// Quotation header with its lines, for `GET /cotizaciones/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDto {
    pub id: i64,
    pub proveedor_id: i64,
    pub fecha: NaiveDate,
    pub estado: QuotationStatus,
    pub observaciones: Option<String>,
    pub total: f64,
    pub items: Vec<QuotationItemDto>,
}

impl QuotationDto {
    pub fn new(quotation: Quotation, items: Vec<QuotationItem>) -> Self {
        QuotationDto {
            id: quotation.id,
            proveedor_id: quotation.supplier_id,
            fecha: quotation.requested_on,
            estado: quotation.status,
            total: quotation.total().to_major(),
            observaciones: quotation.remarks,
            items: items.into_iter().map(QuotationItemDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationItemDto {
    pub id: i64,
    pub producto_id: i64,
    pub cantidad: f64,
    pub precio_unitario: Option<f64>,
    pub subtotal: f64,
}

impl From<QuotationItem> for QuotationItemDto {
    fn from(item: QuotationItem) -> Self {
        QuotationItemDto {
            id: item.id,
            producto_id: item.product_id,
            cantidad: item.quantity,
            precio_unitario: item
                .unit_price_cents
                .map(|c| Money::from_cents(c).to_major()),
            subtotal: Money::from_cents(item.subtotal_cents).to_major(),
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /inventario` and `PUT /inventario/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub codigo: Option<Value>,
    pub nombre: Option<Value>,
    pub descripcion: Option<Value>,
    pub stock_actual: Option<Value>,
    pub stock_minimo: Option<Value>,
    pub stock_maximo: Option<Value>,
    pub unidad_medida: Option<Value>,
    pub precio_compra: Option<Value>,
    pub precio_venta: Option<Value>,
    pub ubicacion: Option<Value>,
    pub lote: Option<Value>,
    pub fecha_vencimiento: Option<Value>,
    pub id_categoria: Option<Value>,
    pub id_proveedor: Option<Value>,
    pub estado: Option<Value>,
}

/// Body of `PATCH /inventario/:id`.
///
/// Outer `None` = field absent. For nullable columns `Some(Value::Null)`
/// means "clear it".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "present")]
    pub codigo: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub nombre: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub descripcion: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub stock_actual: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub stock_minimo: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub stock_maximo: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub unidad_medida: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub precio_compra: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub precio_venta: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub ubicacion: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub lote: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub fecha_vencimiento: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub id_categoria: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub id_proveedor: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub estado: Option<Value>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Body of `POST /cotizaciones/enviar`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRequest {
    pub proveedor_id: Option<Value>,
    #[serde(default)]
    pub items: Vec<QuotationItemRequest>,
    pub observaciones: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationItemRequest {
    pub producto_id: Option<Value>,
    pub cantidad: Option<Value>,
    pub precio_unitario: Option<Value>,
}

// =============================================================================
// Query Strings
// =============================================================================

/// `GET /inventario?nivel=bajo|alto`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub nivel: Option<String>,
}

/// `GET /inventario/buscar?q=...` (`nombre` is accepted as an alias)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub nombre: Option<String>,
}

impl SearchQuery {
    /// `q` when it carries text, otherwise `nombre`.
    pub fn term(&self) -> Option<&str> {
        self.q
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .or(self.nombre.as_deref())
    }
}
