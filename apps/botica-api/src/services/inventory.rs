//! # Inventory Service
//!
//! Product CRUD, stock-level listings and search.
//!
//! ## Create / Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductPayload (raw JSON values)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_draft()                                                         │
//! │  ├── nombre        required, ≤ 200 chars                               │
//! │  ├── unidadMedida  required, must be in Catalog.units                  │
//! │  ├── ubicacion     optional, must be in Catalog.locations              │
//! │  ├── stock*/precio* lenient numbers, thresholds and prices ≥ 0         │
//! │  └── fechaVencimiento YYYY-MM-DD                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductDraft ──► insert (POST) / replace (PUT)                        │
//! │                                                                         │
//! │  ProductPatch ──► build_changes() ──► ProductChanges ──► apply_changes │
//! │                   (only supplied fields are validated and written)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use botica_core::validation::{
    coerce_text, lenient_price, lenient_stock, normalize_search_term, optional_reference,
    optional_stock_threshold, optional_text, parse_expiration_date, parse_id, parse_status,
    stock_threshold, validate_product_name,
};
use botica_core::{
    Catalog, Category, CoreError, Product, ProductChanges, ProductDraft, StockLevel,
    ValidationError,
};
use botica_db::Database;
use serde_json::Value;

use crate::dto::{ProductPatch, ProductPayload};
use crate::error::ApiError;
use crate::state::AppState;

/// Inventory operations over the product table.
#[derive(Debug, Clone)]
pub struct InventoryService {
    db: Database,
    catalog: Arc<Catalog>,
}

impl InventoryService {
    pub fn new(db: Database, catalog: Arc<Catalog>) -> Self {
        InventoryService { db, catalog }
    }

    pub fn from_state(state: &AppState) -> Self {
        InventoryService::new(state.db.clone(), state.catalog.clone())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All products, newest first; `nivel=bajo|alto` filters by stock level.
    pub async fn list(&self, nivel: Option<&str>) -> Result<Vec<Product>, ApiError> {
        let level = StockLevel::from_keyword(nivel);
        let products = self.db.products().list(level).await?;

        debug!(level = ?level, count = products.len(), "Inventory listed");
        Ok(products)
    }

    /// Products below their minimum stock, lowest stock first.
    pub async fn list_shortages(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.db.products().list_shortages().await?)
    }

    /// Substring search. A blank or missing term is rejected.
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<Product>, ApiError> {
        let start = Instant::now();
        let term = normalize_search_term(term)?;

        let products = self.db.products().search(&term).await?;

        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            count = products.len(),
            term = %term,
            "Inventory search complete"
        );
        Ok(products)
    }

    pub async fn get(&self, raw_id: &str) -> Result<Product, ApiError> {
        let id = parse_id("id", raw_id)?;

        let product = self
            .db
            .products()
            .get_by_id(id)
            .await?
            .ok_or(CoreError::ProductNotFound(id))?;

        Ok(product)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.db.categories().list().await?)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Validates and inserts a product, returning its id.
    pub async fn create(&self, payload: ProductPayload) -> Result<i64, ApiError> {
        let start = Instant::now();
        let draft = self.build_draft(payload)?;

        let id = self.db.products().insert(&draft).await?;

        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            id,
            name = %draft.name,
            "Product created"
        );
        Ok(id)
    }

    /// Full replace: every mutable column is rewritten from the payload.
    pub async fn replace(&self, raw_id: &str, payload: ProductPayload) -> Result<(), ApiError> {
        let id = parse_id("id", raw_id)?;
        let draft = self.build_draft(payload)?;

        self.db.products().replace(id, &draft).await?;

        info!(id, "Product replaced");
        Ok(())
    }

    /// Sparse update: only the supplied fields are validated and written.
    pub async fn patch(&self, raw_id: &str, patch: ProductPatch) -> Result<(), ApiError> {
        let id = parse_id("id", raw_id)?;
        let changes = self.build_changes(patch)?;

        self.db.products().apply_changes(id, &changes).await?;

        info!(id, fields = changes.field_count(), "Product patched");
        Ok(())
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), ApiError> {
        let id = parse_id("id", raw_id)?;

        self.db.products().delete(id).await?;

        info!(id, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Payload Validation
    // =========================================================================

    /// Validates a full product payload.
    pub fn build_draft(&self, payload: ProductPayload) -> Result<ProductDraft, ApiError> {
        let name = validate_product_name("nombre", &text("nombre", payload.nombre.as_ref())?)?;
        let unit_of_measure = self.catalog.validate_unit(
            "unidadMedida",
            &text("unidadMedida", payload.unidad_medida.as_ref())?,
        )?;
        let location = self
            .catalog
            .validate_location("ubicacion", &text("ubicacion", payload.ubicacion.as_ref())?)?;

        let category_id = match &payload.id_categoria {
            Some(value) => optional_reference("idCategoria", value)?,
            None => None,
        };
        let supplier_id = match &payload.id_proveedor {
            Some(value) => optional_reference("idProveedor", value)?,
            None => None,
        };

        Ok(ProductDraft {
            code: optional_text(coerce_text("codigo", payload.codigo.as_ref())?.as_deref()),
            name,
            description: text("descripcion", payload.descripcion.as_ref())?
                .trim()
                .to_string(),
            current_stock: lenient_stock(payload.stock_actual.as_ref()),
            minimum_stock: stock_threshold("stockMinimo", payload.stock_minimo.as_ref())?,
            maximum_stock: optional_stock_threshold("stockMaximo", payload.stock_maximo.as_ref())?,
            unit_of_measure,
            purchase_price: lenient_price("precioCompra", payload.precio_compra.as_ref())?,
            sale_price: lenient_price("precioVenta", payload.precio_venta.as_ref())?,
            location,
            batch: optional_text(coerce_text("lote", payload.lote.as_ref())?.as_deref()),
            expiration_date: parse_expiration_date(
                "fechaVencimiento",
                &text("fechaVencimiento", payload.fecha_vencimiento.as_ref())?,
            )?,
            category_id,
            supplier_id,
            status: parse_status("estado", &text("estado", payload.estado.as_ref())?)?,
        })
    }

    /// Validates the supplied subset of a product payload.
    ///
    /// ## Errors
    /// `CoreError::EmptyPatch` when no recognized field is present.
    pub fn build_changes(&self, patch: ProductPatch) -> Result<ProductChanges, ApiError> {
        let mut changes = ProductChanges::default();

        if let Some(code) = patch.codigo {
            changes.code = Some(optional_text(coerce_text("codigo", Some(&code))?.as_deref()));
        }
        if let Some(name) = patch.nombre {
            changes.name = Some(validate_product_name("nombre", &text("nombre", Some(&name))?)?);
        }
        if let Some(description) = patch.descripcion {
            changes.description = Some(
                text("descripcion", Some(&description))?
                    .trim()
                    .to_string(),
            );
        }
        if let Some(value) = patch.stock_actual {
            changes.current_stock = Some(lenient_stock(Some(&value)));
        }
        if let Some(value) = patch.stock_minimo {
            changes.minimum_stock = Some(stock_threshold("stockMinimo", Some(&value))?);
        }
        if let Some(value) = patch.stock_maximo {
            changes.maximum_stock = Some(optional_stock_threshold("stockMaximo", Some(&value))?);
        }
        if let Some(unit) = patch.unidad_medida {
            changes.unit_of_measure = Some(
                self.catalog
                    .validate_unit("unidadMedida", &text("unidadMedida", Some(&unit))?)?,
            );
        }
        if let Some(value) = patch.precio_compra {
            changes.purchase_price = Some(lenient_price("precioCompra", Some(&value))?);
        }
        if let Some(value) = patch.precio_venta {
            changes.sale_price = Some(lenient_price("precioVenta", Some(&value))?);
        }
        if let Some(location) = patch.ubicacion {
            changes.location = Some(
                self.catalog
                    .validate_location("ubicacion", &text("ubicacion", Some(&location))?)?,
            );
        }
        if let Some(batch) = patch.lote {
            changes.batch = Some(optional_text(coerce_text("lote", Some(&batch))?.as_deref()));
        }
        if let Some(date) = patch.fecha_vencimiento {
            changes.expiration_date = Some(parse_expiration_date(
                "fechaVencimiento",
                &text("fechaVencimiento", Some(&date))?,
            )?);
        }
        if let Some(value) = patch.id_categoria {
            changes.category_id = Some(optional_reference("idCategoria", &value)?);
        }
        if let Some(value) = patch.id_proveedor {
            changes.supplier_id = Some(optional_reference("idProveedor", &value)?);
        }
        if let Some(status) = patch.estado {
            changes.status = Some(parse_status("estado", &text("estado", Some(&status))?)?);
        }

        if changes.is_empty() {
            return Err(CoreError::EmptyPatch.into());
        }

        Ok(changes)
    }
}

/// Lenient text with absent and `null` read as empty.
fn text(field: &str, value: Option<&Value>) -> Result<String, ValidationError> {
    Ok(coerce_text(field, value)?.unwrap_or_default())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use botica_core::{Money, ProductStatus};
    use botica_db::DbConfig;
    use chrono::NaiveDate;
    use serde_json::json;

    async fn service() -> InventoryService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        InventoryService::new(db, Arc::new(Catalog::default()))
    }

    fn payload(body: Value) -> ProductPayload {
        serde_json::from_value(body).unwrap()
    }

    fn patch(body: Value) -> ProductPatch {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let svc = service().await;

        let id = svc
            .create(payload(json!({
                "codigo": "AMOX-500",
                "nombre": "Amoxicilina 500mg",
                "descripcion": "Antibiótico de amplio espectro",
                "stockActual": 30,
                "stockMinimo": "10",
                "stockMaximo": 120,
                "unidadMedida": "Capsule",
                "precioCompra": 0.25,
                "precioVenta": "0.80",
                "ubicacion": "a2",
                "lote": "L-2291",
                "fechaVencimiento": "2026-09-30"
            })))
            .await
            .unwrap();

        let product = svc.get(&id.to_string()).await.unwrap();
        assert_eq!(product.code.as_deref(), Some("AMOX-500"));
        assert_eq!(product.name, "Amoxicilina 500mg");
        assert_eq!(product.description, "Antibiótico de amplio espectro");
        assert_eq!(product.current_stock, 30);
        assert_eq!(product.minimum_stock, 10);
        assert_eq!(product.maximum_stock, Some(120));
        assert_eq!(product.unit_of_measure, "capsule");
        assert_eq!(product.purchase_price(), Money::from_cents(25));
        assert_eq!(product.sale_price(), Money::from_cents(80));
        assert_eq!(product.location.as_deref(), Some("A2"));
        assert_eq!(product.batch.as_deref(), Some("L-2291"));
        assert_eq!(product.expiration_date, NaiveDate::from_ymd_opt(2026, 9, 30));
        assert_eq!(product.status, ProductStatus::Active);
    }

    #[tokio::test]
    async fn test_create_lenient_numbers_and_null_maximum() {
        let svc = service().await;

        let id = svc
            .create(payload(json!({
                "nombre": "Gasas",
                "unidadMedida": "package",
                "stockActual": "muchas",
                "stockMinimo": true,
                "stockMaximo": null,
                "precioVenta": ""
            })))
            .await
            .unwrap();

        let product = svc.get(&id.to_string()).await.unwrap();
        assert_eq!(product.current_stock, 0);
        assert_eq!(product.minimum_stock, 1);
        assert_eq!(product.maximum_stock, None);
        assert_eq!(product.sale_price(), Money::zero());
        assert_eq!(product.location, None);
    }

    #[tokio::test]
    async fn test_numeric_text_fields_are_stored_as_text() {
        let svc = service().await;

        let id = svc
            .create(payload(json!({
                "codigo": 7501,
                "nombre": "Suero oral",
                "unidadMedida": "bottle",
                "lote": 2291
            })))
            .await
            .unwrap();

        let product = svc.get(&id.to_string()).await.unwrap();
        assert_eq!(product.code.as_deref(), Some("7501"));
        assert_eq!(product.batch.as_deref(), Some("2291"));

        svc.patch(&id.to_string(), patch(json!({ "lote": 3310, "codigo": null })))
            .await
            .unwrap();
        let product = svc.get(&id.to_string()).await.unwrap();
        assert_eq!(product.batch.as_deref(), Some("3310"));
        assert_eq!(product.code, None);

        let err = svc
            .create(payload(json!({ "nombre": ["Suero"], "unidadMedida": "bottle" })))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("nombre"));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_unit() {
        let svc = service().await;

        let err = svc
            .create(payload(json!({ "nombre": "Jarabe", "unidadMedida": "gallon" })))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("unidadMedida"));

        assert_eq!(svc.db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_validation_failures() {
        let svc = service().await;

        for body in [
            json!({ "unidadMedida": "box" }),
            json!({ "nombre": "  ", "unidadMedida": "box" }),
            json!({ "nombre": "X" }),
            json!({ "nombre": "X", "unidadMedida": "box", "ubicacion": "Z9" }),
            json!({ "nombre": "X", "unidadMedida": "box", "stockMinimo": -1 }),
            json!({ "nombre": "X", "unidadMedida": "box", "stockMaximo": "-5" }),
            json!({ "nombre": "X", "unidadMedida": "box", "fechaVencimiento": "30/09/2026" }),
            json!({ "nombre": "X", "unidadMedida": "box", "precioVenta": -2 }),
            json!({ "nombre": "X", "unidadMedida": "box", "idCategoria": "abc" }),
        ] {
            let err = svc.create(payload(body.clone())).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidArgument, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_is_invalid_argument() {
        let svc = service().await;

        let err = svc
            .create(payload(json!({
                "nombre": "X",
                "unidadMedida": "box",
                "idCategoria": 77
            })))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn test_list_levels_are_case_insensitive() {
        let svc = service().await;
        svc.create(payload(json!({
            "nombre": "Low", "unidadMedida": "box", "stockActual": 1, "stockMinimo": 5
        })))
        .await
        .unwrap();
        svc.create(payload(json!({
            "nombre": "High", "unidadMedida": "box", "stockActual": 50, "stockMaximo": 10
        })))
        .await
        .unwrap();

        assert_eq!(svc.list(None).await.unwrap().len(), 2);
        assert_eq!(svc.list(Some("BAJO")).await.unwrap()[0].name, "Low");
        assert_eq!(svc.list(Some("Alto")).await.unwrap()[0].name, "High");
        assert_eq!(svc.list(Some("whatever")).await.unwrap().len(), 2);
        assert_eq!(svc.list_shortages().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_requires_term() {
        let svc = service().await;

        let err = svc.search(Some("   ")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(svc.search(None).await.unwrap_err().code, ErrorCode::InvalidArgument);
        assert!(svc.search(Some("para")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace() {
        let svc = service().await;
        let id = svc
            .create(payload(json!({
                "nombre": "Old", "unidadMedida": "box", "ubicacion": "A1", "lote": "L1"
            })))
            .await
            .unwrap();

        svc.replace(
            &id.to_string(),
            payload(json!({ "nombre": "New", "unidadMedida": "bottle", "stockActual": 3 })),
        )
        .await
        .unwrap();

        let product = svc.get(&id.to_string()).await.unwrap();
        assert_eq!(product.name, "New");
        assert_eq!(product.unit_of_measure, "bottle");
        assert_eq!(product.current_stock, 3);
        // Full replace clears what the payload omits
        assert_eq!(product.location, None);
        assert_eq!(product.batch, None);

        let err = svc
            .replace("999", payload(json!({ "nombre": "X", "unidadMedida": "box" })))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_empty_patch_is_invalid_argument() {
        let svc = service().await;
        let id = svc
            .create(payload(json!({ "nombre": "X", "unidadMedida": "box" })))
            .await
            .unwrap();

        let err = svc
            .patch(&id.to_string(), patch(json!({})))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);

        let err = svc
            .patch(&id.to_string(), patch(json!({ "unknown": 1 })))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn test_patch_changes_only_supplied_column() {
        let svc = service().await;
        let id = svc
            .create(payload(json!({
                "codigo": "LORA-10",
                "nombre": "Loratadina",
                "unidadMedida": "tablet",
                "stockActual": 3,
                "stockMinimo": 10,
                "stockMaximo": 90,
                "precioVenta": 0.25,
                "ubicacion": "B1"
            })))
            .await
            .unwrap();
        let before = svc.get(&id.to_string()).await.unwrap();

        svc.patch(&id.to_string(), patch(json!({ "stockActual": 40 })))
            .await
            .unwrap();
        let after = svc.get(&id.to_string()).await.unwrap();

        assert_eq!(after.current_stock, 40);
        assert_eq!(
            Product {
                current_stock: before.current_stock,
                updated_at: before.updated_at,
                ..after.clone()
            },
            before
        );
    }

    #[tokio::test]
    async fn test_patch_revalidates_supplied_fields() {
        let svc = service().await;
        let id = svc
            .create(payload(json!({ "nombre": "X", "unidadMedida": "box", "ubicacion": "A1" })))
            .await
            .unwrap();
        let id = id.to_string();

        for body in [
            json!({ "unidadMedida": "gallon" }),
            json!({ "unidadMedida": "" }),
            json!({ "nombre": null }),
            json!({ "ubicacion": "Z9" }),
            json!({ "stockMinimo": -3 }),
        ] {
            let err = svc.patch(&id, patch(body.clone())).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidArgument, "body: {}", body);
        }

        // Blank location clears it
        svc.patch(&id, patch(json!({ "ubicacion": "" }))).await.unwrap();
        assert_eq!(svc.get(&id).await.unwrap().location, None);
    }

    #[tokio::test]
    async fn test_patch_missing_product() {
        let svc = service().await;
        let err = svc
            .patch("4242", patch(json!({ "stockActual": 1 })))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete() {
        let svc = service().await;
        let id = svc
            .create(payload(json!({ "nombre": "X", "unidadMedida": "box" })))
            .await
            .unwrap();

        svc.delete(&id.to_string()).await.unwrap();
        assert_eq!(
            svc.get(&id.to_string()).await.unwrap_err().code,
            ErrorCode::NotFound
        );

        assert_eq!(svc.delete("9999").await.unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(svc.delete("0").await.unwrap_err().code, ErrorCode::InvalidArgument);
        assert_eq!(svc.delete("abc").await.unwrap_err().code, ErrorCode::InvalidArgument);
        assert_eq!(svc.delete("-4").await.unwrap_err().code, ErrorCode::InvalidArgument);
    }
}
