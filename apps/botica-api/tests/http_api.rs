//! End-to-end tests over the full router with an in-memory database.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use botica_api::{build_router, AppState};
use botica_core::types::NewSupplier;
use botica_core::Catalog;
use botica_db::{Database, DbConfig};

struct TestApp {
    router: Router,
    db: Database,
}

impl TestApp {
    async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let router = build_router(AppState::new(db.clone(), Catalog::default()));
        TestApp { router, db }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn create_product(&self, body: Value) -> i64 {
        let (status, value) = self.send(Method::POST, "/inventario", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{}", value);
        value["id"].as_i64().unwrap()
    }
}

fn assert_failure(value: &Value, code: &str) {
    assert_eq!(value["ok"], json!(false), "{}", value);
    assert_eq!(value["code"], json!(code), "{}", value);
    assert!(value["message"].as_str().is_some_and(|m| !m.is_empty()));
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["data"]["database"], json!("up"));
}

#[tokio::test]
async fn health_fails_when_store_is_closed() {
    let app = TestApp::new().await;
    app.db.close().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_failure(&body, "INTERNAL");
}

// =============================================================================
// Inventory
// =============================================================================

#[tokio::test]
async fn create_then_get_product() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/inventario",
            Some(json!({
                "nombre": "Paracetamol 500mg",
                "unidadMedida": "tablet",
                "stockActual": "12",
                "stockMinimo": 20,
                "precioVenta": 0.5,
                "ubicacion": "A1",
                "fechaVencimiento": "2027-01-31"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], json!(true));
    assert!(body["message"].is_string());
    let id = body["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/inventario/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let product = &body["data"];
    assert_eq!(product["id"], json!(id));
    assert_eq!(product["nombre"], json!("Paracetamol 500mg"));
    assert_eq!(product["stockActual"], json!(12));
    assert_eq!(product["precioVenta"], json!(0.5));
    assert_eq!(product["fechaVencimiento"], json!("2027-01-31"));
    assert_eq!(product["estado"], json!("ACTIVE"));

    let (_, body) = app.get("/inventario/faltantes").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_with_unknown_unit_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/inventario",
            Some(json!({ "nombre": "Jarabe", "unidadMedida": "gallon" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "INVALID_ARGUMENT");

    let (_, body) = app.get("/inventario").await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn numeric_barcode_is_accepted() {
    let app = TestApp::new().await;

    let id = app
        .create_product(json!({ "codigo": 7501, "nombre": "Suero oral", "unidadMedida": "bottle" }))
        .await;

    let (status, body) = app.get(&format!("/inventario/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["codigo"], json!("7501"));
}

#[tokio::test]
async fn malformed_json_is_invalid_argument() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/inventario")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = app.send_request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "INVALID_ARGUMENT");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/cotizaciones/enviar")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = app.send_request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "INVALID_ARGUMENT");
}

#[tokio::test]
async fn invalid_ids_are_rejected_before_lookup() {
    let app = TestApp::new().await;

    for uri in ["/inventario/0", "/inventario/abc", "/inventario/-3", "/cotizaciones/xyz"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_failure(&body, "INVALID_ARGUMENT");
    }

    let (status, body) = app.get("/inventario/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, "NOT_FOUND");
}

#[tokio::test]
async fn list_by_stock_level() {
    let app = TestApp::new().await;
    app.create_product(json!({
        "nombre": "Low", "unidadMedida": "box", "stockActual": 1, "stockMinimo": 5
    }))
    .await;
    app.create_product(json!({
        "nombre": "High", "unidadMedida": "box", "stockActual": 80, "stockMaximo": 50
    }))
    .await;
    app.create_product(json!({
        "nombre": "Normal", "unidadMedida": "box", "stockActual": 10, "stockMinimo": 5
    }))
    .await;

    let (_, body) = app.get("/inventario").await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Normal", "High", "Low"]);

    let (_, body) = app.get("/inventario?nivel=bajo").await;
    assert_eq!(body["data"][0]["nombre"], json!("Low"));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = app.get("/inventario?nivel=ALTO").await;
    assert_eq!(body["data"][0]["nombre"], json!("High"));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_products() {
    let app = TestApp::new().await;
    app.create_product(json!({
        "codigo": "AMX-1", "nombre": "Amoxicilina", "unidadMedida": "capsule"
    }))
    .await;
    app.create_product(json!({
        "nombre": "Ibuprofeno", "descripcion": "antiinflamatorio", "unidadMedida": "tablet"
    }))
    .await;

    let (status, body) = app.get("/inventario/buscar?q=amx").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["nombre"], json!("Amoxicilina"));

    let (_, body) = app.get("/inventario/buscar?nombre=INFLAM").await;
    assert_eq!(body["data"][0]["nombre"], json!("Ibuprofeno"));

    let (status, body) = app.get("/inventario/buscar?q=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "INVALID_ARGUMENT");

    let (_, body) = app.get("/inventario/buscar?q=zzz").await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn patch_and_replace_product() {
    let app = TestApp::new().await;
    let id = app
        .create_product(json!({
            "nombre": "Loratadina", "unidadMedida": "tablet", "stockActual": 3, "ubicacion": "B2"
        }))
        .await;
    let uri = format!("/inventario/{}", id);

    let (status, body) = app
        .send(Method::PATCH, &uri, Some(json!({ "stockActual": 40 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "message": body["message"] }));

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"]["stockActual"], json!(40));
    assert_eq!(body["data"]["ubicacion"], json!("B2"));

    let (status, body) = app.send(Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "INVALID_ARGUMENT");

    let (status, _) = app
        .send(
            Method::PUT,
            &uri,
            Some(json!({ "nombre": "Loratadina 10mg", "unidadMedida": "box" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"]["nombre"], json!("Loratadina 10mg"));
    assert_eq!(body["data"]["stockActual"], json!(0));
    assert_eq!(body["data"]["ubicacion"], Value::Null);
}

#[tokio::test]
async fn delete_product() {
    let app = TestApp::new().await;
    let id = app
        .create_product(json!({ "nombre": "Alcohol", "unidadMedida": "bottle" }))
        .await;
    let uri = format!("/inventario/{}", id);

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, "NOT_FOUND");
}

#[tokio::test]
async fn list_categories() {
    let app = TestApp::new().await;
    app.db.categories().insert("Vitaminas").await.unwrap();
    app.db.categories().insert("Analgésicos").await.unwrap();

    let (status, body) = app.get("/inventario/categorias").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["nombre"], json!("Analgésicos"));
    assert_eq!(body["data"][1]["nombre"], json!("Vitaminas"));
}

// =============================================================================
// Quotations
// =============================================================================

#[tokio::test]
async fn submit_and_fetch_quotation() {
    let app = TestApp::new().await;
    let supplier_id = app
        .db
        .suppliers()
        .insert(&NewSupplier {
            name: "Distribuidora Sur".to_string(),
            email: None,
            phone: Some("054-221100".to_string()),
        })
        .await
        .unwrap();
    let p1 = app
        .create_product(json!({ "nombre": "Vitamina C", "unidadMedida": "tablet" }))
        .await;
    let p2 = app
        .create_product(json!({ "nombre": "Suero oral", "unidadMedida": "bottle" }))
        .await;

    let (_, body) = app.get("/cotizaciones/proveedores").await;
    assert_eq!(body["data"][0]["nombre"], json!("Distribuidora Sur"));
    assert_eq!(body["data"][0]["telefono"], json!("054-221100"));

    let (status, body) = app
        .send(
            Method::POST,
            "/cotizaciones/enviar",
            Some(json!({
                "proveedorId": supplier_id,
                "items": [
                    { "productoId": p1, "cantidad": 2, "precioUnitario": 10.5 },
                    { "productoId": p2, "cantidad": 1, "precioUnitario": 0 }
                ],
                "observaciones": "Entrega en 48h"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/cotizaciones/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], json!(21.0));
    assert_eq!(body["data"]["estado"], json!("PENDING"));
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

    // Product still referenced by a quotation line
    let (status, body) = app
        .send(Method::DELETE, &format!("/inventario/{}", p1), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "INVALID_ARGUMENT");
}

#[tokio::test]
async fn submit_quotation_failures() {
    let app = TestApp::new().await;
    let p1 = app
        .create_product(json!({ "nombre": "Gasas", "unidadMedida": "package" }))
        .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/cotizaciones/enviar",
            Some(json!({ "proveedorId": 1, "items": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "INVALID_ARGUMENT");

    let (status, body) = app
        .send(
            Method::POST,
            "/cotizaciones/enviar",
            Some(json!({ "proveedorId": 55, "items": [{ "productoId": p1, "cantidad": 1 }] })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, "NOT_FOUND");

    assert_eq!(app.db.quotations().count().await.unwrap(), 0);
}
