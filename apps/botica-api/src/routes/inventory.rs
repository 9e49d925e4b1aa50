//! `/inventario` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::{CategoryDto, ListQuery, ProductDto, ProductPatch, ProductPayload, SearchQuery};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::services::InventoryService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inventario", get(list_products).post(create_product))
        .route("/inventario/faltantes", get(list_shortages))
        .route("/inventario/buscar", get(search_products))
        .route("/inventario/categorias", get(list_categories))
        .route(
            "/inventario/:id",
            get(get_product)
                .put(replace_product)
                .patch(patch_product)
                .delete(delete_product),
        )
}

fn to_dtos(products: Vec<botica_core::Product>) -> Vec<ProductDto> {
    products.into_iter().map(ProductDto::from).collect()
}

// =============================================================================
// Reads
// =============================================================================

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Vec<ProductDto>>, ApiError> {
    let products = InventoryService::from_state(&state)
        .list(query.nivel.as_deref())
        .await?;
    Ok(ApiResponse::data(to_dtos(products)))
}

pub async fn list_shortages(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ProductDto>>, ApiError> {
    let products = InventoryService::from_state(&state).list_shortages().await?;
    Ok(ApiResponse::data(to_dtos(products)))
}

pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<ApiResponse<Vec<ProductDto>>, ApiError> {
    let products = InventoryService::from_state(&state)
        .search(query.term())
        .await?;
    Ok(ApiResponse::data(to_dtos(products)))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<CategoryDto>>, ApiError> {
    let categories = InventoryService::from_state(&state).list_categories().await?;
    Ok(ApiResponse::data(
        categories.into_iter().map(CategoryDto::from).collect(),
    ))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProductDto>, ApiError> {
    let product = InventoryService::from_state(&state).get(&id).await?;
    Ok(ApiResponse::data(ProductDto::from(product)))
}

// =============================================================================
// Writes
// =============================================================================

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Json(payload) = body?;
    let id = InventoryService::from_state(&state).create(payload).await?;
    Ok(ApiResponse::created(id, "Product created"))
}

pub async fn replace_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Json(payload) = body?;
    InventoryService::from_state(&state)
        .replace(&id, payload)
        .await?;
    Ok(ApiResponse::message("Product updated"))
}

pub async fn patch_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Json(patch) = body?;
    InventoryService::from_state(&state).patch(&id, patch).await?;
    Ok(ApiResponse::message("Product updated"))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    InventoryService::from_state(&state).delete(&id).await?;
    Ok(ApiResponse::message("Product deleted"))
}
