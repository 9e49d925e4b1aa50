//! `/cotizaciones` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::dto::{QuotationDto, QuotationRequest, SupplierDto};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::services::QuotationService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cotizaciones/proveedores", get(list_suppliers))
        .route("/cotizaciones/enviar", post(submit_quotation))
        .route("/cotizaciones/:id", get(get_quotation))
}

pub async fn list_suppliers(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<SupplierDto>>, ApiError> {
    let suppliers = QuotationService::from_state(&state).list_suppliers().await?;
    Ok(ApiResponse::data(
        suppliers.into_iter().map(SupplierDto::from).collect(),
    ))
}

pub async fn submit_quotation(
    State(state): State<AppState>,
    body: Result<Json<QuotationRequest>, JsonRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Json(request) = body?;
    let id = QuotationService::from_state(&state).submit(request).await?;
    Ok(ApiResponse::created(id, "Quotation submitted"))
}

pub async fn get_quotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<QuotationDto>, ApiError> {
    let quotation = QuotationService::from_state(&state).get(&id).await?;
    Ok(ApiResponse::data(quotation))
}
