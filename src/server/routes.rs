use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::listing::ListParams;
use crate::model::{AddressFields, AddressInput, CustomerInput};
use crate::server::AppState;

/// Raw customer-list query string, before normalization.
///
/// Every field arrives as text so a malformed value never trips the `Query`
/// extractor's plain-text rejection; bad numbers simply fall back to the
/// listing defaults and every failure keeps the `{"error": ...}` shape.
#[derive(Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn numeric_param(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.parse().ok())
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type Rejection = (StatusCode, Json<ErrorResponse>);

fn reject(err: Error) -> Rejection {
    let status = match &err {
        Error::Validation(_) | Error::Conflict(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: err.to_string() }))
}

pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let params = ListParams::normalize(
        query.search,
        query.sort_by.as_deref(),
        query.sort_order.as_deref(),
        numeric_param(query.page.as_deref()),
        numeric_param(query.limit.as_deref()),
    );

    let store = state.store.lock().await;
    let page = store.list_customers(&params).map_err(reject)?;

    Ok(Json(serde_json::json!({
        "data": page.rows,
        "pagination": page.pagination,
    })))
}

pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let store = state.store.lock().await;
    match store.get_customer(id).map_err(reject)? {
        Some(customer) => Ok(Json(serde_json::json!({ "data": customer }))),
        None => Err(reject(Error::NotFound("Customer not found".to_string()))),
    }
}

pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CustomerInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), Rejection> {
    let store = state.store.lock().await;
    let customer = store.create_customer(&input).map_err(reject)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Customer created successfully",
            "data": customer,
        })),
    ))
}

pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let store = state.store.lock().await;
    store.update_customer(id, &input).map_err(reject)?;
    Ok(Json(serde_json::json!({ "message": "Customer updated successfully" })))
}

pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let store = state.store.lock().await;
    store.delete_customer(id).map_err(reject)?;
    Ok(Json(serde_json::json!({ "message": "Customer deleted successfully" })))
}

pub async fn list_addresses(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<i64>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let store = state.store.lock().await;
    let addresses = store.list_addresses(customer_id).map_err(reject)?;
    Ok(Json(serde_json::json!({ "data": addresses })))
}

pub async fn create_address(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AddressInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), Rejection> {
    let store = state.store.lock().await;
    let address = store.create_address(&input).map_err(reject)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Address created successfully",
            "data": address,
        })),
    ))
}

pub async fn update_address(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(fields): Json<AddressFields>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let store = state.store.lock().await;
    store.update_address(id, &fields).map_err(reject)?;
    Ok(Json(serde_json::json!({ "message": "Address updated successfully" })))
}

pub async fn delete_address(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let store = state.store.lock().await;
    store.delete_address(id).map_err(reject)?;
    Ok(Json(serde_json::json!({ "message": "Address deleted successfully" })))
}
