use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    /// `ok` when a catalog snapshot is loaded, `unavailable` otherwise.
    pub catalog: String,
    pub products: usize,
    pub cart_count: u32,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
        tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let (catalog, products) = match state.catalog.snapshot().await {
        Ok(snapshot) => ("ok", snapshot.len()),
        Err(_) => ("unavailable", 0),
    };
    let cart_count = state.cart.lock().await.count();

    let data = HealthData {
        status: "ok".to_string(),
        catalog: catalog.to_string(),
        products,
        cart_count,
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}
