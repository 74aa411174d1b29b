use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::{
        categories::{CategoryList, TagList},
        products::ProductList,
    },
    error::AppResult,
    response::ApiResponse,
    services::category_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/{category}/products", get(category_products))
}

pub fn tags_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags))
        .route("/{tag}/products", get(tag_products))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories in catalog order", body = ApiResponse<CategoryList>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    Ok(Json(category_service::list_categories(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/categories/{category}/products",
    params(
        ("category" = String, Path, description = "Category, exact and case-sensitive")
    ),
    responses(
        (status = 200, description = "Products in the category", body = ApiResponse<ProductList>),
        (status = 404, description = "Unknown category"),
    ),
    tag = "Categories"
)]
pub async fn category_products(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(
        category_service::category_products(&state, &category).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/tags",
    responses(
        (status = 200, description = "Distinct tags", body = ApiResponse<TagList>)
    ),
    tag = "Categories"
)]
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<ApiResponse<TagList>>> {
    Ok(Json(category_service::list_tags(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/tags/{tag}/products",
    params(
        ("tag" = String, Path, description = "Tag")
    ),
    responses(
        (status = 200, description = "Products carrying the tag", body = ApiResponse<ProductList>)
    ),
    tag = "Categories"
)]
pub async fn tag_products(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(category_service::tag_products(&state, &tag).await?))
}
