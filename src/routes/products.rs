use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::products::{PriceRange, ProductList, ProductLookup, ReloadResult},
    error::AppResult,
    models::Product,
    response::ApiResponse,
    routes::params::{FeaturedQuery, ProductQuery, SearchQuery},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/featured", get(featured_products))
        .route("/search", get(search_products))
        .route("/price-range", get(price_range))
        .route("/{slug}", get(get_product))
}

pub fn catalog_router() -> Router<AppState> {
    Router::new().route("/reload", post(reload_catalog))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("slug" = Option<String>, Query, description = "Return only the product with this slug"),
        ("category" = Option<String>, Query, description = "Exact category match"),
        ("max_price" = Option<f64>, Query, description = "Upper price bound, inclusive"),
    ),
    responses(
        (status = 200, description = "Single product when slug is given, otherwise the product list", body = ApiResponse<ProductLookup>),
        (status = 404, description = "No product with that slug"),
        (status = 500, description = "Catalog data unavailable"),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductLookup>>> {
    let response = product_service::list_products(&state, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let response = product_service::get_product_by_slug(&state, &slug).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/products/featured",
    params(
        ("limit" = Option<usize>, Query, description = "How many products, default 8"),
    ),
    responses(
        (status = 200, description = "First products in catalog order", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn featured_products(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let response = product_service::featured_products(&state, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/products/search",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive substring of title, description or category"),
    ),
    responses(
        (status = 200, description = "Matching products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let response = product_service::search_products(&state, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/products/price-range",
    responses(
        (status = 200, description = "Price filter bounds", body = ApiResponse<PriceRange>)
    ),
    tag = "Products"
)]
pub async fn price_range(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PriceRange>>> {
    let response = product_service::price_range(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/catalog/reload",
    responses(
        (status = 200, description = "Catalog file re-read", body = ApiResponse<ReloadResult>),
        (status = 500, description = "Catalog file missing or malformed"),
    ),
    tag = "Catalog"
)]
pub async fn reload_catalog(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ReloadResult>>> {
    let response = product_service::reload_catalog(&state).await?;
    Ok(Json(response))
}
