use crate::{
    dto::products::{PriceRange, ProductList, ProductLookup, ReloadResult},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{FeaturedQuery, ProductQuery, SearchQuery},
    state::AppState,
};

/// With a slug, the matching product; otherwise the (optionally filtered)
/// product list.
pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductLookup>> {
    // An empty `?slug=` asks for nothing in particular.
    if let Some(slug) = query.slug.as_deref().filter(|s| !s.is_empty()) {
        let product = get_product(state, slug).await?;
        return Ok(ApiResponse::success("Product", ProductLookup::One(product), None));
    }

    let items = state.catalog.filter(&query.filter()).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Products",
        ProductLookup::Many(items),
        Some(meta),
    ))
}

pub async fn get_product_by_slug(state: &AppState, slug: &str) -> AppResult<ApiResponse<Product>> {
    let product = get_product(state, slug).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn featured_products(
    state: &AppState,
    query: FeaturedQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let items = state.catalog.featured(query.normalize()).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Featured products",
        ProductList::from(items),
        Some(meta),
    ))
}

pub async fn search_products(
    state: &AppState,
    query: SearchQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let q = query.q.unwrap_or_default();
    let items = state.catalog.search(&q).await?;
    tracing::debug!(query = %q, hits = items.len(), "product search");
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList::from(items), Some(meta)))
}

pub async fn price_range(state: &AppState) -> AppResult<ApiResponse<PriceRange>> {
    let max = state.catalog.price_ceiling().await?;
    Ok(ApiResponse::success(
        "Price range",
        PriceRange { min: 0.0, max },
        None,
    ))
}

pub async fn reload_catalog(state: &AppState) -> AppResult<ApiResponse<ReloadResult>> {
    let products = state.catalog.reload().await?;
    Ok(ApiResponse::success(
        "Catalog reloaded",
        ReloadResult { products },
        Some(Meta::empty()),
    ))
}

async fn get_product(state: &AppState, slug: &str) -> AppResult<Product> {
    state
        .catalog
        .get_by_slug(slug)
        .await?
        .ok_or(AppError::NotFound)
}
