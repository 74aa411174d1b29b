use crate::{
    dto::{
        categories::{CategoryList, TagList},
        products::ProductList,
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items = state.catalog.category_summaries().await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

/// Products in `category`. A category with no products does not exist.
pub async fn category_products(
    state: &AppState,
    category: &str,
) -> AppResult<ApiResponse<ProductList>> {
    let items = state.catalog.list_by_category(category).await?;
    if items.is_empty() {
        return Err(AppError::NotFound);
    }
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList::from(items), Some(meta)))
}

pub async fn list_tags(state: &AppState) -> AppResult<ApiResponse<TagList>> {
    let items = state.catalog.list_tags().await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Tags", TagList { items }, Some(meta)))
}

pub async fn tag_products(state: &AppState, tag: &str) -> AppResult<ApiResponse<ProductList>> {
    let items = state.catalog.list_by_tag(tag).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList::from(items), Some(meta)))
}
