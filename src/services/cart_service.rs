use crate::{
    cart::CartStore,
    dto::cart::{AddToCartRequest, CartView, UpdateQuantityRequest},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

fn cart_view(cart: &CartStore) -> CartView {
    CartView {
        items: cart.items().to_vec(),
        count: cart.count(),
        summary: cart.summary(),
    }
}

pub async fn get_cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    let cart = state.cart.lock().await;
    let meta = Meta::total(cart.items().len());
    Ok(ApiResponse::success("OK", cart_view(&cart), Some(meta)))
}

/// Applies `mutate` on the blocking pool: every mutation writes the snapshot
/// through synchronous storage. The cart lock is held until the write is done.
async fn mutate_cart<F>(state: &AppState, mutate: F) -> AppResult<CartView>
where
    F: FnOnce(&mut CartStore) + Send + 'static,
{
    let mut cart = state.cart.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || {
        mutate(&mut *cart);
        cart_view(&cart)
    })
    .await
    .map_err(|err| AppError::Internal(anyhow::anyhow!("cart update task failed: {err}")))
}

/// Adds one unit of a catalog product, snapshotting the product as it is now.
pub async fn add_to_cart(
    state: &AppState,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let product = state
        .catalog
        .get_by_id(payload.product_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("product not found".to_string()))?;

    let view = mutate_cart(state, move |cart| cart.add_to_cart(product)).await?;
    tracing::debug!(product_id = payload.product_id, count = view.count, "cart add");
    Ok(ApiResponse::success("Added to cart", view, None))
}

pub async fn update_quantity(
    state: &AppState,
    product_id: i64,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let quantity = payload.quantity;
    let view = mutate_cart(state, move |cart| cart.update_quantity(product_id, quantity)).await?;
    tracing::debug!(product_id, quantity, count = view.count, "cart update");
    Ok(ApiResponse::success("Updated", view, None))
}

pub async fn remove_from_cart(
    state: &AppState,
    product_id: i64,
) -> AppResult<ApiResponse<CartView>> {
    let view = mutate_cart(state, move |cart| cart.remove_from_cart(product_id)).await?;
    tracing::debug!(product_id, count = view.count, "cart remove");
    Ok(ApiResponse::success("Removed from cart", view, None))
}

pub async fn clear_cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    let view = mutate_cart(state, CartStore::clear_cart).await?;
    Ok(ApiResponse::success("Cart cleared", view, Some(Meta::empty())))
}
