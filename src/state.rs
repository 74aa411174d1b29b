use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{cart::CartStore, catalog::CatalogAccessor};

/// Shared handles injected into every handler.
///
/// Both services are built once at startup; the cart lives behind a mutex so
/// each mutation completes before the next one starts.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogAccessor>,
    pub cart: Arc<Mutex<CartStore>>,
}

impl AppState {
    pub fn new(catalog: CatalogAccessor, cart: CartStore) -> Self {
        Self {
            catalog: Arc::new(catalog),
            cart: Arc::new(Mutex::new(cart)),
        }
    }
}
