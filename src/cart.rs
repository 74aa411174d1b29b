use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::{
    dto::cart::CartSummary,
    error::StorageError,
    models::{CART_SNAPSHOT_VERSION, CartItem, CartSnapshot, Product},
    storage::CartStorage,
};

pub const FLAT_SHIPPING: f64 = 5.99;
pub const TAX_RATE: f64 = 0.07;

/// The session cart, mirrored to storage after every change.
///
/// In-memory state is authoritative: a failed write is logged and the
/// mutation stands.
#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    count: u32,
    storage: Arc<dyn CartStorage>,
    key: String,
}

impl CartStore {
    /// Restore the cart persisted under `key`, or start empty when there is
    /// nothing usable to restore.
    pub fn initialize(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = match storage.read(&key) {
            Ok(Some(raw)) => match decode_snapshot(&raw) {
                Ok(items) => items,
                Err(reason) => {
                    tracing::warn!(key = %key, %reason, "discarding stored cart");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to read stored cart");
                Vec::new()
            }
        };

        let mut store = Self {
            items,
            count: 0,
            storage,
            key,
        };
        store.recount();
        tracing::debug!(items = store.items.len(), count = store.count, "cart restored");
        store
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of all quantities.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_to_cart(&mut self, product: Product) {
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product,
                quantity: 1,
            }),
        }
        self.commit();
    }

    pub fn remove_from_cart(&mut self, product_id: i64) {
        self.items.retain(|item| item.product.id != product_id);
        self.commit();
    }

    /// Absolute set. Zero or below removes the item; unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product_id)
        {
            item.quantity = quantity;
        }
        self.commit();
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.commit();
    }

    pub fn summary(&self) -> CartSummary {
        let subtotal: f64 = self
            .items
            .iter()
            .map(|item| item.product.price * f64::from(item.quantity))
            .sum();
        let shipping = if self.items.is_empty() {
            0.0
        } else {
            FLAT_SHIPPING
        };
        let tax = subtotal * TAX_RATE;
        CartSummary {
            item_count: self.count,
            subtotal: to_cents(subtotal),
            shipping,
            tax: to_cents(tax),
            total: to_cents(subtotal + shipping + tax),
        }
    }

    fn recount(&mut self) {
        self.count = self
            .items
            .iter()
            .fold(0_u32, |total, item| total.saturating_add(item.quantity));
    }

    fn commit(&mut self) {
        self.recount();
        if let Err(err) = self.persist() {
            tracing::error!(key = %self.key, error = %err, "failed to persist cart");
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let snapshot = CartSnapshot {
            version: CART_SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            items: self.items.clone(),
        };
        let raw = serde_json::to_string(&snapshot)?;
        self.storage.write(&self.key, &raw)
    }
}

/// Decode a stored cart. Accepts the current versioned envelope and the
/// older bare array of items; anything else is rejected with a reason.
pub fn decode_snapshot(raw: &str) -> Result<Vec<CartItem>, String> {
    let value: Value = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    let version = value.get("version").and_then(Value::as_u64);
    let items = if value.is_array() {
        serde_json::from_value::<Vec<CartItem>>(value).map_err(|err| err.to_string())?
    } else if !value.is_object() {
        return Err("snapshot is not a cart".to_string());
    } else {
        match version {
            Some(v) if v == u64::from(CART_SNAPSHOT_VERSION) => {
                serde_json::from_value::<CartSnapshot>(value)
                    .map_err(|err| err.to_string())?
                    .items
            }
            Some(v) => return Err(format!("unsupported snapshot version {v}")),
            None => return Err("snapshot has no version".to_string()),
        }
    };

    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 {
            continue;
        }
        match merged.iter_mut().find(|m| m.product.id == item.product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity)
            }
            None => merged.push(item),
        }
    }
    Ok(merged)
}

fn to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
