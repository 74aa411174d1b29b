#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use storefront_api::{
    cart::CartStore,
    catalog::{Catalog, CatalogAccessor},
    error::StorageError,
    models::{Product, Rating},
    state::AppState,
    storage::{CartStorage, MemoryStorage},
};

pub fn product(id: i64, title: &str, category: &str, price: f64) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: format!("{title} description"),
        category: category.to_string(),
        image: format!("https://img.example/{id}.jpg"),
        rating: Rating {
            rate: 4.0,
            count: 10,
        },
        slug: String::new(),
        tags: Vec::new(),
    }
}

pub fn tagged(mut product: Product, tags: &[&str]) -> Product {
    product.tags = tags.iter().map(|t| t.to_string()).collect();
    product
}

pub fn sample_products() -> Vec<Product> {
    vec![
        tagged(
            product(1, "Fjallraven Backpack", "men's clothing", 109.95),
            &["bags", "outdoor"],
        ),
        tagged(
            product(2, "Mens Cotton Jacket", "men's clothing", 55.99),
            &["jackets", "outdoor"],
        ),
        tagged(product(3, "Solid Gold Petite Micropave", "jewelery", 168.0), &["gold"]),
        product(4, "WD 2TB Elements Drive", "electronics", 64.0),
        tagged(
            product(5, "Snowboard Jacket & Coat", "women's clothing", 56.99),
            &["jackets"],
        ),
    ]
}

pub fn sample_catalog() -> Catalog {
    Catalog::from_products(sample_products())
}

pub fn write_catalog(dir: &Path, products: &[Product]) -> PathBuf {
    let path = dir.join("items.json");
    let raw = serde_json::to_string_pretty(products).expect("serialize catalog");
    std::fs::write(&path, raw).expect("write catalog");
    path
}

pub fn memory_cart() -> (Arc<MemoryStorage>, CartStore) {
    let storage = Arc::new(MemoryStorage::new());
    let cart = CartStore::initialize(storage.clone(), "cart");
    (storage, cart)
}

pub fn test_state() -> AppState {
    let catalog = CatalogAccessor::with_catalog("unused/items.json", sample_catalog());
    let (_, cart) = memory_cart();
    AppState::new(catalog, cart)
}

/// Storage that refuses every operation, like a disabled or full local store.
#[derive(Debug, Default)]
pub struct BrokenStorage;

impl CartStorage for BrokenStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }
}
