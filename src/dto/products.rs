use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

impl From<Vec<Product>> for ProductList {
    fn from(items: Vec<Product>) -> Self {
        Self { items }
    }
}

/// Bounds for the price filter slider.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Either a single product (slug lookup) or the whole list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ProductLookup {
    One(Product),
    Many(Vec<Product>),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReloadResult {
    pub products: usize,
}
