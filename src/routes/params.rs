use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalog::ProductFilter;

pub const DEFAULT_FEATURED_LIMIT: usize = 8;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub slug: Option<String>,
    pub category: Option<String>,
    pub max_price: Option<f64>,
}

impl ProductQuery {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            category: self.category.clone().filter(|c| !c.is_empty()),
            max_price: self.max_price,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

impl FeaturedQuery {
    pub fn normalize(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_FEATURED_LIMIT).clamp(1, 100)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub q: Option<String>,
}
