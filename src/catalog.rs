use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::RwLock;

use crate::{
    dto::categories::CategorySummary,
    error::CatalogError,
    models::Product,
    slug::slugify,
};

/// Narrowing applied to the product grid.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub max_price: Option<f64>,
}

/// Immutable in-memory view of the product list, in source file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn from_products(mut products: Vec<Product>) -> Self {
        for product in &mut products {
            if product.slug.is_empty() {
                product.slug = slugify(&product.title);
            }
        }
        Self { products }
    }

    /// Parse the JSON array format of the catalog file. Blank input is an
    /// empty catalog.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let products: Vec<Product> = serde_json::from_str(raw)?;
        Ok(Self::from_products(products))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// First product carrying `slug`; later duplicates are unreachable.
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    pub fn by_id(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Distinct categories in first-occurrence order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct tags in first-occurrence order.
    pub fn tags(&self) -> Vec<&str> {
        distinct(
            self.products
                .iter()
                .flat_map(|p| p.tags.iter().map(String::as_str)),
        )
    }

    /// Case-insensitive substring match on title, description and category.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn featured(&self, limit: usize) -> &[Product] {
        &self.products[..limit.min(self.products.len())]
    }

    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|category| p.category == category)
            })
            .filter(|p| filter.max_price.is_none_or(|max| p.price <= max))
            .collect()
    }

    /// Highest price rounded up to a whole unit, `0` for an empty catalog.
    pub fn price_ceiling(&self) -> f64 {
        self.products
            .iter()
            .map(|p| p.price)
            .fold(0.0_f64, f64::max)
            .ceil()
    }

    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        self.categories()
            .into_iter()
            .map(|category| {
                let products = self.by_category(category);
                CategorySummary {
                    category: category.to_string(),
                    display_name: display_category_name(category),
                    product_count: products.len(),
                    image: products.first().map(|p| p.image.clone()),
                }
            })
            .collect()
    }

    /// Slugs shared by more than one product, in first-occurrence order.
    pub fn slug_collisions(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut collisions = Vec::new();
        for product in &self.products {
            let slug = product.slug.as_str();
            if !seen.insert(slug) && reported.insert(slug) {
                collisions.push(slug);
            }
        }
        collisions
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(*value)).collect()
}

/// Human label for a category: text before the first apostrophe, each word
/// capitalised. `"men's clothing"` reads as `"Men"`.
pub fn display_category_name(category: &str) -> String {
    let head = category.split('\'').next().unwrap_or_default();
    head.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Catalog::from_json(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read-only access to the catalog file, cached as one shared snapshot.
///
/// The snapshot is replaced only by [`CatalogAccessor::reload`]. While no
/// snapshot is loaded every query fails with [`CatalogError::Unavailable`].
#[derive(Debug)]
pub struct CatalogAccessor {
    path: PathBuf,
    snapshot: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogAccessor {
    /// Load `path` once. A failed load is logged and leaves the accessor
    /// unavailable until a successful reload.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let accessor = Self {
            path: path.into(),
            snapshot: RwLock::new(None),
        };
        if let Err(err) = accessor.reload().await {
            tracing::error!(error = ?err, path = %accessor.path.display(), "catalog load failed");
        }
        accessor
    }

    /// Serve an already-built catalog; reloads still read `path`.
    pub fn with_catalog(path: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            path: path.into(),
            snapshot: RwLock::new(Some(Arc::new(catalog))),
        }
    }

    /// Re-read the catalog file and swap in the new snapshot. On failure the
    /// accessor becomes unavailable, same as a missing file at startup.
    pub async fn reload(&self) -> Result<usize, CatalogError> {
        match load_catalog(&self.path).await {
            Ok(catalog) => {
                for slug in catalog.slug_collisions() {
                    tracing::warn!(slug, "duplicate product slug; lookups return the first match");
                }
                let count = catalog.len();
                *self.snapshot.write().await = Some(Arc::new(catalog));
                tracing::info!(products = count, path = %self.path.display(), "catalog loaded");
                Ok(count)
            }
            Err(err) => {
                *self.snapshot.write().await = None;
                Err(err)
            }
        }
    }

    pub async fn snapshot(&self) -> Result<Arc<Catalog>, CatalogError> {
        self.snapshot
            .read()
            .await
            .clone()
            .ok_or(CatalogError::Unavailable)
    }

    pub async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.snapshot().await?.all().to_vec())
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        Ok(self.snapshot().await?.by_slug(slug).cloned())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Product>, CatalogError> {
        Ok(self.snapshot().await?.by_id(id).cloned())
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(owned(self.snapshot().await?.by_category(category)))
    }

    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(owned(self.snapshot().await?.by_tag(tag)))
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        let catalog = self.snapshot().await?;
        Ok(catalog.categories().into_iter().map(str::to_string).collect())
    }

    pub async fn list_tags(&self) -> Result<Vec<String>, CatalogError> {
        let catalog = self.snapshot().await?;
        Ok(catalog.tags().into_iter().map(str::to_string).collect())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(owned(self.snapshot().await?.search(query)))
    }

    pub async fn featured(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        Ok(self.snapshot().await?.featured(limit).to_vec())
    }

    pub async fn filter(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        Ok(owned(self.snapshot().await?.filter(filter)))
    }

    pub async fn price_ceiling(&self) -> Result<f64, CatalogError> {
        Ok(self.snapshot().await?.price_ceiling())
    }

    pub async fn category_summaries(&self) -> Result<Vec<CategorySummary>, CatalogError> {
        Ok(self.snapshot().await?.category_summaries())
    }
}

fn owned(products: Vec<&Product>) -> Vec<Product> {
    products.into_iter().cloned().collect()
}
