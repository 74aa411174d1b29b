use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddToCartRequest, CartSummary, CartView, UpdateQuantityRequest},
        categories::{CategoryList, CategorySummary, TagList},
        products::{PriceRange, ProductList, ProductLookup, ReloadResult},
    },
    models::{CartItem, Product, Rating},
    response::{ApiResponse, Meta},
    routes::{cart, categories, health, params, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::featured_products,
        products::search_products,
        products::price_range,
        products::reload_catalog,
        categories::list_categories,
        categories::category_products,
        categories::list_tags,
        categories::tag_products,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::clear_cart
    ),
    components(
        schemas(
            Product,
            Rating,
            CartItem,
            CartView,
            CartSummary,
            AddToCartRequest,
            UpdateQuantityRequest,
            CategorySummary,
            CategoryList,
            TagList,
            PriceRange,
            ProductList,
            ProductLookup,
            ReloadResult,
            health::HealthData,
            params::ProductQuery,
            params::FeaturedQuery,
            params::SearchQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<ProductLookup>,
            ApiResponse<CartView>,
            ApiResponse<CategoryList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
        (name = "Catalog", description = "Catalog maintenance"),
        (name = "Categories", description = "Category and tag endpoints"),
        (name = "Cart", description = "Cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
