use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_api::{
    cart::CartStore,
    catalog::CatalogAccessor,
    config::AppConfig,
    routes::create_app,
    state::AppState,
    storage::FileStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // A missing catalog is not fatal at startup: requests get a 500 until
    // the file is fixed and /api/catalog/reload is called.
    let catalog = CatalogAccessor::open(&config.catalog_path).await;

    let storage = Arc::new(FileStorage::new(&config.cart_storage_dir));
    tracing::info!(
        dir = %storage.dir().display(),
        key = %config.cart_storage_key,
        "cart storage"
    );
    let cart = CartStore::initialize(storage, config.cart_storage_key.clone());

    let app = create_app(AppState::new(catalog, cart));

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
