use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub catalog_path: PathBuf,
    pub cart_storage_dir: PathBuf,
    pub cart_storage_key: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let catalog_path = env::var("CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/items.json"));
        let cart_storage_dir = env::var("CART_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".storefront"));
        let cart_storage_key = env::var("CART_STORAGE_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| "cart".to_string());

        if cart_storage_key.contains(['/', '\\']) {
            anyhow::bail!("CART_STORAGE_KEY must not contain path separators");
        }

        Ok(Self {
            host,
            port,
            catalog_path,
            cart_storage_dir,
            cart_storage_key,
        })
    }
}
