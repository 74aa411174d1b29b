use storefront_api::{catalog::load_catalog, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let catalog = load_catalog(&config.catalog_path).await?;

    println!("Catalog: {}", config.catalog_path.display());
    println!("Products: {}", catalog.len());
    println!("Categories: {}", catalog.categories().len());
    println!("Tags: {}", catalog.tags().len());

    let collisions = catalog.slug_collisions();
    if collisions.is_empty() {
        println!("Slugs: all unique");
        return Ok(());
    }

    for slug in &collisions {
        let ids: Vec<String> = catalog
            .all()
            .iter()
            .filter(|p| p.slug == *slug)
            .map(|p| p.id.to_string())
            .collect();
        println!("Duplicate slug {slug}: product ids {}", ids.join(", "));
    }
    anyhow::bail!("{} duplicate slug(s); only the first product of each is reachable", collisions.len())
}
