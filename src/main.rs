use std::collections::HashSet;

use anyhow::{Context, Result};
use storefront_bridge::updates::{InMemoryInstalledLocales, LocaleCatalog, UpdateNegotiator};
use storefront_bridge::BridgeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_bridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load .env for local dev (if present)
    if dotenvy::dotenv().is_ok() {
        tracing::info!("Loaded .env");
    }

    tracing::info!("Starting Storefront Bridge update check");

    let config = match std::env::var("BRIDGE_CONFIG") {
        Ok(path) => BridgeConfig::from_file(&path)?,
        Err(_) => BridgeConfig::from_env()?,
    };
    tracing::info!(
        "Configuration loaded: subject={}, catalog={}",
        config.gateway.id,
        config.catalog.base_url
    );

    let catalog = LocaleCatalog::new(
        config.catalog.base_url.clone(),
        config.catalog.timeout_seconds,
    );
    let bundles = catalog.fetch_bundles(&config.gateway.id).await;
    tracing::info!("Catalog advertised {} bundle(s)", bundles.len());

    let installed = match config.locales.installed_manifest.as_deref() {
        Some(path) => InMemoryInstalledLocales::from_manifest(path)
            .with_context(|| format!("failed to load installed manifest {}", path))?,
        None => InMemoryInstalledLocales::new(),
    };

    let supported: HashSet<String> = config.locales.supported.iter().cloned().collect();

    let negotiator = UpdateNegotiator::new(config.gateway.id.clone());
    let eligible = negotiator.list_eligible_updates(&bundles, &installed, &supported);
    tracing::info!("{} update(s) eligible for install", eligible.len());

    println!("{}", serde_json::to_string_pretty(&eligible)?);

    Ok(())
}
