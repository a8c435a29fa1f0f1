mod config;
mod routes;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use giftscan_core::{FileExclusionStore, LabelWindowExtractor, ModelCatalog};
use giftscan_engine::{QueryPipeline, ReqwestItemFetcher};
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = config::config_path(std::env::args_os().nth(1).map(PathBuf::from));
    let loaded = config::load(&config_path)?;
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();

    engine_logging::initialize(&config.log_settings());
    if from_file {
        engine_info!("Loaded configuration from {:?}", config_path);
    } else {
        engine_warn!("No configuration at {:?}; using defaults", config_path);
    }

    let catalog = ModelCatalog::load(&config.catalog_path)
        .with_context(|| format!("loading model catalog {:?}", config.catalog_path))?;
    engine_info!(
        "Model catalog {:?}: {} models",
        config.catalog_path,
        catalog.len()
    );

    let extractor = LabelWindowExtractor::with_profile_host(&config.profile_host)
        .with_context(|| format!("profile host {:?}", config.profile_host))?;
    let fetcher = ReqwestItemFetcher::new(config.fetch_settings())?.with_extractor(extractor);
    let pipeline = QueryPipeline::new(
        Arc::new(catalog),
        Arc::new(FileExclusionStore::new(&config.exclusions_path)),
        Arc::new(fetcher),
        config.pipeline_settings(),
    );

    let app = server::create_router(
        AppState::new(pipeline, config.default_limit),
        config.static_dir.as_deref(),
    );
    serve(app, &config).await
}

async fn serve(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("binding {}", config.bind_address))?;
    engine_info!("Listening on http://{}", config.bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}
