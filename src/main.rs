//! Folio - headless portfolio exporter
//!
//! Loads a portfolio snapshot, renders it through the configured external
//! document renderer, and writes the returned HTML next to the snapshot.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::core::config::AppConfig;
use folio::core::snapshot::Snapshot;
use folio::RenderClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let snapshot_path = args
        .get(1)
        .map(PathBuf::from)
        .context("usage: folio <snapshot.json> [output.html]")?;
    let output_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| snapshot_path.with_extension("html"));

    let snapshot = Snapshot::load(&snapshot_path)?;
    let config = AppConfig::load().unwrap_or_default();

    tracing::info!(renderer = %config.renderer_url, template = %config.template, "generating document");
    let client = RenderClient::new(config.renderer_url.clone());
    let html = client
        .generate(&snapshot.sections, &config)
        .await
        .context("Document generation failed")?;

    write_output(&output_path, &html)?;
    tracing::info!("Wrote rendered document: {}", output_path.display());
    Ok(())
}

fn write_output(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write output: {}", path.display()))
}
