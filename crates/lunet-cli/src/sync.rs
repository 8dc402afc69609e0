//! The `sync` and `map` commands: fetch (or read) raw catalog records, run
//! the mapping pipeline, write artifacts.

use std::path::{Path, PathBuf};

use anyhow::Context;

use lunet_catalog::{run_import, write_artifacts, CatalogClient, ImportOutcome};
use lunet_core::AppConfig;

/// Fetches both upstream collections and runs the pipeline.
///
/// # Errors
///
/// Returns an error if the client cannot be built, either fetch fails, or
/// the artifacts cannot be written. Mapping itself never fails — malformed
/// records are skipped and counted.
pub(crate) async fn run_sync(config: &AppConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    tracing::info!(base_url = %config.catalog_base_url, "starting catalog sync");
    let client = CatalogClient::new(config.request_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;

    let raw_products = client
        .fetch_products(
            &config.catalog_base_url,
            config.per_page,
            config.inter_request_delay_ms,
        )
        .await
        .context("failed to fetch products")?;
    let raw_variants = client
        .fetch_variants(
            &config.catalog_base_url,
            config.per_page,
            config.inter_request_delay_ms,
        )
        .await
        .context("failed to fetch variations")?;

    let outcome = run_import(raw_products, raw_variants);
    let out_dir = output.unwrap_or_else(|| config.output_dir.clone());
    write_artifacts(&outcome, &out_dir)?;
    print_summary(&outcome, &out_dir);
    Ok(())
}

/// Runs the pipeline over local JSON files.
///
/// # Errors
///
/// Returns an error if either input file cannot be read or parsed as a JSON
/// array, or if the artifacts cannot be written.
pub(crate) fn run_map(
    products_path: &Path,
    variants_path: &Path,
    output: &Path,
) -> anyhow::Result<()> {
    let raw_products = read_records(products_path)?;
    let raw_variants = read_records(variants_path)?;

    let outcome = run_import(raw_products, raw_variants);
    write_artifacts(&outcome, output)?;
    print_summary(&outcome, output);
    Ok(())
}

fn read_records(path: &Path) -> anyhow::Result<Vec<serde_json::Value>> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("{} is not a JSON array of records", path.display()))
}

fn print_summary(outcome: &ImportOutcome, out_dir: &Path) {
    println!(
        "mapped {} products, {} variants, {} relations into {} ({} record errors, {} orphan variants)",
        outcome.stats.products_mapped,
        outcome.stats.variants_mapped,
        outcome.relations.len(),
        out_dir.display(),
        outcome.stats.record_errors,
        outcome.stats.orphan_variants,
    );
}
