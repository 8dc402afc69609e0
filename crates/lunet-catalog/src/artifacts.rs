//! Serialization of the pipeline's output into JSON artifacts.
//!
//! Five files per run: the three mapped collections, the static
//! attribute-mapping table for downstream display logic, and a small report
//! with the run's diagnostic counters.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CatalogError;
use crate::pipeline::{ImportOutcome, ImportStats};

pub const PRODUCTS_FILE: &str = "mapped-products.json";
pub const VARIANTS_FILE: &str = "mapped-variants.json";
pub const RELATIONS_FILE: &str = "product-relations.json";
pub const MAPPINGS_FILE: &str = "attribute-mappings.json";
pub const REPORT_FILE: &str = "import-report.json";

/// Run-level summary written alongside the mapped collections.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub generated_at: DateTime<Utc>,
    pub stats: ImportStats,
}

/// Writes all artifacts for one import run into `out_dir`, creating the
/// directory if needed.
///
/// # Errors
///
/// Returns [`CatalogError::ArtifactIo`] on filesystem failures and
/// [`CatalogError::ArtifactSerialize`] if a value cannot be serialized.
pub fn write_artifacts(outcome: &ImportOutcome, out_dir: &Path) -> Result<(), CatalogError> {
    fs::create_dir_all(out_dir).map_err(|source| CatalogError::ArtifactIo {
        path: out_dir.display().to_string(),
        source,
    })?;

    write_json(&out_dir.join(PRODUCTS_FILE), &outcome.products)?;
    write_json(&out_dir.join(VARIANTS_FILE), &outcome.variants)?;
    write_json(&out_dir.join(RELATIONS_FILE), &outcome.relations)?;
    write_json(&out_dir.join(MAPPINGS_FILE), &lunet_core::mapping_table_dump())?;
    write_json(
        &out_dir.join(REPORT_FILE),
        &ImportReport {
            generated_at: outcome.generated_at,
            stats: outcome.stats,
        },
    )?;

    tracing::info!(out_dir = %out_dir.display(), "artifacts written");
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body).map_err(|source| CatalogError::ArtifactIo {
        path: path.display().to_string(),
        source,
    })
}
