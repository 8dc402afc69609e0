//! The batch import pass: decode, map, relate.
//!
//! Runs synchronously over an already-fetched in-memory dataset. Decoding is
//! per-record so one malformed upstream object is skipped and counted, never
//! aborting the batch. Each run re-imports the catalog wholesale.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use lunet_core::{MappedProduct, MappedVariant};

use crate::normalize::{map_product, map_variant};
use crate::relations::{build_relations, ProductRelation};
use crate::types::{RawProduct, RawVariant};

/// Diagnostic counters for one import run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImportStats {
    pub products_mapped: usize,
    pub variants_mapped: usize,
    /// Records that failed to decode and were skipped.
    pub record_errors: usize,
    /// Variants dropped because their parent product was not in the import.
    pub orphan_variants: usize,
}

/// Result of a full import pass.
#[derive(Debug)]
pub struct ImportOutcome {
    pub products: Vec<MappedProduct>,
    /// Mapped variants with resolved parents; orphans are excluded.
    pub variants: Vec<MappedVariant>,
    pub relations: Vec<ProductRelation>,
    pub stats: ImportStats,
    pub generated_at: DateTime<Utc>,
}

/// Decodes raw JSON records one at a time, skipping and counting failures.
///
/// `kind` names the collection for the warning log; the record's `id` field
/// is included when the malformed record still carries one.
pub fn decode_records<T: DeserializeOwned>(
    records: Vec<Value>,
    kind: &str,
    record_errors: &mut usize,
) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|value| {
            let record_id = value.get("id").and_then(Value::as_i64);
            match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(error) => {
                    *record_errors += 1;
                    tracing::warn!(kind, record_id, error = %error, "skipping malformed record");
                    None
                }
            }
        })
        .collect()
}

/// Runs the full mapping pipeline over raw catalog JSON.
///
/// Total over its input: malformed records and orphan variants reduce the
/// output and bump counters, but the pass itself always completes.
#[must_use]
pub fn run_import(raw_products: Vec<Value>, raw_variants: Vec<Value>) -> ImportOutcome {
    let mut record_errors = 0;

    let raw_products: Vec<RawProduct> = decode_records(raw_products, "product", &mut record_errors);
    let raw_variants: Vec<RawVariant> = decode_records(raw_variants, "variant", &mut record_errors);

    let products: Vec<MappedProduct> = raw_products.into_iter().map(map_product).collect();

    let name_index: HashMap<i64, &str> = products
        .iter()
        .map(|product| (product.id, product.name.as_str()))
        .collect();

    let mut variants: Vec<MappedVariant> = raw_variants
        .into_iter()
        .map(|raw| {
            let parent_name = name_index.get(&raw.parent_id).copied();
            map_variant(raw, parent_name)
        })
        .collect();

    let relation_output = build_relations(&products, &variants);
    let orphans: HashSet<i64> = relation_output.orphan_variant_ids.iter().copied().collect();
    variants.retain(|variant| !orphans.contains(&variant.id));

    let stats = ImportStats {
        products_mapped: products.len(),
        variants_mapped: variants.len(),
        record_errors,
        orphan_variants: orphans.len(),
    };
    tracing::info!(
        products = stats.products_mapped,
        variants = stats.variants_mapped,
        record_errors = stats.record_errors,
        orphan_variants = stats.orphan_variants,
        "import pass complete"
    );

    ImportOutcome {
        products,
        variants,
        relations: relation_output.relations,
        stats,
        generated_at: Utc::now(),
    }
}
