//! Deterministic SKU derivation.
//!
//! The code grammar is `productCode-frameCode-lensCode-audioCode`, each
//! fragment looked up from a fixed table keyed by the normalized slug for
//! that dimension. Unknown slugs map to `UNK`; SKU generation is a total
//! function and must never abort a batch import.

use lunet_core::{AttributeDimension, VariantAttributes};

/// Catalog-wide product code used when no name token matches.
const DEFAULT_PRODUCT_CODE: &str = "LNT";

/// Code fragment for slugs with no table entry.
const UNKNOWN_CODE: &str = "UNK";

/// Known product-name tokens, matched case-insensitively as substrings of
/// the product name. First match wins.
const PRODUCT_CODES: &[(&str, &str)] = &[
    ("pulse", "PLS"),
    ("horizon", "HRZ"),
    ("wave", "WAV"),
    ("echo", "ECH"),
    ("strata", "STR"),
];

const FRAME_CODES: &[(&str, &str)] = &[
    ("noir-mat", "NM"),
    ("noir-brillant", "NB"),
    ("bleu-marine", "BM"),
    ("ecaille", "EC"),
    ("blanc-perle", "BP"),
    ("vert-olive", "VO"),
];

const LENS_CODES: &[(&str, &str)] = &[
    ("fume", "FM"),
    ("fume-degrade", "FD"),
    ("bleu-miroir", "BR"),
    ("vert-g15", "VG"),
    ("brun", "BN"),
    ("rose-dore", "RD"),
];

const AUDIO_CODES: &[(&str, &str)] = &[
    ("avec-audio", "AUD"),
    ("sans-audio", "STD"),
    ("audio-premium", "PRE"),
];

/// Resolves the product code fragment from the product name.
#[must_use]
pub fn product_code(product_name: &str) -> &'static str {
    let lower = product_name.to_lowercase();
    PRODUCT_CODES
        .iter()
        .find(|(token, _)| lower.contains(token))
        .map_or(DEFAULT_PRODUCT_CODE, |&(_, code)| code)
}

fn fragment(
    table: &[(&str, &'static str)],
    dimension: AttributeDimension,
    slug: Option<&str>,
) -> &'static str {
    let Some(slug) = slug else {
        return UNKNOWN_CODE;
    };
    table
        .iter()
        .find(|(key, _)| *key == slug)
        .map_or_else(
            || {
                tracing::warn!(dimension = %dimension, slug, "no SKU code for slug; using UNK");
                UNKNOWN_CODE
            },
            |&(_, code)| code,
        )
}

/// Derives the SKU for a variant.
///
/// Deterministic over its inputs: no randomness, no time component. When the
/// variant carries no mapped attributes at all (malformed upstream shape or a
/// simple product), generation cannot proceed on the normal path; the
/// explicit fallback branch returns the pre-existing upstream SKU when
/// present, else an id-based code. Batch imports never fail here.
#[must_use]
pub fn generate_sku(
    product_name: &str,
    existing_sku: Option<&str>,
    variant_id: i64,
    attributes: &VariantAttributes,
) -> String {
    if attributes.is_empty() {
        if let Some(sku) = existing_sku.filter(|s| !s.is_empty()) {
            return sku.to_owned();
        }
        tracing::warn!(
            variant_id,
            "variant has no mapped attributes and no upstream SKU; using id-based code"
        );
        return format!("VAR-{variant_id}");
    }

    let product = product_code(product_name);
    let frame = fragment(
        FRAME_CODES,
        AttributeDimension::FrameColor,
        attributes.slug(AttributeDimension::FrameColor),
    );
    let lens = fragment(
        LENS_CODES,
        AttributeDimension::LensColor,
        attributes.slug(AttributeDimension::LensColor),
    );
    let audio = fragment(
        AUDIO_CODES,
        AttributeDimension::Audio,
        attributes.slug(AttributeDimension::Audio),
    );

    format!("{product}-{frame}-{lens}-{audio}")
}
