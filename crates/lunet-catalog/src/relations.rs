//! Parent/variant relation records with computed price ranges and
//! per-dimension attribute summaries.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lunet_core::{parse_positive_price, AttributeDimension, MappedProduct, MappedVariant};

/// Min/max price across a product family, in the upstream currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Range for a family with no usable prices.
    #[must_use]
    pub fn zero() -> Self {
        PriceRange {
            min: Decimal::ZERO,
            max: Decimal::ZERO,
        }
    }
}

/// Distinct normalized slugs observed per dimension across a family's
/// variants. Fields are in dimension declaration order; sets deduplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSummary {
    pub audio: BTreeSet<String>,
    pub frame_color: BTreeSet<String>,
    pub lens_color: BTreeSet<String>,
}

impl AttributeSummary {
    fn insert(&mut self, dimension: AttributeDimension, slug: &str) {
        let set = match dimension {
            AttributeDimension::Audio => &mut self.audio,
            AttributeDimension::FrameColor => &mut self.frame_color,
            AttributeDimension::LensColor => &mut self.lens_color,
        };
        set.insert(slug.to_owned());
    }
}

/// Derived parent/variant relation record. Computed fresh from the mapped
/// dataset on every import; never stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRelation {
    pub product_id: i64,
    pub product_name: String,
    pub product_slug: String,
    /// Variant IDs in input order.
    pub variation_ids: Vec<i64>,
    pub price_range: PriceRange,
    pub attribute_summary: AttributeSummary,
}

/// Result of a relation-building pass.
#[derive(Debug)]
pub struct RelationOutput {
    /// One relation per input product, in product input order.
    pub relations: Vec<ProductRelation>,
    /// Variants whose parent matched no product. Excluded from every
    /// relation; never given a synthetic parent.
    pub orphan_variant_ids: Vec<i64>,
}

/// Groups variants under their parent products and computes the derived
/// fields for each family.
///
/// Grouping goes through a product-id index, not a nested scan. Orphan
/// variants are collected separately for diagnostics.
#[must_use]
pub fn build_relations(products: &[MappedProduct], variants: &[MappedVariant]) -> RelationOutput {
    let index: HashMap<i64, usize> = products
        .iter()
        .enumerate()
        .map(|(position, product)| (product.id, position))
        .collect();

    let mut groups: Vec<Vec<&MappedVariant>> = vec![Vec::new(); products.len()];
    let mut orphan_variant_ids = Vec::new();

    for variant in variants {
        match index.get(&variant.parent_product_id) {
            Some(&position) => groups[position].push(variant),
            None => {
                tracing::warn!(
                    variant_id = variant.id,
                    parent_product_id = variant.parent_product_id,
                    "orphan variant: parent product not in import; dropping"
                );
                orphan_variant_ids.push(variant.id);
            }
        }
    }

    let relations = products
        .iter()
        .zip(&groups)
        .map(|(product, group)| relation_for(product, group))
        .collect();

    RelationOutput {
        relations,
        orphan_variant_ids,
    }
}

fn relation_for(product: &MappedProduct, group: &[&MappedVariant]) -> ProductRelation {
    let mut summary = AttributeSummary::default();
    for variant in group {
        for dimension in AttributeDimension::ALL {
            if let Some(slug) = variant.attributes.slug(dimension) {
                summary.insert(dimension, slug);
            }
        }
    }

    ProductRelation {
        product_id: product.id,
        product_name: product.name.clone(),
        product_slug: product.slug.clone(),
        variation_ids: group.iter().map(|v| v.id).collect(),
        price_range: price_range(product, group),
        attribute_summary: summary,
    }
}

/// Min/max over the family's parseable, strictly positive variant prices.
/// Everything else is discarded with a warning; an empty candidate list
/// yields the zero range.
fn price_range(product: &MappedProduct, group: &[&MappedVariant]) -> PriceRange {
    let mut candidates = Vec::with_capacity(group.len());
    for variant in group {
        match parse_positive_price(&variant.price) {
            Some(price) => candidates.push(price),
            None => {
                tracing::warn!(
                    product_id = product.id,
                    variant_id = variant.id,
                    price = %variant.price,
                    "discarding unusable variant price from range"
                );
            }
        }
    }

    let Some(&first) = candidates.first() else {
        return PriceRange::zero();
    };
    let (min, max) = candidates
        .iter()
        .skip(1)
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
    PriceRange { min, max }
}
