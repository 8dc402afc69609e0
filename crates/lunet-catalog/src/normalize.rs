//! Mapping from raw upstream records to [`lunet_core::MappedProduct`] and
//! [`lunet_core::MappedVariant`].
//!
//! Attribute routing and label normalization are delegated to `lunet_core`;
//! SKU derivation to [`crate::sku`]. Mapping is total: every decodable record
//! maps to exactly one output record, with fallbacks for anything the
//! upstream left blank.

use lunet_core::{
    fallback_slug, normalize, route_dimension, MappedProduct, MappedVariant, StockStatus,
    VariantAttributes,
};

use crate::sku::generate_sku;
use crate::types::{RawAttribute, RawProduct, RawVariant};

/// Routes and normalizes a raw attribute list into the fixed dimension slots.
///
/// Attribute names that match no routing keyword are logged and ignored;
/// when two raw attributes route to the same dimension the last one wins.
#[must_use]
pub fn map_attributes(raw: &[RawAttribute]) -> VariantAttributes {
    let mut attributes = VariantAttributes::default();
    for attribute in raw {
        if attribute.option.is_empty() {
            continue;
        }
        match route_dimension(&attribute.name) {
            Some(dimension) => {
                attributes.set(dimension, normalize(dimension, &attribute.option));
            }
            None => {
                tracing::warn!(
                    name = %attribute.name,
                    "attribute name routes to no dimension; ignored"
                );
            }
        }
    }
    attributes
}

/// Maps a raw product record. Missing slugs are derived from the name;
/// empty sale prices are normalized to absent.
#[must_use]
pub fn map_product(raw: RawProduct) -> MappedProduct {
    let slug = raw
        .slug
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback_slug(&raw.name));

    MappedProduct {
        id: raw.id,
        slug,
        sku: raw.sku.filter(|s| !s.is_empty()),
        price: raw.price,
        regular_price: raw.regular_price,
        sale_price: raw.sale_price.filter(|s| !s.is_empty()),
        stock_status: StockStatus::from_raw(raw.stock_status.as_deref().unwrap_or("")),
        name: raw.name,
    }
}

/// Maps a raw variation record, attaching normalized attributes and the
/// generated SKU.
///
/// `parent_name` is the owning product's name when the parent resolved;
/// orphans still map (their SKU takes the catalog-wide product code) and are
/// dropped later by the relation pass.
#[must_use]
pub fn map_variant(raw: RawVariant, parent_name: Option<&str>) -> MappedVariant {
    let attributes = map_attributes(&raw.attributes);
    let sku = generate_sku(
        parent_name.unwrap_or(""),
        raw.sku.as_deref(),
        raw.id,
        &attributes,
    );

    MappedVariant {
        id: raw.id,
        parent_product_id: raw.parent_id,
        sku,
        attributes,
        price: raw.price,
        regular_price: raw.regular_price,
        sale_price: raw.sale_price.filter(|s| !s.is_empty()),
        stock_quantity: raw.stock_quantity,
        stock_status: StockStatus::from_raw(raw.stock_status.as_deref().unwrap_or("")),
    }
}

#[cfg(test)]
mod tests {
    use lunet_core::AttributeDimension;

    use super::*;

    fn attr(name: &str, option: &str) -> RawAttribute {
        RawAttribute {
            name: name.to_owned(),
            option: option.to_owned(),
        }
    }

    fn make_raw_variant(id: i64, parent_id: i64, attributes: Vec<RawAttribute>) -> RawVariant {
        RawVariant {
            id,
            parent_id,
            sku: None,
            price: "149.90".to_owned(),
            regular_price: "149.90".to_owned(),
            sale_price: None,
            stock_quantity: Some(3),
            stock_status: Some("instock".to_owned()),
            attributes,
        }
    }

    #[test]
    fn map_attributes_routes_all_three_dimensions() {
        let attrs = map_attributes(&[
            attr("Audio", "Avec Audio"),
            attr("Couleur de monture", "Noir Mat"),
            attr("Couleur des verres", "Fumé"),
        ]);
        assert_eq!(attrs.slug(AttributeDimension::Audio), Some("avec-audio"));
        assert_eq!(attrs.slug(AttributeDimension::FrameColor), Some("noir-mat"));
        assert_eq!(attrs.slug(AttributeDimension::LensColor), Some("fume"));
    }

    #[test]
    fn map_attributes_ignores_unroutable_names() {
        let attrs = map_attributes(&[attr("Taille", "M"), attr("Audio", "Sans Audio")]);
        assert_eq!(attrs.slug(AttributeDimension::Audio), Some("sans-audio"));
        assert_eq!(attrs.slug(AttributeDimension::FrameColor), None);
    }

    #[test]
    fn map_attributes_skips_empty_options() {
        let attrs = map_attributes(&[attr("Couleur de monture", "")]);
        assert!(attrs.is_empty());
    }

    #[test]
    fn map_attributes_unknown_label_falls_back() {
        let attrs = map_attributes(&[attr("Couleur de monture", "Rouge Corail")]);
        let frame = attrs.get(AttributeDimension::FrameColor).unwrap();
        assert_eq!(frame.slug, "rouge-corail");
        assert!(frame.swatch_color.is_none());
    }

    #[test]
    fn map_product_derives_slug_from_name_when_absent() {
        let product = map_product(RawProduct {
            id: 1,
            name: "Pulse Audio Edition".to_owned(),
            slug: None,
            sku: None,
            price: "149.90".to_owned(),
            regular_price: "149.90".to_owned(),
            sale_price: Some(String::new()),
            stock_quantity: None,
            stock_status: Some("outofstock".to_owned()),
            attributes: vec![],
            variations: vec![101, 102],
        });
        assert_eq!(product.slug, "pulse-audio-edition");
        assert!(product.sale_price.is_none());
        assert_eq!(product.stock_status, StockStatus::OutOfStock);
    }

    #[test]
    fn map_product_keeps_upstream_slug() {
        let product = map_product(RawProduct {
            id: 1,
            name: "Pulse".to_owned(),
            slug: Some("pulse-v2".to_owned()),
            sku: Some("PLS-PARENT".to_owned()),
            price: String::new(),
            regular_price: String::new(),
            sale_price: None,
            stock_quantity: None,
            stock_status: None,
            attributes: vec![],
            variations: vec![],
        });
        assert_eq!(product.slug, "pulse-v2");
        assert_eq!(product.sku.as_deref(), Some("PLS-PARENT"));
        assert_eq!(product.stock_status, StockStatus::InStock);
    }

    #[test]
    fn map_variant_attaches_generated_sku() {
        let variant = map_variant(
            make_raw_variant(
                101,
                1,
                vec![
                    attr("Audio", "Avec Audio"),
                    attr("Couleur de monture", "Noir Mat"),
                    attr("Couleur des verres", "Fumé"),
                ],
            ),
            Some("Pulse Audio"),
        );
        assert_eq!(variant.sku, "PLS-NM-FM-AUD");
        assert_eq!(variant.parent_product_id, 1);
    }

    #[test]
    fn map_variant_without_attributes_uses_id_fallback_sku() {
        let variant = map_variant(make_raw_variant(205, 2, vec![]), Some("Horizon"));
        assert_eq!(variant.sku, "VAR-205");
    }

    #[test]
    fn map_variant_orphan_gets_default_product_code() {
        let variant = map_variant(
            make_raw_variant(301, 999, vec![attr("Couleur de monture", "Noir Mat")]),
            None,
        );
        assert_eq!(variant.sku, "LNT-NM-UNK-UNK");
    }

    #[test]
    fn map_variant_is_deterministic() {
        let raw = make_raw_variant(
            101,
            1,
            vec![
                attr("Audio", "Avec Audio"),
                attr("Couleur de monture", "Noir Mat"),
            ],
        );
        let first = map_variant(raw.clone(), Some("Pulse"));
        let second = map_variant(raw, Some("Pulse"));
        assert_eq!(first.sku, second.sku);
        assert_eq!(first.attributes, second.attributes);
    }
}
