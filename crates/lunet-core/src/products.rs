use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeDimension, NormalizedAttribute};

/// Stock availability of a product or variant, as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    OnBackorder,
}

impl StockStatus {
    /// Lenient parse of the upstream status string. Unknown values default to
    /// `InStock` — availability is advisory, not gating.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "outofstock" => StockStatus::OutOfStock,
            "onbackorder" => StockStatus::OnBackorder,
            _ => StockStatus::InStock,
        }
    }
}

/// A parent product after mapping: canonical slug attached, prices kept as
/// the upstream decimal strings to avoid precision loss. Immutable once
/// mapped; each sync re-imports the catalog wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappedProduct {
    pub id: i64,
    pub name: String,
    /// URL slug for the product page, e.g. `"pulse-audio"`.
    pub slug: String,
    /// Upstream SKU on the parent record, when one exists.
    pub sku: Option<String>,
    /// Effective current price as a decimal string, e.g. `"149.90"`.
    pub price: String,
    pub regular_price: String,
    /// Set only while a sale is active.
    pub sale_price: Option<String>,
    pub stock_status: StockStatus,
}

/// One purchasable variant after mapping: normalized attributes and the
/// generated SKU attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappedVariant {
    pub id: i64,
    pub parent_product_id: i64,
    /// Generated stock-keeping code, e.g. `"PLS-NM-GF-AUD"`.
    pub sku: String,
    pub attributes: VariantAttributes,
    pub price: String,
    pub regular_price: String,
    pub sale_price: Option<String>,
    pub stock_quantity: Option<i32>,
    pub stock_status: StockStatus,
}

/// Normalized attribute values of a variant, one slot per dimension.
///
/// A fixed struct rather than a map so missing-dimension handling is a
/// compile-checked branch, and so serde emits the dimensions in declaration
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAttributes {
    pub audio: Option<NormalizedAttribute>,
    pub frame_color: Option<NormalizedAttribute>,
    pub lens_color: Option<NormalizedAttribute>,
}

impl VariantAttributes {
    #[must_use]
    pub fn get(&self, dimension: AttributeDimension) -> Option<&NormalizedAttribute> {
        match dimension {
            AttributeDimension::Audio => self.audio.as_ref(),
            AttributeDimension::FrameColor => self.frame_color.as_ref(),
            AttributeDimension::LensColor => self.lens_color.as_ref(),
        }
    }

    pub fn set(&mut self, dimension: AttributeDimension, attribute: NormalizedAttribute) {
        match dimension {
            AttributeDimension::Audio => self.audio = Some(attribute),
            AttributeDimension::FrameColor => self.frame_color = Some(attribute),
            AttributeDimension::LensColor => self.lens_color = Some(attribute),
        }
    }

    /// Normalized slug for a dimension, when the variant carries it.
    #[must_use]
    pub fn slug(&self, dimension: AttributeDimension) -> Option<&str> {
        self.get(dimension).map(|a| a.slug.as_str())
    }

    /// `true` when no dimension is populated — the malformed-shape case the
    /// SKU generator falls back on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        AttributeDimension::ALL
            .iter()
            .all(|&d| self.get(d).is_none())
    }
}

/// Parses an upstream price string into a strictly positive `Decimal`.
///
/// Returns `None` for unparsable or non-positive values; callers discard
/// those rather than erroring (per-record tolerance).
#[must_use]
pub fn parse_positive_price(raw: &str) -> Option<Decimal> {
    let value = raw.trim().parse::<Decimal>().ok()?;
    (value > Decimal::ZERO).then_some(value)
}

/// Sale-over-regular price precedence shared by the cart and the relation
/// builder: the sale price wins only when both parse and the sale is strictly
/// lower.
#[must_use]
pub fn pick_price(regular: Option<Decimal>, sale: Option<Decimal>) -> Option<Decimal> {
    match (regular, sale) {
        (Some(r), Some(s)) if s < r => Some(s),
        (Some(r), _) => Some(r),
        (None, sale) => sale,
    }
}

impl MappedProduct {
    /// Effective unit price under sale/regular precedence, falling back to
    /// the upstream `price` field when neither named price parses.
    #[must_use]
    pub fn effective_price(&self) -> Option<Decimal> {
        effective_price(&self.regular_price, self.sale_price.as_deref(), &self.price)
    }
}

impl MappedVariant {
    /// Effective unit price under sale/regular precedence, falling back to
    /// the upstream `price` field when neither named price parses.
    #[must_use]
    pub fn effective_price(&self) -> Option<Decimal> {
        effective_price(&self.regular_price, self.sale_price.as_deref(), &self.price)
    }
}

fn effective_price(regular: &str, sale: Option<&str>, current: &str) -> Option<Decimal> {
    pick_price(
        parse_positive_price(regular),
        sale.and_then(parse_positive_price),
    )
    .or_else(|| parse_positive_price(current))
}
