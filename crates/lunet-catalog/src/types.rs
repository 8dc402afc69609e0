//! Upstream catalog record types.
//!
//! ## Observed shape from the commerce API
//!
//! ### Prices
//! All three price fields arrive as decimal strings (`"149.90"`), with
//! `regular_price` occasionally empty on variable parent products. We pass
//! them through as strings and parse at the point of use so one bad value
//! never poisons a record.
//!
//! ### `sale_price`
//! Empty string or absent when no sale is active, a decimal string
//! otherwise. Modeled as `Option<String>` with empty normalized to `None`
//! during mapping.
//!
//! ### `attributes`
//! An array of `{name, option}` pairs. The `name` is free-form and varies by
//! locale ("Couleur de monture" vs "Frame color"); routing into the fixed
//! dimensions happens by keyword, see `lunet_core::route_dimension`.
//!
//! ### `stock_status`
//! `"instock"`, `"outofstock"`, or `"onbackorder"`. Unknown values are
//! treated as in stock.
//!
//! `id`, `name` (products) and `id`, `parent_id` (variants) are the only
//! required fields; a record missing them fails to decode and is skipped by
//! the import loop, counted as a record error.

use serde::Deserialize;

/// One `{name, option}` attribute pair on a raw record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAttribute {
    pub name: String,
    /// Selected option label, e.g. `"Noir Mat"`. May be empty on parent
    /// products that only declare the axis.
    #[serde(default)]
    pub option: String,
}

/// A parent product as returned by the upstream catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    pub name: String,
    /// URL slug; derived from the name during mapping when absent.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    /// Effective current price as a decimal string.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i32>,
    #[serde(default)]
    pub stock_status: Option<String>,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
    /// IDs of this product's variation records.
    #[serde(default)]
    pub variations: Vec<i64>,
}

/// A purchasable variation record as returned by the upstream catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVariant {
    pub id: i64,
    /// ID of the parent product this variation belongs to.
    pub parent_id: i64,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i32>,
    #[serde(default)]
    pub stock_status: Option<String>,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}
