//! Domain types and configuration for the lunet catalog pipeline.

use thiserror::Error;

pub mod app_config;
pub mod attributes;
pub mod config;
pub mod products;

pub use app_config::AppConfig;
pub use attributes::{
    fallback_slug, mapping_table_dump, normalize, route_dimension, AttributeDimension,
    AttributeMappingDump, MappingRow, NormalizedAttribute,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    parse_positive_price, pick_price, MappedProduct, MappedVariant, StockStatus, VariantAttributes,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
