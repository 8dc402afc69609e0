pub mod artifacts;
pub mod client;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod relations;
pub mod sku;
pub mod types;

pub use artifacts::write_artifacts;
pub use client::CatalogClient;
pub use error::CatalogError;
pub use normalize::{map_attributes, map_product, map_variant};
pub use pipeline::{decode_records, run_import, ImportOutcome, ImportStats};
pub use relations::{build_relations, AttributeSummary, PriceRange, ProductRelation, RelationOutput};
pub use sku::generate_sku;
pub use types::{RawAttribute, RawProduct, RawVariant};
