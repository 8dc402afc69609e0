//! Attribute dimensions, raw-name routing, and label normalization.
//!
//! The upstream catalog exposes variant attributes as free-form
//! `{name, option}` pairs. This module routes the `name` into one of the
//! three fixed dimensions and maps the `option` label to a canonical
//! `{slug, display_label, swatch_color}` tuple. Unknown labels degrade to a
//! slugified fallback rather than failing — the upstream data is only
//! partially trusted and a bad label must never abort a sync.

use serde::{Deserialize, Serialize};

/// One axis of variation on a product.
///
/// Iteration order is the declaration order (`audio`, `frame_color`,
/// `lens_color`) everywhere a dimension list appears in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeDimension {
    Audio,
    FrameColor,
    LensColor,
}

impl AttributeDimension {
    /// All dimensions in declaration order.
    pub const ALL: [AttributeDimension; 3] = [
        AttributeDimension::Audio,
        AttributeDimension::FrameColor,
        AttributeDimension::LensColor,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeDimension::Audio => "audio",
            AttributeDimension::FrameColor => "frame_color",
            AttributeDimension::LensColor => "lens_color",
        }
    }
}

impl std::fmt::Display for AttributeDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered routing table from raw attribute-name keywords to dimensions.
///
/// Upstream names the axes in French ("Audio", "Couleur de monture",
/// "Couleur des verres") but some records carry English names. Matching is a
/// case-insensitive substring test, first entry wins.
const DIMENSION_KEYWORDS: &[(&str, AttributeDimension)] = &[
    ("audio", AttributeDimension::Audio),
    ("monture", AttributeDimension::FrameColor),
    ("frame", AttributeDimension::FrameColor),
    ("verre", AttributeDimension::LensColor),
    ("lens", AttributeDimension::LensColor),
];

/// Routes a raw attribute name to its dimension, or `None` when no keyword
/// matches.
#[must_use]
pub fn route_dimension(raw_name: &str) -> Option<AttributeDimension> {
    let lower = raw_name.to_lowercase();
    DIMENSION_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|&(_, dimension)| dimension)
}

/// A canonical, display-ready attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAttribute {
    /// URL-safe canonical identifier, unique within its dimension.
    pub slug: String,
    /// Label shown in the storefront UI.
    pub display_label: String,
    /// CSS hex color for the swatch, when the value has one.
    pub swatch_color: Option<String>,
}

/// One row of a dimension's static mapping table.
struct LabelEntry {
    raw: &'static str,
    slug: &'static str,
    display: &'static str,
    swatch: Option<&'static str>,
}

const AUDIO_LABELS: &[LabelEntry] = &[
    LabelEntry {
        raw: "Avec Audio",
        slug: "avec-audio",
        display: "Avec audio",
        swatch: None,
    },
    LabelEntry {
        raw: "Sans Audio",
        slug: "sans-audio",
        display: "Sans audio",
        swatch: None,
    },
    LabelEntry {
        raw: "Audio Premium",
        slug: "audio-premium",
        display: "Audio premium",
        swatch: None,
    },
];

const FRAME_COLOR_LABELS: &[LabelEntry] = &[
    LabelEntry {
        raw: "Noir Mat",
        slug: "noir-mat",
        display: "Noir mat",
        swatch: Some("#1C1C1C"),
    },
    LabelEntry {
        raw: "Noir Brillant",
        slug: "noir-brillant",
        display: "Noir brillant",
        swatch: Some("#000000"),
    },
    LabelEntry {
        raw: "Bleu Marine",
        slug: "bleu-marine",
        display: "Bleu marine",
        swatch: Some("#1F3A5F"),
    },
    LabelEntry {
        raw: "Écaille",
        slug: "ecaille",
        display: "Écaille",
        swatch: Some("#8B5A2B"),
    },
    LabelEntry {
        raw: "Blanc Perle",
        slug: "blanc-perle",
        display: "Blanc perle",
        swatch: Some("#F2F0EB"),
    },
    LabelEntry {
        raw: "Vert Olive",
        slug: "vert-olive",
        display: "Vert olive",
        swatch: Some("#556B2F"),
    },
];

const LENS_COLOR_LABELS: &[LabelEntry] = &[
    LabelEntry {
        raw: "Fumé",
        slug: "fume",
        display: "Fumé",
        swatch: Some("#4A4A4A"),
    },
    LabelEntry {
        raw: "Fumé Dégradé",
        slug: "fume-degrade",
        display: "Fumé dégradé",
        swatch: Some("#6E6E6E"),
    },
    LabelEntry {
        raw: "Bleu Miroir",
        slug: "bleu-miroir",
        display: "Bleu miroir",
        swatch: Some("#3A6EA5"),
    },
    LabelEntry {
        raw: "Vert G15",
        slug: "vert-g15",
        display: "Vert G15",
        swatch: Some("#31493C"),
    },
    LabelEntry {
        raw: "Brun",
        slug: "brun",
        display: "Brun",
        swatch: Some("#5C4033"),
    },
    LabelEntry {
        raw: "Rose Doré",
        slug: "rose-dore",
        display: "Rose doré",
        swatch: Some("#C08081"),
    },
];

fn table_for(dimension: AttributeDimension) -> &'static [LabelEntry] {
    match dimension {
        AttributeDimension::Audio => AUDIO_LABELS,
        AttributeDimension::FrameColor => FRAME_COLOR_LABELS,
        AttributeDimension::LensColor => LENS_COLOR_LABELS,
    }
}

/// Normalizes a raw option label for the given dimension.
///
/// Lookup is a case-sensitive exact match against the dimension's static
/// table. Unknown labels take the fallback branch: slugified label, the raw
/// label as display text, no swatch. This function is total — there is no
/// error path for unmapped labels.
#[must_use]
pub fn normalize(dimension: AttributeDimension, raw_label: &str) -> NormalizedAttribute {
    if let Some(entry) = table_for(dimension).iter().find(|e| e.raw == raw_label) {
        return NormalizedAttribute {
            slug: entry.slug.to_owned(),
            display_label: entry.display.to_owned(),
            swatch_color: entry.swatch.map(str::to_owned),
        };
    }

    tracing::warn!(
        dimension = %dimension,
        raw_label,
        "unmapped attribute label; falling back to slugified form"
    );
    NormalizedAttribute {
        slug: fallback_slug(raw_label),
        display_label: raw_label.to_owned(),
        swatch_color: None,
    }
}

/// Derives the fallback slug for an unmapped label: lowercased, whitespace
/// runs collapsed to single hyphens.
#[must_use]
pub fn fallback_slug(raw_label: &str) -> String {
    raw_label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// One serialized row of the static mapping table dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingRow {
    pub raw_label: String,
    pub slug: String,
    pub display_label: String,
    pub swatch_color: Option<String>,
}

/// Full static mapping table, one field per dimension in declaration order.
/// Serialized as-is into the `attribute-mappings.json` artifact so display
/// logic downstream can render swatches without re-deriving anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeMappingDump {
    pub audio: Vec<MappingRow>,
    pub frame_color: Vec<MappingRow>,
    pub lens_color: Vec<MappingRow>,
}

/// Dumps the static mapping tables as a serializable structure.
#[must_use]
pub fn mapping_table_dump() -> AttributeMappingDump {
    let rows = |dimension: AttributeDimension| {
        table_for(dimension)
            .iter()
            .map(|e| MappingRow {
                raw_label: e.raw.to_owned(),
                slug: e.slug.to_owned(),
                display_label: e.display.to_owned(),
                swatch_color: e.swatch.map(str::to_owned),
            })
            .collect()
    };
    AttributeMappingDump {
        audio: rows(AttributeDimension::Audio),
        frame_color: rows(AttributeDimension::FrameColor),
        lens_color: rows(AttributeDimension::LensColor),
    }
}
