//! Data model for the part catalog
//!
//! This module defines the closed set of part categories, the
//! category-polymorphic `Part` record, and the static per-category
//! `CategorySpec` table that drives filtering and compatibility checks.
//! Adding a category is a data change here, not a new code branch elsewhere.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::compat::CompatRule;

/// The eight hardware part categories.
///
/// Serialized form doubles as the HTTP route token and the collection name
/// (`cpu`, `mainboard`, ..., `cpuCooler`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Cpu = 0,
    Mainboard = 1,
    Ram = 2,
    GraphicCard = 3,
    Ssd = 4,
    Psu = 5,
    Case = 6,
    CpuCooler = 7,
}

impl Category {
    /// All categories, in sidebar display order
    pub const ALL: [Category; 8] = [
        Category::Cpu,
        Category::Mainboard,
        Category::Ram,
        Category::GraphicCard,
        Category::Ssd,
        Category::Psu,
        Category::Case,
        Category::CpuCooler,
    ];

    /// Route token / collection name for this category
    pub fn route(self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Mainboard => "mainboard",
            Category::Ram => "ram",
            Category::GraphicCard => "graphicCard",
            Category::Ssd => "ssd",
            Category::Psu => "psu",
            Category::Case => "case",
            Category::CpuCooler => "cpuCooler",
        }
    }

    /// Resolve a route token back to a category
    pub fn from_route(route: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.route() == route)
    }

    /// Static filter/compatibility description for this category
    pub fn spec(self) -> &'static CategorySpec {
        &CATEGORY_SPECS[self as usize]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

/// A single catalog part.
///
/// Universal fields are typed; category-specific attributes stay in an open
/// map keyed by the store's field names (`Socket`, `Capacity_GB`, ...), so
/// one record shape serves all eight categories. Wire names are preserved
/// exactly (`_id`, `Brand`, `Price_THB`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Store-assigned identifier, unique within a category
    #[serde(rename = "_id", deserialize_with = "deserialize_opaque_id")]
    pub id: String,

    #[serde(rename = "Brand")]
    pub brand: String,

    #[serde(rename = "Model")]
    pub model: String,

    /// List price in THB; parts without a price contribute 0 to totals
    #[serde(rename = "Price_THB", default)]
    pub price_thb: f64,

    #[serde(rename = "ImageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Remaining category-specific fields, store names preserved
    #[serde(flatten)]
    pub attrs: BTreeMap<String, JsonValue>,

    /// Category this part was fetched under; not part of the wire format
    #[serde(skip)]
    pub category: Option<Category>,
}

impl Part {
    /// Look up a field by its store name, universal fields included.
    ///
    /// Scalar values are rendered to their display string (numbers keep
    /// their decimal form), which is also the form filter values compare
    /// against. Returns `None` for absent or non-scalar fields.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "_id" => Some(self.id.clone()),
            "Brand" => Some(self.brand.clone()),
            "Model" => Some(self.model.clone()),
            "Price_THB" => Some(self.price_thb.to_string()),
            "ImageUrl" => self.image_url.clone(),
            _ => self.attrs.get(name).and_then(render_scalar),
        }
    }

    /// A multi-valued attribute as its token list.
    ///
    /// Accepts both store shapes: a JSON array of strings, or one
    /// comma-joined string. Absent or scalar-valued fields yield an empty
    /// list.
    pub fn tokens(&self, name: &str) -> Vec<String> {
        match self.attrs.get(name) {
            Some(JsonValue::Array(items)) => items.iter().filter_map(render_scalar).collect(),
            Some(JsonValue::String(joined)) => joined
                .split(',')
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Socket token for CPUs and mainboards
    pub fn socket(&self) -> Option<String> {
        self.field("Socket")
    }

    /// Supported socket tokens for CPU coolers
    pub fn socket_support(&self) -> Vec<String> {
        self.tokens("Socket_Support")
    }

    /// Supported form-factor tokens for cases
    pub fn form_factor_support(&self) -> Vec<String> {
        self.tokens("Form_Factor_Support")
    }

    /// Display name: brand, series where present, model
    pub fn display_name(&self) -> String {
        match self.field("Series") {
            Some(series) => format!("{} {} {}", self.brand, series, self.model),
            None => format!("{} {}", self.brand, self.model),
        }
    }
}

fn render_scalar(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The store hands back string or integer identifiers depending on the
/// collection; normalize both to a string.
fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid _id value: {other}"
        ))),
    }
}

/// Static description of a category: which fields its filter controls key
/// on, which fields free-text search scans, and which cross-category rule
/// applies while browsing it.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    /// Fields filtered by exact value ("All Brands" style dropdowns)
    pub exact_filters: &'static [&'static str],
    /// Multi-valued fields filtered by token membership
    pub contains_filters: &'static [&'static str],
    /// Fields scanned by the case-insensitive search box
    pub search_fields: &'static [&'static str],
    /// Cross-category compatibility rule, if any
    pub compat: Option<CompatRule>,
}

// Indexed by the Category discriminant; keep both in the same order.
static CATEGORY_SPECS: [CategorySpec; 8] = [
    CategorySpec {
        category: Category::Cpu,
        exact_filters: &["Brand", "Series"],
        contains_filters: &[],
        search_fields: &["Brand", "Series", "Model"],
        compat: None,
    },
    CategorySpec {
        category: Category::Mainboard,
        exact_filters: &["Brand", "Chipset"],
        contains_filters: &[],
        search_fields: &["Brand", "Model"],
        compat: None,
    },
    CategorySpec {
        category: Category::Ram,
        exact_filters: &["Brand", "Type"],
        contains_filters: &[],
        search_fields: &["Brand", "Model"],
        compat: None,
    },
    CategorySpec {
        category: Category::GraphicCard,
        exact_filters: &["Brand", "Chipset"],
        contains_filters: &[],
        search_fields: &["Brand", "Model", "Chipset"],
        compat: None,
    },
    CategorySpec {
        category: Category::Ssd,
        exact_filters: &["Brand", "Capacity_GB", "Form_Factor"],
        contains_filters: &[],
        search_fields: &["Brand", "Series", "Model"],
        compat: None,
    },
    CategorySpec {
        category: Category::Psu,
        exact_filters: &["Brand", "Power_Watt", "Efficiency"],
        contains_filters: &[],
        search_fields: &["Brand", "Model"],
        compat: None,
    },
    CategorySpec {
        category: Category::Case,
        exact_filters: &["Brand", "Color"],
        contains_filters: &["Form_Factor_Support"],
        search_fields: &["Brand", "Model"],
        compat: None,
    },
    CategorySpec {
        category: Category::CpuCooler,
        exact_filters: &["Brand", "Type"],
        contains_filters: &["Socket_Support"],
        search_fields: &["Brand", "Model"],
        compat: Some(CompatRule {
            support_attr: "Socket_Support",
            against: Category::Cpu,
            against_attr: "Socket",
        }),
    },
];
