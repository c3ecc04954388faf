//! Labeled map regions.
//!
//! A region is one polygon or multi-polygon feature from the loaded map. Its
//! attributes are resolved once, when the region is constructed, so the rest
//! of the system reads typed fields instead of probing property keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::summary::GroupDimension;

/// Label shown when a region carries neither a code nor a name.
pub const UNKNOWN_LABEL: &str = "Unknown";

const CODE_KEYS: &[&str] = &["Sigla", "sigla"];
const NAME_KEYS: &[&str] = &["name", "Name"];
const BLOCK_KEYS: &[&str] = &["Quadra", "quadra"];
const PLOT_KEYS: &[&str] = &["Canteiro", "canteiro"];

/// Closed or open ring of `[longitude, latitude]` vertices.
pub type Ring = Vec<[f64; 2]>;

/// Position of a region in its source collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RegionId(pub usize);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed attributes of a region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionProperties {
    /// Short region code ("Sigla")
    pub code: Option<String>,
    pub name: Option<String>,
    /// Block number ("Quadra")
    pub block_number: Option<String>,
    /// Plot number ("Canteiro")
    pub plot_number: Option<String>,
}

impl RegionProperties {
    /// Resolve attributes from a GeoJSON `properties` object.
    ///
    /// Each attribute is looked up under a fixed list of key spellings; the
    /// first key holding a non-empty value wins. Strings are trimmed, numbers
    /// and booleans are rendered as text, anything else is ignored.
    pub fn resolve(properties: &Map<String, Value>) -> Self {
        Self {
            code: lookup(properties, CODE_KEYS),
            name: lookup(properties, NAME_KEYS),
            block_number: lookup(properties, BLOCK_KEYS),
            plot_number: lookup(properties, PLOT_KEYS),
        }
    }
}

fn lookup(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| properties.get(*key).and_then(value_text))
}

fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Integral floats print without a fraction, so `5.0` and `5` group together.
fn number_text(n: &serde_json::Number) -> String {
    const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < EXACT_INTEGER_LIMIT => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// One labeled polygon feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,

    /// Polygons of this region; each polygon is an exterior ring followed by
    /// zero or more hole rings.
    pub boundary: Vec<Vec<Ring>>,

    #[serde(flatten)]
    pub properties: RegionProperties,
}

impl Region {
    pub fn new(id: usize, boundary: Vec<Vec<Ring>>, properties: RegionProperties) -> Self {
        Self { id: RegionId(id), boundary, properties }
    }

    /// Single-polygon region without holes.
    pub fn simple(id: usize, ring: Ring, properties: RegionProperties) -> Self {
        Self::new(id, vec![vec![ring]], properties)
    }

    pub fn code(&self) -> Option<&str> {
        self.properties.code.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.name.as_deref()
    }

    /// Display label: the code, else the name, else [`UNKNOWN_LABEL`].
    ///
    /// Every surface that shows a region label (lists, popups, reports,
    /// renamed files) goes through this method.
    pub fn label(&self) -> &str {
        self.code().or_else(|| self.name()).unwrap_or(UNKNOWN_LABEL)
    }

    /// Grouping attribute for a summary dimension.
    pub fn group_value(&self, dimension: GroupDimension) -> Option<&str> {
        match dimension {
            GroupDimension::Block => self.properties.block_number.as_deref(),
            GroupDimension::Plot => self.properties.plot_number.as_deref(),
        }
    }

    pub fn ring_count(&self) -> usize {
        self.boundary.iter().map(Vec::len).sum()
    }
}
