//! Fieldmap Geo - Region index, point classification, and region-set loading
//!
//! This crate answers the geometric questions: which region contains a
//! point, which region boundary is closest when none does, and how a
//! GeoJSON document becomes a validated region set.

pub mod classifier;
pub mod distance;
pub mod geojson;
pub mod index;
pub mod validation;

pub use classifier::{derive_label, LocationClassifier};
pub use distance::Equirectangular;
pub use index::GeometryIndex;
