//! Fieldmap Report - Image record store and summary aggregation
//!
//! The store owns the per-image session state and delegates classification
//! to a borrowed [`fieldmap_geo::GeometryIndex`]. The aggregator turns a
//! snapshot of that state into block and plot summary tables.

pub mod aggregate;
pub mod store;

pub use aggregate::ReportAggregator;
pub use store::{ImageStore, IngestBatch, UNSUPPORTED_FORMAT};
