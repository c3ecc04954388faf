//! Fieldmap Core - Domain models, error taxonomy, and configuration
//!
//! This crate holds the data model shared by the geometry, classification and
//! reporting crates. It performs no geometry and no I/O beyond loading its
//! own configuration file.

pub mod config;
pub mod error;
pub mod exif;
pub mod models;
pub mod ordering;

pub use error::{FieldmapError, Result};
