//! Error types for Fieldmap

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldmapError {
    // Region set errors
    #[error("Invalid geometry in region {region}: {reason}")]
    InvalidGeometry { region: usize, reason: String },

    #[error("Unusable region set: {reason}")]
    RegionSet { reason: String },

    // Point errors
    #[error("Invalid point: latitude {latitude}, longitude {longitude} must be finite")]
    InvalidPoint { latitude: f64, longitude: f64 },

    // Record errors
    #[error("Image record not found: {id}")]
    RecordNotFound { id: usize },

    #[error("Invalid metadata for {filename}: {reason}")]
    Metadata { filename: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FieldmapError>;
