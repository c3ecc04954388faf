use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fieldmap - Classify geotagged photos against a region map
#[derive(Parser, Debug)]
#[command(name = "fieldmap")]
#[command(about = "Classify geotagged photos against a region map", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./fieldmap.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// GeoJSON region map, overriding the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub map: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the regions of the loaded map
    Regions,

    /// Classify a single point
    Locate(LocateArgs),

    /// Ingest metadata sidecars and classify each photo
    Classify(IngestArgs),

    /// Ingest metadata sidecars and print block and plot summaries
    Summarize(IngestArgs),

    /// Show configuration values and where they came from
    Config,
}

#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

#[derive(Parser, Debug)]
pub struct IngestArgs {
    /// JSON metadata sidecars, one per photo, in selection order
    #[arg(required = true)]
    pub sidecars: Vec<PathBuf>,

    /// Maximum number of sidecars read at once
    #[arg(long, default_value = "8")]
    pub concurrency: usize,
}
