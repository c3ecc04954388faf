//! Configuration and map loading for CLI commands

use anyhow::{Context, Result};
use fieldmap_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use fieldmap_geo::geojson::load_index;
use fieldmap_geo::{Equirectangular, GeometryIndex};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "fieldmap.toml";

/// Load layered configuration with CLI overrides.
///
/// An explicit `--config` file must exist; the default one is optional.
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match &cli.config {
        Some(path) => config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
        None => config
            .load_from_optional_file(Path::new(DEFAULT_CONFIG_FILE))
            .context("Failed to load configuration file")?,
    };

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        map_path: cli.map.clone(),
        ..Default::default()
    });

    Ok(config)
}

/// Load the configured region map.
///
/// A missing map at the default location yields an empty index ("no map
/// loaded"); a map that was asked for explicitly must exist.
pub fn load_map(config: &LayeredConfig) -> Result<(PathBuf, GeometryIndex)> {
    let path = config.map_path.value.clone();
    let projection = Equirectangular::new(config.earth_radius_km.value);

    if config.map_path.source == ConfigSource::Default && !path.exists() {
        tracing::warn!("No map at {}; classifying without regions", path.display());
        return Ok((path, GeometryIndex::empty().with_projection(projection)));
    }

    let index = load_index(&path, projection)
        .with_context(|| format!("Failed to load region map {}", path.display()))?;
    Ok((path, index))
}
