//! Integration tests for layered configuration
//!
//! Precedence: CLI arguments > Environment variables > Config file > Defaults

use fieldmap_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var("FIELDMAP_MAP");
    env::remove_var("FIELDMAP_COMMENT_LIMIT");
    env::remove_var("FIELDMAP_EARTH_RADIUS_KM");
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let file = config_file(
        r#"
map_path = "from-file.geojson"
comment_limit = 100
"#,
    );

    env::set_var("FIELDMAP_MAP", "from-env.geojson");

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.map_path.value, PathBuf::from("from-env.geojson"));
    assert_eq!(config.map_path.source, ConfigSource::Environment);
    assert_eq!(config.comment_limit.value, 100);
    assert_eq!(config.comment_limit.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var("FIELDMAP_COMMENT_LIMIT", "250");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    assert_eq!(config.comment_limit.value, 250);

    config.update_from_cli(CliConfigOverrides {
        comment_limit: Some(42),
        ..Default::default()
    });

    assert_eq!(config.comment_limit.value, 42);
    assert_eq!(config.comment_limit.source, ConfigSource::Cli);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();
    env::set_var("FIELDMAP_COMMENT_LIMIT", "lots");
    env::set_var("FIELDMAP_EARTH_RADIUS_KM", "-3");
    env::set_var("FIELDMAP_MAP", "   ");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.comment_limit.value, 500);
    assert_eq!(config.comment_limit.source, ConfigSource::Default);
    assert_eq!(config.earth_radius_km.source, ConfigSource::Default);
    assert_eq!(config.map_path.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_file_does_not_override_env() {
    clear_env();
    env::set_var("FIELDMAP_EARTH_RADIUS_KM", "6378.137");

    let file = config_file("earth_radius_km = 6000.0");

    // Env loaded first, file second: file has lower precedence and must not win.
    let config = LayeredConfig::with_defaults().load_from_env().load_from_file(file.path()).unwrap();

    assert_eq!(config.earth_radius_km.value, 6378.137);
    assert_eq!(config.earth_radius_km.source, ConfigSource::Environment);

    clear_env();
}

#[test]
fn test_malformed_toml_is_an_error() {
    let file = config_file("map_path = [unterminated");
    assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
}
