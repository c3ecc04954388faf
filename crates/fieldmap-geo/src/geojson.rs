//! GeoJSON region-set reader

use std::fs;
use std::path::Path;

use fieldmap_core::error::{FieldmapError, Result};
use fieldmap_core::models::{Region, RegionProperties, Ring};
use geojson::{GeoJson, Geometry, Value};

use crate::distance::Equirectangular;
use crate::index::GeometryIndex;

/// Reads polygon features from GeoJSON into regions.
///
/// Each feature becomes one region whose id is its position in the
/// collection. Every feature must carry a Polygon, MultiPolygon, or a
/// GeometryCollection of those; anything else rejects the whole set.
pub struct GeoJsonRegionReader;

impl GeoJsonRegionReader {
    pub fn supported_extensions(&self) -> &[&str] {
        &["json", "geojson"]
    }

    pub fn format_name(&self) -> &str {
        "GeoJSON"
    }

    /// Read regions from a GeoJSON file
    pub fn read(&self, path: &Path) -> Result<Vec<Region>> {
        let content = fs::read_to_string(path)?;
        let regions = self.parse(&content)?;
        tracing::info!(path = %path.display(), regions = regions.len(), "Loaded region set");
        Ok(regions)
    }

    /// Parse regions from GeoJSON text
    pub fn parse(&self, content: &str) -> Result<Vec<Region>> {
        let geojson: GeoJson = content.parse().map_err(|e| FieldmapError::RegionSet {
            reason: format!("Failed to parse GeoJSON: {}", e),
        })?;
        self.extract_regions(&geojson)
    }

    /// Extract regions from a parsed document
    pub fn extract_regions(&self, geojson: &GeoJson) -> Result<Vec<Region>> {
        match geojson {
            GeoJson::FeatureCollection(fc) => fc
                .features
                .iter()
                .enumerate()
                .map(|(idx, feature)| self.convert_feature(feature, idx))
                .collect(),
            GeoJson::Feature(feature) => Ok(vec![self.convert_feature(feature, 0)?]),
            GeoJson::Geometry(geometry) => {
                Ok(vec![Region::new(0, polygons_of(geometry, 0)?, RegionProperties::default())])
            }
        }
    }

    fn convert_feature(&self, feature: &geojson::Feature, idx: usize) -> Result<Region> {
        let geometry = feature.geometry.as_ref().ok_or_else(|| FieldmapError::InvalidGeometry {
            region: idx,
            reason: "Feature has no geometry".to_string(),
        })?;

        let properties = feature
            .properties
            .as_ref()
            .map(RegionProperties::resolve)
            .unwrap_or_default();

        Ok(Region::new(idx, polygons_of(geometry, idx)?, properties))
    }
}

/// Validate and index the region set stored at `path`
pub fn load_index(path: &Path, projection: Equirectangular) -> Result<GeometryIndex> {
    let regions = GeoJsonRegionReader.read(path)?;
    Ok(GeometryIndex::build(regions)?.with_projection(projection))
}

/// Polygons of a geometry as rings of `[lon, lat]` vertices
fn polygons_of(geometry: &Geometry, region: usize) -> Result<Vec<Vec<Ring>>> {
    match &geometry.value {
        Value::Polygon(rings) => Ok(vec![convert_rings(rings, region)?]),
        Value::MultiPolygon(polygons) => {
            polygons.iter().map(|rings| convert_rings(rings, region)).collect()
        }
        Value::GeometryCollection(members) => {
            let mut polygons = Vec::new();
            for member in members {
                polygons.extend(polygons_of(member, region)?);
            }
            Ok(polygons)
        }
        other => Err(FieldmapError::InvalidGeometry {
            region,
            reason: format!("Expected polygonal geometry, found {}", geometry_kind(other)),
        }),
    }
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn convert_rings(rings: &[Vec<Vec<f64>>], region: usize) -> Result<Vec<Ring>> {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .map(|position| match position.as_slice() {
                    [x, y, ..] => Ok([*x, *y]),
                    _ => Err(FieldmapError::InvalidGeometry {
                        region,
                        reason: format!(
                            "Position must have at least 2 coordinates, found {}",
                            position.len()
                        ),
                    }),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_core::models::RegionId;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                },
                "properties": { "Sigla": "AB", "name": "Alpha", "Quadra": 5 }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[2.0, 0.0], [3.0, 0.0], [3.0, 1.0], [2.0, 0.0]]],
                        [[[4.0, 0.0], [5.0, 0.0], [5.0, 1.0], [4.0, 0.0]]]
                    ]
                },
                "properties": { "sigla": "CD", "canteiro": "12" }
            }
        ]
    }"#;

    #[test]
    fn test_feature_collection() {
        let regions = GeoJsonRegionReader.parse(COLLECTION).unwrap();

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].id, RegionId(0));
        assert_eq!(regions[0].code(), Some("AB"));
        assert_eq!(regions[0].name(), Some("Alpha"));
        assert_eq!(regions[0].properties.block_number.as_deref(), Some("5"));
        assert_eq!(regions[1].id, RegionId(1));
        assert_eq!(regions[1].boundary.len(), 2);
        assert_eq!(regions[1].properties.plot_number.as_deref(), Some("12"));
    }

    #[test]
    fn test_single_feature_without_properties() {
        let regions = GeoJsonRegionReader
            .parse(
                r#"{
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                    },
                    "properties": null
                }"#,
            )
            .unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].label(), "Unknown");
    }

    #[test]
    fn test_point_feature_rejected() {
        let result = GeoJsonRegionReader.parse(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                    "properties": {}
                }]
            }"#,
        );
        assert!(matches!(result, Err(FieldmapError::InvalidGeometry { region: 0, .. })));
    }

    #[test]
    fn test_null_geometry_rejected() {
        let result = GeoJsonRegionReader.parse(
            r#"{
                "type": "FeatureCollection",
                "features": [{ "type": "Feature", "geometry": null, "properties": {} }]
            }"#,
        );
        assert!(matches!(result, Err(FieldmapError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let result = GeoJsonRegionReader.parse("not geojson");
        assert!(matches!(result, Err(FieldmapError::RegionSet { .. })));
    }

    #[test]
    fn test_load_index_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.geojson");
        fs::write(&path, COLLECTION).unwrap();

        let index = load_index(&path, Equirectangular::default()).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_supported_extensions() {
        assert_eq!(GeoJsonRegionReader.supported_extensions(), &["json", "geojson"]);
        assert_eq!(GeoJsonRegionReader.format_name(), "GeoJSON");
    }
}
