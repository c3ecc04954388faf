//! EXIF-derived metadata handed over by the extraction step.

use super::point::Point;
use super::status::WorkStatus;
use crate::error::{FieldmapError, Result};
use crate::exif::dms_to_decimal;
use serde::{Deserialize, Serialize};

/// Raw per-file metadata, keyed the way EXIF readers report it.
///
/// GPS may arrive either as DMS triples with hemisphere references or as
/// already-converted decimal degrees. The trailing annotation fields are
/// optional and only used when replaying a saved session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub filename: String,

    #[serde(default)]
    pub size: u64,

    #[serde(rename = "type", default)]
    pub mime_type: String,

    #[serde(rename = "Make", default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,

    #[serde(rename = "Model", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(rename = "DateTime", default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    #[serde(rename = "GPSLatitude", default, skip_serializing_if = "Option::is_none")]
    pub gps_latitude: Option<Vec<f64>>,

    #[serde(rename = "GPSLatitudeRef", default, skip_serializing_if = "Option::is_none")]
    pub gps_latitude_ref: Option<String>,

    #[serde(rename = "GPSLongitude", default, skip_serializing_if = "Option::is_none")]
    pub gps_longitude: Option<Vec<f64>>,

    #[serde(rename = "GPSLongitudeRef", default, skip_serializing_if = "Option::is_none")]
    pub gps_longitude_ref: Option<String>,

    #[serde(rename = "GPSAltitude", default, skip_serializing_if = "Option::is_none")]
    pub gps_altitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(rename = "workStatus", default, skip_serializing_if = "Option::is_none")]
    pub work_status: Option<WorkStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl RawMetadata {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self { filename: filename.into(), mime_type: mime_type.into(), ..Default::default() }
    }

    /// Attach decimal-degree coordinates.
    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Attach DMS coordinates the way EXIF stores them.
    pub fn with_dms(
        mut self,
        latitude: [f64; 3],
        latitude_ref: &str,
        longitude: [f64; 3],
        longitude_ref: &str,
    ) -> Self {
        self.gps_latitude = Some(latitude.to_vec());
        self.gps_latitude_ref = Some(latitude_ref.to_string());
        self.gps_longitude = Some(longitude.to_vec());
        self.gps_longitude_ref = Some(longitude_ref.to_string());
        self
    }

    /// GPS position, if the metadata carries one.
    ///
    /// Decimal fields take precedence. DMS is used only when both triples and
    /// both references are present. Malformed triples and non-finite results
    /// are errors.
    pub fn gps_point(&self) -> Result<Option<Point>> {
        let point = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Point::from_lat_lon(latitude, longitude),
            _ => match (
                &self.gps_latitude,
                &self.gps_latitude_ref,
                &self.gps_longitude,
                &self.gps_longitude_ref,
            ) {
                (Some(lat), Some(lat_ref), Some(lon), Some(lon_ref)) => Point::from_lat_lon(
                    self.dms_component(lat, lat_ref, "GPSLatitude")?,
                    self.dms_component(lon, lon_ref, "GPSLongitude")?,
                ),
                _ => return Ok(None),
            },
        };

        if !point.is_finite() {
            return Err(FieldmapError::Metadata {
                filename: self.filename.clone(),
                reason: "GPS coordinates are not finite".to_string(),
            });
        }
        Ok(Some(point))
    }

    fn dms_component(&self, dms: &[f64], reference: &str, tag: &str) -> Result<f64> {
        match dms {
            [degrees, minutes, seconds] => Ok(dms_to_decimal(*degrees, *minutes, *seconds, reference)),
            _ => Err(FieldmapError::Metadata {
                filename: self.filename.clone(),
                reason: format!("{} must have 3 components, found {}", tag, dms.len()),
            }),
        }
    }
}
