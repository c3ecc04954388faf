//! Geographic point in WGS 84 degrees.

use crate::error::{FieldmapError, Result};
use serde::{Deserialize, Serialize};

/// A (longitude, latitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    /// Build a point from the latitude-first order used by EXIF and map widgets.
    pub fn from_lat_lon(latitude: f64, longitude: f64) -> Self {
        Self::new(longitude, latitude)
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }

    /// Reject non-finite coordinates instead of letting them act as (0, 0).
    pub fn validated(self) -> Result<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(FieldmapError::InvalidPoint { latitude: self.latitude, longitude: self.longitude })
        }
    }

    /// Coordinates as `[x, y]`, the layout used by GeoJSON positions.
    pub fn coords(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lon_order() {
        let p = Point::from_lat_lon(-22.5, -47.06);
        assert_eq!(p.longitude, -47.06);
        assert_eq!(p.latitude, -22.5);
        assert_eq!(p.coords(), [-47.06, -22.5]);
    }

    #[test]
    fn test_validated_rejects_non_finite() {
        assert!(Point::new(1.0, 2.0).validated().is_ok());
        assert!(matches!(
            Point::new(f64::NAN, 2.0).validated(),
            Err(FieldmapError::InvalidPoint { .. })
        ));
        assert!(Point::new(1.0, f64::INFINITY).validated().is_err());
    }
}
