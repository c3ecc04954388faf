//! Result of testing one point against a region set.

use super::region::RegionId;
use serde::{Deserialize, Serialize};

/// Where a point fell relative to the loaded regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationStatus {
    /// The point lies inside `region`.
    Inside { region: RegionId },
    /// The point lies outside every region; `region` has the closest boundary.
    OutsideNearest { region: RegionId, distance_km: f64 },
    /// No regions are loaded.
    OutsideNoRegions,
}

/// Immutable classification of one point. A new point produces a new result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub status: LocationStatus,
    /// Label of the matched region, `None` when no region matched.
    pub label: Option<String>,
}

impl ClassificationResult {
    pub fn inside(region: RegionId, label: impl Into<String>) -> Self {
        Self { status: LocationStatus::Inside { region }, label: Some(label.into()) }
    }

    pub fn outside_nearest(region: RegionId, distance_km: f64, label: impl Into<String>) -> Self {
        Self {
            status: LocationStatus::OutsideNearest { region, distance_km },
            label: Some(label.into()),
        }
    }

    pub fn outside_no_regions() -> Self {
        Self { status: LocationStatus::OutsideNoRegions, label: None }
    }

    /// The matched region, inside or nearest.
    pub fn region(&self) -> Option<RegionId> {
        match self.status {
            LocationStatus::Inside { region } | LocationStatus::OutsideNearest { region, .. } => {
                Some(region)
            }
            LocationStatus::OutsideNoRegions => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_inside(&self) -> bool {
        matches!(self.status, LocationStatus::Inside { .. })
    }

    /// Distance to the nearest boundary; zero when inside, `None` without regions.
    pub fn distance_km(&self) -> Option<f64> {
        match self.status {
            LocationStatus::Inside { .. } => Some(0.0),
            LocationStatus::OutsideNearest { distance_km, .. } => Some(distance_km),
            LocationStatus::OutsideNoRegions => None,
        }
    }

    /// Human-readable status line.
    pub fn describe(&self) -> String {
        match (&self.status, self.label()) {
            (LocationStatus::Inside { .. }, _) => "Inside region".to_string(),
            (LocationStatus::OutsideNearest { distance_km, .. }, Some(label)) => {
                format!("Outside region (nearest: {}, {:.3} km)", label, distance_km)
            }
            (LocationStatus::OutsideNearest { distance_km, .. }, None) => {
                format!("Outside region ({:.3} km)", distance_km)
            }
            (LocationStatus::OutsideNoRegions, _) => "No map data loaded".to_string(),
        }
    }
}
