//! Point classification against a [`GeometryIndex`].

use crate::index::GeometryIndex;
use fieldmap_core::error::Result;
use fieldmap_core::models::{ClassificationResult, Point, Region};

/// Label for a region: its code, else its name, else `"Unknown"`.
pub fn derive_label(region: &Region) -> String {
    region.label().to_string()
}

/// Classifies points against one borrowed region index.
#[derive(Debug, Clone, Copy)]
pub struct LocationClassifier<'a> {
    index: &'a GeometryIndex,
}

impl<'a> LocationClassifier<'a> {
    pub fn new(index: &'a GeometryIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a GeometryIndex {
        self.index
    }

    /// Classify one point.
    ///
    /// An empty index yields `OutsideNoRegions`. Non-finite coordinates are
    /// rejected with `InvalidPoint`.
    pub fn classify(&self, point: Point) -> Result<ClassificationResult> {
        let point = point.validated()?;

        if self.index.is_empty() {
            return Ok(ClassificationResult::outside_no_regions());
        }

        if let Some(region) = self.index.containing_region(point) {
            tracing::debug!(region = %region.id, label = region.label(), "Point inside region");
            return Ok(ClassificationResult::inside(region.id, derive_label(region)));
        }

        match self.index.nearest_region(point) {
            Some((region, distance_km)) => {
                tracing::debug!(
                    region = %region.id,
                    label = region.label(),
                    distance_km,
                    "Point outside all regions"
                );
                Ok(ClassificationResult::outside_nearest(region.id, distance_km, derive_label(region)))
            }
            None => {
                // Unreachable for a validated, non-empty index.
                debug_assert!(false, "non-empty index produced no nearest region");
                tracing::error!(
                    regions = self.index.len(),
                    "No nearest region found in a non-empty index"
                );
                Ok(ClassificationResult::outside_no_regions())
            }
        }
    }
}
