use fieldmap_core::error::{FieldmapError, Result};
use fieldmap_core::models::{Region, Ring};

/// Minimum number of distinct vertices in a ring.
pub const MIN_RING_VERTICES: usize = 3;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// Turn the first error into an `InvalidGeometry` for `region`
    pub fn into_result(self, region: usize) -> Result<()> {
        match self.errors.into_iter().next() {
            None => Ok(()),
            Some(error) => Err(FieldmapError::InvalidGeometry {
                region,
                reason: format!("{}: {}", error.location, error.reason),
            }),
        }
    }
}

/// Validate the boundary of a region.
///
/// A region needs at least one polygon, every polygon needs an exterior
/// ring, and every ring (holes included) needs at least three distinct
/// vertices with finite coordinates.
pub fn validate_region(region: &Region) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if region.boundary.is_empty() {
        result.add_error("Region".to_string(), "Region has no polygon rings".to_string());
        return result;
    }

    for (p, polygon) in region.boundary.iter().enumerate() {
        if polygon.is_empty() {
            result.add_error(format!("Polygon[{}]", p), "Polygon has no rings".to_string());
            continue;
        }

        for (r, ring) in polygon.iter().enumerate() {
            let location = if r == 0 {
                format!("Polygon[{}] exterior", p)
            } else {
                format!("Polygon[{}] interior[{}]", p, r - 1)
            };
            validate_ring(ring, location, &mut result);
        }
    }

    result
}

fn validate_ring(ring: &Ring, location: String, result: &mut ValidationResult) {
    if let Some(i) = ring.iter().position(|c| !c[0].is_finite() || !c[1].is_finite()) {
        result.add_error(location, format!("Vertex {} has non-finite coordinates", i));
        return;
    }

    let vertices = distinct_vertex_count(ring);
    if vertices < MIN_RING_VERTICES {
        result.add_error(
            location,
            format!("Ring must have at least {} vertices, found {}", MIN_RING_VERTICES, vertices),
        );
    }
}

/// Number of unique vertices in a ring. Repeats, including the closing
/// vertex, count once.
fn distinct_vertex_count(ring: &Ring) -> usize {
    let mut seen: Vec<[f64; 2]> = Vec::with_capacity(ring.len());
    for vertex in ring {
        if !seen.contains(vertex) {
            seen.push(*vertex);
        }
    }
    seen.len()
}

/// Validate every region, failing on the first invalid one
pub fn validate_regions(regions: &[Region]) -> Result<()> {
    for region in regions {
        validate_region(region).into_result(region.id.0)?;
    }
    Ok(())
}
