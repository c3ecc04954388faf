//! Local-scale distance approximation.
//!
//! Distances are measured on an equirectangular plane centred on the query
//! point: longitude differences are scaled by the cosine of the query
//! latitude, then the distance to each projected ring is plain Euclidean.
//! Regions in a field map span at most a few kilometres, where the error
//! against a great-circle distance is negligible. Longitudes are not wrapped
//! across the antimeridian.

use fieldmap_core::config::DEFAULT_EARTH_RADIUS_KM;
use fieldmap_core::models::{Point, Ring};
use geo::{Distance, Euclidean, Line, LineString};

/// Equirectangular projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equirectangular {
    radius_km: f64,
}

impl Default for Equirectangular {
    fn default() -> Self {
        Self { radius_km: DEFAULT_EARTH_RADIUS_KM }
    }
}

impl Equirectangular {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Plane tangent at `origin`, in kilometres.
    pub fn frame(&self, origin: Point) -> LocalFrame {
        let km_per_degree = self.radius_km * std::f64::consts::PI / 180.0;
        LocalFrame {
            origin,
            kx: km_per_degree * origin.latitude.to_radians().cos(),
            ky: km_per_degree,
        }
    }

    pub fn point_to_point_km(&self, a: Point, b: Point) -> f64 {
        let frame = self.frame(a);
        let (x, y) = frame.project(b.coords());
        Euclidean.distance(&frame.origin_point(), &geo::Point::new(x, y))
    }

    /// Minimum distance from `point` to any edge of any ring.
    ///
    /// Returns `None` when the boundary has no vertices at all.
    pub fn point_to_boundary_km(&self, point: Point, boundary: &[Vec<Ring>]) -> Option<f64> {
        let frame = self.frame(point);
        boundary
            .iter()
            .flatten()
            .filter_map(|ring| frame.ring_distance(ring))
            .min_by(f64::total_cmp)
    }
}

/// A point's local plane: vertices are projected relative to the origin.
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    origin: Point,
    kx: f64,
    ky: f64,
}

impl LocalFrame {
    pub fn project(&self, coord: [f64; 2]) -> (f64, f64) {
        (
            (coord[0] - self.origin.longitude) * self.kx,
            (coord[1] - self.origin.latitude) * self.ky,
        )
    }

    fn origin_point(&self) -> geo::Point<f64> {
        geo::Point::new(0.0, 0.0)
    }

    /// Distance from the origin to the segment `a`-`b`.
    pub fn segment_distance(&self, a: [f64; 2], b: [f64; 2]) -> f64 {
        let line = Line::new(self.project(a), self.project(b));
        Euclidean.distance(&self.origin_point(), &line)
    }

    /// Distance from the origin to a ring, closing it if it is open.
    pub fn ring_distance(&self, ring: &[[f64; 2]]) -> Option<f64> {
        match ring {
            [] => None,
            [only] => {
                let (x, y) = self.project(*only);
                Some(Euclidean.distance(&self.origin_point(), &geo::Point::new(x, y)))
            }
            [first, .., last] => {
                let mut coords: Vec<(f64, f64)> = ring.iter().map(|c| self.project(*c)).collect();
                if first != last {
                    coords.push(self.project(*first));
                }
                let line_string = LineString::from(coords);
                Some(Euclidean.distance(&self.origin_point(), &line_string))
            }
        }
    }
}
