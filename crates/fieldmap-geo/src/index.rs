use crate::distance::Equirectangular;
use crate::validation::validate_regions;
use fieldmap_core::error::{FieldmapError, Result};
use fieldmap_core::models::{Point, Region, RegionId, Ring};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::intersects::Intersects;
use geo::{LineString, MultiPolygon, Polygon, Rect};

/// Region with its precomputed `geo` shape and bounding box
#[derive(Debug, Clone)]
struct IndexedRegion {
    region: Region,
    shape: MultiPolygon<f64>,
    bbox: Option<Rect<f64>>,
}

impl IndexedRegion {
    fn new(region: Region) -> Self {
        let shape = to_multi_polygon(&region.boundary);
        let bbox = shape.bounding_rect();
        Self { region, shape, bbox }
    }

    fn bbox_contains(&self, point: &geo::Point<f64>) -> bool {
        self.bbox.is_some_and(|rect| rect.intersects(point))
    }
}

/// Convert region rings to a `geo` multi-polygon; the first ring of each
/// polygon is the exterior, the rest are holes
fn to_multi_polygon(boundary: &[Vec<Ring>]) -> MultiPolygon<f64> {
    let polygons = boundary
        .iter()
        .map(|rings| {
            let mut rings = rings.iter().map(|ring| LineString::from(ring.clone()));
            let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
            Polygon::new(exterior, rings.collect())
        })
        .collect();
    MultiPolygon::new(polygons)
}

/// Immutable, validated set of regions answering point queries.
///
/// Region order is the load order and is the tie-break for every query.
/// Points on a boundary count as inside; points inside a hole do not.
#[derive(Debug, Clone, Default)]
pub struct GeometryIndex {
    regions: Vec<IndexedRegion>,
    projection: Equirectangular,
}

impl GeometryIndex {
    /// Index with no regions ("no map loaded")
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and index a region set.
    ///
    /// Region ids must equal their position in `regions`. A single invalid
    /// region rejects the whole set.
    pub fn build(regions: Vec<Region>) -> Result<Self> {
        if let Some((position, region)) =
            regions.iter().enumerate().find(|(position, region)| region.id.0 != *position)
        {
            return Err(FieldmapError::RegionSet {
                reason: format!(
                    "Region at position {} has id {}; ids must follow source order",
                    position, region.id
                ),
            });
        }

        validate_regions(&regions)?;

        let regions: Vec<IndexedRegion> = regions.into_iter().map(IndexedRegion::new).collect();
        tracing::info!(regions = regions.len(), "Built geometry index");

        Ok(Self { regions, projection: Equirectangular::default() })
    }

    /// Use a different projection for nearest-boundary distances
    pub fn with_projection(mut self, projection: Equirectangular) -> Self {
        self.projection = projection;
        self
    }

    pub fn projection(&self) -> Equirectangular {
        self.projection
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in load order
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().map(|indexed| &indexed.region)
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0).map(|indexed| &indexed.region)
    }

    /// First region, in load order, whose polygons contain `point`
    pub fn containing_region(&self, point: Point) -> Option<&Region> {
        let probe = geo::Point::new(point.longitude, point.latitude);
        self.regions
            .iter()
            .filter(|indexed| indexed.bbox_contains(&probe))
            .find(|indexed| indexed.shape.intersects(&probe))
            .map(|indexed| &indexed.region)
    }

    /// Region whose boundary edges are closest to `point`, with the distance
    /// in kilometres. Ties go to the earlier region.
    pub fn nearest_region(&self, point: Point) -> Option<(&Region, f64)> {
        let mut nearest: Option<(&Region, f64)> = None;

        for indexed in &self.regions {
            let Some(distance) =
                self.projection.point_to_boundary_km(point, &indexed.region.boundary)
            else {
                continue;
            };

            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((&indexed.region, distance)),
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmap_core::models::RegionProperties;
    use proptest::prelude::*;

    fn square(id: usize, x: f64, y: f64, size: f64, code: &str) -> Region {
        Region::simple(
            id,
            vec![[x, y], [x + size, y], [x + size, y + size], [x, y + size], [x, y]],
            RegionProperties { code: Some(code.to_string()), ..Default::default() },
        )
    }

    #[test]
    fn test_point_inside_convex_polygon() {
        let index = GeometryIndex::build(vec![square(0, 0.0, 0.0, 1.0, "A")]).unwrap();

        let found = index.containing_region(Point::new(0.5, 0.5)).unwrap();
        assert_eq!(found.id, RegionId(0));
        assert!(index.containing_region(Point::new(2.0, 2.0)).is_none());
    }

    #[test]
    fn test_overlap_prefers_load_order() {
        let index = GeometryIndex::build(vec![
            square(0, 0.0, 0.0, 2.0, "FIRST"),
            square(1, 1.0, 1.0, 2.0, "SECOND"),
        ])
        .unwrap();

        for _ in 0..10 {
            let found = index.containing_region(Point::new(1.5, 1.5)).unwrap();
            assert_eq!(found.code(), Some("FIRST"));
        }
        assert_eq!(index.containing_region(Point::new(2.5, 2.5)).unwrap().code(), Some("SECOND"));
    }

    #[test]
    fn test_boundary_counts_as_inside() {
        let index = GeometryIndex::build(vec![square(0, 0.0, 0.0, 1.0, "A")]).unwrap();
        assert!(index.containing_region(Point::new(1.0, 0.5)).is_some());
    }

    #[test]
    fn test_hole_excludes_point() {
        let donut = Region::new(
            0,
            vec![vec![
                vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
                vec![[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0], [1.0, 1.0]],
            ]],
            RegionProperties::default(),
        );
        let index = GeometryIndex::build(vec![donut]).unwrap();

        assert!(index.containing_region(Point::new(0.5, 0.5)).is_some());
        assert!(index.containing_region(Point::new(2.0, 2.0)).is_none());

        // Distance from the hole centre is measured to the hole ring.
        let (_, distance) = index.nearest_region(Point::new(2.0, 2.0)).unwrap();
        let expected = Equirectangular::default().frame(Point::new(2.0, 2.0)).project([3.0, 2.0]).0;
        assert!((distance - expected).abs() < 1e-6);
    }

    #[test]
    fn test_multi_polygon_region() {
        let region = Region::new(
            0,
            vec![
                vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]],
                vec![vec![[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 6.0]]],
            ],
            RegionProperties::default(),
        );
        let index = GeometryIndex::build(vec![region]).unwrap();
        assert!(index.containing_region(Point::new(5.5, 5.5)).is_some());
        assert!(index.containing_region(Point::new(3.0, 3.0)).is_none());
    }

    #[test]
    fn test_nearest_region() {
        let index = GeometryIndex::build(vec![
            square(0, 0.0, 0.0, 0.01, "NEAR"),
            square(1, 0.1, 0.0, 0.01, "FAR"),
        ])
        .unwrap();

        let point = Point::new(0.02, 0.005);
        let (region, distance) = index.nearest_region(point).unwrap();
        assert_eq!(region.code(), Some("NEAR"));
        assert!(distance > 0.0);

        let (_, again) = index.nearest_region(point).unwrap();
        assert_eq!(distance, again);
    }

    #[test]
    fn test_nearest_tie_prefers_earlier() {
        let index = GeometryIndex::build(vec![
            square(0, -1.0, -0.5, 0.5, "LEFT"),
            square(1, 0.5, -0.5, 0.5, "RIGHT"),
        ])
        .unwrap();
        let (region, _) = index.nearest_region(Point::new(0.0, -0.25)).unwrap();
        assert_eq!(region.code(), Some("LEFT"));
    }

    #[test]
    fn test_empty_index() {
        let index = GeometryIndex::empty();
        assert!(index.is_empty());
        assert!(index.containing_region(Point::new(0.0, 0.0)).is_none());
        assert!(index.nearest_region(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_build_rejects_invalid_region() {
        let bad = Region::simple(1, vec![[0.0, 0.0], [1.0, 1.0]], RegionProperties::default());
        let result = GeometryIndex::build(vec![square(0, 0.0, 0.0, 1.0, "A"), bad]);
        assert!(matches!(result, Err(FieldmapError::InvalidGeometry { region: 1, .. })));
    }

    #[test]
    fn test_build_rejects_collapsed_ring() {
        let collapsed = Region::simple(0, vec![[0.0, 0.0]; 4], RegionProperties::default());
        let result = GeometryIndex::build(vec![collapsed]);
        assert!(matches!(result, Err(FieldmapError::InvalidGeometry { region: 0, .. })));
    }

    #[test]
    fn test_bbox_edge_is_a_candidate() {
        let triangle = Region::simple(
            0,
            vec![[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]],
            RegionProperties { code: Some("T".to_string()), ..Default::default() },
        );
        let index = GeometryIndex::build(vec![triangle]).unwrap();

        assert!(index.containing_region(Point::new(2.0, 0.0)).is_some());
        assert!(index.containing_region(Point::new(1.0, 0.0)).is_some());
        assert!(index.containing_region(Point::new(2.0, 2.0)).is_none());
        assert!(index.containing_region(Point::new(2.0001, 0.0)).is_none());
    }

    #[test]
    fn test_build_rejects_out_of_order_ids() {
        let result =
            GeometryIndex::build(vec![square(1, 0.0, 0.0, 1.0, "A"), square(0, 2.0, 2.0, 1.0, "B")]);
        assert!(matches!(result, Err(FieldmapError::RegionSet { .. })));
    }

    proptest! {
        #[test]
        fn prop_square_containment(x in 0.001f64..0.999, y in 0.001f64..0.999, dx in 1.001f64..5.0) {
            let index = GeometryIndex::build(vec![square(0, 0.0, 0.0, 1.0, "A")]).unwrap();

            prop_assert!(index.containing_region(Point::new(x, y)).is_some());
            prop_assert!(index.containing_region(Point::new(dx, y)).is_none());

            let (region, distance) = index.nearest_region(Point::new(dx, y)).unwrap();
            prop_assert_eq!(region.id, RegionId(0));
            prop_assert!(distance > 0.0);
        }
    }

    #[test]
    fn test_region_lookup() {
        let index = GeometryIndex::build(vec![square(0, 0.0, 0.0, 1.0, "A")]).unwrap();
        assert_eq!(index.region(RegionId(0)).unwrap().code(), Some("A"));
        assert!(index.region(RegionId(1)).is_none());
        assert_eq!(index.regions().count(), 1);
    }
}
