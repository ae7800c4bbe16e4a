use geo::{BoundingRect, LineString, Polygon};

use super::Bounds;

/// A team's claimed area: ordered (lat, lon) vertices, implicitly closed
///
/// Containment uses the crossing-number (even-odd) rule with a ray cast from
/// the query point towards increasing longitude along its latitude.
///
/// Points lying exactly on an edge get whatever the crossing arithmetic
/// yields: edges are half-open in latitude, so a point on a left or bottom
/// edge usually counts as inside and one on a right or top edge as outside.
/// Callers must not rely on either outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Territory {
    points: Vec<(f64, f64)>,
}

impl Territory {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A territory needs at least 3 vertices to enclose anything
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    /// Test whether `point` lies inside the territory
    ///
    /// Degenerate territories (fewer than 3 vertices) never contain a point.
    pub fn contains(&self, point: (f64, f64)) -> bool {
        if !self.is_valid() {
            return false;
        }

        let (lat, lon) = point;
        let n = self.points.len();
        let mut crossings = 0usize;

        for i in 0..n {
            let (a_lat, a_lon) = self.points[i];
            let (b_lat, b_lon) = self.points[(i + 1) % n];

            // Exactly one endpoint strictly above the ray; also rules out
            // horizontal edges, so the division below is safe.
            if (a_lat > lat) != (b_lat > lat) {
                let cross_lon = (b_lon - a_lon) * (lat - a_lat) / (b_lat - a_lat) + a_lon;
                if lon < cross_lon {
                    crossings += 1;
                }
            }
        }

        crossings % 2 == 1
    }

    /// Mean of all vertex latitudes and longitudes
    ///
    /// Used for label placement only. This is not the area-weighted centroid
    /// and can fall outside a concave territory.
    pub fn center(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }

        let n = self.points.len() as f64;
        let (sum_lat, sum_lon) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sl, so), &(lat, lon)| (sl + lat, so + lon));

        Some((sum_lat / n, sum_lon / n))
    }

    pub fn bounding_box(&self) -> Option<Bounds> {
        self.to_line_string().bounding_rect().map(Bounds::from)
    }

    /// Convert to a geo polygon (x = lon, y = lat)
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        Polygon::new(self.to_line_string(), Vec::new())
    }

    fn to_line_string(&self) -> LineString<f64> {
        self.points
            .iter()
            .map(|&(lat, lon)| geo::coord! { x: lon, y: lat })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains;

    fn square() -> Territory {
        Territory::new(vec![(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)])
    }

    #[test]
    fn test_convex_contains_interior_point() {
        assert!(square().contains((1.0, 1.0)));
        assert!(square().contains((0.5, 1.7)));
    }

    #[test]
    fn test_point_outside_bounding_box() {
        let sq = square();
        assert!(!sq.contains((3.0, 1.0)));
        assert!(!sq.contains((1.0, -5.0)));
        assert!(!sq.contains((-0.1, -0.1)));
    }

    #[test]
    fn test_disjoint_territories() {
        let a = square();
        let b = Territory::new(vec![
            (10.0, 10.0),
            (10.0, 12.0),
            (12.0, 12.0),
            (12.0, 10.0),
        ]);
        let point = (1.0, 1.0);

        assert!(a.contains(point));
        assert!(!b.contains(point));
    }

    #[test]
    fn test_concave_notch_is_outside() {
        // U shape opening towards high latitude
        let u = Territory::new(vec![
            (0.0, 0.0),
            (0.0, 3.0),
            (3.0, 3.0),
            (3.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
            (3.0, 1.0),
            (3.0, 0.0),
        ]);

        assert!(u.contains((0.5, 1.5)));
        assert!(u.contains((2.0, 0.5)));
        assert!(u.contains((2.0, 2.5)));
        assert!(!u.contains((2.0, 1.5)));
    }

    #[test]
    fn test_explicitly_closed_ring() {
        let closed = Territory::new(vec![
            (0.0, 0.0),
            (0.0, 2.0),
            (2.0, 2.0),
            (2.0, 0.0),
            (0.0, 0.0),
        ]);
        assert!(closed.contains((1.0, 1.0)));
        assert!(!closed.contains((1.0, 3.0)));
    }

    #[test]
    fn test_degenerate_never_contains() {
        let empty = Territory::new(Vec::new());
        let single = Territory::new(vec![(1.0, 1.0)]);
        let segment = Territory::new(vec![(0.0, 0.0), (2.0, 2.0)]);

        for t in [&empty, &single, &segment] {
            assert!(!t.is_valid());
            assert!(!t.contains((1.0, 1.0)));
            assert!(!t.contains((0.0, 0.0)));
        }
    }

    #[test]
    fn test_center_of_square() {
        assert_eq!(square().center(), Some((1.0, 1.0)));
    }

    #[test]
    fn test_center_is_vertex_mean() {
        // Extra vertex on one side pulls the mean; an area centroid would not move
        let t = Territory::new(vec![
            (0.0, 0.0),
            (0.0, 1.0),
            (0.0, 2.0),
            (2.0, 2.0),
            (2.0, 0.0),
        ]);
        let (lat, lon) = t.center().unwrap();
        assert!((lat - 0.8).abs() < 1e-9);
        assert!((lon - 1.0).abs() < 1e-9);
        assert!(Territory::new(Vec::new()).center().is_none());
    }

    #[test]
    fn test_bounding_box() {
        let bounds = square().bounding_box().unwrap();
        assert_eq!(bounds.min_lat, 0.0);
        assert_eq!(bounds.max_lat, 2.0);
        assert_eq!(bounds.min_lon, 0.0);
        assert_eq!(bounds.max_lon, 2.0);
        assert!(Territory::new(Vec::new()).bounding_box().is_none());
    }

    #[test]
    fn test_agrees_with_geo_on_interior_points() {
        let t = Territory::new(vec![
            (55.74, 37.58),
            (55.76, 37.61),
            (55.75, 37.66),
            (55.72, 37.64),
            (55.73, 37.60),
        ]);
        let poly = t.to_geo_polygon();

        let samples = [
            (55.745, 37.62),
            (55.735, 37.63),
            (55.70, 37.60),
            (55.77, 37.66),
            (55.75, 37.59),
        ];
        for (lat, lon) in samples {
            let expected = poly.contains(&geo::Point::new(lon, lat));
            assert_eq!(t.contains((lat, lon)), expected, "({lat}, {lon})");
        }
    }
}
