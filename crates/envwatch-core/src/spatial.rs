//! Spatial math: great-circle distance and point-in-polygon containment.

use crate::models::{Coordinate, PolygonRing};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const EARTH_RADIUS_MI: f64 = 3956.0;

/// Unit a call site wants its great-circle distances in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Kilometers,
    Miles,
}

impl DistanceUnit {
    pub fn earth_radius(&self) -> f64 {
        match self {
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
            DistanceUnit::Miles => EARTH_RADIUS_MI,
        }
    }
}

/// Great-circle distance between two validated coordinates.
pub fn great_circle_distance(a: &Coordinate, b: &Coordinate, unit: DistanceUnit) -> f64 {
    haversine_distance(
        a.latitude(),
        a.longitude(),
        b.latitude(),
        b.longitude(),
        unit.earth_radius(),
    )
}

/// Haversine distance on a sphere of the given radius.
///
/// The haversine term is clamped into [0, 1] so floating-point overshoot
/// near antipodal or identical points cannot produce NaN.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    2.0 * radius * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Ray-casting containment test.
///
/// Casts a ray from `point` toward +longitude and toggles on every edge whose
/// latitude span strictly straddles the point. Points exactly on an edge or
/// vertex have no guaranteed answer.
pub fn point_in_polygon(point: &Coordinate, ring: &PolygonRing) -> bool {
    let vertices = ring.vertices();
    let (x, y) = (point.longitude(), point.latitude());
    let mut inside = false;

    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].longitude(), vertices[i].latitude());
        let (xj, yj) = (vertices[j].longitude(), vertices[j].latitude());
        j = i;

        // Horizontal edges never toggle.
        if yi == yj {
            continue;
        }

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn ring(points: &[(f64, f64)]) -> PolygonRing {
        PolygonRing::new(points.iter().map(|&(lat, lon)| coord(lat, lon)).collect()).unwrap()
    }

    // Convex hexagon around Fall City, WA.
    const HEXAGON: [(f64, f64); 6] = [
        (47.50, -121.90),
        (47.55, -121.80),
        (47.65, -121.80),
        (47.70, -121.90),
        (47.65, -122.00),
        (47.55, -122.00),
    ];

    fn sample_points() -> Vec<Coordinate> {
        let mut points = Vec::new();
        for i in 0..=40 {
            for k in 0..=40 {
                // Offsets keep samples off the hexagon's vertices and edges.
                let lat = 47.40037 + f64::from(i) * 0.0101;
                let lon = -122.10011 + f64::from(k) * 0.00731;
                points.push(coord(lat, lon));
            }
        }
        points
    }

    #[test]
    fn haversine_known_distance() {
        // ~111km per degree of latitude
        let dist = great_circle_distance(
            &coord(0.0, 0.0),
            &coord(1.0, 0.0),
            DistanceUnit::Kilometers,
        );
        assert!((dist - 111.19).abs() < 0.1);
    }

    #[test]
    fn haversine_same_point_is_zero() {
        let a = coord(47.59645, -122.11650);
        assert_eq!(great_circle_distance(&a, &a, DistanceUnit::Kilometers), 0.0);
        assert_eq!(great_circle_distance(&a, &a, DistanceUnit::Miles), 0.0);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = coord(47.415109, -121.587321);
        let b = coord(47.830932, -122.048459);
        let ab = great_circle_distance(&a, &b, DistanceUnit::Kilometers);
        let ba = great_circle_distance(&b, &a, DistanceUnit::Kilometers);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn haversine_antipodal_is_half_circumference() {
        let dist = great_circle_distance(
            &coord(0.0, 0.0),
            &coord(0.0, 180.0),
            DistanceUnit::Kilometers,
        );
        assert!(dist.is_finite());
        assert!((dist - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);

        let poles = great_circle_distance(
            &coord(90.0, 0.0),
            &coord(-90.0, 0.0),
            DistanceUnit::Miles,
        );
        assert!((poles - std::f64::consts::PI * EARTH_RADIUS_MI).abs() < 1e-6);
    }

    #[test]
    fn haversine_triangle_inequality() {
        let points = [
            coord(47.6, -122.3),
            coord(-33.9, 151.2),
            coord(51.5, -0.1),
            coord(0.0, 179.9),
            coord(-89.0, 10.0),
        ];
        for a in &points {
            for b in &points {
                for c in &points {
                    let ab = great_circle_distance(a, b, DistanceUnit::Kilometers);
                    let bc = great_circle_distance(b, c, DistanceUnit::Kilometers);
                    let ac = great_circle_distance(a, c, DistanceUnit::Kilometers);
                    assert!(ac <= ab + bc + 1e-6, "triangle inequality violated");
                }
            }
        }
    }

    #[test]
    fn miles_and_kilometers_use_their_radii() {
        let a = coord(47.0, -122.0);
        let b = coord(48.0, -121.0);
        let km = great_circle_distance(&a, &b, DistanceUnit::Kilometers);
        let mi = great_circle_distance(&a, &b, DistanceUnit::Miles);
        assert!((km / mi - EARTH_RADIUS_KM / EARTH_RADIUS_MI).abs() < 1e-9);
    }

    #[test]
    fn square_contains_center_but_not_outside() {
        let square = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(point_in_polygon(&coord(0.5, 0.5), &square));
        assert!(!point_in_polygon(&coord(1.5, 0.5), &square));
        assert!(!point_in_polygon(&coord(0.5, -0.5), &square));
    }

    #[test]
    fn concave_notch_is_outside() {
        // U shape opening north; the notch between the arms is outside.
        let u = ring(&[
            (0.0, 0.0),
            (0.0, 3.0),
            (3.0, 3.0),
            (3.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
            (3.0, 1.0),
            (3.0, 0.0),
        ]);
        assert!(point_in_polygon(&coord(2.0, 0.5), &u));
        assert!(point_in_polygon(&coord(2.0, 2.5), &u));
        assert!(!point_in_polygon(&coord(2.0, 1.5), &u));
    }

    #[test]
    fn ray_along_horizontal_edge_does_not_toggle() {
        // The ray from (1.0, 0.5) runs along the horizontal edge at latitude 1.0.
        let shape = ring(&[(0.0, 0.0), (0.0, 2.0), (1.0, 2.0), (1.0, 1.0), (2.0, 1.0), (2.0, 0.0)]);
        assert!(point_in_polygon(&coord(1.0, 0.5), &shape));
        assert!(point_in_polygon(&coord(0.5, 0.5), &shape));
        assert!(point_in_polygon(&coord(1.5, 0.5), &shape));
        assert!(!point_in_polygon(&coord(1.5, 1.5), &shape));
    }

    #[test]
    fn convex_interior_true_and_outside_bbox_false() {
        let hex = ring(&HEXAGON);
        // Inner rectangle fully inside the hexagon.
        let inner = |c: &Coordinate| {
            (47.56..=47.64).contains(&c.latitude()) && (-121.98..=-121.82).contains(&c.longitude())
        };
        let outside_bbox = |c: &Coordinate| {
            c.latitude() < 47.50
                || c.latitude() > 47.70
                || c.longitude() < -122.00
                || c.longitude() > -121.80
        };
        for p in sample_points() {
            if inner(&p) {
                assert!(point_in_polygon(&p, &hex), "{p:?} should be inside");
            }
            if outside_bbox(&p) {
                assert!(!point_in_polygon(&p, &hex), "{p:?} should be outside");
            }
        }
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    fn containment_invariant_under_rotation_and_reversal(#[case] shift: usize) {
        let original = ring(&HEXAGON);

        let mut rotated_points = HEXAGON.to_vec();
        rotated_points.rotate_left(shift);
        let rotated = ring(&rotated_points);

        let mut reversed_points = HEXAGON.to_vec();
        reversed_points.reverse();
        let reversed = ring(&reversed_points);

        for p in sample_points() {
            let expected = point_in_polygon(&p, &original);
            assert_eq!(point_in_polygon(&p, &rotated), expected, "rotation changed {p:?}");
            assert_eq!(point_in_polygon(&p, &reversed), expected, "reversal changed {p:?}");
        }
    }
}
