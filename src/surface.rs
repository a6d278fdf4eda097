//! The primitive kernel of each coordinate reference system.
//!
//! Every algorithm in the crate is generic over a [`Surface`]. The two
//! implementations are [`Cartesian`], where edges are straight lines
//! in the plane, and [`Wgs84`], where edges are great-circle arcs
//! between `(lon, lat)` coordinates.
use geo::{
    area::Area,
    bearing::Bearing,
    chamberlain_duquette_area::ChamberlainDuquetteArea,
    haversine_destination::HaversineDestination,
    haversine_distance::HaversineDistance,
    kernels::Orientation,
    line_intersection::{line_intersection, LineIntersection},
    Coordinate, Line, LineString,
};

use crate::{
    geometry::Point,
    spherical,
    utils::{self, EPSILON},
    Crs, Result,
};

mod private {
    pub trait Sealed {}
    impl Sealed for super::Cartesian {}
    impl Sealed for super::Wgs84 {}
}

/// Planar coordinates; edges are straight lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cartesian;

/// Geographic `(lon, lat)` coordinates in degrees; edges are
/// great-circle arcs and distances are in metres.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wgs84;

/// Geometric primitives of one coordinate reference system.
///
/// Sealed: the crate relies on exactly two implementations.
pub trait Surface: private::Sealed + Sync + 'static {
    const CRS: Crs;

    /// Crossing point of two edges, without the shared end point
    /// short-circuit of [`Surface::intersect_edges`].
    fn cross_edges(a: Line<f64>, b: Line<f64>) -> Option<Coordinate<f64>>;

    /// Intersection point of two edges.
    ///
    /// An end point shared exactly by both edges is returned without
    /// computation. Edges that overlap along a stretch, or do not meet,
    /// yield `None`.
    fn intersect_edges(a: Line<f64>, b: Line<f64>) -> Option<Coordinate<f64>> {
        shared_endpoint(a, b).or_else(|| Self::cross_edges(a, b))
    }

    /// Secondary coordinate of a non-vertical edge at sweep position `x`.
    fn y_at(edge: Line<f64>, x: f64) -> f64;

    /// Direction of an edge in degrees, counter-clockwise from east.
    fn slope_angle(edge: Line<f64>) -> f64;

    fn orientation(p: Coordinate<f64>, q: Coordinate<f64>, r: Coordinate<f64>) -> Orientation;

    fn coord_distance(a: Coordinate<f64>, b: Coordinate<f64>) -> f64;

    fn point_distance(a: &Point, b: &Point) -> Result<f64>;

    /// Distance from a coordinate to the closest point of an edge.
    fn edge_distance(p: Coordinate<f64>, edge: Line<f64>) -> f64;

    /// The point at `distance` from the start of `edge`, towards its end.
    fn interpolate(edge: Line<f64>, distance: f64) -> Coordinate<f64>;

    /// Unsigned area enclosed by a closed ring.
    fn ring_area(ring: &[Coordinate<f64>]) -> f64;

    #[inline]
    fn edge_length(edge: Line<f64>) -> f64 {
        Self::coord_distance(edge.start, edge.end)
    }

    /// Angle of `p` seen from `pivot`, as used to order hull candidates.
    #[inline]
    fn polar_angle(pivot: Coordinate<f64>, p: Coordinate<f64>) -> f64 {
        Self::slope_angle(Line::new(pivot, p))
    }
}

fn shared_endpoint(a: Line<f64>, b: Line<f64>) -> Option<Coordinate<f64>> {
    [a.start, a.end]
        .into_iter()
        .find(|p| *p == b.start || *p == b.end)
}

impl Surface for Cartesian {
    const CRS: Crs = Crs::Cartesian;

    fn cross_edges(a: Line<f64>, b: Line<f64>) -> Option<Coordinate<f64>> {
        match line_intersection(a, b)? {
            LineIntersection::SinglePoint { intersection, .. } => Some(intersection),
            LineIntersection::Collinear { .. } => None,
        }
    }

    fn y_at(edge: Line<f64>, x: f64) -> f64 {
        let (s, e) = (edge.start, edge.end);
        if x == s.x || s.x == e.x {
            return s.y;
        }
        if x == e.x {
            return e.y;
        }
        s.y + (e.y - s.y) * (x - s.x) / (e.x - s.x)
    }

    fn slope_angle(edge: Line<f64>) -> f64 {
        edge.dy().atan2(edge.dx()).to_degrees()
    }

    #[inline]
    fn orientation(p: Coordinate<f64>, q: Coordinate<f64>, r: Coordinate<f64>) -> Orientation {
        utils::orient2d(p, q, r)
    }

    fn coord_distance(a: Coordinate<f64>, b: Coordinate<f64>) -> f64 {
        (b - a).x.hypot((b - a).y)
    }

    fn point_distance(a: &Point, b: &Point) -> Result<f64> {
        let diff = b.subtract(a)?;
        Ok(utils::dot_n(diff.coords(), diff.coords()).sqrt())
    }

    fn edge_distance(p: Coordinate<f64>, edge: Line<f64>) -> f64 {
        let delta = edge.delta();
        let len2 = utils::dot(delta, delta);
        if len2 == 0. {
            return Self::coord_distance(p, edge.start);
        }
        let t = (utils::dot(p - edge.start, delta) / len2).clamp(0., 1.);
        Self::coord_distance(p, edge.start + delta * t)
    }

    fn interpolate(edge: Line<f64>, distance: f64) -> Coordinate<f64> {
        let len = Self::edge_length(edge);
        if len == 0. {
            return edge.start;
        }
        edge.start + edge.delta() * (distance / len)
    }

    fn ring_area(ring: &[Coordinate<f64>]) -> f64 {
        geo::Polygon::new(LineString::from(ring.to_vec()), vec![]).unsigned_area()
    }
}

impl Surface for Wgs84 {
    const CRS: Crs = Crs::Wgs84;

    fn cross_edges(a: Line<f64>, b: Line<f64>) -> Option<Coordinate<f64>> {
        spherical::arc_intersection(a, b)
    }

    #[inline]
    fn y_at(edge: Line<f64>, x: f64) -> f64 {
        spherical::lat_at_lon(edge, x)
    }

    fn slope_angle(edge: Line<f64>) -> f64 {
        spherical::normalize_delta(90. - spherical::course(edge.start, edge.end))
    }

    fn orientation(p: Coordinate<f64>, q: Coordinate<f64>, r: Coordinate<f64>) -> Orientation {
        let (p, q, r) = (
            spherical::to_nvector(p),
            spherical::to_nvector(q),
            spherical::to_nvector(r),
        );
        let det = p.cross(&q).dot(&r);
        if det > EPSILON {
            Orientation::CounterClockwise
        } else if det < -EPSILON {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    fn coord_distance(a: Coordinate<f64>, b: Coordinate<f64>) -> f64 {
        geo::Point::from(a).haversine_distance(&geo::Point::from(b))
    }

    fn point_distance(a: &Point, b: &Point) -> Result<f64> {
        a.check_dimension(b)?;
        a.crs().check(b.crs())?;
        Ok(Self::coord_distance(a.coord(), b.coord()))
    }

    #[inline]
    fn edge_distance(p: Coordinate<f64>, edge: Line<f64>) -> f64 {
        spherical::arc_distance(p, edge)
    }

    fn interpolate(edge: Line<f64>, distance: f64) -> Coordinate<f64> {
        if edge.start == edge.end {
            return edge.start;
        }
        let start = geo::Point::from(edge.start);
        let course = start.bearing(geo::Point::from(edge.end));
        start.haversine_destination(course, distance).0
    }

    fn ring_area(ring: &[Coordinate<f64>]) -> f64 {
        geo::Polygon::new(LineString::from(ring.to_vec()), vec![]).chamberlain_duquette_unsigned_area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(a: (f64, f64), b: (f64, f64)) -> Line<f64> {
        Line::new(a, b)
    }

    #[test]
    fn check_shared_endpoint_shortcut() {
        // Collinear edges meeting end to end still report the joint.
        let a = line((0., 0.), (1., 0.));
        let b = line((1., 0.), (2., 0.));
        assert_eq!(Cartesian::intersect_edges(a, b), Some((1., 0.).into()));
        assert_eq!(Wgs84::intersect_edges(a, b), Some((1., 0.).into()));
        assert_eq!(Cartesian::cross_edges(line((0., 0.), (2., 0.)), line((1., 0.), (3., 0.))), None);
    }

    #[test]
    fn check_cartesian_primitives() {
        let p = Cartesian::intersect_edges(line((0., 0.), (2., 2.)), line((0., 2.), (2., 0.))).unwrap();
        assert_relative_eq!(p.x, 1.);
        assert_relative_eq!(p.y, 1.);
        assert_eq!(Cartesian::y_at(line((0., 0.), (4., 2.)), 2.), 1.);
        assert_relative_eq!(Cartesian::slope_angle(line((0., 0.), (1., 1.))), 45.);
        assert_eq!(Cartesian::edge_distance((5., 3.).into(), line((0., 0.), (10., 0.))), 3.);
        assert_eq!(Cartesian::edge_distance((13., 4.).into(), line((0., 0.), (10., 0.))), 5.);
        assert_eq!(Cartesian::interpolate(line((0., 0.), (0., 10.)), 4.), (0., 4.).into());
        assert_eq!(
            Cartesian::ring_area(&[(0., 0.).into(), (0., 2.).into(), (3., 2.).into(), (3., 0.).into(), (0., 0.).into()]),
            6.
        );
        let a = Point::new(Crs::Cartesian, &[0., 0., 0.]).unwrap();
        let b = Point::new(Crs::Cartesian, &[1., 2., 2.]).unwrap();
        assert_eq!(Cartesian::point_distance(&a, &b), Ok(3.));
    }

    #[test]
    fn check_wgs84_primitives() {
        let equator = line((0., 0.), (10., 0.));
        assert_relative_eq!(Wgs84::slope_angle(equator), 0., epsilon = 1e-9);
        assert_relative_eq!(Wgs84::slope_angle(line((0., 0.), (0., 10.))), 90., epsilon = 1e-9);
        assert_eq!(
            Wgs84::orientation((0., 0.).into(), (10., 0.).into(), (10., 10.).into()),
            Orientation::CounterClockwise
        );
        assert_eq!(
            Wgs84::orientation((0., 0.).into(), (10., 0.).into(), (20., 0.).into()),
            Orientation::Collinear
        );

        let one_degree = spherical::EARTH_RADIUS * 1f64.to_radians();
        assert_relative_eq!(
            Wgs84::coord_distance((0., 0.).into(), (1., 0.).into()),
            one_degree,
            max_relative = 1e-9
        );
        let p = Wgs84::interpolate(line((0., 0.), (0., 10.)), one_degree);
        assert_relative_eq!(p.x, 0., epsilon = 1e-9);
        assert_relative_eq!(p.y, 1., epsilon = 1e-9);
    }
}
