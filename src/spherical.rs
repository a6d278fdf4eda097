//! Great-circle helpers over unit n-vectors.
//!
//! Coordinates are `(longitude, latitude)` in degrees. Edges between
//! two coordinates are the minor great-circle arc joining them.
use geo::{bearing::Bearing, Coordinate, Line};
use nalgebra::Vector3;

use crate::utils::EPSILON;

/// Mean earth radius in metres, as used by the haversine formulas.
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// Unit vector of a `(lon, lat)` coordinate.
pub fn to_nvector(c: Coordinate<f64>) -> Vector3<f64> {
    let (lon, lat) = (c.x.to_radians(), c.y.to_radians());
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Inverse of [`to_nvector`]; the vector need not be normalized.
pub fn from_nvector(v: &Vector3<f64>) -> Coordinate<f64> {
    let lat = v.z.atan2((v.x * v.x + v.y * v.y).sqrt());
    let lon = v.y.atan2(v.x);
    Coordinate {
        x: lon.to_degrees(),
        y: lat.to_degrees(),
    }
}

/// Whether `c`, on the great circle with unit normal `n`, lies on
/// the minor arc from `u` to `v`.
fn on_arc(u: &Vector3<f64>, v: &Vector3<f64>, n: &Vector3<f64>, c: &Vector3<f64>) -> bool {
    u.cross(c).dot(n) >= -EPSILON && c.cross(v).dot(n) >= -EPSILON
}

/// Unit normal of the great circle through an arc, or `None` for a
/// degenerate arc.
fn arc_normal(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<Vector3<f64>> {
    let n = a.cross(b);
    if n.norm() < EPSILON {
        None
    } else {
        Some(n.normalize())
    }
}

/// Intersection point of two great-circle arcs.
///
/// Returns `None` for arcs that do not cross, and for arcs on the same
/// great circle.
pub fn arc_intersection(a: Line<f64>, b: Line<f64>) -> Option<Coordinate<f64>> {
    let (a0, a1) = (to_nvector(a.start), to_nvector(a.end));
    let (b0, b1) = (to_nvector(b.start), to_nvector(b.end));
    let p = arc_normal(&a0, &a1)?;
    let q = arc_normal(&b0, &b1)?;

    let c = p.cross(&q);
    if c.norm() < EPSILON {
        return None;
    }
    let c = c.normalize();
    [c, -c]
        .iter()
        .find(|c| on_arc(&a0, &a1, &p, c) && on_arc(&b0, &b1, &q, c))
        .map(from_nvector)
}

/// Latitude of the arc at longitude `lon`.
///
/// Exact at the end points. A meridian arc yields its start latitude.
pub fn lat_at_lon(arc: Line<f64>, lon: f64) -> f64 {
    let (s, e) = (arc.start, arc.end);
    if lon == s.x || s.x == e.x {
        return s.y;
    }
    if lon == e.x {
        return e.y;
    }
    let (l1, l2, l) = (s.x.to_radians(), e.x.to_radians(), lon.to_radians());
    let (t1, t2) = (s.y.to_radians().tan(), e.y.to_radians().tan());
    ((t1 * (l2 - l).sin() + t2 * (l - l1).sin()) / (l2 - l1).sin())
        .atan()
        .to_degrees()
}

/// Initial course from `a` to `b`, in degrees clockwise from north.
#[inline]
pub fn course(a: Coordinate<f64>, b: Coordinate<f64>) -> f64 {
    geo::Point::from(a).bearing(geo::Point::from(b))
}

/// Wraps an angle difference into `(-180, 180]`.
pub fn normalize_delta(delta: f64) -> f64 {
    let mut d = delta % 360.;
    if d > 180. {
        d -= 360.;
    } else if d <= -180. {
        d += 360.;
    }
    d
}

/// Total turning of a closed ring, in degrees.
///
/// A simple ring that does not enclose a pole turns by about 360°.
/// One that winds around a pole turns by about 0°, since its course
/// changes cancel out.
pub fn course_delta(ring: &[Coordinate<f64>]) -> f64 {
    let courses: Vec<f64> = ring
        .windows(2)
        .filter(|w| w[0] != w[1])
        .map(|w| course(w[0], w[1]))
        .collect();
    if courses.is_empty() {
        return 0.;
    }
    let total: f64 = courses
        .iter()
        .zip(courses.iter().cycle().skip(1))
        .map(|(c1, c2)| normalize_delta(c2 - c1))
        .sum();
    total.abs()
}

/// Angle in radians between two unit vectors.
fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Distance in metres from a point to an arc.
///
/// Uses the cross-track distance when the closest point of the great
/// circle falls on the arc, and the nearer end point otherwise.
pub fn arc_distance(p: Coordinate<f64>, arc: Line<f64>) -> f64 {
    let v = to_nvector(p);
    let (a, b) = (to_nvector(arc.start), to_nvector(arc.end));
    let endpoints = angle_between(&v, &a).min(angle_between(&v, &b));
    let n = match arc_normal(&a, &b) {
        Some(n) => n,
        None => return endpoints * EARTH_RADIUS,
    };
    let projected = v - n * v.dot(&n);
    if projected.norm() < EPSILON {
        // `p` is a pole of the arc's great circle.
        return endpoints * EARTH_RADIUS;
    }
    let c = projected.normalize();
    if on_arc(&a, &b, &n, &c) {
        v.dot(&n).abs().asin() * EARTH_RADIUS
    } else {
        endpoints * EARTH_RADIUS
    }
}
