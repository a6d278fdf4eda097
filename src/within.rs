//! Containment tests.
//!
//! Points are located against the rings of an areal shape by casting
//! a ray towards increasing `y` (north) and counting ring crossings,
//! so shells, holes and islands of a multipolygon follow from the
//! crossing parity alone.
use geo::{Coordinate, Line};

use crate::{
    geometry::{Point, SimplePolygon},
    intersect::{check_operands, intersection_points},
    shape::Shape,
    surface::{Cartesian, Surface, Wgs84},
    utils::{approx_eq, coord_approx_eq},
    Crs, Result,
};

/// How a point on the boundary of a ring is classified.
///
/// Only affects points located exactly on a boundary (up to epsilon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Boundary points are not within.
    #[default]
    Exclusive,
    /// Boundary points are within.
    Inclusive,
}

/// Location of a point relative to an areal shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Location {
    Inside,
    Boundary,
    Outside,
}

impl Location {
    fn is_within(self, boundary: Boundary) -> bool {
        match self {
            Location::Inside => true,
            Location::Boundary => boundary == Boundary::Inclusive,
            Location::Outside => false,
        }
    }
}

/// Whether `p` lies on the edge, up to epsilon in `y`.
fn on_edge<S: Surface>(edge: Line<f64>, p: Coordinate<f64>) -> bool {
    let (s, e) = (edge.start, edge.end);
    if coord_approx_eq(s, p) || coord_approx_eq(e, p) {
        return true;
    }
    let (lo, hi) = (s.x.min(e.x), s.x.max(e.x));
    if p.x < lo || p.x > hi {
        return false;
    }
    if s.x == e.x {
        return approx_eq(p.x, s.x) && p.y >= s.y.min(e.y) && p.y <= s.y.max(e.y);
    }
    approx_eq(S::y_at(edge, p.x), p.y)
}

/// Locates `p` against a set of ring edges by even-odd ray casting.
pub(crate) fn locate<S, I>(edges: I, p: Coordinate<f64>) -> Location
where
    S: Surface,
    I: IntoIterator<Item = Line<f64>>,
{
    let mut inside = false;
    for edge in edges {
        if on_edge::<S>(edge, p) {
            return Location::Boundary;
        }
        // Half-open in `x`, so a ray through a vertex counts once.
        if (edge.start.x > p.x) != (edge.end.x > p.x) && S::y_at(edge, p.x) > p.y {
            inside = !inside;
        }
    }
    if inside {
        Location::Inside
    } else {
        Location::Outside
    }
}

/// Whether `ring` lies inside `outer`.
///
/// Judged by the first vertex of `ring` off the boundary of `outer`; a
/// ring with every vertex on that boundary is not inside.
pub(crate) fn ring_inside(outer: &SimplePolygon, ring: &SimplePolygon) -> bool {
    let location = |p: &Point| match outer.crs() {
        Crs::Cartesian => locate::<Cartesian, _>(outer.lines(), p.coord()),
        Crs::Wgs84 => locate::<Wgs84, _>(outer.lines(), p.coord()),
    };
    ring.points()
        .iter()
        .map(location)
        .find(|&l| l != Location::Boundary)
        == Some(Location::Inside)
}

/// Containment queries of one coordinate reference system.
pub trait Within {
    /// Whether `inner` lies within the areal shape `outer`.
    ///
    /// A point is within when it is located inside `outer`, with
    /// boundary points classified by `boundary`. Any other shape is
    /// within when it does not intersect `outer` and its reference
    /// point is within.
    fn within(&self, outer: Shape<'_>, inner: Shape<'_>, boundary: Boundary) -> Result<bool>;
}

/// The implementation for the given coordinate system.
pub fn calculator(crs: Crs) -> &'static dyn Within {
    match crs {
        Crs::Cartesian => &Cartesian,
        Crs::Wgs84 => &Wgs84,
    }
}

/// Locates a point against an areal shape.
pub(crate) fn locate_point<S: Surface>(outer: &Shape<'_>, p: &Point) -> Location {
    locate::<S, _>(outer.rings().into_iter().flat_map(|r| r.lines()), p.coord())
}

impl<S: Surface> Within for S {
    fn within(&self, outer: Shape<'_>, inner: Shape<'_>, boundary: Boundary) -> Result<bool> {
        S::CRS.check(outer.crs())?;
        S::CRS.check(inner.crs())?;
        if !outer.is_areal() {
            return Err(outer.unsupported("within"));
        }
        outer.check_planar()?;
        inner.check_planar()?;

        if let Shape::Point(p) = inner {
            return Ok(locate_point::<S>(&outer, p).is_within(boundary));
        }
        check_operands::<S>(&outer, &inner)?;
        if !intersection_points::<S>(&outer, &inner, true).is_empty() {
            return Ok(false);
        }
        Ok(match inner.reference_point() {
            Some(p) => locate_point::<S>(&outer, p).is_within(boundary),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::tests::{init_log, polyline, ring, square, square_polygon},
        Error, MultiPolygon, Polygon,
    };

    fn within(outer: Shape<'_>, inner: Shape<'_>) -> bool {
        calculator(Crs::Cartesian)
            .within(outer, inner, Boundary::default())
            .unwrap()
    }

    #[test]
    fn check_nested_squares() {
        init_log();
        let outer = square_polygon(-15., -15., 30.);
        let inner = square_polygon(-10., -10., 20.);
        assert!(within((&outer).into(), (&inner).into()));
        assert!(!within((&inner).into(), (&outer).into()));

        let p = Point::cartesian(1., 2.);
        assert!(within((&outer).into(), (&p).into()));
        assert!(within((&inner).into(), (&p).into()));
    }

    #[test]
    fn check_touching_square() {
        init_log();
        let outer = square_polygon(-15., -15., 30.);
        let touching = square_polygon(-15., -10., 20.);
        assert!(!within((&outer).into(), (&touching).into()));
    }

    #[test]
    fn check_boundary_modes() {
        let outer = square_polygon(0., 0., 10.);
        let calc = calculator(Crs::Cartesian);
        for (x, y) in [(0., 5.), (10., 10.), (5., 0.), (10., 3.)] {
            let p = Point::cartesian(x, y);
            assert!(!calc.within((&outer).into(), (&p).into(), Boundary::Exclusive).unwrap());
            assert!(calc.within((&outer).into(), (&p).into(), Boundary::Inclusive).unwrap());
        }
        let outside = Point::cartesian(11., 5.);
        assert!(!calc.within((&outer).into(), (&outside).into(), Boundary::Inclusive).unwrap());
    }

    #[test]
    fn check_holes_and_islands() {
        let multi = MultiPolygon::from_rings(
            Crs::Cartesian,
            vec![square(0., 0., 30.), square(10., 10., 10.), square(13., 13., 4.)],
        )
        .unwrap();
        let shape = Shape::from(&multi);
        assert!(within(shape, (&Point::cartesian(5., 5.)).into()));
        assert!(!within(shape, (&Point::cartesian(11., 11.)).into()));
        assert!(within(shape, (&Point::cartesian(15., 15.)).into()));

        let poly = Polygon::new(square(0., 0., 30.), vec![square(10., 10., 10.)]).unwrap();
        let line = polyline(Crs::Cartesian, &[(1., 1.), (5., 8.)]);
        assert!(within((&poly).into(), (&line).into()));
        let crossing = polyline(Crs::Cartesian, &[(1., 1.), (15., 15.)]);
        assert!(!within((&poly).into(), (&crossing).into()));
    }

    #[test]
    fn check_ray_through_vertex() {
        // The northward ray from the point passes through the apex.
        let triangle: Polygon = ring(Crs::Cartesian, &[(0., 0.), (4., 0.), (2., 4.)]).into();
        assert!(within((&triangle).into(), (&Point::cartesian(2., 1.)).into()));
        assert!(!within((&triangle).into(), (&Point::cartesian(2., -1.)).into()));
    }

    #[test]
    fn check_geographic() {
        let poly: Polygon = ring(Crs::Wgs84, &[(10., 50.), (20., 50.), (20., 60.), (10., 60.)]).into();
        let calc = calculator(Crs::Wgs84);
        let inside = Point::wgs84(15., 55.);
        assert!(calc.within((&poly).into(), (&inside).into(), Boundary::Exclusive).unwrap());
        // The northern edge bulges polewards between its end points.
        let north = Point::wgs84(15., 60.05);
        assert!(calc.within((&poly).into(), (&north).into(), Boundary::Exclusive).unwrap());
    }

    #[test]
    fn check_unsupported_outer() {
        let line = polyline(Crs::Cartesian, &[(0., 0.), (1., 1.)]);
        let p = Point::cartesian(0., 0.);
        assert_eq!(
            calculator(Crs::Cartesian).within((&line).into(), (&p).into(), Boundary::Inclusive),
            Err(Error::Unsupported {
                operation: "within",
                shape: "polyline"
            })
        );
    }
}
