//! Intersection of two operands.
//!
//! The sweep is used whenever both operands pass the validity check of
//! their coordinate system; otherwise the naive all-pairs test gives
//! the same result.
use log::debug;

use crate::{
    geometry::{LineSegment, Point},
    naive::naive_intersections,
    points::PointSet,
    shape::Shape,
    surface::{Cartesian, Surface, Wgs84},
    sweep::sweep_intersections,
    validity::is_sweepable,
    Crs, Error, Result,
};

/// Intersection queries of one coordinate reference system.
pub trait Intersect {
    /// Whether the two operands share at least one point. Stops at the
    /// first intersection found.
    fn does_intersect(&self, a: Shape<'_>, b: Shape<'_>) -> Result<bool>;

    /// All points where the boundaries of the operands meet,
    /// deduplicated up to epsilon and in no particular order.
    fn intersect(&self, a: Shape<'_>, b: Shape<'_>) -> Result<Vec<Point>>;

    /// Same as [`Intersect::intersect`], always using the all-pairs
    /// algorithm.
    fn intersect_naive(&self, a: Shape<'_>, b: Shape<'_>) -> Result<Vec<Point>>;
}

/// The implementation for the given coordinate system.
pub fn calculator(crs: Crs) -> &'static dyn Intersect {
    match crs {
        Crs::Cartesian => &Cartesian,
        Crs::Wgs84 => &Wgs84,
    }
}

/// Checks that both operands are linework or areal, planar, and in
/// the coordinate system of `S`.
pub(crate) fn check_operands<S: Surface>(a: &Shape<'_>, b: &Shape<'_>) -> Result<()> {
    for shape in [a, b] {
        S::CRS.check(shape.crs())?;
        if let Shape::Point(_) = shape {
            return Err(shape.unsupported("intersect"));
        }
        shape.check_planar()?;
    }
    Ok(())
}

/// Intersection points of two checked operands, with the fallback to
/// the naive algorithm for input the sweep cannot handle.
pub(crate) fn intersection_points<S: Surface>(
    a: &Shape<'_>,
    b: &Shape<'_>,
    shortcut: bool,
) -> PointSet {
    let (pa, pb) = (a.paths(), b.paths());
    if is_sweepable::<S>(&pa) && is_sweepable::<S>(&pb) {
        sweep_intersections::<S>(&pa, &pb, shortcut)
    } else {
        debug!(
            "intersect: {a} x {b} not sweepable, using naive algorithm",
            a = a.name(),
            b = b.name()
        );
        naive_intersections::<S>(&a.edges(), &b.edges(), shortcut)
    }
}

impl<S: Surface> Intersect for S {
    fn does_intersect(&self, a: Shape<'_>, b: Shape<'_>) -> Result<bool> {
        check_operands::<S>(&a, &b)?;
        Ok(!intersection_points::<S>(&a, &b, true).is_empty())
    }

    fn intersect(&self, a: Shape<'_>, b: Shape<'_>) -> Result<Vec<Point>> {
        check_operands::<S>(&a, &b)?;
        Ok(intersection_points::<S>(&a, &b, false).into_points(S::CRS))
    }

    fn intersect_naive(&self, a: Shape<'_>, b: Shape<'_>) -> Result<Vec<Point>> {
        check_operands::<S>(&a, &b)?;
        Ok(naive_intersections::<S>(&a.edges(), &b.edges(), false).into_points(S::CRS))
    }
}

/// Intersection point of two segments, if they cross or touch at a
/// single point.
///
/// A shared end point is returned as is, without computation.
/// Segments overlapping along a stretch have no single intersection
/// point and yield `None`.
pub fn intersect_segments(a: &LineSegment, b: &LineSegment) -> Result<Option<Point>> {
    let crs = a.crs().check(b.crs())?;
    for s in [a, b] {
        if s.dimension() != 2 {
            return Err(Error::UnsupportedDimension(s.dimension()));
        }
    }
    if let Some(p) = a.shared_point(b) {
        return Ok(Some(p.clone()));
    }
    let point = match crs {
        Crs::Cartesian => Cartesian::cross_edges(a.line(), b.line()),
        Crs::Wgs84 => Wgs84::cross_edges(a.line(), b.line()),
    };
    Ok(point.map(|c| Point::from_coord(crs, c)))
}
