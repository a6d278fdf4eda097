//! Convex hull by Graham scan.
use geo::{kernels::Orientation, Coordinate};
use log::trace;

use crate::{
    geometry::{Point, SimplePolygon},
    points::PointSet,
    shape::Shape,
    surface::{Cartesian, Surface, Wgs84},
    Crs, Error, Result,
};

/// Convex hull queries of one coordinate reference system.
pub trait ConvexHull {
    /// The smallest convex ring containing every point of `shape`.
    ///
    /// The ring runs counter-clockwise from its lowest point. Points on
    /// a hull edge are not vertices of the hull.
    fn convex_hull(&self, shape: Shape<'_>) -> Result<SimplePolygon>;
}

/// The implementation for the given coordinate system.
pub fn calculator(crs: Crs) -> &'static dyn ConvexHull {
    match crs {
        Crs::Cartesian => &Cartesian,
        Crs::Wgs84 => &Wgs84,
    }
}

fn too_few(found: usize) -> Error {
    Error::TooFewPoints {
        kind: "convex hull",
        min: 3,
        found,
    }
}

/// Graham scan over distinct coordinates; returns the hull vertices
/// counter-clockwise, starting at the pivot.
pub(crate) fn graham_scan<S: Surface>(mut coords: Vec<Coordinate<f64>>) -> Vec<Coordinate<f64>> {
    let pivot_idx = match coords
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
    {
        Some((idx, _)) => idx,
        None => return vec![],
    };
    let pivot = coords.swap_remove(pivot_idx);

    let mut sorted: Vec<_> = coords
        .into_iter()
        .map(|c| (S::polar_angle(pivot, c), S::coord_distance(pivot, c), c))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut stack = vec![pivot];
    for (_, _, c) in sorted {
        while stack.len() > 1
            && S::orientation(stack[stack.len() - 2], stack[stack.len() - 1], c)
                != Orientation::CounterClockwise
        {
            stack.pop();
        }
        stack.push(c);
    }
    // Drops a trailing vertex collinear with the pivot.
    while stack.len() > 2
        && S::orientation(stack[stack.len() - 2], stack[stack.len() - 1], pivot)
            != Orientation::CounterClockwise
    {
        stack.pop();
    }
    stack
}

impl<S: Surface> ConvexHull for S {
    fn convex_hull(&self, shape: Shape<'_>) -> Result<SimplePolygon> {
        S::CRS.check(shape.crs())?;
        shape.check_planar()?;

        let mut distinct = PointSet::new();
        distinct.extend(shape.points().into_iter().map(Point::coord));
        if distinct.len() < 3 {
            return Err(too_few(distinct.len()));
        }

        let hull = graham_scan::<S>(distinct.iter().collect());
        trace!(
            "convex hull: {n} of {total} points on hull",
            n = hull.len(),
            total = distinct.len()
        );
        if hull.len() < 3 {
            return Err(too_few(hull.len()));
        }
        SimplePolygon::new(
            hull.into_iter()
                .map(|c| Point::from_coord(S::CRS, c))
                .collect(),
        )
    }
}
