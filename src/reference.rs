//! Linear referencing: locating a point at a distance along linework.
use geo::Line;
use log::trace;

use crate::{
    geometry::Point,
    shape::Shape,
    surface::{Cartesian, Surface, Wgs84},
    Crs, Error, Result,
};

/// Linear referencing queries of one coordinate reference system.
pub trait LinearReference {
    /// The point reached by walking `distance` along `shape`, starting
    /// at the vertex `start` and heading to its neighbouring vertex
    /// `direction`.
    ///
    /// `shape` is a segment, a polyline, or the shell of a polygon.
    /// Returns `None` when the walk runs off the end of a polyline, or
    /// goes round a ring more than once.
    fn reference(
        &self,
        shape: Shape<'_>,
        start: &Point,
        direction: &Point,
        distance: f64,
    ) -> Result<Option<Point>>;
}

/// The implementation for the given coordinate system.
pub fn calculator(crs: Crs) -> &'static dyn LinearReference {
    match crs {
        Crs::Cartesian => &Cartesian,
        Crs::Wgs84 => &Wgs84,
    }
}

/// The vertices to walk along, and whether they wrap around.
fn vertices<'a>(shape: &Shape<'a>) -> Result<(&'a [Point], bool)> {
    Ok(match *shape {
        Shape::Segment(s) => (s.points(), false),
        Shape::Polyline(l) => (l.points(), false),
        Shape::Polygon(p) => {
            let points = p.shell().points();
            (&points[..points.len() - 1], true)
        }
        _ => return Err(shape.unsupported("linear reference")),
    })
}

impl<S: Surface> LinearReference for S {
    fn reference(
        &self,
        shape: Shape<'_>,
        start: &Point,
        direction: &Point,
        distance: f64,
    ) -> Result<Option<Point>> {
        S::CRS.check(shape.crs())?;
        S::CRS.check(start.crs())?;
        S::CRS.check(direction.crs())?;
        shape.check_planar()?;
        let (points, cyclic) = vertices(&shape)?;
        if !(distance >= 0.) {
            return Err(Error::InvalidReference("distance must not be negative"));
        }

        let n = points.len();
        let step = |idx: usize, forward: bool| -> Option<usize> {
            match (forward, cyclic) {
                (true, true) => Some((idx + 1) % n),
                (false, true) => Some((idx + n - 1) % n),
                (true, false) => Some(idx + 1).filter(|&i| i < n),
                (false, false) => idx.checked_sub(1),
            }
        };

        let first = points
            .iter()
            .position(|p| p.approx_eq(start))
            .ok_or(Error::InvalidReference("start is not a vertex"))?;
        let forward = if step(first, true).map_or(false, |i| points[i].approx_eq(direction)) {
            true
        } else if step(first, false).map_or(false, |i| points[i].approx_eq(direction)) {
            false
        } else {
            return Err(Error::InvalidReference(
                "direction is not a neighbour of start",
            ));
        };

        let mut remaining = distance;
        let mut current = first;
        let max_edges = if cyclic { n } else { n - 1 };
        for _ in 0..max_edges {
            let next = match step(current, forward) {
                Some(next) => next,
                None => break,
            };
            let edge = Line::new(points[current].coord(), points[next].coord());
            let length = S::edge_length(edge);
            if remaining <= length {
                return Ok(Some(Point::from_coord(
                    S::CRS,
                    S::interpolate(edge, remaining),
                )));
            }
            remaining -= length;
            current = next;
        }
        trace!("linear reference: {remaining} beyond the end of the {}", shape.name());
        Ok(None)
    }
}
