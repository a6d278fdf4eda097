//! Geometry types: points, segments, polylines, rings, polygons and
//! their multi-part forms.
//!
//! Every geometry carries one [`Crs`](crate::Crs); constructors reject
//! mixed systems and mixed dimensions.
mod point;
pub use point::Point;

mod segment;
pub use segment::LineSegment;

mod polyline;
pub use polyline::Polyline;

mod polygon;
pub use polygon::{Polygon, SimplePolygon};

mod multi;
pub use multi::{MultiPolygon, MultiPolyline, PolygonNode};

use crate::{Error, Result};

/// Checks that all points share the crs and dimension of the first.
fn check_points(points: &[Point]) -> Result<()> {
    if let Some((first, rest)) = points.split_first() {
        for p in rest {
            first.crs().check(p.crs())?;
            if first.dimension() != p.dimension() {
                return Err(Error::DimensionMismatch {
                    expected: first.dimension(),
                    found: p.dimension(),
                });
            }
        }
    }
    Ok(())
}
