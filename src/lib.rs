//! Plane-sweep intersection of planar and geographic geometries, and
//! the queries built on it.
//!
//! 1. [Intersection](#intersection)
//! 1. [Derived queries](#derived-queries)
//! 1. [Coordinate systems](#coordinate-systems)
//!
//! # Intersection
//!
//! [`intersect`] computes every point where the boundaries of two
//! geometries meet, and [`does_intersect`] answers whether there is
//! at least one. Both decompose the operands into monotone chains and
//! run a plane sweep over them. Edges are only tested against their
//! neighbours on the sweep line and the edges meeting them at a vertex
//! or crossing. [`intersect_naive`] tests all edge pairs instead and
//! gives the same points.
//!
//! ```rust
//! use spatial_sweep::{intersect, Point, Polygon, SimplePolygon};
//! let square = |x: f64, y: f64| -> Polygon {
//!     SimplePolygon::new(vec![
//!         Point::cartesian(x, y),
//!         Point::cartesian(x + 20., y),
//!         Point::cartesian(x + 20., y + 20.),
//!         Point::cartesian(x, y + 20.),
//!     ])
//!     .unwrap()
//!     .into()
//! };
//! let (a, b) = (square(-10., -10.), square(0., 0.));
//! // The squares overlap by a corner.
//! assert_eq!(intersect(&a, &b).unwrap().len(), 2);
//! ```
//!
//! # Derived queries
//!
//! [`distance`], [`within`], [`convex_hull`], [`area`] and
//! [`linear_reference`] share the primitives of the sweep; distance and
//! containment call it to detect crossings.
//!
//! # Coordinate systems
//!
//! Every geometry is tagged with a [`Crs`]. Binary operations require
//! both operands to share it. Each query is a trait with one
//! implementation per system, chosen by the tag at run time (see for
//! instance [`intersect::calculator`]). Geographic input that longitude
//! cannot sweep, such as a ring around a pole, falls back to the naive
//! algorithm with the same result.
mod error;
pub use error::{Error, Result};

mod crs;
pub use crs::Crs;

pub mod geometry;
pub use geometry::{
    LineSegment, MultiPolygon, MultiPolyline, Point, Polygon, PolygonNode, Polyline, SimplePolygon,
};

mod shape;
pub use shape::Shape;

pub(crate) mod utils;
pub use utils::EPSILON;

mod spherical;

mod surface;
pub use surface::{Cartesian, Surface, Wgs84};

mod events;
mod monotone;
mod active;
mod points;
mod validity;
mod sweep;
mod naive;

pub mod intersect;
pub use intersect::{intersect_segments, Intersect};

pub mod distance;
pub use distance::Distance;

pub mod within;
pub use within::{Boundary, Within};

pub mod hull;
pub use hull::ConvexHull;

pub mod area;
pub use area::Area;

pub mod reference;
pub use reference::LinearReference;

#[cfg(test)]
mod random;

fn pair<'a, A, B>(a: A, b: B) -> Result<(Crs, Shape<'a>, Shape<'a>)>
where
    A: Into<Shape<'a>>,
    B: Into<Shape<'a>>,
{
    let (a, b) = (a.into(), b.into());
    Ok((a.crs().check(b.crs())?, a, b))
}

/// Whether the two geometries share at least one point.
pub fn does_intersect<'a, A, B>(a: A, b: B) -> Result<bool>
where
    A: Into<Shape<'a>>,
    B: Into<Shape<'a>>,
{
    let (crs, a, b) = pair(a, b)?;
    intersect::calculator(crs).does_intersect(a, b)
}

/// All points where the boundaries of the two geometries meet.
pub fn intersect<'a, A, B>(a: A, b: B) -> Result<Vec<Point>>
where
    A: Into<Shape<'a>>,
    B: Into<Shape<'a>>,
{
    let (crs, a, b) = pair(a, b)?;
    intersect::calculator(crs).intersect(a, b)
}

/// Same as [`intersect`], testing every pair of edges.
pub fn intersect_naive<'a, A, B>(a: A, b: B) -> Result<Vec<Point>>
where
    A: Into<Shape<'a>>,
    B: Into<Shape<'a>>,
{
    let (crs, a, b) = pair(a, b)?;
    intersect::calculator(crs).intersect_naive(a, b)
}

/// Shortest distance between two geometries; Cartesian units or
/// metres.
pub fn distance<'a, A, B>(a: A, b: B) -> Result<f64>
where
    A: Into<Shape<'a>>,
    B: Into<Shape<'a>>,
{
    let (crs, a, b) = pair(a, b)?;
    distance::calculator(crs).distance(a, b)
}

/// Whether `inner` lies within the polygon or multipolygon `outer`,
/// boundary excluded.
pub fn within<'a, A, B>(outer: A, inner: B) -> Result<bool>
where
    A: Into<Shape<'a>>,
    B: Into<Shape<'a>>,
{
    within_with(outer, inner, Boundary::default())
}

/// [`within`] with an explicit classification of boundary points.
pub fn within_with<'a, A, B>(outer: A, inner: B, boundary: Boundary) -> Result<bool>
where
    A: Into<Shape<'a>>,
    B: Into<Shape<'a>>,
{
    let (crs, outer, inner) = pair(outer, inner)?;
    within::calculator(crs).within(outer, inner, boundary)
}

pub fn convex_hull<'a, A: Into<Shape<'a>>>(shape: A) -> Result<SimplePolygon> {
    let shape = shape.into();
    hull::calculator(shape.crs()).convex_hull(shape)
}

pub fn area<'a, A: Into<Shape<'a>>>(shape: A) -> Result<f64> {
    let shape = shape.into();
    area::calculator(shape.crs()).area(shape)
}

/// The point at `distance` along `shape` from the vertex `start`,
/// heading to the neighbouring vertex `direction`.
pub fn linear_reference<'a, A: Into<Shape<'a>>>(
    shape: A,
    start: &Point,
    direction: &Point,
    distance: f64,
) -> Result<Option<Point>> {
    let shape = shape.into();
    reference::calculator(shape.crs()).reference(shape, start, direction, distance)
}
