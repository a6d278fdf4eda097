use geo::Line;
use log::trace;

use crate::{
    intersect::intersection_points,
    shape::Shape,
    surface::{Cartesian, Surface, Wgs84},
    within::{locate_point, Location},
    Crs, Result,
};

/// Distance queries of one coordinate reference system.
///
/// Cartesian distances are in the units of the coordinates, geographic
/// distances in metres.
pub trait Distance {
    /// Shortest distance between the operands; `0` if they touch, or if
    /// one lies within the other.
    fn distance(&self, a: Shape<'_>, b: Shape<'_>) -> Result<f64>;
}

/// The implementation for the given coordinate system.
pub fn calculator(crs: Crs) -> &'static dyn Distance {
    match crs {
        Crs::Cartesian => &Cartesian,
        Crs::Wgs84 => &Wgs84,
    }
}

/// Distance between two edges: zero if they meet, otherwise the
/// smallest distance of an end point to the other edge.
pub(crate) fn edge_pair_distance<S: Surface>(a: Line<f64>, b: Line<f64>) -> f64 {
    if S::intersect_edges(a, b).is_some() {
        return 0.;
    }
    S::edge_distance(a.start, b)
        .min(S::edge_distance(a.end, b))
        .min(S::edge_distance(b.start, a))
        .min(S::edge_distance(b.end, a))
}

fn min_edge_distance<S: Surface>(a: &[Line<f64>], b: &[Line<f64>]) -> f64 {
    a.iter()
        .flat_map(|ea| b.iter().map(move |eb| edge_pair_distance::<S>(*ea, *eb)))
        .fold(f64::INFINITY, f64::min)
}

/// Whether the reference point of `inner` lies within or on `outer`.
fn touches_reference<S: Surface>(outer: &Shape<'_>, inner: &Shape<'_>) -> bool {
    outer.is_areal()
        && inner
            .reference_point()
            .map(|p| locate_point::<S>(outer, p) != Location::Outside)
            .unwrap_or(false)
}

impl<S: Surface> Distance for S {
    fn distance(&self, a: Shape<'_>, b: Shape<'_>) -> Result<f64> {
        S::CRS.check(a.crs())?;
        S::CRS.check(b.crs())?;

        if let (Shape::Point(p), Shape::Point(q)) = (a, b) {
            return S::point_distance(p, q);
        }
        a.check_planar()?;
        b.check_planar()?;

        if touches_reference::<S>(&a, &b) || touches_reference::<S>(&b, &a) {
            trace!("distance: one operand lies within the other");
            return Ok(0.);
        }

        match (a, b) {
            (Shape::Point(p), other) | (other, Shape::Point(p)) => Ok(other
                .edges()
                .iter()
                .map(|e| S::edge_distance(p.coord(), *e))
                .fold(f64::INFINITY, f64::min)),
            _ => {
                if (a.is_areal() || b.is_areal())
                    && !intersection_points::<S>(&a, &b, true).is_empty()
                {
                    trace!("distance: operands intersect");
                    return Ok(0.);
                }
                Ok(min_edge_distance::<S>(&a.edges(), &b.edges()))
            }
        }
    }
}
