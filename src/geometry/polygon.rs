use geo::{Coordinate, Line};
use itertools::Itertools;

use super::{check_points, LineSegment, Point};
use crate::{Crs, Error, Result};

/// Number of epsilon-distinct points, counting no further than `limit`.
fn count_distinct(points: &[Point], limit: usize) -> usize {
    let mut seen: Vec<&Point> = Vec::with_capacity(limit);
    for p in points {
        if seen.len() == limit {
            break;
        }
        if !seen.iter().any(|q| q.approx_eq(p)) {
            seen.push(p);
        }
    }
    seen.len()
}

/// A closed ring of three or more distinct points.
///
/// The ring is stored closed: the last point equals the first. An
/// open input is closed on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePolygon {
    points: Vec<Point>,
}

impl SimplePolygon {
    pub fn new(mut points: Vec<Point>) -> Result<Self> {
        check_points(&points)?;
        let closed = match (points.first(), points.last()) {
            (Some(first), Some(last)) => points.len() > 1 && first.approx_eq(last),
            _ => false,
        };
        let ring = if closed {
            &points[..points.len() - 1]
        } else {
            &points[..]
        };
        let distinct = count_distinct(ring, 3);
        if distinct < 3 {
            return Err(Error::TooFewPoints {
                kind: "ring",
                min: 3,
                found: distinct,
            });
        }
        if !closed {
            points.push(points[0].clone());
        }
        Ok(SimplePolygon { points })
    }

    /// The points of the ring, including the closing point.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.points[0].crs()
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.points[0].dimension()
    }

    pub fn segments(&self) -> Vec<LineSegment> {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| LineSegment::new(a.clone(), b.clone()).expect("points validated"))
            .collect()
    }

    pub(crate) fn coords(&self) -> Vec<Coordinate<f64>> {
        self.points.iter().map(Point::coord).collect()
    }

    pub(crate) fn lines(&self) -> impl Iterator<Item = Line<f64>> + '_ {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| Line::new(a.coord(), b.coord()))
    }

    /// Ring equality up to starting point and epsilon.
    pub fn same_ring(&self, other: &SimplePolygon) -> bool {
        let a = &self.points[..self.points.len() - 1];
        let b = &other.points[..other.points.len() - 1];
        if a.len() != b.len() {
            return false;
        }
        (0..b.len()).any(|shift| {
            a.iter()
                .enumerate()
                .all(|(i, p)| p.approx_eq(&b[(i + shift) % b.len()]))
        })
    }
}

/// A polygon: an outer shell and zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    shell: SimplePolygon,
    holes: Vec<SimplePolygon>,
}

impl Polygon {
    pub fn new(shell: SimplePolygon, holes: Vec<SimplePolygon>) -> Result<Self> {
        for hole in &holes {
            shell.crs().check(hole.crs())?;
            shell.points[0].check_dimension(&hole.points[0])?;
        }
        Ok(Polygon { shell, holes })
    }

    #[inline]
    pub fn shell(&self) -> &SimplePolygon {
        &self.shell
    }

    #[inline]
    pub fn holes(&self) -> &[SimplePolygon] {
        &self.holes
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.shell.crs()
    }

    /// The shell followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &SimplePolygon> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    pub fn segments(&self) -> Vec<LineSegment> {
        self.rings().flat_map(SimplePolygon::segments).collect()
    }
}

impl From<SimplePolygon> for Polygon {
    fn from(shell: SimplePolygon) -> Self {
        Polygon {
            shell,
            holes: vec![],
        }
    }
}
