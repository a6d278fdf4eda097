use geo::Line;
use itertools::Itertools;

use super::{check_points, LineSegment, Point};
use crate::{Crs, Error, Result};

/// An open path through two or more points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        check_points(&points)?;
        if points.len() < 2 {
            return Err(Error::TooFewPoints {
                kind: "polyline",
                min: 2,
                found: points.len(),
            });
        }
        Ok(Polyline { points })
    }

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

    pub(crate) fn lines(&self) -> impl Iterator<Item = Line<f64>> + '_ {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| Line::new(a.coord(), b.coord()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_polyline() {
        let line = Polyline::new(vec![
            Point::cartesian(0., 0.),
            Point::cartesian(1., 0.),
            Point::cartesian(1., 1.),
        ])
        .unwrap();
        assert_eq!(line.segments().len(), 2);
        assert_eq!(
            Polyline::new(vec![Point::cartesian(0., 0.)]),
            Err(Error::TooFewPoints {
                kind: "polyline",
                min: 2,
                found: 1
            })
        );
        assert!(matches!(
            Polyline::new(vec![Point::cartesian(0., 0.), Point::wgs84(1., 1.)]),
            Err(Error::CrsMismatch { .. })
        ));
    }
}
