use geo::Line;

use super::Point;
use crate::{Crs, Result};

/// An unordered pair of points.
///
/// Two segments are equal if they have the same end points, in any
/// order.
#[derive(Debug, Clone)]
pub struct LineSegment {
    points: [Point; 2],
}

impl LineSegment {
    pub fn new(a: Point, b: Point) -> Result<Self> {
        a.check_dimension(&b)?;
        a.crs().check(b.crs())?;
        Ok(LineSegment { points: [a, b] })
    }

    #[inline]
    pub fn points(&self) -> &[Point; 2] {
        &self.points
    }

    #[inline]
    pub fn start(&self) -> &Point {
        &self.points[0]
    }

    #[inline]
    pub fn end(&self) -> &Point {
        &self.points[1]
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.points[0].crs()
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.points[0].dimension()
    }

    /// The segment as a `geo` line over the first two coordinates.
    pub(crate) fn line(&self) -> Line<f64> {
        Line::new(self.points[0].coord(), self.points[1].coord())
    }

    /// Returns the end point shared by both segments, compared exactly.
    pub fn shared_point(&self, other: &LineSegment) -> Option<&Point> {
        self.points
            .iter()
            .find(|p| other.points.iter().any(|q| *p == q))
    }
}

impl PartialEq for LineSegment {
    fn eq(&self, other: &Self) -> bool {
        let [a, b] = &self.points;
        let [c, d] = &other.points;
        (a == c && b == d) || (a == d && b == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn segment(a: (f64, f64), b: (f64, f64)) -> LineSegment {
        LineSegment::new(Point::cartesian(a.0, a.1), Point::cartesian(b.0, b.1)).unwrap()
    }

    #[test]
    fn check_unordered_equality() {
        assert_eq!(segment((0., 1.), (5., 3.)), segment((0., 1.), (5., 3.)));
        assert_eq!(segment((0., 1.), (5., 3.)), segment((5., 3.), (0., 1.)));
        assert_ne!(segment((1., 1.), (5., 3.)), segment((5., 3.), (0., 1.)));
    }

    #[test]
    fn check_rejects_mixed_dimensions() {
        let err = LineSegment::new(
            Point::cartesian(0., 1.),
            Point::new(Crs::Cartesian, &[5., 2., 3.]).unwrap(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn check_shared_point() {
        let a = segment((0., 0.), (1., 1.));
        let b = segment((1., 1.), (2., 0.));
        let c = segment((3., 3.), (2., 0.));
        assert_eq!(a.shared_point(&b), Some(&Point::cartesian(1., 1.)));
        assert_eq!(a.shared_point(&c), None);
    }
}
