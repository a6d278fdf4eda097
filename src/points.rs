use geo::Coordinate;

use crate::{geometry::Point, utils::coord_approx_eq, Crs};

/// An unordered set of coordinates, deduplicated up to
/// [`EPSILON`](crate::utils::EPSILON).
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    coords: Vec<Coordinate<f64>>,
}

impl PointSet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a coordinate unless an epsilon-equal one is present.
    /// Returns whether it was added.
    pub fn insert(&mut self, coord: Coordinate<f64>) -> bool {
        if self.contains(coord) {
            return false;
        }
        self.coords.push(coord);
        true
    }

    pub fn contains(&self, coord: Coordinate<f64>) -> bool {
        self.coords.iter().any(|&c| coord_approx_eq(c, coord))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coordinate<f64>> + '_ {
        self.coords.iter().copied()
    }

    pub fn into_points(self, crs: Crs) -> Vec<Point> {
        self.coords
            .into_iter()
            .map(|c| Point::from_coord(crs, c))
            .collect()
    }
}

impl Extend<Coordinate<f64>> for PointSet {
    fn extend<I: IntoIterator<Item = Coordinate<f64>>>(&mut self, iter: I) {
        for c in iter {
            self.insert(c);
        }
    }
}
