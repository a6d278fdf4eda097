use std::fmt::Display;

use geo::Coordinate;
use smallvec::SmallVec;

use crate::{utils::coords_approx_eq, Crs, Error, Result};

type Coords = SmallVec<[f64; 3]>;

/// A point: at least two coordinates and a coordinate reference system.
///
/// For [`Crs::Wgs84`] the first two coordinates are longitude and
/// latitude in degrees. `PartialEq` is exact; use
/// [`Point::approx_eq`] for comparisons inside geometric algorithms.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coords: Coords,
    crs: Crs,
}

impl Point {
    pub fn new(crs: Crs, coords: &[f64]) -> Result<Self> {
        if coords.len() < 2 {
            return Err(Error::TooFewCoordinates(coords.len()));
        }
        if !coords.iter().all(|c| c.is_finite()) {
            return Err(Error::NonFiniteCoordinate);
        }
        Ok(Point {
            coords: Coords::from_slice(coords),
            crs,
        })
    }

    /// Planar point from `x` and `y`.
    ///
    /// # Panics
    ///
    /// If either coordinate is NaN or infinite. Use [`Point::new`] to
    /// get [`Error::NonFiniteCoordinate`] instead.
    pub fn cartesian(x: f64, y: f64) -> Self {
        Point::new(Crs::Cartesian, &[x, y]).expect("cartesian point requires finite coordinates")
    }

    /// Geographic point from longitude and latitude in degrees.
    ///
    /// # Panics
    ///
    /// If either coordinate is NaN or infinite. Use [`Point::new`] to
    /// get [`Error::NonFiniteCoordinate`] instead.
    pub fn wgs84(lon: f64, lat: f64) -> Self {
        Point::new(Crs::Wgs84, &[lon, lat]).expect("wgs-84 point requires finite coordinates")
    }

    pub(crate) fn from_coord(crs: Crs, coord: Coordinate<f64>) -> Self {
        Point {
            coords: Coords::from_slice(&[coord.x, coord.y]),
            crs,
        }
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.crs
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    /// The first two coordinates as a `geo` coordinate.
    #[inline]
    pub(crate) fn coord(&self) -> Coordinate<f64> {
        Coordinate {
            x: self.coords[0],
            y: self.coords[1],
        }
    }

    pub fn approx_eq(&self, other: &Point) -> bool {
        coords_approx_eq(&self.coords, &other.coords)
    }

    pub(crate) fn check_dimension(&self, other: &Point) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        Ok(())
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(&self, other: &Point, f: F) -> Result<Point> {
        self.check_dimension(other)?;
        self.crs.check(other.crs)?;
        Ok(Point {
            coords: self
                .coords
                .iter()
                .zip(other.coords.iter())
                .map(|(a, b)| f(*a, *b))
                .collect(),
            crs: self.crs,
        })
    }

    pub fn add(&self, other: &Point) -> Result<Point> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &Point) -> Result<Point> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn scale(&self, factor: f64) -> Point {
        Point {
            coords: self.coords.iter().map(|c| c * factor).collect(),
            crs: self.crs,
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "POINT(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}
