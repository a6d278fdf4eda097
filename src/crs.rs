use std::fmt::Display;

use crate::{Error, Result};

/// Coordinate reference system of a geometry.
///
/// `Cartesian` coordinates live in the plane. `Wgs84` coordinates are
/// `(longitude, latitude)` pairs in degrees on the sphere; edges between
/// them are great-circle arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crs {
    Cartesian,
    Wgs84,
}

impl Crs {
    /// Returns `self` if both systems agree, and an error otherwise.
    pub fn check(self, other: Crs) -> Result<Crs> {
        if self == other {
            Ok(self)
        } else {
            Err(Error::CrsMismatch {
                left: self,
                right: other,
            })
        }
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Crs::Cartesian => write!(f, "cartesian"),
            Crs::Wgs84 => write!(f, "wgs-84"),
        }
    }
}
