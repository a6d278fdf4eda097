use std::cmp::Ordering;

use geo::Coordinate;

use crate::monotone::{ChainKey, VertexKind};

/// Wraps a [`Coordinate`] to support lexicographic ordering.
///
/// The ordering is by `x` and then by `y`. Implements `PartialOrd`,
/// `Ord` and `Eq` even though `Coordinate` doesn't implement these.
/// This is necessary to support insertion to ordered collections,
/// as required by the active chain list of the sweep.
///
/// Only finite coordinates may be wrapped; see the `From` impl.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SweepPoint(Coordinate<f64>);

impl SweepPoint {
    #[inline]
    pub fn coord(&self) -> Coordinate<f64> {
        self.0
    }
}

/// Implement lexicographic ordering by `x` and then by `y`
/// coordinate.
impl PartialOrd for SweepPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.0.x.partial_cmp(&other.0.x) {
            Some(Ordering::Equal) => self.0.y.partial_cmp(&other.0.y),
            o => o,
        }
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl Ord for SweepPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// We derive `Eq` manually as `f64` is not `Eq`.
impl Eq for SweepPoint {}

/// Create from `Coordinate` while checking the components are finite.
impl From<Coordinate<f64>> for SweepPoint {
    fn from(pt: Coordinate<f64>) -> Self {
        assert!(
            pt.x.is_finite(),
            "sweep point requires a finite x-coordinate"
        );
        assert!(
            pt.y.is_finite(),
            "sweep point requires a finite y-coordinate"
        );
        SweepPoint(pt)
    }
}

/// Key of a chain in the active chain list.
///
/// Chains are ordered by the position of their front vertex, then by
/// the vertex kind, and finally by the chain key, which keeps entries
/// of distinct chains distinct. Entries at one point are consecutive,
/// so the sweep can take them all at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct ActiveEntry {
    pub point: SweepPoint,
    pub kind: VertexKind,
    pub chain: ChainKey,
}
