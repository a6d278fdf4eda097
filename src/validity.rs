//! Pre-check deciding whether geographic input can be swept.
//!
//! Longitude is a usable sweep coordinate only when no edge crosses
//! the antimeridian and no ring winds around a pole. Input failing the
//! check is routed to the naive intersection instead.
use log::debug;

use crate::{shape::Path, spherical::course_delta, surface::Surface, Crs};

/// A ring turning by less than this many degrees encloses a pole.
const MIN_COURSE_DELTA: f64 = 270.;

/// Whether the paths of one operand are suitable for the sweep.
///
/// Planar input always is.
pub(crate) fn is_sweepable<S: Surface>(paths: &[Path]) -> bool {
    if S::CRS != Crs::Wgs84 {
        return true;
    }
    paths.iter().all(|path| {
        if let Some(c) = path.coords.iter().find(|c| !(-180. ..=180.).contains(&c.x)) {
            debug!("validity: longitude out of range at {c:?}");
            return false;
        }
        if let Some(w) = path.coords.windows(2).find(|w| (w[1].x - w[0].x).abs() > 180.) {
            debug!("validity: edge {w:?} crosses the antimeridian");
            return false;
        }
        if path.closed {
            let delta = course_delta(&path.coords);
            if delta < MIN_COURSE_DELTA {
                debug!("validity: ring encloses a pole (course delta {delta})");
                return false;
            }
        }
        true
    })
}
