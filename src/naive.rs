use geo::Line;
use log::trace;

use crate::{points::PointSet, surface::Surface};

/// Tests every edge of `a` against every edge of `b`.
///
/// Stops at the first intersection when `shortcut` is set.
pub(crate) fn naive_intersections<S: Surface>(
    a: &[Line<f64>],
    b: &[Line<f64>],
    shortcut: bool,
) -> PointSet {
    let mut output = PointSet::new();
    for ea in a {
        for eb in b {
            if let Some(pt) = S::intersect_edges(*ea, *eb) {
                trace!("naive: {ea:?} x {eb:?} at {pt:?}");
                output.insert(pt);
                if shortcut {
                    return output;
                }
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Cartesian;

    #[test]
    fn check_naive() {
        let a = [Line::new((0., 0.), (2., 2.)), Line::new((2., 2.), (4., 0.))];
        let b = [Line::new((0., 1.), (4., 1.))];
        let all = naive_intersections::<Cartesian>(&a, &b, false);
        assert_eq!(all.len(), 2);
        assert!(all.contains((1., 1.).into()));
        assert!(all.contains((3., 1.).into()));

        assert_eq!(naive_intersections::<Cartesian>(&a, &b, true).len(), 1);
        assert!(naive_intersections::<Cartesian>(&a, &[], false).is_empty());
    }
}
