use geo::{
    kernels::{HasKernel, Kernel, Orientation},
    Coordinate,
};

/// Tolerance for every epsilon-equality decision in the crate.
///
/// Output deduplication and the shared-endpoint checks of the sweep
/// must agree on this value, otherwise the same crossing gets
/// reported twice or not at all.
pub const EPSILON: f64 = 1e-10;

#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Component-wise epsilon-equality of two coordinate slices.
pub fn coords_approx_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| approx_eq(*x, *y))
}

#[inline]
pub fn coord_approx_eq(a: Coordinate<f64>, b: Coordinate<f64>) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

#[inline]
pub fn dot(a: Coordinate<f64>, b: Coordinate<f64>) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Dot product of two coordinate vectors of any dimension.
#[inline]
pub fn dot_n(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Turn sign of `p -> q -> r` in the plane, using the robust kernel.
#[inline]
pub fn orient2d(p: Coordinate<f64>, q: Coordinate<f64>, r: Coordinate<f64>) -> Orientation {
    <f64 as HasKernel>::Ker::orient2d(p, q, r)
}

/// Drops interior points of a closed ring that are collinear with
/// their neighbours.
///
/// The closing point is kept as is. If filtering would leave fewer
/// than three distinct points, the ring is returned unchanged.
pub fn filter_collinear<F>(ring: &[Coordinate<f64>], orient: F) -> Vec<Coordinate<f64>>
where
    F: Fn(Coordinate<f64>, Coordinate<f64>, Coordinate<f64>) -> Orientation,
{
    if ring.len() < 4 {
        return ring.to_vec();
    }
    let mut filtered = Vec::with_capacity(ring.len());
    filtered.push(ring[0]);
    for win in ring.windows(3) {
        if orient(win[0], win[1], win[2]) != Orientation::Collinear {
            filtered.push(win[1]);
        }
    }
    filtered.push(ring[ring.len() - 1]);

    if filtered.len() < 4 {
        ring.to_vec()
    } else {
        filtered
    }
}
