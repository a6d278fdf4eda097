use std::f64::consts::PI;

use geo::{Coordinate, Rect};
use rand::Rng;

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * rng.gen::<f64>(),
        y: bounds.min().y + dims.y * rng.gen::<f64>(),
    }
}

/// A path with `size` vertices, strictly increasing in `x`.
pub fn monotone_path<R: Rng>(rng: &mut R, bounds: Rect<f64>, size: usize) -> Vec<Coordinate<f64>> {
    let mut coords: Vec<_> = (0..size).map(|_| uniform_point(rng, bounds)).collect();
    coords.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
    coords.dedup_by(|a, b| a.x == b.x);
    coords
}

/// Rounds coordinates to the integer grid, dropping repeated points.
pub fn snap(coords: Vec<Coordinate<f64>>) -> Vec<Coordinate<f64>> {
    let mut snapped: Vec<_> = coords
        .into_iter()
        .map(|c| Coordinate {
            x: c.x.round(),
            y: c.y.round(),
        })
        .collect();
    snapped.dedup();
    snapped
}

/// A closed star-shaped ring around `center`.
///
/// Vertex angles are stratified, so consecutive vertices are less than
/// half a turn apart and the ring is simple for `size >= 5`.
pub fn star_ring<R: Rng>(
    rng: &mut R,
    center: Coordinate<f64>,
    radii: (f64, f64),
    size: usize,
) -> Vec<Coordinate<f64>> {
    let step = 2. * PI / size as f64;
    let mut coords: Vec<_> = (0..size)
        .map(|i| {
            let angle = (i as f64 + rng.gen::<f64>()) * step;
            let radius = rng.gen_range(radii.0..radii.1);
            Coordinate {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
        .collect();
    coords.push(coords[0]);
    coords
}
