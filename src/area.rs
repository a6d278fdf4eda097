use crate::{
    geometry::Polygon,
    shape::Shape,
    surface::{Cartesian, Surface, Wgs84},
    Crs, Result,
};

/// Area queries of one coordinate reference system.
///
/// Geographic areas are in square metres.
pub trait Area {
    /// Area enclosed by the shape: shells minus holes. Linework and
    /// points have no area.
    fn area(&self, shape: Shape<'_>) -> Result<f64>;
}

/// The implementation for the given coordinate system.
pub fn calculator(crs: Crs) -> &'static dyn Area {
    match crs {
        Crs::Cartesian => &Cartesian,
        Crs::Wgs84 => &Wgs84,
    }
}

fn polygon_area<S: Surface>(polygon: &Polygon) -> f64 {
    let holes: f64 = polygon.holes().iter().map(|h| S::ring_area(&h.coords())).sum();
    S::ring_area(&polygon.shell().coords()) - holes
}

impl<S: Surface> Area for S {
    fn area(&self, shape: Shape<'_>) -> Result<f64> {
        S::CRS.check(shape.crs())?;
        match shape {
            Shape::Polygon(p) => {
                shape.check_planar()?;
                Ok(polygon_area::<S>(p))
            }
            Shape::MultiPolygon(m) => Ok(m.polygons().iter().map(polygon_area::<S>).sum()),
            _ => Ok(0.),
        }
    }
}
