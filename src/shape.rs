use geo::{Coordinate, Line};

use crate::{
    geometry::{LineSegment, MultiPolygon, MultiPolyline, Point, Polygon, Polyline, SimplePolygon},
    Crs, Error, Result,
};

/// A borrowed view of any operand accepted by the algorithms.
///
/// Every operation is written once against `Shape`, which serves all
/// operand pairs in either order. Use the `From` impls to build one:
///
/// ```rust
/// use spatial_sweep::{Point, Polyline, Shape};
/// let line = Polyline::new(vec![Point::cartesian(0., 0.), Point::cartesian(1., 1.)]).unwrap();
/// let shape = Shape::from(&line);
/// assert!(!shape.is_areal());
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Point(&'a Point),
    Segment(&'a LineSegment),
    Polyline(&'a Polyline),
    MultiPolyline(&'a MultiPolyline),
    Polygon(&'a Polygon),
    MultiPolygon(&'a MultiPolygon),
}

/// One connected piece of linework, as 2-D coordinates.
#[derive(Debug, Clone)]
pub(crate) struct Path {
    pub coords: Vec<Coordinate<f64>>,
    /// Closed paths are rings: the last coordinate repeats the first.
    pub closed: bool,
}

impl<'a> Shape<'a> {
    pub fn crs(&self) -> Crs {
        match self {
            Shape::Point(p) => p.crs(),
            Shape::Segment(s) => s.crs(),
            Shape::Polyline(l) => l.crs(),
            Shape::MultiPolyline(m) => m.crs(),
            Shape::Polygon(p) => p.crs(),
            Shape::MultiPolygon(m) => m.crs(),
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            Shape::Point(p) => p.dimension(),
            Shape::Segment(s) => s.dimension(),
            Shape::Polyline(l) => l.dimension(),
            Shape::MultiPolyline(m) => m.dimension(),
            Shape::Polygon(p) => p.shell().dimension(),
            // Rings of a multipolygon are checked to be planar on insert.
            Shape::MultiPolygon(_) => 2,
        }
    }

    /// Short lowercase name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Point(_) => "point",
            Shape::Segment(_) => "segment",
            Shape::Polyline(_) => "polyline",
            Shape::MultiPolyline(_) => "multipolyline",
            Shape::Polygon(_) => "polygon",
            Shape::MultiPolygon(_) => "multipolygon",
        }
    }

    /// Polygons and multipolygons enclose area; everything else is
    /// linework or a point.
    pub fn is_areal(&self) -> bool {
        matches!(self, Shape::Polygon(_) | Shape::MultiPolygon(_))
    }

    /// A vertex of the shape: the first point of its first shell or
    /// path. `None` only for an empty multipolygon.
    pub fn reference_point(&self) -> Option<&'a Point> {
        match *self {
            Shape::Point(p) => Some(p),
            Shape::Segment(s) => Some(s.start()),
            Shape::Polyline(l) => l.points().first(),
            Shape::MultiPolyline(m) => m.children()[0].points().first(),
            Shape::Polygon(p) => p.shell().points().first(),
            Shape::MultiPolygon(m) => m.roots().first().map(|r| &r.ring().points()[0]),
        }
    }

    /// All points of the shape, composite children included.
    ///
    /// Rings contribute their closing point too.
    pub fn points(&self) -> Vec<&'a Point> {
        match *self {
            Shape::Point(p) => vec![p],
            Shape::Segment(s) => s.points().iter().collect(),
            Shape::Polyline(l) => l.points().iter().collect(),
            Shape::MultiPolyline(m) => m.children().iter().flat_map(|c| c.points()).collect(),
            Shape::Polygon(p) => p.rings().flat_map(|r| r.points()).collect(),
            Shape::MultiPolygon(m) => m.rings().into_iter().flat_map(|r| r.points()).collect(),
        }
    }

    /// Rings of an areal shape, shells and holes alike.
    pub(crate) fn rings(&self) -> Vec<&'a SimplePolygon> {
        match *self {
            Shape::Polygon(p) => p.rings().collect(),
            Shape::MultiPolygon(m) => m.rings(),
            _ => vec![],
        }
    }

    /// The connected pieces of linework making up the shape.
    pub(crate) fn paths(&self) -> Vec<Path> {
        let open = |points: &[Point]| Path {
            coords: points.iter().map(Point::coord).collect(),
            closed: false,
        };
        let ring = |r: &SimplePolygon| Path {
            coords: r.coords(),
            closed: true,
        };
        match *self {
            Shape::Point(p) => vec![Path {
                coords: vec![p.coord()],
                closed: false,
            }],
            Shape::Segment(s) => vec![open(s.points())],
            Shape::Polyline(l) => vec![open(l.points())],
            Shape::MultiPolyline(m) => m.children().iter().map(|c| open(c.points())).collect(),
            Shape::Polygon(_) | Shape::MultiPolygon(_) => {
                self.rings().into_iter().map(ring).collect()
            }
        }
    }

    /// Every edge of the shape as a 2-D line.
    pub(crate) fn edges(&self) -> Vec<Line<f64>> {
        self.paths()
            .iter()
            .flat_map(|p| p.coords.windows(2).map(|w| Line::new(w[0], w[1])))
            .collect()
    }

    /// Errors unless every point of the shape is 2-dimensional.
    pub(crate) fn check_planar(&self) -> Result<()> {
        match self.dimension() {
            2 => Ok(()),
            d => Err(Error::UnsupportedDimension(d)),
        }
    }

    pub(crate) fn unsupported(&self, operation: &'static str) -> Error {
        Error::Unsupported {
            operation,
            shape: self.name(),
        }
    }
}

impl<'a> From<&'a Point> for Shape<'a> {
    fn from(p: &'a Point) -> Self {
        Shape::Point(p)
    }
}

impl<'a> From<&'a LineSegment> for Shape<'a> {
    fn from(s: &'a LineSegment) -> Self {
        Shape::Segment(s)
    }
}

impl<'a> From<&'a Polyline> for Shape<'a> {
    fn from(l: &'a Polyline) -> Self {
        Shape::Polyline(l)
    }
}

impl<'a> From<&'a MultiPolyline> for Shape<'a> {
    fn from(m: &'a MultiPolyline) -> Self {
        Shape::MultiPolyline(m)
    }
}

impl<'a> From<&'a Polygon> for Shape<'a> {
    fn from(p: &'a Polygon) -> Self {
        Shape::Polygon(p)
    }
}

impl<'a> From<&'a MultiPolygon> for Shape<'a> {
    fn from(m: &'a MultiPolygon) -> Self {
        Shape::MultiPolygon(m)
    }
}
