use log::debug;

use super::{Polygon, Polyline, SimplePolygon};
use crate::{within::ring_inside, Crs, Error, Result};

/// A node of the containment tree of a [`MultiPolygon`].
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonNode {
    ring: SimplePolygon,
    children: Vec<PolygonNode>,
}

impl PolygonNode {
    fn new(ring: SimplePolygon) -> Self {
        PolygonNode {
            ring,
            children: vec![],
        }
    }

    #[inline]
    pub fn ring(&self) -> &SimplePolygon {
        &self.ring
    }

    #[inline]
    pub fn children(&self) -> &[PolygonNode] {
        &self.children
    }

    fn contains(&self, ring: &SimplePolygon) -> bool {
        ring_inside(&self.ring, ring)
    }

    fn insert(&mut self, ring: SimplePolygon) {
        if let Some(child) = self.children.iter_mut().find(|c| c.contains(&ring)) {
            child.insert(ring);
            return;
        }
        let mut node = PolygonNode::new(ring);
        adopt_contained(&mut self.children, &mut node);
        self.children.push(node);
    }

    fn collect_polygons(&self, out: &mut Vec<Polygon>) {
        let holes = self.children.iter().map(|c| c.ring.clone()).collect();
        out.push(Polygon::new(self.ring.clone(), holes).expect("rings share crs and dimension"));
        for hole in &self.children {
            for island in &hole.children {
                island.collect_polygons(out);
            }
        }
    }

    fn for_each_ring<'a, F: FnMut(&'a SimplePolygon)>(&'a self, f: &mut F) {
        f(&self.ring);
        for child in &self.children {
            child.for_each_ring(f);
        }
    }
}

/// Moves the siblings that lie inside `node` below it.
fn adopt_contained(siblings: &mut Vec<PolygonNode>, node: &mut PolygonNode) {
    let mut idx = 0;
    while idx < siblings.len() {
        if node.contains(&siblings[idx].ring) {
            node.children.push(siblings.remove(idx));
        } else {
            idx += 1;
        }
    }
}

/// Nested multi-part polygon geometry.
///
/// Rings are arranged in a containment tree: rings at even depth are
/// shells, rings at odd depth are holes of their parent, and rings
/// inside holes are islands (new shells).
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    crs: Crs,
    roots: Vec<PolygonNode>,
}

impl MultiPolygon {
    pub fn new(crs: Crs) -> Self {
        MultiPolygon { crs, roots: vec![] }
    }

    /// Builds the containment tree from a set of rings.
    pub fn from_rings<I: IntoIterator<Item = SimplePolygon>>(crs: Crs, rings: I) -> Result<Self> {
        let mut multi = MultiPolygon::new(crs);
        for ring in rings {
            multi.insert_polygon(ring)?;
        }
        Ok(multi)
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.crs
    }

    #[inline]
    pub fn roots(&self) -> &[PolygonNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Inserts a ring at its place in the containment tree.
    pub fn insert_polygon(&mut self, ring: SimplePolygon) -> Result<()> {
        self.crs.check(ring.crs())?;
        if ring.dimension() != 2 {
            return Err(Error::UnsupportedDimension(ring.dimension()));
        }
        if let Some(root) = self.roots.iter_mut().find(|r| r.contains(&ring)) {
            debug!("multipolygon: nesting ring below existing shell");
            root.insert(ring);
            return Ok(());
        }
        let mut node = PolygonNode::new(ring);
        adopt_contained(&mut self.roots, &mut node);
        self.roots.push(node);
        Ok(())
    }

    /// Flattens the tree into polygons with holes.
    pub fn polygons(&self) -> Vec<Polygon> {
        let mut out = vec![];
        for root in &self.roots {
            root.collect_polygons(&mut out);
        }
        out
    }

    /// Every ring in the tree, shells and holes alike.
    pub fn rings(&self) -> Vec<&SimplePolygon> {
        let mut rings = vec![];
        for root in &self.roots {
            root.for_each_ring(&mut |r| rings.push(r));
        }
        rings
    }
}

/// A collection of polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolyline {
    children: Vec<Polyline>,
}

impl MultiPolyline {
    pub fn new(children: Vec<Polyline>) -> Result<Self> {
        let first = children.first().ok_or(Error::TooFewPoints {
            kind: "multipolyline",
            min: 1,
            found: 0,
        })?;
        for child in &children[1..] {
            first.crs().check(child.crs())?;
            first.points()[0].check_dimension(&child.points()[0])?;
        }
        Ok(MultiPolyline { children })
    }

    #[inline]
    pub fn children(&self) -> &[Polyline] {
        &self.children
    }

    #[inline]
    pub fn crs(&self) -> Crs {
        self.children[0].crs()
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.children[0].dimension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::{ring, square};

    #[test]
    fn check_containment_tree() {
        // Inserted out of order: island, shell, hole.
        let island = square(-2., -2., 4.);
        let shell = square(-20., -20., 40.);
        let hole = square(-10., -10., 20.);
        let far = square(100., 100., 5.);

        let multi =
            MultiPolygon::from_rings(Crs::Cartesian, vec![island, shell, hole, far]).unwrap();
        assert_eq!(multi.roots().len(), 2);
        assert_eq!(multi.rings().len(), 4);

        let polygons = multi.polygons();
        assert_eq!(polygons.len(), 3);
        let outer = polygons
            .iter()
            .find(|p| p.shell().same_ring(&square(-20., -20., 40.)))
            .unwrap();
        assert_eq!(outer.holes().len(), 1);
        assert!(outer.holes()[0].same_ring(&square(-10., -10., 20.)));
        assert!(polygons
            .iter()
            .any(|p| p.shell().same_ring(&square(-2., -2., 4.)) && p.holes().is_empty()));
    }

    #[test]
    fn check_hole_touching_shell() {
        // The first vertex of the hole lies on the left edge of the shell.
        let shell = square(-20., -20., 40.);
        let hole = ring(Crs::Cartesian, &[(-20., 0.), (0., -10.), (10., 0.), (0., 10.)]);

        for rings in [vec![shell.clone(), hole.clone()], vec![hole.clone(), shell.clone()]] {
            let multi = MultiPolygon::from_rings(Crs::Cartesian, rings).unwrap();
            assert_eq!(multi.roots().len(), 1);
            assert!(multi.roots()[0].ring().same_ring(&shell));
            assert_eq!(multi.roots()[0].children().len(), 1);
            assert!(multi.roots()[0].children()[0].ring().same_ring(&hole));
        }

        // Sharing only boundary vertices does not nest a ring.
        let twin = ring(Crs::Cartesian, &[(-20., 20.), (-20., -20.), (20., -20.), (20., 20.)]);
        let multi = MultiPolygon::from_rings(Crs::Cartesian, vec![shell, twin]).unwrap();
        assert_eq!(multi.roots().len(), 2);
    }

    #[test]
    fn check_multipolyline_requires_children() {
        assert!(matches!(
            MultiPolyline::new(vec![]),
            Err(Error::TooFewPoints { .. })
        ));
    }
}
