use geo::{Coordinate, Line};
use slab::Slab;

use crate::{events::SweepPoint, utils::coord_approx_eq};

pub type ChainKey = usize;
pub type VertexKey = usize;

/// Classification of a chain vertex.
///
/// All events at one point are handled together, so the ordering of
/// the variants only fixes the order in which they are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VertexKind {
    RightMost,
    Intersection,
    Internal,
    LeftMost,
}

#[derive(Debug, Clone)]
pub struct Vertex {
    pub point: Coordinate<f64>,
    pub kind: VertexKind,
}

impl Vertex {
    pub fn new(point: Coordinate<f64>, kind: VertexKind) -> Self {
        Vertex { point, kind }
    }

    /// A synthetic vertex marking a crossing inside an input edge.
    pub fn intersection(point: Coordinate<f64>) -> Self {
        Vertex::new(point, VertexKind::Intersection)
    }

    #[inline]
    fn is_input(&self) -> bool {
        self.kind != VertexKind::Intersection
    }
}

/// A sequence of vertices, increasing in the sweep coordinate, with a
/// cursor pointing at the next vertex to be swept.
#[derive(Debug, Clone)]
pub struct MonotoneChain {
    id: u64,
    vertices: Vec<VertexKey>,
    front: usize,
}

impl MonotoneChain {
    /// Sequential id; compare with the split id of the partition to
    /// tell which operand the chain came from.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[cfg(test)]
    pub fn vertices(&self) -> &[VertexKey] {
        &self.vertices
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.front >= self.vertices.len()
    }
}

/// Storage for all chains and vertices of one sweep.
#[derive(Debug, Default)]
pub struct ChainArena {
    chains: Slab<MonotoneChain>,
    vertices: Slab<Vertex>,
}

impl ChainArena {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a chain through `points`, which must strictly increase in
    /// `x`. The first vertex is left-most, the last right-most and the
    /// rest internal.
    pub fn add_chain(&mut self, id: u64, points: &[Coordinate<f64>]) -> ChainKey {
        debug_assert!(points.len() >= 2);
        debug_assert!(points.windows(2).all(|w| w[0].x < w[1].x));
        let last = points.len() - 1;
        let vertices = points
            .iter()
            .enumerate()
            .map(|(idx, pt)| {
                let kind = match idx {
                    0 => VertexKind::LeftMost,
                    i if i == last => VertexKind::RightMost,
                    _ => VertexKind::Internal,
                };
                self.vertices.insert(Vertex::new(*pt, kind))
            })
            .collect();
        self.chains.insert(MonotoneChain {
            id,
            vertices,
            front: 0,
        })
    }

    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexKey {
        self.vertices.insert(vertex)
    }

    #[inline]
    pub fn chain(&self, key: ChainKey) -> &MonotoneChain {
        &self.chains[key]
    }

    #[inline]
    pub fn vertex(&self, key: VertexKey) -> &Vertex {
        &self.vertices[key]
    }

    pub fn chain_keys(&self) -> impl Iterator<Item = ChainKey> + '_ {
        self.chains.iter().map(|(key, _)| key)
    }

    /// The next vertex to be swept on the chain, if any.
    pub fn front(&self, key: ChainKey) -> Option<VertexKey> {
        let chain = &self.chains[key];
        chain.vertices.get(chain.front).copied()
    }

    pub fn advance(&mut self, key: ChainKey) {
        let chain = &mut self.chains[key];
        debug_assert!(!chain.is_done());
        chain.front += 1;
    }

    /// The input edge the chain is currently sweeping along.
    ///
    /// Intersection vertices split input edges for the sweep, but
    /// crossings are always computed on the unsplit edge, so every
    /// point found is one a pairwise test of the inputs would find.
    pub fn current_edge(&self, key: ChainKey) -> Option<Line<f64>> {
        let chain = &self.chains[key];
        if chain.front == 0 || chain.is_done() {
            return None;
        }
        let start = chain.vertices[..chain.front]
            .iter()
            .rev()
            .find(|&&v| self.vertices[v].is_input())?;
        let end = chain.vertices[chain.front..]
            .iter()
            .find(|&&v| self.vertices[v].is_input())?;
        Some(Line::new(
            self.vertices[*start].point,
            self.vertices[*end].point,
        ))
    }

    /// Splices `vertex` into the unswept part of the current edge,
    /// keeping the chain in sweep order.
    ///
    /// Returns `false`, leaving the chain as is, if the chain already
    /// has a vertex there or the point is outside the current edge.
    pub fn insert_ahead(&mut self, key: ChainKey, vertex: VertexKey) -> bool {
        let point = self.vertices[vertex].point;
        let chain = &self.chains[key];
        let mut idx = None;
        for (offset, &v) in chain.vertices[chain.front..].iter().enumerate() {
            let other = &self.vertices[v];
            if coord_approx_eq(other.point, point) {
                return false;
            }
            if SweepPoint::from(other.point) > SweepPoint::from(point) {
                idx = Some(chain.front + offset);
                break;
            }
            if other.is_input() {
                break;
            }
        }
        match idx {
            Some(idx) => {
                self.chains[key].vertices.insert(idx, vertex);
                true
            }
            None => false,
        }
    }

    /// All edges of the chain, in sweep order.
    pub fn edges(&self, key: ChainKey) -> impl Iterator<Item = Line<f64>> + '_ {
        self.chains[key]
            .vertices
            .windows(2)
            .map(move |w| Line::new(self.vertices[w[0]].point, self.vertices[w[1]].point))
    }
}
