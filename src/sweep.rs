use std::{cmp::Ordering, collections::BTreeSet, marker::PhantomData};

use geo::{Coordinate, Line};
use log::{debug, trace};

use crate::{
    active::SweepLine,
    events::{ActiveEntry, SweepPoint},
    monotone::{ChainArena, ChainKey, Partition, Partitioner, Vertex},
    points::PointSet,
    shape::Path,
    surface::Surface,
    utils::{coord_approx_eq, filter_collinear, EPSILON},
};

/// Monotone-chain plane sweep computing the intersection points of
/// two operands.
///
/// Both operands are partitioned into monotone chains in one arena.
/// The active chain list holds one entry per unfinished chain, keyed
/// by its front vertex; the sweeping chain list holds the chains that
/// currently cross the sweep line, bottom to top.
///
/// Events are handled one point at a time. Every input edge ending,
/// starting or passing through the point is tested against the others,
/// and the chains through it are sorted again by their direction past
/// the point. Crossings found between neighbours further ahead are
/// spliced into both chains as intersection vertices, so the sweep
/// stops there to put them back in order.
pub(crate) struct Sweep<S: Surface> {
    arena: ChainArena,
    active: BTreeSet<ActiveEntry>,
    sweeping: SweepLine,
    operands: [Partition; 2],
    split_id: u64,
    output: PointSet,
    shortcut: bool,
    _surface: PhantomData<S>,
}

fn partition<S: Surface>(
    partitioner: &mut Partitioner,
    arena: &mut ChainArena,
    paths: &[Path],
) -> Partition {
    let mut out = Partition::default();
    for path in paths {
        if path.closed {
            let ring = filter_collinear(&path.coords, S::orientation);
            partitioner.partition(arena, &ring, true, &mut out);
        } else {
            partitioner.partition(arena, &path.coords, false, &mut out);
        }
    }
    out
}

/// Order of two sweeping chains at sweep position `x`: by the height of
/// their current edges, and by their angle when the heights tie.
fn compare<S: Surface>(arena: &ChainArena, a: ChainKey, b: ChainKey, x: f64) -> Ordering {
    let ea = arena
        .current_edge(a)
        .expect("sweeping chain has a current edge");
    let eb = arena
        .current_edge(b)
        .expect("sweeping chain has a current edge");
    let (ya, yb) = (S::y_at(ea, x), S::y_at(eb, x));
    if (ya - yb).abs() > EPSILON {
        return ya.partial_cmp(&yb).unwrap_or(Ordering::Equal);
    }
    S::slope_angle(ea)
        .partial_cmp(&S::slope_angle(eb))
        .unwrap_or(Ordering::Equal)
}

/// Whether a non-vertical edge passes through `pt`.
fn passes_through<S: Surface>(edge: Line<f64>, pt: Coordinate<f64>) -> bool {
    if coord_approx_eq(edge.start, pt) || coord_approx_eq(edge.end, pt) {
        return true;
    }
    edge.start.x <= pt.x && pt.x <= edge.end.x && (S::y_at(edge, pt.x) - pt.y).abs() <= EPSILON
}

impl<S: Surface> Sweep<S> {
    pub fn new(a: &[Path], b: &[Path], shortcut: bool) -> Self {
        let mut arena = ChainArena::new();
        let mut partitioner = Partitioner::new();
        let first = partition::<S>(&mut partitioner, &mut arena, a);
        let split_id = partitioner.next_id();
        let second = partition::<S>(&mut partitioner, &mut arena, b);
        debug!(
            "sweep: {na} + {nb} chains, {va} + {vb} verticals, split id {split_id}",
            na = first.chains.len(),
            nb = second.chains.len(),
            va = first.verticals.len(),
            vb = second.verticals.len(),
        );

        let mut sweep = Sweep {
            arena,
            active: BTreeSet::new(),
            sweeping: SweepLine::default(),
            operands: [first, second],
            split_id,
            output: PointSet::new(),
            shortcut,
            _surface: PhantomData,
        };
        let keys: Vec<_> = sweep.arena.chain_keys().collect();
        for key in keys {
            sweep.push_active(key);
        }
        sweep
    }

    /// Runs the sweep to completion, or until the first intersection
    /// when `shortcut` is set.
    pub fn run(mut self) -> PointSet {
        self.check_verticals();
        if self.is_done() {
            return self.output;
        }

        while let Some(entry) = self.active.pop_first() {
            let point = entry.point;
            let mut chains = vec![entry.chain];
            while self.active.first().map_or(false, |e| e.point == point) {
                chains.extend(self.active.pop_first().map(|e| e.chain));
            }

            debug!(
                "sweep: {n} events at {pt:?}",
                n = chains.len(),
                pt = point.coord()
            );
            self.handle_point(point.coord(), &chains);
            if self.is_done() {
                debug!("sweep: stopping at first intersection");
                break;
            }
        }
        self.output
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.shortcut && !self.output.is_empty()
    }

    #[inline]
    fn is_first(&self, chain: ChainKey) -> bool {
        self.arena.chain(chain).id() < self.split_id
    }

    fn entry(&self, chain: ChainKey) -> Option<ActiveEntry> {
        let vertex = self.arena.vertex(self.arena.front(chain)?);
        Some(ActiveEntry {
            point: SweepPoint::from(vertex.point),
            kind: vertex.kind,
            chain,
        })
    }

    fn push_active(&mut self, chain: ChainKey) {
        if let Some(entry) = self.entry(chain) {
            self.active.insert(entry);
        }
    }

    /// Applies `f` to the arena while keeping the active entry of
    /// `chain` in sync with its front vertex.
    fn update_chain<F, R>(&mut self, chain: ChainKey, f: F) -> R
    where
        F: FnOnce(&mut ChainArena) -> R,
    {
        if let Some(entry) = self.entry(chain) {
            self.active.remove(&entry);
        }
        let result = f(&mut self.arena);
        self.push_active(chain);
        result
    }

    /// Reports the intersection of two edges, if the chains they belong
    /// to come from different operands.
    fn report(
        &mut self,
        a: (ChainKey, Line<f64>),
        b: (ChainKey, Line<f64>),
    ) -> Option<Coordinate<f64>> {
        let (first, second) = match (self.is_first(a.0), self.is_first(b.0)) {
            (true, false) => (a.1, b.1),
            (false, true) => (b.1, a.1),
            _ => return None,
        };
        let pt = S::intersect_edges(first, second)?;
        if self.output.insert(pt) {
            debug!("sweep: intersection at {pt:?}");
        }
        Some(pt)
    }

    /// Handles every event at `pt`; `chains` have their front vertex
    /// exactly there.
    fn handle_point(&mut self, pt: Coordinate<f64>, chains: &[ChainKey]) {
        // Input edges at the point: those ending there, then those
        // starting there, of each chain with an event.
        let mut edges: Vec<(ChainKey, Line<f64>)> = vec![];
        for &chain in chains {
            loop {
                edges.extend(self.arena.current_edge(chain).map(|e| (chain, e)));
                self.arena.advance(chain);
                let repeated = self
                    .arena
                    .front(chain)
                    .map_or(false, |v| self.arena.vertex(v).point == pt);
                if !repeated {
                    break;
                }
            }
            edges.extend(self.arena.current_edge(chain).map(|e| (chain, e)));
            self.push_active(chain);
        }
        edges.dedup();

        // Take out every chain through the point; the lowest index
        // vacated is where the neighbours below and above now meet.
        let mut gap: Option<usize> = None;
        let mut vacate = |sweeping: &mut SweepLine, chain: ChainKey| {
            if let Some(idx) = sweeping.remove_key(chain) {
                gap = Some(gap.map_or(idx, |g| g.min(idx)));
            }
        };
        for &chain in chains {
            vacate(&mut self.sweeping, chain);
        }
        let through: Vec<_> = self
            .sweeping
            .keys()
            .filter_map(|c| Some((c, self.arena.current_edge(c)?)))
            .filter(|&(_, e)| passes_through::<S>(e, pt))
            .collect();
        for &(chain, edge) in &through {
            trace!("sweep: chain {chain} passes through {pt:?}");
            vacate(&mut self.sweeping, chain);
            edges.push((chain, edge));
        }

        for (i, &a) in edges.iter().enumerate() {
            for &b in &edges[i + 1..] {
                if self.report(a, b).is_some() && self.is_done() {
                    return;
                }
            }
        }

        let below = gap.and_then(|g| g.checked_sub(1)).and_then(|i| self.sweeping.get(i));
        let above = gap.and_then(|g| self.sweeping.get(g));

        // Sort the chains through the point by their direction past it.
        let arena = &self.arena;
        let mut placed = vec![];
        for chain in chains
            .iter()
            .copied()
            .chain(through.iter().map(|&(c, _)| c))
        {
            if arena.current_edge(chain).is_none() {
                continue;
            }
            let idx = self
                .sweeping
                .add_key(chain, |a, b| compare::<S>(arena, a, b, pt.x));
            placed.push(chain);
            trace!("sweep: chain {chain} placed at {idx}");
        }

        let mut pairs = vec![];
        if let (Some(lo), Some(hi)) = (
            placed.iter().filter_map(|&c| self.sweeping.position(c)).min(),
            placed.iter().filter_map(|&c| self.sweeping.position(c)).max(),
        ) {
            for idx in lo.saturating_sub(1)..=hi {
                if let (Some(a), Some(b)) = (self.sweeping.get(idx), self.sweeping.get(idx + 1)) {
                    pairs.push((a, b));
                }
            }
        }
        if let (Some(a), Some(b)) = (below, above) {
            pairs.push((a, b));
        }
        for (a, b) in pairs {
            self.find_intersection(a, b, pt);
            if self.is_done() {
                return;
            }
        }
    }

    /// Tests the current edges of two chains that have become
    /// neighbours at sweep position `at`.
    ///
    /// Intersections are reported at once, when the chains come from
    /// different operands. A crossing ahead of the sweep, inside both
    /// edges, is spliced into both chains as an intersection vertex.
    fn find_intersection(&mut self, a: ChainKey, b: ChainKey, at: Coordinate<f64>) {
        let (ea, eb) = match (self.arena.current_edge(a), self.arena.current_edge(b)) {
            (Some(ea), Some(eb)) => (ea, eb),
            _ => return,
        };
        let pt = match self
            .report((a, ea), (b, eb))
            .or_else(|| S::intersect_edges(ea, eb))
        {
            Some(pt) => pt,
            None => return,
        };

        if SweepPoint::from(pt) <= SweepPoint::from(at) || coord_approx_eq(pt, at) {
            return;
        }
        if [ea.start, ea.end, eb.start, eb.end]
            .iter()
            .any(|&end| coord_approx_eq(end, pt))
        {
            trace!("sweep: chains {a} and {b} meet at the vertex {pt:?}");
            return;
        }

        let vertex = self.arena.add_vertex(Vertex::intersection(pt));
        debug!("sweep: scheduling crossing of chains {a} and {b} at {pt:?}");
        for chain in [a, b] {
            if !self.update_chain(chain, |arena| arena.insert_ahead(chain, vertex)) {
                trace!("sweep: chain {chain} already stops at {pt:?}");
            }
        }
    }

    /// Tests the vertical edges, which belong to no chain, against the
    /// other operand by direct pairwise intersection.
    fn check_verticals(&mut self) {
        let arena = &self.arena;
        let chain_edges = |p: &Partition| -> Vec<Line<f64>> {
            p.chains.iter().flat_map(|&c| arena.edges(c)).collect()
        };
        let [first, second] = &self.operands;
        if first.verticals.is_empty() && second.verticals.is_empty() {
            return;
        }

        let against_first = chain_edges(first);
        let mut against_second = chain_edges(second);
        against_second.extend_from_slice(&second.verticals);

        let pairs = [
            (&first.verticals, &against_second),
            (&second.verticals, &against_first),
        ];
        for (verticals, edges) in pairs {
            for v in verticals {
                for e in edges {
                    if let Some(pt) = S::intersect_edges(*v, *e) {
                        trace!("sweep: vertical {v:?} meets {e:?} at {pt:?}");
                        self.output.insert(pt);
                        if self.shortcut {
                            return;
                        }
                    }
                }
            }
        }
    }
}

/// Intersection points of two operands given as paths.
pub(crate) fn sweep_intersections<S: Surface>(a: &[Path], b: &[Path], shortcut: bool) -> PointSet {
    Sweep::<S>::new(a, b, shortcut).run()
}

#[cfg(test)]
mod tests {
    use geo::{Coordinate, Rect};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        geometry::tests::init_log,
        monotone::tests::coords,
        naive::naive_intersections,
        random::{monotone_path, snap, star_ring},
        surface::{Cartesian, Wgs84},
    };

    fn ring(pts: &[(f64, f64)]) -> Path {
        let mut coords = coords(pts);
        coords.push(coords[0]);
        Path {
            coords,
            closed: true,
        }
    }

    fn open(pts: &[(f64, f64)]) -> Path {
        Path {
            coords: coords(pts),
            closed: false,
        }
    }

    fn square(x: f64, y: f64, w: f64) -> Path {
        ring(&[(x, y), (x + w, y), (x + w, y + w), (x, y + w)])
    }

    /// The input edges the sweep works on: rings lose their collinear
    /// points, and repeated points are dropped.
    fn edges<S: Surface>(paths: &[Path]) -> Vec<Line<f64>> {
        paths
            .iter()
            .flat_map(|p| {
                let mut coords = if p.closed {
                    filter_collinear(&p.coords, S::orientation)
                } else {
                    p.coords.clone()
                };
                coords.dedup();
                coords
                    .windows(2)
                    .map(|w| Line::new(w[0], w[1]))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn naive<S: Surface>(a: &[Path], b: &[Path]) -> PointSet {
        naive_intersections::<S>(&edges::<S>(a), &edges::<S>(b), false)
    }

    /// Sweeps the operands in both orders and checks the result against
    /// the pairwise test of their edges.
    fn assert_matches_naive<S: Surface>(a: &[Path], b: &[Path]) {
        let expected = naive::<S>(a, b);
        assert_same_points(&sweep_intersections::<S>(a, b, false), &expected);
        assert_same_points(&sweep_intersections::<S>(b, a, false), &expected);
        assert_eq!(
            sweep_intersections::<S>(a, b, true).is_empty(),
            expected.is_empty()
        );
    }

    fn assert_same_points(left: &PointSet, right: &PointSet) {
        assert_eq!(left.len(), right.len(), "{left:?} != {right:?}");
        for p in left.iter() {
            assert!(
                right
                    .iter()
                    .any(|q| (p.x - q.x).abs() < 1e-6 && (p.y - q.y).abs() < 1e-6),
                "{p:?} missing from {right:?}"
            );
        }
    }

    #[test]
    fn check_overlapping_squares() {
        init_log();
        // Chains are made of the horizontal edges; the crossings are
        // found between vertical edges and chains.
        let out = sweep_intersections::<Cartesian>(
            &[square(-10., -10., 20.)],
            &[square(0., 0., 20.)],
            false,
        );
        assert_eq!(out.len(), 2);
        assert!(out.contains((10., 0.).into()));
        assert!(out.contains((0., 10.).into()));
    }

    #[test]
    fn check_diamonds() {
        init_log();
        let a = [ring(&[(0., 0.), (2., -2.), (4., 0.), (2., 2.)])];
        let b = [ring(&[(1., 0.), (3., -2.), (5., 0.), (3., 2.)])];
        let out = sweep_intersections::<Cartesian>(&a, &b, false);
        assert_eq!(out.len(), 2);
        assert!(out.contains((2.5, 1.5).into()));
        assert!(out.contains((2.5, -1.5).into()));
    }

    #[test]
    fn check_multiple_crossings() {
        init_log();
        // A zig-zag crossing a straight line four times.
        let a = [open(&[(0., -1.), (1., 1.), (2., -1.), (3., 1.), (4., -1.)])];
        let b = [open(&[(-1., 0.), (5., 0.)])];
        let out = sweep_intersections::<Cartesian>(&a, &b, false);
        assert_eq!(out.len(), 4);
        for x in [0.5, 1.5, 2.5, 3.5] {
            assert!(out.contains((x, 0.).into()));
        }
        assert_eq!(sweep_intersections::<Cartesian>(&a, &b, true).len(), 1);
    }

    #[test]
    fn check_same_operand_not_reported() {
        init_log();
        // Two diamonds of the same operand touch at (4, 0).
        let a = [
            ring(&[(0., 0.), (2., -2.), (4., 0.), (2., 2.)]),
            ring(&[(4., 0.), (6., -2.), (8., 0.), (6., 2.)]),
        ];
        let b = [open(&[(10., 0.), (11., 0.)])];
        assert!(sweep_intersections::<Cartesian>(&a, &b, false).is_empty());
    }

    #[test]
    fn check_touching_vertex() {
        init_log();
        // The apex of b lies on an edge of a.
        let a = [open(&[(0., 0.), (4., 0.)])];
        let b = [open(&[(1., -2.), (2., 0.), (3., -2.)])];
        let out = sweep_intersections::<Cartesian>(&a, &b, false);
        assert_eq!(out.len(), 1);
        assert!(out.contains((2., 0.).into()));
    }

    #[test]
    fn check_crossing_at_vertex() {
        init_log();
        // The chain of a crosses y = 0 at its own vertex, then goes on
        // to cross y = 0.5 between vertices.
        let a = [open(&[(1., -1.), (2., 0.), (3., 1.)])];
        let b = [open(&[(0., 0.), (10., 0.)]), open(&[(0., 0.5), (10., 0.5)])];
        let out = sweep_intersections::<Cartesian>(&a, &b, false);
        assert_eq!(out.len(), 2);
        assert!(out.contains((2., 0.).into()));
        assert!(out.contains((2.5, 0.5).into()));
        assert_matches_naive::<Cartesian>(&a, &b);

        // The same, crossing downwards.
        let c = [open(&[(1., 1.), (2., 0.5), (3., -0.5)])];
        let out = sweep_intersections::<Cartesian>(&c, &b, false);
        assert_eq!(out.len(), 2);
        assert!(out.contains((2., 0.5).into()));
        assert!(out.contains((2.5, 0.).into()));
        assert_matches_naive::<Cartesian>(&c, &b);
    }

    #[test]
    fn check_many_chains_through_a_point() {
        init_log();
        // A fan of edges of a through (2, 2), crossed by b there and by
        // a line of b that overlaps one edge of a.
        let a = [
            open(&[(0., 0.), (4., 4.)]),
            open(&[(0., 2.), (4., 2.)]),
            open(&[(0., 4.), (4., 0.)]),
        ];
        let b = [
            open(&[(1., 2.), (3., 2.)]),
            open(&[(0., 1.), (4., 3.)]),
        ];
        let out = sweep_intersections::<Cartesian>(&a, &b, false);
        assert!(out.contains((2., 2.).into()));
        assert_matches_naive::<Cartesian>(&a, &b);

        // Chains of both operands ending and starting at one point.
        let c = [open(&[(0., 0.), (2., 2.), (0., 4.)])];
        let d = [open(&[(2., 2.), (4., 0.)]), open(&[(4., 4.), (2., 2.)])];
        let out = sweep_intersections::<Cartesian>(&c, &d, false);
        assert_eq!(out.len(), 1);
        assert!(out.contains((2., 2.).into()));
        assert_matches_naive::<Cartesian>(&c, &d);
    }

    #[test]
    fn check_verticals_of_both_operands() {
        init_log();
        // Each operand contributes a vertical; the verticals meet end
        // to end, and the vertical of b crosses a chain of a.
        let a = [open(&[(0., 0.), (5., 0.), (5., 10.)])];
        let b = [open(&[(5., 10.), (5., 20.)]), open(&[(3., -5.), (3., 5.)])];
        let out = sweep_intersections::<Cartesian>(&a, &b, false);
        assert_eq!(out.len(), 2);
        assert!(out.contains((5., 10.).into()));
        assert!(out.contains((3., 0.).into()));

        // Overlapping verticals have no single intersection point.
        let c = [open(&[(5., 2.), (5., 8.)])];
        assert!(sweep_intersections::<Cartesian>(&a, &c, false).is_empty());
    }

    #[test]
    fn check_random_paths_against_naive() {
        init_log();
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = Rect::new((0., 0.), (100., 100.));
        for _ in 0..50 {
            let a = [open_coords(monotone_path(&mut rng, bounds, 12))];
            let b = [
                open_coords(monotone_path(&mut rng, bounds, 12)),
                open_coords(monotone_path(&mut rng, bounds, 6)),
            ];
            let sweep = sweep_intersections::<Cartesian>(&a, &b, false);
            let naive = naive::<Cartesian>(&a, &b);
            assert_same_points(&sweep, &naive);
            assert_eq!(
                sweep_intersections::<Cartesian>(&a, &b, true).is_empty(),
                naive.is_empty()
            );
        }
    }

    #[test]
    fn check_random_rings_against_naive() {
        init_log();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let a = [closed_coords(star_ring(&mut rng, Coordinate { x: 0., y: 0. }, (5., 20.), 16))];
            let b = [closed_coords(star_ring(&mut rng, Coordinate { x: 8., y: 3. }, (5., 20.), 16))];
            let sweep = sweep_intersections::<Cartesian>(&a, &b, false);
            let naive = naive::<Cartesian>(&a, &b);
            assert_same_points(&sweep, &naive);

            let mirrored = sweep_intersections::<Cartesian>(&b, &a, false);
            assert_same_points(&sweep, &mirrored);
        }
    }

    #[test]
    fn check_random_arcs_against_naive() {
        init_log();
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = Rect::new((-30., -30.), (30., 30.));
        for _ in 0..30 {
            let a = [open_coords(monotone_path(&mut rng, bounds, 10))];
            let b = [open_coords(monotone_path(&mut rng, bounds, 10))];
            let sweep = sweep_intersections::<Wgs84>(&a, &b, false);
            let naive = naive::<Wgs84>(&a, &b);
            assert_same_points(&sweep, &naive);
        }
    }

    #[test]
    fn check_grid_paths_against_naive() {
        init_log();
        // On a coarse grid, vertices land on other edges, vertices are
        // shared and edges overlap.
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Rect::new((0., 0.), (12., 12.));
        for _ in 0..200 {
            let a = [open_coords(snap(monotone_path(&mut rng, bounds, 8)))];
            let b = [
                open_coords(snap(monotone_path(&mut rng, bounds, 8))),
                open_coords(snap(monotone_path(&mut rng, bounds, 5))),
            ];
            assert_matches_naive::<Cartesian>(&a, &b);
        }
    }

    #[test]
    fn check_grid_rings_against_naive() {
        init_log();
        let mut rng = StdRng::seed_from_u64(9);
        let mut grid_ring = |center: (f64, f64)| {
            let ring = snap(star_ring(&mut rng, center.into(), (2., 8.), 10));
            Some(closed_coords(ring)).filter(|r| r.coords.len() >= 4)
        };
        let mut tested = 0;
        for _ in 0..200 {
            let (a, b) = match (grid_ring((0., 0.)), grid_ring((4., 2.))) {
                (Some(a), Some(b)) => ([a], [b]),
                _ => continue,
            };
            assert_matches_naive::<Cartesian>(&a, &b);
            tested += 1;
        }
        assert!(tested > 100);
    }

    #[test]
    fn check_grid_mixed_against_naive() {
        init_log();
        let mut rng = StdRng::seed_from_u64(13);
        let bounds = Rect::new((-8., -8.), (8., 8.));
        for _ in 0..200 {
            let ring = snap(star_ring(&mut rng, Coordinate { x: 0., y: 0. }, (3., 8.), 8));
            if ring.len() < 4 {
                continue;
            }
            let a = [closed_coords(ring)];
            let b = [open_coords(snap(monotone_path(&mut rng, bounds, 6)))];
            assert_matches_naive::<Cartesian>(&a, &b);
        }
    }

    fn open_coords(coords: Vec<Coordinate<f64>>) -> Path {
        Path {
            coords,
            closed: false,
        }
    }

    fn closed_coords(coords: Vec<Coordinate<f64>>) -> Path {
        Path {
            coords,
            closed: true,
        }
    }
}
