use geo::{Coordinate, Line};
use log::trace;

use super::{ChainArena, ChainKey};

/// Output of partitioning the paths of one operand.
#[derive(Debug, Default)]
pub struct Partition {
    pub chains: Vec<ChainKey>,
    /// Edges with no extent in the sweep coordinate.
    pub verticals: Vec<Line<f64>>,
}

/// Splits paths into monotone chains, numbering chains sequentially.
///
/// The counter is a plain value owned by one sweep. After the first
/// operand is partitioned, [`Partitioner::next_id`] is the split id:
/// chains of the first operand have smaller ids, chains of the second
/// operand have larger or equal ids.
#[derive(Debug, Default)]
pub struct Partitioner {
    next_id: u64,
}

/// A maximal run of edges with the same sign of `dx`.
struct Run {
    points: Vec<Coordinate<f64>>,
    dir: f64,
}

impl Partitioner {
    pub fn new() -> Self {
        Default::default()
    }

    #[inline]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Partitions one path into the arena. A `closed` path is a ring
    /// whose last coordinate repeats the first.
    pub fn partition(
        &mut self,
        arena: &mut ChainArena,
        path: &[Coordinate<f64>],
        closed: bool,
        out: &mut Partition,
    ) {
        let mut coords = path.to_vec();
        coords.dedup();

        let mut runs: Vec<Run> = vec![];
        let mut current = Run {
            points: coords.first().copied().into_iter().collect(),
            dir: 0.,
        };
        let flush = |run: &mut Run, runs: &mut Vec<Run>, start: Coordinate<f64>| {
            let done = std::mem::replace(
                run,
                Run {
                    points: vec![start],
                    dir: 0.,
                },
            );
            if done.points.len() >= 2 {
                runs.push(done);
            }
        };

        for w in coords.windows(2) {
            let (p, q) = (w[0], w[1]);
            let dx = q.x - p.x;
            if dx == 0. {
                out.verticals.push(Line::new(p, q));
                flush(&mut current, &mut runs, q);
                continue;
            }
            let dir = dx.signum();
            if current.dir != 0. && current.dir != dir {
                flush(&mut current, &mut runs, p);
            }
            current.points.push(q);
            current.dir = dir;
        }
        flush(&mut current, &mut runs, Coordinate { x: 0., y: 0. });

        if closed && runs.len() >= 2 {
            let first = &runs[0];
            let last = &runs[runs.len() - 1];
            let wraps = first.points[0] == coords[0]
                && last.points[last.points.len() - 1] == coords[coords.len() - 1]
                && first.dir == last.dir;
            if wraps {
                let last = runs.pop().expect("at least two runs");
                let first = &mut runs[0];
                let mut merged = last.points;
                merged.extend_from_slice(&first.points[1..]);
                first.points = merged;
                trace!("partition: merged wrap-around run");
            }
        }

        for mut run in runs {
            if run.dir < 0. {
                run.points.reverse();
            }
            let id = self.next_id;
            self.next_id += 1;
            let key = arena.add_chain(id, &run.points);
            trace!(
                "partition: chain {key} (id {id}) with {n} vertices",
                n = run.points.len()
            );
            out.chains.push(key);
        }
    }
}
