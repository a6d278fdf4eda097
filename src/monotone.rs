//! Monotone chains and the partitioner that produces them.
//!
//! A monotone chain is a run of edges whose vertices strictly increase
//! in the sweep coordinate (`x`, or longitude). Chains and their
//! vertices live in a [`ChainArena`] and are addressed by integer keys,
//! so the sweep can reorder chains and splice vertices into them
//! without invalidating any key it holds.
mod chain;
pub(crate) use chain::{ChainArena, ChainKey, Vertex, VertexKind};

mod partition;
pub(crate) use partition::{Partition, Partitioner};
