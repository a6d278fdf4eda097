use std::cmp::Ordering;

use crate::monotone::ChainKey;

/// The sweeping chain list: chains crossing the sweep line, ordered
/// bottom to top.
///
/// The order of chains changes as the sweep line moves, so it is not
/// kept in an ordered set. Instead the caller supplies the comparison
/// at the current sweep position when inserting, and chains passing
/// through an event point are removed and inserted again.
#[derive(Debug, Default)]
pub struct SweepLine {
    chains: Vec<ChainKey>,
}

impl SweepLine {
    #[inline]
    pub fn position(&self, key: ChainKey) -> Option<usize> {
        self.chains.iter().position(|&k| k == key)
    }

    /// Inserts `key` before the first chain that compares greater, and
    /// returns its index.
    ///
    /// Uses a positional scan rather than a sort, so an inconsistent
    /// comparison can misplace a chain but never panics.
    pub fn add_key<F>(&mut self, key: ChainKey, mut cmp: F) -> usize
    where
        F: FnMut(ChainKey, ChainKey) -> Ordering,
    {
        debug_assert!(self.position(key).is_none());
        let idx = self
            .chains
            .iter()
            .position(|&other| cmp(key, other) == Ordering::Less)
            .unwrap_or(self.chains.len());
        self.chains.insert(idx, key);
        idx
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<ChainKey> {
        self.chains.get(idx).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = ChainKey> + '_ {
        self.chains.iter().copied()
    }

    /// Removes `key`, returning the index it had.
    pub fn remove_key(&mut self, key: ChainKey) -> Option<usize> {
        let idx = self.position(key)?;
        self.chains.remove(idx);
        Some(idx)
    }
}
