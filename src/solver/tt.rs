use std::hash::BuildHasherDefault;

use hashbrown::HashMap as HbHashMap;

use crate::hash::PositionKey;
use crate::types::EdgeId;

type FastHasher = BuildHasherDefault<ahash::AHasher>;

/// Cached search result: minimax value from the agent's perspective and the
/// first-found best move under ascending edge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub value: i32,
    pub best_move: Option<EdgeId>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TTStats {
    pub stores: u64,
    pub replacements: u64,
    pub clears: u64,
}

/// Memo of search results keyed by exact position snapshots.
///
/// Implementations may drop entries (bounded tables) but must never return an
/// entry for a key other than the one it was stored under.
pub trait TranspositionTable {
    fn lookup(&self, key: &PositionKey) -> Option<TTEntry>;
    fn store(&mut self, key: PositionKey, entry: TTEntry);
    fn clear(&mut self);
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded in-memory table.
#[derive(Debug, Default)]
pub struct InMemoryTT {
    map: HbHashMap<PositionKey, TTEntry, FastHasher>,
    stats: TTStats,
}

impl InMemoryTT {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: HbHashMap::with_capacity_and_hasher(cap, FastHasher::default()),
            stats: TTStats::default(),
        }
    }

    /// Return a snapshot of table statistics.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> TTStats {
        self.stats
    }
}

impl TranspositionTable for InMemoryTT {
    #[inline]
    fn lookup(&self, key: &PositionKey) -> Option<TTEntry> {
        self.map.get(key).copied()
    }

    #[inline]
    fn store(&mut self, key: PositionKey, entry: TTEntry) {
        self.stats.stores = self.stats.stores.saturating_add(1);
        if self.map.insert(key, entry).is_some() {
            self.stats.replacements = self.stats.replacements.saturating_add(1);
        }
    }

    #[inline]
    fn clear(&mut self) {
        self.map.clear();
        self.stats = TTStats {
            clears: self.stats.clears.saturating_add(1),
            ..TTStats::default()
        };
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }
}
