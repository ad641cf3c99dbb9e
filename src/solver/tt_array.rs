use std::mem::size_of;

use super::tt::{TTEntry, TranspositionTable};
use crate::hash::PositionKey;

/// Fixed-size direct-mapped transposition table.
/// - Capacity must be a power of two
/// - Index = key fingerprint & mask
/// - Replacement: depth-preferred (replace if new depth >= resident depth,
///   unbounded searches count as deepest)
/// - Stores the full key for verification, so a collision only costs a miss
pub struct FixedTT {
    mask: usize,
    slots: Vec<Option<(PositionKey, TTEntry)>>,
    count: usize,
}

#[inline]
fn depth_rank(key: &PositionKey) -> u16 {
    key.depth.map_or(u16::MAX, u16::from)
}

impl FixedTT {
    /// # Panics
    /// If `cap_pow2` is not a power of two.
    #[inline]
    #[must_use]
    pub fn with_capacity_pow2(cap_pow2: usize) -> Self {
        assert!(cap_pow2.is_power_of_two(), "TT capacity must be a power of two");
        Self {
            mask: cap_pow2 - 1,
            slots: vec![None; cap_pow2],
            count: 0,
        }
    }

    #[inline]
    fn index(&self, key: &PositionKey) -> usize {
        (key.fingerprint() as usize) & self.mask
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Approximate bytes per slot.
    #[inline]
    #[must_use]
    pub fn bytes_per_entry() -> usize {
        size_of::<Option<(PositionKey, TTEntry)>>()
    }

    /// Largest power-of-two capacity that fits under the budget (in bytes).
    /// Returns at least 1.
    #[inline]
    #[must_use]
    pub fn capacity_for_budget_bytes(budget_bytes: usize) -> usize {
        let bpe = Self::bytes_per_entry();
        if bpe == 0 || budget_bytes < bpe {
            return 1;
        }
        let max_entries = budget_bytes / bpe;
        // round down to a power of two
        if max_entries.is_power_of_two() {
            max_entries
        } else {
            (max_entries.next_power_of_two() >> 1).max(1)
        }
    }

    #[inline]
    #[must_use]
    pub fn approx_bytes_for_capacity(capacity: usize) -> usize {
        capacity.saturating_mul(Self::bytes_per_entry())
    }

    /// Construct a table from a MiB budget (rounded down to a power-of-two capacity).
    #[inline]
    #[must_use]
    pub fn with_budget_mib(mib: usize) -> Self {
        let budget = mib.saturating_mul(1024 * 1024);
        Self::with_capacity_pow2(Self::capacity_for_budget_bytes(budget))
    }
}

impl TranspositionTable for FixedTT {
    #[inline]
    fn lookup(&self, key: &PositionKey) -> Option<TTEntry> {
        match &self.slots[self.index(key)] {
            Some((k, entry)) if k == key => Some(*entry),
            _ => None,
        }
    }

    #[inline]
    fn store(&mut self, key: PositionKey, entry: TTEntry) {
        let idx = self.index(&key);
        let slot = &mut self.slots[idx];
        match slot {
            None => {
                *slot = Some((key, entry));
                self.count += 1;
            }
            Some((k, e)) => {
                // Same key: refresh. Collision: keep the deeper search.
                if *k == key || depth_rank(&key) >= depth_rank(k) {
                    *k = key;
                    *e = entry;
                }
            }
        }
    }

    #[inline]
    fn clear(&mut self) {
        self.slots.fill(None);
        self.count = 0;
    }

    #[inline]
    fn len(&self) -> usize {
        self.count
    }
}
