use std::sync::Arc;

use parking_lot::Mutex;

use super::tt::{InMemoryTT, TTEntry, TranspositionTable};
use crate::hash::PositionKey;

/// Handle to one table shared between threads. Clones point at the same
/// entries; each lookup or store takes the lock for that single key.
///
/// Only share a table between searches on the same board size.
#[derive(Clone)]
pub struct SharedTT {
    inner: Arc<Mutex<Box<dyn TranspositionTable + Send>>>,
}

impl SharedTT {
    /// Share an unbounded [`InMemoryTT`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_table(Box::new(InMemoryTT::new()))
    }

    #[inline]
    #[must_use]
    pub fn with_table(table: Box<dyn TranspositionTable + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }
}

impl Default for SharedTT {
    fn default() -> Self {
        Self::new()
    }
}

impl TranspositionTable for SharedTT {
    #[inline]
    fn lookup(&self, key: &PositionKey) -> Option<TTEntry> {
        self.inner.lock().lookup(key)
    }

    #[inline]
    fn store(&mut self, key: PositionKey, entry: TTEntry) {
        self.inner.lock().store(key, entry);
    }

    #[inline]
    fn clear(&mut self) {
        self.inner.lock().clear();
    }

    #[inline]
    fn len(&self) -> usize {
        self.inner.lock().len()
    }
}
