use crate::state::BoardState;
use crate::types::Player;

pub mod minimax;
pub mod tt;
pub mod tt_array;
pub mod tt_shared;

pub use minimax::{search, SearchOutcome};
pub use tt::{InMemoryTT, TTEntry, TTStats, TranspositionTable};
pub use tt_array::FixedTT;
pub use tt_shared::SharedTT;

/// Largest board searched to the end by [`SearchLimits::for_board`].
pub const FULL_DEPTH_MAX_SIZE: usize = 3;
/// Most plies [`SearchLimits::for_board`] grants on larger boards.
pub const DEFAULT_DEPTH_BUDGET: u8 = 6;
/// Cap on the full-width node count `E * (E - 1) * .. * (E - d + 1)` of a
/// `d`-ply search from an empty board with `E` edges.
pub const NODE_ESTIMATE_LIMIT: u64 = 100_000_000;
/// Cache size used on boards above [`FULL_DEPTH_MAX_SIZE`] when none is given.
pub const DEFAULT_CACHE_MIB: usize = 64;

/// Upper bound on nodes of a `plies`-deep search over `edges` free edges,
/// ignoring transpositions. `None` on overflow.
#[must_use]
pub fn full_width_nodes(edges: u64, plies: u8) -> Option<u64> {
    let mut level = 1u64;
    let mut total = 1u64;
    for i in 0..u64::from(plies) {
        level = level.checked_mul(edges.saturating_sub(i))?;
        total = total.checked_add(level)?;
    }
    Some(total)
}

/// Default table for a board of `size` dots: `cache_mib` when given, otherwise
/// unbounded on boards searched to the end and [`DEFAULT_CACHE_MIB`] beyond.
#[must_use]
pub fn table_for_board(
    size: usize,
    cache_mib: Option<usize>,
) -> Box<dyn TranspositionTable + Send> {
    match cache_mib {
        Some(mib) => Box::new(FixedTT::with_budget_mib(mib)),
        None if size <= FULL_DEPTH_MAX_SIZE => Box::new(InMemoryTT::new()),
        None => Box::new(FixedTT::with_budget_mib(DEFAULT_CACHE_MIB)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Ply budget; `None` searches every line to the end of the game.
    pub depth: Option<u8>,
}

impl SearchLimits {
    #[inline]
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { depth: None }
    }

    #[inline]
    #[must_use]
    pub const fn depth(plies: u8) -> Self {
        Self { depth: Some(plies) }
    }

    /// Full search on boards up to 3x3 dots. Beyond that, the deepest budget
    /// up to [`DEFAULT_DEPTH_BUDGET`] whose full-width node count from an
    /// empty board stays within [`NODE_ESTIMATE_LIMIT`], and at least one ply.
    #[must_use]
    pub fn for_board(size: usize) -> Self {
        if size <= FULL_DEPTH_MAX_SIZE {
            return Self::unbounded();
        }
        let edges = 2 * size as u64 * (size as u64).saturating_sub(1);
        let plies = (1..=DEFAULT_DEPTH_BUDGET)
            .rev()
            .find(|&d| full_width_nodes(edges, d).is_some_and(|n| n <= NODE_ESTIMATE_LIMIT))
            .unwrap_or(1);
        Self::depth(plies)
    }
}

/// A search engine bundled with its own table.
pub struct Solver<T: TranspositionTable = InMemoryTT> {
    tt: T,
    limits: SearchLimits,
}

impl Solver<InMemoryTT> {
    #[inline]
    #[must_use]
    pub fn new(limits: SearchLimits) -> Self {
        Self::with_table(InMemoryTT::new(), limits)
    }
}

impl<T: TranspositionTable> Solver<T> {
    #[inline]
    #[must_use]
    pub fn with_table(tt: T, limits: SearchLimits) -> Self {
        Self { tt, limits }
    }

    /// Search with `mover` to play.
    #[inline]
    pub fn search(&mut self, state: &BoardState, mover: Player) -> SearchOutcome {
        search(state, mover, self.limits.depth, &mut self.tt)
    }

    #[inline]
    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    #[inline]
    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.limits = limits;
    }

    #[inline]
    #[must_use]
    pub fn table(&self) -> &T {
        &self.tt
    }

    /// Drop every cached result. Required before reusing the solver on a board
    /// of another size.
    #[inline]
    pub fn clear(&mut self) {
        self.tt.clear();
    }
}
