use tracing::debug;

use crate::engine::apply::claim;
use crate::engine::score::box_margin;
use crate::hash::position_key;
use crate::state::BoardState;
use crate::types::{bits128, EdgeId, Player};

use super::tt::{TTEntry, TranspositionTable};

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Minimax value, agent boxes minus human boxes.
    pub value: i32,
    /// `None` at a terminal position or with a zero ply budget.
    pub best_move: Option<EdgeId>,
    /// Nodes visited, root included.
    pub nodes: u64,
    /// Nodes answered from the transposition table.
    pub cache_hits: u64,
}

#[derive(Default)]
struct SearchStats {
    nodes: u64,
    cache_hits: u64,
}

/// Minimax over `state` with `mover` to play.
///
/// Conventions:
/// - Values are from the agent's perspective: the agent maximizes, the human minimizes.
/// - Completing a box keeps the same mover on the next ply (chain rule).
/// - `depth` counts plies of recursion, forced extra turns included; `None` searches to the end.
/// - Moves are tried in ascending edge id and only a strict improvement
///   replaces the incumbent, so ties resolve to the lowest edge id.
///
/// # Panics
/// On a non-terminal position with no unclaimed edge, which a consistent
/// [`BoardState`] cannot reach.
pub fn search(
    state: &BoardState,
    mover: Player,
    depth: Option<u8>,
    tt: &mut dyn TranspositionTable,
) -> SearchOutcome {
    let mut stats = SearchStats::default();
    let (value, best_move) = minimax(state, mover, depth, tt, &mut stats);
    debug!(
        ?mover,
        ?depth,
        value,
        ?best_move,
        nodes = stats.nodes,
        cache_hits = stats.cache_hits,
        tt_len = tt.len(),
        "search finished"
    );
    SearchOutcome {
        value,
        best_move,
        nodes: stats.nodes,
        cache_hits: stats.cache_hits,
    }
}

fn minimax(
    state: &BoardState,
    mover: Player,
    depth: Option<u8>,
    tt: &mut dyn TranspositionTable,
    stats: &mut SearchStats,
) -> (i32, Option<EdgeId>) {
    stats.nodes += 1;

    // Terminal leaf: exact score
    if state.is_terminal() {
        return (box_margin(state), None);
    }
    // Budget exhausted: same formula as a heuristic estimate
    if depth == Some(0) {
        return (box_margin(state), None);
    }

    let key = position_key(state, mover, depth);
    if let Some(entry) = tt.lookup(&key) {
        stats.cache_hits += 1;
        return (entry.value, entry.best_move);
    }

    let child_depth = depth.map(|d| d - 1);
    let mut best: Option<(i32, EdgeId)> = None;
    for edge in bits128(state.unclaimed_edges()) {
        let mut child = state.clone();
        let next = if claim(&mut child, edge, mover) > 0 {
            mover
        } else {
            mover.other()
        };
        let (value, _) = minimax(&child, next, child_depth, tt, stats);

        let improves = match (best, mover) {
            (None, _) => true,
            (Some((incumbent, _)), Player::Agent) => value > incumbent,
            (Some((incumbent, _)), Player::Human) => value < incumbent,
        };
        if improves {
            best = Some((value, edge));
        }
    }

    let Some((value, edge)) = best else {
        panic!(
            "non-terminal position without legal moves (claimed={:#x}, total_edges={})",
            state.claimed_edges(),
            state.topology().total_edges()
        );
    };
    tt.store(
        key,
        TTEntry {
            value,
            best_move: Some(edge),
        },
    );
    (value, Some(edge))
}
