use tracing::trace;

use crate::error::{Error, Result};
use crate::state::BoardState;
use crate::types::{BoxId, EdgeId, Player};

/// Result of claiming one edge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// Boxes newly owned by the mover, ascending.
    pub completed: Vec<BoxId>,
    /// The mover plays again (at least one box was completed).
    pub extra_turn: bool,
}

/// Claim `edge` for `player`, assign every box it completes and hand the turn
/// to the right player: `player` again after a completion, the opponent otherwise.
///
/// Validation happens before any mutation, so a rejected move leaves `state`
/// untouched.
///
/// # Errors
/// [`Error::EdgeOutOfRange`] when `edge` is not on the board and
/// [`Error::EdgeClaimed`] when it is already taken.
pub fn apply_move(state: &mut BoardState, edge: usize, player: Player) -> Result<MoveOutcome> {
    let total = state.topology().total_edges();
    if edge >= total {
        return Err(Error::EdgeOutOfRange { edge, total });
    }
    let edge = edge as EdgeId;
    if state.is_claimed(edge) {
        return Err(Error::EdgeClaimed { edge });
    }

    let mut completed = Vec::with_capacity(2);
    claim_edge(state, edge, player, |b| completed.push(b));
    let extra_turn = !completed.is_empty();
    trace!(edge, ?player, ?completed, "edge claimed");
    Ok(MoveOutcome {
        completed,
        extra_turn,
    })
}

/// Unvalidated claim used by the search, which only ever plays legal edges.
/// Returns the number of boxes completed (0, 1 or 2).
#[inline]
pub(crate) fn claim(state: &mut BoardState, edge: EdgeId, player: Player) -> u32 {
    let mut closed = 0;
    claim_edge(state, edge, player, |_| closed += 1);
    closed
}

/// Only the boxes bordering `edge` can change status when it is claimed, so
/// checking those (at most two) is equivalent to scanning every box.
#[inline]
fn claim_edge(state: &mut BoardState, edge: EdgeId, player: Player, mut on_box: impl FnMut(BoxId)) {
    debug_assert!(!state.is_claimed(edge), "edge {edge} claimed twice");
    let claimed = state.claimed_edges() | (1u128 << edge);

    let mut closed: [Option<BoxId>; 2] = [None; 2];
    let topology = state.topology();
    for (slot, b) in closed.iter_mut().zip(topology.boxes_of_edge(edge)) {
        let mask = topology.box_mask(b);
        if claimed & mask == mask && state.box_owner(b).is_none() {
            *slot = Some(b);
        }
    }

    state.set_edge(edge, player);
    let mut gained = false;
    for b in closed.into_iter().flatten() {
        state.set_box(b, player);
        on_box(b);
        gained = true;
    }
    state.next = if gained { player } else { player.other() };
}
