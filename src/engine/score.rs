use crate::state::BoardState;
use crate::types::Player;

/// Boxes owned by `player`.
#[inline]
#[must_use]
pub fn score(state: &BoardState, player: Player) -> u32 {
    state.score(player)
}

/// Box-count difference (#Agent owned) - (#Human owned). Exact at a terminal
/// position, used as the heuristic estimate at a depth cutoff.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_wrap)] // at most 49 boxes
pub fn box_margin(state: &BoardState) -> i32 {
    state.score(Player::Agent) as i32 - state.score(Player::Human) as i32
}
