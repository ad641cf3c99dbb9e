#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited
#![allow(clippy::cast_possible_truncation)] // ids fit u8 by MAX_BOARD_SIZE

pub mod error;
pub mod types;
pub mod topology;
pub mod state;
pub mod hash;
pub mod notation;
pub mod rng;
pub mod game;
pub mod selfplay;

pub mod engine {
    pub mod apply;
    pub mod score;
}

pub mod solver;

// Re-exports: stable minimal API surface for external callers
pub use crate::engine::apply::{apply_move, MoveOutcome};
pub use crate::engine::score::{box_margin, score};
pub use crate::error::{Error, Result};
pub use crate::game::{
    agent_move, configure, is_over, new_game, player_move, winner, AgentTurn, Game, GameConfig,
    Winner,
};
pub use crate::hash::{position_key, PositionKey};
pub use crate::notation::{render_board, StateDoc};
pub use crate::rng::rng_for_game;
pub use crate::solver::{search, table_for_board, SearchLimits, SearchOutcome, Solver};
pub use crate::state::{is_terminal, legal_moves, BoardState};
pub use crate::topology::{BoxEdges, Topology, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use crate::types::{BoxId, EdgeId, EdgePosition, Orientation, Player};
