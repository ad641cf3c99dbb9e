//! Error type shared by the game model, the session facade and the notation layer.

use thiserror::Error;

use crate::types::{EdgeId, Player};

/// Errors surfaced to callers. Search never returns these: a corrupted
/// position reaching the search engine is a defect and panics instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board size {size}: expected {min}..={max} dots per side")]
    InvalidBoardSize { size: usize, min: usize, max: usize },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid move: edge {edge} is out of range (board has {total} edges)")]
    EdgeOutOfRange { edge: usize, total: usize },

    #[error("invalid move: edge {edge} is already claimed")]
    EdgeClaimed { edge: EdgeId },

    #[error("invalid move: it is not {player:?}'s turn")]
    OutOfTurn { player: Player },

    #[error("game already over")]
    GameOver,

    #[error("invalid board state: {reason}")]
    InvalidState { reason: String },

    #[error("invalid notation: {reason}")]
    Notation { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for the recoverable move rejections (caller should prompt again).
    #[inline]
    #[must_use]
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            Error::EdgeOutOfRange { .. } | Error::EdgeClaimed { .. } | Error::OutOfTurn { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
