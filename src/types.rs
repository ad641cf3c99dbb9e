use serde::{Deserialize, Serialize};

/// Edge identifier: horizontal edges first (row-major), then vertical edges.
pub type EdgeId = u8;

/// Box identifier, row-major over the (N-1)x(N-1) cells.
pub type BoxId = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Agent,
}

impl Player {
    #[inline]
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Player::Human => Player::Agent,
            Player::Agent => Player::Human,
        }
    }

    /// Slot in per-player arrays.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Player::Human => 0,
            Player::Agent => 1,
        }
    }

    /// Single-character tag used by the text notation.
    #[inline]
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Player::Human => 'H',
            Player::Agent => 'A',
        }
    }

    #[inline]
    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'H' | 'h' => Some(Player::Human),
            'A' | 'a' => Some(Player::Agent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Lattice position of an edge. For horizontal edges `row` is the dot row and
/// `col` the left dot; for vertical edges `row` is the upper dot and `col` the dot column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgePosition {
    pub orientation: Orientation,
    pub row: u8,
    pub col: u8,
}

/// Iterate set bits of a `u128` in ascending order.
#[inline]
pub(crate) fn bits128(mut mask: u128) -> impl Iterator<Item = u8> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let idx = mask.trailing_zeros() as u8;
        mask &= mask - 1;
        Some(idx)
    })
}
