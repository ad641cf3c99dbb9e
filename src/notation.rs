//! Text forms of a board: a JSON document for tools and an ASCII diagram for
//! terminals.
//!
//! Owner strings use one character per edge (or box) in id order:
//! `.` unclaimed, `H` human, `A` agent.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::game::configure;
use crate::state::BoardState;
use crate::types::{BoxId, Orientation, Player};

/// Serializable board description.
///
/// ```json
/// { "size": 3, "edges": "HA..........", "boxes": "....", "next": "agent" }
/// ```
/// `boxes` may be omitted when no box is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDoc {
    pub size: usize,
    pub edges: String,
    #[serde(default)]
    pub boxes: String,
    pub next: Player,
}

impl StateDoc {
    #[must_use]
    pub fn from_state(state: &BoardState) -> Self {
        Self {
            size: state.topology().size(),
            edges: owners_to_string(&state.edge_owners()),
            boxes: owners_to_string(&state.box_owners()),
            next: state.next,
        }
    }

    /// Build the topology for `size` and a validated state on it.
    ///
    /// # Errors
    /// [`Error::InvalidBoardSize`] for an unsupported `size`,
    /// [`Error::Notation`] for an unknown owner character and
    /// [`Error::InvalidState`] when the owners do not describe a legal position.
    pub fn to_state(&self) -> Result<BoardState> {
        let topology = configure(self.size)?;
        let edges = parse_owners(&self.edges, "edges")?;
        let boxes = if self.boxes.trim().is_empty() {
            vec![None; topology.num_boxes()]
        } else {
            parse_owners(&self.boxes, "boxes")?
        };
        BoardState::from_owners(&topology, &edges, &boxes, self.next)
    }

    /// # Errors
    /// [`Error::Json`] when `s` is not a state document.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// # Errors
    /// [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn owners_to_string(owners: &[Option<Player>]) -> String {
    owners
        .iter()
        .map(|o| o.map_or('.', Player::symbol))
        .collect()
}

fn parse_owners(s: &str, what: &str) -> Result<Vec<Option<Player>>> {
    s.trim()
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '.' | '-' | '0' => Ok(None),
            _ => Player::from_symbol(c).map(Some).ok_or_else(|| Error::Notation {
                reason: format!("invalid character '{c}' at position {i} in {what}"),
            }),
        })
        .collect()
}

/// ASCII diagram of the board. Dots are `+`; a claimed horizontal edge is
/// drawn `-H-`/`-A-`, a claimed vertical edge as its owner's letter, and an
/// owned box shows its owner in the middle.
#[must_use]
pub fn render_board(state: &BoardState) -> String {
    let topo = state.topology();
    let n = topo.size() as u8;
    let mut out = String::new();

    let h_cell = |row: u8, col: u8| -> String {
        topo.edge_at(Orientation::Horizontal, row, col)
            .and_then(|e| state.edge_owner(e))
            .map_or_else(|| "   ".to_string(), |p| format!("-{}-", p.symbol()))
    };
    let v_cell = |row: u8, col: u8| -> char {
        topo.edge_at(Orientation::Vertical, row, col)
            .and_then(|e| state.edge_owner(e))
            .map_or(' ', Player::symbol)
    };

    for row in 0..n {
        out.push('+');
        for col in 0..n - 1 {
            out.push_str(&h_cell(row, col));
            out.push('+');
        }
        out.push('\n');
        if row + 1 == n {
            break;
        }
        for col in 0..n {
            out.push(v_cell(row, col));
            if col + 1 < n {
                let b: BoxId = row * (n - 1) + col;
                let tag = state.box_owner(b).map_or(' ', Player::symbol);
                let _ = write!(out, " {tag} ");
            }
        }
        out.push('\n');
    }
    out
}
