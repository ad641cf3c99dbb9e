use std::sync::Arc;

use crate::error::{Error, Result};
use crate::topology::Topology;
use crate::types::{bits128, BoxId, EdgeId, Player};

/// Ownership of every edge and box plus the player to move.
///
/// Edges and boxes are stored as per-player bitsets indexed by
/// [`Player::index`]; an edge is unclaimed when neither player's bit is set.
/// Cloning is cheap (two `u128`, two `u64`, one `Arc` bump), which is what the
/// search relies on when it copies the position for every branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    topology: Arc<Topology>,
    edges: [u128; 2],
    boxes: [u64; 2],
    pub next: Player,
}

impl BoardState {
    /// Empty board: all edges and boxes unclaimed.
    #[inline]
    #[must_use]
    pub fn new(topology: &Arc<Topology>, starting: Player) -> Self {
        Self {
            topology: Arc::clone(topology),
            edges: [0; 2],
            boxes: [0; 2],
            next: starting,
        }
    }

    /// Build a state from explicit owner sequences (one entry per edge / box).
    ///
    /// # Errors
    /// [`Error::InvalidState`] on length mismatches and on box ownership that
    /// disagrees with the edges.
    pub fn from_owners(
        topology: &Arc<Topology>,
        edges: &[Option<Player>],
        boxes: &[Option<Player>],
        next: Player,
    ) -> Result<Self> {
        if edges.len() != topology.total_edges() {
            return Err(Error::InvalidState {
                reason: format!(
                    "expected {} edges, got {}",
                    topology.total_edges(),
                    edges.len()
                ),
            });
        }
        if boxes.len() != topology.num_boxes() {
            return Err(Error::InvalidState {
                reason: format!("expected {} boxes, got {}", topology.num_boxes(), boxes.len()),
            });
        }
        let mut state = Self::new(topology, next);
        for (i, owner) in edges.iter().enumerate() {
            if let Some(p) = owner {
                state.edges[p.index()] |= 1u128 << i;
            }
        }
        for (i, owner) in boxes.iter().enumerate() {
            if let Some(p) = owner {
                state.boxes[p.index()] |= 1u64 << i;
            }
        }
        state.check_invariants()?;
        Ok(state)
    }

    #[inline]
    #[must_use]
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// `None` for an unclaimed edge and for ids outside the board.
    #[inline]
    #[must_use]
    pub fn edge_owner(&self, edge: EdgeId) -> Option<Player> {
        if !self.topology.contains_edge(usize::from(edge)) {
            return None;
        }
        let bit = 1u128 << edge;
        if self.edges[Player::Human.index()] & bit != 0 {
            Some(Player::Human)
        } else if self.edges[Player::Agent.index()] & bit != 0 {
            Some(Player::Agent)
        } else {
            None
        }
    }

    /// `None` for an open box and for ids outside the board.
    #[inline]
    #[must_use]
    pub fn box_owner(&self, b: BoxId) -> Option<Player> {
        if usize::from(b) >= self.topology.num_boxes() {
            return None;
        }
        let bit = 1u64 << b;
        if self.boxes[Player::Human.index()] & bit != 0 {
            Some(Player::Human)
        } else if self.boxes[Player::Agent.index()] & bit != 0 {
            Some(Player::Agent)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn is_claimed(&self, edge: EdgeId) -> bool {
        self.topology.contains_edge(usize::from(edge))
            && self.claimed_edges() & (1u128 << edge) != 0
    }

    /// Mask of edges claimed by either player.
    #[inline]
    #[must_use]
    pub fn claimed_edges(&self) -> u128 {
        self.edges[0] | self.edges[1]
    }

    #[inline]
    #[must_use]
    pub fn owned_boxes(&self) -> u64 {
        self.boxes[0] | self.boxes[1]
    }

    #[inline]
    #[must_use]
    pub fn edges_of(&self, player: Player) -> u128 {
        self.edges[player.index()]
    }

    #[inline]
    #[must_use]
    pub fn boxes_of(&self, player: Player) -> u64 {
        self.boxes[player.index()]
    }

    /// Edge owners in edge id order.
    #[must_use]
    pub fn edge_owners(&self) -> Vec<Option<Player>> {
        (0..self.topology.total_edges())
            .map(|e| self.edge_owner(e as EdgeId))
            .collect()
    }

    /// Box owners in box id order.
    #[must_use]
    pub fn box_owners(&self) -> Vec<Option<Player>> {
        (0..self.topology.num_boxes())
            .map(|b| self.box_owner(b as BoxId))
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn unclaimed_edges(&self) -> u128 {
        self.topology.all_edges_mask() & !self.claimed_edges()
    }

    /// Every unclaimed edge, ascending by edge id.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<EdgeId> {
        bits128(self.unclaimed_edges()).collect()
    }

    #[inline]
    #[must_use]
    pub fn remaining_moves(&self) -> usize {
        self.unclaimed_edges().count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.unclaimed_edges() == 0
    }

    /// Boxes owned by `player`.
    #[inline]
    #[must_use]
    pub fn score(&self, player: Player) -> u32 {
        self.boxes[player.index()].count_ones()
    }

    /// Verify the representation against the topology: no edge or box owned
    /// twice, nothing outside the board, and a box is owned exactly when its
    /// four edges are claimed.
    ///
    /// # Errors
    /// [`Error::InvalidState`] naming the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        let topo = &self.topology;
        let invalid = |reason: String| Err(Error::InvalidState { reason });

        if self.edges[0] & self.edges[1] != 0 {
            return invalid("edge claimed by both players".into());
        }
        if self.boxes[0] & self.boxes[1] != 0 {
            return invalid("box owned by both players".into());
        }
        if self.claimed_edges() & !topo.all_edges_mask() != 0 {
            return invalid("edge outside the board is claimed".into());
        }
        if self.owned_boxes() & !topo.all_boxes_mask() != 0 {
            return invalid("box outside the board is owned".into());
        }
        let claimed = self.claimed_edges();
        for b in 0..topo.num_boxes() {
            let b = b as BoxId;
            let mask = topo.box_mask(b);
            let complete = claimed & mask == mask;
            let owned = self.box_owner(b).is_some();
            if complete != owned {
                return invalid(format!(
                    "box {b} is {} but its edges are {}",
                    if owned { "owned" } else { "unowned" },
                    if complete { "complete" } else { "incomplete" }
                ));
            }
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn set_edge(&mut self, edge: EdgeId, player: Player) {
        self.edges[player.index()] |= 1u128 << edge;
    }

    #[inline]
    pub(crate) fn set_box(&mut self, b: BoxId, player: Player) {
        self.boxes[player.index()] |= 1u64 << b;
    }
}

#[inline]
#[must_use]
pub fn legal_moves(state: &BoardState) -> Vec<EdgeId> {
    state.legal_moves()
}

#[inline]
#[must_use]
pub fn is_terminal(state: &BoardState) -> bool {
    state.is_terminal()
}
