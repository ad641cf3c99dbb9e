//! Entry points for front ends: free functions over explicit values, and a
//! [`Game`] session that owns the topology, the running state and the cache.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::apply::{apply_move, MoveOutcome};
use crate::error::{Error, Result};
use crate::solver::{search, table_for_board, SearchLimits, TranspositionTable};
use crate::state::BoardState;
use crate::topology::Topology;
use crate::types::{EdgeId, Player};

/// Build the topology for a board of `board_size` dots per side.
///
/// Any cache filled under a previous topology must be cleared by the caller;
/// [`Game::configure`] does this itself.
///
/// # Errors
/// [`Error::InvalidBoardSize`] outside the supported range.
pub fn configure(board_size: usize) -> Result<Arc<Topology>> {
    let topology = Topology::build(board_size)?;
    info!(
        size = board_size,
        edges = topology.total_edges(),
        boxes = topology.num_boxes(),
        "board configured"
    );
    Ok(Arc::new(topology))
}

#[inline]
#[must_use]
pub fn new_game(topology: &Arc<Topology>, starting: Player) -> BoardState {
    BoardState::new(topology, starting)
}

/// Apply a move coming from outside the search. Fails without touching
/// `state` when `edge` is out of range or already claimed.
///
/// # Errors
/// [`Error::EdgeOutOfRange`] or [`Error::EdgeClaimed`].
#[inline]
pub fn player_move(state: &mut BoardState, edge: usize, player: Player) -> Result<MoveOutcome> {
    apply_move(state, edge, player)
}

/// Pick the agent's move from `state`. The caller applies it with [`player_move`].
#[inline]
pub fn agent_move(
    state: &BoardState,
    depth_budget: Option<u8>,
    tt: &mut dyn TranspositionTable,
) -> Option<EdgeId> {
    search(state, Player::Agent, depth_budget, tt).best_move
}

#[inline]
#[must_use]
pub fn is_over(state: &BoardState) -> bool {
    state.is_terminal()
}

#[inline]
#[must_use]
pub fn score(state: &BoardState, player: Player) -> u32 {
    state.score(player)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Human,
    Agent,
    Draw,
}

/// Final result of a finished game; `None` while edges remain.
#[must_use]
pub fn winner(state: &BoardState) -> Option<Winner> {
    if !state.is_terminal() {
        return None;
    }
    let (h, a) = (state.score(Player::Human), state.score(Player::Agent));
    Some(match h.cmp(&a) {
        std::cmp::Ordering::Greater => Winner::Human,
        std::cmp::Ordering::Less => Winner::Agent,
        std::cmp::Ordering::Equal => Winner::Draw,
    })
}

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Dots per side.
    pub size: usize,
    /// Player making the first move.
    pub starting_player: Player,
    /// Search budget; `None` picks [`SearchLimits::for_board`] for `size`.
    pub limits: Option<SearchLimits>,
    /// Bound the cache to this many MiB; `None` picks
    /// [`table_for_board`] for `size`.
    pub cache_mib: Option<usize>,
}

impl GameConfig {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            starting_player: Player::Human,
            limits: None,
            cache_mib: None,
        }
    }

    #[must_use]
    pub fn with_starting_player(mut self, player: Player) -> Self {
        self.starting_player = player;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    #[must_use]
    pub fn with_cache_mib(mut self, mib: usize) -> Self {
        self.cache_mib = Some(mib);
        self
    }

    /// Limits in effect for this configuration.
    #[must_use]
    pub fn effective_limits(&self) -> SearchLimits {
        self.limits.unwrap_or_else(|| SearchLimits::for_board(self.size))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(4)
    }
}

/// The agent's completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTurn {
    pub edge: EdgeId,
    pub value: i32,
    pub outcome: MoveOutcome,
}

/// A running game against the agent.
pub struct Game {
    config: GameConfig,
    topology: Arc<Topology>,
    state: BoardState,
    tt: Box<dyn TranspositionTable + Send>,
}

impl Game {
    /// # Errors
    /// [`Error::InvalidBoardSize`] for an unsupported `config.size`.
    pub fn new(config: GameConfig) -> Result<Self> {
        let topology = configure(config.size)?;
        let state = new_game(&topology, config.starting_player);
        let tt = table_for_board(config.size, config.cache_mib);
        Ok(Self {
            config,
            topology,
            state,
            tt,
        })
    }

    /// Switch to a board of `size` dots and start a fresh game on it. The cache
    /// is replaced: its keys describe positions of the old topology.
    ///
    /// # Errors
    /// [`Error::InvalidBoardSize`]; the session is left unchanged.
    pub fn configure(&mut self, size: usize) -> Result<()> {
        let topology = configure(size)?;
        self.config.size = size;
        self.topology = topology;
        self.tt = table_for_board(size, self.config.cache_mib);
        self.state = new_game(&self.topology, self.config.starting_player);
        Ok(())
    }

    /// Start over on the current board.
    pub fn reset(&mut self, starting: Player) {
        self.config.starting_player = starting;
        self.tt.clear();
        self.state = new_game(&self.topology, starting);
        info!(size = self.topology.size(), ?starting, "new game");
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn to_move(&self) -> Player {
        self.state.next
    }

    #[inline]
    #[must_use]
    pub fn is_over(&self) -> bool {
        is_over(&self.state)
    }

    #[inline]
    #[must_use]
    pub fn score(&self, player: Player) -> u32 {
        score(&self.state, player)
    }

    #[inline]
    #[must_use]
    pub fn winner(&self) -> Option<Winner> {
        winner(&self.state)
    }

    #[inline]
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.tt.len()
    }

    /// Human move. Rejected when the game is over or it is the agent's turn.
    ///
    /// # Errors
    /// [`Error::GameOver`], [`Error::OutOfTurn`], or the move errors of
    /// [`player_move`].
    pub fn play(&mut self, edge: usize) -> Result<MoveOutcome> {
        self.check_turn(Player::Human)?;
        player_move(&mut self.state, edge, Player::Human)
    }

    /// Search and play one agent move. The agent moves again while
    /// `to_move()` stays [`Player::Agent`].
    ///
    /// # Errors
    /// [`Error::GameOver`], [`Error::OutOfTurn`], or [`Error::InvalidConfig`]
    /// for a zero ply budget.
    pub fn agent_turn(&mut self) -> Result<AgentTurn> {
        self.check_turn(Player::Agent)?;
        let limits = self.config.effective_limits();
        let result = search(&self.state, Player::Agent, limits.depth, self.tt.as_mut());
        let Some(edge) = result.best_move else {
            return Err(Error::InvalidConfig {
                reason: "a zero ply budget never yields a move".into(),
            });
        };
        let outcome = player_move(&mut self.state, usize::from(edge), Player::Agent)?;
        debug!(
            edge,
            value = result.value,
            nodes = result.nodes,
            extra_turn = outcome.extra_turn,
            "agent moved"
        );
        Ok(AgentTurn {
            edge,
            value: result.value,
            outcome,
        })
    }

    fn check_turn(&self, player: Player) -> Result<()> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        if self.state.next != player {
            return Err(Error::OutOfTurn { player });
        }
        Ok(())
    }
}
