//! Batch driver: the agent plays complete games against a seeded random
//! opponent. Games run in parallel; results are returned in game id order and
//! are reproducible for a given configuration.

use std::sync::Arc;

use indicatif::ProgressBar;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::engine::apply::apply_move;
use crate::error::{Error, Result};
use crate::game::{configure, new_game, winner, Winner};
use crate::rng::rng_for_game;
use crate::solver::{search, table_for_board, SearchLimits, SharedTT, TranspositionTable};
use crate::topology::Topology;
use crate::types::{EdgeId, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayConfig {
    pub size: usize,
    pub games: u64,
    pub seed: u64,
    pub limits: SearchLimits,
    pub starting_player: Player,
    /// Share one table between all games instead of one table per game.
    pub share_cache: bool,
    /// Bound each table to this many MiB; `None` picks [`table_for_board`].
    pub cache_mib: Option<usize>,
}

impl SelfPlayConfig {
    #[must_use]
    pub fn new(size: usize, games: u64) -> Self {
        Self {
            size,
            games,
            seed: 0x00C0_FFEE,
            limits: SearchLimits::for_board(size),
            starting_player: Player::Human,
            share_cache: true,
            cache_mib: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_starting_player(mut self, player: Player) -> Self {
        self.starting_player = player;
        self
    }

    #[must_use]
    pub fn with_share_cache(mut self, share: bool) -> Self {
        self.share_cache = share;
        self
    }

    #[must_use]
    pub fn with_cache_mib(mut self, mib: usize) -> Self {
        self.cache_mib = Some(mib);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayedMove {
    pub player: Player,
    pub edge: EdgeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: u64,
    pub moves: Vec<PlayedMove>,
    pub human_score: u32,
    pub agent_score: u32,
    pub winner: Winner,
    /// Search nodes spent by the agent over the whole game.
    pub nodes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SelfPlaySummary {
    pub games: u64,
    pub agent_wins: u64,
    pub human_wins: u64,
    pub draws: u64,
    pub mean_margin: f64,
    pub total_nodes: u64,
}

/// Play one game to the end. The opponent picks uniformly among legal edges
/// using [`rng_for_game`] seeded by (seed, game id, turn number).
///
/// # Errors
/// [`Error::InvalidConfig`] when the ply budget is zero, so the agent has no
/// move to play.
pub fn play_one(
    topology: &Arc<Topology>,
    config: &SelfPlayConfig,
    game_id: u64,
    tt: &mut dyn TranspositionTable,
) -> Result<GameRecord> {
    let mut state = new_game(topology, config.starting_player);
    let mut moves = Vec::with_capacity(topology.total_edges());
    let mut nodes = 0u64;

    while !state.is_terminal() {
        let player = state.next;
        let edge = match player {
            Player::Agent => {
                let result = search(&state, Player::Agent, config.limits.depth, tt);
                nodes += result.nodes;
                result.best_move.ok_or_else(|| Error::InvalidConfig {
                    reason: "a zero ply budget never yields a move".into(),
                })?
            }
            Player::Human => {
                let legal = state.legal_moves();
                let turn = moves.len() as u8;
                let mut rng = rng_for_game(config.seed, game_id, turn);
                legal[rng.gen_range(0..legal.len())]
            }
        };
        apply_move(&mut state, usize::from(edge), player)?;
        moves.push(PlayedMove { player, edge });
    }

    let result = winner(&state).ok_or_else(|| Error::InvalidState {
        reason: "game loop stopped before the board was full".into(),
    })?;
    Ok(GameRecord {
        game_id,
        moves,
        human_score: state.score(Player::Human),
        agent_score: state.score(Player::Agent),
        winner: result,
        nodes,
    })
}

/// Run `config.games` games in parallel.
///
/// # Errors
/// [`Error::InvalidConfig`] for a zero ply budget and
/// [`Error::InvalidBoardSize`] for an unsupported `config.size`.
pub fn run_selfplay(config: &SelfPlayConfig, pb: Option<&ProgressBar>) -> Result<Vec<GameRecord>> {
    if config.limits.depth == Some(0) {
        return Err(Error::InvalidConfig {
            reason: "self-play needs a ply budget of at least 1".into(),
        });
    }
    let topology = configure(config.size)?;
    let shared = config
        .share_cache
        .then(|| SharedTT::with_table(table_for_board(config.size, config.cache_mib)));

    let records = (0..config.games)
        .into_par_iter()
        .map(|game_id| {
            let record = if let Some(shared) = &shared {
                let mut tt = shared.clone();
                play_one(&topology, config, game_id, &mut tt)
            } else {
                let mut tt = table_for_board(config.size, config.cache_mib);
                play_one(&topology, config, game_id, tt.as_mut())
            };
            if let Some(pb) = pb {
                pb.inc(1);
            }
            record
        })
        .collect::<Result<Vec<_>>>()?;

    let summary = summarize(&records);
    info!(
        size = config.size,
        games = summary.games,
        agent_wins = summary.agent_wins,
        human_wins = summary.human_wins,
        draws = summary.draws,
        mean_margin = summary.mean_margin,
        total_nodes = summary.total_nodes,
        shared_tt_len = shared.as_ref().map_or(0, TranspositionTable::len),
        "self-play finished"
    );
    Ok(records)
}

#[must_use]
#[allow(clippy::cast_precision_loss)] // margins and game counts stay far below 2^52
pub fn summarize(records: &[GameRecord]) -> SelfPlaySummary {
    let mut s = SelfPlaySummary {
        games: records.len() as u64,
        ..SelfPlaySummary::default()
    };
    let mut margin_sum = 0i64;
    for r in records {
        match r.winner {
            Winner::Agent => s.agent_wins += 1,
            Winner::Human => s.human_wins += 1,
            Winner::Draw => s.draws += 1,
        }
        margin_sum += i64::from(r.agent_score) - i64::from(r.human_score);
        s.total_nodes += r.nodes;
    }
    if s.games > 0 {
        s.mean_margin = margin_sum as f64 / s.games as f64;
    }
    s
}
