use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use dotsboxes::solver::{search, table_for_board, FixedTT, SearchLimits, TranspositionTable};
use dotsboxes::{position_key, render_board, EdgePosition, Player, StateDoc};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MoverOpt {
    Human,
    Agent,
}

#[derive(Debug, Parser)]
#[command(name = "solve", about = "Evaluate a Dots-and-Boxes position with the minimax agent")]
struct Args {
    /// JSON state file ({"size":3,"edges":"....","boxes":"..","next":"agent"}); stdin when omitted
    #[arg(long)]
    state: Option<PathBuf>,

    /// Ply budget; omitted means search to the end of the game
    #[arg(long, conflicts_with = "auto_depth")]
    depth: Option<u8>,

    /// Use the size-based default budget (full search up to 3x3 dots, at most 6 plies beyond)
    #[arg(long)]
    auto_depth: bool,

    /// Player to move; defaults to the state's `next`
    #[arg(long, value_enum)]
    mover: Option<MoverOpt>,

    /// Bound the transposition table to this many MiB (size-based default when omitted)
    #[arg(long)]
    tt_mib: Option<usize>,

    /// Print the board diagram to stderr
    #[arg(long)]
    render: bool,
}

#[derive(Serialize)]
struct MoveOut {
    edge: u8,
    #[serde(flatten)]
    position: EdgePosition,
}

#[derive(Serialize)]
struct SolveOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    best_move: Option<MoveOut>,
    value: i32,
    mover: Player,
    depth: Option<u8>,
    nodes: u64,
    cache_hits: u64,
    state_hash: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let json = match &args.state {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("State read error ({}): {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let doc = StateDoc::from_json(&json)?;
    let state = doc.to_state()?;

    if args.render {
        eprint!("{}", render_board(&state));
    }

    let mover = match args.mover {
        Some(MoverOpt::Human) => Player::Human,
        Some(MoverOpt::Agent) => Player::Agent,
        None => state.next,
    };
    let depth = if args.auto_depth {
        SearchLimits::for_board(doc.size).depth
    } else {
        args.depth
    };

    let mut tt: Box<dyn TranspositionTable + Send> = match args.tt_mib {
        Some(mib) => {
            let tt = FixedTT::with_budget_mib(mib);
            eprintln!(
                "[solve] TT target={} MiB capacity={} entries ≈{:.1} MiB",
                mib,
                tt.capacity(),
                FixedTT::approx_bytes_for_capacity(tt.capacity()) as f64 / (1024.0 * 1024.0)
            );
            Box::new(tt)
        }
        None => table_for_board(doc.size, None),
    };

    let result = search(&state, mover, depth, tt.as_mut());
    let topology = state.topology();
    let out = SolveOut {
        best_move: result.best_move.map(|edge| MoveOut {
            edge,
            position: topology.edge_position(edge),
        }),
        value: result.value,
        mover,
        depth,
        nodes: result.nodes,
        cache_hits: result.cache_hits,
        state_hash: format!("{:016x}", position_key(&state, mover, depth).fingerprint()),
    };
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
