use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use dotsboxes::selfplay::{run_selfplay, summarize, SelfPlayConfig};
use dotsboxes::{Player, SearchLimits};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StarterOpt {
    Human,
    Agent,
}

#[derive(Debug, Parser)]
#[command(name = "selfplay", about = "Agent vs seeded random opponent, many games in parallel")]
struct Args {
    /// Dots per side
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// Number of games
    #[arg(long, default_value_t = 16)]
    games: u64,

    /// Base seed for the random opponent
    #[arg(long, default_value_t = 0x00C0_FFEEu64)]
    seed: u64,

    /// Ply budget; defaults to the size-based policy
    #[arg(long)]
    depth: Option<u8>,

    /// Player making the first move
    #[arg(long, value_enum, default_value_t = StarterOpt::Human)]
    starting: StarterOpt,

    /// One table per game instead of a table shared by all games
    #[arg(long)]
    no_shared_cache: bool,

    /// Bound each transposition table to this many MiB (size-based default when omitted)
    #[arg(long)]
    cache_mib: Option<usize>,

    /// Worker threads (defaults to rayon's choice)
    #[arg(long)]
    threads: Option<usize>,

    /// Print every game record as a JSON line on stdout
    #[arg(long)]
    records: bool,
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

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("thread pool error: {e}"))?;
    }

    let limits = args
        .depth
        .map_or_else(|| SearchLimits::for_board(args.size), SearchLimits::depth);
    let starting = match args.starting {
        StarterOpt::Human => Player::Human,
        StarterOpt::Agent => Player::Agent,
    };
    let mut config = SelfPlayConfig::new(args.size, args.games)
        .with_seed(args.seed)
        .with_limits(limits)
        .with_starting_player(starting)
        .with_share_cache(!args.no_shared_cache);
    if let Some(mib) = args.cache_mib {
        config = config.with_cache_mib(mib);
    }

    let pb = ProgressBar::new(args.games);
    pb.set_style(
        ProgressStyle::with_template("[selfplay] {bar:40} {pos}/{len} games ({elapsed})")
            .map_err(|e| format!("progress style error: {e}"))?,
    );
    let records = run_selfplay(&config, Some(&pb))?;
    pb.finish_and_clear();

    if args.records {
        for r in &records {
            println!("{}", serde_json::to_string(r)?);
        }
    }
    println!("{}", serde_json::to_string(&summarize(&records))?);
    Ok(())
}
