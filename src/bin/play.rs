use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dotsboxes::{render_board, Game, GameConfig, Orientation, Player, SearchLimits, Winner};

#[derive(Debug, Parser)]
#[command(name = "play", about = "Play Dots-and-Boxes against the minimax agent in a terminal")]
struct Args {
    /// Dots per side
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// Ply budget; defaults to the size-based policy
    #[arg(long)]
    depth: Option<u8>,

    /// Let the agent open the game
    #[arg(long)]
    agent_first: bool,

    /// Bound the transposition table to this many MiB (size-based default when omitted)
    #[arg(long)]
    cache_mib: Option<usize>,
}

enum Command {
    Edge(usize),
    Lattice(Orientation, u8, u8),
    New,
    Size(usize),
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let toks: Vec<&str> = line.split_whitespace().collect();
    let num = |s: &str| s.parse::<usize>().map_err(|e| format!("bad number '{s}': {e}"));
    match toks.as_slice() {
        ["q" | "quit"] => Ok(Command::Quit),
        ["new"] => Ok(Command::New),
        ["size", n] => Ok(Command::Size(num(*n)?)),
        [o @ ("h" | "v"), r, c] => {
            let orientation = if *o == "h" {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let r = u8::try_from(num(*r)?).map_err(|e| e.to_string())?;
            let c = u8::try_from(num(*c)?).map_err(|e| e.to_string())?;
            Ok(Command::Lattice(orientation, r, c))
        }
        [id] => Ok(Command::Edge(num(*id)?)),
        _ => Err("expected an edge id, 'h ROW COL', 'v ROW COL', 'new', 'size N' or 'quit'".into()),
    }
}

fn print_status(game: &Game) {
    print!("{}", render_board(game.state()));
    let (h, a) = (game.score(Player::Human), game.score(Player::Agent));
    match game.winner() {
        Some(Winner::Human) => println!("Game over! You win! ({h}:{a})"),
        Some(Winner::Agent) => println!("Game over! Agent wins! ({h}:{a})"),
        Some(Winner::Draw) => println!("Game over! Draw! ({h}:{a})"),
        None => println!("You {h} : {a} Agent"),
    }
}

fn run_agent(game: &mut Game) -> Result<(), dotsboxes::Error> {
    while !game.is_over() && game.to_move() == Player::Agent {
        println!("Agent thinking...");
        let turn = game.agent_turn()?;
        let pos = game.topology().edge_position(turn.edge);
        println!(
            "Agent claims edge {} ({:?} row {} col {}), eval {}",
            turn.edge, pos.orientation, pos.row, pos.col, turn.value
        );
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let starting = if args.agent_first {
        Player::Agent
    } else {
        Player::Human
    };
    let mut config = GameConfig::new(args.size).with_starting_player(starting);
    if let Some(d) = args.depth {
        config = config.with_limits(SearchLimits::depth(d));
    }
    if let Some(mib) = args.cache_mib {
        config = config.with_cache_mib(mib);
    }
    let mut game = Game::new(config)?;

    run_agent(&mut game)?;
    print_status(&game);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        let edge = match cmd {
            Command::Quit => break,
            Command::New => {
                game.reset(starting);
                run_agent(&mut game)?;
                print_status(&game);
                continue;
            }
            Command::Size(n) => {
                if let Err(e) = game.configure(n) {
                    println!("{e}");
                    continue;
                }
                run_agent(&mut game)?;
                print_status(&game);
                continue;
            }
            Command::Edge(id) => id,
            Command::Lattice(o, r, c) => match game.topology().edge_at(o, r, c) {
                Some(e) => usize::from(e),
                None => {
                    println!("no such edge on this board");
                    continue;
                }
            },
        };

        match game.play(edge) {
            Ok(outcome) if outcome.extra_turn => println!("Box! Move again."),
            Ok(_) => run_agent(&mut game)?,
            Err(e) if e.is_invalid_move() => {
                println!("{e}");
                continue;
            }
            Err(e) => println!("{e}"),
        }
        print_status(&game);
    }
    Ok(())
}
