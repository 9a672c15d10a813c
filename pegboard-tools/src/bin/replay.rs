//! Play a move list against a solution artifact and show where it leads.
//!
//! Holes are labeled 1-15 and jumps written `from:to`.
//!
//! Usage: cargo run --bin replay -- --empty 4 --moves "1:4 6:1"

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use pegboard_core::notation::{self, parse_hole};
use pegboard_core::{Game, GameConfig, HintPolicy};
use pegboard_tools::load_artifact;

#[derive(Parser)]
#[command(name = "replay", about = "Replay peg board moves with solution hints", version)]
struct Args {
    /// Solution artifact to read
    #[arg(long, default_value = "data/solutions.bin")]
    artifact: PathBuf,

    /// Starting empty hole (1-15)
    #[arg(long, value_parser = parse_hole)]
    empty: usize,

    /// Whitespace separated jumps, e.g. "1:4 6:1"
    #[arg(long, default_value = "")]
    moves: String,

    /// Game settings as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the hint policy from --config
    #[arg(long)]
    hint_policy: Option<HintPolicy>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GameConfig::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(policy) = args.hint_policy {
        config.hint_policy = policy;
    }

    let moves = notation::parse_moves(&args.moves)?;
    let trie = load_artifact(&args.artifact)?;

    let mut game = Game::with_config(Arc::new(trie), config);
    game.pick_hole(args.empty);
    for (i, jump) in moves.iter().enumerate() {
        if !game.board().can_jump(jump.from, jump.to) {
            bail!(
                "jump {} ({} of {}) is not legal after [{}]",
                jump,
                i + 1,
                moves.len(),
                notation::format_moves(game.board().moves())
            );
        }
        game.pick_peg(jump.from);
        game.pick_peg(jump.to);
    }

    let hint = game.request_hint();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
        return Ok(());
    }

    let status = game.status();
    println!("{}", game.board());
    println!("Moves:          {}", notation::format_moves(game.board().moves()));
    println!("Pegs left:      {}", status.pegs_left);
    println!("Solutions left: {}", status.solutions_left);
    match hint {
        Some(hint) => println!(
            "Hint ({}):    {} ({} solutions)",
            config.hint_policy, hint.jump, hint.solutions
        ),
        None => println!("Hint:           none"),
    }
    println!("{}", status.prompt);
    Ok(())
}
