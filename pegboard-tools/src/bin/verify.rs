//! Verify a solution artifact: checksum and structure on load, then every
//! recorded line replayed on a board.
//!
//! Usage: cargo run --release --bin verify -- data/solutions.bin

use std::path::PathBuf;
use std::time::Instant;

use anyhow::bail;
use clap::Parser;
use pegboard_tools::{load_artifact, verify};

#[derive(Parser)]
#[command(name = "verify", about = "Check a peg board solution artifact", version)]
struct Args {
    /// Solution artifact to check
    #[arg(value_name = "ARTIFACT", default_value = "data/solutions.bin")]
    artifact: PathBuf,

    /// Problems to print before summarizing
    #[arg(long, default_value_t = 20)]
    max_problems: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Loading {}...", args.artifact.display());
    let trie = load_artifact(&args.artifact)?;
    println!("Artifact OK: {} nodes", trie.len() - 1);

    println!("\n--- Replaying lines ---");
    let start = Instant::now();
    let report = verify::verify(&trie);
    println!("Starting holes: {}", report.starts);
    println!("Jumps replayed: {}", report.jumps);
    println!("Winning lines:  {}", report.terminals);
    println!("Took {:?}", start.elapsed());

    if report.count_mismatches > 0 {
        println!(
            "\nWarning: {} nodes have counts that differ from their children",
            report.count_mismatches
        );
    }

    if report.is_ok() {
        println!("\nAll lines legal and winning.");
        return Ok(());
    }

    println!("\n--- Problems ---");
    for problem in report.problems.iter().take(args.max_problems) {
        println!("  {}", problem);
    }
    if report.problems.len() > args.max_problems {
        println!("  ... {} more", report.problems.len() - args.max_problems);
    }
    bail!("{} problems found", report.problems.len())
}
