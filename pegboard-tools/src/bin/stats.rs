//! Node and solution totals for a solution artifact, per starting hole.
//!
//! Usage: cargo run --release --bin stats -- data/solutions.bin [--json]

use std::path::PathBuf;

use clap::Parser;
use pegboard_core::artifact;
use pegboard_tools::load_artifact;

#[derive(Parser)]
#[command(name = "stats", about = "Summarize a peg board solution artifact", version)]
struct Args {
    /// Solution artifact to read
    #[arg(value_name = "ARTIFACT", default_value = "data/solutions.bin")]
    artifact: PathBuf,

    /// Print the totals as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let trie = load_artifact(&args.artifact)?;
    let stats = trie.stats();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("=== Solution artifact ===");
    println!("File:          {}", args.artifact.display());
    println!("Size:          {} bytes", artifact::estimate_size(stats.nodes));
    println!("Nodes:         {}", stats.nodes);
    println!("Winning lines: {}", stats.terminals);
    println!("Solutions:     {}", stats.solutions);
    println!("Max depth:     {}", stats.max_depth);

    println!("\n--- By starting hole ---");
    println!("{:>5} {:>10} {:>10} {:>12} {:>6}", "hole", "nodes", "lines", "solutions", "depth");
    for class in &stats.classes {
        println!(
            "{:>5} {:>10} {:>10} {:>12} {:>6}",
            class.start + 1,
            class.nodes,
            class.terminals,
            class.solutions,
            class.max_depth
        );
    }
    Ok(())
}
