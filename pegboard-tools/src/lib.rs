//! Shared pieces of the artifact tools.

pub mod verify;

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use pegboard_core::{artifact, Trie};

/// Load a solution artifact, failing with the path in the message.
pub fn load_artifact(path: &Path) -> anyhow::Result<Trie> {
    let start = Instant::now();
    let trie = artifact::load(path)
        .with_context(|| format!("failed to load solution artifact {}", path.display()))?;
    log::debug!("decoded {} nodes in {:?}", trie.len(), start.elapsed());
    Ok(trie)
}
