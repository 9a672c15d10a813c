//! Binary solution artifact.
//!
//! Format:
//! - Header (32 bytes):
//!   - Magic: "PEGT" (4 bytes)
//!   - Version: u32 LE (4 bytes)
//!   - Node count: u64 LE (8 bytes), root not included
//!   - Checksum: u64 LE xxhash of data section (8 bytes)
//!   - Reserved: 8 bytes (zeros)
//! - Data section (node count × 11 bytes), depth-first pre-order:
//!   - Value: u8 hole index
//!   - Flags: u8 (bit 0 = terminal)
//!   - Children: u8 number of child records that follow
//!   - Solutions: u64 LE
//!
//! Records with no enclosing parent left to fill belong to the root.

use std::fs;
use std::io;
use std::path::Path;

use xxhash_rust::xxh64::xxh64;

use crate::board::HOLES;
use crate::rotation::CANONICAL_HOLES;
use crate::trie::{NodeId, Trie};

const MAGIC: &[u8; 4] = b"PEGT";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 32;
const RECORD_SIZE: usize = 11;
const FLAG_TERMINAL: u8 = 0b1;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot read solution artifact: {0}")]
    Io(#[from] io::Error),
    #[error("invalid solution artifact magic")]
    BadMagic,
    #[error("unsupported solution artifact version: {0}")]
    UnsupportedVersion(u32),
    #[error("solution artifact truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("solution artifact has {0} bytes after the last record")]
    TrailingData(usize),
    #[error("solution artifact checksum mismatch")]
    ChecksumMismatch,
    #[error("invalid node at record {record}: {reason}")]
    InvalidNode { record: usize, reason: &'static str },
    #[error("duplicate sibling value {value} at record {record}")]
    DuplicateSibling { record: usize, value: usize },
    #[error("solution artifact ends before {0} promised children")]
    MissingChildren(usize),
}

/// Serialize a trie into artifact bytes.
pub fn encode(trie: &Trie) -> Vec<u8> {
    let mut data = Vec::with_capacity(trie.len().saturating_sub(1) * RECORD_SIZE);

    // Pre-order: push children reversed so the first child is written first.
    let mut stack: Vec<NodeId> = trie.children(Trie::ROOT).collect();
    stack.reverse();
    while let Some(id) = stack.pop() {
        let node = trie.node(id);
        let children: Vec<NodeId> = trie.children(id).collect();

        data.push(node.value() as u8);
        data.push(if node.is_terminal() { FLAG_TERMINAL } else { 0 });
        data.push(children.len() as u8);
        data.extend_from_slice(&node.solutions().to_le_bytes());

        stack.extend(children.into_iter().rev());
    }

    let count = (data.len() / RECORD_SIZE) as u64;
    let checksum = xxh64(&data, 0);

    let mut bytes = Vec::with_capacity(HEADER_SIZE + data.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&count.to_le_bytes());
    bytes.extend_from_slice(&checksum.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 8]); // Reserved
    bytes.extend_from_slice(&data);
    bytes
}

/// Rebuild a trie from artifact bytes.
pub fn decode(bytes: &[u8]) -> Result<Trie, ArtifactError> {
    if bytes.len() < HEADER_SIZE {
        return Err(ArtifactError::Truncated {
            expected: HEADER_SIZE,
            found: bytes.len(),
        });
    }
    let (header, data) = bytes.split_at(HEADER_SIZE);

    if &header[0..4] != MAGIC {
        return Err(ArtifactError::BadMagic);
    }
    let version = read_u32(&header[4..8]);
    if version != VERSION {
        return Err(ArtifactError::UnsupportedVersion(version));
    }
    let stored_checksum = read_u64(&header[16..24]);

    // A count that does not fit in memory can never be satisfied.
    let expected = usize::try_from(read_u64(&header[8..16]))
        .ok()
        .and_then(|count| count.checked_mul(RECORD_SIZE))
        .ok_or(ArtifactError::Truncated {
            expected: usize::MAX,
            found: bytes.len(),
        })?;
    if data.len() < expected {
        return Err(ArtifactError::Truncated {
            expected: HEADER_SIZE + expected,
            found: bytes.len(),
        });
    }
    if data.len() > expected {
        return Err(ArtifactError::TrailingData(data.len() - expected));
    }
    if xxh64(data, 0) != stored_checksum {
        return Err(ArtifactError::ChecksumMismatch);
    }

    let mut trie = Trie::new();
    // Open parents and how many of their children are still to come.
    let mut open: Vec<(NodeId, usize)> = Vec::new();

    for (record, chunk) in data.chunks_exact(RECORD_SIZE).enumerate() {
        while matches!(open.last(), Some(&(_, 0))) {
            open.pop();
        }
        let parent = match open.last_mut() {
            Some((parent, remaining)) => {
                *remaining -= 1;
                *parent
            }
            None => Trie::ROOT,
        };

        let value = chunk[0] as usize;
        let flags = chunk[1];
        let children = chunk[2] as usize;
        let solutions = read_u64(&chunk[3..11]);

        if value >= HOLES {
            return Err(ArtifactError::InvalidNode {
                record,
                reason: "hole index out of range",
            });
        }
        if parent == Trie::ROOT && value >= CANONICAL_HOLES {
            return Err(ArtifactError::InvalidNode {
                record,
                reason: "starting hole outside the canonical set",
            });
        }
        if flags & !FLAG_TERMINAL != 0 {
            return Err(ArtifactError::InvalidNode {
                record,
                reason: "unknown flag bits",
            });
        }
        if children > HOLES {
            return Err(ArtifactError::InvalidNode {
                record,
                reason: "more children than holes",
            });
        }

        let id = trie
            .add_child(parent, value, flags & FLAG_TERMINAL != 0, solutions)
            .ok_or(ArtifactError::DuplicateSibling { record, value })?;
        if children > 0 {
            open.push((id, children));
        }
    }

    let missing: usize = open.iter().map(|&(_, remaining)| remaining).sum();
    if missing > 0 {
        return Err(ArtifactError::MissingChildren(missing));
    }

    Ok(trie)
}

/// Write a trie to `path`. Returns the number of records written.
pub fn save(path: &Path, trie: &Trie) -> Result<usize, ArtifactError> {
    let bytes = encode(trie);
    fs::write(path, &bytes)?;
    Ok((bytes.len() - HEADER_SIZE) / RECORD_SIZE)
}

/// Load a trie from `path`.
pub fn load(path: &Path) -> Result<Trie, ArtifactError> {
    let bytes = fs::read(path)?;
    let trie = decode(&bytes)?;
    log::info!(
        "loaded solution artifact {} ({} nodes)",
        path.display(),
        trie.len() - 1
    );
    Ok(trie)
}

/// Artifact size in bytes for a trie with `nodes` non-root nodes.
pub fn estimate_size(nodes: usize) -> usize {
    HEADER_SIZE + nodes * RECORD_SIZE
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}
