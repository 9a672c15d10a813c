//! Triangle peg solitaire with solution-trie assisted play.
//!
//! # Board
//!
//! ```text
//!             0
//!           1   2
//!         3   4   5
//!       6   7   8   9
//!    10  11  12  13  14
//! ```
//!
//! A jump moves a peg two holes along one of six directions over an
//! occupied hole into an empty one, removing the peg it passes over. The
//! game starts with one hole empty and is won when a single peg remains.
//!
//! # Solution trie
//!
//! ```text
//! root
//!  └─ starting hole (0-4)
//!      └─ source hole
//!          └─ destination hole
//!              └─ source hole ...
//! ```
//!
//! All labels are canonical: a game started from hole 5-14 is rotated so
//! its empty hole lands in 0-4 (see [`rotation`]). Every node counts the
//! winning games that pass through it.
//!
//! # Artifact
//!
//! The trie is stored as a checksummed binary file of pre-order records,
//! see [`artifact`].

pub mod artifact;
pub mod board;
pub mod config;
pub mod events;
pub mod game;
pub mod notation;
pub mod rotation;
pub mod trie;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use artifact::ArtifactError;
pub use board::{Board, Direction, Jump, Peg, PegState, HOLES};
pub use config::{GameConfig, HintPolicy};
pub use events::{Change, ObserverId, Observers};
pub use game::{Game, Hint, Outcome, Phase, Snapshot, Status};
pub use notation::NotationError;
pub use rotation::{canonical_class, Rotation, CANONICAL_HOLES};
pub use trie::{NodeId, Trie, TrieStats};
