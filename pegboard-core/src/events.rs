//! Change notification for whatever draws the game.
//!
//! The core never redraws anything itself: it raises a `Change` after each
//! mutation and the presentation layer decides what to do with it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which part of the game changed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    /// Peg states, the empty hole or the move history.
    Board,
    /// Controller phase, solution cursor or outcome.
    Game,
}

/// Handle returned by `Observers::subscribe`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(Change)>;

/// Callback registry, notified in registration order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: Vec<(ObserverId, Callback)>,
}

impl Observers {
    pub fn new() -> Observers {
        Observers::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(Change) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(registered, _)| *registered != id);
        self.callbacks.len() != before
    }

    pub fn notify(&mut self, change: Change) {
        for (_, callback) in &mut self.callbacks {
            callback(change);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
