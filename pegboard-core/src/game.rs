//! Game controller: turns hole picks into board changes and keeps a cursor
//! into the solution trie in step with the board.

use std::sync::Arc;

use serde::Serialize;

use crate::board::{Board, Jump, PegState};
use crate::config::GameConfig;
use crate::events::{Change, ObserverId, Observers};
use crate::rotation::{canonical_class, Rotation};
use crate::trie::{NodeId, Trie};

/// Where the controller is in a game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the starting empty hole.
    PickingEmpty,
    /// Waiting for the peg to move.
    Waiting,
    /// A peg is selected, waiting for its destination.
    Jumping,
    /// No legal jump remains.
    Finished,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won,
    Lost,
}

/// A suggested jump in board holes and the winning games that follow it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Hint {
    pub jump: Jump,
    pub solutions: u64,
}

/// Read model for a status line.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Status {
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    /// Holes with a peg in them, highlighted or not.
    pub pegs_left: usize,
    /// Winning games still reachable, zero once off the recorded lines.
    pub solutions_left: u64,
    pub moves: usize,
    pub empty_hole: Option<usize>,
    pub prompt: &'static str,
}

/// Everything a frontend needs to draw the game.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub holes: Vec<PegState>,
    pub history: Vec<Jump>,
}

/// One game session over a shared solution trie.
pub struct Game {
    board: Board,
    solutions: Arc<Trie>,
    rotation: Rotation,
    cursor: Option<NodeId>,
    phase: Phase,
    source: Option<usize>,
    outcome: Option<Outcome>,
    config: GameConfig,
    observers: Observers,
}

impl Game {
    pub fn new(solutions: Arc<Trie>) -> Game {
        Game::with_config(solutions, GameConfig::default())
    }

    pub fn with_config(solutions: Arc<Trie>, config: GameConfig) -> Game {
        Game {
            board: Board::new(),
            solutions,
            rotation: Rotation::IDENTITY,
            cursor: None,
            phase: Phase::PickingEmpty,
            source: None,
            outcome: None,
            config,
            observers: Observers::new(),
        }
    }

    // ========== Observers ==========

    /// Register for controller changes.
    pub fn subscribe(&mut self, callback: impl FnMut(Change) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Register for board changes.
    pub fn subscribe_board(&mut self, callback: impl FnMut(Change) + 'static) -> ObserverId {
        self.board.subscribe(callback)
    }

    pub fn unsubscribe_board(&mut self, id: ObserverId) -> bool {
        self.board.unsubscribe(id)
    }

    fn changed(&mut self) {
        self.observers.notify(Change::Game);
    }

    // ========== Queries ==========

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[inline]
    pub fn trie(&self) -> &Trie {
        &self.solutions
    }

    /// Trie node matching the current position, `None` once off the
    /// recorded lines or before the empty hole is chosen.
    #[inline]
    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    /// Rotation between board holes and trie holes for this game.
    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The peg waiting to jump while in `Phase::Jumping`.
    #[inline]
    pub fn source(&self) -> Option<usize> {
        self.source
    }

    #[inline]
    pub fn solutions_left(&self) -> u64 {
        self.solutions.solutions(self.cursor)
    }

    /// Instruction shown to the player for the current phase.
    pub fn prompt(&self) -> &'static str {
        match (self.phase, self.outcome) {
            (Phase::PickingEmpty, _) => "Select the peg to be empty.",
            (Phase::Waiting, _) => "Select the peg to move",
            (Phase::Jumping, _) => "Select where to jump",
            (Phase::Finished, Some(Outcome::Won)) => "You Win!",
            (Phase::Finished, _) => "You Lose!",
        }
    }

    pub fn status(&self) -> Status {
        Status {
            phase: self.phase,
            outcome: self.outcome,
            pegs_left: self
                .board
                .states()
                .iter()
                .filter(|&&state| state != PegState::Empty)
                .count(),
            solutions_left: self.solutions_left(),
            moves: self.board.moves().len(),
            empty_hole: self.board.empty_hole(),
            prompt: self.prompt(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status(),
            holes: self.board.states().to_vec(),
            history: self.board.moves().to_vec(),
        }
    }

    // ========== Intents ==========

    /// Route a click on `hole` to whatever the current phase expects.
    pub fn click(&mut self, hole: usize) {
        match self.phase {
            Phase::PickingEmpty => self.pick_hole(hole),
            Phase::Waiting | Phase::Jumping => self.pick_peg(hole),
            Phase::Finished => {}
        }
    }

    /// Choose the starting empty hole. Ignored outside `PickingEmpty`.
    pub fn pick_hole(&mut self, hole: usize) {
        if self.phase != Phase::PickingEmpty || !self.board.set_empty_hole(hole) {
            return;
        }

        self.rotation = Rotation::for_empty_hole(hole);
        self.cursor =
            canonical_class(hole).and_then(|class| self.solutions.child(Trie::ROOT, class));
        if self.cursor.is_none() {
            log::debug!("no solutions recorded for empty hole {}", hole);
        }
        self.source = None;
        self.outcome = None;
        self.set_phase(Phase::Waiting);
    }

    /// Pick the peg to move, or its destination once one is selected.
    ///
    /// Any destination pick ends the jump attempt, even one off the board.
    pub fn pick_peg(&mut self, hole: usize) {
        match self.phase {
            Phase::Waiting => {
                // Hint highlighting still counts as a peg.
                if matches!(self.board.state(hole), None | Some(PegState::Empty)) {
                    return;
                }
                self.board.select(hole);
                self.source = Some(hole);
                self.set_phase(Phase::Jumping);
            }
            Phase::Jumping => {
                if let Some(from) = self.source.take() {
                    if self.board.jump(from, hole) {
                        self.advance(Jump::new(from, hole));
                    }
                }
                self.board.clear();
                self.settle();
            }
            Phase::PickingEmpty | Phase::Finished => {}
        }
    }

    /// Take back the last jump and return to `Waiting`.
    pub fn undo(&mut self) {
        if self.phase == Phase::PickingEmpty {
            return;
        }
        self.board.undo();
        self.cursor = self.locate();
        self.source = None;
        self.outcome = None;
        self.set_phase(Phase::Waiting);
    }

    /// Start over with a full board.
    pub fn reset(&mut self) {
        self.board.reset();
        self.rotation = Rotation::IDENTITY;
        self.cursor = None;
        self.source = None;
        self.outcome = None;
        self.set_phase(Phase::PickingEmpty);
    }

    /// Suggest the jump with the most winning continuations and highlight it
    /// on the board. `None` off the recorded lines or when no jump remains.
    pub fn request_hint(&mut self) -> Option<Hint> {
        let cursor = self.cursor?;
        if !self.board.has_moves_left() {
            return None;
        }

        let (canonical, solutions) = self.solutions.hint(cursor, self.config.hint_policy)?;
        let jump = self.rotation.absolute_jump(canonical);
        if !self.board.can_jump(jump.from, jump.to) {
            log::warn!(
                "recorded hint {:?} is not playable on this board; ignoring",
                jump
            );
            return None;
        }

        self.board.show_move(jump.from, jump.to);
        Some(Hint { jump, solutions })
    }

    // ========== Internals ==========

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("{:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.changed();
    }

    /// Move the cursor down the source and destination levels of `jump`.
    fn advance(&mut self, jump: Jump) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let canonical = self.rotation.canonical_jump(jump);
        let next = self
            .solutions
            .descend(Some(cursor), canonical.from)
            .and_then(|id| self.solutions.child(id, canonical.to));
        if next.is_none() {
            log::debug!("jump {:?} leaves the recorded solutions", jump);
        }
        self.cursor = next;
    }

    /// Trie node for the board's empty hole and history, walked from the root.
    fn locate(&self) -> Option<NodeId> {
        let rotation = Rotation::for_board(self.board.empty_hole());
        let empty = self.board.empty_hole()?;
        let path = std::iter::once(empty)
            .chain(self.board.moves().iter().flat_map(|jump| [jump.from, jump.to]))
            .map(|hole| rotation.to_canonical(hole));
        self.solutions.walk(path)
    }

    /// After a destination pick: keep playing or decide the game.
    fn settle(&mut self) {
        if self.board.has_moves_left() {
            self.set_phase(Phase::Waiting);
            return;
        }
        let outcome = if self.board.pegs_left() == 1 {
            Outcome::Won
        } else {
            Outcome::Lost
        };
        log::debug!("game over: {:?} with {} pegs", outcome, self.board.pegs_left());
        self.outcome = Some(outcome);
        self.set_phase(Phase::Finished);
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("phase", &self.phase)
            .field("cursor", &self.cursor)
            .field("rotation", &self.rotation)
            .field("outcome", &self.outcome)
            .finish()
    }
}
