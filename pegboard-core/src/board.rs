//! The 15-hole triangle: pegs, adjacency, jumps and move history.
//!
//! ```text
//!             0
//!           1   2
//!         3   4   5
//!       6   7   8   9
//!    10  11  12  13  14
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::events::{Change, ObserverId, Observers};

/// Number of holes on the board.
pub const HOLES: usize = 15;

/// Play state of a single hole.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PegState {
    Empty,
    Filled,
    /// Highlighted as the peg about to move.
    Selected,
    /// Highlighted as the peg a hinted move would remove.
    ToBeJumped,
}

impl PegState {
    /// Single character used by the text rendering of a board.
    pub fn symbol(self) -> char {
        match self {
            PegState::Empty => '.',
            PegState::Filled => 'o',
            PegState::Selected => '*',
            PegState::ToBeJumped => 'x',
        }
    }
}

/// Neighbor directions in clockwise order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    TopLeft = 0,
    TopRight = 1,
    Right = 2,
    BotRight = 3,
    BotLeft = 4,
    Left = 5,
}

impl Direction {
    /// All six directions, clockwise from top-left.
    pub const ALL: [Direction; 6] = [
        Direction::TopLeft,
        Direction::TopRight,
        Direction::Right,
        Direction::BotRight,
        Direction::BotLeft,
        Direction::Left,
    ];

    /// The direction pointing back the way this one came.
    #[inline]
    pub fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 3) % 6]
    }
}

/// One hole on the board and its current state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Peg {
    index: u8,
    state: PegState,
}

impl Peg {
    fn new(index: usize) -> Peg {
        Peg {
            index: index as u8,
            state: PegState::Filled,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn state(&self) -> PegState {
        self.state
    }

    fn empty(&mut self) {
        self.state = PegState::Empty;
    }

    fn fill(&mut self) {
        self.state = PegState::Filled;
    }

    fn select(&mut self) {
        if self.state == PegState::Filled {
            self.state = PegState::Selected;
        }
    }

    fn mark_jumped(&mut self) {
        if self.state == PegState::Filled {
            self.state = PegState::ToBeJumped;
        }
    }
}

/// A jump from one hole into another, two hops away.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Jump {
    pub from: usize,
    pub to: usize,
}

impl Jump {
    #[inline]
    pub const fn new(from: usize, to: usize) -> Jump {
        Jump { from, to }
    }
}

/// Marks a missing neighbor in `NEIGHBORS`.
const NONE: u8 = u8::MAX;

/// Immediate neighbor of each hole, indexed by `Direction`.
#[rustfmt::skip]
const NEIGHBORS: [[u8; 6]; HOLES] = [
    // TopLeft TopRight Right BotRight BotLeft Left
    [NONE, NONE, NONE,    2,    1, NONE], // 0
    [NONE,    0,    2,    4,    3, NONE], // 1
    [   0, NONE, NONE,    5,    4,    1], // 2
    [NONE,    1,    4,    7,    6, NONE], // 3
    [   1,    2,    5,    8,    7,    3], // 4
    [   2, NONE, NONE,    9,    8,    4], // 5
    [NONE,    3,    7,   11,   10, NONE], // 6
    [   3,    4,    8,   12,   11,    6], // 7
    [   4,    5,    9,   13,   12,    7], // 8
    [   5, NONE, NONE,   14,   13,    8], // 9
    [NONE,    6,   11, NONE, NONE, NONE], // 10
    [   6,    7,   12, NONE, NONE,   10], // 11
    [   7,    8,   13, NONE, NONE,   11], // 12
    [   8,    9,   14, NONE, NONE,   12], // 13
    [   9, NONE, NONE, NONE, NONE,   13], // 14
];

/// Game board: pegs, the chosen empty hole and the moves made since.
pub struct Board {
    pegs: [Peg; HOLES],
    empty_hole: Option<usize>,
    moves: Vec<Jump>,
    observers: Observers,
}

impl Board {
    /// A full board waiting for the empty hole to be chosen.
    pub fn new() -> Board {
        let mut pegs = [Peg::new(0); HOLES];
        for (index, peg) in pegs.iter_mut().enumerate() {
            *peg = Peg::new(index);
        }
        Board {
            pegs,
            empty_hole: None,
            moves: Vec::new(),
            observers: Observers::new(),
        }
    }

    /// Immediate neighbor of `hole` in `direction`, if there is one.
    #[inline]
    pub fn neighbor(hole: usize, direction: Direction) -> Option<usize> {
        if hole >= HOLES {
            return None;
        }
        match NEIGHBORS[hole][direction as usize] {
            NONE => None,
            n => Some(n as usize),
        }
    }

    /// Direction leading from `from` to `to` when they are one or two hops
    /// apart along a straight line.
    pub fn direction(from: usize, to: usize) -> Option<Direction> {
        if from >= HOLES || to >= HOLES {
            return None;
        }
        for direction in Direction::ALL {
            let Some(adjacent) = Board::neighbor(from, direction) else {
                continue;
            };
            if adjacent == to {
                return Some(direction);
            }
            if Board::neighbor(adjacent, direction) == Some(to) {
                return Some(direction);
            }
        }
        None
    }

    /// The hole a jump from `from` to `to` passes over, if the two holes are
    /// exactly two hops apart.
    pub fn jumped_hole(from: usize, to: usize) -> Option<usize> {
        let direction = Board::direction(from, to)?;
        let middle = Board::neighbor(from, direction)?;
        (Board::neighbor(middle, direction) == Some(to)).then_some(middle)
    }

    // ========== Observers ==========

    /// Register a callback invoked after every board mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(Change) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    /// Remove a callback registered with `subscribe`.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn changed(&mut self) {
        self.observers.notify(Change::Board);
    }

    // ========== Queries ==========

    /// The peg at `index`, or `None` when out of range.
    #[inline]
    pub fn peg(&self, index: usize) -> Option<&Peg> {
        self.pegs.get(index)
    }

    /// State of the hole at `index`, or `None` when out of range.
    #[inline]
    pub fn state(&self, index: usize) -> Option<PegState> {
        self.peg(index).map(Peg::state)
    }

    /// States of all holes in index order.
    pub fn states(&self) -> [PegState; HOLES] {
        self.pegs.map(|peg| peg.state)
    }

    /// The hole chosen empty at the start of the game.
    #[inline]
    pub fn empty_hole(&self) -> Option<usize> {
        self.empty_hole
    }

    /// Moves made since the empty hole was chosen, oldest first.
    #[inline]
    pub fn moves(&self) -> &[Jump] {
        &self.moves
    }

    fn is_empty(&self, hole: usize) -> bool {
        self.pegs[hole].state == PegState::Empty
    }

    /// Whether a jump from `from` into `to` is legal right now.
    pub fn can_jump(&self, from: usize, to: usize) -> bool {
        let Some(middle) = Board::jumped_hole(from, to) else {
            return false;
        };
        !self.is_empty(from) && !self.is_empty(middle) && self.is_empty(to)
    }

    /// Every legal jump, scanning holes in order and directions clockwise.
    pub fn legal_jumps(&self) -> Vec<Jump> {
        let mut jumps = Vec::new();
        for from in 0..HOLES {
            for direction in Direction::ALL {
                let to = Board::neighbor(from, direction)
                    .and_then(|middle| Board::neighbor(middle, direction));
                if let Some(to) = to {
                    if self.can_jump(from, to) {
                        jumps.push(Jump::new(from, to));
                    }
                }
            }
        }
        jumps
    }

    /// Whether any legal jump remains.
    pub fn has_moves_left(&self) -> bool {
        (0..HOLES).any(|from| {
            Direction::ALL.iter().any(|&direction| {
                Board::neighbor(from, direction)
                    .and_then(|middle| Board::neighbor(middle, direction))
                    .is_some_and(|to| self.can_jump(from, to))
            })
        })
    }

    /// Number of holes in the `Filled` state.
    pub fn pegs_left(&self) -> usize {
        self.pegs
            .iter()
            .filter(|peg| peg.state == PegState::Filled)
            .count()
    }

    // ========== Mutations ==========

    /// Jump the peg at `from` into `to`, removing the peg in between.
    ///
    /// Returns false and leaves the board untouched when the jump is not legal.
    pub fn jump(&mut self, from: usize, to: usize) -> bool {
        if !self.can_jump(from, to) {
            return false;
        }
        let Some(middle) = Board::jumped_hole(from, to) else {
            return false;
        };

        self.pegs[from].empty();
        self.pegs[middle].empty();
        self.pegs[to].fill();
        self.moves.push(Jump::new(from, to));

        self.changed();
        true
    }

    /// Take back the most recent jump. Highlighting is always cleared.
    pub fn undo(&mut self) {
        self.clear();
        let Some(last) = self.moves.pop() else {
            return;
        };

        self.pegs[last.to].empty();
        self.pegs[last.from].fill();
        if let Some(middle) = Board::jumped_hole(last.from, last.to) {
            self.pegs[middle].fill();
        }

        self.changed();
    }

    /// Fill every hole and forget the empty hole and history.
    pub fn reset(&mut self) {
        for peg in &mut self.pegs {
            peg.fill();
        }
        self.moves.clear();
        self.empty_hole = None;

        self.changed();
    }

    /// Choose the starting empty hole. Only the first call of a game counts.
    pub fn set_empty_hole(&mut self, hole: usize) -> bool {
        if self.empty_hole.is_some() || hole >= HOLES {
            return false;
        }
        self.pegs[hole].empty();
        self.empty_hole = Some(hole);

        self.changed();
        true
    }

    /// Drop all highlighting, leaving empty holes empty.
    pub fn clear(&mut self) {
        for peg in &mut self.pegs {
            if peg.state != PegState::Empty {
                peg.fill();
            }
        }

        self.changed();
    }

    /// Highlight the peg at `index` as the one about to move.
    pub fn select(&mut self, index: usize) {
        if index >= HOLES {
            return;
        }
        self.clear();
        self.pegs[index].select();

        self.changed();
    }

    /// Highlight a legal jump: the moving peg and the peg it would remove.
    pub fn show_move(&mut self, from: usize, to: usize) {
        if !self.can_jump(from, to) {
            return;
        }
        let Some(middle) = Board::jumped_hole(from, to) else {
            return;
        };
        self.pegs[from].select();
        self.pegs[middle].mark_jumped();

        self.changed();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("states", &self.states())
            .field("empty_hole", &self.empty_hole)
            .field("moves", &self.moves)
            .finish()
    }
}

/// Renders the triangle, one row per line.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut start = 0;
        for row in 0..5 {
            write!(f, "{}", " ".repeat(4 - row))?;
            for (i, peg) in self.pegs[start..=start + row].iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", peg.state.symbol())?;
            }
            writeln!(f)?;
            start += row + 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn started(empty: usize) -> Board {
        let mut board = Board::new();
        board.set_empty_hole(empty);
        board
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        for hole in 0..HOLES {
            for direction in Direction::ALL {
                if let Some(n) = Board::neighbor(hole, direction) {
                    assert_eq!(
                        Board::neighbor(n, direction.opposite()),
                        Some(hole),
                        "hole {} direction {:?}",
                        hole,
                        direction
                    );
                }
            }
        }
    }

    #[test]
    fn test_neighbor_out_of_range() {
        assert_eq!(Board::neighbor(15, Direction::Right), None);
        assert_eq!(Board::neighbor(usize::MAX, Direction::Left), None);
    }

    #[test]
    fn test_direction_adjacent_and_two_hops() {
        assert_eq!(Board::direction(0, 1), Some(Direction::BotLeft));
        assert_eq!(Board::direction(0, 3), Some(Direction::BotLeft));
        assert_eq!(Board::direction(0, 5), Some(Direction::BotRight));
        assert_eq!(Board::direction(3, 5), Some(Direction::Right));
        assert_eq!(Board::direction(14, 5), Some(Direction::TopLeft));
        assert_eq!(Board::direction(12, 10), Some(Direction::Left));
    }

    #[test]
    fn test_direction_unrelated_holes() {
        assert_eq!(Board::direction(0, 4), None);
        assert_eq!(Board::direction(0, 10), None);
        assert_eq!(Board::direction(3, 3), None);
        assert_eq!(Board::direction(3, 99), None);
    }

    #[test]
    fn test_direction_matches_hop_chain() {
        for from in 0..HOLES {
            for to in 0..HOLES {
                if let Some(d) = Board::direction(from, to) {
                    let first = Board::neighbor(from, d).unwrap();
                    let second = Board::neighbor(first, d);
                    assert!(first == to || second == Some(to), "{} -> {}", from, to);
                }
            }
        }
    }

    #[test]
    fn test_jumped_hole() {
        assert_eq!(Board::jumped_hole(0, 3), Some(1));
        assert_eq!(Board::jumped_hole(10, 3), Some(6));
        assert_eq!(Board::jumped_hole(0, 1), None);
        assert_eq!(Board::jumped_hole(0, 4), None);
    }

    #[test]
    fn test_new_board_is_full() {
        let board = Board::new();
        assert_eq!(board.pegs_left(), 15);
        assert_eq!(board.empty_hole(), None);
        assert!(board.moves().is_empty());
        assert!(!board.has_moves_left());
    }

    #[test]
    fn test_set_empty_hole_once() {
        let mut board = Board::new();
        assert!(board.set_empty_hole(4));
        assert!(!board.set_empty_hole(0));
        assert_eq!(board.empty_hole(), Some(4));
        assert_eq!(board.state(4), Some(PegState::Empty));
        assert_eq!(board.state(0), Some(PegState::Filled));
        assert_eq!(board.pegs_left(), 14);
    }

    #[test]
    fn test_set_empty_hole_out_of_range() {
        let mut board = Board::new();
        assert!(!board.set_empty_hole(15));
        assert_eq!(board.empty_hole(), None);
        assert_eq!(board.pegs_left(), 15);
    }

    #[test]
    fn test_jump_moves_three_holes() {
        let mut board = started(3);
        assert!(board.jump(0, 3));
        assert_eq!(board.state(0), Some(PegState::Empty));
        assert_eq!(board.state(1), Some(PegState::Empty));
        assert_eq!(board.state(3), Some(PegState::Filled));
        assert_eq!(board.pegs_left(), 13);
        assert_eq!(board.moves(), &[Jump::new(0, 3)]);
    }

    #[test]
    fn test_illegal_jumps_do_not_mutate() {
        let mut board = started(3);
        let before = board.states();

        assert!(!board.jump(0, 1)); // adjacent
        assert!(!board.jump(1, 3)); // adjacent, destination empty
        assert!(!board.jump(2, 3)); // not on a line
        assert!(!board.jump(7, 9)); // destination filled
        assert!(!board.jump(3, 0)); // source empty
        assert!(!board.jump(0, 15));
        assert!(!board.jump(20, 3));

        assert_eq!(board.states(), before);
        assert!(board.moves().is_empty());
    }

    #[test]
    fn test_cannot_jump_over_empty_hole() {
        let mut board = started(3);
        assert!(board.jump(0, 3));
        // 1 is now empty, so 3 -> 0 over 1 is illegal even though 0 is empty.
        assert!(!board.jump(3, 0));
    }

    #[test]
    fn test_legal_jumps_from_corner_start() {
        let board = started(0);
        assert_eq!(board.legal_jumps(), vec![Jump::new(3, 0), Jump::new(5, 0)]);
    }

    #[test]
    fn test_legal_jumps_from_center_row() {
        let board = started(3);
        assert_eq!(
            board.legal_jumps(),
            vec![
                Jump::new(0, 3),
                Jump::new(5, 3),
                Jump::new(10, 3),
                Jump::new(12, 3)
            ]
        );
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let mut board = started(3);
        let before = board.states();
        assert!(board.jump(5, 3));
        board.undo();
        assert_eq!(board.states(), before);
        assert!(board.moves().is_empty());
    }

    #[test]
    fn test_undo_empty_history_only_clears() {
        let mut board = started(3);
        board.select(0);
        board.undo();
        assert_eq!(board.state(0), Some(PegState::Filled));
        assert_eq!(board.state(3), Some(PegState::Empty));
    }

    #[test]
    fn test_undo_clears_highlighting() {
        let mut board = started(3);
        board.jump(0, 3);
        board.select(5);
        board.undo();
        assert_eq!(board.state(5), Some(PegState::Filled));
        assert_eq!(board.pegs_left(), 14);
    }

    #[test]
    fn test_reset() {
        let mut board = started(3);
        board.jump(0, 3);
        board.reset();
        assert_eq!(board.pegs_left(), 15);
        assert_eq!(board.empty_hole(), None);
        assert!(board.moves().is_empty());
        assert!(board.set_empty_hole(7));
    }

    #[test]
    fn test_select_requires_filled() {
        let mut board = started(3);
        board.select(3);
        assert_eq!(board.state(3), Some(PegState::Empty));
        board.select(0);
        assert_eq!(board.state(0), Some(PegState::Selected));
        board.select(5);
        assert_eq!(board.state(0), Some(PegState::Filled));
        assert_eq!(board.state(5), Some(PegState::Selected));
    }

    #[test]
    fn test_selected_peg_can_still_jump() {
        let mut board = started(3);
        board.select(0);
        assert!(board.can_jump(0, 3));
        assert!(board.jump(0, 3));
    }

    #[test]
    fn test_clear_keeps_empty_holes() {
        let mut board = started(3);
        board.show_move(0, 3);
        board.clear();
        assert_eq!(board.state(3), Some(PegState::Empty));
        assert_eq!(board.pegs_left(), 14);
    }

    #[test]
    fn test_show_move() {
        let mut board = started(3);
        board.show_move(10, 3);
        assert_eq!(board.state(10), Some(PegState::Selected));
        assert_eq!(board.state(6), Some(PegState::ToBeJumped));
        assert_eq!(board.state(3), Some(PegState::Empty));
    }

    #[test]
    fn test_show_move_ignores_illegal() {
        let mut board = started(3);
        board.show_move(0, 4);
        board.show_move(0, 30);
        assert_eq!(board.pegs_left(), 14);
    }

    #[test]
    fn test_observers_see_each_mutation() {
        let mut board = Board::new();
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        board.subscribe(move |change| {
            assert_eq!(change, Change::Board);
            seen.set(seen.get() + 1);
        });

        board.set_empty_hole(3);
        assert_eq!(count.get(), 1);
        board.jump(0, 3);
        assert_eq!(count.get(), 2);
        board.jump(0, 3); // illegal, silent
        assert_eq!(count.get(), 2);
        board.undo(); // clear + undo
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn test_display() {
        let board = started(0);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "    .");
        assert_eq!(lines[4], "o o o o o");
    }
}
