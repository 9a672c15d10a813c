//! Replays every recorded line of a solution trie on a real board.

use std::fmt;

use pegboard_core::notation::format_moves;
use pegboard_core::{Board, Jump, NodeId, Trie, CANONICAL_HOLES};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Problem {
    /// A starting hole outside 0-4.
    NonCanonicalStart(usize),
    /// A recorded jump that is not legal after `moves`.
    IllegalJump { start: usize, moves: Vec<Jump>, jump: Jump },
    /// A source hole with no destination under it.
    DanglingSource { start: usize, moves: Vec<Jump>, from: usize },
    /// A line marked as won that leaves more than one peg.
    NotWon { start: usize, moves: Vec<Jump>, pegs: usize },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::NonCanonicalStart(hole) => {
                write!(f, "starting hole {} is not canonical", hole + 1)
            }
            Problem::IllegalJump { start, moves, jump } => write!(
                f,
                "empty {} [{}]: illegal jump {}",
                start + 1,
                format_moves(moves),
                jump
            ),
            Problem::DanglingSource { start, moves, from } => write!(
                f,
                "empty {} [{}]: source {} has no destination",
                start + 1,
                format_moves(moves),
                from + 1
            ),
            Problem::NotWon { start, moves, pegs } => write!(
                f,
                "empty {} [{}]: terminal line leaves {} pegs",
                start + 1,
                format_moves(moves),
                pegs
            ),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Report {
    pub starts: usize,
    pub jumps: usize,
    pub terminals: usize,
    /// Nodes whose count differs from the sum of their children. Counts are
    /// advisory, so these are reported but do not fail verification.
    pub count_mismatches: usize,
    pub problems: Vec<Problem>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check every path of `trie` against the rules.
pub fn verify(trie: &Trie) -> Report {
    let mut report = Report::default();
    for start in trie.children(Trie::ROOT) {
        let hole = trie.node(start).value();
        report.starts += 1;
        if hole >= CANONICAL_HOLES {
            report.problems.push(Problem::NonCanonicalStart(hole));
            continue;
        }

        let mut board = Board::new();
        board.set_empty_hole(hole);
        check_count(trie, start, &mut report);
        walk(trie, start, hole, &mut board, &mut report);
    }
    report
}

/// `at` is a start or destination node; its children are sources.
fn walk(trie: &Trie, at: NodeId, start: usize, board: &mut Board, report: &mut Report) {
    if trie.node(at).is_terminal() {
        report.terminals += 1;
        if board.pegs_left() != 1 {
            report.problems.push(Problem::NotWon {
                start,
                moves: board.moves().to_vec(),
                pegs: board.pegs_left(),
            });
        }
    }

    for source in trie.children(at) {
        let from = trie.node(source).value();
        check_count(trie, source, report);
        if trie.node(source).first_child().is_none() {
            report.problems.push(Problem::DanglingSource {
                start,
                moves: board.moves().to_vec(),
                from,
            });
        }

        for destination in trie.children(source) {
            let jump = Jump::new(from, trie.node(destination).value());
            if !board.jump(jump.from, jump.to) {
                report.problems.push(Problem::IllegalJump {
                    start,
                    moves: board.moves().to_vec(),
                    jump,
                });
                continue;
            }
            report.jumps += 1;
            check_count(trie, destination, report);
            walk(trie, destination, start, board, report);
            board.undo();
        }
    }
}

fn check_count(trie: &Trie, id: NodeId, report: &mut Report) {
    let node = trie.node(id);
    let below: u64 = trie
        .children(id)
        .map(|child| trie.node(child).solutions())
        .sum();
    let expected = below + u64::from(node.is_terminal());
    if expected != node.solutions() {
        log::warn!(
            "node {} records {} solutions, children add up to {}",
            id.index(),
            node.solutions(),
            expected
        );
        report.count_mismatches += 1;
    }
}
