//! Solution trie: an arena of first-child/next-sibling nodes.
//!
//! Level one below the root holds the five canonical starting holes. After
//! that every jump takes two levels, the source hole and then the
//! destination hole, all in canonical (rotated) labels. Each node records
//! how many winning games pass through it.

use serde::Serialize;

use crate::board::{Jump, HOLES};
use crate::config::HintPolicy;

/// Index of a node in the trie's arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    value: u8,
    terminal: bool,
    solutions: u64,
    first_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    /// Canonical hole index this node stands for.
    #[inline]
    pub fn value(&self) -> usize {
        self.value as usize
    }

    /// True if a winning game ends here.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Winning games reachable through this node.
    #[inline]
    pub fn solutions(&self) -> u64 {
        self.solutions
    }

    #[inline]
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    #[inline]
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }
}

/// Read-only solution tree. `nodes[0]` is the root.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Trie {
    nodes: Vec<Node>,
}

impl Trie {
    pub const ROOT: NodeId = NodeId(0);

    /// A trie holding only the root.
    pub fn new() -> Trie {
        Trie {
            nodes: vec![Node {
                value: 0,
                terminal: false,
                solutions: 0,
                first_child: None,
                next_sibling: None,
            }],
        }
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes[0].first_child.is_none()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Append a child to the end of `parent`'s child list.
    ///
    /// Returns `None` if `value` is not a hole index or `parent` already has
    /// a child with this value; the trie is left unchanged in that case.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        value: usize,
        terminal: bool,
        solutions: u64,
    ) -> Option<NodeId> {
        if value >= HOLES {
            return None;
        }
        let mut last = None;
        let mut next = self.nodes[parent.index()].first_child;
        while let Some(id) = next {
            if self.node(id).value() == value {
                return None;
            }
            last = Some(id);
            next = self.node(id).next_sibling;
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            value: value as u8,
            terminal,
            solutions,
            first_child: None,
            next_sibling: None,
        });
        match last {
            Some(sibling) => self.nodes[sibling.index()].next_sibling = Some(id),
            None => self.nodes[parent.index()].first_child = Some(id),
        }
        Some(id)
    }

    /// Children of `id` in list order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            trie: self,
            next: self.node(id).first_child,
        }
    }

    /// The child of `id` whose value is `value`.
    pub fn child(&self, id: NodeId, value: usize) -> Option<NodeId> {
        self.children(id).find(|&child| self.node(child).value() == value)
    }

    /// Step a cursor one level down. A `None` cursor stays `None`.
    #[inline]
    pub fn descend(&self, cursor: Option<NodeId>, value: usize) -> Option<NodeId> {
        cursor.and_then(|id| self.child(id, value))
    }

    /// Follow `path` from the root, stopping at the first miss.
    pub fn walk(&self, path: impl IntoIterator<Item = usize>) -> Option<NodeId> {
        path.into_iter()
            .try_fold(Trie::ROOT, |id, value| self.child(id, value))
    }

    /// Winning games below a cursor, zero for `None`.
    #[inline]
    pub fn solutions(&self, cursor: Option<NodeId>) -> u64 {
        cursor.map_or(0, |id| self.node(id).solutions)
    }

    /// The child with the most solutions. Ties keep the earliest child.
    pub fn best_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for child in self.children(id) {
            match best {
                Some(current) if self.node(child).solutions <= self.node(current).solutions => {}
                _ => best = Some(child),
            }
        }
        best
    }

    /// Suggested next jump from `id`, in canonical hole labels.
    ///
    /// `id` must sit at a source level (the starting hole or the end of a
    /// jump). Returns the jump and the number of winning games that follow it.
    pub fn hint(&self, id: NodeId, policy: HintPolicy) -> Option<(Jump, u64)> {
        let source = self.best_child(id)?;
        match policy {
            HintPolicy::BestDestination => {
                let destination = self.best_child(source)?;
                let jump = Jump::new(self.node(source).value(), self.node(destination).value());
                Some((jump, self.node(destination).solutions))
            }
            HintPolicy::CompareToSource => {
                // Destinations are measured against the source's count, so
                // the first destination is kept and a larger destination
                // replaces the source instead.
                let destination = self.node(source).first_child?;
                let mut shown = source;
                for child in self.children(source) {
                    if self.node(child).solutions > self.node(shown).solutions {
                        shown = child;
                    }
                }
                let jump = Jump::new(self.node(shown).value(), self.node(destination).value());
                Some((jump, self.node(destination).solutions))
            }
        }
    }

    /// Node, terminal and solution totals for the whole trie and for each
    /// starting hole.
    pub fn stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        for class in self.children(Trie::ROOT) {
            let mut class_stats = ClassStats {
                start: self.node(class).value(),
                solutions: self.node(class).solutions,
                ..ClassStats::default()
            };

            let mut stack = vec![(class, 1usize)];
            while let Some((id, depth)) = stack.pop() {
                class_stats.nodes += 1;
                if self.node(id).terminal {
                    class_stats.terminals += 1;
                }
                class_stats.max_depth = class_stats.max_depth.max(depth);
                for child in self.children(id) {
                    stack.push((child, depth + 1));
                }
            }

            stats.nodes += class_stats.nodes;
            stats.terminals += class_stats.terminals;
            stats.solutions += class_stats.solutions;
            stats.max_depth = stats.max_depth.max(class_stats.max_depth);
            stats.classes.push(class_stats);
        }
        stats
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a sibling chain.
pub struct Children<'a> {
    trie: &'a Trie,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.trie.node(id).next_sibling;
        Some(id)
    }
}

/// Totals for one canonical starting hole.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClassStats {
    pub start: usize,
    pub nodes: usize,
    pub terminals: usize,
    pub solutions: u64,
    pub max_depth: usize,
}

/// Totals for a whole trie, root excluded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrieStats {
    pub nodes: usize,
    pub terminals: usize,
    pub solutions: u64,
    pub max_depth: usize,
    pub classes: Vec<ClassStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Root -> start 3 with two first moves; 0->3 has two destinations
    /// recorded so hint policies can disagree.
    fn sample() -> Trie {
        let mut trie = Trie::new();
        let start = trie.add_child(Trie::ROOT, 3, false, 10).unwrap();

        let src0 = trie.add_child(start, 0, false, 4).unwrap();
        trie.add_child(src0, 3, false, 1).unwrap();
        trie.add_child(src0, 9, false, 3).unwrap();

        let src5 = trie.add_child(start, 5, false, 6).unwrap();
        let dst = trie.add_child(src5, 3, false, 6).unwrap();
        let next = trie.add_child(dst, 12, false, 6).unwrap();
        trie.add_child(next, 5, true, 6).unwrap();

        trie.add_child(Trie::ROOT, 0, false, 7).unwrap();
        trie
    }

    #[test]
    fn test_new_trie_is_empty() {
        let trie = Trie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.children(Trie::ROOT).count(), 0);
    }

    #[test]
    fn test_children_in_insertion_order() {
        let trie = sample();
        let values: Vec<usize> = trie
            .children(Trie::ROOT)
            .map(|id| trie.node(id).value())
            .collect();
        assert_eq!(values, vec![3, 0]);
    }

    #[test]
    fn test_duplicate_sibling_rejected() {
        let mut trie = sample();
        let len = trie.len();
        assert_eq!(trie.add_child(Trie::ROOT, 3, false, 1), None);
        assert_eq!(trie.len(), len);
    }

    #[test]
    fn test_value_outside_board_rejected() {
        let mut trie = Trie::new();
        trie.add_child(Trie::ROOT, 0, false, 1).unwrap();
        assert_eq!(trie.add_child(Trie::ROOT, 15, false, 1), None);
        assert_eq!(trie.add_child(Trie::ROOT, 256, false, 1), None);
        assert_eq!(trie.len(), 2);

        let values: Vec<usize> = trie
            .children(Trie::ROOT)
            .map(|id| trie.node(id).value())
            .collect();
        assert_eq!(values, vec![0]);
        let next = trie.add_child(Trie::ROOT, 14, false, 1).unwrap();
        assert_eq!(next.index(), 2);
    }

    #[test]
    fn test_same_value_under_different_parents() {
        let mut trie = Trie::new();
        let a = trie.add_child(Trie::ROOT, 0, false, 0).unwrap();
        let b = trie.add_child(Trie::ROOT, 1, false, 0).unwrap();
        assert!(trie.add_child(a, 5, false, 0).is_some());
        assert!(trie.add_child(b, 5, false, 0).is_some());
    }

    #[test]
    fn test_child_lookup() {
        let trie = sample();
        let start = trie.child(Trie::ROOT, 3).unwrap();
        assert_eq!(trie.node(start).solutions(), 10);
        assert!(trie.child(start, 5).is_some());
        assert_eq!(trie.child(start, 14), None);
        assert_eq!(trie.child(Trie::ROOT, 4), None);
    }

    #[test]
    fn test_walk_and_descend() {
        let trie = sample();
        let node = trie.walk([3, 5, 3, 12, 5]).unwrap();
        assert!(trie.node(node).is_terminal());
        assert_eq!(trie.walk([3, 5, 4]), None);

        let cursor = trie.walk([3]);
        let cursor = trie.descend(cursor, 0);
        assert_eq!(trie.solutions(cursor), 4);
        let cursor = trie.descend(cursor, 14);
        assert_eq!(cursor, None);
        assert_eq!(trie.descend(cursor, 3), None);
        assert_eq!(trie.solutions(cursor), 0);
    }

    #[test]
    fn test_walk_empty_path_is_root() {
        let trie = sample();
        assert_eq!(trie.walk(Vec::new()), Some(Trie::ROOT));
    }

    #[test]
    fn test_best_child_prefers_strictly_greater() {
        let mut trie = Trie::new();
        let first = trie.add_child(Trie::ROOT, 1, false, 5).unwrap();
        trie.add_child(Trie::ROOT, 2, false, 5).unwrap();
        trie.add_child(Trie::ROOT, 3, false, 2).unwrap();
        assert_eq!(trie.best_child(Trie::ROOT), Some(first));

        let larger = trie.add_child(Trie::ROOT, 4, false, 9).unwrap();
        assert_eq!(trie.best_child(Trie::ROOT), Some(larger));
    }

    #[test]
    fn test_best_child_of_leaf() {
        let mut trie = Trie::new();
        let leaf = trie.add_child(Trie::ROOT, 1, true, 1).unwrap();
        assert_eq!(trie.best_child(leaf), None);
    }

    #[test]
    fn test_hint_best_destination() {
        let trie = sample();
        let start = trie.walk([3]).unwrap();
        let (jump, solutions) = trie.hint(start, HintPolicy::BestDestination).unwrap();
        assert_eq!(jump, Jump::new(5, 3));
        assert_eq!(solutions, 6);
    }

    #[test]
    fn test_hint_policies_disagree_on_destination() {
        let mut trie = Trie::new();
        let start = trie.add_child(Trie::ROOT, 3, false, 4).unwrap();
        let src = trie.add_child(start, 0, false, 4).unwrap();
        trie.add_child(src, 3, false, 1).unwrap();
        trie.add_child(src, 9, false, 3).unwrap();

        let best = trie.hint(start, HintPolicy::BestDestination).unwrap();
        assert_eq!(best, (Jump::new(0, 9), 3));

        let legacy = trie.hint(start, HintPolicy::CompareToSource).unwrap();
        assert_eq!(legacy, (Jump::new(0, 3), 1));
    }

    #[test]
    fn test_hint_compare_to_source_can_swap_source() {
        // A destination with more solutions than its source replaces the
        // source in the suggestion.
        let mut trie = Trie::new();
        let start = trie.add_child(Trie::ROOT, 4, false, 2).unwrap();
        let src = trie.add_child(start, 11, false, 2).unwrap();
        trie.add_child(src, 4, false, 1).unwrap();
        trie.add_child(src, 13, false, 5).unwrap();

        let (jump, _) = trie.hint(start, HintPolicy::CompareToSource).unwrap();
        assert_eq!(jump, Jump::new(13, 4));
    }

    #[test]
    fn test_hint_missing_levels() {
        let mut trie = Trie::new();
        let start = trie.add_child(Trie::ROOT, 2, false, 0).unwrap();
        assert_eq!(trie.hint(start, HintPolicy::BestDestination), None);
        trie.add_child(start, 9, false, 0).unwrap();
        assert_eq!(trie.hint(start, HintPolicy::BestDestination), None);
        assert_eq!(trie.hint(start, HintPolicy::CompareToSource), None);
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.nodes, 9);
        assert_eq!(stats.terminals, 1);
        assert_eq!(stats.solutions, 17);
        assert_eq!(stats.max_depth, 5);
        assert_eq!(stats.classes.len(), 2);
        assert_eq!(stats.classes[0].start, 3);
        assert_eq!(stats.classes[0].nodes, 8);
        assert_eq!(stats.classes[1].nodes, 1);
        assert_eq!(stats.classes[1].max_depth, 1);
    }
}
