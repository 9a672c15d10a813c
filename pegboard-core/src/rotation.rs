//! Rotational symmetry of the triangle.
//!
//! Solutions are only stored for the five starting holes 0-4. Any other
//! starting hole is turned into that set by one or two clockwise rotations
//! of the board, and every hole is relabeled the same way before it is
//! looked up.

use crate::board::{Jump, HOLES};

/// Number of canonical starting holes (0-4).
pub const CANONICAL_HOLES: usize = 5;

/// Hole labels after rotating the board. `FACTORS[hole][turns]` is where
/// `hole` ends up after `turns` clockwise rotations.
#[rustfmt::skip]
const FACTORS: [[u8; 3]; HOLES] = [
    [ 0, 14, 10],
    [ 1,  9, 11],
    [ 2, 13,  6],
    [ 3,  5, 12],
    [ 4,  8,  7],
    [ 5, 12,  3],
    [ 6,  2, 13],
    [ 7,  4,  8],
    [ 8,  7,  4],
    [ 9, 11,  1],
    [10,  0, 14],
    [11,  1,  9],
    [12,  3,  5],
    [13,  6,  2],
    [14, 10,  0],
];

/// Rotations needed to bring each starting hole into the canonical set.
const ROTATIONS: [u8; HOLES] = [0, 0, 0, 0, 0, 2, 1, 1, 2, 2, 1, 1, 1, 2, 2];

/// A rotation of the board by 0, 1 or 2 clockwise turns.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct Rotation(u8);

impl Rotation {
    pub const IDENTITY: Rotation = Rotation(0);

    /// The rotation that maps `empty_hole` into holes 0-4.
    /// Out-of-range holes get the identity.
    #[inline]
    pub fn for_empty_hole(empty_hole: usize) -> Rotation {
        ROTATIONS
            .get(empty_hole)
            .map_or(Rotation::IDENTITY, |&turns| Rotation(turns))
    }

    /// Like `for_empty_hole`, treating "not chosen yet" as the identity.
    #[inline]
    pub fn for_board(empty_hole: Option<usize>) -> Rotation {
        empty_hole.map_or(Rotation::IDENTITY, Rotation::for_empty_hole)
    }

    #[inline]
    pub fn turns(self) -> u8 {
        self.0
    }

    /// Board hole -> trie hole.
    #[inline]
    pub fn to_canonical(self, hole: usize) -> usize {
        match FACTORS.get(hole) {
            Some(row) => row[self.0 as usize] as usize,
            None => hole,
        }
    }

    /// Trie hole -> board hole.
    #[inline]
    pub fn to_absolute(self, hole: usize) -> usize {
        if self.0 == 0 {
            return hole;
        }
        match FACTORS.get(hole) {
            Some(row) => row[3 - self.0 as usize] as usize,
            None => hole,
        }
    }

    pub fn canonical_jump(self, jump: Jump) -> Jump {
        Jump::new(self.to_canonical(jump.from), self.to_canonical(jump.to))
    }

    pub fn absolute_jump(self, jump: Jump) -> Jump {
        Jump::new(self.to_absolute(jump.from), self.to_absolute(jump.to))
    }
}

/// The canonical starting hole (0-4) equivalent to `empty_hole`.
pub fn canonical_class(empty_hole: usize) -> Option<usize> {
    (empty_hole < HOLES).then(|| Rotation::for_empty_hole(empty_hole).to_canonical(empty_hole))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Direction};

    #[test]
    fn test_round_trip_for_every_start() {
        for empty in 0..HOLES {
            let rotation = Rotation::for_empty_hole(empty);
            for hole in 0..HOLES {
                assert_eq!(
                    rotation.to_absolute(rotation.to_canonical(hole)),
                    hole,
                    "hole {} with {} empty",
                    hole,
                    empty
                );
                assert_eq!(rotation.to_canonical(rotation.to_absolute(hole)), hole);
            }
        }
    }

    #[test]
    fn test_every_start_lands_in_canonical_set() {
        for empty in 0..HOLES {
            let class = canonical_class(empty).unwrap();
            assert!(class < CANONICAL_HOLES, "hole {} maps to {}", empty, class);
        }
    }

    #[test]
    fn test_canonical_classes() {
        let classes: Vec<usize> = (0..HOLES).map(|h| canonical_class(h).unwrap()).collect();
        assert_eq!(classes, vec![0, 1, 2, 3, 4, 3, 2, 4, 4, 1, 0, 1, 3, 2, 0]);
        assert_eq!(canonical_class(15), None);
    }

    #[test]
    fn test_canonical_starts_use_identity() {
        for hole in 0..CANONICAL_HOLES {
            assert_eq!(Rotation::for_empty_hole(hole), Rotation::IDENTITY);
        }
        assert_eq!(Rotation::for_board(None), Rotation::IDENTITY);
    }

    #[test]
    fn test_corner_start() {
        let rotation = Rotation::for_empty_hole(10);
        assert_eq!(rotation.turns(), 1);
        assert_eq!(rotation.to_canonical(10), 0);
        assert_eq!(rotation.to_absolute(0), 10);
        assert_eq!(rotation.to_canonical(12), 3);
        assert_eq!(rotation.to_absolute(3), 12);
    }

    #[test]
    fn test_rotations_are_permutations() {
        for turns in 0..3u8 {
            let mut seen = [false; HOLES];
            for hole in 0..HOLES {
                seen[Rotation(turns).to_canonical(hole)] = true;
            }
            assert!(seen.iter().all(|&s| s), "turns {}", turns);
        }
    }

    #[test]
    fn test_rotations_preserve_jumps() {
        for turns in 1..3u8 {
            let rotation = Rotation(turns);
            for from in 0..HOLES {
                for direction in Direction::ALL {
                    let Some(middle) = Board::neighbor(from, direction) else {
                        continue;
                    };
                    let Some(to) = Board::neighbor(middle, direction) else {
                        continue;
                    };
                    let rotated = Board::jumped_hole(
                        rotation.to_canonical(from),
                        rotation.to_canonical(to),
                    );
                    assert_eq!(rotated, Some(rotation.to_canonical(middle)));
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_is_unchanged() {
        let rotation = Rotation::for_empty_hole(6);
        assert_eq!(rotation.to_canonical(42), 42);
        assert_eq!(rotation.to_absolute(42), 42);
        assert_eq!(Rotation::for_empty_hole(42), Rotation::IDENTITY);
    }

    #[test]
    fn test_jump_mapping() {
        let rotation = Rotation::for_empty_hole(10);
        let jump = Jump::new(12, 10);
        let canonical = rotation.canonical_jump(jump);
        assert_eq!(canonical, Jump::new(3, 0));
        assert_eq!(rotation.absolute_jump(canonical), jump);
    }
}
