//! Neighbor directions and the hand-authored candidate orderings built from them

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the 8 neighbor directions
///
/// Grid coordinates grow to the right and downward, so `Down` is `(0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All 8 neighbors, in the order heat exchange visits them
    pub const ALL: [Direction; 8] = [
        Direction::Down,
        Direction::DownLeft,
        Direction::DownRight,
        Direction::Left,
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
    ];

    /// The 4 orthogonal neighbors, in the order a blast expands into them
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// Relative grid offset of this direction
    pub const fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::UpLeft => IVec2::new(-1, -1),
            Direction::UpRight => IVec2::new(1, -1),
            Direction::DownLeft => IVec2::new(-1, 1),
            Direction::DownRight => IVec2::new(1, 1),
        }
    }
}

use Direction::{Down, DownLeft, DownRight, Left, Right, Up, UpLeft, UpRight};

/// Powders fall straight down, then slide diagonally
pub const POWDER_ORDERINGS: &[&[Direction]] = &[&[Down, DownLeft, DownRight]];

/// Liquids fall, then spread sideways; mirrored pair picked at random
pub const LIQUID_ORDERINGS: &[&[Direction]] = &[
    &[Down, DownLeft, Left, DownRight, Right],
    &[Down, DownRight, Right, DownLeft, Left],
];

/// Gases rise, then spread sideways; mirrored pair picked at random
pub const GAS_ORDERINGS: &[&[Direction]] = &[
    &[Up, UpLeft, Left, UpRight, Right],
    &[Up, UpRight, Right, UpLeft, Left],
];

/// Preference permutations walked by a spreading igniter (fire)
pub const IGNITER_PATTERNS: [&[Direction]; 7] = [
    &[Up, UpLeft, UpRight],
    &[UpLeft, Up, UpRight],
    &[UpRight, UpLeft, Up],
    &[Left, Right, UpLeft, UpRight],
    &[Right, Left, UpRight, UpLeft],
    &[UpLeft, UpRight, Left, Right],
    &[UpRight, UpLeft, Right, Left],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_directions_are_distinct_unit_offsets() {
        let mut seen = Vec::new();
        for dir in Direction::ALL {
            let offset = dir.offset();
            assert!(offset.x.abs() <= 1 && offset.y.abs() <= 1);
            assert_ne!(offset, IVec2::ZERO);
            assert!(!seen.contains(&offset));
            seen.push(offset);
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_cardinals_are_orthogonal() {
        for dir in Direction::CARDINAL {
            let offset = dir.offset();
            assert_eq!(offset.x.abs() + offset.y.abs(), 1);
        }
    }

    #[test]
    fn test_down_increases_y() {
        assert_eq!(Direction::Down.offset(), IVec2::new(0, 1));
        assert_eq!(Direction::Up.offset(), IVec2::new(0, -1));
    }

    #[test]
    fn test_igniter_patterns_never_point_down() {
        for pattern in IGNITER_PATTERNS {
            for dir in pattern {
                assert!(dir.offset().y <= 0, "{dir:?} points downward");
            }
        }
    }

    #[test]
    fn test_fluid_orderings_are_mirrored() {
        for orderings in [LIQUID_ORDERINGS, GAS_ORDERINGS] {
            let [a, b] = orderings else {
                panic!("expected a mirrored pair");
            };
            assert_eq!(a.len(), b.len());
            for (left, right) in a.iter().zip(b.iter()) {
                assert_eq!(left.offset().x, -right.offset().x);
                assert_eq!(left.offset().y, right.offset().y);
            }
        }
    }
}
