//! Shared types used across the application.

use std::fmt;
use std::ops::{Index, IndexMut};

use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// Unique identifier for a traveler, starting at 1.
pub type TravelerId = u32;

/// One of the two ends of the bridge a traveler heads towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Both directions, in index order.
    pub const ALL: [Direction; 2] = [Direction::North, Direction::South];

    /// The direction travelling against this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::North => write!(f, "NORTH"),
            Self::South => write!(f, "SOUTH"),
        }
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        if rng.gen::<bool>() {
            Direction::North
        } else {
            Direction::South
        }
    }
}

/// A pair of values, one per direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerDirection<T> {
    values: [T; 2],
}

impl<T> PerDirection<T> {
    pub fn new(north: T, south: T) -> Self {
        Self {
            values: [north, south],
        }
    }

    /// Iterate over `(direction, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().zip(self.values.iter())
    }
}

impl<T> Index<Direction> for PerDirection<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        &self.values[direction.index()]
    }
}

impl<T> IndexMut<Direction> for PerDirection<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.values[direction.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Direction::North.to_string(), "NORTH");
        assert_eq!(Direction::South.to_string(), "SOUTH");
    }

    #[test]
    fn test_per_direction_indexing() {
        let mut counts = PerDirection::new(1usize, 2usize);
        counts[Direction::South] += 5;

        assert_eq!(counts[Direction::North], 1);
        assert_eq!(counts[Direction::South], 7);

        let pairs: Vec<_> = counts.iter().map(|(d, v)| (d, *v)).collect();
        assert_eq!(pairs, vec![(Direction::North, 1), (Direction::South, 7)]);
    }

    #[test]
    fn test_random_directions_cover_both() {
        let mut rng = StdRng::seed_from_u64(7);
        let sampled: Vec<Direction> = (0..64).map(|_| rng.gen()).collect();

        assert!(sampled.contains(&Direction::North));
        assert!(sampled.contains(&Direction::South));
    }
}
