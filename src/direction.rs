//! The four cardinal movement directions on the grid.

use glam::IVec2;
use strum_macros::AsRefStr;

/// The four cardinal directions.
///
/// Grid coordinates grow rightwards (`x`, columns) and downwards (`y`,
/// rows): `Up`/`Down` vary the row, `Left`/`Right` vary the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// The four cardinal directions.
    /// This is just a convenience constant for iterating over the directions.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the direction's grid delta as an IVec2.
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_direction_deltas() {
        // Up/Down vary the row (y), Left/Right vary the column (x).
        assert_eq!(Direction::Up.as_ivec2(), IVec2::new(0, -1));
        assert_eq!(Direction::Down.as_ivec2(), IVec2::new(0, 1));
        assert_eq!(Direction::Left.as_ivec2(), IVec2::new(-1, 0));
        assert_eq!(Direction::Right.as_ivec2(), IVec2::new(1, 0));
    }

    #[test]
    fn test_horizontal_deltas_have_no_vertical_component() {
        assert_eq!(Direction::Left.as_ivec2().y, 0);
        assert_eq!(Direction::Right.as_ivec2().y, 0);
        assert_eq!(Direction::Up.as_ivec2().x, 0);
        assert_eq!(Direction::Down.as_ivec2().x, 0);
    }

    #[test]
    fn test_directions_constant() {
        assert_eq!(Direction::DIRECTIONS.len(), 4);
        assert!(Direction::DIRECTIONS.contains(&Direction::Up));
        assert!(Direction::DIRECTIONS.contains(&Direction::Down));
        assert!(Direction::DIRECTIONS.contains(&Direction::Left));
        assert!(Direction::DIRECTIONS.contains(&Direction::Right));
    }
}
