//! This module contains all the constants used in the engine.

use std::time::Duration;

/// Points awarded for consuming a single pellet.
pub const PELLET_VALUE: u32 = 10;

/// The interval between NPC ticks when a level runs on the default
/// interval scheduler.
pub const NPC_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// A minimal corridor board: one player start, one pellet, no ghosts.
pub const SIMPLE_BOARD: [&str; 3] = [
    "#####", //
    "# P.#",
    "#####",
];

/// A minimal corridor board with a ghost to the player's left and a pellet
/// to the player's right.
pub const SIMPLE_GHOST_BOARD: [&str; 3] = [
    "#####", //
    "#GP.#",
    "#####",
];

/// The default game board, as rows of characters.
pub const DEFAULT_BOARD: [&str; 11] = [
    "#####################",
    "#..........#........#",
    "#.###.####.#.####.#.#",
    "#.#.......G......##.#",
    "#.#.###.#####.##..#.#",
    "#.......#P..#.....#.#",
    "#.#.###.##.##.###.#.#",
    "#.#...G.......G.....#",
    "#.#####.##.####.##.##",
    "#..........#........#",
    "#####################",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapParser;

    #[test]
    fn test_default_board_structure() {
        assert_eq!(DEFAULT_BOARD.len(), 11);
        for row in DEFAULT_BOARD.iter() {
            assert_eq!(row.chars().count(), 21, "row has wrong width: {row}");
        }

        // The border must be solid wall so there is nothing to walk off.
        assert!(DEFAULT_BOARD[0].chars().all(|c| c == '#'));
        assert!(DEFAULT_BOARD[DEFAULT_BOARD.len() - 1].chars().all(|c| c == '#'));
        for row in DEFAULT_BOARD.iter() {
            assert!(row.starts_with('#') && row.ends_with('#'));
        }
    }

    #[test]
    fn test_default_board_parses_into_a_playable_level() {
        let mut parser = MapParser::standard();
        let level = parser.parse(&DEFAULT_BOARD).unwrap();

        assert_eq!(level.npcs().len(), 3);
        assert!(level.remaining_pellets() > 0);
    }

    #[test]
    fn test_simple_boards_parse() {
        let mut parser = MapParser::standard();

        let ghostless = parser.parse(&SIMPLE_BOARD).unwrap();
        assert!(ghostless.npcs().is_empty());
        assert_eq!(ghostless.remaining_pellets(), 1);

        let ghosted = parser.parse(&SIMPLE_GHOST_BOARD).unwrap();
        assert_eq!(ghosted.npcs().len(), 1);
        assert_eq!(ghosted.remaining_pellets(), 1);
    }
}
