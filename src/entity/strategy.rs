//! Per-ghost movement decision strategies.
//!
//! A strategy only proposes a direction; the movement engine independently
//! re-validates accessibility when the move executes, so a stale proposal is
//! rejected silently and the ghost stays put for that tick.

use glam::IVec2;
use pathfinding::prelude::bfs;
use rand::seq::IndexedRandom;
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::board::Board;
use crate::direction::Direction;
use crate::entity::{Unit, UnitId, Units};
use crate::level::movement;

/// Decision procedure invoked once per scheduler tick per ghost.
pub trait MoveStrategy: Send {
    /// Picks the ghost's next direction, or `None` when it is boxed in.
    fn next_move(&self, ghost: UnitId, board: &Board, units: &Units) -> Option<Direction>;
}

/// The directions a unit could currently move in from its square,
/// in [`Direction::DIRECTIONS`] order.
pub fn accessible_directions(unit: UnitId, board: &Board, units: &Units) -> SmallVec<[Direction; 4]> {
    let Some(square) = units.square(unit) else {
        return SmallVec::new();
    };
    Direction::DIRECTIONS
        .into_iter()
        .filter(|&dir| {
            board
                .neighbor(square, dir)
                .is_some_and(|dest| movement::can_enter(board, units, unit, dest))
        })
        .collect()
}

/// Random walk that reverses only when forced, so ghosts sweep corridors
/// instead of jittering in place.
#[derive(Debug, Default)]
pub struct RandomStrategy;

impl RandomStrategy {
    pub fn new() -> RandomStrategy {
        RandomStrategy
    }
}

impl MoveStrategy for RandomStrategy {
    fn next_move(&self, ghost: UnitId, board: &Board, units: &Units) -> Option<Direction> {
        let options = accessible_directions(ghost, board, units);
        if options.is_empty() {
            warn!(ghost = ghost.0, "ghost boxed in with no accessible directions");
            return None;
        }

        let opposite = units.direction(ghost).opposite();
        let forward: SmallVec<[Direction; 3]> = options.iter().copied().filter(|&dir| dir != opposite).collect();
        if forward.is_empty() {
            trace!(ghost = ghost.0, direction = ?opposite, "ghost forced to reverse direction");
            options.choose(&mut rand::rng()).copied()
        } else {
            forward.choose(&mut rand::rng()).copied()
        }
    }
}

/// Hunts the nearest live player along a shortest path; wanders randomly
/// when no player is reachable.
#[derive(Debug, Default)]
pub struct ChaserStrategy {
    fallback: RandomStrategy,
}

impl ChaserStrategy {
    pub fn new() -> ChaserStrategy {
        ChaserStrategy::default()
    }
}

impl MoveStrategy for ChaserStrategy {
    fn next_move(&self, ghost: UnitId, board: &Board, units: &Units) -> Option<Direction> {
        let square = units.square(ghost)?;

        let targets: SmallVec<[IVec2; 2]> = units
            .iter()
            .filter_map(|(id, unit)| match unit {
                Unit::Player(handle) if handle.lock().is_alive() => units.square(id),
                _ => None,
            })
            .collect();
        if targets.is_empty() {
            return self.fallback.next_move(ghost, board, units);
        }

        let path = bfs(
            &square,
            |&pos| {
                Direction::DIRECTIONS
                    .into_iter()
                    .filter_map(|dir| {
                        board
                            .neighbor(pos, dir)
                            .filter(|&dest| movement::can_enter(board, units, ghost, dest))
                    })
                    .collect::<SmallVec<[IVec2; 4]>>()
            },
            |pos| targets.contains(pos),
        );

        match path {
            Some(steps) if steps.len() >= 2 => direction_between(steps[0], steps[1]),
            // Already standing on a player, or unreachable: wander instead.
            _ => self.fallback.next_move(ghost, board, units),
        }
    }
}

fn direction_between(from: IVec2, to: IVec2) -> Option<Direction> {
    Direction::DIRECTIONS.into_iter().find(|dir| from + dir.as_ivec2() == to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tile;
    use crate::entity::{Ghost, Pellet, Player};

    // 3x3 board, walls on the outside would be implicit via borders; the
    // ghost sits in the center with all four neighbors open.
    fn open_board() -> Board {
        Board::new(vec![vec![Tile::ground(); 3]; 3])
    }

    fn walled_board() -> Board {
        let mut rows = vec![vec![Tile::wall(); 3]; 3];
        rows[1][1] = Tile::ground();
        Board::new(rows)
    }

    #[test]
    fn test_accessible_directions_open_center() {
        let board = open_board();
        let mut units = Units::new();
        let ghost = units.insert(Unit::Ghost(Ghost::random()));
        units.set_square(ghost, Some(IVec2::new(1, 1)));

        let options = accessible_directions(ghost, &board, &units);
        assert_eq!(options.len(), 4);
    }

    #[test]
    fn test_random_strategy_boxed_in_yields_none() {
        let board = walled_board();
        let mut units = Units::new();
        let ghost = units.insert(Unit::Ghost(Ghost::random()));
        units.set_square(ghost, Some(IVec2::new(1, 1)));

        let dir = RandomStrategy::new().next_move(ghost, &board, &units);
        assert_eq!(dir, None);
    }

    #[test]
    fn test_random_strategy_only_picks_accessible() {
        let board = open_board();
        let mut units = Units::new();
        let ghost = units.insert(Unit::Ghost(Ghost::random()));
        units.set_square(ghost, Some(IVec2::new(0, 0)));

        for _ in 0..32 {
            let dir = RandomStrategy::new().next_move(ghost, &board, &units).unwrap();
            assert!(matches!(dir, Direction::Down | Direction::Right));
        }
    }

    #[test]
    fn test_chaser_moves_towards_player() {
        // Corridor: ghost at x=0, player at x=2.
        let board = Board::new(vec![vec![Tile::ground(); 3]]);
        let mut units = Units::new();
        let ghost = units.insert(Unit::Ghost(Ghost::chaser()));
        units.set_square(ghost, Some(IVec2::new(0, 0)));
        let player = units.insert(Unit::Player(Player::new_handle()));
        units.set_square(player, Some(IVec2::new(2, 0)));

        let dir = ChaserStrategy::new().next_move(ghost, &board, &units);
        assert_eq!(dir, Some(Direction::Right));
    }

    #[test]
    fn test_chaser_without_live_player_falls_back_to_wandering() {
        let board = Board::new(vec![vec![Tile::ground(); 3]]);
        let mut units = Units::new();
        let ghost = units.insert(Unit::Ghost(Ghost::chaser()));
        units.set_square(ghost, Some(IVec2::new(1, 0)));
        units.insert(Unit::Pellet(Pellet::new(10)));

        let dir = ChaserStrategy::new().next_move(ghost, &board, &units);
        assert!(dir.is_some());
    }
}
