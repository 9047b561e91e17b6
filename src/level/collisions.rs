//! The pairwise collision table.
//!
//! When a move lands a unit on an occupied tile, the engine dispatches one
//! `(mover, resident)` pair per resident through a [`CollisionMap`]. Rules
//! are directional (both orders of a pair are distinct dispatches) but the
//! table is symmetric in effect, so the net outcome does not depend on who
//! walked into whom.

use tracing::debug;

use crate::board::Board;
use crate::entity::{UnitId, UnitKind, Units};

/// Policy deciding what happens when two units share a tile.
pub trait CollisionMap: Send {
    /// Resolves the ordered pair `(mover, other)`. `mover` just arrived on
    /// the tile; `other` was already there.
    fn collide(&self, board: &mut Board, units: &mut Units, mover: UnitId, other: UnitId);
}

/// The standard interaction rules:
///
/// | pair            | effect                                            |
/// |-----------------|---------------------------------------------------|
/// | player / player | none                                              |
/// | player / ghost  | the player dies, no points change                 |
/// | player / pellet | player scores the pellet's value, pellet consumed |
/// | ghost  / ghost  | none                                              |
/// | ghost  / pellet | none (ghosts never consume pellets)               |
pub struct PlayerCollisions;

impl CollisionMap for PlayerCollisions {
    fn collide(&self, board: &mut Board, units: &mut Units, mover: UnitId, other: UnitId) {
        match (units.kind(mover), units.kind(other)) {
            (UnitKind::Player, UnitKind::Ghost) => kill_player(units, mover),
            (UnitKind::Ghost, UnitKind::Player) => kill_player(units, other),
            (UnitKind::Player, UnitKind::Pellet) => consume_pellet(board, units, other, mover),
            (UnitKind::Pellet, UnitKind::Player) => consume_pellet(board, units, mover, other),
            // Every remaining combination is explicitly a no-op.
            _ => {}
        }
    }
}

fn kill_player(units: &mut Units, player: UnitId) {
    let handle = units.player(player).expect("collision table dispatched on a non-player");
    handle.lock().set_alive(false);
    debug!(player = player.0, "player caught by a ghost");
}

fn consume_pellet(board: &mut Board, units: &mut Units, pellet: UnitId, player: UnitId) {
    let value = {
        let item = units.pellet_mut(pellet).expect("collision table dispatched on a non-pellet");
        if item.is_consumed() {
            return;
        }
        item.consume();
        item.value()
    };
    if let Some(square) = units.square(pellet) {
        if let Some(tile) = board.tile_mut(square) {
            tile.remove_occupant(pellet);
        }
        units.set_square(pellet, None);
    }

    let handle = units.player(player).expect("collision table dispatched on a non-player");
    handle.lock().add_points(value);
    debug!(player = player.0, points = value, "pellet consumed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tile;
    use crate::entity::{Ghost, Pellet, Player, PlayerHandle, Unit};
    use glam::IVec2;

    struct Fixture {
        board: Board,
        units: Units,
        player: UnitId,
        handle: PlayerHandle,
        ghost: UnitId,
        pellet: UnitId,
    }

    fn fixture() -> Fixture {
        let mut board = Board::new(vec![vec![Tile::ground(); 3]]);
        let mut units = Units::new();
        let handle = Player::new_handle();
        let player = units.insert(Unit::Player(handle.clone()));
        let ghost = units.insert(Unit::Ghost(Ghost::random()));
        let pellet = units.insert(Unit::Pellet(Pellet::new(10)));
        for (i, id) in [player, ghost, pellet].into_iter().enumerate() {
            let pos = IVec2::new(i as i32, 0);
            units.set_square(id, Some(pos));
            board.tile_mut(pos).unwrap().push_occupant(id);
        }
        Fixture {
            board,
            units,
            player,
            handle,
            ghost,
            pellet,
        }
    }

    #[test]
    fn test_player_on_ghost_kills_player() {
        let mut f = fixture();
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.player, f.ghost);
        assert!(!f.handle.lock().is_alive());
        assert_eq!(f.handle.lock().score(), 0);
    }

    #[test]
    fn test_ghost_on_player_kills_player() {
        let mut f = fixture();
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.ghost, f.player);
        assert!(!f.handle.lock().is_alive());
        assert_eq!(f.handle.lock().score(), 0);
    }

    #[test]
    fn test_player_on_pellet_scores_and_consumes() {
        let mut f = fixture();
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.player, f.pellet);
        assert_eq!(f.handle.lock().score(), 10);
        assert!(f.units.pellet(f.pellet).unwrap().is_consumed());
        assert_eq!(f.units.square(f.pellet), None);
        assert!(f.board.tile(IVec2::new(2, 0)).unwrap().occupants().is_empty());
    }

    #[test]
    fn test_pellet_under_player_scores_and_consumes() {
        let mut f = fixture();
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.pellet, f.player);
        assert_eq!(f.handle.lock().score(), 10);
        assert!(f.units.pellet(f.pellet).unwrap().is_consumed());
    }

    #[test]
    fn test_consumed_pellet_scores_only_once() {
        let mut f = fixture();
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.player, f.pellet);
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.player, f.pellet);
        assert_eq!(f.handle.lock().score(), 10);
    }

    #[test]
    fn test_neutral_pairs_change_nothing() {
        let mut f = fixture();
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.player, f.player);
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.ghost, f.ghost);
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.ghost, f.pellet);
        PlayerCollisions.collide(&mut f.board, &mut f.units, f.pellet, f.ghost);

        assert!(f.handle.lock().is_alive());
        assert_eq!(f.handle.lock().score(), 0);
        assert!(!f.units.pellet(f.pellet).unwrap().is_consumed());
    }
}
