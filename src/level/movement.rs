//! The movement engine: tile accessibility checks and move execution.
//!
//! Every unit move, player-initiated or scheduler-driven, funnels through
//! [`attempt_move`]. A rejected move changes nothing and returns `false`;
//! the caller never retries automatically.

use glam::IVec2;
use smallvec::SmallVec;
use tracing::trace;

use crate::board::Board;
use crate::direction::Direction;
use crate::entity::{UnitId, Units};
use crate::level::collisions::CollisionMap;

/// Whether `mover` may enter the tile at `dest`.
///
/// The tile itself must admit the mover's kind, and every unit already on
/// the tile must not exclude sharing it with the mover (the mutual
/// accessibility check).
pub(crate) fn can_enter(board: &Board, units: &Units, mover: UnitId, dest: IVec2) -> bool {
    let Some(tile) = board.tile(dest) else {
        return false;
    };
    let kind = units.kind(mover);
    tile.accepts(kind) && tile.occupants().iter().all(|&other| !units.get(other).excludes(kind))
}

/// Moves `mover` one tile in `direction`, resolving any collisions on the
/// destination tile. Returns whether the move happened.
///
/// On success the mover is detached from its old occupant stack (preserving
/// the order of the rest), appended to the destination's stack, and its
/// back-reference and facing direction are updated. The collision policy is
/// then invoked once per unit that was already on the destination at the
/// moment of arrival; units a collision removes or adds afterwards are not
/// re-evaluated within the same move.
///
/// A unit that is not placed on any square cannot move; that is an expected
/// no-op, not an error.
pub(crate) fn attempt_move(
    board: &mut Board,
    units: &mut Units,
    collisions: &dyn CollisionMap,
    mover: UnitId,
    direction: Direction,
) -> bool {
    let Some(from) = units.square(mover) else {
        trace!(unit = mover.0, "move rejected: unit is not on the board");
        return false;
    };
    let Some(dest) = board.neighbor(from, direction) else {
        return false;
    };
    if !can_enter(board, units, mover, dest) {
        return false;
    }

    board
        .tile_mut(from)
        .expect("occupied square must be on the board")
        .remove_occupant(mover);

    // Snapshot the residents before the mover lands; the collision table is
    // dispatched over exactly this set.
    let residents: SmallVec<[UnitId; 4]> = board
        .tile(dest)
        .expect("destination was bounds-checked")
        .occupants()
        .iter()
        .copied()
        .collect();

    board
        .tile_mut(dest)
        .expect("destination was bounds-checked")
        .push_occupant(mover);
    units.set_square(mover, Some(dest));
    units.set_direction(mover, direction);

    for other in residents {
        collisions.collide(board, units, mover, other);
    }
    true
}
