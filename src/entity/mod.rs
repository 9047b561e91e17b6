//! Units and the arena that owns them.
//!
//! Every unit on a board lives in its level's [`Units`] arena and is referred
//! to by a stable [`UnitId`]. A unit's current square is a plain back-pointer
//! (a board coordinate), updated on every successful move; it never owns or
//! extends the lifetime of the tile it names.

pub mod ghost;
pub mod pellet;
pub mod player;
pub mod strategy;

use glam::IVec2;
use strum_macros::AsRefStr;

use crate::direction::Direction;

pub use ghost::Ghost;
pub use pellet::Pellet;
pub use player::{Player, PlayerHandle};

/// Stable handle to a unit within its level's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(pub(crate) usize);

/// The closed set of unit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum UnitKind {
    Player,
    Ghost,
    Pellet,
}

/// A unit occupying a tile: the tagged union the collision table and the
/// accessibility checks dispatch over.
pub enum Unit {
    /// Players are shared handles so the same instance can be re-registered
    /// onto the next level of a multi-level game.
    Player(PlayerHandle),
    Ghost(Ghost),
    Pellet(Pellet),
}

impl Unit {
    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::Player(_) => UnitKind::Player,
            Unit::Ghost(_) => UnitKind::Ghost,
            Unit::Pellet(_) => UnitKind::Pellet,
        }
    }

    /// Whether this unit refuses to share its tile with a unit of `other`
    /// kind. None of the built-in kinds exclude coexistence; walls do their
    /// rejecting through [`crate::board::Tile::accepts`] instead.
    pub fn excludes(&self, other: UnitKind) -> bool {
        let _ = other;
        false
    }
}

struct Entry {
    unit: Unit,
    square: Option<IVec2>,
    direction: Direction,
}

/// Arena of all units belonging to one level.
///
/// Consumed pellets keep their slot (with their square cleared) so unit ids
/// stay stable for the lifetime of the level.
#[derive(Default)]
pub struct Units {
    entries: Vec<Entry>,
}

impl Units {
    pub fn new() -> Units {
        Units::default()
    }

    /// Adds a unit to the arena, not yet placed on any square.
    pub fn insert(&mut self, unit: Unit) -> UnitId {
        let id = UnitId(self.entries.len());
        self.entries.push(Entry {
            unit,
            square: None,
            direction: Direction::default(),
        });
        id
    }

    pub fn get(&self, id: UnitId) -> &Unit {
        &self.entries[id.0].unit
    }

    pub fn get_mut(&mut self, id: UnitId) -> &mut Unit {
        &mut self.entries[id.0].unit
    }

    pub fn kind(&self, id: UnitId) -> UnitKind {
        self.get(id).kind()
    }

    /// The square the unit currently occupies, if it is on the board.
    pub fn square(&self, id: UnitId) -> Option<IVec2> {
        self.entries[id.0].square
    }

    pub(crate) fn set_square(&mut self, id: UnitId, square: Option<IVec2>) {
        self.entries[id.0].square = square;
    }

    /// The direction the unit last moved (or was created facing).
    pub fn direction(&self, id: UnitId) -> Direction {
        self.entries[id.0].direction
    }

    pub(crate) fn set_direction(&mut self, id: UnitId, direction: Direction) {
        self.entries[id.0].direction = direction;
    }

    pub fn player(&self, id: UnitId) -> Option<&PlayerHandle> {
        match self.get(id) {
            Unit::Player(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn ghost(&self, id: UnitId) -> Option<&Ghost> {
        match self.get(id) {
            Unit::Ghost(ghost) => Some(ghost),
            _ => None,
        }
    }

    pub fn pellet(&self, id: UnitId) -> Option<&Pellet> {
        match self.get(id) {
            Unit::Pellet(pellet) => Some(pellet),
            _ => None,
        }
    }

    pub(crate) fn pellet_mut(&mut self, id: UnitId) -> Option<&mut Pellet> {
        match self.get_mut(id) {
            Unit::Pellet(pellet) => Some(pellet),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &Unit)> {
        self.entries.iter().enumerate().map(|(i, e)| (UnitId(i), &e.unit))
    }

    /// Number of pellets that have not been consumed yet.
    pub fn remaining_pellets(&self) -> usize {
        self.iter()
            .filter(|(_, unit)| matches!(unit, Unit::Pellet(p) if !p.is_consumed()))
            .count()
    }
}
