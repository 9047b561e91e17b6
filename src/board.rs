//! The board: a fixed grid of tiles, each tracking its ordered occupant stack.
//!
//! Topology is immutable after construction; only the occupant stacks mutate
//! during play. Every coordinate lookup is bounds-checked and there is no
//! wrap-around: the parser guarantees a closed, bounded board, so a border
//! tile simply has no neighbor in the outward direction.

use bitflags::bitflags;
use glam::IVec2;
use smallvec::SmallVec;

use crate::direction::Direction;
use crate::entity::{UnitId, UnitKind};

bitflags! {
    /// The set of unit kinds a tile admits.
    ///
    /// Walls carry the empty set; ground admits everything.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Occupancy: u8 {
        const PLAYER = 1 << 0;
        const GHOST = 1 << 1;
        const PELLET = 1 << 2;
        const ALL = Self::PLAYER.bits() | Self::GHOST.bits() | Self::PELLET.bits();
    }
}

impl UnitKind {
    /// The occupancy flag a unit of this kind needs on a tile to enter it.
    pub fn occupancy(self) -> Occupancy {
        match self {
            UnitKind::Player => Occupancy::PLAYER,
            UnitKind::Ghost => Occupancy::GHOST,
            UnitKind::Pellet => Occupancy::PELLET,
        }
    }
}

/// The two tile topologies a board is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Ground,
    Wall,
}

/// A single addressable cell of the board.
///
/// Holds zero or more units in insertion order; the last occupant is the
/// topmost (the one a renderer would show).
#[derive(Debug, Clone)]
pub struct Tile {
    kind: TileKind,
    occupancy: Occupancy,
    occupants: SmallVec<[UnitId; 4]>,
}

impl Tile {
    /// Creates a tile of the given kind with its default occupancy.
    pub fn new(kind: TileKind) -> Tile {
        let occupancy = match kind {
            TileKind::Ground => Occupancy::ALL,
            TileKind::Wall => Occupancy::empty(),
        };
        Tile {
            kind,
            occupancy,
            occupants: SmallVec::new(),
        }
    }

    /// A walkable ground tile.
    pub fn ground() -> Tile {
        Tile::new(TileKind::Ground)
    }

    /// An impassable wall tile.
    pub fn wall() -> Tile {
        Tile::new(TileKind::Wall)
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Whether this tile admits units of the given kind at all.
    pub fn accepts(&self, kind: UnitKind) -> bool {
        self.occupancy.contains(kind.occupancy())
    }

    /// The units currently on this tile, bottom to top.
    pub fn occupants(&self) -> &[UnitId] {
        &self.occupants
    }

    /// The topmost occupant, if any.
    pub fn top_occupant(&self) -> Option<UnitId> {
        self.occupants.last().copied()
    }

    pub(crate) fn push_occupant(&mut self, id: UnitId) {
        self.occupants.push(id);
    }

    /// Removes a single occupant, preserving the order of the rest.
    pub(crate) fn remove_occupant(&mut self, id: UnitId) {
        self.occupants.retain(|&mut o| o != id);
    }
}

/// A fixed-size, row-major grid of tiles.
///
/// Dimensions and tile identities never change after construction.
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Builds a board from rows of tiles.
    ///
    /// # Panics
    ///
    /// Panics if the grid is empty or not rectangular. A sparse or ragged
    /// grid is a defect in the calling collaborator (the parser validates
    /// its input first), not a runtime condition.
    pub fn new(rows: Vec<Vec<Tile>>) -> Board {
        assert!(!rows.is_empty(), "board must have at least one row");
        let width = rows[0].len();
        assert!(width > 0, "board rows cannot be empty");
        for (y, row) in rows.iter().enumerate() {
            assert!(
                row.len() == width,
                "board row {y} is {} tiles wide, expected {width}",
                row.len()
            );
        }

        let height = rows.len();
        let tiles = rows.into_iter().flatten().collect();
        Board { width, height, tiles }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the position falls inside the board's borders.
    pub fn within_borders(&self, pos: IVec2) -> bool {
        pos.x >= 0 && (pos.x as usize) < self.width && pos.y >= 0 && (pos.y as usize) < self.height
    }

    /// Bounds-checked tile lookup.
    pub fn tile(&self, pos: IVec2) -> Option<&Tile> {
        self.within_borders(pos)
            .then(|| &self.tiles[pos.y as usize * self.width + pos.x as usize])
    }

    pub(crate) fn tile_mut(&mut self, pos: IVec2) -> Option<&mut Tile> {
        self.within_borders(pos)
            .then(|| &mut self.tiles[pos.y as usize * self.width + pos.x as usize])
    }

    /// The neighboring position in the given direction, if it exists.
    ///
    /// Out-of-bounds is never a valid target; there is no wrap-around.
    pub fn neighbor(&self, pos: IVec2, direction: Direction) -> Option<IVec2> {
        let next = pos + direction.as_ivec2();
        self.within_borders(next).then_some(next)
    }
}
