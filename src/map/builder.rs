//! Map construction: a validated grid plus injected factories become a level.
//!
//! The parser owns no policy of its own: tiles come from a [`BoardFactory`],
//! units and the final level from a [`LevelFactory`]. Created ghosts are
//! returned directly through the level's NPC list; nothing is stashed in
//! globals for later retrieval.

use glam::IVec2;
use tracing::debug;

use crate::board::{Board, Tile};
use crate::constants::{NPC_TICK_INTERVAL, PELLET_VALUE};
use crate::entity::{Ghost, Pellet, Unit, UnitId, Units};
use crate::error::ParseError;
use crate::level::collisions::PlayerCollisions;
use crate::level::scheduler::IntervalScheduler;
use crate::level::Level;
use crate::map::parser::{self, MapSymbol};

/// Produces the tiles a board is assembled from.
pub trait BoardFactory {
    fn ground(&mut self) -> Tile;
    fn wall(&mut self) -> Tile;
}

/// Produces units and assembles the final level.
pub trait LevelFactory {
    fn ghost(&mut self) -> Ghost;
    fn pellet(&mut self) -> Pellet;
    fn level(&mut self, board: Board, units: Units, npcs: Vec<UnitId>, start_squares: Vec<IVec2>) -> Level;
}

/// Converts rows of characters into a [`Level`] via the injected factories.
pub struct MapParser<B, L> {
    board_factory: B,
    level_factory: L,
}

impl<B: BoardFactory, L: LevelFactory> MapParser<B, L> {
    pub fn new(level_factory: L, board_factory: B) -> MapParser<B, L> {
        MapParser {
            board_factory,
            level_factory,
        }
    }

    /// Parses a map grid into a level.
    ///
    /// The grid is validated up front; on any configuration error the
    /// factories are never called. Afterwards the tile factory runs exactly
    /// once per cell and the unit factory exactly once per unit-bearing
    /// cell, in row-major order (tile first, then its occupant).
    pub fn parse<S: AsRef<str>>(&mut self, rows: &[S]) -> Result<Level, ParseError> {
        let grid = parser::parse_grid(rows)?;

        let mut units = Units::new();
        let mut npcs = Vec::new();
        let mut start_squares = Vec::new();
        let mut tiles = Vec::with_capacity(grid.height);

        for (y, row) in grid.symbols.iter().enumerate() {
            let mut tile_row = Vec::with_capacity(grid.width);
            for (x, &symbol) in row.iter().enumerate() {
                let pos = IVec2::new(x as i32, y as i32);
                let mut tile = match symbol {
                    MapSymbol::Wall => self.board_factory.wall(),
                    _ => self.board_factory.ground(),
                };
                match symbol {
                    MapSymbol::GhostStart => {
                        let id = units.insert(Unit::Ghost(self.level_factory.ghost()));
                        units.set_square(id, Some(pos));
                        tile.push_occupant(id);
                        npcs.push(id);
                    }
                    MapSymbol::Pellet => {
                        let id = units.insert(Unit::Pellet(self.level_factory.pellet()));
                        units.set_square(id, Some(pos));
                        tile.push_occupant(id);
                    }
                    MapSymbol::PlayerStart => start_squares.push(pos),
                    MapSymbol::Wall | MapSymbol::Ground => {}
                }
                tile_row.push(tile);
            }
            tiles.push(tile_row);
        }

        let board = Board::new(tiles);
        debug!(
            width = board.width(),
            height = board.height(),
            ghosts = npcs.len(),
            pellets = units.remaining_pellets(),
            starts = start_squares.len(),
            "map parsed"
        );
        Ok(self.level_factory.level(board, units, npcs, start_squares))
    }
}

impl<B, L> MapParser<B, L> {
    pub fn board_factory(&self) -> &B {
        &self.board_factory
    }

    /// The injected level factory. Custom factories often collect direct
    /// handles to the units or schedulers they created; this is how a
    /// caller gets them back.
    pub fn level_factory(&self) -> &L {
        &self.level_factory
    }

    pub fn level_factory_mut(&mut self) -> &mut L {
        &mut self.level_factory
    }
}

impl MapParser<DefaultBoardFactory, DefaultLevelFactory> {
    /// A parser wired with the standard factories: plain tiles, wandering
    /// ghosts, 10-point pellets, interval-scheduled levels.
    pub fn standard() -> Self {
        MapParser::new(DefaultLevelFactory, DefaultBoardFactory)
    }
}

/// The plain tile factory.
#[derive(Debug, Default)]
pub struct DefaultBoardFactory;

impl BoardFactory for DefaultBoardFactory {
    fn ground(&mut self) -> Tile {
        Tile::ground()
    }

    fn wall(&mut self) -> Tile {
        Tile::wall()
    }
}

/// The standard unit/level factory: random-walking ghosts, pellets worth
/// [`PELLET_VALUE`], levels driven by an [`IntervalScheduler`] at
/// [`NPC_TICK_INTERVAL`].
#[derive(Debug, Default)]
pub struct DefaultLevelFactory;

impl LevelFactory for DefaultLevelFactory {
    fn ghost(&mut self) -> Ghost {
        Ghost::random()
    }

    fn pellet(&mut self) -> Pellet {
        Pellet::new(PELLET_VALUE)
    }

    fn level(&mut self, board: Board, units: Units, npcs: Vec<UnitId>, start_squares: Vec<IVec2>) -> Level {
        Level::new(
            board,
            units,
            npcs,
            start_squares,
            Box::new(PlayerCollisions),
            Box::new(IntervalScheduler::new(NPC_TICK_INTERVAL)),
        )
    }
}
