//! Map parsing and level construction.

pub mod builder;
pub mod parser;

pub use builder::{BoardFactory, DefaultBoardFactory, DefaultLevelFactory, LevelFactory, MapParser};
pub use parser::{parse_character, parse_grid, MapSymbol, ParsedGrid};
