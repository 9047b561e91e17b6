//! Grid validation: raw rows of characters into typed map symbols.
//!
//! All validation happens here, before a single tile or unit factory call is
//! made; a malformed grid never partially constructs a board.

use crate::error::ParseError;

/// The recognized map symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSymbol {
    /// `#` — an impassable wall.
    Wall,
    /// ` ` — open ground.
    Ground,
    /// `P` — ground; a candidate player start square.
    PlayerStart,
    /// `G` — ground holding a ghost.
    GhostStart,
    /// `.` — ground holding a pellet.
    Pellet,
}

/// Parses a single character into a map symbol.
pub fn parse_character(c: char) -> Result<MapSymbol, ParseError> {
    match c {
        '#' => Ok(MapSymbol::Wall),
        ' ' => Ok(MapSymbol::Ground),
        'P' => Ok(MapSymbol::PlayerStart),
        'G' => Ok(MapSymbol::GhostStart),
        '.' => Ok(MapSymbol::Pellet),
        _ => Err(ParseError::UnknownCharacter(c)),
    }
}

/// A validated, rectangular grid of symbols.
#[derive(Debug)]
pub struct ParsedGrid {
    pub width: usize,
    pub height: usize,
    pub symbols: Vec<Vec<MapSymbol>>,
}

/// Validates the raw rows and parses every character.
///
/// Fails on an empty grid, an empty row, unequal row lengths, or any
/// unrecognized character — naming the offending condition in each case.
pub fn parse_grid<S: AsRef<str>>(rows: &[S]) -> Result<ParsedGrid, ParseError> {
    if rows.is_empty() {
        return Err(ParseError::EmptyGrid);
    }
    let width = rows[0].as_ref().chars().count();
    if width == 0 {
        return Err(ParseError::EmptyRow(0));
    }
    for (y, row) in rows.iter().enumerate() {
        let found = row.as_ref().chars().count();
        if found != width {
            return Err(ParseError::UnequalRowLength {
                row: y,
                expected: width,
                found,
            });
        }
    }

    let symbols = rows
        .iter()
        .map(|row| row.as_ref().chars().map(parse_character).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedGrid {
        width,
        height: rows.len(),
        symbols,
    })
}
