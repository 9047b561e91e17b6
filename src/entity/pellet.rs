//! Collectible pellets.

/// A collectible item worth a fixed number of points.
///
/// A pellet is consumed at most once; afterwards it no longer occupies any
/// square but keeps its arena slot so ids stay stable.
#[derive(Debug)]
pub struct Pellet {
    value: u32,
    consumed: bool,
}

impl Pellet {
    pub fn new(value: u32) -> Pellet {
        Pellet { value, consumed: false }
    }

    /// The points awarded to the player that consumes this pellet.
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub(crate) fn consume(&mut self) {
        self.consumed = true;
    }
}
