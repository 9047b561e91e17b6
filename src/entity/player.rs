//! The player-controlled unit.

use std::sync::Arc;

use parking_lot::Mutex;

/// Shared handle to a player.
///
/// A multi-level game re-registers the same player onto each level in turn,
/// so score and alive state travel with the handle. A player is only ever
/// placed on one level's board at a time.
pub type PlayerHandle = Arc<Mutex<Player>>;

/// The unit controlled by the (external) input source.
#[derive(Debug)]
pub struct Player {
    alive: bool,
    score: u32,
}

impl Player {
    pub fn new() -> Player {
        Player { alive: true, score: 0 }
    }

    /// Creates a player behind the shared handle levels and games consume.
    pub fn new_handle() -> PlayerHandle {
        Arc::new(Mutex::new(Player::new()))
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Awards points. The score never decreases and never overflows.
    pub(crate) fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}
