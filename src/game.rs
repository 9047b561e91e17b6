//! The top-level game: one or more levels behind a start/stop/move surface.
//!
//! A single-level game and a multi-level game are the same machine; the
//! multi-level variant simply carries more than one level and advances the
//! active index on a win, re-registering the same player handle onto the
//! next level. Losing any level, or winning the final one, ends the game
//! permanently: `start()` becomes a no-op.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::direction::Direction;
use crate::entity::{Player, PlayerHandle, UnitId};
use crate::error::GameResult;
use crate::level::{Level, Outcome};
use crate::map::MapParser;

/// The top-level controller consumed by an external UI or CLI.
pub struct Game {
    levels: Vec<Level>,
    current: usize,
    player: PlayerHandle,
    player_id: UnitId,
}

impl Game {
    /// A single-level game.
    pub fn new(level: Level, player: PlayerHandle) -> Game {
        Game::with_levels(vec![level], player)
    }

    /// A game over a fixed, ordered sequence of levels. The player is
    /// registered onto the first level immediately.
    ///
    /// # Panics
    ///
    /// Panics if `levels` is empty.
    pub fn with_levels(mut levels: Vec<Level>, player: PlayerHandle) -> Game {
        assert!(!levels.is_empty(), "a game needs at least one level");
        let player_id = levels[0].register_player(player.clone());
        Game {
            levels,
            current: 0,
            player,
            player_id,
        }
    }

    /// Parses the same map once per level and stacks `count` levels into a
    /// game with a fresh player, using the standard factories.
    pub fn from_map<S: AsRef<str>>(rows: &[S], count: usize) -> GameResult<Game> {
        assert!(count > 0, "a game needs at least one level");
        let mut parser = MapParser::standard();
        let levels = (0..count).map(|_| parser.parse(rows)).collect::<Result<Vec<_>, _>>()?;
        Ok(Game::with_levels(levels, Player::new_handle()))
    }

    /// Starts (or resumes) the active level. A no-op once the game has
    /// permanently ended — after a loss, or after winning the final level.
    pub fn start(&mut self) {
        let level = &mut self.levels[self.current];
        if level.outcome() != Outcome::Ongoing {
            trace!("start ignored: game has ended");
            return;
        }
        level.start();
    }

    /// Pauses the active level. The game is not in progress afterwards,
    /// whatever its prior state.
    pub fn stop(&mut self) {
        self.levels[self.current].stop();
    }

    pub fn is_in_progress(&self) -> bool {
        self.levels[self.current].is_in_progress()
    }

    /// Moves the player one square. Returns `false` for a rejected move, a
    /// game that is not in progress, or a handle that does not belong to
    /// this game.
    pub fn move_player(&mut self, player: &PlayerHandle, direction: Direction) -> bool {
        if !Arc::ptr_eq(player, &self.player) {
            trace!("move rejected: player is not registered with this game");
            return false;
        }
        let moved = self.levels[self.current].move_unit(self.player_id, direction);
        if moved && self.levels[self.current].outcome() == Outcome::Won {
            self.advance();
        }
        moved
    }

    /// Win hook: below the final index, activate the next level and carry
    /// the player over. On the final index the game is complete.
    fn advance(&mut self) {
        if self.current + 1 < self.levels.len() {
            self.current += 1;
            self.player_id = self.levels[self.current].register_player(self.player.clone());
            debug!(level = self.current, "advanced to the next level");
        } else {
            debug!("final level won: game complete");
        }
    }

    /// The active level.
    pub fn level(&self) -> &Level {
        &self.levels[self.current]
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.current]
    }

    /// The players participating in this game.
    pub fn players(&self) -> Vec<PlayerHandle> {
        vec![self.player.clone()]
    }

    /// Index of the active level within the fixed sequence.
    pub fn current_level_index(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
