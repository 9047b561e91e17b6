//! A playable level: one board, its units, the NPC tick loop and win/lose
//! detection.
//!
//! All mutable level state lives behind a single mutex, so a scheduler tick
//! and an externally triggered move are mutually exclusive critical
//! sections. `stop()` prevents any further tick from starting; a tick
//! already running completes first.

pub mod collisions;
pub mod movement;
pub mod scheduler;

use std::sync::Arc;

use glam::IVec2;
use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::board::Board;
use crate::direction::Direction;
use crate::entity::{PlayerHandle, Unit, UnitId, UnitKind, Units};
use collisions::CollisionMap;
use scheduler::Scheduler;

/// Callback interface for UI/scoring collaborators.
///
/// Each observer receives exactly one terminal event (won XOR lost) at most
/// once per level lifetime.
pub trait LevelObserver: Send + Sync {
    fn level_won(&self) {}
    fn level_lost(&self) {}
}

/// How a level ended, if it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Won,
    Lost,
}

struct LevelState {
    board: Board,
    units: Units,
    npcs: Vec<UnitId>,
    players: Vec<UnitId>,
    collisions: Box<dyn CollisionMap>,
    observers: Vec<Arc<dyn LevelObserver>>,
    start_squares: Vec<IVec2>,
    next_start: usize,
    in_progress: bool,
    outcome: Outcome,
}

impl LevelState {
    fn any_player_alive(&self) -> bool {
        self.players
            .iter()
            .any(|&id| self.units.player(id).is_some_and(|handle| handle.lock().is_alive()))
    }

    /// Evaluates the end conditions, transitioning the level at most once.
    /// Returns the terminal outcome reached by this call, if any.
    fn check_end_conditions(&mut self) -> Option<Outcome> {
        if self.outcome != Outcome::Ongoing {
            return None;
        }
        if !self.any_player_alive() {
            self.outcome = Outcome::Lost;
            self.in_progress = false;
            debug!("level lost: no live players remain");
            return Some(Outcome::Lost);
        }
        if self.units.remaining_pellets() == 0 {
            self.outcome = Outcome::Won;
            self.in_progress = false;
            debug!("level won: all pellets consumed");
            return Some(Outcome::Won);
        }
        None
    }

    /// One scheduler tick: every NPC decides, then moves.
    fn tick_npcs(&mut self) {
        let npc_ids: SmallVec<[UnitId; 8]> = self.npcs.iter().copied().collect();
        for id in npc_ids {
            let decision = match self.units.get(id) {
                Unit::Ghost(ghost) => ghost.strategy().next_move(id, &self.board, &self.units),
                _ => None,
            };
            if let Some(direction) = decision {
                // A stale decision is rejected here without complaint.
                movement::attempt_move(&mut self.board, &mut self.units, self.collisions.as_ref(), id, direction);
            }
        }
    }
}

/// One playable board instance with its own tick scheduler, NPCs and
/// win/lose detection.
pub struct Level {
    state: Arc<Mutex<LevelState>>,
    scheduler: Box<dyn Scheduler>,
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level").finish_non_exhaustive()
    }
}

impl Level {
    /// Assembles a level from parsed parts. Usually called through a
    /// [`crate::map::LevelFactory`] rather than directly.
    ///
    /// # Panics
    ///
    /// Panics if `start_squares` is empty; a playable level needs at least
    /// one candidate player start.
    pub fn new(
        board: Board,
        units: Units,
        npcs: Vec<UnitId>,
        start_squares: Vec<IVec2>,
        collisions: Box<dyn CollisionMap>,
        scheduler: Box<dyn Scheduler>,
    ) -> Level {
        assert!(!start_squares.is_empty(), "a level needs at least one player start square");
        Level {
            state: Arc::new(Mutex::new(LevelState {
                board,
                units,
                npcs,
                players: Vec::new(),
                collisions,
                observers: Vec::new(),
                start_squares,
                next_start: 0,
                in_progress: false,
                outcome: Outcome::Ongoing,
            })),
            scheduler,
        }
    }

    /// Places a player on the next candidate start square (round-robin) and
    /// returns its id within this level.
    pub fn register_player(&mut self, player: PlayerHandle) -> UnitId {
        let mut state = self.state.lock();
        let square = state.start_squares[state.next_start % state.start_squares.len()];
        state.next_start += 1;

        let id = state.units.insert(Unit::Player(player));
        state.units.set_square(id, Some(square));
        state
            .board
            .tile_mut(square)
            .expect("start squares lie on the board")
            .push_occupant(id);
        state.players.push(id);
        debug!(player = id.0, x = square.x, y = square.y, "player registered");
        id
    }

    pub fn add_observer(&mut self, observer: Arc<dyn LevelObserver>) {
        self.state.lock().observers.push(observer);
    }

    /// Activates the NPC scheduler. Idempotent; a level that already ended
    /// cannot be restarted.
    pub fn start(&mut self) {
        {
            let mut state = self.state.lock();
            if state.in_progress || state.outcome != Outcome::Ongoing {
                return;
            }
            state.in_progress = true;
        }
        let state = Arc::clone(&self.state);
        self.scheduler.start(Box::new(move || Level::run_tick(&state)));
        debug!("level started");
    }

    /// Deactivates the scheduler. Idempotent; the outcome is untouched.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        let mut state = self.state.lock();
        if state.in_progress {
            state.in_progress = false;
            debug!("level stopped");
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.state.lock().in_progress
    }

    pub fn outcome(&self) -> Outcome {
        self.state.lock().outcome
    }

    /// Moves a unit one square, resolving collisions and end conditions.
    /// Rejected outright (returning `false`) while the level is not in
    /// progress.
    pub fn move_unit(&mut self, unit: UnitId, direction: Direction) -> bool {
        let (moved, terminal) = {
            let mut state = self.state.lock();
            if !state.in_progress {
                trace!(unit = unit.0, "move rejected: level not in progress");
                return false;
            }
            let s = &mut *state;
            let moved = movement::attempt_move(&mut s.board, &mut s.units, s.collisions.as_ref(), unit, direction);
            let ended = state.check_end_conditions();
            (moved, ended.map(|outcome| (outcome, state.observers.clone())))
        };

        // Observers run outside the state lock so a callback may query the
        // level again without deadlocking.
        if let Some((outcome, observers)) = terminal {
            self.scheduler.stop();
            notify(&observers, outcome);
        }
        moved
    }

    /// The tick body handed to the scheduler. Returns `false` once the
    /// level is no longer in progress.
    fn run_tick(state: &Mutex<LevelState>) -> bool {
        let ended = {
            let mut state = state.lock();
            if !state.in_progress {
                return false;
            }
            state.tick_npcs();
            state
                .check_end_conditions()
                .map(|outcome| (outcome, state.observers.clone()))
        };
        match ended {
            Some((outcome, observers)) => {
                notify(&observers, outcome);
                false
            }
            None => true,
        }
    }

    /// Registered players, in registration order.
    pub fn players(&self) -> Vec<PlayerHandle> {
        let state = self.state.lock();
        state
            .players
            .iter()
            .filter_map(|&id| state.units.player(id).cloned())
            .collect()
    }

    /// Ids of this level's NPCs, in tick order.
    pub fn npcs(&self) -> Vec<UnitId> {
        self.state.lock().npcs.clone()
    }

    pub fn remaining_pellets(&self) -> usize {
        self.state.lock().units.remaining_pellets()
    }

    pub fn is_any_player_alive(&self) -> bool {
        self.state.lock().any_player_alive()
    }

    /// The occupant stack at a position, bottom to top. Empty for positions
    /// off the board.
    pub fn occupants(&self, pos: IVec2) -> Vec<UnitId> {
        let state = self.state.lock();
        state.board.tile(pos).map(|tile| tile.occupants().to_vec()).unwrap_or_default()
    }

    pub fn kind_of(&self, unit: UnitId) -> UnitKind {
        self.state.lock().units.kind(unit)
    }

    /// The square a unit currently occupies, if any.
    pub fn square_of(&self, unit: UnitId) -> Option<IVec2> {
        self.state.lock().units.square(unit)
    }
}

fn notify(observers: &[Arc<dyn LevelObserver>], outcome: Outcome) {
    for observer in observers {
        match outcome {
            Outcome::Won => observer.level_won(),
            Outcome::Lost => observer.level_lost(),
            Outcome::Ongoing => unreachable!("only terminal outcomes are notified"),
        }
    }
}
