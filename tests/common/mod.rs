//! Shared fixtures for the integration tests.
//!
//! Levels are wired to manually stepped schedulers so NPC ticks advance
//! deterministically instead of on the wall clock.

use pacmaze::board::Board;
use pacmaze::constants::PELLET_VALUE;
use pacmaze::entity::{Ghost, Pellet, UnitId, Units};
use pacmaze::game::Game;
use pacmaze::level::collisions::PlayerCollisions;
use pacmaze::level::scheduler::{StepHandle, StepScheduler};
use pacmaze::level::Level;
use pacmaze::map::{DefaultBoardFactory, LevelFactory, MapParser};

use glam::IVec2;
use pacmaze::entity::Player;

/// Installs a subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Level factory producing manually stepped levels, recording one
/// [`StepHandle`] per level it builds.
#[derive(Default)]
pub struct StepLevelFactory {
    pub handles: Vec<StepHandle>,
}

impl LevelFactory for StepLevelFactory {
    fn ghost(&mut self) -> Ghost {
        Ghost::random()
    }

    fn pellet(&mut self) -> Pellet {
        Pellet::new(PELLET_VALUE)
    }

    fn level(&mut self, board: Board, units: Units, npcs: Vec<UnitId>, start_squares: Vec<IVec2>) -> Level {
        let scheduler = StepScheduler::new();
        self.handles.push(scheduler.handle());
        Level::new(
            board,
            units,
            npcs,
            start_squares,
            Box::new(PlayerCollisions),
            Box::new(scheduler),
        )
    }
}

pub fn step_parser() -> MapParser<DefaultBoardFactory, StepLevelFactory> {
    MapParser::new(StepLevelFactory::default(), DefaultBoardFactory)
}

/// A game of `count` identical, manually stepped levels over `rows`,
/// plus the tick handles in level order.
pub fn step_game<S: AsRef<str>>(rows: &[S], count: usize) -> (Game, Vec<StepHandle>) {
    init_tracing();
    let mut parser = step_parser();
    let levels = (0..count).map(|_| parser.parse(rows).unwrap()).collect();
    let handles = parser.level_factory().handles.clone();
    (Game::with_levels(levels, Player::new_handle()), handles)
}
