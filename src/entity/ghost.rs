//! Autonomous hostile units.

use crate::entity::strategy::{ChaserStrategy, MoveStrategy, RandomStrategy};

/// A hostile unit that picks its own move every scheduler tick.
///
/// The decision procedure is a boxed [`MoveStrategy`], swappable per ghost
/// without touching the movement engine.
pub struct Ghost {
    strategy: Box<dyn MoveStrategy>,
}

impl Ghost {
    pub fn new(strategy: Box<dyn MoveStrategy>) -> Ghost {
        Ghost { strategy }
    }

    /// A ghost that wanders, reversing only when forced.
    pub fn random() -> Ghost {
        Ghost::new(Box::new(RandomStrategy::new()))
    }

    /// A ghost that hunts the nearest live player.
    pub fn chaser() -> Ghost {
        Ghost::new(Box::new(ChaserStrategy::new()))
    }

    pub fn strategy(&self) -> &dyn MoveStrategy {
        self.strategy.as_ref()
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn MoveStrategy>) {
        self.strategy = strategy;
    }
}
