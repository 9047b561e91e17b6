//! A tile-based arcade game engine.
//!
//! A [`board::Board`] of tiles is populated with a player-controlled unit,
//! autonomous ghosts and collectible pellets. A [`level::Level`] owns the
//! board, drives the ghosts from a tick scheduler and resolves every
//! shared-tile encounter through a pairwise collision table, while a
//! [`game::Game`] exposes the start/stop/move surface consumed by a UI.
//! Rendering, input capture and audio are left to external collaborators.

pub mod board;
pub mod constants;
pub mod direction;
pub mod entity;
pub mod error;
pub mod game;
pub mod level;
pub mod map;
