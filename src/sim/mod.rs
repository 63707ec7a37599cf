//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, time passed in by the caller
//! - Seeded per-level RNG only
//! - Stable iteration order (by platform id)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod collision;
pub mod generator;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use autopilot::autopilot_input;
pub use collision::{Landing, LandingEffect, move_and_collide};
pub use generator::{PlatformGenerator, choose_kind};
pub use level::{Level, LevelUpdate};
pub use physics::{apply_gravity, handle_input};
pub use state::{GameEvent, GamePhase, GameState, Platform, PlatformKind, Player};
pub use tick::{TickInput, advance_level, lose_life, phase_transition, tick};
