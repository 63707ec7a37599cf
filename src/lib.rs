//! Updraft - a vertically scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, physics, collisions, session state)
//! - `config`: Validated game constants, optionally loaded from JSON
//! - `host`: Clock, input, and frame pacing for loop drivers
//! - `render`: Per-frame snapshot handed to an external renderer
//! - `hud`: HUD and results screen text

pub mod config;
pub mod error;
pub mod host;
pub mod hud;
pub mod render;
pub mod sim;

pub use config::{GameConfig, LevelParams, TypeMix};
pub use error::{ConfigError, SinkError};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the fixed-step loop
    pub const FRAME_RATE: u32 = 60;
    /// Duration of one frame in seconds
    pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.5;
    /// Horizontal speed while a direction is held
    pub const RUN_SPEED: f32 = 4.0;
    /// Upward impulse of a jump
    pub const JUMP_FORCE: f32 = 10.0;
    /// Trampoline bounce relative to a regular jump
    pub const TRAMPOLINE_FACTOR: f32 = 1.5;

    /// Camera scroll per frame on level 1
    pub const SCROLL_SPEED: f32 = 1.0;
    /// Extra scroll per frame for every level after the first
    pub const SCROLL_SPEED_PER_LEVEL: f32 = 0.5;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const MIN_PLATFORMS: usize = 16;
    pub const MAX_PLATFORMS: usize = 20;
    /// Vertical spacing between consecutive platforms
    pub const PLATFORM_MIN_GAP: f32 = 40.0;
    pub const PLATFORM_MAX_GAP: f32 = 50.0;
    /// Horizontal margin kept free on both screen edges
    pub const PLATFORM_MARGIN: f32 = 40.0;
    /// Distance from the screen bottom to the top of the start platform
    pub const START_PLATFORM_OFFSET: f32 = 80.0;

    /// Platform type distribution (levels before the last)
    pub const NORMAL_PERCENT: f32 = 0.70;
    pub const TRAP_PERCENT: f32 = 0.15;
    pub const TRAMPOLINE_PERCENT: f32 = 0.15;
    /// Platform type distribution on the final level
    pub const FINAL_NORMAL_PERCENT: f32 = 0.60;
    pub const FINAL_TRAP_PERCENT: f32 = 0.25;
    pub const FINAL_TRAMPOLINE_PERCENT: f32 = 0.15;

    /// Seconds a trap survives after it is first landed on
    pub const TRAP_DECAY_SECS: f64 = 0.5;

    /// Player size
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Goal ("sun") near the top of the view
    pub const GOAL_CENTER_X: f32 = SCREEN_WIDTH / 2.0;
    pub const GOAL_CENTER_Y: f32 = 80.0;
    pub const GOAL_RADIUS: f32 = 30.0;

    /// Progression
    pub const INITIAL_LIVES: u32 = 3;
    pub const MAX_LEVEL: u32 = 3;
}

/// Derive a per-level RNG seed from the session seed
#[inline]
pub fn level_seed(session_seed: u64, level_index: u32) -> u64 {
    (level_index as u64)
        .wrapping_mul(2_654_435_761)
        .wrapping_add(session_seed)
}
