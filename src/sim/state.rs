//! Game state and core simulation types
//!
//! The session owns the current level and the player; a level owns its
//! platforms. Nothing here touches a global clock or RNG.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::level::Level;
use crate::config::{GameConfig, LevelParams};
use crate::error::ConfigError;
use crate::level_seed;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start input
    WaitingStart,
    /// Level shown with the player placed, nothing moves yet
    LevelFrozen,
    /// Full simulation
    LevelRunning,
    /// Lives exhausted
    GameOver,
    /// Final level completed (also counts as game over)
    Victory,
}

impl GamePhase {
    /// True for both terminal phases
    pub fn is_game_over(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Platform behaviour on landing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Holds the player, then vanishes shortly after first contact
    Trap,
    /// Launches the player higher than a regular jump
    Trampoline,
}

/// A platform entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub kind: PlatformKind,
    pub rect: Aabb,
    /// Time of the first landing, traps only
    pub triggered_at: Option<f64>,
}

impl Platform {
    pub fn new(id: u32, kind: PlatformKind, rect: Aabb) -> Self {
        Self {
            id,
            kind,
            rect,
            triggered_at: None,
        }
    }

    /// Start the decay timer. Only the first call on a trap has any effect.
    ///
    /// Returns true if this call armed the timer.
    pub fn trigger(&mut self, now: f64) -> bool {
        if self.kind == PlatformKind::Trap && self.triggered_at.is_none() {
            self.triggered_at = Some(now);
            true
        } else {
            false
        }
    }

    /// Whether a triggered trap has outlived `decay_secs` (inclusive)
    pub fn should_expire(&self, now: f64, decay_secs: f64) -> bool {
        match (self.kind, self.triggered_at) {
            (PlatformKind::Trap, Some(t)) => now - t >= decay_secs,
            _ => false,
        }
    }

    /// Move down the screen as the camera climbs
    pub fn scroll(&mut self, dy: f32) {
        self.rect.pos.y += dy;
    }
}

/// The player body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Teleport, dropping all momentum
    pub fn reset_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Place the player so its feet are at `y`
    #[inline]
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Level shown and frozen, waiting for the first move
    LevelReady { level: u32 },
    /// First movement input, the clock is running
    LevelStarted { level: u32 },
    Landed { platform_id: u32 },
    TrapTriggered { platform_id: u32 },
    TrapExpired { platform_id: u32 },
    TrampolineBounce { platform_id: u32 },
    LifeLost { lives_left: u32 },
    LevelCompleted { level: u32, time: f64 },
    GameOver,
    Victory,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; each level derives its own RNG stream from it
    pub seed: u64,
    pub config: GameConfig,
    /// Pre-validated parameters for every level, index 0 = level 1
    levels: Vec<LevelParams>,
    pub phase: GamePhase,
    pub lives: u32,
    /// Current level (1-based)
    pub level_index: u32,
    pub level: Level,
    pub player: Player,
    /// Clock value the level timer counts from
    pub level_start: f64,
    /// Time spent on each finished or failed level, in order
    pub level_times: Vec<f64>,
    /// Frames simulated while running
    pub frame: u64,
}

impl GameState {
    /// New session with the default configuration
    pub fn new(seed: u64) -> Result<Self, ConfigError> {
        Self::with_config(seed, GameConfig::default())
    }

    /// New session. Every level's parameters are validated up front so later
    /// level transitions cannot fail.
    pub fn with_config(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
        let levels = (1..=config.max_level)
            .map(|index| LevelParams::for_level(&config, index))
            .collect::<Result<Vec<_>, _>>()?;

        let level = Level::new(levels[0].clone(), &config, level_seed(seed, 1));
        let player_size = Vec2::new(config.physics.player_width, config.physics.player_height);
        let player = Player::new(level.safe_spawn_position(), player_size);

        log::info!(
            "New session: seed={}, {} levels, {} lives",
            seed,
            config.max_level,
            config.initial_lives
        );

        Ok(Self {
            seed,
            lives: config.initial_lives,
            config,
            levels,
            phase: GamePhase::WaitingStart,
            level_index: 1,
            level,
            player,
            level_start: 0.0,
            level_times: Vec::new(),
            frame: 0,
        })
    }

    /// Parameters of a level (1-based), if it exists
    pub fn level_params(&self, index: u32) -> Option<&LevelParams> {
        index
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    pub fn is_final_level(&self) -> bool {
        self.level_index >= self.config.max_level
    }

    /// Seconds since the level clock started; zero unless running
    pub fn level_elapsed(&self, now: f64) -> f64 {
        if self.phase == GamePhase::LevelRunning {
            (now - self.level_start).max(0.0)
        } else {
            0.0
        }
    }

    /// The fixed goal region in screen space
    pub fn goal_rect(&self) -> Aabb {
        let goal = &self.config.goal;
        Aabb::from_center(
            Vec2::new(goal.center_x, goal.center_y),
            Vec2::splat(goal.radius),
        )
    }

    /// Put the player back on the lowest platform of the current level
    pub(crate) fn respawn_player(&mut self) {
        let spawn = self.level.safe_spawn_position();
        self.player.reset_position(spawn);
    }

    /// Replace the level with a freshly generated one
    pub(crate) fn load_level(&mut self, index: u32) {
        let Some(params) = self.level_params(index).cloned() else {
            log::error!("No parameters for level {}, keeping current level", index);
            return;
        };
        self.level_index = index;
        self.level = Level::new(params, &self.config, level_seed(self.seed, index));
        self.respawn_player();
    }
}
