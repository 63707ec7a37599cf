//! Game configuration
//!
//! Every tunable the simulation reads lives here. Defaults mirror `consts`;
//! a JSON file may override any subset of fields at start-up. Values are fixed
//! for the lifetime of a session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tolerance when checking that a type mix sums to one
const MIX_SUM_EPSILON: f32 = 1e-3;

/// Share of each platform kind produced by the generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeMix {
    pub normal: f32,
    pub trap: f32,
    pub trampoline: f32,
}

impl TypeMix {
    pub const fn new(normal: f32, trap: f32, trampoline: f32) -> Self {
        Self {
            normal,
            trap,
            trampoline,
        }
    }

    fn validate(&self, level: u32) -> Result<(), ConfigError> {
        if self.normal < 0.0 || self.trap < 0.0 || self.trampoline < 0.0 {
            return Err(ConfigError::NegativeShare {
                level,
                normal: self.normal,
                trap: self.trap,
                trampoline: self.trampoline,
            });
        }
        let sum = self.normal + self.trap + self.trampoline;
        if (sum - 1.0).abs() > MIX_SUM_EPSILON {
            return Err(ConfigError::MixSum { level, sum });
        }
        Ok(())
    }
}

impl Default for TypeMix {
    fn default() -> Self {
        Self::new(NORMAL_PERCENT, TRAP_PERCENT, TRAMPOLINE_PERCENT)
    }
}

/// Screen bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

/// Player movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub run_speed: f32,
    pub jump_force: f32,
    pub trampoline_factor: f32,
    pub player_width: f32,
    pub player_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            run_speed: RUN_SPEED,
            jump_force: JUMP_FORCE,
            trampoline_factor: TRAMPOLINE_FACTOR,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
        }
    }
}

/// Platform geometry, spacing and population
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub width: f32,
    pub height: f32,
    pub min_count: usize,
    pub max_count: usize,
    pub min_gap: f32,
    pub max_gap: f32,
    pub margin: f32,
    pub start_offset: f32,
    pub trap_decay_secs: f64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            width: PLATFORM_WIDTH,
            height: PLATFORM_HEIGHT,
            min_count: MIN_PLATFORMS,
            max_count: MAX_PLATFORMS,
            min_gap: PLATFORM_MIN_GAP,
            max_gap: PLATFORM_MAX_GAP,
            margin: PLATFORM_MARGIN,
            start_offset: START_PLATFORM_OFFSET,
            trap_decay_secs: TRAP_DECAY_SECS,
        }
    }
}

/// Goal region, described as the circle the renderer draws
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            center_x: GOAL_CENTER_X,
            center_y: GOAL_CENTER_Y,
            radius: GOAL_RADIUS,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub physics: PhysicsConfig,
    pub platforms: PlatformConfig,
    pub goal: GoalConfig,
    /// Scroll per frame on level 1
    pub scroll_speed: f32,
    /// Added scroll per frame for each later level
    pub scroll_speed_per_level: f32,
    pub initial_lives: u32,
    pub max_level: u32,
    /// Type mix per level (index 0 = level 1). Levels past the end reuse the last entry.
    pub type_mix: Vec<TypeMix>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            physics: PhysicsConfig::default(),
            platforms: PlatformConfig::default(),
            goal: GoalConfig::default(),
            scroll_speed: SCROLL_SPEED,
            scroll_speed_per_level: SCROLL_SPEED_PER_LEVEL,
            initial_lives: INITIAL_LIVES,
            max_level: MAX_LEVEL,
            type_mix: vec![
                TypeMix::default(),
                TypeMix::default(),
                TypeMix::new(
                    FINAL_NORMAL_PERCENT,
                    FINAL_TRAP_PERCENT,
                    FINAL_TRAMPOLINE_PERCENT,
                ),
            ],
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

impl GameConfig {
    /// Load a config from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen.width", self.screen.width as f64)?;
        positive("screen.height", self.screen.height as f64)?;
        positive("physics.gravity", self.physics.gravity as f64)?;
        positive("physics.run_speed", self.physics.run_speed as f64)?;
        positive("physics.jump_force", self.physics.jump_force as f64)?;
        positive("physics.trampoline_factor", self.physics.trampoline_factor as f64)?;
        positive("physics.player_width", self.physics.player_width as f64)?;
        positive("physics.player_height", self.physics.player_height as f64)?;
        positive("platforms.width", self.platforms.width as f64)?;
        positive("platforms.height", self.platforms.height as f64)?;
        positive("platforms.min_gap", self.platforms.min_gap as f64)?;
        positive("platforms.trap_decay_secs", self.platforms.trap_decay_secs)?;
        positive("goal.radius", self.goal.radius as f64)?;
        positive("scroll_speed", self.scroll_speed as f64)?;
        positive("initial_lives", self.initial_lives as f64)?;
        positive("max_level", self.max_level as f64)?;

        if self.scroll_speed_per_level < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "scroll_speed_per_level",
                value: self.scroll_speed_per_level as f64,
            });
        }

        let p = &self.platforms;
        if p.min_gap > p.max_gap {
            return Err(ConfigError::InvertedGapRange {
                min: p.min_gap,
                max: p.max_gap,
            });
        }
        if p.min_count == 0 || p.min_count > p.max_count {
            return Err(ConfigError::InvalidPlatformBounds {
                min: p.min_count,
                max: p.max_count,
            });
        }
        if p.width + 2.0 * p.margin > self.screen.width {
            return Err(ConfigError::PlatformTooWide {
                platform_width: p.width,
                margin: p.margin,
                screen_width: self.screen.width,
            });
        }

        if self.type_mix.is_empty() {
            return Err(ConfigError::MissingTypeMix);
        }
        for (i, mix) in self.type_mix.iter().enumerate() {
            mix.validate(i as u32 + 1)?;
        }
        Ok(())
    }

    /// Type mix used on a level (1-based)
    pub fn type_mix_for(&self, level_index: u32) -> Option<TypeMix> {
        let idx = (level_index.max(1) - 1) as usize;
        self.type_mix
            .get(idx)
            .or_else(|| self.type_mix.last())
            .copied()
    }
}

/// Everything a single level needs, resolved from `GameConfig`
#[derive(Debug, Clone, PartialEq)]
pub struct LevelParams {
    pub index: u32,
    pub scroll_speed: f32,
    pub mix: TypeMix,
    pub min_gap: f32,
    pub max_gap: f32,
}

impl LevelParams {
    /// Resolve and validate the parameters of a level (1-based)
    pub fn for_level(config: &GameConfig, index: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        if index == 0 || index > config.max_level {
            return Err(ConfigError::LevelOutOfRange {
                index,
                max_level: config.max_level,
            });
        }
        let mix = config
            .type_mix_for(index)
            .ok_or(ConfigError::MissingTypeMix)?;

        Ok(Self {
            index,
            scroll_speed: config.scroll_speed + (index - 1) as f32 * config.scroll_speed_per_level,
            mix,
            min_gap: config.platforms.min_gap,
            max_gap: config.platforms.max_gap,
        })
    }
}
