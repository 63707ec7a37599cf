//! Procedural platform generation
//!
//! Platforms are stacked upward from the highest one generated so far. Each
//! level owns one generator, including its RNG stream, so layouts depend only
//! on the level seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use super::state::{Platform, PlatformKind};
use crate::config::{GameConfig, LevelParams, TypeMix};

/// Pick a platform kind from a uniform draw `r` in `[0, 1)`.
///
/// A trap is never followed by another trap: after a trap the same draw
/// splits evenly between normal and trampoline.
pub fn choose_kind(mix: &TypeMix, last_kind: PlatformKind, r: f32) -> PlatformKind {
    if last_kind == PlatformKind::Trap {
        return if r < 0.5 {
            PlatformKind::Normal
        } else {
            PlatformKind::Trampoline
        };
    }

    if r < mix.normal {
        PlatformKind::Normal
    } else if r < mix.normal + mix.trap {
        PlatformKind::Trap
    } else {
        PlatformKind::Trampoline
    }
}

/// Per-level generator state
#[derive(Debug, Clone)]
pub struct PlatformGenerator {
    mix: TypeMix,
    min_gap: f32,
    max_gap: f32,
    x_min: f32,
    x_max: f32,
    width: f32,
    height: f32,
    /// Smallest y (highest point) generated so far, in current screen space
    highest_y: f32,
    last_kind: PlatformKind,
    last_trap_x: Option<f32>,
    rng: Pcg32,
}

impl PlatformGenerator {
    pub fn new(params: &LevelParams, config: &GameConfig, seed: u64) -> Self {
        let p = &config.platforms;
        Self {
            mix: params.mix,
            min_gap: params.min_gap,
            max_gap: params.max_gap,
            x_min: p.margin,
            x_max: config.screen.width - p.width - p.margin,
            width: p.width,
            height: p.height,
            highest_y: config.screen.height,
            last_kind: PlatformKind::Normal,
            last_trap_x: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn highest_y(&self) -> f32 {
        self.highest_y
    }

    pub fn last_kind(&self) -> PlatformKind {
        self.last_kind
    }

    pub fn last_trap_x(&self) -> Option<f32> {
        self.last_trap_x
    }

    /// Record a platform that was placed by hand (the start platform)
    pub fn anchor(&mut self, platform: &Platform) {
        self.highest_y = platform.rect.top();
        self.last_kind = platform.kind;
        if platform.kind == PlatformKind::Trap {
            self.last_trap_x = Some(platform.rect.left());
        }
    }

    /// Follow the camera: everything already generated moved down by `dy`
    pub fn shift(&mut self, dy: f32) {
        self.highest_y += dy;
    }

    /// Generate the next platform above the current highest one
    pub fn generate_next(&mut self, id: u32) -> Platform {
        let gap = self.rng.random_range(self.min_gap..=self.max_gap);
        let y = self.highest_y - gap;
        let x = self.rng.random_range(self.x_min..=self.x_max);

        let r: f32 = self.rng.random();
        let mut kind = choose_kind(&self.mix, self.last_kind, r);

        // Keep consecutive traps apart horizontally
        if kind == PlatformKind::Trap
            && let Some(last_x) = self.last_trap_x
            && (x - last_x).abs() < self.width
        {
            kind = PlatformKind::Normal;
        }

        self.highest_y = y;
        self.last_kind = kind;
        if kind == PlatformKind::Trap {
            self.last_trap_x = Some(x);
        }

        log::trace!("Generated platform {} {:?} at ({:.1}, {:.1}), gap {:.1}", id, kind, x, y, gap);

        Platform::new(id, kind, Aabb::new(x, y, self.width, self.height))
    }
}
