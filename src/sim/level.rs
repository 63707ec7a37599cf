//! A single level attempt
//!
//! Owns the active platforms and the generator that feeds them. Platforms are
//! stored in id order (insertion order), which is also the order collision
//! checks see them in. Each frame runs separate passes for scrolling,
//! off-screen removal, trap decay, top-up and eviction.

use glam::Vec2;

use super::aabb::Aabb;
use super::generator::PlatformGenerator;
use super::state::{Platform, PlatformKind};
use crate::config::{GameConfig, LevelParams};
use crate::error::ConfigError;

/// What one `Level::update` did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelUpdate {
    pub scrolled_off: usize,
    /// Ids of traps removed by decay
    pub expired: Vec<u32>,
    pub spawned: usize,
    pub evicted: usize,
}

/// Platform set and generator for one level
#[derive(Debug, Clone)]
pub struct Level {
    pub params: LevelParams,
    platforms: Vec<Platform>,
    generator: PlatformGenerator,
    next_id: u32,
    screen: Vec2,
    player_size: Vec2,
    min_count: usize,
    max_count: usize,
    trap_decay_secs: f64,
}

impl Level {
    /// Validate the configuration and build level `index` (1-based)
    pub fn try_new(config: &GameConfig, index: u32, seed: u64) -> Result<Self, ConfigError> {
        let params = LevelParams::for_level(config, index)?;
        Ok(Self::new(params, config, seed))
    }

    /// Build a level from already validated parameters
    pub fn new(params: LevelParams, config: &GameConfig, seed: u64) -> Self {
        let generator = PlatformGenerator::new(&params, config, seed);
        let mut level = Self {
            params,
            platforms: Vec::with_capacity(config.platforms.max_count),
            generator,
            next_id: 1,
            screen: Vec2::new(config.screen.width, config.screen.height),
            player_size: Vec2::new(config.physics.player_width, config.physics.player_height),
            min_count: config.platforms.min_count,
            max_count: config.platforms.max_count,
            trap_decay_secs: config.platforms.trap_decay_secs,
        };

        // Wide, safe start platform near the bottom, centered
        let p = &config.platforms;
        let start_id = level.next_entity_id();
        let start = Platform::new(
            start_id,
            PlatformKind::Normal,
            Aabb::new(
                (config.screen.width - p.width) / 2.0,
                config.screen.height - p.start_offset,
                p.width,
                p.height,
            ),
        );
        level.generator.anchor(&start);
        level.platforms.push(start);

        level.top_up();

        log::info!(
            "Level {} generated: {} platforms, scroll {:.1}/frame",
            level.params.index,
            level.platforms.len(),
            level.params.scroll_speed
        );

        level
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn index(&self) -> u32 {
        self.params.index
    }

    pub fn scroll_speed(&self) -> f32 {
        self.params.scroll_speed
    }

    /// Active platforms in collision order
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn platforms_mut(&mut self) -> &mut [Platform] {
        &mut self.platforms
    }

    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn generator(&self) -> &PlatformGenerator {
        &self.generator
    }

    /// Add a hand-placed platform at the end of the collision order.
    ///
    /// Used to build fixed scenarios; it does not touch generator memory.
    pub fn insert_platform(&mut self, kind: PlatformKind, rect: Aabb) -> u32 {
        let id = self.next_entity_id();
        self.platforms.push(Platform::new(id, kind, rect));
        id
    }

    /// Remove every platform matching `pred`, preserving order
    pub fn remove_platforms(&mut self, pred: impl Fn(&Platform) -> bool) -> usize {
        let before = self.platforms.len();
        self.platforms.retain(|p| !pred(p));
        before - self.platforms.len()
    }

    /// Advance one running frame
    pub fn update(&mut self, now: f64) -> LevelUpdate {
        self.scroll();
        let scrolled_off = self.prune_offscreen();
        let expired = self.prune_expired(now);
        let spawned = self.top_up();
        let evicted = self.evict_excess();

        LevelUpdate {
            scrolled_off,
            expired,
            spawned,
            evicted,
        }
    }

    /// Move everything down as the camera climbs
    pub fn scroll(&mut self) {
        let dy = self.params.scroll_speed;
        for platform in &mut self.platforms {
            platform.scroll(dy);
        }
        self.generator.shift(dy);
    }

    /// Drop platforms whose top has passed the screen bottom
    pub fn prune_offscreen(&mut self) -> usize {
        let bottom = self.screen.y;
        self.remove_platforms(|p| p.rect.top() > bottom)
    }

    /// Drop traps whose decay has elapsed
    pub fn prune_expired(&mut self, now: f64) -> Vec<u32> {
        let decay = self.trap_decay_secs;
        let expired: Vec<u32> = self
            .platforms
            .iter()
            .filter(|p| p.should_expire(now, decay))
            .map(|p| p.id)
            .collect();
        if !expired.is_empty() {
            self.platforms.retain(|p| !expired.contains(&p.id));
            log::debug!("Traps expired: {:?}", expired);
        }
        expired
    }

    /// Generate above the highest point until the minimum count is met
    pub fn top_up(&mut self) -> usize {
        let mut spawned = 0;
        while self.platforms.len() < self.min_count {
            self.spawn_platform_above();
            spawned += 1;
        }
        spawned
    }

    /// Generate one platform above the highest point
    pub fn spawn_platform_above(&mut self) -> u32 {
        let id = self.next_entity_id();
        let platform = self.generator.generate_next(id);
        self.platforms.push(platform);
        id
    }

    /// Remove the lowest platforms while over the maximum count
    pub fn evict_excess(&mut self) -> usize {
        let mut evicted = 0;
        while self.platforms.len() > self.max_count {
            let Some(lowest) = self.lowest_index() else {
                break;
            };
            self.platforms.remove(lowest);
            evicted += 1;
        }
        evicted
    }

    /// Storage index of the platform with the largest y (first one on ties)
    fn lowest_index(&self) -> Option<usize> {
        let mut lowest: Option<(usize, f32)> = None;
        for (i, p) in self.platforms.iter().enumerate() {
            match lowest {
                Some((_, y)) if p.rect.top() <= y => {}
                _ => lowest = Some((i, p.rect.top())),
            }
        }
        lowest.map(|(i, _)| i)
    }

    /// Where to put the player: standing centered on the lowest platform.
    ///
    /// Falls back to the screen center if the level is empty.
    pub fn safe_spawn_position(&self) -> Vec2 {
        match self.lowest_index().map(|i| &self.platforms[i]) {
            Some(lowest) => Vec2::new(
                lowest.rect.center_x() - self.player_size.x / 2.0,
                lowest.rect.top() - self.player_size.y,
            ),
            None => Vec2::new(
                self.screen.x / 2.0 - self.player_size.x / 2.0,
                self.screen.y / 2.0,
            ),
        }
    }
}
