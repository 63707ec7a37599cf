//! Collision resolution between the player and platforms
//!
//! Platforms are one-way: only a falling player arriving from above can land.
//! Candidates are checked in storage order and the first match wins. With the
//! generator's minimum vertical spacing two platforms cannot both qualify in
//! the same frame, so the order never decides an outcome in practice.

use glam::Vec2;

use super::state::{Platform, PlatformKind, Player};
use crate::config::PhysicsConfig;

/// What a landing does to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandingEffect {
    /// Stand on the platform
    Rest,
    /// Stand on the platform and start its decay timer
    RestAndTrigger,
    /// Bounce off with the given vertical velocity
    Launch { vy: f32 },
}

impl PlatformKind {
    pub fn landing_effect(self, physics: &PhysicsConfig) -> LandingEffect {
        match self {
            PlatformKind::Normal => LandingEffect::Rest,
            PlatformKind::Trap => LandingEffect::RestAndTrigger,
            PlatformKind::Trampoline => LandingEffect::Launch {
                vy: -physics.jump_force * physics.trampoline_factor,
            },
        }
    }
}

/// A resolved landing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub platform_id: u32,
    pub effect: LandingEffect,
    /// The landing armed a trap timer for the first time
    pub triggered: bool,
}

/// Apply the effect of landing on `platform`
fn resolve(player: &mut Player, platform: &mut Platform, physics: &PhysicsConfig, now: f64) -> Landing {
    let effect = platform.kind.landing_effect(physics);
    player.set_bottom(platform.rect.top());

    let mut triggered = false;
    match effect {
        LandingEffect::Rest => {
            player.vel.y = 0.0;
            player.on_ground = true;
        }
        LandingEffect::RestAndTrigger => {
            player.vel.y = 0.0;
            player.on_ground = true;
            triggered = platform.trigger(now);
        }
        LandingEffect::Launch { vy } => {
            player.vel.y = vy;
            player.on_ground = false;
        }
    }

    Landing {
        platform_id: platform.id,
        effect,
        triggered,
    }
}

/// Move horizontally and keep the player inside the screen
pub fn move_horizontal(player: &mut Player, screen_width: f32) {
    player.pos.x += player.vel.x;
    let max_x = (screen_width - player.size.x).max(0.0);
    player.pos.x = player.pos.x.clamp(0.0, max_x);
}

/// Move the player one frame and resolve landings.
///
/// Returns the landing, if any.
pub fn move_and_collide(
    player: &mut Player,
    platforms: &mut [Platform],
    physics: &PhysicsConfig,
    screen_width: f32,
    now: f64,
) -> Option<Landing> {
    move_horizontal(player, screen_width);

    // Rising or still: upward motion never lands
    if player.vel.y <= 0.0 {
        player.pos.y += player.vel.y;
        return None;
    }

    let proposed = player.rect().translated(Vec2::new(0.0, player.vel.y));
    let feet = player.bottom();
    player.on_ground = false;

    for platform in platforms.iter_mut() {
        if proposed.intersects(&platform.rect) && feet <= platform.rect.top() {
            return Some(resolve(player, platform, physics, now));
        }
    }

    player.pos.y = proposed.top();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aabb::Aabb;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), Vec2::new(40.0, 50.0))
    }

    fn platform(id: u32, kind: PlatformKind, x: f32, y: f32) -> Platform {
        Platform::new(id, kind, Aabb::new(x, y, 100.0, 20.0))
    }

    #[test]
    fn test_land_on_normal() {
        let physics = PhysicsConfig::default();
        // Feet at 298, platform top at 300, falling 5 per frame
        let mut player = player_at(130.0, 248.0);
        player.vel.y = 5.0;
        let mut platforms = vec![platform(1, PlatformKind::Normal, 100.0, 300.0)];

        let landing = move_and_collide(&mut player, &mut platforms, &physics, 800.0, 0.0);

        assert_eq!(landing.map(|l| l.effect), Some(LandingEffect::Rest));
        assert_eq!(player.bottom(), 300.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_land_on_trap_triggers() {
        let physics = PhysicsConfig::default();
        let mut player = player_at(130.0, 248.0);
        player.vel.y = 5.0;
        let mut platforms = vec![platform(7, PlatformKind::Trap, 100.0, 300.0)];

        let landing = move_and_collide(&mut player, &mut platforms, &physics, 800.0, 12.5).unwrap();

        assert_eq!(landing.platform_id, 7);
        assert!(landing.triggered);
        assert_eq!(platforms[0].triggered_at, Some(12.5));
        assert!(player.on_ground);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_second_trap_landing_keeps_first_time() {
        let physics = PhysicsConfig::default();
        let mut platforms = vec![platform(7, PlatformKind::Trap, 100.0, 300.0)];
        platforms[0].trigger(1.0);

        let mut player = player_at(130.0, 248.0);
        player.vel.y = 5.0;
        let landing = move_and_collide(&mut player, &mut platforms, &physics, 800.0, 3.0).unwrap();

        assert!(!landing.triggered);
        assert_eq!(platforms[0].triggered_at, Some(1.0));
    }

    #[test]
    fn test_trampoline_launches() {
        let physics = PhysicsConfig::default();
        let mut player = player_at(130.0, 248.0);
        player.vel.y = 5.0;
        let mut platforms = vec![platform(1, PlatformKind::Trampoline, 100.0, 300.0)];

        move_and_collide(&mut player, &mut platforms, &physics, 800.0, 0.0);

        assert_eq!(player.vel.y, -physics.jump_force * 1.5);
        assert_eq!(player.bottom(), 300.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_rising_player_passes_through() {
        let physics = PhysicsConfig::default();
        // Overlapping the platform from below while moving up
        let mut player = player_at(130.0, 290.0);
        player.vel.y = -8.0;
        let mut platforms = vec![platform(1, PlatformKind::Normal, 100.0, 300.0)];

        let landing = move_and_collide(&mut player, &mut platforms, &physics, 800.0, 0.0);

        assert!(landing.is_none());
        assert_eq!(player.pos.y, 282.0);
    }

    #[test]
    fn test_embedded_player_falls_through() {
        let physics = PhysicsConfig::default();
        // Feet already below the platform top
        let mut player = player_at(130.0, 260.0);
        player.vel.y = 2.0;
        let mut platforms = vec![platform(1, PlatformKind::Normal, 100.0, 300.0)];

        let landing = move_and_collide(&mut player, &mut platforms, &physics, 800.0, 0.0);

        assert!(landing.is_none());
        assert_eq!(player.pos.y, 262.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_free_fall_clears_ground() {
        let physics = PhysicsConfig::default();
        let mut player = player_at(500.0, 100.0);
        player.vel.y = 3.0;
        player.on_ground = true;
        let mut platforms = vec![platform(1, PlatformKind::Normal, 100.0, 300.0)];

        move_and_collide(&mut player, &mut platforms, &physics, 800.0, 0.0);

        assert!(!player.on_ground);
        assert_eq!(player.pos.y, 103.0);
    }

    #[test]
    fn test_first_match_in_storage_order() {
        let physics = PhysicsConfig::default();
        let mut player = player_at(130.0, 248.0);
        player.vel.y = 10.0;
        // Both qualify; the first stored one wins even though it is lower
        let mut platforms = vec![
            platform(5, PlatformKind::Trampoline, 100.0, 304.0),
            platform(2, PlatformKind::Normal, 100.0, 300.0),
        ];

        let landing = move_and_collide(&mut player, &mut platforms, &physics, 800.0, 0.0).unwrap();

        assert_eq!(landing.platform_id, 5);
        assert_eq!(player.bottom(), 304.0);
    }

    #[test]
    fn test_horizontal_clamp() {
        let physics = PhysicsConfig::default();
        let mut platforms: Vec<Platform> = Vec::new();

        let mut left = player_at(2.0, 100.0);
        left.vel.x = -4.0;
        move_and_collide(&mut left, &mut platforms, &physics, 800.0, 0.0);
        assert_eq!(left.pos.x, 0.0);

        let mut right = player_at(758.0, 100.0);
        right.vel.x = 4.0;
        move_and_collide(&mut right, &mut platforms, &physics, 800.0, 0.0);
        assert_eq!(right.rect().right(), 800.0);
    }

    #[test]
    fn test_landing_effect_dispatch() {
        let physics = PhysicsConfig::default();
        assert_eq!(PlatformKind::Normal.landing_effect(&physics), LandingEffect::Rest);
        assert_eq!(
            PlatformKind::Trap.landing_effect(&physics),
            LandingEffect::RestAndTrigger
        );
        assert_eq!(
            PlatformKind::Trampoline.landing_effect(&physics),
            LandingEffect::Launch { vy: -15.0 }
        );
    }
}
