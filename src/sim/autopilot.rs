//! Demo mode - a simple AI that plays the game
//!
//! Reads the session and produces the input a player would press. It has no
//! memory of its own, so it stays deterministic alongside the simulation.

use super::aabb::Aabb;
use super::state::{GamePhase, GameState, PlatformKind};
use super::tick::TickInput;

/// Fraction of the theoretical jump height the bot relies on
const REACH_FACTOR: f32 = 0.85;
/// Minimum height difference for a platform to count as "above"
const STEP_MIN: f32 = 10.0;

/// Pick this frame's input for the current state
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::WaitingStart => TickInput {
            start: true,
            ..Default::default()
        },
        GamePhase::LevelFrozen => TickInput {
            jump: true,
            ..Default::default()
        },
        GamePhase::LevelRunning => steer(state),
        GamePhase::GameOver | GamePhase::Victory => TickInput::default(),
    }
}

fn steer(state: &GameState) -> TickInput {
    let physics = &state.config.physics;
    let player = state.player.rect();
    let feet = player.bottom();
    let reach = physics.jump_force * physics.jump_force / (2.0 * physics.gravity) * REACH_FACTOR;

    // Standing on a trap that is about to vanish: get off it now.
    // The platform has scrolled since the landing, hence the tolerance.
    let contact_slack = state.level.scroll_speed() + 1.0;
    let on_armed_trap = state.player.on_ground
        && state.level.platforms().iter().any(|p| {
            p.kind == PlatformKind::Trap
                && p.triggered_at.is_some()
                && (p.rect.top() - feet).abs() <= contact_slack
                && p.rect.left() < player.right()
                && player.left() < p.rect.right()
        });

    let goal = state.goal_rect();
    let target = if goal.bottom() >= feet - reach {
        Some(goal)
    } else {
        best_step(state, &player, reach)
    };

    let mut input = TickInput {
        jump: state.player.on_ground && (target.is_some() || on_armed_trap),
        ..Default::default()
    };

    if let Some(target) = target {
        let dx = target.center_x() - player.center_x();
        let deadzone = physics.run_speed;
        input.left = dx < -deadzone;
        input.right = dx > deadzone;
    }

    input
}

/// Closest reachable platform above the player, traps last
fn best_step(state: &GameState, player: &Aabb, reach: f32) -> Option<Aabb> {
    let feet = player.bottom();
    state
        .level
        .platforms()
        .iter()
        .filter(|p| {
            let rise = feet - p.rect.top();
            rise >= STEP_MIN && rise <= reach
        })
        .min_by(|a, b| {
            let key = |p: &super::state::Platform| {
                let trap_penalty = if p.kind == PlatformKind::Trap { 1 } else { 0 };
                (trap_penalty, (p.rect.center_x() - player.center_x()).abs())
            };
            let (ta, da) = key(a);
            let (tb, db) = key(b);
            ta.cmp(&tb)
                .then(da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal))
        })
        .map(|p| p.rect)
}
