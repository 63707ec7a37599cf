//! Player movement integration
//!
//! Velocities are in screen units per frame; the loop runs at a fixed rate so
//! there is no dt scaling.

use super::state::Player;
use super::tick::TickInput;
use crate::config::PhysicsConfig;

/// Accelerate downward by one frame of gravity
pub fn apply_gravity(player: &mut Player, physics: &PhysicsConfig) {
    player.vel.y += physics.gravity;
}

/// Map held keys to velocity.
///
/// Left is applied before right, so right wins when both are held. A jump
/// only starts from the ground and immediately leaves it.
pub fn handle_input(player: &mut Player, input: &TickInput, physics: &PhysicsConfig) {
    player.vel.x = 0.0;
    if input.left {
        player.vel.x = -physics.run_speed;
    }
    if input.right {
        player.vel.x = physics.run_speed;
    }

    if input.jump && player.on_ground {
        player.vel.y = -physics.jump_force;
        player.on_ground = false;
    }
}
