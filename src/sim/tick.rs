//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the session deterministically. The
//! caller samples the clock once per frame and passes it in as `now`.

use serde::{Deserialize, Serialize};

use super::collision::{LandingEffect, move_and_collide};
use super::physics::{apply_gravity, handle_input};
use super::state::{GameEvent, GamePhase, GameState};

/// Input state for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump (held)
    pub jump: bool,
    /// Start the game (pressed this frame)
    pub start: bool,
    /// Quit (pressed this frame); handled by the loop driver
    pub quit: bool,
}

impl TickInput {
    /// Any input that wakes up a frozen level
    pub fn is_movement(&self) -> bool {
        self.left || self.right || self.jump
    }
}

/// Phase change caused by input alone, if any
pub fn phase_transition(phase: GamePhase, input: &TickInput) -> Option<GamePhase> {
    match phase {
        GamePhase::WaitingStart if input.start => Some(GamePhase::LevelFrozen),
        GamePhase::LevelFrozen if input.is_movement() => Some(GamePhase::LevelRunning),
        _ => None,
    }
}

/// Advance the session by one frame.
///
/// Returns the events produced during the frame.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if let Some(next) = phase_transition(state.phase, input) {
        state.phase = next;
        state.level_start = now;
        match next {
            GamePhase::LevelFrozen => {
                log::info!("Level {} ready", state.level_index);
                events.push(GameEvent::LevelReady {
                    level: state.level_index,
                });
            }
            GamePhase::LevelRunning => {
                log::info!("Level {} running", state.level_index);
                events.push(GameEvent::LevelStarted {
                    level: state.level_index,
                });
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::LevelFrozen => {
            // Input is sampled but nothing moves until the level runs
            handle_input(&mut state.player, input, &state.config.physics);
        }
        GamePhase::LevelRunning => run_frame(state, input, now, &mut events),
        GamePhase::WaitingStart | GamePhase::GameOver | GamePhase::Victory => {}
    }

    events
}

/// Full simulation pipeline for a running level
fn run_frame(state: &mut GameState, input: &TickInput, now: f64, events: &mut Vec<GameEvent>) {
    state.frame += 1;

    let physics = &state.config.physics;
    handle_input(&mut state.player, input, physics);
    apply_gravity(&mut state.player, physics);

    let landing = move_and_collide(
        &mut state.player,
        state.level.platforms_mut(),
        physics,
        state.config.screen.width,
        now,
    );
    if let Some(landing) = landing {
        let platform_id = landing.platform_id;
        match landing.effect {
            LandingEffect::Launch { .. } => {
                events.push(GameEvent::TrampolineBounce { platform_id });
            }
            LandingEffect::Rest | LandingEffect::RestAndTrigger => {
                events.push(GameEvent::Landed { platform_id });
            }
        }
        if landing.triggered {
            log::debug!("Trap {} triggered at {:.2}", platform_id, now);
            events.push(GameEvent::TrapTriggered { platform_id });
        }
    }

    let report = state.level.update(now);
    events.extend(
        report
            .expired
            .into_iter()
            .map(|platform_id| GameEvent::TrapExpired { platform_id }),
    );

    // Fell out through the bottom of the screen
    if state.player.pos.y > state.config.screen.height {
        lose_life(state, now, events);
    }

    if state.phase == GamePhase::LevelRunning
        && state.player.rect().intersects(&state.goal_rect())
    {
        advance_level(state, now, events);
    }
}

/// Take a life; respawn on the same level or end the game
pub fn lose_life(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        let time = now - state.level_start;
        state.level_times.push(time);
        state.phase = GamePhase::GameOver;
        log::info!("Game over on level {} after {:.2}s", state.level_index, time);
        events.push(GameEvent::GameOver);
    } else {
        state.respawn_player();
        state.phase = GamePhase::LevelFrozen;
        state.level_start = now;
        log::debug!("Life lost, {} left, respawned", state.lives);
    }
}

/// Record the level time and move on to the next level or to victory
pub fn advance_level(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    let time = now - state.level_start;
    state.level_times.push(time);
    events.push(GameEvent::LevelCompleted {
        level: state.level_index,
        time,
    });
    log::info!("Level {} completed in {:.2}s", state.level_index, time);

    if state.is_final_level() {
        state.phase = GamePhase::Victory;
        log::info!("Victory! Times: {:?}", state.level_times);
        events.push(GameEvent::Victory);
        return;
    }

    let next = state.level_index + 1;
    state.load_level(next);
    state.lives = state.config.initial_lives;
    state.phase = GamePhase::LevelFrozen;
    state.level_start = now;
    events.push(GameEvent::LevelReady { level: next });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::aabb::Aabb;
    use crate::sim::state::PlatformKind;
    use glam::Vec2;

    const START: TickInput = TickInput {
        left: false,
        right: false,
        jump: false,
        start: true,
        quit: false,
    };
    const JUMP: TickInput = TickInput {
        left: false,
        right: false,
        jump: true,
        start: false,
        quit: false,
    };
    const IDLE: TickInput = TickInput {
        left: false,
        right: false,
        jump: false,
        start: false,
        quit: false,
    };

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed).unwrap();
        tick(&mut state, &START, 0.0);
        state.phase = GamePhase::LevelRunning;
        state
    }

    #[test]
    fn test_phase_transition_table() {
        assert_eq!(
            phase_transition(GamePhase::WaitingStart, &START),
            Some(GamePhase::LevelFrozen)
        );
        assert_eq!(phase_transition(GamePhase::WaitingStart, &JUMP), None);
        assert_eq!(
            phase_transition(GamePhase::LevelFrozen, &JUMP),
            Some(GamePhase::LevelRunning)
        );
        assert_eq!(phase_transition(GamePhase::LevelFrozen, &START), None);
        assert_eq!(phase_transition(GamePhase::LevelRunning, &JUMP), None);
        assert_eq!(phase_transition(GamePhase::GameOver, &START), None);
        assert_eq!(phase_transition(GamePhase::Victory, &START), None);
    }

    #[test]
    fn test_waiting_to_frozen() {
        let mut state = GameState::new(1).unwrap();

        let events = tick(&mut state, &IDLE, 1.0);
        assert_eq!(state.phase, GamePhase::WaitingStart);
        assert!(events.is_empty());

        let events = tick(&mut state, &START, 2.0);
        assert_eq!(state.phase, GamePhase::LevelFrozen);
        assert_eq!(state.level_start, 2.0);
        assert_eq!(events, vec![GameEvent::LevelReady { level: 1 }]);
    }

    #[test]
    fn test_frozen_does_not_move() {
        let mut state = GameState::new(1).unwrap();
        tick(&mut state, &START, 0.0);
        let pos = state.player.pos;
        let platforms = state.level.platforms().to_vec();

        for i in 0..30 {
            tick(&mut state, &IDLE, i as f64 * FRAME_DT);
        }

        assert_eq!(state.phase, GamePhase::LevelFrozen);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.level.platforms(), platforms.as_slice());
        assert_eq!(state.level_elapsed(10.0), 0.0);
    }

    #[test]
    fn test_grounded_jump_starts_level() {
        let mut state = GameState::new(1).unwrap();
        tick(&mut state, &START, 0.0);
        state.player.on_ground = true;
        let y = state.player.pos.y;

        let events = tick(&mut state, &JUMP, 3.0);

        assert_eq!(state.phase, GamePhase::LevelRunning);
        assert_eq!(state.level_start, 3.0);
        assert!(events.contains(&GameEvent::LevelStarted { level: 1 }));
        // Jump impulse, then one frame of gravity
        assert_eq!(state.player.vel.y, -JUMP_FORCE + GRAVITY);
        assert!(state.player.pos.y < y);
        assert!(!state.player.on_ground);
    }

    #[test]
    fn test_falling_player_lands() {
        let mut state = running_state(3);
        state.level.remove_platforms(|_| true);
        let id = state
            .level
            .insert_platform(PlatformKind::Normal, Aabb::new(300.0, 300.0, 100.0, 20.0));
        state.player.reset_position(Vec2::new(330.0, 248.0));
        state.player.vel.y = 4.0;

        let physics = state.config.physics.clone();
        let landing = move_and_collide(
            &mut state.player,
            state.level.platforms_mut(),
            &physics,
            SCREEN_WIDTH,
            0.0,
        );

        assert_eq!(landing.map(|l| l.platform_id), Some(id));
        assert_eq!(state.player.bottom(), 300.0);
        assert_eq!(state.player.vel.y, 0.0);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_trampoline_event() {
        let mut state = running_state(3);
        state.level.remove_platforms(|_| true);
        // Keep the level topped up with far-away platforms first in order
        state.level.top_up();
        let id = state.level.insert_platform(
            PlatformKind::Trampoline,
            Aabb::new(600.0, 400.0, 100.0, 20.0),
        );
        state.player.reset_position(Vec2::new(630.0, 347.0));
        state.player.vel.y = 3.0;

        let events = tick(&mut state, &IDLE, 1.0);

        assert!(events.contains(&GameEvent::TrampolineBounce { platform_id: id }));
        assert_eq!(state.player.vel.y, -JUMP_FORCE * TRAMPOLINE_FACTOR);
        assert!(!state.player.on_ground);
    }

    #[test]
    fn test_fall_out_costs_one_life() {
        let mut state = running_state(4);
        state.player.reset_position(Vec2::new(10.0, SCREEN_HEIGHT + 5.0));

        let events = tick(&mut state, &IDLE, 5.0);

        let lost = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
            .count();
        assert_eq!(lost, 1);
        assert_eq!(state.lives, INITIAL_LIVES - 1);
        assert_eq!(state.phase, GamePhase::LevelFrozen);
        assert_eq!(state.level_start, 5.0);
        assert_eq!(state.player.pos, state.level.safe_spawn_position());
        assert_eq!(state.player.vel, Vec2::ZERO);

        // Frozen again: further ticks don't cost more lives
        let events = tick(&mut state, &IDLE, 6.0);
        assert!(events.is_empty());
        assert_eq!(state.lives, INITIAL_LIVES - 1);
    }

    #[test]
    fn test_respawn_keeps_level() {
        let mut state = running_state(4);
        let ids_before: Vec<u32> = state.level.platforms().iter().map(|p| p.id).collect();
        state.player.reset_position(Vec2::new(10.0, SCREEN_HEIGHT + 5.0));
        state.level.scroll(); // tick scrolls too; ids survive either way

        tick(&mut state, &IDLE, 1.0);

        let ids_after: Vec<u32> = state.level.platforms().iter().map(|p| p.id).collect();
        assert_eq!(state.level.index(), 1);
        assert!(ids_before.iter().any(|id| ids_after.contains(id)));
    }

    #[test]
    fn test_exhausting_lives_is_game_over() {
        let mut state = running_state(4);
        for i in 0..INITIAL_LIVES {
            state.phase = GamePhase::LevelRunning;
            state.level_start = i as f64 * 10.0;
            state.player.reset_position(Vec2::new(10.0, SCREEN_HEIGHT + 5.0));
            tick(&mut state, &IDLE, i as f64 * 10.0 + 4.0);
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.is_game_over());
        assert_eq!(state.lives, 0);
        assert_eq!(state.level_times.len(), 1);
        assert!((state.level_times[0] - 4.0).abs() < 1e-9);

        // Terminal: ticks do nothing
        let events = tick(&mut state, &START, 100.0);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_goal_advances_level() {
        let mut state = running_state(8);
        state.lives = 1;
        state.level_start = 2.0;
        let goal = state.goal_rect();
        state.player.reset_position(goal.pos);

        let events = tick(&mut state, &IDLE, 12.0);

        assert!(events.contains(&GameEvent::LevelCompleted { level: 1, time: 10.0 }));
        assert_eq!(state.level_index, 2);
        assert_eq!(state.level.index(), 2);
        assert_eq!(state.level.scroll_speed(), SCROLL_SPEED + SCROLL_SPEED_PER_LEVEL);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.phase, GamePhase::LevelFrozen);
        assert_eq!(state.level_start, 12.0);
        assert_eq!(state.player.pos, state.level.safe_spawn_position());
        assert_eq!(state.level_times, vec![10.0]);
    }

    #[test]
    fn test_final_goal_is_victory() {
        let mut state = running_state(8);
        for level in 1..=MAX_LEVEL {
            assert_eq!(state.level_index, level);
            state.phase = GamePhase::LevelRunning;
            let goal = state.goal_rect();
            state.player.reset_position(goal.pos);
            tick(&mut state, &IDLE, level as f64);
        }

        assert_eq!(state.phase, GamePhase::Victory);
        assert!(state.is_game_over());
        assert_eq!(state.level_times.len(), MAX_LEVEL as usize);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999).unwrap();
        let mut state2 = GameState::new(99999).unwrap();

        let inputs = [
            START,
            JUMP,
            TickInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            IDLE,
        ];

        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            let now = frame as f64 * FRAME_DT;
            let e1 = tick(&mut state1, input, now);
            let e2 = tick(&mut state2, input, now);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.level.platforms(), state2.level.platforms());
    }
}
