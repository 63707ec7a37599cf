//! Host abstraction layer
//!
//! Everything a loop driver supplies to the simulation:
//! - Time (monotonic seconds, sampled once per frame)
//! - Input (one `TickInput` per frame)
//! - Frame pacing

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::sim::{GameState, TickInput, autopilot_input};

/// Source of the per-frame timestamp
pub trait Clock {
    /// Seconds since an arbitrary, fixed origin. Never decreases.
    fn now(&mut self) -> f64;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Simulated clock: each sample returns the current time and then advances by
/// one step. Used for headless runs and replays.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    time: f64,
    step: f64,
}

impl FixedStepClock {
    pub fn new(step: f64) -> Self {
        Self { time: 0.0, step }
    }

    /// Time the next sample will return
    pub fn peek(&self) -> f64 {
        self.time
    }
}

impl Clock for FixedStepClock {
    fn now(&mut self) -> f64 {
        let t = self.time;
        self.time += self.step;
        t
    }
}

/// Source of per-frame input
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Replays a fixed input sequence, then reports quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        self.frames.pop_front().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        })
    }
}

/// Demo player
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        autopilot_input(state)
    }
}

/// Sleeps out the remainder of each frame to hold a target rate
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    deadline: Instant,
}

impl FramePacer {
    pub fn new(rate_hz: u32) -> Self {
        let frame = Duration::from_secs_f64(1.0 / rate_hz.max(1) as f64);
        Self {
            frame,
            deadline: Instant::now() + frame,
        }
    }

    /// Block until the current frame's slot ends.
    ///
    /// If the frame overran, the schedule restarts from now instead of
    /// trying to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.deadline {
            std::thread::sleep(self.deadline - now);
            self.deadline += self.frame;
        } else {
            self.deadline = now + self.frame;
        }
    }
}
