//! Render boundary
//!
//! The core never draws. Once per frame the driver captures a `RenderFrame`
//! and hands it to whatever `RenderSink` it was given.

use std::io::Write;

use serde::Serialize;

use crate::error::SinkError;
use crate::sim::{Aabb, GamePhase, GameState, PlatformKind};

/// One platform as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformView {
    pub id: u32,
    pub kind: PlatformKind,
    pub rect: Aabb,
    /// A trap that has started to decay
    pub triggered: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub frame: u64,
    pub phase: GamePhase,
    pub platforms: Vec<PlatformView>,
    pub player: Aabb,
    pub goal: Aabb,
    pub lives: u32,
    pub level: u32,
    pub max_level: u32,
    /// Seconds on the level clock, zero unless running
    pub elapsed: f64,
    /// Recorded level times, only filled in once the session has ended
    pub level_times: Vec<f64>,
}

impl RenderFrame {
    pub fn capture(state: &GameState, now: f64) -> Self {
        let platforms = state
            .level
            .platforms()
            .iter()
            .map(|p| PlatformView {
                id: p.id,
                kind: p.kind,
                rect: p.rect,
                triggered: p.triggered_at.is_some(),
            })
            .collect();

        let level_times = if state.is_game_over() {
            state.level_times.clone()
        } else {
            Vec::new()
        };

        Self {
            frame: state.frame,
            phase: state.phase,
            platforms,
            player: state.player.rect(),
            goal: state.goal_rect(),
            lives: state.lives,
            level: state.level_index,
            max_level: state.config.max_level,
            elapsed: state.level_elapsed(now),
            level_times,
        }
    }
}

/// Consumer of rendered frames
pub trait RenderSink {
    fn submit(&mut self, frame: &RenderFrame) -> Result<(), SinkError>;

    /// Called once after the last frame
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn submit(&mut self, _frame: &RenderFrame) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes one JSON object per frame, one per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn frames_written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn submit(&mut self, frame: &RenderFrame) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}
