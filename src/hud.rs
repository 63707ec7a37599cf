//! HUD and results screen text
//!
//! Pure formatting over a `RenderFrame`; the renderer decides where to put it.

use crate::render::RenderFrame;
use crate::sim::GamePhase;

/// Format seconds as `mm:ss.cc`, truncating
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let centis = ((seconds.fract() * 100.0).floor() as u64).min(99);
    format!("{:02}:{:02}.{:02}", minutes, secs, centis)
}

/// Top-left status block
pub fn hud_lines(frame: &RenderFrame) -> [String; 3] {
    [
        format!("Lives: {}", frame.lives),
        format!("Level: {}/{}", frame.level, frame.max_level),
        format!("Time: {}", format_time(frame.elapsed)),
    ]
}

/// Centered message for the current phase, if any
pub fn banner(frame: &RenderFrame) -> Option<String> {
    match frame.phase {
        GamePhase::WaitingStart => Some("Press SPACE to start".to_string()),
        GamePhase::LevelFrozen => Some("Press an arrow key or UP to start the level".to_string()),
        GamePhase::LevelRunning => None,
        GamePhase::GameOver => Some("Game Over".to_string()),
        GamePhase::Victory => Some(format!(
            "Well done! You finished all {} levels!",
            frame.max_level
        )),
    }
}

/// One line per recorded level time
pub fn results_lines(level_times: &[f64]) -> Vec<String> {
    level_times
        .iter()
        .enumerate()
        .map(|(i, t)| format!("Level {}: {}", i + 1, format_time(*t)))
        .collect()
}

/// Every line of text shown for this frame, top to bottom
pub fn screen_text(frame: &RenderFrame) -> Vec<String> {
    let mut lines = Vec::new();
    if frame.phase.is_game_over() {
        lines.extend(banner(frame));
        lines.extend(results_lines(&frame.level_times));
        lines.push("Press ESC to quit".to_string());
        return lines;
    }

    if frame.phase != GamePhase::WaitingStart {
        lines.extend(hud_lines(frame));
    }
    lines.extend(banner(frame));
    lines
}
