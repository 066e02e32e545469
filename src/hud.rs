//! HUD text for the page's score/best/speed sinks

use crate::sim::GameState;

/// Text shown next to the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub best: String,
    pub speed: String,
}

impl Hud {
    pub fn from_state(state: &GameState, start_step_ms: u32) -> Self {
        Self {
            score: state.score.to_string(),
            best: state.best.to_string(),
            speed: speed_multiplier(start_step_ms, state.step_ms),
        }
    }
}

/// Speed relative to the starting pace, e.g. `1.2x`
pub fn speed_multiplier(start_step_ms: u32, step_ms: u32) -> String {
    let ratio = f64::from(start_step_ms) / f64::from(step_ms.max(1));
    format!("{:.1}x", ratio)
}
