//! Stats and status text
//!
//! The display collaborator only ever receives plain strings.

use crate::sim::state::{GamePhase, GameState};

/// Text display surface
pub trait Hud {
    /// Replace the stats line (written every frame)
    fn show_stats(&mut self, text: &str);
    /// Replace the status message (terminal states only)
    fn show_message(&mut self, text: &str);
}

/// Floor a gameplay quantity for display, never below zero
fn display_amount(value: f32) -> u32 {
    value.floor().max(0.0) as u32
}

/// `Lives: 3 | Fuel: 100 | Score: 0`
pub fn stats_line(state: &GameState) -> String {
    format!(
        "Lives: {} | Fuel: {} | Score: {}",
        display_amount(state.lives),
        display_amount(state.fuel),
        state.score
    )
}

/// Message for terminal phases
pub fn status_message(state: &GameState) -> Option<String> {
    match state.phase {
        GamePhase::Playing => None,
        GamePhase::GameOver => Some("GAME OVER - reload to play again".to_string()),
        GamePhase::Complete => Some(format!(
            "ALL LEVELS CLEARED - final score {}",
            state.score
        )),
    }
}

/// Push the current state to the display
pub fn present(state: &GameState, hud: &mut dyn Hud) {
    hud.show_stats(&stats_line(state));
    if let Some(message) = status_message(state) {
        hud.show_message(&message);
    }
}

/// HUD that remembers the last text it was given
#[derive(Debug, Default, Clone)]
pub struct TextHud {
    pub stats: String,
    pub message: Option<String>,
    /// Number of stats refreshes
    pub frames: u64,
}

impl Hud for TextHud {
    fn show_stats(&mut self, text: &str) {
        self.frames += 1;
        if self.stats != text {
            self.stats = text.to_string();
        }
    }

    fn show_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }
}
