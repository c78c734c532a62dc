//! Game state record
//!
//! Lives, fuel, score and the level/environment flags. Every step of the
//! frame loop reads and writes this record, so it is passed explicitly.

use serde::{Deserialize, Serialize};

use crate::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Out of lives; simulation frozen
    GameOver,
    /// Ran past the last level in the catalog; simulation frozen
    Complete,
}

/// Session-wide game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Fractional: wall grazes cost half a life
    pub lives: f32,
    /// 0..=max_fuel
    pub fuel: f32,
    pub score: u64,
    /// Current 1-based level
    pub level: u32,
    pub phase: GamePhase,
    pub level_complete: bool,
    pub capsule_attached: bool,
    pub inverse_gravity: bool,
    pub invisible_walls: bool,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lives: tuning.initial_lives,
            fuel: tuning.max_fuel,
            score: 0,
            level: 1,
            phase: GamePhase::Playing,
            level_complete: false,
            capsule_attached: false,
            inverse_gravity: false,
            invisible_walls: false,
        }
    }

    /// True while gameplay updates should run
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Deduct lives; running out ends the game
    pub fn lose_lives(&mut self, amount: f32) {
        self.lives -= amount;
        if self.lives <= 0.0 && self.phase == GamePhase::Playing {
            log::info!("Game over (score {})", self.score);
            self.phase = GamePhase::GameOver;
        }
    }

    /// Add fuel up to `max`
    pub fn refuel(&mut self, amount: f32, max: f32) {
        self.fuel = (self.fuel + amount).min(max);
    }

    /// Burn fuel, never below zero
    pub fn burn_fuel(&mut self, amount: f32) {
        self.fuel = (self.fuel - amount).max(0.0);
    }

    pub fn award(&mut self, points: u64) {
        self.score += points;
    }
}
