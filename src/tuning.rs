//! Data-driven game balance
//!
//! Every gameplay constant in one serializable record. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("tuning value {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("tuning parse error: {0}")]
    Parse(String),
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship physics ===
    pub gravity: f32,
    pub thrust_power: f32,
    pub rotation_speed: f32,
    /// Velocity decay factor, must be in (0, 1)
    pub friction: f32,
    pub fuel_consumption: f32,

    // === Resources ===
    pub initial_lives: f32,
    pub max_fuel: f32,
    pub fuel_tank_refill: f32,

    // === Projectiles ===
    pub player_shot_speed: f32,
    pub turret_shot_speed: f32,
    pub shot_lifespan: u32,

    // === Level fixtures ===
    pub turret_fire_interval: u32,
    pub power_plant_health: i32,
    pub meltdown_frames: u32,
    pub door_close_frames: u32,
    pub capsule_follow: f32,

    // === Wall contact ===
    pub wall_damage: f32,
    pub wall_knockback: f32,
    /// Frames after a damaging wall contact during which further contact only
    /// knocks back. Zero keeps per-frame damage on sustained contact.
    pub wall_grace_frames: u32,

    // === Scoring ===
    pub meltdown_bonus: u64,
    pub exit_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            thrust_power: THRUST_POWER,
            rotation_speed: ROTATION_SPEED,
            friction: FRICTION,
            fuel_consumption: FUEL_CONSUMPTION,

            initial_lives: INITIAL_LIVES,
            max_fuel: MAX_FUEL,
            fuel_tank_refill: FUEL_TANK_REFILL,

            player_shot_speed: PLAYER_SHOT_SPEED,
            turret_shot_speed: TURRET_SHOT_SPEED,
            shot_lifespan: SHOT_LIFESPAN,

            turret_fire_interval: TURRET_FIRE_INTERVAL,
            power_plant_health: POWER_PLANT_HEALTH,
            meltdown_frames: MELTDOWN_FRAMES,
            door_close_frames: DOOR_CLOSE_FRAMES,
            capsule_follow: CAPSULE_FOLLOW,

            wall_damage: WALL_DAMAGE,
            wall_knockback: WALL_KNOCKBACK,
            wall_grace_frames: 0,

            meltdown_bonus: MELTDOWN_BONUS,
            exit_bonus: EXIT_BONUS,
        }
    }
}

impl Tuning {
    /// Same physics with gravity switched off (useful for isolated thrust tests)
    pub fn zero_gravity() -> Self {
        Self {
            gravity: 0.0,
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(field: &'static str, value: f64, ok: bool) -> Result<(), TuningError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::OutOfRange { field, value })
            }
        }

        check("gravity", self.gravity.into(), self.gravity >= 0.0)?;
        check("thrust_power", self.thrust_power.into(), self.thrust_power >= 0.0)?;
        check("rotation_speed", self.rotation_speed.into(), self.rotation_speed >= 0.0)?;
        check(
            "friction",
            self.friction.into(),
            self.friction > 0.0 && self.friction < 1.0,
        )?;
        check("fuel_consumption", self.fuel_consumption.into(), self.fuel_consumption >= 0.0)?;
        check("initial_lives", self.initial_lives.into(), self.initial_lives > 0.0)?;
        check("max_fuel", self.max_fuel.into(), self.max_fuel > 0.0)?;
        check("fuel_tank_refill", self.fuel_tank_refill.into(), self.fuel_tank_refill >= 0.0)?;
        check("player_shot_speed", self.player_shot_speed.into(), self.player_shot_speed > 0.0)?;
        check("turret_shot_speed", self.turret_shot_speed.into(), self.turret_shot_speed > 0.0)?;
        check("shot_lifespan", self.shot_lifespan.into(), self.shot_lifespan > 0)?;
        check(
            "turret_fire_interval",
            self.turret_fire_interval.into(),
            self.turret_fire_interval > 0,
        )?;
        check(
            "power_plant_health",
            self.power_plant_health.into(),
            self.power_plant_health > 0,
        )?;
        check("meltdown_frames", self.meltdown_frames.into(), self.meltdown_frames > 0)?;
        check("door_close_frames", self.door_close_frames.into(), self.door_close_frames > 0)?;
        check(
            "capsule_follow",
            self.capsule_follow.into(),
            self.capsule_follow > 0.0 && self.capsule_follow <= 1.0,
        )?;
        check("wall_damage", self.wall_damage.into(), self.wall_damage >= 0.0)?;
        check("wall_knockback", self.wall_knockback.into(), self.wall_knockback.abs() <= 1.0)?;
        Ok(())
    }
}
