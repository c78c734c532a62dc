//! Tether Thrust - a gravity-bound cave flyer
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, collisions, rules, levels)
//! - `scene`: Rendering collaborator seam
//! - `ui`: Stats/status text collaborator seam
//! - `tuning`: Data-driven game balance
//! - `settings`: Session settings and key bindings

pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::{KeyBindings, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// All speeds and accelerations are per frame; the game runs one
/// simulation step per display refresh.
pub mod consts {
    /// Downward acceleration (flipped by inverse gravity)
    pub const GRAVITY: f32 = 0.005;
    /// Acceleration along the facing direction while thrusting
    pub const THRUST_POWER: f32 = 0.01;
    /// Facing change per frame while a rotate key is held (radians)
    pub const ROTATION_SPEED: f32 = 0.05;
    /// Velocity decay per frame
    pub const FRICTION: f32 = 0.99;
    /// Fuel burned per thrusting frame
    pub const FUEL_CONSUMPTION: f32 = 0.2;

    pub const INITIAL_LIVES: f32 = 3.0;
    pub const MAX_FUEL: f32 = 100.0;

    /// Projectile defaults
    pub const PLAYER_SHOT_SPEED: f32 = 0.3;
    pub const TURRET_SHOT_SPEED: f32 = 0.15;
    pub const SHOT_LIFESPAN: u32 = 60;
    /// Distance from the ship centre to its nose
    pub const SHIP_NOSE_OFFSET: f32 = 0.5;
    /// Distance from a turret base to its muzzle
    pub const TURRET_MUZZLE_OFFSET: f32 = 0.8;

    /// Frames between turret shots
    pub const TURRET_FIRE_INTERVAL: u32 = 120;
    pub const POWER_PLANT_HEALTH: i32 = 3;
    /// Meltdown countdown (10 seconds at 60 FPS)
    pub const MELTDOWN_FRAMES: u32 = 600;
    /// Door auto-close delay (5 seconds at 60 FPS)
    pub const DOOR_CLOSE_FRAMES: u32 = 300;

    pub const FUEL_TANK_REFILL: f32 = 50.0;
    /// Lives lost per overlapping wall per frame
    pub const WALL_DAMAGE: f32 = 0.5;
    /// Velocity multiplier applied on wall contact (reverse and dampen)
    pub const WALL_KNOCKBACK: f32 = -0.5;
    /// Fraction of the remaining distance the capsule closes each frame
    pub const CAPSULE_FOLLOW: f32 = 0.05;

    /// Bounding radius every entity reports; two of them give a contact
    /// distance of 1.0
    pub const CONTACT_RADIUS: f32 = 0.5;

    pub const MELTDOWN_BONUS: u64 = 1000;
    pub const EXIT_BONUS: u64 = 500;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Angle of the vector pointing from `from` to `to`
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-0.5) + 0.5).abs() < 1e-6);
        assert!(normalize_angle(PI) < PI);
    }

    #[test]
    fn test_bearing() {
        assert!((bearing(Vec2::ZERO, Vec2::new(0.0, 2.0)) - PI / 2.0).abs() < 1e-6);
        assert!(bearing(Vec2::new(1.0, 1.0), Vec2::new(3.0, 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, 0.0);
        assert!((p.x - 2.0).abs() < 1e-6 && p.y.abs() < 1e-6);
    }
}
