//! Gun turrets

use glam::Vec2;

use super::collision::Collider;
use super::projectile::{Allegiance, Shot};
use super::state::GameState;
use crate::consts::TURRET_MUZZLE_OFFSET;
use crate::scene::{IdGen, Part, Scene, Shape, Visual, palette};
use crate::{Tuning, bearing, polar_to_cartesian};

/// Gun mount point relative to the base
const GUN_OFFSET: Vec2 = Vec2::new(0.5, 0.3);

/// A stationary turret that tracks the ship and fires on a fixed interval
#[derive(Debug, Clone)]
pub struct Turret {
    pub pos: Vec2,
    /// Gun angle (radians)
    pub aim: f32,
    /// Frames since the last shot
    pub fire_counter: u32,
    pub fire_interval: u32,
    pub active: bool,
    pub base: Part,
    pub gun: Part,
}

impl Turret {
    /// `phase` offsets the first shot so turrets don't fire in lockstep
    pub fn new(ids: &mut IdGen, pos: Vec2, fire_interval: u32, phase: u32) -> Self {
        let base = Visual::new(
            Shape::Box {
                width: 1.0,
                height: 0.5,
            },
            pos,
            palette::TURRET_BASE,
        );
        let gun = Visual::new(
            Shape::Box {
                width: 0.8,
                height: 0.3,
            },
            pos + GUN_OFFSET,
            palette::TURRET_GUN,
        );
        Self {
            pos,
            aim: 0.0,
            fire_counter: phase % fire_interval.max(1),
            fire_interval,
            active: true,
            base: Part::new(ids, base),
            gun: Part::new(ids, gun),
        }
    }

    /// Track the ship and fire when the interval elapses
    pub fn update(&mut self, ship_pos: Vec2, state: &GameState, tuning: &Tuning) -> Option<Shot> {
        if !self.active || !state.is_running() {
            return None;
        }

        self.aim = bearing(self.pos, ship_pos);
        self.gun.visual.rotation = self.aim;

        self.fire_counter += 1;
        if self.fire_counter >= self.fire_interval {
            self.fire_counter = 0;
            return Some(self.shoot(tuning));
        }
        None
    }

    /// Hostile shot along the current gun angle
    pub fn shoot(&self, tuning: &Tuning) -> Shot {
        Shot {
            pos: self.pos + polar_to_cartesian(TURRET_MUZZLE_OFFSET, self.aim),
            vel: Vec2::from_angle(self.aim) * tuning.turret_shot_speed,
            allegiance: Allegiance::Hostile,
        }
    }

    /// Shut down for good
    pub fn deactivate(&mut self) {
        if self.active {
            log::debug!("Turret at ({}, {}) offline", self.pos.x, self.pos.y);
        }
        self.active = false;
        self.gun.visual.color = palette::TURRET_DISABLED;
    }

    pub fn parts(&self) -> [&Part; 2] {
        [&self.base, &self.gun]
    }

    pub fn sync(&self, scene: &mut dyn Scene) {
        for part in self.parts() {
            part.sync(scene);
        }
    }
}

impl Collider for Turret {
    fn position(&self) -> Vec2 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn turret(phase: u32) -> Turret {
        Turret::new(&mut IdGen::default(), Vec2::ZERO, 120, phase)
    }

    #[test]
    fn test_fires_on_interval() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning);
        let mut turret = turret(0);
        let ship = Vec2::new(0.0, 5.0);

        let shots: Vec<u32> = (1..=360)
            .filter(|_| turret.update(ship, &state, &tuning).is_some())
            .collect();
        assert_eq!(shots, vec![120, 240, 360]);
    }

    #[test]
    fn test_phase_shifts_first_shot() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning);
        let mut turret = turret(100);
        let first = (1..=120).find(|_| turret.update(Vec2::X, &state, &tuning).is_some());
        assert_eq!(first, Some(20));
    }

    #[test]
    fn test_aims_at_ship() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning);
        let mut turret = turret(119);
        let shot = turret.update(Vec2::new(0.0, 4.0), &state, &tuning).unwrap();
        assert!((turret.aim - FRAC_PI_2).abs() < 1e-6);
        assert!((shot.pos - Vec2::new(0.0, TURRET_MUZZLE_OFFSET)).length() < 1e-5);
        assert!(shot.vel.y > 0.0 && shot.vel.x.abs() < 1e-6);
        assert_eq!(shot.allegiance, Allegiance::Hostile);
    }

    #[test]
    fn test_deactivated_turret_is_silent() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning);
        let mut turret = turret(119);
        turret.deactivate();
        let aim = turret.aim;
        for _ in 0..500 {
            assert!(turret.update(Vec2::new(3.0, 3.0), &state, &tuning).is_none());
        }
        assert!(!turret.active);
        assert_eq!(turret.aim, aim);
        assert_eq!(turret.gun.visual.color, palette::TURRET_DISABLED);
    }

    #[test]
    fn test_silent_after_game_over() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.lose_lives(5.0);
        let mut turret = turret(119);
        assert!(turret.update(Vec2::Y, &state, &tuning).is_none());
    }
}
