//! Power plants
//!
//! Three hits start a meltdown. The meltdown cannot be stopped; when its
//! countdown runs out the level ends.

use glam::Vec2;

use super::collision::Collider;
use crate::scene::{IdGen, Part, Shape, Visual, palette};

/// Pulse phase advance per meltdown frame (radians)
const PULSE_RATE: f32 = 0.167;
/// Pulse amplitude as a fraction of normal size
const PULSE_AMPLITUDE: f32 = 0.1;

/// Outcome of a projectile hitting a plant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantHit {
    /// Took damage, still running
    Damaged { health: i32 },
    /// This hit started the meltdown
    MeltdownStarted,
    /// Already melting down; nothing changes
    AlreadyMelting,
}

#[derive(Debug, Clone)]
pub struct PowerPlant {
    pub pos: Vec2,
    pub health: i32,
    pub meltdown: bool,
    /// Frames until the meltdown completes
    pub meltdown_timer: u32,
    meltdown_frames: u32,
    pub body: Part,
}

impl PowerPlant {
    pub fn new(ids: &mut IdGen, pos: Vec2, health: i32, meltdown_frames: u32) -> Self {
        let visual = Visual::new(
            Shape::Box {
                width: 1.5,
                height: 1.5,
            },
            pos,
            palette::PLANT,
        );
        Self {
            pos,
            health,
            meltdown: false,
            meltdown_timer: meltdown_frames,
            meltdown_frames,
            body: Part::new(ids, visual),
        }
    }

    pub fn hit(&mut self) -> PlantHit {
        if self.meltdown {
            return PlantHit::AlreadyMelting;
        }

        self.health -= 1;
        if self.health <= 0 {
            self.start_meltdown();
            return PlantHit::MeltdownStarted;
        }

        self.body.visual.color = match self.health {
            2 => palette::PLANT_WARNING,
            1 => palette::PLANT_CRITICAL,
            _ => self.body.visual.color,
        };
        PlantHit::Damaged {
            health: self.health,
        }
    }

    fn start_meltdown(&mut self) {
        log::info!("Power plant at ({}, {}) melting down", self.pos.x, self.pos.y);
        self.meltdown = true;
        self.body.visual.color = palette::PLANT_MELTDOWN;
    }

    /// Count the meltdown down; true on the frame it completes
    pub fn update(&mut self) -> bool {
        if !self.meltdown || self.meltdown_timer == 0 {
            return false;
        }

        self.meltdown_timer -= 1;

        let elapsed = (self.meltdown_frames - self.meltdown_timer) as f32;
        let scale = 1.0 + PULSE_AMPLITUDE * (elapsed * PULSE_RATE).sin();
        self.body.visual.scale = Vec2::splat(scale);

        self.meltdown_timer == 0
    }
}

impl Collider for PowerPlant {
    fn position(&self) -> Vec2 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plant() -> PowerPlant {
        PowerPlant::new(&mut IdGen::default(), Vec2::ZERO, 3, 600)
    }

    #[test]
    fn test_three_hits_melt_down() {
        let mut plant = plant();
        assert_eq!(plant.hit(), PlantHit::Damaged { health: 2 });
        assert_eq!(plant.body.visual.color, palette::PLANT_WARNING);
        assert!(!plant.meltdown);
        assert_eq!(plant.hit(), PlantHit::Damaged { health: 1 });
        assert_eq!(plant.body.visual.color, palette::PLANT_CRITICAL);
        assert!(!plant.meltdown);
        assert_eq!(plant.hit(), PlantHit::MeltdownStarted);
        assert!(plant.meltdown);
        assert_eq!(plant.body.visual.color, palette::PLANT_MELTDOWN);
    }

    #[test]
    fn test_meltdown_countdown() {
        let mut plant = plant();
        assert!(!plant.update());
        for _ in 0..3 {
            plant.hit();
        }
        for _ in 0..599 {
            assert!(!plant.update());
        }
        assert!(plant.update());
        // Completion is reported once
        assert!(!plant.update());
        assert!(plant.meltdown);
    }

    #[test]
    fn test_meltdown_pulses() {
        let mut plant = plant();
        for _ in 0..3 {
            plant.hit();
        }
        plant.update();
        plant.update();
        assert_ne!(plant.body.visual.scale, Vec2::ONE);
    }

    proptest! {
        #[test]
        fn prop_health_drops_by_one_until_meltdown_once(hits in 1usize..20) {
            let mut plant = plant();
            let mut started = 0;
            for i in 0..hits {
                let before = plant.health;
                match plant.hit() {
                    PlantHit::Damaged { health } => {
                        prop_assert_eq!(health, before - 1);
                        prop_assert!(!plant.meltdown);
                    }
                    PlantHit::MeltdownStarted => {
                        started += 1;
                        prop_assert_eq!(i, 2);
                        prop_assert_eq!(plant.health, 0);
                    }
                    PlantHit::AlreadyMelting => {
                        prop_assert!(i > 2);
                        prop_assert_eq!(plant.health, before);
                    }
                }
            }
            prop_assert_eq!(started, usize::from(hits >= 3));
            prop_assert_eq!(plant.meltdown, hits >= 3);
        }
    }
}
