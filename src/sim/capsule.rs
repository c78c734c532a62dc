//! The fuel capsule and its tractor-beam tether

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::collision::Collider;
use crate::scene::{IdGen, Part, Scene, Shape, Visual, palette};

/// Model length of the tether cylinder; scaled to span the gap
const TETHER_LENGTH: f32 = 5.0;

/// The capsule the ship has to tow out of the level
#[derive(Debug, Clone)]
pub struct FuelCapsule {
    pub pos: Vec2,
    pub attached: bool,
    /// Fraction of the gap closed per frame
    pub follow: f32,
    pub body: Part,
    /// Beam visual; exists only while attached
    pub tether: Option<Part>,
}

impl FuelCapsule {
    pub fn new(ids: &mut IdGen, pos: Vec2, follow: f32) -> Self {
        let visual = Visual::new(
            Shape::Cylinder {
                radius: 0.3,
                height: 0.8,
            },
            pos,
            palette::CAPSULE,
        )
        .rotated(FRAC_PI_2);
        Self {
            pos,
            attached: false,
            follow,
            body: Part::new(ids, visual),
            tether: None,
        }
    }

    pub fn attach(&mut self) {
        if !self.attached {
            log::info!("Capsule locked on");
        }
        self.attached = true;
    }

    /// Create the tether visual if attached and not shown yet
    pub fn ensure_tether(&mut self, ids: &mut IdGen, scene: &mut dyn Scene) {
        if self.attached && self.tether.is_none() {
            let visual = Visual::new(
                Shape::Cylinder {
                    radius: 0.05,
                    height: TETHER_LENGTH,
                },
                self.pos,
                palette::TETHER,
            );
            let tether = Part::new(ids, visual);
            tether.add_to(scene);
            self.tether = Some(tether);
        }
    }

    /// Trail the ship and stretch the tether between the two
    pub fn update(&mut self, ship_pos: Vec2) {
        if !self.attached {
            return;
        }

        let delta = ship_pos - self.pos;
        let distance = delta.length();

        if let Some(tether) = self.tether.as_mut() {
            let beam = &mut tether.visual;
            beam.position = (ship_pos + self.pos) / 2.0;
            beam.scale = Vec2::new(1.0, distance / TETHER_LENGTH);
            beam.rotation = delta.y.atan2(delta.x) - FRAC_PI_2;
        }

        self.pos += delta * self.follow;
        self.body.visual.position = self.pos;
    }

    pub fn detach(&mut self, scene: &mut dyn Scene) {
        self.attached = false;
        if let Some(tether) = self.tether.take() {
            tether.remove_from(scene);
        }
    }

    pub fn sync(&self, scene: &mut dyn Scene) {
        self.body.sync(scene);
        if let Some(tether) = &self.tether {
            tether.sync(scene);
        }
    }
}

impl Collider for FuelCapsule {
    fn position(&self) -> Vec2 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneMirror;

    fn capsule() -> (FuelCapsule, IdGen) {
        let mut ids = IdGen::default();
        let capsule = FuelCapsule::new(&mut ids, Vec2::ZERO, 0.05);
        (capsule, ids)
    }

    #[test]
    fn test_idle_until_attached() {
        let (mut capsule, _) = capsule();
        capsule.update(Vec2::new(10.0, 0.0));
        assert_eq!(capsule.pos, Vec2::ZERO);
    }

    #[test]
    fn test_follows_with_lag() {
        let (mut capsule, _) = capsule();
        capsule.attach();
        let ship = Vec2::new(10.0, 0.0);
        capsule.update(ship);
        assert!((capsule.pos.x - 0.5).abs() < 1e-6);

        let mut last_gap = ship.distance(capsule.pos);
        for _ in 0..50 {
            capsule.update(ship);
            let gap = ship.distance(capsule.pos);
            assert!(gap < last_gap && gap > 0.0);
            last_gap = gap;
        }
    }

    #[test]
    fn test_tether_spans_ship_and_capsule() {
        let (mut capsule, mut ids) = capsule();
        let mut scene = SceneMirror::new();
        capsule.ensure_tether(&mut ids, &mut scene);
        assert!(capsule.tether.is_none());

        capsule.attach();
        capsule.ensure_tether(&mut ids, &mut scene);
        capsule.ensure_tether(&mut ids, &mut scene);
        assert_eq!(scene.len(), 1);

        capsule.update(Vec2::new(0.0, 5.0));
        let beam = &capsule.tether.as_ref().unwrap().visual;
        assert!((beam.position - Vec2::new(0.0, 2.5)).length() < 1e-6);
        assert!((beam.scale.y - 1.0).abs() < 1e-6);
        assert!(beam.rotation.abs() < 1e-6);

        capsule.detach(&mut scene);
        assert!(!capsule.attached);
        assert!(capsule.tether.is_none());
        assert!(scene.is_empty());
    }
}
