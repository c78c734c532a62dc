//! The live entity set
//!
//! Exactly one level's worth of entities exists at a time. The ship lives
//! for the whole session; everything else is replaced on level load.

use super::capsule::FuelCapsule;
use super::door::Door;
use super::fixtures::{FuelTank, Wall};
use super::level::Bounds;
use super::plant::PowerPlant;
use super::projectile::{Projectile, Shot};
use super::ship::Ship;
use super::turret::Turret;
use crate::Tuning;
use crate::scene::{IdGen, Scene};

#[derive(Debug, Clone)]
pub struct World {
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub walls: Vec<Wall>,
    pub turrets: Vec<Turret>,
    pub plants: Vec<PowerPlant>,
    pub fuel_tanks: Vec<FuelTank>,
    pub doors: Vec<Door>,
    pub capsule: Option<FuelCapsule>,
    /// Exit bounds of the current level
    pub bounds: Bounds,
    pub ids: IdGen,
}

impl World {
    /// Empty world with a ship that has not been placed in the scene yet
    pub fn new() -> Self {
        let mut ids = IdGen::default();
        let ship = Ship::new(&mut ids);
        Self {
            ship,
            projectiles: Vec::new(),
            walls: Vec::new(),
            turrets: Vec::new(),
            plants: Vec::new(),
            fuel_tanks: Vec::new(),
            doors: Vec::new(),
            capsule: None,
            bounds: Bounds::default(),
            ids,
        }
    }

    /// Tear down every level entity (the ship stays)
    pub fn clear(&mut self, scene: &mut dyn Scene) {
        if let Some(mut capsule) = self.capsule.take() {
            capsule.detach(scene);
            capsule.body.remove_from(scene);
        }
        for wall in self.walls.drain(..) {
            wall.body.remove_from(scene);
        }
        for turret in self.turrets.drain(..) {
            for part in turret.parts() {
                part.remove_from(scene);
            }
        }
        for plant in self.plants.drain(..) {
            plant.body.remove_from(scene);
        }
        for tank in self.fuel_tanks.drain(..) {
            tank.body.remove_from(scene);
        }
        for door in self.doors.drain(..) {
            door.body.remove_from(scene);
        }
        for projectile in self.projectiles.drain(..) {
            projectile.body.remove_from(scene);
        }
    }

    /// Put a new projectile into play
    pub fn fire(&mut self, shot: Shot, tuning: &Tuning, scene: &mut dyn Scene) {
        let projectile = Projectile::new(&mut self.ids, shot, tuning.shot_lifespan);
        projectile.body.add_to(scene);
        self.projectiles.push(projectile);
    }

    /// Remove one projectile from play
    pub fn remove_projectile(&mut self, index: usize, scene: &mut dyn Scene) {
        let projectile = self.projectiles.remove(index);
        projectile.body.remove_from(scene);
    }

    /// Remove one fuel tank from play
    pub fn remove_fuel_tank(&mut self, index: usize, scene: &mut dyn Scene) {
        let tank = self.fuel_tanks.remove(index);
        tank.body.remove_from(scene);
    }

    /// Push every visual's current state to the scene
    pub fn sync(&self, scene: &mut dyn Scene) {
        self.ship.sync(scene);
        if let Some(capsule) = &self.capsule {
            capsule.sync(scene);
        }
        for turret in &self.turrets {
            turret.sync(scene);
        }
        let bodies = self
            .plants
            .iter()
            .map(|p| &p.body)
            .chain(self.doors.iter().map(|d| &d.body))
            .chain(self.projectiles.iter().map(|p| &p.body));
        for body in bodies {
            body.sync(scene);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
