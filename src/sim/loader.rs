//! Level loading
//!
//! Replaces the live entity set with a fresh one built from the catalog.

use rand::Rng;

use super::capsule::FuelCapsule;
use super::door::Door;
use super::fixtures::{FuelTank, Wall};
use super::game::Game;
use super::level::LevelError;
use super::plant::PowerPlant;
use super::turret::Turret;
use crate::scene::Scene;

impl Game {
    /// Tear down the current level and build level `index` (1-based)
    ///
    /// The definition is looked up before anything is torn down: on error the
    /// current level is left exactly as it was.
    pub fn load_level(&mut self, index: u32, scene: &mut dyn Scene) -> Result<(), LevelError> {
        let def = self.catalog.get_level(index)?.clone();

        self.world.clear(scene);

        self.state.level = index;
        self.state.inverse_gravity = def.inverse_gravity;
        self.state.invisible_walls = def.invisible_walls;
        self.state.capsule_attached = false;

        let world = &mut self.world;
        let tuning = &self.tuning;
        world.ship.reset(def.player_start.pos());
        world.bounds = def.bounds;

        let walls_visible = !def.invisible_walls;
        for block in &def.walls {
            let wall = Wall::new(&mut world.ids, block.pos(), block.size(), walls_visible);
            wall.body.add_to(scene);
            world.walls.push(wall);
        }

        for spawn in &def.turrets {
            let phase = self.rng.random_range(0..tuning.turret_fire_interval);
            let turret = Turret::new(
                &mut world.ids,
                spawn.pos(),
                tuning.turret_fire_interval,
                phase,
            );
            for part in turret.parts() {
                part.add_to(scene);
            }
            world.turrets.push(turret);
        }

        for spawn in &def.power_plants {
            let plant = PowerPlant::new(
                &mut world.ids,
                spawn.pos(),
                tuning.power_plant_health,
                tuning.meltdown_frames,
            );
            plant.body.add_to(scene);
            world.plants.push(plant);
        }

        for spawn in &def.fuel_tanks {
            let tank = FuelTank::new(&mut world.ids, spawn.pos());
            tank.body.add_to(scene);
            world.fuel_tanks.push(tank);
        }

        for block in &def.doors {
            let door = Door::new(
                &mut world.ids,
                block.pos(),
                block.size(),
                tuning.door_close_frames,
            );
            door.body.add_to(scene);
            world.doors.push(door);
        }

        let capsule = FuelCapsule::new(
            &mut world.ids,
            def.fuel_capsule.pos(),
            tuning.capsule_follow,
        );
        capsule.body.add_to(scene);
        world.capsule = Some(capsule);

        log::info!(
            "Loaded level {} ({} walls, {} turrets, {} plants{}{})",
            index,
            world.walls.len(),
            world.turrets.len(),
            world.plants.len(),
            if def.inverse_gravity { ", inverse gravity" } else { "" },
            if def.invisible_walls { ", invisible walls" } else { "" },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneMirror, palette};
    use crate::sim::level::LevelCatalog;
    use crate::{Settings, Tuning};
    use glam::Vec2;

    fn settings() -> Settings {
        Settings {
            seed: Some(42),
            ..Settings::default()
        }
    }

    fn new_game(scene: &mut SceneMirror) -> Game {
        Game::new(LevelCatalog::builtin(), Tuning::default(), &settings(), scene).unwrap()
    }

    #[test]
    fn test_first_level_is_built() {
        let mut scene = SceneMirror::new();
        let game = new_game(&mut scene);
        let world = &game.world;

        assert_eq!(game.state.level, 1);
        assert_eq!(world.walls.len(), 6);
        assert_eq!(world.turrets.len(), 2);
        assert_eq!(world.plants.len(), 1);
        assert_eq!(world.fuel_tanks.len(), 1);
        assert_eq!(world.doors.len(), 1);
        assert!(world.capsule.is_some());
        assert_eq!(world.ship.pos, Vec2::new(-13.0, 8.0));
        assert_eq!(world.ship.vel, Vec2::ZERO);
        // 3 ship parts + 6 walls + 2x2 turret parts + plant + tank + door + capsule
        assert_eq!(scene.len(), 3 + 6 + 4 + 1 + 1 + 1 + 1);
        for turret in &world.turrets {
            assert!(turret.fire_counter < turret.fire_interval);
        }
    }

    #[test]
    fn test_reload_discards_previous_entities() {
        let mut scene = SceneMirror::new();
        let mut game = new_game(&mut scene);
        let live = scene.len();

        game.world.ship.vel = Vec2::new(0.3, 0.3);
        game.world.capsule.as_mut().unwrap().attach();
        game.world
            .capsule
            .as_mut()
            .unwrap()
            .ensure_tether(&mut game.world.ids, &mut scene);
        game.state.capsule_attached = true;

        game.load_level(2, &mut scene).unwrap();
        assert_eq!(scene.len(), live);
        assert_eq!(game.world.walls.len(), 6);
        assert!(!game.world.capsule.as_ref().unwrap().attached);
        assert!(!game.state.capsule_attached);
        assert!(game.state.inverse_gravity);
        assert_eq!(game.world.ship.vel, Vec2::ZERO);
        assert_eq!(game.world.ship.pos, Vec2::new(-13.0, -8.0));
    }

    #[test]
    fn test_invisible_walls_still_exist() {
        let mut scene = SceneMirror::new();
        let mut game = new_game(&mut scene);
        game.load_level(3, &mut scene).unwrap();
        assert!(game.state.invisible_walls);
        assert_eq!(game.world.walls.len(), 6);
        for wall in &game.world.walls {
            assert!(!scene.get(wall.body.id).unwrap().visible);
            assert_eq!(wall.body.visual.color, palette::WALL);
        }
    }

    #[test]
    fn test_missing_level_leaves_current_level_intact() {
        let mut scene = SceneMirror::new();
        let mut game = new_game(&mut scene);
        let live = scene.len();

        let err = game.load_level(9, &mut scene).unwrap_err();
        assert_eq!(
            err,
            LevelError::NotFound {
                index: 9,
                available: 3
            }
        );
        assert_eq!(game.state.level, 1);
        assert_eq!(game.world.walls.len(), 6);
        assert_eq!(scene.len(), live);
    }

    #[test]
    fn test_same_seed_same_turret_phases() {
        let mut scene = SceneMirror::new();
        let a = new_game(&mut scene);
        let b = new_game(&mut scene);
        let phases = |g: &Game| g.world.turrets.iter().map(|t| t.fire_counter).collect::<Vec<_>>();
        assert_eq!(phases(&a), phases(&b));
    }
}
