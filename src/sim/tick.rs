//! Per-frame game loop
//!
//! One call to [`tick`] runs a whole frame to completion. The order of the
//! steps matters: a turret that fires this frame has already fired by the
//! time a meltdown started by this frame's projectiles shuts it down.

use super::collision::{Collider, collides, contacts, touches_any};
use super::game::Game;
use super::input::TickInput;
use super::level::LevelError;
use super::state::GamePhase;
use crate::scene::Scene;
use crate::ui::{self, Hud};

/// Advance the game by one frame and redraw
pub fn tick(game: &mut Game, scene: &mut dyn Scene, hud: &mut dyn Hud) {
    if game.state.is_running() {
        let input = game.controls.sample();
        step(game, &input, scene);
    }

    game.world.sync(scene);
    ui::present(&game.state, hud);
}

/// Run one frame of gameplay with the given input
pub fn step(game: &mut Game, input: &TickInput, scene: &mut dyn Scene) {
    if !game.state.is_running() {
        return;
    }
    game.frame += 1;

    apply_input(game, input, scene);
    let meltdown_complete = update_entities(game, scene);

    if meltdown_complete {
        log::info!("Meltdown complete - level {} cleared", game.state.level);
        game.state.level_complete = true;
        game.state.award(game.tuning.meltdown_bonus);
    }

    resolve_projectiles(game, scene);
    resolve_wall_contacts(game);
    collect_fuel(game, scene);

    // A ship destroyed this frame neither escapes nor moves on
    if !game.state.is_running() {
        return;
    }
    check_exit(game);

    if game.state.level_complete {
        advance_level(game, scene);
    }
}

/// Steering, thrust, shield (with capsule pickup) and fire
fn apply_input(game: &mut Game, input: &TickInput, scene: &mut dyn Scene) {
    let Game {
        state,
        world,
        tuning,
        ..
    } = game;

    if input.rotate_left {
        world.ship.rotate_left(tuning);
    }
    if input.rotate_right {
        world.ship.rotate_right(tuning);
    }
    world.ship.thrust = input.thrust;

    if input.shield {
        world.ship.activate_shield();
        if let Some(capsule) = world.capsule.as_mut() {
            if !capsule.attached && collides(&world.ship, capsule) {
                capsule.attach();
                state.capsule_attached = true;
            }
        }
    } else {
        world.ship.deactivate_shield();
    }

    if input.fire {
        if let Some(shot) = world.ship.shoot(state, tuning) {
            world.fire(shot, tuning, scene);
        }
    }
}

/// Ship, capsule, turrets, plants, doors - in that order
///
/// Returns whether a meltdown finished this frame.
fn update_entities(game: &mut Game, scene: &mut dyn Scene) -> bool {
    let Game {
        state,
        world,
        tuning,
        ..
    } = game;

    world.ship.update(state, tuning);

    if let Some(capsule) = world.capsule.as_mut() {
        capsule.ensure_tether(&mut world.ids, scene);
        capsule.update(world.ship.pos);
    }

    let ship_pos = world.ship.pos;
    let shots: Vec<_> = world
        .turrets
        .iter_mut()
        .filter_map(|turret| turret.update(ship_pos, state, tuning))
        .collect();
    for shot in shots {
        world.fire(shot, tuning, scene);
    }

    let mut meltdown_complete = false;
    for plant in &mut world.plants {
        if plant.update() {
            meltdown_complete = true;
        }
    }

    for door in &mut world.doors {
        door.update();
    }

    meltdown_complete
}

/// Move every projectile and apply its hits
///
/// Scans back to front so removals never skip an element.
fn resolve_projectiles(game: &mut Game, scene: &mut dyn Scene) {
    let Game { state, world, .. } = game;

    for i in (0..world.projectiles.len()).rev() {
        let alive = world.projectiles[i].update();
        let projectile: &dyn Collider = &world.projectiles[i];
        let mut spent = touches_any(projectile, &world.walls);

        for door in world.doors.iter_mut().filter(|d| d.is_closed()) {
            if collides(projectile, door) {
                door.hit();
                spent = true;
            }
        }

        let mut meltdown = false;
        for plant in &mut world.plants {
            if collides(projectile, plant) {
                plant.hit();
                spent = true;
                meltdown |= plant.meltdown;
            }
        }
        if meltdown {
            for turret in &mut world.turrets {
                turret.deactivate();
            }
        }

        let mut reflect = false;
        if world.projectiles[i].is_hostile() && collides(&world.projectiles[i], &world.ship) {
            if world.ship.shield {
                reflect = true;
            } else {
                log::debug!("Ship hit ({} lives left)", state.lives - 1.0);
                state.lose_lives(1.0);
                spent = true;
            }
        }
        if reflect && !spent {
            log::debug!("Shot reflected by shield");
            world.projectiles[i].reflect();
        }

        if !alive || spent {
            world.remove_projectile(i, scene);
        }
    }
}

/// Damage and knock back the ship for every wall it overlaps
fn resolve_wall_contacts(game: &mut Game) {
    let Game {
        state,
        world,
        tuning,
        ..
    } = game;
    let ship = &mut world.ship;

    ship.wall_grace = ship.wall_grace.saturating_sub(1);

    let touching = contacts(&*ship, &world.walls).count();
    for _ in 0..touching {
        if ship.wall_grace == 0 {
            state.lose_lives(tuning.wall_damage);
            ship.wall_grace = tuning.wall_grace_frames;
        }
        ship.vel *= tuning.wall_knockback;
    }
}

/// Pick up any fuel tank the ship touches
fn collect_fuel(game: &mut Game, scene: &mut dyn Scene) {
    let Game {
        state,
        world,
        tuning,
        ..
    } = game;

    for i in (0..world.fuel_tanks.len()).rev() {
        let tank = &mut world.fuel_tanks[i];
        if !tank.collected && collides(&world.ship, tank) {
            state.refuel(tuning.fuel_tank_refill, tuning.max_fuel);
            tank.collected = true;
            log::debug!("Fuel tank collected ({:.0} fuel)", state.fuel);
            world.remove_fuel_tank(i, scene);
        }
    }
}

/// Leaving the level with the capsule in tow completes it
fn check_exit(game: &mut Game) {
    let Game {
        state,
        world,
        tuning,
        ..
    } = game;

    if state.capsule_attached && !world.bounds.contains(world.ship.pos) {
        log::info!("Escaped level {} with the capsule", state.level);
        state.level_complete = true;
        state.award(tuning.exit_bonus);
    }
}

/// Move on to the next level, or finish the game when there is none
fn advance_level(game: &mut Game, scene: &mut dyn Scene) {
    let next = game.state.level + 1;
    match game.load_level(next, scene) {
        Ok(()) => {
            game.state.level_complete = false;
            game.state.capsule_attached = false;
            game.state.fuel = game.tuning.max_fuel;
        }
        Err(LevelError::NotFound { .. }) => {
            log::info!("All levels cleared - final score {}", game.state.score);
            game.state.level_complete = false;
            game.state.phase = GamePhase::Complete;
        }
        Err(e) => {
            log::error!("Could not load level {}: {}", next, e);
            game.state.level_complete = false;
            game.state.phase = GamePhase::Complete;
        }
    }
}
