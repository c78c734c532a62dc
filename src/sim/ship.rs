//! The player's ship

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::collision::Collider;
use super::projectile::{Allegiance, Shot};
use super::state::GameState;
use crate::consts::SHIP_NOSE_OFFSET;
use crate::scene::{IdGen, Part, Scene, Shape, Visual, palette};
use crate::{Tuning, normalize_angle, polar_to_cartesian};

/// Offset of the thruster flame behind the hull centre
const FLAME_OFFSET: f32 = 0.8;

/// A gravity-bound ship with thrust, shield and a forward gun
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing direction (radians, 0 = pointing right)
    pub angle: f32,
    pub thrust: bool,
    pub shield: bool,
    /// Frames left in which wall contact does not cost lives
    pub wall_grace: u32,
    pub hull: Part,
    pub flame: Part,
    pub bubble: Part,
}

impl Ship {
    pub fn new(ids: &mut IdGen) -> Self {
        let hull = Visual::new(
            Shape::Cone {
                radius: 0.5,
                height: 1.0,
            },
            Vec2::ZERO,
            palette::SHIP,
        );
        let flame = Visual::new(
            Shape::Cone {
                radius: 0.3,
                height: 0.6,
            },
            Vec2::ZERO,
            palette::THRUSTER,
        )
        .hidden();
        let bubble =
            Visual::new(Shape::Circle { radius: 0.8 }, Vec2::ZERO, palette::SHIELD).hidden();

        let mut ship = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            thrust: false,
            shield: false,
            wall_grace: 0,
            hull: Part::new(ids, hull),
            flame: Part::new(ids, flame),
            bubble: Part::new(ids, bubble),
        };
        ship.place_visuals();
        ship
    }

    /// Unit vector along the facing direction
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Tip of the hull, where shots leave
    pub fn nose(&self) -> Vec2 {
        self.pos + polar_to_cartesian(SHIP_NOSE_OFFSET, self.angle)
    }

    /// Put the ship at rest at a level's start point
    pub fn reset(&mut self, start: Vec2) {
        self.pos = start;
        self.vel = Vec2::ZERO;
        self.wall_grace = 0;
        self.place_visuals();
    }

    /// Advance one frame of physics
    pub fn update(&mut self, state: &mut GameState, tuning: &Tuning) {
        if !state.is_running() {
            return;
        }

        if self.thrust && state.fuel > 0.0 {
            self.vel += self.heading() * tuning.thrust_power;
            state.burn_fuel(tuning.fuel_consumption);
            self.flame.visual.visible = true;
        } else {
            self.flame.visual.visible = false;
        }

        let gravity_direction = if state.inverse_gravity { 1.0 } else { -1.0 };
        self.vel.y += tuning.gravity * gravity_direction;

        self.vel *= tuning.friction;
        self.pos += self.vel;

        self.bubble.visual.visible = self.shield;
        self.place_visuals();
    }

    pub fn rotate_left(&mut self, tuning: &Tuning) {
        self.angle = normalize_angle(self.angle + tuning.rotation_speed);
    }

    pub fn rotate_right(&mut self, tuning: &Tuning) {
        self.angle = normalize_angle(self.angle - tuning.rotation_speed);
    }

    pub fn activate_shield(&mut self) {
        self.shield = true;
        self.bubble.visual.visible = true;
    }

    pub fn deactivate_shield(&mut self) {
        self.shield = false;
        self.bubble.visual.visible = false;
    }

    /// Fire a player shot from the nose
    pub fn shoot(&self, state: &GameState, tuning: &Tuning) -> Option<Shot> {
        if !state.is_running() {
            return None;
        }
        Some(Shot {
            pos: self.nose(),
            vel: self.heading() * tuning.player_shot_speed,
            allegiance: Allegiance::Player,
        })
    }

    pub fn parts(&self) -> [&Part; 3] {
        [&self.hull, &self.flame, &self.bubble]
    }

    pub fn sync(&self, scene: &mut dyn Scene) {
        for part in self.parts() {
            part.sync(scene);
        }
    }

    /// Keep the hull, flame and shield bubble on the ship
    fn place_visuals(&mut self) {
        // The cone model points up; rotate it onto the heading
        let rotation = self.angle - FRAC_PI_2;
        self.hull.visual.position = self.pos;
        self.hull.visual.rotation = rotation;
        self.flame.visual.position = self.pos - self.heading() * FLAME_OFFSET;
        self.flame.visual.rotation = rotation + std::f32::consts::PI;
        self.bubble.visual.position = self.pos;
    }
}

impl Collider for Ship {
    fn position(&self) -> Vec2 {
        self.pos
    }
}
