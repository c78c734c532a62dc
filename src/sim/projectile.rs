//! Shots fired by the ship and by turrets

use glam::Vec2;

use super::collision::{Collider, reflect};
use crate::scene::{IdGen, Part, Shape, Visual, palette};

/// Who a projectile can hurt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allegiance {
    /// Fired by the ship
    Player,
    /// Fired by a turret; damages the ship
    Hostile,
    /// A turret shot bounced off the shield; harmless to the ship
    Reflected,
}

impl Allegiance {
    fn color(self) -> u32 {
        match self {
            Allegiance::Player => palette::PLAYER_SHOT,
            Allegiance::Hostile => palette::HOSTILE_SHOT,
            Allegiance::Reflected => palette::REFLECTED_SHOT,
        }
    }
}

/// Launch parameters for a new projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub allegiance: Allegiance,
}

/// A live projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left before it fizzles
    pub life: u32,
    pub allegiance: Allegiance,
    pub body: Part,
}

impl Projectile {
    pub fn new(ids: &mut IdGen, shot: Shot, life: u32) -> Self {
        let visual = Visual::new(
            Shape::Circle { radius: 0.1 },
            shot.pos,
            shot.allegiance.color(),
        );
        Self {
            pos: shot.pos,
            vel: shot.vel,
            life,
            allegiance: shot.allegiance,
            body: Part::new(ids, visual),
        }
    }

    /// Move one frame; returns whether the projectile is still alive
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.body.visual.position = self.pos;
        self.life > 0
    }

    pub fn is_hostile(&self) -> bool {
        self.allegiance == Allegiance::Hostile
    }

    /// Bounce off the shield
    pub fn reflect(&mut self) {
        self.vel = reflect(self.vel);
        self.allegiance = Allegiance::Reflected;
        self.body.visual.color = self.allegiance.color();
    }
}

impl Collider for Projectile {
    fn position(&self) -> Vec2 {
        self.pos
    }
}
