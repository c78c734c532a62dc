//! Static level fixtures: walls and fuel tanks

use glam::Vec2;

use super::collision::Collider;
use crate::scene::{IdGen, Part, Shape, Visual, palette};

/// Axis-aligned wall block; fixed for the level's lifetime
#[derive(Debug, Clone)]
pub struct Wall {
    pub pos: Vec2,
    pub size: Vec2,
    pub body: Part,
}

impl Wall {
    /// Invisible walls still collide
    pub fn new(ids: &mut IdGen, pos: Vec2, size: Vec2, visible: bool) -> Self {
        let mut visual = Visual::new(
            Shape::Box {
                width: size.x,
                height: size.y,
            },
            pos,
            palette::WALL,
        );
        visual.visible = visible;
        Self {
            pos,
            size,
            body: Part::new(ids, visual),
        }
    }
}

impl Collider for Wall {
    fn position(&self) -> Vec2 {
        self.pos
    }
}

/// A fuel pickup
#[derive(Debug, Clone)]
pub struct FuelTank {
    pub pos: Vec2,
    pub collected: bool,
    pub body: Part,
}

impl FuelTank {
    pub fn new(ids: &mut IdGen, pos: Vec2) -> Self {
        let visual = Visual::new(
            Shape::Cylinder {
                radius: 0.4,
                height: 0.6,
            },
            pos,
            palette::FUEL_TANK,
        )
        .rotated(std::f32::consts::FRAC_PI_2);
        Self {
            pos,
            collected: false,
            body: Part::new(ids, visual),
        }
    }
}

impl Collider for FuelTank {
    fn position(&self) -> Vec2 {
        self.pos
    }
}
