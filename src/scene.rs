//! Rendering collaborator seam
//!
//! The simulation owns plain [`Visual`] descriptions of everything on screen
//! and pushes them through the [`Scene`] trait: `add` when an entity spawns,
//! `update` once per frame, `remove` when it is torn down. Nothing is ever
//! read back from the scene.

use std::collections::BTreeMap;

use glam::Vec2;

/// Colours used by the built-in entities (0xRRGGBB)
pub mod palette {
    pub const SHIP: u32 = 0x00ff00;
    pub const THRUSTER: u32 = 0xff6600;
    pub const SHIELD: u32 = 0x3399ff;
    pub const PLAYER_SHOT: u32 = 0xffff00;
    pub const HOSTILE_SHOT: u32 = 0xff0000;
    pub const REFLECTED_SHOT: u32 = 0xffff00;
    pub const TURRET_BASE: u32 = 0x666666;
    pub const TURRET_GUN: u32 = 0xff0000;
    pub const TURRET_DISABLED: u32 = 0x333333;
    pub const PLANT: u32 = 0x0066ff;
    pub const PLANT_WARNING: u32 = 0xff9900;
    pub const PLANT_CRITICAL: u32 = 0xff0000;
    pub const PLANT_MELTDOWN: u32 = 0xff00ff;
    pub const FUEL_TANK: u32 = 0x00ff00;
    pub const DOOR: u32 = 0xffaa00;
    pub const CAPSULE: u32 = 0xff3300;
    pub const TETHER: u32 = 0x00ffff;
    pub const WALL: u32 = 0xffffff;
}

/// Handle for one visual in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualId(pub u32);

/// Allocates visual handles
#[derive(Debug, Clone)]
pub struct IdGen {
    next: u32,
}

impl Default for IdGen {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGen {
    pub fn next_id(&mut self) -> VisualId {
        let id = VisualId(self.next);
        self.next += 1;
        id
    }
}

/// Geometry of a visual (model space, before scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cone { radius: f32, height: f32 },
    Circle { radius: f32 },
    Box { width: f32, height: f32 },
    Cylinder { radius: f32, height: f32 },
}

/// Everything the renderer needs to draw one shape
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub shape: Shape,
    pub position: Vec2,
    /// Rotation about the view axis (radians)
    pub rotation: f32,
    pub scale: Vec2,
    pub color: u32,
    pub visible: bool,
}

impl Visual {
    pub fn new(shape: Shape, position: Vec2, color: u32) -> Self {
        Self {
            shape,
            position,
            rotation: 0.0,
            scale: Vec2::ONE,
            color,
            visible: true,
        }
    }

    pub fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// A visual together with its scene handle
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub id: VisualId,
    pub visual: Visual,
}

impl Part {
    pub fn new(ids: &mut IdGen, visual: Visual) -> Self {
        Self {
            id: ids.next_id(),
            visual,
        }
    }

    pub fn add_to(&self, scene: &mut dyn Scene) {
        scene.add(self.id, &self.visual);
    }

    pub fn remove_from(&self, scene: &mut dyn Scene) {
        scene.remove(self.id);
    }

    pub fn sync(&self, scene: &mut dyn Scene) {
        scene.update(self.id, &self.visual);
    }
}

/// The rendering surface, as seen by the simulation
pub trait Scene {
    fn add(&mut self, id: VisualId, visual: &Visual);
    fn remove(&mut self, id: VisualId);
    fn update(&mut self, id: VisualId, visual: &Visual);
}

/// Scene that keeps the latest copy of every live visual
///
/// Backs the headless runner and the tests.
#[derive(Debug, Default)]
pub struct SceneMirror {
    visuals: BTreeMap<VisualId, Visual>,
    /// Total `add` calls
    pub added: usize,
    /// Total `remove` calls
    pub removed: usize,
}

impl SceneMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: VisualId) -> Option<&Visual> {
        self.visuals.get(&id)
    }

    pub fn contains(&self, id: VisualId) -> bool {
        self.visuals.contains_key(&id)
    }

    /// Number of live visuals
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Live visuals of a given colour
    pub fn count_color(&self, color: u32) -> usize {
        self.visuals.values().filter(|v| v.color == color).count()
    }
}

impl Scene for SceneMirror {
    fn add(&mut self, id: VisualId, visual: &Visual) {
        self.added += 1;
        self.visuals.insert(id, visual.clone());
    }

    fn remove(&mut self, id: VisualId) {
        self.removed += 1;
        self.visuals.remove(&id);
    }

    fn update(&mut self, id: VisualId, visual: &Visual) {
        // Updates for visuals that were never added (or already removed) are dropped
        if let Some(slot) = self.visuals.get_mut(&id) {
            *slot = visual.clone();
        }
    }
}
