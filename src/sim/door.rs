//! Shootable doors
//!
//! A hit swings the door open; it closes again on its own. Open doors
//! neither stop shots nor render.

use glam::Vec2;

use super::collision::Collider;
use crate::scene::{IdGen, Part, Shape, Visual, palette};

#[derive(Debug, Clone)]
pub struct Door {
    pub pos: Vec2,
    pub size: Vec2,
    pub open: bool,
    /// Frames until it shuts
    pub close_timer: u32,
    close_frames: u32,
    pub body: Part,
}

impl Door {
    pub fn new(ids: &mut IdGen, pos: Vec2, size: Vec2, close_frames: u32) -> Self {
        let visual = Visual::new(
            Shape::Box {
                width: size.x,
                height: size.y,
            },
            pos,
            palette::DOOR,
        );
        Self {
            pos,
            size,
            open: false,
            close_timer: 0,
            close_frames,
            body: Part::new(ids, visual),
        }
    }

    /// Open (or keep open) and restart the close countdown
    pub fn hit(&mut self) {
        if !self.open {
            log::debug!("Door at ({}, {}) opened", self.pos.x, self.pos.y);
        }
        self.open = true;
        self.close_timer = self.close_frames;
        self.body.visual.visible = false;
    }

    pub fn update(&mut self) {
        if self.open {
            self.close_timer = self.close_timer.saturating_sub(1);
            if self.close_timer == 0 {
                self.open = false;
            }
        }
        self.body.visual.visible = !self.open;
    }

    pub fn is_closed(&self) -> bool {
        !self.open
    }
}

impl Collider for Door {
    fn position(&self) -> Vec2 {
        self.pos
    }
}
