//! Level definitions and the level catalog
//!
//! Levels are plain data. A catalog is validated once when it is built, so
//! malformed geometry is reported before play starts rather than mid-game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LevelError {
    #[error("no such level: {index} (catalog has {available})")]
    NotFound { index: u32, available: usize },
    #[error("level catalog is empty")]
    EmptyCatalog,
    #[error("level {level}: {what} is not a finite number")]
    NonFinite { level: u32, what: String },
    #[error("level {level}: {what} must have a positive extent")]
    BadExtent { level: u32, what: String },
    #[error("level {level}: player start lies outside the level bounds")]
    StartOutOfBounds { level: u32 },
    #[error("level catalog parse error: {0}")]
    Parse(String),
}

/// A point in level space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub x: f32,
    pub y: f32,
}

impl Spawn {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A centred rectangle (walls and doors)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Block {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Half-extents of the playfield; leaving them with the capsule wins the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            half_width: 16.0,
            half_height: 11.0,
        }
    }
}

impl Bounds {
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x.abs() <= self.half_width && pos.y.abs() <= self.half_height
    }
}

/// Everything needed to build one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDefinition {
    pub walls: Vec<Block>,
    #[serde(default)]
    pub turrets: Vec<Spawn>,
    #[serde(default)]
    pub power_plants: Vec<Spawn>,
    #[serde(default)]
    pub fuel_tanks: Vec<Spawn>,
    #[serde(default)]
    pub doors: Vec<Block>,
    pub fuel_capsule: Spawn,
    pub player_start: Spawn,
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default)]
    pub inverse_gravity: bool,
    #[serde(default)]
    pub invisible_walls: bool,
}

impl LevelDefinition {
    /// Check geometry; `level` is the 1-based index used in errors
    pub fn validate(&self, level: u32) -> Result<(), LevelError> {
        let non_finite = |what: String| LevelError::NonFinite { level, what };

        let spawns = self
            .turrets
            .iter()
            .map(|s| ("turret", s))
            .chain(self.power_plants.iter().map(|s| ("power plant", s)))
            .chain(self.fuel_tanks.iter().map(|s| ("fuel tank", s)))
            .chain(std::iter::once(("fuel capsule", &self.fuel_capsule)))
            .chain(std::iter::once(("player start", &self.player_start)));
        for (what, spawn) in spawns {
            if !spawn.x.is_finite() || !spawn.y.is_finite() {
                return Err(non_finite(what.to_string()));
            }
        }

        let blocks = self
            .walls
            .iter()
            .enumerate()
            .map(|(i, b)| (format!("wall {}", i + 1), b))
            .chain(
                self.doors
                    .iter()
                    .enumerate()
                    .map(|(i, b)| (format!("door {}", i + 1), b)),
            );
        for (what, block) in blocks {
            if ![block.x, block.y, block.width, block.height]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(non_finite(what));
            }
            if block.width <= 0.0 || block.height <= 0.0 {
                return Err(LevelError::BadExtent { level, what });
            }
        }

        let Bounds {
            half_width,
            half_height,
        } = self.bounds;
        if !half_width.is_finite() || !half_height.is_finite() {
            return Err(non_finite("bounds".to_string()));
        }
        if half_width <= 0.0 || half_height <= 0.0 {
            return Err(LevelError::BadExtent {
                level,
                what: "bounds".to_string(),
            });
        }
        if !self.bounds.contains(self.player_start.pos()) {
            return Err(LevelError::StartOutOfBounds { level });
        }
        Ok(())
    }
}

/// Ordered, validated list of levels
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }
        for (i, level) in levels.iter().enumerate() {
            level.validate(i as u32 + 1)?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of level definitions
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelDefinition> =
            serde_json::from_str(json).map_err(|e| LevelError::Parse(e.to_string()))?;
        Self::new(levels)
    }

    /// The levels that ship with the game
    pub fn builtin() -> Self {
        Self {
            levels: vec![reactor_cave(), inverted_cave(), dark_cave()],
        }
    }

    /// Look up a level by 1-based index
    pub fn get_level(&self, index: u32) -> Result<&LevelDefinition, LevelError> {
        index
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .ok_or(LevelError::NotFound {
                index,
                available: self.levels.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Outer shell shared by the built-in levels
fn cave_shell() -> Vec<Block> {
    vec![
        Block::new(0.0, -10.0, 30.0, 1.0),  // floor
        Block::new(0.0, 10.0, 30.0, 1.0),   // ceiling
        Block::new(-15.0, 0.0, 1.0, 20.0),  // left wall
        Block::new(15.0, 0.0, 1.0, 20.0),   // right wall
    ]
}

/// Level 1: two ledges, a door and the reactor in the bottom-left corner
fn reactor_cave() -> LevelDefinition {
    let mut walls = cave_shell();
    walls.push(Block::new(-10.0, -5.0, 5.0, 1.0));
    walls.push(Block::new(5.0, -3.0, 7.0, 1.0));

    LevelDefinition {
        walls,
        turrets: vec![Spawn::new(-10.0, -4.0), Spawn::new(10.0, -9.0)],
        power_plants: vec![Spawn::new(-12.0, -8.0)],
        fuel_tanks: vec![Spawn::new(0.0, -9.0)],
        doors: vec![Block::new(5.0, 0.0, 1.0, 5.0)],
        fuel_capsule: Spawn::new(10.0, -5.0),
        player_start: Spawn::new(-13.0, 8.0),
        bounds: Bounds::default(),
        inverse_gravity: false,
        invisible_walls: false,
    }
}

/// Level 2: level 1 upside down, with gravity pulling towards the ceiling
fn inverted_cave() -> LevelDefinition {
    let flip = |s: Spawn| Spawn::new(s.x, -s.y);
    let base = reactor_cave();
    LevelDefinition {
        walls: base
            .walls
            .iter()
            .map(|b| Block::new(b.x, -b.y, b.width, b.height))
            .collect(),
        turrets: base.turrets.into_iter().map(flip).collect(),
        power_plants: base.power_plants.into_iter().map(flip).collect(),
        fuel_tanks: base.fuel_tanks.into_iter().map(flip).collect(),
        doors: base
            .doors
            .iter()
            .map(|b| Block::new(b.x, -b.y, b.width, b.height))
            .collect(),
        fuel_capsule: flip(base.fuel_capsule),
        player_start: flip(base.player_start),
        bounds: base.bounds,
        inverse_gravity: true,
        invisible_walls: false,
    }
}

/// Level 3: level 1 mirrored left-to-right, walls unlit
fn dark_cave() -> LevelDefinition {
    let mirror = |s: Spawn| Spawn::new(-s.x, s.y);
    let base = reactor_cave();
    LevelDefinition {
        walls: base
            .walls
            .iter()
            .map(|b| Block::new(-b.x, b.y, b.width, b.height))
            .collect(),
        turrets: base.turrets.into_iter().map(mirror).collect(),
        power_plants: base.power_plants.into_iter().map(mirror).collect(),
        fuel_tanks: base.fuel_tanks.into_iter().map(mirror).collect(),
        doors: base
            .doors
            .iter()
            .map(|b| Block::new(-b.x, b.y, b.width, b.height))
            .collect(),
        fuel_capsule: mirror(base.fuel_capsule),
        player_start: mirror(base.player_start),
        bounds: base.bounds,
        inverse_gravity: false,
        invisible_walls: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        assert_eq!(LevelCatalog::new(catalog.levels.clone()), Ok(catalog.clone()));

        let first = catalog.get_level(1).unwrap();
        assert_eq!(first.walls.len(), 6);
        assert_eq!(first.turrets.len(), 2);
        assert_eq!(first.player_start, Spawn::new(-13.0, 8.0));
        assert!(!first.inverse_gravity && !first.invisible_walls);
        assert!(catalog.get_level(2).unwrap().inverse_gravity);
        assert!(catalog.get_level(3).unwrap().invisible_walls);
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(
            catalog.get_level(4),
            Err(LevelError::NotFound {
                index: 4,
                available: 3
            })
        );
        assert!(matches!(
            catalog.get_level(0),
            Err(LevelError::NotFound { index: 0, .. })
        ));
    }

    #[test]
    fn test_from_json_with_defaults() {
        let json = r#"[{
            "walls": [{ "x": 0, "y": -10, "width": 30, "height": 1 }],
            "fuelCapsule": { "x": 3, "y": -5 },
            "playerStart": { "x": 0, "y": 0 },
            "inverseGravity": true
        }]"#;
        let catalog = LevelCatalog::from_json(json).unwrap();
        let level = catalog.get_level(1).unwrap();
        assert!(level.inverse_gravity);
        assert!(level.turrets.is_empty());
        assert_eq!(level.bounds, Bounds::default());
    }

    #[test]
    fn test_rejects_malformed_levels() {
        let mut level = reactor_cave();
        level.walls[2].height = 0.0;
        assert_eq!(
            LevelCatalog::new(vec![reactor_cave(), level]),
            Err(LevelError::BadExtent {
                level: 2,
                what: "wall 3".to_string()
            })
        );

        let mut level = reactor_cave();
        level.turrets[0].x = f32::NAN;
        assert!(matches!(
            LevelCatalog::new(vec![level]),
            Err(LevelError::NonFinite { level: 1, .. })
        ));

        let mut level = reactor_cave();
        level.player_start = Spawn::new(40.0, 0.0);
        assert_eq!(
            LevelCatalog::new(vec![level]),
            Err(LevelError::StartOutOfBounds { level: 1 })
        );

        assert_eq!(LevelCatalog::new(Vec::new()), Err(LevelError::EmptyCatalog));
        assert!(matches!(
            LevelCatalog::from_json(r#"[{ "walls": [] }]"#),
            Err(LevelError::Parse(_))
        ));
    }
}
