//! Simulation module
//!
//! All gameplay logic lives here. Rules to keep:
//! - One `tick` per display frame; speeds are per frame
//! - Seeded RNG only
//! - Entities are scanned in insertion order, removals back to front
//! - No rendering or platform dependencies beyond the `Scene` seam

pub mod capsule;
pub mod collision;
pub mod door;
pub mod fixtures;
pub mod game;
pub mod input;
pub mod level;
pub mod loader;
pub mod plant;
pub mod projectile;
pub mod ship;
pub mod state;
pub mod tick;
pub mod turret;
pub mod world;

pub use capsule::FuelCapsule;
pub use collision::{Collider, collides};
pub use door::Door;
pub use fixtures::{FuelTank, Wall};
pub use game::{Game, SessionError};
pub use input::{Button, ButtonState, Controls, TickInput};
pub use level::{Block, Bounds, LevelCatalog, LevelDefinition, LevelError, Spawn};
pub use plant::{PlantHit, PowerPlant};
pub use projectile::{Allegiance, Projectile, Shot};
pub use ship::Ship;
pub use state::{GamePhase, GameState};
pub use tick::{step, tick};
pub use turret::Turret;
pub use world::World;
