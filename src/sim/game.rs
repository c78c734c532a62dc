//! Session container
//!
//! Bundles the state record, the live world, the input state and the
//! read-only catalog/tuning so the frame loop has one thing to pass around.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::input::Controls;
use super::level::{LevelCatalog, LevelError};
use super::state::GameState;
use super::world::World;
use crate::scene::Scene;
use crate::tuning::TuningError;
use crate::{Settings, Tuning};

/// Why a session could not start
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error("invalid tuning: {0}")]
    Tuning(#[from] TuningError),
}

/// One play session
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub world: World,
    pub controls: Controls,
    pub(crate) catalog: LevelCatalog,
    pub(crate) tuning: Tuning,
    /// Turret firing phases
    pub(crate) rng: Pcg32,
    /// Simulated frames so far
    pub(crate) frame: u64,
}

impl Game {
    /// Start a session on the configured start level
    pub fn new(
        catalog: LevelCatalog,
        tuning: Tuning,
        settings: &Settings,
        scene: &mut dyn Scene,
    ) -> Result<Self, SessionError> {
        tuning.validate()?;
        let seed = settings.effective_seed();
        log::info!("New session (seed {})", seed);

        let mut game = Self {
            state: GameState::new(&tuning),
            world: World::new(),
            controls: Controls::new(settings.key_bindings.clone()),
            catalog,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
        };
        for part in game.world.ship.parts() {
            part.add_to(scene);
        }
        game.load_level(settings.start_level, scene)?;
        Ok(game)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneMirror;

    #[test]
    fn test_rejects_unusable_tuning() {
        let mut scene = SceneMirror::new();
        let tuning = Tuning {
            meltdown_frames: 0,
            ..Tuning::default()
        };
        let result = Game::new(LevelCatalog::builtin(), tuning, &Settings::default(), &mut scene);
        assert!(matches!(
            result,
            Err(SessionError::Tuning(TuningError::OutOfRange {
                field: "meltdown_frames",
                ..
            }))
        ));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_missing_start_level() {
        let mut scene = SceneMirror::new();
        let settings = Settings {
            start_level: 4,
            ..Settings::default()
        };
        let result = Game::new(LevelCatalog::builtin(), Tuning::default(), &settings, &mut scene);
        assert_eq!(
            result.err(),
            Some(SessionError::Level(LevelError::NotFound {
                index: 4,
                available: 3
            }))
        );
    }
}
