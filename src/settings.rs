//! Session settings and key bindings
//!
//! Read from the `TETHER_SETTINGS` environment variable (JSON) by the native
//! runner; anything missing or unreadable falls back to defaults.

use serde::{Deserialize, Serialize};

use crate::sim::input::Button;

/// Physical key names bound to each logical button (case-insensitive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub rotate_left: Vec<String>,
    pub rotate_right: Vec<String>,
    pub thrust: Vec<String>,
    pub fire: Vec<String>,
    pub shield: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn keys(names: &[&str]) -> Vec<String> {
            names.iter().map(|k| k.to_string()).collect()
        }

        Self {
            rotate_left: keys(&["a"]),
            rotate_right: keys(&["s"]),
            // Browsers report the modifier under either name
            thrust: keys(&["control", "ctrl"]),
            fire: keys(&["enter"]),
            shield: keys(&[" "]),
        }
    }
}

impl KeyBindings {
    /// Keys bound to a button
    pub fn keys_for(&self, button: Button) -> &[String] {
        match button {
            Button::RotateLeft => &self.rotate_left,
            Button::RotateRight => &self.rotate_right,
            Button::Thrust => &self.thrust,
            Button::Fire => &self.fire,
            Button::Shield => &self.shield,
        }
    }

    /// Map a physical key name to its logical button
    pub fn button_for(&self, key: &str) -> Option<Button> {
        let key = key.to_lowercase();
        Button::ALL.into_iter().find(|&button| {
            self.keys_for(button)
                .iter()
                .any(|bound| bound.to_lowercase() == key)
        })
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for turret firing phases (random when absent)
    pub seed: Option<u64>,
    /// 1-based level to start on
    pub start_level: u32,
    pub key_bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            start_level: 1,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Environment variable holding a JSON settings document
    const ENV_KEY: &'static str = "TETHER_SETTINGS";

    /// Parse a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from the environment, falling back to defaults
    pub fn load() -> Self {
        match std::env::var(Self::ENV_KEY) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::ENV_KEY);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable {}: {}", Self::ENV_KEY, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Seed to use for this session
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.button_for("a"), Some(Button::RotateLeft));
        assert_eq!(bindings.button_for("S"), Some(Button::RotateRight));
        assert_eq!(bindings.button_for("Control"), Some(Button::Thrust));
        assert_eq!(bindings.button_for("ctrl"), Some(Button::Thrust));
        assert_eq!(bindings.button_for("Enter"), Some(Button::Fire));
        assert_eq!(bindings.button_for(" "), Some(Button::Shield));
        assert_eq!(bindings.button_for("q"), None);
    }

    #[test]
    fn test_settings_json_overrides() {
        let settings = Settings::from_json(
            r#"{ "seed": 7, "key_bindings": { "fire": ["f", "Enter"] } }"#,
        )
        .unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.start_level, 1);
        assert_eq!(settings.key_bindings.button_for("F"), Some(Button::Fire));
        // Unspecified groups keep their defaults
        assert_eq!(settings.key_bindings.button_for("a"), Some(Button::RotateLeft));
        assert_eq!(settings.effective_seed(), 7);
    }
}
