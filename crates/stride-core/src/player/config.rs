//! JSON player configuration.
//!
//! Every field is optional; missing fields take their defaults.
//!
//! ```json
//! {
//!   "states": ["Idle", "Walk", "Fall", "Brake"],
//!   "stat_sets": [{ "top_speed": 6.5 }, { "top_speed": 9.0, "multi_jumps": 2 }],
//!   "body": { "height": 1.8, "radius": 0.4 },
//!   "input": { "jump_buffer": 0.2 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::input::InputConfig;
use super::states::PlayerState;
use super::stats::PlayerStats;
use crate::entity::Body;
use crate::error::ConfigError;

/// Everything needed to build a [`Player`](super::Player) and its states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Declared states; the first starts active.
    pub states: Vec<PlayerState>,
    /// Stat sets; the first is selected.
    pub stat_sets: Vec<PlayerStats>,
    /// Capsule geometry.
    pub body: Body,
    /// Input processing.
    pub input: InputConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            states: PlayerState::ALL.to_vec(),
            stat_sets: vec![PlayerStats::default()],
            body: Body::default(),
            input: InputConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or any validation
    /// error.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(
            target: "stride::config",
            path = %path.display(),
            states = config.states.len(),
            stat_sets = config.stat_sets.len(),
            "loaded player config"
        );
        Ok(config)
    }

    /// Checks the config can build a working player.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyStateList`] or [`ConfigError::EmptyStatSets`]
    /// for empty lists, and the body, stats or input errors otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.states.is_empty() {
            return Err(ConfigError::EmptyStateList);
        }
        if self.stat_sets.is_empty() {
            return Err(ConfigError::EmptyStatSets);
        }
        self.body.validate()?;
        for stats in &self.stat_sets {
            stats.validate()?;
        }
        self.input.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PlayerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.states, PlayerState::ALL.to_vec());
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config = PlayerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = PlayerConfig::from_json_str(
            r#"{
                "states": ["Fall", "Idle"],
                "stat_sets": [{ "top_speed": 9.0 }, {}],
                "body": { "height": 1.8 },
                "input": { "jump_buffer": 0.2 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.states, vec![PlayerState::Fall, PlayerState::Idle]);
        assert_eq!(config.stat_sets.len(), 2);
        assert!((config.stat_sets[0].top_speed - 9.0).abs() < f32::EPSILON);
        assert!((config.body.height - 1.8).abs() < f32::EPSILON);
        assert!((config.input.jump_buffer - 0.2).abs() < f32::EPSILON);
        assert!((config.input.dead_zone - 0.125).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_state_fails_to_parse() {
        let err = PlayerConfig::from_json_str(r#"{ "states": ["Swim"] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_states_are_rejected() {
        let err = PlayerConfig::from_json_str(r#"{ "states": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyStateList));
    }

    #[test]
    fn empty_stat_sets_are_rejected() {
        let err = PlayerConfig::from_json_str(r#"{ "stat_sets": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyStatSets));
    }

    #[test]
    fn bad_body_is_rejected() {
        let err = PlayerConfig::from_json_str(r#"{ "body": { "radius": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBody(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PlayerConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
