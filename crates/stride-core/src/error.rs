//! Error types.

use thiserror::Error;

/// Errors raised by the state manager.
///
/// None of these leave the manager in a partial state: a failed request
/// changes nothing and fires no notifications.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The requested state key was never declared for this manager.
    #[error("state `{0}` is not registered")]
    Unregistered(String),
    /// A handle does not refer to a declared state.
    #[error("state handle {0} is out of range")]
    InvalidHandle(usize),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The config could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// No states were declared.
    #[error("state list is empty")]
    EmptyStateList,
    /// No stat sets were declared.
    #[error("stat set list is empty")]
    EmptyStatSets,
    /// Body dimensions are unusable.
    #[error("invalid body: {0}")]
    InvalidBody(String),
    /// A tuning value is out of range.
    #[error("invalid stats: {0}")]
    InvalidStats(String),
    /// Input settings are out of range.
    #[error("invalid input settings: {0}")]
    InvalidInput(String),
}
