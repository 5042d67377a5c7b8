//! Construction-time errors.
//!
//! Gameplay itself never fails: busy or finished roll requests are ignored.
//! Only building a session from configuration can be rejected.

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("player count must be between 2 and 255, got {0}")]
    PlayerCount(usize),

    #[error("invalid timing: {0}")]
    Timing(&'static str),

    #[error("player {0} is outside the configured player count")]
    UnknownPlayer(u8),

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
