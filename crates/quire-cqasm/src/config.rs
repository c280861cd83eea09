//! Emitter configuration.

use serde::{Deserialize, Serialize};

/// Default text of the comment line written after the version header.
pub const DEFAULT_HEADER_COMMENT: &str = "cQASM generated by Quire";

/// Immutable settings for one translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// The provider always returns the complete register state, so
    /// measurements need no statement of their own.
    #[serde(default = "default_full_state_projection")]
    pub full_state_projection: bool,
    /// Comment text written after `version 1.0` (without the leading `#`).
    #[serde(default = "default_header_comment")]
    pub header_comment: String,
}

fn default_full_state_projection() -> bool {
    true
}

fn default_header_comment() -> String {
    DEFAULT_HEADER_COMMENT.to_string()
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            full_state_projection: default_full_state_projection(),
            header_comment: default_header_comment(),
        }
    }
}

impl EmitterConfig {
    /// Set full-state projection.
    #[must_use]
    pub fn with_full_state_projection(mut self, enabled: bool) -> Self {
        self.full_state_projection = enabled;
        self
    }

    /// Set the header comment text.
    #[must_use]
    pub fn with_header_comment(mut self, comment: impl Into<String>) -> Self {
        self.header_comment = comment.into();
        self
    }
}
