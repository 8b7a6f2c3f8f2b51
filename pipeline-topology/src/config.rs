//! Extraction configuration.

use crate::errors::TopologyError;
use serde::{Deserialize, Serialize};

/// What to do when a DAG dependency names no task of its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingPolicy {
    /// Emit the link with the literal dependency name as source and record
    /// the reference in [`TopologyGraph::degraded`](crate::topology::TopologyGraph::degraded).
    #[default]
    Degrade,
    /// Fail the extraction at the first unresolved dependency.
    FailFast,
}

/// Options for [`TopologyExtractor`](crate::topology::TopologyExtractor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Dangling dependency handling.
    #[serde(default)]
    pub dangling_policy: DanglingPolicy,
    /// Whether to forward events to the configured sink.
    #[serde(default = "default_emit_events")]
    pub emit_events: bool,
}

fn default_emit_events() -> bool {
    true
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            dangling_policy: DanglingPolicy::default(),
            emit_events: default_emit_events(),
        }
    }
}

impl ExtractOptions {
    /// Creates options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dangling dependency policy.
    #[must_use]
    pub fn with_dangling_policy(mut self, policy: DanglingPolicy) -> Self {
        self.dangling_policy = policy;
        self
    }

    /// Enables or disables event emission.
    #[must_use]
    pub fn with_events(mut self, enabled: bool) -> Self {
        self.emit_events = enabled;
        self
    }

    /// Decodes options from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::Parse`] on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, TopologyError> {
        Ok(serde_json::from_str(json)?)
    }
}
