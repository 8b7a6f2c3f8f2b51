//! Topology event type emitted to event sinks.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::topology::{Classification, DanglingReference, TopologyGraph};

/// Event type for a finished classification.
pub const CLASSIFIED: &str = "topology.classified";
/// Event type for a finished extraction.
pub const EXTRACTED: &str = "topology.extracted";
/// Event type for a dependency that did not resolve.
pub const DANGLING_DEPENDENCY: &str = "topology.dangling_dependency";

/// An observation emitted while classifying or extracting a template.
///
/// Events are diagnostics only; nothing in extraction reads them back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyEvent {
    /// The event type (e.g., "topology.classified").
    #[serde(rename = "type")]
    pub event_type: String,

    /// When the event occurred (ISO 8601).
    pub timestamp: String,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl TopologyEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: iso_timestamp(),
            data: HashMap::new(),
        }
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Returns a data field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Creates a "topology.classified" event.
    #[must_use]
    pub fn classified(template: &str, classification: Classification) -> Self {
        Self::new(CLASSIFIED)
            .add_data("template", serde_json::json!(template))
            .add_data("has_dag", serde_json::json!(classification.has_dag))
            .add_data("has_steps", serde_json::json!(classification.has_steps))
            .add_data("message", serde_json::json!(classification.describe(template)))
    }

    /// Creates a "topology.extracted" event.
    #[must_use]
    pub fn extracted(template: &str, graph: &TopologyGraph) -> Self {
        Self::new(EXTRACTED)
            .add_data("template", serde_json::json!(template))
            .add_data("nodes", serde_json::json!(graph.node_count()))
            .add_data("links", serde_json::json!(graph.link_count()))
            .add_data("degraded", serde_json::json!(graph.is_degraded()))
    }

    /// Creates a "topology.dangling_dependency" event.
    #[must_use]
    pub fn dangling(template: &str, reference: &DanglingReference) -> Self {
        Self::new(DANGLING_DEPENDENCY)
            .add_data("template", serde_json::json!(template))
            .add_data("block", serde_json::json!(reference.block))
            .add_data("task", serde_json::json!(reference.task))
            .add_data("target", serde_json::json!(reference.target))
            .add_data("dependency", serde_json::json!(reference.dependency))
    }
}

fn iso_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}
