//! Error types for topology extraction.
//!
//! Extraction failures are deterministic: the same document always fails
//! the same way, so none of these errors are retryable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for topology operations.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// The template declares neither a DAG nor a Steps structure.
    #[error("{0}")]
    UnsupportedTopology(#[from] UnsupportedTopologyError),

    /// A DAG task depends on a name that is not a task of its block.
    #[error("{0}")]
    DanglingDependency(#[from] DanglingDependencyError),

    /// The document could not be decoded into a pipeline template.
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TopologyError {
    /// Returns the contract error info for variants that carry one.
    #[must_use]
    pub fn error_info(&self) -> Option<&ContractErrorInfo> {
        match self {
            Self::UnsupportedTopology(err) => Some(&err.error_info),
            Self::DanglingDependency(err) => Some(&err.error_info),
            Self::Parse(_) | Self::Io(_) => None,
        }
    }
}

impl From<serde_json::Error> for TopologyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for TopologyError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Metadata about a contract error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContractErrorInfo {
    /// Error code (e.g., "TOPOLOGY-001-UNSUPPORTED").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ContractErrorInfo {
    /// Creates a new contract error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code));
        map.insert("summary".to_string(), serde_json::json!(self.summary));

        if let Some(ref hint) = self.fix_hint {
            map.insert("fix_hint".to_string(), serde_json::json!(hint));
        }
        if !self.context.is_empty() {
            let context_map: serde_json::Map<String, serde_json::Value> = self
                .context
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect();
            map.insert("context".to_string(), serde_json::Value::Object(context_map));
        }

        map
    }
}

/// Error raised when a template has no extractable topology.
#[derive(Debug, Clone, Error)]
#[error("Neither DAG nor Steps structure found in workflow '{template}'")]
pub struct UnsupportedTopologyError {
    /// The template name.
    pub template: String,
    /// Contract error info.
    pub error_info: ContractErrorInfo,
}

impl UnsupportedTopologyError {
    /// Creates a new unsupported topology error.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let info = ContractErrorInfo::new(
            UNSUPPORTED_CODE,
            format!("Template '{template}' declares no DAG or Steps block"),
        )
        .with_fix_hint("Add a dag or steps block to the template upstream.")
        .with_context_entry("template", &template);

        Self {
            template,
            error_info: info,
        }
    }
}

/// Error raised when a dependency name does not resolve within its block.
#[derive(Debug, Clone, Error)]
#[error("Task '{task}' in block '{block}' depends on unknown task '{dependency}'")]
pub struct DanglingDependencyError {
    /// The dependent task.
    pub task: String,
    /// The unresolved dependency name.
    pub dependency: String,
    /// The block the task belongs to.
    pub block: String,
    /// Contract error info.
    pub error_info: ContractErrorInfo,
}

impl DanglingDependencyError {
    /// Creates a new dangling dependency error.
    #[must_use]
    pub fn new(
        task: impl Into<String>,
        dependency: impl Into<String>,
        block: impl Into<String>,
    ) -> Self {
        let task = task.into();
        let dependency = dependency.into();
        let block = block.into();
        let info = ContractErrorInfo::new(
            DANGLING_DEP_CODE,
            format!("Dependency '{dependency}' not found"),
        )
        .with_fix_hint("Dependencies must name a task declared in the same dag block.")
        .with_context_entry("task", &task)
        .with_context_entry("block", &block);

        Self {
            task,
            dependency,
            block,
            error_info: info,
        }
    }
}

/// Code attached to [`UnsupportedTopologyError`].
pub const UNSUPPORTED_CODE: &str = "TOPOLOGY-001-UNSUPPORTED";

/// Code attached to [`DanglingDependencyError`].
pub const DANGLING_DEP_CODE: &str = "TOPOLOGY-002-DANGLING_DEP";

/// Provides default suggestions for topology error codes.
pub struct TopologySuggestions;

impl TopologySuggestions {
    /// Gets a suggestion for a given error code.
    #[must_use]
    pub fn get(code: &str) -> Option<&'static str> {
        match code {
            UNSUPPORTED_CODE => Some(
                "Only dag and steps templates can be rendered as a graph. \
                 Container or script templates must be wrapped by one of them.",
            ),
            DANGLING_DEP_CODE => Some(
                "Check the dependencies list for typos. A dependency must name \
                 a task of the same dag block, not a template.",
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_error_names_template() {
        let err = UnsupportedTopologyError::new("hello-world");

        assert_eq!(
            err.to_string(),
            "Neither DAG nor Steps structure found in workflow 'hello-world'"
        );
        assert_eq!(err.error_info.code, UNSUPPORTED_CODE);
        assert_eq!(
            err.error_info.context.get("template"),
            Some(&"hello-world".to_string())
        );
    }

    #[test]
    fn test_dangling_error_message() {
        let err = DanglingDependencyError::new("B", "Z", "main");

        assert!(err.to_string().contains("'B'"));
        assert!(err.to_string().contains("'Z'"));
        assert_eq!(err.error_info.code, DANGLING_DEP_CODE);
    }

    #[test]
    fn test_topology_error_from_conversions() {
        let err: TopologyError = UnsupportedTopologyError::new("t").into();
        assert!(matches!(err, TopologyError::UnsupportedTopology(_)));
        assert_eq!(err.error_info().map(|i| i.code.as_str()), Some(UNSUPPORTED_CODE));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TopologyError = json_err.into();
        assert!(matches!(err, TopologyError::Parse(_)));
        assert!(err.error_info().is_none());
    }

    #[test]
    fn test_contract_error_info_to_dict() {
        let info = ContractErrorInfo::new("TEST-001", "Test error")
            .with_fix_hint("Fix it")
            .with_context_entry("task", "A");

        let dict = info.to_dict();
        assert_eq!(dict.get("code").unwrap(), "TEST-001");
        assert_eq!(dict.get("fix_hint").unwrap(), "Fix it");
        assert_eq!(dict["context"]["task"], "A");
    }

    #[test]
    fn test_suggestions() {
        assert!(TopologySuggestions::get(UNSUPPORTED_CODE).is_some());
        assert!(TopologySuggestions::get(DANGLING_DEP_CODE).is_some());
        assert!(TopologySuggestions::get("UNKNOWN").is_none());
    }
}
