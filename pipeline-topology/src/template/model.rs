//! Template document model and loaders.

use crate::errors::TopologyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named pipeline template: an ordered sequence of topology blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineTemplate {
    /// The template name.
    pub name: String,
    /// Blocks in document order.
    #[serde(default)]
    pub blocks: Vec<TemplateBlock>,
}

impl PipelineTemplate {
    /// Creates an empty template.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    /// Appends a block.
    #[must_use]
    pub fn with_block(mut self, block: impl Into<TemplateBlock>) -> Self {
        self.blocks.push(block.into());
        self
    }

    /// Iterates over the DAG blocks with their document index.
    pub fn dag_blocks(&self) -> impl Iterator<Item = (usize, &DagBlock)> {
        self.blocks.iter().enumerate().filter_map(|(i, b)| match b {
            TemplateBlock::Dag(dag) => Some((i, dag)),
            TemplateBlock::Steps(_) => None,
        })
    }

    /// Iterates over the Steps blocks with their document index.
    pub fn steps_blocks(&self) -> impl Iterator<Item = (usize, &StepsBlock)> {
        self.blocks.iter().enumerate().filter_map(|(i, b)| match b {
            TemplateBlock::Steps(steps) => Some((i, steps)),
            TemplateBlock::Dag(_) => None,
        })
    }

    /// Decodes a template from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::Parse`] if the document does not match the schema.
    pub fn from_json_str(json: &str) -> Result<Self, TopologyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a template from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::Parse`] if the document does not match the schema.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TopologyError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a template from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or a parse error if the
    /// extension is unknown or the content does not decode.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            other => Err(TopologyError::Parse(format!(
                "Unsupported template file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// One topology block of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateBlock {
    /// Tasks with explicit dependency lists.
    Dag(DagBlock),
    /// Ordered groups of tasks; each group follows the previous one.
    Steps(StepsBlock),
}

impl TemplateBlock {
    /// Returns the block name, if declared.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Dag(dag) => dag.name.as_deref(),
            Self::Steps(steps) => steps.name.as_deref(),
        }
    }

    /// Returns the block name, or `block-<index>` when unnamed.
    #[must_use]
    pub fn display_name(&self, index: usize) -> String {
        self.name()
            .map_or_else(|| format!("block-{index}"), ToString::to_string)
    }
}

impl From<DagBlock> for TemplateBlock {
    fn from(block: DagBlock) -> Self {
        Self::Dag(block)
    }
}

impl From<StepsBlock> for TemplateBlock {
    fn from(block: StepsBlock) -> Self {
        Self::Steps(block)
    }
}

/// A block of tasks with explicit dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagBlock {
    /// Optional block name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tasks in declaration order.
    #[serde(default)]
    pub tasks: Vec<DagTask>,
}

impl DagBlock {
    /// Creates an unnamed, empty DAG block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty DAG block with a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            tasks: Vec::new(),
        }
    }

    /// Appends a task.
    #[must_use]
    pub fn with_task(mut self, task: DagTask) -> Self {
        self.tasks.push(task);
        self
    }
}

/// A task inside a DAG block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DagTask {
    /// Task name, unique within its block.
    pub name: String,
    /// Name of the implementation template this task runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_ref: Option<String>,
    /// Names of tasks in the same block this task waits for.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl DagTask {
    /// Creates a task with no implementation reference and no dependencies.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            implementation_ref: None,
            dependencies: Vec::new(),
        }
    }

    /// Sets the implementation template.
    #[must_use]
    pub fn with_implementation(mut self, template: impl Into<String>) -> Self {
        self.implementation_ref = Some(template.into());
        self
    }

    /// Sets the dependencies.
    #[must_use]
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Node label: the implementation template, or the task name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.implementation_ref.as_deref().unwrap_or(&self.name)
    }
}

/// A block of sequential step groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsBlock {
    /// Optional block name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Groups in execution order; tasks within a group run in parallel.
    #[serde(default)]
    pub step_groups: Vec<Vec<StepTask>>,
}

impl StepsBlock {
    /// Creates an unnamed, empty Steps block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty Steps block with a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            step_groups: Vec::new(),
        }
    }

    /// Appends a group of task names.
    #[must_use]
    pub fn with_group(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.step_groups
            .push(names.into_iter().map(StepTask::new).collect());
        self
    }
}

/// A task inside a step group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTask {
    /// Task name.
    pub name: String,
}

impl StepTask {
    /// Creates a step task.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
