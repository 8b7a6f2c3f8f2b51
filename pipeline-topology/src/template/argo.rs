//! Argo workflow-template envelope.
//!
//! Stored templates arrive wrapped as `{ "argoWorkflowTemplate": { metadata,
//! spec: { templates } } }`. Each Argo template with a `dag` becomes a DAG
//! block and each with `steps` becomes a Steps block, both named after the
//! Argo template. Container and script templates are leaves and produce no
//! block.

use super::model::{DagBlock, DagTask, PipelineTemplate, StepTask, StepsBlock, TemplateBlock};
use crate::errors::TopologyError;
use serde::{Deserialize, Serialize};

/// Outer envelope as stored by the template-authoring layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgoEnvelope {
    /// The wrapped workflow template.
    pub argo_workflow_template: ArgoWorkflowTemplate,
}

/// An Argo `WorkflowTemplate` resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgoWorkflowTemplate {
    /// Resource metadata.
    pub metadata: ArgoMetadata,
    /// Resource spec.
    pub spec: ArgoSpec,
}

/// Resource metadata; only the name is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgoMetadata {
    /// Resource name.
    pub name: String,
}

/// Workflow spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgoSpec {
    /// Template definitions.
    #[serde(default)]
    pub templates: Vec<ArgoTemplate>,
}

/// One entry of `spec.templates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgoTemplate {
    /// Template name.
    pub name: String,
    /// DAG definition, if this is a DAG template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dag: Option<ArgoDag>,
    /// Step groups, if this is a steps template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Vec<ArgoStep>>>,
}

/// `dag` section of a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgoDag {
    /// DAG tasks.
    #[serde(default)]
    pub tasks: Vec<ArgoDagTask>,
}

/// A DAG task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgoDagTask {
    /// Task name.
    pub name: String,
    /// Referenced template.
    #[serde(default)]
    pub template: Option<String>,
    /// Task dependencies.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// A step inside a step group. Only the name is used; other step fields
/// are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgoStep {
    /// Step name.
    pub name: String,
}

impl ArgoTemplate {
    fn into_blocks(self) -> Vec<TemplateBlock> {
        let mut blocks = Vec::new();

        if let Some(dag) = self.dag {
            blocks.push(TemplateBlock::Dag(DagBlock {
                name: Some(self.name.clone()),
                tasks: dag
                    .tasks
                    .into_iter()
                    .map(|task| DagTask {
                        name: task.name,
                        implementation_ref: task.template,
                        dependencies: task.dependencies,
                    })
                    .collect(),
            }));
        }

        if let Some(steps) = self.steps {
            blocks.push(TemplateBlock::Steps(StepsBlock {
                name: Some(self.name),
                step_groups: steps
                    .into_iter()
                    .map(|group| group.into_iter().map(|s| StepTask::new(s.name)).collect())
                    .collect(),
            }));
        }

        blocks
    }
}

impl From<ArgoWorkflowTemplate> for PipelineTemplate {
    fn from(wf: ArgoWorkflowTemplate) -> Self {
        Self {
            name: wf.metadata.name,
            blocks: wf
                .spec
                .templates
                .into_iter()
                .flat_map(ArgoTemplate::into_blocks)
                .collect(),
        }
    }
}

impl From<ArgoEnvelope> for PipelineTemplate {
    fn from(envelope: ArgoEnvelope) -> Self {
        envelope.argo_workflow_template.into()
    }
}

impl PipelineTemplate {
    /// Decodes an Argo envelope from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::Parse`] if the document does not match the envelope.
    pub fn from_argo_json_str(json: &str) -> Result<Self, TopologyError> {
        let envelope: ArgoEnvelope = serde_json::from_str(json)?;
        Ok(envelope.into())
    }

    /// Decodes an Argo envelope from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::Parse`] if the document does not match the envelope.
    pub fn from_argo_yaml_str(yaml: &str) -> Result<Self, TopologyError> {
        let envelope: ArgoEnvelope = serde_yaml::from_str(yaml)?;
        Ok(envelope.into())
    }
}
