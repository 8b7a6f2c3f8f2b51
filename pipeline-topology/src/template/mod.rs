//! Pipeline template documents.
//!
//! A template is decoded once at the boundary into an explicit tagged
//! union of block kinds, so extraction never probes optional fields.
//!
//! This module provides:
//! - The [`PipelineTemplate`] document model
//! - JSON / YAML / file loaders
//! - An adapter for Argo-style workflow-template envelopes

mod argo;
mod model;

pub use argo::{
    ArgoDag, ArgoDagTask, ArgoEnvelope, ArgoMetadata, ArgoSpec, ArgoStep, ArgoTemplate,
    ArgoWorkflowTemplate,
};
pub use model::{DagBlock, DagTask, PipelineTemplate, StepTask, StepsBlock, TemplateBlock};
