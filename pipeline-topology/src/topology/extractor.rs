//! Graph extraction.

use super::{Classification, DanglingReference, Link, Node, Topology, TopologyGraph};
use crate::config::{DanglingPolicy, ExtractOptions};
use crate::errors::{DanglingDependencyError, TopologyError, UnsupportedTopologyError};
use crate::events::{EventSink, NoOpEventSink, TopologyEvent};
use crate::template::{DagBlock, PipelineTemplate};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Classifies templates and extracts their node/link graph.
///
/// Holds no per-call state; one extractor can serve any number of
/// templates, from any number of threads.
#[derive(Clone)]
pub struct TopologyExtractor {
    options: ExtractOptions,
    sink: Arc<dyn EventSink>,
}

impl fmt::Debug for TopologyExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologyExtractor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for TopologyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyExtractor {
    /// Creates an extractor with default options and no event sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the options.
    #[must_use]
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Reports which encodings the template contains.
    pub fn classify(&self, template: &PipelineTemplate) -> Classification {
        let classification = Classification::scan(template);

        info!(
            template = %template.name,
            has_dag = classification.has_dag,
            has_steps = classification.has_steps,
            "{}", classification.describe(&template.name)
        );
        self.emit(|| TopologyEvent::classified(&template.name, classification));

        classification
    }

    /// Extracts the template's graph.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnsupportedTopology`] when the template has no
    /// DAG and no Steps block, and [`TopologyError::DanglingDependency`] for an
    /// unresolved dependency under [`DanglingPolicy::FailFast`].
    pub fn extract(&self, template: &PipelineTemplate) -> Result<TopologyGraph, TopologyError> {
        let graph = match self.classify(template).topology() {
            Some(Topology::Dag) => self.extract_dag(template)?,
            Some(Topology::Steps) => extract_steps(template),
            None => return Err(UnsupportedTopologyError::new(&template.name).into()),
        };

        debug!(
            template = %template.name,
            nodes = graph.node_count(),
            links = graph.link_count(),
            degraded = graph.is_degraded(),
            "Extracted topology"
        );
        self.emit(|| TopologyEvent::extracted(&template.name, &graph));

        Ok(graph)
    }

    fn extract_dag(&self, template: &PipelineTemplate) -> Result<TopologyGraph, TopologyError> {
        let mut graph = TopologyGraph::default();
        let mut taken: HashSet<String> = HashSet::new();

        for (index, block) in template.dag_blocks() {
            let block_name = template.blocks[index].display_name(index);
            let ids = assign_dag_ids(block, &block_name, &mut taken);
            let lookup: HashMap<&str, &str> = block
                .tasks
                .iter()
                .zip(&ids)
                .map(|(task, id)| (task.name.as_str(), id.as_str()))
                .collect();

            for (task, id) in block.tasks.iter().zip(&ids) {
                graph.nodes.push(Node::new(id, task.label()));
            }

            for (task, target) in block.tasks.iter().zip(&ids) {
                for dep in &task.dependencies {
                    if let Some(source) = lookup.get(dep.as_str()) {
                        graph.links.push(Link::new(*source, target));
                        continue;
                    }

                    let reference = DanglingReference {
                        block: block_name.clone(),
                        task: task.name.clone(),
                        target: target.clone(),
                        dependency: dep.clone(),
                    };
                    self.on_dangling(template, &reference)?;
                    graph.links.push(Link::new(dep, target));
                    graph.degraded.push(reference);
                }
            }
        }

        Ok(graph)
    }

    fn on_dangling(
        &self,
        template: &PipelineTemplate,
        reference: &DanglingReference,
    ) -> Result<(), TopologyError> {
        warn!(
            template = %template.name,
            block = %reference.block,
            task = %reference.task,
            dependency = %reference.dependency,
            policy = ?self.options.dangling_policy,
            "Dependency does not name a task of its block"
        );
        self.emit(|| TopologyEvent::dangling(&template.name, reference));

        match self.options.dangling_policy {
            DanglingPolicy::Degrade => Ok(()),
            DanglingPolicy::FailFast => Err(DanglingDependencyError::new(
                &reference.task,
                &reference.dependency,
                &reference.block,
            )
            .into()),
        }
    }

    fn emit(&self, event: impl FnOnce() -> TopologyEvent) {
        if self.options.emit_events {
            self.sink.emit(&event());
        }
    }
}

/// Assigns each task of a block, in order, a node id unique across the graph.
///
/// The task name is used as is unless it is already taken, in which case it
/// is qualified with the block name.
fn assign_dag_ids(block: &DagBlock, block_name: &str, taken: &mut HashSet<String>) -> Vec<String> {
    let mut ids = Vec::with_capacity(block.tasks.len());

    for task in &block.tasks {
        let mut id = task.name.clone();
        let mut suffix = 1;
        while taken.contains(&id) {
            id = if suffix == 1 {
                format!("{block_name}/{}", task.name)
            } else {
                format!("{block_name}/{}#{suffix}", task.name)
            };
            suffix += 1;
        }
        taken.insert(id.clone());
        ids.push(id);
    }

    ids
}

/// Numbers every step from 1 across all Steps blocks and links each step
/// group to the nearest non-empty group before it in the same block.
fn extract_steps(template: &PipelineTemplate) -> TopologyGraph {
    let mut graph = TopologyGraph::default();
    let mut next_id: usize = 1;

    for (_, block) in template.steps_blocks() {
        let mut previous: Vec<String> = Vec::new();

        for group in block.step_groups.iter().filter(|g| !g.is_empty()) {
            let mut current = Vec::with_capacity(group.len());

            for step in group {
                let id = next_id.to_string();
                next_id += 1;

                graph.nodes.push(Node::new(&id, &step.name));
                graph
                    .links
                    .extend(previous.iter().map(|source| Link::new(source, &id)));
                current.push(id);
            }

            previous = current;
        }
    }

    graph
}

/// Classifies a template with a default extractor.
pub fn classify(template: &PipelineTemplate) -> Classification {
    TopologyExtractor::new().classify(template)
}

/// Extracts a template's graph with a default extractor.
///
/// # Errors
///
/// See [`TopologyExtractor::extract`].
pub fn extract(template: &PipelineTemplate) -> Result<TopologyGraph, TopologyError> {
    TopologyExtractor::new().extract(template)
}
