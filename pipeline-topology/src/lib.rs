//! # Pipeline Topology
//!
//! Extracts a normalized node/link graph from pipeline templates.
//!
//! A template encodes task ordering in one of two ways:
//!
//! - **DAG blocks**: every task lists the tasks it depends on
//! - **Steps blocks**: tasks are grouped into ordered batches, and each batch
//!   waits for the whole previous batch
//!
//! The classifier reports which encodings are present; the extractor turns
//! the winning encoding (DAG beats Steps) into [`topology::Node`]s and
//! [`topology::Link`]s for rendering and dependency analysis. Extraction is
//! pure and synchronous; it does not execute, schedule, or validate pipelines.
//!
//! ## Quick Start
//!
//! ```rust
//! use pipeline_topology::prelude::*;
//!
//! let template = PipelineTemplate::new("release").with_block(
//!     DagBlock::new()
//!         .with_task(DagTask::new("build").with_implementation("make"))
//!         .with_task(DagTask::new("test").with_implementation("make").with_dependencies(["build"])),
//! );
//!
//! let graph = extract(&template)?;
//! assert_eq!(graph.links, vec![Link::new("build", "test")]);
//! # Ok::<(), TopologyError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod errors;
pub mod events;
pub mod observability;
pub mod template;
pub mod testing;
pub mod topology;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{DanglingPolicy, ExtractOptions};
    pub use crate::errors::{
        ContractErrorInfo, DanglingDependencyError, TopologyError, UnsupportedTopologyError,
    };
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink, TopologyEvent};
    pub use crate::template::{DagBlock, DagTask, PipelineTemplate, StepTask, StepsBlock, TemplateBlock};
    pub use crate::topology::{
        classify, extract, Classification, DanglingReference, Link, Node, Topology,
        TopologyExtractor, TopologyGraph,
    };
}
