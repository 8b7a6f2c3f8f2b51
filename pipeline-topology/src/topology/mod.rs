//! Topology classification and graph extraction.
//!
//! This module provides:
//! - The topology classifier
//! - The graph extractor for DAG and Steps templates
//! - The extracted graph types

mod classifier;
mod extractor;
mod graph;
mod integration_tests;

pub use classifier::{Classification, Topology};
pub use extractor::{classify, extract, TopologyExtractor};
pub use graph::{DanglingReference, Link, Node, TopologyGraph};
