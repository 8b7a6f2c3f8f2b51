//! Testing utilities for topology extraction.
//!
//! This module provides:
//! - Template fixtures (diamond, layered, mixed, wide steps)
//! - Graph assertions

mod assertions;
mod fixtures;

pub use assertions::{
    assert_links_unordered_eq, assert_referential_integrity, assert_unique_node_ids,
};
pub use fixtures::{diamond_template, layered_dag, mixed_template, steps_template, wide_steps};
