//! Template fixtures for topology tests and benchmarks.

use crate::template::{DagBlock, DagTask, PipelineTemplate, StepsBlock};

/// The classic four-task diamond: A → {B, C} → D.
#[must_use]
pub fn diamond_template() -> PipelineTemplate {
    PipelineTemplate::new("dag-diamond").with_block(
        DagBlock::named("diamond")
            .with_task(DagTask::new("A").with_implementation("echo"))
            .with_task(DagTask::new("B").with_implementation("echo").with_dependencies(["A"]))
            .with_task(DagTask::new("C").with_implementation("echo").with_dependencies(["A"]))
            .with_task(
                DagTask::new("D")
                    .with_implementation("echo")
                    .with_dependencies(["B", "C"]),
            ),
    )
}

/// A Steps template from a list of groups of task names.
#[must_use]
pub fn steps_template(name: &str, groups: &[&[&str]]) -> PipelineTemplate {
    let block = groups
        .iter()
        .fold(StepsBlock::named("main"), |block, group| {
            block.with_group(group.iter().copied())
        });
    PipelineTemplate::new(name).with_block(block)
}

/// The diamond DAG plus an unrelated Steps block.
#[must_use]
pub fn mixed_template() -> PipelineTemplate {
    diamond_template().with_block(
        StepsBlock::named("cleanup")
            .with_group(["drain"])
            .with_group(["archive", "notify"]),
    )
}

/// A DAG of `layers` layers of `width` tasks, each task depending on
/// every task of the previous layer.
#[must_use]
pub fn layered_dag(layers: usize, width: usize) -> PipelineTemplate {
    let mut block = DagBlock::named("layered");
    for layer in 0..layers {
        for i in 0..width {
            let deps: Vec<String> = if layer == 0 {
                Vec::new()
            } else {
                (0..width).map(|j| format!("t{}_{}", layer - 1, j)).collect()
            };
            block = block.with_task(
                DagTask::new(format!("t{layer}_{i}"))
                    .with_implementation("work")
                    .with_dependencies(deps),
            );
        }
    }
    PipelineTemplate::new("layered-dag").with_block(block)
}

/// A Steps template with `groups` groups of `width` steps.
#[must_use]
pub fn wide_steps(groups: usize, width: usize) -> PipelineTemplate {
    let block = (0..groups).fold(StepsBlock::named("wide"), |block, g| {
        block.with_group((0..width).map(|i| format!("s{g}_{i}")))
    });
    PipelineTemplate::new("wide-steps").with_block(block)
}
