//! Topology classification.

use crate::template::{PipelineTemplate, TemplateBlock};
use serde::{Deserialize, Serialize};

/// The encoding extraction will use for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Explicit dependency lists.
    Dag,
    /// Ordered step groups.
    Steps,
}

/// Which topology encodings a template contains.
///
/// Both flags may be set: a template can carry reusable sub-templates of
/// either kind, and entry points are not resolved here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    /// At least one DAG block is present.
    pub has_dag: bool,
    /// At least one Steps block is present.
    pub has_steps: bool,
}

impl Classification {
    /// Scans every block of the template.
    #[must_use]
    pub fn scan(template: &PipelineTemplate) -> Self {
        template
            .blocks
            .iter()
            .fold(Self::default(), |acc, block| match block {
                TemplateBlock::Dag(_) => Self { has_dag: true, ..acc },
                TemplateBlock::Steps(_) => Self { has_steps: true, ..acc },
            })
    }

    /// The encoding extraction uses. DAG wins when both are present.
    #[must_use]
    pub fn topology(self) -> Option<Topology> {
        if self.has_dag {
            Some(Topology::Dag)
        } else if self.has_steps {
            Some(Topology::Steps)
        } else {
            None
        }
    }

    /// Human-readable summary for diagnostics.
    #[must_use]
    pub fn describe(self, template: &str) -> String {
        match (self.has_dag, self.has_steps) {
            (true, true) => format!("Both DAG and Steps structures found in workflow \"{template}\""),
            (true, false) => format!("DAG structure found in workflow \"{template}\""),
            (false, true) => format!("Steps structure found in workflow \"{template}\""),
            (false, false) => {
                format!("Neither DAG nor Steps structure found in workflow \"{template}\"")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{DagBlock, StepsBlock};

    #[test]
    fn test_scan_dag_only() {
        let template = PipelineTemplate::new("t").with_block(DagBlock::new());
        let c = Classification::scan(&template);

        assert!(c.has_dag);
        assert!(!c.has_steps);
        assert_eq!(c.topology(), Some(Topology::Dag));
    }

    #[test]
    fn test_scan_both_prefers_dag() {
        let template = PipelineTemplate::new("t")
            .with_block(StepsBlock::new())
            .with_block(DagBlock::new());
        let c = Classification::scan(&template);

        assert!(c.has_dag && c.has_steps);
        assert_eq!(c.topology(), Some(Topology::Dag));
    }

    #[test]
    fn test_scan_steps_only() {
        let template = PipelineTemplate::new("t").with_block(StepsBlock::new());
        assert_eq!(Classification::scan(&template).topology(), Some(Topology::Steps));
    }

    #[test]
    fn test_scan_neither() {
        let c = Classification::scan(&PipelineTemplate::new("t"));

        assert_eq!(c, Classification::default());
        assert_eq!(c.topology(), None);
        assert_eq!(
            c.describe("t"),
            "Neither DAG nor Steps structure found in workflow \"t\""
        );
    }

    #[test]
    fn test_describe_both() {
        let c = Classification {
            has_dag: true,
            has_steps: true,
        };
        assert!(c.describe("wf").starts_with("Both DAG and Steps"));
    }
}
