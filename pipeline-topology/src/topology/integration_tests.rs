//! End-to-end tests: documents in, graphs out.

#[cfg(test)]
mod tests {
    use crate::config::{DanglingPolicy, ExtractOptions};
    use crate::errors::TopologyError;
    use crate::template::{DagBlock, DagTask, PipelineTemplate, StepsBlock};
    use crate::testing::{
        assert_links_unordered_eq, assert_referential_integrity, assert_unique_node_ids,
        diamond_template, layered_dag, mixed_template, steps_template, wide_steps,
    };
    use crate::topology::{extract, Node, TopologyExtractor};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::thread;

    fn barrier_links(groups: &[Vec<String>]) -> BTreeSet<(String, String)> {
        let non_empty: Vec<&Vec<String>> = groups.iter().filter(|g| !g.is_empty()).collect();
        non_empty
            .windows(2)
            .flat_map(|w| {
                w[0].iter()
                    .flat_map(move |a| w[1].iter().map(move |b| (a.clone(), b.clone())))
            })
            .collect()
    }

    #[test]
    fn test_extraction_is_deterministic() {
        for template in [diamond_template(), mixed_template(), wide_steps(4, 3), layered_dag(3, 3)] {
            let first = extract(&template).unwrap();
            let second = extract(&template).unwrap();

            assert_eq!(first, second);
            assert_eq!(first.fingerprint(), second.fingerprint());
        }
    }

    #[test]
    fn test_referential_integrity_holds() {
        for template in [diamond_template(), mixed_template(), wide_steps(3, 2), layered_dag(4, 2)] {
            let graph = extract(&template).unwrap();
            assert_referential_integrity(&graph);
            assert_unique_node_ids(&graph);
            assert!(graph.dangling_links().is_empty());
        }
    }

    #[test]
    fn test_dag_takes_precedence_over_steps() {
        let dag_only = extract(&diamond_template()).unwrap();
        let mixed = extract(&mixed_template()).unwrap();

        assert_eq!(mixed, dag_only);
        assert!(mixed.node("drain").is_none());
    }

    #[test]
    fn test_precedence_independent_of_block_order() {
        let template = PipelineTemplate::new("steps-first")
            .with_block(StepsBlock::new().with_group(["X"]).with_group(["Y"]))
            .with_block(
                DagBlock::new()
                    .with_task(DagTask::new("A"))
                    .with_task(DagTask::new("B").with_dependencies(["A"])),
            );
        let graph = extract(&template).unwrap();

        assert_eq!(graph.nodes, vec![Node::new("A", "A"), Node::new("B", "B")]);
        assert_links_unordered_eq(&graph, &[("A", "B")]);
    }

    #[test]
    fn test_diamond() {
        let graph = extract(&diamond_template()).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_links_unordered_eq(&graph, &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        assert_eq!(graph.roots().len(), 1);
        assert_eq!(graph.leaves()[0].id, "D");
    }

    #[test]
    fn test_steps_barrier_law() {
        let template = steps_template("barrier", &[&["A", "B"], &[], &["C", "D", "E"], &["F"], &[]]);
        let graph = extract(&template).unwrap();

        // ids are assigned in walk order: A=1 B=2 C=3 D=4 E=5 F=6
        let groups: Vec<Vec<String>> = vec![
            vec!["1".into(), "2".into()],
            vec![],
            vec!["3".into(), "4".into(), "5".into()],
            vec!["6".into()],
            vec![],
        ];
        let actual: BTreeSet<(String, String)> = graph
            .links
            .iter()
            .map(|l| (l.source.clone(), l.target.clone()))
            .collect();

        assert_eq!(actual, barrier_links(&groups));
        assert_eq!(graph.link_count(), 2 * 3 + 3);
        assert_eq!(graph.node("6").map(|n| n.label.as_str()), Some("F"));
    }

    #[test]
    fn test_first_group_has_no_incoming_links() {
        let graph = extract(&wide_steps(3, 4)).unwrap();

        for id in 1..=4 {
            assert!(graph.predecessors(&id.to_string()).is_empty());
        }
        assert_eq!(graph.predecessors("5").len(), 4);
    }

    #[test]
    fn test_unsupported_topology() {
        let err = extract(&PipelineTemplate::new("containers-only")).unwrap_err();

        assert!(matches!(err, TopologyError::UnsupportedTopology(_)));
        assert!(err.to_string().contains("containers-only"));
    }

    #[test]
    fn test_argo_document_end_to_end() {
        let yaml = r"
argoWorkflowTemplate:
  metadata:
    name: release
  spec:
    entrypoint: main
    templates:
      - name: main
        dag:
          tasks:
            - name: build
              template: make
            - name: test
              template: make
              dependencies: [build]
            - name: publish
              template: upload
              dependencies: [test]
      - name: make
        container:
          image: rust:1.75
      - name: upload
        script:
          image: alpine
";
        let template = PipelineTemplate::from_argo_yaml_str(yaml).unwrap();
        let graph = extract(&template).unwrap();

        assert_eq!(
            graph.nodes,
            vec![
                Node::new("build", "make"),
                Node::new("test", "make"),
                Node::new("publish", "upload"),
            ]
        );
        assert_links_unordered_eq(&graph, &[("build", "test"), ("test", "publish")]);
    }

    #[test]
    fn test_dangling_policies_agree_on_valid_documents() {
        let fail_fast = TopologyExtractor::new()
            .with_options(ExtractOptions::new().with_dangling_policy(DanglingPolicy::FailFast));

        let template = layered_dag(3, 3);
        assert_eq!(fail_fast.extract(&template).unwrap(), extract(&template).unwrap());
    }

    #[test]
    fn test_parallel_extraction_shares_nothing() {
        let extractor = Arc::new(TopologyExtractor::new());
        let expected = extract(&layered_dag(5, 4)).unwrap().fingerprint();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let extractor = Arc::clone(&extractor);
                thread::spawn(move || extractor.extract(&layered_dag(5, 4)).unwrap().fingerprint())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
