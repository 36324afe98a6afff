// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use hyperdpo_core::{
    apply_rule, evolve, evolve_traced, CounterIds, EdgeId, RewriteOptions, SeededIds, StopReason,
    VertexId,
};
use hyperdpo_dry_tests::{
    edge_set, graph_from_edges, graph_with_vertices, path_graph, pendant_edge_rule,
    pendant_vertex_deletion_rule, vertex_labels, RuleBuilder, ScriptedIds,
};

#[test]
fn pendant_edge_is_added_at_every_match() {
    let host = graph_from_edges(&[("e0", &["a", "b"]), ("e1", &["b", "c"])]);
    let rule = pendant_edge_rule();
    let rewrites = apply_rule(&host, &rule, &mut CounterIds::new()).unwrap();
    assert_eq!(rewrites.len(), 4);

    for rewrite in &rewrites {
        let result = &rewrite.result;
        assert_eq!(result.vertex_count(), host.vertex_count() + 1);
        assert_eq!(result.edge_count(), host.edge_count() + 1);
        for (id, members) in host.edges() {
            assert_eq!(result.edge(id), Some(members), "host edge {id} must survive");
        }
        let (_, added) = result
            .edges()
            .find(|(id, _)| !host.contains_edge(id))
            .unwrap();
        let x_image = &rewrite.vertex_mapping[&VertexId::from("x")];
        assert!(added.contains(x_image));
        assert_eq!(added.iter().filter(|v| !host.contains_vertex(v)).count(), 1);
    }
}

#[test]
fn replacement_edge_order_does_not_change_rewrites() {
    let host = graph_from_edges(&[("e0", &["a", "b"]), ("e1", &["b", "c"])]);
    let reordered = RuleBuilder::new()
        .left_edge("e0", &["x", "y"])
        .interface_edge("e0", &["x", "y"])
        .right_edge("e0", &["x", "z"])
        .right_edge("e1", &["x", "y"])
        .build();
    let expected = apply_rule(&host, &pendant_edge_rule(), &mut CounterIds::new()).unwrap();
    let actual = apply_rule(&host, &reordered, &mut CounterIds::new()).unwrap();
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(&expected) {
        assert_eq!(a.vertex_mapping, e.vertex_mapping);
        assert_eq!(a.result.structural_digest(), e.result.structural_digest());
        let copies = a.result.edges().filter(|(_, m)| **m == edge_set(&["a", "b"]));
        assert_eq!(copies.count(), 1);
    }
}

#[test]
fn interface_edge_with_a_smaller_vertex_set_does_not_keep_the_edge() {
    let host = graph_from_edges(&[("e0", &["a", "b"])]);
    let rule = RuleBuilder::new()
        .left_edge("e0", &["x", "y"])
        .interface_edge("e0", &["x"])
        .right_edge("e0", &["x", "z"])
        .build();
    let rewrites = apply_rule(&host, &rule, &mut CounterIds::new()).unwrap();
    let first = &rewrites[0];
    assert_eq!(first.vertex_mapping[&VertexId::from("x")], VertexId::from("a"));
    let edges: Vec<_> = first.result.edges().map(|(_, m)| m.clone()).collect();
    assert_eq!(edges, [edge_set(&["a", "new_v0"])]);
    assert_eq!(vertex_labels(&first.result), ["a", "new_v0"]);
}

#[test]
fn deletion_skips_matches_that_would_dangle() {
    let host = graph_from_edges(&[("e0", &["a", "b"]), ("e1", &["b", "c"])]);
    let rule = pendant_vertex_deletion_rule();
    let rewrites = apply_rule(&host, &rule, &mut CounterIds::new()).unwrap();

    let deleted: Vec<&str> = rewrites
        .iter()
        .map(|r| r.vertex_mapping[&VertexId::from("y")].as_str())
        .collect();
    assert_eq!(deleted, ["a", "c"]);

    assert_eq!(rewrites[0].result, graph_from_edges(&[("e1", &["b", "c"])]));
    assert_eq!(rewrites[1].result, graph_from_edges(&[("e0", &["a", "b"])]));
}

#[test]
fn evolve_halts_after_the_only_applicable_rewrite() {
    let host = graph_from_edges(&[("e0", &["a", "b"])]);
    let rule = pendant_vertex_deletion_rule();
    let evolution = evolve_traced(
        host,
        &rule,
        5,
        RewriteOptions::default(),
        &mut CounterIds::new(),
    )
    .unwrap();
    assert_eq!(evolution.applied, 1);
    assert_eq!(evolution.stop, StopReason::NoApplicableMatch);
    assert_eq!(evolution.graph, graph_with_vertices(&["a"], &[]));
}

#[test]
fn evolve_consumes_path_from_its_first_end() {
    // Each step deletes the pendant vertex reached first in match order.
    let rule = pendant_vertex_deletion_rule();
    let result = evolve(path_graph(4), &rule, 3, false, &mut CounterIds::new()).unwrap();
    assert_eq!(result.edge_count(), 1);
    assert_eq!(result.vertex_count(), 2);
}

#[test]
fn clean_runs_before_each_step_not_after_the_last() {
    let host = graph_from_edges(&[("e0", &["a", "b"]), ("e1", &["b", "c"])]);
    let rule = pendant_vertex_deletion_rule();
    let options = RewriteOptions {
        clean: true,
        ..RewriteOptions::default()
    };
    let evolution = evolve_traced(host, &rule, 2, options, &mut CounterIds::new()).unwrap();
    assert_eq!(evolution.stop, StopReason::StepsExhausted);
    assert_eq!(evolution.graph.edge_count(), 0);
    assert_eq!(vertex_labels(&evolution.graph), ["b"]);
}

#[test]
fn fresh_ids_skip_tokens_taken_in_the_host() {
    let host = graph_from_edges(&[("e0", &["b", "new_v0"])]);
    let rule = pendant_edge_rule();
    let mut ids = ScriptedIds::new(["0", "1"]);
    let rewrites = apply_rule(&host, &rule, &mut ids).unwrap();
    let first = &rewrites[0].result;
    assert!(first.contains_vertex(&VertexId::from("new_v1")));
    assert_eq!(
        first.edge(&EdgeId::from("new_es0")),
        Some(&edge_set(&["b", "new_v1"]))
    );
}

#[test]
fn seeded_evolution_is_repeatable() {
    let host = graph_from_edges(&[("e0", &["a", "b"]), ("e1", &["b", "c"])]);
    let rule = pendant_edge_rule();
    let run = |seed| evolve(host.clone(), &rule, 4, false, &mut SeededIds::from_seed(seed)).unwrap();
    let first = run(7);
    assert_eq!(first, run(7));
    assert_eq!(first.edge_count(), 6);
    assert_ne!(first, run(8));
}
