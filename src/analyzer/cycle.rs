// Copyright (c) 2024 DeFi Protocol Indexer
// Round-Tripping Detection using Depth-Bounded DFS over the Transaction Graph

use petgraph::visit::EdgeRef;
use std::collections::HashSet;

use crate::constants::{MAX_CYCLE_LENGTH, MIN_CYCLE_LENGTH};
use crate::graph::{NodeId, TransactionGraph};

/// Simple cycle, members in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePattern {
    pub members: Vec<String>,
}

/// Cycle analyzer: finds short money loops (A → B → C → A)
pub struct CycleAnalyzer {
    min_length: usize,
    max_length: usize,
}

/// Traversal state shared across one analysis pass
struct CycleSearch<'g> {
    graph: &'g TransactionGraph,
    max_length: usize,
    min_length: usize,
    visited: Vec<bool>,
    on_path: Vec<bool>,
    path: Vec<NodeId>,
    seen: HashSet<Vec<NodeId>>,
    cycles: Vec<Vec<NodeId>>,
}

impl<'g> CycleSearch<'g> {
    fn visit(&mut self, node: NodeId) {
        self.visited[node.index()] = true;
        self.on_path[node.index()] = true;
        self.path.push(node);

        let graph = self.graph;
        for edge in graph.outgoing(node) {
            let neighbor = edge.target();

            if self.on_path[neighbor.index()] {
                if let Some(start) = self.path.iter().position(|&n| n == neighbor) {
                    self.record(start);
                }
            } else if !self.visited[neighbor.index()] && self.path.len() < self.max_length {
                self.visit(neighbor);
            }
        }

        self.path.pop();
        self.on_path[node.index()] = false;
    }

    fn record(&mut self, start: usize) {
        let cycle = &self.path[start..];
        if cycle.len() < self.min_length || cycle.len() > self.max_length {
            return;
        }
        // Same vertex set means same ring, whatever the rotation or parallel edge
        if self.seen.insert(canonical_key(cycle)) {
            self.cycles.push(cycle.to_vec());
        }
    }
}

impl CycleAnalyzer {
    pub fn new() -> Self {
        Self {
            min_length: MIN_CYCLE_LENGTH,
            max_length: MAX_CYCLE_LENGTH,
        }
    }

    /// DFS from every unvisited account; keeps cycles of 3-5 accounts
    pub fn analyze(&self, graph: &TransactionGraph) -> Vec<CyclePattern> {
        let mut search = CycleSearch {
            graph,
            max_length: self.max_length,
            min_length: self.min_length,
            visited: vec![false; graph.node_count()],
            on_path: vec![false; graph.node_count()],
            path: Vec::with_capacity(self.max_length),
            seen: HashSet::new(),
            cycles: Vec::new(),
        };

        for node in graph.node_ids() {
            if !search.visited[node.index()] {
                search.visit(node);
            }
        }

        search
            .cycles
            .into_iter()
            .map(|cycle| CyclePattern {
                members: cycle
                    .into_iter()
                    .map(|n| graph.account_id(n).to_string())
                    .collect(),
            })
            .collect()
    }
}

fn canonical_key(cycle: &[NodeId]) -> Vec<NodeId> {
    let mut key = cycle.to_vec();
    key.sort_unstable();
    key
}

impl Default for CycleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use chrono::{Duration, TimeZone, Utc};

    fn graph_of(pairs: &[(&str, &str)]) -> TransactionGraph {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let txs: Vec<Transaction> = pairs
            .iter()
            .enumerate()
            .map(|(i, (from, to))| {
                Transaction::new(format!("t{}", i), *from, *to, 100.0, t0 + Duration::hours(i as i64))
            })
            .collect();
        TransactionGraph::build(&txs)
    }

    #[test]
    fn test_triangle_detected() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let cycles = CycleAnalyzer::new().analyze(&graph);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].members, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_two_cycle_and_self_loop_ignored() {
        let graph = graph_of(&[("A", "B"), ("B", "A"), ("C", "C")]);
        assert!(CycleAnalyzer::new().analyze(&graph).is_empty());
    }

    #[test]
    fn test_five_cycle_kept_six_cycle_cut() {
        let five = graph_of(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"), ("E", "A")]);
        let cycles = CycleAnalyzer::new().analyze(&five);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].members.len(), 5);

        let six = graph_of(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("D", "E"),
            ("E", "F"),
            ("F", "A"),
        ]);
        assert!(CycleAnalyzer::new().analyze(&six).is_empty());
    }

    #[test]
    fn test_acyclic_graph() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("A", "C")]);
        assert!(CycleAnalyzer::new().analyze(&graph).is_empty());
    }

    #[test]
    fn test_parallel_back_edge_reports_cycle_once() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "A"), ("C", "A")]);
        let cycles = CycleAnalyzer::new().analyze(&graph);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].members, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_canonical_key_ignores_rotation() {
        let key = |ids: &[usize]| {
            let nodes: Vec<NodeId> = ids.iter().map(|&i| NodeId::new(i)).collect();
            canonical_key(&nodes)
        };
        assert_eq!(key(&[2, 0, 1]), key(&[0, 1, 2]));
        assert_eq!(key(&[3, 1, 2, 0]), key(&[0, 2, 1, 3]));
        assert_ne!(key(&[0, 1, 2]), key(&[0, 1, 3]));
    }

    #[test]
    fn test_lengths_within_bounds() {
        let graph = graph_of(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("C", "D"),
            ("D", "A"),
            ("D", "B"),
        ]);
        let cycles = CycleAnalyzer::new().analyze(&graph);

        assert!(!cycles.is_empty());
        let mut keys = HashSet::new();
        for cycle in &cycles {
            assert!((3..=5).contains(&cycle.members.len()));
            let mut key = cycle.members.clone();
            key.sort();
            assert!(keys.insert(key));
        }
    }
}
