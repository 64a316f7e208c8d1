// Copyright (c) 2024 DeFi Protocol Indexer
// Shell Network Detection using Depth-Bounded BFS over Low-Activity Accounts

use petgraph::visit::EdgeRef;
use std::collections::VecDeque;

use crate::constants::{SHELL_MAX_DEPTH, SHELL_MAX_INTERMEDIATE_TRANSACTIONS, SHELL_MIN_PATH_NODES};
use crate::graph::{NodeId, TransactionGraph};

/// Chain of pass-through accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellChain {
    /// Full path from the BFS root
    pub members: Vec<String>,
    /// Interior accounts (path without its endpoints)
    pub intermediates: Vec<String>,
}

/// BFS frontier entry
struct Frontier {
    node: NodeId,
    path: Vec<NodeId>,
    depth: usize,
}

/// Shell network analyzer
pub struct ShellNetworkAnalyzer {
    max_depth: usize,
    min_path_nodes: usize,
    max_intermediate_transactions: usize,
}

impl ShellNetworkAnalyzer {
    pub fn new() -> Self {
        Self {
            max_depth: SHELL_MAX_DEPTH,
            min_path_nodes: SHELL_MIN_PATH_NODES,
            max_intermediate_transactions: SHELL_MAX_INTERMEDIATE_TRANSACTIONS,
        }
    }

    /// BFS from every account. Each root reaches a node at most once, so
    /// alternate routes through an already reached node are not reported,
    /// and the same path found from different roots is reported each time.
    pub fn analyze(&self, graph: &TransactionGraph) -> Vec<ShellChain> {
        let mut chains = Vec::new();

        for root in graph.node_ids() {
            let mut visited = vec![false; graph.node_count()];
            visited[root.index()] = true;

            let mut queue = VecDeque::new();
            queue.push_back(Frontier {
                node: root,
                path: vec![root],
                depth: 0,
            });

            while let Some(Frontier { node, path, depth }) = queue.pop_front() {
                if depth >= self.max_depth {
                    continue;
                }

                for edge in graph.outgoing(node) {
                    let neighbor = edge.target();
                    if visited[neighbor.index()] {
                        continue;
                    }
                    visited[neighbor.index()] = true;

                    let mut next_path = path.clone();
                    next_path.push(neighbor);

                    if let Some(chain) = self.qualify(graph, &next_path) {
                        chains.push(chain);
                    }

                    queue.push_back(Frontier {
                        node: neighbor,
                        path: next_path,
                        depth: depth + 1,
                    });
                }
            }
        }

        chains
    }

    fn qualify(&self, graph: &TransactionGraph, path: &[NodeId]) -> Option<ShellChain> {
        if path.len() < self.min_path_nodes {
            return None;
        }

        let interior = &path[1..path.len() - 1];
        let low_activity = interior
            .iter()
            .all(|&n| graph.node(n).total_transactions <= self.max_intermediate_transactions);
        if interior.is_empty() || !low_activity {
            return None;
        }

        let ids = |nodes: &[NodeId]| -> Vec<String> {
            nodes.iter().map(|&n| graph.account_id(n).to_string()).collect()
        };

        Some(ShellChain {
            members: ids(path),
            intermediates: ids(interior),
        })
    }
}

impl Default for ShellNetworkAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
