use chrono::{DateTime, Utc};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction::{Incoming, Outgoing};
use std::collections::{HashMap, HashSet};

use crate::models::Transaction;

/// Index of an account node inside a [`TransactionGraph`]
pub type NodeId = NodeIndex;

/// Transfer carried by one directed edge (parallel edges allowed)
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub transaction_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// Account node with precomputed activity statistics
#[derive(Debug, Clone, PartialEq)]
pub struct AccountNode {
    pub id: String,
    pub total_transactions: usize,
    pub in_degree: usize,
    pub out_degree: usize,
}

impl AccountNode {
    fn new(id: String) -> Self {
        Self {
            id,
            total_transactions: 0,
            in_degree: 0,
            out_degree: 0,
        }
    }
}

/// Directed transaction multigraph. Node indices follow first-seen order and
/// edge indices follow transaction order, so every traversal is deterministic.
#[derive(Debug, Clone, Default)]
pub struct TransactionGraph {
    graph: DiGraph<AccountNode, Edge>,
    node_map: HashMap<String, NodeIndex>,
}

impl TransactionGraph {
    pub fn build(transactions: &[Transaction]) -> Self {
        let mut graph = Self::default();

        for tx in transactions {
            let from = graph.get_or_add_node(&tx.sender_id);
            let to = graph.get_or_add_node(&tx.receiver_id);
            graph.add_transfer(
                from,
                to,
                Edge {
                    transaction_id: tx.transaction_id.clone(),
                    amount: tx.amount,
                    timestamp: tx.timestamp,
                },
            );
        }

        graph
    }

    fn get_or_add_node(&mut self, account_id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(account_id) {
            return idx;
        }
        let idx = self.graph.add_node(AccountNode::new(account_id.to_string()));
        self.node_map.insert(account_id.to_string(), idx);
        idx
    }

    fn add_transfer(&mut self, from: NodeIndex, to: NodeIndex, edge: Edge) {
        self.graph.add_edge(from, to, edge);

        let sender = &mut self.graph[from];
        sender.out_degree += 1;
        sender.total_transactions += 1;

        let receiver = &mut self.graph[to];
        receiver.in_degree += 1;
        receiver.total_transactions += 1;
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node indices in first-seen order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.graph.node_indices()
    }

    /// Accounts in first-seen order
    pub fn accounts(&self) -> impl Iterator<Item = &AccountNode> {
        self.graph.node_weights()
    }

    /// Every transfer in transaction order
    pub fn edges(&self) -> impl Iterator<Item = EdgeReference<'_, Edge>> {
        self.graph.edge_references()
    }

    pub fn node(&self, id: NodeId) -> &AccountNode {
        &self.graph[id]
    }

    pub fn node_id(&self, account_id: &str) -> Option<NodeId> {
        self.node_map.get(account_id).copied()
    }

    pub fn get(&self, account_id: &str) -> Option<&AccountNode> {
        self.node_id(account_id).map(|idx| &self.graph[idx])
    }

    pub fn account_id(&self, id: NodeId) -> &str {
        &self.graph[id].id
    }

    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = EdgeReference<'_, Edge>> {
        self.directed(id, Outgoing)
    }

    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = EdgeReference<'_, Edge>> {
        self.directed(id, Incoming)
    }

    // petgraph walks adjacency newest edge first
    fn directed(
        &self,
        id: NodeId,
        direction: petgraph::Direction,
    ) -> impl Iterator<Item = EdgeReference<'_, Edge>> {
        let mut edges: Vec<_> = self.graph.edges_directed(id, direction).collect();
        edges.reverse();
        edges.into_iter()
    }

    /// Distinct accounts this node has sent to or received from
    pub fn counterparty_count(&self, id: NodeId) -> usize {
        let partners: HashSet<NodeId> = self
            .graph
            .neighbors_directed(id, Incoming)
            .chain(self.graph.neighbors_directed(id, Outgoing))
            .collect();
        partners.len()
    }

    /// Mean outgoing amount; accounts that never send average to zero
    pub fn average_outgoing_amount(&self, id: NodeId) -> f64 {
        let total: f64 = self
            .graph
            .edges_directed(id, Outgoing)
            .map(|e| e.weight().amount)
            .sum();
        total / self.graph[id].out_degree.max(1) as f64
    }
}
