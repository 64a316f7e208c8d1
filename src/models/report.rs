use chrono::{DateTime, Utc};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::graph::TransactionGraph;
use crate::models::{DetectionResult, FraudRing, PatternTag, SuspiciousAccount};

/// Report document handed to consumers (file output, actions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    pub fraud_rings: Vec<FraudRing>,
    pub summary: AnalysisSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_accounts_analyzed: usize,
    pub total_transactions: usize,
    pub suspicious_accounts_flagged: usize,
    pub fraud_rings_detected: usize,
    pub processing_time_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub suspicious: bool,
    pub suspicion_score: u32,
    pub patterns: Vec<PatternTag>,
    pub ring_id: Option<String>,
    pub total_transactions: usize,
    pub in_degree: usize,
    pub out_degree: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// Node/link view of the transaction graph for visualization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    /// One node per account; links collapse parallel edges to the first one seen
    pub fn build(graph: &TransactionGraph, result: &DetectionResult) -> Self {
        let flagged: HashMap<&str, &SuspiciousAccount> = result
            .suspicious_accounts
            .iter()
            .map(|acc| (acc.account_id.as_str(), acc))
            .collect();

        let nodes = graph
            .accounts()
            .map(|node| {
                let suspicious = flagged.get(node.id.as_str());
                GraphNode {
                    id: node.id.clone(),
                    name: node.id.clone(),
                    suspicious: suspicious.is_some(),
                    suspicion_score: suspicious.map(|s| s.suspicion_score).unwrap_or(0),
                    patterns: suspicious.map(|s| s.detected_patterns.clone()).unwrap_or_default(),
                    ring_id: suspicious.and_then(|s| s.ring_id.clone()),
                    total_transactions: node.total_transactions,
                    in_degree: node.in_degree,
                    out_degree: node.out_degree,
                }
            })
            .collect();

        let mut seen = HashSet::new();
        let links = graph
            .edges()
            .filter(|edge| seen.insert((edge.source(), edge.target())))
            .map(|edge| GraphLink {
                source: graph.account_id(edge.source()).to_string(),
                target: graph.account_id(edge.target()).to_string(),
                amount: edge.weight().amount,
                timestamp: edge.weight().timestamp,
            })
            .collect();

        Self { nodes, links }
    }
}

impl AnalysisReport {
    pub fn new(
        result: DetectionResult,
        graph: &TransactionGraph,
        processing_time_seconds: f64,
        include_graph: bool,
    ) -> Self {
        let graph_data = include_graph.then(|| GraphData::build(graph, &result));

        let summary = AnalysisSummary {
            total_accounts_analyzed: graph.node_count(),
            total_transactions: graph.edge_count(),
            suspicious_accounts_flagged: result.suspicious_accounts.len(),
            fraud_rings_detected: result.fraud_rings.len(),
            processing_time_seconds,
        };

        Self {
            analysis_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            suspicious_accounts: result.suspicious_accounts,
            fraud_rings: result.fraud_rings,
            summary,
            graph: graph_data,
        }
    }

    pub fn detection_result(&self) -> DetectionResult {
        DetectionResult {
            fraud_rings: self.fraud_rings.clone(),
            suspicious_accounts: self.suspicious_accounts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatternType, Transaction};
    use chrono::{Duration, TimeZone};

    fn sample_graph() -> TransactionGraph {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        TransactionGraph::build(&[
            Transaction::new("t1", "A", "B", 100.0, t0),
            Transaction::new("t2", "A", "B", 300.0, t0 + Duration::hours(1)),
            Transaction::new("t3", "B", "C", 90.0, t0 + Duration::hours(2)),
        ])
    }

    fn sample_result() -> DetectionResult {
        DetectionResult {
            fraud_rings: vec![FraudRing::new(
                "RING-001".to_string(),
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                PatternType::ShellNetwork,
            )],
            suspicious_accounts: vec![SuspiciousAccount {
                account_id: "B".to_string(),
                suspicion_score: 30,
                detected_patterns: vec![PatternTag::ShellIntermediate],
                ring_id: Some("RING-001".to_string()),
            }],
        }
    }

    #[test]
    fn test_graph_links_deduplicated() {
        let data = GraphData::build(&sample_graph(), &sample_result());

        assert_eq!(data.nodes.len(), 3);
        assert_eq!(data.links.len(), 2);
        assert_eq!(data.links[0].amount, 100.0);

        let b = data.nodes.iter().find(|n| n.id == "B").unwrap();
        assert!(b.suspicious);
        assert_eq!(b.suspicion_score, 30);
        assert_eq!(b.ring_id.as_deref(), Some("RING-001"));
        assert_eq!(b.in_degree, 2);

        let a = data.nodes.iter().find(|n| n.id == "A").unwrap();
        assert!(!a.suspicious);
        assert!(a.patterns.is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let report = AnalysisReport::new(sample_result(), &sample_graph(), 0.25, false);

        assert_eq!(report.summary.total_accounts_analyzed, 3);
        assert_eq!(report.summary.total_transactions, 3);
        assert_eq!(report.summary.suspicious_accounts_flagged, 1);
        assert_eq!(report.summary.fraud_rings_detected, 1);
        assert!(report.graph.is_none());
        assert_eq!(report.detection_result(), sample_result());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("graph").is_none());
        assert_eq!(json["fraud_rings"][0]["ring_id"], "RING-001");
    }

    #[test]
    fn test_graph_node_wire_names() {
        let data = GraphData::build(&sample_graph(), &sample_result());
        let json = serde_json::to_value(&data.nodes[1]).unwrap();

        assert_eq!(json["suspicionScore"], 30);
        assert_eq!(json["totalTransactions"], 3);
        assert_eq!(json["ringId"], "RING-001");
    }
}
