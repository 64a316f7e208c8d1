use std::collections::HashMap;
use tracing::debug;

use crate::constants::*;
use crate::graph::{NodeId, TransactionGraph};
use crate::models::{DetectionResult, FraudRing, PatternTag, SuspiciousAccount};
use crate::risk::Finding;

/// Everything recorded for one account across all findings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerEntry {
    pub tags: Vec<PatternTag>,
    pub ring_ids: Vec<String>,
    pub scores: Vec<u32>,
}

impl LedgerEntry {
    pub fn has_tag(&self, tag: PatternTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Tags without repeats, first occurrence kept
    pub fn distinct_tags(&self) -> Vec<PatternTag> {
        let mut distinct = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !distinct.contains(tag) {
                distinct.push(*tag);
            }
        }
        distinct
    }
}

/// Per-account pattern ledger, in first-recorded order
#[derive(Debug, Clone, Default)]
pub struct PatternLedger {
    entries: Vec<(String, LedgerEntry)>,
    index: HashMap<String, usize>,
}

impl PatternLedger {
    fn record(&mut self, account_id: &str, tag: PatternTag, ring_id: &str, score: u32) {
        let idx = match self.index.get(account_id) {
            Some(&idx) => idx,
            None => {
                self.entries.push((account_id.to_string(), LedgerEntry::default()));
                self.index.insert(account_id.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[idx].1;
        entry.tags.push(tag);
        entry.ring_ids.push(ring_id.to_string());
        entry.scores.push(score);
    }

    pub fn get(&self, account_id: &str) -> Option<&LedgerEntry> {
        self.index.get(account_id).map(|&idx| &self.entries[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LedgerEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub fn format_ring_id(sequence: usize) -> String {
    format!("RING-{:03}", sequence)
}

/// Fold findings, in detector order, into rings and the account ledger.
/// Ring ids are numbered from 1 across all pattern types.
pub fn build_ledger(findings: &[Finding]) -> (Vec<FraudRing>, PatternLedger) {
    let mut rings = Vec::with_capacity(findings.len());
    let mut ledger = PatternLedger::default();

    for (i, finding) in findings.iter().enumerate() {
        let ring_id = format_ring_id(i + 1);

        match finding {
            Finding::Cycle(cycle) => {
                for account in &cycle.members {
                    ledger.record(account, PatternTag::Cycle, &ring_id, CYCLE_PARTIAL_SCORE);
                }
            }
            Finding::Smurfing(smurf) => {
                ledger.record(
                    &smurf.aggregator,
                    PatternTag::SmurfAggregator,
                    &ring_id,
                    SMURF_AGGREGATOR_PARTIAL_SCORE,
                );
                for account in &smurf.participants {
                    ledger.record(
                        account,
                        PatternTag::SmurfParticipant,
                        &ring_id,
                        SMURF_PARTICIPANT_PARTIAL_SCORE,
                    );
                }
            }
            Finding::Shell(chain) => {
                for account in &chain.intermediates {
                    ledger.record(
                        account,
                        PatternTag::ShellIntermediate,
                        &ring_id,
                        SHELL_INTERMEDIATE_PARTIAL_SCORE,
                    );
                }
            }
        }

        rings.push(FraudRing::new(ring_id, finding.members(), finding.pattern_type()));
    }

    (rings, ledger)
}

/// Busy, broadly connected accounts outside any cycle look like merchants
/// rather than mules and are kept out of the suspicious list.
pub fn is_legitimate_account(graph: &TransactionGraph, id: NodeId, entry: &LedgerEntry) -> bool {
    graph.node(id).total_transactions > MERCHANT_MIN_TRANSACTIONS
        && !entry.has_tag(PatternTag::Cycle)
        && graph.counterparty_count(id) > MERCHANT_MIN_COUNTERPARTIES
}

pub fn suspicion_score(graph: &TransactionGraph, id: NodeId, entry: &LedgerEntry) -> u32 {
    let mut score: u32 = entry.scores.iter().sum();

    if graph.node(id).total_transactions > HIGH_VELOCITY_TRANSACTIONS {
        score += HIGH_VELOCITY_BONUS;
    }

    if graph.average_outgoing_amount(id) > LARGE_AVERAGE_OUTGOING_AMOUNT {
        score += LARGE_AMOUNT_BONUS;
    }

    score.min(MAX_SUSPICION_SCORE)
}

/// Score every ledger account, drop the false positives, highest score first
pub fn score_accounts(ledger: &PatternLedger, graph: &TransactionGraph) -> Vec<SuspiciousAccount> {
    let mut accounts = Vec::with_capacity(ledger.len());

    for (account_id, entry) in ledger.iter() {
        let Some(id) = graph.node_id(account_id) else {
            continue;
        };

        if is_legitimate_account(graph, id, entry) {
            debug!(account = account_id, "suppressed as likely legitimate");
            continue;
        }

        accounts.push(SuspiciousAccount {
            account_id: account_id.to_string(),
            suspicion_score: suspicion_score(graph, id, entry),
            detected_patterns: entry.distinct_tags(),
            ring_id: entry.ring_ids.first().cloned(),
        });
    }

    accounts.sort_by(|a, b| b.suspicion_score.cmp(&a.suspicion_score));
    accounts
}

pub fn assemble(findings: &[Finding], graph: &TransactionGraph) -> DetectionResult {
    let (fraud_rings, ledger) = build_ledger(findings);
    let suspicious_accounts = score_accounts(&ledger, graph);

    DetectionResult {
        fraud_rings,
        suspicious_accounts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{CyclePattern, ShellChain, SmurfDirection, SmurfPattern};
    use crate::models::{PatternType, Transaction};
    use chrono::{Duration, TimeZone, Utc};

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn graph_of(edges: &[(&str, &str, f64)]) -> TransactionGraph {
        let t0 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let txs: Vec<Transaction> = edges
            .iter()
            .enumerate()
            .map(|(i, (from, to, amount))| {
                Transaction::new(format!("t{}", i), *from, *to, *amount, t0 + Duration::minutes(i as i64))
            })
            .collect();
        TransactionGraph::build(&txs)
    }

    #[test]
    fn test_ring_ids_sequential_across_patterns() {
        let findings = vec![
            Finding::Cycle(CyclePattern { members: strings(&["A", "B", "C"]) }),
            Finding::Smurfing(SmurfPattern {
                direction: SmurfDirection::FanIn,
                aggregator: "R".to_string(),
                participants: strings(&["S1", "S2"]),
            }),
            Finding::Shell(ShellChain {
                members: strings(&["X", "Y", "Z"]),
                intermediates: strings(&["Y"]),
            }),
        ];

        let (rings, ledger) = build_ledger(&findings);
        let ids: Vec<&str> = rings.iter().map(|r| r.ring_id.as_str()).collect();
        assert_eq!(ids, vec!["RING-001", "RING-002", "RING-003"]);
        assert_eq!(rings[1].member_accounts, strings(&["R", "S1", "S2"]));
        assert_eq!(rings[1].pattern_type, PatternType::FanInSmurfing);
        assert_eq!(rings[2].risk_score, 75);

        assert_eq!(ledger.get("R").unwrap().scores, vec![35]);
        assert_eq!(ledger.get("S1").unwrap().tags, vec![PatternTag::SmurfParticipant]);
        assert_eq!(ledger.get("Y").unwrap().ring_ids, vec!["RING-003".to_string()]);
        // Shell endpoints are ring members but not ledger entries
        assert!(ledger.get("X").is_none());
        assert_eq!(ledger.len(), 7);
    }

    #[test]
    fn test_format_ring_id() {
        assert_eq!(format_ring_id(1), "RING-001");
        assert_eq!(format_ring_id(42), "RING-042");
        assert_eq!(format_ring_id(1234), "RING-1234");
    }

    #[test]
    fn test_score_bonuses_and_clamp() {
        // A sends 21 large transfers: velocity and amount bonuses
        let edges: Vec<(String, f64)> = (0..21).map(|i| (format!("P{}", i), 6000.0)).collect();
        let edge_refs: Vec<(&str, &str, f64)> =
            edges.iter().map(|(to, amount)| ("A", to.as_str(), *amount)).collect();
        let graph = graph_of(&edge_refs);
        let a = graph.node_id("A").unwrap();

        let entry = LedgerEntry {
            tags: vec![PatternTag::SmurfAggregator],
            ring_ids: vec!["RING-001".to_string()],
            scores: vec![35],
        };
        assert_eq!(suspicion_score(&graph, a, &entry), 35 + 15 + 10);

        let heavy = LedgerEntry {
            tags: vec![PatternTag::Cycle, PatternTag::Cycle, PatternTag::SmurfAggregator],
            ring_ids: vec!["RING-001".into(), "RING-002".into(), "RING-003".into()],
            scores: vec![40, 40, 35],
        };
        assert_eq!(suspicion_score(&graph, a, &heavy), 100);
        assert_eq!(heavy.distinct_tags(), vec![PatternTag::Cycle, PatternTag::SmurfAggregator]);
    }

    #[test]
    fn test_average_amount_threshold_is_strict() {
        let graph = graph_of(&[("A", "B", 5000.0), ("A", "C", 5000.0)]);
        let a = graph.node_id("A").unwrap();
        let entry = LedgerEntry {
            tags: vec![PatternTag::ShellIntermediate],
            ring_ids: vec!["RING-001".into()],
            scores: vec![30],
        };
        assert_eq!(suspicion_score(&graph, a, &entry), 30);
    }

    #[test]
    fn test_legitimate_account_rule() {
        // H: 30 in from distinct senders, 25 out to distinct receivers
        let mut edges: Vec<(String, String)> =
            (0..30).map(|i| (format!("S{}", i), "H".to_string())).collect();
        edges.extend((0..25).map(|i| ("H".to_string(), format!("R{}", i))));
        let edge_refs: Vec<(&str, &str, f64)> =
            edges.iter().map(|(f, t)| (f.as_str(), t.as_str(), 100.0)).collect();
        let graph = graph_of(&edge_refs);
        let h = graph.node_id("H").unwrap();

        let smurf = LedgerEntry {
            tags: vec![PatternTag::SmurfAggregator],
            ring_ids: vec!["RING-001".into()],
            scores: vec![35],
        };
        assert!(is_legitimate_account(&graph, h, &smurf));

        let cycle = LedgerEntry {
            tags: vec![PatternTag::Cycle],
            ring_ids: vec!["RING-001".into()],
            scores: vec![40],
        };
        assert!(!is_legitimate_account(&graph, h, &cycle));
    }

    #[test]
    fn test_accounts_sorted_by_score() {
        let graph = graph_of(&[("A", "B", 10.0), ("B", "C", 10.0), ("C", "A", 10.0), ("D", "A", 10.0)]);
        let findings = vec![
            Finding::Shell(ShellChain {
                members: strings(&["A", "D", "B"]),
                intermediates: strings(&["D"]),
            }),
            Finding::Cycle(CyclePattern { members: strings(&["A", "B", "C"]) }),
        ];

        let result = assemble(&findings, &graph);
        assert_eq!(result.fraud_rings.len(), 2);
        assert_eq!(result.suspicious_accounts.len(), 4);
        assert_eq!(result.suspicious_accounts[0].suspicion_score, 40);
        assert_eq!(result.suspicious_accounts[3].account_id, "D");
        assert_eq!(result.suspicious_accounts[3].ring_id.as_deref(), Some("RING-001"));
        assert!(result
            .suspicious_accounts
            .windows(2)
            .all(|w| w[0].suspicion_score >= w[1].suspicion_score));
    }

    #[test]
    fn test_no_findings() {
        let graph = graph_of(&[("A", "B", 10.0)]);
        assert!(assemble(&[], &graph).is_empty());
    }
}
