// Copyright (c) 2024 DeFi Protocol Indexer
// Smurfing Detection using Sliding Time-Window Counterparty Aggregation

use chrono::Duration;
use std::collections::{HashMap, HashSet};

use crate::constants::{SMURFING_MIN_COUNTERPARTIES, SMURFING_WINDOW_HOURS};
use crate::models::{PatternType, Transaction};

/// Aggregation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmurfDirection {
    /// Many senders → one receiver
    FanIn,
    /// One sender → many receivers
    FanOut,
}

impl SmurfDirection {
    pub fn pattern_type(&self) -> PatternType {
        match self {
            SmurfDirection::FanIn => PatternType::FanInSmurfing,
            SmurfDirection::FanOut => PatternType::FanOutSmurfing,
        }
    }

    fn aggregator<'a>(&self, tx: &'a Transaction) -> &'a str {
        match self {
            SmurfDirection::FanIn => &tx.receiver_id,
            SmurfDirection::FanOut => &tx.sender_id,
        }
    }

    fn counterparty<'a>(&self, tx: &'a Transaction) -> &'a str {
        match self {
            SmurfDirection::FanIn => &tx.sender_id,
            SmurfDirection::FanOut => &tx.receiver_id,
        }
    }
}

/// Detected fan-in / fan-out aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmurfPattern {
    pub direction: SmurfDirection,
    pub aggregator: String,
    pub participants: Vec<String>,
}

impl SmurfPattern {
    /// Aggregator first, then participants
    pub fn members(&self) -> Vec<String> {
        std::iter::once(self.aggregator.clone())
            .chain(self.participants.iter().cloned())
            .collect()
    }
}

/// Insertion-ordered set of account ids
#[derive(Default)]
struct AccountSet<'a> {
    order: Vec<&'a str>,
    members: HashSet<&'a str>,
}

impl<'a> AccountSet<'a> {
    fn insert(&mut self, account: &'a str) {
        if self.members.insert(account) {
            self.order.push(account);
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Smurfing analyzer scanning every transaction as a window start
pub struct SmurfingAnalyzer {
    window: Duration,
    min_counterparties: usize,
}

impl SmurfingAnalyzer {
    pub fn new() -> Self {
        Self {
            window: Duration::hours(SMURFING_WINDOW_HOURS),
            min_counterparties: SMURFING_MIN_COUNTERPARTIES,
        }
    }

    /// Fan-in pass over all receivers, then fan-out pass over all senders
    pub fn analyze(&self, transactions: &[Transaction]) -> Vec<SmurfPattern> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by_key(|tx| tx.timestamp);

        let mut patterns = self.scan(&sorted, SmurfDirection::FanIn);
        patterns.extend(self.scan(&sorted, SmurfDirection::FanOut));
        patterns
    }

    fn scan(&self, sorted: &[&Transaction], direction: SmurfDirection) -> Vec<SmurfPattern> {
        // Group per aggregator, keeping first-seen order and time order within groups
        let mut groups: Vec<(&str, Vec<&Transaction>)> = Vec::new();
        let mut group_index: HashMap<&str, usize> = HashMap::new();
        for &tx in sorted {
            let key = direction.aggregator(tx);
            let idx = *group_index.entry(key).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[idx].1.push(tx);
        }

        groups
            .into_iter()
            .filter_map(|(aggregator, txs)| {
                let participants = self.window_counterparties(&txs, direction);
                (participants.len() >= self.min_counterparties).then(|| SmurfPattern {
                    direction,
                    aggregator: aggregator.to_string(),
                    participants,
                })
            })
            .collect()
    }

    /// Union of counterparties from every window that reaches the threshold.
    /// `txs` must be sorted by timestamp.
    fn window_counterparties(&self, txs: &[&Transaction], direction: SmurfDirection) -> Vec<String> {
        let mut flagged = AccountSet::default();

        for (i, start) in txs.iter().enumerate() {
            let mut window = AccountSet::default();

            for &tx in &txs[i..] {
                if tx.timestamp - start.timestamp > self.window {
                    break;
                }
                window.insert(direction.counterparty(tx));

                if window.len() >= self.min_counterparties {
                    for &account in &window.order {
                        flagged.insert(account);
                    }
                }
            }
        }

        flagged.order.into_iter().map(str::to_string).collect()
    }
}

impl Default for SmurfingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
