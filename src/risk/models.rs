use serde::{Deserialize, Serialize};

use crate::analyzer::{CyclePattern, ShellChain, SmurfPattern};
use crate::graph::TransactionGraph;
use crate::models::{PatternType, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=29 => RiskLevel::Low,
            30..=49 => RiskLevel::Medium,
            50..=69 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }
}

/// One detector result, before ring ids are assigned
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    Cycle(CyclePattern),
    Smurfing(SmurfPattern),
    Shell(ShellChain),
}

impl Finding {
    pub fn pattern_type(&self) -> PatternType {
        match self {
            Finding::Cycle(_) => PatternType::Cycle,
            Finding::Smurfing(smurf) => smurf.direction.pattern_type(),
            Finding::Shell(_) => PatternType::ShellNetwork,
        }
    }

    /// Ring member list as reported
    pub fn members(&self) -> Vec<String> {
        match self {
            Finding::Cycle(cycle) => cycle.members.clone(),
            Finding::Smurfing(smurf) => smurf.members(),
            Finding::Shell(chain) => chain.members.clone(),
        }
    }
}

/// Read-only input shared by every detector in one analysis pass
#[derive(Debug, Clone)]
pub struct DetectionContext {
    pub graph: TransactionGraph,
    pub transactions: Vec<Transaction>,
}

impl DetectionContext {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let graph = TransactionGraph::build(&transactions);
        Self { graph, transactions }
    }
}
