use serde::{Deserialize, Serialize};

use crate::constants::{CYCLE_RISK_SCORE, SHELL_RISK_SCORE, SMURFING_RISK_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Cycle,
    FanInSmurfing,
    FanOutSmurfing,
    ShellNetwork,
}

impl PatternType {
    /// Fixed ring risk score per pattern
    pub fn risk_score(&self) -> u32 {
        match self {
            PatternType::Cycle => CYCLE_RISK_SCORE,
            PatternType::FanInSmurfing | PatternType::FanOutSmurfing => SMURFING_RISK_SCORE,
            PatternType::ShellNetwork => SHELL_RISK_SCORE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Cycle => "cycle",
            PatternType::FanInSmurfing => "fan_in_smurfing",
            PatternType::FanOutSmurfing => "fan_out_smurfing",
            PatternType::ShellNetwork => "shell_network",
        }
    }
}

/// Per-account role tag recorded in the pattern ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternTag {
    Cycle,
    SmurfAggregator,
    SmurfParticipant,
    ShellIntermediate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudRing {
    pub ring_id: String,
    pub member_accounts: Vec<String>,
    pub pattern_type: PatternType,
    pub risk_score: u32,
}

impl FraudRing {
    pub fn new(ring_id: String, member_accounts: Vec<String>, pattern_type: PatternType) -> Self {
        Self {
            ring_id,
            member_accounts,
            pattern_type,
            risk_score: pattern_type.risk_score(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousAccount {
    pub account_id: String,
    pub suspicion_score: u32,
    pub detected_patterns: Vec<PatternTag>,
    pub ring_id: Option<String>,
}

/// Output of one detection pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub fraud_rings: Vec<FraudRing>,
    pub suspicious_accounts: Vec<SuspiciousAccount>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.fraud_rings.is_empty() && self.suspicious_accounts.is_empty()
    }
}
