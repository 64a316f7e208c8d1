// Detection policy. These are fixed, not configurable.

/// Cycle length bounds (node count, inclusive)
pub const MIN_CYCLE_LENGTH: usize = 3;
pub const MAX_CYCLE_LENGTH: usize = 5;

/// Rolling window for fan-in / fan-out aggregation
pub const SMURFING_WINDOW_HOURS: i64 = 72;
pub const SMURFING_MIN_COUNTERPARTIES: usize = 10;

/// Shell chains: BFS depth cap, minimum path node count, interior activity ceiling
pub const SHELL_MAX_DEPTH: usize = 4;
pub const SHELL_MIN_PATH_NODES: usize = 3;
pub const SHELL_MAX_INTERMEDIATE_TRANSACTIONS: usize = 3;

pub const CYCLE_RISK_SCORE: u32 = 90;
pub const SMURFING_RISK_SCORE: u32 = 85;
pub const SHELL_RISK_SCORE: u32 = 75;

// Partial suspicion scores per ledger tag
pub const CYCLE_PARTIAL_SCORE: u32 = 40;
pub const SMURF_AGGREGATOR_PARTIAL_SCORE: u32 = 35;
pub const SMURF_PARTICIPANT_PARTIAL_SCORE: u32 = 20;
pub const SHELL_INTERMEDIATE_PARTIAL_SCORE: u32 = 30;

// Behavioral bonuses
pub const HIGH_VELOCITY_TRANSACTIONS: usize = 20;
pub const HIGH_VELOCITY_BONUS: u32 = 15;
pub const LARGE_AVERAGE_OUTGOING_AMOUNT: f64 = 5000.0;
pub const LARGE_AMOUNT_BONUS: u32 = 10;

pub const MAX_SUSPICION_SCORE: u32 = 100;

// False-positive control for busy, well-connected accounts (merchants, payroll)
pub const MERCHANT_MIN_TRANSACTIONS: usize = 50;
pub const MERCHANT_MIN_COUNTERPARTIES: usize = 20;
