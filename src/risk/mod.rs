pub mod models;
pub mod scoring;

pub use models::{DetectionContext, Finding, RiskLevel};
pub use scoring::{assemble, build_ledger, score_accounts, LedgerEntry, PatternLedger};
