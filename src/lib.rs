pub mod action;
pub mod analyzer;
pub mod config;
pub mod constants;
pub mod graph;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod risk;

pub use graph::TransactionGraph;
pub use handlers::{detect_fraud, AnalysisHandler};
pub use models::{DetectionResult, FraudRing, PatternTag, PatternType, SuspiciousAccount, Transaction};
