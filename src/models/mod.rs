pub mod transaction;
pub mod ring;
pub mod report;

pub use transaction::Transaction;
pub use ring::{DetectionResult, FraudRing, PatternTag, PatternType, SuspiciousAccount};
pub use report::{AnalysisReport, AnalysisSummary, GraphData, GraphLink, GraphNode};
