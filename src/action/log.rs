use async_trait::async_trait;
use anyhow::Result;
use tracing::{info, warn};

use crate::action::ActionHandler;
use crate::models::AnalysisReport;
use crate::risk::RiskLevel;

pub struct LogAction;

impl LogAction {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionHandler for LogAction {
    fn name(&self) -> &'static str {
        "LogAction"
    }

    async fn handle(&self, report: &AnalysisReport) -> Result<()> {
        let summary = &report.summary;
        info!(
            analysis_id = %report.analysis_id,
            accounts = summary.total_accounts_analyzed,
            transactions = summary.total_transactions,
            flagged = summary.suspicious_accounts_flagged,
            rings = summary.fraud_rings_detected,
            seconds = summary.processing_time_seconds,
            "analysis complete"
        );

        for ring in &report.fraud_rings {
            warn!(
                ring_id = %ring.ring_id,
                pattern = ring.pattern_type.as_str(),
                risk_score = ring.risk_score,
                members = ring.member_accounts.len(),
                "fraud ring detected"
            );
        }

        if let Some(top) = report.suspicious_accounts.first() {
            info!(
                account = %top.account_id,
                score = top.suspicion_score,
                level = ?RiskLevel::from_score(top.suspicion_score),
                "highest suspicion score"
            );
        }

        Ok(())
    }
}

impl Default for LogAction {
    fn default() -> Self {
        Self::new()
    }
}
