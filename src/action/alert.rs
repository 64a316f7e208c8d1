use async_trait::async_trait;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::info;
use url::Url;

use crate::action::ActionHandler;
use crate::models::{AnalysisReport, SuspiciousAccount};
use crate::risk::RiskLevel;

/// Posts a summary of the analysis to a webhook when accounts reach `min_level`
pub struct AlertAction {
    webhook_url: Option<Url>,
    min_level: RiskLevel,
}

impl AlertAction {
    pub fn new(webhook_url: Option<Url>, min_level: RiskLevel) -> Self {
        Self {
            webhook_url,
            min_level,
        }
    }

    fn alertable<'a>(&self, report: &'a AnalysisReport) -> Vec<&'a SuspiciousAccount> {
        report
            .suspicious_accounts
            .iter()
            .filter(|acc| RiskLevel::from_score(acc.suspicion_score) >= self.min_level)
            .collect()
    }

    fn payload(&self, report: &AnalysisReport, accounts: &[&SuspiciousAccount]) -> Value {
        let accounts: Vec<Value> = accounts
            .iter()
            .map(|acc| {
                json!({
                    "account_id": acc.account_id,
                    "suspicion_score": acc.suspicion_score,
                    "risk_level": RiskLevel::from_score(acc.suspicion_score),
                    "detected_patterns": acc.detected_patterns,
                    "ring_id": acc.ring_id,
                })
            })
            .collect();

        json!({
            "analysis_id": report.analysis_id,
            "generated_at": report.generated_at.to_rfc3339(),
            "min_level": self.min_level,
            "summary": report.summary,
            "fraud_rings": report.fraud_rings,
            "accounts": accounts,
        })
    }
}

#[async_trait]
impl ActionHandler for AlertAction {
    fn name(&self) -> &'static str {
        "AlertAction"
    }

    async fn handle(&self, report: &AnalysisReport) -> Result<()> {
        let Some(url) = &self.webhook_url else {
            return Ok(());
        };

        let accounts = self.alertable(report);
        if accounts.is_empty() {
            return Ok(());
        }

        let payload = self.payload(report, &accounts);
        reqwest::Client::new()
            .post(url.clone())
            .json(&payload)
            .send()
            .await
            .context("failed to send alert webhook")?
            .error_for_status()
            .context("alert webhook rejected the payload")?;

        info!(accounts = accounts.len(), "alert sent");
        Ok(())
    }
}

impl Default for AlertAction {
    fn default() -> Self {
        Self::new(None, RiskLevel::High)
    }
}
