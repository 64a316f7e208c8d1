use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

use crate::risk::{DetectionContext, Finding};

pub trait PatternDetector: Send + Sync {
    fn name(&self) -> &'static str;

    fn detect(&self, context: &DetectionContext) -> Vec<Finding>;
}

pub struct DetectionPipeline {
    detectors: Vec<Arc<dyn PatternDetector>>,
}

impl DetectionPipeline {
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    pub fn add_detector<D: PatternDetector + 'static>(mut self, detector: D) -> Self {
        self.detectors.push(Arc::new(detector));
        self
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Findings are returned in detector registration order
    pub fn run(&self, context: &DetectionContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for detector in &self.detectors {
            let detector_findings = detector.detect(context);
            debug!(detector = detector.name(), findings = detector_findings.len(), "detector finished");
            findings.extend(detector_findings);
        }

        findings
    }

    /// Runs every detector on its own blocking task over the shared context.
    /// Results are still concatenated in registration order, so the output
    /// matches [`DetectionPipeline::run`].
    pub async fn run_concurrent(&self, context: Arc<DetectionContext>) -> Result<Vec<Finding>> {
        let handles: Vec<_> = self
            .detectors
            .iter()
            .map(|detector| {
                let detector = Arc::clone(detector);
                let context = Arc::clone(&context);
                let name = detector.name();
                (name, tokio::task::spawn_blocking(move || detector.detect(&context)))
            })
            .collect();

        let mut findings = Vec::new();
        for (name, handle) in handles {
            let detector_findings = handle
                .await
                .with_context(|| format!("detector {} did not complete", name))?;
            debug!(detector = name, findings = detector_findings.len(), "detector finished");
            findings.extend(detector_findings);
        }

        Ok(findings)
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
