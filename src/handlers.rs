use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::action::ActionPipeline;
use crate::models::{AnalysisReport, DetectionResult, Transaction};
use crate::pipeline::DetectionPipeline;
use crate::risk::{assemble, DetectionContext};

/// Runs one full detection pass. Pure and synchronous: same input, same result.
pub fn detect_fraud(transactions: &[Transaction]) -> DetectionResult {
    let context = DetectionContext::new(transactions.to_vec());
    let findings = DetectionPipeline::standard().run(&context);
    assemble(&findings, &context.graph)
}

/// Analysis entry point: detection, report building, then actions
pub struct AnalysisHandler {
    detection_pipeline: DetectionPipeline,
    action_pipeline: ActionPipeline,
    include_graph: bool,
    concurrent: bool,
}

impl AnalysisHandler {
    pub fn new(action_pipeline: ActionPipeline) -> Self {
        Self {
            detection_pipeline: DetectionPipeline::standard(),
            action_pipeline,
            include_graph: false,
            concurrent: false,
        }
    }

    pub fn with_graph(mut self, include_graph: bool) -> Self {
        self.include_graph = include_graph;
        self
    }

    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    pub async fn process(&self, transactions: Vec<Transaction>) -> Result<AnalysisReport> {
        let started = Instant::now();
        let context = Arc::new(DetectionContext::new(transactions));

        info!(
            accounts = context.graph.node_count(),
            transactions = context.graph.edge_count(),
            concurrent = self.concurrent,
            "running detectors"
        );

        let findings = if self.concurrent {
            self.detection_pipeline
                .run_concurrent(Arc::clone(&context))
                .await?
        } else {
            self.detection_pipeline.run(&context)
        };

        let result = assemble(&findings, &context.graph);
        let report = AnalysisReport::new(
            result,
            &context.graph,
            started.elapsed().as_secs_f64(),
            self.include_graph,
        );

        self.action_pipeline.run(&report).await;

        Ok(report)
    }
}
