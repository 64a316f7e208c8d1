// Copyright (c) 2024 DeFi Protocol Indexer
// Shell Network Detector - Pipeline Integration

use crate::analyzer::ShellNetworkAnalyzer;
use crate::pipeline::detector::PatternDetector;
use crate::risk::{DetectionContext, Finding};

/// Shell network detector for pipeline
pub struct ShellNetworkDetector {
    analyzer: ShellNetworkAnalyzer,
}

impl ShellNetworkDetector {
    pub fn new() -> Self {
        Self {
            analyzer: ShellNetworkAnalyzer::new(),
        }
    }
}

impl PatternDetector for ShellNetworkDetector {
    fn name(&self) -> &'static str {
        "ShellNetworkDetector"
    }

    fn detect(&self, context: &DetectionContext) -> Vec<Finding> {
        self.analyzer
            .analyze(&context.graph)
            .into_iter()
            .map(Finding::Shell)
            .collect()
    }
}

impl Default for ShellNetworkDetector {
    fn default() -> Self {
        Self::new()
    }
}
