use crate::analyzer::CycleAnalyzer;
use crate::pipeline::PatternDetector;
use crate::risk::{DetectionContext, Finding};

pub struct CycleDetector {
    analyzer: CycleAnalyzer,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self {
            analyzer: CycleAnalyzer::new(),
        }
    }
}

impl PatternDetector for CycleDetector {
    fn name(&self) -> &'static str {
        "CycleDetector"
    }

    fn detect(&self, context: &DetectionContext) -> Vec<Finding> {
        self.analyzer
            .analyze(&context.graph)
            .into_iter()
            .map(Finding::Cycle)
            .collect()
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}
