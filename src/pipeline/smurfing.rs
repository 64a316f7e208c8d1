use crate::analyzer::SmurfingAnalyzer;
use crate::pipeline::PatternDetector;
use crate::risk::{DetectionContext, Finding};

pub struct SmurfingDetector {
    analyzer: SmurfingAnalyzer,
}

impl SmurfingDetector {
    pub fn new() -> Self {
        Self {
            analyzer: SmurfingAnalyzer::new(),
        }
    }
}

impl PatternDetector for SmurfingDetector {
    fn name(&self) -> &'static str {
        "SmurfingDetector"
    }

    fn detect(&self, context: &DetectionContext) -> Vec<Finding> {
        self.analyzer
            .analyze(&context.transactions)
            .into_iter()
            .map(Finding::Smurfing)
            .collect()
    }
}

impl Default for SmurfingDetector {
    fn default() -> Self {
        Self::new()
    }
}
