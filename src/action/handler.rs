use async_trait::async_trait;
use anyhow::Result;
use tracing::warn;

use crate::models::AnalysisReport;

#[async_trait]
pub trait ActionHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(&self, report: &AnalysisReport) -> Result<()>;
}

pub struct ActionPipeline {
    handlers: Vec<Box<dyn ActionHandler>>,
}

impl ActionPipeline {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler<H: ActionHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Handler failures are logged and never stop the remaining handlers
    pub async fn run(&self, report: &AnalysisReport) {
        for handler in &self.handlers {
            if let Err(e) = handler.handle(report).await {
                warn!(handler = handler.name(), error = %e, "action handler failed");
            }
        }
    }
}

impl Default for ActionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
