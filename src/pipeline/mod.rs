mod detector;
mod cycle;
mod smurfing;
mod shell;

pub use detector::{PatternDetector, DetectionPipeline};
pub use cycle::CycleDetector;
pub use smurfing::SmurfingDetector;
pub use shell::ShellNetworkDetector;

impl DetectionPipeline {
    /// Cycles, then smurfing, then shell networks
    pub fn standard() -> Self {
        DetectionPipeline::new()
            .add_detector(CycleDetector::new())
            .add_detector(SmurfingDetector::new())
            .add_detector(ShellNetworkDetector::new())
    }
}
