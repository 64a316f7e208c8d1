mod cycle;
mod smurfing;
mod shell;

pub use cycle::{CycleAnalyzer, CyclePattern};
pub use smurfing::{SmurfDirection, SmurfPattern, SmurfingAnalyzer};
pub use shell::{ShellChain, ShellNetworkAnalyzer};
