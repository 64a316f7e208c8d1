use clap::Parser;
use std::path::PathBuf;
use url::Url;

use crate::risk::RiskLevel;

/// Detect money-mule rings in a batch of transactions
#[derive(Debug, Clone, Parser)]
#[command(name = "mule-ring-detector", version, about)]
pub struct Args {
    /// Transaction CSV (transaction_id,sender_id,receiver_id,amount,timestamp)
    pub input: PathBuf,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Include node/link graph data in the report
    #[arg(long)]
    pub include_graph: bool,

    /// Run the detectors on parallel blocking tasks
    #[arg(long)]
    pub concurrent: bool,

    /// Webhook that receives an alert when accounts reach the minimum level
    #[arg(long, env = "ALERT_WEBHOOK_URL")]
    pub alert_webhook_url: Option<Url>,

    #[arg(long, env = "ALERT_MIN_LEVEL", value_enum, default_value_t = RiskLevel::High)]
    pub alert_min_level: RiskLevel,
}
