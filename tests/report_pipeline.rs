//! CSV ingestion through report building and actions

use mule_ring_detector::action::{ActionPipeline, AlertAction, LogAction};
use mule_ring_detector::ingest::read_transactions;
use mule_ring_detector::risk::RiskLevel;
use mule_ring_detector::{detect_fraud, AnalysisHandler};

const CSV: &str = "\
transaction_id,sender_id,receiver_id,amount,timestamp
TX001,ACC_A,ACC_B,1500.00,2024-01-10 09:00:00
TX002,ACC_B,ACC_C,1450.00,2024-01-10 10:00:00
TX003,ACC_C,ACC_A,1400.00,2024-01-10 11:00:00
TX004,ACC_A,ACC_B,800.00,2024-01-11 09:00:00
";

#[tokio::test]
async fn test_csv_to_report() {
    let transactions = read_transactions(CSV.as_bytes()).unwrap();
    assert_eq!(transactions.len(), 4);

    let handler = AnalysisHandler::new(
        ActionPipeline::new()
            .add_handler(LogAction::new())
            .add_handler(AlertAction::new(None, RiskLevel::Low)),
    )
    .with_graph(true);
    let report = handler.process(transactions.clone()).await.unwrap();

    assert_eq!(report.detection_result(), detect_fraud(&transactions));
    assert_eq!(report.summary.total_accounts_analyzed, 3);
    assert_eq!(report.summary.total_transactions, 4);
    assert_eq!(report.summary.fraud_rings_detected, report.fraud_rings.len());
    assert_eq!(report.fraud_rings[0].ring_id, "RING-001");

    let graph = report.graph.as_ref().unwrap();
    assert_eq!(graph.nodes.len(), 3);
    // ACC_A → ACC_B appears twice but is linked once
    assert_eq!(graph.links.len(), 3);
    assert!(graph.nodes.iter().all(|n| n.suspicious));

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["analysis_id"].is_string());
    assert_eq!(json["fraud_rings"][0]["pattern_type"], "cycle");
    assert!(json["summary"]["processing_time_seconds"].as_f64().unwrap() >= 0.0);
}

#[test]
fn test_rejected_batch_never_reaches_detection() {
    let bad = "transaction_id,sender_id,receiver_id,amount,timestamp\nTX1,A,B,abc,2024-01-10 09:00:00\n";
    let err = read_transactions(bad.as_bytes()).unwrap_err();
    assert_eq!(err.to_string(), "row 1: invalid amount \"abc\"");
}
