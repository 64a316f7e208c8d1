use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::Transaction;

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read transaction CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {field} is empty")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: invalid amount {value:?}")]
    InvalidAmount { row: usize, value: String },

    #[error("row {row}: invalid timestamp {value:?}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("no transactions in input")]
    Empty,
}

/// Raw CSV row, before validation
#[derive(Debug, Deserialize)]
struct CsvRecord {
    transaction_id: String,
    sender_id: String,
    receiver_id: String,
    amount: String,
    timestamp: String,
}

impl CsvRecord {
    fn validate(self, row: usize) -> Result<Transaction, IngestError> {
        for (field, value) in [
            ("transaction_id", &self.transaction_id),
            ("sender_id", &self.sender_id),
            ("receiver_id", &self.receiver_id),
        ] {
            if value.is_empty() {
                return Err(IngestError::MissingField { row, field });
            }
        }

        let amount = match self.amount.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => amount,
            _ => {
                return Err(IngestError::InvalidAmount {
                    row,
                    value: self.amount,
                })
            }
        };

        let timestamp = parse_timestamp(&self.timestamp).ok_or_else(|| IngestError::InvalidTimestamp {
            row,
            value: self.timestamp.clone(),
        })?;

        Ok(Transaction {
            transaction_id: self.transaction_id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            amount,
            timestamp,
        })
    }
}

/// RFC 3339, or `YYYY-MM-DD HH:MM:SS` taken as UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, NAIVE_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse and validate a transaction CSV. Any invalid row rejects the batch.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (i, record) in csv_reader.deserialize::<CsvRecord>().enumerate() {
        transactions.push(record?.validate(i + 1)?);
    }

    if transactions.is_empty() {
        return Err(IngestError::Empty);
    }

    Ok(transactions)
}

pub fn read_transactions_file(path: &Path) -> Result<Vec<Transaction>, IngestError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    let transactions = read_transactions(file)?;
    info!(path = %path.display(), count = transactions.len(), "loaded transactions");
    Ok(transactions)
}
