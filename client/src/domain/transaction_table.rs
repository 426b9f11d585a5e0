//! Presentation of transactions for the history table and transfer summary.
//!
//! Pure formatting on top of the domain types: the history table needs one
//! row per record with the amount already rendered, and the post-transfer
//! summary panel needs the confirmed record flattened into labeled display
//! fields. No business rules live here.

use shared::TransactionRecord;

use crate::domain::currency;

/// One row of the history table: channel, payee, amount, date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub id: String,
    pub channel: String,
    pub payee_name: String,
    pub formatted_amount: String,
    pub date: String,
}

/// Format query results for the history table, keeping their order.
pub fn history_rows(records: &[TransactionRecord]) -> Vec<HistoryRow> {
    records
        .iter()
        .map(|record| HistoryRow {
            id: record.id.clone(),
            channel: record.channel.to_string(),
            payee_name: record.payee_name.clone(),
            formatted_amount: currency::format(record.amount),
            date: record.date.to_string(),
        })
        .collect()
}

/// The summary panel shown after a confirmed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSummary {
    pub channel: String,
    pub payee_name: String,
    pub destination: String,
    pub formatted_amount: String,
    pub date: String,
    /// Backend-assigned protocol number.
    pub protocol: String,
}

impl TransferSummary {
    pub fn from_record(record: &TransactionRecord) -> Self {
        TransferSummary {
            channel: record.channel.to_string(),
            payee_name: record.payee_name.clone(),
            destination: record.destination.descriptor(),
            formatted_amount: currency::format(record.amount),
            date: record.date.to_string(),
            protocol: record.id.clone(),
        }
    }
}
