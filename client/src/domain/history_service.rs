//! Transaction history filtering and ordering.
//!
//! [`query`] is a pure function over an in-memory record list: every
//! supplied predicate must hold for a record to survive, and an optional
//! sort orders the survivors. It is cheap enough to re-run from scratch on
//! every change to a filter field or to the record list; nothing is cached.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use log::debug;
use shared::{Channel, Money, TransactionRecord};

use crate::api::{ApiError, BankGateway};
use crate::domain::currency::{self, InvalidAmount};
use crate::domain::session::Session;

/// Recency windows offered by the history view, in days.
pub const RECENCY_WINDOWS: [i64; 4] = [7, 15, 30, 90];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySort {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Filter state of the history view, rebuilt from the controls on every
/// query.
///
/// Absent fields impose no constraint. The amount bounds hold formatted
/// display strings straight from their currency inputs; they are parsed at
/// query time. Without a `sort`, records keep the order they came in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub channel: Option<Channel>,
    pub recency_window_days: Option<i64>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub amount_min: Option<String>,
    pub amount_max: Option<String>,
    pub sort: Option<HistorySort>,
}

/// Apply `filter` to `records` and return the surviving records in order.
///
/// Predicates compose as a logical AND and are order-independent. All
/// comparisons are numeric: dates by timestamp, amounts by minor units,
/// never by the formatted string. The sort is stable, so ties keep their
/// input order. `now` anchors the recency window.
pub fn query(
    records: &[TransactionRecord],
    filter: &HistoryFilter,
    now: DateTime<Utc>,
) -> Result<Vec<TransactionRecord>, InvalidAmount> {
    let amount_min = parse_bound(filter.amount_min.as_deref())?;
    let amount_max = parse_bound(filter.amount_max.as_deref())?;

    let mut selected: Vec<TransactionRecord> = records
        .iter()
        .filter(|record| {
            if let Some(channel) = filter.channel {
                if record.channel != channel {
                    return false;
                }
            }
            if let Some(window) = filter.recency_window_days {
                let age = now.signed_duration_since(timestamp(record.date));
                if age > Duration::days(window) {
                    return false;
                }
            }
            if let Some(start) = filter.date_start {
                if record.date < start {
                    return false;
                }
            }
            if let Some(end) = filter.date_end {
                if record.date > end {
                    return false;
                }
            }
            if let Some(min) = amount_min {
                if record.amount < min {
                    return false;
                }
            }
            if let Some(max) = amount_max {
                if record.amount > max {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    if let Some(sort) = filter.sort {
        selected.sort_by(|a, b| {
            let ordering = match sort.key {
                SortKey::Date => timestamp(a.date).cmp(&timestamp(b.date)),
                SortKey::Amount => a.amount.cmp(&b.amount),
            };
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    debug!("history query kept {}/{} records", selected.len(), records.len());
    Ok(selected)
}

fn parse_bound(bound: Option<&str>) -> Result<Option<Money>, InvalidAmount> {
    bound.map(currency::parse_display).transpose()
}

fn timestamp(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Fetches an account's history from the backend.
///
/// The backend serves records newest first; [`query`] re-orders them per the
/// active filter regardless.
pub struct HistoryService<G> {
    gateway: Arc<G>,
}

impl<G: BankGateway> HistoryService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        HistoryService { gateway }
    }

    pub async fn load(&self, session: &Session) -> Result<Vec<TransactionRecord>, ApiError> {
        self.gateway.list_transactions(&session.account.id).await
    }
}
