//! Append-only audit trail kept on every order.

use super::OrderStatus;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt::Display;

/// One line of an order's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    /// Always the first entry.
    Created {
        customer: String,
        state: OrderStatus,
        at: DateTime<Utc>,
    },
    Transition {
        from: OrderStatus,
        to: OrderStatus,
        at: DateTime<Utc>,
    },
}

impl LogEntry {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            LogEntry::Created { at, .. } | LogEntry::Transition { at, .. } => *at,
        }
    }
}

impl Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEntry::Created {
                customer,
                state,
                at,
            } => write!(
                f,
                "Order created in state {state} by {customer} at {}",
                at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            LogEntry::Transition { from, to, at } => write!(
                f,
                "{from} => {to} at {}",
                at.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
        }
    }
}

/// Ordered list of [`LogEntry`] values. Entries can be added but never edited or removed.
///
/// Serialize-only: a log is only ever built by [`OrderLog::created`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderLog(Vec<LogEntry>);

impl OrderLog {
    pub(crate) fn created(customer: &str, state: OrderStatus, at: DateTime<Utc>) -> Self {
        Self(vec![LogEntry::Created {
            customer: customer.to_string(),
            state,
            at,
        }])
    }

    pub(crate) fn record_transition(&mut self, from: OrderStatus, to: OrderStatus) {
        self.0.push(LogEntry::Transition {
            from,
            to,
            at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.0.last()
    }

    /// Rendered lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rendering() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let created = LogEntry::Created {
            customer: "alice".into(),
            state: OrderStatus::InQueue,
            at,
        };
        assert_eq!(
            created.to_string(),
            "Order created in state IN_QUEUE by alice at 2024-03-01T08:30:00.000Z"
        );

        let moved = LogEntry::Transition {
            from: OrderStatus::InQueue,
            to: OrderStatus::InProgress,
            at,
        };
        assert_eq!(moved.to_string(), "IN_QUEUE => IN_PROGRESS at 2024-03-01T08:30:00.000Z");
    }

    #[test]
    fn test_log_starts_with_creation_and_appends() {
        let mut log = OrderLog::created("bob", OrderStatus::InQueue, Utc::now());
        log.record_transition(OrderStatus::InQueue, OrderStatus::Cancelled);

        assert_eq!(log.len(), 2);
        assert!(matches!(log.entries()[0], LogEntry::Created { .. }));
        assert!(log.lines()[1].starts_with("IN_QUEUE => CANCELLED at "));
    }
}
