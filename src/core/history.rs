//! Transition log.
//!
//! Keeps a bounded record of the transitions a machine performed, newest
//! last. Only the most recent `capacity` records are retained, but
//! `total` keeps counting so callers can tell whether anything happened
//! between two observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How a transition's target was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Requested directly.
    Direct,
    /// Resolved through shallow history.
    History,
    /// Resolved through deep history.
    DeepHistory,
    /// Chained from the target's initial transition.
    Initial,
}

/// Record of a single performed transition.
///
/// # Example
///
/// ```rust
/// use zumo_hsm::core::{TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "Patrol".to_string(),
///     to: "Attack".to_string(),
///     kind: TransitionKind::Direct,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "Attack");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Active leaf before the transition
    pub from: String,
    /// State transitioned to
    pub to: String,
    /// How the target was chosen
    pub kind: TransitionKind,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered log of transitions.
///
/// # Example
///
/// ```rust
/// use zumo_hsm::core::{TransitionKind, TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let mut log = TransitionLog::with_capacity(2);
/// for (from, to) in [("A", "B"), ("B", "C"), ("C", "D")] {
///     log.record(TransitionRecord {
///         from: from.to_string(),
///         to: to.to_string(),
///         kind: TransitionKind::Direct,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(log.total(), 3);
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.path(), vec!["B", "C", "D"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionLog {
    records: VecDeque<TransitionRecord>,
    capacity: usize,
    total: u64,
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl TransitionLog {
    pub const DEFAULT_CAPACITY: usize = 32;

    /// Create an empty log keeping at most `capacity` records.
    ///
    /// A capacity of zero keeps no records but still counts transitions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        self.total += 1;
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Number of transitions ever recorded, including evicted ones.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Names of the states traversed by the retained records: the first
    /// record's origin, then the target of each record.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.records.iter().map(|r| r.to.as_str()));
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: &str, to: &str) -> TransitionRecord {
        TransitionRecord {
            from: from.to_string(),
            to: to.to_string(),
            kind: TransitionKind::Direct,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = TransitionLog::default();
        assert!(log.is_empty());
        assert_eq!(log.total(), 0);
        assert!(log.path().is_empty());
        assert!(log.last().is_none());
        assert_eq!(log.capacity(), TransitionLog::DEFAULT_CAPACITY);
    }

    #[test]
    fn record_appends_in_order() {
        let mut log = TransitionLog::with_capacity(4);
        log.record(record("Idle", "Patrol"));
        log.record(record("Patrol", "Attack"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.path(), vec!["Idle", "Patrol", "Attack"]);
        assert_eq!(log.last().unwrap().to, "Attack");
    }

    #[test]
    fn oldest_records_are_evicted() {
        let mut log = TransitionLog::with_capacity(2);
        log.record(record("A", "B"));
        log.record(record("B", "C"));
        log.record(record("C", "D"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.total(), 3);
        let froms: Vec<_> = log.records().map(|r| r.from.as_str()).collect();
        assert_eq!(froms, vec!["B", "C"]);
    }

    #[test]
    fn zero_capacity_still_counts() {
        let mut log = TransitionLog::with_capacity(0);
        log.record(record("A", "B"));

        assert!(log.is_empty());
        assert_eq!(log.total(), 1);
    }

    #[test]
    fn log_serializes_correctly() {
        let mut log = TransitionLog::with_capacity(3);
        log.record(record("A", "B"));

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: TransitionLog = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.total(), 1);
        assert_eq!(deserialized.last(), log.last());
    }
}
