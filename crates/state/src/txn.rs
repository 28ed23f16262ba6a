//! Transaction views over the state store's change tracking.
//!
//! The event stream only needs read access to what a transaction changed and
//! the log index it committed at. [`ChangeTracker`] is a minimal in-process
//! store-side companion that records changes and hands out monotonic indexes.

use std::sync::atomic::{AtomicU64, Ordering};

use statestream_core::MessageType;

use crate::changes::{Change, Changes, Resource};

/// Read-only view of a committed transaction.
pub trait ReadTxn {
    /// Change set of the transaction, in mutation order.
    fn changes(&self) -> &Changes;

    /// Log index the transaction committed at.
    fn index(&self) -> u64 {
        self.changes().index
    }
}

impl ReadTxn for Changes {
    fn changes(&self) -> &Changes {
        self
    }
}

/// Assigns log indexes to committed write transactions.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    last_index: AtomicU64,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume after a log whose last committed index is `index`.
    pub fn starting_after(index: u64) -> Self {
        Self {
            last_index: AtomicU64::new(index),
        }
    }

    /// Index of the most recent commit (0 before the first).
    pub fn latest_index(&self) -> u64 {
        self.last_index.load(Ordering::Acquire)
    }

    /// Open a write transaction of kind `msg_type`.
    pub fn write_txn(&self, msg_type: MessageType) -> WriteTxn<'_> {
        WriteTxn {
            tracker: self,
            msg_type,
            changes: Vec::new(),
        }
    }

    fn next_index(&self) -> u64 {
        self.last_index.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// A write transaction recording row changes.
///
/// Dropping it without committing discards the changes and consumes no index.
#[derive(Debug)]
pub struct WriteTxn<'a> {
    tracker: &'a ChangeTracker,
    msg_type: MessageType,
    changes: Vec<Change>,
}

impl WriteTxn<'_> {
    pub fn msg_type(&self) -> MessageType {
        self.msg_type
    }

    /// Record an insert (`before == None`) or update of a row.
    pub fn insert(&mut self, table: &str, before: Option<Resource>, after: impl Into<Resource>) -> &mut Self {
        self.changes.push(Change::upsert(table, before, after));
        self
    }

    /// Record the removal of a row.
    pub fn delete(&mut self, table: &str, before: impl Into<Resource>) -> &mut Self {
        self.changes.push(Change::delete(table, before));
        self
    }

    pub fn record(&mut self, change: Change) -> &mut Self {
        self.changes.push(change);
        self
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Commit, assigning the next log index.
    pub fn commit(self) -> CommittedTxn {
        let index = self.tracker.next_index();
        tracing::trace!(index, changes = self.changes.len(), msg_type = ?self.msg_type, "txn committed");
        CommittedTxn {
            msg_type: self.msg_type,
            changes: Changes::new(index, self.changes),
        }
    }
}

/// A committed transaction, ready to be turned into events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedTxn {
    msg_type: MessageType,
    changes: Changes,
}

impl CommittedTxn {
    pub fn msg_type(&self) -> MessageType {
        self.msg_type
    }

    pub fn into_changes(self) -> Changes {
        self.changes
    }
}

impl ReadTxn for CommittedTxn {
    fn changes(&self) -> &Changes {
        &self.changes
    }
}
