use thiserror::Error;

use crate::changes::ResourceKind;

/// Deriving events from a change set failed; nothing may be published for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// A tracked table held a row of the wrong kind. The store and the event
    /// stream disagree on the schema.
    #[error("table {table:?} holds a {found}, expected a {expected}")]
    SchemaMismatch {
        table: String,
        expected: ResourceKind,
        found: ResourceKind,
    },
}

#[derive(Debug, Error)]
pub enum PublishError {
    /// Transactions must be published in commit order.
    #[error("out-of-order commit (last published index={last}, found={found})")]
    OutOfOrder { last: u64, found: u64 },

    #[error(transparent)]
    Derive(#[from] DeriveError),

    /// The bus rejected the batch; it may be derived and published again.
    #[error("event bus publish failed: {0}")]
    Bus(String),

    #[error("publisher state lock poisoned")]
    Poisoned,
}
