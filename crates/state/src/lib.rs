//! State store side of the event stream.
//!
//! Turns the change set of a committed transaction into an ordered batch of
//! stream events and hands the batch to the event bus. Translation is pure and
//! synchronous; every event of one batch carries the transaction's log index.

pub mod changes;
pub mod classify;
pub mod config;
pub mod deployment_events;
pub mod error;
pub mod publisher;
pub mod tables;
pub mod txn;

pub use changes::{Change, Changes, Resource, ResourceKind};
pub use classify::{classify, classify_code};
pub use config::EventsConfig;
pub use deployment_events::{derive_events, deployment_events_from_changes};
pub use error::{DeriveError, PublishError};
pub use publisher::EventPublisher;
pub use tables::{DEPLOYMENT_TABLE, EVALS_TABLE, JOBS_TABLE, TableSpec};
pub use txn::{ChangeTracker, CommittedTxn, ReadTxn, WriteTxn};
