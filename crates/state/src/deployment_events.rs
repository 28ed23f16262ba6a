//! Change set → event batch translation.
//!
//! A single loop over the change records, driven by the table registry:
//!
//! - rows of untracked tables are skipped
//! - deletes (no after image) are skipped
//! - a row whose kind disagrees with its table aborts the whole batch
//! - everything else becomes exactly one event, in change order
//!
//! Every event carries the change set's index and the shared event type.

use statestream_core::MessageType;
use statestream_events::Event;

use crate::changes::Changes;
use crate::classify::classify;
use crate::error::DeriveError;
use crate::tables;
use crate::txn::ReadTxn;

/// Derive the events for one committed change set.
///
/// Pure and deterministic. On error no events are returned, so a partial batch
/// can never reach the bus.
pub fn derive_events(event_type: &str, changes: &Changes) -> Result<Vec<Event>, DeriveError> {
    let mut events = Vec::with_capacity(changes.changes.len());

    for change in &changes.changes {
        let Some(spec) = tables::lookup(&change.table) else {
            tracing::trace!(index = changes.index, table = %change.table, "untracked table");
            continue;
        };

        let Some(after) = &change.after else {
            tracing::debug!(index = changes.index, table = spec.name, "delete not published");
            continue;
        };

        if after.kind() != spec.kind {
            tracing::error!(
                index = changes.index,
                table = spec.name,
                expected = %spec.kind,
                found = %after.kind(),
                "transaction change does not match table schema"
            );
            return Err(DeriveError::SchemaMismatch {
                table: change.table.clone(),
                expected: spec.kind,
                found: after.kind(),
            });
        }

        events.push(Event {
            topic: spec.topic,
            event_type: event_type.to_string(),
            key: after.id().to_string(),
            filter_keys: after.filter_keys(),
            index: changes.index,
            payload: after.to_payload(),
        });
    }

    Ok(events)
}

/// Classify `msg_type` and derive the events of the transaction `txn` committed.
pub fn deployment_events_from_changes<T>(msg_type: MessageType, txn: &T) -> Result<Vec<Event>, DeriveError>
where
    T: ReadTxn + ?Sized,
{
    derive_events(classify(msg_type), txn.changes())
}
