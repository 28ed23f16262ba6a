//! Commit hook: translate each committed transaction and publish the batch.
//!
//! ```text
//! commit(index) → classify(msg type) → derive_events → EventBus::publish(Events)
//! ```
//!
//! Batches are published in commit order and never partially: a derivation
//! failure publishes nothing for the transaction.

use std::sync::Mutex;

use statestream_core::MessageType;
use statestream_events::{EventBus, Events};

use crate::config::EventsConfig;
use crate::deployment_events::deployment_events_from_changes;
use crate::error::PublishError;
use crate::txn::ReadTxn;

#[derive(Debug)]
pub struct EventPublisher<B>
where
    B: EventBus,
{
    bus: B,
    config: EventsConfig,
    /// Index of the last transaction handled; guards ordering and serializes
    /// concurrent commit hooks.
    last_index: Mutex<u64>,
}

impl<B> EventPublisher<B>
where
    B: EventBus,
{
    pub fn new(bus: B, config: EventsConfig) -> Self {
        Self {
            bus,
            config,
            last_index: Mutex::new(0),
        }
    }

    /// Resume publishing after a log whose last published index is `index`.
    pub fn resume_after(bus: B, config: EventsConfig, index: u64) -> Self {
        Self {
            bus,
            config,
            last_index: Mutex::new(index),
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn last_index(&self) -> u64 {
        self.last_index.lock().map(|i| *i).unwrap_or(0)
    }

    /// Publish the events of `txn`, committed as a `msg_type` write.
    ///
    /// Returns the number of events published. Transactions that touch no
    /// tracked rows publish nothing but still advance the index.
    pub fn publish_commit<T>(&self, msg_type: MessageType, txn: &T) -> Result<usize, PublishError>
    where
        T: ReadTxn + ?Sized,
    {
        if !self.config.enabled {
            return Ok(0);
        }

        let mut last = self.last_index.lock().map_err(|_| PublishError::Poisoned)?;
        let index = txn.index();
        if index <= *last {
            tracing::warn!(last = *last, found = index, "out-of-order commit rejected");
            return Err(PublishError::OutOfOrder { last: *last, found: index });
        }

        let events = deployment_events_from_changes(msg_type, txn)?;
        let count = events.len();

        if count > 0 {
            self.bus
                .publish(Events::new(index, events))
                .map_err(|e| PublishError::Bus(format!("{e:?}")))?;
            tracing::debug!(index, event_count = count, msg_type = ?msg_type, "published event batch");
        }

        *last = index;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use statestream_core::{Deployment, Evaluation, Job};
    use statestream_events::{InMemoryEventBus, SubscribeRequest, Subscription};

    use super::*;
    use crate::changes::{Change, Changes};
    use crate::error::DeriveError;
    use crate::tables::{DEPLOYMENT_TABLE, EVALS_TABLE, JOBS_TABLE};

    struct FailingBus;

    impl EventBus for FailingBus {
        type Error = &'static str;

        fn publish(&self, _batch: Events) -> Result<(), Self::Error> {
            Err("broker unavailable")
        }

        fn subscribe(&self, _request: SubscribeRequest) -> Subscription {
            let (_tx, rx) = std::sync::mpsc::channel();
            Subscription::new(rx)
        }
    }

    fn setup() -> (EventPublisher<Arc<InMemoryEventBus>>, Subscription) {
        let bus = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe(SubscribeRequest::all());
        (EventPublisher::new(bus, EventsConfig::default()), sub)
    }

    fn deployment_changes(index: u64) -> Changes {
        let job = Job::new("j1", "default");
        let d = Deployment::for_job(&job);
        let eval = Evaluation::for_job(&job, "deployment-watcher").with_deployment(&d);
        Changes::new(
            index,
            vec![
                Change::upsert(DEPLOYMENT_TABLE, None, d),
                Change::upsert(EVALS_TABLE, None, eval),
            ],
        )
    }

    #[test]
    fn publishes_one_batch_per_commit() {
        let (publisher, sub) = setup();

        let n = publisher
            .publish_commit(MessageType::DeploymentPromote, &deployment_changes(4))
            .unwrap();

        assert_eq!(n, 2);
        let batch = sub.try_recv().unwrap();
        assert_eq!(batch.index, 4);
        assert!(batch.events.iter().all(|e| e.event_type == "DeploymentPromotion" && e.index == 4));
        assert_eq!(publisher.last_index(), 4);
    }

    #[test]
    fn rejects_out_of_order_commits() {
        let (publisher, sub) = setup();
        publisher
            .publish_commit(MessageType::DeploymentPromote, &deployment_changes(10))
            .unwrap();

        let err = publisher
            .publish_commit(MessageType::DeploymentPromote, &deployment_changes(10))
            .unwrap_err();

        assert!(matches!(err, PublishError::OutOfOrder { last: 10, found: 10 }));
        assert_eq!(sub.drain().len(), 1);
    }

    #[test]
    fn schema_mismatch_publishes_nothing() {
        let (publisher, sub) = setup();
        let mut changes = deployment_changes(3);
        changes.changes.push(Change::upsert(JOBS_TABLE, None, Deployment::default()));

        let err = publisher
            .publish_commit(MessageType::DeploymentStatusUpdate, &changes)
            .unwrap_err();

        assert!(matches!(err, PublishError::Derive(DeriveError::SchemaMismatch { .. })));
        assert!(sub.try_recv().is_err());
        assert_eq!(publisher.last_index(), 0);
    }

    #[test]
    fn untracked_commit_advances_without_publishing() {
        let (publisher, sub) = setup();
        let changes = Changes::new(2, vec![Change::upsert("allocs", None, Job::new("j1", "default"))]);

        assert_eq!(publisher.publish_commit(MessageType::AllocUpdate, &changes).unwrap(), 0);
        assert!(sub.try_recv().is_err());
        assert_eq!(publisher.last_index(), 2);
    }

    #[test]
    fn disabled_publisher_is_a_no_op() {
        let bus = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe(SubscribeRequest::all());
        let publisher = EventPublisher::new(bus, EventsConfig::disabled());

        assert_eq!(
            publisher
                .publish_commit(MessageType::DeploymentPromote, &deployment_changes(1))
                .unwrap(),
            0
        );
        assert!(sub.try_recv().is_err());
        assert_eq!(publisher.last_index(), 0);
    }

    #[test]
    fn bus_failure_can_be_retried() {
        let publisher = EventPublisher::resume_after(FailingBus, EventsConfig::default(), 5);

        let err = publisher
            .publish_commit(MessageType::DeploymentPromote, &deployment_changes(6))
            .unwrap_err();

        assert!(matches!(err, PublishError::Bus(ref msg) if msg.contains("broker unavailable")));
        assert_eq!(publisher.last_index(), 5);
        assert!(publisher.bus().publish(Events::new(6, vec![])).is_err());
    }
}
