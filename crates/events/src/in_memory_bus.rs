//! In-memory event broker for tests/dev.

use std::sync::{Mutex, mpsc};

use thiserror::Error;

use crate::bus::{EventBus, Subscription};
use crate::event::Events;
use crate::filter::SubscribeRequest;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    #[error("subscriber registry lock poisoned")]
    Poisoned,
}

#[derive(Debug)]
struct Subscriber {
    request: SubscribeRequest,
    tx: mpsc::Sender<Events>,
}

/// In-memory pub/sub broker.
///
/// - No IO / no async
/// - Filters each batch per subscriber, preserving event order
/// - Drops subscribers whose receiving side has gone away
#[derive(Debug, Default)]
pub struct InMemoryEventBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscribers (as of the last publish).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl EventBus for InMemoryEventBus {
    type Error = InMemoryBusError;

    fn publish(&self, batch: Events) -> Result<(), Self::Error> {
        let mut subs = self.subscribers.lock().map_err(|_| InMemoryBusError::Poisoned)?;

        subs.retain(|sub| {
            let filtered = sub.request.filter(&batch);
            if filtered.is_empty() {
                // Nothing to deliver; keep the subscriber.
                return true;
            }
            sub.tx.send(filtered).is_ok()
        });

        tracing::trace!(index = batch.index, subscribers = subs.len(), "batch fanned out");
        Ok(())
    }

    fn subscribe(&self, request: SubscribeRequest) -> Subscription {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive batches until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(Subscriber { request, tx });
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use statestream_core::{Deployment, Job};

    use super::*;
    use crate::event::{DeploymentEvent, Event, JobEvent, Payload, Topic, ALL_KEYS};

    fn batch(index: u64) -> Events {
        let deployment = Arc::new(Deployment {
            id: "d1".to_string(),
            job_id: "j1".to_string(),
            ..Deployment::default()
        });
        Events::new(
            index,
            vec![
                Event {
                    topic: Topic::Deployment,
                    event_type: "DeploymentStatusUpdate".to_string(),
                    key: "d1".to_string(),
                    filter_keys: vec!["j1".to_string()],
                    index,
                    payload: Payload::Deployment(DeploymentEvent { deployment }),
                },
                Event {
                    topic: Topic::Job,
                    event_type: "DeploymentStatusUpdate".to_string(),
                    key: "j1".to_string(),
                    filter_keys: vec![],
                    index,
                    payload: Payload::Job(JobEvent {
                        job: Arc::new(Job::new("j1", "default")),
                    }),
                },
            ],
        )
    }

    #[test]
    fn every_subscriber_gets_its_filtered_view() {
        let bus = InMemoryEventBus::new();
        let all = bus.subscribe(SubscribeRequest::all());
        let jobs = bus.subscribe(SubscribeRequest::new().topic(Topic::Job, [ALL_KEYS]));

        bus.publish(batch(5)).unwrap();

        let got = all.try_recv().unwrap();
        assert_eq!(got, batch(5));

        let got = jobs.try_recv().unwrap();
        assert_eq!(got.index, 5);
        assert_eq!(got.len(), 1);
        assert_eq!(got.events[0].topic, Topic::Job);
    }

    #[test]
    fn subscriber_without_matches_receives_nothing() {
        let bus = InMemoryEventBus::new();
        let other = bus.subscribe(SubscribeRequest::new().topic(Topic::Eval, [ALL_KEYS]));

        bus.publish(batch(5)).unwrap();

        assert!(other.try_recv().is_err());
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn batches_arrive_in_publish_order() {
        let bus = InMemoryEventBus::new();
        let sub = bus.subscribe(SubscribeRequest::all());

        for index in [3, 4, 9] {
            bus.publish(batch(index)).unwrap();
        }

        let indexes: Vec<_> = sub.drain().iter().map(|b| b.index).collect();
        assert_eq!(indexes, vec![3, 4, 9]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus = InMemoryEventBus::new();
        let sub = bus.subscribe(SubscribeRequest::all());
        drop(sub);

        bus.publish(batch(1)).unwrap();
        assert_eq!(bus.subscriber_count(), 0);
    }
}
