//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus receives one [`Events`] batch per committed transaction and fans it
//! out to subscribers. It is the boundary between the state store, which knows
//! nothing about consumers, and the consumers, which know nothing about storage.
//!
//! ## Ordering
//!
//! Batches are delivered to each subscriber in publish order. Publishers are
//! expected to publish in commit (index) order; the bus does not reorder.
//!
//! ## Delivery
//!
//! - **Filtered**: each subscriber only sees events matching its
//!   [`SubscribeRequest`]; batches with nothing left are not delivered
//! - **No persistence**: the bus is for distribution, the state store is the
//!   source of truth
//! - **No backpressure**: retention and flow control are up to the transport

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::event::Events;
use crate::filter::SubscribeRequest;

/// A subscription to the event stream.
///
/// ```ignore
/// let sub = bus.subscribe(SubscribeRequest::new().topic(Topic::Deployment, ["web"]));
///
/// loop {
///     match sub.recv_timeout(Duration::from_secs(1)) {
///         Ok(batch) => process(batch)?,
///         Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,  // Check for shutdown
///         Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,  // Bus closed
///     }
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<Events>,
}

impl Subscription {
    pub fn new(receiver: Receiver<Events>) -> Self {
        Self { receiver }
    }

    /// Block until the next batch is available.
    pub fn recv(&self) -> Result<Events, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a batch without blocking.
    pub fn try_recv(&self) -> Result<Events, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a batch.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Events, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain every batch that is already queued.
    pub fn drain(&self) -> Vec<Events> {
        self.receiver.try_iter().collect()
    }
}

/// Transport-agnostic event broker.
///
/// ```text
/// commit → derive events → EventBus::publish(batch) → subscribers (filtered)
/// ```
///
/// `publish()` can fail (lock poisoning, network error). The publisher surfaces
/// the failure to its caller; the batch can be re-derived from the committed
/// transaction and published again.
///
/// Implementations must be safe to share across threads.
pub trait EventBus: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, batch: Events) -> Result<(), Self::Error>;

    fn subscribe(&self, request: SubscribeRequest) -> Subscription;
}

impl<B> EventBus for Arc<B>
where
    B: EventBus + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, batch: Events) -> Result<(), Self::Error> {
        (**self).publish(batch)
    }

    fn subscribe(&self, request: SubscribeRequest) -> Subscription {
        (**self).subscribe(request)
    }
}
