//! Event stream types and the publish/subscribe seam.
//!
//! Events are derived from committed state store transactions and handed to a
//! broker, which fans them out to subscribers by topic, key and filter keys.

pub mod bus;
pub mod event;
pub mod filter;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::{ALL_KEYS, DeploymentEvent, EvalEvent, Event, Events, JobEvent, Payload, Topic};
pub use filter::SubscribeRequest;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
