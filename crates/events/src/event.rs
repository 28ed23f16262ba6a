use std::sync::Arc;

use serde::{Deserialize, Serialize};

use statestream_core::{Deployment, Evaluation, Job};

/// Reserved key that matches every key of a topic.
pub const ALL_KEYS: &str = "*";

/// Category an event is published under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Deployment,
    Job,
    Eval,
    /// Wildcard, only meaningful in subscription requests.
    #[serde(rename = "*")]
    All,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Deployment => "Deployment",
            Topic::Job => "Job",
            Topic::Eval => "Eval",
            Topic::All => "*",
        }
    }
}

impl core::fmt::Display for Topic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentEvent {
    pub deployment: Arc<Deployment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEvent {
    pub job: Arc<Job>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalEvent {
    pub eval: Arc<Evaluation>,
}

/// Resource carried by an event.
///
/// Consumers dispatch on the event's `topic`; the variant always agrees with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Deployment(DeploymentEvent),
    Job(JobEvent),
    Eval(EvalEvent),
}

impl Payload {
    /// Topic this payload is published under.
    pub fn topic(&self) -> Topic {
        match self {
            Payload::Deployment(_) => Topic::Deployment,
            Payload::Job(_) => Topic::Job,
            Payload::Eval(_) => Topic::Eval,
        }
    }

    pub fn as_deployment(&self) -> Option<&Deployment> {
        match self {
            Payload::Deployment(e) => Some(&e.deployment),
            _ => None,
        }
    }

    pub fn as_job(&self) -> Option<&Job> {
        match self {
            Payload::Job(e) => Some(&e.job),
            _ => None,
        }
    }

    pub fn as_eval(&self) -> Option<&Evaluation> {
        match self {
            Payload::Eval(e) => Some(&e.eval),
            _ => None,
        }
    }
}

/// A single change published to subscribers.
///
/// Events are immutable facts: every event derived from one transaction shares
/// the transaction's `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub topic: Topic,
    /// Advisory label for the kind of write; empty when unspecified.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Primary identifier of the changed resource.
    pub key: String,
    /// Secondary identifiers subscribers may filter on.
    pub filter_keys: Vec<String>,
    pub index: u64,
    pub payload: Payload,
}

impl Event {
    /// Whether `key` is this event's key or one of its filter keys.
    pub fn matches_key(&self, key: &str) -> bool {
        self.key == key || self.filter_keys.iter().any(|k| k == key)
    }
}

/// All events derived from one committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Events {
    pub index: u64,
    pub events: Vec<Event>,
}

impl Events {
    pub fn new(index: u64, events: Vec<Event>) -> Self {
        Self { index, events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_event(id: &str) -> Event {
        Event {
            topic: Topic::Job,
            event_type: String::new(),
            key: id.to_string(),
            filter_keys: vec![],
            index: 7,
            payload: Payload::Job(JobEvent {
                job: Arc::new(Job::new(id, "default")),
            }),
        }
    }

    #[test]
    fn payload_topic_agrees_with_variant() {
        let event = job_event("j1");
        assert_eq!(event.payload.topic(), Topic::Job);
        assert_eq!(event.payload.as_job().map(|j| j.id.as_str()), Some("j1"));
        assert!(event.payload.as_deployment().is_none());
    }

    #[test]
    fn event_serializes_type_and_topic_names() {
        let json = serde_json::to_value(job_event("j1")).unwrap();
        assert_eq!(json["topic"], "Job");
        assert_eq!(json["type"], "");
        assert_eq!(json["payload"]["job"]["id"], "j1");
        assert_eq!(serde_json::to_value(Topic::All).unwrap(), "*");
    }

    #[test]
    fn matches_key_checks_filter_keys() {
        let mut event = job_event("j1");
        event.filter_keys.push("d1".to_string());
        assert!(event.matches_key("j1"));
        assert!(event.matches_key("d1"));
        assert!(!event.matches_key("x"));
    }
}
