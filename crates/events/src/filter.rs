//! Subscriber-side topic/key filtering.

use std::collections::HashMap;

use crate::event::{ALL_KEYS, Event, Events, Topic};

/// Which events a subscriber wants to receive.
///
/// Maps each topic of interest to the keys to match. An event matches when its
/// topic is listed (or `Topic::All` is) and one of the listed keys is
/// [`ALL_KEYS`], the event key, or one of its filter keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscribeRequest {
    topics: HashMap<Topic, Vec<String>>,
}

impl SubscribeRequest {
    /// Empty request; matches nothing until topics are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match every event on every topic.
    pub fn all() -> Self {
        Self::new().topic(Topic::All, [ALL_KEYS])
    }

    /// Add `keys` of interest for `topic`.
    pub fn topic<I, K>(mut self, topic: Topic, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.topics
            .entry(topic)
            .or_default()
            .extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        [event.topic, Topic::All]
            .iter()
            .filter_map(|t| self.topics.get(t))
            .flatten()
            .any(|key| key == ALL_KEYS || event.matches_key(key))
    }

    /// The part of `batch` this subscriber should see, order preserved.
    pub fn filter(&self, batch: &Events) -> Events {
        Events {
            index: batch.index,
            events: batch
                .events
                .iter()
                .filter(|e| self.matches(e))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use statestream_core::{Deployment, Job};

    use super::*;
    use crate::event::{DeploymentEvent, JobEvent, Payload};

    fn deployment_event(id: &str, job_id: &str) -> Event {
        Event {
            topic: Topic::Deployment,
            event_type: "DeploymentPromotion".to_string(),
            key: id.to_string(),
            filter_keys: vec![job_id.to_string()],
            index: 10,
            payload: Payload::Deployment(DeploymentEvent {
                deployment: Arc::new(Deployment {
                    id: id.to_string(),
                    job_id: job_id.to_string(),
                    ..Deployment::default()
                }),
            }),
        }
    }

    fn job_event(id: &str) -> Event {
        Event {
            topic: Topic::Job,
            event_type: String::new(),
            key: id.to_string(),
            filter_keys: vec![],
            index: 10,
            payload: Payload::Job(JobEvent {
                job: Arc::new(Job::new(id, "default")),
            }),
        }
    }

    #[test]
    fn empty_request_matches_nothing() {
        assert!(!SubscribeRequest::new().matches(&job_event("j1")));
    }

    #[test]
    fn wildcard_topic_and_key_match_everything() {
        let req = SubscribeRequest::all();
        assert!(req.matches(&job_event("j1")));
        assert!(req.matches(&deployment_event("d1", "j1")));
    }

    #[test]
    fn topic_filter_excludes_other_topics() {
        let req = SubscribeRequest::new().topic(Topic::Job, [ALL_KEYS]);
        assert!(req.matches(&job_event("j1")));
        assert!(!req.matches(&deployment_event("d1", "j1")));
    }

    #[test]
    fn filter_key_matches_related_resource() {
        let req = SubscribeRequest::new().topic(Topic::Deployment, ["j1"]);
        assert!(req.matches(&deployment_event("d1", "j1")));
        assert!(!req.matches(&deployment_event("d2", "j2")));
    }

    #[test]
    fn wildcard_topic_with_specific_key() {
        let req = SubscribeRequest::new().topic(Topic::All, ["j1"]);
        assert!(req.matches(&job_event("j1")));
        assert!(req.matches(&deployment_event("d1", "j1")));
        assert!(!req.matches(&job_event("j2")));
    }

    #[test]
    fn filter_keeps_index_and_order() {
        let batch = Events::new(
            10,
            vec![
                deployment_event("d1", "j1"),
                job_event("j2"),
                deployment_event("d3", "j1"),
            ],
        );
        let req = SubscribeRequest::new().topic(Topic::Deployment, ["j1"]);

        let filtered = req.filter(&batch);
        assert_eq!(filtered.index, 10);
        let keys: Vec<_> = filtered.events.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["d1", "d3"]);
    }
}
