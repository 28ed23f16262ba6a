//! Row-level change records produced by a committed transaction.

use std::sync::Arc;

use statestream_core::{Deployment, Evaluation, HasId, Job};
use statestream_events::{DeploymentEvent, EvalEvent, JobEvent, Payload};

/// Kind of resource a table row holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    Job,
    Evaluation,
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Job => "Job",
            ResourceKind::Evaluation => "Evaluation",
        };
        f.write_str(name)
    }
}

/// A stored row value.
///
/// Rows are shared, never copied: events wrap the same `Arc` the store holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Deployment(Arc<Deployment>),
    Job(Arc<Job>),
    Evaluation(Arc<Evaluation>),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Deployment(_) => ResourceKind::Deployment,
            Resource::Job(_) => ResourceKind::Job,
            Resource::Evaluation(_) => ResourceKind::Evaluation,
        }
    }

    /// Primary identifier.
    pub fn id(&self) -> &str {
        match self {
            Resource::Deployment(d) => d.as_ref().id(),
            Resource::Job(j) => j.as_ref().id(),
            Resource::Evaluation(e) => e.as_ref().id(),
        }
    }

    /// Secondary identifiers subscribers can filter on, in declaration order.
    ///
    /// Empty identifiers are left out.
    pub fn filter_keys(&self) -> Vec<String> {
        let keys = match self {
            Resource::Deployment(d) => vec![d.job_id.as_str()],
            Resource::Job(_) => vec![],
            Resource::Evaluation(e) => vec![e.deployment_id.as_str(), e.job_id.as_str()],
        };
        keys.into_iter()
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Wrap the row for publication.
    pub fn to_payload(&self) -> Payload {
        match self {
            Resource::Deployment(d) => Payload::Deployment(DeploymentEvent {
                deployment: Arc::clone(d),
            }),
            Resource::Job(j) => Payload::Job(JobEvent { job: Arc::clone(j) }),
            Resource::Evaluation(e) => Payload::Eval(EvalEvent { eval: Arc::clone(e) }),
        }
    }
}

impl From<Deployment> for Resource {
    fn from(value: Deployment) -> Self {
        Resource::Deployment(Arc::new(value))
    }
}

impl From<Job> for Resource {
    fn from(value: Job) -> Self {
        Resource::Job(Arc::new(value))
    }
}

impl From<Evaluation> for Resource {
    fn from(value: Evaluation) -> Self {
        Resource::Evaluation(Arc::new(value))
    }
}

impl From<Arc<Deployment>> for Resource {
    fn from(value: Arc<Deployment>) -> Self {
        Resource::Deployment(value)
    }
}

impl From<Arc<Job>> for Resource {
    fn from(value: Arc<Job>) -> Self {
        Resource::Job(value)
    }
}

impl From<Arc<Evaluation>> for Resource {
    fn from(value: Arc<Evaluation>) -> Self {
        Resource::Evaluation(value)
    }
}

/// One row mutation.
///
/// `after` is `None` for deletes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub table: String,
    pub before: Option<Resource>,
    pub after: Option<Resource>,
}

impl Change {
    /// Insert or update of a row.
    pub fn upsert(table: impl Into<String>, before: Option<Resource>, after: impl Into<Resource>) -> Self {
        Self {
            table: table.into(),
            before,
            after: Some(after.into()),
        }
    }

    /// Removal of a row.
    pub fn delete(table: impl Into<String>, before: impl Into<Resource>) -> Self {
        Self {
            table: table.into(),
            before: Some(before.into()),
            after: None,
        }
    }

    pub fn is_delete(&self) -> bool {
        self.after.is_none()
    }
}

/// Every change of one committed transaction, in mutation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    /// Log index assigned to the transaction at commit.
    pub index: u64,
    pub changes: Vec<Change>,
}

impl Changes {
    pub fn new(index: u64, changes: Vec<Change>) -> Self {
        Self { index, changes }
    }
}
