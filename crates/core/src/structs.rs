//! Resources stored in the state store tables.
//!
//! Only the identifiers matter to the event stream; the remaining fields are
//! carried through untouched inside event payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::{HasId, generate_uuid};

macro_rules! impl_status {
    ($t:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $t {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($t::$variant => $name,)+
                }
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $t {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($t::$variant),)+
                    other => Err(CoreError::invalid_status(format!(
                        "{}: {}",
                        stringify!($t),
                        other
                    ))),
                }
            }
        }
    };
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    #[default]
    Running,
    Paused,
    Failed,
    Successful,
    Cancelled,
}

impl_status!(DeploymentStatus {
    Running => "running",
    Paused => "paused",
    Failed => "failed",
    Successful => "successful",
    Cancelled => "cancelled",
});

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Running,
    Dead,
}

impl_status!(JobStatus {
    Pending => "pending",
    Running => "running",
    Dead => "dead",
});

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalStatus {
    Blocked,
    #[default]
    Pending,
    Complete,
    Failed,
    Canceled,
}

impl_status!(EvalStatus {
    Blocked => "blocked",
    Pending => "pending",
    Complete => "complete",
    Failed => "failed",
    Canceled => "canceled",
});

/// A rollout of a specific job version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub namespace: String,
    pub job_id: String,
    pub job_version: u64,
    pub status: DeploymentStatus,
    pub status_description: String,
    pub create_index: u64,
    pub modify_index: u64,
}

impl Deployment {
    /// Start a new running deployment for the current version of `job`.
    pub fn for_job(job: &Job) -> Self {
        Self {
            id: generate_uuid(),
            namespace: job.namespace.clone(),
            job_id: job.id.clone(),
            job_version: job.version,
            status: DeploymentStatus::Running,
            status_description: "Deployment is running".to_string(),
            ..Self::default()
        }
    }

    /// Whether the deployment can still make progress.
    pub fn active(&self) -> bool {
        matches!(
            self.status,
            DeploymentStatus::Running | DeploymentStatus::Paused
        )
    }
}

/// A registered workload specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub namespace: String,
    pub name: String,
    pub job_type: String,
    pub version: u64,
    pub status: JobStatus,
    pub stop: bool,
    pub create_index: u64,
    pub modify_index: u64,
}

impl Job {
    pub fn new(id: impl Into<String>, namespace: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            namespace: namespace.into(),
            job_type: "service".to_string(),
            ..Self::default()
        }
    }
}

/// A request to (re)schedule a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: String,
    pub namespace: String,
    pub job_id: String,
    /// Empty when the evaluation is not tied to a deployment.
    pub deployment_id: String,
    pub triggered_by: String,
    pub status: EvalStatus,
    pub create_index: u64,
    pub modify_index: u64,
    pub create_time: DateTime<Utc>,
    pub modify_time: DateTime<Utc>,
}

impl Evaluation {
    /// New pending evaluation for `job`, triggered by `triggered_by`.
    pub fn for_job(job: &Job, triggered_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_uuid(),
            namespace: job.namespace.clone(),
            job_id: job.id.clone(),
            triggered_by: triggered_by.into(),
            create_time: now,
            modify_time: now,
            ..Self::default()
        }
    }

    /// Tie the evaluation to `deployment`.
    pub fn with_deployment(mut self, deployment: &Deployment) -> Self {
        self.deployment_id = deployment.id.clone();
        self
    }

    pub fn terminal(&self) -> bool {
        matches!(
            self.status,
            EvalStatus::Complete | EvalStatus::Failed | EvalStatus::Canceled
        )
    }
}

impl HasId for Deployment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Job {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Evaluation {
    fn id(&self) -> &str {
        &self.id
    }
}
