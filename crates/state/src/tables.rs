//! Registry of the tables that feed the event stream.

use statestream_events::Topic;

use crate::changes::ResourceKind;

pub const DEPLOYMENT_TABLE: &str = "deployment";
pub const JOBS_TABLE: &str = "jobs";
pub const EVALS_TABLE: &str = "evals";

/// How rows of one table become events.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub topic: Topic,
    /// Kind every row of this table must hold.
    pub kind: ResourceKind,
}

/// Tables tracked by the event stream. Any other table is auxiliary and is
/// never published.
pub const TRACKED_TABLES: &[TableSpec] = &[
    TableSpec {
        name: DEPLOYMENT_TABLE,
        topic: Topic::Deployment,
        kind: ResourceKind::Deployment,
    },
    TableSpec {
        name: JOBS_TABLE,
        topic: Topic::Job,
        kind: ResourceKind::Job,
    },
    TableSpec {
        name: EVALS_TABLE,
        topic: Topic::Eval,
        kind: ResourceKind::Evaluation,
    },
];

pub fn lookup(table: &str) -> Option<&'static TableSpec> {
    TRACKED_TABLES.iter().find(|spec| spec.name == table)
}
