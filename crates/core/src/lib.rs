//! `statestream-core` — resource structs and write-kind codes shared by the
//! state store and the event stream.
//!
//! This crate contains **plain data** (no storage, no publishing).

pub mod error;
pub mod id;
pub mod message_type;
pub mod structs;

pub use error::{CoreError, CoreResult};
pub use id::{HasId, generate_uuid};
pub use message_type::MessageType;
pub use structs::{Deployment, DeploymentStatus, Evaluation, EvalStatus, Job, JobStatus};
