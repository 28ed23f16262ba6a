//! Mutation kind → event type label.
//!
//! The label is advisory metadata. Write kinds without a label classify to the
//! empty string, which consumers read as "unspecified".

use statestream_core::MessageType;

pub const TYPE_DEPLOYMENT_UPDATE: &str = "DeploymentStatusUpdate";
pub const TYPE_DEPLOYMENT_PROMOTION: &str = "DeploymentPromotion";
pub const TYPE_DEPLOYMENT_ALLOC_HEALTH: &str = "DeploymentAllocHealth";

const EVENT_TYPES: &[(MessageType, &str)] = &[
    (MessageType::DeploymentStatusUpdate, TYPE_DEPLOYMENT_UPDATE),
    (MessageType::DeploymentPromote, TYPE_DEPLOYMENT_PROMOTION),
    (MessageType::DeploymentAllocHealth, TYPE_DEPLOYMENT_ALLOC_HEALTH),
];

pub fn classify(msg_type: MessageType) -> &'static str {
    match EVENT_TYPES.iter().find(|(t, _)| *t == msg_type) {
        Some((_, label)) => *label,
        None => {
            tracing::trace!(msg_type = ?msg_type, "unclassified mutation");
            ""
        }
    }
}

/// Classify a raw write-kind code as read off the log.
pub fn classify_code(code: u8) -> &'static str {
    match MessageType::try_from(code) {
        Ok(msg_type) => classify(msg_type),
        Err(e) => {
            tracing::debug!(error = %e, "unclassified mutation");
            ""
        }
    }
}
