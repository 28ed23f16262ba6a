//! Write-kind codes attached to every state store transaction.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of write a transaction performs.
///
/// The numeric codes are part of the replicated log format and must never be
/// reordered. Gaps are retired codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    NodeRegister = 0,
    NodeDeregister = 1,
    NodeUpdateStatus = 2,
    NodeUpdateDrain = 3,
    JobRegister = 4,
    JobDeregister = 5,
    EvalUpdate = 6,
    EvalDelete = 7,
    AllocUpdate = 8,
    AllocClientUpdate = 9,
    ReconcileJobSummaries = 10,
    ApplyPlanResults = 13,
    DeploymentStatusUpdate = 14,
    DeploymentPromote = 15,
    DeploymentAllocHealth = 16,
    DeploymentDelete = 17,
    JobStability = 18,
}

impl MessageType {
    /// Every known write kind, in code order.
    pub const ALL: [MessageType; 17] = [
        MessageType::NodeRegister,
        MessageType::NodeDeregister,
        MessageType::NodeUpdateStatus,
        MessageType::NodeUpdateDrain,
        MessageType::JobRegister,
        MessageType::JobDeregister,
        MessageType::EvalUpdate,
        MessageType::EvalDelete,
        MessageType::AllocUpdate,
        MessageType::AllocClientUpdate,
        MessageType::ReconcileJobSummaries,
        MessageType::ApplyPlanResults,
        MessageType::DeploymentStatusUpdate,
        MessageType::DeploymentPromote,
        MessageType::DeploymentAllocHealth,
        MessageType::DeploymentDelete,
        MessageType::JobStability,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MessageType {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        MessageType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or(CoreError::UnknownMessageType(code))
    }
}

impl From<MessageType> for u8 {
    fn from(value: MessageType) -> Self {
        value.code()
    }
}
