use super::types::{Priority, ResourceStatus};
use serde::Serialize;
use uuid::Uuid;

pub type EventId = String;

/// Snapshot of a system's report about one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    /// Name of the system that raised the event
    pub source: String,
    /// Name of the resource the event concerns
    pub resource: String,
    pub status: ResourceStatus,
    pub priority: Priority,
    /// Resource amount observed when the event was raised
    pub amount: u32,
}

impl Event {
    pub fn new(
        source: impl Into<String>,
        resource: impl Into<String>,
        status: ResourceStatus,
        priority: Priority,
        amount: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            resource: resource.into(),
            status,
            priority,
            amount,
        }
    }
}
