use chrono::{DateTime, Utc};
use officeline_core::{MemberId, OfficeId};
use serde::{Deserialize, Serialize};

/// Stable activity actions appended by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// Emitted when an office is created.
    OfficeCreated,
    /// Emitted when office name or description changes.
    OfficeUpdated,
    /// Emitted when a member joins with a code.
    MemberJoined,
    /// Emitted when a member is activated or deactivated.
    MemberStatusChanged,
    /// Emitted when a member moves to another role.
    MemberRoleChanged,
    /// Emitted when a custom role is defined.
    RoleDefined,
    /// Emitted when a shift is scheduled.
    ShiftCreated,
    /// Emitted when a shift changes status.
    ShiftStatusChanged,
    /// Emitted when a task is created.
    TaskCreated,
    /// Emitted when a task changes status.
    TaskStatusChanged,
    /// Emitted when a task is reassigned.
    TaskReassigned,
    /// Emitted when an item is added.
    InventoryItemAdded,
    /// Emitted when stock changes.
    InventoryStockAdjusted,
    /// Emitted when a message is posted.
    MessagePosted,
}

impl ActivityAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OfficeCreated => "office.created",
            Self::OfficeUpdated => "office.updated",
            Self::MemberJoined => "member.joined",
            Self::MemberStatusChanged => "member.status_changed",
            Self::MemberRoleChanged => "member.role_changed",
            Self::RoleDefined => "role.defined",
            Self::ShiftCreated => "shift.created",
            Self::ShiftStatusChanged => "shift.status_changed",
            Self::TaskCreated => "task.created",
            Self::TaskStatusChanged => "task.status_changed",
            Self::TaskReassigned => "task.reassigned",
            Self::InventoryItemAdded => "inventory.item_added",
            Self::InventoryStockAdjusted => "inventory.stock_adjusted",
            Self::MessagePosted => "message.posted",
        }
    }
}

/// Append-only record of one successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Office scope for the event.
    pub office_id: OfficeId,
    /// Member that performed the action; `None` for system actions.
    pub actor: Option<MemberId>,
    /// Stable action identifier.
    pub action: ActivityAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional human-readable detail.
    pub detail: Option<String>,
    /// When the action happened.
    pub occurred_at: DateTime<Utc>,
}
