//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod activity;
mod analytics;
mod assignment;
mod ids;
mod inventory;
mod member;
mod message;
mod office;
mod priority;
mod role;
mod shift;
mod task;

pub use activity::{ActivityAction, ActivityEvent};
pub use analytics::{AnalyticsInputs, AnalyticsSnapshot, PriorityBreakdown, RoleStats, summarize};
pub use assignment::{Assignable, Assignment, no_assignment};
pub use ids::{ItemId, MessageId, ShiftId, TaskId};
pub use inventory::{
    InventoryFilter, InventoryItem, NewInventoryItem, OverstockRatio, StockAdjustment, StockAlert,
    StockStatus, classify_stock,
};
pub use member::{EMPLOYEE_NUMBER_MAX, EmployeeNumber, Member, MemberStatus};
pub use message::{Message, MessageFilter, MessageKind, NewMessage};
pub use office::{JOIN_CODE_ALPHABET, JOIN_CODE_LENGTH, JoinCode, Office};
pub use priority::Priority;
pub use role::{Permission, RoleDefinition, RoleKind, RoleName};
pub use shift::{DEFAULT_SHIFT_LOCATION, NewShift, Shift, ShiftStatus};
pub use task::{NewTask, Task, TaskFilter, TaskStatus};
