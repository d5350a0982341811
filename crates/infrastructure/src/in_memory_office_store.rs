use std::collections::HashMap;

use officeline_core::{MemberId, OfficeId};
use officeline_domain::{
    ActivityEvent, InventoryItem, ItemId, JoinCode, Member, Message, Office, RoleDefinition,
    RoleName, Shift, ShiftId, Task, TaskId,
};
use tokio::sync::RwLock;

mod activity;
mod inventory;
mod messages;
mod offices;
mod schedule;

/// In-memory store backing every office repository port.
///
/// Records are partitioned by office id. Maps are locked in declaration
/// order whenever more than one is held.
#[derive(Debug, Default)]
pub struct InMemoryOfficeStore {
    offices: RwLock<HashMap<OfficeId, Office>>,
    join_codes: RwLock<HashMap<JoinCode, OfficeId>>,
    members: RwLock<HashMap<(OfficeId, MemberId), Member>>,
    roles: RwLock<HashMap<(OfficeId, RoleName), RoleDefinition>>,
    shifts: RwLock<HashMap<(OfficeId, ShiftId), Shift>>,
    tasks: RwLock<HashMap<(OfficeId, TaskId), Task>>,
    items: RwLock<HashMap<(OfficeId, ItemId), InventoryItem>>,
    messages: RwLock<Vec<Message>>,
    activity: RwLock<Vec<ActivityEvent>>,
}

impl InMemoryOfficeStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests;
