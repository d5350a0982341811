use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex as StdMutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use officeline_core::{AppError, AppResult, MemberId, OfficeId};
use officeline_domain::{
    ActivityEvent, Assignable, InventoryItem, ItemId, JoinCode, Member, Message, MessageId, Office,
    RoleDefinition, Shift, ShiftId, StockAlert, Task, TaskId,
};

use crate::{
    ActivityRepository, InventoryRepository, JoinCodeGenerator, MessageRepository,
    NotificationDispatcher, OfficeRepository, ScheduleRepository,
};

/// Single fake backing every port, so services under test share state.
#[derive(Default)]
pub(crate) struct FakeStore {
    offices: Mutex<Vec<Office>>,
    members: Mutex<Vec<Member>>,
    roles: Mutex<Vec<(OfficeId, RoleDefinition)>>,
    shifts: Mutex<Vec<Shift>>,
    tasks: Mutex<Vec<Task>>,
    items: Mutex<Vec<InventoryItem>>,
    messages: Mutex<Vec<Message>>,
    pub(crate) events: Mutex<Vec<ActivityEvent>>,
    pub(crate) stock_alerts: Mutex<Vec<StockAlert>>,
    pub(crate) announced: Mutex<Vec<MessageId>>,
    side_effects_down: AtomicBool,
}

impl FakeStore {
    pub(crate) async fn seed_office(&self, name: &str, creator_name: &str) -> (Office, Member) {
        let office = Office::new(
            name,
            None,
            JoinCode::parse("SEED01").unwrap_or_else(|_| unreachable!()),
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!());
        let creator =
            Member::creator(office.id(), creator_name, Utc::now()).unwrap_or_else(|_| unreachable!());

        self.create_office(office.clone(), creator.clone(), RoleDefinition::defaults())
            .await
            .unwrap_or_else(|_| unreachable!());
        (office, creator)
    }

    /// Makes the activity log and notification ports fail from now on.
    pub(crate) fn break_side_effects(&self) {
        self.side_effects_down.store(true, Ordering::SeqCst);
    }

    fn side_effect_outage(&self) -> AppResult<()> {
        if self.side_effects_down.load(Ordering::SeqCst) {
            return Err(AppError::Internal("side effect port unavailable".to_owned()));
        }

        Ok(())
    }

    pub(crate) async fn add_member(&self, member: Member) {
        self.insert_member(member)
            .await
            .unwrap_or_else(|_| unreachable!());
    }
}

#[async_trait]
impl OfficeRepository for FakeStore {
    async fn create_office(
        &self,
        office: Office,
        creator: Member,
        roles: Vec<RoleDefinition>,
    ) -> AppResult<()> {
        let mut offices = self.offices.lock().await;
        if offices
            .iter()
            .any(|stored| stored.join_code() == office.join_code())
        {
            return Err(AppError::Conflict(format!(
                "join code '{}' is already in use",
                office.join_code()
            )));
        }

        let office_id = office.id();
        offices.push(office);
        self.members.lock().await.push(creator);
        self.roles
            .lock()
            .await
            .extend(roles.into_iter().map(|role| (office_id, role)));
        Ok(())
    }

    async fn find_office(&self, office_id: OfficeId) -> AppResult<Option<Office>> {
        Ok(self
            .offices
            .lock()
            .await
            .iter()
            .find(|office| office.id() == office_id)
            .cloned())
    }

    async fn find_office_by_join_code(&self, join_code: &JoinCode) -> AppResult<Option<Office>> {
        Ok(self
            .offices
            .lock()
            .await
            .iter()
            .find(|office| office.join_code() == join_code)
            .cloned())
    }

    async fn join_code_in_use(&self, join_code: &JoinCode) -> AppResult<bool> {
        Ok(self.find_office_by_join_code(join_code).await?.is_some())
    }

    async fn save_office(&self, office: Office) -> AppResult<()> {
        let mut offices = self.offices.lock().await;
        let stored = offices
            .iter_mut()
            .find(|stored| stored.id() == office.id())
            .ok_or_else(|| AppError::NotFound("office not found".to_owned()))?;
        *stored = office;
        Ok(())
    }

    async fn count_members(&self, office_id: OfficeId) -> AppResult<usize> {
        let count = self
            .members
            .lock()
            .await
            .iter()
            .filter(|member| member.office_id() == office_id)
            .count();

        // Widens the window between counting and inserting.
        tokio::task::yield_now().await;
        Ok(count)
    }

    async fn insert_member(&self, member: Member) -> AppResult<()> {
        let mut members = self.members.lock().await;
        if members.iter().any(|stored| {
            stored.office_id() == member.office_id()
                && stored.employee_number() == member.employee_number()
        }) {
            return Err(AppError::Conflict(format!(
                "employee number {} is already taken",
                member.employee_number()
            )));
        }

        members.push(member);
        Ok(())
    }

    async fn save_member(&self, member: Member) -> AppResult<()> {
        let mut members = self.members.lock().await;
        let stored = members
            .iter_mut()
            .find(|stored| stored.id() == member.id())
            .ok_or_else(|| AppError::NotFound("member not found".to_owned()))?;
        *stored = member;
        Ok(())
    }

    async fn find_member(
        &self,
        office_id: OfficeId,
        member_id: MemberId,
    ) -> AppResult<Option<Member>> {
        Ok(self
            .members
            .lock()
            .await
            .iter()
            .find(|member| member.office_id() == office_id && member.id() == member_id)
            .cloned())
    }

    async fn list_members(&self, office_id: OfficeId) -> AppResult<Vec<Member>> {
        let mut members: Vec<Member> = self
            .members
            .lock()
            .await
            .iter()
            .filter(|member| member.office_id() == office_id)
            .cloned()
            .collect();
        members.sort_by_key(Member::employee_number);
        Ok(members)
    }

    async fn list_roles(&self, office_id: OfficeId) -> AppResult<Vec<RoleDefinition>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .filter(|(owner, _)| *owner == office_id)
            .map(|(_, role)| role.clone())
            .collect())
    }

    async fn insert_role(&self, office_id: OfficeId, role: RoleDefinition) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        if roles
            .iter()
            .any(|(owner, stored)| *owner == office_id && stored.name() == role.name())
        {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                role.name()
            )));
        }

        roles.push((office_id, role));
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for FakeStore {
    async fn insert_shift(&self, shift: Shift) -> AppResult<()> {
        self.shifts.lock().await.push(shift);
        Ok(())
    }

    async fn save_shift(&self, shift: Shift) -> AppResult<()> {
        let mut shifts = self.shifts.lock().await;
        if let Some(stored) = shifts.iter_mut().find(|stored| stored.id() == shift.id()) {
            *stored = shift;
        }
        Ok(())
    }

    async fn find_shift(&self, office_id: OfficeId, shift_id: ShiftId) -> AppResult<Option<Shift>> {
        Ok(self
            .shifts
            .lock()
            .await
            .iter()
            .find(|shift| shift.office_id() == office_id && shift.id() == shift_id)
            .cloned())
    }

    async fn list_shifts(&self, office_id: OfficeId) -> AppResult<Vec<Shift>> {
        Ok(self
            .shifts
            .lock()
            .await
            .iter()
            .filter(|shift| shift.office_id() == office_id)
            .cloned()
            .collect())
    }

    async fn insert_task(&self, task: Task) -> AppResult<()> {
        self.tasks.lock().await.push(task);
        Ok(())
    }

    async fn save_task(&self, task: Task) -> AppResult<()> {
        let mut tasks = self.tasks.lock().await;
        if let Some(stored) = tasks.iter_mut().find(|stored| stored.id() == task.id()) {
            *stored = task;
        }
        Ok(())
    }

    async fn find_task(&self, office_id: OfficeId, task_id: TaskId) -> AppResult<Option<Task>> {
        Ok(self
            .tasks
            .lock()
            .await
            .iter()
            .find(|task| task.office_id() == office_id && task.id() == task_id)
            .cloned())
    }

    async fn list_tasks(&self, office_id: OfficeId) -> AppResult<Vec<Task>> {
        Ok(self
            .tasks
            .lock()
            .await
            .iter()
            .filter(|task| task.office_id() == office_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl InventoryRepository for FakeStore {
    async fn insert_item(&self, item: InventoryItem) -> AppResult<()> {
        self.items.lock().await.push(item);
        Ok(())
    }

    async fn save_item(&self, item: InventoryItem) -> AppResult<()> {
        let mut items = self.items.lock().await;
        if let Some(stored) = items.iter_mut().find(|stored| stored.id() == item.id()) {
            *stored = item;
        }
        Ok(())
    }

    async fn find_item(
        &self,
        office_id: OfficeId,
        item_id: ItemId,
    ) -> AppResult<Option<InventoryItem>> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .find(|item| item.office_id() == office_id && item.id() == item_id)
            .cloned())
    }

    async fn list_items(&self, office_id: OfficeId) -> AppResult<Vec<InventoryItem>> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .filter(|item| item.office_id() == office_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MessageRepository for FakeStore {
    async fn insert_message(&self, message: Message) -> AppResult<()> {
        self.messages.lock().await.push(message);
        Ok(())
    }

    async fn save_message(&self, message: Message) -> AppResult<()> {
        let mut messages = self.messages.lock().await;
        if let Some(stored) = messages.iter_mut().find(|stored| stored.id() == message.id()) {
            *stored = message;
        }
        Ok(())
    }

    async fn find_message(
        &self,
        office_id: OfficeId,
        message_id: MessageId,
    ) -> AppResult<Option<Message>> {
        Ok(self
            .messages
            .lock()
            .await
            .iter()
            .find(|message| message.office_id() == office_id && message.id() == message_id)
            .cloned())
    }

    async fn list_messages(&self, office_id: OfficeId) -> AppResult<Vec<Message>> {
        Ok(self
            .messages
            .lock()
            .await
            .iter()
            .filter(|message| message.office_id() == office_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ActivityRepository for FakeStore {
    async fn append_event(&self, event: ActivityEvent) -> AppResult<()> {
        self.side_effect_outage()?;
        self.events.lock().await.push(event);
        Ok(())
    }

    async fn list_recent(
        &self,
        office_id: OfficeId,
        limit: usize,
    ) -> AppResult<Vec<ActivityEvent>> {
        Ok(self
            .events
            .lock()
            .await
            .iter()
            .rev()
            .filter(|event| event.office_id == office_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NotificationDispatcher for FakeStore {
    async fn notify_stock_alert(&self, alert: &StockAlert) -> AppResult<()> {
        self.side_effect_outage()?;
        self.stock_alerts.lock().await.push(alert.clone());
        Ok(())
    }

    async fn notify_new_message(&self, message: &Message) -> AppResult<()> {
        self.side_effect_outage()?;
        self.announced.lock().await.push(message.id());
        Ok(())
    }
}

/// Generator replaying a fixed list of codes, then failing.
pub(crate) struct ScriptedJoinCodes {
    codes: StdMutex<VecDeque<JoinCode>>,
}

impl ScriptedJoinCodes {
    pub(crate) fn new(codes: &[&str]) -> Self {
        Self {
            codes: StdMutex::new(
                codes
                    .iter()
                    .map(|code| JoinCode::parse(code).unwrap_or_else(|_| unreachable!()))
                    .collect(),
            ),
        }
    }

    /// Generator that keeps returning the same code.
    pub(crate) fn repeating(code: &str, times: usize) -> Self {
        Self::new(&vec![code; times])
    }
}

impl JoinCodeGenerator for ScriptedJoinCodes {
    fn generate(&self) -> AppResult<JoinCode> {
        self.codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| AppError::Internal("script ran out of join codes".to_owned()))
    }
}
