use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use officeline_core::{AppError, AppResult, MemberId, MemberIdentity, OfficeId};
use officeline_domain::{
    ActivityAction, ActivityEvent, Member, Message, MessageFilter, MessageId, NewMessage,
    Priority, RoleName,
};

use crate::{
    ActivityRepository, MessageRepository, NotificationDispatcher, OfficeLocks, OfficeRepository,
};

/// Application service for office messages, targeting and read state.
#[derive(Clone)]
pub struct MessageService {
    office_repository: Arc<dyn OfficeRepository>,
    message_repository: Arc<dyn MessageRepository>,
    activity_repository: Arc<dyn ActivityRepository>,
    notifications: Arc<dyn NotificationDispatcher>,
    locks: OfficeLocks,
}

impl MessageService {
    /// Creates a new message service.
    #[must_use]
    pub fn new(
        office_repository: Arc<dyn OfficeRepository>,
        message_repository: Arc<dyn MessageRepository>,
        activity_repository: Arc<dyn ActivityRepository>,
        notifications: Arc<dyn NotificationDispatcher>,
        locks: OfficeLocks,
    ) -> Self {
        Self {
            office_repository,
            message_repository,
            activity_repository,
            notifications,
            locks,
        }
    }

    /// Posts a message authored by the actor. It starts read for the author.
    pub async fn post_message(&self, actor: &MemberIdentity, input: NewMessage) -> AppResult<Message> {
        let office_id = actor.office_id();
        let message = Message::compose(input, actor, actor.member_id(), Utc::now())?;

        let _guard = self.locks.lock(office_id).await;
        self.require_author(actor).await?;
        if let Some(target) = message.target_role() {
            self.require_target_role(office_id, target).await?;
        }

        self.message_repository.insert_message(message.clone()).await?;
        self.record(
            &message,
            Some(actor.member_id()),
            format!("posted {} '{}'", message.kind().as_str(), message.title()),
        )
        .await;

        info!(%office_id, message_id = %message.id(), kind = message.kind().as_str(), "message posted");
        self.announce(&message).await;
        Ok(message)
    }

    /// Posts an alert with no member author. It starts unread for everyone.
    pub async fn post_system_alert(
        &self,
        office_id: OfficeId,
        title: &str,
        body: &str,
        priority: Priority,
    ) -> AppResult<Message> {
        let message = Message::system_alert(office_id, title, body, priority, Utc::now())?;

        let _guard = self.locks.lock(office_id).await;
        if self.office_repository.find_office(office_id).await?.is_none() {
            return Err(AppError::NotFound(format!("office not found: '{office_id}'")));
        }

        self.message_repository.insert_message(message.clone()).await?;
        self.record(&message, None, format!("system alert '{}'", message.title()))
            .await;

        self.announce(&message).await;
        Ok(message)
    }

    /// Marks a visible message read for the actor only.
    ///
    /// Messages the actor already read are returned unchanged.
    pub async fn mark_read(&self, actor: &MemberIdentity, message_id: MessageId) -> AppResult<Message> {
        let office_id = actor.office_id();
        let _guard = self.locks.lock(office_id).await;
        let reader = self.require_author(actor).await?;

        let mut message = self
            .message_repository
            .find_message(office_id, message_id)
            .await?
            .filter(|message| message.is_visible_to(&reader))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "message '{message_id}' does not exist in office '{office_id}'"
                ))
            })?;

        if !message.mark_read(reader.id()) {
            debug!(%office_id, %message_id, "message already read");
            return Ok(message);
        }

        self.message_repository.save_message(message.clone()).await?;
        Ok(message)
    }

    /// Returns the messages passing `filter`, preserving order.
    #[must_use]
    pub fn filter(&self, messages: &[Message], filter: &MessageFilter) -> Vec<Message> {
        filter.apply(messages)
    }

    /// Returns true when `member` may see `message`.
    #[must_use]
    pub fn is_visible_to(&self, message: &Message, member: &Member) -> bool {
        message.is_visible_to(member)
    }

    /// Lists messages the actor may see that pass `filter`, newest first.
    ///
    /// Read state in the result is the actor's own.
    pub async fn list_visible(
        &self,
        actor: &MemberIdentity,
        filter: &MessageFilter,
    ) -> AppResult<Vec<Message>> {
        let reader = self.require_author(actor).await?;
        let mut messages: Vec<Message> = self
            .message_repository
            .list_messages(actor.office_id())
            .await?
            .into_iter()
            .filter(|message| message.is_visible_to(&reader))
            .map(|message| message.as_seen_by(reader.id()))
            .filter(|message| filter.matches(message))
            .collect();

        messages.reverse();
        messages.sort_by_key(|message| Reverse(message.created_at()));
        Ok(messages)
    }

    /// Counts unread messages the actor may see.
    pub async fn unread_count(&self, actor: &MemberIdentity) -> AppResult<usize> {
        let unread = MessageFilter {
            unread_only: true,
            ..MessageFilter::default()
        };

        Ok(self.list_visible(actor, &unread).await?.len())
    }

    async fn record(&self, message: &Message, actor: Option<MemberId>, detail: String) {
        let office_id = message.office_id();
        let event = ActivityEvent {
            office_id,
            actor,
            action: ActivityAction::MessagePosted,
            resource_type: "message".to_owned(),
            resource_id: message.id().to_string(),
            detail: Some(detail),
            occurred_at: Utc::now(),
        };

        if let Err(error) = self.activity_repository.append_event(event).await {
            warn!(%office_id, message_id = %message.id(), %error, "activity event not recorded");
        }
    }

    async fn announce(&self, message: &Message) {
        if let Err(error) = self.notifications.notify_new_message(message).await {
            warn!(
                office_id = %message.office_id(),
                message_id = %message.id(),
                %error,
                "new message notification not dispatched"
            );
        }
    }

    async fn require_author(&self, actor: &MemberIdentity) -> AppResult<Member> {
        self.office_repository
            .find_member(actor.office_id(), actor.member_id())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "member '{}' does not exist in office '{}'",
                    actor.member_id(),
                    actor.office_id()
                ))
            })
    }

    async fn require_target_role(&self, office_id: OfficeId, target: &RoleName) -> AppResult<()> {
        if target.is_all_staff() {
            return Ok(());
        }

        let roles = self.office_repository.list_roles(office_id).await?;
        if roles.iter().any(|definition| definition.name() == target) {
            return Ok(());
        }

        Err(AppError::NotFound(format!(
            "role '{target}' does not exist in office '{office_id}'"
        )))
    }
}
