//! Office messages, role targeting and read state.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use officeline_core::{AppError, AppResult, MemberId, MemberIdentity, NonEmptyString, OfficeId};
use serde::{Deserialize, Serialize};

use crate::{Member, MessageId, Priority, RoleName};

const SYSTEM_AUTHOR: &str = "System";

/// Kind of message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Office-wide or role-wide notice.
    Announcement,
    /// Ordinary message.
    Message,
    /// Something needs attention.
    Alert,
}

impl MessageKind {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Announcement => "announcement",
            Self::Message => "message",
            Self::Alert => "alert",
        }
    }
}

impl FromStr for MessageKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "announcement" => Ok(Self::Announcement),
            "message" => Ok(Self::Message),
            "alert" => Ok(Self::Alert),
            _ => Err(AppError::Validation(format!(
                "unknown message type '{value}'"
            ))),
        }
    }
}

/// Input for posting a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Urgency.
    pub priority: Priority,
    /// Kind of message.
    pub kind: MessageKind,
    /// Role the message is meant for; blank means everyone.
    pub target_role: Option<String>,
}

/// A message posted in an office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    office_id: OfficeId,
    title: NonEmptyString,
    body: NonEmptyString,
    author_id: Option<MemberId>,
    author_name: String,
    author_role: String,
    created_at: DateTime<Utc>,
    priority: Priority,
    kind: MessageKind,
    target_role: Option<RoleName>,
    read_by: BTreeSet<MemberId>,
    is_read: bool,
}

impl Message {
    /// Composes a message written by `author` as seen by `current_actor`.
    ///
    /// A message is already read for the member who wrote it and unread for
    /// everyone else.
    pub fn compose(
        input: NewMessage,
        author: &MemberIdentity,
        current_actor: MemberId,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let target_role = input
            .target_role
            .filter(|value| !value.trim().is_empty())
            .map(RoleName::new)
            .transpose()?;

        Ok(Self {
            id: MessageId::new(),
            office_id: author.office_id(),
            title: NonEmptyString::for_field("message title", input.title)?,
            body: NonEmptyString::for_field("message body", input.body)?,
            author_id: Some(author.member_id()),
            author_name: author.display_name().to_owned(),
            author_role: author.role_name().to_owned(),
            created_at,
            priority: input.priority,
            kind: input.kind,
            target_role,
            read_by: BTreeSet::from([author.member_id()]),
            is_read: author.member_id() == current_actor,
        })
    }

    /// Composes an alert raised by the system rather than a member.
    pub fn system_alert(
        office_id: OfficeId,
        title: impl Into<String>,
        body: impl Into<String>,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: MessageId::new(),
            office_id,
            title: NonEmptyString::for_field("message title", title)?,
            body: NonEmptyString::for_field("message body", body)?,
            author_id: None,
            author_name: SYSTEM_AUTHOR.to_owned(),
            author_role: SYSTEM_AUTHOR.to_owned(),
            created_at,
            priority,
            kind: MessageKind::Alert,
            target_role: None,
            read_by: BTreeSet::new(),
            is_read: false,
        })
    }

    /// Returns the message id.
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the owning office.
    #[must_use]
    pub fn office_id(&self) -> OfficeId {
        self.office_id
    }

    /// Returns the headline.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn body(&self) -> &NonEmptyString {
        &self.body
    }

    /// Returns the authoring member; `None` for system alerts.
    #[must_use]
    pub fn author_id(&self) -> Option<MemberId> {
        self.author_id
    }

    /// Returns the author display name.
    #[must_use]
    pub fn author_name(&self) -> &str {
        self.author_name.as_str()
    }

    /// Returns the author's role at posting time.
    #[must_use]
    pub fn author_role(&self) -> &str {
        self.author_role.as_str()
    }

    /// Returns the posting timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the urgency.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the kind.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns the targeted role.
    #[must_use]
    pub fn target_role(&self) -> Option<&RoleName> {
        self.target_role.as_ref()
    }

    /// Returns the read flag for the member this copy was projected for.
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns true when `member_id` has read the message.
    #[must_use]
    pub fn is_read_by(&self, member_id: MemberId) -> bool {
        self.read_by.contains(&member_id)
    }

    /// Returns this message with `is_read` reflecting `member_id`'s read state.
    #[must_use]
    pub fn as_seen_by(mut self, member_id: MemberId) -> Self {
        self.is_read = self.is_read_by(member_id);
        self
    }

    /// Returns true when `member` may see this message.
    ///
    /// Creators see everything in their office. Others see untargeted
    /// messages and those targeted at `"All Staff"` or their own role.
    #[must_use]
    pub fn is_visible_to(&self, member: &Member) -> bool {
        if member.office_id() != self.office_id {
            return false;
        }

        member.is_creator()
            || self
                .target_role
                .as_ref()
                .is_none_or(|target| target.targets(member.role()))
    }

    /// Marks the message read by `reader` and reports whether it changed.
    ///
    /// Read is terminal per member. Afterwards the copy is projected for `reader`.
    pub fn mark_read(&mut self, reader: MemberId) -> bool {
        self.is_read = true;
        self.read_by.insert(reader)
    }
}

/// Optional message predicates; every provided predicate must hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageFilter {
    /// Keep only messages of this kind.
    pub kind: Option<MessageKind>,
    /// Keep only messages with this priority.
    pub priority: Option<Priority>,
    /// Keep only unread messages.
    pub unread_only: bool,
}

impl MessageFilter {
    /// Returns true when `message` passes every provided predicate.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        self.kind.is_none_or(|kind| message.kind() == kind)
            && self
                .priority
                .is_none_or(|priority| message.priority() == priority)
            && (!self.unread_only || !message.is_read())
    }

    /// Returns the messages passing the filter, preserving order.
    #[must_use]
    pub fn apply(&self, messages: &[Message]) -> Vec<Message> {
        messages
            .iter()
            .filter(|message| self.matches(message))
            .cloned()
            .collect()
    }
}
