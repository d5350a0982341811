use async_trait::async_trait;
use officeline_core::{AppResult, OfficeId};
use officeline_domain::{Message, MessageId};

/// Repository port for office messages.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Inserts a new message.
    async fn insert_message(&self, message: Message) -> AppResult<()>;

    /// Replaces a stored message.
    async fn save_message(&self, message: Message) -> AppResult<()>;

    /// Finds one message inside an office.
    async fn find_message(
        &self,
        office_id: OfficeId,
        message_id: MessageId,
    ) -> AppResult<Option<Message>>;

    /// Lists office messages in posting order.
    async fn list_messages(&self, office_id: OfficeId) -> AppResult<Vec<Message>>;
}
