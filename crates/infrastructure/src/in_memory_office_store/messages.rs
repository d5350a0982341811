use async_trait::async_trait;
use officeline_application::MessageRepository;
use officeline_core::{AppError, AppResult, OfficeId};
use officeline_domain::{Message, MessageId};

use super::InMemoryOfficeStore;

#[async_trait]
impl MessageRepository for InMemoryOfficeStore {
    async fn insert_message(&self, message: Message) -> AppResult<()> {
        let mut messages = self.messages.write().await;

        if messages.iter().any(|stored| stored.id() == message.id()) {
            return Err(AppError::Conflict(format!(
                "message '{}' already exists",
                message.id()
            )));
        }

        messages.push(message);
        Ok(())
    }

    async fn save_message(&self, message: Message) -> AppResult<()> {
        let mut messages = self.messages.write().await;
        let stored = messages
            .iter_mut()
            .find(|stored| stored.office_id() == message.office_id() && stored.id() == message.id())
            .ok_or_else(|| {
                AppError::NotFound(format!("message '{}' does not exist", message.id()))
            })?;

        *stored = message;
        Ok(())
    }

    async fn find_message(
        &self,
        office_id: OfficeId,
        message_id: MessageId,
    ) -> AppResult<Option<Message>> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .find(|message| message.office_id() == office_id && message.id() == message_id)
            .cloned())
    }

    async fn list_messages(&self, office_id: OfficeId) -> AppResult<Vec<Message>> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .filter(|message| message.office_id() == office_id)
            .cloned()
            .collect())
    }
}
