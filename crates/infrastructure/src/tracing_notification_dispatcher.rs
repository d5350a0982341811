//! Notification dispatcher for development. Logs notifications to tracing output.

use async_trait::async_trait;
use officeline_application::NotificationDispatcher;
use officeline_core::AppResult;
use officeline_domain::{Message, StockAlert};
use tracing::{info, warn};

/// Development dispatcher that logs notifications instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct TracingNotificationDispatcher;

impl TracingNotificationDispatcher {
    /// Creates a new tracing dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDispatcher for TracingNotificationDispatcher {
    async fn notify_stock_alert(&self, alert: &StockAlert) -> AppResult<()> {
        warn!(
            office_id = %alert.office_id,
            item_id = %alert.item_id,
            status = alert.status.as_str(),
            current_stock = alert.current_stock,
            min_stock = alert.min_stock,
            "restock needed for '{}'",
            alert.item_name
        );

        Ok(())
    }

    async fn notify_new_message(&self, message: &Message) -> AppResult<()> {
        info!(
            office_id = %message.office_id(),
            message_id = %message.id(),
            kind = message.kind().as_str(),
            priority = message.priority().as_str(),
            target_role = message.target_role().map(|role| role.as_str()),
            "new message from {}: {}",
            message.author_name(),
            message.title()
        );

        Ok(())
    }
}
