use async_trait::async_trait;
use officeline_core::AppResult;
use officeline_domain::{Message, StockAlert};

/// Outbound notification port.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Announces that an item moved into a restock status.
    async fn notify_stock_alert(&self, alert: &StockAlert) -> AppResult<()>;

    /// Announces a newly posted message.
    async fn notify_new_message(&self, message: &Message) -> AppResult<()>;
}
