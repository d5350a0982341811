use async_trait::async_trait;
use officeline_core::{AppResult, OfficeId};
use officeline_domain::{InventoryItem, ItemId};

/// Repository port for inventory items.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Inserts a new item.
    async fn insert_item(&self, item: InventoryItem) -> AppResult<()>;

    /// Replaces a stored item.
    async fn save_item(&self, item: InventoryItem) -> AppResult<()>;

    /// Finds one item inside an office.
    async fn find_item(&self, office_id: OfficeId, item_id: ItemId)
    -> AppResult<Option<InventoryItem>>;

    /// Lists office items ordered by name.
    async fn list_items(&self, office_id: OfficeId) -> AppResult<Vec<InventoryItem>>;
}
