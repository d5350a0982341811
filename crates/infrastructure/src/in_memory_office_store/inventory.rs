use async_trait::async_trait;
use officeline_application::InventoryRepository;
use officeline_core::{AppError, AppResult, OfficeId};
use officeline_domain::{InventoryItem, ItemId};

use super::InMemoryOfficeStore;

#[async_trait]
impl InventoryRepository for InMemoryOfficeStore {
    async fn insert_item(&self, item: InventoryItem) -> AppResult<()> {
        let key = (item.office_id(), item.id());
        let mut items = self.items.write().await;

        if items.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "inventory item '{}' already exists",
                key.1
            )));
        }

        items.insert(key, item);
        Ok(())
    }

    async fn save_item(&self, item: InventoryItem) -> AppResult<()> {
        let mut items = self.items.write().await;
        let stored = items.get_mut(&(item.office_id(), item.id())).ok_or_else(|| {
            AppError::NotFound(format!("inventory item '{}' does not exist", item.id()))
        })?;

        *stored = item;
        Ok(())
    }

    async fn find_item(
        &self,
        office_id: OfficeId,
        item_id: ItemId,
    ) -> AppResult<Option<InventoryItem>> {
        Ok(self.items.read().await.get(&(office_id, item_id)).cloned())
    }

    async fn list_items(&self, office_id: OfficeId) -> AppResult<Vec<InventoryItem>> {
        let items = self.items.read().await;

        let mut values: Vec<InventoryItem> = items
            .iter()
            .filter(|((stored_office_id, _), _)| *stored_office_id == office_id)
            .map(|(_, item)| item.clone())
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }
}
