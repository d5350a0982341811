use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use officeline_core::{AppError, AppResult, MemberIdentity, OfficeId};
use officeline_domain::{
    ActivityAction, ActivityEvent, InventoryFilter, InventoryItem, ItemId, NewInventoryItem,
    OverstockRatio, StockAdjustment, StockAlert, StockStatus,
};

use crate::{
    ActivityRepository, CoordinatorConfig, InventoryRepository, NotificationDispatcher, OfficeLocks,
};

/// Result of a stock change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdate {
    /// Item after the change.
    pub item: InventoryItem,
    /// Before and after counts and classifications.
    pub adjustment: StockAdjustment,
    /// Alert dispatched when the change crossed into a restock status.
    pub alert: Option<StockAlert>,
}

/// Application service for inventory items and stock classification.
#[derive(Clone)]
pub struct InventoryService {
    repository: Arc<dyn InventoryRepository>,
    activity_repository: Arc<dyn ActivityRepository>,
    notifications: Arc<dyn NotificationDispatcher>,
    locks: OfficeLocks,
    overstock_ratio: OverstockRatio,
}

impl InventoryService {
    /// Creates a new inventory service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn InventoryRepository>,
        activity_repository: Arc<dyn ActivityRepository>,
        notifications: Arc<dyn NotificationDispatcher>,
        locks: OfficeLocks,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            repository,
            activity_repository,
            notifications,
            locks,
            overstock_ratio: config.overstock_ratio,
        }
    }

    /// Classifies an item with the configured overstock ratio.
    #[must_use]
    pub fn classify(&self, item: &InventoryItem) -> StockStatus {
        item.classify_with(self.overstock_ratio)
    }

    /// Adds an item to the actor's office.
    pub async fn add_item(
        &self,
        actor: &MemberIdentity,
        input: NewInventoryItem,
    ) -> AppResult<InventoryItem> {
        let office_id = actor.office_id();
        let item = InventoryItem::new(office_id, input, Utc::now())?;

        let _guard = self.locks.lock(office_id).await;
        self.repository.insert_item(item.clone()).await?;
        self.record(
            actor,
            ActivityAction::InventoryItemAdded,
            item.id(),
            format!("added '{}' with {} {}", item.name(), item.current_stock(), item.unit()),
        )
        .await;

        Ok(item)
    }

    /// Adds `delta` units to an item, clamping at zero.
    pub async fn adjust_stock(
        &self,
        actor: &MemberIdentity,
        item_id: ItemId,
        delta: i64,
    ) -> AppResult<StockUpdate> {
        self.change_stock(actor, item_id, |item, ratio| {
            item.adjust_stock(delta, Utc::now(), ratio)
        })
        .await
    }

    /// Replaces the unit count of an item.
    pub async fn set_stock(
        &self,
        actor: &MemberIdentity,
        item_id: ItemId,
        current_stock: u32,
    ) -> AppResult<StockUpdate> {
        self.change_stock(actor, item_id, |item, ratio| {
            item.set_stock(current_stock, Utc::now(), ratio)
        })
        .await
    }

    /// Lists office items passing `filter`, ordered by name.
    pub async fn list_items(
        &self,
        office_id: OfficeId,
        filter: &InventoryFilter,
    ) -> AppResult<Vec<InventoryItem>> {
        let items = self.repository.list_items(office_id).await?;
        Ok(items
            .into_iter()
            .filter(|item| filter.matches(item, self.overstock_ratio))
            .collect())
    }

    /// Returns the distinct categories used in an office, sorted.
    pub async fn categories(&self, office_id: OfficeId) -> AppResult<Vec<String>> {
        let items = self.repository.list_items(office_id).await?;
        let categories: BTreeSet<String> = items
            .iter()
            .map(|item| item.category().as_str().to_owned())
            .collect();

        Ok(categories.into_iter().collect())
    }

    async fn change_stock(
        &self,
        actor: &MemberIdentity,
        item_id: ItemId,
        apply: impl FnOnce(&mut InventoryItem, OverstockRatio) -> StockAdjustment,
    ) -> AppResult<StockUpdate> {
        let office_id = actor.office_id();
        let _guard = self.locks.lock(office_id).await;
        let mut item = self
            .repository
            .find_item(office_id, item_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "inventory item '{item_id}' does not exist in office '{office_id}'"
                ))
            })?;

        let adjustment = apply(&mut item, self.overstock_ratio);
        self.repository.save_item(item.clone()).await?;
        self.record(
            actor,
            ActivityAction::InventoryStockAdjusted,
            item_id,
            format!(
                "'{}' {} -> {}",
                item.name(),
                adjustment.previous_stock,
                adjustment.current_stock
            ),
        )
        .await;

        info!(
            %office_id,
            %item_id,
            previous_stock = adjustment.previous_stock,
            current_stock = adjustment.current_stock,
            status = adjustment.status.as_str(),
            "stock adjusted"
        );

        let alert = StockAlert::from_adjustment(&item, &adjustment);
        if let Some(alert) = &alert {
            info!(%office_id, %item_id, status = alert.status.as_str(), "stock threshold crossed");
            if let Err(error) = self.notifications.notify_stock_alert(alert).await {
                warn!(%office_id, %item_id, %error, "stock alert not dispatched");
            }
        }

        Ok(StockUpdate {
            item,
            adjustment,
            alert,
        })
    }

    async fn record(
        &self,
        actor: &MemberIdentity,
        action: ActivityAction,
        item_id: ItemId,
        detail: String,
    ) {
        let office_id = actor.office_id();
        let event = ActivityEvent {
            office_id,
            actor: Some(actor.member_id()),
            action,
            resource_type: "inventory_item".to_owned(),
            resource_id: item_id.to_string(),
            detail: Some(detail),
            occurred_at: Utc::now(),
        };

        if let Err(error) = self.activity_repository.append_event(event).await {
            warn!(%office_id, action = action.as_str(), %error, "activity event not recorded");
        }
    }
}
