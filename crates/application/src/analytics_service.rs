use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use officeline_core::{AppError, AppResult, OfficeId};
use officeline_domain::{AnalyticsInputs, AnalyticsSnapshot, OverstockRatio, summarize};

use crate::{CoordinatorConfig, InventoryRepository, OfficeRepository, ScheduleRepository};

/// Read-only service deriving office statistics on demand.
#[derive(Clone)]
pub struct AnalyticsService {
    office_repository: Arc<dyn OfficeRepository>,
    schedule_repository: Arc<dyn ScheduleRepository>,
    inventory_repository: Arc<dyn InventoryRepository>,
    overstock_ratio: OverstockRatio,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    #[must_use]
    pub fn new(
        office_repository: Arc<dyn OfficeRepository>,
        schedule_repository: Arc<dyn ScheduleRepository>,
        inventory_repository: Arc<dyn InventoryRepository>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            office_repository,
            schedule_repository,
            inventory_repository,
            overstock_ratio: config.overstock_ratio,
        }
    }

    /// Summarizes an office as of today (UTC).
    pub async fn summarize(&self, office_id: OfficeId) -> AppResult<AnalyticsSnapshot> {
        self.summarize_as_of(office_id, Utc::now().date_naive())
            .await
    }

    /// Summarizes an office, treating `today` as the reference for overdue tasks.
    pub async fn summarize_as_of(
        &self,
        office_id: OfficeId,
        today: NaiveDate,
    ) -> AppResult<AnalyticsSnapshot> {
        if self.office_repository.find_office(office_id).await?.is_none() {
            return Err(AppError::NotFound(format!("office not found: '{office_id}'")));
        }

        let members = self.office_repository.list_members(office_id).await?;
        let tasks = self.schedule_repository.list_tasks(office_id).await?;
        let shifts = self.schedule_repository.list_shifts(office_id).await?;
        let items = self.inventory_repository.list_items(office_id).await?;

        Ok(summarize(
            AnalyticsInputs {
                members: &members,
                tasks: &tasks,
                shifts: &shifts,
                items: &items,
            },
            today,
            self.overstock_ratio,
        ))
    }
}
