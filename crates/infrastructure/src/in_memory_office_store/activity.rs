use async_trait::async_trait;
use officeline_application::ActivityRepository;
use officeline_core::{AppResult, OfficeId};
use officeline_domain::ActivityEvent;

use super::InMemoryOfficeStore;

#[async_trait]
impl ActivityRepository for InMemoryOfficeStore {
    async fn append_event(&self, event: ActivityEvent) -> AppResult<()> {
        self.activity.write().await.push(event);
        Ok(())
    }

    async fn list_recent(
        &self,
        office_id: OfficeId,
        limit: usize,
    ) -> AppResult<Vec<ActivityEvent>> {
        Ok(self
            .activity
            .read()
            .await
            .iter()
            .rev()
            .filter(|event| event.office_id == office_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
