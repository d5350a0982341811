use async_trait::async_trait;
use officeline_core::{AppResult, OfficeId};
use officeline_domain::ActivityEvent;

/// Port for persisting append-only activity events.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Persists one activity event.
    async fn append_event(&self, event: ActivityEvent) -> AppResult<()>;

    /// Lists the newest events of an office, newest first.
    async fn list_recent(&self, office_id: OfficeId, limit: usize)
    -> AppResult<Vec<ActivityEvent>>;
}
