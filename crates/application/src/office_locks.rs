use std::collections::HashMap;
use std::sync::Arc;

use officeline_core::OfficeId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Exclusive critical sections for office mutations.
///
/// Each office has its own lock, so writers to different offices never
/// wait on each other. Office creation takes the registry lock because
/// join codes are unique across offices. Entries nobody holds or waits on
/// are dropped on the next lock call.
#[derive(Debug, Clone, Default)]
pub struct OfficeLocks {
    registry: Arc<Mutex<()>>,
    offices: Arc<Mutex<HashMap<OfficeId, Arc<Mutex<()>>>>>,
}

impl OfficeLocks {
    /// Creates an empty lock registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to one office.
    pub async fn lock(&self, office_id: OfficeId) -> OwnedMutexGuard<()> {
        let office_lock = {
            let mut offices = self.offices.lock().await;
            offices.retain(|id, lock| *id == office_id || Arc::strong_count(lock) > 1);
            offices.entry(office_id).or_default().clone()
        };

        office_lock.lock_owned().await
    }

    /// Waits for exclusive access to the set of offices.
    pub async fn lock_registry(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.registry).lock_owned().await
    }

    #[cfg(test)]
    async fn tracked_offices(&self) -> usize {
        self.offices.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use officeline_core::OfficeId;

    use super::OfficeLocks;

    #[tokio::test]
    async fn different_offices_do_not_block_each_other() {
        let locks = OfficeLocks::new();
        let _first = locks.lock(OfficeId::new()).await;

        let second = tokio::time::timeout(Duration::from_millis(200), locks.lock(OfficeId::new())).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn same_office_waits_for_release() {
        let locks = OfficeLocks::new();
        let office_id = OfficeId::new();
        let first = locks.lock(office_id).await;

        let blocked = tokio::time::timeout(Duration::from_millis(50), locks.lock(office_id)).await;
        assert!(blocked.is_err());

        drop(first);
        let acquired = tokio::time::timeout(Duration::from_millis(200), locks.lock(office_id)).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn idle_office_locks_are_pruned() {
        let locks = OfficeLocks::new();
        drop(locks.lock(OfficeId::new()).await);

        let held = locks.lock(OfficeId::new()).await;
        assert_eq!(locks.tracked_offices().await, 1);

        let _other = locks.lock(OfficeId::new()).await;
        assert_eq!(locks.tracked_offices().await, 2);
        drop(held);
    }
}
