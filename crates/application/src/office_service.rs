use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use officeline_core::{AppError, AppResult, MemberId, MemberIdentity, NonEmptyString, OfficeId};
use officeline_domain::{
    ActivityAction, ActivityEvent, EmployeeNumber, JoinCode, Member, MemberStatus, Office,
    Permission, RoleDefinition, RoleName,
};

use crate::{ActivityRepository, CoordinatorConfig, JoinCodeGenerator, OfficeLocks, OfficeRepository};

mod members;
mod registry;
mod roles;

/// Application service for offices, membership and role catalogs.
#[derive(Clone)]
pub struct OfficeService {
    repository: Arc<dyn OfficeRepository>,
    activity_repository: Arc<dyn ActivityRepository>,
    join_codes: Arc<dyn JoinCodeGenerator>,
    locks: OfficeLocks,
    config: CoordinatorConfig,
}

impl OfficeService {
    /// Creates a new office service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn OfficeRepository>,
        activity_repository: Arc<dyn ActivityRepository>,
        join_codes: Arc<dyn JoinCodeGenerator>,
        locks: OfficeLocks,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            repository,
            activity_repository,
            join_codes,
            locks,
            config,
        }
    }

    /// Returns recent activity for an office, newest first.
    pub async fn recent_activity(
        &self,
        office_id: OfficeId,
        limit: usize,
    ) -> AppResult<Vec<ActivityEvent>> {
        self.require_office(office_id).await?;
        self.activity_repository.list_recent(office_id, limit).await
    }

    async fn require_office(&self, office_id: OfficeId) -> AppResult<Office> {
        self.repository
            .find_office(office_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("office not found: '{office_id}'")))
    }

    async fn require_member(&self, office_id: OfficeId, member_id: MemberId) -> AppResult<Member> {
        self.repository
            .find_member(office_id, member_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "member '{member_id}' does not exist in office '{office_id}'"
                ))
            })
    }

    async fn record(
        &self,
        office_id: OfficeId,
        actor: Option<MemberId>,
        action: ActivityAction,
        resource_type: &str,
        resource_id: String,
        detail: String,
    ) {
        let event = ActivityEvent {
            office_id,
            actor,
            action,
            resource_type: resource_type.to_owned(),
            resource_id,
            detail: Some(detail),
            occurred_at: Utc::now(),
        };

        if let Err(error) = self.activity_repository.append_event(event).await {
            warn!(%office_id, action = action.as_str(), %error, "activity event not recorded");
        }
    }
}
