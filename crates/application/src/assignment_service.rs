use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use officeline_core::{AppError, AppResult, MemberId, MemberIdentity, OfficeId};
use officeline_domain::{
    ActivityAction, ActivityEvent, Assignable, Assignment, Member, NewShift, NewTask, RoleName,
    Shift, ShiftId, ShiftStatus, Task, TaskFilter, TaskId, TaskStatus,
};

use crate::{ActivityRepository, OfficeLocks, OfficeRepository, ScheduleRepository};

mod shifts;
mod tasks;

/// Application service for shifts, tasks and their role-or-member targets.
#[derive(Clone)]
pub struct AssignmentService {
    office_repository: Arc<dyn OfficeRepository>,
    schedule_repository: Arc<dyn ScheduleRepository>,
    activity_repository: Arc<dyn ActivityRepository>,
    locks: OfficeLocks,
}

impl AssignmentService {
    /// Creates a new assignment service.
    #[must_use]
    pub fn new(
        office_repository: Arc<dyn OfficeRepository>,
        schedule_repository: Arc<dyn ScheduleRepository>,
        activity_repository: Arc<dyn ActivityRepository>,
        locks: OfficeLocks,
    ) -> Self {
        Self {
            office_repository,
            schedule_repository,
            activity_repository,
            locks,
        }
    }

    /// Targets `entity` at a role, clearing selected members.
    pub fn assign_to_role<E: Assignable>(&self, entity: &mut E, role: RoleName) {
        entity.assign_to_role(role);
    }

    /// Targets `entity` at members, clearing the role.
    pub fn assign_to_members<E: Assignable>(
        &self,
        entity: &mut E,
        member_ids: impl IntoIterator<Item = MemberId>,
    ) -> AppResult<()> {
        entity.assign_to_members(member_ids)
    }

    /// Resolves which of `all_members` an entity affects.
    #[must_use]
    pub fn resolve_affected_members<'a, E: Assignable>(
        &self,
        entity: &E,
        all_members: &'a [Member],
    ) -> Vec<&'a Member> {
        entity.resolve_affected_members(all_members)
    }

    /// Checks that an assignment only points at things inside the office.
    ///
    /// Roles must be defined in the office catalog or be `"All Staff"`;
    /// every selected member must belong to the office.
    async fn validate_assignment(
        &self,
        office_id: OfficeId,
        assignment: &Assignment,
    ) -> AppResult<()> {
        match assignment {
            Assignment::Role(role) => {
                if role.is_all_staff() {
                    return Ok(());
                }

                let roles = self.office_repository.list_roles(office_id).await?;
                if roles.iter().any(|definition| definition.name() == role) {
                    return Ok(());
                }

                Err(AppError::NotFound(format!(
                    "role '{role}' does not exist in office '{office_id}'"
                )))
            }
            Assignment::Members(member_ids) => {
                for member_id in member_ids {
                    if self
                        .office_repository
                        .find_member(office_id, *member_id)
                        .await?
                        .is_none()
                    {
                        return Err(AppError::NotFound(format!(
                            "member '{member_id}' does not exist in office '{office_id}'"
                        )));
                    }
                }

                Ok(())
            }
        }
    }

    async fn require_member(&self, office_id: OfficeId, member_id: MemberId) -> AppResult<Member> {
        self.office_repository
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
        actor: &MemberIdentity,
        action: ActivityAction,
        resource_type: &str,
        resource_id: String,
        detail: String,
    ) {
        let office_id = actor.office_id();
        let event = ActivityEvent {
            office_id,
            actor: Some(actor.member_id()),
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
