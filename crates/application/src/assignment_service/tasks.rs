use super::*;

impl AssignmentService {
    /// Creates a task in the actor's office.
    pub async fn create_task(&self, actor: &MemberIdentity, input: NewTask) -> AppResult<Task> {
        let office_id = actor.office_id();
        let task = Task::new(office_id, input, actor.member_id(), Utc::now())?;

        let _guard = self.locks.lock(office_id).await;
        self.validate_assignment(office_id, task.assignment()).await?;
        self.schedule_repository.insert_task(task.clone()).await?;

        self.record(
            actor,
            ActivityAction::TaskCreated,
            "task",
            task.id().to_string(),
            format!("created task '{}' due {}", task.title(), task.deadline()),
        )
        .await;

        info!(%office_id, task_id = %task.id(), priority = task.priority().as_str(), "task created");
        Ok(task)
    }

    /// Moves a task through its workflow. Unchanged status is a no-op.
    pub async fn update_task_status(
        &self,
        actor: &MemberIdentity,
        task_id: TaskId,
        status: TaskStatus,
    ) -> AppResult<Task> {
        let office_id = actor.office_id();
        let _guard = self.locks.lock(office_id).await;
        let mut task = self.require_task(office_id, task_id).await?;

        if !task.set_status(status) {
            debug!(%office_id, %task_id, status = status.as_str(), "task status unchanged");
            return Ok(task);
        }

        self.schedule_repository.save_task(task.clone()).await?;
        self.record(
            actor,
            ActivityAction::TaskStatusChanged,
            "task",
            task_id.to_string(),
            format!("set task to {}", status.as_str()),
        )
        .await;

        Ok(task)
    }

    /// Retargets a task at a role, dropping any selected members.
    pub async fn reassign_task_to_role(
        &self,
        actor: &MemberIdentity,
        task_id: TaskId,
        role_name: &str,
    ) -> AppResult<Task> {
        let role = RoleName::new(role_name)?;
        self.reassign_task(actor, task_id, Assignment::to_role(role))
            .await
    }

    /// Retargets a task at specific members, dropping the role.
    pub async fn reassign_task_to_members(
        &self,
        actor: &MemberIdentity,
        task_id: TaskId,
        member_ids: impl IntoIterator<Item = MemberId>,
    ) -> AppResult<Task> {
        let assignment = Assignment::to_members(member_ids)?;
        self.reassign_task(actor, task_id, assignment).await
    }

    /// Lists office tasks passing `filter`, ordered by deadline.
    pub async fn list_tasks(&self, office_id: OfficeId, filter: TaskFilter) -> AppResult<Vec<Task>> {
        let tasks = self.schedule_repository.list_tasks(office_id).await?;
        Ok(tasks.into_iter().filter(|task| filter.matches(task)).collect())
    }

    /// Lists tasks affecting one member.
    pub async fn tasks_for_member(
        &self,
        office_id: OfficeId,
        member_id: MemberId,
    ) -> AppResult<Vec<Task>> {
        let member = self.require_member(office_id, member_id).await?;
        let tasks = self.schedule_repository.list_tasks(office_id).await?;

        Ok(tasks
            .into_iter()
            .filter(|task| task.assignment().includes(&member))
            .collect())
    }

    /// Returns the members a stored task affects.
    pub async fn task_assignees(&self, office_id: OfficeId, task_id: TaskId) -> AppResult<Vec<Member>> {
        let task = self.require_task(office_id, task_id).await?;
        let members = self.office_repository.list_members(office_id).await?;

        Ok(task
            .resolve_affected_members(&members)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn reassign_task(
        &self,
        actor: &MemberIdentity,
        task_id: TaskId,
        assignment: Assignment,
    ) -> AppResult<Task> {
        let office_id = actor.office_id();
        let _guard = self.locks.lock(office_id).await;
        self.validate_assignment(office_id, &assignment).await?;

        let mut task = self.require_task(office_id, task_id).await?;
        if task.assignment() == &assignment {
            debug!(%office_id, %task_id, "task assignment unchanged");
            return Ok(task);
        }

        let detail = match &assignment {
            Assignment::Role(role) => format!("reassigned to role '{role}'"),
            Assignment::Members(member_ids) => {
                format!("reassigned to {} member(s)", member_ids.len())
            }
        };
        task.replace_assignment(assignment);

        self.schedule_repository.save_task(task.clone()).await?;
        self.record(
            actor,
            ActivityAction::TaskReassigned,
            "task",
            task_id.to_string(),
            detail,
        )
        .await;

        Ok(task)
    }

    async fn require_task(&self, office_id: OfficeId, task_id: TaskId) -> AppResult<Task> {
        self.schedule_repository
            .find_task(office_id, task_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "task '{task_id}' does not exist in office '{office_id}'"
                ))
            })
    }
}
