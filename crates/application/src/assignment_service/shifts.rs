use super::*;

impl AssignmentService {
    /// Schedules a shift in the actor's office.
    pub async fn create_shift(&self, actor: &MemberIdentity, input: NewShift) -> AppResult<Shift> {
        let office_id = actor.office_id();
        let shift = Shift::new(office_id, input, actor.member_id(), Utc::now())?;

        let _guard = self.locks.lock(office_id).await;
        self.validate_assignment(office_id, shift.assignment()).await?;
        self.schedule_repository.insert_shift(shift.clone()).await?;

        self.record(
            actor,
            ActivityAction::ShiftCreated,
            "shift",
            shift.id().to_string(),
            format!("scheduled '{}' on {}", shift.title(), shift.date()),
        )
        .await;

        info!(%office_id, shift_id = %shift.id(), "shift created");
        Ok(shift)
    }

    /// Moves a shift through its lifecycle. Unchanged status is a no-op.
    pub async fn update_shift_status(
        &self,
        actor: &MemberIdentity,
        shift_id: ShiftId,
        status: ShiftStatus,
    ) -> AppResult<Shift> {
        let office_id = actor.office_id();
        let _guard = self.locks.lock(office_id).await;
        let mut shift = self.require_shift(office_id, shift_id).await?;

        if !shift.set_status(status) {
            debug!(%office_id, %shift_id, status = status.as_str(), "shift status unchanged");
            return Ok(shift);
        }

        self.schedule_repository.save_shift(shift.clone()).await?;
        self.record(
            actor,
            ActivityAction::ShiftStatusChanged,
            "shift",
            shift_id.to_string(),
            format!("set shift to {}", status.as_str()),
        )
        .await;

        Ok(shift)
    }

    /// Lists office shifts ordered by date and start time.
    pub async fn list_shifts(&self, office_id: OfficeId) -> AppResult<Vec<Shift>> {
        self.schedule_repository.list_shifts(office_id).await
    }

    /// Lists shifts affecting one member.
    pub async fn shifts_for_member(
        &self,
        office_id: OfficeId,
        member_id: MemberId,
    ) -> AppResult<Vec<Shift>> {
        let member = self.require_member(office_id, member_id).await?;
        let shifts = self.schedule_repository.list_shifts(office_id).await?;

        Ok(shifts
            .into_iter()
            .filter(|shift| shift.assignment().includes(&member))
            .collect())
    }

    /// Returns the members a stored shift affects.
    pub async fn shift_assignees(
        &self,
        office_id: OfficeId,
        shift_id: ShiftId,
    ) -> AppResult<Vec<Member>> {
        let shift = self.require_shift(office_id, shift_id).await?;
        let members = self.office_repository.list_members(office_id).await?;

        Ok(shift
            .resolve_affected_members(&members)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn require_shift(&self, office_id: OfficeId, shift_id: ShiftId) -> AppResult<Shift> {
        self.schedule_repository
            .find_shift(office_id, shift_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "shift '{shift_id}' does not exist in office '{office_id}'"
                ))
            })
    }
}
