use super::*;

impl OfficeService {
    /// Lists office members ordered by employee number.
    pub async fn list_members(&self, office_id: OfficeId) -> AppResult<Vec<Member>> {
        self.require_office(office_id).await?;
        self.repository.list_members(office_id).await
    }

    /// Returns one member of an office.
    pub async fn find_member(&self, office_id: OfficeId, member_id: MemberId) -> AppResult<Member> {
        self.require_member(office_id, member_id).await
    }

    /// Sets a member active or inactive. Unchanged status is a no-op.
    pub async fn update_member_status(
        &self,
        actor: &MemberIdentity,
        member_id: MemberId,
        status: MemberStatus,
    ) -> AppResult<Member> {
        let office_id = actor.office_id();
        let _guard = self.locks.lock(office_id).await;
        let mut member = self.require_member(office_id, member_id).await?;

        if !member.set_status(status) {
            debug!(%office_id, %member_id, status = status.as_str(), "member status unchanged");
            return Ok(member);
        }

        self.repository.save_member(member.clone()).await?;
        self.record(
            office_id,
            Some(actor.member_id()),
            ActivityAction::MemberStatusChanged,
            "member",
            member_id.to_string(),
            format!("set {} to {}", member.employee_number(), status.as_str()),
        )
        .await;

        info!(
            %office_id,
            employee_number = %member.employee_number(),
            status = status.as_str(),
            "member status changed"
        );
        Ok(member)
    }

    /// Moves a member to another defined role.
    pub async fn change_member_role(
        &self,
        actor: &MemberIdentity,
        member_id: MemberId,
        role_name: &str,
    ) -> AppResult<Member> {
        let office_id = actor.office_id();
        let role = RoleName::new(role_name)?;

        let _guard = self.locks.lock(office_id).await;
        let mut member = self.require_member(office_id, member_id).await?;
        if !member.change_role(role.clone())? {
            debug!(%office_id, %member_id, role = %role, "member role unchanged");
            return Ok(member);
        }

        let roles = self.repository.list_roles(office_id).await?;
        if !roles.iter().any(|definition| definition.name() == &role) {
            return Err(AppError::NotFound(format!(
                "role '{role}' does not exist in office '{office_id}'"
            )));
        }

        self.repository.save_member(member.clone()).await?;
        self.record(
            office_id,
            Some(actor.member_id()),
            ActivityAction::MemberRoleChanged,
            "member",
            member_id.to_string(),
            format!("moved {} to role '{role}'", member.employee_number()),
        )
        .await;

        Ok(member)
    }
}
