use std::collections::BTreeSet;

use super::*;

impl OfficeService {
    /// Lists the office role catalog.
    pub async fn list_roles(&self, office_id: OfficeId) -> AppResult<Vec<RoleDefinition>> {
        self.require_office(office_id).await?;
        self.repository.list_roles(office_id).await
    }

    /// Adds a custom role to the actor's office.
    pub async fn define_role(
        &self,
        actor: &MemberIdentity,
        name: &str,
        permissions: impl IntoIterator<Item = Permission>,
        color_hint: Option<String>,
    ) -> AppResult<RoleDefinition> {
        let office_id = actor.office_id();
        let role = RoleDefinition::custom(name, permissions, color_hint)?;

        let _guard = self.locks.lock(office_id).await;
        self.require_office(office_id).await?;
        self.repository.insert_role(office_id, role.clone()).await?;

        self.record(
            office_id,
            Some(actor.member_id()),
            ActivityAction::RoleDefined,
            "role",
            role.name().as_str().to_owned(),
            format!("defined role '{}'", role.name()),
        )
        .await;

        Ok(role)
    }

    /// Returns the advisory permission set of a member's role.
    ///
    /// A role missing from the catalog grants nothing.
    pub async fn permissions_for(&self, member: &Member) -> AppResult<BTreeSet<Permission>> {
        let roles = self.repository.list_roles(member.office_id()).await?;

        Ok(roles
            .iter()
            .find(|definition| definition.name() == member.role())
            .map(RoleDefinition::effective_permissions)
            .unwrap_or_default())
    }
}
