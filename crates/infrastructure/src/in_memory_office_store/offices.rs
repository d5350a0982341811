use async_trait::async_trait;
use officeline_application::OfficeRepository;
use officeline_core::{AppError, AppResult, MemberId, OfficeId};
use officeline_domain::{JoinCode, Member, Office, RoleDefinition};

use super::InMemoryOfficeStore;

#[async_trait]
impl OfficeRepository for InMemoryOfficeStore {
    async fn create_office(
        &self,
        office: Office,
        creator: Member,
        roles: Vec<RoleDefinition>,
    ) -> AppResult<()> {
        if !creator.is_creator() || creator.office_id() != office.id() {
            return Err(AppError::Validation(
                "an office must be created together with its own creator".to_owned(),
            ));
        }

        let mut offices = self.offices.write().await;
        let mut join_codes = self.join_codes.write().await;
        let mut members = self.members.write().await;
        let mut stored_roles = self.roles.write().await;

        if join_codes.contains_key(office.join_code()) {
            return Err(AppError::Conflict(format!(
                "join code '{}' is already in use",
                office.join_code()
            )));
        }

        if offices.contains_key(&office.id()) {
            return Err(AppError::Conflict(format!(
                "office '{}' already exists",
                office.id()
            )));
        }

        let office_id = office.id();
        join_codes.insert(office.join_code().clone(), office_id);
        members.insert((office_id, creator.id()), creator);
        for role in roles {
            stored_roles.insert((office_id, role.name().clone()), role);
        }
        offices.insert(office_id, office);

        Ok(())
    }

    async fn find_office(&self, office_id: OfficeId) -> AppResult<Option<Office>> {
        Ok(self.offices.read().await.get(&office_id).cloned())
    }

    async fn find_office_by_join_code(&self, join_code: &JoinCode) -> AppResult<Option<Office>> {
        let offices = self.offices.read().await;
        let join_codes = self.join_codes.read().await;

        Ok(join_codes
            .get(join_code)
            .and_then(|office_id| offices.get(office_id))
            .cloned())
    }

    async fn join_code_in_use(&self, join_code: &JoinCode) -> AppResult<bool> {
        Ok(self.join_codes.read().await.contains_key(join_code))
    }

    async fn save_office(&self, office: Office) -> AppResult<()> {
        let mut offices = self.offices.write().await;
        let stored = offices
            .get_mut(&office.id())
            .ok_or_else(|| AppError::NotFound(format!("office not found: '{}'", office.id())))?;

        if stored.join_code() != office.join_code() {
            return Err(AppError::Validation(
                "an office join code cannot be changed".to_owned(),
            ));
        }

        *stored = office;
        Ok(())
    }

    async fn count_members(&self, office_id: OfficeId) -> AppResult<usize> {
        Ok(self
            .members
            .read()
            .await
            .keys()
            .filter(|(stored_office_id, _)| *stored_office_id == office_id)
            .count())
    }

    async fn insert_member(&self, member: Member) -> AppResult<()> {
        let office_id = member.office_id();
        let offices = self.offices.read().await;
        if !offices.contains_key(&office_id) {
            return Err(AppError::NotFound(format!("office not found: '{office_id}'")));
        }

        let mut members = self.members.write().await;
        let office_members = members
            .iter()
            .filter(|((stored_office_id, _), _)| *stored_office_id == office_id)
            .map(|(_, stored)| stored);

        for stored in office_members {
            if stored.id() == member.id() {
                return Err(AppError::Conflict(format!(
                    "member '{}' already exists in office '{office_id}'",
                    member.id()
                )));
            }

            if stored.employee_number() == member.employee_number() {
                return Err(AppError::Conflict(format!(
                    "employee number {} is already taken in office '{office_id}'",
                    member.employee_number()
                )));
            }

            if stored.is_creator() && member.is_creator() {
                return Err(AppError::Conflict(format!(
                    "office '{office_id}' already has a creator"
                )));
            }
        }

        members.insert((office_id, member.id()), member);
        Ok(())
    }

    async fn save_member(&self, member: Member) -> AppResult<()> {
        let mut members = self.members.write().await;
        let stored = members
            .get_mut(&(member.office_id(), member.id()))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "member '{}' does not exist in office '{}'",
                    member.id(),
                    member.office_id()
                ))
            })?;

        if stored.employee_number() != member.employee_number()
            || stored.is_creator() != member.is_creator()
        {
            return Err(AppError::Validation(
                "employee number and creator flag are permanent".to_owned(),
            ));
        }

        *stored = member;
        Ok(())
    }

    async fn find_member(
        &self,
        office_id: OfficeId,
        member_id: MemberId,
    ) -> AppResult<Option<Member>> {
        Ok(self
            .members
            .read()
            .await
            .get(&(office_id, member_id))
            .cloned())
    }

    async fn list_members(&self, office_id: OfficeId) -> AppResult<Vec<Member>> {
        let members = self.members.read().await;

        let mut values: Vec<Member> = members
            .iter()
            .filter(|((stored_office_id, _), _)| *stored_office_id == office_id)
            .map(|(_, member)| member.clone())
            .collect();
        values.sort_by_key(Member::employee_number);

        Ok(values)
    }

    async fn list_roles(&self, office_id: OfficeId) -> AppResult<Vec<RoleDefinition>> {
        let roles = self.roles.read().await;

        let mut values: Vec<RoleDefinition> = roles
            .iter()
            .filter(|((stored_office_id, _), _)| *stored_office_id == office_id)
            .map(|(_, role)| role.clone())
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }

    async fn insert_role(&self, office_id: OfficeId, role: RoleDefinition) -> AppResult<()> {
        let key = (office_id, role.name().clone());
        let mut roles = self.roles.write().await;

        if roles.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists in office '{office_id}'",
                key.1
            )));
        }

        roles.insert(key, role);
        Ok(())
    }
}
