use async_trait::async_trait;
use officeline_core::{AppResult, MemberId, OfficeId};
use officeline_domain::{JoinCode, Member, Office, RoleDefinition};

/// Repository port for offices, their members and role catalogs.
#[async_trait]
pub trait OfficeRepository: Send + Sync {
    /// Persists a new office together with its creator and seeded roles.
    ///
    /// Nothing is stored when the join code is already taken; the call
    /// returns `AppError::Conflict` instead.
    async fn create_office(
        &self,
        office: Office,
        creator: Member,
        roles: Vec<RoleDefinition>,
    ) -> AppResult<()>;

    /// Finds one office by id.
    async fn find_office(&self, office_id: OfficeId) -> AppResult<Option<Office>>;

    /// Finds the office using a join code.
    async fn find_office_by_join_code(&self, join_code: &JoinCode) -> AppResult<Option<Office>>;

    /// Returns true when any office uses the join code.
    async fn join_code_in_use(&self, join_code: &JoinCode) -> AppResult<bool>;

    /// Replaces a stored office.
    async fn save_office(&self, office: Office) -> AppResult<()>;

    /// Counts members of an office.
    async fn count_members(&self, office_id: OfficeId) -> AppResult<usize>;

    /// Inserts a member. Duplicate employee numbers return `AppError::Conflict`.
    async fn insert_member(&self, member: Member) -> AppResult<()>;

    /// Replaces a stored member.
    async fn save_member(&self, member: Member) -> AppResult<()>;

    /// Finds one member inside an office.
    async fn find_member(
        &self,
        office_id: OfficeId,
        member_id: MemberId,
    ) -> AppResult<Option<Member>>;

    /// Lists office members ordered by employee number.
    async fn list_members(&self, office_id: OfficeId) -> AppResult<Vec<Member>>;

    /// Lists the office role catalog ordered by name.
    async fn list_roles(&self, office_id: OfficeId) -> AppResult<Vec<RoleDefinition>>;

    /// Adds a role. Duplicate names return `AppError::Conflict`.
    async fn insert_role(&self, office_id: OfficeId, role: RoleDefinition) -> AppResult<()>;
}
