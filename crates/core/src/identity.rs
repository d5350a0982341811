use serde::{Deserialize, Serialize};

use crate::{MemberId, OfficeId};

/// The member on whose behalf an operation runs.
///
/// Role information is carried for advisory classification only; nothing in
/// the core enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberIdentity {
    member_id: MemberId,
    office_id: OfficeId,
    display_name: String,
    role_name: String,
    is_creator: bool,
}

impl MemberIdentity {
    /// Creates an identity from membership data.
    #[must_use]
    pub fn new(
        member_id: MemberId,
        office_id: OfficeId,
        display_name: impl Into<String>,
        role_name: impl Into<String>,
        is_creator: bool,
    ) -> Self {
        Self {
            member_id,
            office_id,
            display_name: display_name.into(),
            role_name: role_name.into(),
            is_creator,
        }
    }

    /// Returns the acting member id.
    #[must_use]
    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    /// Returns the office the member belongs to.
    #[must_use]
    pub fn office_id(&self) -> OfficeId {
        self.office_id
    }

    /// Returns the member display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the member role name.
    #[must_use]
    pub fn role_name(&self) -> &str {
        self.role_name.as_str()
    }

    /// Returns true for the office creator.
    #[must_use]
    pub fn is_creator(&self) -> bool {
        self.is_creator
    }
}
