//! Role-or-members targeting for shifts and tasks.

use std::collections::BTreeSet;

use officeline_core::{AppError, AppResult, MemberId, OfficeId};
use serde::{Deserialize, Serialize};

use crate::{Member, RoleName};

/// Who a shift or task is for.
///
/// The two modes exclude each other: switching to one discards the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "target", rename_all = "snake_case")]
pub enum Assignment {
    /// Every member holding the role (`"All Staff"` matches everyone).
    Role(RoleName),
    /// An explicit, non-empty set of members.
    Members(BTreeSet<MemberId>),
}

impl Assignment {
    /// Targets a role.
    #[must_use]
    pub fn to_role(role: RoleName) -> Self {
        Self::Role(role)
    }

    /// Targets specific members. Duplicates collapse; an empty selection is
    /// rejected.
    pub fn to_members(member_ids: impl IntoIterator<Item = MemberId>) -> AppResult<Self> {
        let member_ids: BTreeSet<MemberId> = member_ids.into_iter().collect();
        if member_ids.is_empty() {
            return Err(no_assignment());
        }

        Ok(Self::Members(member_ids))
    }

    /// Returns the targeted role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&RoleName> {
        match self {
            Self::Role(role) => Some(role),
            Self::Members(_) => None,
        }
    }

    /// Returns the targeted member ids; empty when a role is targeted.
    #[must_use]
    pub fn member_ids(&self) -> BTreeSet<MemberId> {
        match self {
            Self::Role(_) => BTreeSet::new(),
            Self::Members(member_ids) => member_ids.clone(),
        }
    }

    /// Returns true when `member` is covered by this assignment.
    #[must_use]
    pub fn includes(&self, member: &Member) -> bool {
        match self {
            Self::Role(role) => role.targets(member.role()),
            Self::Members(member_ids) => member_ids.contains(&member.id()),
        }
    }
}

/// Error returned when an entity would be created without a target.
#[must_use]
pub fn no_assignment() -> AppError {
    AppError::Validation(
        "no assignment: select a role or at least one member".to_owned(),
    )
}

/// Shared behavior of entities targeted at a role or members.
pub trait Assignable {
    /// Office the entity belongs to.
    fn office_id(&self) -> OfficeId;

    /// Current assignment.
    fn assignment(&self) -> &Assignment;

    /// Replaces the assignment.
    fn replace_assignment(&mut self, assignment: Assignment);

    /// Targets a role and clears any selected members.
    fn assign_to_role(&mut self, role: RoleName) {
        self.replace_assignment(Assignment::to_role(role));
    }

    /// Targets members and clears any selected role.
    fn assign_to_members(
        &mut self,
        member_ids: impl IntoIterator<Item = MemberId>,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        self.replace_assignment(Assignment::to_members(member_ids)?);
        Ok(())
    }

    /// Returns the targeted role, if any.
    fn assigned_role(&self) -> Option<&RoleName> {
        self.assignment().role()
    }

    /// Returns the selected member ids; empty in role mode.
    fn assigned_member_ids(&self) -> BTreeSet<MemberId> {
        self.assignment().member_ids()
    }

    /// Resolves the concrete members affected, in the order given.
    ///
    /// Members of other offices are never returned.
    fn resolve_affected_members<'a>(&self, all_members: &'a [Member]) -> Vec<&'a Member> {
        let office_id = self.office_id();
        all_members
            .iter()
            .filter(|member| member.office_id() == office_id && self.assignment().includes(member))
            .collect()
    }
}
