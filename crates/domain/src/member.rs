use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use officeline_core::{AppError, AppResult, MemberId, MemberIdentity, NonEmptyString, OfficeId};
use serde::{Deserialize, Serialize};

use crate::RoleName;

/// Highest number representable with five zero-padded digits.
pub const EMPLOYEE_NUMBER_MAX: u32 = 99_999;

/// Sequential per-office member number rendered as `#00001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeNumber(u32);

impl EmployeeNumber {
    /// Number reserved for the office creator.
    #[must_use]
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the number following `existing_members` already recorded members.
    pub fn after_member_count(existing_members: usize) -> AppResult<Self> {
        let next = u32::try_from(existing_members)
            .ok()
            .and_then(|count| count.checked_add(1))
            .filter(|value| *value <= EMPLOYEE_NUMBER_MAX)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "office cannot hold more than {EMPLOYEE_NUMBER_MAX} members"
                ))
            })?;

        Ok(Self(next))
    }

    /// Parses the `#00001` form.
    pub fn parse(value: &str) -> AppResult<Self> {
        let digits = value
            .strip_prefix('#')
            .filter(|digits| digits.len() == 5 && digits.bytes().all(|byte| byte.is_ascii_digit()))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "employee number '{value}' must be '#' followed by five digits"
                ))
            })?;

        let number = digits
            .parse::<u32>()
            .map_err(|error| AppError::Validation(format!("invalid employee number: {error}")))?;
        if number == 0 {
            return Err(AppError::Validation(
                "employee numbers start at #00001".to_owned(),
            ));
        }

        Ok(Self(number))
    }

    /// Returns the numeric value.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Display for EmployeeNumber {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "#{:05}", self.0)
    }
}

impl From<EmployeeNumber> for String {
    fn from(value: EmployeeNumber) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for EmployeeNumber {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

/// Member employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Member currently works in the office.
    Active,
    /// Member is kept on record but not working.
    Inactive,
}

impl MemberStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(AppError::Validation(format!(
                "unknown member status '{value}'"
            ))),
        }
    }
}

/// A person belonging to an office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    office_id: OfficeId,
    name: NonEmptyString,
    employee_number: EmployeeNumber,
    role: RoleName,
    is_creator: bool,
    status: MemberStatus,
    joined_at: DateTime<Utc>,
}

impl Member {
    /// Creates the creator record of a new office.
    pub fn creator(
        office_id: OfficeId,
        name: impl Into<String>,
        joined_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: MemberId::new(),
            office_id,
            name: NonEmptyString::for_field("creator name", name)?,
            employee_number: EmployeeNumber::first(),
            role: RoleName::creator(),
            is_creator: true,
            status: MemberStatus::Active,
            joined_at,
        })
    }

    /// Creates a member joining an existing office with the default role.
    pub fn joiner(
        office_id: OfficeId,
        name: impl Into<String>,
        employee_number: EmployeeNumber,
        joined_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        if employee_number == EmployeeNumber::first() {
            return Err(AppError::Validation(
                "employee number #00001 is reserved for the office creator".to_owned(),
            ));
        }

        Ok(Self {
            id: MemberId::new(),
            office_id,
            name: NonEmptyString::for_field("member name", name)?,
            employee_number,
            role: RoleName::employee(),
            is_creator: false,
            status: MemberStatus::Active,
            joined_at,
        })
    }

    /// Returns the member id.
    #[must_use]
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the owning office id.
    #[must_use]
    pub fn office_id(&self) -> OfficeId {
        self.office_id
    }

    /// Returns the member name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the employee number.
    #[must_use]
    pub fn employee_number(&self) -> EmployeeNumber {
        self.employee_number
    }

    /// Returns the role name.
    #[must_use]
    pub fn role(&self) -> &RoleName {
        &self.role
    }

    /// Returns true for the office creator.
    #[must_use]
    pub fn is_creator(&self) -> bool {
        self.is_creator
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> MemberStatus {
        self.status
    }

    /// Returns true when the member is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }

    /// Returns the join timestamp.
    #[must_use]
    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Sets the status and reports whether it changed.
    pub fn set_status(&mut self, status: MemberStatus) -> bool {
        if self.status == status {
            return false;
        }

        self.status = status;
        true
    }

    /// Moves the member to another role.
    ///
    /// The creator keeps the creator role for good, and nobody else can
    /// take it.
    pub fn change_role(&mut self, role: RoleName) -> AppResult<bool> {
        if self.is_creator {
            return Err(AppError::Validation(
                "the office creator's role cannot be changed".to_owned(),
            ));
        }

        if role.is_creator() || role.is_all_staff() {
            return Err(AppError::Validation(format!(
                "role '{role}' cannot be assigned to a member"
            )));
        }

        if self.role == role {
            return Ok(false);
        }

        self.role = role;
        Ok(true)
    }

    /// Returns the identity used when this member performs an operation.
    #[must_use]
    pub fn identity(&self) -> MemberIdentity {
        MemberIdentity::new(
            self.id,
            self.office_id,
            self.name.as_str(),
            self.role.as_str(),
            self.is_creator,
        )
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn creator_gets_first_number_and_creator_role() {
        let creator =
            Member::creator(OfficeId::new(), "Jo", Utc::now()).unwrap_or_else(|_| unreachable!());

        assert_eq!(creator.employee_number().to_string(), "#00001");
        assert!(creator.is_creator());
        assert_eq!(creator.role(), &RoleName::creator());
    }

    #[test]
    fn joiner_cannot_take_creator_number() {
        let joined = Member::joiner(OfficeId::new(), "Sam", EmployeeNumber::first(), Utc::now());
        assert!(joined.is_err());
    }

    #[test]
    fn creator_role_is_permanent() {
        let mut creator =
            Member::creator(OfficeId::new(), "Jo", Utc::now()).unwrap_or_else(|_| unreachable!());
        assert!(creator.change_role(RoleName::head_manager()).is_err());
    }

    #[test]
    fn nobody_else_can_take_creator_role() {
        let number = EmployeeNumber::after_member_count(1).unwrap_or_else(|_| unreachable!());
        let mut member = Member::joiner(OfficeId::new(), "Sam", number, Utc::now())
            .unwrap_or_else(|_| unreachable!());

        assert!(member.change_role(RoleName::creator()).is_err());
        assert!(member.change_role(RoleName::all_staff()).is_err());
        assert_eq!(member.change_role(RoleName::head_manager()).ok(), Some(true));
        assert_eq!(member.change_role(RoleName::head_manager()).ok(), Some(false));
    }

    #[test]
    fn set_status_reports_changes_only() {
        let mut member =
            Member::creator(OfficeId::new(), "Jo", Utc::now()).unwrap_or_else(|_| unreachable!());

        assert!(!member.set_status(MemberStatus::Active));
        assert!(member.set_status(MemberStatus::Inactive));
        assert!(!member.is_active());
    }

    #[test]
    fn employee_number_limit_is_enforced() {
        assert!(EmployeeNumber::after_member_count(99_998).is_ok());
        assert!(EmployeeNumber::after_member_count(99_999).is_err());
    }

    #[test]
    fn employee_number_parse_rejects_malformed_values() {
        assert!(EmployeeNumber::parse("00001").is_err());
        assert!(EmployeeNumber::parse("#0001").is_err());
        assert!(EmployeeNumber::parse("#00000").is_err());
        assert!(EmployeeNumber::parse("#0a001").is_err());
    }

    proptest! {
        #[test]
        fn employee_number_format_roundtrips(count in 0_usize..99_999) {
            let number = EmployeeNumber::after_member_count(count);
            prop_assert!(number.is_ok());
            let number = number.unwrap_or_else(|_| unreachable!());
            let rendered = number.to_string();

            prop_assert_eq!(rendered.len(), 6);
            prop_assert_eq!(number.value() as usize, count + 1);
            prop_assert_eq!(EmployeeNumber::parse(rendered.as_str()).ok(), Some(number));
        }
    }
}
