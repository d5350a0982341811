use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use officeline_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

const CREATOR_ROLE: &str = "Creator";
const HEAD_MANAGER_ROLE: &str = "Head Manager";
const EMPLOYEE_ROLE: &str = "Employee";
const ALL_STAFF_LABEL: &str = "All Staff";

/// Name of an office role, compared as a literal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(NonEmptyString);

impl RoleName {
    /// Creates a validated role name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::for_field("role name", value)?))
    }

    /// Role held by the office creator.
    #[must_use]
    pub fn creator() -> Self {
        Self::from_static(CREATOR_ROLE)
    }

    /// Built-in full-permission management role.
    #[must_use]
    pub fn head_manager() -> Self {
        Self::from_static(HEAD_MANAGER_ROLE)
    }

    /// Role given to members joining with a code.
    #[must_use]
    pub fn employee() -> Self {
        Self::from_static(EMPLOYEE_ROLE)
    }

    /// Target label that matches every member.
    #[must_use]
    pub fn all_staff() -> Self {
        Self::from_static(ALL_STAFF_LABEL)
    }

    fn from_static(value: &'static str) -> Self {
        match NonEmptyString::new(value) {
            Ok(name) => Self(name),
            Err(_) => unreachable!("built-in role names are non-empty"),
        }
    }

    /// Returns true for the `"All Staff"` label.
    #[must_use]
    pub fn is_all_staff(&self) -> bool {
        self.as_str() == ALL_STAFF_LABEL
    }

    /// Returns true for the creator role.
    #[must_use]
    pub fn is_creator(&self) -> bool {
        self.as_str() == CREATOR_ROLE
    }

    /// Returns true for names that cannot be used by custom roles.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        matches!(
            self.as_str(),
            CREATOR_ROLE | HEAD_MANAGER_ROLE | ALL_STAFF_LABEL
        )
    }

    /// Returns true when a target with this name addresses a member holding `role`.
    #[must_use]
    pub fn targets(&self, role: &RoleName) -> bool {
        self.is_all_staff() || self == role
    }

    /// Returns the role name string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0.into()
    }
}

impl TryFrom<String> for RoleName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Advisory permission tags attached to roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows viewing the shift schedule.
    ViewShifts,
    /// Allows creating and updating shifts.
    ManageShifts,
    /// Allows viewing tasks.
    ViewTasks,
    /// Allows creating and updating tasks.
    ManageTasks,
    /// Allows adding items and adjusting stock.
    ManageInventory,
    /// Allows changing member roles and status.
    ManageStaff,
    /// Allows posting office-wide announcements.
    PostAnnouncements,
    /// Allows reading analytics reports.
    ViewReports,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewShifts => "view_shifts",
            Self::ManageShifts => "manage_shifts",
            Self::ViewTasks => "view_tasks",
            Self::ManageTasks => "manage_tasks",
            Self::ManageInventory => "manage_inventory",
            Self::ManageStaff => "manage_staff",
            Self::PostAnnouncements => "post_announcements",
            Self::ViewReports => "view_reports",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ViewShifts,
            Permission::ManageShifts,
            Permission::ViewTasks,
            Permission::ManageTasks,
            Permission::ManageInventory,
            Permission::ManageStaff,
            Permission::PostAnnouncements,
            Permission::ViewReports,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

/// Structural kind of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// The creator role; grants everything.
    Creator,
    /// The head-manager role; grants everything.
    HeadManager,
    /// An office-defined permission set.
    Custom,
}

/// Office-scoped named permission set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    name: RoleName,
    kind: RoleKind,
    permissions: BTreeSet<Permission>,
    color_hint: Option<String>,
}

impl RoleDefinition {
    /// Creates a custom role. Reserved names are rejected.
    pub fn custom(
        name: impl Into<String>,
        permissions: impl IntoIterator<Item = Permission>,
        color_hint: Option<String>,
    ) -> AppResult<Self> {
        let name = RoleName::new(name)?;
        if name.is_reserved() {
            return Err(AppError::Validation(format!(
                "role name '{name}' is reserved"
            )));
        }

        Ok(Self {
            name,
            kind: RoleKind::Custom,
            permissions: permissions.into_iter().collect(),
            color_hint: color_hint
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
        })
    }

    /// Roles every office starts with.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                name: RoleName::creator(),
                kind: RoleKind::Creator,
                permissions: BTreeSet::new(),
                color_hint: None,
            },
            Self {
                name: RoleName::head_manager(),
                kind: RoleKind::HeadManager,
                permissions: BTreeSet::new(),
                color_hint: None,
            },
            Self {
                name: RoleName::employee(),
                kind: RoleKind::Custom,
                permissions: [Permission::ViewShifts, Permission::ViewTasks]
                    .into_iter()
                    .collect(),
                color_hint: None,
            },
        ]
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns the structural kind.
    #[must_use]
    pub fn kind(&self) -> RoleKind {
        self.kind
    }

    /// Returns the optional display color.
    #[must_use]
    pub fn color_hint(&self) -> Option<&str> {
        self.color_hint.as_deref()
    }

    /// Returns true when the role has every permission.
    #[must_use]
    pub fn is_full_access(&self) -> bool {
        matches!(self.kind, RoleKind::Creator | RoleKind::HeadManager)
    }

    /// Returns true when the role carries `permission`.
    #[must_use]
    pub fn grants(&self, permission: Permission) -> bool {
        self.is_full_access() || self.permissions.contains(&permission)
    }

    /// Returns the effective permissions, expanding full-access sentinels.
    #[must_use]
    pub fn effective_permissions(&self) -> BTreeSet<Permission> {
        if self.is_full_access() {
            return Permission::all().iter().copied().collect();
        }

        self.permissions.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn permission_roundtrip_storage_value() {
        for permission in Permission::all() {
            let restored = Permission::from_str(permission.as_str());
            assert_eq!(restored.ok(), Some(*permission));
        }
    }

    #[test]
    fn unknown_permission_is_rejected() {
        assert!(Permission::from_str("all").is_err());
    }

    #[test]
    fn all_staff_targets_any_role() {
        assert!(RoleName::all_staff().targets(&RoleName::employee()));
        assert!(RoleName::all_staff().targets(&RoleName::creator()));
        assert!(!RoleName::employee().targets(&RoleName::creator()));
    }

    #[test]
    fn role_names_match_literally() {
        let cashier = RoleName::new("Cashier").unwrap_or_else(|_| unreachable!());
        let lower = RoleName::new("cashier").unwrap_or_else(|_| unreachable!());
        assert!(!cashier.targets(&lower));
    }

    #[test]
    fn custom_role_cannot_use_reserved_name() {
        assert!(RoleDefinition::custom("All Staff", [], None).is_err());
        assert!(RoleDefinition::custom("Creator", [], None).is_err());
        assert!(RoleDefinition::custom("Head Manager", [], None).is_err());
    }

    #[test]
    fn full_access_roles_grant_everything() {
        let defaults = RoleDefinition::defaults();
        let head_manager = defaults
            .iter()
            .find(|role| role.kind() == RoleKind::HeadManager)
            .unwrap_or_else(|| unreachable!());

        assert!(head_manager.grants(Permission::ManageInventory));
        assert_eq!(
            head_manager.effective_permissions().len(),
            Permission::all().len()
        );
    }

    #[test]
    fn custom_role_grants_only_listed_permissions() {
        let role = RoleDefinition::custom(
            "Inventory Specialist",
            [Permission::ManageInventory, Permission::ViewTasks],
            Some("#F59E0B".to_owned()),
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(role.grants(Permission::ManageInventory));
        assert!(!role.grants(Permission::ManageStaff));
        assert_eq!(role.color_hint(), Some("#F59E0B"));
    }
}
