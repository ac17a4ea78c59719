//! Roles and the fixed role -> permission policy.
//!
//! The mapping is pure data: total and closed over the two roles and the
//! three catalogue resource kinds. The strings returned by [`Role::as_str`]
//! must match the values stored in the `users.role` column.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Permission profile assigned to every user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Read-only access to the catalogue.
    User,
    /// Full create/read/update/delete access to the catalogue.
    Admin,
}

/// All valid role strings.
const VALID_ROLE_STRINGS: &[&str] = &["USER", "ADMIN"];

impl Role {
    /// Return the role in its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Parse a role from its stored string form.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLE_STRINGS.join(", ")
            )),
        }
    }

    /// Whether this role may perform `action` on `resource`.
    pub fn permits(&self, resource: Resource, action: Action) -> bool {
        granted_actions(*self, resource).contains(&action)
    }
}

// ---------------------------------------------------------------------------
// Resources and actions
// ---------------------------------------------------------------------------

/// Catalogue resource kinds covered by the permission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Actor,
    Show,
    Episode,
}

/// Operations a role can be granted on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

const READ_ONLY: &[Action] = &[Action::Read];

const FULL_ACCESS: &[Action] = &[
    Action::Create,
    Action::Read,
    Action::Update,
    Action::Delete,
];

/// Actions granted to `role` on `resource`.
///
/// Total over every (role, resource) pair; there is no dynamic extension.
pub fn granted_actions(role: Role, resource: Resource) -> &'static [Action] {
    match (role, resource) {
        (Role::User, Resource::Actor) => READ_ONLY,
        (Role::User, Resource::Show) => READ_ONLY,
        (Role::User, Resource::Episode) => READ_ONLY,
        (Role::Admin, Resource::Actor) => FULL_ACCESS,
        (Role::Admin, Resource::Show) => FULL_ACCESS,
        (Role::Admin, Resource::Episode) => FULL_ACCESS,
    }
}
