//! Well-known role names and the fixed role hierarchy.
//!
//! These must match the `chk_profiles_role` constraint in
//! `20260301000002_create_profiles.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_USER: &str = "user";

/// A profile role. Ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Editor,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Editor => ROLE_EDITOR,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Whether this role grants at least the privileges of `required`.
    pub fn at_least(self, required: Role) -> bool {
        self >= required
    }

    /// Editors and admins may manage site content.
    pub fn can_edit_content(self) -> bool {
        self.at_least(Role::Editor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_USER => Ok(Role::User),
            ROLE_EDITOR => Ok(Role::Editor),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {ROLE_USER}, {ROLE_EDITOR}, {ROLE_ADMIN}"
            ))),
        }
    }
}
