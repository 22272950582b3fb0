//! Profile roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MembershipError;

/// Role stored on a profile.
///
/// Only `Vip` carries an expiration; `Admin` is never touched by the
/// lifecycle rules except through an explicit role assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Vip,
    Admin,
}

impl Role {
    /// All roles, in privilege order.
    pub const ALL: [Role; 3] = [Role::User, Role::Vip, Role::Admin];

    /// Storage / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Vip => "vip",
            Role::Admin => "admin",
        }
    }

    /// Parses a stored or submitted role value.
    ///
    /// # Errors
    ///
    /// Returns `MembershipError::InvalidRole` for anything outside
    /// `user`, `vip` and `admin`. Matching is exact: no case folding or trimming.
    pub fn parse(value: &str) -> Result<Self, MembershipError> {
        match value {
            "user" => Ok(Role::User),
            "vip" => Ok(Role::Vip),
            "admin" => Ok(Role::Admin),
            _ => Err(MembershipError::invalid_role(value)),
        }
    }

    pub fn is_vip(&self) -> bool {
        *self == Role::Vip
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s)
    }
}
