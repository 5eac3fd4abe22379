//! Actors and their roles
//!
//! Roles are group memberships attached to an account, never fields on the
//! profile. An actor is resolved once per request and then passed by
//! reference into the access engine.

use crate::types::{AccountId, ProfileId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Group membership granting catalog rights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// May author albums and songs it owns
    Artist,
    /// Unrestricted catalog access
    #[serde(rename = "DottifyAdmin")]
    Admin,
}

impl Role {
    /// Name of the group that carries this role
    pub fn group_name(&self) -> &'static str {
        match self {
            Role::Artist => "Artist",
            Role::Admin => "DottifyAdmin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Artist" => Ok(Role::Artist),
            "DottifyAdmin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group_name())
    }
}

/// A logged-in account with its resolved profile and roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub account_id: AccountId,
    /// `None` when the account has no profile (a data inconsistency for artists)
    pub profile_id: Option<ProfileId>,
    pub roles: Vec<Role>,
}

/// Whoever is making the request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Actor {
    #[default]
    Anonymous,
    Member(Member),
}

impl Actor {
    pub fn member(
        account_id: AccountId,
        profile_id: Option<ProfileId>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        let mut roles: Vec<Role> = roles.into_iter().collect();
        roles.sort();
        roles.dedup();
        Actor::Member(Member {
            account_id,
            profile_id,
            roles,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::Member(_))
    }

    /// Role check; always false for an anonymous actor
    pub fn has_role(&self, role: Role) -> bool {
        match self {
            Actor::Anonymous => false,
            Actor::Member(m) => m.roles.contains(&role),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_artist(&self) -> bool {
        self.has_role(Role::Artist)
    }

    pub fn account_id(&self) -> Option<AccountId> {
        match self {
            Actor::Anonymous => None,
            Actor::Member(m) => Some(m.account_id),
        }
    }

    pub fn profile_id(&self) -> Option<ProfileId> {
        match self {
            Actor::Anonymous => None,
            Actor::Member(m) => m.profile_id,
        }
    }
}
