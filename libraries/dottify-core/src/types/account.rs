//! Accounts and profiles

use super::ids::{AccountId, ProfileId};
use crate::roles::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login identity. Role membership is stored alongside it, not on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new account
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub username: String,
    /// Already-hashed password
    pub password_hash: String,
}

/// Application-level user record, one per account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub account_id: AccountId,
    pub display_name: String,
}

impl Profile {
    /// Canonical URL slug for the profile's detail page
    pub fn slug(&self) -> String {
        crate::slug::slugify(&self.display_name)
    }
}

/// Data for creating a new profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfile {
    pub account_id: AccountId,
    pub display_name: String,
}

/// An account together with its role memberships and its profile.
/// Stores write all of it or none of it.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    /// Already-hashed password
    pub password_hash: String,
    pub display_name: String,
    pub roles: Vec<Role>,
}
