//! Domain models for the identity record and its optional profile.
use serde::{Deserialize, Serialize};
use shared::UserPreferences;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
}

impl User {
    pub fn generate_id() -> String {
        super::generate_id("user")
    }
}

/// At most one per user, created on the first preferences write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub preferences: UserPreferences,
}
