//! Authenticated caller identity.

/// A caller whose user record has been resolved.
///
/// Only [`crate::domain::UserService::authenticate`] and registration build
/// one outside of tests, so holding an `Identity` means the user exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: String,
}

impl Identity {
    pub(crate) fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
