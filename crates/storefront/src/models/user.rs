//! Signed-in user.

use serde::{Deserialize, Serialize};

use shopfront_core::{Email, UserId, UserRole};

/// The user stored under the `user` key after sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    /// Display name, taken from the email's local part.
    pub name: String,
    pub role: UserRole,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
