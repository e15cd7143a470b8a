//! User domain types.

use serde::{Deserialize, Serialize};

use campus_market_core::{Email, Role, UserId};

/// Session-stored user identity.
///
/// This is the record persisted under the `user` key while someone is
/// signed in. The role is serialized as `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// User ID, minted from the sign-in timestamp.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address the role was derived from.
    pub email: Email,
    /// Role derived from the email domain.
    #[serde(rename = "type")]
    pub role: Role,
    /// Always `true` for a stored session; a `false` record counts as signed out.
    pub is_authenticated: bool,
    /// Free-text biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// University name (set at sign-up).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    /// Study program (set at sign-up).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// Year of study (set at sign-up).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Month and year the account was created, e.g. "June 2024".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_since: Option<String>,
}

/// Public profile of a user, stored under `userProfile_<email>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub avatar: Option<String>,
    pub university: String,
    pub program: String,
    pub year: String,
    pub member_since: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub listings_count: u32,
    #[serde(default)]
    pub sold_count: u32,
    #[serde(default)]
    pub bought_count: u32,
    #[serde(default)]
    pub favorite_count: u32,
    pub rating: f32,
    pub response_rate: String,
    pub response_time: String,
    pub verified: bool,
}

/// Authentication state of the session machine.
///
/// Signing in moves `Anonymous` straight to one of the authenticated
/// states; the in-between check runs synchronously inside the sign-in call
/// and is never observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Anonymous,
    AuthenticatedStudent,
    AuthenticatedAdmin,
}

impl SessionState {
    /// State implied by an optional session record.
    #[must_use]
    pub fn of(user: Option<&SessionUser>) -> Self {
        match user {
            Some(user) if user.is_authenticated => match user.role {
                Role::Student => Self::AuthenticatedStudent,
                Role::Admin => Self::AuthenticatedAdmin,
            },
            _ => Self::Anonymous,
        }
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    /// Role of the signed-in user, if any.
    #[must_use]
    pub const fn role(self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::AuthenticatedStudent => Some(Role::Student),
            Self::AuthenticatedAdmin => Some(Role::Admin),
        }
    }
}
