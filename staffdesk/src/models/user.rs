//! Models that represent identities, login payloads, and role metadata.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use crate::types::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Stored representation of a login-capable person.
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,
    /// Login name. Unique by convention only.
    pub username: String,
    /// Clear-text password, compared verbatim at login.
    pub password: String,
    /// Role deciding which view the session opens.
    pub role: UserRole,
    /// Human-readable full name.
    pub name: String,
    pub email: String,
    /// Department *name*; membership is a string join against departments.
    pub department: String,
    /// Display name of the line manager, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Supported identity roles.
pub enum UserRole {
    /// Regular staff member.
    #[default]
    Staff,
    /// Administrator with access to the admin view.
    Admin,
}

impl UserRole {
    /// Returns the canonical lowercase representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Staff => "staff",
            UserRole::Admin => "admin",
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "staff" => Ok(UserRole::Staff),
            "admin" => Ok(UserRole::Admin),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["staff", "admin"],
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// Payload for the admin "add member" form. The role is always staff.
pub struct CreateMember {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub email: String,
    pub department: String,
    #[serde(default)]
    pub manager: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Editable member fields. Username and password are immutable here.
pub struct UpdateMember {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub manager: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Credentials submitted at login.
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Public-facing representation of a user, without the password.
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
            department: user.department,
            manager: user.manager,
        }
    }
}

impl User {
    /// Builds a staff identity from the admin form.
    pub fn from_member(payload: CreateMember) -> Self {
        Self {
            id: UserId::new(),
            username: payload.username,
            password: payload.password,
            role: UserRole::Staff,
            name: payload.name,
            email: payload.email,
            department: payload.department,
            manager: payload.manager.filter(|m| !m.is_empty()),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role, UserRole::Staff)
    }

    /// Clear-text credential check.
    pub fn matches_credentials(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    pub fn apply_update(&mut self, update: UpdateMember) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(department) = update.department {
            self.department = department;
        }
        if let Some(manager) = update.manager {
            self.manager = if manager.is_empty() {
                None
            } else {
                Some(manager)
            };
        }
    }
}
