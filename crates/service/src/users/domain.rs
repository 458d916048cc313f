use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a persisted user.
pub type UserId = i64;

/// Domain user. `id` is `None` until the store has persisted the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// Create input. A client-supplied `id` is accepted but never used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<UserId>,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl NewUser {
    /// Build the entity to insert; the identifier is always left for the store to assign.
    pub fn into_entity(self) -> User {
        User {
            id: None,
            name: self.name,
            username: self.username,
            email: self.email,
            phone: self.phone,
            website: self.website,
        }
    }
}

/// Update input: only present fields are applied. There is no identifier field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.website.is_none()
    }
}

/// Merge `patch` onto `existing`: a present patch field wins, otherwise the existing value stays.
pub fn merge(existing: User, patch: UserPatch) -> User {
    User {
        id: existing.id,
        name: patch.name.unwrap_or(existing.name),
        username: patch.username.unwrap_or(existing.username),
        email: patch.email.unwrap_or(existing.email),
        phone: patch.phone.or(existing.phone),
        website: patch.website.or(existing.website),
    }
}

/// Case-insensitive email comparison, the same rule the store's unique index applies.
pub fn emails_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
