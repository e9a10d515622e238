use serde::{Deserialize, Serialize};
use serde_json::Number;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub code: String,
    #[serde(rename = "profileName")]
    pub profile_name: String,
}

/// Stored user record as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Number,
    pub profile: Profile,
}

/// Body of a user document, everything except the store-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    pub name: String,
    pub email: String,
    pub age: Number,
    pub profile: Profile,
}

impl UserDocument {
    pub fn with_id(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
            profile: self.profile,
        }
    }
}

/// Fields to overwrite on an existing document. Absent fields are left alone;
/// a present profile replaces the stored one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none() && self.profile.is_none()
    }

    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(age) = &self.age {
            user.age = age.clone();
        }
        if let Some(profile) = &self.profile {
            user.profile = profile.clone();
        }
    }
}

/// Row shape of the `users` table: id column plus JSONB body
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub doc: sqlx::types::Json<UserDocument>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        row.doc.0.with_id(row.id)
    }
}
