use crate::{LicenseType, User, ValidationError};

use serde::Serialize;

/// Payload for `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        Ok(())
    }
}

/// Payload for `PUT /users/:id`. Every field is sent; a `None` plan goes out
/// as `null`, which the backend reads as "choose later".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub email: String,
    pub name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub plan: Option<LicenseType>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        Ok(())
    }
}

impl From<&User> for UserUpdate {
    /// Prefill the edit form from the stored record.
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone().unwrap_or_default(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            notes: user.notes.clone(),
            plan: user.plan,
        }
    }
}
