use crate::{EntityId, LicenseType, RosterRecord, SortValue};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// `None` means the plan has not been decided yet
    #[serde(default)]
    pub plan: Option<LicenseType>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Read-only projection of the licenses the backend attached to this user
    #[serde(default)]
    pub licenses: Vec<LicenseRef>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn license_count(&self) -> usize {
        self.licenses.len()
    }
}

/// License summary embedded in a user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRef {
    pub id: EntityId,
    #[serde(rename = "type", default)]
    pub license_type: Option<LicenseType>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// User fields the roster can search and sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    LastName,
    Email,
    Phone,
    Notes,
    Plan,
    CreatedAt,
    Active,
}

impl UserField {
    /// Fields matched by the user list search box.
    pub const LIST_SEARCH: [UserField; 2] = [UserField::Name, UserField::Email];
}

impl RosterRecord for User {
    type Id = EntityId;
    type Key = UserField;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn field(&self, key: UserField) -> SortValue<'_> {
        match key {
            UserField::Name => SortValue::Text(self.name.as_deref()),
            UserField::LastName => SortValue::Text(self.last_name.as_deref()),
            UserField::Email => SortValue::Text(Some(self.email.as_str())),
            UserField::Phone => SortValue::Text(self.phone.as_deref()),
            UserField::Notes => SortValue::Text(self.notes.as_deref()),
            UserField::Plan => SortValue::Text(self.plan.as_ref().map(LicenseType::as_str)),
            UserField::CreatedAt => SortValue::Date(self.created_at),
            UserField::Active => SortValue::Flag(self.active),
        }
    }
}
