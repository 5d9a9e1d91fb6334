use crate::{EntityId, LicenseStatus, LicenseType, RosterRecord, SortValue, classify, is_renewable};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: EntityId,
    #[serde(default)]
    pub user_id: Option<EntityId>,
    #[serde(rename = "type")]
    pub license_type: LicenseType,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Only present right after issuance or renewal
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Owner summary embedded by the license listing
    #[serde(default)]
    pub user: Option<LicenseOwner>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseOwner {
    pub id: EntityId,
    #[serde(default)]
    pub email: Option<String>,
}

impl License {
    pub fn status<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> LicenseStatus {
        classify(self.expires_at, now)
    }

    pub fn is_renewable<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        is_renewable(self.license_type, self.status(now).days_left)
    }

    /// Owning user, from the foreign key or the embedded owner.
    pub fn owner_id(&self) -> Option<&EntityId> {
        self.user_id
            .as_ref()
            .or_else(|| self.user.as_ref().map(|owner| &owner.id))
    }

    pub fn owner_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(|owner| owner.email.as_deref())
    }

    /// Code handed to the operator for manual distribution.
    pub fn display_code(&self) -> Option<&str> {
        self.short_code.as_deref().or(self.notes.as_deref())
    }
}

/// License fields the roster can search and sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseField {
    Type,
    OwnerEmail,
    ShortCode,
    ExpiresAt,
    CreatedAt,
}

impl LicenseField {
    pub const LIST_SEARCH: [LicenseField; 2] = [LicenseField::OwnerEmail, LicenseField::ShortCode];
}

impl RosterRecord for License {
    type Id = EntityId;
    type Key = LicenseField;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn field(&self, key: LicenseField) -> SortValue<'_> {
        match key {
            LicenseField::Type => SortValue::Text(Some(self.license_type.as_str())),
            LicenseField::OwnerEmail => SortValue::Text(self.owner_email()),
            LicenseField::ShortCode => SortValue::Text(self.display_code()),
            LicenseField::ExpiresAt => SortValue::Date(self.expires_at),
            LicenseField::CreatedAt => SortValue::Date(self.created_at),
        }
    }
}
