
use crate::{EntityId, License, LicenseType, User};

use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn user(id: i64, email: &str, active: bool) -> User {
    User {
        id: EntityId::Number(id),
        email: email.to_string(),
        name: None,
        last_name: None,
        phone: None,
        notes: None,
        plan: None,
        active,
        created_at: None,
        licenses: Vec::new(),
    }
}

pub(crate) fn named_user(id: i64, name: &str, email: &str, active: bool) -> User {
    User {
        name: Some(name.to_string()),
        ..user(id, email, active)
    }
}

pub(crate) fn license(
    id: i64,
    license_type: LicenseType,
    expires_at: Option<DateTime<Utc>>,
) -> License {
    License {
        id: EntityId::Number(id),
        user_id: None,
        license_type,
        expires_at,
        token: None,
        short_code: None,
        notes: None,
        created_at: None,
        user: None,
    }
}

pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub(crate) fn ids<T: crate::RosterRecord<Id = EntityId>>(records: &[T]) -> Vec<i64> {
    records
        .iter()
        .map(|r| match r.id() {
            EntityId::Number(n) => *n,
            EntityId::Text(_) => -1,
        })
        .collect()
}
