//! Temporal status of a license.
//!
//! Everything here is a pure function of the expiry timestamp and a reference
//! time. Days are counted as calendar days in the time zone of `now`, so a
//! license expiring later today has `days_left == 0` and is `Expiring`, not
//! `Expired`.

use crate::LicenseType;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// Upper bound (inclusive) of the expiring window, in days.
pub const EXPIRING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    /// More than a week left
    Ongoing,
    /// Expires today or within the next seven days
    Expiring,
    /// Expiry date is in the past
    Expired,
    /// No expiry date
    Perpetual,
}

impl Band {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Expired => Severity::Critical,
            Self::Expiring => Severity::Warning,
            Self::Ongoing | Self::Perpetual => Severity::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ongoing => "ONGOING",
            Self::Expiring => "EXPIRING",
            Self::Expired => "EXPIRED",
            Self::Perpetual => "PERPETUAL",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a band should be highlighted by any consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseStatus {
    pub days_left: Option<i64>,
    pub band: Band,
}

impl LicenseStatus {
    pub fn severity(&self) -> Severity {
        self.band.severity()
    }

    /// Expiry as shown in the license list: `2025-03-01 (12d)` or `no expiry`.
    pub fn describe(&self, expires_at: Option<DateTime<Utc>>) -> String {
        match (expires_at, self.days_left) {
            (Some(at), Some(days)) => format!("{} ({}d)", at.format("%Y-%m-%d"), days),
            _ => String::from("no expiry"),
        }
    }
}

/// Classify an expiry timestamp relative to `now`.
pub fn classify<Tz: TimeZone>(
    expires_at: Option<DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> LicenseStatus {
    let Some(expires_at) = expires_at else {
        return LicenseStatus {
            days_left: None,
            band: Band::Perpetual,
        };
    };

    let today = now.date_naive();
    let expiry_day = expires_at.with_timezone(&now.timezone()).date_naive();
    let days_left = expiry_day.signed_duration_since(today).num_days();

    let band = if days_left < 0 {
        Band::Expired
    } else if days_left <= EXPIRING_WINDOW_DAYS {
        Band::Expiring
    } else {
        Band::Ongoing
    };

    LicenseStatus {
        days_left: Some(days_left),
        band,
    }
}

/// Only monthly licenses can be renewed, and only once they are inside the
/// expiring window. Lapsed monthly licenses stay renewable.
pub fn is_renewable(license_type: LicenseType, days_left: Option<i64>) -> bool {
    match (license_type, days_left) {
        (LicenseType::Monthly, Some(days)) => days <= EXPIRING_WINDOW_DAYS,
        _ => false,
    }
}
