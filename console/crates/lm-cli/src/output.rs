//! JSON rows printed by the `lm` binary.
//!
//! Rows are views over core records with the derived columns the list
//! screens show (status band, days left, renewal eligibility).

use chrono::{DateTime, TimeZone, Utc};
use lm_core::{
    Band, EntityId, IssuedLicense, License, LicenseType, ReportPeriod, ReportStats, Severity, User,
};
use serde::Serialize;

const NO_OWNER: &str = "no user";
const UNDECIDED_PLAN: &str = "undecided";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow<'a> {
    pub id: &'a EntityId,
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub plan: &'static str,
    pub licenses: usize,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a User> for UserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: &user.id,
            email: &user.email,
            name: user.name.as_deref(),
            last_name: user.last_name.as_deref(),
            phone: user.phone.as_deref(),
            notes: user.notes.as_deref(),
            plan: user
                .plan
                .as_ref()
                .map(LicenseType::as_str)
                .unwrap_or(UNDECIDED_PLAN),
            licenses: user.license_count(),
            active: user.active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRow<'a> {
    pub id: &'a EntityId,
    #[serde(rename = "type")]
    pub license_type: LicenseType,
    pub owner: &'a str,
    pub owner_id: Option<&'a EntityId>,
    pub code: Option<&'a str>,
    pub expires_at: Option<DateTime<Utc>>,
    pub expires: String,
    pub days_left: Option<i64>,
    pub band: Band,
    pub severity: Severity,
    pub renewable: bool,
}

impl<'a> LicenseRow<'a> {
    pub fn new<Tz: TimeZone>(license: &'a License, now: &DateTime<Tz>) -> Self {
        let status = license.status(now);
        Self {
            id: &license.id,
            license_type: license.license_type,
            owner: license.owner_email().unwrap_or(NO_OWNER),
            owner_id: license.owner_id(),
            code: license.display_code(),
            expires_at: license.expires_at,
            expires: status.describe(license.expires_at),
            days_left: status.days_left,
            band: status.band,
            severity: status.severity(),
            renewable: license.is_renewable(now),
        }
    }
}

/// Issued license as shown once after creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedRow<'a> {
    pub short_code: Option<&'a str>,
    pub token: Option<&'a str>,
    pub token_preview: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a IssuedLicense> for IssuedRow<'a> {
    fn from(issued: &'a IssuedLicense) -> Self {
        Self {
            short_code: issued.short_code.as_deref(),
            token: issued.token.as_deref(),
            token_preview: issued.token_preview(),
            expires_at: issued.expires_at,
        }
    }
}

/// Dashboard counters for one month.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub month: u32,
    pub year: i32,
    pub active_users: u64,
    pub inactive_users: u64,
    pub active_licenses: u64,
    pub expiring_licenses: u64,
    pub lifetime_licenses: u64,
    pub monthly_licenses: u64,
}

impl ReportRow {
    pub fn new(period: ReportPeriod, stats: &ReportStats) -> Self {
        Self {
            month: period.month(),
            year: period.year(),
            active_users: stats.active_users,
            inactive_users: stats.inactive_users,
            active_licenses: stats.active_licenses,
            expiring_licenses: stats.expiring_licenses,
            lifetime_licenses: stats.lifetime_licenses,
            monthly_licenses: stats.monthly_licenses,
        }
    }
}
