use crate::ValidationError;

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

/// Dashboard aggregates for one month. Wire names are the backend's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportStats {
    #[serde(rename = "usersActivos")]
    pub active_users: u64,
    #[serde(rename = "usersInactivos")]
    pub inactive_users: u64,
    #[serde(rename = "licenciasActivas")]
    pub active_licenses: u64,
    #[serde(rename = "licenciasPorVencer")]
    pub expiring_licenses: u64,
    #[serde(rename = "licenciasLifetime")]
    pub lifetime_licenses: u64,
    #[serde(rename = "licenciasMensuales")]
    pub monthly_licenses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    month: u32,
    year: i32,
}

impl ReportPeriod {
    pub fn new(month: u32, year: i32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth { month });
        }
        Ok(Self { month, year })
    }

    /// Month containing `now`.
    pub fn current<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            month: now.month(),
            year: now.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}
