use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Kind of license. Fixed at creation; renewal never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseType {
    /// Offline license bound to a single machine
    Local,
    /// Subscription license, renewable
    Monthly,
    /// Never expires
    Lifetime,
}

impl LicenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Monthly => "MONTHLY",
            Self::Lifetime => "LIFETIME",
        }
    }

    /// Parse a user plan where `undecided` (or an empty value) means no plan yet.
    #[track_caller]
    pub fn parse_plan(s: &str) -> CoreResult<Option<Self>> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "undecided" => Ok(None),
            other => Self::from_str(other).map(Some).map_err(|_| CoreError::InvalidPlan {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl FromStr for LicenseType {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "monthly" => Ok(Self::Monthly),
            "lifetime" => Ok(Self::Lifetime),
            _ => Err(CoreError::InvalidLicenseType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for LicenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// License types issued through the subscription endpoint. `Local` is not
/// representable here, so an online request can never carry a machine binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnlinePlan {
    Monthly,
    Lifetime,
}

impl From<OnlinePlan> for LicenseType {
    fn from(plan: OnlinePlan) -> Self {
        match plan {
            OnlinePlan::Monthly => LicenseType::Monthly,
            OnlinePlan::Lifetime => LicenseType::Lifetime,
        }
    }
}
