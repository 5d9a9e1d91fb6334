use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid license type: {value} {location}")]
    InvalidLicenseType {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid plan: {value} {location}")]
    InvalidPlan {
        value: String,
        location: ErrorLocation,
    },
}

/// Pre-flight failures. These never reach the network and are shown next to
/// the offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no user selected")]
    NoUserSelected,

    #[error("missing machine id")]
    MissingMachineId,

    #[error("missing email")]
    MissingEmail,

    #[error("missing name")]
    MissingName,

    #[error("month must be 1-12, got {month}")]
    InvalidMonth { month: u32 },
}

impl ValidationError {
    /// Form field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            Self::NoUserSelected => "user",
            Self::MissingMachineId => "machineId",
            Self::MissingEmail => "email",
            Self::MissingName => "name",
            Self::InvalidMonth { .. } => "month",
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
