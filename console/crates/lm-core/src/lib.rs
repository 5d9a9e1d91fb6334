pub mod error;
pub mod models;
pub mod roster;
pub mod status;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result as CoreResult, ValidationError};
pub use models::entity_id::EntityId;
pub use models::issued_license::IssuedLicense;
pub use models::license::{License, LicenseField, LicenseOwner};
pub use models::license_request::{LicenseDraft, LicenseRequest};
pub use models::license_type::{LicenseType, OnlinePlan};
pub use models::report::{ReportPeriod, ReportStats};
pub use models::user::{LicenseRef, User, UserField};
pub use models::user_form::{NewUser, UserUpdate};
pub use roster::{Roster, RosterRecord, SortDirection, SortState, SortValue};
pub use status::{Band, EXPIRING_WINDOW_DAYS, LicenseStatus, Severity, classify, is_renewable};
