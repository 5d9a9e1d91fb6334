use crate::{EntityId, LicenseType, OnlinePlan, User, ValidationError};

/// A validated license issuance request.
///
/// Offline and online licenses are issued by two different backend
/// capabilities; each variant carries exactly the fields its endpoint takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseRequest {
    /// Machine-bound license, always of type `LOCAL`
    Offline {
        user_id: EntityId,
        machine_id: String,
    },
    /// Subscription-backed license
    Online { user_id: EntityId, plan: OnlinePlan },
}

impl LicenseRequest {
    pub fn user_id(&self) -> &EntityId {
        match self {
            Self::Offline { user_id, .. } | Self::Online { user_id, .. } => user_id,
        }
    }

    pub fn license_type(&self) -> LicenseType {
        match self {
            Self::Offline { .. } => LicenseType::Local,
            Self::Online { plan, .. } => (*plan).into(),
        }
    }
}

/// State of the license creation form.
#[derive(Debug, Clone, Copy)]
pub struct LicenseDraft<'a> {
    pub user: Option<&'a User>,
    pub license_type: LicenseType,
    /// Only read for `LOCAL` licenses
    pub machine_id: &'a str,
}

impl<'a> LicenseDraft<'a> {
    pub fn new(user: Option<&'a User>, license_type: LicenseType, machine_id: &'a str) -> Self {
        Self {
            user,
            license_type,
            machine_id,
        }
    }

    pub fn validate(&self) -> Result<LicenseRequest, ValidationError> {
        let user = self.user.ok_or(ValidationError::NoUserSelected)?;
        let user_id = user.id.clone();

        match self.license_type {
            LicenseType::Local => {
                let machine_id = self.machine_id.trim();
                if machine_id.is_empty() {
                    return Err(ValidationError::MissingMachineId);
                }
                Ok(LicenseRequest::Offline {
                    user_id,
                    machine_id: machine_id.to_string(),
                })
            }
            LicenseType::Monthly => Ok(LicenseRequest::Online {
                user_id,
                plan: OnlinePlan::Monthly,
            }),
            LicenseType::Lifetime => Ok(LicenseRequest::Online {
                user_id,
                plan: OnlinePlan::Lifetime,
            }),
        }
    }
}
