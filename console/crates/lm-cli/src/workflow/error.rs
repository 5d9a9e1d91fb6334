use crate::GatewayError;

use std::panic::Location;

use error_location::ErrorLocation;
use lm_core::ValidationError;
use thiserror::Error;

/// Outcome of a failed workflow step
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Rejected before any request was made
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Request failed: {0}")]
    Request(#[from] GatewayError),

    /// The view that started the fetch was left before it resolved
    #[error("View was left before the response arrived {location}")]
    StaleView { location: ErrorLocation },

    #[error("An operation on {target} is already in progress {location}")]
    InFlight {
        target: String,
        location: ErrorLocation,
    },
}

impl WorkflowError {
    #[track_caller]
    pub fn stale_view() -> Self {
        WorkflowError::StaleView {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn in_flight(target: impl Into<String>) -> Self {
        WorkflowError::InFlight {
            target: target.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text shown to the operator. Backend messages pass through verbatim;
    /// otherwise `fallback` describes what failed.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            WorkflowError::Validation(e) => e.to_string(),
            WorkflowError::Request(e) => e
                .backend_message()
                .map(String::from)
                .unwrap_or_else(|| fallback.to_string()),
            WorkflowError::StaleView { .. } => fallback.to_string(),
            WorkflowError::InFlight { target, .. } => {
                format!("{target} is already being processed")
            }
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, WorkflowError::StaleView { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, WorkflowError::Request(e) if e.is_unauthorized())
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
