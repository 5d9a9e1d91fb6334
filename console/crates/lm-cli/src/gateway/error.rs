use error_location::ErrorLocation;
use std::panic::Location;
use thiserror::Error;

/// Errors that can occur while talking to the admin backend
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {} {location}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
        location: ErrorLocation,
    },

    #[error("Not authorized (status {status}): {} {location}", .message.as_deref().unwrap_or("session rejected"))]
    Unauthorized {
        status: u16,
        message: Option<String>,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        GatewayError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        GatewayError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Create an error for a non-success status. 401 and 403 mean the
    /// session is missing or no longer accepted.
    #[track_caller]
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if status == 401 || status == 403 {
            GatewayError::Unauthorized {
                status,
                message,
                location,
            }
        } else {
            GatewayError::Api {
                status,
                message,
                location,
            }
        }
    }

    /// Message the backend put in its error body, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            GatewayError::Api { message, .. } | GatewayError::Unauthorized { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } | GatewayError::Unauthorized { status, .. } => {
                Some(*status)
            }
            GatewayError::Http { source, .. } => source.status().map(|s| s.as_u16()),
            GatewayError::Json { .. } => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        GatewayError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for GatewayError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        GatewayError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
