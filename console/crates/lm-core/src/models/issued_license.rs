use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const TOKEN_PREVIEW_CHARS: usize = 40;

/// Result of a license issuance, shown once to the operator for copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedLicense {
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl IssuedLicense {
    /// First 40 characters of the token followed by `...`
    pub fn token_preview(&self) -> Option<String> {
        self.token.as_ref().map(|token| {
            let head: String = token.chars().take(TOKEN_PREVIEW_CHARS).collect();
            format!("{}...", head)
        })
    }
}
