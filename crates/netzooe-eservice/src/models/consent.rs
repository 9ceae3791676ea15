//! Data sharing consents.

use serde::{Deserialize, Serialize};

/// Status filter for the consents endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentStatus {
    Active,
    ActiveUnchangeable,
    Revoked,
}

impl ConsentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentStatus::Active => "ACTIVE",
            ConsentStatus::ActiveUnchangeable => "ACTIVE_UNCHANGEABLE",
            ConsentStatus::Revoked => "REVOKED",
        }
    }
}
