//! Shared value types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Registration status reported by the vehicle registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    /// Not in the registry, so the number can still be taken
    Available,
    /// Already registered to a vehicle
    NotAvailable,
    /// The registry gave no recognizable answer
    Unknown,
}

impl RegistrationStatus {
    pub const ALL: [RegistrationStatus; 3] = [
        RegistrationStatus::Available,
        RegistrationStatus::NotAvailable,
        RegistrationStatus::Unknown,
    ];

    /// Token used in the cache file and report
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Available => "AVAILABLE",
            RegistrationStatus::NotAvailable => "NOT_AVAILABLE",
            RegistrationStatus::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    /// Accepts the canonical tokens case-insensitively, with `-` or space for `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "AVAILABLE" => Ok(RegistrationStatus::Available),
            "NOT_AVAILABLE" => Ok(RegistrationStatus::NotAvailable),
            "UNKNOWN" => Ok(RegistrationStatus::Unknown),
            _ => Err(format!("unknown registration status '{}'", s.trim())),
        }
    }
}
