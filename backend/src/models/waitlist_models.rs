use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One row of the waitlist sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub email: String,
    pub timestamp: String,
}

impl WaitlistEntry {
    pub fn new(email: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            // e.g. 2024-11-02T09:15:27.481Z
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
