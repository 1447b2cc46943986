use chrono::{DateTime, TimeZone, Utc};

/// Backend origin, baked in at build time. Empty means same origin.
pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or("")
}

// 2024-12-31T00:00:00Z
const DEFAULT_LAUNCH_MILLIS: i64 = 1_735_603_200_000;

pub fn default_launch_date() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(DEFAULT_LAUNCH_MILLIS)
        .single()
        .unwrap_or_else(Utc::now)
}
