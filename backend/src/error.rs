use thiserror::Error;

/// Failures while appending a waitlist entry to the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to sign service account assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("request to Google failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Google responded with {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("spreadsheet has no sheets")]
    NoSheet,
    #[error("sheet '{sheet}' has no '{header}' column in its header row")]
    MissingHeader { sheet: String, header: &'static str },
}

/// Startup configuration problems. These are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
