use std::path::PathBuf;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::Invalid {
                name: "ENVIRONMENT",
                value: other.to_string(),
            }),
        }
    }

    fn default_port(self) -> u16 {
        match self {
            Environment::Staging => 3100,
            _ => 3000,
        }
    }
}

/// Credentials of the Google service account that owns the waitlist sheet.
#[derive(Clone)]
pub struct SheetsCredentials {
    pub spreadsheet_id: String,
    pub client_email: String,
    pub private_key: String,
}

// The key is kept out of logs.
impl std::fmt::Debug for SheetsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsCredentials")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum StoreConfig {
    Sheets(SheetsCredentials),
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub port: u16,
    pub frontend_url: String,
    pub frontend_dist: PathBuf,
    pub store: StoreConfig,
    pub sentry_dsn: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("ENVIRONMENT") {
            Some(value) => Environment::parse(&value)?,
            None => Environment::Production,
        };
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => environment.default_port(),
        };
        let store = match lookup("WAITLIST_STORE").as_deref() {
            None | Some("sheets") => StoreConfig::Sheets(SheetsCredentials {
                spreadsheet_id: required(&lookup, "GOOGLE_SHEETS_ID")?,
                client_email: required(&lookup, "GOOGLE_CLIENT_EMAIL")?,
                // Keys pasted into .env files carry escaped newlines
                private_key: required(&lookup, "GOOGLE_PRIVATE_KEY")?.replace("\\n", "\n"),
            }),
            Some("memory") => StoreConfig::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "WAITLIST_STORE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            environment,
            port,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            frontend_dist: lookup("FRONTEND_DIST")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("frontend/dist")),
            store,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}
