use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use std::env;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

/// Time zone in which calendar dates and hours-of-day are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    /// The host's local zone, matching what a browser page would use.
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Build a fixed zone from an offset east of UTC, in minutes.
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::Fixed)
    }

    /// Wall-clock time for an epoch-millisecond timestamp, or `None` if out of range.
    #[must_use]
    pub fn local_time(self, epoch_millis: i64) -> Option<NaiveDateTime> {
        let utc = DateTime::from_timestamp_millis(epoch_millis)?;
        Some(match self {
            Self::Local => utc.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => utc.with_timezone(&offset).naive_local(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Temperature source
    pub temperatures_source: String,
    pub fetch_timeout_seconds: u64,

    // Presentation
    pub display_zone: DisplayZone,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set to something unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value lookup. Unset keys take defaults,
    /// set keys must parse.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for a blank source and `ConfigError::Invalid`
    /// for values that do not parse or are out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let display_zone = match lookup("DISPLAY_UTC_OFFSET_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(DisplayZone::from_offset_minutes)
                .ok_or(ConfigError::Invalid("DISPLAY_UTC_OFFSET_MINUTES", raw))?,
            None => DisplayZone::Local,
        };

        let temperatures_source =
            lookup("TEMPERATURES_SOURCE").unwrap_or_else(|| "temperatures.json".to_string());
        if temperatures_source.trim().is_empty() {
            return Err(ConfigError::Missing("TEMPERATURES_SOURCE"));
        }

        // A zero timeout would fail every fetch
        let fetch_timeout_seconds = parse_or("FETCH_TIMEOUT_SECONDS", &lookup, 30_u64)?;
        if fetch_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("FETCH_TIMEOUT_SECONDS", "0".to_string()));
        }

        Ok(Self {
            // Temperature source
            temperatures_source,
            fetch_timeout_seconds,

            // Presentation
            display_zone,

            // API settings
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: parse_or("API_PORT", &lookup, 3000_u16)?,

            // Application metadata
            deployment: Deployment::from_str(
                &lookup("DEPLOYMENT").unwrap_or_else(|| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
