use serde::{Deserialize, Serialize};
use std::fmt;

/// Document shape served at the temperature source: `{ "temperatures": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureFile {
    pub temperatures: Vec<Sample>,
}

/// A single sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Epoch milliseconds
    pub time: i64,
    /// Degrees Celsius
    pub temp: f64,
    /// Battery indicator as reported by the sensor (e.g. `"80%"` or `3.7`)
    #[serde(default)]
    pub bat: Option<Battery>,
}

/// Battery indicator, kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Battery {
    Text(String),
    Number(serde_json::Number),
    /// Anything else the sensor sends (booleans, objects...)
    Other(serde_json::Value),
}

impl fmt::Display for Battery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Battery {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
