use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration_text;
use crate::error::ValidationError;

/// Settings accepted from `http-bench.toml` / `http-bench.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub duration: Option<DurationValue>,
    pub threads: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub verify_tls: Option<bool>,
    pub latency: Option<bool>,
}

/// Either whole seconds (`30`) or a duration string (`"500ms"`, `"2m"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_text(text),
        }
    }
}
