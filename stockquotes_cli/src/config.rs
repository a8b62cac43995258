//! Runtime configuration read from the environment (and `.env`, if present).

use std::time::Duration;

use anyhow::{bail, Context, Result};
use stockquotes_api::{transport::DEFAULT_TIMEOUT, DEFAULT_BASE_URL};

pub const BASE_URL_VAR: &str = "STOCKQUOTES_BASE_URL";
pub const TIMEOUT_VAR: &str = "STOCKQUOTES_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Host of the historical quotes endpoint.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var(BASE_URL_VAR).ok(),
            std::env::var(TIMEOUT_VAR).ok(),
        )
    }

    fn from_values(base_url: Option<String>, timeout_secs: Option<String>) -> Result<Self> {
        let base_url = base_url
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match timeout_secs {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!(
                        "{} must be a whole number of seconds, got '{}'",
                        TIMEOUT_VAR, raw
                    )
                })?;
                if secs == 0 {
                    bail!("{} must be greater than zero", TIMEOUT_VAR);
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self { base_url, timeout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_values(None, None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_from_values() {
        let config = Config::from_values(
            Some("http://localhost:8080".to_string()),
            Some(" 5 ".to_string()),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_base_url_uses_default() {
        let config = Config::from_values(Some("  ".to_string()), None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = Config::from_values(None, Some("soon".to_string())).unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));
        assert!(Config::from_values(None, Some("0".to_string())).is_err());
    }
}
