//! Immutable client configuration.

use std::env;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "BOOKING_API_URL";
pub const API_KEY_VAR: &str = "BOOKING_API_KEY";

/// Base URL and API key of the remote booking API.
///
/// Built once at start-up and handed to `BookingClient::new`; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_key: String,
}

impl ClientConfig {
    /// Validate raw values. Absent and blank values are both "missing".
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Result<Self, ConfigError> {
        let base_url = non_blank(base_url).ok_or(ConfigError::Missing(API_URL_VAR))?;
        let api_key = non_blank(api_key).ok_or(ConfigError::Missing(API_KEY_VAR))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(base_url));
        }

        Ok(Self { base_url, api_key })
    }

    /// Read `BOOKING_API_URL` and `BOOKING_API_KEY` from the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(env::var(API_URL_VAR).ok(), env::var(API_KEY_VAR).ok())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn accepts_url_and_key() {
        let config = ClientConfig::new(some("http://localhost:3000/"), some("k")).unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.api_key(), "k");
    }

    #[test]
    fn missing_url_is_rejected() {
        let err = ClientConfig::new(None, some("k")).unwrap_err();
        assert_eq!(err, ConfigError::Missing(API_URL_VAR));
        assert_eq!(err.to_string(), "BOOKING_API_URL is missing");
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = ClientConfig::new(some("http://localhost:3000"), some("   ")).unwrap_err();
        assert_eq!(err, ConfigError::Missing(API_KEY_VAR));
    }

    // The only test in this crate that touches these variables.
    #[test]
    fn from_env_reads_both_variables() {
        env::set_var(API_URL_VAR, " https://bookings.example.com/ ");
        env::set_var(API_KEY_VAR, "env-key");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url(), "https://bookings.example.com");
        assert_eq!(config.api_key(), "env-key");

        env::remove_var(API_KEY_VAR);
        assert_eq!(ClientConfig::from_env().unwrap_err(), ConfigError::Missing(API_KEY_VAR));

        env::remove_var(API_URL_VAR);
        assert_eq!(ClientConfig::from_env().unwrap_err(), ConfigError::Missing(API_URL_VAR));
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        let err = ClientConfig::new(some("localhost:3000"), some("k")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }
}
