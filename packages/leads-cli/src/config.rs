use anyhow::{Context, Result};
use dotenvy::dotenv;
use lead_discovery::{api_key, SecretString};
use std::env;
use std::time::Duration;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Missing key is not a startup error; discovery reports it as not configured.
    pub serpapi_api_key: Option<SecretString>,
    pub serpapi_timeout: Duration,
    pub daily_lead_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            serpapi_api_key: api_key(lookup("SERPAPI_API_KEY").as_deref()),
            serpapi_timeout: Duration::from_secs(
                lookup("SERPAPI_TIMEOUT_SECS")
                    .unwrap_or_else(|| "8".to_string())
                    .parse()
                    .context("SERPAPI_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            daily_lead_limit: lookup("DAILY_LEAD_LIMIT")
                .unwrap_or_else(|| "1000".to_string())
                .parse()
                .context("DAILY_LEAD_LIMIT must be a valid number")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_discovery::security::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.serpapi_api_key.is_none());
        assert_eq!(config.serpapi_timeout, Duration::from_secs(8));
        assert_eq!(config.daily_lead_limit, 1000);
    }

    #[test]
    fn test_values_and_redaction() {
        let config = Config::from_lookup(lookup(&[
            ("SERPAPI_API_KEY", "serp-secret"),
            ("SERPAPI_TIMEOUT_SECS", "3"),
            ("DAILY_LEAD_LIMIT", "50"),
        ]))
        .unwrap();

        assert_eq!(config.serpapi_api_key.as_ref().unwrap().expose_secret(), "serp-secret");
        assert_eq!(config.serpapi_timeout, Duration::from_secs(3));
        assert_eq!(config.daily_lead_limit, 50);
        assert!(!format!("{:?}", config).contains("serp-secret"));
    }

    #[test]
    fn test_blank_key_treated_as_missing() {
        let config = Config::from_lookup(lookup(&[("SERPAPI_API_KEY", "  ")])).unwrap();
        assert!(config.serpapi_api_key.is_none());
    }

    #[test]
    fn test_bad_number_is_error() {
        assert!(Config::from_lookup(lookup(&[("DAILY_LEAD_LIMIT", "lots")])).is_err());
    }
}
