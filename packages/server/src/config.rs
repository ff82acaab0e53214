use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gateway_url: String,
    pub gateway_api_key: String,
    pub scout_model: String,
    pub audit_service_url: String,
    pub fetch_timeout: Duration,
    pub max_content_chars: usize,
    pub agent_max_steps: usize,
    pub agent_max_output_tokens: u32,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; every variable has a default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let string =
            |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(Self {
            port: parse_var(&lookup, "PORT", 3000)?,
            gateway_url: string("LLM_GATEWAY_URL", "http://localhost:4000/v1"),
            gateway_api_key: string("LLM_GATEWAY_API_KEY", "sk-1234"),
            scout_model: string("SCOUT_MODEL", "berlin-scout-model"),
            audit_service_url: string(
                "AUDIT_SERVICE_URL",
                "http://localhost:8000/validate-and-store",
            ),
            fetch_timeout: Duration::from_secs(parse_var(&lookup, "FETCH_TIMEOUT_SECS", 45)?),
            max_content_chars: parse_var(&lookup, "MAX_CONTENT_CHARS", 12_000)?,
            agent_max_steps: parse_var(&lookup, "AGENT_MAX_STEPS", 5)?,
            agent_max_output_tokens: parse_var(&lookup, "AGENT_MAX_OUTPUT_TOKENS", 1500)?,
            request_timeout: Duration::from_secs(parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 600)?),
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got '{}'", name, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.gateway_url, "http://localhost:4000/v1");
        assert_eq!(config.scout_model, "berlin-scout-model");
        assert_eq!(config.audit_service_url, "http://localhost:8000/validate-and-store");
        assert_eq!(config.fetch_timeout, Duration::from_secs(45));
        assert_eq!(config.max_content_chars, 12_000);
        assert_eq!(config.agent_max_steps, 5);
        assert_eq!(config.agent_max_output_tokens, 1500);
        assert_eq!(config.request_timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8081"),
            ("AGENT_MAX_STEPS", " 3 "),
            ("SCOUT_MODEL", "local"),
        ])
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.agent_max_steps, 3);
        assert_eq!(config.scout_model, "local");
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = config_from(&[("FETCH_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("FETCH_TIMEOUT_SECS"));
    }
}
