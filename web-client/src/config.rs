//! Client configuration.

use std::env;

/// Base URL used when `EVENTS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:9000";

/// Where the events API lives.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let api_url = env::var("EVENTS_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self::new(api_url)
    }

    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("https://abc.execute-api.us-east-1.amazonaws.com/prod/");
        assert_eq!(config.api_url, "https://abc.execute-api.us-east-1.amazonaws.com/prod");
    }
}
