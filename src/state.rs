use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use crate::core::{genius, search};
use crate::error::{AppError, Result};

/// Configuration for the gateway
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP server binds to
    pub host: IpAddr,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Root of the Genius API
    pub genius_api_url: String,
    /// Root of the web search engine used for AZLyrics search
    pub web_search_url: String,
    /// Site the AZLyrics search is restricted to
    pub azlyrics_domain: String,
    /// User agent sent on every outbound request
    pub user_agent: String,
    /// Timeout for outbound requests, none when unset
    pub upstream_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8090,
            genius_api_url: genius::DEFAULT_API_URL.to_string(),
            web_search_url: search::DEFAULT_ENGINE_URL.to_string(),
            azlyrics_domain: String::from("www.azlyrics.com"),
            user_agent: String::from(
                "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
            ),
            upstream_timeout: None,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment
    ///
    /// Unset variables keep their default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = get("LYRICS_GATEWAY_HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("LYRICS_GATEWAY_HOST={}: {}", host, e)))?;
        }
        if let Some(port) = get("LYRICS_GATEWAY_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("LYRICS_GATEWAY_PORT={}: {}", port, e)))?;
        }
        if let Some(url) = get("GENIUS_API_URL") {
            config.genius_api_url = url;
        }
        if let Some(url) = get("WEB_SEARCH_URL") {
            config.web_search_url = url;
        }
        if let Some(domain) = get("AZLYRICS_DOMAIN") {
            config.azlyrics_domain = domain;
        }
        if let Some(agent) = get("UPSTREAM_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("UPSTREAM_TIMEOUT_SECS={}: {}", secs, e)))?;
            config.upstream_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Socket address to bind
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Application state that can be shared across handlers
///
/// Holds no credentials. Tokens only ever live in request-scoped clients.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Outbound connection pool
    pub http: reqwest::Client,
}

impl AppState {
    /// Create a new application state with default configuration
    pub fn new() -> Result<Arc<Self>> {
        Self::with_config(Config::default())
    }

    /// Create a new application state with custom configuration
    pub fn with_config(config: Config) -> Result<Arc<Self>> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self::with_client(config, http))
    }

    /// Create a new application state around an existing connection pool
    pub fn with_client(config: Config, http: reqwest::Client) -> Arc<Self> {
        Arc::new(Self { config, http })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:8090".parse::<SocketAddr>().unwrap());
        assert_eq!(config.genius_api_url, "https://api.genius.com");
        assert_eq!(config.azlyrics_domain, "www.azlyrics.com");
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("LYRICS_GATEWAY_HOST", "127.0.0.1"),
            ("LYRICS_GATEWAY_PORT", "9100"),
            ("GENIUS_API_URL", "http://localhost:1234"),
            ("UPSTREAM_TIMEOUT_SECS", "15"),
            ("AZLYRICS_DOMAIN", ""),
        ]))
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:9100".parse::<SocketAddr>().unwrap());
        assert_eq!(config.genius_api_url, "http://localhost:1234");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.azlyrics_domain, "www.azlyrics.com");
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("LYRICS_GATEWAY_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env() {
        std::env::set_var("LYRICS_GATEWAY_PORT", "18090");
        let config = Config::from_env();
        std::env::remove_var("LYRICS_GATEWAY_PORT");

        assert_eq!(config.unwrap().port, 18090);
    }
}
