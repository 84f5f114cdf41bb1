/*
 * Responsibility
 * - Read process configuration once at startup (listen address, identity provider, timeouts)
 * - Validate values (fail fast on missing/invalid settings)
 * - Lookup is injectable so tests never touch the process environment
 */
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    /// Base URL of the identity provider (e.g. `https://tenant.auth0.com`).
    pub auth0_domain: Url,
    pub auth0_timeout: Duration,

    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr: SocketAddr = lookup("CORALD_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("CORALD_ADDR"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let raw_domain =
            lookup("CORALD_AUTH0_DOMAIN").ok_or(ConfigError::Missing("CORALD_AUTH0_DOMAIN"))?;
        let auth0_domain =
            Url::parse(raw_domain.trim()).map_err(|_| ConfigError::Invalid("CORALD_AUTH0_DOMAIN"))?;
        if !matches!(auth0_domain.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("CORALD_AUTH0_DOMAIN"));
        }

        let auth0_timeout = seconds(&lookup, "CORALD_AUTH0_TIMEOUT_SECONDS", 5)?;
        let request_timeout = seconds(&lookup, "CORALD_REQUEST_TIMEOUT_SECONDS", 10)?;

        Ok(Self {
            addr,
            app_env,
            auth0_domain,
            auth0_timeout,
            request_timeout,
        })
    }

    /// `<auth0_domain>/userinfo`, keeping any path prefix of the base URL.
    pub fn userinfo_url(&self) -> Url {
        let mut url = self.auth0_domain.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("userinfo");
        }
        url
    }
}

fn seconds<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err(ConfigError::Invalid(key)),
            Ok(secs) => Ok(Duration::from_secs(secs)),
        },
    }
}
