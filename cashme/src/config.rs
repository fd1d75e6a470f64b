use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{CashMeError, Result};

/// Default API server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the CashMe client.
#[derive(Debug, Clone)]
pub struct CashMeConfig {
    /// Base URL for the API server (e.g. `http://localhost:8080`).
    pub base_url: String,
    /// Upper bound on a single request, after which it fails as timed out.
    pub request_timeout: Duration,
    /// Directory holding the durable credential.
    pub token_dir: PathBuf,
}

impl Default for CashMeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            token_dir: default_token_dir(),
        }
    }
}

impl CashMeConfig {
    /// Build a config from `CASHME_API_URL`, `CASHME_TIMEOUT_SECS` and
    /// `CASHME_TOKEN_DIR`, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CASHME_API_URL") {
            config.base_url = url;
        }
        if let Ok(secs) = std::env::var("CASHME_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| CashMeError::Config(format!("bad CASHME_TIMEOUT_SECS: {secs}")))?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(dir) = std::env::var("CASHME_TOKEN_DIR") {
            config.token_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| CashMeError::Config(format!("bad base url {}: {e}", self.base_url)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CashMeError::Config(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(CashMeError::Config("request timeout must be non-zero".into()));
        }
        Ok(())
    }
}

fn default_token_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cashme")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CashMeConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = CashMeConfig {
            base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CashMeError::Config(_))));
    }

    #[test]
    fn test_rejects_relative_url() {
        let config = CashMeConfig {
            base_url: "/api".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = CashMeConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
