//! Endpoint and client identity configuration.
//!
//! Every value has a default matching the public provider endpoints. Any of
//! them can be overridden through `GFOLIO_*` environment variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `GFOLIO_AUTH_URL` | [`GfolioConfig::auth_url`] |
//! | `GFOLIO_PORTFOLIOS_URL` | [`GfolioConfig::portfolios_url`] |
//! | `GFOLIO_FINANCE_URL` | [`GfolioConfig::finance_url`] |
//! | `GFOLIO_SERVICE` | [`GfolioConfig::service`] |
//! | `GFOLIO_SOURCE` | [`GfolioConfig::source`] |
//! | `GFOLIO_GDATA_VERSION` | [`GfolioConfig::gdata_version`] |
//! | `GFOLIO_AUTH_SCHEME` | [`GfolioConfig::auth_scheme`] |
//! | `GFOLIO_TIMEOUT_MS` | [`GfolioConfig::timeout_ms`] |

use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTH_URL: &str = "https://www.google.com/accounts/ClientLogin";
pub const DEFAULT_PORTFOLIOS_URL: &str =
    "https://finance.google.com/finance/feeds/default/portfolios";
pub const DEFAULT_FINANCE_URL: &str = "http://www.google.com/finance";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GfolioConfig {
    pub auth_url: String,
    pub portfolios_url: String,
    /// Base of the public quote, history, tick and financials pages.
    pub finance_url: String,
    pub service: String,
    pub source: String,
    pub gdata_version: String,
    pub auth_scheme: String,
    pub timeout_ms: u64,
}

impl Default for GfolioConfig {
    fn default() -> Self {
        Self {
            auth_url: String::from(DEFAULT_AUTH_URL),
            portfolios_url: String::from(DEFAULT_PORTFOLIOS_URL),
            finance_url: String::from(DEFAULT_FINANCE_URL),
            service: String::from("finance"),
            source: String::from("gfolio-0.1"),
            gdata_version: String::from("2"),
            auth_scheme: String::from("GoogleLogin"),
            timeout_ms: 10_000,
        }
    }
}

impl GfolioConfig {
    /// Defaults overridden by any `GFOLIO_*` variables present in the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`GfolioConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let text = |name: &str, target: &mut String| {
            if let Some(value) = lookup(name).filter(|value| !value.trim().is_empty()) {
                *target = value.trim().to_owned();
            }
        };

        text("GFOLIO_AUTH_URL", &mut config.auth_url);
        text("GFOLIO_PORTFOLIOS_URL", &mut config.portfolios_url);
        text("GFOLIO_FINANCE_URL", &mut config.finance_url);
        text("GFOLIO_SERVICE", &mut config.service);
        text("GFOLIO_SOURCE", &mut config.source);
        text("GFOLIO_GDATA_VERSION", &mut config.gdata_version);
        text("GFOLIO_AUTH_SCHEME", &mut config.auth_scheme);

        match lookup("GFOLIO_TIMEOUT_MS").map(|raw| raw.trim().parse::<u64>()) {
            Some(Ok(timeout_ms)) if timeout_ms > 0 => config.timeout_ms = timeout_ms,
            Some(_) => tracing::warn!("ignoring invalid GFOLIO_TIMEOUT_MS"),
            None => {}
        }

        config
    }

    pub fn with_portfolios_url(mut self, url: impl Into<String>) -> Self {
        self.portfolios_url = url.into();
        self
    }

    pub fn with_finance_url(mut self, url: impl Into<String>) -> Self {
        self.finance_url = url.into();
        self
    }
}
