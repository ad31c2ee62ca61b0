//! Runtime configuration read from the environment.
//!
//! Every field defaults on its own, so a bare environment yields a working
//! configuration pointed at the public provider endpoints. Values that are
//! present but malformed are a [`SportIntelError::Configuration`] error.

use std::str::FromStr;
use std::time::Duration;

use crate::cli::types::SalarySource;
use crate::error::{Result, SportIntelError};

pub const BALLDONTLIE_API_KEY_ENV_VAR: &str = "BALLDONTLIE_API_KEY";
pub const BALLDONTLIE_API_URL_ENV_VAR: &str = "BALLDONTLIE_API_URL";
pub const BALLDONTLIE_RATE_LIMIT_ENV_VAR: &str = "BALLDONTLIE_RATE_LIMIT";
pub const ODDS_API_KEY_ENV_VAR: &str = "ODDS_API_KEY";
pub const ODDS_API_URL_ENV_VAR: &str = "ODDS_API_URL";
pub const ROTOGRINDERS_API_KEY_ENV_VAR: &str = "ROTOGRINDERS_API_KEY";
pub const ROTOGRINDERS_API_URL_ENV_VAR: &str = "ROTOGRINDERS_API_URL";
pub const DRAFTKINGS_API_URL_ENV_VAR: &str = "DRAFTKINGS_API_URL";
pub const HUGGINGFACE_API_KEY_ENV_VAR: &str = "HUGGINGFACE_API_KEY";
pub const SALARY_SOURCE_ENV_VAR: &str = "SPORTINTEL_SALARY_SOURCE";
pub const SALARY_CACHE_ENV_VAR: &str = "SPORTINTEL_SALARY_CACHE";
pub const SALARY_TTL_ENV_VAR: &str = "SPORTINTEL_SALARY_TTL_MINUTES";
pub const SEED_ENV_VAR: &str = "SPORTINTEL_SEED";

/// Connection settings for one provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Requests allowed per rate-limit window.
    pub rate_limit: u32,
    pub timeout: Duration,
}

impl ProviderConfig {
    fn new(base_url: &str, rate_limit: u32, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: None,
            rate_limit,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryServiceConfig {
    /// `None` means the per-site default order.
    pub preferred_source: Option<SalarySource>,
    pub enable_cache: bool,
    pub cache_ttl_minutes: i64,
}

impl Default for SalaryServiceConfig {
    fn default() -> Self {
        Self {
            preferred_source: None,
            enable_cache: true,
            cache_ttl_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub stats: ProviderConfig,
    pub odds: ProviderConfig,
    pub rotogrinders: ProviderConfig,
    pub draftkings: ProviderConfig,
    pub huggingface_api_key: Option<String>,
    pub salary: SalaryServiceConfig,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats: ProviderConfig::new("https://api.balldontlie.io/v1", 600, 30),
            odds: ProviderConfig::new("https://api.the-odds-api.com/v4", 500, 10),
            rotogrinders: ProviderConfig::new("https://rotogrinders.com/api", 60, 15),
            draftkings: ProviderConfig::new("https://api.draftkings.com/draftgroups/v1", 30, 15),
            huggingface_api_key: None,
            salary: SalaryServiceConfig::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        config.stats.api_key = var(BALLDONTLIE_API_KEY_ENV_VAR);
        if let Some(url) = var(BALLDONTLIE_API_URL_ENV_VAR) {
            config.stats.base_url = url;
        }
        if let Some(limit) = var(BALLDONTLIE_RATE_LIMIT_ENV_VAR) {
            config.stats.rate_limit = parse_value(BALLDONTLIE_RATE_LIMIT_ENV_VAR, &limit)?;
        }

        config.odds.api_key = var(ODDS_API_KEY_ENV_VAR);
        if let Some(url) = var(ODDS_API_URL_ENV_VAR) {
            config.odds.base_url = url;
        }

        config.rotogrinders.api_key = var(ROTOGRINDERS_API_KEY_ENV_VAR);
        if let Some(url) = var(ROTOGRINDERS_API_URL_ENV_VAR) {
            config.rotogrinders.base_url = url;
        }

        if let Some(url) = var(DRAFTKINGS_API_URL_ENV_VAR) {
            config.draftkings.base_url = url;
        }

        config.huggingface_api_key = var(HUGGINGFACE_API_KEY_ENV_VAR);

        if let Some(source) = var(SALARY_SOURCE_ENV_VAR) {
            config.salary.preferred_source = parse_salary_source(&source)?;
        }
        if let Some(flag) = var(SALARY_CACHE_ENV_VAR) {
            config.salary.enable_cache = parse_bool(SALARY_CACHE_ENV_VAR, &flag)?;
        }
        if let Some(ttl) = var(SALARY_TTL_ENV_VAR) {
            let minutes: i64 = parse_value(SALARY_TTL_ENV_VAR, &ttl)?;
            if minutes < 0 {
                return Err(SportIntelError::configuration(format!(
                    "{SALARY_TTL_ENV_VAR} must not be negative, got {minutes}"
                )));
            }
            config.salary.cache_ttl_minutes = minutes;
        }

        if let Some(seed) = var(SEED_ENV_VAR) {
            config.seed = Some(parse_value(SEED_ENV_VAR, &seed)?);
        }

        Ok(config)
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| SportIntelError::configuration(format!("{name} has invalid value '{raw}'")))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SportIntelError::configuration(format!(
            "{name} has invalid value '{raw}'"
        ))),
    }
}

fn parse_salary_source(raw: &str) -> Result<Option<SalarySource>> {
    if raw.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| {
        SportIntelError::configuration(format!("{SALARY_SOURCE_ENV_VAR} has invalid value '{raw}'"))
    })
}
