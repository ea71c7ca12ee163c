use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://ru.wikipedia.org/w/api.php";
pub const DEFAULT_TIMEZONE: &str = "Europe/Moscow";
pub const DEFAULT_USER_AGENT: &str = concat!("wiki_holidays/", env!("CARGO_PKG_VERSION"));

/// Runtime settings, overridable through `WIKI_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub timezone: String,
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: DEFAULT_API_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            concurrency: 20,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_config(Config::builder().add_source(Environment::with_prefix("WIKI")))
    }

    fn from_config(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let defaults = Settings::default();
        let settings: Settings = builder
            .set_default("api_url", defaults.api_url)?
            .set_default("timezone", defaults.timezone)?
            .set_default("concurrency", defaults.concurrency as u64)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("user_agent", defaults.user_agent)?
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        if settings.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1");
        }
        Ok(settings)
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Unknown timezone {}: {}", self.timezone, e))
    }
}
