use crate::date::locale::{
    normalize_locale_tag, DateOrder, LocaleConfig, WeekStart, DEFAULT_LOCALE,
};
use crate::error::{env_error, TurnosResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default time zone when `TIMEZONE` is not set
pub const DEFAULT_TIMEZONE: &str = "UTC";
/// Optional config file merged over the environment
pub const DEFAULT_CONFIG_PATH: &str = "config/locale.toml";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_PATH_ENV: &str = "TURNOS_CONFIG";

/// Locale settings of the application, as loaded from the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// IANA time zone name
    pub timezone: String,
    /// BCP-47 locale tag
    pub locale: String,
    /// First day of the week; Monday when unset
    pub week_starts_on: Option<WeekStart>,
    /// Short date field order; derived from the locale when unset
    pub date_order: Option<DateOrder>,
}

/// Fields of `config/locale.toml`, all optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    timezone: Option<String>,
    locale: Option<String>,
    week_starts_on: Option<WeekStart>,
    date_order: Option<DateOrder>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            week_starts_on: None,
            date_order: None,
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the environment and the config file
    pub fn load() -> TurnosResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_env()?;

        let path = config_path();
        if path.exists() {
            info!("Loading locale configuration from {}", path.display());
            config.merge_file(&path)?;
        } else {
            debug!("No config file at {}", path.display());
        }

        Ok(config)
    }

    /// Configuration from process environment variables only
    pub fn from_env() -> TurnosResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Configuration from an arbitrary variable lookup.
    ///
    /// Reads `TIMEZONE`, `LOCALE` (falling back to `LANG`), `WEEK_STARTS_ON`
    /// and `DATE_ORDER`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> TurnosResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timezone = var("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        let locale = var("LOCALE")
            .or_else(|| var("LANG").and_then(|lang| normalize_locale_tag(&lang).ok()))
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let week_starts_on = var("WEEK_STARTS_ON")
            .map(|raw| raw.parse::<WeekStart>().map_err(|_| env_error("WEEK_STARTS_ON", &raw)))
            .transpose()?;

        let date_order = var("DATE_ORDER")
            .map(|raw| raw.parse::<DateOrder>().map_err(|_| env_error("DATE_ORDER", &raw)))
            .transpose()?;

        Ok(Self {
            timezone,
            locale,
            week_starts_on,
            date_order,
        })
    }

    /// Merge a TOML config file over the current values
    pub fn merge_file(&mut self, path: &Path) -> TurnosResult<()> {
        let content = fs::read_to_string(path)?;
        self.merge_toml(&content)
    }

    /// Merge TOML content over the current values; keys absent from it are kept
    pub fn merge_toml(&mut self, content: &str) -> TurnosResult<()> {
        let file: FileConfig = toml::from_str(content)?;

        if let Some(timezone) = file.timezone {
            self.timezone = timezone;
        }
        if let Some(locale) = file.locale {
            self.locale = locale;
        }
        if file.week_starts_on.is_some() {
            self.week_starts_on = file.week_starts_on;
        }
        if file.date_order.is_some() {
            self.date_order = file.date_order;
        }

        Ok(())
    }

    /// Validate into the [`LocaleConfig`] dates are bound to
    pub fn to_locale_config(&self) -> TurnosResult<LocaleConfig> {
        let config = LocaleConfig::new(
            &self.timezone,
            &self.locale,
            self.week_starts_on.unwrap_or_default(),
        )?;

        Ok(match self.date_order {
            Some(order) => config.with_date_order(order),
            None => config,
        })
    }
}

/// Location of the optional config file
pub fn config_path() -> PathBuf {
    env::var(CONFIG_PATH_ENV)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
