use crate::config::Config;
use crate::error::{Error, TurnosResult};
use chrono::Weekday;
use chrono_tz::Tz;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};
use tracing::{info, warn};

/// Argentina time zone, kept for callers that still pin it explicitly
pub const ARGENTINA_TIMEZONE: &str = "America/Argentina/Buenos_Aires";
/// Argentina locale tag
pub const ARGENTINA_LOCALE: &str = "es-AR";
/// Locale used when nothing is configured
pub const DEFAULT_LOCALE: &str = "en-US";

lazy_static! {
    static ref GLOBAL_LOCALE_CONFIG: RwLock<LocaleConfig> = RwLock::new(LocaleConfig::detect());
}

/// First day of a displayed week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

impl WeekStart {
    /// Numeric form: 0 = Sunday, 1 = Monday
    pub fn number(self) -> u32 {
        match self {
            WeekStart::Sunday => 0,
            WeekStart::Monday => 1,
        }
    }

    pub fn first_weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

impl FromStr for WeekStart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "sun" | "sunday" => Ok(WeekStart::Sunday),
            "1" | "mon" | "monday" => Ok(WeekStart::Monday),
            other => Err(Error::Config(format!(
                "unknown week start '{}', expected monday or sunday",
                other
            ))),
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "sunday"),
            WeekStart::Monday => write!(f, "monday"),
        }
    }
}

/// Field order of the locale's short date form (`03/09/2025`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateOrder {
    /// DD/MM/YYYY
    #[serde(rename = "dmy")]
    DayMonthYear,
    /// MM/DD/YYYY
    #[serde(rename = "mdy")]
    MonthDayYear,
}

impl DateOrder {
    /// Order used when the configuration does not name one.
    ///
    /// Only `en-US` gets month-first; every other locale is day-first.
    pub fn default_for_locale(locale: &str) -> Self {
        if locale.eq_ignore_ascii_case("en-US") {
            DateOrder::MonthDayYear
        } else {
            DateOrder::DayMonthYear
        }
    }

    /// Human readable pattern, used in error messages
    pub fn pattern(self) -> &'static str {
        match self {
            DateOrder::DayMonthYear => "DD/MM/YYYY",
            DateOrder::MonthDayYear => "MM/DD/YYYY",
        }
    }
}

impl FromStr for DateOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dmy" | "dd/mm/yyyy" | "day-first" => Ok(DateOrder::DayMonthYear),
            "mdy" | "mm/dd/yyyy" | "month-first" => Ok(DateOrder::MonthDayYear),
            other => Err(Error::Config(format!(
                "unknown date order '{}', expected dmy or mdy",
                other
            ))),
        }
    }
}

/// Locale, time zone and week conventions a date is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    timezone: Tz,
    locale: String,
    week_starts_on: WeekStart,
    date_order: DateOrder,
}

impl LocaleConfig {
    /// Build a config from an IANA zone name and a BCP-47 tag.
    ///
    /// The short date order defaults from the locale, see
    /// [`DateOrder::default_for_locale`].
    pub fn new(timezone: &str, locale: &str, week_starts_on: WeekStart) -> TurnosResult<Self> {
        let timezone = parse_timezone(timezone)?;
        let locale = normalize_locale_tag(locale)?;
        let date_order = DateOrder::default_for_locale(&locale);

        Ok(Self {
            timezone,
            locale,
            week_starts_on,
            date_order,
        })
    }

    /// Preset for Argentina: Buenos Aires time, `es-AR`, weeks start on Monday
    pub fn argentina() -> Self {
        Self {
            timezone: chrono_tz::America::Argentina::Buenos_Aires,
            locale: ARGENTINA_LOCALE.to_string(),
            week_starts_on: WeekStart::Monday,
            date_order: DateOrder::DayMonthYear,
        }
    }

    /// Config detected from the process environment.
    ///
    /// Reads the same variables as [`Config::from_env`]; anything invalid is
    /// logged and replaced by [`LocaleConfig::default`].
    pub fn detect() -> Self {
        match Config::from_env().and_then(|config| config.to_locale_config()) {
            Ok(config) => config,
            Err(e) => {
                warn!("Falling back to default locale config: {}", e);
                Self::default()
            }
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_week_start(mut self, week_starts_on: WeekStart) -> Self {
        self.week_starts_on = week_starts_on;
        self
    }

    pub fn with_date_order(mut self, date_order: DateOrder) -> Self {
        self.date_order = date_order;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Language subtag of the locale (`es` for `es-AR`)
    pub fn language(&self) -> &str {
        self.locale.split('-').next().unwrap_or(&self.locale)
    }

    /// Region subtag of the locale, if any (`AR` for `es-AR`)
    pub fn region(&self) -> Option<&str> {
        self.locale
            .split('-')
            .skip(1)
            .find(|s| s.len() == 2 || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit())))
    }

    pub fn week_starts_on(&self) -> WeekStart {
        self.week_starts_on
    }

    pub fn date_order(&self) -> DateOrder {
        self.date_order
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
            locale: DEFAULT_LOCALE.to_string(),
            week_starts_on: WeekStart::Monday,
            date_order: DateOrder::MonthDayYear,
        }
    }
}

impl fmt::Display for LocaleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, week starts {}, {})",
            self.locale,
            self.timezone.name(),
            self.week_starts_on,
            self.date_order.pattern()
        )
    }
}

/// Parse an IANA time zone name
pub fn parse_timezone(name: &str) -> TurnosResult<Tz> {
    let trimmed = name.trim();
    trimmed
        .parse::<Tz>()
        .map_err(|_| Error::InvalidTimezone(trimmed.to_string()))
}

/// Normalize a BCP-47 tag or POSIX locale name into canonical casing.
///
/// `es_AR.UTF-8` becomes `es-AR`, `zh-hant-tw` becomes `zh-Hant-TW`.
pub fn normalize_locale_tag(raw: &str) -> TurnosResult<String> {
    let invalid = || Error::InvalidLocale(raw.trim().to_string());

    let base = raw
        .trim()
        .split(|c: char| c == '.' || c == '@')
        .next()
        .unwrap_or_default();
    if base.is_empty() {
        return Err(invalid());
    }

    let mut normalized = Vec::new();
    for (i, subtag) in base.split(|c: char| c == '-' || c == '_').enumerate() {
        if subtag.is_empty()
            || subtag.len() > 8
            || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(invalid());
        }

        let is_alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
        if i == 0 {
            if !is_alpha || subtag.len() < 2 {
                return Err(invalid());
            }
            normalized.push(subtag.to_ascii_lowercase());
        } else if is_alpha && subtag.len() == 2 {
            normalized.push(subtag.to_ascii_uppercase());
        } else if is_alpha && subtag.len() == 4 {
            let lower = subtag.to_ascii_lowercase();
            normalized.push(format!("{}{}", lower[..1].to_ascii_uppercase(), &lower[1..]));
        } else {
            normalized.push(subtag.to_ascii_lowercase());
        }
    }

    Ok(normalized.join("-"))
}

/// Current process-wide default config
pub fn global_locale_config() -> LocaleConfig {
    GLOBAL_LOCALE_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide default config. Last write wins.
///
/// Dates already constructed keep the config they were bound to.
pub fn set_global_locale_config(config: LocaleConfig) {
    info!("Setting default locale config to {}", config);
    *GLOBAL_LOCALE_CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner) = config;
}

/// Apply a partial change to the process-wide default config and return the result
pub fn update_global_locale_config<F>(update: F) -> LocaleConfig
where
    F: FnOnce(LocaleConfig) -> LocaleConfig,
{
    let mut guard = GLOBAL_LOCALE_CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let updated = update(guard.clone());
    info!("Updating default locale config to {}", updated);
    *guard = updated.clone();
    updated
}

/// Explicit config if given, otherwise a snapshot of the global default
pub(crate) fn resolve(config: Option<&LocaleConfig>) -> LocaleConfig {
    config.cloned().unwrap_or_else(global_locale_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_timezone_and_locale() {
        let config = LocaleConfig::new(ARGENTINA_TIMEZONE, "es_ar", WeekStart::Monday).unwrap();
        assert_eq!(config.locale(), "es-AR");
        assert_eq!(config.language(), "es");
        assert_eq!(config.region(), Some("AR"));
        assert_eq!(config.timezone(), chrono_tz::America::Argentina::Buenos_Aires);
        assert_eq!(config.date_order(), DateOrder::DayMonthYear);

        assert!(matches!(
            LocaleConfig::new("Mars/Olympus_Mons", "es-AR", WeekStart::Monday),
            Err(Error::InvalidTimezone(_))
        ));
        assert!(matches!(
            LocaleConfig::new("UTC", "", WeekStart::Monday),
            Err(Error::InvalidLocale(_))
        ));
    }

    #[test]
    fn test_normalize_locale_tag() {
        assert_eq!(normalize_locale_tag("es_AR.UTF-8").unwrap(), "es-AR");
        assert_eq!(normalize_locale_tag("EN-us").unwrap(), "en-US");
        assert_eq!(normalize_locale_tag("zh-hant-tw").unwrap(), "zh-Hant-TW");
        assert_eq!(normalize_locale_tag("es-419").unwrap(), "es-419");
        assert_eq!(normalize_locale_tag("fi_FI@euro").unwrap(), "fi-FI");

        // Invalid cases
        assert!(normalize_locale_tag("C").is_err());
        assert!(normalize_locale_tag("es--AR").is_err());
        assert!(normalize_locale_tag("12-AR").is_err());
        assert!(normalize_locale_tag("es AR").is_err());
    }

    #[test]
    fn test_date_order_defaults_from_locale() {
        let us = LocaleConfig::new("America/New_York", "en-US", WeekStart::Sunday).unwrap();
        assert_eq!(us.date_order(), DateOrder::MonthDayYear);

        let gb = LocaleConfig::new("Europe/London", "en-GB", WeekStart::Monday).unwrap();
        assert_eq!(gb.date_order(), DateOrder::DayMonthYear);

        let explicit = gb.with_date_order(DateOrder::MonthDayYear);
        assert_eq!(explicit.date_order(), DateOrder::MonthDayYear);
    }

    #[test]
    fn test_week_start_and_date_order_parsing() {
        assert_eq!("0".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
        assert_eq!("Monday".parse::<WeekStart>().unwrap(), WeekStart::Monday);
        assert!("2".parse::<WeekStart>().is_err());
        assert_eq!(WeekStart::Sunday.number(), 0);
        assert_eq!(WeekStart::Monday.first_weekday(), Weekday::Mon);

        assert_eq!("DMY".parse::<DateOrder>().unwrap(), DateOrder::DayMonthYear);
        assert_eq!("mm/dd/yyyy".parse::<DateOrder>().unwrap(), DateOrder::MonthDayYear);
        assert!("ymd".parse::<DateOrder>().is_err());
    }

    #[test]
    fn test_global_config_set_and_update() {
        set_global_locale_config(LocaleConfig::argentina());
        assert_eq!(global_locale_config(), LocaleConfig::argentina());

        let updated = update_global_locale_config(|c| c.with_week_start(WeekStart::Sunday));
        assert_eq!(updated.week_starts_on(), WeekStart::Sunday);
        assert_eq!(updated.locale(), ARGENTINA_LOCALE);
        assert_eq!(global_locale_config(), updated);

        // An explicit config always wins over the global one
        let explicit = LocaleConfig::default();
        assert_eq!(resolve(Some(&explicit)), explicit);
    }
}
