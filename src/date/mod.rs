//! Calendar days bound to a locale, and the week/month arithmetic the shift
//! views are built on.
//!
//! Every constructor takes an optional [`LocaleConfig`]. When it is `None` the
//! process-wide default is read once and bound to the new value. Code serving
//! several users at once should always pass an explicit config.

pub mod calendar;
pub mod format;
pub mod locale;
mod localized;

pub use calendar::{
    days_between, days_difference, get_calendar_dates, get_date_range, get_month_end,
    get_month_start, get_week_dates, get_week_end, get_week_start, is_in_current_month,
    CalendarMonth,
};
pub use locale::{
    global_locale_config, set_global_locale_config, update_global_locale_config, DateOrder,
    LocaleConfig, WeekStart, ARGENTINA_LOCALE, ARGENTINA_TIMEZONE,
};
pub use localized::{days_in_month, DateFields, LocalizedDate};

use crate::error::{format_error, TurnosResult};
use tracing::debug;

/// Today for the given config, or for the global default
pub fn get_localized_date(config: Option<&LocaleConfig>) -> LocalizedDate {
    LocalizedDate::now(config)
}

/// Today in Argentina
pub fn get_argentina_date() -> LocalizedDate {
    LocalizedDate::now(Some(&LocaleConfig::argentina()))
}

/// Strict `YYYY-MM-DD` parse
pub fn parse_date(input: &str, config: Option<&LocaleConfig>) -> TurnosResult<LocalizedDate> {
    LocalizedDate::from_iso(input, config)
}

/// Whether `input` is a real date in `YYYY-MM-DD` form
pub fn is_valid_date(input: &str, config: Option<&LocaleConfig>) -> bool {
    parse_date(input, config).is_ok()
}

/// Turn user input into canonical `YYYY-MM-DD`.
///
/// Accepts the canonical form itself or the locale's short form
/// (`DD/MM/YYYY` or `MM/DD/YYYY`).
pub fn normalize_date_input(input: &str, config: Option<&LocaleConfig>) -> TurnosResult<String> {
    let trimmed = input.trim();

    if trimmed.contains('-') {
        return Ok(LocalizedDate::from_iso(trimmed, config)?.format_iso());
    }
    if trimmed.contains('/') {
        let normalized = LocalizedDate::from_short(trimmed, config)?.format_iso();
        debug!("Normalized short date {} to {}", trimmed, normalized);
        return Ok(normalized);
    }

    Err(format_error(input))
}

/// Whether `date` is today in its own time zone
pub fn is_today(date: &LocalizedDate) -> bool {
    date.equals(&LocalizedDate::now(Some(date.locale_config())))
}

/// Whether `date` is before today in its own time zone
pub fn is_past(date: &LocalizedDate) -> bool {
    date.is_before(&LocalizedDate::now(Some(date.locale_config())))
}

/// Whether `date` is after today in its own time zone
pub fn is_future(date: &LocalizedDate) -> bool {
    date.is_after(&LocalizedDate::now(Some(date.locale_config())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_normalize_date_input() {
        let dmy = LocaleConfig::argentina();
        let mdy = LocaleConfig::argentina().with_date_order(DateOrder::MonthDayYear);

        assert_eq!(normalize_date_input("03/09/2025", Some(&dmy)).unwrap(), "2025-09-03");
        assert_eq!(normalize_date_input("03/09/2025", Some(&mdy)).unwrap(), "2025-03-09");
        assert_eq!(normalize_date_input("2025-09-03", Some(&dmy)).unwrap(), "2025-09-03");
        assert_eq!(normalize_date_input(" 2025-09-03 ", Some(&dmy)).unwrap(), "2025-09-03");

        assert!(matches!(
            normalize_date_input("invalid-date", Some(&dmy)),
            Err(Error::InvalidDateFormat(_))
        ));
        assert!(matches!(
            normalize_date_input("3 Sept 2025", Some(&dmy)),
            Err(Error::InvalidDateFormat(_))
        ));
        assert!(matches!(
            normalize_date_input("2025-02-30", Some(&dmy)),
            Err(Error::InvalidCalendarDate { .. })
        ));
    }

    #[test]
    fn test_is_valid_date() {
        let config = LocaleConfig::argentina();
        assert!(is_valid_date("2025-09-03", Some(&config)));
        assert!(!is_valid_date("2025-13-45", Some(&config)));
        assert!(!is_valid_date("03/09/2025", Some(&config)));
    }

    #[test]
    fn test_today_predicates() {
        let today = get_localized_date(Some(&LocaleConfig::argentina()));
        assert!(is_today(&today));
        assert!(!is_past(&today) && !is_future(&today));

        let yesterday = today.subtract_days(1);
        assert!(!is_today(&yesterday));
        assert!(is_past(&yesterday));
        assert!(is_future(&today.add_days(1)));

        assert!(is_today(&get_argentina_date()));
    }
}
