use super::locale::LocaleConfig;
use chrono::Weekday;
use rust_i18n::t;

/// Languages with a translation catalog under `locales/`
pub const SUPPORTED_LANGUAGES: [&str; 3] = ["en", "es", "fi"];

/// Catalog used for a config: its language subtag when supported, English otherwise
pub fn catalog_language(config: &LocaleConfig) -> &'static str {
    let language = config.language();
    SUPPORTED_LANGUAGES
        .iter()
        .copied()
        .find(|supported| *supported == language)
        .unwrap_or("en")
}

/// Localized weekday name
pub fn day_name(weekday: Weekday, lang: &str) -> String {
    match weekday {
        Weekday::Mon => t!("weekday.monday", locale = lang),
        Weekday::Tue => t!("weekday.tuesday", locale = lang),
        Weekday::Wed => t!("weekday.wednesday", locale = lang),
        Weekday::Thu => t!("weekday.thursday", locale = lang),
        Weekday::Fri => t!("weekday.friday", locale = lang),
        Weekday::Sat => t!("weekday.saturday", locale = lang),
        Weekday::Sun => t!("weekday.sunday", locale = lang),
    }
    .to_string()
}

/// Stand-alone month name, as used in a month header
pub fn month_name(month: u32, lang: &str) -> String {
    match month {
        1 => t!("month.january", locale = lang),
        2 => t!("month.february", locale = lang),
        3 => t!("month.march", locale = lang),
        4 => t!("month.april", locale = lang),
        5 => t!("month.may", locale = lang),
        6 => t!("month.june", locale = lang),
        7 => t!("month.july", locale = lang),
        8 => t!("month.august", locale = lang),
        9 => t!("month.september", locale = lang),
        10 => t!("month.october", locale = lang),
        11 => t!("month.november", locale = lang),
        12 => t!("month.december", locale = lang),
        _ => return month.to_string(),
    }
    .to_string()
}

/// Month name as it appears inside a full date.
///
/// Differs from [`month_name`] in languages that inflect it (Finnish `syyskuuta`).
pub fn month_name_in_date(month: u32, lang: &str) -> String {
    match month {
        1 => t!("month_in_date.january", locale = lang),
        2 => t!("month_in_date.february", locale = lang),
        3 => t!("month_in_date.march", locale = lang),
        4 => t!("month_in_date.april", locale = lang),
        5 => t!("month_in_date.may", locale = lang),
        6 => t!("month_in_date.june", locale = lang),
        7 => t!("month_in_date.july", locale = lang),
        8 => t!("month_in_date.august", locale = lang),
        9 => t!("month_in_date.september", locale = lang),
        10 => t!("month_in_date.october", locale = lang),
        11 => t!("month_in_date.november", locale = lang),
        12 => t!("month_in_date.december", locale = lang),
        _ => return month.to_string(),
    }
    .to_string()
}

/// Weekday, day, month and year
pub fn long_date(weekday: Weekday, year: i32, month: u32, day: u32, lang: &str) -> String {
    t!(
        "date.long",
        locale = lang,
        weekday = day_name(weekday, lang),
        day = day,
        month = month_name_in_date(month, lang),
        year = year
    )
    .to_string()
}

/// Weekday, day and month, without the year
pub fn short_date(weekday: Weekday, month: u32, day: u32, lang: &str) -> String {
    t!(
        "date.short",
        locale = lang,
        weekday = day_name(weekday, lang),
        day = day,
        month = month_name_in_date(month, lang)
    )
    .to_string()
}

/// Month and year header of a month view
pub fn month_title(year: i32, month: u32, lang: &str) -> String {
    t!(
        "date.month_title",
        locale = lang,
        month = month_name(month, lang),
        year = year
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::locale::WeekStart;

    #[test]
    fn test_catalog_language_falls_back_to_english() {
        assert_eq!(catalog_language(&LocaleConfig::argentina()), "es");
        let german = LocaleConfig::new("Europe/Berlin", "de-DE", WeekStart::Monday).unwrap();
        assert_eq!(catalog_language(&german), "en");
    }

    #[test]
    fn test_names() {
        assert_eq!(day_name(Weekday::Wed, "es"), "miércoles");
        assert_eq!(day_name(Weekday::Sun, "en"), "Sunday");
        assert_eq!(month_name(9, "es"), "septiembre");
        assert_eq!(month_name(9, "fi"), "syyskuu");
        assert_eq!(month_name_in_date(9, "fi"), "syyskuuta");
        assert_eq!(month_name(13, "en"), "13");
    }

    #[test]
    fn test_long_and_short_dates() {
        assert_eq!(
            long_date(Weekday::Wed, 2025, 9, 3, "es"),
            "miércoles, 3 de septiembre de 2025"
        );
        assert_eq!(
            long_date(Weekday::Wed, 2025, 9, 3, "en"),
            "Wednesday, September 3, 2025"
        );
        assert_eq!(
            long_date(Weekday::Wed, 2025, 9, 3, "fi"),
            "keskiviikko 3. syyskuuta 2025"
        );
        assert_eq!(short_date(Weekday::Wed, 9, 3, "es"), "miércoles, 3 de septiembre");
        assert_eq!(short_date(Weekday::Wed, 9, 3, "en"), "Wednesday, September 3");
        assert_eq!(month_title(2025, 9, "es"), "septiembre de 2025");
        assert_eq!(month_title(2025, 9, "en"), "September 2025");
    }
}
