use super::format;
use super::locale::{resolve, DateOrder, LocaleConfig, WeekStart};
use crate::error::{format_error, Error, TurnosResult};
use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc,
    Weekday,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref ISO_DATE: Regex =
        Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid ISO date pattern");
    static ref SHORT_DATE: Regex =
        Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("valid short date pattern");
}

/// Fields to override with [`LocalizedDate::with`]; `None` keeps the current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFields {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// A calendar day bound to the locale it is displayed in.
///
/// Values are immutable: arithmetic and field overrides return new dates that
/// keep the same [`LocaleConfig`]. Equality and ordering compare the instant of
/// local midnight in the bound time zone.
#[derive(Debug, Clone)]
pub struct LocalizedDate {
    date: NaiveDate,
    config: LocaleConfig,
}

impl LocalizedDate {
    /// Wrap a calendar day. Uses the global default config when `config` is `None`.
    pub fn from_naive(date: NaiveDate, config: Option<&LocaleConfig>) -> Self {
        Self {
            date,
            config: resolve(config),
        }
    }

    /// Today in the bound time zone
    pub fn now(config: Option<&LocaleConfig>) -> Self {
        Self::from_datetime(&Utc::now(), config)
    }

    /// Day containing the given instant, seen from the bound time zone
    pub fn from_datetime<Z: TimeZone>(datetime: &DateTime<Z>, config: Option<&LocaleConfig>) -> Self {
        let config = resolve(config);
        let date = datetime.with_timezone(&config.timezone()).date_naive();
        Self { date, config }
    }

    /// Day containing a Unix timestamp in milliseconds.
    ///
    /// Timestamps outside chrono's range saturate to its first or last date.
    pub fn from_timestamp_millis(millis: i64, config: Option<&LocaleConfig>) -> Self {
        match DateTime::<Utc>::from_timestamp_millis(millis) {
            Some(datetime) => Self::from_datetime(&datetime, config),
            None if millis < 0 => Self::from_naive(NaiveDate::MIN, config),
            None => Self::from_naive(NaiveDate::MAX, config),
        }
    }

    /// Build a date from its fields, rejecting impossible combinations
    pub fn from_ymd(year: i32, month: u32, day: u32, config: Option<&LocaleConfig>) -> TurnosResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| Self::from_naive(date, config))
            .ok_or(Error::InvalidCalendarDate { year, month, day })
    }

    /// Strict `YYYY-MM-DD` parse
    pub fn from_iso(input: &str, config: Option<&LocaleConfig>) -> TurnosResult<Self> {
        let caps = ISO_DATE.captures(input).ok_or_else(|| format_error(input))?;
        let (year, month, day) = (
            parse_field::<i32>(&caps[1], input)?,
            parse_field::<u32>(&caps[2], input)?,
            parse_field::<u32>(&caps[3], input)?,
        );
        Self::from_ymd(year, month, day, config)
    }

    /// Parse the locale's short form, `DD/MM/YYYY` or `MM/DD/YYYY` depending on
    /// the config's [`DateOrder`]
    pub fn from_short(input: &str, config: Option<&LocaleConfig>) -> TurnosResult<Self> {
        let config = resolve(config);
        let caps = SHORT_DATE.captures(input).ok_or_else(|| {
            Error::InvalidDateFormat(format!(
                "{} (expected {})",
                input,
                config.date_order().pattern()
            ))
        })?;

        let first = parse_field::<u32>(&caps[1], input)?;
        let second = parse_field::<u32>(&caps[2], input)?;
        let year = parse_field::<i32>(&caps[3], input)?;
        let (month, day) = match config.date_order() {
            DateOrder::DayMonthYear => (second, first),
            DateOrder::MonthDayYear => (first, second),
        };

        Self::from_ymd(year, month, day, Some(&config))
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Month, 1-12
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Day of the week following the configured week start:
    /// 1 (Monday) to 7 (Sunday), or 0 (Sunday) to 6 (Saturday)
    pub fn day_of_week(&self) -> u32 {
        match self.config.week_starts_on() {
            WeekStart::Monday => self.date.weekday().number_from_monday(),
            WeekStart::Sunday => self.date.weekday().num_days_from_sunday(),
        }
    }

    /// Number of days in this date's month, 28-31
    pub fn days_in_month(&self) -> u32 {
        month_length(self.date)
    }

    pub fn naive_date(&self) -> NaiveDate {
        self.date
    }

    pub fn locale_config(&self) -> &LocaleConfig {
        &self.config
    }

    /// First instant of this day in the bound time zone.
    ///
    /// When midnight falls into a DST gap, the first valid instant after it.
    pub fn midnight_instant(&self) -> DateTime<Utc> {
        let tz = self.config.timezone();
        let midnight = self.date.and_time(NaiveTime::MIN);

        match tz.from_local_datetime(&midnight) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
            LocalResult::None => {
                // The gap starts at local midnight under the previous offset
                let before = midnight.checked_sub_signed(Duration::days(1)).unwrap_or(midnight);
                let offset = tz.offset_from_utc_datetime(&before).fix().local_minus_utc();
                let utc = midnight
                    .checked_sub_signed(Duration::seconds(i64::from(offset)))
                    .unwrap_or(midnight);
                Utc.from_utc_datetime(&utc)
            }
        }
    }

    /// Milliseconds since the Unix epoch at local midnight
    pub fn timestamp_millis(&self) -> i64 {
        self.midnight_instant().timestamp_millis()
    }

    /// Canonical `YYYY-MM-DD`, independent of the locale
    pub fn format_iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }

    /// Long form in the bound locale, e.g. `miércoles, 3 de septiembre de 2025`
    pub fn format_for_display(&self) -> String {
        let lang = format::catalog_language(&self.config);
        format::long_date(self.weekday(), self.year(), self.month(), self.day(), lang)
    }

    /// Weekday, day and month name in the bound locale, without the year
    pub fn format_short(&self) -> String {
        let lang = format::catalog_language(&self.config);
        format::short_date(self.weekday(), self.month(), self.day(), lang)
    }

    pub fn day_name(&self) -> String {
        format::day_name(self.weekday(), format::catalog_language(&self.config))
    }

    pub fn month_name(&self) -> String {
        format::month_name(self.month(), format::catalog_language(&self.config))
    }

    /// Shift by whole calendar days, or `None` past chrono's date range
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        let shifted = Duration::try_days(days).and_then(|delta| self.date.checked_add_signed(delta))?;
        Some(self.rebind(shifted))
    }

    /// Shift by whole calendar days. Saturates at chrono's first and last date.
    pub fn add_days(&self, days: i64) -> Self {
        self.checked_add_days(days).unwrap_or_else(|| {
            self.rebind(if days < 0 {
                NaiveDate::MIN
            } else {
                NaiveDate::MAX
            })
        })
    }

    pub fn subtract_days(&self, days: i64) -> Self {
        self.add_days(days.saturating_neg())
    }

    /// Order by the instant of local midnight
    pub fn compare(&self, other: &Self) -> Ordering {
        self.midnight_instant().cmp(&other.midnight_instant())
    }

    pub fn equals(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// Override some fields, keeping the rest and the locale binding
    pub fn with(&self, fields: DateFields) -> TurnosResult<Self> {
        let year = fields.year.unwrap_or_else(|| self.year());
        let month = fields.month.unwrap_or_else(|| self.month());
        let day = fields.day.unwrap_or_else(|| self.day());

        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| self.rebind(date))
            .ok_or(Error::InvalidFieldOverride { year, month, day })
    }

    /// Same calendar day in this date's locale. Callers guarantee validity.
    pub(crate) fn rebind(&self, date: NaiveDate) -> Self {
        Self {
            date,
            config: self.config.clone(),
        }
    }
}

fn parse_field<T: FromStr>(digits: &str, input: &str) -> TurnosResult<T> {
    digits.parse::<T>().map_err(|_| format_error(input))
}

/// Days in a month of the proleptic Gregorian calendar, `None` for an
/// impossible month or a year outside chrono's range
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(month_length)
}

fn month_length(date: NaiveDate) -> u32 {
    match date.month() {
        2 if NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl PartialEq for LocalizedDate {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for LocalizedDate {}

impl PartialOrd for LocalizedDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalizedDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for LocalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl FromStr for LocalizedDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso(s, None)
    }
}

impl Serialize for LocalizedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for LocalizedDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_iso(&raw, None).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn argentina() -> LocaleConfig {
        LocaleConfig::argentina()
    }

    fn date(iso: &str) -> LocalizedDate {
        LocalizedDate::from_iso(iso, Some(&argentina())).unwrap()
    }

    #[test]
    fn test_from_iso() {
        let d = date("2025-09-03");
        assert_eq!((d.year(), d.month(), d.day()), (2025, 9, 3));
        assert_eq!(d.format_iso(), "2025-09-03");

        // Well formed but impossible
        assert!(matches!(
            LocalizedDate::from_iso("2025-13-45", Some(&argentina())),
            Err(Error::InvalidCalendarDate { year: 2025, month: 13, day: 45 })
        ));
        assert!(matches!(
            LocalizedDate::from_iso("2025-02-30", Some(&argentina())),
            Err(Error::InvalidCalendarDate { .. })
        ));

        // Malformed
        for input in ["2025-9-3", "03/09/2025", "2025-09-03T00:00", " 2025-09-03", "invalid-date", ""] {
            assert!(
                matches!(
                    LocalizedDate::from_iso(input, Some(&argentina())),
                    Err(Error::InvalidDateFormat(_))
                ),
                "{input} should be rejected as malformed"
            );
        }
    }

    #[test]
    fn test_from_short_follows_date_order() {
        let dmy = argentina();
        let mdy = argentina().with_date_order(DateOrder::MonthDayYear);

        assert_eq!(LocalizedDate::from_short("03/09/2025", Some(&dmy)).unwrap().format_iso(), "2025-09-03");
        assert_eq!(LocalizedDate::from_short("03/09/2025", Some(&mdy)).unwrap().format_iso(), "2025-03-09");
        assert_eq!(LocalizedDate::from_short("3/9/2025", Some(&dmy)).unwrap().format_iso(), "2025-09-03");

        assert!(matches!(
            LocalizedDate::from_short("31/02/2025", Some(&dmy)),
            Err(Error::InvalidCalendarDate { .. })
        ));
        assert!(matches!(
            LocalizedDate::from_short("03-09-2025", Some(&dmy)),
            Err(Error::InvalidDateFormat(_))
        ));
        assert!(matches!(
            LocalizedDate::from_short("03/09/25", Some(&dmy)),
            Err(Error::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_from_datetime_truncates_in_bound_timezone() {
        // 02:00 UTC is still the previous evening in Buenos Aires (UTC-3)
        let instant = Utc.with_ymd_and_hms(2025, 9, 3, 2, 0, 0).unwrap();
        let d = LocalizedDate::from_datetime(&instant, Some(&argentina()));
        assert_eq!(d.format_iso(), "2025-09-02");

        let utc = LocaleConfig::default();
        let d = LocalizedDate::from_datetime(&instant, Some(&utc));
        assert_eq!(d.format_iso(), "2025-09-03");

        let d = LocalizedDate::from_timestamp_millis(instant.timestamp_millis(), Some(&utc));
        assert_eq!(d.format_iso(), "2025-09-03");
        assert_eq!(
            d.timestamp_millis(),
            Utc.with_ymd_and_hms(2025, 9, 3, 0, 0, 0).unwrap().timestamp_millis()
        );
    }

    #[test]
    fn test_day_of_week_depends_on_week_start() {
        let monday_first = date("2025-09-07");
        assert_eq!(monday_first.weekday(), Weekday::Sun);
        assert_eq!(monday_first.day_of_week(), 7);
        assert_eq!(date("2025-09-01").day_of_week(), 1);

        let sunday_first = LocalizedDate::from_iso(
            "2025-09-07",
            Some(&argentina().with_week_start(WeekStart::Sunday)),
        )
        .unwrap();
        assert_eq!(sunday_first.day_of_week(), 0);
        assert_eq!(sunday_first.add_days(6).day_of_week(), 6);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(date("2024-02-10").days_in_month(), 29);
        assert_eq!(date("2025-02-10").days_in_month(), 28);
        assert_eq!(date("1900-02-01").days_in_month(), 28);
        assert_eq!(date("2000-02-01").days_in_month(), 29);
        assert_eq!(date("2025-04-30").days_in_month(), 30);
        assert_eq!(date("2025-12-31").days_in_month(), 31);
    }

    #[test]
    fn test_days_in_month_by_fields() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 12), Some(31));
        assert_eq!(days_in_month(2025, 0), None);
        assert_eq!(days_in_month(2025, 13), None);
        assert_eq!(days_in_month(i32::MAX, 12), None);

        let last = LocalizedDate::from_naive(NaiveDate::MAX, Some(&argentina()));
        assert_eq!(last.days_in_month(), 31);
    }

    #[test]
    fn test_add_and_subtract_days() {
        let d = date("2025-09-03");
        assert_eq!(d.add_days(5).format_iso(), "2025-09-08");
        assert_eq!(d.subtract_days(2).format_iso(), "2025-09-01");
        assert_eq!(d.add_days(29).format_iso(), "2025-10-02");
        assert_eq!(date("2024-12-31").add_days(1).format_iso(), "2025-01-01");

        for n in [-400, -31, -1, 0, 1, 7, 365, 10_000] {
            assert_eq!(d.add_days(n).subtract_days(n), d);
        }

        assert!(d.checked_add_days(i64::MAX).is_none());
        assert_eq!(d.add_days(i64::MAX).naive_date(), NaiveDate::MAX);
        assert_eq!(d.subtract_days(i64::MIN).naive_date(), NaiveDate::MAX);
    }

    #[test]
    fn test_add_days_across_dst() {
        // New York springs forward on 2025-03-09
        let new_york = LocaleConfig::new("America/New_York", "en-US", WeekStart::Sunday).unwrap();
        let d = LocalizedDate::from_iso("2025-03-08", Some(&new_york)).unwrap();
        let next = d.add_days(1);
        assert_eq!(next.format_iso(), "2025-03-09");
        assert_eq!(next.add_days(1).format_iso(), "2025-03-10");

        // That day is only 23 hours long
        let span = next.add_days(1).midnight_instant() - next.midnight_instant();
        assert_eq!(span, Duration::hours(23));
    }

    #[test]
    fn test_midnight_in_dst_gap() {
        // Santiago skipped 00:00-01:00 local time on 2024-09-08
        let santiago = LocaleConfig::new("America/Santiago", "es-CL", WeekStart::Monday).unwrap();
        let d = LocalizedDate::from_iso("2024-09-08", Some(&santiago)).unwrap();
        let first = d.midnight_instant().with_timezone(&santiago.timezone());
        assert_eq!(first.date_naive(), d.naive_date());
        assert_eq!(first.format("%H:%M").to_string(), "01:00");
        assert!(d.subtract_days(1).is_before(&d));
    }

    #[test]
    fn test_compare() {
        let d1 = date("2025-09-03");
        let d2 = date("2025-09-04");
        let d3 = date("2025-09-03");

        assert_eq!(d1.compare(&d2), Ordering::Less);
        assert_eq!(d2.compare(&d1), Ordering::Greater);
        assert_eq!(d1.compare(&d3), Ordering::Equal);
        assert!(d1.is_before(&d2) && d2.is_after(&d1) && d1.equals(&d3));
        assert!(d1 < d2);

        // Same calendar day, different zones: Tokyo midnight comes first
        let tokyo = argentina().with_timezone(Tz::Asia__Tokyo);
        let in_tokyo = LocalizedDate::from_iso("2025-09-03", Some(&tokyo)).unwrap();
        assert!(in_tokyo.is_before(&d1));
    }

    #[test]
    fn test_with_revalidates() {
        let d = date("2025-01-31");
        assert_eq!(
            d.with(DateFields { day: Some(1), ..Default::default() }).unwrap().format_iso(),
            "2025-01-01"
        );
        assert_eq!(
            d.with(DateFields { year: Some(2024), month: Some(3), day: None }).unwrap().format_iso(),
            "2024-03-31"
        );
        assert!(matches!(
            d.with(DateFields { month: Some(2), ..Default::default() }),
            Err(Error::InvalidFieldOverride { year: 2025, month: 2, day: 31 })
        ));
        assert!(d.with(DateFields { month: Some(13), ..Default::default() }).is_err());

        let copy = d.clone();
        assert_eq!(copy, d);
        assert_eq!(copy.locale_config(), d.locale_config());
    }

    #[test]
    fn test_formatting_uses_bound_locale() {
        let d = date("2025-09-03");
        assert_eq!(d.format_for_display(), "miércoles, 3 de septiembre de 2025");
        assert_eq!(d.format_short(), "miércoles, 3 de septiembre");
        assert_eq!(d.day_name(), "miércoles");
        assert_eq!(d.month_name(), "septiembre");
        assert_eq!(d.to_string(), "2025-09-03");

        let us = LocaleConfig::new("America/New_York", "en-US", WeekStart::Sunday).unwrap();
        let d = LocalizedDate::from_iso("2025-09-03", Some(&us)).unwrap();
        assert_eq!(d.format_for_display(), "Wednesday, September 3, 2025");
    }

    #[test]
    fn test_iso_is_zero_padded() {
        let d = LocalizedDate::from_ymd(12, 1, 5, Some(&argentina())).unwrap();
        assert_eq!(d.format_iso(), "0012-01-05");
        assert_eq!(d.format_iso().len(), 10);
    }

    #[test]
    fn test_serializes_as_iso_string() {
        let d = date("2025-09-03");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2025-09-03\"");

        let parsed: LocalizedDate = serde_json::from_str("\"2025-09-03\"").unwrap();
        assert_eq!(parsed.format_iso(), "2025-09-03");
        assert!(serde_json::from_str::<LocalizedDate>("\"2025-02-30\"").is_err());
    }
}
