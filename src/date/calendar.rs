use super::localized::LocalizedDate;
use super::locale::WeekStart;
use crate::error::{Error, TurnosResult};
use tracing::debug;

/// Dates shown by a month view, with the month's own bounds
#[derive(Debug, Clone)]
pub struct CalendarMonth {
    /// Every cell of the grid, whole weeks, including days of adjacent months
    pub dates: Vec<LocalizedDate>,
    pub month_start: LocalizedDate,
    pub month_end: LocalizedDate,
}

impl CalendarMonth {
    /// Whether a grid cell belongs to the month itself
    pub fn is_in_month(&self, date: &LocalizedDate) -> bool {
        is_in_current_month(date, &self.month_start)
    }

    /// The grid split into rows of seven days
    pub fn weeks(&self) -> impl Iterator<Item = &[LocalizedDate]> {
        self.dates.chunks(7)
    }
}

/// First day of the week containing `date`.
///
/// Fails when that week reaches past chrono's date range.
pub fn get_week_start(date: &LocalizedDate) -> TurnosResult<LocalizedDate> {
    let day_of_week = date.day_of_week();

    let days_to_subtract = match date.locale_config().week_starts_on() {
        WeekStart::Sunday => {
            if day_of_week == 0 {
                0
            } else {
                day_of_week
            }
        }
        WeekStart::Monday => match day_of_week {
            1 => 0,
            7 => 6,
            _ => day_of_week - 1,
        },
    };

    shift(date, -i64::from(days_to_subtract))
}

/// Last day of the week containing `date`
pub fn get_week_end(date: &LocalizedDate) -> TurnosResult<LocalizedDate> {
    let day_of_week = date.day_of_week();

    let days_to_add = match date.locale_config().week_starts_on() {
        // Week ends on Saturday
        WeekStart::Sunday => 6 - day_of_week,
        // Week ends on Sunday
        WeekStart::Monday => 7 - day_of_week,
    };

    shift(date, i64::from(days_to_add))
}

/// The seven days of the week containing `date`
pub fn get_week_dates(date: &LocalizedDate) -> TurnosResult<Vec<LocalizedDate>> {
    let week_start = get_week_start(date)?;
    (0..7).map(|offset| shift(&week_start, offset)).collect()
}

fn shift(date: &LocalizedDate, days: i64) -> TurnosResult<LocalizedDate> {
    date.checked_add_days(days)
        .ok_or_else(|| Error::DateOutOfRange {
            date: date.format_iso(),
            days,
        })
}

pub fn get_month_start(date: &LocalizedDate) -> LocalizedDate {
    date.add_days(1 - i64::from(date.day()))
}

pub fn get_month_end(date: &LocalizedDate) -> LocalizedDate {
    date.add_days(i64::from(date.days_in_month() - date.day()))
}

/// Whole-week grid covering the month of `date`.
///
/// Fails for the first and last months chrono can represent when their grid
/// would need days outside its range.
pub fn get_calendar_dates(date: &LocalizedDate) -> TurnosResult<CalendarMonth> {
    let month_start = get_month_start(date);
    let month_end = get_month_end(date);

    let grid_start = get_week_start(&month_start)?;
    let grid_end = get_week_end(&month_end)?;
    let dates = get_date_range(&grid_start, &grid_end);

    debug!(
        "Calendar grid for {}-{:02}: {} days from {} to {}",
        date.year(),
        date.month(),
        dates.len(),
        grid_start,
        grid_end
    );

    Ok(CalendarMonth {
        dates,
        month_start,
        month_end,
    })
}

/// Whether `date` falls in the same year and month as `month`
pub fn is_in_current_month(date: &LocalizedDate, month: &LocalizedDate) -> bool {
    date.year() == month.year() && date.month() == month.month()
}

/// Every calendar day from `start` to `end`, both included, bound to `start`'s
/// locale. Empty when `end` is an earlier calendar day than `start`.
///
/// The bounds are compared by calendar day, not by instant, so `end` may be
/// bound to another time zone.
pub fn get_date_range(start: &LocalizedDate, end: &LocalizedDate) -> Vec<LocalizedDate> {
    let last = end.naive_date();
    let Ok(capacity) = usize::try_from(days_between(start, end) + 1) else {
        return Vec::new();
    };

    let mut dates = Vec::with_capacity(capacity);
    let mut current = Some(start.clone());

    while let Some(date) = current {
        if date.naive_date() > last {
            break;
        }
        current = date.checked_add_days(1);
        dates.push(date);
    }

    dates
}

/// Signed number of calendar days from `start` to `end`
pub fn days_between(start: &LocalizedDate, end: &LocalizedDate) -> i64 {
    end.naive_date()
        .signed_duration_since(start.naive_date())
        .num_days()
}

/// Absolute number of calendar days between two dates
pub fn days_difference(a: &LocalizedDate, b: &LocalizedDate) -> i64 {
    days_between(a, b).abs()
}
