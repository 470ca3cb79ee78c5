//! Day, week and month views of the shift calendar: which dates a view shows,
//! the `from`/`to` range it asks the shift API for, and how to step between views.

use crate::date::{
    format, get_calendar_dates, get_month_end, get_month_start, get_week_dates, get_week_end,
    get_week_start, LocaleConfig, LocalizedDate,
};
use crate::error::TurnosResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Kind of calendar view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Day,
    Week,
    Month,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Day => write!(f, "day"),
            ViewKind::Week => write!(f, "week"),
            ViewKind::Month => write!(f, "month"),
        }
    }
}

/// Date a view is opened at.
///
/// A missing parameter means today. An invalid one is logged and also falls
/// back to today.
pub fn resolve_view_date(param: Option<&str>, config: Option<&LocaleConfig>) -> LocalizedDate {
    let Some(raw) = param.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return LocalizedDate::now(config);
    };

    match LocalizedDate::from_iso(raw, config) {
        Ok(date) => date,
        Err(e) => {
            warn!("Ignoring date parameter '{}', showing today instead: {}", raw, e);
            LocalizedDate::now(config)
        }
    }
}

/// Anchor date of the previous view of the same kind
pub fn previous(kind: ViewKind, date: &LocalizedDate) -> LocalizedDate {
    match kind {
        ViewKind::Day => date.subtract_days(1),
        ViewKind::Week => date.subtract_days(7),
        ViewKind::Month => get_month_start(&get_month_start(date).subtract_days(1)),
    }
}

/// Anchor date of the next view of the same kind
pub fn next(kind: ViewKind, date: &LocalizedDate) -> LocalizedDate {
    match kind {
        ViewKind::Day => date.add_days(1),
        ViewKind::Week => date.add_days(7),
        ViewKind::Month => get_month_end(date).add_days(1),
    }
}

/// Everything a view needs to render and to query the shift API
#[derive(Debug, Clone)]
pub struct ViewRange {
    pub kind: ViewKind,
    /// The date the view was opened at
    pub anchor: LocalizedDate,
    /// First day whose shifts belong to the view
    pub start: LocalizedDate,
    /// Last day whose shifts belong to the view
    pub end: LocalizedDate,
    /// Cells to display; for a month view this is the whole-week grid
    pub dates: Vec<LocalizedDate>,
}

impl ViewRange {
    /// Fails only for views reaching past chrono's date range
    pub fn for_view(kind: ViewKind, anchor: LocalizedDate) -> TurnosResult<Self> {
        let (start, end, dates) = match kind {
            ViewKind::Day => (anchor.clone(), anchor.clone(), vec![anchor.clone()]),
            ViewKind::Week => (
                get_week_start(&anchor)?,
                get_week_end(&anchor)?,
                get_week_dates(&anchor)?,
            ),
            ViewKind::Month => {
                let month = get_calendar_dates(&anchor)?;
                (month.month_start, month.month_end, month.dates)
            }
        };

        debug!(
            "{} view at {}: {} to {}, {} cells",
            kind,
            anchor,
            start,
            end,
            dates.len()
        );

        Ok(Self {
            kind,
            anchor,
            start,
            end,
            dates,
        })
    }

    /// `(from, to)` as canonical ISO dates, both inclusive
    pub fn query_params(&self) -> (String, String) {
        (self.start.format_iso(), self.end.format_iso())
    }

    /// Whether a date's shifts belong to this view
    pub fn contains(&self, date: &LocalizedDate) -> bool {
        !date.is_before(&self.start) && !date.is_after(&self.end)
    }

    /// Header text in the anchor's locale
    pub fn title(&self) -> String {
        match self.kind {
            ViewKind::Day => self.anchor.format_for_display(),
            ViewKind::Week => format!(
                "{} - {}",
                self.start.format_short(),
                self.end.format_short()
            ),
            ViewKind::Month => format::month_title(
                self.start.year(),
                self.start.month(),
                format::catalog_language(self.anchor.locale_config()),
            ),
        }
    }

    pub fn previous(&self) -> TurnosResult<Self> {
        Self::for_view(self.kind, previous(self.kind, &self.anchor))
    }

    pub fn next(&self) -> TurnosResult<Self> {
        Self::for_view(self.kind, next(self.kind, &self.anchor))
    }
}
