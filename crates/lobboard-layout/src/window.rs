//! Visible window derivation and date-to-fraction mapping.

use chrono::{Days, NaiveDate};
use lobboard_core::{Interval, week_monday};
use serde::{Deserialize, Serialize};

/// How the visible window is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowMode {
    /// Derive from the data: min start / max end, expanded by padding days.
    /// The LOB board uses 2 days before and 5 after.
    FromData {
        pad_before_days: u64,
        pad_after_days: u64,
    },
    /// Fixed rolling window anchored to the Monday of the week
    /// `weeks_before` weeks ago, spanning `weeks_total` weeks. The
    /// Pull-Planning wall uses 4 weeks back and 16 weeks total.
    RollingWeeks {
        weeks_before: u64,
        weeks_total: u64,
    },
}

impl Default for WindowMode {
    fn default() -> Self {
        Self::FromData { pad_before_days: 2, pad_after_days: 5 }
    }
}

impl WindowMode {
    /// Pull-Planning default: 4 weeks before today through 16 weeks total.
    pub fn rolling() -> Self {
        Self::RollingWeeks { weeks_before: 4, weeks_total: 16 }
    }

    /// Resolve to a concrete window. `None` means there is nothing to
    /// display: the caller should skip layout and show a placeholder.
    pub fn resolve(self, intervals: &[Interval], today: NaiveDate) -> Option<Window> {
        match self {
            Self::FromData { pad_before_days, pad_after_days } => {
                Window::from_intervals(intervals, pad_before_days, pad_after_days)
            }
            Self::RollingWeeks { weeks_before, weeks_total } => {
                Some(Window::rolling_weeks(today, weeks_before, weeks_total))
            }
        }
    }
}

/// The visible date range mapped to the horizontal axis.
///
/// Invariant: the span is at least one day, so fraction mapping never
/// divides by zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    /// Build a window, clamping a degenerate span up to one day.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let end = if end > start {
            end
        } else {
            start.checked_add_days(Days::new(1)).unwrap_or(start)
        };
        Self { start, end }
    }

    /// Window covering all intervals, padded. `None` on empty input.
    /// Padding that would leave the calendar saturates at its bounds.
    pub fn from_intervals(
        intervals: &[Interval],
        pad_before_days: u64,
        pad_after_days: u64,
    ) -> Option<Self> {
        let min_start = intervals.iter().map(|iv| iv.start).min()?;
        let max_end = intervals.iter().map(|iv| iv.end).max()?;
        Some(Self::new(
            min_start
                .checked_sub_days(Days::new(pad_before_days))
                .unwrap_or(NaiveDate::MIN),
            max_end
                .checked_add_days(Days::new(pad_after_days))
                .unwrap_or(NaiveDate::MAX),
        ))
    }

    /// Rolling window anchored to the Monday of the week `weeks_before`
    /// weeks before `today`. Week counts that would leave the calendar
    /// saturate at its bounds.
    pub fn rolling_weeks(today: NaiveDate, weeks_before: u64, weeks_total: u64) -> Self {
        let anchor = today
            .checked_sub_days(Days::new(weeks_before.saturating_mul(7)))
            .unwrap_or(NaiveDate::MIN);
        let start = week_monday(anchor);
        let end = start
            .checked_add_days(Days::new(weeks_total.max(1).saturating_mul(7)))
            .unwrap_or(NaiveDate::MAX);
        Self::new(start, end)
    }

    /// Total days spanned; always >= 1.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }

    /// Normalized horizontal position of `date`.
    ///
    /// 0.0 at `start`, 1.0 at `end`, strictly monotonic in `date`. Dates
    /// outside the window produce fractions outside [0, 1]; clipping is the
    /// renderer's job.
    pub fn fraction_of(&self, date: NaiveDate) -> f64 {
        (date - self.start).num_days() as f64 / self.span_days() as f64
    }

    /// Fraction of a span of `days`, for bar widths.
    pub fn fraction_of_days(&self, days: i64) -> f64 {
        days as f64 / self.span_days() as f64
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
