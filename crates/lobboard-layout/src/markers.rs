//! Timeline markers: calendar boundaries and the today line.

use chrono::{Datelike, Days, NaiveDate};
use lobboard_core::{week_label, week_monday, week_span};
use serde::{Deserialize, Serialize};

use crate::window::Window;

/// Which calendar boundaries to mark on the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerGranularity {
    /// Month starts, labeled "JAN/26" (LOB board)
    #[default]
    Month,
    /// Week Mondays, labeled "09 a 13/02" (Pull-Planning wall)
    Week,
}

/// A labeled vertical marker on the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub fraction: f64,
    /// The today line (empty label, drawn as a vertical rule)
    pub is_today: bool,
    /// Week granularity: the column containing today
    pub is_current: bool,
}

/// Calendar boundaries of the given granularity covering `window`.
///
/// Lazy and restartable; the first boundary may fall before `window.start`
/// (the month containing the start), so callers filtering to [0, 1]
/// fractions will skip it.
pub fn boundaries(
    window: Window,
    granularity: MarkerGranularity,
) -> impl Iterator<Item = NaiveDate> {
    let end = window.end;
    let first = match granularity {
        MarkerGranularity::Month => window.start.with_day(1).unwrap_or(window.start),
        MarkerGranularity::Week => week_monday(window.start),
    };
    std::iter::successors(Some(first), move |&curr| {
        // Running off the calendar ends the iterator
        let next = match granularity {
            MarkerGranularity::Month => next_month(curr)?,
            MarkerGranularity::Week => curr.checked_add_days(Days::new(7))?,
        };
        (next <= end).then_some(next)
    })
}

fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn month_label(date: NaiveDate) -> String {
    date.format("%b/%y").to_string().to_uppercase()
}

/// Boundary markers within the window plus the today line.
///
/// Only boundaries whose fraction lands in [0, 1] are emitted; the today
/// marker is omitted when today falls outside the window.
pub fn timeline_markers(
    window: Window,
    granularity: MarkerGranularity,
    today: NaiveDate,
) -> Vec<Marker> {
    let mut markers: Vec<Marker> = boundaries(window, granularity)
        .filter_map(|date| {
            let fraction = window.fraction_of(date);
            if !(0.0..=1.0).contains(&fraction) {
                return None;
            }
            let (label, is_current) = match granularity {
                MarkerGranularity::Month => (month_label(date), false),
                MarkerGranularity::Week => {
                    let (monday, _) = week_span(date);
                    let sunday = monday
                        .checked_add_days(Days::new(6))
                        .unwrap_or(NaiveDate::MAX);
                    let current = monday <= today && today <= sunday;
                    (week_label(date), current)
                }
            };
            Some(Marker { label, fraction, is_today: false, is_current })
        })
        .collect();

    if window.contains(today) {
        markers.push(Marker {
            label: String::new(),
            fraction: window.fraction_of(today),
            is_today: true,
            is_current: false,
        });
    }

    markers
}
