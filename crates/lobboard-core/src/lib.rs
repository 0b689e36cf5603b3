//! # lobboard-core
//!
//! Domain model and boundary validation for the lobboard timeline engine.
//!
//! This crate provides:
//! - Domain types: `ActivityRecord`, `Interval`, `Group`, `CardStatus`
//! - Boundary validation: `validate_records` (raw rows in, clean intervals out)
//! - Color resolution: `ColorMap`
//! - Error types shared across the workspace
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lobboard_core::{ActivityRecord, validate_records};
//!
//! let records = vec![
//!     ActivityRecord::new("a1", "FLOOR 1", "Masonry")
//!         .dates(
//!             NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
//!             NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
//!         ),
//! ];
//! let validated = validate_records(&records);
//! assert_eq!(validated.intervals.len(), 1);
//! assert!(validated.dropped.is_empty());
//! ```

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod color;

pub use color::{ColorMap, PALETTE};

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for an activity record / interval
pub type ActivityId = String;

/// Key identifying the row (location) an interval belongs to
pub type GroupKey = String;

// ============================================================================
// Records (wire format)
// ============================================================================

/// A raw activity row as fetched from the table store.
///
/// Dates arrive as ISO-8601 strings or null; anything unparseable is treated
/// as absent rather than failing the whole fetch. Bad rows are filtered by
/// [`validate_records`], never by the layout engine itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Unique identifier, immutable
    pub id: ActivityId,
    /// Row/group the activity belongs to (e.g., floor name)
    pub group_key: GroupKey,
    /// Display order of the group (floor order)
    #[serde(default)]
    pub group_order: i64,
    /// Display text
    pub label: String,
    /// Color grouping only; not used for layout
    #[serde(default)]
    pub category: Option<String>,
    /// Pull-Planning card status; affects color only
    #[serde(default)]
    pub status: Option<CardStatus>,
    /// Planned start date
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    /// Planned end date
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
}

impl ActivityRecord {
    /// Create a record with the given id, group and label
    pub fn new(
        id: impl Into<String>,
        group_key: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            group_key: group_key.into(),
            group_order: 0,
            label: label.into(),
            category: None,
            status: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Set both planned dates
    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Set the group display order
    pub fn order(mut self, order: i64) -> Self {
        self.group_order = order;
        self
    }

    /// Set the color category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the card status
    pub fn status(mut self, status: CardStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Deserialize a date field that may be null, an ISO date, or garbage.
///
/// The upstream store mixes `YYYY-MM-DD` and full timestamps; a value that
/// parses as neither is treated as missing so one bad row cannot take down
/// the whole board.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Parse an ISO-8601 date, tolerating a trailing time component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // Timestamps like "2026-01-05T00:00:00" carry the date in the first
    // 10 bytes. Garbage may put a char boundary anywhere, so never slice
    // blindly.
    let head = s.get(..10).unwrap_or(s);
    match NaiveDate::parse_from_str(head, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            warn!(value = s, "unparseable date, treating as missing");
            None
        }
    }
}

// ============================================================================
// Validated domain types
// ============================================================================

/// A validated, dated span placed on the timeline.
///
/// Invariant: `end >= start`. Construction goes through
/// [`validate_records`] or [`Interval::checked`], never by hand-assembling
/// an out-of-order pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub id: ActivityId,
    pub group_key: GroupKey,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Color grouping; falls back to the label when absent
    pub category: Option<String>,
    /// Card status; overrides category color when set
    pub status: Option<CardStatus>,
}

impl Interval {
    /// Build an interval, rejecting `end < start`.
    pub fn checked(
        id: impl Into<String>,
        group_key: impl Into<String>,
        label: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Option<Self> {
        if end < start {
            return None;
        }
        Some(Self {
            id: id.into(),
            group_key: group_key.into(),
            label: label.into(),
            start,
            end,
            category: None,
            status: None,
        })
    }

    /// Key used for color assignment: category when present, else label.
    pub fn color_group(&self) -> &str {
        self.category.as_deref().unwrap_or(&self.label)
    }

    /// Duration in days; a single-day interval has zero calendar span but
    /// still occupies its day.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// A named timeline row with a fixed display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub key: GroupKey,
    pub order_key: i64,
}

impl Group {
    pub fn new(key: impl Into<String>, order_key: i64) -> Self {
        Self { key: key.into(), order_key }
    }
}

// ============================================================================
// Card status
// ============================================================================

/// Pull-Planning card status. Affects rendering color only, never layout.
///
/// Serde names match the wire strings used by the planning store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    #[default]
    #[serde(rename = "Planejado")]
    Planned,
    #[serde(rename = "Em Analise")]
    UnderReview,
    #[serde(rename = "Liberado")]
    Released,
    #[serde(rename = "Bloqueado")]
    Blocked,
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardStatus::Planned => write!(f, "Planned"),
            CardStatus::UnderReview => write!(f, "Under Review"),
            CardStatus::Released => write!(f, "Released"),
            CardStatus::Blocked => write!(f, "Blocked"),
        }
    }
}

// ============================================================================
// Week buckets (Pull Planning)
// ============================================================================

/// Monday of the week containing `date`. Saturates at the calendar start.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Expand a Pull-Planning week reference into its working span, Monday
/// through Friday. Cards sharing a week fully overlap and therefore stack
/// into separate lanes.
pub fn week_span(week_ref: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = week_monday(week_ref);
    let friday = monday.checked_add_days(Days::new(4)).unwrap_or(NaiveDate::MAX);
    (monday, friday)
}

/// Header label for a week column: "DD a DD/MM" (Monday to Friday).
pub fn week_label(week_ref: NaiveDate) -> String {
    let (monday, friday) = week_span(week_ref);
    format!(
        "{:02} a {:02}/{:02}",
        monday.day(),
        friday.day(),
        friday.month()
    )
}

// ============================================================================
// Boundary validation
// ============================================================================

/// Result of validating a batch of raw records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Validated {
    /// Intervals that passed validation, in input order
    pub intervals: Vec<Interval>,
    /// Distinct groups seen across *all* records (a group whose only record
    /// was dropped still gets an empty row), in first-seen order
    pub groups: Vec<Group>,
    /// Ids of records excluded from this render pass
    pub dropped: Vec<ActivityId>,
}

impl Validated {
    /// True when there is nothing to lay out.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

/// Filter raw records into validated intervals.
///
/// Per-record data problems are never fatal: a record with a missing or
/// unparseable date, or with `end < start`, is excluded from this render
/// pass and reported in `dropped`. The remaining rows lay out normally.
pub fn validate_records(records: &[ActivityRecord]) -> Validated {
    let mut out = Validated::default();

    for record in records {
        if !out.groups.iter().any(|g| g.key == record.group_key) {
            out.groups
                .push(Group::new(record.group_key.clone(), record.group_order));
        }

        let (start, end) = match (record.start_date, record.end_date) {
            (Some(s), Some(e)) => (s, e),
            _ => {
                warn!(id = %record.id, "record missing start or end date, dropped");
                out.dropped.push(record.id.clone());
                continue;
            }
        };
        if end < start {
            warn!(id = %record.id, %start, %end, "record ends before it starts, dropped");
            out.dropped.push(record.id.clone());
            continue;
        }

        out.intervals.push(Interval {
            id: record.id.clone(),
            group_key: record.group_key.clone(),
            label: record.label.clone(),
            start,
            end,
            category: record.category.clone(),
            status: record.status,
        });
    }

    out
}

// ============================================================================
// Errors
// ============================================================================

/// Caller contract violations. Data-quality problems never surface here;
/// they are filtered at the boundary instead.
#[derive(Debug, Error)]
pub enum BoardError {
    /// `pack_lanes` was handed intervals from more than one group
    #[error("intervals from mixed groups: expected '{expected}', found '{found}'")]
    MixedGroups { expected: GroupKey, found: GroupKey },
}

// ============================================================================
// Tests
// ============================================================================
