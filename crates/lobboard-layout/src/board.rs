//! The full records-to-positions pipeline.
//!
//! `LayoutEngine` is configured once (window mode, marker granularity, row
//! metrics, group direction) and then applied to fresh snapshots of records
//! on every render. It holds no state across calls; identical inputs always
//! produce identical `BoardLayout` output.

use std::collections::HashMap;

use chrono::NaiveDate;
use lobboard_core::{ActivityRecord, ColorMap, Group, Interval, Validated, validate_records};
use serde::{Deserialize, Serialize};

use crate::geometry::RowMetrics;
use crate::lanes::{lane_count, pack_unchecked};
use crate::markers::{Marker, MarkerGranularity, timeline_markers};
use crate::window::{Window, WindowMode};

/// Display order of groups along the vertical axis.
///
/// Both directions appear on the real boards: the LOB view lists floors
/// top-down by descending order key, the Pull-Planning wall ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Resolve the fixed display order of groups.
///
/// Stable sort by `order_key` only; names never influence the order.
/// Computed once per render, not per interval.
pub fn order_groups(groups: &[Group], direction: SortDirection) -> Vec<Group> {
    let mut ordered = groups.to_vec();
    match direction {
        SortDirection::Ascending => ordered.sort_by_key(|g| g.order_key),
        SortDirection::Descending => ordered.sort_by_key(|g| std::cmp::Reverse(g.order_key)),
    }
    ordered
}

/// A positioned bar, ready for the rendering layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub id: String,
    pub label: String,
    pub lane: usize,
    /// Normalized left edge relative to the window
    pub left_fraction: f64,
    /// Normalized width; single-day activities get a one-day width
    pub width_fraction: f64,
    /// Resolved display color
    pub color_key: String,
}

/// One group row with its packed bars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    pub group_key: String,
    pub height_px: u32,
    pub lane_count: usize,
    /// Bars in start-date order
    pub bars: Vec<BarLayout>,
}

/// Everything the rendering layer needs to draw the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub window: Window,
    /// Rows in fixed display order
    pub rows: Vec<RowLayout>,
    /// Shared header markers plus the today line
    pub markers: Vec<Marker>,
    /// Legend entries: (category, color) in first-seen order
    pub legend: Vec<(String, String)>,
    /// Ids of records excluded from this render pass
    pub dropped: Vec<String>,
}

/// The timeline layout engine.
///
/// Pure computation over in-memory data: no I/O, no retained state, safe to
/// invoke repeatedly in tight succession.
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    pub mode: WindowMode,
    pub granularity: MarkerGranularity,
    pub metrics: RowMetrics,
    pub direction: SortDirection,
}

impl LayoutEngine {
    /// LOB defaults: data-derived window, month markers, ascending groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull-Planning defaults: rolling 4-before/16-week window, week
    /// markers.
    pub fn pull_planning() -> Self {
        Self {
            mode: WindowMode::rolling(),
            granularity: MarkerGranularity::Week,
            ..Self::default()
        }
    }

    /// Set the window mode
    pub fn mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the marker granularity
    pub fn granularity(mut self, granularity: MarkerGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the row geometry
    pub fn metrics(mut self, metrics: RowMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the group display direction
    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Validate raw records and lay out the board.
    ///
    /// `None` signals "nothing to render": no valid interval survived
    /// validation and the window could not be derived. The caller shows a
    /// placeholder; this is a condition, not an error.
    pub fn layout(&self, records: &[ActivityRecord], today: NaiveDate) -> Option<BoardLayout> {
        self.layout_validated(&validate_records(records), today)
    }

    /// Lay out pre-validated intervals.
    pub fn layout_validated(&self, validated: &Validated, today: NaiveDate) -> Option<BoardLayout> {
        let window = self.mode.resolve(&validated.intervals, today)?;
        if validated.is_empty() && validated.groups.is_empty() {
            return None;
        }

        let colors = ColorMap::from_intervals(&validated.intervals);

        // Bucket by group, preserving input order within each bucket
        let mut by_group: HashMap<&str, Vec<&Interval>> = HashMap::new();
        for interval in &validated.intervals {
            by_group.entry(&interval.group_key).or_default().push(interval);
        }

        let rows = order_groups(&validated.groups, self.direction)
            .into_iter()
            .map(|group| {
                let intervals = by_group.get(group.key.as_str()).map_or(&[][..], Vec::as_slice);
                self.layout_row(&group, intervals, window, &colors)
            })
            .collect();

        Some(BoardLayout {
            window,
            rows,
            markers: timeline_markers(window, self.granularity, today),
            legend: colors
                .legend()
                .map(|(category, color)| (category.to_string(), color.to_string()))
                .collect(),
            dropped: validated.dropped.clone(),
        })
    }

    fn layout_row(
        &self,
        group: &Group,
        intervals: &[&Interval],
        window: Window,
        colors: &ColorMap,
    ) -> RowLayout {
        let assignment = pack_unchecked(intervals);
        let lanes = lane_count(&assignment);

        let mut bars: Vec<BarLayout> = intervals
            .iter()
            .zip(&assignment)
            .map(|(&interval, &lane)| BarLayout {
                id: interval.id.clone(),
                label: interval.label.clone(),
                lane,
                left_fraction: window.fraction_of(interval.start),
                width_fraction: window.fraction_of_days(interval.span_days().max(1)),
                color_key: colors.resolve(interval).to_string(),
            })
            .collect();
        bars.sort_by(|a, b| {
            a.left_fraction
                .partial_cmp(&b.left_fraction)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        RowLayout {
            group_key: group.key.clone(),
            height_px: self.metrics.row_height(lanes),
            lane_count: lanes,
            bars,
        }
    }
}
