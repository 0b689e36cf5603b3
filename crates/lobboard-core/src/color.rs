//! Color resolution for timeline bars and cards.
//!
//! The layout engine only carries an opaque `color_key`; this module is where
//! those keys come from. Activity categories cycle through a fixed palette in
//! first-seen order, and a card status overrides the category color.

use crate::{CardStatus, Interval};
use std::collections::HashMap;

/// Bar palette, assigned to categories in first-seen order and cycled.
pub const PALETTE: [&str; 9] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6",
    "#EC4899", "#6366F1", "#14B8A6", "#F97316",
];

/// Fallback for a category that was never registered.
pub const FALLBACK_COLOR: &str = "#666";

/// Status colors for Pull-Planning cards.
pub fn status_color(status: CardStatus) -> &'static str {
    match status {
        CardStatus::Planned => "#3B82F6",
        CardStatus::Released => "#10B981",
        CardStatus::Blocked => "#EF4444",
        CardStatus::UnderReview => "#F59E0B",
    }
}

/// Stable category-to-color assignment for one render pass.
#[derive(Clone, Debug, Default)]
pub struct ColorMap {
    assigned: HashMap<String, &'static str>,
    /// Categories in first-seen order, for the legend
    order: Vec<String>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign palette colors to every category appearing in `intervals`,
    /// in first-seen order.
    pub fn from_intervals<'a>(intervals: impl IntoIterator<Item = &'a Interval>) -> Self {
        let mut map = Self::new();
        for interval in intervals {
            map.register(interval.color_group());
        }
        map
    }

    /// Register a category, assigning the next palette color on first sight.
    pub fn register(&mut self, category: &str) -> &'static str {
        if let Some(color) = self.assigned.get(category) {
            return color;
        }
        let color = PALETTE[self.order.len() % PALETTE.len()];
        self.assigned.insert(category.to_string(), color);
        self.order.push(category.to_string());
        color
    }

    /// Color for an interval: status wins over category.
    pub fn resolve(&self, interval: &Interval) -> &'static str {
        if let Some(status) = interval.status {
            return status_color(status);
        }
        self.assigned
            .get(interval.color_group())
            .copied()
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Legend entries: (category, color) in first-seen order.
    pub fn legend(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.order
            .iter()
            .map(move |c| (c.as_str(), self.assigned[c]))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn interval(label: &str, category: Option<&str>) -> Interval {
        let d = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut iv = Interval::checked("id", "g", label, d, d).unwrap();
        iv.category = category.map(String::from);
        iv
    }

    #[test]
    fn palette_assigned_in_first_seen_order() {
        let a = interval("Masonry", None);
        let b = interval("Plaster", None);
        let map = ColorMap::from_intervals([&a, &b, &a]);
        assert_eq!(map.resolve(&a), PALETTE[0]);
        assert_eq!(map.resolve(&b), PALETTE[1]);
    }

    #[test]
    fn palette_cycles_past_nine_categories() {
        let intervals: Vec<Interval> =
            (0..11).map(|i| interval(&format!("cat-{i}"), None)).collect();
        let map = ColorMap::from_intervals(&intervals);
        assert_eq!(map.resolve(&intervals[9]), PALETTE[0]);
        assert_eq!(map.resolve(&intervals[10]), PALETTE[1]);
    }

    #[test]
    fn status_overrides_category() {
        let mut iv = interval("Masonry", Some("Structure"));
        let map = ColorMap::from_intervals([&iv]);
        iv.status = Some(CardStatus::Blocked);
        assert_eq!(map.resolve(&iv), "#EF4444");
    }

    #[test]
    fn unknown_category_gets_fallback() {
        let map = ColorMap::new();
        let iv = interval("Masonry", None);
        assert_eq!(map.resolve(&iv), FALLBACK_COLOR);
    }

    #[test]
    fn legend_preserves_order() {
        let a = interval("Masonry", None);
        let b = interval("Plaster", None);
        let map = ColorMap::from_intervals([&a, &b]);
        let legend: Vec<_> = map.legend().collect();
        assert_eq!(legend, vec![("Masonry", PALETTE[0]), ("Plaster", PALETTE[1])]);
    }
}
