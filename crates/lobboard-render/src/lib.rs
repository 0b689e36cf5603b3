//! # lobboard-render
//!
//! Rendering backends for lobboard timeline layouts.
//!
//! This crate provides:
//! - Standalone HTML board rendering (scrollable, sticky label column)
//! - Static SVG board rendering
//! - Plain text summary output
//! - The `BoardRenderer` trait for custom backends
//!
//! Renderers consume a computed [`BoardLayout`] only; none of them contain
//! layout logic. All positioning arrives as normalized fractions and
//! per-row pixel heights.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lobboard_layout::LayoutEngine;
//! use lobboard_render::{BoardRenderer, HtmlBoardRenderer, SvgBoardRenderer};
//!
//! let board = LayoutEngine::new().layout(&records, today).unwrap();
//!
//! let html = HtmlBoardRenderer::new().render(&board)?;
//! let svg = SvgBoardRenderer::default().render(&board)?;
//! ```

pub mod html;

pub use html::{BoardTheme, HtmlBoardRenderer};

use lobboard_layout::{BoardLayout, RowLayout, RowMetrics};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;
use thiserror::Error;

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Output rendering over a computed board layout.
pub trait BoardRenderer {
    type Output;

    /// Render a board layout to the output format
    fn render(&self, board: &BoardLayout) -> Result<Self::Output, RenderError>;
}

/// Static SVG board renderer configuration
#[derive(Clone, Debug)]
pub struct SvgBoardRenderer {
    /// Width of the timeline area (excluding labels) in pixels
    pub chart_width: u32,
    /// Width of the group label column in pixels
    pub label_width: u32,
    /// Header height in pixels
    pub header_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Row geometry (must match the layout's metrics for bar placement)
    pub metrics: RowMetrics,
    /// Background color
    pub background_color: String,
    /// Grid line color
    pub grid_color: String,
    /// Text color
    pub text_color: String,
    /// Today line color
    pub today_color: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SvgBoardRenderer {
    fn default() -> Self {
        Self {
            chart_width: 800,
            label_width: 180,
            header_height: 40,
            padding: 20,
            metrics: RowMetrics::default(),
            background_color: "#ffffff".into(),
            grid_color: "#ecf0f1".into(),
            text_color: "#2c3e50".into(),
            today_color: "#E37026".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl SvgBoardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure the label column width
    pub fn label_width(mut self, width: u32) -> Self {
        self.label_width = width;
        self
    }

    fn total_width(&self) -> u32 {
        self.padding * 2 + self.label_width + self.chart_width
    }

    fn total_height(&self, rows: &[RowLayout]) -> u32 {
        let rows_height: u32 = rows.iter().map(|r| r.height_px).sum();
        self.padding * 2 + self.header_height + rows_height
    }

    /// Convert a window fraction to an x position
    fn fraction_to_x(&self, fraction: f64) -> f64 {
        (self.padding + self.label_width) as f64 + fraction * self.chart_width as f64
    }

    /// Marker labels and grid guides along the header
    fn render_header(&self, board: &BoardLayout, chart_bottom: u32) -> Group {
        let mut group = Group::new().set("class", "header");

        let header_bg = Rectangle::new()
            .set("x", self.padding)
            .set("y", self.padding)
            .set("width", self.label_width + self.chart_width)
            .set("height", self.header_height)
            .set("fill", self.grid_color.as_str());
        group = group.add(header_bg);

        for marker in &board.markers {
            let x = self.fraction_to_x(marker.fraction);

            if marker.is_today {
                let line = Line::new()
                    .set("x1", x)
                    .set("y1", self.padding)
                    .set("x2", x)
                    .set("y2", chart_bottom)
                    .set("stroke", self.today_color.as_str())
                    .set("stroke-width", 2);
                group = group.add(line);
                continue;
            }

            let guide = Line::new()
                .set("x1", x)
                .set("y1", self.padding + self.header_height)
                .set("x2", x)
                .set("y2", chart_bottom)
                .set("stroke", self.grid_color.as_str())
                .set("stroke-width", 1)
                .set("stroke-dasharray", "4 4");
            group = group.add(guide);

            let text = Text::new(marker.label.as_str())
                .set("x", x + 4.0)
                .set("y", self.padding + self.header_height / 2 + 4)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size - 1)
                .set(
                    "font-weight",
                    if marker.is_current { "bold" } else { "normal" },
                )
                .set("fill", self.text_color.as_str());
            group = group.add(text);
        }

        group
    }

    /// One group row: label cell, row rule, and its bars
    fn render_row(&self, row: &RowLayout, row_top: u32) -> Group {
        let mut group = Group::new().set("class", "board-row");

        let label = Text::new(truncate(&row.group_key, 24))
            .set("x", self.padding + 8)
            .set("y", row_top + row.height_px / 2 + 4)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("font-weight", "bold")
            .set("fill", self.text_color.as_str());
        group = group.add(label);

        let rule = Line::new()
            .set("x1", self.padding)
            .set("y1", row_top + row.height_px)
            .set("x2", self.padding + self.label_width + self.chart_width)
            .set("y2", row_top + row.height_px)
            .set("stroke", self.grid_color.as_str())
            .set("stroke-width", 1);
        group = group.add(rule);

        for bar in &row.bars {
            // Off-window bars are the renderer's to clip
            if bar.left_fraction > 1.0 || bar.left_fraction + bar.width_fraction < 0.0 {
                continue;
            }

            let x = self.fraction_to_x(bar.left_fraction);
            let width = (bar.width_fraction * self.chart_width as f64).max(4.0);
            let y = row_top + self.metrics.bar_top(bar.lane);

            let rect = Rectangle::new()
                .set("x", x)
                .set("y", y)
                .set("width", width)
                .set("height", self.metrics.bar_height_px)
                .set("rx", 4)
                .set("ry", 4)
                .set("fill", bar.color_key.as_str());
            group = group.add(rect);

            let text = Text::new(truncate(&bar.label, 18))
                .set("x", x + 6.0)
                .set("y", y + self.metrics.bar_height_px / 2 + 4)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size - 2)
                .set("fill", "#ffffff");
            group = group.add(text);
        }

        group
    }
}

impl BoardRenderer for SvgBoardRenderer {
    type Output = String;

    fn render(&self, board: &BoardLayout) -> Result<String, RenderError> {
        if board.rows.is_empty() {
            return Err(RenderError::InvalidData("No rows to render".into()));
        }

        let width = self.total_width();
        let height = self.total_height(&board.rows);
        let chart_bottom = height - self.padding;

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.background_color.as_str());
        document = document.add(background);

        document = document.add(self.render_header(board, chart_bottom));

        let mut row_top = self.padding + self.header_height;
        for row in &board.rows {
            document = document.add(self.render_row(row, row_top));
            row_top += row.height_px;
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

/// Truncate a string to a maximum length with ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Plain text renderer for console output
#[derive(Default)]
pub struct TextRenderer;

impl BoardRenderer for TextRenderer {
    type Output = String;

    fn render(&self, board: &BoardLayout) -> Result<String, RenderError> {
        let mut out = String::new();
        out.push_str(&format!(
            "Window: {} .. {} ({} days)\n",
            board.window.start,
            board.window.end,
            board.window.span_days()
        ));
        for row in &board.rows {
            out.push_str(&format!(
                "{} [{} lane{}]\n",
                row.group_key,
                row.lane_count,
                if row.lane_count == 1 { "" } else { "s" }
            ));
            for bar in &row.bars {
                out.push_str(&format!(
                    "  lane {}: {} ({:.1}%..{:.1}%)\n",
                    bar.lane,
                    bar.label,
                    bar.left_fraction * 100.0,
                    (bar.left_fraction + bar.width_fraction) * 100.0
                ));
            }
        }
        if !board.dropped.is_empty() {
            out.push_str(&format!("dropped: {}\n", board.dropped.join(", ")));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lobboard_core::ActivityRecord;
    use lobboard_layout::LayoutEngine;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_board() -> BoardLayout {
        let records = vec![
            ActivityRecord::new("a1", "FLOOR 2", "Masonry")
                .order(2)
                .dates(date(2026, 1, 5), date(2026, 1, 16)),
            ActivityRecord::new("a2", "FLOOR 2", "Plaster")
                .order(2)
                .dates(date(2026, 1, 12), date(2026, 1, 23)),
            ActivityRecord::new("a3", "FLOOR 1", "Masonry")
                .order(1)
                .dates(date(2026, 1, 1), date(2026, 1, 9)),
        ];
        LayoutEngine::new().layout(&records, date(2026, 1, 10)).unwrap()
    }

    #[test]
    fn svg_renders_rows_and_bars() {
        let svg = SvgBoardRenderer::new().render(&sample_board()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("FLOOR 1"));
        assert!(svg.contains("FLOOR 2"));
        assert!(svg.contains("Masonry"));
    }

    #[test]
    fn svg_empty_board_is_invalid_data() {
        let mut board = sample_board();
        board.rows.clear();
        let err = SvgBoardRenderer::new().render(&board).unwrap_err();
        assert!(matches!(err, RenderError::InvalidData(_)));
    }

    #[test]
    fn svg_height_tracks_row_heights() {
        let board = sample_board();
        let renderer = SvgBoardRenderer::new();
        let rows_height: u32 = board.rows.iter().map(|r| r.height_px).sum();
        let expected = renderer.padding * 2 + renderer.header_height + rows_height;
        let svg = renderer.render(&board).unwrap();
        assert!(svg.contains(&format!("height=\"{}\"", expected)));
    }

    #[test]
    fn text_renderer_summarizes_lanes() {
        let text = TextRenderer.render(&sample_board()).unwrap();
        assert!(text.contains("FLOOR 2 [2 lanes]"));
        assert!(text.contains("FLOOR 1 [1 lane]"));
        assert!(text.contains("lane 0: Masonry"));
    }

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate("Short", 20), "Short");
        assert_eq!(truncate("This is a very long activity name", 15), "This is a ve...");
    }
}
