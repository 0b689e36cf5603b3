//! Standalone HTML board renderer.
//!
//! Emits a self-contained document: a horizontally scrollable board with a
//! sticky group-label column, marker header, percentage-positioned bars,
//! today line, and a category legend. Bars and markers arrive fully
//! positioned from the layout engine; this module only turns fractions
//! into `left`/`width` percentages.

use lobboard_layout::{BoardLayout, RowLayout, RowMetrics};

use crate::{BoardRenderer, RenderError};

/// Color theme for the HTML board
#[derive(Clone, Debug)]
pub struct BoardTheme {
    pub background: String,
    pub surface: String,
    pub border: String,
    pub text: String,
    pub muted_text: String,
    pub today_line: String,
    pub current_week_bg: String,
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl BoardTheme {
    /// The board's native look: dark surfaces, orange accents.
    pub fn dark() -> Self {
        Self {
            background: "#1e1e1e".into(),
            surface: "#262626".into(),
            border: "#333".into(),
            text: "#ddd".into(),
            muted_text: "#888".into(),
            today_line: "#E37026".into(),
            current_week_bg: "rgba(227, 112, 38, 0.15)".into(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: "#ffffff".into(),
            surface: "#f8f9fa".into(),
            border: "#d0d4d9".into(),
            text: "#2c3e50".into(),
            muted_text: "#7f8c8d".into(),
            today_line: "#E37026".into(),
            current_week_bg: "rgba(227, 112, 38, 0.12)".into(),
        }
    }
}

/// HTML board renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlBoardRenderer {
    /// Board title shown in the document
    pub title: String,
    /// Minimum width of the scrollable timeline area in pixels
    pub min_chart_width: u32,
    /// Width of the sticky label column in pixels
    pub label_width: u32,
    /// Header strip height in pixels
    pub header_height: u32,
    /// Row geometry (must match the layout's metrics for bar placement)
    pub metrics: RowMetrics,
    /// Color theme
    pub theme: BoardTheme,
    /// Render the category legend below the board
    pub show_legend: bool,
}

impl Default for HtmlBoardRenderer {
    fn default() -> Self {
        Self {
            title: "Timeline".into(),
            min_chart_width: 800,
            label_width: 180,
            header_height: 40,
            metrics: RowMetrics::default(),
            theme: BoardTheme::default(),
            show_legend: true,
        }
    }
}

impl HtmlBoardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Use the light theme
    pub fn light_theme(mut self) -> Self {
        self.theme = BoardTheme::light();
        self
    }

    /// Hide the legend
    pub fn hide_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }

    fn css(&self) -> String {
        let t = &self.theme;
        format!(
            r#"        body {{ background: {bg}; color: {text}; font-family: system-ui, -apple-system, sans-serif; margin: 16px; }}
        .board-scroll {{ overflow-x: auto; border: 1px solid {border}; border-radius: 8px; background: {bg}; margin-bottom: 20px; }}
        .board-header {{ display: flex; height: {header}px; background: {surface}; border-bottom: 1px solid {border}; position: sticky; top: 0; z-index: 100; }}
        .header-spacer {{ min-width: {label}px; max-width: {label}px; position: sticky; left: 0; background: {surface}; z-index: 101; border-right: 1px solid {border}; display: flex; align-items: center; justify-content: center; font-weight: bold; color: {muted}; font-size: 0.8rem; }}
        .header-timeline {{ flex-grow: 1; position: relative; min-width: {chart}px; }}
        .axis-marker {{ position: absolute; top: 10px; font-size: 0.75rem; color: {muted}; border-left: 1px solid {border}; padding-left: 5px; height: 30px; }}
        .axis-marker.current {{ background: {current}; color: {today}; font-weight: 600; }}
        .board-row {{ display: flex; border-bottom: 1px solid {border}; position: relative; background: {bg}; }}
        .row-label {{ min-width: {label}px; max-width: {label}px; position: sticky; left: 0; background: {bg}; z-index: 50; border-right: 1px solid {border}; padding: 10px; font-size: 0.85rem; color: {text}; font-weight: 600; display: flex; align-items: center; justify-content: flex-end; text-align: right; }}
        .row-track {{ flex-grow: 1; position: relative; min-width: {chart}px; }}
        .grid-guide {{ position: absolute; top: 0; bottom: 0; border-left: 1px dashed rgba(128,128,128,0.15); pointer-events: none; }}
        .board-bar {{ position: absolute; height: {bar}px; border-radius: 4px; color: white; font-size: 0.7rem; font-weight: 500; display: flex; align-items: center; padding: 0 8px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; border: 1px solid rgba(255,255,255,0.15); }}
        .today-line {{ position: absolute; top: 0; bottom: 0; width: 2px; background: {today}; z-index: 40; pointer-events: none; }}
        .legend {{ display: flex; flex-wrap: wrap; gap: 14px; font-size: 0.8rem; }}
        .legend-item {{ display: flex; align-items: center; gap: 5px; }}
        .legend-swatch {{ width: 12px; height: 12px; border-radius: 2px; }}"#,
            bg = t.background,
            surface = t.surface,
            border = t.border,
            text = t.text,
            muted = t.muted_text,
            today = t.today_line,
            current = t.current_week_bg,
            header = self.header_height,
            label = self.label_width,
            chart = self.min_chart_width,
            bar = self.metrics.bar_height_px,
        )
    }

    fn render_header(&self, board: &BoardLayout) -> String {
        let mut out = String::new();
        out.push_str("<div class=\"board-header\">");
        out.push_str("<div class=\"header-spacer\">LOCATION</div>");
        out.push_str("<div class=\"header-timeline\">");
        for marker in &board.markers {
            let left = marker.fraction * 100.0;
            if marker.is_today {
                out.push_str(&format!(
                    "<div class=\"today-line\" style=\"left: {left:.4}%;\"></div>"
                ));
            } else {
                let class = if marker.is_current {
                    "axis-marker current"
                } else {
                    "axis-marker"
                };
                out.push_str(&format!(
                    "<div class=\"{class}\" style=\"left: {left:.4}%;\">{}</div>",
                    html_escape(&marker.label)
                ));
            }
        }
        out.push_str("</div></div>");
        out
    }

    fn render_row(&self, board: &BoardLayout, row: &RowLayout) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<div class=\"board-row\" style=\"height: {}px;\">",
            row.height_px
        ));
        out.push_str(&format!(
            "<div class=\"row-label\">{}</div>",
            html_escape(&row.group_key)
        ));
        out.push_str("<div class=\"row-track\">");

        // Grid guides repeat per row so they survive vertical scrolling
        for marker in &board.markers {
            let left = marker.fraction * 100.0;
            if marker.is_today {
                out.push_str(&format!(
                    "<div class=\"today-line\" style=\"left: {left:.4}%;\"></div>"
                ));
            } else {
                out.push_str(&format!(
                    "<div class=\"grid-guide\" style=\"left: {left:.4}%;\"></div>"
                ));
            }
        }

        for bar in &row.bars {
            if bar.left_fraction > 1.0 || bar.left_fraction + bar.width_fraction < 0.0 {
                continue;
            }
            let left = bar.left_fraction * 100.0;
            let width = bar.width_fraction * 100.0;
            let top = self.metrics.bar_top(bar.lane);
            let label = html_escape(&bar.label);
            out.push_str(&format!(
                "<div class=\"board-bar\" title=\"{label}\" style=\"left: {left:.4}%; width: {width:.4}%; top: {top}px; background-color: {color};\">{label}</div>",
                color = bar.color_key,
            ));
        }

        out.push_str("</div></div>");
        out
    }

    fn render_legend(&self, board: &BoardLayout) -> String {
        if !self.show_legend || board.legend.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        out.push_str("<div class=\"legend\">");
        for (category, color) in &board.legend {
            out.push_str(&format!(
                "<div class=\"legend-item\"><div class=\"legend-swatch\" style=\"background: {color};\"></div><span>{}</span></div>",
                html_escape(category)
            ));
        }
        out.push_str("</div>");
        out
    }
}

impl BoardRenderer for HtmlBoardRenderer {
    type Output = String;

    fn render(&self, board: &BoardLayout) -> Result<String, RenderError> {
        if board.rows.is_empty() {
            return Err(RenderError::InvalidData("No rows to render".into()));
        }

        let mut body = String::new();
        body.push_str("<div class=\"board-scroll\">");
        body.push_str(&self.render_header(board));
        for row in &board.rows {
            body.push_str(&self.render_row(board, row));
        }
        body.push_str("</div>");
        body.push_str(&self.render_legend(board));

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <h1>{title}</h1>
{body}
</body>
</html>"#,
            title = html_escape(&self.title),
            css = self.css(),
            body = body,
        ))
    }
}

/// Escape text for inclusion in HTML content and attribute values
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lobboard_core::ActivityRecord;
    use lobboard_layout::{LayoutEngine, SortDirection};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_board() -> BoardLayout {
        let records = vec![
            ActivityRecord::new("a1", "FLOOR 2", "Masonry <heavy>")
                .order(2)
                .dates(date(2026, 1, 5), date(2026, 1, 16)),
            ActivityRecord::new("a2", "FLOOR 1", "Plaster")
                .order(1)
                .dates(date(2026, 1, 8), date(2026, 1, 20)),
        ];
        LayoutEngine::new()
            .direction(SortDirection::Descending)
            .layout(&records, date(2026, 1, 10))
            .unwrap()
    }

    #[test]
    fn html_document_structure() {
        let html = HtmlBoardRenderer::new().title("LOB Board").render(&sample_board()).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("LOB Board"));
        assert!(html.contains("board-scroll"));
        assert!(html.contains("FLOOR 2"));
        assert!(html.contains("row-label"));
    }

    #[test]
    fn bars_positioned_by_percentage() {
        let html = HtmlBoardRenderer::new().render(&sample_board()).unwrap();
        assert!(html.contains("board-bar"));
        assert!(html.contains("left: "));
        assert!(html.contains("width: "));
    }

    #[test]
    fn labels_are_escaped() {
        let html = HtmlBoardRenderer::new().render(&sample_board()).unwrap();
        assert!(html.contains("Masonry &lt;heavy&gt;"));
        assert!(!html.contains("Masonry <heavy>"));
    }

    #[test]
    fn today_line_present_when_in_window() {
        let html = HtmlBoardRenderer::new().render(&sample_board()).unwrap();
        assert!(html.contains("today-line"));
    }

    #[test]
    fn legend_lists_categories_once() {
        let html = HtmlBoardRenderer::new().render(&sample_board()).unwrap();
        assert_eq!(html.matches("class=\"legend-item\"").count(), 2);
    }

    #[test]
    fn hidden_legend_omitted() {
        let html = HtmlBoardRenderer::new().hide_legend().render(&sample_board()).unwrap();
        assert!(!html.contains("class=\"legend-item\""));
    }

    #[test]
    fn empty_board_is_invalid_data() {
        let mut board = sample_board();
        board.rows.clear();
        let err = HtmlBoardRenderer::new().render(&board).unwrap_err();
        assert!(matches!(err, RenderError::InvalidData(_)));
    }

    #[test]
    fn row_heights_inline() {
        let board = sample_board();
        let html = HtmlBoardRenderer::new().render(&board).unwrap();
        for row in &board.rows {
            assert!(html.contains(&format!("height: {}px;", row.height_px)));
        }
    }
}
