//! Row geometry: lane counts to pixels.

use serde::{Deserialize, Serialize};

/// Vertical geometry of a board row.
///
/// Defaults match the observed board: 30px lanes, 20px padding, 50px
/// minimum row, 24px bars starting 10px from the row top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMetrics {
    /// Height of one lane in pixels
    pub lane_height_px: u32,
    /// Vertical padding added below the lanes
    pub base_padding_px: u32,
    /// Minimum row height, so empty rows stay readable
    pub min_height_px: u32,
    /// Height of a bar within its lane
    pub bar_height_px: u32,
    /// Offset of the first bar from the row top
    pub bar_top_px: u32,
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            lane_height_px: 30,
            base_padding_px: 20,
            min_height_px: 50,
            bar_height_px: 24,
            bar_top_px: 10,
        }
    }
}

impl RowMetrics {
    /// Row height for a lane count, clamped to the minimum.
    pub fn row_height(&self, lane_count: usize) -> u32 {
        let stacked = lane_count as u32 * self.lane_height_px + self.base_padding_px;
        stacked.max(self.min_height_px)
    }

    /// Vertical offset of a bar in the given lane.
    pub fn bar_top(&self, lane: usize) -> u32 {
        self.bar_top_px + lane as u32 * self.lane_height_px
    }
}
