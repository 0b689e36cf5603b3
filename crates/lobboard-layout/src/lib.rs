//! # lobboard-layout
//!
//! The timeline layout engine: places variable-duration activities into
//! non-overlapping lanes within fixed rows and maps every date to a
//! normalized horizontal position.
//!
//! This crate provides:
//! - `Window` / `WindowMode`: the visible date range and how to derive it
//! - `pack_lanes`: greedy interval-to-lane partitioning within one group
//! - `RowMetrics`: lane-count-to-pixel row geometry
//! - `markers`: month/week boundary and today markers
//! - `LayoutEngine` / `BoardLayout`: the full records-to-positions pipeline
//!
//! The engine is a pure function from (records, window mode, today) to
//! positions. It performs no I/O, holds no state between calls, and never
//! fails on bad data rows; those are filtered at the boundary by
//! `lobboard-core`.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lobboard_core::ActivityRecord;
//! use lobboard_layout::LayoutEngine;
//!
//! let records = vec![
//!     ActivityRecord::new("a1", "FLOOR 1", "Masonry").dates(
//!         NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
//!         NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
//!     ),
//! ];
//! let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
//! let board = LayoutEngine::new().layout(&records, today).unwrap();
//! assert_eq!(board.rows.len(), 1);
//! assert_eq!(board.rows[0].bars[0].lane, 0);
//! ```

pub mod board;
pub mod geometry;
pub mod lanes;
pub mod markers;
pub mod window;

pub use board::{BarLayout, BoardLayout, LayoutEngine, RowLayout, SortDirection, order_groups};
pub use geometry::RowMetrics;
pub use lanes::{lane_count, pack_lanes};
pub use markers::{Marker, MarkerGranularity, boundaries, timeline_markers};
pub use window::{Window, WindowMode};
