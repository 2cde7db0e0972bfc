//! Page geometry and layout thresholds.
//!
//! Lengths are in points (1/72 in). The figures are heuristic: they approximate
//! how tall a show renders in the book stylesheet, they do not come from font
//! metrics. Every length must use the same unit; the unit itself is arbitrary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Layout configuration
// ────────────────────────────────────────────────────────────────────────────

/// Geometry constants and thresholds shared by the estimator, the partitioner
/// and the classifier.
///
/// Fields missing from a JSON override fall back to `default_layout_config()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Usable content height of one page.
    pub content_height: f32,
    /// Date, venue and location block at the top of a show.
    pub header_height: f32,
    /// Extra allowance for the first line of show notes.
    pub notes_base_height: f32,
    /// Assumed characters per wrapped notes line.
    pub notes_chars_per_line: usize,
    /// Height of one song line.
    pub line_height: f32,
    /// Height of a set label ("Set 1", "Encore").
    pub set_label_height: f32,
    /// Vertical gap between consecutive sets.
    pub set_gap: f32,
    /// Estimated height ≤ this fraction of `content_height` fits comfortably.
    pub single_page_threshold_ratio: f32,
    /// Estimated height above this fraction is reported as overflow.
    pub compact_threshold_ratio: f32,
    /// Song lines per page used to simulate the page count of a show.
    pub page_line_capacity: usize,
    /// Hard ceiling on the song count of a multi-set page group.
    pub per_group_line_ceiling: usize,
    /// Tolerance, in songs, around the proportional per-page target.
    pub balance_slack_songs: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        default_layout_config()
    }
}

/// Returns the default layout config.
///
/// Assumes: 6" × 9" trade page, 0.75" margins all sides, so the content
/// area is 7.5" = 540pt tall. Width never enters the estimate; notes wrap
/// by `notes_chars_per_line` instead.
pub fn default_layout_config() -> LayoutConfig {
    LayoutConfig {
        content_height: 540.0,
        header_height: 72.0,
        notes_base_height: 14.0,
        notes_chars_per_line: 60,
        line_height: 18.0,
        set_label_height: 24.0,
        set_gap: 12.0,
        single_page_threshold_ratio: 0.92,
        compact_threshold_ratio: 1.08,
        page_line_capacity: 20,
        per_group_line_ceiling: 20,
        balance_slack_songs: 5,
    }
}

impl LayoutConfig {
    /// Loads a JSON override file and validates the merged result.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        let config: LayoutConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configs that would make the estimator or partitioner meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        let lengths = [
            ("content_height", self.content_height),
            ("header_height", self.header_height),
            ("notes_base_height", self.notes_base_height),
            ("line_height", self.line_height),
            ("set_label_height", self.set_label_height),
            ("set_gap", self.set_gap),
        ];
        if let Some((name, _)) = lengths.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(AppError::Validation(format!("{name} must be positive")));
        }

        if !(self.single_page_threshold_ratio > 0.0) {
            return Err(AppError::Validation(
                "single_page_threshold_ratio must be positive".to_string(),
            ));
        }
        if self.compact_threshold_ratio < self.single_page_threshold_ratio {
            return Err(AppError::Validation(
                "compact_threshold_ratio must not be below single_page_threshold_ratio".to_string(),
            ));
        }

        let counts = [
            ("notes_chars_per_line", self.notes_chars_per_line),
            ("page_line_capacity", self.page_line_capacity),
            ("per_group_line_ceiling", self.per_group_line_ceiling),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, v)| *v == 0) {
            return Err(AppError::Validation(format!("{name} must be at least 1")));
        }

        Ok(())
    }

    /// Height budget below which a show fits comfortably on one page.
    pub fn single_page_budget(&self) -> f32 {
        self.content_height * self.single_page_threshold_ratio
    }

    /// Height budget past which a single-page show is reported as overflowing.
    pub fn compact_budget(&self) -> f32 {
        self.content_height * self.compact_threshold_ratio
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
