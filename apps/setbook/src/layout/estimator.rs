//! Height estimator: maps a show's structure to an approximate vertical size.
//!
//! set    = set_label_height + songs × line_height
//! header = header_height (+ notes allowance when notes are present)
//! show   = header + Σ set + set_gap × (sets − 1)

use serde::{Deserialize, Serialize};

use crate::layout::geometry::LayoutConfig;
use crate::models::{Set, Show};

/// Per-part breakdown of an estimated height, in the config's length unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightEstimate {
    pub header: f32,
    pub sets: Vec<f32>,
    pub gaps: f32,
    pub total: f32,
}

pub fn set_height(set: &Set, config: &LayoutConfig) -> f32 {
    config.set_label_height + set.len() as f32 * config.line_height
}

/// Number of lines the notes wrap to at `notes_chars_per_line`.
pub fn notes_line_count(notes: &str, config: &LayoutConfig) -> usize {
    let chars = notes.trim().chars().count();
    if chars == 0 {
        return 0;
    }
    chars.div_ceil(config.notes_chars_per_line.max(1))
}

/// Header allowance for the first page of a show.
pub fn header_height(show: &Show, config: &LayoutConfig) -> f32 {
    let lines = show
        .notes()
        .map(|n| notes_line_count(n, config))
        .unwrap_or(0);
    if lines == 0 {
        return config.header_height;
    }
    config.header_height + config.notes_base_height + (lines - 1) as f32 * config.line_height
}

/// Estimates a run of sets under a given header allowance.
fn estimate_sets(header: f32, sets: &[Set], config: &LayoutConfig) -> HeightEstimate {
    let set_heights: Vec<f32> = sets.iter().map(|s| set_height(s, config)).collect();
    let gaps = config.set_gap * sets.len().saturating_sub(1) as f32;
    let total = header + set_heights.iter().sum::<f32>() + gaps;
    HeightEstimate {
        header,
        sets: set_heights,
        gaps,
        total,
    }
}

/// Estimated height of the whole show rendered on one page.
pub fn estimate_show(show: &Show, config: &LayoutConfig) -> HeightEstimate {
    estimate_sets(header_height(show, config), show.sets(), config)
}

/// Estimated height of one page of a spread.
///
/// Continued pages carry only the bare header (no notes).
pub fn estimate_group(
    show: &Show,
    sets: &[Set],
    continued: bool,
    config: &LayoutConfig,
) -> HeightEstimate {
    let header = if continued {
        config.header_height
    } else {
        header_height(show, config)
    };
    estimate_sets(header, sets, config)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
