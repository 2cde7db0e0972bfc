//! Page Fill Analysis: how well a show's estimated height fits one page.
//!
//! # Page fill rules
//! - Fill ≤ 92%   → comfortable
//! - Fill ≤ 108%  → tight
//! - Fill > 108%  → overflow
//!
//! The ratios come from `LayoutConfig`; the percentages above are the defaults.
//! The verdict is a diagnostic. It feeds the overflow count of a book and the
//! preview report, and never changes how a show is paginated.

use serde::{Deserialize, Serialize};

use crate::layout::estimator::estimate_show;
use crate::layout::geometry::LayoutConfig;
use crate::models::Show;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    Comfortable,
    Tight,
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFillAnalysis {
    pub estimated_height: f32,
    pub available: f32,
    pub fill_ratio: f32,
    pub verdict: PageFillVerdict,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Analyzes how the whole show would fill a single page.
pub fn analyze_page_fill(show: &Show, config: &LayoutConfig) -> PageFillAnalysis {
    let estimated_height = estimate_show(show, config).total;
    fill_for_height(estimated_height, config)
}

/// Classifies an already-estimated height against the page budget.
fn fill_for_height(estimated_height: f32, config: &LayoutConfig) -> PageFillAnalysis {
    let available = config.content_height;
    let fill_ratio = estimated_height / available;

    let verdict = if estimated_height <= config.single_page_budget() {
        PageFillVerdict::Comfortable
    } else if estimated_height <= config.compact_budget() {
        PageFillVerdict::Tight
    } else {
        PageFillVerdict::Overflow
    };

    PageFillAnalysis {
        estimated_height,
        available,
        fill_ratio,
        verdict,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::default_layout_config;
    use crate::models::{Set, ShowDate, ShowHeader};

    fn make_show(sizes: &[usize]) -> Show {
        let header = ShowHeader {
            date: ShowDate::from_ymd(1972, 5, 26).unwrap(),
            further_id: None,
            venue1: "Lyceum Theatre".to_string(),
            venue2: None,
            city: "London".to_string(),
            state_or_country: "England".to_string(),
            notes: None,
        };
        let sets = sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                Set::new((i + 1).to_string(), None, vec!["Truckin'".to_string(); n]).unwrap()
            })
            .collect();
        Show::new(header, sets).unwrap()
    }

    #[test]
    fn test_comfortable_verdict() {
        let config = default_layout_config();
        // 72 + 24 + 10 × 18 = 276 → 51% fill
        let analysis = analyze_page_fill(&make_show(&[10]), &config);
        assert_eq!(analysis.verdict, PageFillVerdict::Comfortable);
        assert!((analysis.estimated_height - 276.0).abs() < 1e-3);
        assert!(analysis.fill_ratio < 0.92);
    }

    #[test]
    fn test_tight_verdict() {
        let config = default_layout_config();
        // 72 + 24 + 25 × 18 = 546 → 101% fill
        let analysis = analyze_page_fill(&make_show(&[25]), &config);
        assert_eq!(analysis.verdict, PageFillVerdict::Tight);
        assert!(analysis.fill_ratio > 1.0 && analysis.fill_ratio <= 1.08);
    }

    #[test]
    fn test_overflow_verdict() {
        let config = default_layout_config();
        // 72 + 24 + 30 × 18 = 636 → 118% fill
        let analysis = analyze_page_fill(&make_show(&[30]), &config);
        assert_eq!(analysis.verdict, PageFillVerdict::Overflow);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let config = default_layout_config();
        let at_budget = fill_for_height(config.single_page_budget(), &config);
        assert_eq!(at_budget.verdict, PageFillVerdict::Comfortable);
        let at_compact = fill_for_height(config.compact_budget(), &config);
        assert_eq!(at_compact.verdict, PageFillVerdict::Tight);
    }
}
