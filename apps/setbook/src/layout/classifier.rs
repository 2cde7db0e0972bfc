//! Layout classifier: picks SINGLE or SPREAD for a show.
//!
//! The classification is derived from the partitioner's actual output, so a
//! show is a spread exactly when it partitions into more than one page group.
//! Sizing is by song count throughout; the metric height estimate never
//! changes the layout.

use serde::{Deserialize, Serialize};

use crate::layout::geometry::LayoutConfig;
use crate::layout::partition::{to_page_friendly_set_groupings, PageGrouping};
use crate::models::Show;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    /// Fits one page.
    Single,
    /// Spread across two or more pages.
    Spread,
}

impl LayoutType {
    /// CSS class suffix used by the renderer (`show-single`, `show-spread`).
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::Single => "single",
            LayoutType::Spread => "spread",
        }
    }
}

/// A classified show: its layout tag plus the grouping it was derived from.
#[derive(Debug, Clone)]
pub struct ShowLayout<'a> {
    pub layout: LayoutType,
    pub grouping: PageGrouping<'a>,
}

/// Classifies a show and returns the page grouping the renderer must follow.
pub fn classify_layout<'a>(show: &'a Show, config: &LayoutConfig) -> ShowLayout<'a> {
    let grouping = to_page_friendly_set_groupings(show, config);
    let layout = if grouping.is_spread() {
        LayoutType::Spread
    } else {
        LayoutType::Single
    };
    ShowLayout { layout, grouping }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::default_layout_config;
    use crate::models::{Set, ShowDate, ShowHeader};
    use proptest::prelude::*;

    fn make_show(sizes: &[usize], notes: Option<&str>) -> Show {
        let header = ShowHeader {
            date: ShowDate::from_ymd(1990, 3, 29).unwrap(),
            further_id: None,
            venue1: "Nassau Coliseum".to_string(),
            venue2: None,
            city: "Uniondale".to_string(),
            state_or_country: "NY".to_string(),
            notes: notes.map(str::to_string),
        };
        let sets = sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let songs = (0..n).map(|s| format!("Song {s}")).collect();
                Set::new((i + 1).to_string(), None, songs).unwrap()
            })
            .collect();
        Show::new(header, sets).unwrap()
    }

    #[test]
    fn test_small_show_is_single() {
        let config = default_layout_config();
        let show = make_show(&[8, 7, 1], None);
        let result = classify_layout(&show, &config);
        assert_eq!(result.layout, LayoutType::Single);
        assert_eq!(result.grouping.len(), 1);
    }

    #[test]
    fn test_split_show_is_spread() {
        let config = default_layout_config();
        let show = make_show(&[8, 11, 1], None);
        let result = classify_layout(&show, &config);
        assert_eq!(result.layout, LayoutType::Spread);
        assert_eq!(result.grouping.len(), 2);
    }

    #[test]
    fn test_lone_oversized_set_is_single() {
        let config = default_layout_config();
        let show = make_show(&[25], None);
        let result = classify_layout(&show, &config);
        assert_eq!(result.grouping.len(), 1);
        assert_eq!(result.layout, LayoutType::Single);

        let huge = make_show(&[40], None);
        assert_eq!(classify_layout(&huge, &config).layout, LayoutType::Single);
    }

    #[test]
    fn test_notes_never_change_the_layout() {
        let config = default_layout_config();
        let notes = "n".repeat(400);
        let plain = make_show(&[9, 9, 1], None);
        let noted = make_show(&[9, 9, 1], Some(&notes));
        assert_eq!(classify_layout(&plain, &config).layout, LayoutType::Single);
        assert_eq!(classify_layout(&noted, &config).layout, LayoutType::Single);
    }

    #[test]
    fn test_layout_type_serializes_snake_case() {
        let json = serde_json::to_string(&LayoutType::Spread).unwrap();
        assert_eq!(json, "\"spread\"");
        assert_eq!(LayoutType::Single.as_str(), "single");
    }

    proptest! {
        #[test]
        fn single_iff_one_group(sizes in prop::collection::vec(1usize..=30, 1..=8)) {
            let config = default_layout_config();
            let show = make_show(&sizes, None);
            let result = classify_layout(&show, &config);
            prop_assert_eq!(result.layout == LayoutType::Single, result.grouping.len() == 1);
            prop_assert_eq!(result.layout == LayoutType::Spread, result.grouping.len() > 1);
        }
    }
}
