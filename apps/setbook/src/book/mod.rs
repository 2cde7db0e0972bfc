//! Book assembler: filters shows into a volume, classifies and renders each
//! show, and writes the finished HTML document.

pub mod generator;
pub mod pdf;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::layout::page_fill::{analyze_page_fill, PageFillVerdict};
use crate::layout::{classify_layout, LayoutConfig, LayoutType};
use crate::models::Show;
use crate::render::{
    render_html_document, render_show, render_volume_title, render_year_divider, BookLayout,
};

// ────────────────────────────────────────────────────────────────────────────
// Selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Era {
    #[serde(rename = "60s")]
    Sixties,
    #[serde(rename = "70s")]
    Seventies,
    #[serde(rename = "80s")]
    Eighties,
    #[serde(rename = "90s")]
    Nineties,
}

impl Era {
    pub const ALL: [Era; 4] = [Era::Sixties, Era::Seventies, Era::Eighties, Era::Nineties];

    /// Inclusive year range covered by the era's volume.
    pub fn years(&self) -> (i32, i32) {
        match self {
            Era::Sixties => (1966, 1969),
            Era::Seventies => (1970, 1979),
            Era::Eighties => (1980, 1989),
            Era::Nineties => (1990, 1995),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Era::Sixties => "60s",
            Era::Seventies => "70s",
            Era::Eighties => "80s",
            Era::Nineties => "90s",
        }
    }
}

impl FromStr for Era {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Era::ALL
            .into_iter()
            .find(|era| era.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::Validation(format!("unknown era '{s}' (expected 60s, 70s, 80s or 90s)"))
            })
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which shows a volume contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Year(i32),
    Era(Era),
    All,
}

impl Selection {
    pub fn includes(&self, show: &Show) -> bool {
        match self {
            Selection::Year(year) => show.year() == *year,
            Selection::Era(era) => {
                let (start, end) = era.years();
                (start..=end).contains(&show.year())
            }
            Selection::All => true,
        }
    }

    /// Output file name without extension.
    pub fn file_stem(&self) -> String {
        match self {
            Selection::Year(year) => format!("gd-{year}"),
            Selection::Era(era) => format!("gd-{era}"),
            Selection::All => "gd-complete".to_string(),
        }
    }

    fn title(&self, band: &str) -> String {
        match self {
            Selection::Year(year) => format!("{band} {year}"),
            Selection::Era(era) => format!("{band}: The {}", era.as_str().to_uppercase()),
            Selection::All => format!("{band}: Complete Setlists"),
        }
    }

    fn year_range(&self, shows: &[&Show]) -> String {
        match self {
            Selection::Year(year) => year.to_string(),
            Selection::Era(era) => {
                let (start, end) = era.years();
                format!("{start}–{end}")
            }
            Selection::All => {
                let min = shows.iter().map(|s| s.year()).min();
                let max = shows.iter().map(|s| s.year()).max();
                match (min, max) {
                    (Some(min), Some(max)) if min == max => min.to_string(),
                    (Some(min), Some(max)) => format!("{min}–{max}"),
                    _ => String::new(),
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookOptions {
    pub band: String,
    pub layout: BookLayout,
    pub year_dividers: bool,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            band: "Grateful Dead".to_string(),
            layout: BookLayout::Compact,
            year_dividers: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStats {
    pub shows: usize,
    pub years: usize,
    pub single: usize,
    pub spread: usize,
    /// Show pages, counting one per page group.
    pub show_pages: usize,
    /// Single-page shows whose estimated height is past the overflow
    /// budget. Diagnostic only; the layout is not changed.
    pub overflowing: usize,
}

#[derive(Debug, Clone)]
pub struct BookOutput {
    pub html: String,
    pub stats: BookStats,
}

/// Builds the HTML book for `selection`. Returns `None` when no show matches.
pub fn assemble(
    shows: &[Show],
    selection: Selection,
    options: &BookOptions,
    config: &LayoutConfig,
) -> Option<BookOutput> {
    let selected: Vec<&Show> = shows.iter().filter(|s| selection.includes(s)).collect();
    if selected.is_empty() {
        info!(selection = ?selection, "No shows found for the selection");
        return None;
    }

    let mut by_year: BTreeMap<i32, Vec<&Show>> = BTreeMap::new();
    for show in &selected {
        by_year.entry(show.year()).or_default().push(show);
    }

    let title = selection.title(&options.band);
    let mut stats = BookStats {
        shows: selected.len(),
        years: by_year.len(),
        ..BookStats::default()
    };

    let mut parts = vec![render_volume_title(
        &options.band,
        "Complete Setlists",
        &selection.year_range(&selected),
        selected.len(),
    )];

    for (year, year_shows) in &by_year {
        if options.year_dividers && by_year.len() > 1 {
            parts.push(render_year_divider(*year, year_shows.len()));
        }
        for show in year_shows {
            let layout = classify_layout(show, config);
            match layout.layout {
                LayoutType::Single => {
                    stats.single += 1;
                    let fill = analyze_page_fill(show, config);
                    if fill.verdict == PageFillVerdict::Overflow {
                        stats.overflowing += 1;
                        warn!(
                            date = %show.date(),
                            sets = show.sets().len(),
                            fill = fill.fill_ratio,
                            "Show cannot be split and is estimated to overflow its page"
                        );
                    }
                }
                LayoutType::Spread => stats.spread += 1,
            }
            stats.show_pages += layout.grouping.len();
            parts.push(render_show(show, &layout));
        }
    }

    info!(
        title = %title,
        shows = stats.shows,
        years = stats.years,
        single = stats.single,
        spread = stats.spread,
        overflowing = stats.overflowing,
        "Assembled book"
    );

    Some(BookOutput {
        html: render_html_document(&parts.join("\n"), &title, options.layout),
        stats,
    })
}

/// Writes `<stem>.html` into `output_dir`, creating the directory if needed.
pub async fn write_book(
    output_dir: &Path,
    stem: &str,
    output: &BookOutput,
) -> Result<PathBuf, AppError> {
    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(format!("{stem}.html"));
    tokio::fs::write(&path, &output.html).await?;
    info!(path = %path.display(), "Generated");
    Ok(path)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_layout_config;
    use crate::models::{Set, ShowDate, ShowHeader};

    fn make_show(year: i32, month: u32, sizes: &[usize]) -> Show {
        let header = ShowHeader {
            date: ShowDate::from_ymd(year, month, 1).unwrap(),
            further_id: None,
            venue1: "Winterland Arena".to_string(),
            venue2: None,
            city: "San Francisco".to_string(),
            state_or_country: "CA".to_string(),
            notes: None,
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

    fn library() -> Vec<Show> {
        vec![
            make_show(1969, 2, &[6, 4]),
            make_show(1972, 5, &[8, 11, 1]),
            make_show(1972, 8, &[7, 7]),
            make_show(1977, 5, &[25]),
            make_show(1991, 6, &[9, 8, 1]),
        ]
    }

    #[test]
    fn test_era_parse_and_ranges() {
        assert_eq!("70s".parse::<Era>().unwrap(), Era::Seventies);
        assert_eq!(Era::Nineties.years(), (1990, 1995));
        assert!("00s".parse::<Era>().is_err());
    }

    #[test]
    fn test_selection_stems_and_titles() {
        assert_eq!(Selection::Year(1972).file_stem(), "gd-1972");
        assert_eq!(Selection::Era(Era::Seventies).file_stem(), "gd-70s");
        assert_eq!(Selection::All.file_stem(), "gd-complete");
        assert_eq!(
            Selection::Era(Era::Seventies).title("Grateful Dead"),
            "Grateful Dead: The 70S"
        );
    }

    #[test]
    fn test_year_volume_has_no_dividers() {
        let shows = library();
        let config = default_layout_config();
        let out = assemble(&shows, Selection::Year(1972), &BookOptions::default(), &config).unwrap();
        assert!(out.html.contains("<title>Grateful Dead 1972</title>"));
        assert_eq!(out.stats.shows, 2);
        assert_eq!(out.stats.years, 1);
        assert!(!out.html.contains("year-divider"));
        assert!(out.html.contains("<p class=\"year-range\">1972</p>"));
    }

    #[test]
    fn test_era_volume_counts_layouts() {
        let shows = library();
        let config = default_layout_config();
        let out = assemble(
            &shows,
            Selection::Era(Era::Seventies),
            &BookOptions::default(),
            &config,
        )
        .unwrap();
        assert_eq!(out.stats.shows, 3);
        assert_eq!(out.stats.years, 2);
        assert_eq!(out.stats.spread, 1);
        // [7, 7] and the unsplittable [25] both stay on one page
        assert_eq!(out.stats.single, 2);
        assert_eq!(out.stats.overflowing, 0);
        // spread contributes two pages
        assert_eq!(out.stats.show_pages, 4);
        assert_eq!(out.html.matches("class=\"year-divider\"").count(), 2);
        assert!(out.html.contains("1970–1979"));
    }

    #[test]
    fn test_complete_volume_year_range_from_data() {
        let shows = library();
        let config = default_layout_config();
        let options = BookOptions {
            year_dividers: false,
            layout: BookLayout::Full,
            ..BookOptions::default()
        };
        let out = assemble(&shows, Selection::All, &options, &config).unwrap();
        assert!(out.html.contains("1969–1991"));
        assert!(out.html.contains("<body class=\"layout-full\">"));
        assert!(!out.html.contains("year-divider"));
    }

    #[test]
    fn test_empty_selection_returns_none() {
        let shows = library();
        let config = default_layout_config();
        assert!(assemble(&shows, Selection::Year(1984), &BookOptions::default(), &config).is_none());
    }

    #[test]
    fn test_overflowing_single_page_show_is_counted() {
        let shows = vec![make_show(1977, 5, &[40]), make_show(1977, 6, &[6, 6])];
        let config = default_layout_config();
        let out = assemble(&shows, Selection::Year(1977), &BookOptions::default(), &config).unwrap();
        assert_eq!(out.stats.single, 2);
        assert_eq!(out.stats.spread, 0);
        assert_eq!(out.stats.overflowing, 1);
        assert_eq!(out.stats.show_pages, 2);
    }

    #[tokio::test]
    async fn test_write_book_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("nested").join("output");
        let output = BookOutput {
            html: "<html></html>".to_string(),
            stats: BookStats::default(),
        };
        let path = write_book(&output_dir, "gd-1977", &output).await.unwrap();
        assert_eq!(path, output_dir.join("gd-1977.html"));
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "<html></html>");
    }
}
