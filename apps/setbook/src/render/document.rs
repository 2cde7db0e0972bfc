//! Book-level pages and the document wrapper.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::render::escape_html;

const STYLESHEET_HREF: &str = "templates/style.css";
const FONTS_HREF: &str = "https://fonts.googleapis.com/css2?family=Crimson+Text:ital,wght@0,400;0,600;1,400&family=EB+Garamond:ital,wght@0,400;0,600;1,400&family=Playfair+Display:wght@400;700&family=Source+Sans+Pro:wght@400;600&display=swap";

/// Page flow of the whole book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookLayout {
    /// Several shows may share a page.
    #[default]
    Compact,
    /// Every show starts on a fresh page.
    Full,
}

impl BookLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookLayout::Compact => "compact",
            BookLayout::Full => "full",
        }
    }
}

impl FromStr for BookLayout {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(BookLayout::Compact),
            "full" => Ok(BookLayout::Full),
            other => Err(AppError::Validation(format!(
                "unknown book layout '{other}' (expected compact or full)"
            ))),
        }
    }
}

impl fmt::Display for BookLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn render_volume_title(title: &str, subtitle: &str, year_range: &str, show_count: usize) -> String {
    format!(
        r#"
<div class="volume-title-page">
  <h1>{}</h1>
  <p class="subtitle">{}</p>
  <p class="year-range">{}</p>
  <hr class="decorative-rule">
  <p class="show-count">{} shows</p>
</div>
"#,
        escape_html(title),
        escape_html(subtitle),
        escape_html(year_range),
        show_count
    )
}

pub fn render_year_divider(year: i32, show_count: usize) -> String {
    format!(
        r#"
<div class="year-divider">
  <h1 class="year">{year}</h1>
  <p class="show-count">{show_count} shows</p>
</div>
"#
    )
}

/// Wraps rendered content in a complete HTML document.
pub fn render_html_document(content: &str, title: &str, layout: BookLayout) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="{fonts}" rel="stylesheet">
  <link rel="stylesheet" href="{stylesheet}">
</head>
<body class="layout-{layout}">
{content}
</body>
</html>
"#,
        title = escape_html(title),
        fonts = escape_html(FONTS_HREF),
        stylesheet = STYLESHEET_HREF,
        layout = layout.as_str(),
        content = content,
    )
}
