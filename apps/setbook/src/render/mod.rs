// Markup rendering: one page-equivalent HTML block per page group, plus the
// book-level title, divider and document wrapper pages.

pub mod document;
pub mod html;

pub use document::{render_html_document, render_volume_title, render_year_divider, BookLayout};
pub use html::render_show;

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
