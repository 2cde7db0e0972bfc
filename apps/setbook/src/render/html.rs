//! Show → HTML. Consumes the classifier's output and emits one `<article>` per
//! page group; groups after the first get the "continued" header.

use crate::layout::{LayoutType, PageGroup, ShowLayout};
use crate::models::{format_song, Set, Show};
use crate::render::escape_html;

/// Renders a classified show as one or more page-sized articles.
pub fn render_show(show: &Show, layout: &ShowLayout<'_>) -> String {
    let total = layout.grouping.len();
    layout
        .grouping
        .iter()
        .map(|group| render_group(show, layout.layout, group, total))
        .collect::<Vec<_>>()
        .join("\n")
}

fn article_classes(layout: LayoutType, group: &PageGroup<'_>) -> String {
    let mut classes = format!("show show-{}", layout.as_str());
    if group.is_continuation() {
        classes.push_str(" show-continued");
    }
    classes
}

fn render_group(show: &Show, layout: LayoutType, group: &PageGroup<'_>, total: usize) -> String {
    let mut html = String::new();

    let page_attr = if layout == LayoutType::Spread {
        format!(" data-page=\"{}/{}\"", group.index + 1, total)
    } else {
        String::new()
    };
    html.push_str(&format!(
        "<article class=\"{}\"{}>\n",
        article_classes(layout, group),
        page_attr
    ));

    if group.is_continuation() {
        render_continued_header(&mut html, show);
    } else {
        render_full_header(&mut html, show);
    }

    html.push_str("  <div class=\"sets\">\n");
    for set in group.sets {
        render_set(&mut html, set);
    }
    html.push_str("  </div>\n");
    html.push_str("</article>");
    html
}

fn render_full_header(html: &mut String, show: &Show) {
    html.push_str("  <header class=\"show-header\">\n");
    html.push_str(&format!(
        "    <h2 class=\"show-date\">{}</h2>\n",
        escape_html(&show.formatted_date())
    ));
    html.push_str(&format!(
        "    <p class=\"show-venue\">{}</p>\n",
        escape_html(&show.venue_display())
    ));
    html.push_str(&format!(
        "    <p class=\"show-location\">{}</p>\n",
        escape_html(&show.location_display())
    ));
    if let Some(notes) = show.notes() {
        let notes = notes.trim();
        let notes = notes
            .strip_prefix('(')
            .and_then(|n| n.strip_suffix(')'))
            .unwrap_or(notes);
        html.push_str(&format!(
            "    <p class=\"show-notes\">{}</p>\n",
            escape_html(notes)
        ));
    }
    html.push_str("  </header>\n");
}

fn render_continued_header(html: &mut String, show: &Show) {
    html.push_str("  <header class=\"show-header show-header-continued\">\n");
    html.push_str(&format!(
        "    <h2 class=\"show-date\">{} <span class=\"continued\">(continued)</span></h2>\n",
        escape_html(&show.formatted_date())
    ));
    html.push_str(&format!(
        "    <p class=\"show-venue\">{}</p>\n",
        escape_html(&show.venue_display())
    ));
    html.push_str("  </header>\n");
}

fn render_set(html: &mut String, set: &Set) {
    html.push_str("    <section class=\"set\">\n");

    let mut label = format!(
        "<h3 class=\"set-label\">{}",
        escape_html(&set.display_label())
    );
    if let Some(annotation) = set.annotation() {
        label.push_str(&format!(
            " <span class=\"set-annotation\">({})</span>",
            escape_html(annotation)
        ));
    }
    label.push_str("</h3>");
    html.push_str(&format!("      {label}\n"));

    html.push_str("      <ul class=\"songs\">\n");
    for raw in set.songs() {
        let song = format_song(raw);
        let class_attr = if song.segue { " class=\"segue\"" } else { "" };
        let note = song
            .note
            .as_deref()
            .map(|note| format!(" <span class=\"song-note\">{}</span>", escape_html(note)))
            .unwrap_or_default();
        html.push_str(&format!(
            "        <li{}>{}{}</li>\n",
            class_attr,
            escape_html(&song.title),
            note
        ));
    }
    html.push_str("      </ul>\n");
    html.push_str("    </section>\n");
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
