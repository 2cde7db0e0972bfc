//! Tab-delimited setlist reader.
//!
//! Row shapes:
//! ```text
//! date  band  venue1  venue2  city  state_or_country  notes   ← starts a show
//! 1:    Song                                                  ← opens set "1"
//!       Song                                                  ← continues the set
//! E:    Song                                                  ← opens the encore
//! ```
//! A row whose third column is empty (or missing) is a set/song row. The first
//! song of a set may carry an `(electric)` / `(acoustic)` prefix, which becomes
//! the set annotation.

use tracing::debug;

use crate::ingest::Ingested;
use crate::models::{Set, Show, ShowDate, ShowHeader};

const ANNOTATION_PREFIXES: &[&str] = &["(electric)", "(acoustic)"];
const FURTHER_ID_PREFIXES: &[&str] = &["(early)", "(late)"];
const DEFAULT_SET_LABEL: &str = "I";

#[derive(Debug, Default)]
struct PendingSet {
    label: String,
    annotation: Option<String>,
    songs: Vec<String>,
}

#[derive(Debug)]
struct PendingShow {
    line: usize,
    date: String,
    further_id: Option<String>,
    venue1: String,
    venue2: String,
    city: String,
    state_or_country: String,
    notes: String,
    sets: Vec<PendingSet>,
}

impl PendingShow {
    fn song_count(&self) -> usize {
        self.sets.iter().map(|s| s.songs.len()).sum()
    }
}

/// Parses a whole tab-delimited dataset.
pub fn parse_tsv(text: &str) -> Ingested {
    let mut ingested = Ingested::default();
    let mut current: Option<PendingShow> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let row = split_row(raw_line);
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let is_show_row = row.get(2).is_some_and(|c| !c.is_empty());
        if !is_show_row {
            match current.as_mut() {
                Some(show) => push_song_row(show, &row),
                None => debug!(line, "Ignoring set row before the first show"),
            }
            continue;
        }

        if let Some(done) = current.take() {
            finish_show(done, &mut ingested);
        }
        current = Some(start_show(line, &row));
    }

    if let Some(done) = current.take() {
        finish_show(done, &mut ingested);
    }

    ingested
}

/// Splits a line on tabs and strips CSV-style quoting from each cell.
fn split_row(line: &str) -> Vec<String> {
    line.trim_end_matches('\r')
        .split('\t')
        .map(unquote)
        .collect()
}

fn unquote(cell: &str) -> String {
    let trimmed = cell.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => trimmed.to_string(),
    }
}

fn start_show(line: usize, row: &[String]) -> PendingShow {
    let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
    let raw_notes = cell(6);
    let (further_id, notes) = split_further_id(&raw_notes);

    PendingShow {
        line,
        date: cell(0),
        further_id,
        venue1: cell(2),
        venue2: cell(3),
        city: cell(4),
        state_or_country: cell(5),
        notes: clean_notes(notes),
        sets: Vec::new(),
    }
}

fn push_song_row(show: &mut PendingShow, row: &[String]) {
    let label = row.first().map(String::as_str).unwrap_or("");
    let song = row.get(1).map(String::as_str).unwrap_or("");

    if !label.is_empty() || show.sets.is_empty() {
        let (annotation, song) = split_annotation(song);
        let label = label.strip_suffix(':').unwrap_or(label).trim();
        show.sets.push(PendingSet {
            label: if label.is_empty() {
                DEFAULT_SET_LABEL.to_string()
            } else {
                label.to_string()
            },
            annotation,
            songs: if song.is_empty() {
                Vec::new()
            } else {
                vec![song.to_string()]
            },
        });
    } else if !song.is_empty() {
        if let Some(set) = show.sets.last_mut() {
            set.songs.push(song.to_string());
        }
    }
}

/// `"(acoustic) Deep Elem Blues"` → `(Some("acoustic"), "Deep Elem Blues")`.
fn split_annotation(song: &str) -> (Option<String>, &str) {
    for prefix in ANNOTATION_PREFIXES {
        if let Some(rest) = song.strip_prefix(prefix) {
            let annotation = prefix.trim_matches(|c: char| c == '(' || c == ')').to_string();
            return (Some(annotation), rest.trim_start());
        }
    }
    (None, song)
}

/// `"(early) Rex benefit"` → `(Some("(early)"), "Rex benefit")`.
fn split_further_id(notes: &str) -> (Option<String>, &str) {
    for prefix in FURTHER_ID_PREFIXES {
        if let Some(rest) = notes.strip_prefix(prefix) {
            return (Some(prefix.to_string()), rest);
        }
    }
    (None, notes)
}

/// Strips surrounding parentheses and capitalizes a lowercase first letter
/// (except shorthand like "w/ guest").
fn clean_notes(notes: &str) -> String {
    let stripped = notes.trim().trim_matches(|c: char| c == '(' || c == ')').trim();
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() && !stripped.starts_with("w/") => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => stripped.to_string(),
    }
}

fn finish_show(pending: PendingShow, ingested: &mut Ingested) {
    if pending.song_count() == 0 {
        debug!(line = pending.line, date = %pending.date, "Dropping show with no songs");
        return;
    }

    let date: ShowDate = match pending.date.parse() {
        Ok(date) => date,
        Err(e) => return ingested.skip(pending.line, e.to_string()),
    };

    let mut sets = Vec::with_capacity(pending.sets.len());
    for set in pending.sets {
        if set.songs.is_empty() {
            debug!(line = pending.line, label = %set.label, "Dropping set with no songs");
            continue;
        }
        match Set::new(set.label, set.annotation, set.songs) {
            Ok(set) => sets.push(set),
            Err(e) => return ingested.skip(pending.line, e.to_string()),
        }
    }

    let header = ShowHeader {
        date,
        further_id: pending.further_id,
        venue1: pending.venue1,
        venue2: Some(pending.venue2),
        city: pending.city,
        state_or_country: pending.state_or_country,
        notes: Some(pending.notes),
    };

    match Show::new(header, sets) {
        Ok(show) => ingested.shows.push(show),
        Err(e) => ingested.skip(pending.line, e.to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
