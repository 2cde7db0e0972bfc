use crate::errors::ShowError;
use crate::models::date::ShowDate;

const ENCORE_LABEL: &str = "E";

// ────────────────────────────────────────────────────────────────────────────
// Set
// ────────────────────────────────────────────────────────────────────────────

/// One musical set of a performance: a label ("1", "2", "E"), an optional
/// annotation ("acoustic", "electric") and its songs in performance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set {
    label: String,
    annotation: Option<String>,
    songs: Vec<String>,
}

impl Set {
    pub fn new(
        label: impl Into<String>,
        annotation: Option<String>,
        songs: Vec<String>,
    ) -> Result<Self, ShowError> {
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(ShowError::EmptyLabel);
        }
        if songs.is_empty() {
            return Err(ShowError::EmptySet { label });
        }
        Ok(Set {
            label,
            annotation: non_empty(annotation),
            songs,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    pub fn songs(&self) -> &[String] {
        &self.songs
    }

    /// Song count; the sizing unit used by the partitioner.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_encore(&self) -> bool {
        self.label == ENCORE_LABEL
    }

    pub fn display_label(&self) -> String {
        if self.is_encore() {
            "Encore".to_string()
        } else {
            format!("Set {}", self.label)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Show
// ────────────────────────────────────────────────────────────────────────────

/// Header metadata of a performance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowHeader {
    pub date: ShowDate,
    /// Distinguishes multiple same-day performances, e.g. "(early)".
    pub further_id: Option<String>,
    pub venue1: String,
    pub venue2: Option<String>,
    pub city: String,
    pub state_or_country: String,
    pub notes: Option<String>,
}

/// A single performance. Immutable once constructed; always holds at least
/// one set, and every set holds at least one song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    header: ShowHeader,
    sets: Vec<Set>,
}

impl Show {
    pub fn new(header: ShowHeader, sets: Vec<Set>) -> Result<Self, ShowError> {
        if sets.is_empty() {
            return Err(ShowError::NoSets);
        }
        let header = ShowHeader {
            further_id: non_empty(header.further_id),
            venue2: non_empty(header.venue2),
            notes: non_empty(header.notes),
            ..header
        };
        Ok(Show { header, sets })
    }

    pub fn date(&self) -> ShowDate {
        self.header.date
    }

    pub fn year(&self) -> i32 {
        self.header.date.year()
    }

    pub fn notes(&self) -> Option<&str> {
        self.header.notes.as_deref()
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    /// Total song count across all sets.
    pub fn len(&self) -> usize {
        self.sets.iter().map(Set::len).sum()
    }

    /// "May 27, 1993", followed by the further id when present.
    pub fn formatted_date(&self) -> String {
        let date = self.header.date.long_form();
        match &self.header.further_id {
            Some(id) => format!("{date} {id}"),
            None => date,
        }
    }

    pub fn venue_display(&self) -> String {
        match &self.header.venue2 {
            Some(v2) => format!("{}, {}", self.header.venue1, v2),
            None => self.header.venue1.clone(),
        }
    }

    pub fn location_display(&self) -> String {
        format!("{}, {}", self.header.city, self.header.state_or_country)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
