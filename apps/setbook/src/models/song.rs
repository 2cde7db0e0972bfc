//! Song line markers.
//!
//! Songs are stored as the raw dataset text. A leading `>` marks a segue from
//! the previous song; a `*` starts a footnote-style annotation that runs to the
//! end of the line.

use serde::Serialize;

const SEGUE_MARKER: char = '>';
const NOTE_MARKER: char = '*';

/// A song line split into its display parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSong {
    pub title: String,
    pub segue: bool,
    pub note: Option<String>,
}

/// Splits a raw song line into title, segue flag and trailing note.
pub fn format_song(raw: &str) -> FormattedSong {
    let mut text = raw.trim();

    let segue = text.starts_with(SEGUE_MARKER);
    if segue {
        text = text[SEGUE_MARKER.len_utf8()..].trim();
    }

    let (title, note) = if let Some(stripped) = text.strip_suffix(NOTE_MARKER) {
        (stripped, Some(NOTE_MARKER.to_string()))
    } else {
        match text.find(NOTE_MARKER) {
            // A marker at position 0 has no title in front of it; keep the line as-is.
            Some(idx) if idx > 0 => (&text[..idx], Some(text[idx..].to_string())),
            _ => (text, None),
        }
    };

    FormattedSong {
        title: title.trim().to_string(),
        segue,
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_song() {
        let song = format_song("Dark Star");
        assert_eq!(song.title, "Dark Star");
        assert!(!song.segue);
        assert_eq!(song.note, None);
    }

    #[test]
    fn test_segue_marker_stripped() {
        let song = format_song("> Fire On The Mountain");
        assert_eq!(song.title, "Fire On The Mountain");
        assert!(song.segue);
    }

    #[test]
    fn test_trailing_star_note() {
        let song = format_song("Gloria*");
        assert_eq!(song.title, "Gloria");
        assert_eq!(song.note.as_deref(), Some("*"));
    }

    #[test]
    fn test_embedded_note_runs_to_end() {
        let song = format_song(">Drums* (with Airto)");
        assert!(song.segue);
        assert_eq!(song.title, "Drums");
        assert_eq!(song.note.as_deref(), Some("* (with Airto)"));
    }

    #[test]
    fn test_leading_star_is_not_a_note() {
        let song = format_song("*Untitled");
        assert_eq!(song.title, "*Untitled");
        assert_eq!(song.note, None);
    }
}
