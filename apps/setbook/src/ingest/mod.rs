// Dataset ingestion: tab-delimited or line-delimited JSON into validated shows.
// Malformed records are logged and skipped; one bad record never fails the batch.

pub mod jsonl;
pub mod tsv;

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{Show, ShowDate};

/// Result of reading a dataset: the usable shows plus every skipped record.
#[derive(Debug, Default)]
pub struct Ingested {
    pub shows: Vec<Show>,
    /// One `AppError::Ingest` per rejected record.
    pub skipped: Vec<AppError>,
}

impl Ingested {
    pub(crate) fn skip(&mut self, line: usize, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(line, reason = %reason, "Skipping malformed show record");
        self.skipped.push(AppError::Ingest { line, reason });
    }
}

/// Reads the whole dataset at `path`, choosing the reader by file extension.
pub fn load_shows(path: &Path) -> Result<Ingested, AppError> {
    let text = std::fs::read_to_string(path)?;
    let is_jsonl = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jsonl"));

    let mut ingested = if is_jsonl {
        jsonl::parse_jsonl(&text)
    } else {
        tsv::parse_tsv(&text)
    };
    ingested.shows = group_by_date(ingested.shows);

    info!(
        path = %path.display(),
        shows = ingested.shows.len(),
        skipped = ingested.skipped.len(),
        "Loaded shows"
    );
    Ok(ingested)
}

/// Regroups shows so same-date performances sit together.
///
/// Dates keep the order of their first appearance; shows within a date keep
/// their dataset order.
pub fn group_by_date(shows: Vec<Show>) -> Vec<Show> {
    let mut order: Vec<ShowDate> = Vec::new();
    let mut by_date: HashMap<ShowDate, Vec<Show>> = HashMap::new();

    for show in shows {
        let date = show.date();
        by_date
            .entry(date)
            .or_insert_with(|| {
                order.push(date);
                Vec::new()
            })
            .push(show);
    }

    order
        .into_iter()
        .flat_map(|date| by_date.remove(&date).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const JSONL: &str = r#"{"date":"1972/05/26","venue1":"Lyceum Theatre","city":"London","state_or_country":"England","sets":[{"label":"1","songs":["Promised Land","Sugaree"]}]}
{"date":"1972/05/25","venue1":"Lyceum Theatre","city":"London","state_or_country":"England","sets":[{"label":"1","songs":["Bertha"]}]}
{"date":"1972/05/26","further_id":"(late)","venue1":"Lyceum Theatre","city":"London","state_or_country":"England","sets":[{"label":"1","songs":["Truckin'"]}]}
"#;

    #[test]
    fn test_group_by_date_keeps_first_appearance_order() {
        let ingested = jsonl::parse_jsonl(JSONL);
        let grouped = group_by_date(ingested.shows);
        let dates: Vec<String> = grouped.iter().map(|s| s.date().to_string()).collect();
        assert_eq!(dates, vec!["1972/05/26", "1972/05/26", "1972/05/25"]);
        assert_eq!(grouped[1].formatted_date(), "May 26, 1972 (late)");
    }

    #[test]
    fn test_load_shows_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        file.write_all(JSONL.as_bytes()).unwrap();
        let ingested = load_shows(file.path()).unwrap();
        assert_eq!(ingested.shows.len(), 3);
        assert!(ingested.skipped.is_empty());
    }

    #[test]
    fn test_load_shows_reads_tsv_by_default() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        file.write_all(b"1977/05/08\tGrateful Dead\tBarton Hall\t\tIthaca\tNY\t\n1:\tNew Minglewood Blues\t\n")
            .unwrap();
        let ingested = load_shows(file.path()).unwrap();
        assert_eq!(ingested.shows.len(), 1);
        assert_eq!(ingested.shows[0].sets()[0].label(), "1");
    }

    #[test]
    fn test_load_shows_missing_file_is_io_error() {
        let err = load_shows(Path::new("/nonexistent/setlist.tsv")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
