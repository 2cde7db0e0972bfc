//! Line-delimited JSON setlist reader: one show record per line.
//!
//! Records get the same cleanup as TSV rows: sets without songs are pruned,
//! and a show left with no songs is dropped without being reported.

use serde::Deserialize;
use tracing::debug;

use crate::errors::ShowError;
use crate::ingest::Ingested;
use crate::models::{Set, Show, ShowHeader};

/// Wire shape of one show record.
#[derive(Debug, Deserialize)]
struct ShowRecord {
    date: String,
    #[serde(default)]
    further_id: Option<String>,
    #[serde(default)]
    venue1: String,
    #[serde(default)]
    venue2: Option<String>,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state_or_country: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    sets: Vec<SetRecord>,
}

#[derive(Debug, Deserialize)]
struct SetRecord {
    #[serde(default)]
    label: String,
    #[serde(default)]
    annotation: Option<String>,
    #[serde(default)]
    songs: Vec<String>,
}

pub fn parse_jsonl(text: &str) -> Ingested {
    let mut ingested = Ingested::default();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record = match serde_json::from_str::<ShowRecord>(trimmed) {
            Ok(record) => record,
            Err(e) => {
                ingested.skip(line, e.to_string());
                continue;
            }
        };

        match build_show(line, record) {
            Ok(Some(show)) => ingested.shows.push(show),
            Ok(None) => {}
            Err(e) => ingested.skip(line, e.to_string()),
        }
    }

    ingested
}

/// `Ok(None)` when the record carries no songs at all.
fn build_show(line: usize, record: ShowRecord) -> Result<Option<Show>, ShowError> {
    let sets: Vec<SetRecord> = record
        .sets
        .into_iter()
        .filter(|set| !set.songs.is_empty())
        .collect();
    if sets.is_empty() {
        debug!(line, date = %record.date, "Dropping show with no songs");
        return Ok(None);
    }

    let sets = sets
        .into_iter()
        .map(|set| Set::new(set.label, set.annotation, set.songs))
        .collect::<Result<Vec<_>, _>>()?;

    let header = ShowHeader {
        date: record.date.parse()?,
        further_id: record.further_id,
        venue1: record.venue1,
        venue2: record.venue2,
        city: record.city,
        state_or_country: record.state_or_country,
        notes: record.notes,
    };
    Show::new(header, sets).map(Some)
}
