use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ShowError;

/// Date layouts seen in the setlist sources, tried in order.
const ACCEPTED_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y", "%Y-%m-%d"];

/// A validated performance date.
///
/// Year, month, day and the display form are all derived from the single
/// stored `NaiveDate`, so they can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShowDate(NaiveDate);

impl ShowDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(ShowDate)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Long display form, e.g. "May 27, 1993".
    pub fn long_form(&self) -> String {
        self.0.format("%B %d, %Y").to_string()
    }
}

impl FromStr for ShowDate {
    type Err = ShowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ACCEPTED_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
            .map(ShowDate)
            .ok_or_else(|| ShowError::InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for ShowDate {
    type Error = ShowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShowDate> for String {
    fn from(date: ShowDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for ShowDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y/%m/%d"))
    }
}
