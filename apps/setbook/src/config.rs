use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::book::{BookOptions, Era, Selection};
use crate::errors::AppError;
use crate::layout::{default_layout_config, LayoutConfig};
use crate::render::BookLayout;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub year: Option<i32>,
    pub era: Option<Era>,
    pub book_layout: BookLayout,
    pub band: String,
    pub pdf: bool,
    pub pdf_engine: String,
    pub layout_config_path: Option<PathBuf>,
    pub watch: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let year = get("SETBOOK_YEAR")
            .map(|v| v.trim().parse::<i32>())
            .transpose()
            .context("SETBOOK_YEAR must be a four-digit year")?;
        let era = get("SETBOOK_ERA")
            .map(|v| v.parse::<Era>())
            .transpose()
            .context("SETBOOK_ERA is invalid")?;
        let book_layout = get("SETBOOK_LAYOUT")
            .map(|v| v.parse::<BookLayout>())
            .transpose()
            .context("SETBOOK_LAYOUT is invalid")?
            .unwrap_or_default();

        Ok(Config {
            data_path: get("SETBOOK_DATA")
                .unwrap_or_else(|| "data/setlist.tsv".to_string())
                .into(),
            output_dir: get("SETBOOK_OUTPUT")
                .unwrap_or_else(|| "output".to_string())
                .into(),
            year,
            era,
            book_layout,
            band: get("SETBOOK_BAND").unwrap_or_else(|| BookOptions::default().band),
            pdf: parse_flag("SETBOOK_PDF", get("SETBOOK_PDF"), false)?,
            pdf_engine: get("SETBOOK_PDF_ENGINE").unwrap_or_else(|| "weasyprint".to_string()),
            layout_config_path: get("SETBOOK_LAYOUT_CONFIG").map(PathBuf::from),
            watch: parse_flag("SETBOOK_WATCH", get("SETBOOK_WATCH"), true)?,
            port: get("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// A year wins over an era; neither means the complete run.
    pub fn selection(&self) -> Selection {
        match (self.year, self.era) {
            (Some(year), _) => Selection::Year(year),
            (None, Some(era)) => Selection::Era(era),
            (None, None) => Selection::All,
        }
    }

    pub fn book_options(&self) -> BookOptions {
        BookOptions {
            band: self.band.clone(),
            layout: self.book_layout,
            ..BookOptions::default()
        }
    }

    /// The layout config override, or the defaults when none is configured.
    pub fn layout_config(&self) -> Result<LayoutConfig, AppError> {
        match &self.layout_config_path {
            Some(path) => LayoutConfig::from_json_file(path),
            None => Ok(default_layout_config()),
        }
    }
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{key} must be a boolean, got '{other}'"),
    }
}
