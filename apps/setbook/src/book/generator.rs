//! Book generation: orchestrates the full pipeline.
//!
//! Flow: load_shows → assemble → write_book → optional PDF.
//!
//! The command-line entry points and the preview server both go through here,
//! so a regenerate request produces exactly what `setbook generate` would.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::book::pdf::{CommandPdfEngine, PdfEngine};
use crate::book::{assemble, write_book, BookStats, Selection};
use crate::config::Config;
use crate::errors::AppError;
use crate::ingest::load_shows;
use crate::layout::LayoutConfig;
use crate::models::Show;
use crate::state::AppState;

/// Files written for one volume.
#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    pub html: PathBuf,
    pub pdf: Option<PathBuf>,
    pub stats: BookStats,
}

/// Reads the layout override and the dataset off the async runtime.
///
/// Both come from the same pass, so callers never pair a fresh dataset with a
/// stale layout config or the other way round.
pub async fn load_inputs(config: &Config) -> Result<(LayoutConfig, Vec<Show>), AppError> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || {
        let layout_config = config.layout_config()?;
        let ingested = load_shows(&config.data_path)?;
        Ok::<_, AppError>((layout_config, ingested.shows))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed loading inputs: {e}")))?
}

/// The PDF engine configured for this run, if PDF output is enabled.
pub fn pdf_engine(config: &Config) -> Option<CommandPdfEngine> {
    config
        .pdf
        .then(|| CommandPdfEngine::new(config.pdf_engine.clone()))
}

/// Builds and writes one volume. Returns `None` when the selection is empty.
pub async fn generate(
    config: &Config,
    layout_config: &LayoutConfig,
    shows: &[Show],
    selection: Selection,
    pdf: Option<&dyn PdfEngine>,
) -> Result<Option<Generated>, AppError> {
    let Some(output) = assemble(shows, selection, &config.book_options(), layout_config) else {
        return Ok(None);
    };

    let stem = selection.file_stem();
    let html = write_book(&config.output_dir, &stem, &output).await?;

    let pdf = match pdf {
        Some(engine) => {
            let pdf_path = config.output_dir.join(format!("{stem}.pdf"));
            engine.render(&html, &pdf_path).await?;
            Some(pdf_path)
        }
        None => None,
    };

    Ok(Some(Generated {
        html,
        pdf,
        stats: output.stats,
    }))
}

/// Re-reads the dataset and the layout override, rewrites the configured
/// volume, then publishes the new inputs to `state`.
///
/// State is only replaced once the volume is written. A failed load or build
/// leaves the previous dataset and layout config in place.
pub async fn regenerate(state: &AppState) -> Result<Option<Generated>, AppError> {
    let config = &state.config;
    let (layout_config, shows) = load_inputs(config).await?;

    let engine = pdf_engine(config);
    let generated = generate(
        config,
        &layout_config,
        &shows,
        config.selection(),
        engine.as_ref().map(|e| e as &dyn PdfEngine),
    )
    .await?;

    // Same order as the layout report handler: layout config, then shows.
    let mut current_layout = state.layout_config.write().await;
    let mut current_shows = state.shows.write().await;
    *current_layout = layout_config;
    *current_shows = shows;
    drop(current_shows);
    drop(current_layout);

    if let Some(generated) = &generated {
        info!(
            html = %generated.html.display(),
            shows = generated.stats.shows,
            "Regenerated"
        );
    }
    Ok(generated)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::layout::default_layout_config;

    const DATASET: &str = "\
1972/05/26\tGrateful Dead\tStrand Lyceum\t\tLondon\tEngland\t
1:\tPromised Land
\tSugaree
E:\tOne More Saturday Night
1977/05/08\tGrateful Dead\tBarton Hall\tCornell University\tIthaca\tNY\t
1:\tNew Minglewood Blues
";

    /// Records every conversion and writes a stub file in place of a real PDF.
    #[derive(Default)]
    struct RecordingEngine {
        calls: Mutex<Vec<(PathBuf, PathBuf)>>,
    }

    #[async_trait]
    impl PdfEngine for RecordingEngine {
        async fn render(&self, html: &Path, pdf: &Path) -> Result<(), AppError> {
            tokio::fs::write(pdf, b"%PDF-1.7").await?;
            self.calls
                .lock()
                .unwrap()
                .push((html.to_path_buf(), pdf.to_path_buf()));
            Ok(())
        }
    }

    fn test_config(dir: &Path) -> Config {
        let data = dir.join("setlist.tsv");
        std::fs::write(&data, DATASET).unwrap();
        let vars: HashMap<&str, String> = [
            ("SETBOOK_DATA", data.to_string_lossy().to_string()),
            (
                "SETBOOK_OUTPUT",
                dir.join("output").to_string_lossy().to_string(),
            ),
            ("SETBOOK_YEAR", "1972".to_string()),
        ]
        .into_iter()
        .collect();
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[tokio::test]
    async fn test_generate_writes_html_and_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let (layout_config, shows) = load_inputs(&config).await.unwrap();
        assert_eq!(shows.len(), 2);
        assert_eq!(layout_config, default_layout_config());

        let engine = RecordingEngine::default();
        let generated = generate(
            &config,
            &default_layout_config(),
            &shows,
            Selection::Year(1972),
            Some(&engine as &dyn PdfEngine),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(generated.html, config.output_dir.join("gd-1972.html"));
        assert_eq!(generated.pdf, Some(config.output_dir.join("gd-1972.pdf")));
        assert_eq!(generated.stats.shows, 1);
        assert_eq!(engine.calls.lock().unwrap().len(), 1);

        let html = std::fs::read_to_string(&generated.html).unwrap();
        assert!(html.contains("Strand Lyceum"));
        assert!(!html.contains("Barton Hall"));
    }

    #[tokio::test]
    async fn test_generate_empty_selection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let (_, shows) = load_inputs(&config).await.unwrap();

        let generated = generate(
            &config,
            &default_layout_config(),
            &shows,
            Selection::Year(1985),
            None,
        )
        .await
        .unwrap();
        assert!(generated.is_none());
        assert!(!config.output_dir.join("gd-1985.html").exists());
    }

    #[tokio::test]
    async fn test_regenerate_refreshes_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let state = AppState::new(config.clone(), default_layout_config(), Vec::new());

        let generated = regenerate(&state).await.unwrap().unwrap();
        assert_eq!(state.shows.read().await.len(), 2);
        assert!(generated.html.exists());
        assert!(generated.pdf.is_none());
    }

    #[tokio::test]
    async fn test_missing_dataset_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.data_path = dir.path().join("missing.tsv");
        assert!(matches!(load_inputs(&config).await, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn test_regenerate_publishes_layout_and_shows_together() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        let layout = dir.path().join("layout.json");
        std::fs::write(&layout, r#"{"line_height": 16.0}"#).unwrap();
        config.layout_config_path = Some(layout);
        let state = AppState::new(config, default_layout_config(), Vec::new());

        regenerate(&state).await.unwrap().unwrap();
        assert!((state.layout_config.read().await.line_height - 16.0).abs() < 1e-6);
        assert_eq!(state.shows.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_regenerate_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        let layout = dir.path().join("layout.json");
        std::fs::write(&layout, r#"{"set_gap": -1.0}"#).unwrap();
        config.layout_config_path = Some(layout);
        let state = AppState::new(config.clone(), default_layout_config(), Vec::new());

        assert!(matches!(
            regenerate(&state).await,
            Err(AppError::Validation(_))
        ));
        assert!(state.shows.read().await.is_empty());
        assert_eq!(*state.layout_config.read().await, default_layout_config());
        assert!(!config.output_dir.join("gd-1972.html").exists());
    }
}
