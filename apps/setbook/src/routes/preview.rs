use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::book::generator::{regenerate, Generated};
use crate::errors::AppError;
use crate::layout::estimator::estimate_group;
use crate::layout::page_fill::{analyze_page_fill, PageFillVerdict};
use crate::layout::{classify_layout, LayoutConfig, LayoutType};
use crate::models::{Show, ShowDate};
use crate::state::AppState;

/// How one show was laid out, as the preview API reports it.
///
/// The height figures are diagnostics from the metric estimator; the layout
/// itself comes from the song-count partition.
#[derive(Debug, Serialize)]
pub struct ShowLayoutReport {
    pub date: String,
    pub venue: String,
    pub layout: LayoutType,
    /// Set labels per page group, e.g. `[["1"], ["2", "E"]]`.
    pub groups: Vec<Vec<String>>,
    pub pages: Vec<PageReport>,
    pub simulated_pages: usize,
    pub estimated_height: f32,
    pub fill_ratio: f32,
    pub verdict: PageFillVerdict,
}

/// One page group with its own height estimate.
#[derive(Debug, Serialize)]
pub struct PageReport {
    pub sets: Vec<String>,
    pub songs: usize,
    pub continued: bool,
    pub estimated_height: f32,
}

#[derive(Debug, Serialize)]
pub struct LayoutReportResponse {
    pub date: ShowDate,
    pub shows: Vec<ShowLayoutReport>,
}

#[derive(Debug, Serialize)]
pub struct RegenerateResponse {
    pub status: &'static str,
    pub generated: Generated,
}

pub fn layout_report(show: &Show, config: &LayoutConfig) -> ShowLayoutReport {
    let layout = classify_layout(show, config);
    let fill = analyze_page_fill(show, config);
    let pages = layout
        .grouping
        .iter()
        .map(|group| PageReport {
            sets: group.labels(),
            songs: group.song_count(),
            continued: group.is_continuation(),
            estimated_height: estimate_group(show, group.sets, group.is_continuation(), config)
                .total,
        })
        .collect();

    ShowLayoutReport {
        date: show.formatted_date(),
        venue: show.venue_display(),
        layout: layout.layout,
        groups: layout.grouping.labels(),
        pages,
        simulated_pages: layout.grouping.simulated_pages(),
        estimated_height: fill.estimated_height,
        fill_ratio: fill.fill_ratio,
        verdict: fill.verdict,
    }
}

/// GET /api/v1/layout/:year/:month/:day
pub async fn handle_layout_report(
    State(state): State<AppState>,
    Path((year, month, day)): Path<(i32, u32, u32)>,
) -> Result<Json<LayoutReportResponse>, AppError> {
    let date = ShowDate::from_ymd(year, month, day).ok_or_else(|| {
        AppError::Validation(format!("{year}/{month}/{day} is not a calendar date"))
    })?;

    let config = state.layout_config.read().await;
    let shows = state.shows.read().await;
    let reports: Vec<ShowLayoutReport> = shows
        .iter()
        .filter(|show| show.date() == date)
        .map(|show| layout_report(show, &config))
        .collect();

    if reports.is_empty() {
        return Err(AppError::NotFound(format!("no show on {date}")));
    }

    Ok(Json(LayoutReportResponse {
        date,
        shows: reports,
    }))
}

/// POST /api/v1/regenerate
pub async fn handle_regenerate(
    State(state): State<AppState>,
) -> Result<Json<RegenerateResponse>, AppError> {
    let generated = regenerate(&state).await?.ok_or_else(|| {
        AppError::NotFound(format!(
            "no shows match {}",
            state.config.selection().file_stem()
        ))
    })?;
    Ok(Json(RegenerateResponse {
        status: "ok",
        generated,
    }))
}
