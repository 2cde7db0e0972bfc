mod book;
mod config;
mod errors;
mod ingest;
mod layout;
mod models;
mod render;
mod routes;
mod state;
mod watcher;

use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::book::generator::{generate, load_inputs, pdf_engine};
use crate::book::pdf::PdfEngine;
use crate::book::{Era, Selection};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

/// `setbook [generate|all|preview]`; everything else comes from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Generate,
    All,
    Preview,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "generate" => Ok(Command::Generate),
            "all" => Ok(Command::All),
            "preview" => Ok(Command::Preview),
            other => bail!("unknown command '{other}' (expected generate, all or preview)"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Command>()?,
        None => Command::Generate,
    };

    info!("Starting setbook v{} ({command:?})", env!("CARGO_PKG_VERSION"));

    match command {
        Command::Generate => run_generate(&config, &[config.selection()]).await,
        Command::All => {
            let selections: Vec<Selection> = Era::ALL.into_iter().map(Selection::Era).collect();
            run_generate(&config, &selections).await
        }
        Command::Preview => run_preview(config).await,
    }
}

async fn run_generate(config: &Config, selections: &[Selection]) -> Result<()> {
    let (layout_config, shows) = load_inputs(config)
        .await
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;
    let engine = pdf_engine(config);

    for &selection in selections {
        let generated = generate(
            config,
            &layout_config,
            &shows,
            selection,
            engine.as_ref().map(|e| e as &dyn PdfEngine),
        )
        .await?;

        match generated {
            Some(generated) => info!(
                html = %generated.html.display(),
                shows = generated.stats.shows,
                single = generated.stats.single,
                spread = generated.stats.spread,
                pages = generated.stats.show_pages,
                overflowing = generated.stats.overflowing,
                "Volume written"
            ),
            None => warn!(volume = %selection.file_stem(), "No shows found, skipping volume"),
        }
    }

    Ok(())
}

async fn run_preview(config: Config) -> Result<()> {
    run_generate(&config, &[config.selection()]).await?;

    let (layout_config, shows) = load_inputs(&config).await?;
    let state = AppState::new(config.clone(), layout_config, shows);

    if config.watch {
        watcher::spawn(state.clone());
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(
        "Preview at http://localhost:{}/output/{}.html",
        config.port,
        config.selection().file_stem()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
