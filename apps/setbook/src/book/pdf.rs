//! HTML → PDF bridge. The conversion itself is delegated to an external
//! document-formatting engine.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Converts a rendered HTML book into a fixed-page document.
///
/// Implement this to swap engines without touching the book assembler.
#[async_trait]
pub trait PdfEngine: Send + Sync {
    async fn render(&self, html: &Path, pdf: &Path) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// CommandPdfEngine: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Runs an external converter as `<program> <html> <pdf>` (weasyprint's CLI shape).
pub struct CommandPdfEngine {
    program: String,
}

impl CommandPdfEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl PdfEngine for CommandPdfEngine {
    async fn render(&self, html: &Path, pdf: &Path) -> Result<(), AppError> {
        info!(engine = %self.program, pdf = %pdf.display(), "Generating PDF");

        let output = Command::new(&self.program)
            .arg(html)
            .arg(pdf)
            .output()
            .await
            .map_err(|e| AppError::Pdf(format!("failed to launch '{}': {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Pdf(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        info!(pdf = %pdf.display(), "PDF generated");
        Ok(())
    }
}
