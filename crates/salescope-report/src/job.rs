//! Report job orchestration: snapshot → aggregate → charts → PDF.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tempfile::TempDir;
use tracing::{debug, error, info, warn};

use salescope_store::SalesStore;

use crate::aggregate;
use crate::chart;
use crate::document;
use crate::error::Result;

/// Immutable report configuration captured at install time. Later schedule
/// changes never reach an in-flight run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub artifact_base: String,
    pub output_dir: PathBuf,
}

impl ReportConfig {
    /// Whitespace runs in the base name become `_`; an unset output
    /// directory falls back to the working directory.
    pub fn new(artifact_base: &str, output_dir: Option<PathBuf>) -> Self {
        let base = artifact_base.split_whitespace().collect::<Vec<_>>().join("_");
        Self {
            artifact_base: base,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// The callback unit the scheduler fires: runs the whole pipeline against a
/// fresh dataset snapshot and writes one timestamped PDF.
pub struct ReportJob {
    store: Arc<SalesStore>,
    config: ReportConfig,
}

impl ReportJob {
    pub fn new(store: Arc<SalesStore>, config: ReportConfig) -> Self {
        Self { store, config }
    }

    /// Run one firing. Never propagates: a failed run is logged and the
    /// trigger stays installed for the next occurrence.
    pub fn run(&self) {
        match self.generate() {
            Ok(path) => info!(path = %path.display(), "report written"),
            Err(e) => error!(error = %e, "report run failed"),
        }
    }

    fn generate(&self) -> Result<PathBuf> {
        let sales = self.store.snapshot()?;
        let views = aggregate::summarize(&sales);

        // Transient PNGs live in a per-run temp dir; dropping it removes
        // them no matter how the run ends.
        let scratch = TempDir::new()?;
        let mut images = Vec::new();
        for (idx, view) in views.iter().enumerate() {
            if view.entries.is_empty() {
                debug!(chart = view.title, "no data, chart skipped");
                continue;
            }
            let path = scratch.path().join(format!("chart_{idx}.png"));
            match chart::render(view, &path) {
                Ok(()) => images.push(path),
                Err(e) => warn!(chart = view.title, error = %e, "chart skipped"),
            }
        }

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}_{}.pdf", self.config.artifact_base, timestamp);
        let out = self.config.output_dir.join(filename);
        let title = format!("Sales Report - {}", Local::now().format("%Y-%m-%d"));
        document::assemble(&title, &images, &out)?;
        Ok(out)
    }
}
