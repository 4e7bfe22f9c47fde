// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends each epoch of a training run to a CSV file so
// learning curves can be compared across runs.
//
// Columns:
//   - epoch:    the epoch number (1, 2, 3, ...)
//   - loss:     loss after the epoch
//   - accuracy: accuracy after the epoch
//   - batches:  full batches processed in the epoch
//   - seconds:  wall-clock duration of the epoch
//
// Output file: models/<name>.metrics.csv
//
// Example:
//   epoch,loss,accuracy,batches,seconds
//   1,0.712400,0.634100,2,0.011
//   2,0.588020,0.702230,2,0.010
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::training::EpochMetrics;

const HEADER: &str = "epoch,loss,accuracy,batches,seconds";

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the logger, writing the header if the file is new.
    /// Existing files are appended to across runs.
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();

        if let Some(dir) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one row per epoch
    pub fn log_all(&self, rows: &[EpochMetrics]) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        for m in rows {
            writeln!(
                f,
                "{},{:.6},{:.6},{},{:.3}",
                m.epoch, m.loss, m.accuracy, m.batches, m.seconds,
            )?;
        }

        tracing::debug!("Logged {} epochs to '{}'", rows.len(), self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
