//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`] (or [`ingest_city`]), which loads a trip log
//! into an in-memory [`crate::types::RecordCollection`].
//!
//! - If [`IngestionOptions::format`] is `None`, the ingestion format is inferred from the file
//!   extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/skipped rows/
//!   failure/alerts are reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::config::DatasetConfig;
use crate::error::{IngestionError, IngestionResult};
use crate::types::City;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::records::LoadOutcome;
use super::{csv, json};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Unified ingestion entry point for path-based sources.
///
/// When an observer is configured, this function reports:
///
/// - `on_row_skipped` for each row that failed to parse, then `on_success` with row stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use bikeshare_stats::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), bikeshare_stats::IngestionError> {
/// // Uses `.csv` to select CSV ingestion.
/// let outcome = ingest_from_path("chicago.csv", &IngestionOptions::default())?;
/// println!("rows={} skipped={}", outcome.loaded(), outcome.skipped.len());
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (tracing + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use bikeshare_stats::ingestion::{
///     ingest_from_path, IngestionOptions, IngestionSeverity, TracingObserver,
/// };
///
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     alert_at_or_above: IngestionSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are treated as Critical and will trigger `on_alert` at this threshold.
/// let _err = ingest_from_path("does_not_exist.csv", &opts).unwrap_err();
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<LoadOutcome> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format: fmt,
    };

    let result = match fmt {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path),
        IngestionFormat::Json => json::ingest_json_from_path(path),
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(outcome) => {
                for skipped in &outcome.skipped {
                    obs.on_row_skipped(&ctx, skipped);
                }
                obs.on_success(
                    &ctx,
                    IngestionStats {
                        rows: outcome.loaded(),
                        skipped: outcome.skipped.len(),
                    },
                );
            }
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Load the trip log configured for `city`.
pub fn ingest_city(
    city: City,
    config: &DatasetConfig,
    options: &IngestionOptions,
) -> IngestionResult<LoadOutcome> {
    ingest_from_path(config.path_for(city), options)
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::SchemaMismatch { .. } => IngestionSeverity::Error,
        IngestionError::ParseError { .. } => IngestionSeverity::Warning,
    }
}

fn infer_format_from_path(path: &Path) -> IngestionResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| IngestionError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}
