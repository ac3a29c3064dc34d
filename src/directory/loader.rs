use super::SchoolDirectory;
use super::parser::{ParseMode, RowIssue, parse_with_report};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

/// Shown when the schools file cannot be loaded; lookups degrade to no-ops
pub const LOAD_WARNING: &str =
    "Could not load schools database. You can still enter UDISE code manually.";

/// A directory together with what happened while loading it
#[derive(Debug, Clone)]
pub struct LoadedDirectory {
    pub directory: SchoolDirectory,
    pub issues: Vec<RowIssue>,
    /// Rows left out of the directory
    pub rejected: usize,
    pub source: PathBuf,
    pub mode: ParseMode,
    pub elapsed: Duration,
}

impl LoadedDirectory {
    /// Stand-in for a source that could not be read
    pub fn empty(source: &Path, mode: ParseMode) -> Self {
        Self {
            directory: SchoolDirectory::default(),
            issues: Vec::new(),
            rejected: 0,
            source: source.to_path_buf(),
            mode,
            elapsed: Duration::ZERO,
        }
    }
}

/// Read and parse the registry file.
///
/// Invalid UTF-8 is replaced rather than rejected; only I/O failures are
/// errors.
pub fn load_from_path(path: &Path, mode: ParseMode) -> Result<LoadedDirectory> {
    let start = Instant::now();

    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read schools file {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes);

    let report = parse_with_report(&content, mode);
    let rejected = report.rejected(mode);
    let directory = SchoolDirectory::new(report.records);
    let elapsed = start.elapsed();

    info!(
        "loaded {} schools from {} in {:.1}ms",
        directory.len(),
        path.display(),
        elapsed.as_secs_f64() * 1000.0
    );
    if rejected > 0 {
        warn!("{} rows rejected from {}", rejected, path.display());
    }
    for issue in &report.issues {
        debug!("{}: {}", path.display(), issue);
    }

    Ok(LoadedDirectory {
        directory,
        issues: report.issues,
        rejected,
        source: path.to_path_buf(),
        mode,
        elapsed,
    })
}

/// Load on a background thread. The receiver yields exactly one message.
pub fn spawn_load(path: PathBuf, mode: ParseMode) -> Receiver<Result<LoadedDirectory, String>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = load_from_path(&path, mode).map_err(|e| format!("{:#}", e));
        let _ = tx.send(result);
    });

    rx
}
