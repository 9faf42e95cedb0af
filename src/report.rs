use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;

pub const CODE_REVIEW_REPORT: &str = "code_review_report.md";
pub const TEST_GENERATION_REPORT: &str = "test_generation_report.md";
pub const DASHBOARD_FILE: &str = "index.html";

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Nothing was found to process; nothing was written.
    NothingToDo,
    Completed {
        records: Vec<T>,
        /// Report path, if one was written.
        report: Option<PathBuf>,
    },
}

/// ISO-8601 local timestamp used in report headers.
pub fn report_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Write `contents` to `reports_dir/name`, creating the directory.
pub fn write_report(reports_dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(reports_dir)?;
    let path = reports_dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Like [`write_report`], but a failure is logged and swallowed.
pub fn save_report_lossy(reports_dir: &Path, name: &str, contents: &str) -> Option<PathBuf> {
    match write_report(reports_dir, name, contents) {
        Ok(path) => {
            info!("wrote report {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("error saving report {name}: {e}");
            None
        }
    }
}
