use std::path::Path;

use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::debug;

use crate::domain::{AppError, Result, RunReport};

/// Append one report block to the log file at `path`, creating it if needed
pub async fn append_report(path: &Path, report: &RunReport) -> Result<()> {
    let log_error = |source| AppError::LogWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(log_error)?;

    // Whole block in a single write
    let block = format!("{}\n", report);
    file.write_all(block.as_bytes()).await.map_err(log_error)?;
    file.flush().await.map_err(log_error)?;

    debug!(path = %path.display(), "report appended");
    Ok(())
}
