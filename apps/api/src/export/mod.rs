// Export: paginated print document and clipboard markup.
// Layout is CPU-bound and file writes block, so handlers run both inside
// tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod html;
pub mod paginate;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

pub use font_metrics::{letter_page_config, FontFamily, PageConfig};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write print document: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not move print document into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("export task failed: {0}")]
    Task(String),
}

/// Writes the rendered print HTML into `dir` atomically and returns the final path.
///
/// A failed write leaves no partial file behind, so the caller may retry immediately.
pub fn write_print_file(dir: &Path, file_name: &str, html: &str) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(html.as_bytes())?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(&path)?;
    Ok(path)
}
