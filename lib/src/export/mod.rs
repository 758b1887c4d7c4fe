//! History and bookmarks export pipelines
//!
//! Both pipelines render the whole document in memory and only then create
//! the output file, so a failed export never leaves a partial file behind.

pub mod bookmarks;
pub mod history;
pub mod html;

pub use bookmarks::{render_bookmarks, BookmarkFile, BookmarkNode};
pub use history::{render_document, try_render_document, RenderOptions};
pub use html::{escape_html, sanitize_for_html};

use crate::error::{ExportError, Result};
use crate::snapshot::{HistoryStore, Snapshot};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one history export run
#[derive(Debug, Clone, Default)]
pub struct HistoryExport {
    pub options: RenderOptions,
    /// Parent of the snapshot directory; the system temp dir when `None`
    pub temp_root: Option<PathBuf>,
}

impl HistoryExport {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            temp_root: None,
        }
    }

    /// Snapshot `input`, render its history, and write the document to `output`
    ///
    /// Returns the number of links written.
    pub fn run(&self, input: &Path, output: &Path) -> Result<usize> {
        let snapshot = match &self.temp_root {
            Some(root) => Snapshot::acquire_in(input, root)?,
            None => Snapshot::acquire(input)?,
        };

        let (document, links) = {
            let store = HistoryStore::open(&snapshot)?;
            let mut query = store.records()?;
            let rendered = try_render_document(query.iter()?, self.options)?;
            rendered
        };
        snapshot.close()?;
        debug!("Rendered {} history entries from {}", links, input.display());

        write_output(output, &document)?;
        info!("Wrote {} history entries to {}", links, output.display());
        Ok(links)
    }
}

fn write_output(output: &Path, document: &str) -> Result<()> {
    fs::write(output, document).map_err(|source| ExportError::WriteFailed {
        path: output.to_path_buf(),
        source,
    })
}

/// Convenience wrapper for [`HistoryExport::run`] with default settings
pub fn export_history(input: &Path, output: &Path, options: RenderOptions) -> Result<usize> {
    HistoryExport::new(options).run(input, output)
}

/// Convert a Chrome `Bookmarks` JSON file to a Netscape bookmarks document
///
/// Returns the number of links written.
pub fn export_bookmarks(input: &Path, output: &Path) -> Result<usize> {
    if !input.exists() {
        return Err(ExportError::InputMissing(input.to_path_buf()));
    }

    let file = BookmarkFile::load(input)?;
    let (document, links) = render_bookmarks(&file);

    write_output(output, &document)?;
    info!("Wrote {} bookmarks to {}", links, output.display());
    Ok(links)
}
