//! Point-in-time copies of a browser history store
//!
//! Chrome keeps its `History` database locked while running, so records are
//! never read from the live file. [`Snapshot`] copies it into a private
//! temporary directory that is removed when the snapshot is dropped, and
//! [`HistoryStore`] borrows the snapshot so the connection is always closed
//! before the directory goes away.

use crate::error::{ExportError, Result};
use crate::models::HistoryRecord;
use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row, Statement};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SNAPSHOT_PREFIX: &str = "export-chrome-history-";
const SNAPSHOT_FILE: &str = "History";
const HISTORY_QUERY: &str = "SELECT url, title FROM urls";

/// Private copy of a history store, deleted on drop
#[derive(Debug)]
pub struct Snapshot {
    dir: TempDir,
    db_path: PathBuf,
    source: PathBuf,
}

impl Snapshot {
    /// Copy `source` into a fresh directory under the system temp dir
    pub fn acquire(source: &Path) -> Result<Self> {
        Self::acquire_in(source, &std::env::temp_dir())
    }

    /// Copy `source` into a fresh directory under `root`
    pub fn acquire_in(source: &Path, root: &Path) -> Result<Self> {
        let copy_failed = |e| ExportError::CopyFailed {
            path: source.to_path_buf(),
            source: e,
        };

        let dir = tempfile::Builder::new()
            .prefix(SNAPSHOT_PREFIX)
            .tempdir_in(root)
            .map_err(copy_failed)?;
        let db_path = dir.path().join(SNAPSHOT_FILE);

        // `dir` is dropped (and removed) if the copy fails
        let bytes = fs::copy(source, &db_path).map_err(copy_failed)?;
        debug!(
            "Copied {} ({} bytes) to {}",
            source.display(),
            bytes,
            db_path.display()
        );

        Ok(Self {
            dir,
            db_path,
            source: source.to_path_buf(),
        })
    }

    /// Path of the copied database
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Temporary directory holding the copy
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// The live file the snapshot was taken from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Remove the directory now, reporting failures instead of ignoring them
    pub fn close(self) -> Result<()> {
        let dir = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| ExportError::CleanupFailed {
                path: dir.clone(),
                source,
            })?;
        debug!("Removed snapshot directory {}", dir.display());
        Ok(())
    }
}

/// Open handle on a snapshot's database
pub struct HistoryStore<'s> {
    conn: Connection,
    snapshot: &'s Snapshot,
}

impl<'s> HistoryStore<'s> {
    pub fn open(snapshot: &'s Snapshot) -> Result<Self> {
        let unreadable = |e| ExportError::UnreadableStore {
            path: snapshot.source().to_path_buf(),
            source: e,
        };

        let conn = Connection::open_with_flags(
            snapshot.path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(unreadable)?;

        // SQLite opens lazily; reading the schema is what rejects non-databases
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(unreadable)?;

        Ok(Self { conn, snapshot })
    }

    /// Prepare the history query; fails if the `urls` table or its columns are missing
    pub fn records(&self) -> Result<RecordQuery<'_>> {
        let source = self.snapshot.source();
        let stmt = self
            .conn
            .prepare(HISTORY_QUERY)
            .map_err(|e| query_failed(source, e))?;
        Ok(RecordQuery { stmt, source })
    }
}

/// Prepared history query
pub struct RecordQuery<'conn> {
    stmt: Statement<'conn>,
    source: &'conn Path,
}

impl RecordQuery<'_> {
    /// Rows in the storage engine's natural order, read lazily
    pub fn iter(&mut self) -> Result<impl Iterator<Item = Result<HistoryRecord>> + '_> {
        let source = self.source;
        let rows = self
            .stmt
            .query_map([], record_from_row)
            .map_err(|e| query_failed(source, e))?;
        Ok(rows.map(move |row| row.map_err(|e| query_failed(source, e))))
    }
}

fn query_failed(path: &Path, source: rusqlite::Error) -> ExportError {
    ExportError::QueryFailed {
        path: path.to_path_buf(),
        source,
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
    Ok(HistoryRecord {
        url: text_column(row, 0)?,
        title: text_column(row, 1)?,
    })
}

/// Read a column as text whatever its storage class; NULL becomes ""
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Null => String::new(),
    })
}
