//! Local persistence for wiki content and template providers.
//!
//! A single `SQLite` database holds both tables:
//!
//! ```text
//! <path>.sqlite
//!   document            reference, body, objects (JSON), updated_at
//!   template_provider   reference, template, spaces (JSON)
//! ```
//!
//! References are stored in their full string form (`wiki:Space.Page`).
//! [`Storage`] implements both collaborator traits, so a resolution can run
//! straight against it.

mod document;
mod provider;

use std::path::{Path, PathBuf};
use std::{fs, io};

use rusqlite::Connection;

pub use document::StoredDocument;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt data: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS document (
        reference   TEXT PRIMARY KEY,
        body        TEXT NOT NULL,
        objects     TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS template_provider (
        reference   TEXT PRIMARY KEY,
        template    TEXT,
        spaces      TEXT NOT NULL
    );
";

/// `SQLite`-backed wiki storage.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database at `path`.
    ///
    /// Parent directories are created if they don't exist.
    ///
    /// # Errors
    ///
    /// Fails if the parent directory cannot be created or the database
    /// cannot be opened or migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Returns the default database path: `~/.sprout/wiki.sqlite`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".sprout").join("wiki.sqlite"))
    }
}
