//! Document storage: existing content, keyed by reference.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, Row};
use serde::Serialize;

use crate::model::{ContentSnapshot, DocRef};
use crate::registry::{ContentStore, LookupError};

use super::{Result, Storage, StorageError};

/// A document row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub reference: DocRef,
    pub content: ContentSnapshot,
    pub updated_at: Timestamp,
}

impl Storage {
    /// Writes a document, replacing any existing content at the same reference.
    ///
    /// # Errors
    ///
    /// Fails on a database or JSON encoding error.
    pub fn put_document(&self, reference: &DocRef, content: &ContentSnapshot) -> Result<()> {
        let objects = serde_json::to_string(&content.objects)?;
        self.conn.execute(
            "INSERT INTO document (reference, body, objects, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(reference) DO UPDATE
             SET body = excluded.body, objects = excluded.objects, updated_at = excluded.updated_at",
            rusqlite::params![
                reference.to_string(),
                &content.body,
                objects,
                Timestamp::now().to_string(),
            ],
        )?;
        Ok(())
    }

    /// Loads a document, or `None` if nothing is stored at `reference`.
    ///
    /// # Errors
    ///
    /// Fails on a database error or a row that does not decode.
    pub fn load_document(&self, reference: &DocRef) -> Result<Option<StoredDocument>> {
        let row = self
            .conn
            .query_row(
                "SELECT reference, body, objects, updated_at FROM document WHERE reference = ?1",
                [reference.to_string()],
                read_row,
            )
            .optional()?;
        row.map(DocumentRow::into_document).transpose()
    }

    /// Removes a document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no document is stored at `reference`.
    pub fn delete_document(&self, reference: &DocRef) -> Result<()> {
        let rows = self.conn.execute(
            "DELETE FROM document WHERE reference = ?1",
            [reference.to_string()],
        )?;
        if rows == 0 {
            return Err(StorageError::NotFound(reference.to_string()));
        }
        Ok(())
    }

    /// Lists all documents, ordered by reference.
    ///
    /// # Errors
    ///
    /// Fails on a database error or a row that does not decode.
    pub fn list_documents(&self) -> Result<Vec<StoredDocument>> {
        let mut stmt = self.conn.prepare(
            "SELECT reference, body, objects, updated_at FROM document ORDER BY reference",
        )?;
        let rows = stmt.query_map([], read_row)?;
        let mut documents = Vec::new();
        for row in rows {
            documents.push(row?.into_document()?);
        }
        Ok(documents)
    }
}

impl ContentStore for Storage {
    fn lookup_content(
        &self,
        reference: &DocRef,
    ) -> core::result::Result<Option<ContentSnapshot>, LookupError> {
        Ok(self.load_document(reference)?.map(|d| d.content))
    }
}

/// Raw column values of a document row.
struct DocumentRow {
    reference: String,
    body: String,
    objects: String,
    updated_at: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<DocumentRow> {
    Ok(DocumentRow {
        reference: row.get(0)?,
        body: row.get(1)?,
        objects: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

impl DocumentRow {
    fn into_document(self) -> Result<StoredDocument> {
        let reference = self
            .reference
            .parse::<DocRef>()
            .map_err(|e| StorageError::Corrupt(format!("invalid reference {}: {e}", self.reference)))?;
        let updated_at = self
            .updated_at
            .parse::<Timestamp>()
            .map_err(|e| StorageError::Corrupt(format!("invalid updated_at: {e}")))?;
        Ok(StoredDocument {
            reference,
            content: ContentSnapshot {
                body: self.body,
                objects: serde_json::from_str(&self.objects)?,
            },
            updated_at,
        })
    }
}
