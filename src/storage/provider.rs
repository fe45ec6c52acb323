//! Template provider storage.

use rusqlite::{OptionalExtension, Row};
use tracing::warn;

use crate::model::{DocRef, TemplateProvider};
use crate::registry::{LookupError, TemplateRegistry};

use super::{Result, Storage, StorageError};

impl Storage {
    /// Registers a provider, replacing any record at the same reference.
    ///
    /// # Errors
    ///
    /// Fails on a database or JSON encoding error.
    pub fn put_provider(&self, provider: &TemplateProvider) -> Result<()> {
        let spaces = serde_json::to_string(&provider.allowed_scopes)?;
        self.conn.execute(
            "INSERT INTO template_provider (reference, template, spaces)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(reference) DO UPDATE
             SET template = excluded.template, spaces = excluded.spaces",
            rusqlite::params![
                provider.reference.to_string(),
                provider.template.as_ref().map(ToString::to_string),
                spaces,
            ],
        )?;
        Ok(())
    }

    /// Loads the provider record at `reference`, if any.
    ///
    /// # Errors
    ///
    /// Fails on a database error or a row that does not decode.
    pub fn load_provider(&self, reference: &DocRef) -> Result<Option<TemplateProvider>> {
        let row = self
            .conn
            .query_row(
                "SELECT reference, template, spaces FROM template_provider WHERE reference = ?1",
                [reference.to_string()],
                read_row,
            )
            .optional()?;
        row.map(ProviderRow::into_provider).transpose()
    }

    /// Lists all providers, ordered by reference.
    ///
    /// # Errors
    ///
    /// Fails on a database error. Rows that do not decode are skipped.
    pub fn list_providers(&self) -> Result<Vec<TemplateProvider>> {
        let mut stmt = self
            .conn
            .prepare("SELECT reference, template, spaces FROM template_provider ORDER BY reference")?;
        let rows = stmt.query_map([], read_row)?;
        let mut providers = Vec::new();
        for row in rows {
            let row = row?;
            let reference = row.reference.clone();
            match row.into_provider() {
                Ok(provider) => providers.push(provider),
                Err(e) => {
                    warn!(provider = %reference, error = %e, "skipping unreadable provider record");
                }
            }
        }
        Ok(providers)
    }

    /// Removes a provider record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no provider is stored at `reference`.
    pub fn remove_provider(&self, reference: &DocRef) -> Result<()> {
        let rows = self.conn.execute(
            "DELETE FROM template_provider WHERE reference = ?1",
            [reference.to_string()],
        )?;
        if rows == 0 {
            return Err(StorageError::NotFound(reference.to_string()));
        }
        Ok(())
    }
}

impl TemplateRegistry for Storage {
    fn lookup_provider(
        &self,
        reference: &DocRef,
    ) -> core::result::Result<Option<TemplateProvider>, LookupError> {
        Ok(self.load_provider(reference)?)
    }

    fn list_provider_candidates(&self) -> core::result::Result<Vec<TemplateProvider>, LookupError> {
        Ok(self.list_providers()?)
    }
}

/// Raw column values of a provider row.
struct ProviderRow {
    reference: String,
    template: Option<String>,
    spaces: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ProviderRow> {
    Ok(ProviderRow {
        reference: row.get(0)?,
        template: row.get(1)?,
        spaces: row.get(2)?,
    })
}

impl ProviderRow {
    fn into_provider(self) -> Result<TemplateProvider> {
        let reference = parse_reference(&self.reference)?;
        let template = self.template.as_deref().map(parse_reference).transpose()?;
        Ok(TemplateProvider {
            reference,
            template,
            allowed_scopes: serde_json::from_str(&self.spaces)?,
        })
    }
}

fn parse_reference(value: &str) -> Result<DocRef> {
    value
        .parse()
        .map_err(|e| StorageError::Corrupt(format!("invalid reference {value}: {e}")))
}
