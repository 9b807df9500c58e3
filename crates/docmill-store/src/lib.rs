//! Docmill Storage Layer
//!
//! Implements the `EntryStore` trait from `docmill-domain` on SQLite.
//!
//! # Architecture
//!
//! - SQLite for document metadata, processing jobs, and knowledge entries
//! - Tag and keyword lists stored as JSON text columns
//! - Ids stored as 16-byte big-endian blobs so primary keys sort by creation
//!   time (UUIDv7)
//!
//! # Examples
//!
//! ```no_run
//! use docmill_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for document and entry operations
//! ```

#![warn(missing_docs)]

use docmill_domain::traits::{EntryStore, JobStatus};
use docmill_domain::{DocumentId, EntryId, EntrySource, JobId, KnowledgeEntry, RawDocument};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of EntryStore
///
/// Persists document metadata, job lifecycle rows, and extracted entries.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use docmill_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("docmill.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn id_to_bytes(value: u128) -> Vec<u8> {
        value.to_be_bytes().to_vec()
    }

    fn bytes_to_id(bytes: &[u8]) -> Result<u128, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for id, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(u128::from_be_bytes(arr))
    }

    fn terms_to_json(terms: &[String]) -> Result<String, StoreError> {
        serde_json::to_string(terms)
            .map_err(|e| StoreError::InvalidData(format!("Failed to encode terms: {}", e)))
    }

    fn json_to_terms(json: &str) -> Result<Vec<String>, StoreError> {
        serde_json::from_str(json)
            .map_err(|e| StoreError::InvalidData(format!("Failed to decode terms: {}", e)))
    }

    /// How many documents have been stored.
    pub fn document_count(&self) -> Result<usize, StoreError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// The current status of a job, if the job exists.
    pub fn job_status(&self, job_id: JobId) -> Result<Option<JobStatus>, StoreError> {
        let status: Option<String> = self
            .conn
            .query_row(
                "SELECT status FROM processing_jobs WHERE id = ?1",
                params![Self::id_to_bytes(job_id.value())],
                |row| row.get(0),
            )
            .optional()?;

        match status {
            Some(s) => JobStatus::from_str_opt(&s)
                .map(Some)
                .ok_or_else(|| StoreError::InvalidData(format!("Unknown job status: {}", s))),
            None => Ok(None),
        }
    }

    fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<KnowledgeEntry> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Blob, Box::new(e))
        })?;

        let tags_json: String = row.get(6)?;
        let tags = Self::json_to_terms(&tags_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let keywords_json: String = row.get(7)?;
        let keywords = Self::json_to_terms(&keywords_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let source_str: String = row.get(10)?;
        let source = EntrySource::from_str_opt(&source_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                10,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown entry source: {}",
                    source_str
                ))),
            )
        })?;

        Ok(KnowledgeEntry {
            id: EntryId::from_value(id),
            title: row.get(2)?,
            content: row.get(3)?,
            category: row.get(4)?,
            subcategory: row.get(5)?,
            tags,
            keywords,
            priority: row.get(8)?,
            confidence_score: row.get(9)?,
            source,
            source_section: row.get(11)?,
            page_reference: row.get::<_, Option<i64>>(12)?.map(|p| p as u32),
            approved: row.get::<_, i64>(13)? != 0,
        })
    }
}

impl EntryStore for SqliteStore {
    type Error = StoreError;

    fn insert_document(
        &mut self,
        document: &RawDocument,
        page_count: u32,
    ) -> Result<DocumentId, Self::Error> {
        self.conn.execute(
            "INSERT INTO documents (id, name, media_type, size_bytes, page_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                Self::id_to_bytes(document.id.value()),
                &document.name,
                &document.media_type,
                document.size_bytes() as i64,
                page_count as i64,
                now_ms(),
            ],
        )?;
        Ok(document.id)
    }

    fn insert_job(&mut self, document_id: DocumentId) -> Result<JobId, Self::Error> {
        let job_id = JobId::new();
        let now = now_ms();
        self.conn.execute(
            "INSERT INTO processing_jobs (id, document_id, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                Self::id_to_bytes(job_id.value()),
                Self::id_to_bytes(document_id.value()),
                JobStatus::Pending.as_str(),
                now,
                now,
            ],
        )?;
        Ok(job_id)
    }

    fn update_job_status(&mut self, job_id: JobId, status: JobStatus) -> Result<(), Self::Error> {
        let updated = self.conn.execute(
            "UPDATE processing_jobs SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![
                status.as_str(),
                now_ms(),
                Self::id_to_bytes(job_id.value())
            ],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("job {}", job_id)));
        }
        Ok(())
    }

    fn insert_entries(
        &mut self,
        document_id: DocumentId,
        entries: &[KnowledgeEntry],
    ) -> Result<usize, Self::Error> {
        let document_bytes = Self::id_to_bytes(document_id.value());
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO knowledge_entries
                 (id, document_id, title, content, category, subcategory, tags, keywords,
                  priority, confidence_score, source, source_section, page_reference, approved)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    Self::id_to_bytes(entry.id.value()),
                    &document_bytes,
                    &entry.title,
                    &entry.content,
                    &entry.category,
                    &entry.subcategory,
                    Self::terms_to_json(&entry.tags)?,
                    Self::terms_to_json(&entry.keywords)?,
                    entry.priority,
                    entry.confidence_score,
                    entry.source.as_str(),
                    &entry.source_section,
                    entry.page_reference.map(|p| p as i64),
                    entry.approved as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(entries.len())
    }

    fn entries_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<KnowledgeEntry>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, document_id, title, content, category, subcategory, tags, keywords,
                    priority, confidence_score, source, source_section, page_reference, approved
             FROM knowledge_entries WHERE document_id = ?1 ORDER BY id",
        )?;

        let entries = stmt
            .query_map(
                params![Self::id_to_bytes(document_id.value())],
                Self::row_to_entry,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn approve_entry(&mut self, entry_id: EntryId, approved: bool) -> Result<(), Self::Error> {
        let updated = self.conn.execute(
            "UPDATE knowledge_entries SET approved = ?1 WHERE id = ?2",
            params![approved as i64, Self::id_to_bytes(entry_id.value())],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("entry {}", entry_id)));
        }
        Ok(())
    }

    fn delete_entry(&mut self, entry_id: EntryId) -> Result<(), Self::Error> {
        let deleted = self.conn.execute(
            "DELETE FROM knowledge_entries WHERE id = ?1",
            params![Self::id_to_bytes(entry_id.value())],
        )?;
        if deleted == 0 {
            return Err(StoreError::NotFound(format!("entry {}", entry_id)));
        }
        Ok(())
    }
}
