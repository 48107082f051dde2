//! SQLite-backed artifact persistence

use crate::error::IndexError;
use crate::index::{Artifact, ArtifactStore};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Persists one artifact row per document
///
/// Model, matrix and metadata are stored as JSON columns of the same row and
/// replaced together inside one transaction.
///
/// # Thread Safety
///
/// The connection is guarded by a mutex, so a single store can be shared
/// between threads.
///
/// # Examples
///
/// ```no_run
/// use clauseclear_store::{RetrievalIndex, SqliteArtifactStore};
///
/// let store = SqliteArtifactStore::new("clauseclear.db").unwrap();
/// let index = RetrievalIndex::with_store(Box::new(store));
/// ```
pub struct SqliteArtifactStore {
    conn: Mutex<Connection>,
}

impl SqliteArtifactStore {
    /// Open (or create) a store at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, IndexError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, IndexError> {
        self.conn
            .lock()
            .map_err(|_| IndexError::Persistence("connection lock poisoned".to_string()))
    }
}

impl ArtifactStore for SqliteArtifactStore {
    fn save(&self, document_id: &str, artifact: &Artifact) -> Result<(), IndexError> {
        let model = serde_json::to_string(&artifact.model)?;
        let matrix = serde_json::to_string(&artifact.matrix)?;
        let metadata = serde_json::to_string(&artifact.metadata)?;
        let shape = artifact.shape();
        let built_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM artifacts WHERE document_id = ?1",
            params![document_id],
        )?;
        tx.execute(
            "INSERT INTO artifacts (document_id, model, matrix, metadata, row_count, col_count, built_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                document_id,
                model,
                matrix,
                metadata,
                shape.rows as i64,
                shape.cols as i64,
                built_at,
            ],
        )?;
        tx.commit()?;

        debug!("Persisted index artifact for {}", document_id);
        Ok(())
    }

    fn load(&self, document_id: &str) -> Result<Option<Artifact>, IndexError> {
        let conn = self.conn()?;
        let row: Option<(String, String, String)> = conn
            .query_row(
                "SELECT model, matrix, metadata FROM artifacts WHERE document_id = ?1",
                params![document_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((model, matrix, metadata)) = row else {
            return Ok(None);
        };

        let artifact = Artifact {
            model: serde_json::from_str(&model)?,
            matrix: serde_json::from_str(&matrix)?,
            metadata: serde_json::from_str(&metadata)?,
        };

        if artifact.matrix.rows().len() != artifact.metadata.len() {
            return Err(IndexError::Persistence(format!(
                "artifact for {} has {} rows but {} metadata entries",
                document_id,
                artifact.matrix.rows().len(),
                artifact.metadata.len()
            )));
        }

        Ok(Some(artifact))
    }

    fn delete(&self, document_id: &str) -> Result<bool, IndexError> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM artifacts WHERE document_id = ?1",
            params![document_id],
        )?;
        Ok(removed > 0)
    }

    fn document_ids(&self) -> Result<Vec<String>, IndexError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT document_id FROM artifacts ORDER BY document_id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}
