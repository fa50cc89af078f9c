// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Wraps the document database and the blob directory for shared access
//! across connections.

use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rusqlite::{params, Connection};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use seasync_core::document::{sort_documents, with_id};

use crate::error::{Result, ServerError};

const DB_FILE_NAME: &str = "documents.db";
const BLOB_DIR_NAME: &str = "blobs";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    collection TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
"#;

/// Shared server state containing the document database and blob store.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
}

struct ServerStateInner {
    /// The document database (protected by mutex for writes).
    db: Mutex<Connection>,
    /// Root directory for uploaded blobs.
    blob_dir: PathBuf,
    /// Base URL under which blobs are published.
    public_url: String,
    /// Mixed into generated ids so two inserts never collide.
    id_counter: AtomicU64,
}

impl ServerState {
    /// Creates a new server state with database and blobs in the given directory.
    pub fn new(data_dir: &Path, public_url: &str) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let blob_dir = data_dir.join(BLOB_DIR_NAME);
        std::fs::create_dir_all(&blob_dir)?;

        let conn = Connection::open(data_dir.join(DB_FILE_NAME))?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = FULL;")?;
        conn.execute_batch(SCHEMA)?;

        Ok(ServerState {
            inner: Arc::new(ServerStateInner {
                db: Mutex::new(conn),
                blob_dir,
                public_url: public_url.trim_end_matches('/').to_string(),
                id_counter: AtomicU64::new(0),
            }),
        })
    }

    /// Stores a document and returns its generated id.
    ///
    /// Any `id` field in the document is replaced by the generated one.
    pub async fn insert(&self, collection: &str, mut document: Value) -> Result<String> {
        let fields = document
            .as_object_mut()
            .ok_or_else(|| ServerError::Protocol("document must be a JSON object".to_string()))?;
        fields.remove("id");

        let id = self.generate_id(collection);
        let body = serde_json::to_string(&document)?;
        let created_at = chrono::Utc::now().timestamp_millis();

        let db = self.inner.db.lock().await;
        db.execute(
            "INSERT INTO documents (id, collection, body, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![id, collection, body, created_at],
        )?;
        Ok(id)
    }

    /// Returns every document of a collection, each carrying its `id`,
    /// ordered by `sort_field`.
    pub async fn list(
        &self,
        collection: &str,
        sort_field: &str,
        descending: bool,
    ) -> Result<Vec<Value>> {
        let rows = {
            let db = self.inner.db.lock().await;
            let mut stmt = db.prepare(
                "SELECT id, body FROM documents WHERE collection = ?1 ORDER BY created_at, rowid",
            )?;
            let rows = stmt
                .query_map(params![collection], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        };

        let mut documents = rows
            .into_iter()
            .map(|(id, body)| Ok(with_id(serde_json::from_str(&body)?, &id)))
            .collect::<Result<Vec<_>>>()?;
        sort_documents(&mut documents, sort_field, descending);
        Ok(documents)
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> Result<usize> {
        let db = self.inner.db.lock().await;
        let count: i64 = db.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Writes a blob and returns the URL it is published under.
    pub async fn store_blob(&self, path: &str, bytes: &[u8]) -> Result<String> {
        let target = self.blob_path(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        Ok(format!("{}/{}/{}", self.inner.public_url, BLOB_DIR_NAME, path))
    }

    /// Resolves a client-supplied blob path inside the blob directory.
    fn blob_path(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let valid = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(ServerError::InvalidPath(path.to_string()));
        }
        Ok(self.inner.blob_dir.join(relative))
    }

    fn generate_id(&self, collection: &str) -> String {
        let seq = self.inner.id_counter.fetch_add(1, Ordering::Relaxed);
        let input = format!(
            "{}{}{}",
            collection,
            seq,
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
        );
        let hash = Sha256::digest(input.as_bytes());
        let prefix = collection.split('_').next().unwrap_or(collection);
        format!("{}-{}", prefix, hex::encode(&hash[..6]))
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
