//! TursoStore - Embedded libsql Backend
//!
//! Store-trait implementation on top of Turso/libsql. Records are kept as
//! serialized JSON in a `data` column, one table per record family, with
//! plain lookup columns where a query needs them (`anchors.node_id`,
//! `links.anchor1_id` / `links.anchor2_id`). The hierarchy itself is encoded
//! inside each node's `filePath`, so the node table needs no relational
//! structure at all.
//!
//! # Connection Model
//!
//! The store opens one connection at construction and reuses it for every
//! operation. An `:memory:` database is private to its connection, so a
//! connection-per-operation scheme would observe a fresh empty database each
//! call; a single connection with a busy timeout also serializes concurrent
//! writers instead of surfacing `SQLITE_BUSY`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use weavenode_core::db::{NodeStore, TursoStore};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store: Arc<dyn NodeStore> =
//!         Arc::new(TursoStore::new(PathBuf::from("./data/weavenode.db")).await?);
//!     let node = store.find_node("text.123").await?;
//!     Ok(())
//! }
//! ```

use crate::db::error::DatabaseError;
use crate::db::{AnchorStore, LinkStore, NodeStore};
use crate::models::{Anchor, Link, Node};
use anyhow::Result;
use async_trait::async_trait;
use libsql::{Builder, Connection, Database};
use std::path::PathBuf;
use std::sync::Arc;

/// Embedded libsql record store backing all three record families.
pub struct TursoStore {
    /// libsql database handle; keeps the database alive for `conn`
    #[allow(dead_code)]
    db: Arc<Database>,

    /// The store's single long-lived connection
    conn: Connection,
}

impl TursoStore {
    /// Open (or create) the database at `db_path` and initialize the schema.
    ///
    /// Initialization is idempotent (`CREATE TABLE IF NOT EXISTS`), so
    /// reopening an existing database is safe.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the parent directory cannot be created,
    /// the connection cannot be established, or schema setup fails.
    pub async fn new(db_path: PathBuf) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| DatabaseError::connection_failed(db_path.clone(), e))?;

        let conn = db.connect().map_err(DatabaseError::LibsqlError)?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };

        store.initialize_schema().await?;

        Ok(store)
    }

    /// Open a throwaway in-memory database (tests, benchmarks).
    pub async fn new_in_memory() -> Result<Self, DatabaseError> {
        Self::new(PathBuf::from(":memory:")).await
    }

    /// Execute a PRAGMA statement.
    ///
    /// PRAGMA statements return rows, so this must use query() instead of
    /// execute().
    async fn execute_pragma(&self, pragma: &str) -> Result<(), DatabaseError> {
        let mut stmt = self.conn.prepare(pragma).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to prepare '{}': {}", pragma, e))
        })?;
        let _ = stmt.query(()).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        Ok(())
    }

    async fn initialize_schema(&self) -> Result<(), DatabaseError> {
        // WAL mode for better concurrency between readers and writers,
        // 5s busy timeout so contending writers wait instead of failing
        self.execute_pragma("PRAGMA journal_mode = WAL").await?;
        self.execute_pragma("PRAGMA busy_timeout = 5000").await?;

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS nodes (
                    id TEXT PRIMARY KEY,
                    data TEXT NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to create nodes table: {}", e))
            })?;

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS anchors (
                    id TEXT PRIMARY KEY,
                    node_id TEXT NOT NULL,
                    data TEXT NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to create anchors table: {}", e))
            })?;

        self.conn
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_anchors_node_id ON anchors(node_id)",
                (),
            )
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to index anchors: {}", e)))?;

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS links (
                    id TEXT PRIMARY KEY,
                    anchor1_id TEXT NOT NULL,
                    anchor2_id TEXT NOT NULL,
                    data TEXT NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to create links table: {}", e))
            })?;

        self.conn
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_links_anchor1_id ON links(anchor1_id)",
                (),
            )
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to index links: {}", e)))?;

        self.conn
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_links_anchor2_id ON links(anchor2_id)",
                (),
            )
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to index links: {}", e)))?;

        Ok(())
    }

    /// Run a single-column `data` query and decode each row.
    async fn query_records<T: serde::de::DeserializeOwned>(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<T>, DatabaseError> {
        let mut stmt = self.conn.prepare(sql).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to prepare '{}': {}", sql, e))
        })?;
        let mut rows = stmt.query(params).await.map_err(|e| {
            DatabaseError::sql_execution(format!("Failed to execute '{}': {}", sql, e))
        })?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::sql_execution(e.to_string()))?
        {
            let data: String = row
                .get(0)
                .map_err(|e| DatabaseError::sql_execution(e.to_string()))?;
            records.push(serde_json::from_str(&data)?);
        }
        Ok(records)
    }

    async fn find_record<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
    ) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT data FROM {} WHERE id = ?", table);
        let mut records: Vec<T> = self.query_records(&sql, [id]).await?;
        Ok(records.pop())
    }

    async fn delete_records(&self, table: &str, ids: &[String]) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", table);
        for id in ids {
            self.conn.execute(&sql, [id.as_str()]).await.map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to delete from {}: {}", table, e))
            })?;
        }
        Ok(())
    }

    async fn clear_table(&self, table: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute(&format!("DELETE FROM {}", table), ())
            .await
            .map_err(|e| {
                DatabaseError::sql_execution(format!("Failed to clear {}: {}", table, e))
            })?;
        Ok(())
    }
}

#[async_trait]
impl NodeStore for TursoStore {
    async fn insert_node(&self, node: Node) -> Result<()> {
        let data = serde_json::to_string(&node).map_err(DatabaseError::Serialization)?;
        self.conn
            .execute(
                "INSERT INTO nodes (id, data) VALUES (?, ?)",
                (node.node_id.as_str(), data.as_str()),
            )
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to insert node: {}", e)))?;
        Ok(())
    }

    async fn find_node(&self, id: &str) -> Result<Option<Node>> {
        Ok(self.find_record("nodes", id).await?)
    }

    async fn find_nodes(&self, ids: &[String]) -> Result<Vec<Node>> {
        let mut nodes = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(node) = self.find_node(id).await? {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    async fn find_all_nodes(&self) -> Result<Vec<Node>> {
        Ok(self
            .query_records("SELECT data FROM nodes ORDER BY rowid", ())
            .await?)
    }

    async fn replace_node(&self, node: Node) -> Result<()> {
        let data = serde_json::to_string(&node).map_err(DatabaseError::Serialization)?;
        let affected = self
            .conn
            .execute(
                "UPDATE nodes SET data = ? WHERE id = ?",
                (data.as_str(), node.node_id.as_str()),
            )
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to update node: {}", e)))?;
        if affected == 0 {
            anyhow::bail!("node '{}' does not exist", node.node_id);
        }
        Ok(())
    }

    async fn delete_nodes(&self, ids: &[String]) -> Result<()> {
        Ok(self.delete_records("nodes", ids).await?)
    }

    async fn clear_nodes(&self) -> Result<()> {
        Ok(self.clear_table("nodes").await?)
    }
}

#[async_trait]
impl AnchorStore for TursoStore {
    async fn insert_anchor(&self, anchor: Anchor) -> Result<()> {
        let data = serde_json::to_string(&anchor).map_err(DatabaseError::Serialization)?;
        self.conn
            .execute(
                "INSERT INTO anchors (id, node_id, data) VALUES (?, ?, ?)",
                (
                    anchor.anchor_id.as_str(),
                    anchor.node_id.as_str(),
                    data.as_str(),
                ),
            )
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to insert anchor: {}", e)))?;
        Ok(())
    }

    async fn find_anchor(&self, id: &str) -> Result<Option<Anchor>> {
        Ok(self.find_record("anchors", id).await?)
    }

    async fn find_anchors(&self, ids: &[String]) -> Result<Vec<Anchor>> {
        let mut anchors = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(anchor) = self.find_anchor(id).await? {
                anchors.push(anchor);
            }
        }
        Ok(anchors)
    }

    async fn find_anchors_by_node(&self, node_id: &str) -> Result<Vec<Anchor>> {
        Ok(self
            .query_records(
                "SELECT data FROM anchors WHERE node_id = ? ORDER BY rowid",
                [node_id],
            )
            .await?)
    }

    async fn replace_anchor(&self, anchor: Anchor) -> Result<()> {
        let data = serde_json::to_string(&anchor).map_err(DatabaseError::Serialization)?;
        let affected = self
            .conn
            .execute(
                "UPDATE anchors SET node_id = ?, data = ? WHERE id = ?",
                (
                    anchor.node_id.as_str(),
                    data.as_str(),
                    anchor.anchor_id.as_str(),
                ),
            )
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to update anchor: {}", e)))?;
        if affected == 0 {
            anyhow::bail!("anchor '{}' does not exist", anchor.anchor_id);
        }
        Ok(())
    }

    async fn delete_anchors(&self, ids: &[String]) -> Result<()> {
        Ok(self.delete_records("anchors", ids).await?)
    }

    async fn clear_anchors(&self) -> Result<()> {
        Ok(self.clear_table("anchors").await?)
    }
}

#[async_trait]
impl LinkStore for TursoStore {
    async fn insert_link(&self, link: Link) -> Result<()> {
        let data = serde_json::to_string(&link).map_err(DatabaseError::Serialization)?;
        self.conn
            .execute(
                "INSERT INTO links (id, anchor1_id, anchor2_id, data) VALUES (?, ?, ?, ?)",
                (
                    link.link_id.as_str(),
                    link.anchor1_id.as_str(),
                    link.anchor2_id.as_str(),
                    data.as_str(),
                ),
            )
            .await
            .map_err(|e| DatabaseError::sql_execution(format!("Failed to insert link: {}", e)))?;
        Ok(())
    }

    async fn find_link(&self, id: &str) -> Result<Option<Link>> {
        Ok(self.find_record("links", id).await?)
    }

    async fn find_links_by_anchor(&self, anchor_id: &str) -> Result<Vec<Link>> {
        Ok(self
            .query_records(
                "SELECT data FROM links WHERE anchor1_id = ? OR anchor2_id = ? ORDER BY rowid",
                (anchor_id, anchor_id),
            )
            .await?)
    }

    async fn delete_links(&self, ids: &[String]) -> Result<()> {
        Ok(self.delete_records("links", ids).await?)
    }

    async fn clear_links(&self) -> Result<()> {
        Ok(self.clear_table("links").await?)
    }
}
