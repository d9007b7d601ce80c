//! # vb-store-sqlite
//!
//! SQLite implementation of the store ports: vents, comments, and the
//! durable sequence counter. The counter allocation is a single upsert
//! with RETURNING, so increment-and-fetch is atomic at the storage layer
//! and two concurrent approvals can never be handed the same number.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;
use vb_core::error::{AppError, Result};
use vb_core::models::{Author, Comment, MessageRef, Vent, VentState};
use vb_core::traits::{CommentRepo, SequenceStore, VentRepo};

pub struct SqliteStore {
    pool: SqlitePool,
}

// Helpers for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Uuid {
    Uuid::from_slice(blob).unwrap_or_default()
}

fn state_to_str(state: VentState) -> &'static str {
    match state {
        VentState::Pending => "pending",
        VentState::Approved => "approved",
        VentState::Rejected => "rejected",
    }
}

fn state_from_str(raw: &str) -> VentState {
    match raw {
        "approved" => VentState::Approved,
        "rejected" => VentState::Rejected,
        _ => VentState::Pending,
    }
}

fn storage(err: sqlx::Error) -> AppError {
    AppError::Storage(err.to_string())
}

fn row_to_vent(row: &sqlx::sqlite::SqliteRow) -> Vent {
    Vent {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        author: Author {
            user_id: row.get("author_id"),
            username: row.get("author_username"),
            display_name: row.get("author_display_name"),
        },
        text: row.get("content"),
        state: state_from_str(&row.get::<String, _>("state")),
        public_number: row.get("public_number"),
        channel_message: row
            .get::<Option<String>, _>("channel_message")
            .map(MessageRef),
        comment_count: row.get("comment_count"),
        created_at: row.get("created_at"),
    }
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Comment {
    Comment {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        vent_id: blob_to_uuid(row.get::<Vec<u8>, _>("vent_id").as_slice()),
        author: Author {
            user_id: row.get("author_id"),
            username: row.get("author_username"),
            display_name: row.get("author_display_name"),
        },
        text: row.get("content"),
        created_at: row.get("created_at"),
    }
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS vents (
        id BLOB PRIMARY KEY,
        author_id TEXT NOT NULL,
        author_username TEXT,
        author_display_name TEXT,
        content TEXT NOT NULL,
        state TEXT NOT NULL,
        public_number INTEGER,
        channel_message TEXT,
        comment_count INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id BLOB PRIMARY KEY,
        vent_id BLOB NOT NULL,
        author_id TEXT NOT NULL,
        author_username TEXT,
        author_display_name TEXT,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS counters (
        key TEXT PRIMARY KEY,
        next_value INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_vents_state ON vents(state, created_at)",
    "CREATE INDEX IF NOT EXISTS idx_comments_vent ON comments(vent_id, created_at)",
];

impl SqliteStore {
    /// Open (creating if missing) and bootstrap the schema.
    ///
    /// SQLite allows a single writer; one pooled connection keeps write
    /// ordering trivial and makes `sqlite::memory:` URLs behave.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(storage)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(storage)?;

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(storage)?;
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl VentRepo for SqliteStore {
    async fn create_vent(&self, vent: &Vent) -> Result<()> {
        sqlx::query(
            "INSERT INTO vents (id, author_id, author_username, author_display_name, content,
                                state, public_number, channel_message, comment_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(vent.id))
        .bind(&vent.author.user_id)
        .bind(&vent.author.username)
        .bind(&vent.author.display_name)
        .bind(&vent.text)
        .bind(state_to_str(vent.state))
        .bind(vent.public_number)
        .bind(vent.channel_message.as_ref().map(|m| m.0.as_str()))
        .bind(vent.comment_count)
        .bind(vent.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }

    async fn get_vent(&self, id: Uuid) -> Result<Option<Vent>> {
        let row = sqlx::query("SELECT * FROM vents WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        Ok(row.as_ref().map(row_to_vent))
    }

    async fn list_pending(&self) -> Result<Vec<Vent>> {
        let rows = sqlx::query(
            "SELECT * FROM vents WHERE state = 'pending' ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        Ok(rows.iter().map(row_to_vent).collect())
    }

    /// The transition guard lives in the WHERE clause: only a row still
    /// in 'pending' is updated, and `rows_affected` reports who won.
    async fn mark_approved(&self, id: Uuid, public_number: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE vents SET state = 'approved', public_number = ?, comment_count = 0
             WHERE id = ? AND state = 'pending'",
        )
        .bind(public_number)
        .bind(uuid_to_blob(id))
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(result.rows_affected() == 1)
    }

    async fn mark_rejected(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE vents SET state = 'rejected' WHERE id = ? AND state = 'pending'",
        )
        .bind(uuid_to_blob(id))
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(result.rows_affected() == 1)
    }

    async fn record_publication(&self, id: Uuid, message: &MessageRef) -> Result<()> {
        sqlx::query("UPDATE vents SET channel_message = ? WHERE id = ?")
            .bind(&message.0)
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn bump_comment_count(&self, id: Uuid) -> Result<i64> {
        let row = sqlx::query(
            "UPDATE vents SET comment_count = comment_count + 1
             WHERE id = ? RETURNING comment_count",
        )
        .bind(uuid_to_blob(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        Ok(row.map(|r| r.get::<i64, _>(0)).unwrap_or(0))
    }
}

#[async_trait]
impl CommentRepo for SqliteStore {
    async fn create_comment(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, vent_id, author_id, author_username,
                                   author_display_name, content, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(comment.id))
        .bind(uuid_to_blob(comment.vent_id))
        .bind(&comment.author.user_id)
        .bind(&comment.author.username)
        .bind(&comment.author.display_name)
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }

    async fn list_for_vent(&self, vent_id: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT * FROM comments WHERE vent_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(uuid_to_blob(vent_id))
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        Ok(rows.iter().map(row_to_comment).collect())
    }
}

#[async_trait]
impl SequenceStore for SqliteStore {
    /// One statement, not a read followed by a write: the upsert creates
    /// the counter at `start` on first use and the RETURNING clause hands
    /// back the value that was just consumed.
    async fn allocate_next(&self, key: &str, start: i64) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO counters (key, next_value) VALUES (?, ? + 1)
             ON CONFLICT(key) DO UPDATE SET next_value = next_value + 1
             RETURNING next_value - 1",
        )
        .bind(key)
        .bind(start)
        .fetch_one(&self.pool)
        .await
        .map_err(storage)?;
        Ok(row.get::<i64, _>(0))
    }
}
