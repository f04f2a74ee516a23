//! SQLite-backed catalog store.
//!
//! Durable record of every known image and its moderation state. The schema
//! lives in `schema.sql` at the repository root, is embedded at compile time,
//! and is applied on every open; all statements are idempotent, so opening
//! an existing database is a no-op.
//!
//! ## Connection model
//!
//! One [`Catalog`] wraps one connection. There is no pooling and no shared
//! in-process cache: the HTTP layer opens a fresh catalog per request and the
//! reconciler opens one per run. Atomicity comes from SQLite itself: the
//! UNIQUE constraint on `filename` makes [`Catalog::create_if_absent`] safe
//! under concurrent ingestion, and every mutation is a single statement.
//!
//! Two concurrent status writes to the same id resolve last-writer-wins;
//! the domain is simple CRUD and needs no optimistic locking.

use crate::types::{ImageRecord, ImageStatus, Moderation, StatusFilter};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::Path;
use thiserror::Error;

const SCHEMA: &str = include_str!("../schema.sql");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// Handle to the catalog database.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open (creating if needed) the catalog at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory catalog (for tests).
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, CatalogError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert a new pending image unless one with this filename exists.
    ///
    /// Returns `true` if a row was created, `false` if the filename was
    /// already cataloged. Uniqueness is enforced by the storage layer, not a
    /// prior existence check. Existing rows are never touched; ingestion
    /// never resets moderation state.
    pub fn create_if_absent(
        &self,
        filename: &str,
        uploaded_at: DateTime<Utc>,
    ) -> Result<bool, CatalogError> {
        let inserted = self.conn.execute(
            "INSERT INTO images (filename, status, date_uploaded) VALUES (?1, ?2, ?3)",
            params![filename, ImageStatus::Pending.as_str(), uploaded_at],
        );
        match inserted {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List images matching `filter`, newest upload first.
    pub fn list(&self, filter: StatusFilter) -> Result<Vec<ImageRecord>, CatalogError> {
        const COLUMNS: &str = "id, filename, status, price, date_uploaded, trash_date";
        let rows = match filter {
            StatusFilter::Only(status) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {COLUMNS} FROM images WHERE status = ?1 ORDER BY date_uploaded DESC"
                ))?;
                let mapped = stmt.query_map(params![status.as_str()], record_from_row)?;
                mapped.collect::<Result<Vec<_>, _>>()?
            }
            StatusFilter::All => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {COLUMNS} FROM images ORDER BY date_uploaded DESC"
                ))?;
                let mapped = stmt.query_map([], record_from_row)?;
                mapped.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    /// Fetch a single image by id.
    pub fn get(&self, id: i64) -> Result<Option<ImageRecord>, CatalogError> {
        let record = self
            .conn
            .query_row(
                "SELECT id, filename, status, price, date_uploaded, trash_date
                 FROM images WHERE id = ?1",
                params![id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Apply a moderation transition. Returns `false` if `id` is unknown.
    ///
    /// Entering trash stamps `trash_date = now`; every other target status
    /// clears it, keeping `trash_date` present exactly while the image is
    /// trashed.
    pub fn update_status(&self, id: i64, status: ImageStatus) -> Result<bool, CatalogError> {
        let moderation = Moderation::enter(status, Utc::now());
        let changed = self.conn.execute(
            "UPDATE images SET status = ?1, trash_date = ?2 WHERE id = ?3",
            params![moderation.status().as_str(), moderation.trash_date(), id],
        )?;
        Ok(changed > 0)
    }

    /// Set or clear the price. Returns `false` if `id` is unknown.
    pub fn update_price(&self, id: i64, price: Option<f64>) -> Result<bool, CatalogError> {
        let changed = self.conn.execute(
            "UPDATE images SET price = ?1 WHERE id = ?2",
            params![price, id],
        )?;
        Ok(changed > 0)
    }

    /// Total rows, any status.
    pub fn count(&self) -> Result<i64, CatalogError> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
        Ok(n)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ImageRecord> {
    let status: String = row.get(2)?;
    let trash_date: Option<DateTime<Utc>> = row.get(5)?;
    let moderation = Moderation::from_parts(&status, trash_date)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    Ok(ImageRecord {
        id: row.get(0)?,
        filename: row.get(1)?,
        moderation,
        price: row.get(3)?,
        date_uploaded: row.get(4)?,
    })
}
