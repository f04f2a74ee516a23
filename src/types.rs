//! Shared domain types for the image catalog.
//!
//! The catalog's only real invariants live here:
//!
//! - [`ImageStatus`] is a closed enum: an invalid status string is rejected
//!   when it enters the system (deserialization or [`FromStr`]), never deep in
//!   business logic, and never persisted.
//! - [`Moderation`] folds the status and the trash timestamp into one tagged
//!   variant, so `trash_date` can only exist while an image is trashed.
//!   Leaving trash structurally drops the date.
//! - [`parse_price`] accepts what the admin UI actually sends (a JSON number
//!   or a numeric string) and rejects everything non-finite.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Moderation status of a cataloged image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    /// Awaiting review. Every image starts here.
    Pending,
    /// Publicly visible in the gallery.
    Approved,
    /// Rejected/retired. Still in the catalog, never deleted.
    Trash,
}

impl ImageStatus {
    /// The canonical lowercase form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStatus::Pending => "pending",
            ImageStatus::Approved => "approved",
            ImageStatus::Trash => "trash",
        }
    }
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid status {0:?} (expected pending, approved or trash)")]
pub struct ParseStatusError(pub String);

impl FromStr for ImageStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ImageStatus::Pending),
            "approved" => Ok(ImageStatus::Approved),
            "trash" => Ok(ImageStatus::Trash),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Moderation state with its side data folded in.
///
/// The `trash_date` exists only inside the [`Moderation::Trashed`] variant,
/// so any transition away from trash drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moderation {
    Pending,
    Approved,
    Trashed { at: DateTime<Utc> },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModerationStateError {
    #[error(transparent)]
    Status(#[from] ParseStatusError),
    #[error("trash row is missing its trash_date")]
    MissingTrashDate,
}

impl Moderation {
    /// The state an image enters when moderated into `status` at `now`.
    ///
    /// Any status is reachable from any other; only entering trash records
    /// a timestamp.
    pub fn enter(status: ImageStatus, now: DateTime<Utc>) -> Self {
        match status {
            ImageStatus::Pending => Moderation::Pending,
            ImageStatus::Approved => Moderation::Approved,
            ImageStatus::Trash => Moderation::Trashed { at: now },
        }
    }

    /// Reassemble from the two stored columns.
    ///
    /// A stray `trash_date` on a non-trash row (possible in databases written
    /// by older software that never cleared it) is dropped; the next status
    /// write heals the row. A trash row without a date is corrupt.
    pub fn from_parts(
        status: &str,
        trash_date: Option<DateTime<Utc>>,
    ) -> Result<Self, ModerationStateError> {
        match status.parse::<ImageStatus>()? {
            ImageStatus::Pending => Ok(Moderation::Pending),
            ImageStatus::Approved => Ok(Moderation::Approved),
            ImageStatus::Trash => trash_date
                .map(|at| Moderation::Trashed { at })
                .ok_or(ModerationStateError::MissingTrashDate),
        }
    }

    pub fn status(&self) -> ImageStatus {
        match self {
            Moderation::Pending => ImageStatus::Pending,
            Moderation::Approved => ImageStatus::Approved,
            Moderation::Trashed { .. } => ImageStatus::Trash,
        }
    }

    pub fn trash_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Moderation::Trashed { at } => Some(*at),
            _ => None,
        }
    }
}

/// A cataloged image as read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Surrogate key assigned by the store on creation. Immutable.
    pub id: i64,
    /// Content-directory-relative path, forward slashes. The natural key.
    pub filename: String,
    /// Status plus trash timestamp, folded.
    pub moderation: Moderation,
    /// Asking price. Absent until set by an admin.
    pub price: Option<f64>,
    /// Set once when the reconciler first saw the file.
    pub date_uploaded: DateTime<Utc>,
}

/// Listing filter: a single status or the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Only(ImageStatus),
    All,
}

impl StatusFilter {
    /// Interpret the admin dashboard's `status` query parameter.
    ///
    /// Missing means the moderation queue (pending); a value outside the
    /// three statuses means "all".
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            None => StatusFilter::Only(ImageStatus::Pending),
            Some(s) => s
                .parse()
                .map(StatusFilter::Only)
                .unwrap_or(StatusFilter::All),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::Only(s) => f.write_str(s.as_str()),
            StatusFilter::All => f.write_str("all"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid price {0:?} (expected a finite number)")]
pub struct InvalidPrice(pub String);

/// Parse the `price` field of an edit-price request.
///
/// Accepts a JSON number or a numeric string; absent (or JSON null) means
/// "clear the price". Non-finite values (NaN, infinities) are rejected.
pub fn parse_price(raw: Option<&serde_json::Value>) -> Result<Option<f64>, InvalidPrice> {
    use serde_json::Value;

    let invalid = |v: &Value| InvalidPrice(v.to_string());
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(v @ Value::Number(n)) => n
            .as_f64()
            .filter(|p| p.is_finite())
            .map(Some)
            .ok_or_else(|| invalid(v)),
        Some(v @ Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .map(Some)
            .ok_or_else(|| invalid(v)),
        Some(other) => Err(invalid(other)),
    }
}
