//! # Vitrine
//!
//! A small marketplace-style image catalog. Your filesystem is the data
//! source: drop images into a content directory, reconcile them into a
//! SQLite catalog, then moderate and price them from an admin dashboard
//! while approved work shows in a public gallery with per-image inquiry
//! links.
//!
//! # Architecture: Reconcile, Then Serve
//!
//! Two independent entry points share one catalog:
//!
//! ```text
//! 1. Ingest   images/  →  site.db     (filesystem → pending catalog rows)
//! 2. Serve    site.db  →  HTTP        (gallery, dashboard, mutation API)
//! ```
//!
//! Ingestion is idempotent: re-running it inserts only files the catalog
//! has never seen and never touches existing moderation state, so it can
//! run any time, even while the server is up (each insert is independently
//! atomic behind the filename UNIQUE constraint).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Domain types: closed status enum, folded moderation state, price parsing |
//! | [`catalog`] | SQLite store: one connection per operation, idempotent schema |
//! | [`ingest`] | Content-directory reconciler |
//! | [`auth`] | Shared-token access gate with its three carriers |
//! | [`config`] | `config.toml` loading with env overrides for secrets |
//! | [`inquiry`] | WhatsApp inquiry deep links |
//! | [`server`] | axum router, handlers, maud views |
//! | [`output`] | CLI formatting for the ingest report |
//!
//! # Design Decisions
//!
//! ## Status As A Closed Enum
//!
//! An image is pending, approved, or trash; nothing else, ever. Status
//! strings are parsed at the boundary and rejected there; business logic
//! and storage only see [`types::ImageStatus`]. The trash timestamp lives
//! *inside* [`types::Moderation::Trashed`], so "trash date present iff
//! trashed" is not a rule anyone has to remember; it's the shape of the
//! type.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system: malformed markup is a build error, template
//! variables are Rust expressions, and all interpolation is auto-escaped.
//! No template directory to ship or get out of sync.
//!
//! ## SQLite, One Connection Per Operation
//!
//! The catalog is a single `rusqlite` (bundled) database. Nothing is
//! cached in-process; every request and every reconciler run opens its own
//! connection. Uniqueness and per-statement atomicity come from SQLite
//! itself, which is all the consistency this domain needs.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod ingest;
pub mod inquiry;
pub mod output;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
