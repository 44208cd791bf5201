//! Flat-file library catalog.
//!
//! The crate keeps a small collection of book records in memory, rewrites a
//! one-record-per-line storage file after every mutation, and appends
//! issue/return events to a separate write-only ledger. Invariants (unique
//! positive ids, non-empty delimiter-free text fields) are enforced here; the
//! interactive `shelfmark` binary is a thin menu shell that collects input
//! and renders whatever the store returns.
//!
//! Storage paths are explicit construction parameters ([`CatalogConfig`]), so
//! independent store instances never collide. Storage I/O failures are
//! reported as warnings rather than errors: the in-memory catalog stays
//! authoritative for the rest of the session even when a write fails.

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{
    Book, BookId, Catalog, CatalogSummary, FIELD_DELIMITER, HistoryAction, append_event,
    parse_line,
};
pub use config::{CatalogConfig, resolve_config};
pub use error::CatalogError;
