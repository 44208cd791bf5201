//! Catalog store wiring.
//!
//! `model` carries the record type and the flat-file line codec, `store`
//! owns the in-memory collection and its persistence, and `history` appends
//! the issue/return ledger. Callers construct a [`Catalog`] over a
//! [`CatalogConfig`](crate::config::CatalogConfig) and go through its
//! operations; nothing else touches the files.

pub mod history;
pub mod model;
pub mod store;

pub use history::{HistoryAction, append_event};
pub use model::{Book, BookId, FIELD_DELIMITER, parse_line};
pub use store::{Catalog, CatalogSummary};
