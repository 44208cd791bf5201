//! Append-only issue/return ledger.
//!
//! Events are written one per line as `id,action` and never read back by the
//! store; the file exists for external audit. Appends create the file on
//! first use and never truncate.

use crate::catalog::model::BookId;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Lifecycle event recorded when a book changes hands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HistoryAction {
    Issued,
    Returned,
}

impl HistoryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryAction::Issued => "Issued",
            HistoryAction::Returned => "Returned",
        }
    }
}

/// Append one event line to the ledger at `path`.
pub fn append_event(path: &Path, id: BookId, action: HistoryAction) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening history ledger {}", path.display()))?;
    writeln!(file, "{},{}", id, action.as_str())
        .with_context(|| format!("appending to history ledger {}", path.display()))?;
    Ok(())
}
