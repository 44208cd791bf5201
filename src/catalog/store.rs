//! In-memory catalog synchronized with flat-file storage.
//!
//! The store owns the authoritative record collection, insertion-ordered and
//! unique by id. Every successful mutation rewrites the whole storage file
//! before returning, so memory and disk only diverge when a write fails;
//! those failures are warned about and the in-memory state stays
//! authoritative for the rest of the session. Issue and return additionally
//! append to the history ledger, which is never read back.

use crate::catalog::history::{self, HistoryAction};
use crate::catalog::model::{Book, BookId, FIELD_DELIMITER, parse_line};
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use tracing::warn;

/// Authoritative in-memory book collection plus its storage locations.
pub struct Catalog {
    books: Vec<Book>,
    config: CatalogConfig,
}

/// Headline counts for the statistics report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CatalogSummary {
    pub total: usize,
    pub issued: usize,
    pub available: usize,
}

impl Catalog {
    /// Construct a store over the configured paths and load what is there.
    ///
    /// Load problems are warnings, not failures: a missing or partly
    /// malformed file still yields a usable (possibly empty) catalog.
    pub fn open(config: CatalogConfig) -> Self {
        let mut catalog = Self {
            books: Vec::new(),
            config,
        };
        for warning in catalog.load() {
            warn!("{warning}");
        }
        catalog
    }

    /// The paths this store reads and writes.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Replace the in-memory collection with the records on disk.
    ///
    /// Returns one message per problem instead of stopping at the first, so
    /// callers can surface everything that was dropped. A malformed line is
    /// skipped and loading continues; well-formed lines around it load
    /// normally. A line re-using an id already loaded is dropped the same
    /// way, keeping the uniqueness invariant even for hand-edited files.
    /// Blank lines are passed over silently.
    pub fn load(&mut self) -> Vec<String> {
        self.books.clear();
        let path = &self.config.storage_path;
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => {
                return vec![format!(
                    "could not read catalog file {}: {err}",
                    path.display()
                )];
            }
        };

        let mut warnings = Vec::new();
        for (idx, line) in data.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok(book) => {
                    if self.exists(book.id) {
                        warnings.push(format!(
                            "{}:{}: duplicate id {}, line dropped",
                            path.display(),
                            idx + 1,
                            book.id
                        ));
                        continue;
                    }
                    self.books.push(book);
                }
                Err(err) => warnings.push(format!(
                    "{}:{}: {err:#}, line skipped",
                    path.display(),
                    idx + 1
                )),
            }
        }
        warnings
    }

    /// Rewrite the storage file from the in-memory collection.
    pub fn save(&self) -> Result<()> {
        let mut data = String::new();
        for book in &self.books {
            data.push_str(&book.to_line());
            data.push('\n');
        }
        fs::write(&self.config.storage_path, data).with_context(|| {
            format!(
                "writing catalog file {}",
                self.config.storage_path.display()
            )
        })
    }

    pub fn exists(&self, id: BookId) -> bool {
        self.books.iter().any(|book| book.id == id)
    }

    /// Snapshot view of one record.
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Validate and append a record, then rewrite storage.
    pub fn add(&mut self, book: Book) -> Result<(), CatalogError> {
        validate_title(&book.title)?;
        validate_author(&book.author)?;
        if book.id.0 == 0 {
            return Err(CatalogError::ZeroId);
        }
        if self.exists(book.id) {
            return Err(CatalogError::DuplicateId(book.id));
        }
        self.books.push(book);
        self.persist();
        Ok(())
    }

    /// Replace title and/or author; an empty argument leaves that field
    /// alone.
    ///
    /// Both arguments empty is still a success when the id exists. A
    /// replacement is validated before anything is touched, so a rejected
    /// call leaves both fields as they were.
    pub fn update(
        &mut self,
        id: BookId,
        new_title: &str,
        new_author: &str,
    ) -> Result<(), CatalogError> {
        if !new_title.is_empty() {
            validate_title(new_title)?;
        }
        if !new_author.is_empty() {
            validate_author(new_author)?;
        }
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        if !new_title.is_empty() {
            book.title = new_title.to_string();
        }
        if !new_author.is_empty() {
            book.author = new_author.to_string();
        }
        self.persist();
        Ok(())
    }

    /// Remove a record, then rewrite storage.
    pub fn delete(&mut self, id: BookId) -> Result<(), CatalogError> {
        let idx = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        self.books.remove(idx);
        self.persist();
        Ok(())
    }

    /// Mark a book as issued and record the event in the ledger.
    pub fn issue(&mut self, id: BookId) -> Result<(), CatalogError> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        if book.issued {
            return Err(CatalogError::AlreadyIssued(id));
        }
        book.issued = true;
        self.persist();
        self.record(id, HistoryAction::Issued);
        Ok(())
    }

    /// Mark an issued book as returned and record the event in the ledger.
    pub fn return_book(&mut self, id: BookId) -> Result<(), CatalogError> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        if !book.issued {
            return Err(CatalogError::NotIssued(id));
        }
        book.issued = false;
        self.persist();
        self.record(id, HistoryAction::Returned);
        Ok(())
    }

    /// Case-insensitive substring match on title or author, or an exact
    /// match on the decimal id. The empty term matches every record.
    pub fn search(&self, term: &str) -> Vec<&Book> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
                    || book.id.to_string() == term
            })
            .collect()
    }

    /// All records in catalog order.
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    /// Records currently issued, in catalog order.
    pub fn issued(&self) -> Vec<&Book> {
        self.books.iter().filter(|book| book.issued).collect()
    }

    /// Records currently available, in catalog order.
    pub fn available(&self) -> Vec<&Book> {
        self.books.iter().filter(|book| !book.issued).collect()
    }

    /// Record counts per distinct author, keys in lexicographic order.
    pub fn stats_by_author(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for book in &self.books {
            *counts.entry(book.author.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Record counts per distinct title, keys in lexicographic order.
    pub fn stats_by_title(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for book in &self.books {
            *counts.entry(book.title.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn summary(&self) -> CatalogSummary {
        let issued = self.books.iter().filter(|book| book.issued).count();
        CatalogSummary {
            total: self.books.len(),
            issued,
            available: self.books.len() - issued,
        }
    }

    // Mutations are durable immediately or not at all for this session; a
    // failed write leaves memory authoritative and is only warned about.
    fn persist(&self) {
        if let Err(err) = self.save() {
            warn!("catalog left unsaved: {err:#}");
        }
    }

    fn record(&self, id: BookId, action: HistoryAction) {
        if let Err(err) = history::append_event(&self.config.history_path, id, action) {
            warn!("history event dropped: {err:#}");
        }
    }
}

fn validate_title(title: &str) -> Result<(), CatalogError> {
    if title.is_empty() {
        return Err(CatalogError::EmptyTitle);
    }
    if title.contains(FIELD_DELIMITER) {
        return Err(CatalogError::DelimiterInTitle);
    }
    Ok(())
}

fn validate_author(author: &str) -> Result<(), CatalogError> {
    if author.is_empty() {
        return Err(CatalogError::EmptyAuthor);
    }
    if author.contains(FIELD_DELIMITER) {
        return Err(CatalogError::DelimiterInAuthor);
    }
    Ok(())
}
