//! Book records and the flat-file line codec.
//!
//! The storage format is one record per line with four comma-separated
//! fields: `id,title,author,flag`, where the flag is the literal `1` or `0`.
//! There is no header line and no escaping; validation in the store keeps
//! the delimiter out of text fields, so stored lines always parse back.

use anyhow::{Result, bail};
use std::fmt;

/// Field delimiter shared by the catalog file and the history ledger.
pub const FIELD_DELIMITER: char = ',';

/// Positive integer identifier for a book record, unique within a catalog.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BookId(pub u32);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// A single catalog entry.
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub issued: bool,
}

impl Book {
    /// Create an available (not yet issued) record.
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            issued: false,
        }
    }

    /// Human-readable form of the issued flag.
    pub fn status_label(&self) -> &'static str {
        if self.issued { "Issued" } else { "Available" }
    }

    /// Render the record as one storage line (no trailing newline).
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.id,
            self.title,
            self.author,
            if self.issued { '1' } else { '0' }
        )
    }
}

/// Parse one storage line into a record.
///
/// Strict about shape: exactly four fields, a positive integer id, non-empty
/// text fields, and a literal `1`/`0` flag. Callers decide what to do with a
/// failed line; the store skips it and keeps loading.
pub fn parse_line(line: &str) -> Result<Book> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let [id, title, author, flag] = fields.as_slice() else {
        bail!(
            "expected 4 comma-separated fields, found {}",
            fields.len()
        );
    };

    let id: u32 = match id.parse() {
        Ok(value) => value,
        Err(_) => bail!("invalid id '{id}'"),
    };
    if id == 0 {
        bail!("id must be greater than zero");
    }
    if title.is_empty() {
        bail!("title is empty");
    }
    if author.is_empty() {
        bail!("author is empty");
    }
    let issued = match *flag {
        "1" => true,
        "0" => false,
        other => bail!("issued flag must be '1' or '0', got '{other}'"),
    };

    Ok(Book {
        id: BookId(id),
        title: (*title).to_string(),
        author: (*author).to_string(),
        issued,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_round_trips_both_flags() {
        let available = Book::new(BookId(7), "Dune", "Herbert");
        assert_eq!(available.to_line(), "7,Dune,Herbert,0");
        assert_eq!(parse_line(&available.to_line()).unwrap(), available);

        let mut issued = available.clone();
        issued.issued = true;
        assert_eq!(issued.to_line(), "7,Dune,Herbert,1");
        assert_eq!(parse_line(&issued.to_line()).unwrap(), issued);
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "",
            "1,Dune,Herbert",
            "1,Dune,Herbert,0,extra",
            "x,Dune,Herbert,0",
            "0,Dune,Herbert,0",
            "-3,Dune,Herbert,0",
            "1,,Herbert,0",
            "1,Dune,,0",
            "1,Dune,Herbert,yes",
        ] {
            assert!(parse_line(line).is_err(), "line should fail: {line:?}");
        }
    }

    #[test]
    fn status_label_tracks_flag() {
        let mut book = Book::new(BookId(1), "Emma", "Austen");
        assert_eq!(book.status_label(), "Available");
        book.issued = true;
        assert_eq!(book.status_label(), "Issued");
    }
}
