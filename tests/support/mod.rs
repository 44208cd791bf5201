use shelfmark::{Book, BookId, Catalog, CatalogConfig};
use std::path::Path;
use tempfile::TempDir;

pub fn temp_config(dir: &TempDir) -> CatalogConfig {
    CatalogConfig::new(
        dir.path().join("library.csv"),
        dir.path().join("history.csv"),
    )
}

pub fn open_catalog(dir: &TempDir) -> Catalog {
    Catalog::open(temp_config(dir))
}

pub fn book(id: u32, title: &str, author: &str) -> Book {
    Book::new(BookId(id), title, author)
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
