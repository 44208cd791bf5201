//! Typed refusals returned by catalog operations.

use crate::catalog::model::BookId;
use thiserror::Error;

/// Reasons the store refuses an operation.
///
/// Every variant leaves the catalog and the storage file untouched. Storage
/// I/O problems are not represented here; those are reported as warnings and
/// never block the in-memory mutation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CatalogError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("author must not be empty")]
    EmptyAuthor,
    #[error("title must not contain ','")]
    DelimiterInTitle,
    #[error("author must not contain ','")]
    DelimiterInAuthor,
    #[error("book id must be greater than zero")]
    ZeroId,
    #[error("book id {0} already exists")]
    DuplicateId(BookId),
    #[error("book id {0} not found")]
    NotFound(BookId),
    #[error("book id {0} is already issued")]
    AlreadyIssued(BookId),
    #[error("book id {0} is not issued")]
    NotIssued(BookId),
}
