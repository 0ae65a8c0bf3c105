//! Store layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the find/save/delete contracts consumed by the services.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Store writes must enforce entity `validate()` before persistence.
//! - Store APIs return semantic errors (duplicate name, invalid rows) in
//!   addition to DB transport errors.

use crate::db::DbError;
use crate::model::EntityValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod checklist_item_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic store error for checklist persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Entity failed write-path validation.
    Validation(EntityValidationError),
    /// UNIQUE constraint on `categories.name` was violated.
    DuplicateCategoryName(String),
    /// Write or delete touched a row that no longer exists.
    NotFound(String),
    /// Underlying SQLite transport failure.
    Db(DbError),
    /// A persisted row failed to parse back into a domain entity.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateCategoryName(name) => {
                write!(f, "category name already exists: `{name}`")
            }
            Self::NotFound(guid) => write!(f, "entity not found: {guid}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntityValidationError> for RepoError {
    fn from(value: EntityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
