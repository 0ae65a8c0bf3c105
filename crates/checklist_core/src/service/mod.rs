//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Own the caller-input error taxonomy surfaced to the transport layer.
//!
//! # Invariants
//! - Services validate caller input before any store access.
//! - Every failure path is distinguishable by `ServiceError::kind()`.
//! - Services never retry and never swallow a store failure.

use crate::repo::RepoError;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_service;
pub mod checklist_item_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Converts a store failure into a service error, logging the internal
/// detail that never reaches the caller.
pub(crate) fn map_store_failure(event: &'static str, guid: &str, err: RepoError) -> ServiceError {
    let err = ServiceError::from(err);
    if let ServiceError::Internal(source) = &err {
        error!("event={event} module=service status=error guid={guid} error={source}");
    }
    err
}

/// Caller-supplied input failed a precondition. One rule per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    BlankCategoryName,
    BlankCategoryGuid,
    BlankItemGuid,
    BlankItemDescription,
    MissingCompletionFlag,
    MissingDueDate,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCategoryName => write!(f, "category name cannot be blank"),
            Self::BlankCategoryGuid => write!(f, "category guid cannot be blank"),
            Self::BlankItemGuid => write!(f, "checklist item guid cannot be blank"),
            Self::BlankItemDescription => {
                write!(f, "checklist item description cannot be blank")
            }
            Self::MissingCompletionFlag => {
                write!(f, "checklist item completion status is required")
            }
            Self::MissingDueDate => write!(f, "checklist item due date is required"),
        }
    }
}

/// Which entity a not-found failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    ChecklistItem,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::ChecklistItem => write!(f, "checklist item"),
        }
    }
}

/// An operation was refused because it would violate a relational or
/// uniqueness invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// The category still has items referencing it; deletion is refused,
    /// never cascaded.
    CategoryInUse { guid: String, item_count: usize },
    /// Another category already carries this name (store constraint).
    DuplicateCategoryName(String),
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CategoryInUse { guid, item_count } => write!(
                f,
                "category {guid} still has {item_count} checklist item(s) and cannot be deleted"
            ),
            Self::DuplicateCategoryName(name) => {
                write!(f, "category name already exists: `{name}`")
            }
        }
    }
}

/// Outcome class used by the transport boundary to pick its outward signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

/// Typed failure raised by the service layer.
#[derive(Debug)]
pub enum ServiceError {
    /// Bad caller input; never retried.
    Validation(ValidationError),
    /// A referenced guid does not exist.
    NotFound { entity: EntityKind, guid: String },
    /// A relational or uniqueness invariant would be violated.
    Conflict(ConflictError),
    /// Unexpected store failure; logged, surfaced without internal detail.
    Internal(RepoError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: EntityKind, guid: &str) -> Self {
        Self::NotFound {
            entity,
            guid: guid.to_string(),
        }
    }

    /// Returns the outcome class for outward mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, guid } => write!(f, "{entity} not found: {guid}"),
            Self::Conflict(err) => write!(f, "{err}"),
            // Internal detail stays in the logs.
            Self::Internal(_) => write!(f, "internal storage failure"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Internal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateCategoryName(name) => {
                Self::Conflict(ConflictError::DuplicateCategoryName(name))
            }
            other => Self::Internal(other),
        }
    }
}
