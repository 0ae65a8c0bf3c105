//! Category domain model.
//!
//! # Responsibility
//! - Define the named grouping entity that owns checklist items.
//!
//! # Invariants
//! - `guid` is assigned once at creation and never changes.
//! - `name` must be non-blank; cross-category uniqueness is enforced by the
//!   store's schema constraint, not here.

use crate::model::guid::{has_text, new_guid};
use crate::model::EntityValidationError;
use serde::{Deserialize, Serialize};

/// A named grouping entity. Items back-reference it by guid.
///
/// The store-side integer surrogate key is intentionally absent: the guid is
/// the only externally addressable identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Opaque global identifier, stable for the category lifetime.
    pub guid: String,
    /// Display name, unique across all categories.
    pub name: String,
}

impl Category {
    /// Creates a category with a freshly generated guid.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_guid(new_guid(), name)
    }

    /// Creates a category with a caller-provided guid.
    ///
    /// Used when rehydrating an entity whose identity already exists in the
    /// store.
    pub fn with_guid(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }

    /// Checks entity-level invariants before persistence.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        if !has_text(&self.guid) {
            return Err(EntityValidationError::BlankGuid("category"));
        }
        if !has_text(&self.name) {
            return Err(EntityValidationError::BlankCategoryName);
        }
        Ok(())
    }
}
