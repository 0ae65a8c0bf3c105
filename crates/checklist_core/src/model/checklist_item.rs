//! Checklist item domain model.
//!
//! # Responsibility
//! - Define the task entity grouped under a category.
//! - Provide lifecycle helpers for the completion flag.
//!
//! # Invariants
//! - `guid` is stable and never reused for another item.
//! - `date_post` records the creation date and is never caller-supplied.
//! - `category` always points at a category that existed when the reference
//!   was last validated.

use crate::model::category::Category;
use crate::model::guid::{has_text, new_guid};
use crate::model::EntityValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single checklist entry.
///
/// Completion is a free toggle between `incomplete` and `complete`; there is
/// no terminal state, items stay editable and deletable either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Opaque global identifier, stable for the item lifetime.
    pub guid: String,
    /// What needs to be done. Must be non-blank.
    pub description: String,
    /// Completion flag, freely toggled.
    pub is_completed: bool,
    /// Due/target date.
    pub date_end: NaiveDate,
    /// Creation date, assigned by the service at creation time.
    pub date_post: NaiveDate,
    /// The owning category, resolved at reference-validation time.
    pub category: Category,
}

impl ChecklistItem {
    /// Creates an item with a freshly generated guid.
    pub fn new(
        description: impl Into<String>,
        is_completed: bool,
        date_end: NaiveDate,
        date_post: NaiveDate,
        category: Category,
    ) -> Self {
        Self {
            guid: new_guid(),
            description: description.into(),
            is_completed,
            date_end,
            date_post,
            category,
        }
    }

    /// Marks the item as done.
    pub fn complete(&mut self) {
        self.is_completed = true;
    }

    /// Puts the item back into the open state.
    pub fn reopen(&mut self) {
        self.is_completed = false;
    }

    /// Returns whether the item still needs attention.
    pub fn is_open(&self) -> bool {
        !self.is_completed
    }

    /// Checks entity-level invariants before persistence.
    ///
    /// The embedded category is validated too, so a write can never record a
    /// reference to an identity-less category.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        if !has_text(&self.guid) {
            return Err(EntityValidationError::BlankGuid("checklist item"));
        }
        if !has_text(&self.description) {
            return Err(EntityValidationError::BlankItemDescription);
        }
        self.category.validate()
    }
}
