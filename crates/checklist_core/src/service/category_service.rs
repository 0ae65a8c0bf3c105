//! Category use-case service.
//!
//! # Responsibility
//! - Validate and orchestrate the category lifecycle; sole writer of
//!   category entities.
//! - Enforce the referential guard against deleting a referenced category.
//!
//! # Invariants
//! - Caller input is validated before any store access.
//! - A category guid never changes after creation.
//! - Deletion of a referenced category is refused, never cascaded.

use crate::model::category::Category;
use crate::model::guid::has_text;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::checklist_item_repo::ChecklistItemRepository;
use crate::service::{
    map_store_failure, ConflictError, EntityKind, ServiceError, ServiceResult, ValidationError,
};
use log::debug;

/// Use-case service for category lifecycle operations.
///
/// Holds direct references to the two stores it consults; no state is kept
/// between calls.
pub struct CategoryService<C: CategoryRepository, I: ChecklistItemRepository> {
    categories: C,
    items: I,
}

impl<C: CategoryRepository, I: ChecklistItemRepository> CategoryService<C, I> {
    /// Creates a service using the provided store implementations.
    pub fn new(categories: C, items: I) -> Self {
        Self { categories, items }
    }

    /// Creates a new category with a fresh guid.
    ///
    /// # Errors
    /// - `Validation` when `name` is blank.
    /// - `Conflict` when another category already carries this name.
    pub fn add_new_category(&self, name: &str) -> ServiceResult<Category> {
        if !has_text(name) {
            return Err(ServiceError::Validation(ValidationError::BlankCategoryName));
        }

        let category = Category::new(name);
        self.categories
            .save(&category)
            .map_err(|err| map_store_failure("category_create", &category.guid, err))?;

        debug!(
            "event=category_create module=service status=ok guid={} name={}",
            category.guid, category.name
        );

        Ok(category)
    }

    /// Renames an existing category; the guid is unchanged.
    ///
    /// # Errors
    /// - `Validation` when `guid` or `name` is blank.
    /// - `NotFound` when no category has this guid.
    /// - `Conflict` when the new name already belongs to another category.
    pub fn update_category(&self, guid: &str, name: &str) -> ServiceResult<Category> {
        if !has_text(guid) {
            return Err(ServiceError::Validation(ValidationError::BlankCategoryGuid));
        }
        if !has_text(name) {
            return Err(ServiceError::Validation(ValidationError::BlankCategoryName));
        }

        let mut category = self.require_category(guid)?;
        category.name = name.to_string();
        self.categories
            .save(&category)
            .map_err(|err| map_store_failure("category_update", guid, err))?;

        debug!(
            "event=category_update module=service status=ok guid={} name={}",
            category.guid, category.name
        );

        Ok(category)
    }

    /// Deletes a category that no checklist item references.
    ///
    /// # Errors
    /// - `Validation` when `guid` is blank.
    /// - `NotFound` when no category has this guid.
    /// - `Conflict` when at least one item still references the category.
    pub fn delete_category(&self, guid: &str) -> ServiceResult<()> {
        if !has_text(guid) {
            return Err(ServiceError::Validation(ValidationError::BlankCategoryGuid));
        }

        let category = self.require_category(guid)?;

        // Explicit referencing-items query; the check-then-delete sequence is
        // not atomic against a concurrent item creation (accepted race).
        let referencing = self
            .items
            .find_by_category_guid(guid)
            .map_err(|err| map_store_failure("category_delete", guid, err))?;
        if !referencing.is_empty() {
            return Err(ServiceError::Conflict(ConflictError::CategoryInUse {
                guid: guid.to_string(),
                item_count: referencing.len(),
            }));
        }

        self.categories
            .delete(&category)
            .map_err(|err| map_store_failure("category_delete", guid, err))?;

        debug!("event=category_delete module=service status=ok guid={guid}");

        Ok(())
    }

    /// Returns all categories in store order.
    pub fn find_all_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.categories.find_all()?)
    }

    /// Looks one category up by guid.
    ///
    /// # Errors
    /// - `Validation` when `guid` is blank.
    /// - `NotFound` when no category has this guid.
    pub fn find_category_by_guid(&self, guid: &str) -> ServiceResult<Category> {
        if !has_text(guid) {
            return Err(ServiceError::Validation(ValidationError::BlankCategoryGuid));
        }

        self.require_category(guid)
    }

    fn require_category(&self, guid: &str) -> ServiceResult<Category> {
        self.categories
            .find_by_guid(guid)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Category, guid))
    }
}
