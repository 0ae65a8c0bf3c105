//! Checklist item use-case service.
//!
//! # Responsibility
//! - Validate and orchestrate the item lifecycle, including the relational
//!   guard against a missing category.
//! - Assign creation metadata (`guid`, `date_post`) on behalf of callers.
//!
//! # Invariants
//! - The field validation gate runs before any store access on create.
//! - An item reference to a category is only written after the category has
//!   been resolved from the store.
//! - On update, a field changes only when the caller supplied a value.

use crate::model::category::Category;
use crate::model::checklist_item::ChecklistItem;
use crate::model::guid::has_text;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::checklist_item_repo::ChecklistItemRepository;
use crate::service::{
    map_store_failure, EntityKind, ServiceError, ServiceResult, ValidationError,
};
use chrono::{Local, NaiveDate};
use log::debug;

/// Use-case service for checklist item lifecycle operations.
pub struct ChecklistItemService<I: ChecklistItemRepository, C: CategoryRepository> {
    items: I,
    categories: C,
}

impl<I: ChecklistItemRepository, C: CategoryRepository> ChecklistItemService<I, C> {
    /// Creates a service using the provided store implementations.
    pub fn new(items: I, categories: C) -> Self {
        Self { items, categories }
    }

    /// Creates a new checklist item under an existing category.
    ///
    /// `date_post` is set to the current local date; callers never supply it.
    ///
    /// # Errors
    /// - `Validation` when a required field is blank or missing, reported one
    ///   rule at a time in gate order.
    /// - `NotFound` when `category_guid` resolves to no category.
    pub fn add_new_item(
        &self,
        description: &str,
        is_completed: Option<bool>,
        date_end: Option<NaiveDate>,
        category_guid: &str,
    ) -> ServiceResult<ChecklistItem> {
        let (is_completed, date_end) =
            validate_item_fields(description, is_completed, date_end, category_guid)?;

        let category = self.require_category(category_guid)?;
        let item = ChecklistItem::new(
            description,
            is_completed,
            date_end,
            Local::now().date_naive(),
            category,
        );
        self.items
            .save(&item)
            .map_err(|err| map_store_failure("item_create", &item.guid, err))?;

        debug!(
            "event=item_create module=service status=ok guid={} category_guid={}",
            item.guid, item.category.guid
        );

        Ok(item)
    }

    /// Updates an existing item, overwriting only the supplied fields.
    ///
    /// A blank string counts as "not supplied", matching the string guid/
    /// description rules on create. A supplied category guid must resolve to
    /// an existing category.
    ///
    /// # Errors
    /// - `Validation` when `guid` is blank.
    /// - `NotFound` when the item, or a supplied category guid, is unknown.
    pub fn update_item(
        &self,
        guid: &str,
        description: Option<&str>,
        is_completed: Option<bool>,
        date_end: Option<NaiveDate>,
        category_guid: Option<&str>,
    ) -> ServiceResult<ChecklistItem> {
        if !has_text(guid) {
            return Err(ServiceError::Validation(ValidationError::BlankItemGuid));
        }

        let mut item = self.require_item(guid)?;

        if let Some(description) = description {
            if has_text(description) {
                item.description = description.to_string();
            }
        }
        if let Some(is_completed) = is_completed {
            item.is_completed = is_completed;
        }
        if let Some(date_end) = date_end {
            item.date_end = date_end;
        }
        if let Some(category_guid) = category_guid {
            if has_text(category_guid) {
                item.category = self.require_category(category_guid)?;
            }
        }

        self.items
            .save(&item)
            .map_err(|err| map_store_failure("item_update", guid, err))?;

        debug!(
            "event=item_update module=service status=ok guid={} category_guid={}",
            item.guid, item.category.guid
        );

        Ok(item)
    }

    /// Looks one item up by guid.
    ///
    /// # Errors
    /// - `Validation` when `guid` is blank.
    /// - `NotFound` when no item has this guid.
    pub fn find_item_by_guid(&self, guid: &str) -> ServiceResult<ChecklistItem> {
        if !has_text(guid) {
            return Err(ServiceError::Validation(ValidationError::BlankItemGuid));
        }

        self.require_item(guid)
    }

    /// Returns all items in store order.
    pub fn find_all_items(&self) -> ServiceResult<Vec<ChecklistItem>> {
        Ok(self.items.find_all()?)
    }

    /// Deletes an existing item.
    ///
    /// # Errors
    /// - `Validation` when `guid` is blank.
    /// - `NotFound` when no item has this guid.
    pub fn delete_item(&self, guid: &str) -> ServiceResult<()> {
        if !has_text(guid) {
            return Err(ServiceError::Validation(ValidationError::BlankItemGuid));
        }

        let item = self.require_item(guid)?;
        self.items
            .delete(&item)
            .map_err(|err| map_store_failure("item_delete", guid, err))?;

        debug!("event=item_delete module=service status=ok guid={guid}");

        Ok(())
    }

    /// Sets only the completion flag of an existing item.
    ///
    /// # Errors
    /// - `Validation` when `guid` is blank.
    /// - `NotFound` when no item has this guid.
    pub fn update_completion_status(&self, guid: &str, is_completed: bool) -> ServiceResult<()> {
        if !has_text(guid) {
            return Err(ServiceError::Validation(ValidationError::BlankItemGuid));
        }

        let mut item = self.require_item(guid)?;
        if is_completed {
            item.complete();
        } else {
            item.reopen();
        }
        self.items
            .save(&item)
            .map_err(|err| map_store_failure("item_set_completed", guid, err))?;

        debug!(
            "event=item_set_completed module=service status=ok guid={guid} is_completed={is_completed}"
        );

        Ok(())
    }

    fn require_item(&self, guid: &str) -> ServiceResult<ChecklistItem> {
        self.items
            .find_by_guid(guid)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::ChecklistItem, guid))
    }

    fn require_category(&self, guid: &str) -> ServiceResult<Category> {
        self.categories
            .find_by_guid(guid)?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Category, guid))
    }
}

/// Validation gate for item creation.
///
/// Fails one rule at a time in fixed priority order: blank description,
/// blank category guid, missing completion flag, missing due date.
fn validate_item_fields(
    description: &str,
    is_completed: Option<bool>,
    date_end: Option<NaiveDate>,
    category_guid: &str,
) -> Result<(bool, NaiveDate), ServiceError> {
    if !has_text(description) {
        return Err(ServiceError::Validation(
            ValidationError::BlankItemDescription,
        ));
    }
    if !has_text(category_guid) {
        return Err(ServiceError::Validation(ValidationError::BlankCategoryGuid));
    }
    let is_completed = is_completed.ok_or(ServiceError::Validation(
        ValidationError::MissingCompletionFlag,
    ))?;
    let date_end = date_end.ok_or(ServiceError::Validation(ValidationError::MissingDueDate))?;
    Ok((is_completed, date_end))
}
