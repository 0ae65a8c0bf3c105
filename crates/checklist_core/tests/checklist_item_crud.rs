use checklist_core::db::open_db_in_memory;
use checklist_core::{
    Category, CategoryService, ChecklistItemService, EntityKind, ErrorKind, ServiceError,
    SqliteCategoryRepository, SqliteChecklistItemRepository, ValidationError,
};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;

fn item_service(
    conn: &Connection,
) -> ChecklistItemService<SqliteChecklistItemRepository<'_>, SqliteCategoryRepository<'_>> {
    ChecklistItemService::new(
        SqliteChecklistItemRepository::new(conn),
        SqliteCategoryRepository::new(conn),
    )
}

fn add_category(conn: &Connection, name: &str) -> Category {
    CategoryService::new(
        SqliteCategoryRepository::new(conn),
        SqliteChecklistItemRepository::new(conn),
    )
    .add_new_category(name)
    .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn create_and_find_item_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let category = add_category(&conn, "Home");
    let service = item_service(&conn);

    let created = service
        .add_new_item("Buy milk", Some(false), Some(date(2024, 1, 10)), &category.guid)
        .unwrap();

    assert!(!created.guid.is_empty());
    assert_eq!(created.description, "Buy milk");
    assert!(!created.is_completed);
    assert_eq!(created.date_end, date(2024, 1, 10));
    assert_eq!(created.date_post, Local::now().date_naive());
    assert_eq!(created.category, category);

    let found = service.find_item_by_guid(&created.guid).unwrap();
    assert_eq!(found, created);

    let all = service.find_all_items().unwrap();
    assert_eq!(all, vec![created]);
}

#[test]
fn create_item_generates_distinct_guids() {
    let conn = open_db_in_memory().unwrap();
    let category = add_category(&conn, "Home");
    let service = item_service(&conn);

    let first = service
        .add_new_item("Buy milk", Some(false), Some(date(2024, 1, 10)), &category.guid)
        .unwrap();
    let second = service
        .add_new_item("Buy bread", Some(false), Some(date(2024, 1, 11)), &category.guid)
        .unwrap();

    assert_ne!(first.guid, second.guid);
}

#[test]
fn create_item_with_unknown_category_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = item_service(&conn);

    let err = service
        .add_new_item("Buy milk", Some(false), Some(date(2024, 1, 10)), "no-such-guid")
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::Category,
            ref guid,
        } if *guid == "no-such-guid"
    ));
    assert!(service.find_all_items().unwrap().is_empty());
}

#[test]
fn create_item_validation_fails_one_rule_at_a_time() {
    let conn = open_db_in_memory().unwrap();
    let category = add_category(&conn, "Home");
    let service = item_service(&conn);

    // Every field is bad: the description rule wins.
    let err = service.add_new_item("", None, None, "").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankItemDescription)
    ));
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = service
        .add_new_item("  ", Some(true), Some(date(2024, 1, 1)), &category.guid)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankItemDescription)
    ));

    let err = service.add_new_item("Buy milk", None, None, "  ").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankCategoryGuid)
    ));

    let err = service
        .add_new_item("Buy milk", None, None, &category.guid)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingCompletionFlag)
    ));

    let err = service
        .add_new_item("Buy milk", Some(true), None, &category.guid)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingDueDate)
    ));

    // The gate runs before any store access.
    assert!(service.find_all_items().unwrap().is_empty());
}

#[test]
fn update_item_overwrites_supplied_fields() {
    let conn = open_db_in_memory().unwrap();
    let home = add_category(&conn, "Home");
    let work = add_category(&conn, "Work");
    let service = item_service(&conn);

    let created = service
        .add_new_item("Buy milk", Some(false), Some(date(2024, 1, 10)), &home.guid)
        .unwrap();

    let updated = service
        .update_item(
            &created.guid,
            Some("Buy oat milk"),
            Some(true),
            Some(date(2024, 2, 1)),
            Some(work.guid.as_str()),
        )
        .unwrap();

    assert_eq!(updated.guid, created.guid);
    assert_eq!(updated.description, "Buy oat milk");
    assert!(updated.is_completed);
    assert_eq!(updated.date_end, date(2024, 2, 1));
    assert_eq!(updated.date_post, created.date_post);
    assert_eq!(updated.category, work);

    let found = service.find_item_by_guid(&created.guid).unwrap();
    assert_eq!(found, updated);
}

#[test]
fn update_item_leaves_unsupplied_fields_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let home = add_category(&conn, "Home");
    let service = item_service(&conn);

    let created = service
        .add_new_item("Buy milk", Some(false), Some(date(2024, 1, 10)), &home.guid)
        .unwrap();

    let untouched = service
        .update_item(&created.guid, None, None, None, None)
        .unwrap();
    assert_eq!(untouched, created);

    // Blank strings count as "not supplied", they never blank out a field.
    let after_blank = service
        .update_item(&created.guid, Some("   "), None, None, Some(""))
        .unwrap();
    assert_eq!(after_blank.description, "Buy milk");
    assert_eq!(after_blank.category, home);

    // A single supplied field changes nothing else.
    let after_flag = service
        .update_item(&created.guid, None, Some(true), None, None)
        .unwrap();
    assert_eq!(after_flag.description, "Buy milk");
    assert!(after_flag.is_completed);
    assert_eq!(after_flag.date_end, date(2024, 1, 10));
    assert_eq!(after_flag.category, home);
}

#[test]
fn update_item_rejects_blank_guid_and_unknown_targets() {
    let conn = open_db_in_memory().unwrap();
    let home = add_category(&conn, "Home");
    let service = item_service(&conn);

    let err = service
        .update_item("  ", Some("x"), None, None, None)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankItemGuid)
    ));

    let err = service
        .update_item("no-such-guid", Some("x"), None, None, None)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::ChecklistItem,
            ..
        }
    ));

    let created = service
        .add_new_item("Buy milk", Some(false), Some(date(2024, 1, 10)), &home.guid)
        .unwrap();
    let err = service
        .update_item(&created.guid, None, None, None, Some("no-such-category"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::Category,
            ..
        }
    ));

    // The failed category swap did not persist anything.
    let found = service.find_item_by_guid(&created.guid).unwrap();
    assert_eq!(found, created);
}

#[test]
fn update_completion_status_toggles_only_the_flag() {
    let conn = open_db_in_memory().unwrap();
    let home = add_category(&conn, "Home");
    let service = item_service(&conn);

    let created = service
        .add_new_item("Buy milk", Some(false), Some(date(2024, 1, 10)), &home.guid)
        .unwrap();

    service.update_completion_status(&created.guid, true).unwrap();
    let completed = service.find_item_by_guid(&created.guid).unwrap();
    assert!(completed.is_completed);
    assert_eq!(completed.description, created.description);
    assert_eq!(completed.date_end, created.date_end);

    // No terminal state: completion toggles back freely.
    service.update_completion_status(&created.guid, false).unwrap();
    let reopened = service.find_item_by_guid(&created.guid).unwrap();
    assert!(!reopened.is_completed);
}

#[test]
fn update_completion_status_guards_guid_and_existence() {
    let conn = open_db_in_memory().unwrap();
    let service = item_service(&conn);

    let err = service.update_completion_status("", true).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankItemGuid)
    ));

    let err = service
        .update_completion_status("no-such-guid", true)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::ChecklistItem,
            ..
        }
    ));
}

#[test]
fn delete_item_removes_it() {
    let conn = open_db_in_memory().unwrap();
    let home = add_category(&conn, "Home");
    let service = item_service(&conn);

    let created = service
        .add_new_item("Buy milk", Some(false), Some(date(2024, 1, 10)), &home.guid)
        .unwrap();

    service.delete_item(&created.guid).unwrap();

    let err = service.find_item_by_guid(&created.guid).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::ChecklistItem,
            ..
        }
    ));
    assert!(service.find_all_items().unwrap().is_empty());
}

#[test]
fn delete_item_rejects_blank_and_unknown_guid() {
    let conn = open_db_in_memory().unwrap();
    let service = item_service(&conn);

    let err = service.delete_item("   ").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankItemGuid)
    ));

    let err = service.delete_item("no-such-guid").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::ChecklistItem,
            ..
        }
    ));
}
