//! Checklist item store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/save/delete primitives over the `checklist_items` table.
//! - Rehydrate the embedded category on every read via a join.
//!
//! # Invariants
//! - `save` upserts on `guid`; identity is never reassigned.
//! - Write paths call `ChecklistItem::validate()` before SQL mutations.
//! - Read paths reject unparseable persisted state instead of masking it.

use crate::model::category::Category;
use crate::model::checklist_item::ChecklistItem;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const ITEM_SELECT_SQL: &str = "SELECT
    i.guid,
    i.description,
    i.is_completed,
    i.date_end,
    i.date_post,
    c.guid AS category_guid,
    c.name AS category_name
FROM checklist_items i
JOIN categories c ON c.guid = i.category_guid";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Store interface for checklist item persistence.
pub trait ChecklistItemRepository {
    /// Returns every item in store order.
    fn find_all(&self) -> RepoResult<Vec<ChecklistItem>>;
    /// Looks one item up by guid.
    fn find_by_guid(&self, guid: &str) -> RepoResult<Option<ChecklistItem>>;
    /// Returns every item referencing the given category guid.
    fn find_by_category_guid(&self, category_guid: &str) -> RepoResult<Vec<ChecklistItem>>;
    /// Inserts the item, or replaces its mutable fields when the guid is known.
    fn save(&self, item: &ChecklistItem) -> RepoResult<()>;
    /// Removes the item row.
    fn delete(&self, item: &ChecklistItem) -> RepoResult<()>;
}

/// SQLite-backed checklist item store.
pub struct SqliteChecklistItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChecklistItemRepository<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ChecklistItemRepository for SqliteChecklistItemRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<ChecklistItem>> {
        let mut stmt = self.conn.prepare(&format!("{ITEM_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn find_by_guid(&self, guid: &str) -> RepoResult<Option<ChecklistItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE i.guid = ?1;"))?;
        let mut rows = stmt.query(params![guid])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn find_by_category_guid(&self, category_guid: &str) -> RepoResult<Vec<ChecklistItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE i.category_guid = ?1;"))?;
        let mut rows = stmt.query(params![category_guid])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn save(&self, item: &ChecklistItem) -> RepoResult<()> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO checklist_items (
                guid,
                description,
                is_completed,
                date_end,
                date_post,
                category_guid
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (guid) DO UPDATE SET
                description = excluded.description,
                is_completed = excluded.is_completed,
                date_end = excluded.date_end,
                date_post = excluded.date_post,
                category_guid = excluded.category_guid;",
            params![
                item.guid.as_str(),
                item.description.as_str(),
                bool_to_int(item.is_completed),
                item.date_end.format(DATE_FORMAT).to_string(),
                item.date_post.format(DATE_FORMAT).to_string(),
                item.category.guid.as_str(),
            ],
        )?;

        Ok(())
    }

    fn delete(&self, item: &ChecklistItem) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM checklist_items WHERE guid = ?1;",
            params![item.guid.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.guid.clone()));
        }

        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ChecklistItem> {
    let is_completed = match row.get::<_, i64>("is_completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_completed value `{other}` in checklist_items.is_completed"
            )));
        }
    };

    let item = ChecklistItem {
        guid: row.get("guid")?,
        description: row.get("description")?,
        is_completed,
        date_end: parse_date_column(row, "date_end")?,
        date_post: parse_date_column(row, "date_post")?,
        category: Category {
            guid: row.get("category_guid")?,
            name: row.get("category_name")?,
        },
    };
    item.validate()?;
    Ok(item)
}

fn parse_date_column(row: &Row<'_>, column: &'static str) -> RepoResult<NaiveDate> {
    let text: String = row.get(column)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{text}` in checklist_items.{column}"
        ))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
