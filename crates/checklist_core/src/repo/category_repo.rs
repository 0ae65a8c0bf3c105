//! Category store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/save/delete primitives over the `categories` table.
//! - Surface the schema's name-uniqueness violation as a semantic error.
//!
//! # Invariants
//! - `save` upserts on `guid`: inserts a new row or replaces the name of an
//!   existing one, never reassigning identity.
//! - Write paths call `Category::validate()` before SQL mutations.

use crate::model::category::Category;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT guid, name FROM categories";

/// Store interface for category persistence.
pub trait CategoryRepository {
    /// Returns every category in store order.
    fn find_all(&self) -> RepoResult<Vec<Category>>;
    /// Looks one category up by guid.
    fn find_by_guid(&self, guid: &str) -> RepoResult<Option<Category>>;
    /// Looks one category up by exact name.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>>;
    /// Inserts the category, or replaces its name when the guid is known.
    fn save(&self, category: &Category) -> RepoResult<()>;
    /// Removes the category row.
    fn delete(&self, category: &Category) -> RepoResult<()>;
}

/// SQLite-backed category store.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!("{CATEGORY_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();

        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }

        Ok(categories)
    }

    fn find_by_guid(&self, guid: &str) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE guid = ?1;"))?;
        let mut rows = stmt.query(params![guid])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }

        Ok(None)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query(params![name])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, category: &Category) -> RepoResult<()> {
        category.validate()?;

        self.conn
            .execute(
                "INSERT INTO categories (guid, name)
                 VALUES (?1, ?2)
                 ON CONFLICT (guid) DO UPDATE SET name = excluded.name;",
                params![category.guid.as_str(), category.name.as_str()],
            )
            .map_err(|err| map_unique_name_violation(err, &category.name))?;

        Ok(())
    }

    fn delete(&self, category: &Category) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM categories WHERE guid = ?1;",
            params![category.guid.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(category.guid.clone()));
        }

        Ok(())
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let category = Category {
        guid: row.get("guid")?,
        name: row.get("name")?,
    };
    category.validate()?;
    Ok(category)
}

/// Translates the `categories.name` UNIQUE violation into the semantic
/// conflict the services expect; every other failure passes through as a
/// transport error.
fn map_unique_name_violation(err: rusqlite::Error, name: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(code, Some(ref message)) = err {
        if code.code == rusqlite::ErrorCode::ConstraintViolation
            && message.contains("categories.name")
        {
            return RepoError::DuplicateCategoryName(name.to_string());
        }
    }
    err.into()
}
