//! Item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist items and their category membership.
//! - Own the ordered item↔label link table.
//!
//! # Invariants
//! - Lists come back in insertion order (`rowid`).
//! - Label set replacement runs in one transaction with any item write it
//!   accompanies, keeps the caller's order and collapses duplicate ids.

use super::{ensure_tables, RepoError, RepoResult};
use crate::model::category::CategoryId;
use crate::model::item::{Item, ItemId};
use crate::model::label::{Label, LabelId};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::collections::HashSet;
use uuid::Uuid;

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    created_at,
    due_date,
    completion_date,
    category_id
FROM items";

pub trait ItemRepository {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId>;
    /// Inserts the item and its label set atomically.
    fn create_item_with_labels(
        &mut self,
        item: &Item,
        label_ids: &[LabelId],
    ) -> RepoResult<ItemId>;
    /// Overwrites name and dates; category membership is left untouched.
    fn update_item(&self, item: &Item) -> RepoResult<()>;
    /// `update_item` plus a full label replacement, atomically.
    fn update_item_with_labels(&mut self, item: &Item, label_ids: &[LabelId]) -> RepoResult<()>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    fn list_items(&self) -> RepoResult<Vec<Item>>;
    fn list_items_in_category(&self, category_id: CategoryId) -> RepoResult<Vec<Item>>;
    fn set_item_category(&self, id: ItemId, category_id: CategoryId) -> RepoResult<()>;
    fn set_item_labels(&mut self, id: ItemId, label_ids: &[LabelId]) -> RepoResult<()>;
    fn labels_for_item(&self, id: ItemId) -> RepoResult<Vec<Label>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["items", "labels", "item_labels"])?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId> {
        item.validate()?;
        insert_item(self.conn, item)?;
        Ok(item.uuid)
    }

    fn create_item_with_labels(
        &mut self,
        item: &Item,
        label_ids: &[LabelId],
    ) -> RepoResult<ItemId> {
        item.validate()?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        insert_item(&tx, item)?;
        replace_labels(&tx, item.uuid, label_ids)?;
        tx.commit()?;
        Ok(item.uuid)
    }

    fn update_item(&self, item: &Item) -> RepoResult<()> {
        item.validate()?;
        update_item_row(self.conn, item)
    }

    fn update_item_with_labels(&mut self, item: &Item, label_ids: &[LabelId]) -> RepoResult<()> {
        item.validate()?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        update_item_row(&tx, item)?;
        replace_labels(&tx, item.uuid, label_ids)?;
        tx.commit()?;
        Ok(())
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }
        Ok(None)
    }

    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn list_items_in_category(&self, category_id: CategoryId) -> RepoResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL} WHERE category_id = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([category_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }

    fn set_item_category(&self, id: ItemId, category_id: CategoryId) -> RepoResult<()> {
        let category_exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1);",
            [category_id],
            |row| row.get(0),
        )?;
        if category_exists != 1 {
            return Err(RepoError::not_found("category", category_id));
        }

        let changed = self.conn.execute(
            "UPDATE items SET category_id = ?1 WHERE uuid = ?2;",
            params![category_id, id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("item", id));
        }
        Ok(())
    }

    fn set_item_labels(&mut self, id: ItemId, label_ids: &[LabelId]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !item_exists(&tx, id)? {
            return Err(RepoError::not_found("item", id));
        }
        replace_labels(&tx, id, label_ids)?;
        tx.commit()?;
        Ok(())
    }

    fn labels_for_item(&self, id: ItemId) -> RepoResult<Vec<Label>> {
        let mut stmt = self.conn.prepare(
            "SELECT l.id, l.name, l.color
             FROM item_labels il
             INNER JOIN labels l ON l.id = il.label_id
             WHERE il.item_uuid = ?1
             ORDER BY il.position ASC;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut labels = Vec::new();
        while let Some(row) = rows.next()? {
            labels.push(Label {
                id: row.get(0)?,
                name: row.get(1)?,
                color: row.get(2)?,
            });
        }
        Ok(labels)
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in items.uuid"))
    })?;

    let item = Item {
        uuid,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        due_date: row.get("due_date")?,
        completion_date: row.get("completion_date")?,
        category_id: row.get("category_id")?,
    };
    item.validate()?;
    Ok(item)
}

fn insert_item(conn: &Connection, item: &Item) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO items (
            uuid,
            name,
            created_at,
            due_date,
            completion_date,
            category_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            item.uuid.to_string(),
            item.name.as_str(),
            item.created_at,
            item.due_date,
            item.completion_date,
            item.category_id,
        ],
    )?;
    Ok(())
}

fn update_item_row(conn: &Connection, item: &Item) -> RepoResult<()> {
    let changed = conn.execute(
        "UPDATE items
         SET
            name = ?1,
            due_date = ?2,
            completion_date = ?3
         WHERE uuid = ?4;",
        params![
            item.name.as_str(),
            item.due_date,
            item.completion_date,
            item.uuid.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(RepoError::not_found("item", item.uuid));
    }
    Ok(())
}

/// Rewrites the link rows of `id`. Callers own the surrounding transaction.
fn replace_labels(conn: &Connection, id: ItemId, label_ids: &[LabelId]) -> RepoResult<()> {
    let id_text = id.to_string();
    conn.execute(
        "DELETE FROM item_labels WHERE item_uuid = ?1;",
        [id_text.as_str()],
    )?;

    let mut seen = HashSet::new();
    let mut position: i64 = 0;
    for label_id in label_ids {
        if !seen.insert(*label_id) {
            continue;
        }
        let inserted = conn.execute(
            "INSERT INTO item_labels (item_uuid, label_id, position)
             SELECT ?1, id, ?3
             FROM labels
             WHERE id = ?2;",
            params![id_text.as_str(), label_id, position],
        )?;
        if inserted == 0 {
            return Err(RepoError::not_found("label", label_id));
        }
        position += 1;
    }
    Ok(())
}

fn item_exists(conn: &Connection, id: ItemId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM items WHERE uuid = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
