//! Label repository contracts and SQLite implementation.

use super::{ensure_tables, map_conflict, RepoError, RepoResult};
use crate::model::label::{normalize_color, Label, LabelId};
use rusqlite::{params, Connection, Row};

pub trait LabelRepository {
    /// Creates a label; the color is normalized to `#rrggbb`.
    fn create_label(&self, name: &str, color: &str) -> RepoResult<Label>;
    fn update_label_color(&self, id: LabelId, color: &str) -> RepoResult<()>;
    fn get_label(&self, id: LabelId) -> RepoResult<Option<Label>>;
    fn list_labels(&self) -> RepoResult<Vec<Label>>;
}

/// SQLite-backed label repository.
pub struct SqliteLabelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLabelRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["labels"])?;
        Ok(Self { conn })
    }
}

impl LabelRepository for SqliteLabelRepository<'_> {
    fn create_label(&self, name: &str, color: &str) -> RepoResult<Label> {
        Label::validate_name(name)?;
        let color = normalize_color(color)?;
        let name = name.trim();

        self.conn
            .execute(
                "INSERT INTO labels (name, color) VALUES (?1, ?2);",
                params![name, color],
            )
            .map_err(|err| map_conflict(err, "label", name))?;

        let id = self.conn.last_insert_rowid();
        self.get_label(id)?
            .ok_or_else(|| RepoError::not_found("label", id))
    }

    fn update_label_color(&self, id: LabelId, color: &str) -> RepoResult<()> {
        let color = normalize_color(color)?;
        let changed = self.conn.execute(
            "UPDATE labels SET color = ?1 WHERE id = ?2;",
            params![color, id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("label", id));
        }
        Ok(())
    }

    fn get_label(&self, id: LabelId) -> RepoResult<Option<Label>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color FROM labels WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_label_row(row)?));
        }
        Ok(None)
    }

    fn list_labels(&self) -> RepoResult<Vec<Label>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color FROM labels ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut labels = Vec::new();
        while let Some(row) = rows.next()? {
            labels.push(parse_label_row(row)?);
        }
        Ok(labels)
    }
}

fn parse_label_row(row: &Row<'_>) -> RepoResult<Label> {
    let color: String = row.get("color")?;
    let color = normalize_color(&color)
        .map_err(|_| RepoError::InvalidData(format!("invalid color `{color}` in labels.color")))?;
    Ok(Label {
        id: row.get("id")?,
        name: row.get("name")?,
        color,
    })
}
