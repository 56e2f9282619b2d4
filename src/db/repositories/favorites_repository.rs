use std::convert::TryFrom;

use rusqlite::{Connection, Row};

use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct FavoriteRow {
    pub activity_id: String,
    pub created_at: String,
}

impl TryFrom<&Row<'_>> for FavoriteRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            activity_id: row.get("activity_id")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct FavoritesRepository;

impl FavoritesRepository {
    pub fn list(conn: &Connection) -> AppResult<Vec<String>> {
        let mut stmt =
            conn.prepare("SELECT activity_id, created_at FROM favorites ORDER BY created_at ASC")?;

        let rows = stmt
            .query_map([], |row| FavoriteRow::try_from(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows.into_iter().map(|row| row.activity_id).collect())
    }

    pub fn insert(conn: &Connection, activity_id: &str) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO favorites (activity_id)
                VALUES (?1)
                ON CONFLICT(activity_id) DO NOTHING
            "#,
            [activity_id],
        )?;

        Ok(())
    }

    pub fn delete(conn: &Connection, activity_id: &str) -> AppResult<()> {
        conn.execute("DELETE FROM favorites WHERE activity_id = ?1", [activity_id])?;
        Ok(())
    }
}
