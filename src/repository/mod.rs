use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::models::{Note, NoteColor};

const CREATE_NOTES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        color TEXT NOT NULL
    )";

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub fn new(database_path: impl AsRef<Path>) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(database_path.as_ref())?;

        tracing::info!("Opened note database at {}", database_path.as_ref().display());

        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, rusqlite::Error> {
        let repo = Self {
            conn: Connection::open_in_memory()?,
        };
        repo.migrate()?;
        Ok(repo)
    }

    /// Creates the notes table if it does not exist yet.
    pub fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(CREATE_NOTES_TABLE)?;

        tracing::info!("DB schema ready");

        Ok(())
    }

    pub fn create_note(
        &self,
        title: &str,
        content: &str,
        timestamp: &str,
        color: NoteColor,
    ) -> Result<Note, rusqlite::Error> {
        self.conn.query_row(
            "INSERT INTO notes (title, content, timestamp, color) VALUES (?1, ?2, ?3, ?4) \
             RETURNING id, title, content, timestamp, color",
            params![title, content, timestamp, color],
            note_from_row,
        )
    }

    pub fn update_note(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, rusqlite::Error> {
        self.conn
            .query_row(
                "UPDATE notes SET title = ?1, content = ?2 WHERE id = ?3 \
                 RETURNING id, title, content, timestamp, color",
                params![title, content, id],
                note_from_row,
            )
            .optional()
    }

    pub fn delete_note(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])?;

        Ok(rows == 1)
    }

    pub fn get_one_note(&self, id: i64) -> Result<Option<Note>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT id, title, content, timestamp, color FROM notes WHERE id = ?1",
                params![id],
                note_from_row,
            )
            .optional()
    }

    /// All notes, most recently created first.
    pub fn get_all_notes(&self) -> Result<Vec<Note>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, content, timestamp, color FROM notes ORDER BY id DESC")?;

        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn count_notes(&self) -> Result<i64, rusqlite::Error> {
        self.conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
    }
}

fn note_from_row(row: &Row<'_>) -> Result<Note, rusqlite::Error> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        timestamp: row.get("timestamp")?,
        color: row.get("color")?,
    })
}
