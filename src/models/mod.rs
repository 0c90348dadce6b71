use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

/// A single sticky note as stored in the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Creation time, `hh:mm AM/PM`. Never touched by edits.
    pub timestamp: String,
    /// Background color picked at creation. Never touched by edits.
    pub color: NoteColor,
}

/// The fixed background palette notes cycle through in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteColor {
    Rose,
    Mint,
    Sky,
    Peach,
}

impl NoteColor {
    pub const PALETTE: [Self; 4] = [Self::Rose, Self::Mint, Self::Sky, Self::Peach];

    /// Palette entry for a note inserted while `count` notes already exist.
    pub const fn for_count(count: i64) -> Self {
        match count.rem_euclid(4) {
            0 => Self::Rose,
            1 => Self::Mint,
            2 => Self::Sky,
            _ => Self::Peach,
        }
    }

    pub const fn hex(self) -> &'static str {
        match self {
            Self::Rose => "#FFEBEE",
            Self::Mint => "#E8F5E9",
            Self::Sky => "#E3F2FD",
            Self::Peach => "#FFF3E0",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Rose => (0xFF, 0xEB, 0xEE),
            Self::Mint => (0xE8, 0xF5, 0xE9),
            Self::Sky => (0xE3, 0xF2, 0xFD),
            Self::Peach => (0xFF, 0xF3, 0xE0),
        }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::PALETTE
            .into_iter()
            .find(|color| color.hex().eq_ignore_ascii_case(hex))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("color '{0}' is not part of the note palette")]
pub struct UnknownColor(String);

impl ToSql for NoteColor {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.hex()))
    }
}

impl FromSql for NoteColor {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let hex = value.as_str()?;
        Self::from_hex(hex).ok_or_else(|| FromSqlError::Other(Box::new(UnknownColor(hex.to_string()))))
    }
}
