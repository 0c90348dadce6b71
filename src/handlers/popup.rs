use crate::{dto::NoteForm, models::Note};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Add,
    Edit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
}

/// Modal form for creating or editing one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    kind: PopupKind,
    title: String,
    content: String,
    focus: Field,
}

impl Popup {
    pub const fn blank() -> Self {
        Self {
            kind: PopupKind::Add,
            title: String::new(),
            content: String::new(),
            focus: Field::Title,
        }
    }

    pub fn prefilled(note: &Note) -> Self {
        Self {
            kind: PopupKind::Edit(note.id),
            title: note.title.clone(),
            content: note.content.clone(),
            focus: Field::Title,
        }
    }

    pub const fn kind(&self) -> PopupKind {
        self.kind
    }

    pub const fn heading(&self) -> &'static str {
        match self.kind {
            PopupKind::Add => "Add Note",
            PopupKind::Edit(_) => "Edit Note",
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn focus(&self) -> Field {
        self.focus
    }

    pub fn form(&self) -> NoteForm {
        NoteForm::new(self.title.clone(), self.content.clone())
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            Field::Title => Field::Content,
            Field::Content => Field::Title,
        };
    }

    pub fn insert_char(&mut self, ch: char) {
        self.focused_mut().push(ch);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Enter moves from the single-line title to the content, and breaks
    /// lines inside the content.
    pub fn newline(&mut self) {
        match self.focus {
            Field::Title => self.focus = Field::Content,
            Field::Content => self.content.push('\n'),
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Content => &mut self.content,
        }
    }
}
