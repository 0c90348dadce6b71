/// Title and content as submitted from an add or edit popup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
}

/// A form whose fields are both non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    title: String,
    content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Both title and content are required!")]
pub struct ValidationError;

impl NoteForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedForm, ValidationError> {
        let title = self.title.trim();
        let content = self.content.trim();

        if title.is_empty() || content.is_empty() {
            return Err(ValidationError);
        }

        Ok(ValidatedForm {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

impl ValidatedForm {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
