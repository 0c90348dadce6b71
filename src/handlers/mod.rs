pub mod popup;

pub use popup::{Field, Popup, PopupKind};

use crate::{
    models::Note,
    service::{NoteService, ServiceError},
};

/// A user action, already bound to the note it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenAdd,
    Edit(i64),
    Delete(i64),
    ConfirmDelete,
    DeclineDelete,
    Submit,
    Cancel,
    DismissWarning,
    SelectNext,
    SelectPrevious,
    Quit,
}

/// One rendered note. Owns a copy of the note, so its controls keep
/// pointing at this note's id no matter how the list changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    note: Note,
}

impl NoteRow {
    pub const fn note(&self) -> &Note {
        &self.note
    }

    pub const fn edit_control(&self) -> Action {
        Action::Edit(self.note.id)
    }

    pub const fn delete_control(&self) -> Action {
        Action::Delete(self.note.id)
    }
}

/// Whatever modal currently sits on top of the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Popup(Popup),
    /// Rejected submission; the popup underneath stays open.
    Warning(Popup),
    ConfirmDelete(i64),
}

pub struct Controller {
    service: NoteService,
    rows: Vec<NoteRow>,
    total: i64,
    selected: usize,
    overlay: Option<Overlay>,
    should_quit: bool,
}

impl Controller {
    pub fn new(service: NoteService) -> Result<Self, ServiceError> {
        let mut controller = Self {
            service,
            rows: Vec::new(),
            total: 0,
            selected: 0,
            overlay: None,
            should_quit: false,
        };
        controller.refresh()?;
        Ok(controller)
    }

    pub fn rows(&self) -> &[NoteRow] {
        &self.rows
    }

    pub const fn total(&self) -> i64 {
        self.total
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&NoteRow> {
        self.rows.get(self.selected)
    }

    pub const fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// The open popup, if it is accepting input.
    pub fn popup_mut(&mut self) -> Option<&mut Popup> {
        match &mut self.overlay {
            Some(Overlay::Popup(popup)) => Some(popup),
            _ => None,
        }
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Only storage faults come back as errors; validation failures and
    /// missing notes are settled here.
    pub fn dispatch(&mut self, action: Action) -> Result<(), ServiceError> {
        match action {
            Action::OpenAdd => self.open_add(),
            Action::Edit(id) => self.open_edit(id)?,
            Action::Delete(id) => self.request_delete(id),
            Action::ConfirmDelete => self.answer_delete(true)?,
            Action::DeclineDelete => self.answer_delete(false)?,
            Action::Submit => self.submit()?,
            Action::Cancel => self.cancel(),
            Action::DismissWarning => self.dismiss_warning(),
            Action::SelectNext => self.move_selection(1),
            Action::SelectPrevious => self.move_selection(-1),
            Action::Quit => self.should_quit = true,
        }
        Ok(())
    }

    /// Throws away every row and rebuilds the list from the store.
    pub fn refresh(&mut self) -> Result<(), ServiceError> {
        self.rows = self
            .service
            .list()?
            .into_iter()
            .map(|note| NoteRow { note })
            .collect();
        self.total = self.service.count()?;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));

        tracing::debug!(rows = self.rows.len(), "Rendered note list");

        Ok(())
    }

    fn open_add(&mut self) {
        if self.overlay.is_none() {
            self.overlay = Some(Overlay::Popup(Popup::blank()));
            tracing::debug!("Opened add popup");
        }
    }

    fn open_edit(&mut self, id: i64) -> Result<(), ServiceError> {
        if self.overlay.is_some() {
            return Ok(());
        }

        match self.service.read(id)? {
            Some(note) => {
                self.overlay = Some(Overlay::Popup(Popup::prefilled(&note)));
                tracing::debug!(id, "Opened edit popup");
            }
            None => tracing::debug!(id, "Edit skipped, note does not exist"),
        }

        Ok(())
    }

    fn submit(&mut self) -> Result<(), ServiceError> {
        let Some(Overlay::Popup(popup)) = self.overlay.take() else {
            return Ok(());
        };

        let form = popup.form();
        let result = match popup.kind() {
            PopupKind::Add => self.service.create(&form).map(|_| ()),
            PopupKind::Edit(id) => self.service.update(id, &form).map(|_| ()),
        };

        match result {
            Ok(()) => self.refresh(),
            Err(ServiceError::Validation(e)) => {
                tracing::warn!("Rejected {}: {e}", popup.heading());
                self.overlay = Some(Overlay::Warning(popup));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn cancel(&mut self) {
        if matches!(self.overlay, Some(Overlay::Popup(_))) {
            self.overlay = None;
            tracing::debug!("Popup cancelled");
        }
    }

    fn dismiss_warning(&mut self) {
        if let Some(Overlay::Warning(popup)) = self.overlay.take() {
            self.overlay = Some(Overlay::Popup(popup));
        }
    }

    fn request_delete(&mut self, id: i64) {
        if self.overlay.is_none() {
            self.overlay = Some(Overlay::ConfirmDelete(id));
        }
    }

    fn answer_delete(&mut self, confirmed: bool) -> Result<(), ServiceError> {
        let Some(Overlay::ConfirmDelete(id)) = self.overlay else {
            return Ok(());
        };
        self.overlay = None;

        if !confirmed {
            tracing::debug!(id, "Delete declined");
            return Ok(());
        }

        self.service.delete(id)?;
        self.refresh()
    }

    fn move_selection(&mut self, delta: isize) {
        if self.overlay.is_some() || self.rows.is_empty() {
            return;
        }
        self.selected = self
            .selected
            .saturating_add_signed(delta)
            .min(self.rows.len() - 1);
    }
}
