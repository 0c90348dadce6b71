use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::{
    dto::{NoteForm, ValidationError},
    models::{Note, NoteColor},
    repository::Repository,
};

/// `strftime` pattern for the creation stamp shown on each note.
pub const TIMESTAMP_FORMAT: &str = "%I:%M %p";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub struct NoteService {
    repo: Repository,
}

impl NoteService {
    pub const fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub fn create(&self, form: &NoteForm) -> Result<Note, ServiceError> {
        self.create_at(form, Local::now())
    }

    /// Inserts a note stamped with `now`. The color is taken from the
    /// palette by the number of notes stored right before the insert.
    pub fn create_at<Tz>(&self, form: &NoteForm, now: DateTime<Tz>) -> Result<Note, ServiceError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let form = form.validate()?;

        let color = NoteColor::for_count(self.count()?);
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();

        let note = self
            .repo
            .create_note(form.title(), form.content(), &timestamp, color)?;

        tracing::info!(id = note.id, color = color.hex(), "Created note");

        Ok(note)
    }

    pub fn read(&self, id: i64) -> Result<Option<Note>, ServiceError> {
        Ok(self.repo.get_one_note(id)?)
    }

    /// Replaces title and content only. `Ok(None)` when the note is gone.
    pub fn update(&self, id: i64, form: &NoteForm) -> Result<Option<Note>, ServiceError> {
        let form = form.validate()?;

        let note = self.repo.update_note(id, form.title(), form.content())?;

        match &note {
            Some(_) => tracing::info!(id, "Updated note"),
            None => tracing::debug!(id, "Update skipped, note does not exist"),
        }

        Ok(note)
    }

    pub fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete_note(id)?;

        if deleted {
            tracing::info!(id, "Deleted note");
        } else {
            tracing::debug!(id, "Delete skipped, note does not exist");
        }

        Ok(deleted)
    }

    pub fn list(&self) -> Result<Vec<Note>, ServiceError> {
        Ok(self.repo.get_all_notes()?)
    }

    pub fn count(&self) -> Result<i64, ServiceError> {
        Ok(self.repo.count_notes()?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate};

    use super::*;

    fn service() -> NoteService {
        NoteService::new(Repository::in_memory().unwrap())
    }

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_local_timezone(FixedOffset::east_opt(0).unwrap())
            .unwrap()
    }

    fn ids(notes: &[Note]) -> Vec<i64> {
        notes.iter().map(|note| note.id).collect()
    }

    #[test]
    fn first_two_notes_get_ids_and_colors_in_order() {
        let service = service();

        let groceries = service
            .create(&NoteForm::new("Groceries", "Milk, eggs"))
            .unwrap();
        let gym = service.create(&NoteForm::new("Gym", "Leg day")).unwrap();

        assert_eq!(groceries.id, 1);
        assert_eq!(groceries.color, NoteColor::PALETTE[0]);
        assert_eq!(gym.id, 2);
        assert_eq!(gym.color, NoteColor::PALETTE[1]);

        let listed = service.list().unwrap();
        assert_eq!(ids(&listed), vec![2, 1]);
        assert_eq!(listed[0].title, "Gym");
        assert_eq!(listed[1].title, "Groceries");
    }

    #[test]
    fn blank_title_is_rejected_without_consuming_an_id() {
        let service = service();

        let err = service
            .create(&NoteForm::new("", "Something"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(service.count().unwrap(), 0);

        let note = service.create(&NoteForm::new("Real", "Note")).unwrap();
        assert_eq!(note.id, 1);
    }

    #[test]
    fn ids_strictly_increase() {
        let service = service();
        let mut last = 0;

        for i in 0..6 {
            let note = service
                .create(&NoteForm::new(format!("title {i}"), "body"))
                .unwrap();
            assert!(note.id > last);
            last = note.id;

            if i % 2 == 1 {
                service.delete(note.id).unwrap();
            }
        }
    }

    #[test]
    fn timestamp_uses_twelve_hour_clock() {
        let service = service();

        let morning = service
            .create_at(&NoteForm::new("a", "b"), at(9, 5))
            .unwrap();
        let evening = service
            .create_at(&NoteForm::new("c", "d"), at(21, 30))
            .unwrap();
        let midnight = service
            .create_at(&NoteForm::new("e", "f"), at(0, 0))
            .unwrap();

        assert_eq!(morning.timestamp, "09:05 AM");
        assert_eq!(evening.timestamp, "09:30 PM");
        assert_eq!(midnight.timestamp, "12:00 AM");
    }

    #[test]
    fn stored_values_are_trimmed() {
        let service = service();

        let note = service
            .create(&NoteForm::new("  Groceries  ", "Milk\n"))
            .unwrap();

        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "Milk");
    }

    #[test]
    fn update_keeps_timestamp_and_color() {
        let service = service();
        let original = service
            .create_at(&NoteForm::new("Groceries", "Milk, eggs"), at(8, 0))
            .unwrap();

        let updated = service
            .update(original.id, &NoteForm::new("Groceries v2", "Milk"))
            .unwrap()
            .unwrap();

        let read = service.read(original.id).unwrap().unwrap();
        assert_eq!(read, updated);
        assert_eq!(read.title, "Groceries v2");
        assert_eq!(read.content, "Milk");
        assert_eq!(read.timestamp, original.timestamp);
        assert_eq!(read.color, original.color);
    }

    #[test]
    fn invalid_update_leaves_note_untouched() {
        let service = service();
        let original = service.create(&NoteForm::new("Title", "Body")).unwrap();

        let err = service
            .update(original.id, &NoteForm::new("New", "  "))
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(service.read(original.id).unwrap(), Some(original));
    }

    #[test]
    fn missing_ids_are_silent_no_ops() {
        let service = service();

        assert_eq!(
            service.update(7, &NoteForm::new("Title", "Body")).unwrap(),
            None
        );
        assert!(!service.delete(7).unwrap());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn delete_then_read_is_not_found() {
        let service = service();
        let note = service.create(&NoteForm::new("Gym", "Leg day")).unwrap();

        assert!(service.delete(note.id).unwrap());
        assert_eq!(service.read(note.id).unwrap(), None);
    }

    #[test]
    fn colors_are_not_recomputed_after_deletions() {
        let service = service();
        let first = service.create(&NoteForm::new("1", "x")).unwrap();
        let second = service.create(&NoteForm::new("2", "x")).unwrap();
        let third = service.create(&NoteForm::new("3", "x")).unwrap();
        assert_eq!(
            [first.color, second.color, third.color],
            [NoteColor::Rose, NoteColor::Mint, NoteColor::Sky]
        );

        service.delete(first.id).unwrap();

        let remaining = service.list().unwrap();
        assert_eq!(remaining[0].color, NoteColor::Sky);
        assert_eq!(remaining[1].color, NoteColor::Mint);

        // two notes remain, so the next insert takes the third palette slot
        let fourth = service.create(&NoteForm::new("4", "x")).unwrap();
        assert_eq!(fourth.color, NoteColor::Sky);
    }

    #[test]
    fn list_is_descending_regardless_of_edits() {
        let service = service();
        for i in 0..4 {
            service
                .create(&NoteForm::new(format!("n{i}"), "body"))
                .unwrap();
        }
        service.update(1, &NoteForm::new("edited", "body")).unwrap();
        service.update(3, &NoteForm::new("edited", "body")).unwrap();

        assert_eq!(ids(&service.list().unwrap()), vec![4, 3, 2, 1]);
    }
}
