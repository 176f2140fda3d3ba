//! Ordered in-memory note collection.
//!
//! # Responsibility
//! - Provide create/activate/delete/update use-cases for notes.
//! - Keep exactly one active note whenever the store is non-empty.
//!
//! # Invariants
//! - New notes are inserted first and become active.
//! - Deleting the only remaining note is refused without mutation.
//! - Deleting the active note promotes the first remaining note.
//! - Failed operations never mutate the store.

use crate::model::note::{Note, NoteId};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const WELCOME_NOTE_TITLE: &str = "Welcome to Routino Notes";
pub const WELCOME_NOTE_CONTENT: &str = "Welcome to Routino Notes! ✨\n\n\
This is a private space for thoughts, ideas and plans.\n\n\
Privacy mode keeps every word blurred until you select it or point at it. \
Toggle it from the status bar when nobody is looking over your shoulder.";

/// Sample notes seeded after the welcome note, as `(title, content)`.
pub const SAMPLE_NOTES: [(&str, &str); 2] = [
    (
        "Personal Goals 2023",
        "1. Learn a new language\n2. Read 24 books\n3. Run a half marathon\n\
4. Start meditation practice",
    ),
    (
        "Book Recommendations",
        "To Read:\n- Atomic Habits by James Clear\n- Deep Work by Cal Newport\n\
- Sapiens by Yuval Noah Harari\n\nFavorites:\n- The Midnight Library by Matt Haig\n\
- Project Hail Mary by Andy Weir",
    ),
];

pub type StoreResult<T> = Result<T, NoteStoreError>;

/// Note store operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStoreError {
    NoteNotFound(NoteId),
    /// The store must always keep at least one note.
    LastNoteProtected,
    /// The store has no notes, so there is no active note to update.
    NoActiveNote,
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::LastNoteProtected => write!(f, "cannot delete the last note"),
            Self::NoActiveNote => write!(f, "no active note"),
        }
    }
}

impl Error for NoteStoreError {}

#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    last_number: u32,
}

impl NoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one active welcome note.
    pub fn with_welcome_note(now_ms: i64) -> Self {
        let mut store = Self::new();
        store.seed(WELCOME_NOTE_TITLE, WELCOME_NOTE_CONTENT, now_ms);
        store
    }

    /// Creates the first-run store: the active welcome note followed by the
    /// sample notes.
    pub fn with_sample_notes(now_ms: i64) -> Self {
        let mut store = Self::with_welcome_note(now_ms);
        for (title, content) in SAMPLE_NOTES {
            store.seed(title, content, now_ms);
        }
        store
    }

    /// Appends a titled note; only the first note of a store starts active.
    fn seed(&mut self, title: &str, content: &str, now_ms: i64) {
        self.last_number += 1;
        let mut note = Note::new(self.last_number, now_ms);
        note.set_title(title, now_ms);
        note.set_content(content, now_ms);
        note.is_active = self.notes.is_empty();
        self.notes.push(note);
    }

    /// Creates an empty note, puts it first and makes it active.
    pub fn create(&mut self, now_ms: i64) -> NoteId {
        self.last_number += 1;
        let mut note = Note::new(self.last_number, now_ms);
        note.is_active = true;
        let id = note.id;

        for existing in &mut self.notes {
            existing.is_active = false;
        }
        self.notes.insert(0, note);
        info!(
            "event=note_create module=store status=ok number={} total={}",
            self.last_number,
            self.notes.len()
        );
        id
    }

    /// Makes `id` the only active note.
    pub fn activate(&mut self, id: NoteId) -> StoreResult<()> {
        if self.get(id).is_none() {
            return Err(NoteStoreError::NoteNotFound(id));
        }
        for note in &mut self.notes {
            note.is_active = note.id == id;
        }
        Ok(())
    }

    /// Deletes `id`, promoting the first remaining note if it was active.
    ///
    /// # Errors
    /// - `LastNoteProtected` when `id` would leave the store empty; checked
    ///   before the id lookup, as the store refuses any delete at one note.
    /// - `NoteNotFound` when `id` is unknown.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<()> {
        if self.notes.len() <= 1 {
            return Err(NoteStoreError::LastNoteProtected);
        }
        let index = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(NoteStoreError::NoteNotFound(id))?;

        let removed = self.notes.remove(index);
        if removed.is_active {
            self.notes[0].is_active = true;
        }
        info!(
            "event=note_delete module=store status=ok was_active={} remaining={}",
            removed.is_active,
            self.notes.len()
        );
        Ok(())
    }

    pub fn update_active_content(&mut self, content: &str, now_ms: i64) -> StoreResult<()> {
        let note = self.active_mut().ok_or(NoteStoreError::NoActiveNote)?;
        note.set_content(content, now_ms);
        Ok(())
    }

    /// Renames the active note; a blank title becomes `New Note {n}`.
    pub fn update_active_title(&mut self, title: &str, now_ms: i64) -> StoreResult<()> {
        let note = self.active_mut().ok_or(NoteStoreError::NoActiveNote)?;
        note.set_title(title, now_ms);
        Ok(())
    }

    pub fn active(&self) -> Option<&Note> {
        self.notes.iter().find(|note| note.is_active)
    }

    fn active_mut(&mut self) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.is_active)
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Notes in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
