//! Domain model for notes and the privacy-blur editor.
//!
//! # Responsibility
//! - Define the data shapes shared by the note store and the editor pipeline.
//! - Keep transient pipeline types (tokens, carets) separate from notes.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Tokens are derived data and are never stored on a note.

pub mod note;
pub mod selection;
pub mod settings;
pub mod token;
