//! Core domain logic for Routino Notes.
//! This crate is the single source of truth for the notes editor pipeline
//! and note store invariants.

pub mod editor;
pub mod logging;
pub mod model;
pub mod store;

pub use editor::caret::{capture, capture_range, restore};
pub use editor::counters::TextCounters;
pub use editor::edit::EditKind;
pub use editor::format::{FormatCommand, FormatError, FormattingCapability};
pub use editor::host::{HeadlessHost, RenderHost};
pub use editor::reveal::compute_reveal;
pub use editor::scheduler::{
    Poll, ScheduleTier, Scheduler, SchedulerState, TimerId, DEFERRED_DELAY_MS, IMMEDIATE_DELAY_MS,
};
pub use editor::session::{EditingSession, PassOutcome, CHECKBOX_MARKER};
pub use editor::tokenizer::{render_plain, tokenize};
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LogConfig};
pub use model::note::{default_title, Note, NoteId};
pub use model::selection::{CaretPoint, LogicalOffset, SelectionRange};
pub use model::settings::{EditorSettings, FontFamily, SettingsError, TextAlign};
pub use model::token::{token_lengths, RevealState, Token, TokenKind};
pub use store::note_store::{NoteStore, NoteStoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
