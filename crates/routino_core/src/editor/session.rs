//! Editing session for the active note.
//!
//! # Responsibility
//! - Own live note content, editor settings and pipeline state for one
//!   editor surface.
//! - Drive tokenize -> reveal -> materialize -> caret restore per user event.
//! - Forward note management to the owned `NoteStore` and reload on switch.
//!
//! # Invariants
//! - Every content change is written to the active note before any
//!   scheduling decision.
//! - A pass is serialized strictly after the edit that armed it; content
//!   changes during `Processing` are recorded but never armed.
//! - Reveal state is re-derived from selection/hover on every event.
//! - Note content never reaches the log; only lengths and counts do.

use crate::editor::caret::{capture, restore};
use crate::editor::counters::TextCounters;
use crate::editor::edit::EditKind;
use crate::editor::format::{FormatCommand, FormatError, FormattingCapability};
use crate::editor::host::RenderHost;
use crate::editor::reveal::compute_reveal;
use crate::editor::scheduler::{Poll, Scheduler, SchedulerState, TimerId};
use crate::editor::tokenizer::tokenize;
use crate::model::note::NoteId;
use crate::model::selection::{LogicalOffset, SelectionRange};
use crate::model::settings::{EditorSettings, FontFamily, SettingsError, TextAlign};
use crate::model::token::{RevealState, Token, TokenKind};
use crate::store::note_store::{NoteStore, StoreResult};
use log::{debug, info, warn};

/// Marker inserted for a new checklist item in todo mode.
pub const CHECKBOX_MARKER: &str = "☐ ";

/// Result of one `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// No pass was due.
    Idle,
    /// A pass came due while another was processing and was discarded.
    Dropped,
    /// Tokens were materialized; call `on_render_committed` once the host
    /// has committed them.
    AwaitingCommit,
}

#[derive(Debug, Clone, Copy)]
struct InFlightPass {
    timer: TimerId,
    offset: LogicalOffset,
}

pub struct EditingSession {
    store: NoteStore,
    settings: EditorSettings,
    active_id: Option<NoteId>,
    content: String,
    tokens: Vec<Token>,
    selection: Option<SelectionRange>,
    hover: Option<usize>,
    counters: TextCounters,
    scheduler: Scheduler,
    in_flight: Option<InFlightPass>,
}

impl EditingSession {
    /// Opens a session on the store's active note and renders it in `host`.
    pub fn open(store: NoteStore, settings: EditorSettings, host: &mut impl RenderHost) -> Self {
        let mut session = Self {
            store,
            settings,
            active_id: None,
            content: String::new(),
            tokens: Vec::new(),
            selection: None,
            hover: None,
            counters: TextCounters::default(),
            scheduler: Scheduler::new(),
            in_flight: None,
        };
        session.load_active_note(host);
        session
    }

    /// Loads the active note's content and materializes it immediately.
    ///
    /// A pass in flight for the previously loaded note is abandoned.
    pub fn load_active_note(&mut self, host: &mut impl RenderHost) {
        let (active_id, content) = match self.store.active() {
            Some(note) => (Some(note.id), note.content.clone()),
            None => (None, String::new()),
        };
        self.active_id = active_id;
        self.counters = TextCounters::measure(&content);
        self.content = content;
        self.selection = None;
        self.hover = None;
        self.scheduler = Scheduler::new();
        self.in_flight = None;
        self.tokens = tokenize(&self.content, self.settings.blur_enabled);
        host.materialize(&self.tokens);
        info!(
            "event=note_load module=editor status=ok chars={} tokens={}",
            self.counters.chars,
            self.tokens.len()
        );
    }

    /// Records new raw content after a user edit.
    ///
    /// Returns the armed timer, or `None` when a pass is processing and the
    /// edit is left for the next trigger.
    pub fn on_content_changed(
        &mut self,
        new_raw: &str,
        edit: &EditKind,
        now_ms: u64,
    ) -> Option<TimerId> {
        self.content = new_raw.to_string();
        // Unit indexes may shift under an edit; the host re-reports hover.
        self.hover = None;
        if let Err(err) = self
            .store
            .update_active_content(new_raw, epoch_ms(now_ms))
        {
            warn!("event=content_sync module=editor status=error error={err}");
        }
        self.counters = TextCounters::measure(&self.content);

        if self.scheduler.is_processing() {
            debug!("event=edit_unscheduled module=editor reason=processing");
            return None;
        }
        Some(self.scheduler.schedule(edit.schedule_tier(), now_ms))
    }

    /// Runs a segmentation pass when the scheduler fires at `now_ms`.
    pub fn tick(&mut self, host: &mut impl RenderHost, now_ms: u64) -> PassOutcome {
        match self.scheduler.poll(now_ms) {
            Poll::NotDue => PassOutcome::Idle,
            Poll::Dropped(_) => PassOutcome::Dropped,
            Poll::Fire(timer) => {
                self.run_pass(host, timer);
                PassOutcome::AwaitingCommit
            }
        }
    }

    fn run_pass(&mut self, host: &mut impl RenderHost, timer: TimerId) {
        let offset = capture(&host.unit_lengths(), host.caret());
        // The caret is restored collapsed at `offset`; reveal against that.
        let selection = Some(SelectionRange::collapsed(offset));
        self.hover = None;
        self.tokens = compute_reveal(
            &tokenize(&self.content, self.settings.blur_enabled),
            selection,
            None,
            self.settings.blur_enabled,
        );
        host.materialize(&self.tokens);
        self.in_flight = Some(InFlightPass { timer, offset });
        debug!(
            "event=pass_render module=editor tokens={} offset={}",
            self.tokens.len(),
            offset
        );
    }

    /// Restores the caret once the host has committed materialized units.
    ///
    /// Returns the restored offset, or `None` when no pass was in flight.
    pub fn on_render_committed(&mut self, host: &mut impl RenderHost) -> Option<LogicalOffset> {
        let pass = self.in_flight.take()?;
        let lengths = host.unit_lengths();
        let caret = restore(pass.offset, &lengths);
        host.set_caret(caret);

        let restored = capture(&lengths, Some(caret));
        self.selection = Some(SelectionRange::collapsed(restored));
        self.scheduler.finish();
        debug!(
            "event=pass_commit module=editor timer={:?} offset={}",
            pass.timer, restored
        );
        Some(restored)
    }

    pub fn on_selection_changed(
        &mut self,
        host: &mut impl RenderHost,
        selection: Option<SelectionRange>,
    ) {
        self.selection = selection;
        self.refresh_reveal(host);
    }

    /// Sets the hovered unit index; indexes past the rendered units clear it.
    pub fn on_hover(&mut self, host: &mut impl RenderHost, token: Option<usize>) {
        self.hover = token;
        self.refresh_reveal(host);
    }

    pub fn set_blur_enabled(&mut self, host: &mut impl RenderHost, enabled: bool) {
        self.settings.blur_enabled = enabled;
        self.refresh_reveal(host);
    }

    /// Restyles against the units the host shows now, which drift from the
    /// last pass's tokens while the user types.
    fn refresh_reveal(&mut self, host: &mut impl RenderHost) {
        let live = live_units(host);
        self.hover = self.hover.filter(|index| *index < live.len());
        self.tokens = compute_reveal(
            &live,
            self.selection,
            self.hover,
            self.settings.blur_enabled,
        );
        host.restyle(&self.tokens);
    }

    /// Toggles todo mode; switching it on starts a checklist item at the caret.
    pub fn set_todo_mode(&mut self, host: &mut impl RenderHost, enabled: bool, now_ms: u64) {
        let was_enabled = self.settings.todo_mode;
        self.settings.todo_mode = enabled;
        if enabled && !was_enabled {
            self.insert_checkbox(host, now_ms);
        }
    }

    /// Handles the Enter key. Returns `true` when todo mode consumed it.
    pub fn handle_enter(&mut self, host: &mut impl RenderHost, now_ms: u64) -> bool {
        if !self.settings.todo_mode {
            return false;
        }
        self.insert_checkbox(host, now_ms);
        true
    }

    fn insert_checkbox(&mut self, host: &mut impl RenderHost, now_ms: u64) {
        host.insert_at_caret(CHECKBOX_MARKER);
        let lengths = host.unit_lengths();
        self.selection = host
            .caret()
            .map(|caret| SelectionRange::collapsed(capture(&lengths, Some(caret))));
        let text = host.plain_text();
        self.on_content_changed(
            &text,
            &EditKind::InsertText(CHECKBOX_MARKER.to_string()),
            now_ms,
        );
    }

    /// Hands a formatting command to the host capability.
    ///
    /// # Errors
    /// - `EmptyUrl` for link/image commands without a URL; the capability is
    ///   not invoked.
    /// - Any error returned by the capability.
    pub fn apply_formatting(
        &self,
        capability: &mut impl FormattingCapability,
        command: &FormatCommand,
    ) -> Result<(), FormatError> {
        command.validate()?;
        capability.apply(command).map_err(|err| {
            warn!(
                "event=format_apply module=editor status=error command={} error={err}",
                command.name()
            );
            err
        })
    }

    pub fn set_font_family(&mut self, family: FontFamily) {
        self.settings.font_family = family;
    }

    pub fn set_font_size(&mut self, px: u16) -> Result<(), SettingsError> {
        self.settings.set_font_size(px)
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.settings.text_align = align;
    }

    /// Creates a note, activates it and loads it into the editor.
    pub fn create_note(&mut self, host: &mut impl RenderHost, now_ms: u64) -> NoteId {
        let id = self.store.create(epoch_ms(now_ms));
        self.load_active_note(host);
        id
    }

    pub fn activate_note(&mut self, host: &mut impl RenderHost, id: NoteId) -> StoreResult<()> {
        self.store.activate(id)?;
        self.load_active_note(host);
        Ok(())
    }

    /// Deletes a note; reloads the editor when the active note was deleted.
    pub fn delete_note(&mut self, host: &mut impl RenderHost, id: NoteId) -> StoreResult<()> {
        let was_active = self.active_id == Some(id);
        self.store.delete(id)?;
        if was_active {
            self.load_active_note(host);
        }
        Ok(())
    }

    pub fn rename_active_note(&mut self, title: &str, now_ms: u64) -> StoreResult<()> {
        self.store.update_active_title(title, epoch_ms(now_ms))
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn active_note_id(&self) -> Option<NoteId> {
        self.active_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Tokens as last materialized or restyled, aligned with host units.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    pub fn counters(&self) -> TextCounters {
        self.counters
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Due time of the armed pass, for hosts that drive `tick` from a timer.
    pub fn next_pass_due_ms(&self) -> Option<u64> {
        self.scheduler.pending_due_ms()
    }
}

/// Current host units as tokens, one per unit, in render order.
///
/// A unit is whitespace only when every char in it is; a unit that drifted
/// into mixed text is treated as a word.
fn live_units(host: &impl RenderHost) -> Vec<Token> {
    let text = host.plain_text();
    let mut chars = text.chars();
    host.unit_lengths()
        .into_iter()
        .map(|len| {
            let unit: String = chars.by_ref().take(len).collect();
            let kind = if unit.chars().all(char::is_whitespace) {
                TokenKind::Whitespace
            } else {
                TokenKind::Word
            };
            Token::new(unit, kind, RevealState::Clear)
        })
        .collect()
}

fn epoch_ms(now_ms: u64) -> i64 {
    i64::try_from(now_ms).unwrap_or(i64::MAX)
}
