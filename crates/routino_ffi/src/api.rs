//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level editor functions to Dart via FRB.
//! - Own one in-memory editing session per handle; the host drives time.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every failure is reported in a response `message`, never thrown.
//! - The registry lock is never held across calls; poisoning is an error.
//! - Note text never reaches the log.

use log::info;
use routino_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EditKind, EditingSession, EditorSettings, HeadlessHost, NoteStore, PassOutcome, RenderHost,
    RevealState, SchedulerState, SelectionRange,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const MASK_CHAR: char = '•';

static EDITORS: OnceLock<Mutex<BTreeMap<i64, EditorState>>> = OnceLock::new();
static NEXT_HANDLE: AtomicI64 = AtomicI64::new(1);

struct EditorState {
    session: EditingSession,
    host: HeadlessHost,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for editor commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Optional note ID touched by the command.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EditorActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            note_id: None,
            message: message.into(),
        }
    }

    fn with_note(message: impl Into<String>, note_id: Uuid) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Response for `editor_open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOpenResponse {
    pub ok: bool,
    /// Handle for every other `editor_*` call; `None` on failure.
    pub handle: Option<i64>,
    pub message: String,
}

/// One rendered unit as the Flutter view should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorUnit {
    pub text: String,
    /// Draw blurred when `true`.
    pub obscured: bool,
}

/// Full view state of one editor handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub ok: bool,
    pub note_id: Option<String>,
    pub content: String,
    pub units: Vec<EditorUnit>,
    /// Content with obscured chars masked, for previews and tests.
    pub masked_preview: String,
    /// Logical caret offset in chars, `None` without a live caret.
    pub caret_offset: Option<u32>,
    pub word_label: String,
    pub char_label: String,
    pub blur_enabled: bool,
    pub todo_mode: bool,
    /// `idle|scheduled|processing`.
    pub scheduler_state: String,
    /// When the armed pass is due; drive `editor_tick` at this time.
    pub next_pass_due_ms: Option<i64>,
    pub message: String,
}

impl EditorSnapshot {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            content: String::new(),
            units: Vec::new(),
            masked_preview: String::new(),
            caret_offset: None,
            word_label: String::new(),
            char_label: String::new(),
            blur_enabled: false,
            todo_mode: false,
            scheduler_state: String::new(),
            next_pass_due_ms: None,
            message: message.into(),
        }
    }
}

/// Note list item for the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub note_id: String,
    pub title: String,
    pub is_active: bool,
    pub last_touched_ms: i64,
}

/// Note list response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    /// Notes in display order, newest first.
    pub items: Vec<NoteListItem>,
    pub message: String,
}

/// Opens an editor on a fresh store holding the welcome and sample notes.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics.
/// - Returns a handle that stays valid until `editor_close`.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_open(now_ms: i64) -> EditorOpenResponse {
    let mut host = HeadlessHost::new();
    let session = EditingSession::open(
        NoteStore::with_sample_notes(now_ms),
        EditorSettings::default(),
        &mut host,
    );
    let handle = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed);

    match editors() {
        Ok(mut editors) => {
            editors.insert(handle, EditorState { session, host });
            info!("event=editor_open module=ffi status=ok handle={handle}");
            EditorOpenResponse {
                ok: true,
                handle: Some(handle),
                message: "Editor opened.".to_string(),
            }
        }
        Err(err) => EditorOpenResponse {
            ok: false,
            handle: None,
            message: format!("editor_open failed: {err}"),
        },
    }
}

/// Releases an editor handle and its notes.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_close(handle: i64) -> EditorActionResponse {
    let removed = editors().map(|mut editors| editors.remove(&handle).is_some());
    match removed {
        Ok(true) => {
            info!("event=editor_close module=ffi status=ok handle={handle}");
            EditorActionResponse::success("Editor closed.")
        }
        Ok(false) => EditorActionResponse::failure(format!(
            "editor_close failed: unknown editor handle {handle}"
        )),
        Err(err) => EditorActionResponse::failure(format!("editor_close failed: {err}")),
    }
}

/// Types `text` at the caret and schedules a segmentation pass.
///
/// `"\n"` is treated as a paragraph break.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_type(handle: i64, text: String, now_ms: i64) -> EditorActionResponse {
    action("editor_type", handle, |state| {
        let edit = if text == "\n" {
            EditKind::InsertParagraph
        } else {
            EditKind::InsertText(text.clone())
        };
        state.host.insert_at_caret(&text);
        record_edit(state, &edit, now_ms);
        Ok(EditorActionResponse::success("Text inserted."))
    })
}

/// Deletes the char before the caret.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_delete_backward(handle: i64, now_ms: i64) -> EditorActionResponse {
    action("editor_delete_backward", handle, |state| {
        if !state.host.delete_backward() {
            return Ok(EditorActionResponse::success("Nothing to delete."));
        }
        record_edit(state, &EditKind::Delete, now_ms);
        Ok(EditorActionResponse::success("Text deleted."))
    })
}

/// Selects `[anchor, focus]` in logical char offsets, or clears the
/// selection when either end is `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_select(handle: i64, anchor: Option<u32>, focus: Option<u32>) -> EditorActionResponse {
    action("editor_select", handle, |state| {
        let range = match (anchor, focus) {
            (Some(anchor), Some(focus)) => {
                let range = SelectionRange::new(anchor as usize, focus as usize);
                state.host.select(range);
                state.host.selection_range()
            }
            _ => {
                state.host.deselect();
                None
            }
        };
        state.session.on_selection_changed(&mut state.host, range);
        Ok(EditorActionResponse::success(if range.is_some() {
            "Selection updated."
        } else {
            "Selection cleared."
        }))
    })
}

/// Marks the token under the pointer as hovered, or clears it with `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_hover(handle: i64, token_index: Option<u32>) -> EditorActionResponse {
    action("editor_hover", handle, |state| {
        let index = token_index.map(|index| index as usize);
        state.session.on_hover(&mut state.host, index);
        Ok(EditorActionResponse::success(
            match state.session.hover() {
                Some(_) => "Hover updated.",
                None => "Hover cleared.",
            },
        ))
    })
}

/// Advances the editor clock and runs a due pass.
///
/// The in-memory host commits synchronously, so the caret is restored
/// before this call returns.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_tick(handle: i64, now_ms: i64) -> EditorActionResponse {
    action("editor_tick", handle, |state| {
        let message = match state.session.tick(&mut state.host, clock_ms(now_ms)) {
            PassOutcome::Idle => "No pass due.",
            PassOutcome::Dropped => "Pass dropped.",
            PassOutcome::AwaitingCommit => {
                state.session.on_render_committed(&mut state.host);
                "Pass rendered."
            }
        };
        Ok(EditorActionResponse::success(message))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_blur(handle: i64, enabled: bool) -> EditorActionResponse {
    action("editor_set_blur", handle, |state| {
        state.session.set_blur_enabled(&mut state.host, enabled);
        Ok(EditorActionResponse::success(if enabled {
            "Privacy mode on."
        } else {
            "Privacy mode off."
        }))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_todo_mode(handle: i64, enabled: bool, now_ms: i64) -> EditorActionResponse {
    action("editor_set_todo_mode", handle, |state| {
        state
            .session
            .set_todo_mode(&mut state.host, enabled, clock_ms(now_ms));
        Ok(EditorActionResponse::success(if enabled {
            "Todo mode on."
        } else {
            "Todo mode off."
        }))
    })
}

/// Handles the Enter key: a new checklist item in todo mode, a paragraph
/// break otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_enter(handle: i64, now_ms: i64) -> EditorActionResponse {
    action("editor_enter", handle, |state| {
        if state
            .session
            .handle_enter(&mut state.host, clock_ms(now_ms))
        {
            return Ok(EditorActionResponse::success("Checklist item added."));
        }
        state.host.insert_at_caret("\n");
        record_edit(state, &EditKind::InsertParagraph, now_ms);
        Ok(EditorActionResponse::success("Paragraph added."))
    })
}

/// Returns the full view state for `handle`.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_snapshot(handle: i64) -> EditorSnapshot {
    let snapshot = with_editor(handle, |state| {
        let session = &state.session;
        let counters = session.counters();
        EditorSnapshot {
            ok: true,
            note_id: session.active_note_id().map(|id| id.to_string()),
            content: session.content().to_string(),
            units: state
                .host
                .unit_texts()
                .into_iter()
                .zip(state.host.unit_reveals())
                .map(|(text, reveal)| EditorUnit {
                    text: text.to_string(),
                    obscured: reveal == RevealState::Obscured,
                })
                .collect(),
            masked_preview: state.host.masked_preview(MASK_CHAR),
            caret_offset: state.host.caret_offset().map(to_u32),
            word_label: counters.word_label(),
            char_label: counters.char_label(),
            blur_enabled: session.settings().blur_enabled,
            todo_mode: session.settings().todo_mode,
            scheduler_state: scheduler_state_label(session.scheduler_state()).to_string(),
            next_pass_due_ms: session
                .next_pass_due_ms()
                .map(|due| i64::try_from(due).unwrap_or(i64::MAX)),
            message: "Snapshot ready.".to_string(),
        }
    });
    snapshot.unwrap_or_else(|err| EditorSnapshot::failure(format!("editor_snapshot failed: {err}")))
}

/// Creates a note, makes it active and loads it into the editor.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_create_note(handle: i64, now_ms: i64) -> EditorActionResponse {
    action("editor_create_note", handle, |state| {
        let id = state
            .session
            .create_note(&mut state.host, clock_ms(now_ms));
        Ok(EditorActionResponse::with_note("Note created.", id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_activate_note(handle: i64, note_id: String) -> EditorActionResponse {
    action("editor_activate_note", handle, |state| {
        let id = parse_note_id(&note_id)?;
        state
            .session
            .activate_note(&mut state.host, id)
            .map_err(|err| err.to_string())?;
        Ok(EditorActionResponse::with_note("Note activated.", id))
    })
}

/// Deletes a note; the last remaining note is protected.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_delete_note(handle: i64, note_id: String) -> EditorActionResponse {
    action("editor_delete_note", handle, |state| {
        let id = parse_note_id(&note_id)?;
        state
            .session
            .delete_note(&mut state.host, id)
            .map_err(|err| err.to_string())?;
        Ok(EditorActionResponse::with_note("Note deleted.", id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_list_notes(handle: i64) -> NoteListResponse {
    let listed = with_editor(handle, |state| {
        state
            .session
            .store()
            .notes()
            .iter()
            .map(|note| NoteListItem {
                note_id: note.id.to_string(),
                title: note.title.clone(),
                is_active: note.is_active,
                last_touched_ms: note.last_touched_ms,
            })
            .collect::<Vec<_>>()
    });
    match listed {
        Ok(items) => NoteListResponse {
            message: format!("Found {} note(s).", items.len()),
            items,
        },
        Err(err) => NoteListResponse {
            items: Vec::new(),
            message: format!("editor_list_notes failed: {err}"),
        },
    }
}

fn editors() -> Result<std::sync::MutexGuard<'static, BTreeMap<i64, EditorState>>, String> {
    EDITORS
        .get_or_init(|| Mutex::new(BTreeMap::new()))
        .lock()
        .map_err(|_| "editor registry lock poisoned".to_string())
}

fn with_editor<T>(handle: i64, f: impl FnOnce(&mut EditorState) -> T) -> Result<T, String> {
    let mut editors = editors()?;
    let state = editors
        .get_mut(&handle)
        .ok_or_else(|| format!("unknown editor handle {handle}"))?;
    Ok(f(state))
}

fn action(
    name: &str,
    handle: i64,
    f: impl FnOnce(&mut EditorState) -> Result<EditorActionResponse, String>,
) -> EditorActionResponse {
    match with_editor(handle, f).and_then(|result| result) {
        Ok(response) => response,
        Err(err) => EditorActionResponse::failure(format!("{name} failed: {err}")),
    }
}

fn record_edit(state: &mut EditorState, edit: &EditKind, now_ms: i64) {
    let plain = state.host.plain_text();
    state
        .session
        .on_content_changed(&plain, edit, clock_ms(now_ms));
}

fn parse_note_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid note_id `{raw}`: {err}"))
}

fn clock_ms(now_ms: i64) -> u64 {
    u64::try_from(now_ms).unwrap_or(0)
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn scheduler_state_label(state: SchedulerState) -> &'static str {
    match state {
        SchedulerState::Idle => "idle",
        SchedulerState::Scheduled => "scheduled",
        SchedulerState::Processing => "processing",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, editor_activate_note, editor_close, editor_create_note,
        editor_delete_backward, editor_delete_note, editor_enter, editor_hover,
        editor_list_notes, editor_open, editor_select, editor_set_blur, editor_set_todo_mode,
        editor_snapshot, editor_tick, editor_type, init_logging, ping,
    };

    fn open_blank_editor() -> i64 {
        let handle = editor_open(0).handle.expect("editor_open returns a handle");
        let created = editor_create_note(handle, 1);
        assert!(created.ok, "{}", created.message);
        handle
    }

    fn type_chars(handle: i64, text: &str, start_ms: i64) -> i64 {
        let mut now = start_ms;
        for ch in text.chars() {
            let response = editor_type(handle, ch.to_string(), now);
            assert!(response.ok, "{}", response.message);
            now += 10;
        }
        now
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn open_shows_blurred_welcome_note() {
        let handle = editor_open(1_700_000_000_000)
            .handle
            .expect("editor_open returns a handle");
        let snapshot = editor_snapshot(handle);

        assert!(snapshot.ok, "{}", snapshot.message);
        assert!(snapshot.content.starts_with("Welcome to Routino Notes!"));
        assert!(snapshot.blur_enabled);
        assert!(snapshot
            .units
            .iter()
            .all(|unit| unit.obscured != unit.text.trim().is_empty()));
        assert_eq!(snapshot.scheduler_state, "idle");
    }

    #[test]
    fn typed_words_are_blurred_after_tick() {
        let handle = open_blank_editor();
        let now = type_chars(handle, "Hi there", 100);

        let snapshot = editor_snapshot(handle);
        assert_eq!(snapshot.scheduler_state, "scheduled");
        let due = snapshot.next_pass_due_ms.expect("pass is armed");
        assert_eq!(due, now - 10 + 200);

        assert_eq!(editor_tick(handle, due).message, "Pass rendered.");
        let snapshot = editor_snapshot(handle);
        assert_eq!(snapshot.masked_preview, "•• •••••");
        assert_eq!(snapshot.caret_offset, Some(8));
        assert_eq!(snapshot.word_label, "2 words");
        assert_eq!(snapshot.char_label, "8 characters");
        assert_eq!(snapshot.scheduler_state, "idle");
    }

    #[test]
    fn selection_and_hover_reveal_words() {
        let handle = open_blank_editor();
        let now = type_chars(handle, "Hi there!", 0);
        editor_tick(handle, now + 200);

        assert!(editor_select(handle, Some(3), Some(9)).ok);
        assert_eq!(editor_snapshot(handle).masked_preview, "•• there!");

        assert!(editor_select(handle, None, None).ok);
        assert!(editor_hover(handle, Some(0)).ok);
        assert_eq!(editor_snapshot(handle).masked_preview, "Hi ••••••");

        assert_eq!(editor_hover(handle, Some(99)).message, "Hover cleared.");
        assert!(editor_set_blur(handle, false).ok);
        assert_eq!(editor_snapshot(handle).masked_preview, "Hi there!");
    }

    #[test]
    fn delete_backward_updates_content() {
        let handle = open_blank_editor();
        let now = type_chars(handle, "abc", 0);

        assert_eq!(editor_delete_backward(handle, now).message, "Text deleted.");
        assert_eq!(editor_snapshot(handle).content, "ab");
    }

    #[test]
    fn todo_mode_and_enter_insert_checkboxes() {
        let handle = open_blank_editor();
        assert!(editor_set_todo_mode(handle, true, 0).ok);
        type_chars(handle, "milk", 10);
        assert_eq!(editor_enter(handle, 100).message, "Checklist item added.");

        let snapshot = editor_snapshot(handle);
        assert!(snapshot.todo_mode);
        assert_eq!(snapshot.content, "☐ milk☐ ");

        editor_set_todo_mode(handle, false, 200);
        assert_eq!(editor_enter(handle, 210).message, "Paragraph added.");
        assert_eq!(editor_snapshot(handle).content, "☐ milk☐ \n");
    }

    #[test]
    fn notes_can_be_listed_switched_and_deleted() {
        let handle = editor_open(0).handle.expect("editor_open returns a handle");
        let welcome_id = editor_snapshot(handle).note_id.expect("active note");
        let created = editor_create_note(handle, 5);
        let created_id = created.note_id.expect("created note id");

        let listed = editor_list_notes(handle);
        let titles: Vec<&str> = listed.items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "New Note 4",
                "Welcome to Routino Notes",
                "Personal Goals 2023",
                "Book Recommendations",
            ]
        );
        assert_eq!(listed.items[0].note_id, created_id);
        assert!(listed.items[0].is_active);

        assert!(editor_activate_note(handle, welcome_id).ok);
        assert!(editor_snapshot(handle).content.starts_with("Welcome"));

        for item in &listed.items[1..] {
            let deleted = editor_delete_note(handle, item.note_id.clone());
            assert!(deleted.ok, "{}", deleted.message);
        }
        assert_eq!(editor_snapshot(handle).note_id, Some(created_id.clone()));
        let refused = editor_delete_note(handle, created_id);
        assert!(!refused.ok);
        assert!(refused.message.contains("last note"));

        let bad = editor_activate_note(handle, "not-a-uuid".to_string());
        assert!(!bad.ok);
        assert!(bad.message.contains("invalid note_id"));
    }

    #[test]
    fn closed_handles_are_rejected() {
        let handle = open_blank_editor();
        assert!(editor_close(handle).ok);

        assert!(!editor_close(handle).ok);
        assert!(!editor_snapshot(handle).ok);
        let response = editor_type(handle, "x".to_string(), 0);
        assert!(!response.ok);
        assert!(response.message.contains("unknown editor handle"));
        assert!(editor_list_notes(handle).items.is_empty());
    }
}
