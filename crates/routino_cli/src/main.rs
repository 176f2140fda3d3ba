//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `routino_core` linkage.
//! - Run one blurred pass over the arguments and print what a bystander
//!   would see.
//! - Keep output deterministic for quick local sanity checks.

use routino_core::{
    init_logging, EditingSession, EditorSettings, HeadlessHost, NoteStore, RenderHost,
    SelectionRange,
};
use std::process::ExitCode;

const MASK_CHAR: char = '•';

fn main() -> ExitCode {
    if let Some(log_dir) = env_value("ROUTINO_LOG_DIR") {
        let level = env_value("ROUTINO_LOG_LEVEL")
            .unwrap_or_else(|| routino_core::default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("routino_cli logging disabled: {err}");
        }
    }

    println!("routino_core ping={}", routino_core::ping());
    println!("routino_core version={}", routino_core::core_version());

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return ExitCode::SUCCESS;
    }

    let mut store = NoteStore::new();
    store.create(0);
    if let Err(err) = store.update_active_content(&text, 0) {
        eprintln!("routino_cli failed: {err}");
        return ExitCode::FAILURE;
    }

    let mut host = HeadlessHost::new();
    let mut session = EditingSession::open(store, EditorSettings::default(), &mut host);
    println!("masked={}", host.masked_preview(MASK_CHAR));

    // Reveal the last word, as if the caret sat at the end of the note.
    let end = host.plain_text().chars().count();
    session.on_selection_changed(&mut host, Some(SelectionRange::collapsed(end)));
    println!("caret_at_end={}", host.masked_preview(MASK_CHAR));

    let counters = session.counters();
    println!(
        "tokens={} {} {}",
        session.tokens().len(),
        counters.word_label(),
        counters.char_label()
    );
    ExitCode::SUCCESS
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
