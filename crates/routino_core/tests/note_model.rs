use routino_core::{
    tokenize, EditorSettings, FontFamily, Note, RevealState, SettingsError,
    TextAlign, TextCounters, TokenKind,
};

#[test]
fn note_new_sets_defaults() {
    let note = Note::new(3, 1_700_000_000_000);

    assert!(!note.id.is_nil());
    assert_eq!(note.number, 3);
    assert_eq!(note.title, "New Note 3");
    assert_eq!(note.content, "");
    assert_eq!(note.last_touched_ms, 1_700_000_000_000);
    assert!(!note.is_active);
}

#[test]
fn note_serialization_uses_expected_wire_fields() {
    let mut note = Note::new(1, 1_700_000_000_000);
    note.set_content("☐ buy milk", 1_700_000_360_000);
    note.is_active = true;

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["id"], note.id.to_string());
    assert_eq!(json["number"], 1);
    assert_eq!(json["title"], "New Note 1");
    assert_eq!(json["content"], "☐ buy milk");
    assert_eq!(json["last_touched_ms"], 1_700_000_360_000_i64);
    assert_eq!(json["is_active"], true);

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn token_serialization_uses_snake_case_tags() {
    let tokens = tokenize("hi there", true);
    let json = serde_json::to_value(&tokens).unwrap();

    assert_eq!(json[0]["text"], "hi");
    assert_eq!(json[0]["kind"], "word");
    assert_eq!(json[0]["reveal"], "obscured");
    assert_eq!(json[1]["kind"], "whitespace");
    assert_eq!(json[1]["reveal"], "clear");

    let decoded: Vec<routino_core::Token> = serde_json::from_value(json).unwrap();
    assert_eq!(decoded[2].kind, TokenKind::Word);
    assert_eq!(decoded[2].reveal, RevealState::Obscured);
}

#[test]
fn settings_default_to_blurred_left_aligned_text() {
    let settings = EditorSettings::default();
    assert!(settings.blur_enabled);
    assert!(!settings.todo_mode);
    assert_eq!(settings.font_family, FontFamily::Default);
    assert_eq!(settings.font_size(), 16);
    assert_eq!(settings.text_align, TextAlign::Left);

    let json = serde_json::to_value(&settings).unwrap();
    assert_eq!(json["font_family"], "default");
    assert_eq!(json["font_size"], 16);
    assert_eq!(json["text_align"], "left");
}

#[test]
fn deserializing_settings_validates_font_size() {
    let mut json = serde_json::to_value(EditorSettings::default()).unwrap();
    json["font_size"] = serde_json::json!(20);
    let settings: EditorSettings = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(settings.font_size(), 20);

    json["font_size"] = serde_json::json!(13);
    let err = serde_json::from_value::<EditorSettings>(json).unwrap_err();
    assert!(err.to_string().contains("font size 13px is unsupported"));
}

#[test]
fn unsupported_font_size_keeps_current_size() {
    let mut settings = EditorSettings::default();
    settings.set_font_size(24).unwrap();
    assert_eq!(
        settings.set_font_size(13).unwrap_err(),
        SettingsError::UnsupportedFontSize(13)
    );
    assert_eq!(settings.font_size(), 24);
}

#[test]
fn counters_ignore_surrounding_whitespace() {
    let counters = TextCounters::measure("  two   words \n");
    assert_eq!(counters.words, 2);
    assert_eq!(counters.chars, 11);
    assert_eq!(counters.word_label(), "2 words");
    assert_eq!(counters.char_label(), "11 characters");
    assert_eq!(TextCounters::measure("one").word_label(), "1 word");
}
