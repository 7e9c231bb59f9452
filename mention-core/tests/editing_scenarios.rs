//! End-to-end editing sessions driven the way a host text field drives the
//! editor: typed text, caret moves, backspaces and a final render.

use mention_core::{App, MentionConfig, MentionEditor, Mode, Rgb, Selection};

fn type_str(editor: &mut MentionEditor, s: &str) {
    for c in s.chars() {
        editor.insert_text(&c.to_string());
    }
}

fn mention_bounds(editor: &MentionEditor) -> Vec<(u64, usize, usize)> {
    let mut bounds: Vec<_> = editor
        .mentions()
        .iter()
        .map(|r| (r.id, r.from, r.to))
        .collect();
    bounds.sort_by_key(|b| b.1);
    bounds
}

#[test]
fn test_render_single_mention_into_empty_buffer() {
    let mut editor = MentionEditor::new();
    editor.insert_mention(7, "Alice", false);

    let rendered = editor.render("[%s:%s]", true).unwrap();
    assert!(rendered.starts_with("[7:Alice]"));
    assert_eq!(rendered, "[7:Alice] ");
    assert_eq!(editor.text(), "");
    assert!(editor.mentions().is_empty());
}

#[test]
fn test_chat_message_with_two_mentions() {
    let mut editor = MentionEditor::new();
    type_str(&mut editor, "hey @");
    editor.insert_mention(1, "alice", true);
    type_str(&mut editor, "and @");
    editor.insert_mention(2, "bob", true);
    type_str(&mut editor, "lunch?");

    assert_eq!(editor.text(), "hey @alice and @bob lunch?");
    assert_eq!(mention_bounds(&editor), vec![(1, 4, 10), (2, 15, 19)]);

    let rendered = editor.render("<@%d:%s>", false).unwrap();
    assert_eq!(rendered, "hey <@1:alice> and <@2:bob> lunch?");
}

#[test]
fn test_editing_between_mentions_keeps_both() {
    let mut editor = MentionEditor::new();
    editor.insert_mention(1, "alice", false);
    editor.insert_mention(2, "bob", false);
    assert_eq!(editor.text(), "alice bob ");

    // Type between the two mentions
    editor.set_caret(6);
    type_str(&mut editor, "& ");
    assert_eq!(editor.text(), "alice & bob ");
    assert_eq!(mention_bounds(&editor), vec![(1, 0, 5), (2, 8, 11)]);

    // Replace a selection that swallows the first mention entirely
    editor.set_selection(0, 7);
    type_str(&mut editor, "hi");
    assert_eq!(editor.text(), "hi bob ");
    assert_eq!(mention_bounds(&editor), vec![(2, 3, 6)]);
}

#[test]
fn test_atomic_backspace_then_typing_replaces_mention() {
    let mut editor = MentionEditor::new();
    type_str(&mut editor, "hi @");
    editor.insert_mention(1, "bob", true);
    editor.set_caret(7);

    assert!(editor.delete_key());
    assert_eq!(editor.selection(), Selection::new(7, 3));

    // Typing over the offered selection replaces the whole mention
    type_str(&mut editor, "x");
    assert_eq!(editor.text(), "hi x ");
    assert!(editor.mentions().is_empty());
}

#[test]
fn test_moving_away_cancels_pending_delete() {
    let mut editor = MentionEditor::new();
    editor.insert_mention(1, "amy", false);
    editor.insert_mention(2, "bob", false);
    // "amy bob ", caret after bob
    editor.set_caret(7);
    assert!(editor.delete_key());
    assert!(editor.is_mention_selected());

    // Back onto the end of the first mention: the pending selection is dropped
    editor.set_caret(3);
    assert!(!editor.is_mention_selected());

    // So the next backspace offers that mention instead of deleting anything
    assert!(editor.delete_key());
    assert_eq!(editor.selection(), Selection::new(3, 0));
    assert_eq!(editor.text(), "amy bob ");
}

#[test]
fn test_mouse_drag_into_mention_is_widened() {
    let mut editor = MentionEditor::new();
    type_str(&mut editor, "ok ");
    editor.insert_mention(9, "zoe", false);
    type_str(&mut editor, "bye");
    // "ok zoe bye", mention [3, 6)

    editor.set_selection(8, 4);
    let sel = editor.selection();
    assert_eq!((sel.start(), sel.end()), (3, 8));

    editor.set_selection(1, 5);
    let sel = editor.selection();
    assert_eq!((sel.start(), sel.end()), (1, 6));
}

#[test]
fn test_ime_delete_surrounding_text() {
    let mut editor = MentionEditor::new();
    editor.insert_mention(1, "bob", false);

    // IME asks to delete one char before the caret sitting on the mention end
    editor.set_caret(3);
    assert!(editor.delete_surrounding_text(1, 0));
    assert!(editor.is_mention_selected());
    assert!(editor.delete_surrounding_text(1, 0));
    assert_eq!(editor.text(), " ");

    // Larger requests are plain splices; the caret was left at 0
    type_str(&mut editor, "abc");
    editor.delete_surrounding_text(2, 0);
    assert_eq!(editor.text(), "a ");
    assert_eq!(editor.caret(), 1);
}

#[test]
fn test_forward_delete_at_mention_start_removes_it() {
    let mut editor = MentionEditor::new();
    type_str(&mut editor, "a ");
    editor.insert_mention(1, "bob", false);
    editor.set_caret(2);
    editor.delete_forward();
    assert_eq!(editor.text(), "a  ");
    assert!(editor.mentions().is_empty());
}

#[test]
fn test_custom_highlight_color() {
    let config = MentionConfig {
        highlight_color: Rgb::new(0x33, 0x66, 0x99),
        ..MentionConfig::default()
    };
    let mut app = App::new(config).unwrap();
    app.type_char('@');
    assert_eq!(app.mode, Mode::Picker);
    app.confirm_picker();

    assert_eq!(app.editor.text(), "@alice ");
    assert_eq!(
        app.editor.highlights().color_at(0),
        Some(Rgb::new(0x33, 0x66, 0x99))
    );
    assert_eq!(app.preview(), "[mention: 1, alice] ");
}

#[test]
fn test_invalid_template_in_config_is_rejected() {
    let config = MentionConfig {
        template: "only %s".to_string(),
        ..MentionConfig::default()
    };
    assert!(App::new(config).is_err());
}
