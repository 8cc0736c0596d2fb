//! End-to-end session walkthrough: one buffer, edits, damage callbacks and
//! checkpoint remapping working together the way a host embeds them.

use dsl_editor_core::{BufferSession, Remap, RegionKind, StoredRange, TextEdit};
use dsl_editor_core_lang::DslProfile;
use std::sync::{Arc, Mutex};

#[test]
fn test_grammar_editing_walkthrough() {
    //                     111111111122222222223333333333444444
    //           0123456789012345678901234567890123456789012345
    let source = "expr: term PLUS term { fold(); } ;\n// trailer\n";
    let mut session = BufferSession::with_text(&DslProfile::grammar(), source);

    let damage_sink: Arc<Mutex<Vec<std::ops::Range<usize>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&damage_sink);
    session.subscribe(move |damage| sink.lock().unwrap().push(damage.clone()));

    assert_eq!(session.partitions().kind_at(0), Some(RegionKind::Default));
    assert_eq!(session.partitions().kind_at(25), Some(RegionKind::Action));
    assert_eq!(session.partitions().kind_at(36), Some(RegionKind::LineComment));

    // A model layer snapshots its anchors here.
    session.checkpoint();
    assert_eq!(session.generation(), 1);
    let rule_name = StoredRange::new(1, 3); // "xpr"
    let action_body = StoredRange::new(21, 11); // "{ fold(); }"
    let caret = 33; // on the rule-final ";"

    // Typing inside the action grows the stored action range in place.
    session.apply_edit(&TextEdit::insert(30, " flush();")).unwrap();
    assert_eq!(
        session.transform(action_body),
        Remap::Live(StoredRange::new(21, 20))
    );
    assert_eq!(session.transform(rule_name), Remap::Live(rule_name));
    assert_eq!(session.transform_offset(caret), Some(42));

    // Deleting the rule head swallows the name anchor outright.
    session.apply_edit(&TextEdit::delete(0, 6)).unwrap();
    assert_eq!(session.transform(rule_name), Remap::Gone);
    assert_eq!(
        session.transform(action_body),
        Remap::Live(StoredRange::new(15, 20))
    );
    assert_eq!(session.transform_offset(caret), Some(36));

    // The partition tracked both edits.
    assert_eq!(
        session.text(),
        "term PLUS term { fold(); flush(); } ;\n// trailer\n"
    );
    assert_eq!(session.partitions().kind_at(16), Some(RegionKind::Action));

    // Both edits reported to the subscriber. Typing damaged the inserted span;
    // deleting the rule head only shifted regions, so its damage is empty.
    let spans = damage_sink.lock().unwrap().clone();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0], 30..39);
    assert_eq!(spans[1], 0..0);

    // A new checkpoint starts remapping from the current text.
    session.checkpoint();
    assert_eq!(session.generation(), 2);
    assert!(session.edit_log().is_empty());
    assert_eq!(
        session.transform(action_body),
        Remap::Live(action_body),
        "a fresh checkpoint must remap identically"
    );
}

#[test]
fn test_typing_an_action_char_by_char() {
    let mut session = BufferSession::with_text(&DslProfile::lexer(), "id ");
    for (i, c) in "{ emit(); }".chars().enumerate() {
        session.apply_edit(&TextEdit::insert(3 + i, c.to_string())).unwrap();
    }

    assert_eq!(session.text(), "id { emit(); }");
    assert_eq!(session.partitions().kind_at(3), Some(RegionKind::Action));
    assert_eq!(session.partitions().kind_at(13), Some(RegionKind::Action));
    assert_eq!(session.partitions().kind_at(0), Some(RegionKind::Default));

    // While the close was still missing the open already claimed a region.
    let mut partial = BufferSession::with_text(&DslProfile::lexer(), "id ");
    partial.apply_edit(&TextEdit::insert(3, "{ emit(")).unwrap();
    assert_eq!(partial.partitions().kind_at(3), Some(RegionKind::Action));
}

#[test]
fn test_rejected_edit_leaves_session_untouched() {
    let mut session = BufferSession::with_text(&DslProfile::lexer(), "a { b }");
    let fired = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&fired);
    session.subscribe(move |_| *counter.lock().unwrap() += 1);

    let before = session.text();
    assert!(session.apply_edit(&TextEdit::delete(100, 5)).is_err());

    assert_eq!(session.text(), before);
    assert!(session.edit_log().is_empty());
    assert_eq!(*fired.lock().unwrap(), 0);

    // The session still works after the rejection.
    session.apply_edit(&TextEdit::insert(0, "x")).unwrap();
    assert_eq!(session.text(), "xa { b }");
    assert_eq!(*fired.lock().unwrap(), 1);
}
