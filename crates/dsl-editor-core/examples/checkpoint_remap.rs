use dsl_editor_core::{BufferSession, Remap, StoredRange, TextEdit};
use dsl_editor_core_lang::DslProfile;

fn main() {
    let mut session = BufferSession::with_text(&DslProfile::lexer(), "name { act(); } tail");
    session.checkpoint();
    let action = StoredRange::new(5, 10);

    // Edits before the range shift it; undoing them shifts it back.
    session.apply_edit(&TextEdit::insert(0, "// tag\n")).unwrap();
    assert_eq!(
        session.transform(action),
        Remap::Live(StoredRange::new(12, 10))
    );
    session.apply_edit(&TextEdit::delete(0, 7)).unwrap();
    assert_eq!(session.transform(action), Remap::Live(action));

    // A replace that swallows the whole range retires it.
    session.apply_edit(&TextEdit::replace(3, 13, "x")).unwrap();
    assert_eq!(session.transform(action), Remap::Gone);

    println!("remapped through {} edits: {:?}", session.edit_log().len(), session.text());
}
