//! Partition walkthrough example
//!
//! Drives one [`BufferSession`] through a small grammar-editing scenario and
//! prints what the kernel reports after each step.

use dsl_editor_core::{BufferSession, RegionKind, StoredRange, TextEdit};
use dsl_editor_core_lang::DslProfile;

fn print_partition(session: &BufferSession) {
    for (id, region) in session.partitions().entries() {
        println!(
            "  {:?} {:>3}..{:<3} {:?} {:?}",
            id,
            region.start,
            region.end,
            region.kind,
            session.text_mirror().span_text(region.range())
        );
    }
}

fn main() {
    let mut session = BufferSession::with_text(
        &DslProfile::grammar(),
        "expr: term { fold(); } ; // reduce\n",
    );
    session.subscribe(|damage| println!("  damage -> {damage:?}"));

    println!("initial partition:");
    print_partition(&session);
    assert_eq!(session.partitions().kind_at(13), Some(RegionKind::Action));

    // A model layer snapshots an anchor on the action block.
    session.checkpoint();
    let body = StoredRange::new(11, 11);

    println!("\nprepend a comment line:");
    session
        .apply_edit(&TextEdit::insert(0, "// rewritten\n"))
        .unwrap();
    print_partition(&session);

    println!("\ntype inside the action:");
    let live = session.transform(body).live().unwrap();
    session
        .apply_edit(&TextEdit::insert(live.end() - 1, "trace(); "))
        .unwrap();
    print_partition(&session);

    let live = session.transform(body).live().unwrap();
    println!(
        "\nanchor followed the action: {:?} = {:?}",
        live,
        session.text_mirror().span_text(live.offset..live.end())
    );
}
