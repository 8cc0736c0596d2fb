#![warn(missing_docs)]
//! Headless editor-support kernel for grammar-workbench DSL buffers.
//!
//! # Overview
//!
//! `dsl-editor-core` maintains, under live edits, a typed partition of a text
//! buffer written in one of two small DSLs: a lexer description and a grammar
//! description, both embedding fragments of Java-like action code. It also
//! remaps positions recorded at a checkpoint through the edits applied since.
//! It renders nothing and decides no styling; presentation layers ask "what
//! kind of region is at offset X, and what got damaged by this edit?", model
//! layers ask "where did the range I stored at the checkpoint end up?".
//!
//! # Core Features
//!
//! - **Typed partitions**: every document position belongs to exactly one
//!   region (comment, literal, action code, option block or plain DSL text)
//! - **Incremental reconcile**: an edit restarts scanning at the region owning
//!   the edited line's start and stops as soon as the old partition is
//!   reproduced, instead of rescanning the document
//! - **Stable region ids**: regions an edit provably left unchanged keep their
//!   [`RegionId`], so consumers may key caches and overlays by id
//! - **Damage spans**: each edit reports the one span a presentation layer
//!   must repaint
//! - **Checkpoint remapping**: ranges stored at a checkpoint fold through the
//!   pending edit log to their live image, or to [`Remap::Gone`]
//!
//! # Data Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  TextEdit { offset, removed_len, inserted_text } │
//! └───────────────────────┬──────────────────────────┘
//!                         ▼
//!               ┌──────────────────┐
//!               │  BufferSession   │  bounds check (EditError)
//!               └────────┬─────────┘
//!              ┌─────────┴──────────┐
//!              ▼                    ▼
//!   ┌──────────────────────┐   ┌─────────┐
//!   │ DocumentPartitioner  │   │ EditLog │
//!   │  mirror + reconcile  │   └────┬────┘
//!   └──────────┬───────────┘        │ transform(StoredRange)
//!              ▼                    ▼
//!     damage Range<usize>    Remap::{Live, Gone}
//!     -> subscribed callbacks
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use dsl_editor_core::{BufferSession, Remap, RegionKind, StoredRange, TextEdit};
//! use dsl_editor_core_lang::DslProfile;
//!
//! let mut session = BufferSession::with_text(&DslProfile::lexer(), "id { run(); }");
//! assert_eq!(session.partitions().kind_at(5), Some(RegionKind::Action));
//!
//! // Model layers snapshot at a checkpoint, then chase their ranges forward.
//! session.checkpoint();
//! session.apply_edit(&TextEdit::insert(0, "// note\n")).unwrap();
//! assert_eq!(
//!     session.transform(StoredRange::new(3, 10)),
//!     Remap::Live(StoredRange::new(11, 10)),
//! );
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - rope-backed text mirror with char offset and line queries
//! - [`scan`] - shared character-level scanners (comments, literals, names)
//! - [`delimiter`] - balanced delimiter automaton with fallback lengths
//! - [`options`] - `[key = "value"]` option block automaton
//! - [`classifier`] - ordered region rules derived from a profile
//! - [`region`] - typed regions, stable ids and the partition table
//! - [`partitioner`] - incremental partition maintenance per edit
//! - [`edit`] - structured edits and their length-only records
//! - [`edit_log`] - checkpoint position remapping
//! - [`session`] - host-facing facade wiring everything together
//!
//! # Performance
//!
//! A keystroke re-derives only the neighborhood the edit could have changed:
//! scanning restarts at the region owning the edited line's start and stops at
//! the first reproduced boundary past the inserted text. Worst cases (opening
//! an unterminated block comment) still touch the document tail, matching what
//! the text then means.
//!
//! # Unicode
//!
//! Every offset and length in this crate counts **chars** (Unicode scalar
//! values), never bytes. Text lives in a `ropey` rope, so CJK and emoji sail
//! through untouched.

pub mod buffer;
pub mod classifier;
pub mod delimiter;
pub mod edit;
pub mod edit_log;
pub mod options;
pub mod partitioner;
pub mod region;
pub mod scan;
pub mod session;

pub use buffer::TextMirror;
pub use classifier::RegionClassifier;
pub use delimiter::DelimiterConfig;
pub use edit::{EditError, EditRecord, TextEdit};
pub use edit_log::{EditLog, Remap, StoredRange};
pub use options::scan_option_block;
pub use partitioner::DocumentPartitioner;
pub use region::{PartitionSet, Region, RegionId, RegionKind};
pub use scan::ScanOutcome;
pub use session::{BufferSession, DamageCallback};
