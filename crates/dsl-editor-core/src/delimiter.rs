//! Balanced-delimiter automaton for embedded action code.
//!
//! Action blocks nest (`{ if (a) { b(); } }`) and may contain comments, string and
//! char literals, and hole names, none of which count toward the delimiter depth.
//! A buffer being edited is unbalanced most of the time, so an unfinished block does
//! not fail the scan: the automaton claims the longest prefix that ends at the
//! shallowest balanced point seen, and the rest of the document is classified on its
//! own. Typing the missing close later rebalances everything downstream.

use crate::scan::{self, ScanOutcome};

/// Delimiter pair, plus optional hole marker, for one action shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterConfig {
    /// Opening delimiter.
    pub open: char,
    /// Closing delimiter.
    pub close: char,
    /// Marker that introduces hole names, when the shape allows them.
    pub hole_marker: Option<char>,
}

impl DelimiterConfig {
    /// Config without hole support.
    pub const fn new(open: char, close: char) -> Self {
        Self {
            open,
            close,
            hole_marker: None,
        }
    }

    /// Config that recognizes `marker`-prefixed hole names.
    pub const fn with_hole_marker(open: char, close: char, marker: char) -> Self {
        Self {
            open,
            close,
            hole_marker: Some(marker),
        }
    }

    /// Scan one action block starting at the first char of `chars`.
    ///
    /// Returns `Match` when the block closes, `NoMatch` when the input does not start
    /// with `open`, and otherwise a `Fallback` covering the open delimiter through the
    /// latest point where the depth was at its shallowest. Unterminated comments and
    /// literals, an escape at end-of-stream and a malformed hole name all abort the
    /// scan with the same fallback disposition as running out of input.
    pub fn scan(&self, chars: impl Iterator<Item = char>) -> ScanOutcome {
        let mut chars = chars.peekable();
        if chars.next() != Some(self.open) {
            return ScanOutcome::NoMatch;
        }

        // The open delimiter alone is always a valid resume point.
        let mut taken = 1usize;
        let mut depth = 1usize;
        let mut fallback_len = 1usize;
        let mut min_depth = 1usize;

        while let Some(c) = chars.next() {
            taken += 1;
            match c {
                '/' => match chars.peek() {
                    Some('/') => {
                        chars.next();
                        taken += 1;
                        taken += scan::line_comment_body(&mut chars);
                    }
                    Some('*') => {
                        chars.next();
                        taken += 1;
                        let skip = scan::block_comment_body(&mut chars);
                        if !skip.is_terminated() {
                            break;
                        }
                        taken += skip.len();
                    }
                    _ => {}
                },
                '"' | '\'' => {
                    let skip = scan::quoted_body(&mut chars, c);
                    if !skip.is_terminated() {
                        break;
                    }
                    taken += skip.len();
                }
                c if self.hole_marker == Some(c) => match scan::hole_name(&mut chars) {
                    Some(name_len) => taken += name_len,
                    None => break,
                },
                c if c == self.open => depth += 1,
                c if c == self.close => {
                    depth -= 1;
                    if depth == 0 {
                        return ScanOutcome::Match { len: taken };
                    }
                    if depth <= min_depth {
                        min_depth = depth;
                        fallback_len = taken;
                    }
                }
                _ => {}
            }
        }

        ScanOutcome::Fallback { len: fallback_len }
    }
}
