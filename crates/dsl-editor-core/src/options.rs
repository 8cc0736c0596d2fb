//! Option-block automaton.
//!
//! Option blocks are single headers of the fixed shape `[ key = "value" ]`, with any
//! mix of whitespace and comments between tokens. Unlike action scanning there is no
//! partial credit: a block either parses completely or the scan reports `NoMatch`
//! and the chars fall through to the later classifier rules.

use crate::scan::{self, ScanOutcome};
use std::iter::Peekable;

/// Scan one `[key = "value"]` option block starting at the first char of `chars`.
///
/// Returns `Match` covering `[` through `]` inclusive, or `NoMatch` on any
/// structural deviation (bad key, missing `=`, unterminated value or comment,
/// missing `]`, end of stream). Never returns `Fallback`.
pub fn scan_option_block(chars: impl Iterator<Item = char>) -> ScanOutcome {
    let mut chars = chars.peekable();
    if chars.next() != Some('[') {
        return ScanOutcome::NoMatch;
    }
    let mut taken = 1usize;

    let Some(filler) = skip_filler(&mut chars) else {
        return ScanOutcome::NoMatch;
    };
    taken += filler;

    let key_len = scan::identifier(&mut chars);
    if key_len == 0 {
        return ScanOutcome::NoMatch;
    }
    taken += key_len;

    let Some(filler) = skip_filler(&mut chars) else {
        return ScanOutcome::NoMatch;
    };
    taken += filler;

    if chars.next() != Some('=') {
        return ScanOutcome::NoMatch;
    }
    taken += 1;

    let Some(filler) = skip_filler(&mut chars) else {
        return ScanOutcome::NoMatch;
    };
    taken += filler;

    if chars.next() != Some('"') {
        return ScanOutcome::NoMatch;
    }
    taken += 1;

    // Values are single-line; a raw newline inside one rules the block out.
    let value = scan::single_line_quoted_body(&mut chars, '"');
    if !value.is_terminated() {
        return ScanOutcome::NoMatch;
    }
    taken += value.len();

    let Some(filler) = skip_filler(&mut chars) else {
        return ScanOutcome::NoMatch;
    };
    taken += filler;

    if chars.next() != Some(']') {
        return ScanOutcome::NoMatch;
    }
    taken += 1;

    ScanOutcome::Match { len: taken }
}

/// Consume whitespace and comments between option tokens.
///
/// Returns chars taken, or `None` when an unterminated block comment or a stray `/`
/// makes the block impossible.
fn skip_filler<I: Iterator<Item = char>>(chars: &mut Peekable<I>) -> Option<usize> {
    let mut taken = 0usize;
    loop {
        match chars.peek() {
            Some(&c) if c.is_whitespace() => {
                chars.next();
                taken += 1;
            }
            Some('/') => {
                chars.next();
                taken += 1;
                match chars.peek() {
                    Some('/') => {
                        chars.next();
                        taken += 1;
                        // The newline after the comment is whitespace; the next
                        // loop round picks it up.
                        taken += scan::line_comment_body(chars);
                    }
                    Some('*') => {
                        chars.next();
                        taken += 1;
                        let skip = scan::block_comment_body(chars);
                        if !skip.is_terminated() {
                            return None;
                        }
                        taken += skip.len();
                    }
                    _ => return None,
                }
            }
            _ => return Some(taken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_full_match(input: &str) {
        assert_eq!(
            scan_option_block(input.chars()),
            ScanOutcome::Match {
                len: input.chars().count()
            },
            "input should match whole: {input:?}"
        );
    }

    #[test]
    fn test_plain_option_block() {
        assert_full_match(r#"[ key = "value" ]"#);
        assert_full_match(r#"[key="value"]"#);
        assert_full_match(r#"[_k1 = ""]"#);
    }

    #[test]
    fn test_comments_between_tokens() {
        assert_full_match("[ /* pick */ caseSensitive // note\n = \"false\" ]");
        assert_full_match("[k/*a*/=/*b*/\"v\"/*c*/]");
    }

    #[test]
    fn test_escapes_in_value() {
        assert_full_match(r#"[ key = "a\"b\\c" ]"#);
    }

    #[test]
    fn test_spanning_lines_between_tokens() {
        assert_full_match("[\n  key\n  =\n  \"v\"\n]");
    }

    #[test]
    fn test_structural_deviations_are_no_match() {
        let cases = [
            "x[ key = \"v\" ]",    // wrong first char
            "[ 9key = \"v\" ]",    // bad identifier
            "[ key \"v\" ]",       // missing '='
            "[ key = v ]",         // unquoted value
            "[ key = \"v\" ",      // missing ']'
            "[ key = \"v ]",       // unterminated value
            "[ key = \"a\nb\" ]",  // raw newline in value
            "[ key / = \"v\" ]",   // stray slash
            "[ key = \"v\" /* ]",  // unterminated comment
            "[",                   // bare open
            "",                    // empty stream
        ];
        for case in cases {
            assert_eq!(
                scan_option_block(case.chars()),
                ScanOutcome::NoMatch,
                "should not match: {case:?}"
            );
        }
    }

    #[test]
    fn test_trailing_input_is_not_consumed_logically() {
        // Only the block itself is claimed; the scan length stops at ']'.
        let input = r#"[ key = "v" ] tail"#;
        assert_eq!(scan_option_block(input.chars()), ScanOutcome::Match { len: 13 });
    }
}
