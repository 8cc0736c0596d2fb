//! Low-level char-stream skipping shared by the scanning automata.
//!
//! Every helper consumes from a peekable char stream and reports how many characters
//! it took; counts never include characters the caller consumed before the call. The
//! helpers know nothing about regions or profiles, only about the fixed comment,
//! literal, identifier and hole syntax.

use std::iter::Peekable;

/// Result of running a scanning automaton at a candidate region start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The construct is complete.
    Match {
        /// Characters covered, from the opening delimiter through the closing one.
        len: usize,
    },
    /// The construct is unfinished; the shallowest balanced prefix is claimed instead.
    Fallback {
        /// Characters claimed, from the opening delimiter through the resume point.
        len: usize,
    },
    /// The input does not start this construct; nothing is claimed.
    NoMatch,
}

impl ScanOutcome {
    /// Characters claimed by a `Match` or `Fallback`, `None` for `NoMatch`.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Match { len } | Self::Fallback { len } => Some(*len),
            Self::NoMatch => None,
        }
    }
}

/// Result of skipping one interior construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Skip {
    /// The construct closed properly after consuming this many chars.
    Terminated(usize),
    /// The stream (or line, where the construct is single-line) ended first.
    Unterminated(usize),
}

impl Skip {
    pub(crate) fn len(self) -> usize {
        match self {
            Self::Terminated(n) | Self::Unterminated(n) => n,
        }
    }

    pub(crate) fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated(_))
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Consume up to, but not including, the next newline. Returns chars taken.
pub(crate) fn line_comment_body<I: Iterator<Item = char>>(chars: &mut Peekable<I>) -> usize {
    let mut taken = 0;
    while chars.peek().is_some_and(|&c| c != '\n') {
        chars.next();
        taken += 1;
    }
    taken
}

/// Consume a block comment body after its `/*`, through the closing `*/`.
pub(crate) fn block_comment_body<I: Iterator<Item = char>>(chars: &mut Peekable<I>) -> Skip {
    let mut taken = 0;
    while let Some(c) = chars.next() {
        taken += 1;
        if c == '*' && chars.peek() == Some(&'/') {
            chars.next();
            return Skip::Terminated(taken + 1);
        }
    }
    Skip::Unterminated(taken)
}

/// Consume a quoted body after its opening quote, through the closing quote.
///
/// A backslash escapes the char after it unconditionally; an escape with nothing
/// after it leaves the body unterminated. Newlines are ordinary body chars here.
pub(crate) fn quoted_body<I: Iterator<Item = char>>(chars: &mut Peekable<I>, quote: char) -> Skip {
    let mut taken = 0;
    while let Some(c) = chars.next() {
        taken += 1;
        if c == '\\' {
            if chars.next().is_some() {
                taken += 1;
            } else {
                return Skip::Unterminated(taken);
            }
        } else if c == quote {
            return Skip::Terminated(taken);
        }
    }
    Skip::Unterminated(taken)
}

/// Consume a quoted body that may not cross a newline.
///
/// Same escape rules as [`quoted_body`], but an unescaped newline ends the body
/// unterminated without being consumed.
pub(crate) fn single_line_quoted_body<I: Iterator<Item = char>>(
    chars: &mut Peekable<I>,
    quote: char,
) -> Skip {
    let mut taken = 0;
    while let Some(&c) = chars.peek() {
        if c == '\n' {
            return Skip::Unterminated(taken);
        }
        chars.next();
        taken += 1;
        if c == '\\' {
            if chars.next().is_some() {
                taken += 1;
            } else {
                return Skip::Unterminated(taken);
            }
        } else if c == quote {
            return Skip::Terminated(taken);
        }
    }
    Skip::Unterminated(taken)
}

/// Consume a hole name after its marker: one ASCII lowercase letter, then word chars.
///
/// Returns `None` when the char after the marker cannot start a name.
pub(crate) fn hole_name<I: Iterator<Item = char>>(chars: &mut Peekable<I>) -> Option<usize> {
    if !chars.peek().is_some_and(|c| c.is_ascii_lowercase()) {
        return None;
    }
    chars.next();
    let mut taken = 1;
    while chars.peek().is_some_and(|&c| is_word_char(c)) {
        chars.next();
        taken += 1;
    }
    Some(taken)
}

/// Consume an identifier: `[A-Za-z_]` then word chars. Returns chars taken, 0 if none.
pub(crate) fn identifier<I: Iterator<Item = char>>(chars: &mut Peekable<I>) -> usize {
    if !chars
        .peek()
        .is_some_and(|&c| c.is_ascii_alphabetic() || c == '_')
    {
        return 0;
    }
    chars.next();
    let mut taken = 1;
    while chars.peek().is_some_and(|&c| is_word_char(c)) {
        chars.next();
        taken += 1;
    }
    taken
}
