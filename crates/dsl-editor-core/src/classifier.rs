//! Region classification rules.
//!
//! A classifier is an ordered rule list derived from a [`DslProfile`]: line comment,
//! block comment, char literal, string literal, option block (when enabled), then one
//! delimiter automaton per action shape. At any position the first matching rule owns
//! the region; chars no rule claims are default text, and maximal default runs
//! coalesce into single regions so a partition never carries char-by-char noise.

use crate::buffer::TextMirror;
use crate::delimiter::DelimiterConfig;
use crate::options;
use crate::region::{Region, RegionKind};
use crate::scan::{self, ScanOutcome};
use dsl_editor_core_lang::{ActionShape, DslProfile};

/// A scanned region plus a closure flag. `closed` is false when the scan ran
/// out of text instead of finding its terminator (delimiter fallback,
/// unterminated block comment); such a region can change shape when text
/// after it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scanned {
    pub(crate) region: Region,
    pub(crate) closed: bool,
}

/// One classification rule, tried in order at each candidate position.
#[derive(Debug, Clone, Copy)]
enum Rule {
    LineComment,
    BlockComment,
    CharLiteral,
    StringLiteral,
    OptionBlock,
    Delimited {
        kind: RegionKind,
        config: DelimiterConfig,
    },
}

impl Rule {
    /// Cheap first-char gate so default runs skip chars without running automata.
    fn could_start(&self, c: char) -> bool {
        match self {
            Rule::LineComment | Rule::BlockComment => c == '/',
            Rule::CharLiteral => c == '\'',
            Rule::StringLiteral => c == '"',
            Rule::OptionBlock => c == '[',
            Rule::Delimited { config, .. } => c == config.open,
        }
    }

    fn try_match(&self, text: &TextMirror, pos: usize) -> Option<(RegionKind, usize, bool)> {
        match *self {
            Rule::LineComment => {
                let mut chars = text.chars_from(pos).peekable();
                if chars.next() != Some('/') || chars.next() != Some('/') {
                    return None;
                }
                // The trailing newline stays outside the region.
                let body = scan::line_comment_body(&mut chars);
                Some((RegionKind::LineComment, 2 + body, true))
            }
            Rule::BlockComment => {
                let mut chars = text.chars_from(pos).peekable();
                if chars.next() != Some('/') || chars.next() != Some('*') {
                    return None;
                }
                // An unterminated comment claims everything to end of stream.
                let body = scan::block_comment_body(&mut chars);
                Some((RegionKind::BlockComment, 2 + body.len(), body.is_terminated()))
            }
            Rule::CharLiteral => literal_region(text, pos, '\'', RegionKind::CharLiteral),
            Rule::StringLiteral => literal_region(text, pos, '"', RegionKind::StringLiteral),
            Rule::OptionBlock => match options::scan_option_block(text.chars_from(pos)) {
                ScanOutcome::Match { len } => Some((RegionKind::OptionBlock, len, true)),
                _ => None,
            },
            Rule::Delimited { kind, config } => match config.scan(text.chars_from(pos)) {
                ScanOutcome::Match { len } => Some((kind, len, true)),
                ScanOutcome::Fallback { len } => Some((kind, len, false)),
                ScanOutcome::NoMatch => None,
            },
        }
    }
}

/// Standalone literals are single-line; unterminated ones stop at the newline
/// (or end of stream) instead of swallowing the rest of the document. Either
/// way the extent is bounded by the literal's own line, so the region counts
/// as closed.
fn literal_region(
    text: &TextMirror,
    pos: usize,
    quote: char,
    kind: RegionKind,
) -> Option<(RegionKind, usize, bool)> {
    let mut chars = text.chars_from(pos).peekable();
    if chars.next() != Some(quote) {
        return None;
    }
    let body = scan::single_line_quoted_body(&mut chars, quote);
    Some((kind, 1 + body.len(), true))
}

/// Ordered region classification rules for one DSL profile.
#[derive(Debug, Clone)]
pub struct RegionClassifier {
    rules: Vec<Rule>,
}

impl RegionClassifier {
    /// Build the rule list for `profile`. The profile should already be validated;
    /// clashing delimiters resolve by rule order.
    pub fn new(profile: &DslProfile) -> Self {
        let mut rules = vec![
            Rule::LineComment,
            Rule::BlockComment,
            Rule::CharLiteral,
            Rule::StringLiteral,
        ];
        if profile.options {
            rules.push(Rule::OptionBlock);
        }
        if let Some(shape) = profile.action {
            rules.push(Rule::Delimited {
                kind: RegionKind::Action,
                config: shape_config(shape, profile.hole_marker),
            });
        }
        if let Some(shape) = profile.args_action {
            rules.push(Rule::Delimited {
                kind: RegionKind::ArgsAction,
                config: shape_config(shape, profile.hole_marker),
            });
        }
        log::debug!(
            "region classifier for profile '{}': {} rules",
            profile.name,
            rules.len()
        );
        Self { rules }
    }

    /// Classify the region starting at `pos`, which must lie inside the document.
    ///
    /// Default chars are coalesced: the returned region extends to the next position
    /// where some rule matches, or to end of document.
    pub fn next_region(&self, text: &TextMirror, pos: usize) -> Region {
        self.scan_region(text, pos).region
    }

    /// Like [`next_region`](Self::next_region), but also reports whether the
    /// region's scan was self-contained. Default runs count as closed.
    pub(crate) fn scan_region(&self, text: &TextMirror, pos: usize) -> Scanned {
        debug_assert!(pos < text.len_chars(), "probe past end of document");
        if let Some((kind, len, closed)) = self.classify_at(text, pos) {
            return Scanned {
                region: Region::new(kind, pos, pos + len),
                closed,
            };
        }

        let mut end = pos + 1;
        for c in text.chars_from(end) {
            if self.could_start(c) && self.classify_at(text, end).is_some() {
                break;
            }
            end += 1;
        }
        Scanned {
            region: Region::new(RegionKind::Default, pos, end),
            closed: true,
        }
    }

    /// Tile the whole document into regions.
    pub fn scan_all(&self, text: &TextMirror) -> Vec<Region> {
        let len = text.len_chars();
        let mut regions = Vec::new();
        let mut pos = 0;
        while pos < len {
            let region = self.next_region(text, pos);
            debug_assert!(region.end > pos, "scan must advance");
            pos = region.end;
            regions.push(region);
        }
        regions
    }

    /// Run the rule list at one position, without default coalescing.
    fn classify_at(&self, text: &TextMirror, pos: usize) -> Option<(RegionKind, usize, bool)> {
        let first = text.char_at(pos)?;
        self.rules
            .iter()
            .filter(|rule| rule.could_start(first))
            .find_map(|rule| rule.try_match(text, pos))
    }

    fn could_start(&self, c: char) -> bool {
        self.rules.iter().any(|rule| rule.could_start(c))
    }
}

fn shape_config(shape: ActionShape, marker: char) -> DelimiterConfig {
    if shape.allow_holes {
        DelimiterConfig::with_hole_marker(shape.open, shape.close, marker)
    } else {
        DelimiterConfig::new(shape.open, shape.close)
    }
}
