#![warn(missing_docs)]
//! `dsl-editor-core-lang` - data-driven DSL profile definitions for `dsl-editor-core`.
//!
//! This crate intentionally stays lightweight and does **not** depend on the editor kernel
//! or any scanning machinery. It describes *what* a DSL flavor looks like (embedded action
//! delimiters, option blocks, hole markers); the kernel decides *how* to scan buffers with it.
//!
//! Profiles can be built in code ([`DslProfile::lexer`], [`DslProfile::grammar`]) or loaded
//! from YAML ([`DslProfile::from_yaml_str`]), so hosts can ship them as data files next to
//! their grammars:
//!
//! ```yaml
//! name: grammar
//! action: { open: "{", close: "}", allow_holes: true }
//! args_action: { open: "<", close: ">", allow_holes: true }
//! options: true
//! hole_marker: "#"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A balanced-delimiter shape for embedded action code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionShape {
    /// Opening delimiter (e.g. `{`).
    pub open: char,
    /// Closing delimiter (e.g. `}`).
    pub close: char,
    /// Whether hole names (marker + identifier) are recognized inside this shape.
    #[serde(default)]
    pub allow_holes: bool,
}

impl ActionShape {
    /// Create a shape without hole support.
    pub const fn new(open: char, close: char) -> Self {
        Self {
            open,
            close,
            allow_holes: false,
        }
    }

    /// Create a shape that accepts hole names inside it.
    pub const fn with_holes(open: char, close: char) -> Self {
        Self {
            open,
            close,
            allow_holes: true,
        }
    }
}

fn default_options() -> bool {
    true
}

fn default_hole_marker() -> char {
    '#'
}

/// Everything the kernel needs to know about one DSL flavor.
///
/// A profile lists the delimiter shapes that introduce embedded action code, whether
/// `[key = "value"]` option blocks are part of the language, and which marker char
/// introduces hole names inside hole-enabled shapes. Comment and literal syntax is the
/// same for every flavor and is not configurable here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DslProfile {
    /// Profile name, used in logs and diagnostics.
    pub name: String,
    /// Shape of plain embedded action blocks, if the DSL has them.
    #[serde(default)]
    pub action: Option<ActionShape>,
    /// Shape of argument-carrying action blocks, if the DSL has them.
    #[serde(default)]
    pub args_action: Option<ActionShape>,
    /// Whether `[key = "value"]` option blocks are recognized.
    #[serde(default = "default_options")]
    pub options: bool,
    /// Marker char introducing hole names inside hole-enabled shapes.
    #[serde(default = "default_hole_marker")]
    pub hole_marker: char,
}

impl DslProfile {
    /// Profile for lexer description files: braced actions without holes, options enabled.
    pub fn lexer() -> Self {
        Self {
            name: String::from("lexer"),
            action: Some(ActionShape::new('{', '}')),
            args_action: None,
            options: true,
            hole_marker: default_hole_marker(),
        }
    }

    /// Profile for grammar description files: braced actions and `<...>` argument actions,
    /// both hole-enabled, options enabled.
    pub fn grammar() -> Self {
        Self {
            name: String::from("grammar"),
            action: Some(ActionShape::with_holes('{', '}')),
            args_action: Some(ActionShape::with_holes('<', '>')),
            options: true,
            hole_marker: default_hole_marker(),
        }
    }

    /// Parse a profile from YAML and validate it.
    pub fn from_yaml_str(text: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_yaml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Returns `true` if any shape in this profile recognizes holes.
    pub fn uses_holes(&self) -> bool {
        [self.action, self.args_action]
            .iter()
            .flatten()
            .any(|shape| shape.allow_holes)
    }

    /// Check the profile for delimiter clashes with the fixed scanning rules.
    ///
    /// Comments (`//`, `/*`), literals (`"`, `'`) and, when enabled, option brackets
    /// (`[`, `]`) are claimed by fixed rules; action delimiters and the hole marker
    /// must stay out of their way, and out of each other's.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let mut reserved = vec!['/', '"', '\''];
        if self.options {
            reserved.push('[');
            reserved.push(']');
        }

        for shape in [self.action, self.args_action].iter().flatten() {
            if shape.open == shape.close {
                return Err(ProfileError::MirroredDelimiter(shape.open));
            }
            for ch in [shape.open, shape.close] {
                if reserved.contains(&ch) || ch.is_alphanumeric() || ch.is_whitespace() {
                    return Err(ProfileError::ReservedDelimiter(ch));
                }
            }
        }

        if let (Some(a), Some(b)) = (self.action, self.args_action)
            && a.open == b.open
        {
            return Err(ProfileError::DuplicateOpen(a.open));
        }

        if self.uses_holes() {
            let marker = self.hole_marker;
            let clashes_with_shape = [self.action, self.args_action]
                .iter()
                .flatten()
                .any(|shape| shape.open == marker || shape.close == marker);
            if reserved.contains(&marker)
                || marker.is_alphanumeric()
                || marker.is_whitespace()
                || clashes_with_shape
            {
                return Err(ProfileError::InvalidHoleMarker(marker));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
/// Errors produced when building or loading a [`DslProfile`].
pub enum ProfileError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("delimiter '{0}' is reserved by comment, literal or option syntax")]
    /// A shape uses a char the fixed scanning rules already claim.
    ReservedDelimiter(char),

    #[error("action shape opens and closes with the same delimiter '{0}'")]
    /// Open and close delimiters must differ for depth tracking to work.
    MirroredDelimiter(char),

    #[error("two action shapes share the opening delimiter '{0}'")]
    /// Shapes must be distinguishable by their opening char.
    DuplicateOpen(char),

    #[error("hole marker '{0}' collides with another scanning rule")]
    /// The hole marker must be punctuation no other rule claims.
    InvalidHoleMarker(char),
}
