//! Character classes and escaping rules shared by all CPE 2.3 validators
//!
//! The grammar is a fixed, immutable table built once per process:
//! - the unreserved character class (word characters, `.`, `-`)
//! - the punctuation set that must appear behind a backslash
//! - the wildcard glyphs (`*`, `?`) and logical sentinels (`*`, `-`)
//! - the compiled language-tag pattern
//!
//! Validators and the decomposer take the table by reference, so every
//! acceptance/rejection path can be exercised against it directly.

use regex::Regex;
use std::sync::OnceLock;

/// Logical "any" sentinel (a component that is exactly this string).
pub const VALUE_ANY: &str = "*";
/// Logical "not applicable" sentinel.
pub const VALUE_NA: &str = "-";
/// Wildcard matching any run of characters.
pub const WILDCARD_MULTI: char = '*';
/// Wildcard matching exactly one character.
pub const WILDCARD_ONE: char = '?';
/// Escape introducer inside a component value.
pub const ESCAPE: char = '\\';

/// Language tag: 2-3 lowercase letters, then an uppercase alphabetic
/// region (2-3 letters) or a 3-digit numeric region code.
const LANGUAGE_TAG: &str = r"^[a-z]{2,3}-(?:[A-Z]{2,3}|\d{3})$";

/// Immutable grammar table for CPE 2.3 component syntax
pub struct Grammar {
    language_tag: Regex,
}

impl Grammar {
    fn new() -> Self {
        Self {
            language_tag: Regex::new(LANGUAGE_TAG).expect("language tag pattern is valid"),
        }
    }

    /// Process-wide grammar table, compiled on first use.
    pub fn global() -> &'static Grammar {
        static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
        GRAMMAR.get_or_init(Grammar::new)
    }

    /// Characters legal in a component without escaping.
    pub fn is_unreserved(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '.' || c == '-'
    }

    /// Punctuation that is only legal behind a backslash.
    pub fn is_punctuation(&self, c: char) -> bool {
        matches!(
            c,
            '!' | '"'
                | ';'
                | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '('
                | ')'
                | '+'
                | ','
                | '/'
                | ':'
                | '<'
                | '='
                | '>'
                | '@'
                | '['
                | ']'
                | '^'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
                | '-'
        )
    }

    /// Characters a backslash may escape: another backslash, a wildcard
    /// glyph, or punctuation. Anything else after a backslash is malformed.
    pub fn is_escapable(&self, c: char) -> bool {
        c == ESCAPE || c == WILDCARD_MULTI || c == WILDCARD_ONE || self.is_punctuation(c)
    }

    /// Whether `value` is a well-formed language tag (e.g. `en-US`, `zh-419`).
    pub fn is_language_tag(&self, value: &str) -> bool {
        self.language_tag.is_match(value)
    }
}
