//! Language tag validation
//!
//! The `language` attribute uses a stricter grammar than general components:
//! a 2-3 lowercase-letter primary subtag, a hyphen, then either a 2-3
//! uppercase-letter region subtag or a 3-digit numeric region code. Case is
//! significant. The decomposer only calls this for values that are not a
//! logical sentinel.

use crate::error::{Error, Result};
use crate::grammar::Grammar;

/// Validate the raw `language` value. Returns `Ok(())` if `value` is a
/// well-formed tag, otherwise `InvalidLanguageTag`.
pub fn validate(grammar: &Grammar, value: &str) -> Result<()> {
    if grammar.is_language_tag(value) {
        Ok(())
    } else {
        Err(Error::InvalidLanguageTag {
            value: value.to_string(),
        })
    }
}
