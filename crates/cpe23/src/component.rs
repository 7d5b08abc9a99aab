//! Component value validation
//!
//! Checks a single raw attribute substring against the general component
//! grammar. A well-formed component is one of:
//! - a logical sentinel alone (`*` or `-`)
//! - a run of `?`, optionally closed by a single `*`
//! - an optional leading `?`-run or single `*`, a non-empty body of
//!   attribute-value characters (unreserved or escaped sequences), and an
//!   optional trailing `?`-run or single `*`
//!
//! Wildcards are only legal at the ends of a value, never interior. The
//! scan is a small explicit state machine so each rejection path (dangling
//! backslash, bad escape target, misplaced wildcard, illegal character) is
//! independently testable. No unescaping happens here; the caller stores
//! the value with its escaping intact.

use crate::error::{Error, Result};
use crate::grammar::{Grammar, ESCAPE, VALUE_ANY, VALUE_NA, WILDCARD_MULTI, WILDCARD_ONE};
use crate::parse::Attribute;

/// Validate a raw component value. Returns `Ok(())` if `value` is
/// well-formed, otherwise `InvalidComponentSyntax`.
pub fn validate(grammar: &Grammar, attribute: Attribute, value: &str) -> Result<()> {
    if value == VALUE_ANY || value == VALUE_NA {
        return Ok(());
    }

    let chars: Vec<char> = value.chars().collect();
    let mut i = 0;

    // Leading wildcards: a single '*' or a run of '?'.
    let leading_star = chars.first() == Some(&WILDCARD_MULTI);
    if leading_star {
        i = 1;
    } else {
        while chars.get(i) == Some(&WILDCARD_ONE) {
            i += 1;
        }
    }
    let leading_quests = !leading_star && i > 0;

    // Body: unreserved characters or escaped sequences.
    let mut body = 0usize;
    while let Some(&c) = chars.get(i) {
        if grammar.is_unreserved(c) {
            i += 1;
            body += 1;
        } else if c == ESCAPE {
            match chars.get(i + 1) {
                Some(&next) if grammar.is_escapable(next) => {
                    i += 2;
                    body += 1;
                }
                // Dangling backslash or illegal escape target.
                _ => return reject(attribute, value),
            }
        } else {
            break;
        }
    }

    // Whatever remains must be a legal trailing wildcard group.
    let rest = &chars[i..];
    let trailing_ok = rest.is_empty()
        || matches!(rest, [c] if *c == WILDCARD_MULTI)
        || rest.iter().all(|&c| c == WILDCARD_ONE);

    let shape_ok = if body > 0 {
        trailing_ok
    } else if leading_quests {
        // A bare '?' run, optionally closed by a single '*'. A trailing
        // '?'-run would already have been consumed by the leading scan.
        rest.is_empty() || matches!(rest, [c] if *c == WILDCARD_MULTI)
    } else {
        // Empty value, lone leading '*' with no body ("**"), or an
        // illegal first character.
        false
    };

    if shape_ok {
        Ok(())
    } else {
        reject(attribute, value)
    }
}

fn reject(attribute: Attribute, value: &str) -> Result<()> {
    Err(Error::InvalidComponentSyntax {
        attribute,
        value: value.to_string(),
    })
}
