//! Structural decomposition of CPE 2.3 formatted strings
//!
//! Format: cpe:2.3:part:vendor:product:version:update:edition:language:sw_edition:target_sw:target_hw:other
//!
//! Decomposition runs in two stages so the failure kinds stay separate:
//! the structural template (prefix, exactly 11 non-empty fields split at
//! unescaped colons, constrained `part`), then attribute-by-attribute
//! validation in fixed order. The first failure aborts the whole parse;
//! no partial result is ever produced.

use crate::component;
use crate::error::{Error, Result};
use crate::grammar::{Grammar, VALUE_ANY, VALUE_NA};
use crate::language;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Fixed formatted-string prefix, matched case-insensitively.
const PREFIX: &str = "cpe:2.3:";

/// The eleven fixed attribute names, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Part,
    Vendor,
    Product,
    Version,
    Update,
    Edition,
    Language,
    SwEdition,
    TargetSw,
    TargetHw,
    Other,
}

impl Attribute {
    /// All attributes in wire order. This order is part of the output
    /// contract and never varies.
    pub const ALL: [Attribute; 11] = [
        Attribute::Part,
        Attribute::Vendor,
        Attribute::Product,
        Attribute::Version,
        Attribute::Update,
        Attribute::Edition,
        Attribute::Language,
        Attribute::SwEdition,
        Attribute::TargetSw,
        Attribute::TargetHw,
        Attribute::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Part => "part",
            Attribute::Vendor => "vendor",
            Attribute::Product => "product",
            Attribute::Version => "version",
            Attribute::Update => "update",
            Attribute::Edition => "edition",
            Attribute::Language => "language",
            Attribute::SwEdition => "sw_edition",
            Attribute::TargetSw => "target_sw",
            Attribute::TargetHw => "target_hw",
            Attribute::Other => "other",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The validated value of one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// The `*` sentinel: unspecified, matches anything.
    Any,
    /// The `-` sentinel: explicitly does not apply.
    NotApplicable,
    /// A validated string value, escaping intact.
    Literal(String),
}

impl Component {
    pub fn is_any(&self) -> bool {
        matches!(self, Component::Any)
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Component::NotApplicable)
    }

    /// The literal text, if this component holds one.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Component::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Formatted-string rendering: sentinels back to their glyphs.
    pub fn as_binding(&self) -> &str {
        match self {
            Component::Any => VALUE_ANY,
            Component::NotApplicable => VALUE_NA,
            Component::Literal(value) => value,
        }
    }
}

/// Renders sentinels as `ANY` / `NA` and literals verbatim.
impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Any => f.pad("ANY"),
            Component::NotApplicable => f.pad("NA"),
            Component::Literal(value) => f.pad(value),
        }
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Component::Any => serializer.serialize_str("ANY"),
            Component::NotApplicable => serializer.serialize_str("NA"),
            Component::Literal(value) => serializer.serialize_str(value),
        }
    }
}

/// A decomposed CPE 2.3 identifier: one validated component per attribute,
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cpe23 {
    part: Component,
    vendor: Component,
    product: Component,
    version: Component,
    update: Component,
    edition: Component,
    language: Component,
    sw_edition: Component,
    target_sw: Component,
    target_hw: Component,
    other: Component,
}

impl Cpe23 {
    /// Parse a CPE 2.3 formatted string.
    ///
    /// Pure and stateless: identical input always yields an identical
    /// result or an identical failure kind.
    pub fn parse(input: &str) -> Result<Cpe23> {
        let grammar = Grammar::global();

        if input.contains(' ') {
            return Err(Error::WhitespaceNotAllowed);
        }

        let rest = match input.get(..PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(PREFIX) => &input[PREFIX.len()..],
            _ => {
                debug!(input, "missing cpe:2.3 prefix");
                return Err(Error::FieldCountOrPrefixMismatch);
            }
        };

        let fields = split_fields(rest);
        if fields.len() != Attribute::ALL.len() || fields.iter().any(|f| f.is_empty()) {
            debug!(fields = fields.len(), "structural template mismatch");
            return Err(Error::FieldCountOrPrefixMismatch);
        }
        if !is_part_field(fields[0]) {
            debug!(part = fields[0], "part is not a, h, o, or a sentinel");
            return Err(Error::FieldCountOrPrefixMismatch);
        }

        let cpe = Cpe23 {
            part: convert(grammar, Attribute::Part, fields[0])?,
            vendor: convert(grammar, Attribute::Vendor, fields[1])?,
            product: convert(grammar, Attribute::Product, fields[2])?,
            version: convert(grammar, Attribute::Version, fields[3])?,
            update: convert(grammar, Attribute::Update, fields[4])?,
            edition: convert(grammar, Attribute::Edition, fields[5])?,
            language: convert(grammar, Attribute::Language, fields[6])?,
            sw_edition: convert(grammar, Attribute::SwEdition, fields[7])?,
            target_sw: convert(grammar, Attribute::TargetSw, fields[8])?,
            target_hw: convert(grammar, Attribute::TargetHw, fields[9])?,
            other: convert(grammar, Attribute::Other, fields[10])?,
        };
        trace!(%cpe, "parsed CPE 2.3 identifier");
        Ok(cpe)
    }

    /// Look up one attribute's component.
    pub fn get(&self, attribute: Attribute) -> &Component {
        match attribute {
            Attribute::Part => &self.part,
            Attribute::Vendor => &self.vendor,
            Attribute::Product => &self.product,
            Attribute::Version => &self.version,
            Attribute::Update => &self.update,
            Attribute::Edition => &self.edition,
            Attribute::Language => &self.language,
            Attribute::SwEdition => &self.sw_edition,
            Attribute::TargetSw => &self.target_sw,
            Attribute::TargetHw => &self.target_hw,
            Attribute::Other => &self.other,
        }
    }

    /// All components, in wire order.
    pub fn attributes(&self) -> impl Iterator<Item = (Attribute, &Component)> {
        Attribute::ALL.iter().map(move |&a| (a, self.get(a)))
    }
}

/// Re-emits the formatted-string binding, escaping intact.
impl fmt::Display for Cpe23 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cpe:2.3")?;
        for (_, component) in self.attributes() {
            write!(f, ":{}", component.as_binding())?;
        }
        Ok(())
    }
}

impl FromStr for Cpe23 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Cpe23::parse(s)
    }
}

/// Split at unescaped colons. A colon right behind an unescaped backslash
/// belongs to its field; a backslash that is itself escaped does not
/// shield the colon that follows it.
fn split_fields(s: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(Attribute::ALL.len());
    let mut start = 0;
    let mut escaped = false;
    for (i, b) in s.bytes().enumerate() {
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b':' {
            fields.push(&s[start..i]);
            start = i + 1;
        }
    }
    fields.push(&s[start..]);
    fields
}

/// `part` admits `a`, `h`, `o` (case-insensitive) or a logical sentinel.
fn is_part_field(raw: &str) -> bool {
    raw == VALUE_ANY
        || raw == VALUE_NA
        || raw.eq_ignore_ascii_case("a")
        || raw.eq_ignore_ascii_case("h")
        || raw.eq_ignore_ascii_case("o")
}

fn convert(grammar: &Grammar, attribute: Attribute, raw: &str) -> Result<Component> {
    if raw == VALUE_ANY {
        return Ok(Component::Any);
    }
    if raw == VALUE_NA {
        return Ok(Component::NotApplicable);
    }
    if attribute == Attribute::Language {
        language::validate(grammar, raw)?;
    } else {
        component::validate(grammar, attribute, raw)?;
    }
    Ok(Component::Literal(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:en-US:*:*:*:*";

    #[test]
    fn test_parse_valid() {
        let cpe = Cpe23::parse(VALID).unwrap();
        assert_eq!(cpe.get(Attribute::Part), &Component::Literal("a".into()));
        assert_eq!(
            cpe.get(Attribute::Vendor),
            &Component::Literal("microsoft".into())
        );
        assert_eq!(
            cpe.get(Attribute::Product),
            &Component::Literal("internet_explorer".into())
        );
        assert_eq!(
            cpe.get(Attribute::Version),
            &Component::Literal("8.0.6001".into())
        );
        assert_eq!(cpe.get(Attribute::Update), &Component::Literal("beta".into()));
        assert_eq!(cpe.get(Attribute::Edition), &Component::Any);
        assert_eq!(
            cpe.get(Attribute::Language),
            &Component::Literal("en-US".into())
        );
        for attr in [
            Attribute::SwEdition,
            Attribute::TargetSw,
            Attribute::TargetHw,
            Attribute::Other,
        ] {
            assert!(cpe.get(attr).is_any());
        }
    }

    #[test]
    fn test_attribute_wire_order() {
        let cpe = Cpe23::parse(VALID).unwrap();
        let names: Vec<&str> = cpe.attributes().map(|(a, _)| a.as_str()).collect();
        assert_eq!(
            names,
            [
                "part",
                "vendor",
                "product",
                "version",
                "update",
                "edition",
                "language",
                "sw_edition",
                "target_sw",
                "target_hw",
                "other"
            ]
        );
    }

    #[test]
    fn test_too_few_fields() {
        assert_eq!(
            Cpe23::parse("cpe:2.3:invalid_format").unwrap_err(),
            Error::FieldCountOrPrefixMismatch
        );
        assert_eq!(
            Cpe23::parse("cpe:2.3:a:vendor:product").unwrap_err(),
            Error::FieldCountOrPrefixMismatch
        );
    }

    #[test]
    fn test_too_many_fields() {
        // 12 fields: the stray colon in the vendor shifts everything.
        let err = Cpe23::parse(
            "cpe:2.3:a:micr:osoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*",
        )
        .unwrap_err();
        assert_eq!(err, Error::FieldCountOrPrefixMismatch);

        let err = Cpe23::parse(
            "cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*:*",
        )
        .unwrap_err();
        assert_eq!(err, Error::FieldCountOrPrefixMismatch);
    }

    #[test]
    fn test_missing_prefix() {
        let err = Cpe23::parse(":a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*")
            .unwrap_err();
        assert_eq!(err, Error::FieldCountOrPrefixMismatch);
        assert!(Cpe23::parse("cpe:2.2:a:v:p:1:*:*:*:*:*:*:*").is_err());
    }

    #[test]
    fn test_prefix_case_insensitive() {
        assert!(Cpe23::parse("CPE:2.3:a:vendor:product:1.0:*:*:*:*:*:*:*").is_ok());
    }

    #[test]
    fn test_empty_fields_rejected() {
        for input in [
            "cpe:2.3:a::internet_explorer:8.0.6001:beta:*:*:*:*:*:*",
            "cpe:2.3:a:microsoft::8.0.6001:beta:*:*:*:*:*:*",
            "cpe:2.3:a:microsoft:internet_explorer::beta:*:en-US:*:*:*:*",
            "cpe:2.3:a:microsoft:internet_explorer:8.0.6001::*:en-US:*:*:*:*",
        ] {
            assert_eq!(
                Cpe23::parse(input).unwrap_err(),
                Error::FieldCountOrPrefixMismatch,
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_whitespace_rejected() {
        let err = Cpe23::parse(
            "cpe:2.3:a:microsoft:intern et_explorer:8.0.6001:beta:*:*:*:*:*:*",
        )
        .unwrap_err();
        assert_eq!(err, Error::WhitespaceNotAllowed);
    }

    #[test]
    fn test_part_values() {
        for part in ["a", "h", "o", "A", "H", "O", "*", "-"] {
            let input = format!("cpe:2.3:{part}:vendor:product:1.0:*:*:*:*:*:*:*");
            assert!(Cpe23::parse(&input).is_ok(), "part {part} should parse");
        }
        let err = Cpe23::parse("cpe:2.3:x:vendor:product:1.0:*:*:*:*:*:*:*").unwrap_err();
        assert_eq!(err, Error::FieldCountOrPrefixMismatch);
    }

    #[test]
    fn test_part_preserves_case() {
        let cpe = Cpe23::parse("cpe:2.3:A:vendor:product:1.0:*:*:*:*:*:*:*").unwrap();
        assert_eq!(cpe.get(Attribute::Part).as_literal(), Some("A"));
    }

    #[test]
    fn test_bad_language_tag() {
        let err = Cpe23::parse(
            "cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:12-US:*:*:*:*",
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidLanguageTag {
                value: "12-US".into()
            }
        );
    }

    #[test]
    fn test_language_sentinels() {
        let cpe =
            Cpe23::parse("cpe:2.3:a:vendor:product:1.0:*:*:-:*:*:*:*").unwrap();
        assert!(cpe.get(Attribute::Language).is_not_applicable());
    }

    #[test]
    fn test_escaped_colon_is_not_a_delimiter() {
        let cpe = Cpe23::parse(r"cpe:2.3:a:vendor\:inc:product:1.0:*:*:*:*:*:*:*").unwrap();
        // Escaping is preserved, not undone.
        assert_eq!(
            cpe.get(Attribute::Vendor).as_literal(),
            Some(r"vendor\:inc")
        );
    }

    #[test]
    fn test_escaped_backslash_does_not_shield_colon() {
        // "v\\" is a complete field (escaped backslash); the colon after
        // it delimits, leaving 12 fields.
        let err =
            Cpe23::parse(r"cpe:2.3:a:v\\:x:product:1.0:*:*:*:*:*:*:*").unwrap_err();
        assert_eq!(err, Error::FieldCountOrPrefixMismatch);
    }

    #[test]
    fn test_bad_component_syntax() {
        let err = Cpe23::parse("cpe:2.3:a:vendor:inter*net:1.0:*:*:*:*:*:*:*").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidComponentSyntax {
                attribute: Attribute::Product,
                value: "inter*net".into()
            }
        );
    }

    #[test]
    fn test_display_round_trip() {
        for input in [
            VALID,
            "cpe:2.3:o:linux:linux_kernel:5.15:*:*:*:*:*:x86_64:-",
            r"cpe:2.3:a:vendor\:inc:product:1.0:*:*:*:*:*:*:*",
        ] {
            let cpe = Cpe23::parse(input).unwrap();
            assert_eq!(cpe.to_string(), input);
            let again: Cpe23 = cpe.to_string().parse().unwrap();
            assert_eq!(again, cpe);
        }
    }

    #[test]
    fn test_serialize_ordered_mapping() {
        let cpe = Cpe23::parse(VALID).unwrap();
        let json = serde_json::to_string(&cpe).unwrap();
        assert_eq!(
            json,
            r#"{"part":"a","vendor":"microsoft","product":"internet_explorer","version":"8.0.6001","update":"beta","edition":"ANY","language":"en-US","sw_edition":"ANY","target_sw":"ANY","target_hw":"ANY","other":"ANY"}"#
        );
    }

    #[test]
    fn test_parse_is_repeatable() {
        assert_eq!(Cpe23::parse(VALID).unwrap(), Cpe23::parse(VALID).unwrap());
        assert_eq!(
            Cpe23::parse("cpe:2.3:bad").unwrap_err(),
            Cpe23::parse("cpe:2.3:bad").unwrap_err()
        );
    }
}
