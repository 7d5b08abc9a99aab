//! CPE 2.3 formatted-string validation and decomposition
//!
//! This crate validates identifiers in the CPE 2.3 formatted-string binding
//! (`cpe:2.3:part:vendor:product:version:update:edition:language:sw_edition:target_sw:target_hw:other`)
//! and decomposes them into their eleven fixed attributes:
//! - `Grammar`: the immutable character-class and escaping rules
//! - `component`, `language`: per-attribute validators
//! - `Cpe23::parse`: the structural decomposer
//! - `Error`: the failure taxonomy (fail-fast, no partial results)
//!
//! Parsing is pure and synchronous; the grammar table is built once and is
//! safe to share across any number of concurrent callers.
//!
//! ```
//! use cpe23::{Attribute, Cpe23};
//!
//! let cpe = Cpe23::parse("cpe:2.3:a:apache:log4j:2.14.1:*:*:*:*:*:*:*").unwrap();
//! assert_eq!(cpe.get(Attribute::Product).as_literal(), Some("log4j"));
//! assert!(cpe.get(Attribute::Edition).is_any());
//! ```

pub mod component;
pub mod error;
pub mod grammar;
pub mod language;
pub mod parse;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use grammar::Grammar;
pub use parse::{Attribute, Component, Cpe23};

/// Parse a CPE 2.3 formatted string into its eleven attributes.
pub fn parse(input: &str) -> Result<Cpe23> {
    Cpe23::parse(input)
}
