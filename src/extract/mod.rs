//! Article extraction from rendered documents.
//!
//! Extraction is layered with explicit precedence, identical in shape across
//! sources even though the selectors differ:
//!
//! 1. Structured metadata (embedded JSON-LD) for date and author
//! 2. Markup headline with a metadata-tag fallback
//! 3. Body text concatenation under the content container
//! 4. Disclaimer truncation for sources that append boilerplate inline
//!
//! A field unresolved after all fallbacks gets the source's sentinel;
//! extraction as a whole fails only when the page cannot be parsed as a
//! document at all.

mod dates;
mod extractor;
mod rules;
mod structured;

pub use dates::normalize_date;
pub use extractor::{extract, ExtractError};
pub use rules::{AttrRule, ExtractionRules};
pub use structured::StructuredMetadata;
