//! Citation handling module
//!
//! Parses `[n]` / `[n, m]` markers in explanation text into resolved references.

pub mod parser;

// Re-export commonly used types
pub use parser::{split_citations, to_plain_text, CitationRef, Segment};
