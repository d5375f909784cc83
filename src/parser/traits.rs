//! Parser trait definition

/// Trait for parsing metadata and configuration text
pub trait Parser {
    /// Parsed representation of the content
    type Output;

    /// Parse the content into its structured form
    fn parse(&self, content: &str) -> Result<Self::Output, ParseError>;
}

/// Error type for parsing operations
///
/// Line numbers are 1-based.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// An option appeared before any `[section]` header
    #[error("File contains no section headers (line {line}): {content}")]
    MissingSectionHeader { line: usize, content: String },

    /// A line that is neither a header, an option nor a comment
    #[error("Invalid syntax at line {line}: {content}")]
    InvalidSyntax { line: usize, content: String },
}
