use thiserror::Error;

/// Rejected arguments when building a [`Rule`](crate::Rule) from digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A neighbour count outside `0..=8`.
    #[error("neighbour count {0} is out of range 0..=8")]
    DigitOutOfRange(u8),
}

/// Malformed text handed to a pattern codec or to [`Rule::parse`](crate::Rule::parse).
///
/// Always recoverable: the input was rejected before anything was built from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("missing header")]
    MissingHeader,

    #[error("missing format signature, expected \"{0}\"")]
    MissingSignature(&'static str),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid character {ch:?} on line {line}")]
    InvalidCharacter { ch: char, line: usize },

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("invalid rule: {0:?}")]
    InvalidRule(String),

    /// No known format accepted the input.
    #[error("unrecognized pattern format")]
    Unrecognized,
}
