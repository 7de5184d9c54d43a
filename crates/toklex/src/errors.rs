//! # Error Types
//!
//! The tokenization pipeline itself never fails on malformed input (every
//! unrecognized byte becomes an [`crate::TokenKind::Unknown`] token instead);
//! the one fallible primitive in the public API is direct misuse of
//! [`crate::Token`]'s low-level substitution primitive.

/// Errors from `toklex` operations.
#[derive(Debug, thiserror::Error)]
pub enum TokLexError {
    /// [`crate::Token::substitute`] was called with a replacement longer
    /// than one character, which origin tracking cannot represent (see
    /// spec §4.1).
    #[error("substitution replacement must be 0 or 1 characters, got {len}")]
    SubstitutionTooLong {
        /// The character length of the rejected replacement.
        len: usize,
    },
}

/// Result type for `toklex` operations.
pub type TokLexResult<T> = Result<T, TokLexError>;
