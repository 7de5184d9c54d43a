#![warn(missing_docs, unused)]
//! # `toklex`
//!
//! A lazily-pipelined tokenizer for natural-language text, built around a
//! [`Token`] type that never loses track of where each piece of output text
//! came from in the original input.
//!
//! ## Client Summary
//!
//! * [`tokenize`] — the main entry point: text in, a lazy iterator of
//!   [`Token`]s out.
//! * [`TokenizerOptions`] — the knobs [`tokenize`] accepts (see spec §6 in
//!   the project's design notes for the full table).
//! * [`Token`] — the origin-tracking token type; see [`Token::original`] and
//!   [`Token::origin_spans`] for the provenance API.
//! * [`TokenKind`] / [`TokenValue`] — the token discriminant and its payload.
//! * [`tables::AbbreviationTable`] — the pluggable abbreviation dictionary
//!   used by the particle and phrase passes.
//!
//! ## Pipeline
//!
//! Tokenization is a chain of lazy stages, each a plain [`Iterator`] adapter
//! over the one before it, each holding at most one token of lookahead:
//!
//! ```text
//! rough_splitter → primary_tokenizer (calls digit_parser inline)
//!                → particle_coalescer → sentence_segmenter
//!                → phrase_pass1 → date_time_pass → phrase_pass2
//! ```
//!
//! No stage buffers the whole stream; a caller can pull tokens one at a
//! time from an arbitrarily long document. See [`pipeline::lookahead`] for
//! the shared one-token-lookahead adapter every stage is built on.
//!
//! ## Batch Tokenization
//!
//! With the `rayon` feature enabled, [`tokenize_batch`] tokenizes a slice of
//! independent texts in parallel.
//!
//! ```rust
//! use toklex::{tokenize, TokenizerOptions};
//!
//! let opts = TokenizerOptions::default();
//! let tokens: Vec<_> = tokenize("Hann sá 3 hesta.", &opts).collect();
//! assert!(!tokens.is_empty());
//! ```

mod errors;
mod kind;
mod options;
pub mod pipeline;
pub mod tables;
mod token;

#[doc(inline)]
pub use errors::{TokLexError, TokLexResult};
#[doc(inline)]
pub use kind::{PunctuationClass, TokenKind, TokenValue};
#[doc(inline)]
pub use options::{KludgyOrdinals, TokenizerOptions};
#[doc(inline)]
pub use pipeline::tokenize_with_table;
#[doc(inline)]
pub use tables::{AbbreviationTable, DefaultAbbreviations};
#[doc(inline)]
pub use token::Token;

/// Tokenize `text` with the built-in [`DefaultAbbreviations`] table.
///
/// This is the common entry point; use [`tokenize_with_table`] directly to
/// supply a richer abbreviation dictionary.
pub fn tokenize<'a>(
    text: &'a str,
    options: &'a TokenizerOptions,
) -> impl Iterator<Item = Token> + 'a {
    tokenize_with_table(text, options, &DefaultAbbreviations)
}

/// Tokenize a sequence of text chunks (e.g. lines read one at a time from a
/// file) as if they were a single input string.
///
/// Spec §4.2 names this as the Rough Splitter's second accepted input shape,
/// alongside a single text string, with one wrinkle: a chunk that is nothing
/// but whitespace must not leak an empty token of its own, and its original
/// content carries forward onto whatever chunk follows it, so that blank-line
/// (paragraph-break) semantics survive the chunking. Joining the chunks
/// verbatim before splitting satisfies that by construction — the Rough
/// Splitter never sees a chunk boundary, only the characters either side of
/// it, so an all-whitespace chunk is absorbed into the surrounding whitespace
/// run exactly as it would be had the caller passed one string all along.
///
/// Unlike [`tokenize`], this collects eagerly rather than returning a lazy
/// iterator, since joining the chunks already requires building an owned
/// buffer; there is no borrowed `&str` of the whole input for a lazy
/// iterator to borrow from.
pub fn tokenize_chunks<S: AsRef<str>>(
    chunks: &[S],
    options: &TokenizerOptions,
) -> Vec<Token> {
    let joined: String = chunks.iter().map(|c| c.as_ref()).collect();
    tokenize(&joined, options).collect()
}

/// Tokenize many independent texts in parallel.
///
/// Each text is tokenized with its own fresh pipeline state; results are
/// returned in the same order as `texts`. Requires the `rayon` feature.
#[cfg(feature = "rayon")]
#[cfg_attr(feature = "tracing", tracing::instrument(skip(texts, options)))]
pub fn tokenize_batch(
    texts: &[&str],
    options: &TokenizerOptions,
) -> Vec<Vec<Token>> {
    use rayon::prelude::*;

    log::info!("tokenizing {} texts in parallel", texts.len());
    texts
        .par_iter()
        .map(|text| tokenize(text, options).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_smoke() {
        let opts = TokenizerOptions::default();
        let tokens: Vec<_> = tokenize("Hann sá 3 hesta þann 10. júní 2024.", &opts).collect();
        assert!(!tokens.is_empty());
        assert!(tokens.iter().any(|t| t.kind == TokenKind::SBegin));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::SEnd));
    }

    #[test]
    fn test_tokenize_chunks_matches_joined_string() {
        let opts = TokenizerOptions::default();
        let chunks = vec!["Fyrsta lína.\n", "\n", "Önnur efnisgrein."];
        let from_chunks = tokenize_chunks(&chunks, &opts);
        let joined: String = chunks.concat();
        let from_string: Vec<_> = tokenize(&joined, &opts).collect();
        assert_eq!(from_chunks, from_string);
        assert!(from_chunks.iter().any(|t| t.kind == TokenKind::SEnd));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_tokenize_batch_smoke() {
        let opts = TokenizerOptions::default();
        let results = tokenize_batch(&["Hann fór.", "Hún kom."], &opts);
        assert_eq!(results.len(), 2);
        assert!(!results[0].is_empty());
        assert!(!results[1].is_empty());
    }
}
