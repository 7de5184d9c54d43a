//! # Pipeline Stages
//!
//! Each submodule is one stage of the lazy tokenization pipeline (see the
//! crate-level docs for the overall chain). [`tokenize_with_table`] wires
//! them together in order; [`crate::tokenize`] is a thin wrapper around it
//! using the built-in [`crate::DefaultAbbreviations`] table.
pub mod date_time_pass;
pub mod digit_parser;
pub mod lookahead;
pub mod particle_coalescer;
pub mod phrase_pass1;
pub mod phrase_pass2;
pub mod primary_tokenizer;
pub mod rough_splitter;
pub mod sentence_segmenter;

use crate::kind::TokenKind;
use crate::options::TokenizerOptions;
use crate::tables::AbbreviationTable;
use crate::token::Token;

use date_time_pass::DateTimePass;
use particle_coalescer::ParticleCoalescer;
use phrase_pass1::PhrasePass1;
use phrase_pass2::PhrasePass2;
use primary_tokenizer::PrimaryTokenizer;
use rough_splitter::RoughSplitter;
use sentence_segmenter::SentenceSegmenter;

/// Tokenize `text` with an explicit abbreviation table, running the full
/// stage chain and filtering out the internal [`TokenKind::XEnd`] sentinel
/// before it reaches the caller.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(text, options, abbrevs)))]
pub fn tokenize_with_table<'a>(
    text: &'a str,
    options: &'a TokenizerOptions,
    abbrevs: &'a dyn AbbreviationTable,
) -> Box<dyn Iterator<Item = Token> + 'a> {
    log::debug!("tokenizing {} bytes (with_annotation={})", text.len(), options.with_annotation);
    let rough = RoughSplitter::new(text, options);
    let primary = PrimaryTokenizer::new(rough, options, abbrevs);
    let particles = ParticleCoalescer::new(primary, abbrevs, options);
    let sentences = SentenceSegmenter::new(particles);
    let phrase1 = PhrasePass1::new(sentences);
    let dates = DateTimePass::new(phrase1);

    let without_xend = if options.with_annotation {
        Box::new(PhrasePass2::new(dates, options)) as Box<dyn Iterator<Item = Token>>
    } else {
        Box::new(dates) as Box<dyn Iterator<Item = Token>>
    };

    Box::new(without_xend.filter(|t| t.kind != TokenKind::XEnd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::DefaultAbbreviations;

    #[test]
    fn test_full_pipeline_has_no_xend() {
        let opts = TokenizerOptions::default();
        let toks: Vec<_> = tokenize_with_table("Hann kom 10. júní 2024 kl. 14:30.", &opts, &DefaultAbbreviations).collect();
        assert!(!toks.iter().any(|t| t.kind == TokenKind::XEnd));
        assert!(toks.iter().any(|t| t.kind == TokenKind::Dateabs || t.kind == TokenKind::Daterel));
    }

    #[test]
    fn test_with_annotation_false_skips_phrase_pass_2() {
        let opts = TokenizerOptions::new().with_annotation(false);
        let toks: Vec<_> = tokenize_with_table("Þeir voru 5 þúsund talsins.", &opts, &DefaultAbbreviations).collect();
        let n = toks.iter().find_map(|t| match &t.value {
            crate::TokenValue::Number { n, .. } => Some(*n),
            _ => None,
        });
        assert_eq!(n, Some(5.0));
    }
}
