//! # Date/Time Pass
//!
//! Finishes classifying `DATE`/`TIMESTAMP` tokens assembled by
//! [`phrase_pass1`](crate::pipeline::phrase_pass1): a `DATE` with year,
//! month, and day all present becomes `DATEABS`; anything missing a field
//! becomes `DATEREL`, and likewise `TIMESTAMP` splits into
//! `TIMESTAMPABS`/`TIMESTAMPREL`. A standalone month name that never
//! merged with a day number is promoted to a relative date in its own
//! right. Grounded on `parse_date_and_time` in the reference
//! implementation, simplified here to the final classification step (the
//! reference's exploratory merge attempts are already covered by
//! [`phrase_pass1`](crate::pipeline::phrase_pass1)).
use crate::kind::{TokenKind, TokenValue};
use crate::tables;
use crate::token::Token;

fn classify_date(mut token: Token) -> Token {
    if let TokenValue::Date { y, m, d } = &token.value {
        token.kind = if *y != 0 && *m != 0 && *d != 0 { TokenKind::Dateabs } else { TokenKind::Daterel };
    }
    token
}

fn classify_timestamp(mut token: Token) -> Token {
    if let TokenValue::Timestamp { y, mo, d, .. } = &token.value {
        token.kind = if *y != 0 && *mo != 0 && *d != 0 { TokenKind::Timestampabs } else { TokenKind::Timestamprel };
    }
    token
}

fn standalone_month(token: Token) -> Token {
    if token.kind != TokenKind::Word {
        return token;
    }
    let lower = token.text.to_lowercase();
    if tables::AMBIGUOUS_MONTH_NAMES.contains(lower.as_str()) {
        return token;
    }
    match tables::MONTHS.get(lower.as_str()) {
        Some(&m) if !tables::MONTH_BLACKLIST.contains(lower.as_str()) => {
            let mut date = token;
            date.kind = TokenKind::Daterel;
            date.value = TokenValue::Date { y: 0, m, d: 0 };
            date
        }
        _ => token,
    }
}

/// The Date/Time Pass stage: a plain per-token map, no lookahead needed.
pub struct DateTimePass<I: Iterator<Item = Token>> {
    upstream: I,
}

impl<I: Iterator<Item = Token>> DateTimePass<I> {
    /// Wrap a phrase-pass-1 (or compatible) upstream iterator.
    pub fn new(upstream: I) -> Self {
        Self { upstream }
    }
}

impl<I: Iterator<Item = Token>> Iterator for DateTimePass<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.upstream.next().map(|token| match token.kind {
            TokenKind::Date => classify_date(token),
            TokenKind::Timestamp => classify_timestamp(token),
            TokenKind::Word => standalone_month(token),
            _ => token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TokenizerOptions;
    use crate::pipeline::particle_coalescer::ParticleCoalescer;
    use crate::pipeline::phrase_pass1::PhrasePass1;
    use crate::pipeline::primary_tokenizer::PrimaryTokenizer;
    use crate::pipeline::rough_splitter::RoughSplitter;
    use crate::pipeline::sentence_segmenter::SentenceSegmenter;
    use crate::tables::DefaultAbbreviations;

    fn date_pass(text: &str) -> Vec<Token> {
        let opts = TokenizerOptions::default();
        let rough = RoughSplitter::new(text, &opts);
        let primary = PrimaryTokenizer::new(rough, &opts, &DefaultAbbreviations);
        let particles = ParticleCoalescer::new(primary, &DefaultAbbreviations, &opts);
        let sentences = SentenceSegmenter::new(particles);
        let phrase1 = PhrasePass1::new(sentences);
        DateTimePass::new(phrase1).collect()
    }

    #[test]
    fn test_full_date_is_absolute() {
        let toks = date_pass("Hann kom 10. júní 2024.");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Dateabs));
    }

    #[test]
    fn test_standalone_month_is_relative() {
        let toks = date_pass("Í september kemur hann.");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Daterel));
    }
}
