//! # Phrase Pass 2
//!
//! The final coalescing pass (spec §4.9), run only when
//! [`TokenizerOptions::with_annotation`] is set: spelled-out multiplier
//! words scale a preceding `NUMBER` (`"5 þúsund"` → `5000`), ISK amount
//! wording folds a following `NUMBER` into an `AMOUNT`, spelled-out percent
//! words coalesce into `PERCENT` when
//! [`TokenizerOptions::coalesce_percent`] is set, and a trailing
//! composite-hyphen word (`"tré-"`) joins across an `"og"`/`"eða"`
//! conjunction into the word that completes it (`"tré- og runnagróður"`).
//! Grounded on `parse_phrases_2` in the reference implementation.
//!
//! The composite-hyphen join is a lengthening rewrite — the joined word is
//! shorter in its normalized form than the sum of its parts' original text
//! — so the merged token's origin tracking is cleared (spec §9). This
//! crate's [`Token::concatenate`](crate::Token::concatenate) could in
//! principle preserve it by threading through the accumulated original
//! text of every queued piece; we chose the simpler clear-on-join behavior
//! to match the reference exactly, and left the richer option as an open
//! question (see the project's design notes).
use crate::kind::{TokenKind, TokenValue};
use crate::options::TokenizerOptions;
use crate::pipeline::lookahead::Lookahead;
use crate::tables;
use crate::token::Token;

const CONJUNCTIONS: [&str; 2] = ["og", "eða"];

/// The Phrase Pass 2 stage.
pub struct PhrasePass2<'a, I: Iterator<Item = Token>> {
    upstream: Lookahead<I>,
    options: &'a TokenizerOptions,
}

impl<'a, I: Iterator<Item = Token>> PhrasePass2<'a, I> {
    /// Wrap a date-time-pass (or compatible) upstream iterator.
    pub fn new(
        upstream: I,
        options: &'a TokenizerOptions,
    ) -> Self {
        Self { upstream: Lookahead::new(upstream), options }
    }

    /// Spelled-out multiplier chaining (spec §4.9): a leading `NUMBER` or
    /// number-word (`"átta"` — a `WORD` that is itself a [`tables::MULTIPLIERS`]
    /// entry) followed by one or more scale words (`"hundrað"`, `"þúsund"`,
    /// `"milljón"`…) multiplies repeatedly, left to right — `"tvö hundruð
    /// þúsund"` → `2 * 100 * 1000`.
    fn try_multiplier(
        &mut self,
        token: Token,
    ) -> Token {
        let mut n = match &token.value {
            TokenValue::Number { n, .. } => *n,
            TokenValue::Word(_) if token.kind == TokenKind::Word => {
                match tables::MULTIPLIERS.get(token.text.to_lowercase().as_str()) {
                    Some(&factor) => factor,
                    None => return token,
                }
            }
            _ => return token,
        };
        let mut result = token;
        let mut chained = false;
        loop {
            let word = match self.upstream.peek() {
                Some(next) if next.kind == TokenKind::Word => next.text.to_lowercase(),
                _ => break,
            };
            match tables::MULTIPLIERS.get(word.as_str()) {
                Some(&factor) => {
                    let next = self.upstream.advance().unwrap();
                    n *= factor;
                    let mut scaled = result.concatenate(next, " ");
                    scaled.kind = TokenKind::Number;
                    scaled.value = TokenValue::Number { n, cases: None, genders: None };
                    result = scaled;
                    chained = true;
                }
                None => break,
            }
        }
        if !chained && result.kind != TokenKind::Number {
            // A lone spelled-out number-word with no following scale word to
            // chain onto stays a plain WORD; it's only promoted to NUMBER
            // once it actually multiplies something.
            return result;
        }
        result
    }

    fn try_amount_abbrev(
        &mut self,
        number: Token,
    ) -> Token {
        let n = match &number.value {
            TokenValue::Number { n, .. } => *n,
            _ => return number,
        };
        let word = match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Word => next.text.to_lowercase(),
            _ => return number,
        };
        match tables::AMOUNT_ABBREV.get(word.as_str()) {
            Some(&factor) => {
                let next = self.upstream.advance().unwrap();
                let mut scaled = number.concatenate(next, " ");
                scaled.kind = TokenKind::Number;
                scaled.value = TokenValue::Number { n: n * factor, cases: None, genders: None };
                scaled
            }
            None => number,
        }
    }

    fn try_isk_preceding(
        &mut self,
        word: Token,
    ) -> Token {
        if !tables::ISK_AMOUNT_PRECEDING.contains(word.text.as_str()) {
            return word;
        }
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Number => {
                let next = self.upstream.advance().unwrap();
                let n = match &next.value {
                    TokenValue::Number { n, .. } => *n,
                    _ => return word,
                };
                let mut amount = word.concatenate(next, " ");
                amount.kind = TokenKind::Amount;
                amount.value = TokenValue::Amount { n, iso: "ISK".to_string(), cases: None, genders: None };
                amount
            }
            _ => word,
        }
    }

    fn try_percent_word(
        &mut self,
        number: Token,
    ) -> Token {
        if !self.options.coalesce_percent {
            return number;
        }
        let n = match &number.value {
            TokenValue::Number { n, .. } => *n,
            _ => return number,
        };
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Word && tables::PERCENTAGES.contains(next.text.to_lowercase().as_str()) => {
                let next = self.upstream.advance().unwrap();
                let mut percent = number.concatenate(next, " ");
                percent.kind = TokenKind::Percent;
                percent.value = TokenValue::Percent { n, cases: None, genders: None };
                percent
            }
            _ => number,
        }
    }

    /// `"tré-" "og" "runnagróður"` → a single joined `WORD`. Looks two
    /// tokens ahead (the conjunction, then the word it introduces); if
    /// either is missing or doesn't fit, `word` is returned unchanged and
    /// nothing is consumed.
    fn try_composite_hyphen(
        &mut self,
        word: Token,
    ) -> Token {
        if word.kind != TokenKind::Word || !word.text.ends_with('-') {
            return word;
        }
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Word && CONJUNCTIONS.contains(&next.text.to_lowercase().as_str()) => {}
            _ => return word,
        }
        match self.upstream.peek_at(1) {
            Some(next) if next.kind == TokenKind::Word => {}
            _ => return word,
        }
        let conjunction = self.upstream.advance().unwrap();
        let tail = self.upstream.advance().unwrap();
        let stem = word.text.trim_end_matches('-').to_string();
        let joined_text = format!("{} {} {}{}", word.text, conjunction.text, stem, tail.text);
        let mut joined = word.concatenate(conjunction, " ").concatenate(tail, " ");
        joined.text = joined_text;
        joined.kind = TokenKind::Word;
        joined.value = TokenValue::Word(None);
        joined.clear_origin();
        joined
    }
}

impl<'a, I: Iterator<Item = Token>> Iterator for PhrasePass2<'a, I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.upstream.advance()?;
        let token = match token.kind {
            TokenKind::Number => {
                let token = self.try_multiplier(token);
                let token = self.try_amount_abbrev(token);
                self.try_percent_word(token)
            }
            TokenKind::Word => {
                let token = self.try_isk_preceding(token);
                if token.kind == TokenKind::Amount {
                    token
                } else {
                    let token = self.try_multiplier(token);
                    if token.kind == TokenKind::Number {
                        let token = self.try_amount_abbrev(token);
                        self.try_percent_word(token)
                    } else {
                        self.try_composite_hyphen(token)
                    }
                }
            }
            _ => token,
        };
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::date_time_pass::DateTimePass;
    use crate::pipeline::particle_coalescer::ParticleCoalescer;
    use crate::pipeline::phrase_pass1::PhrasePass1;
    use crate::pipeline::primary_tokenizer::PrimaryTokenizer;
    use crate::pipeline::rough_splitter::RoughSplitter;
    use crate::pipeline::sentence_segmenter::SentenceSegmenter;
    use crate::tables::DefaultAbbreviations;

    fn phrase2(
        text: &str,
        options: &TokenizerOptions,
    ) -> Vec<Token> {
        let rough = RoughSplitter::new(text, options);
        let primary = PrimaryTokenizer::new(rough, options, &DefaultAbbreviations);
        let particles = ParticleCoalescer::new(primary, &DefaultAbbreviations, options);
        let sentences = SentenceSegmenter::new(particles);
        let phrase1 = PhrasePass1::new(sentences);
        let dates = DateTimePass::new(phrase1);
        PhrasePass2::new(dates, options).collect()
    }

    #[test]
    fn test_multiplier() {
        let opts = TokenizerOptions::default();
        let toks = phrase2("Þeir voru 5 þúsund talsins.", &opts);
        let n = toks.iter().find_map(|t| match &t.value {
            TokenValue::Number { n, .. } => Some(*n),
            _ => None,
        });
        assert_eq!(n, Some(5000.0));
    }

    #[test]
    fn test_multiplier_chain_repeats() {
        let opts = TokenizerOptions::default();
        let toks = phrase2("Þeir voru 5 hundrað þúsund talsins.", &opts);
        let n = toks.iter().find_map(|t| match &t.value {
            TokenValue::Number { n, .. } => Some(*n),
            _ => None,
        });
        assert_eq!(n, Some(500_000.0));
    }

    #[test]
    fn test_spelled_out_number_word_seeds_multiplier() {
        let opts = TokenizerOptions::default();
        let toks = phrase2("Þeir voru átta hundrað talsins.", &opts);
        let n = toks.iter().find_map(|t| match &t.value {
            TokenValue::Number { n, .. } => Some(*n),
            _ => None,
        });
        assert_eq!(n, Some(800.0));
    }

    #[test]
    fn test_isk_preceding() {
        let opts = TokenizerOptions::default();
        let toks = phrase2("Það kostar kr. 500 í búðinni.", &opts);
        assert!(toks.iter().any(|t| t.kind == TokenKind::Amount));
    }

    #[test]
    fn test_percent_word_requires_option() {
        let opts = TokenizerOptions::default();
        let toks = phrase2("Hlutfallið var 17 prósent.", &opts);
        assert!(!toks.iter().any(|t| t.kind == TokenKind::Percent));

        let opts = TokenizerOptions::new().with_coalesce_percent(true);
        let toks = phrase2("Hlutfallið var 17 prósent.", &opts);
        assert!(toks.iter().any(|t| t.kind == TokenKind::Percent));
    }
}
