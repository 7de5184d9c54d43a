//! # Sentence Segmenter
//!
//! Wraps every run of content tokens between structural markers in a
//! `SBegin`/`SEnd` pair, tracking a single `in_sentence` flag the way
//! `parse_sentences` does in the reference implementation. A paragraph
//! boundary or end of stream force-closes an open sentence; a blank-line
//! `SSplit` marker does the same but is otherwise swallowed (it has done
//! its job once it has closed the sentence).
use std::collections::VecDeque;

use crate::kind::{PunctuationClass, TokenKind, TokenValue};
use crate::pipeline::lookahead::Lookahead;
use crate::token::Token;

/// Punctuation marks that always end a sentence outright.
fn ends_sentence(token: &Token) -> bool {
    token.kind == TokenKind::Punctuation && matches!(token.text.as_str(), "." | "!" | "?" | "?!" | "!?")
}

/// Sentence-closing punctuation that trails an end-of-sentence mark without
/// itself being one — a closing quote or right paren (spec §4.6: "yield any
/// trailing sentence-closing punctuation (closing quotes, right parens)").
fn is_trailing_closer(token: &Token) -> bool {
    matches!(&token.value, TokenValue::Punctuation { class: PunctuationClass::Right, .. })
}

/// A sole `…` only closes a sentence when what follows it could plausibly
/// begin a new one — a lowercase word right after `…` reads as a trailing-off
/// continuation of the same sentence, not a full stop (spec §8 boundary
/// property).
fn ellipsis_ends_sentence(next: Option<&Token>) -> bool {
    match next {
        None => true,
        Some(t) if t.kind.is_end_marker() => true,
        Some(t) if t.kind == TokenKind::Word => {
            t.text.chars().next().map(|c| !c.is_lowercase()).unwrap_or(true)
        }
        _ => true,
    }
}

fn sentence_begin() -> Token {
    Token::untracked(TokenKind::SBegin, String::new(), TokenValue::SentenceBegin { num_parses: 0, err_index: None })
}

fn sentence_end() -> Token {
    Token::untracked(TokenKind::SEnd, String::new(), TokenValue::None)
}

/// The Sentence Segmenter stage.
pub struct SentenceSegmenter<I: Iterator<Item = Token>> {
    upstream: Lookahead<I>,
    queue: VecDeque<Token>,
    in_sentence: bool,
    done: bool,
}

impl<I: Iterator<Item = Token>> SentenceSegmenter<I> {
    /// Wrap a particle-coalescer (or compatible) upstream iterator.
    pub fn new(upstream: I) -> Self {
        Self { upstream: Lookahead::new(upstream), queue: VecDeque::new(), in_sentence: false, done: false }
    }

    fn close_sentence(&mut self) {
        if self.in_sentence {
            log::trace!("sentence boundary found");
            self.queue.push_back(sentence_end());
            self.in_sentence = false;
        }
    }
}

impl<I: Iterator<Item = Token>> Iterator for SentenceSegmenter<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(tok) = self.queue.pop_front() {
                return Some(tok);
            }
            if self.done {
                return None;
            }
            let token = match self.upstream.next() {
                Some(t) => t,
                None => {
                    self.close_sentence();
                    self.done = true;
                    continue;
                }
            };
            match token.kind {
                TokenKind::PBegin => {
                    // Spec §4.6: a PBegin immediately followed by a PEnd is
                    // a no-op — drop both rather than emitting an empty
                    // paragraph.
                    if matches!(self.upstream.peek().map(|t| t.kind), Some(TokenKind::PEnd)) {
                        self.upstream.advance();
                    } else {
                        self.queue.push_back(token);
                    }
                }
                TokenKind::PEnd => {
                    self.close_sentence();
                    self.queue.push_back(token);
                }
                TokenKind::SSplit => {
                    self.close_sentence();
                }
                TokenKind::XEnd => {
                    self.close_sentence();
                    self.queue.push_back(token);
                }
                _ => {
                    if !self.in_sentence {
                        self.queue.push_back(sentence_begin());
                        self.in_sentence = true;
                    }
                    let is_ellipsis = token.kind == TokenKind::Punctuation && token.text == "…";
                    let ends = ends_sentence(&token)
                        || (is_ellipsis && ellipsis_ends_sentence(self.upstream.peek()));
                    self.queue.push_back(token);
                    if ends {
                        // Greedily combine further end-of-sentence-combinable
                        // punctuation ("?!" arriving as two separate "?"/"!"
                        // tokens), then absorb any trailing closing quotes
                        // or right parens, before closing (spec §4.6).
                        while let Some(next) = self.upstream.peek() {
                            if !ends_sentence(next) {
                                break;
                            }
                            let next = self.upstream.advance().unwrap();
                            self.queue.push_back(next);
                        }
                        while let Some(next) = self.upstream.peek() {
                            if !is_trailing_closer(next) {
                                break;
                            }
                            let next = self.upstream.advance().unwrap();
                            self.queue.push_back(next);
                        }
                        self.close_sentence();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TokenizerOptions;
    use crate::pipeline::particle_coalescer::ParticleCoalescer;
    use crate::pipeline::primary_tokenizer::PrimaryTokenizer;
    use crate::pipeline::rough_splitter::RoughSplitter;
    use crate::tables::DefaultAbbreviations;

    fn segment(text: &str) -> Vec<Token> {
        let opts = TokenizerOptions::default();
        let rough = RoughSplitter::new(text, &opts);
        let primary = PrimaryTokenizer::new(rough, &opts, &DefaultAbbreviations);
        let particles = ParticleCoalescer::new(primary, &DefaultAbbreviations, &opts);
        SentenceSegmenter::new(particles).collect()
    }

    #[test]
    fn test_two_sentences() {
        let toks = segment("Hann fór. Hún kom.");
        let begins = toks.iter().filter(|t| t.kind == TokenKind::SBegin).count();
        let ends = toks.iter().filter(|t| t.kind == TokenKind::SEnd).count();
        assert_eq!(begins, 2);
        assert_eq!(ends, 2);
    }

    #[test]
    fn test_unterminated_sentence_closed_at_eof() {
        let toks = segment("Hann fór");
        assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::SBegin).count(), 1);
        assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::SEnd).count(), 1);
    }

    #[test]
    fn test_sentence_nested_in_paragraph_markers() {
        let toks = segment("[[ Setning eitt. ]]");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        let pbegin = kinds.iter().position(|k| *k == TokenKind::PBegin).unwrap();
        let sbegin = kinds.iter().position(|k| *k == TokenKind::SBegin).unwrap();
        let send = kinds.iter().position(|k| *k == TokenKind::SEnd).unwrap();
        let pend = kinds.iter().position(|k| *k == TokenKind::PEnd).unwrap();
        assert!(pbegin < sbegin && sbegin < send && send < pend);
    }

    #[test]
    fn test_adjacent_paragraph_markers_are_a_no_op() {
        let toks = segment("Inngangur. [[ ]] Niðurlag.");
        assert!(!toks.iter().any(|t| t.kind == TokenKind::PBegin || t.kind == TokenKind::PEnd));
    }

    #[test]
    fn test_ellipsis_followed_by_lowercase_does_not_close_sentence() {
        let toks = segment("Hann sagði... og svo fór hann.");
        // A single sentence, not two: the ellipsis trails off rather than
        // ending it, since "og" is lowercase.
        assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::SBegin).count(), 1);
        assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::SEnd).count(), 1);
    }

    #[test]
    fn test_ellipsis_followed_by_uppercase_closes_sentence() {
        let toks = segment("Hann sagði... Svo fór hann.");
        assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::SBegin).count(), 2);
        assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::SEnd).count(), 2);
    }

    #[test]
    fn test_combined_question_and_exclamation_is_one_sentence() {
        // "?" and "!" arrive as two separate PUNCTUATION tokens; they must
        // combine into a single sentence close rather than opening a
        // trivial second sentence containing only "!".
        let toks = segment("Hvað?! Svaraði hann.");
        assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::SBegin).count(), 2);
        assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::SEnd).count(), 2);
    }

    #[test]
    fn test_trailing_closing_quote_absorbed_before_sentence_end() {
        let toks = segment("Hann sagði „Já.“ Svo fór hann.");
        let kinds: Vec<_> = toks.iter().map(|t| (t.kind, t.text.clone())).collect();
        let send_idx = kinds.iter().position(|(k, _)| *k == TokenKind::SEnd).unwrap();
        // The closing quote sits inside the first sentence, before its SEnd.
        assert!(kinds[..send_idx].iter().any(|(_, text)| text == "“"));
        assert_eq!(toks.iter().filter(|t| t.kind == TokenKind::SBegin).count(), 2);
    }
}
