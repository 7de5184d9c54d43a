//! # Rough Splitter
//!
//! The pipeline's first stage (spec §4.2). Walks the raw input character by
//! character, grouping whitespace-delimited runs into identity-tracked
//! [`TokenKind::Raw`] tokens, and inserting a sentence-split marker between
//! blank-line-separated spans (two or more consecutive newlines, with
//! arbitrary whitespace between them). Paragraph markers (`PBegin`/`PEnd`)
//! are *not* produced here — those come only from literal `"[["`/`"]]"`
//! rough tokens, recognized by the
//! [Primary Tokenizer](crate::pipeline::primary_tokenizer).
//!
//! Grounded on `gen`/`gen_from_string`/`parse_tokens_by_white_space` in the
//! reference implementation, which splits on `\n\s*\n` and yields a single
//! `S_SPLIT` between each resulting span, with no paragraph marker of its
//! own.
use crate::options::TokenizerOptions;
use crate::token::Token;
use crate::{TokenKind, TokenValue};

/// Decode the small set of HTML named/numeric entities recognized when
/// [`TokenizerOptions::replace_html_escapes`] is set. Returns `None` when
/// `entity` (without `&`/`;`) isn't recognized.
fn html_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        _ => {
            if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    }
}

/// Normalize a subset of composite/decomposed glyphs to a single precomposed
/// code point. A small illustrative table, not a full NFC pass — see the
/// abbreviation-table note in [`crate::tables`] for why this crate doesn't
/// try to be exhaustive about linguistic tables.
fn composite_glyph(c: char) -> Option<char> {
    match c {
        '\u{201C}' | '\u{201D}' | '\u{201E}' => Some('"'),
        '\u{2018}' | '\u{2019}' => Some('\''),
        '\u{2013}' | '\u{2014}' => Some('-'),
        _ => None,
    }
}

/// Decode HTML escapes in `raw`, if enabled. Runs before identity-tracking a
/// chunk, so it operates on a whole chunk at a time and may shorten it; the
/// resulting token loses origin tracking when a substitution changes length
/// (spec §9), which we accept here in exchange for matching the reference's
/// "escapes are decoded before work starts" behavior.
fn decode_html_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'&' {
            if let Some(semi) = raw[i..].find(';') {
                let entity = &raw[i + 1..i + semi];
                if entity.len() <= 10 {
                    if let Some(c) = html_entity(entity) {
                        out.push(c);
                        i += semi + 1;
                        continue;
                    }
                }
            }
        }
        let ch = raw[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

/// Build an identity-tracked [`Token`] for one whitespace-delimited chunk,
/// applying composite-glyph normalization in place (a 1-char-for-1-char
/// substitution, so origin tracking survives it).
fn raw_token(
    chunk: &str,
    options: &TokenizerOptions,
) -> Token {
    let text = if options.replace_html_escapes {
        decode_html_escapes(chunk)
    } else {
        chunk.to_string()
    };
    let mut token = Token::identity(TokenKind::Raw, text, TokenValue::None);
    if options.replace_composite_glyphs {
        let positions: Vec<(usize, char)> = token
            .text
            .char_indices()
            .filter_map(|(byte_pos, c)| composite_glyph(c).map(|repl| (byte_pos, repl)))
            .collect();
        for (byte_pos, repl) in positions {
            let char_idx = token.text[..byte_pos].chars().count();
            let mut buf = [0u8; 4];
            let repl_str = repl.encode_utf8(&mut buf);
            token
                .substitute(char_idx..char_idx + 1, repl_str)
                .expect("composite-glyph replacement is always exactly one character");
        }
    }
    token
}

/// The Rough Splitter stage.
pub struct RoughSplitter<'a> {
    options: &'a TokenizerOptions,
    /// Remaining input, tracked as `(byte_offset_of_char, char)` pairs so we
    /// can slice precisely without re-scanning from the start each time.
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    text: &'a str,
    /// True once at least one chunk has been emitted, so the very first span
    /// doesn't get a spurious leading `SSplit`.
    seen_chunk: bool,
    /// A chunk already pulled off `chars` whose `SSplit` marker has been
    /// emitted but the chunk itself hasn't, yet (one-token buffer).
    pending_chunk: Option<String>,
}

impl<'a> RoughSplitter<'a> {
    /// Start rough-splitting `text`.
    pub fn new(
        text: &'a str,
        options: &'a TokenizerOptions,
    ) -> Self {
        Self {
            options,
            chars: text.char_indices().peekable(),
            text,
            seen_chunk: false,
            pending_chunk: None,
        }
    }

    /// Skip whitespace, counting consecutive newlines along the way, then
    /// return the next whitespace-delimited chunk and whether a blank line
    /// (two or more newlines, spec §4.2 / reference `\n\s*\n`) preceded it.
    fn next_chunk(&mut self) -> Option<(String, bool)> {
        let mut newline_run = 0usize;
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                newline_run += 1;
                self.chars.next();
            } else if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
        let blank_line = newline_run >= 2;

        let start = match self.chars.peek() {
            Some(&(byte_pos, _)) => byte_pos,
            None => return None,
        };
        let mut end = start;
        while let Some(&(byte_pos, c)) = self.chars.peek() {
            if c.is_whitespace() {
                break;
            }
            end = byte_pos + c.len_utf8();
            self.chars.next();
        }
        Some((self.text[start..end].to_string(), blank_line))
    }
}

impl<'a> Iterator for RoughSplitter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(chunk) = self.pending_chunk.take() {
            return Some(raw_token(&chunk, self.options));
        }

        // A blank line queues one SSplit ahead of the chunk that follows it;
        // the very first chunk never gets a preceding SSplit.
        match self.next_chunk() {
            Some((chunk, blank_line)) => {
                let emit_split = blank_line && self.seen_chunk;
                self.seen_chunk = true;
                if emit_split {
                    log::trace!("blank line found, emitting sentence split");
                    self.pending_chunk = Some(chunk);
                    Some(Token::untracked(TokenKind::SSplit, String::new(), TokenValue::None))
                } else {
                    Some(raw_token(&chunk, self.options))
                }
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> TokenizerOptions {
        TokenizerOptions::default()
    }

    #[test]
    fn test_single_span_has_no_structural_markers() {
        let o = opts();
        let toks: Vec<_> = RoughSplitter::new("Hann fór út.", &o).collect();
        assert!(toks.iter().all(|t| t.kind == TokenKind::Raw));
        let words: Vec<_> = toks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Hann", "fór", "út."]);
    }

    #[test]
    fn test_blank_line_emits_ssplit_not_paragraph_markers() {
        let o = opts();
        let toks: Vec<_> = RoughSplitter::new("Fyrsta efnisgrein.\n\nÖnnur efnisgrein.", &o).collect();
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Raw,
                TokenKind::Raw,
                TokenKind::SSplit,
                TokenKind::Raw,
                TokenKind::Raw,
            ]
        );
        assert!(!kinds.contains(&TokenKind::PBegin));
        assert!(!kinds.contains(&TokenKind::PEnd));
    }

    #[test]
    fn test_single_newline_is_not_a_blank_line() {
        // A lone newline is plain whitespace between rough tokens, not a
        // blank-line boundary (which needs two newline characters, however
        // much other whitespace sits between them).
        let o = opts();
        let toks: Vec<_> = RoughSplitter::new("Lína eitt.\nLína tvö.", &o).collect();
        assert!(!toks.iter().any(|t| t.kind == TokenKind::SSplit));
        assert!(toks.iter().all(|t| t.kind == TokenKind::Raw));
    }

    #[test]
    fn test_leading_blank_line_has_no_ssplit() {
        let o = opts();
        let toks: Vec<_> = RoughSplitter::new("\n\nHann fór.", &o).collect();
        assert!(!toks.iter().any(|t| t.kind == TokenKind::SSplit));
    }

    #[test]
    fn test_identity_tracking_preserved() {
        let o = opts();
        let toks: Vec<_> = RoughSplitter::new("orð", &o).collect();
        let raw = toks.iter().find(|t| t.kind == TokenKind::Raw).unwrap();
        assert_eq!(raw.original(), Some("orð"));
    }

    #[test]
    fn test_html_escape_decoding() {
        let o = TokenizerOptions::new().with_replace_html_escapes(true);
        let toks: Vec<_> = RoughSplitter::new("Jón&amp;Gunna", &o).collect();
        let raw = toks.iter().find(|t| t.kind == TokenKind::Raw).unwrap();
        assert_eq!(raw.text, "Jón&Gunna");
    }
}
