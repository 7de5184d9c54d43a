//! # Primary Tokenizer
//!
//! Turns each [`TokenKind::Raw`] whitespace-delimited chunk from the Rough
//! Splitter into one or more typed tokens: numbers and dates (via the
//! [`digit_parser`](crate::pipeline::digit_parser)), words, punctuation, and
//! a handful of whole-chunk shapes (e-mail addresses, URLs, hashtags,
//! domains, molecules, usernames). Grounded on `parse_tokens` in the
//! reference implementation, which performs the same "peel punctuation off
//! both ends, dispatch digits, recognize whole-chunk shapes" walk over each
//! raw chunk.
//!
//! Guarantees forward progress: a chunk that matches nothing recognizable
//! is emitted whole as [`TokenKind::Unknown`] rather than looping forever.
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::kind::{PunctuationClass, TokenKind, TokenValue};
use crate::options::{KludgyOrdinals, TokenizerOptions};
use crate::pipeline::digit_parser;
use crate::tables::{self, AbbreviationTable};
use crate::token::Token;

/// A digit run directly followed by one of a handful of known Icelandic
/// spelled-ordinal suffixes (`1sti`, `3ja`, `10ndi`), with no further letter
/// or digit after it. Longer suffixes are listed first so the alternation
/// doesn't settle for a shorter prefix match (`"undi"` before `"di"`).
static KLUDGY_ORDINAL: Lazy<fancy_regex::Regex> =
    Lazy::new(|| fancy_regex::Regex::new(r"^\d{1,2}(undi|ndi|sti|ji|ja|ði|di|ti)(?![a-zA-Z0-9])").unwrap());

/// Recognize and handle a kludgy spelled-out ordinal at the head of `raw`,
/// per [`KludgyOrdinals`]. A no-op (`Err(raw)`) when `mode` is
/// [`KludgyOrdinals::PassThrough`] or nothing matches.
fn try_kludgy_ordinal(
    raw: Token,
    mode: KludgyOrdinals,
) -> Result<(Token, Token), Token> {
    if mode == KludgyOrdinals::PassThrough {
        return Err(raw);
    }
    let m = match KLUDGY_ORDINAL.find(&raw.text) {
        Ok(Some(m)) if m.start() == 0 => m,
        _ => return Err(raw),
    };
    let matched = m.as_str();
    let digit_len = matched.chars().take_while(|c| c.is_ascii_digit()).count();
    let n: i64 = match matched[..digit_len].parse() {
        Ok(n) => n,
        Err(_) => return Err(raw),
    };
    let split_at = matched.chars().count() as isize;
    let (mut tok, rest) = raw.split(split_at);
    tok.kind = TokenKind::Ordinal;
    tok.value = TokenValue::Ordinal(n);
    if mode == KludgyOrdinals::Modify {
        if let Some(&word) = tables::KLUDGY_ORDINAL_WORDS.get(&n) {
            tok.text = word.to_string();
            tok.clear_origin();
        }
    }
    Ok((tok, rest))
}

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.+-]+@[\w-]+\.[\w.-]+$").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(https?://|www\.)\S+$").unwrap());
static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w-]+(\.[\w-]+)+\.(is|com|net|org|io|co)$").unwrap()
});
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\w+$").unwrap());
static USERNAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@\w+$").unwrap());
static MOLECULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-z]?\d*){2,}$").unwrap());

/// Classify a punctuation character's rough bracketing position, using its
/// Unicode general category rather than a hand-picked character list —
/// `Ps`/`Pi` open, `Pe`/`Pf` close, everything else punctuation-ish is
/// `Center`, and `%`/`‰`/`°` get their own `NumberPunct` class since they
/// attach to a preceding number rather than bracket text (`°` itself files
/// under `So`, Other Symbol, in General_Category, so it needs the same
/// special case `%`/`‰` get).
fn classify_punct(c: char) -> Option<PunctuationClass> {
    if c == '%' || c == '‰' || c == '°' {
        return Some(PunctuationClass::NumberPunct);
    }
    // Unicode assigns both `„` and `“` general category `Pi` (their
    // canonical use is as a pair of *opening* marks in other locales); the
    // Icelandic/German convention of closing a `„…“` pair with `“` has no
    // representation in General_Category, so it's special-cased here rather
    // than left to misclassify as `Left`.
    if c == '“' {
        return Some(PunctuationClass::Right);
    }
    match get_general_category(c) {
        GeneralCategory::OpenPunctuation | GeneralCategory::InitialPunctuation => Some(PunctuationClass::Left),
        GeneralCategory::ClosePunctuation | GeneralCategory::FinalPunctuation => Some(PunctuationClass::Right),
        GeneralCategory::DashPunctuation
        | GeneralCategory::ConnectorPunctuation
        | GeneralCategory::OtherPunctuation => Some(PunctuationClass::Center),
        _ => None,
    }
}

/// A word character: any Unicode letter, or the apostrophe glyphs Icelandic
/// contractions use (`"Jóns'"`), which the general-category tables file
/// under punctuation rather than letters.
fn is_word_char(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    ) || c == '\''
        || c == '\u{2019}'
}

/// The `²`/`³` superscript digits spec §4.4 allows inside an alphabetic run
/// (unit exponents like `"m²"` glued onto a word rather than a digit run).
fn is_superscript_digit(c: char) -> bool {
    c == '²' || c == '³'
}

/// Length, in characters, of the maximal alphabetic run at the head of
/// `text` — letters/apostrophes/hyphens/superscripts (spec §4.4), plus a
/// `.` that sits between two word characters (an abbreviation dot embedded
/// in the run, e.g. `"t.d"`, `"o.s.frv"`; a trailing `.` with nothing
/// following is left for [`peel_leading_punct`] instead).
fn word_run_len(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if is_word_char(c) || c == '-' || is_superscript_digit(c) {
            i += 1;
        } else if c == '.' && i > 0 && i + 1 < chars.len() && is_word_char(chars[i + 1]) {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// If `word`'s text contains exactly one `.` that separates a lowercase
/// character from a following uppercase one, and the left-hand side isn't a
/// known abbreviation, split it into word / period / word — spec §4.4's
/// "word-internal run-on period" rule, catching two sentences glued
/// together with no intervening space (`"...gaman.Þetta var..."`).
fn split_run_on_period(
    word: Token,
    abbrevs: &dyn AbbreviationTable,
) -> Result<(Token, Token, Token), Token> {
    if word.text.matches('.').count() != 1 {
        return Err(word);
    }
    let chars: Vec<char> = word.text.chars().collect();
    let dot_pos = chars.iter().position(|&c| c == '.').unwrap();
    if dot_pos == 0 || dot_pos + 1 >= chars.len() {
        return Err(word);
    }
    let (before, after) = (chars[dot_pos - 1], chars[dot_pos + 1]);
    if !(before.is_lowercase() && after.is_uppercase()) {
        return Err(word);
    }
    let left_text: String = chars[..dot_pos].iter().collect();
    let candidate = format!("{left_text}.");
    if abbrevs.contains(&candidate) || abbrevs.is_single(&left_text) {
        return Err(word);
    }

    let (left, rest) = word.split(dot_pos as isize);
    let (period, right) = rest.split(1);
    let mut left = left;
    left.kind = TokenKind::Word;
    left.value = TokenValue::Word(None);
    let mut period = period;
    period.kind = TokenKind::Punctuation;
    period.value = TokenValue::Punctuation { class: PunctuationClass::Center, normalized: ".".to_string() };
    let mut right = right;
    right.kind = TokenKind::Word;
    right.value = TokenValue::Word(None);
    Ok((left, period, right))
}

/// Normalize a straight quote glyph at the head of `raw` to its directional
/// Icelandic form: `"…"` around a whole chunk becomes `„…“`, `'…'` becomes
/// `‚…‘`, and a lone leading quote with no matching close in this chunk (the
/// opening side of a quote that spans several whitespace-delimited chunks)
/// still gets its opening glyph normalized. Every substitution is one
/// character for one character, so origin tracking survives it untouched.
fn normalize_directional_quotes(mut raw: Token) -> Token {
    let chars: Vec<char> = raw.text.chars().collect();
    let first = match chars.first() {
        Some(&c) => c,
        None => return raw,
    };
    let (open, close) = match first {
        '"' => ('„', '“'),
        '\'' => ('‚', '‘'),
        _ => return raw,
    };
    raw.substitute(0..1, &open.to_string()).expect("a directional quote is one character");
    if chars.len() > 2 && *chars.last().unwrap() == first {
        let end = raw.char_len();
        raw.substitute(end - 1..end, &close.to_string()).expect("a directional quote is one character");
    }
    raw
}

/// Recognize a leading ellipsis run — `"…"`, three or more literal dots, or a
/// bracketed `"[...]"` — and normalize it to a single `…` [`TokenKind::Punctuation`]
/// token (spec §4.4). Tried before [`peel_leading_punct`], which would
/// otherwise peel the run one `.` at a time.
fn try_leading_ellipsis(raw: Token) -> Result<(Token, Token), Token> {
    let consumed = if raw.text.starts_with('…') {
        1
    } else if raw.text.starts_with("[...]") {
        5
    } else {
        let dots = raw.text.chars().take_while(|&c| c == '.').count();
        if dots >= 3 {
            dots
        } else {
            return Err(raw);
        }
    };
    let (mut ellipsis, rest) = raw.split(consumed as isize);
    if consumed > 1 {
        ellipsis.substitute(0..consumed, "…").expect("ellipsis normalizes to one character");
    }
    ellipsis.kind = TokenKind::Punctuation;
    ellipsis.value = TokenValue::Punctuation { class: PunctuationClass::Center, normalized: "…".to_string() };
    Ok((ellipsis, rest))
}

/// Peel one leading punctuation character off of `raw`, if any, as its own
/// [`TokenKind::Punctuation`] token. Hyphens are not peeled here, since a
/// leading hyphen is part of a composite-hyphen continuation handled by the
/// caller.
fn peel_leading_punct(raw: Token) -> Result<(Token, Token), Token> {
    let first = match raw.text.chars().next() {
        Some(c) => c,
        None => return Err(raw),
    };
    if first == '-' {
        return Err(raw);
    }
    match classify_punct(first) {
        Some(class) => {
            let (mut punct, rest) = raw.split(1);
            punct.kind = TokenKind::Punctuation;
            punct.value = TokenValue::Punctuation { class, normalized: first.to_string() };
            Ok((punct, rest))
        }
        None => Err(raw),
    }
}

/// Recognize a whole rough token that is exactly `"[["` or `"]]"` as a
/// paragraph marker (spec §4.4: "`[[`/`]]` → paragraph markers"). Grounded
/// on the reference's `lw == 2 and (rt.txt == "[[" or rt.txt == "]]")` check
/// in `parse_tokens` — the token must be the *whole* chunk, so `"[[foo"`
/// stays ordinary bracket punctuation peeled a character at a time.
fn try_paragraph_marker(mut raw: Token) -> Result<Token, Token> {
    match raw.text.as_str() {
        "[[" => {
            raw.kind = TokenKind::PBegin;
            raw.value = TokenValue::None;
            Ok(raw)
        }
        "]]" => {
            raw.kind = TokenKind::PEnd;
            raw.value = TokenValue::None;
            Ok(raw)
        }
        _ => Err(raw),
    }
}

fn currency_symbol_token(raw: Token) -> Result<(Token, Token), Token> {
    let first = match raw.text.chars().next() {
        Some(c) => c,
        None => return Err(raw),
    };
    let sym = first.to_string();
    match tables::CURRENCY_SYMBOLS.get(sym.as_str()) {
        Some(iso) => {
            let (mut cur, rest) = raw.split(1);
            cur.kind = TokenKind::Currency;
            cur.value = TokenValue::Currency { iso: iso.to_string(), cases: None, genders: None };
            Ok((cur, rest))
        }
        None => Err(raw),
    }
}

/// Try each whole-chunk shape recognizer against `text`.
fn whole_chunk_kind(text: &str) -> Option<TokenKind> {
    if EMAIL.is_match(text) {
        Some(TokenKind::Email)
    } else if URL.is_match(text) {
        Some(TokenKind::Url)
    } else if HASHTAG.is_match(text) {
        Some(TokenKind::Hashtag)
    } else if USERNAME.is_match(text) {
        Some(TokenKind::Username)
    } else if DOMAIN.is_match(text) {
        Some(TokenKind::Domain)
    } else if text.chars().count() > 1 && MOLECULE.is_match(text) {
        Some(TokenKind::Molecule)
    } else {
        None
    }
}

fn whole_chunk_value(
    kind: TokenKind,
    text: &str,
) -> TokenValue {
    match kind {
        TokenKind::Username => TokenValue::Username(text.trim_start_matches('@').to_string()),
        TokenKind::Email | TokenKind::Url | TokenKind::Domain | TokenKind::Hashtag | TokenKind::Molecule => {
            TokenValue::Text(text.to_string())
        }
        _ => TokenValue::None,
    }
}

/// The Primary Tokenizer stage.
pub struct PrimaryTokenizer<'a, I: Iterator<Item = Token>> {
    upstream: I,
    options: &'a TokenizerOptions,
    abbrevs: &'a dyn AbbreviationTable,
    queue: std::collections::VecDeque<Token>,
    emitted_xend: bool,
}

impl<'a, I: Iterator<Item = Token>> PrimaryTokenizer<'a, I> {
    /// Wrap a rough-splitter (or compatible) upstream iterator. `abbrevs` is
    /// consulted only by the word-internal run-on period rule, to avoid
    /// splitting a known abbreviation's embedded dot (`"t.d"`).
    pub fn new(
        upstream: I,
        options: &'a TokenizerOptions,
        abbrevs: &'a dyn AbbreviationTable,
    ) -> Self {
        Self { upstream, options, abbrevs, queue: std::collections::VecDeque::new(), emitted_xend: false }
    }

    /// Tokenize one `Raw` chunk completely, pushing every resulting token
    /// onto `self.queue` in order.
    fn process_chunk(
        &mut self,
        raw: Token,
    ) {
        let raw = match try_paragraph_marker(raw) {
            Ok(marker) => {
                self.queue.push_back(marker);
                return;
            }
            Err(r) => r,
        };

        let mut raw = normalize_directional_quotes(raw);
        loop {
            if raw.text.is_empty() {
                break;
            }

            if let Some(kind) = whole_chunk_kind(&raw.text) {
                let value = whole_chunk_value(kind, &raw.text);
                raw.kind = kind;
                raw.value = value;
                self.queue.push_back(raw);
                break;
            }

            match try_leading_ellipsis(raw) {
                Ok((ellipsis, rest)) => {
                    self.queue.push_back(ellipsis);
                    raw = rest;
                    continue;
                }
                Err(r) => raw = r,
            }

            match peel_leading_punct(raw) {
                Ok((punct, rest)) => {
                    self.queue.push_back(punct);
                    raw = rest;
                    continue;
                }
                Err(r) => raw = r,
            }

            if raw.text.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                match try_kludgy_ordinal(raw, self.options.handle_kludgy_ordinals) {
                    Ok((tok, rest)) => {
                        self.queue.push_back(tok);
                        raw = rest;
                        continue;
                    }
                    Err(r) => raw = r,
                }
            }

            if raw.text.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                match digit_parser::parse_leading_digits(raw, self.options) {
                    Ok((tok, rest)) => {
                        self.queue.push_back(tok);
                        raw = rest;
                        continue;
                    }
                    Err(r) => raw = r,
                }
            }

            match currency_symbol_token(raw) {
                Ok((cur, rest)) => {
                    self.queue.push_back(cur);
                    raw = rest;
                    continue;
                }
                Err(r) => raw = r,
            }

            // Consume a maximal run of word characters (allowing embedded
            // abbreviation dots and superscripts — spec §4.4).
            let word_len = word_run_len(&raw.text);
            if word_len > 0 {
                let (word, rest) = raw.split(word_len as isize);
                let mut word = word;
                word.kind = TokenKind::Word;
                word.value = TokenValue::Word(None);
                match split_run_on_period(word, self.abbrevs) {
                    Ok((left, period, right)) => {
                        self.queue.push_back(left);
                        self.queue.push_back(period);
                        self.queue.push_back(right);
                    }
                    Err(w) => self.queue.push_back(w),
                }
                raw = rest;
                continue;
            }

            // Any punctuation at the current front is caught by
            // `peel_leading_punct` at the top of the next iteration; if we
            // reach here nothing at all recognized the leading character.
            // Forward-progress guarantee: consume exactly one character.
            let (unknown, rest) = raw.split(1);
            let mut unknown = unknown;
            unknown.kind = TokenKind::Unknown;
            unknown.value = TokenValue::None;
            self.queue.push_back(unknown);
            raw = rest;
        }
    }
}

impl<'a, I: Iterator<Item = Token>> Iterator for PrimaryTokenizer<'a, I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(tok) = self.queue.pop_front() {
                return Some(tok);
            }
            match self.upstream.next() {
                Some(tok) if tok.kind == TokenKind::Raw => {
                    self.process_chunk(tok);
                }
                Some(structural) => return Some(structural),
                None => {
                    if self.emitted_xend {
                        return None;
                    }
                    self.emitted_xend = true;
                    return Some(Token::untracked(TokenKind::XEnd, String::new(), TokenValue::None));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TokenizerOptions;
    use crate::pipeline::rough_splitter::RoughSplitter;
    use crate::tables::DefaultAbbreviations;

    fn tokenize_words(text: &str) -> Vec<Token> {
        let opts = TokenizerOptions::default();
        let rough = RoughSplitter::new(text, &opts);
        PrimaryTokenizer::new(rough, &opts, &DefaultAbbreviations).collect()
    }

    #[test]
    fn test_simple_word_and_punctuation() {
        let toks = tokenize_words("Hann fór.");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::Word));
        assert!(kinds.contains(&TokenKind::Punctuation));
        assert_eq!(toks.last().unwrap().kind, TokenKind::XEnd);
    }

    #[test]
    fn test_number_token() {
        let toks = tokenize_words("3,14 er pí.");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_email() {
        let toks = tokenize_words("jon@example.is");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Email));
    }

    #[test]
    fn test_hashtag() {
        let toks = tokenize_words("#frelsi");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Hashtag));
    }

    #[test]
    fn test_straight_quotes_become_directional() {
        let toks = tokenize_words("\"orð\"");
        let texts: Vec<&str> = toks.iter().map(|t| t.text.as_str()).collect();
        assert!(texts.contains(&"„"));
        assert!(texts.contains(&"“"));
        assert!(texts.contains(&"orð"));
    }

    #[test]
    fn test_leading_quote_without_match_still_normalized() {
        let toks = tokenize_words("\"Hann");
        assert!(toks.iter().any(|t| t.text == "„"));
    }

    #[test]
    fn test_forward_progress_on_garbage() {
        let toks = tokenize_words("§§§");
        // Must terminate and consume every character as some token kind.
        let total_chars: usize = toks
            .iter()
            .filter(|t| t.kind != TokenKind::XEnd && t.kind != TokenKind::PBegin && t.kind != TokenKind::PEnd)
            .map(|t| t.char_len())
            .sum();
        assert_eq!(total_chars, "§§§".chars().count());
    }

    #[test]
    fn test_origin_tracking_survives_word_split() {
        let toks = tokenize_words("íslenska.");
        let word = toks.iter().find(|t| t.kind == TokenKind::Word).unwrap();
        assert_eq!(word.original(), Some("íslenska"));
    }

    #[test]
    fn test_literal_dots_normalize_to_ellipsis() {
        let toks = tokenize_words("Hann sagði...");
        let ellipsis = toks.iter().find(|t| t.kind == TokenKind::Punctuation).unwrap();
        assert_eq!(ellipsis.text, "…");
        assert_eq!(ellipsis.original(), Some("..."));
    }

    #[test]
    fn test_bracketed_dots_normalize_to_ellipsis() {
        let toks = tokenize_words("[...]");
        let ellipsis = toks.iter().find(|t| t.kind == TokenKind::Punctuation).unwrap();
        assert_eq!(ellipsis.text, "…");
    }

    #[test]
    fn test_two_dots_do_not_become_ellipsis() {
        let toks = tokenize_words("Hann kom..");
        let dots: Vec<_> = toks.iter().filter(|t| t.text == ".").collect();
        assert_eq!(dots.len(), 2);
    }

    #[test]
    fn test_abbreviation_dot_stays_inside_word_run() {
        // "t.d." glues into one WORD("t.d") + trailing PUNCTUATION("."),
        // ready for the particle coalescer to re-absorb the dot.
        let toks = tokenize_words("t.d. var nefnt.");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Word && t.text == "t.d"));
    }

    #[test]
    fn test_run_on_period_splits_two_glued_sentences() {
        let toks = tokenize_words("Þetta var gaman.Hitt var leiðinlegt.");
        let texts: Vec<&str> = toks.iter().map(|t| t.text.as_str()).collect();
        assert!(texts.contains(&"gaman"));
        assert!(texts.contains(&"Hitt"));
        let gaman_idx = texts.iter().position(|&t| t == "gaman").unwrap();
        assert_eq!(texts[gaman_idx + 1], ".");
    }

    #[test]
    fn test_kludgy_ordinal_translate() {
        let opts = TokenizerOptions::new().with_handle_kludgy_ordinals(KludgyOrdinals::Translate);
        let rough = RoughSplitter::new("Hann varð 1sti í keppninni.", &opts);
        let toks: Vec<_> = PrimaryTokenizer::new(rough, &opts, &DefaultAbbreviations).collect();
        let ord = toks.iter().find(|t| t.kind == TokenKind::Ordinal).unwrap();
        assert_eq!(ord.value, TokenValue::Ordinal(1));
        assert_eq!(ord.text, "1sti");
    }

    #[test]
    fn test_kludgy_ordinal_modify_rewrites_to_spelled_word() {
        let opts = TokenizerOptions::new().with_handle_kludgy_ordinals(KludgyOrdinals::Modify);
        let rough = RoughSplitter::new("Hann varð 1sti í keppninni.", &opts);
        let toks: Vec<_> = PrimaryTokenizer::new(rough, &opts, &DefaultAbbreviations).collect();
        let ord = toks.iter().find(|t| t.kind == TokenKind::Ordinal).unwrap();
        assert_eq!(ord.text, "fyrsti");
        assert_eq!(ord.original(), None);
    }

    #[test]
    fn test_kludgy_ordinal_pass_through_by_default() {
        let toks = tokenize_words("Hann varð 1sti í keppninni.");
        assert!(!toks.iter().any(|t| t.kind == TokenKind::Ordinal));
    }

    #[test]
    fn test_run_on_period_kept_merged_for_known_abbreviation() {
        // "Dr.Jónsson" glued with no space: "dr" is a known abbreviation
        // stem, so the embedded dot stays part of the word run rather than
        // being split into two sentences.
        let toks = tokenize_words("Dr.Jónsson kom.");
        assert!(toks.iter().any(|t| t.text == "Dr.Jónsson"));
    }

    #[test]
    fn test_bare_double_bracket_markers_become_paragraph_tokens() {
        let toks = tokenize_words("[[ Hann fór. ]]");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::PBegin));
        assert!(kinds.contains(&TokenKind::PEnd));
    }

    #[test]
    fn test_bracket_glued_to_word_is_not_a_paragraph_marker() {
        // Only a whole rough token of exactly "[[" or "]]" is a paragraph
        // marker; "[[foo" still peels as ordinary bracket punctuation.
        let toks = tokenize_words("[[foo]]");
        assert!(!toks.iter().any(|t| t.kind == TokenKind::PBegin));
        assert!(!toks.iter().any(|t| t.kind == TokenKind::PEnd));
    }
}
