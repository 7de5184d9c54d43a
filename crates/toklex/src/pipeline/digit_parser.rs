//! # Digit Parser
//!
//! Recognizes the numeric surface forms at the head of a [`TokenKind::Raw`]
//! chunk — times, dates, years, multi-dot ordinals, real numbers,
//! percentages, social security numbers, telephone numbers, serial numbers,
//! and "number with trailing letter" forms (spec §4.3). A bare single-dot
//! ordinal (`"3."`) is deliberately *not* claimed here: spec §4.3's rule list
//! has no entry for it, only the multi-dot `d+.d+(.d+)+` form (rule 21) —
//! the single-dot case is left as a plain integer plus a separate `.`
//! token, promoted to `ORDINAL` downstream by the Particle Coalescer
//! (spec §4.5), which alone has the next-token lookahead needed to roll
//! the promotion back at a sentence boundary. Invoked from the Primary
//! Tokenizer, never as a top-level pipeline stage of its own, since it only
//! ever inspects one raw chunk at a time.
//!
//! Patterns are tried in a fixed order, first match wins, exactly mirroring
//! `parse_digits` in the reference implementation's fallthrough structure —
//! more specific patterns (a full ISO date) must be tried before the looser
//! ones they're a special case of (a bare 4-digit year) or the match would
//! never fire. [`fancy_regex`] is used instead of [`regex`] because several
//! patterns need a negative lookahead (`(?!\d)`) to avoid swallowing a
//! longer digit run that a later, more specific pattern should claim
//! instead.
use fancy_regex::Regex;
use once_cell::sync::Lazy;

use crate::kind::{TokenKind, TokenValue};
use crate::options::TokenizerOptions;
use crate::tables;
use crate::token::Token;

/// Whether a pattern's surface form is English-formatted (comma thousands,
/// dot decimal) and therefore subject to [`TokenizerOptions::convert_numbers`]
/// rewriting the working text to Icelandic style (dot thousands, comma
/// decimal) — spec §4.3 rule 10.
#[derive(Clone, Copy, PartialEq, Eq)]
enum NumberStyle {
    /// Not a plain numeric literal (times, dates, ordinals, …) — never
    /// rewritten.
    NotApplicable,
    /// Already Icelandic-styled; nothing to convert.
    Icelandic,
    /// English-styled; convert when requested.
    English,
}

struct DigitPattern {
    regex: &'static Lazy<Regex>,
    build: fn(&str) -> Option<(TokenKind, TokenValue)>,
    style: NumberStyle,
}

/// Split `m` at its first alphabetic/`%`/`‰` character, returning
/// `(number_part, unit_part)`. Used by the unit-dispatch patterns (spec §4.3
/// rules 9–11), which glue a number directly onto a unit or currency
/// abbreviation with no separating space.
fn split_number_and_unit(m: &str) -> (&str, &str) {
    let idx = m
        .find(|c: char| c.is_alphabetic() || c == '%' || c == '‰')
        .unwrap_or(m.len());
    (&m[..idx], &m[idx..])
}

/// Look up `unit` against the SI/currency tables and build the matching
/// `(kind, value)` for a number already parsed into `n`. `None` means the
/// unit wasn't recognized, so the whole pattern should be rejected and the
/// parser should fall through to a plain-number reading.
fn dispatch_unit(
    n: f64,
    unit: &str,
) -> Option<(TokenKind, TokenValue)> {
    if let Some((canonical, scale)) = tables::SI_UNITS.get(unit) {
        let kind = match *canonical {
            "%" | "‰" => TokenKind::Percent,
            _ => TokenKind::Measurement,
        };
        return Some(match kind {
            TokenKind::Percent => (kind, TokenValue::Percent { n: n * scale, cases: None, genders: None }),
            _ => (kind, TokenValue::Measurement { unit: canonical.to_string(), value: n * scale }),
        });
    }
    if tables::CURRENCY_ABBREV.contains(unit) {
        return Some((TokenKind::Amount, TokenValue::Amount { n, iso: unit.to_string(), cases: None, genders: None }));
    }
    None
}

fn parse_icelandic_number(digits: &str) -> Option<f64> {
    digits.replace('.', "").replace(',', ".").parse().ok()
}

fn parse_english_number(digits: &str) -> Option<f64> {
    digits.replace(',', "").parse().ok()
}

static TIME_MS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}:\d{2},\d+(?!\d)").unwrap());
static TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}(:\d{2})?(?!\d)").unwrap());
static DATE_ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}(?!\d)").unwrap());
/// `dd[./-]mm[./-]yy(yy)` — spec §4.3 rule 5. Covers both 2- and 4-digit
/// years; the day/month swap and 2-digit-year century heuristics live in
/// [`parse_date_dmy`].
static DATE_DMY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[./-]\d{1,2}[./-]\d{2}(\d{2})?(?!\d)").unwrap());
/// `dd.mm` with no year — spec §4.3 rule 6. Dot-only, since `dd/mm` without a
/// year is the ambiguous fraction-or-date form handled by
/// [`FRACTION_OR_DATE`] instead.
static DATE_REL_DM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}\.\d{1,2}(?!\d)(?!\.\d)").unwrap());
/// `mm[-.]yyyy` — spec §4.3 rule 7.
static DATE_REL_MY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}[-.]\d{4}(?!\d)").unwrap());
static SSN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}-\d{4}(?!\d)").unwrap());
static SERIAL_MULTI: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(-\d+){2,}(?!\d)").unwrap());
static TELNO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}-\d{4}(?!\d)").unwrap());
/// A bare 7-digit run (no hyphen) — spec §4.3 rule 20.
static TELNO_7DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{7}(?!\d)").unwrap());
static NUMWLETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[a-zA-Z](?![a-zA-Z0-9])").unwrap());
/// Number (Icelandic style: dot thousands, comma decimal) glued directly to
/// a unit/currency abbreviation — spec §4.3 rule 9.
static NUM_UNIT_IS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{3})*(,\d+)?\p{L}+(?!\d)").unwrap());
/// As above, English style (comma thousands, dot decimal) — spec §4.3 rule
/// 10; subject to [`TokenizerOptions::convert_numbers`].
static NUM_UNIT_EN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(,\d{3})*(\.\d+)?\p{L}+(?!\d)").unwrap());
/// Digits directly followed by a vulgar-fraction glyph and then a unit —
/// spec §4.3 rule 11.
static DIGITS_VULGAR_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[¼½¾⅓⅔⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]\p{L}+(?!\d)").unwrap());
/// Digits directly followed by a vulgar-fraction glyph, no unit — spec §4.3
/// rule 12.
static DIGITS_VULGAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[¼½¾⅓⅔⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞](?!\d)").unwrap());
static REAL_IS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{3})+,\d+(?!\d)").unwrap());
static REAL_EN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}(,\d{3})+\.\d+(?!\d)").unwrap());
static REAL_SIMPLE_IS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+,\d+(?!\d)").unwrap());
static REAL_SIMPLE_EN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+(?!\d)(?!\.\d)").unwrap());
/// `d/d` — a small fraction or an ambiguous day/month pair, spec §4.3 rule
/// 15.
static FRACTION_OR_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}(?!\d)(?!/\d)").unwrap());
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}(?!\d)").unwrap());
/// `d+.d+(.d+)+` — dots removed, read as one integer, spec §4.3 rule 21.
static ORDINAL_MULTI_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+){2,}(?!\d)").unwrap());
static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(,\d+)?(%|‰)").unwrap());
static INTEGER_GROUPED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{3})+(?!\d)").unwrap());
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+").unwrap());

fn parse_time_ms(m: &str) -> Option<(TokenKind, TokenValue)> {
    let head = m.split(',').next().unwrap_or(m);
    parse_time(head)
}

fn parse_time(m: &str) -> Option<(TokenKind, TokenValue)> {
    let parts: Vec<&str> = m.split(':').collect();
    let h: u32 = parts[0].parse().ok()?;
    let min: u32 = parts[1].parse().ok()?;
    let s: u32 = parts.get(2).and_then(|v| v.parse().ok()).unwrap_or(0);
    if h < 24 && min < 60 && s < 60 {
        Some((TokenKind::Time, TokenValue::Time { h, m: min, s }))
    } else {
        None
    }
}

fn parse_date_iso(m: &str) -> Option<(TokenKind, TokenValue)> {
    let parts: Vec<&str> = m.split(|c: char| !c.is_ascii_digit()).collect();
    let y: i32 = parts[0].parse().ok()?;
    let mo: u32 = parts[1].parse().ok()?;
    let d: u32 = parts[2].parse().ok()?;
    tables::is_valid_date(y, mo, d).then_some((TokenKind::Date, TokenValue::Date { y, m: mo, d }))
}

/// `dd[./-]mm[./-]yy(yy)`, with the 2-digit-year century heuristic (`>50` →
/// 1900s, else 2000s) and the European-first day/month swap (if the
/// "month" slot is `>12` and the "day" slot is `<=12`, the two are
/// transposed) — spec §4.3 rule 5.
fn parse_date_dmy(m: &str) -> Option<(TokenKind, TokenValue)> {
    let parts: Vec<&str> = m.split(|c: char| !c.is_ascii_digit()).collect();
    let mut d: u32 = parts[0].parse().ok()?;
    let mut mo: u32 = parts[1].parse().ok()?;
    let y_raw = parts[2];
    let y: i32 = if y_raw.len() == 2 {
        let yy: i32 = y_raw.parse().ok()?;
        if yy > 50 { 1900 + yy } else { 2000 + yy }
    } else {
        y_raw.parse().ok()?
    };
    if mo > 12 && d <= 12 {
        core::mem::swap(&mut d, &mut mo);
    }
    tables::is_valid_date(y, mo, d).then_some((TokenKind::Date, TokenValue::Date { y, m: mo, d }))
}

/// `dd.mm` with no year — a relative date (year unspecified) — spec §4.3
/// rule 6.
fn parse_date_rel_dm(m: &str) -> Option<(TokenKind, TokenValue)> {
    let parts: Vec<&str> = m.split('.').collect();
    let d: u32 = parts[0].parse().ok()?;
    let mo: u32 = parts[1].parse().ok()?;
    tables::is_valid_date(2000, mo, d).then_some((TokenKind::Date, TokenValue::Date { y: 0, m: mo, d }))
}

/// `mm[-.]yyyy` with no day — a relative date — spec §4.3 rule 7.
fn parse_date_rel_my(m: &str) -> Option<(TokenKind, TokenValue)> {
    let parts: Vec<&str> = m.split(|c: char| !c.is_ascii_digit()).collect();
    let mo: u32 = parts[0].parse().ok()?;
    let y: i32 = parts[1].parse().ok()?;
    (1..=12).contains(&mo).then_some((TokenKind::Date, TokenValue::Date { y, m: mo, d: 0 }))
}

fn parse_ssn(m: &str) -> Option<(TokenKind, TokenValue)> {
    Some((TokenKind::Ssn, TokenValue::Text(m.to_string())))
}

fn parse_telno(m: &str) -> Option<(TokenKind, TokenValue)> {
    // A `ddd-dddd` run is only a phone number if its leading digit is in the
    // known telephone-prefix set; otherwise it's some other kind of
    // grouped-digit identifier.
    let prefix = m.chars().next()?;
    if tables::TELNO_PREFIXES.contains(&prefix) {
        Some((
            TokenKind::Telno,
            TokenValue::Telno { number: m.to_string(), country_code: "354".to_string() },
        ))
    } else {
        Some((TokenKind::Serialnumber, TokenValue::Text(m.to_string())))
    }
}

/// A bare 7-digit run, normalized to `ddd-dddd` — spec §4.3 rule 20. Only a
/// phone number if its leading digit is in the telephone-prefix set,
/// otherwise it falls through to a plain integer reading.
fn parse_telno_7digit(m: &str) -> Option<(TokenKind, TokenValue)> {
    let prefix = m.chars().next()?;
    if !tables::TELNO_PREFIXES.contains(&prefix) {
        return None;
    }
    let normalized = format!("{}-{}", &m[..3], &m[3..]);
    Some((TokenKind::Telno, TokenValue::Telno { number: normalized, country_code: "354".to_string() }))
}

fn parse_serial_multi(m: &str) -> Option<(TokenKind, TokenValue)> {
    Some((TokenKind::Serialnumber, TokenValue::Text(m.to_string())))
}

fn parse_year(m: &str) -> Option<(TokenKind, TokenValue)> {
    let y: i32 = m.parse().ok()?;
    tables::YEAR_RANGE.contains(&y).then_some((TokenKind::Year, TokenValue::Year(y)))
}

fn parse_percent(m: &str) -> Option<(TokenKind, TokenValue)> {
    let (num_part, sign) = if let Some(stripped) = m.strip_suffix('‰') {
        (stripped, '‰')
    } else {
        (m.strip_suffix('%')?, '%')
    };
    let n: f64 = num_part.replace(',', ".").parse().ok()?;
    let n = if sign == '‰' { n * 0.1 } else { n };
    Some((TokenKind::Percent, TokenValue::Percent { n, cases: None, genders: None }))
}

fn parse_real_is(m: &str) -> Option<(TokenKind, TokenValue)> {
    let n = parse_icelandic_number(m)?;
    Some((TokenKind::Number, TokenValue::Number { n, cases: None, genders: None }))
}

fn parse_real_en(m: &str) -> Option<(TokenKind, TokenValue)> {
    let n = parse_english_number(m)?;
    Some((TokenKind::Number, TokenValue::Number { n, cases: None, genders: None }))
}

/// Number directly glued to a unit/currency abbreviation (Icelandic
/// numeral style) — spec §4.3 rule 9.
fn parse_num_unit_is(m: &str) -> Option<(TokenKind, TokenValue)> {
    let (num, unit) = split_number_and_unit(m);
    let n = parse_icelandic_number(num)?;
    dispatch_unit(n, unit)
}

/// As above, English numeral style — spec §4.3 rule 10.
fn parse_num_unit_en(m: &str) -> Option<(TokenKind, TokenValue)> {
    let (num, unit) = split_number_and_unit(m);
    let n = parse_english_number(num)?;
    dispatch_unit(n, unit)
}

/// Digit run plus a vulgar-fraction glyph plus a unit — spec §4.3 rule 11.
fn parse_digits_vulgar_unit(m: &str) -> Option<(TokenKind, TokenValue)> {
    let frac_pos = m.find(|c: char| tables::VULGAR_FRACTIONS.contains_key(&c))?;
    let int_part: i64 = m[..frac_pos].parse().ok()?;
    let frac_char = m[frac_pos..].chars().next()?;
    let frac_value = *tables::VULGAR_FRACTIONS.get(&frac_char)?;
    let unit_start = frac_pos + frac_char.len_utf8();
    let unit = &m[unit_start..];
    dispatch_unit(int_part as f64 + frac_value, unit)
}

/// Digit run plus a vulgar-fraction glyph, no unit — spec §4.3 rule 12.
fn parse_digits_vulgar(m: &str) -> Option<(TokenKind, TokenValue)> {
    let frac_pos = m.find(|c: char| tables::VULGAR_FRACTIONS.contains_key(&c))?;
    let int_part: i64 = m[..frac_pos].parse().ok()?;
    let frac_char = m[frac_pos..].chars().next()?;
    let frac_value = *tables::VULGAR_FRACTIONS.get(&frac_char)?;
    Some((TokenKind::Number, TokenValue::Number { n: int_part as f64 + frac_value, cases: None, genders: None }))
}

/// `d/d`: a small fraction if both sides are small (spec's example:
/// numerator `<=5`, denominator `<=6`), otherwise a relative date under the
/// same day/month-swap convention as [`parse_date_dmy`] — spec §4.3 rule 15.
fn parse_fraction_or_date(m: &str) -> Option<(TokenKind, TokenValue)> {
    let parts: Vec<&str> = m.split('/').collect();
    let a: u32 = parts[0].parse().ok()?;
    let b: u32 = parts[1].parse().ok()?;
    if a <= 5 && b <= 6 {
        Some((TokenKind::Number, TokenValue::Number { n: a as f64 / b as f64, cases: None, genders: None }))
    } else {
        let mut d = a;
        let mut mo = b;
        if mo > 12 && d <= 12 {
            core::mem::swap(&mut d, &mut mo);
        }
        tables::is_valid_date(2000, mo, d).then_some((TokenKind::Date, TokenValue::Date { y: 0, m: mo, d }))
    }
}

fn parse_ordinal_multi_dot(m: &str) -> Option<(TokenKind, TokenValue)> {
    let digits: String = m.chars().filter(|c| *c != '.').collect();
    let n: i64 = digits.parse().ok()?;
    Some((TokenKind::Ordinal, TokenValue::Ordinal(n)))
}

/// `\d+[a-zA-Z]`, rejecting the cases where the trailing letter is actually
/// a known single-letter SI unit (spec §4.3 rule 8) — those are left for
/// [`NUM_UNIT_IS`]/[`NUM_UNIT_EN`] (tried earlier in [`PATTERNS`]) or a
/// plain integer reading to claim instead.
fn parse_numwletter(m: &str) -> Option<(TokenKind, TokenValue)> {
    let letter = m.chars().last()?;
    let digits = &m[..m.len() - letter.len_utf8()];
    if tables::SI_UNITS_SET.contains(letter.to_string().as_str()) {
        return None;
    }
    let n: i64 = digits.parse().ok()?;
    Some((TokenKind::Numwletter, TokenValue::NumWithLetter { n, letter }))
}

fn parse_integer_grouped(m: &str) -> Option<(TokenKind, TokenValue)> {
    let n: f64 = m.replace('.', "").parse().ok()?;
    Some((TokenKind::Number, TokenValue::Number { n, cases: None, genders: None }))
}

fn parse_integer(m: &str) -> Option<(TokenKind, TokenValue)> {
    let n: f64 = m.parse().ok()?;
    Some((TokenKind::Number, TokenValue::Number { n, cases: None, genders: None }))
}

/// Patterns tried in order, first match wins, following spec §4.3's
/// numbered rule list (1 through 23) directly: times and dates (rules
/// 1-7), `NUMWLETTER` (rule 8) ahead of the unit-glued number forms it
/// would otherwise be swallowed by (rules 9-12), the two real-number
/// families (rule 13 Icelandic-styled, rule 14 plain grouped integer),
/// the small-fraction/relative-date ambiguity and bare years (rules
/// 15-16), SSN/TELNO/serial-number/7-digit-TELNO (rules 17-20), the
/// multi-dot ordinal (rule 21), and finally plain integers (rule 23).
///
/// One deliberate deviation from the literal rule order: the English-styled
/// real-number patterns (`REAL_EN`/`REAL_SIMPLE_EN`, rule 22) are tried
/// here well before [`YEAR`] (rule 16), not after it. `YEAR`'s `\d{4}(?!\d)`
/// only checks that a *digit* doesn't follow the four-digit run — a `.`
/// passes that lookahead — so trying it before the decimal-number patterns
/// would truncate `"1994.5"` into a bare `YEAR(1994)` plus a stray `".5"`.
/// The same reasoning keeps rules 8-14 (all unit/fraction/real forms) ahead
/// of `YEAR` too, which already matches their rule numbers.
static PATTERNS: &[DigitPattern] = &[
    DigitPattern { regex: &TIME_MS, build: parse_time_ms, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &TIME, build: parse_time, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &DATE_ISO, build: parse_date_iso, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &DATE_DMY, build: parse_date_dmy, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &DATE_REL_DM, build: parse_date_rel_dm, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &DATE_REL_MY, build: parse_date_rel_my, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &NUMWLETTER, build: parse_numwletter, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &NUM_UNIT_IS, build: parse_num_unit_is, style: NumberStyle::Icelandic },
    DigitPattern { regex: &PERCENT, build: parse_percent, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &NUM_UNIT_EN, build: parse_num_unit_en, style: NumberStyle::English },
    DigitPattern { regex: &DIGITS_VULGAR_UNIT, build: parse_digits_vulgar_unit, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &DIGITS_VULGAR, build: parse_digits_vulgar, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &REAL_IS, build: parse_real_is, style: NumberStyle::Icelandic },
    DigitPattern { regex: &REAL_SIMPLE_IS, build: parse_real_is, style: NumberStyle::Icelandic },
    DigitPattern { regex: &REAL_EN, build: parse_real_en, style: NumberStyle::English },
    DigitPattern { regex: &REAL_SIMPLE_EN, build: parse_real_en, style: NumberStyle::English },
    DigitPattern { regex: &INTEGER_GROUPED, build: parse_integer_grouped, style: NumberStyle::Icelandic },
    DigitPattern { regex: &FRACTION_OR_DATE, build: parse_fraction_or_date, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &YEAR, build: parse_year, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &SSN, build: parse_ssn, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &TELNO, build: parse_telno, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &SERIAL_MULTI, build: parse_serial_multi, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &TELNO_7DIGIT, build: parse_telno_7digit, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &ORDINAL_MULTI_DOT, build: parse_ordinal_multi_dot, style: NumberStyle::NotApplicable },
    DigitPattern { regex: &INTEGER, build: parse_integer, style: NumberStyle::NotApplicable },
];

/// Rewrite an English-formatted numeric prefix of `tok.text` (comma
/// thousands, dot decimal) to Icelandic style (dot thousands, comma
/// decimal), via the three-step swap-through-a-placeholder spec §4.3 rule
/// 10 calls for (so `,` and `.` don't alias mid-rewrite): `,` → `\0` → `.` →
/// `,` → `\0` → `.`.
fn convert_number_prefix_to_icelandic(
    tok: &mut Token,
    number_len: usize,
) {
    const PLACEHOLDER: char = '\u{0}';
    let rest = tok.text.chars().skip(number_len).collect::<String>();
    let mut head = Token::untracked(TokenKind::Raw, tok.text.chars().take(number_len).collect::<String>(), TokenValue::None);
    head.substitute_all(',', &PLACEHOLDER.to_string()).expect("placeholder swap is one character");
    head.substitute_all('.', ",").expect("placeholder swap is one character");
    head.substitute_all(PLACEHOLDER, ".").expect("placeholder swap is one character");
    tok.text = format!("{}{}", head.text, rest);
}

/// Try every pattern in order against the start of `raw`'s text. On a match
/// that also passes its semantic validation (`build` returning `Some`),
/// splits `raw` into `(matched, remainder)`. Returns `None` (handing `raw`
/// back unchanged) when nothing matches or every match fails validation —
/// the Primary Tokenizer then falls back to word/punctuation handling.
pub fn parse_leading_digits(
    raw: Token,
    options: &TokenizerOptions,
) -> Result<(Token, Token), Token> {
    for pattern in PATTERNS {
        if let Ok(Some(m)) = pattern.regex.find(&raw.text) {
            if m.start() == 0 {
                if let Some((kind, value)) = (pattern.build)(m.as_str()) {
                    let split_at = raw.text[..m.end()].chars().count();
                    let (mut matched, remainder) = raw.split(split_at as isize);
                    matched.kind = kind;
                    matched.value = value;
                    if pattern.style == NumberStyle::English && options.convert_numbers {
                        let (num, _unit) = split_number_and_unit(m.as_str());
                        convert_number_prefix_to_icelandic(&mut matched, num.chars().count());
                    }
                    return Ok((matched, remainder));
                }
            }
        }
    }
    Err(raw)
}
