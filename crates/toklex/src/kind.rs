//! # Token Kinds and Values
//!
//! [`TokenKind`] is the discriminant described in spec §3/§6; [`TokenValue`]
//! is its accompanying payload. Grammatical case/gender annotations (on
//! `NUMBER`, `PERCENT`, `CURRENCY`, `AMOUNT`) are modeled as bags of
//! `&'static str` labels rather than a closed enum — the actual
//! case/gender/meaning vocabulary belongs to the out-of-scope abbreviation
//! table (spec §1), and inventing a closed grammar here would cross into
//! the "morphological analysis" Non-goal.

use strum::Display;

/// The discriminant of a [`crate::Token`].
///
/// Structural kinds (`SSplit`, `PBegin`, `PEnd`, `SBegin`, `SEnd`, `XEnd`)
/// never carry a meaning-bearing `TokenValue` beyond what's listed below;
/// `Raw` is the rough splitter's placeholder kind and must never survive
/// past the Primary Tokenizer.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Internal carrier only; must never leak from the top-level iterator.
    Raw,
    /// A punctuation mark.
    Punctuation,
    /// `hh:mm:ss`.
    Time,
    /// A date before absolute/relative classification.
    Date,
    /// A date with year, month and day all present.
    Dateabs,
    /// A date missing at least one of year/month/day.
    Daterel,
    /// A signed four-digit year.
    Year,
    /// An integer or real number.
    Number,
    /// A word, which may contain hyphens and apostrophes.
    Word,
    /// A telephone number.
    Telno,
    /// A percentage or promille amount.
    Percent,
    /// A Uniform Resource Locator.
    Url,
    /// An ordinal number, possibly a Roman numeral.
    Ordinal,
    /// A timestamp before absolute/relative classification.
    Timestamp,
    /// A timestamp with year, month and day all present.
    Timestampabs,
    /// A timestamp missing at least one of year/month/day.
    Timestamprel,
    /// A currency sign or ISO code.
    Currency,
    /// An amount: a quantity with a currency code.
    Amount,
    /// An e-mail address.
    Email,
    /// An unrecognized run of characters; forward-progress guard.
    Unknown,
    /// A measured quantity with its unit.
    Measurement,
    /// A number immediately followed by a single trailing letter.
    Numwletter,
    /// An internet domain name.
    Domain,
    /// A `#hashtag`.
    Hashtag,
    /// A chemical formula.
    Molecule,
    /// A social security number ("kennitala").
    Ssn,
    /// A social media `@username`.
    Username,
    /// A serial number.
    Serialnumber,
    /// Sentence-split marker (blank line in the input).
    SSplit,
    /// Paragraph begin marker.
    PBegin,
    /// Paragraph end marker.
    PEnd,
    /// Sentence begin marker.
    SBegin,
    /// Sentence end marker.
    SEnd,
    /// End-of-stream sentinel; filtered out before reaching consumers.
    XEnd,
}

impl TokenKind {
    /// Structural "end" kinds: paragraph/sentence end markers and the
    /// sentence-split marker. Mirrors `TOK.END` in the reference
    /// implementation.
    pub fn is_end_marker(self) -> bool {
        matches!(
            self,
            TokenKind::PEnd | TokenKind::SEnd | TokenKind::XEnd | TokenKind::SSplit
        )
    }

    /// Content kinds eligible to start or end a sentence (`TOK.TEXT`).
    pub fn is_text(self) -> bool {
        matches!(self, TokenKind::Word | TokenKind::Molecule)
    }
}

/// A punctuation mark's rough position class (spec §6 `PUNCTUATION` value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationClass {
    /// Can open a bracketed/quoted run (e.g. `(`, `„`).
    Left,
    /// Can close a bracketed/quoted run (e.g. `)`, `“`).
    Right,
    /// Neither consistently opens nor closes (e.g. `.`, `,`, `-`).
    Center,
    /// A number separator that is ambiguous with punctuation (e.g. `.` as a
    /// thousands separator rather than sentence-final).
    NumberPunct,
}

/// The kind-specific payload of a [`crate::Token`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// No payload (structural tokens, `WORD` with no recognized meaning,
    /// `UNKNOWN`, the Rough Splitter's placeholder value).
    None,

    /// `PUNCTUATION`: the position class and the normalized form.
    Punctuation {
        /// The punctuation's position class.
        class: PunctuationClass,
        /// The normalized representation (may be multiple characters,
        /// e.g. a combined `…?`).
        normalized: String,
    },

    /// `TIME`: hour, minute, second.
    Time {
        /// Hour, `0..24`.
        h: u32,
        /// Minute, `0..60`.
        m: u32,
        /// Second, `0..60`.
        s: u32,
    },

    /// `DATE`/`DATEABS`/`DATEREL`: year, month, day. Zero means
    /// "unspecified" on a relative date.
    Date {
        /// Year, or 0 if unspecified.
        y: i32,
        /// Month `1..=12`, or 0 if unspecified.
        m: u32,
        /// Day of month, or 0 if unspecified.
        d: u32,
    },

    /// `YEAR`: a signed year (negative is BCE).
    Year(i32),

    /// `NUMBER`: the numeric value plus optional grammatical annotations.
    Number {
        /// The numeric value.
        n: f64,
        /// Grammatical cases the surface form is consistent with, if known.
        cases: Option<Vec<&'static str>>,
        /// Grammatical genders the surface form is consistent with, if
        /// known.
        genders: Option<Vec<&'static str>>,
    },

    /// `TELNO`: the normalized `ddd-dddd` number and its country code.
    Telno {
        /// Normalized as `ddd-dddd`.
        number: String,
        /// ISO-ish country calling code, default `"354"`.
        country_code: String,
    },

    /// `PERCENT`: the numeric value plus optional grammatical annotations.
    Percent {
        /// The numeric value (a promille sign scales by `0.1`).
        n: f64,
        /// Grammatical cases, if known.
        cases: Option<Vec<&'static str>>,
        /// Grammatical genders, if known.
        genders: Option<Vec<&'static str>>,
    },

    /// `URL`/`EMAIL`/`DOMAIN`/`HASHTAG`/`SSN`/`MOLECULE`/`SERIALNUMBER`:
    /// text-only payload.
    Text(String),

    /// `ORDINAL`: the integer value.
    Ordinal(i64),

    /// `TIMESTAMP`/`TIMESTAMPABS`/`TIMESTAMPREL`.
    Timestamp {
        /// Year, or 0 if unspecified.
        y: i32,
        /// Month, or 0 if unspecified.
        mo: u32,
        /// Day, or 0 if unspecified.
        d: u32,
        /// Hour.
        h: u32,
        /// Minute.
        m: u32,
        /// Second.
        s: u32,
    },

    /// `CURRENCY`: an ISO code plus optional grammatical annotations.
    Currency {
        /// ISO 4217 currency code.
        iso: String,
        /// Grammatical cases, if known.
        cases: Option<Vec<&'static str>>,
        /// Grammatical genders, if known.
        genders: Option<Vec<&'static str>>,
    },

    /// `AMOUNT`: a quantity with a currency code.
    Amount {
        /// The numeric value.
        n: f64,
        /// ISO 4217 currency code.
        iso: String,
        /// Grammatical cases, if known.
        cases: Option<Vec<&'static str>>,
        /// Grammatical genders, if known.
        genders: Option<Vec<&'static str>>,
    },

    /// `MEASUREMENT`: a unit and its value, post any SI scaling.
    Measurement {
        /// The (possibly canonicalized) unit string.
        unit: String,
        /// The scaled numeric value.
        value: f64,
    },

    /// `NUMWLETTER`: an integer and its trailing letter.
    NumWithLetter {
        /// The integer part.
        n: i64,
        /// The trailing letter.
        letter: char,
    },

    /// `USERNAME`: the bare username, without the leading `@`.
    Username(String),

    /// `WORD`: an optional list of abbreviation meanings.
    Word(Option<Vec<&'static str>>),

    /// `S_BEGIN`: running parse count and, if ambiguous, an error index.
    SentenceBegin {
        /// Number of alternative parses considered (0 if parsing is not
        /// tracked).
        num_parses: u32,
        /// Index of the first parse error, if any.
        err_index: Option<usize>,
    },
}

impl Default for TokenValue {
    fn default() -> Self {
        TokenValue::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_marker_set() {
        assert!(TokenKind::PEnd.is_end_marker());
        assert!(TokenKind::SEnd.is_end_marker());
        assert!(TokenKind::XEnd.is_end_marker());
        assert!(TokenKind::SSplit.is_end_marker());
        assert!(!TokenKind::Word.is_end_marker());
    }

    #[test]
    fn test_text_set() {
        assert!(TokenKind::Word.is_text());
        assert!(TokenKind::Molecule.is_text());
        assert!(!TokenKind::Number.is_text());
    }
}
