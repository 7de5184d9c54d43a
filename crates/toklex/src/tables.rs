//! # Domain Constant Tables
//!
//! Spec §1 places "the configuration tables of domain constants (month
//! names, currency codes, SI units, Roman numerals, punctuation classes)"
//! out of scope, treating them as an external collaborator. The pipeline
//! cannot run without *some* table, though, so this module carries a small,
//! explicitly-illustrative built-in set — enough to exercise and test the
//! pipeline end-to-end — grounded 1:1 on the identifiers the reference
//! implementation imports from its own (unfiltered) `definitions` module:
//! `MONTHS`, `SI_UNITS`, `CURRENCY_SYMBOLS`, `CURRENCY_ABBREV`,
//! `TELNO_PREFIXES`, `MULTIPLIERS`, `BCE`, `CE_BCE`, `CLOCK_ABBREVS`,
//! `AMOUNT_ABBREV`, `ISK_AMOUNT_PRECEDING`, `PERCENTAGES`,
//! `AMBIGUOUS_MONTH_NAMES`, `MONTH_BLACKLIST`, `DAYS_IN_MONTH`.
//!
//! A consumer embedding `toklex` in a production system is expected to
//! supply a fuller table (e.g. via [`AbbreviationTable`]); nothing here is
//! meant to be linguistically exhaustive.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Days in each month (`1..=12`), ignoring leap years — matches the
/// reference implementation, which validates `is_valid_date` against a
/// fixed 28-day February rather than computing leap years.
pub const DAYS_IN_MONTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// `is_valid_date`: year in `1776..=2100`, month `1..=12`, day within
/// `DAYS_IN_MONTH[month]`.
pub fn is_valid_date(
    y: i32,
    m: u32,
    d: u32,
) -> bool {
    (1776..=2100).contains(&y) && (1..=12).contains(&m) && d >= 1 && d <= DAYS_IN_MONTH[m as usize]
}

/// Year bounds a bare 4-digit run must fall within to be read as a `YEAR`.
pub const YEAR_RANGE: core::ops::RangeInclusive<i32> = 1776..=2100;

/// Leading digits that may plausibly open an Icelandic telephone number.
pub static TELNO_PREFIXES: Lazy<HashSet<char>> =
    Lazy::new(|| "45678".chars().collect());

/// Words (lowercase) that introduce a year when directly followed by a
/// `YEAR`/`NUMBER` (`"árið 1944"`).
pub static YEAR_WORD: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["árið", "árinu"].into_iter().collect());

/// Month-name stems (lowercase) to their 1-based month number.
pub static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    [
        ("janúar", 1),
        ("febrúar", 2),
        ("mars", 3),
        ("apríl", 4),
        ("maí", 5),
        ("júní", 6),
        ("júlí", 7),
        ("ágúst", 8),
        ("september", 9),
        ("október", 10),
        ("nóvember", 11),
        ("desember", 12),
    ]
    .into_iter()
    .collect()
});

/// Month names that are too ambiguous with common words to be read as a
/// standalone relative date (e.g. `"mars"` the planet/name vs. March).
pub static AMBIGUOUS_MONTH_NAMES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["mars", "maí"].into_iter().collect());

/// Month names that are blacklisted unless they directly follow an
/// ordinal/number (e.g. `"Ágúst"` is a common given name).
pub static MONTH_BLACKLIST: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["ágúst"].into_iter().collect());

/// SI / non-SI units recognized by the Digit Parser, mapped to a
/// canonical unit string and a linear scale factor applied to the parsed
/// number. `%`/`‰` are modeled here too since they share the "number
/// followed by unit" grammar.
pub static SI_UNITS: Lazy<HashMap<&'static str, (&'static str, f64)>> = Lazy::new(|| {
    [
        ("m", ("m", 1.0)),
        ("cm", ("cm", 1.0)),
        ("mm", ("mm", 1.0)),
        ("km", ("km", 1.0)),
        ("g", ("g", 1.0)),
        ("kg", ("kg", 1.0)),
        ("mg", ("mg", 1.0)),
        ("l", ("l", 1.0)),
        ("ml", ("ml", 1.0)),
        ("V", ("V", 1.0)),
        ("A", ("A", 1.0)),
        ("W", ("W", 1.0)),
        ("Hz", ("Hz", 1.0)),
        ("klst", ("klst", 1.0)),
        ("%", ("%", 1.0)),
        ("‰", ("‰", 0.1)),
    ]
    .into_iter()
    .collect()
});

/// The subset of [`SI_UNITS`] keys that are single ASCII/Unicode letters —
/// used to reject the `\d+[a-zA-Z]` "number with letter" pattern when the
/// trailing letter is actually a unit (spec §4.3 rule 8).
pub static SI_UNITS_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SI_UNITS.keys().copied().collect());

/// Currency symbols (single glyphs) to their ISO 4217 code.
pub static CURRENCY_SYMBOLS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [("$", "USD"), ("€", "EUR"), ("£", "GBP"), ("¥", "JPY"), ("kr", "ISK")]
        .into_iter()
        .collect()
});

/// Three-letter currency abbreviations recognized as a `CURRENCY` word.
pub static CURRENCY_ABBREV: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["ISK", "USD", "EUR", "GBP", "JPY", "DKK", "NOK", "SEK"]
        .into_iter()
        .collect()
});

/// Words that precede a number to form an ISK amount (`"kr."`, `"krónur"`).
pub static ISK_AMOUNT_PRECEDING: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["kr.", "kr", "krónur", "krónum"].into_iter().collect());

/// Abbreviations for ISK amount magnitudes (`"þús."` = thousands).
pub static AMOUNT_ABBREV: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [("þús.", 1_000.0), ("millj.", 1_000_000.0), ("ma.", 1_000_000_000.0)]
        .into_iter()
        .collect()
});

/// Spelled-out number multipliers (stem, lowercase) to their value.
pub static MULTIPLIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("hundrað", 100.0),
        ("þúsund", 1_000.0),
        ("milljón", 1_000_000.0),
        ("milljarður", 1_000_000_000.0),
        ("átta", 8.0),
        ("níu", 9.0),
        ("tíu", 10.0),
    ]
    .into_iter()
    .collect()
});

/// Words denoting spelled-out percentages, gated by
/// [`crate::TokenizerOptions::coalesce_percent`].
pub static PERCENTAGES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["prósent", "prósentustig", "hundraðshluta"].into_iter().collect());

/// Words introducing "klukkan"/"kl." clock-time coalescing.
pub static CLOCK_ABBREVS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["kl.", "klukkan"].into_iter().collect());

/// Half-past clock-numeral words (`"hálftólf"` = 11:30) to `(h, m)`.
pub static HALF_PAST: Lazy<HashMap<&'static str, (u32, u32)>> = Lazy::new(|| {
    [
        ("hálfeitt", (0, 30)),
        ("hálftvö", (1, 30)),
        ("hálfþrjú", (2, 30)),
        ("hálffjögur", (3, 30)),
        ("hálffimm", (4, 30)),
        ("hálfsex", (5, 30)),
        ("hálfsjö", (6, 30)),
        ("hálfátta", (7, 30)),
        ("hálfníu", (8, 30)),
        ("hálftíu", (9, 30)),
        ("hálfellefu", (10, 30)),
        ("hálftólf", (11, 30)),
    ]
    .into_iter()
    .collect()
});

/// Clock numeral words (`"átta"` = 8 o'clock) to the hour they name.
pub static CLOCK_NUMERALS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    [
        ("eitt", 1),
        ("tvö", 2),
        ("þrjú", 3),
        ("fjögur", 4),
        ("fimm", 5),
        ("sex", 6),
        ("sjö", 7),
        ("átta", 8),
        ("níu", 9),
        ("tíu", 10),
        ("ellefu", 11),
        ("tólf", 12),
    ]
    .into_iter()
    .collect()
});

/// BCE ("f.Kr.") markers.
pub static BCE: Lazy<HashSet<&'static str>> = Lazy::new(|| ["f.Kr."].into_iter().collect());

/// CE ("e.Kr.") markers.
pub static CE: Lazy<HashSet<&'static str>> = Lazy::new(|| ["e.Kr."].into_iter().collect());

/// The union of [`BCE`] and [`CE`], used for the single-lookup membership
/// test before distinguishing sign.
pub static CE_BCE: Lazy<HashSet<&'static str>> =
    Lazy::new(|| BCE.iter().chain(CE.iter()).copied().collect());

/// Unicode vulgar-fraction glyphs to their numeric value (spec §4.3 rules
/// 11/12).
pub static VULGAR_FRACTIONS: Lazy<HashMap<char, f64>> = Lazy::new(|| {
    [
        ('¼', 0.25),
        ('½', 0.5),
        ('¾', 0.75),
        ('⅓', 1.0 / 3.0),
        ('⅔', 2.0 / 3.0),
        ('⅕', 0.2),
        ('⅖', 0.4),
        ('⅗', 0.6),
        ('⅘', 0.8),
        ('⅙', 1.0 / 6.0),
        ('⅚', 5.0 / 6.0),
        ('⅛', 0.125),
        ('⅜', 0.375),
        ('⅝', 0.625),
        ('⅞', 0.875),
    ]
    .into_iter()
    .collect()
});

/// Spelled-out Icelandic ordinal words (masculine nominative), keyed by
/// their numeric value — used by [`crate::options::KludgyOrdinals::Modify`]
/// to rewrite a kludgy ordinal (`"1sti"`) to its canonical spelled form
/// (`"fyrsti"`). Covers the range the `KLUDGY_ORDINAL` suffix pattern can
/// actually match (1-20); a value outside that range is left as-is.
pub static KLUDGY_ORDINAL_WORDS: Lazy<HashMap<i64, &'static str>> = Lazy::new(|| {
    [
        (1, "fyrsti"),
        (2, "annar"),
        (3, "þriðji"),
        (4, "fjórði"),
        (5, "fimmti"),
        (6, "sjötti"),
        (7, "sjöundi"),
        (8, "áttundi"),
        (9, "níundi"),
        (10, "tíundi"),
        (11, "ellefti"),
        (12, "tólfti"),
        (13, "þrettándi"),
        (14, "fjórtándi"),
        (15, "fimmtándi"),
        (16, "sextándi"),
        (17, "sautjándi"),
        (18, "átjándi"),
        (19, "nítjándi"),
        (20, "tuttugasti"),
    ]
    .into_iter()
    .collect()
});

/// ISO-3166-ish telephone country-code words recognized by Phrase Pass 1.
pub static COUNTRY_CODES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["354", "45", "46", "47", "1"].into_iter().collect());

/// Roman numeral pattern (`I`, `IV`, `MCMXC`, …), anchored and whole-match.
pub static ROMAN_NUMERAL_PATTERN: &str =
    r"^M{0,4}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$";

static ROMAN_NUMERAL_REGEX: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(ROMAN_NUMERAL_PATTERN).unwrap());

/// Is `s` a (non-empty) Roman numeral?
pub fn is_roman_numeral(s: &str) -> bool {
    !s.is_empty() && ROMAN_NUMERAL_REGEX.is_match(s)
}

/// Per-token abbreviation classification, looked up by the Particle
/// Coalescer (spec §4.5) and Phrase Pass 1 (spec §4.7). Modeled as a trait
/// so a consumer can plug in a fuller dictionary than
/// [`DefaultAbbreviations`] without forking the crate — this is the
/// "abbreviation dictionary loader" spec §1 calls out as an external
/// collaborator.
pub trait AbbreviationTable: Send + Sync {
    /// Is `abbrev` (including its trailing period) a known abbreviation at
    /// all, in either its original or lowercased form?
    fn contains(
        &self,
        abbrev: &str,
    ) -> bool;

    /// Is `word` (without a trailing period) one whose *only* recorded
    /// form requires a single trailing period to be recognized as an
    /// abbreviation? (`Abbreviations.SINGLES` in the reference.)
    fn is_single(
        &self,
        word: &str,
    ) -> bool;

    /// Always absorbs its dot, even directly before what looks like a new
    /// sentence (`Abbreviations.FINISHERS`).
    fn is_finisher(
        &self,
        abbrev_with_dot: &str,
    ) -> bool;

    /// Never absorbs its dot at a sentence boundary
    /// (`Abbreviations.NOT_FINISHERS`).
    fn is_not_finisher(
        &self,
        abbrev_with_dot: &str,
    ) -> bool;

    /// A "name finisher": a following capitalized *person name* should not
    /// by itself indicate a new sentence. Person-name recognition happens
    /// downstream of this pipeline, so this is a known under-approximation
    /// (spec §9) — it only prevents ordinary capitalized words from being
    /// treated as recognized person names here.
    fn is_name_finisher(
        &self,
        abbrev_with_dot: &str,
    ) -> bool;

    /// The meaning list recorded for `abbrev`, if any.
    fn lookup(
        &self,
        abbrev: &str,
    ) -> Option<Vec<&'static str>>;
}

/// A small built-in [`AbbreviationTable`], enough to exercise the pipeline.
/// See the module docs for why this is illustrative, not exhaustive.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAbbreviations;

impl AbbreviationTable for DefaultAbbreviations {
    fn contains(
        &self,
        abbrev: &str,
    ) -> bool {
        ABBREV_DICT.contains_key(abbrev) || ABBREV_DICT.contains_key(abbrev.to_lowercase().as_str())
    }

    fn is_single(
        &self,
        word: &str,
    ) -> bool {
        ABBREV_SINGLES.contains(word) || ABBREV_SINGLES.contains(word.to_lowercase().as_str())
    }

    fn is_finisher(
        &self,
        abbrev_with_dot: &str,
    ) -> bool {
        ABBREV_FINISHERS.contains(abbrev_with_dot)
    }

    fn is_not_finisher(
        &self,
        abbrev_with_dot: &str,
    ) -> bool {
        ABBREV_NOT_FINISHERS.contains(abbrev_with_dot)
            || ABBREV_NOT_FINISHERS.contains(abbrev_with_dot.to_lowercase().as_str())
    }

    fn is_name_finisher(
        &self,
        abbrev_with_dot: &str,
    ) -> bool {
        ABBREV_NAME_FINISHERS.contains(abbrev_with_dot)
    }

    fn lookup(
        &self,
        abbrev: &str,
    ) -> Option<Vec<&'static str>> {
        ABBREV_DICT
            .get(abbrev)
            .or_else(|| ABBREV_DICT.get(abbrev.to_lowercase().as_str()))
            .cloned()
    }
}

/// `t.d.` = "til dæmis" ("for example"), etc. — a small illustrative set.
static ABBREV_DICT: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    [
        ("t.d.", vec!["til dæmis"]),
        ("o.s.frv.", vec!["og svo framvegis"]),
        ("dr.", vec!["doktor"]),
        ("próf.", vec!["prófessor"]),
        ("mín.", vec!["mínúta"]),
        ("gr.", vec!["grein"]),
        ("hr.", vec!["herra"]),
        ("frú.", vec!["frú"]),
        ("nr.", vec!["númer"]),
        ("dags.", vec!["dagsetning"]),
        ("kr.", vec!["króna"]),
    ]
    .into_iter()
    .collect()
});

static ABBREV_SINGLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["t.d", "dr", "próf", "mín", "gr", "hr", "nr", "dags", "kr"]
        .into_iter()
        .collect()
});

static ABBREV_FINISHERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["t.d.", "o.s.frv."].into_iter().collect());

static ABBREV_NOT_FINISHERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["dags.", "próf.", "mín."].into_iter().collect());

static ABBREV_NAME_FINISHERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["próf.", "dr."].into_iter().collect());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date(2024, 2, 28));
        assert!(!is_valid_date(2024, 2, 29));
        assert!(!is_valid_date(1700, 1, 1));
        assert!(!is_valid_date(2024, 13, 1));
    }

    #[test]
    fn test_roman_numeral() {
        assert!(is_roman_numeral("XVII"));
        assert!(is_roman_numeral("IV"));
        assert!(!is_roman_numeral("ABC"));
        assert!(!is_roman_numeral(""));
    }

    #[test]
    fn test_kludgy_ordinal_words() {
        assert_eq!(KLUDGY_ORDINAL_WORDS.get(&1), Some(&"fyrsti"));
        assert_eq!(KLUDGY_ORDINAL_WORDS.get(&3), Some(&"þriðji"));
        assert_eq!(KLUDGY_ORDINAL_WORDS.get(&100), None);
    }

    #[test]
    fn test_month_lookup() {
        assert_eq!(MONTHS.get("september"), Some(&9));
        assert!(AMBIGUOUS_MONTH_NAMES.contains("mars"));
    }

    #[test]
    fn test_default_abbreviations() {
        let table = DefaultAbbreviations;
        assert!(table.contains("t.d."));
        assert!(table.is_single("dr"));
        assert!(table.is_finisher("t.d."));
        assert!(table.is_not_finisher("próf."));
        assert_eq!(table.lookup("dr."), Some(vec!["doktor"]));
    }
}
