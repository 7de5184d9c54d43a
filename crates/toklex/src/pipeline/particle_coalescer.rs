//! # Particle Coalescer
//!
//! Merges short runs of adjacent tokens into a single richer token:
//! currency symbol/code + `NUMBER` → `AMOUNT`, `NUMBER`/`YEAR` + a known SI
//! unit word → `MEASUREMENT` (with a `km` + `/` + `klst` special case, and
//! a further `°` + `C`/`F`/`K` special case producing a temperature
//! `MEASUREMENT`), a relative `DATE` with a trailing dot + `.` (absorbed or
//! split per the sentence-end predicate), a clock-introducing word +
//! `TIME`/`NUMBER` → `TIME` (also a bare clock-numeral word, e.g.
//! `"klukkan átta"`, and the three-token `"klukkan hálf átta"` form looked
//! up in the half-past table), a year-introducing word (`"árið"`) +
//! `YEAR`/`NUMBER` → `YEAR`, a 3-digit `NUMBER` + 4-digit `NUMBER`/`YEAR`
//! with a telephone prefix → `TELNO`, `NUMBER` + `%`/`‰` → `PERCENT`,
//! `NUMBER`/Roman-numeral `WORD` + a bare `.` → `ORDINAL`, and
//! abbreviation-dot absorption (deciding whether a `WORD` immediately
//! followed by `.` should swallow the period as part of the abbreviation,
//! or let it stand as a sentence-ending `PUNCTUATION`). Grounded on
//! `parse_particles` in the reference implementation, including its
//! `could_be_end_of_sentence` heuristic for the abbreviation case.
use crate::kind::{TokenKind, TokenValue};
use crate::options::TokenizerOptions;
use crate::pipeline::lookahead::Lookahead;
use crate::tables::{self, AbbreviationTable};
use crate::token::Token;

fn is_period(t: &Token) -> bool {
    t.kind == TokenKind::Punctuation && t.text == "."
}

/// Mirrors `could_be_end_of_sentence`: a following capitalized word, an
/// end-marker, or end of stream all suggest a new sentence is starting,
/// which argues against silently absorbing the abbreviation's dot.
fn could_be_end_of_sentence(next: Option<&Token>) -> bool {
    match next {
        None => true,
        Some(t) if t.kind.is_end_marker() => true,
        Some(t) if t.kind == TokenKind::Word => {
            t.text.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
        }
        _ => false,
    }
}

/// The ordinal-dot lookahead: don't promote a bare number/Roman numeral +
/// `.` to an `ORDINAL` when what follows the dot looks like the start of a
/// new sentence — an end marker, an opening quote, or an uppercase word that
/// isn't a month name (frequently capitalized itself, e.g. at a sentence
/// start). The dot is left for the sentence segmenter instead.
fn ordinal_dot_rolls_back(next: Option<&Token>) -> bool {
    match next {
        None => true,
        Some(t) if t.kind.is_end_marker() => true,
        Some(t) if t.kind == TokenKind::Punctuation && matches!(t.text.as_str(), "„" | "\"") => true,
        Some(t) if t.kind == TokenKind::Word => {
            t.text.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
                && !tables::MONTHS.contains_key(t.text.to_lowercase().as_str())
        }
        _ => false,
    }
}

/// The Particle Coalescer stage.
pub struct ParticleCoalescer<'a, I: Iterator<Item = Token>> {
    upstream: Lookahead<I>,
    abbrevs: &'a dyn AbbreviationTable,
    options: &'a TokenizerOptions,
}

impl<'a, I: Iterator<Item = Token>> ParticleCoalescer<'a, I> {
    /// Wrap a primary-tokenizer (or compatible) upstream iterator.
    pub fn new(
        upstream: I,
        abbrevs: &'a dyn AbbreviationTable,
        options: &'a TokenizerOptions,
    ) -> Self {
        Self { upstream: Lookahead::new(upstream), abbrevs, options }
    }

    /// Spec §4.5: "Relative DATE with trailing dot + `.` + possible
    /// sentence end". A relative `DATE` (at least one of year/month/day
    /// unspecified — full classification into `DATEABS`/`DATEREL` doesn't
    /// happen until the Date/Time Pass) whose working text already ends in
    /// a dot (`"25.9."`) can itself end a sentence; if what follows the
    /// next `.` could plausibly start a new one, the dot is left standing
    /// as its own `PUNCTUATION` rather than being absorbed into the date.
    fn try_daterel_dot(
        &mut self,
        date: Token,
    ) -> Token {
        let (y, m, d) = match &date.value {
            TokenValue::Date { y, m, d } => (*y, *m, *d),
            _ => return date,
        };
        let is_relative = y == 0 || m == 0 || d == 0;
        if !is_relative || !date.text.contains('.') {
            return date;
        }
        match self.upstream.peek() {
            Some(next) if is_period(next) => {
                let after_dot = self.upstream.peek_at(1).cloned();
                if could_be_end_of_sentence(after_dot.as_ref()) {
                    return date;
                }
                let next = self.upstream.advance().unwrap();
                date.concatenate(next, "")
            }
            _ => date,
        }
    }

    /// Spec §4.5: `"árið"`/year-word + `YEAR`/`NUMBER` → `YEAR`.
    fn try_year_word(
        &mut self,
        word: Token,
    ) -> Option<Token> {
        if !tables::YEAR_WORD.contains(word.text.to_lowercase().as_str()) {
            return None;
        }
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Year || next.kind == TokenKind::Number => {
                let next = self.upstream.advance().unwrap();
                let y = match &next.value {
                    TokenValue::Year(y) => *y,
                    TokenValue::Number { n, .. } => *n as i32,
                    _ => return Some(word),
                };
                let mut year = word.concatenate(next, " ");
                year.kind = TokenKind::Year;
                year.value = TokenValue::Year(y);
                Some(year)
            }
            _ => Some(word),
        }
    }

    /// Spec §4.5: a 3-digit `NUMBER` directly followed by a 4-digit
    /// `NUMBER`/`YEAR`, with the 3-digit group starting with a telephone
    /// prefix digit, coalesces into a `TELNO`. Distinct from Phrase Pass
    /// 1's country-code + `TELNO` merge, which folds a recognized ISO
    /// calling-code prefix onto an *already-built* `TELNO`.
    fn try_telno(
        &mut self,
        number: Token,
    ) -> Token {
        let is_three_digits = number.text.len() == 3 && number.text.chars().all(|c| c.is_ascii_digit());
        let starts_with_prefix = number
            .text
            .chars()
            .next()
            .map(|c| tables::TELNO_PREFIXES.contains(&c))
            .unwrap_or(false);
        if !is_three_digits || !starts_with_prefix {
            return number;
        }
        let is_four_digits = |t: &Token| {
            (t.kind == TokenKind::Number || t.kind == TokenKind::Year) && t.text.len() == 4 && t.text.chars().all(|c| c.is_ascii_digit())
        };
        match self.upstream.peek() {
            Some(next) if is_four_digits(next) => {
                let next = self.upstream.advance().unwrap();
                let telno_digits = format!("{}-{}", number.text, next.text);
                let mut telno = number.concatenate(next, " ");
                telno.kind = TokenKind::Telno;
                telno.value = TokenValue::Telno { number: telno_digits, country_code: "354".to_string() };
                telno
            }
            _ => number,
        }
    }

    /// Spec §4.5: `NUMBER` + `%`/`‰` as two already-separate tokens →
    /// `PERCENT` (promille scaled by `0.1`). Distinct from the Digit
    /// Parser's glued `<number>%` pattern, which never splits the unit off
    /// in the first place.
    fn try_percent(
        &mut self,
        number: Token,
    ) -> Token {
        let n = match &number.value {
            TokenValue::Number { n, .. } => *n,
            _ => return number,
        };
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Punctuation && matches!(next.text.as_str(), "%" | "‰") => {
                let factor = if next.text == "%" { 1.0 } else { 0.1 };
                let next = self.upstream.advance().unwrap();
                let mut percent = number.concatenate(next, "");
                percent.kind = TokenKind::Percent;
                percent.value = TokenValue::Percent { n: n * factor, cases: None, genders: None };
                percent
            }
            _ => number,
        }
    }

    /// Spec §4.5: "MEASUREMENT with unit `°` + `C`/`F`/`K` word → temperature
    /// MEASUREMENT (optionally converting to Kelvin when
    /// `convert_measurements`)". A bare `NUMBER`/`YEAR` followed by a `°`
    /// punctuation token and then one of the three degree-scale letters
    /// folds directly into a temperature `MEASUREMENT` in one step, since
    /// this crate's SI-unit table never produces an intermediate bare-`°`
    /// measurement of its own.
    fn try_temperature(
        &mut self,
        number: Token,
    ) -> Token {
        let n = match &number.value {
            TokenValue::Number { n, .. } => *n,
            TokenValue::Year(y) => *y as f64,
            _ => return number,
        };
        let is_degree = matches!(self.upstream.peek(), Some(t) if t.kind == TokenKind::Punctuation && t.text == "°");
        if !is_degree {
            return number;
        }
        let scale_letter = match self.upstream.peek_at(1) {
            Some(t) if t.kind == TokenKind::Word && matches!(t.text.as_str(), "C" | "F" | "K") => t.text.clone(),
            _ => return number,
        };
        let degree = self.upstream.advance().unwrap();
        let letter = self.upstream.advance().unwrap();
        let merged = number.concatenate(degree, "").concatenate(letter, " ");
        let (unit, value) = if self.options.convert_measurements {
            ("K".to_string(), to_kelvin(&scale_letter, n))
        } else {
            (format!("°{scale_letter}"), n)
        };
        let mut m = merged;
        m.kind = TokenKind::Measurement;
        m.value = TokenValue::Measurement { unit, value };
        m
    }

    fn try_currency_amount(
        &mut self,
        currency: Token,
    ) -> Token {
        let iso = match &currency.value {
            TokenValue::Currency { iso, .. } => iso.clone(),
            _ => return currency,
        };
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Number => {
                let next = self.upstream.advance().unwrap();
                let n = match &next.value {
                    TokenValue::Number { n, .. } => *n,
                    _ => 0.0,
                };
                let mut amount = currency.concatenate(next, "");
                amount.kind = TokenKind::Amount;
                amount.value = TokenValue::Amount { n, iso, cases: None, genders: None };
                amount
            }
            _ => currency,
        }
    }

    fn try_number_amount_currency(
        &mut self,
        number: Token,
    ) -> Token {
        let n = match &number.value {
            TokenValue::Number { n, .. } => *n,
            _ => return number,
        };
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Currency => {
                let next = self.upstream.advance().unwrap();
                let iso = match &next.value {
                    TokenValue::Currency { iso, .. } => iso.clone(),
                    _ => return number,
                };
                let mut amount = number.concatenate(next, "");
                amount.kind = TokenKind::Amount;
                amount.value = TokenValue::Amount { n, iso, cases: None, genders: None };
                amount
            }
            _ => number,
        }
    }

    fn try_measurement(
        &mut self,
        number: Token,
    ) -> Token {
        let n = match &number.value {
            TokenValue::Number { n, .. } => *n,
            TokenValue::Year(y) => *y as f64,
            _ => return number,
        };
        let unit_word = match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Word => next.text.clone(),
            _ => return number,
        };
        match tables::SI_UNITS.get(unit_word.as_str()) {
            Some((canonical, scale)) => {
                let next = self.upstream.advance().unwrap();
                let mut m = number.concatenate(next, " ");
                m.kind = TokenKind::Measurement;
                m.value = TokenValue::Measurement { unit: canonical.to_string(), value: n * scale };
                if *canonical == "km" {
                    m = self.try_km_per_klst(m);
                }
                m
            }
            None => number,
        }
    }

    /// Spec §4.5: "special case `km` + `/` + `klst` → `km/klst`". Only
    /// called once [`Self::try_measurement`] has already built a `km`
    /// `MEASUREMENT`; rolls the `/` and `klst` tokens into it when present,
    /// otherwise returns the `km` measurement unchanged.
    fn try_km_per_klst(
        &mut self,
        km: Token,
    ) -> Token {
        let value = match &km.value {
            TokenValue::Measurement { value, .. } => *value,
            _ => return km,
        };
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Punctuation && next.text == "/" => {}
            _ => return km,
        }
        match self.upstream.peek_at(1) {
            Some(next) if next.kind == TokenKind::Word && next.text == "klst" => {}
            _ => return km,
        }
        let slash = self.upstream.advance().unwrap();
        let klst = self.upstream.advance().unwrap();
        let mut merged = km.concatenate(slash, "").concatenate(klst, "");
        merged.kind = TokenKind::Measurement;
        merged.value = TokenValue::Measurement { unit: "km/klst".to_string(), value };
        merged
    }

    /// A bare `NUMBER` directly followed by `.` is an ordinal, unless the
    /// number's working text already has an embedded `.`/`,` (a decimal or
    /// grouped integer, not a candidate for ordinal promotion at all) or the
    /// dot would roll back per [`ordinal_dot_rolls_back`]. In practice the
    /// digit parser (spec §4.3) already claims `\d+\.` as `ORDINAL` at the
    /// source, so this mostly fires for a `NUMBER` produced by an upstream
    /// merge (e.g. a grouped integer) that still has a detached period token
    /// next to it.
    fn try_ordinal_dot(
        &mut self,
        number: Token,
    ) -> Token {
        let n = match &number.value {
            TokenValue::Number { n, .. } => *n as i64,
            _ => return number,
        };
        if number.text.contains('.') || number.text.contains(',') {
            return number;
        }
        match self.upstream.peek() {
            Some(next) if is_period(next) => {
                let after_dot = self.upstream.peek_at(1).cloned();
                if ordinal_dot_rolls_back(after_dot.as_ref()) {
                    return number;
                }
                let next = self.upstream.advance().unwrap();
                let mut ord = number.concatenate(next, "");
                ord.kind = TokenKind::Ordinal;
                ord.value = TokenValue::Ordinal(n);
                ord
            }
            _ => number,
        }
    }

    fn try_roman_ordinal(
        &mut self,
        word: Token,
    ) -> Token {
        if !tables::is_roman_numeral(&word.text) || self.abbrevs.contains(&format!("{}.", word.text)) {
            return word;
        }
        match self.upstream.peek() {
            Some(next) if is_period(next) => {
                let after_dot = self.upstream.peek_at(1).cloned();
                if ordinal_dot_rolls_back(after_dot.as_ref()) {
                    return word;
                }
                let next = self.upstream.advance().unwrap();
                let mut ord = word.concatenate(next, "");
                ord.kind = TokenKind::Ordinal;
                ord.value = TokenValue::Ordinal(roman_to_int(&ord.text[..ord.text.len() - 1]));
                ord
            }
            _ => word,
        }
    }

    /// Absorb a trailing `.` into a known-abbreviation `WORD`, unless the
    /// abbreviation is a `FINISHERS` or `NOT_FINISHERS` entry and the
    /// following token could plausibly start a new sentence — in which case
    /// the dot is left for the sentence segmenter to consume as its own
    /// `PUNCTUATION` token, rather than being swallowed into the
    /// abbreviation. The two sets only differ in whether the split-off word
    /// still carries the abbreviation's looked-up meaning (`FINISHERS`) or
    /// none at all (`NOT_FINISHERS`) — both split on the same predicate.
    fn try_abbreviation_dot(
        &mut self,
        word: Token,
    ) -> Token {
        let candidate = format!("{}.", word.text);
        if !self.abbrevs.contains(&candidate) && !self.abbrevs.is_single(&word.text) {
            return word;
        }
        match self.upstream.peek() {
            Some(next) if is_period(next) => {}
            _ => return word,
        }

        let is_finisher = self.abbrevs.is_finisher(&candidate);
        let is_not_finisher = self.abbrevs.is_not_finisher(&candidate);
        if is_finisher || is_not_finisher {
            let after_dot = self.upstream.peek_at(1).cloned();
            let at_sentence_end = could_be_end_of_sentence(after_dot.as_ref())
                && !self.abbrevs.is_name_finisher(&candidate);
            if at_sentence_end {
                // Leave the period in the upstream queue for the next pull;
                // only attach the abbreviation's meaning for FINISHERS.
                let mut w = word;
                if is_finisher {
                    w.value = TokenValue::Word(self.abbrevs.lookup(&candidate));
                }
                return w;
            }
        }

        let period = self.upstream.advance().unwrap();
        log::trace!("absorbing abbreviation dot into {candidate:?}");
        let meanings = self.abbrevs.lookup(&candidate);
        let mut merged = word.concatenate(period, "");
        merged.kind = TokenKind::Word;
        merged.value = TokenValue::Word(meanings);
        merged
    }

    fn try_clock_word(
        &mut self,
        word: Token,
    ) -> Option<Token> {
        if !tables::CLOCK_ABBREVS.contains(word.text.as_str()) {
            return None;
        }
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Time || next.kind == TokenKind::Number => {
                let next = self.upstream.advance().unwrap();
                let (h, m, s) = match &next.value {
                    TokenValue::Time { h, m, s } => (*h, *m, *s),
                    TokenValue::Number { n, .. } => (*n as u32, 0, 0),
                    _ => return Some(word),
                };
                let mut time = word.concatenate(next, " ");
                time.kind = TokenKind::Time;
                time.value = TokenValue::Time { h, m, s };
                Some(time)
            }
            // "klukkan átta" / "kl. átta": clock-word directly followed by a
            // bare clock-numeral word.
            Some(next) if next.kind == TokenKind::Word && tables::CLOCK_NUMERALS.contains_key(next.text.to_lowercase().as_str()) => {
                let next = self.upstream.advance().unwrap();
                let h = tables::CLOCK_NUMERALS[next.text.to_lowercase().as_str()];
                let mut time = word.concatenate(next, " ");
                time.kind = TokenKind::Time;
                time.value = TokenValue::Time { h, m: 0, s: 0 };
                Some(time)
            }
            // "klukkan hálf átta": clock-word + "hálf" + clock-numeral, looked
            // up as the compound "hálf<numeral>" in the half-past table. If
            // the word after "hálf" doesn't name an hour, this isn't a match
            // at all and both tokens are left for the caller to re-examine.
            Some(next) if next.kind == TokenKind::Word && next.text.to_lowercase() == "hálf" => {
                let after = self.upstream.peek_at(1).cloned();
                match after {
                    Some(t)
                        if t.kind == TokenKind::Word
                            && tables::HALF_PAST.contains_key(format!("hálf{}", t.text.to_lowercase()).as_str()) =>
                    {
                        let halfword = self.upstream.advance().unwrap();
                        let numeral = self.upstream.advance().unwrap();
                        let (h, m) = tables::HALF_PAST[format!("hálf{}", numeral.text.to_lowercase()).as_str()];
                        let mut time = word.concatenate(halfword, " ").concatenate(numeral, " ");
                        time.kind = TokenKind::Time;
                        time.value = TokenValue::Time { h, m, s: 0 };
                        Some(time)
                    }
                    _ => Some(word),
                }
            }
            _ => Some(word),
        }
    }

    fn try_half_past(
        &self,
        word: &Token,
    ) -> Option<Token> {
        tables::HALF_PAST.get(word.text.as_str()).map(|&(h, m)| {
            let mut t = word.clone();
            t.kind = TokenKind::Time;
            t.value = TokenValue::Time { h, m, s: 0 };
            t
        })
    }
}

/// Convert a Celsius (`"C"`), Fahrenheit (`"F"`), or already-Kelvin (`"K"`)
/// reading to Kelvin.
fn to_kelvin(
    scale: &str,
    value: f64,
) -> f64 {
    match scale {
        "C" => value + 273.15,
        "F" => (value - 32.0) * 5.0 / 9.0 + 273.15,
        _ => value,
    }
}

fn roman_to_int(s: &str) -> i64 {
    let value = |c: char| -> i64 {
        match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => 0,
        }
    };
    let chars: Vec<char> = s.chars().collect();
    let mut total = 0i64;
    for i in 0..chars.len() {
        let v = value(chars[i]);
        if i + 1 < chars.len() && v < value(chars[i + 1]) {
            total -= v;
        } else {
            total += v;
        }
    }
    total
}

impl<'a, I: Iterator<Item = Token>> Iterator for ParticleCoalescer<'a, I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.upstream.advance()?;
        let token = match token.kind {
            TokenKind::Currency => self.try_currency_amount(token),
            TokenKind::Date => self.try_daterel_dot(token),
            TokenKind::Number | TokenKind::Year => {
                let token = self.try_number_amount_currency(token);
                if token.kind != TokenKind::Amount {
                    let token = self.try_telno(token);
                    if token.kind == TokenKind::Telno {
                        token
                    } else {
                        let token = self.try_percent(token);
                        if token.kind == TokenKind::Percent {
                            token
                        } else {
                            let token = self.try_temperature(token);
                            if token.kind == TokenKind::Measurement {
                                token
                            } else {
                                let token = self.try_measurement(token);
                                if token.kind == TokenKind::Measurement {
                                    token
                                } else {
                                    self.try_ordinal_dot(token)
                                }
                            }
                        }
                    }
                } else {
                    token
                }
            }
            TokenKind::Word => {
                if let Some(half) = self.try_half_past(&token) {
                    half
                } else if let Some(time) = self.try_clock_word(token.clone()) {
                    time
                } else if let Some(year) = self.try_year_word(token.clone()) {
                    year
                } else {
                    let token = self.try_roman_ordinal(token);
                    if token.kind == TokenKind::Ordinal {
                        token
                    } else {
                        self.try_abbreviation_dot(token)
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
    use crate::options::TokenizerOptions;
    use crate::pipeline::primary_tokenizer::PrimaryTokenizer;
    use crate::pipeline::rough_splitter::RoughSplitter;
    use crate::tables::DefaultAbbreviations;

    fn coalesce(text: &str) -> Vec<Token> {
        let opts = TokenizerOptions::default();
        let rough = RoughSplitter::new(text, &opts);
        let primary = PrimaryTokenizer::new(rough, &opts, &DefaultAbbreviations);
        ParticleCoalescer::new(primary, &DefaultAbbreviations, &opts).collect()
    }

    #[test]
    fn test_currency_amount() {
        let toks = coalesce("$100 kostar mikið.");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Amount));
    }

    #[test]
    fn test_measurement() {
        let toks = coalesce("Hann hljóp 5 km í dag.");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Measurement));
    }

    #[test]
    fn test_abbreviation_absorbs_dot() {
        let toks = coalesce("Hann kom t.d. seint.");
        let abbrev = toks.iter().find(|t| t.text.starts_with("t.d"));
        assert!(abbrev.is_some());
        assert_eq!(abbrev.unwrap().text, "t.d.");
    }

    #[test]
    fn test_roman_ordinal() {
        let toks = coalesce("Loðvík XVI. konungur.");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Ordinal));
    }

    #[test]
    fn test_ordinal_dot_rolls_back_before_new_sentence() {
        // The bare number reaches the dot-absorption check with an
        // uppercase word right after the period: that reads as the start
        // of a new sentence, so the "." stays a separate PUNCTUATION rather
        // than being folded into an ORDINAL.
        let toks = coalesce("Liðið var í 3. Sæti þeirra kom á óvart.");
        let three = toks.iter().find(|t| t.kind == TokenKind::Number).unwrap();
        assert_eq!(three.text, "3");
        assert!(toks.iter().any(is_period));
        assert!(!toks.iter().any(|t| t.kind == TokenKind::Ordinal));
    }

    #[test]
    fn test_ordinal_dot_still_promotes_before_month_name() {
        // "ágúst" is capitalized here but is a month name, so it does not
        // trigger the sentence-start rollback.
        let toks = coalesce("Hann kom 10. Ágúst.");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Ordinal));
    }

    #[test]
    fn test_roman_ordinal_dot_rolls_back_before_new_sentence() {
        let toks = coalesce("Kaflinn er XVI. Næsti kafli kemur svo.");
        let roman = toks.iter().find(|t| t.kind == TokenKind::Word && t.text == "XVI").unwrap();
        assert_eq!(roman.text, "XVI");
        assert!(!toks.iter().any(|t| t.kind == TokenKind::Ordinal));
    }

    #[test]
    fn test_clock_word_plus_bare_numeral() {
        let toks = coalesce("Fundurinn hefst klukkan átta.");
        let time = toks.iter().find(|t| t.kind == TokenKind::Time).unwrap();
        assert_eq!(time.value, TokenValue::Time { h: 8, m: 0, s: 0 });
        assert_eq!(time.text, "klukkan átta");
    }

    #[test]
    fn test_clock_word_plus_half_numeral() {
        let toks = coalesce("Fundurinn hefst klukkan hálf átta.");
        let time = toks.iter().find(|t| t.kind == TokenKind::Time).unwrap();
        assert_eq!(time.value, TokenValue::Time { h: 7, m: 30, s: 0 });
        assert_eq!(time.text, "klukkan hálf átta");
    }

    #[test]
    fn test_clock_word_plus_hálf_without_numeral_is_not_consumed() {
        // "hálf" here isn't followed by an hour-naming word, so neither it
        // nor "klukkan" should be coalesced away.
        let toks = coalesce("Klukkan hálf ársins er liðin.");
        assert!(!toks.iter().any(|t| t.kind == TokenKind::Time));
        assert!(toks.iter().any(|t| t.kind == TokenKind::Word && t.text.to_lowercase() == "hálf"));
    }

    #[test]
    fn test_finisher_abbreviation_splits_dot_at_sentence_end() {
        // "o.s.frv." is a FINISHERS entry: followed by a capitalized word,
        // it still reads as the abbreviation, but the period splits off as
        // its own token rather than being absorbed.
        let toks = coalesce("Og svo framvegis o.s.frv. Þetta er ný setning.");
        let abbrev = toks.iter().find(|t| t.text == "o.s.frv").unwrap();
        assert!(matches!(&abbrev.value, TokenValue::Word(Some(meanings)) if !meanings.is_empty()));
        assert!(toks.iter().any(|t| is_period(t)));
    }

    #[test]
    fn test_not_finisher_abbreviation_splits_dot_without_meaning_at_sentence_end() {
        // "mín." is a NOT_FINISHERS entry: at sentence end the dot still
        // splits off, but no abbreviation meaning is attached.
        let toks = coalesce("Hann beið í þrjár mín. Svo fór hann.");
        let word = toks.iter().find(|t| t.text == "mín").unwrap();
        assert_eq!(word.value, TokenValue::Word(None));
    }

    #[test]
    fn test_daterel_dot_absorbed_before_lowercase_continuation() {
        let toks = coalesce("Hann kom 25.9. síðastliðinn.");
        let date = toks.iter().find(|t| t.kind == TokenKind::Date).unwrap();
        assert_eq!(date.text, "25.9.");
        assert!(!toks.iter().any(is_period));
    }

    #[test]
    fn test_daterel_dot_splits_before_new_sentence() {
        let toks = coalesce("Hann kom 25.9. Daginn eftir fór hann.");
        let date = toks.iter().find(|t| t.kind == TokenKind::Date).unwrap();
        assert_eq!(date.text, "25.9");
        assert!(toks.iter().any(is_period));
    }

    #[test]
    fn test_year_word_coalesces_with_following_year() {
        let toks = coalesce("Þetta gerðist árið 1944.");
        let year = toks.iter().find(|t| t.kind == TokenKind::Year).unwrap();
        assert_eq!(year.value, TokenValue::Year(1944));
        assert_eq!(year.text, "árið 1944");
    }

    #[test]
    fn test_year_word_without_following_year_stays_a_word() {
        let toks = coalesce("Árið var gott.");
        assert!(!toks.iter().any(|t| t.kind == TokenKind::Year));
    }

    #[test]
    fn test_telno_from_adjacent_digit_groups() {
        let toks = coalesce("Hringdu í 555 1234 strax.");
        let telno = toks.iter().find(|t| t.kind == TokenKind::Telno).unwrap();
        assert_eq!(
            telno.value,
            TokenValue::Telno { number: "555-1234".to_string(), country_code: "354".to_string() }
        );
    }

    #[test]
    fn test_telno_requires_telephone_prefix_digit() {
        // "123" doesn't start with a telephone prefix digit (4-8), so this
        // should not coalesce into a TELNO even though a 4-digit group
        // follows.
        let toks = coalesce("Herbergi 123 1234 er laust.");
        assert!(!toks.iter().any(|t| t.kind == TokenKind::Telno));
    }

    #[test]
    fn test_percent_from_separated_number_and_sign() {
        let toks = coalesce("Hann fékk 50 % afslátt.");
        let percent = toks.iter().find(|t| t.kind == TokenKind::Percent).unwrap();
        assert_eq!(percent.value, TokenValue::Percent { n: 50.0, cases: None, genders: None });
        assert_eq!(percent.text, "50 %");
    }

    #[test]
    fn test_promille_scales_by_tenth() {
        let toks = coalesce("Styrkurinn var 5 ‰ í blóðinu.");
        let percent = toks.iter().find(|t| t.kind == TokenKind::Percent).unwrap();
        assert_eq!(percent.value, TokenValue::Percent { n: 0.5, cases: None, genders: None });
    }

    #[test]
    fn test_km_per_klst_measurement() {
        let toks = coalesce("Bíllinn ók á 80 km/klst.");
        let m = toks.iter().find(|t| t.kind == TokenKind::Measurement).unwrap();
        assert_eq!(m.value, TokenValue::Measurement { unit: "km/klst".to_string(), value: 80.0 });
    }

    #[test]
    fn test_km_without_klst_stays_plain_measurement() {
        let toks = coalesce("Hann hljóp 5 km.");
        let m = toks.iter().find(|t| t.kind == TokenKind::Measurement).unwrap();
        assert_eq!(m.value, TokenValue::Measurement { unit: "km".to_string(), value: 5.0 });
    }

    #[test]
    fn test_temperature_celsius_kept_literal_by_default() {
        let toks = coalesce("Hitinn var 30 °C í dag.");
        let m = toks.iter().find(|t| t.kind == TokenKind::Measurement).unwrap();
        assert_eq!(m.value, TokenValue::Measurement { unit: "°C".to_string(), value: 30.0 });
    }

    #[test]
    fn test_temperature_converted_to_kelvin_when_requested() {
        let opts = TokenizerOptions::new().with_convert_measurements(true);
        let rough = RoughSplitter::new("Hitinn var 30 °C í dag.", &opts);
        let primary = PrimaryTokenizer::new(rough, &opts, &DefaultAbbreviations);
        let toks: Vec<Token> = ParticleCoalescer::new(primary, &DefaultAbbreviations, &opts).collect();
        let m = toks.iter().find(|t| t.kind == TokenKind::Measurement).unwrap();
        assert_eq!(m.value, TokenValue::Measurement { unit: "K".to_string(), value: 303.15 });
    }

    #[test]
    fn test_temperature_fahrenheit_converted_to_kelvin() {
        let opts = TokenizerOptions::new().with_convert_measurements(true);
        let rough = RoughSplitter::new("Hitinn var 98 °F úti.", &opts);
        let primary = PrimaryTokenizer::new(rough, &opts, &DefaultAbbreviations);
        let toks: Vec<Token> = ParticleCoalescer::new(primary, &DefaultAbbreviations, &opts).collect();
        let m = toks.iter().find(|t| t.kind == TokenKind::Measurement).unwrap();
        match &m.value {
            TokenValue::Measurement { unit, value } => {
                assert_eq!(unit, "K");
                assert!((*value - 309.817).abs() < 0.01);
            }
            _ => panic!("expected a measurement"),
        }
    }
}
