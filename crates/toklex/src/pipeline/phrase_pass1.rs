//! # Phrase Pass 1
//!
//! The first of two broader-window coalescing passes that run after
//! sentences are segmented (spec §4.7): `ORDINAL`/`NUMBER` + a month name
//! → `DATE`, `DATE` + `YEAR` → a fuller `DATE`, `DATE` + `TIME` →
//! `TIMESTAMP`, a `YEAR` followed by a BCE/CE marker word gets its sign
//! applied, and a country-code `NUMBER` directly before a `TELNO` is folded
//! into that `TELNO`'s country code. Grounded on `parse_phrases_1` in the
//! reference implementation.
use crate::kind::{TokenKind, TokenValue};
use crate::pipeline::lookahead::Lookahead;
use crate::tables;
use crate::token::Token;

fn month_of(word: &Token) -> Option<u32> {
    if word.kind != TokenKind::Word {
        return None;
    }
    tables::MONTHS.get(word.text.to_lowercase().as_str()).copied()
}

/// The Phrase Pass 1 stage.
pub struct PhrasePass1<I: Iterator<Item = Token>> {
    upstream: Lookahead<I>,
}

impl<I: Iterator<Item = Token>> PhrasePass1<I> {
    /// Wrap a sentence-segmenter (or compatible) upstream iterator.
    pub fn new(upstream: I) -> Self {
        Self { upstream: Lookahead::new(upstream) }
    }

    fn try_ordinal_month(
        &mut self,
        token: Token,
    ) -> Token {
        let day = match &token.value {
            TokenValue::Ordinal(n) => *n as u32,
            TokenValue::Number { n, .. } => *n as u32,
            _ => return token,
        };
        if !(1..=31).contains(&day) {
            return token;
        }
        match self.upstream.peek() {
            Some(next) if month_of(next).is_some() => {
                let month = month_of(next).unwrap();
                let next = self.upstream.advance().unwrap();
                let mut date = token.concatenate(next, " ");
                date.kind = TokenKind::Date;
                date.value = TokenValue::Date { y: 0, m: month, d: day };
                date
            }
            _ => token,
        }
    }

    fn try_date_year(
        &mut self,
        date: Token,
    ) -> Token {
        let (y, m, d) = match &date.value {
            TokenValue::Date { y, m, d } if *y == 0 => (*y, *m, *d),
            _ => return date,
        };
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Year => {
                let year = match &next.value {
                    TokenValue::Year(y) => *y,
                    _ => return date,
                };
                let next = self.upstream.advance().unwrap();
                let mut full = date.concatenate(next, " ");
                full.kind = TokenKind::Date;
                full.value = TokenValue::Date { y: year, m, d };
                full
            }
            _ => {
                let _ = y;
                date
            }
        }
    }

    fn try_date_time(
        &mut self,
        date: Token,
    ) -> Token {
        let (y, mo, d) = match &date.value {
            TokenValue::Date { y, m, d } => (*y, *m, *d),
            _ => return date,
        };
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Time => {
                let (h, mi, s) = match &next.value {
                    TokenValue::Time { h, m, s } => (*h, *m, *s),
                    _ => return date,
                };
                let next = self.upstream.advance().unwrap();
                let mut ts = date.concatenate(next, " ");
                ts.kind = TokenKind::Timestamp;
                ts.value = TokenValue::Timestamp { y, mo, d, h, m: mi, s };
                ts
            }
            _ => date,
        }
    }

    fn try_year_era(
        &mut self,
        year: Token,
    ) -> Token {
        let y = match &year.value {
            TokenValue::Year(y) => *y,
            _ => return year,
        };
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Word && tables::CE_BCE.contains(next.text.as_str()) => {
                let is_bce = tables::BCE.contains(next.text.as_str());
                let next = self.upstream.advance().unwrap();
                let mut signed = year.concatenate(next, " ");
                signed.kind = TokenKind::Year;
                signed.value = TokenValue::Year(if is_bce { -y.abs() } else { y.abs() });
                signed
            }
            _ => year,
        }
    }

    fn try_country_code_telno(
        &mut self,
        number: Token,
    ) -> Token {
        if !matches!(&number.value, TokenValue::Number { n, .. } if tables::COUNTRY_CODES.contains(format!("{}", *n as i64).as_str()))
        {
            return number;
        }
        match self.upstream.peek() {
            Some(next) if next.kind == TokenKind::Telno => {
                let code = match &number.value {
                    TokenValue::Number { n, .. } => format!("{}", *n as i64),
                    _ => unreachable!(),
                };
                let next = self.upstream.advance().unwrap();
                let number_str = match &next.value {
                    TokenValue::Telno { number, .. } => number.clone(),
                    _ => String::new(),
                };
                let mut telno = number.concatenate(next, "-");
                telno.kind = TokenKind::Telno;
                telno.value = TokenValue::Telno { number: number_str, country_code: code };
                telno
            }
            _ => number,
        }
    }
}

impl<I: Iterator<Item = Token>> Iterator for PhrasePass1<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.upstream.advance()?;
        let token = match token.kind {
            TokenKind::Ordinal | TokenKind::Number if month_following(&token, &mut self.upstream) => {
                self.try_ordinal_month(token)
            }
            TokenKind::Number => self.try_country_code_telno(token),
            TokenKind::Date => {
                let date = self.try_date_year(token);
                self.try_date_time(date)
            }
            TokenKind::Year => self.try_year_era(token),
            _ => token,
        };
        Some(token)
    }
}

fn month_following<I: Iterator<Item = Token>>(
    token: &Token,
    upstream: &mut Lookahead<I>,
) -> bool {
    let day_like = matches!(&token.value, TokenValue::Ordinal(_)) || matches!(&token.value, TokenValue::Number { n, .. } if (1.0..=31.0).contains(n));
    day_like && upstream.peek().map(|t| month_of(t).is_some()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TokenizerOptions;
    use crate::pipeline::particle_coalescer::ParticleCoalescer;
    use crate::pipeline::primary_tokenizer::PrimaryTokenizer;
    use crate::pipeline::rough_splitter::RoughSplitter;
    use crate::pipeline::sentence_segmenter::SentenceSegmenter;
    use crate::tables::DefaultAbbreviations;

    fn phrase1(text: &str) -> Vec<Token> {
        let opts = TokenizerOptions::default();
        let rough = RoughSplitter::new(text, &opts);
        let primary = PrimaryTokenizer::new(rough, &opts, &DefaultAbbreviations);
        let particles = ParticleCoalescer::new(primary, &DefaultAbbreviations, &opts);
        let sentences = SentenceSegmenter::new(particles);
        PhrasePass1::new(sentences).collect()
    }

    #[test]
    fn test_ordinal_month_to_date() {
        let toks = phrase1("Hann kom 10. júní.");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Date));
    }

    #[test]
    fn test_date_year() {
        let toks = phrase1("Hann kom 10. júní 2024.");
        let date = toks.iter().find(|t| t.kind == TokenKind::Date).unwrap();
        assert_eq!(date.value, TokenValue::Date { y: 2024, m: 6, d: 10 });
    }
}
