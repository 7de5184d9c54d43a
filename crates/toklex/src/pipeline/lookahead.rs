//! # Multi-Token Lookahead
//!
//! Several stages need to look more than one token ahead of the one they're
//! about to emit, to decide whether to coalesce it with what comes next
//! (e.g. "does a `.` follow this abbreviation candidate, and if so does
//! *that* look like the start of a new sentence?"). Rather than have every
//! stage hand-roll that buffering, [`Lookahead`] does it once: it holds the
//! upstream iterator plus a small queue of buffered items, and lets a stage
//! peek arbitrarily far ahead without consuming.
//!
//! This is the Rust-`Iterator` rendering of the "coroutine with bounded
//! lookahead" shape: a `std::iter::Peekable` only gets you one token ahead,
//! which isn't enough once a stage needs to peek past a token it hasn't
//! decided whether to consume yet.
use std::collections::VecDeque;

pub struct Lookahead<I: Iterator> {
    inner: I,
    buffered: VecDeque<I::Item>,
}

impl<I: Iterator> Lookahead<I> {
    /// Wrap `inner` with on-demand lookahead.
    pub fn new(inner: I) -> Self {
        Self { inner, buffered: VecDeque::new() }
    }

    /// Look at the next item without consuming it.
    pub fn peek(&mut self) -> Option<&I::Item> {
        self.peek_at(0)
    }

    /// Look `n` items ahead (`0` is the same as [`Self::peek`]) without
    /// consuming anything.
    pub fn peek_at(
        &mut self,
        n: usize,
    ) -> Option<&I::Item> {
        while self.buffered.len() <= n {
            match self.inner.next() {
                Some(item) => self.buffered.push_back(item),
                None => break,
            }
        }
        self.buffered.get(n)
    }

    /// Take the next item, advancing past it.
    pub fn advance(&mut self) -> Option<I::Item> {
        match self.buffered.pop_front() {
            Some(item) => Some(item),
            None => self.inner.next(),
        }
    }
}

impl<I: Iterator> Iterator for Lookahead<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_then_advance() {
        let mut la = Lookahead::new(vec![1, 2, 3].into_iter());
        assert_eq!(la.peek(), Some(&1));
        assert_eq!(la.peek(), Some(&1));
        assert_eq!(la.advance(), Some(1));
        assert_eq!(la.advance(), Some(2));
        assert_eq!(la.advance(), Some(3));
        assert_eq!(la.advance(), None);
    }

    #[test]
    fn test_peek_at_multiple_ahead() {
        let mut la = Lookahead::new(vec![1, 2, 3].into_iter());
        assert_eq!(la.peek_at(1), Some(&2));
        assert_eq!(la.peek_at(2), Some(&3));
        assert_eq!(la.peek_at(3), None);
        // Peeking further ahead first doesn't disturb earlier items.
        assert_eq!(la.advance(), Some(1));
        assert_eq!(la.advance(), Some(2));
        assert_eq!(la.advance(), Some(3));
        assert_eq!(la.advance(), None);
    }
}
