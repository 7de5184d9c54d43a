//! # Tokenizer Options
//!
//! Mirrors the options table in spec §6, built the way the teacher crate
//! builds its configuration structs (a plain `Default`-able struct with
//! `with_*` builder methods — see the former `tokenizer/tokenizer_options.rs`
//! and `spanning/spanning_config.rs`).

/// How to handle kludgy spelled-out ordinals (`1sti`, `3ja`, `5ti`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KludgyOrdinals {
    /// Leave them as plain word tokens (the default).
    #[default]
    PassThrough,
    /// Convert to an `ORDINAL` token (`1sti` → `ORDINAL(1)`).
    Translate,
    /// Rewrite the working text to the spelled-out word (`1sti` →
    /// `"fyrsti"`). This is a lengthening edit and clears origin tracking
    /// on the affected token (spec §9).
    Modify,
}

/// Options accepted by [`crate::tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizerOptions {
    /// Rewrite English-formatted numeric literals (`1,234.5`) to Icelandic
    /// style (`1.234,5`) in the working text.
    pub convert_numbers: bool,

    /// When coalescing `°C`/`°F` into Kelvin measurements, also rewrite the
    /// working text to the canonical form. This is a lengthening edit and
    /// clears origin tracking on the affected token (spec §9).
    pub convert_measurements: bool,

    /// Normalize decomposed/composite glyphs to single code points during
    /// rough splitting.
    pub replace_composite_glyphs: bool,

    /// Decode HTML named/numeric entities during rough splitting.
    pub replace_html_escapes: bool,

    /// How to handle kludgy spelled-out ordinals.
    pub handle_kludgy_ordinals: KludgyOrdinals,

    /// If `false`, skip Phrase Pass 2 (number-word multipliers, composite
    /// hyphen joining, percent-word coalescing).
    pub with_annotation: bool,

    /// Enable spelled-out percent coalescing in Phrase Pass 2 (`"17
    /// prósent"` → `PERCENT(17)`).
    pub coalesce_percent: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            convert_numbers: false,
            convert_measurements: false,
            replace_composite_glyphs: true,
            replace_html_escapes: false,
            handle_kludgy_ordinals: KludgyOrdinals::PassThrough,
            with_annotation: true,
            coalesce_percent: false,
        }
    }
}

impl TokenizerOptions {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`Self::convert_numbers`].
    pub fn with_convert_numbers(
        mut self,
        value: bool,
    ) -> Self {
        self.convert_numbers = value;
        self
    }

    /// Set [`Self::convert_measurements`].
    pub fn with_convert_measurements(
        mut self,
        value: bool,
    ) -> Self {
        self.convert_measurements = value;
        self
    }

    /// Set [`Self::replace_composite_glyphs`].
    pub fn with_replace_composite_glyphs(
        mut self,
        value: bool,
    ) -> Self {
        self.replace_composite_glyphs = value;
        self
    }

    /// Set [`Self::replace_html_escapes`].
    pub fn with_replace_html_escapes(
        mut self,
        value: bool,
    ) -> Self {
        self.replace_html_escapes = value;
        self
    }

    /// Set [`Self::handle_kludgy_ordinals`].
    pub fn with_handle_kludgy_ordinals(
        mut self,
        value: KludgyOrdinals,
    ) -> Self {
        self.handle_kludgy_ordinals = value;
        self
    }

    /// Set [`Self::with_annotation`].
    pub fn with_annotation(
        mut self,
        value: bool,
    ) -> Self {
        self.with_annotation = value;
        self
    }

    /// Set [`Self::coalesce_percent`].
    pub fn with_coalesce_percent(
        mut self,
        value: bool,
    ) -> Self {
        self.coalesce_percent = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let opts = TokenizerOptions::default();
        assert!(!opts.convert_numbers);
        assert!(!opts.convert_measurements);
        assert!(opts.replace_composite_glyphs);
        assert!(!opts.replace_html_escapes);
        assert_eq!(opts.handle_kludgy_ordinals, KludgyOrdinals::PassThrough);
        assert!(opts.with_annotation);
        assert!(!opts.coalesce_percent);
    }

    #[test]
    fn test_builder_chain() {
        let opts = TokenizerOptions::new()
            .with_convert_numbers(true)
            .with_coalesce_percent(true);
        assert!(opts.convert_numbers);
        assert!(opts.coalesce_percent);
    }
}
