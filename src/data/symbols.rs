//! Symbol render configuration
//!
//! Each symbol maps to an independent math and text record naming the font
//! its glyph lives in and, optionally, the character to draw instead of the
//! symbol itself. A record can point at a parallel configuration that is used
//! when a stylistic variant is requested.

use fxhash::FxHashMap;
use lazy_static::lazy_static;

use crate::core::options::{FontOptions, Mode};

/// How a symbol renders in one mode
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub default_font: FontOptions,
    /// Character drawn in place of the symbol
    pub replace_char: Option<&'static str>,
}

impl RenderConfig {
    pub fn new(default_font: FontOptions) -> Self {
        Self {
            default_font,
            replace_char: None,
        }
    }

    pub fn replacing(default_font: FontOptions, replace_char: &'static str) -> Self {
        Self {
            default_font,
            replace_char: Some(replace_char),
        }
    }
}

/// Math and text rendering of one symbol, plus its variant form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolRenderConfig {
    pub math: Option<RenderConfig>,
    pub text: Option<RenderConfig>,
    pub variant_form: Option<Box<SymbolRenderConfig>>,
}

impl SymbolRenderConfig {
    pub fn math(config: RenderConfig) -> Self {
        Self {
            math: Some(config),
            ..Self::default()
        }
    }

    pub fn text(config: RenderConfig) -> Self {
        Self {
            text: Some(config),
            ..Self::default()
        }
    }

    pub fn both(math: RenderConfig, text: RenderConfig) -> Self {
        Self {
            math: Some(math),
            text: Some(text),
            variant_form: None,
        }
    }

    pub fn with_variant(mut self, variant: SymbolRenderConfig) -> Self {
        self.variant_form = Some(Box::new(variant));
        self
    }

    /// The variant configuration when one is requested and present, else `self`
    pub fn select(&self, variant_requested: bool) -> &SymbolRenderConfig {
        match (&self.variant_form, variant_requested) {
            (Some(variant), true) => variant,
            _ => self,
        }
    }

    /// Record for `mode`, falling back to the other mode's record
    pub fn for_mode(&self, mode: Mode) -> Option<&RenderConfig> {
        match mode {
            Mode::Math => self.math.as_ref().or(self.text.as_ref()),
            Mode::Text => self.text.as_ref().or(self.math.as_ref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.math.is_none() && self.text.is_none()
    }
}

// ============================================================================
// Builtin Fonts
// ============================================================================

pub fn main_font() -> FontOptions {
    FontOptions::new("Main")
}

pub fn math_italic_font() -> FontOptions {
    FontOptions::new("Math").italic()
}

pub fn ams_font() -> FontOptions {
    FontOptions::new("AMS")
}

fn in_main() -> RenderConfig {
    RenderConfig::new(main_font())
}

fn in_ams() -> RenderConfig {
    RenderConfig::new(ams_font())
}

// ============================================================================
// Builtin Table
// ============================================================================

/// Binary operators drawn from the main font
const MAIN_BINARY: &[&str] = &[
    "+", "−", "±", "×", "÷", "⋅", "∗", "∘", "∧", "∨", "⋆", "*",
];

/// Relations and arrows drawn from the main font
const MAIN_RELATIONS: &[&str] = &[
    "=", "<", ">", "≠", "≡", "≈", "∼", "≃", "≅", "≍", "∈", "∋", "⊂", "⊃", "⊆", "⊇", "⊑", "⊒",
    "∣", "∥", "←", "→", "↔", "⇐", "⇒", "⇔", "⌢",
];

/// Symbols drawn from the AMS font in math mode
const AMS_SYMBOLS: &[&str] = &["≲", "≳", "≶", "≷", "⊏", "⊐", "∴", "∵"];

/// Ordinary math symbols from the main font
const MAIN_ORDINARY: &[&str] = &["∞", "∂", "∇", "∀", "∃"];

/// Punctuation and delimiters shared by both modes
const SHARED_PUNCTUATION: &[&str] = &[
    ",", ";", ":", "!", "?", "(", ")", "[", "]", "{", "}", "|", ".", "/", "'",
];

/// Typographic punctuation only found in text
const TEXT_ONLY: &[&str] = &["–", "—", "‘", "’", "“", "”", "`"];

const GREEK_LOWER: &[&str] = &["α", "β", "γ", "δ", "ε", "θ", "λ", "μ", "π", "σ", "φ", "ω"];

lazy_static! {
    /// Builtin render configuration for every symbol the engine knows directly
    pub static ref SYMBOL_RENDER_CONFIGS: FxHashMap<&'static str, SymbolRenderConfig> = {
        let mut m = FxHashMap::default();

        // ---- Numerals ----
        for digit in ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"] {
            m.insert(digit, SymbolRenderConfig::both(in_main(), in_main()));
        }

        // ---- Latin letters: italic in math, upright in text ----
        for &letter in LATIN_LETTERS {
            m.insert(
                letter,
                SymbolRenderConfig::both(RenderConfig::new(math_italic_font()), in_main()),
            );
        }

        // ---- Greek: math only ----
        for letter in GREEK_LOWER {
            m.insert(*letter, SymbolRenderConfig::math(RenderConfig::new(math_italic_font())));
        }
        m.insert(
            "ϵ",
            SymbolRenderConfig::math(RenderConfig::new(math_italic_font())).with_variant(
                SymbolRenderConfig::math(RenderConfig::replacing(math_italic_font(), "ε")),
            ),
        );

        // ---- Operators and relations ----
        for sym in MAIN_BINARY.iter().chain(MAIN_RELATIONS).chain(MAIN_ORDINARY) {
            m.insert(*sym, SymbolRenderConfig::math(in_main()));
        }
        for sym in AMS_SYMBOLS {
            m.insert(*sym, SymbolRenderConfig::math(in_ams()));
        }
        // Negation stroke overlaid on relations
        m.insert("\u{0338}", SymbolRenderConfig::math(in_main()));
        // ASCII hyphen is a minus sign in math
        m.insert(
            "-",
            SymbolRenderConfig::both(RenderConfig::replacing(main_font(), "−"), in_main()),
        );
        m.insert(
            "≤",
            SymbolRenderConfig::math(in_main())
                .with_variant(SymbolRenderConfig::math(RenderConfig::replacing(ams_font(), "⩽"))),
        );
        m.insert(
            "≥",
            SymbolRenderConfig::math(in_main())
                .with_variant(SymbolRenderConfig::math(RenderConfig::replacing(ams_font(), "⩾"))),
        );
        m.insert(
            "∖",
            SymbolRenderConfig::math(in_main()).with_variant(SymbolRenderConfig::math(
                RenderConfig::replacing(ams_font(), "\u{E006}"),
            )),
        );
        m.insert(
            "∅",
            SymbolRenderConfig::math(in_main()).with_variant(SymbolRenderConfig::math(in_ams())),
        );
        m.insert(
            "⊊",
            SymbolRenderConfig::math(in_ams()).with_variant(SymbolRenderConfig::math(
                RenderConfig::replacing(ams_font(), "\u{E01A}"),
            )),
        );
        m.insert(
            "⊋",
            SymbolRenderConfig::math(in_ams()).with_variant(SymbolRenderConfig::math(
                RenderConfig::replacing(ams_font(), "\u{E01B}"),
            )),
        );

        // ---- Punctuation ----
        for sym in SHARED_PUNCTUATION {
            m.insert(*sym, SymbolRenderConfig::both(in_main(), in_main()));
        }
        for sym in TEXT_ONLY {
            m.insert(*sym, SymbolRenderConfig::text(in_main()));
        }

        // ---- Mathematical alphanumerics carry their own styling ----
        m.insert(
            "\u{1D400}",
            SymbolRenderConfig::math(RenderConfig::replacing(main_font().bold(), "A")),
        );
        m.insert(
            "\u{1D431}",
            SymbolRenderConfig::math(RenderConfig::replacing(main_font().bold(), "x")),
        );
        m.insert(
            "\u{1D465}",
            SymbolRenderConfig::math(RenderConfig::replacing(math_italic_font(), "x")),
        );

        m
    };
}

const LATIN_LETTERS: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L",
    "M", "N", "O", "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// Look up the builtin configuration of a symbol
pub fn lookup_symbol_config(symbol: &str) -> Option<&'static SymbolRenderConfig> {
    SYMBOL_RENDER_CONFIGS.get(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_fallback() {
        let alpha = lookup_symbol_config("α").unwrap();
        assert!(alpha.text.is_none());
        assert_eq!(alpha.for_mode(Mode::Text), alpha.math.as_ref());

        let dash = lookup_symbol_config("–").unwrap();
        assert!(dash.math.is_none());
        assert_eq!(dash.for_mode(Mode::Math), dash.text.as_ref());
    }

    #[test]
    fn test_letters_are_italic_in_math() {
        let x = lookup_symbol_config("x").unwrap();
        assert_eq!(x.for_mode(Mode::Math).unwrap().default_font, math_italic_font());
        assert_eq!(x.for_mode(Mode::Text).unwrap().default_font, main_font());
    }

    #[test]
    fn test_every_latin_letter_configured() {
        assert_eq!(LATIN_LETTERS.len(), 52);
        for c in ('a'..='z').chain('A'..='Z') {
            let letter = c.to_string();
            let config = lookup_symbol_config(&letter).unwrap();
            assert_eq!(config.for_mode(Mode::Math).unwrap().default_font, math_italic_font());
        }
    }

    #[test]
    fn test_variant_selection() {
        let leq = lookup_symbol_config("≤").unwrap();
        let variant = leq.select(true);
        assert_eq!(variant.math.as_ref().unwrap().replace_char, Some("⩽"));
        assert_eq!(leq.select(false), leq);

        // A missing variant is ignored rather than reported
        let plus = lookup_symbol_config("+").unwrap();
        assert_eq!(plus.select(true), plus);
    }

    #[test]
    fn test_hyphen_becomes_minus_in_math() {
        let hyphen = lookup_symbol_config("-").unwrap();
        assert_eq!(hyphen.for_mode(Mode::Math).unwrap().replace_char, Some("−"));
        assert_eq!(hyphen.for_mode(Mode::Text).unwrap().replace_char, None);
    }

    #[test]
    fn test_no_empty_builtin_entries() {
        for (symbol, config) in SYMBOL_RENDER_CONFIGS.iter() {
            assert!(!config.is_empty(), "{} has no render record", symbol);
        }
    }
}
