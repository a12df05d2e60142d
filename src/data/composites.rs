//! Composite symbol tables
//!
//! Symbols without a glyph of their own are synthesised from two base
//! characters:
//! - negated operators overlay a stroke on a base relation or arrow
//! - compacted composites place two characters side by side with a tightened gap
//! - decorated equals stack a small decoration over an equal sign
//!
//! The ligature table spells a symbol as a run of plain characters for fonts
//! (the fixed-width family) that lack the combined glyph.
//!
//! The three composite domains must stay pairwise disjoint; `SymbolTables`
//! checks this when it is built.

use phf::phf_map;
use std::fmt;

/// A base character with a stroke drawn through it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegatedOperator {
    pub base: &'static str,
    pub overlay: &'static str,
}

/// Two characters laid out left to right with extra horizontal spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactedComposite {
    pub left: &'static str,
    pub right: &'static str,
    /// Gap between the two characters in em; negative pulls them together
    pub spacing: f64,
}

/// Decoration placed above an equal sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualDecoration {
    Arc,
    Wedge,
    Vee,
    Star,
    Def,
    Measured,
    Question,
}

impl EqualDecoration {
    /// Characters drawn as the decoration
    pub fn glyphs(&self) -> &'static str {
        match self {
            EqualDecoration::Arc => "⌢",
            EqualDecoration::Wedge => "∧",
            EqualDecoration::Vee => "∨",
            EqualDecoration::Star => "⋆",
            EqualDecoration::Def => "def",
            EqualDecoration::Measured => "m",
            EqualDecoration::Question => "?",
        }
    }

    /// Whether the decoration is set as upright text rather than a math symbol
    pub fn is_textual(&self) -> bool {
        matches!(self, EqualDecoration::Def | EqualDecoration::Measured)
    }
}

/// Which composite table owns a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompositeKind {
    NegatedOperator,
    CompactedComposite,
    DecoratedEqual,
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeKind::NegatedOperator => write!(f, "negated-operator"),
            CompositeKind::CompactedComposite => write!(f, "compacted-composite"),
            CompositeKind::DecoratedEqual => write!(f, "decorated-equal"),
        }
    }
}

const fn negated(base: &'static str, overlay: &'static str) -> NegatedOperator {
    NegatedOperator { base, overlay }
}

/// Long solidus overlay used for negated relations
const NOT: &str = "\u{0338}";

pub static NEGATED_OPERATORS: phf::Map<&'static str, NegatedOperator> = phf_map! {
    // Arrows take a plain slash
    "↚" => negated("←", "/"),
    "↛" => negated("→", "/"),
    "↮" => negated("↔", "/"),
    "⇍" => negated("⇐", "/"),
    "⇏" => negated("⇒", "/"),
    "⇎" => negated("⇔", "/"),

    // Relations
    "∄" => negated("∃", NOT),
    "∉" => negated("∈", NOT),
    "∌" => negated("∋", NOT),
    "∤" => negated("∣", NOT),
    "∦" => negated("∥", NOT),
    "≁" => negated("∼", NOT),
    "≄" => negated("≃", NOT),
    "≇" => negated("≅", NOT),
    "≉" => negated("≈", NOT),
    "≢" => negated("≡", NOT),
    "≭" => negated("≍", NOT),
    "≮" => negated("<", NOT),
    "≯" => negated(">", NOT),
    "⊄" => negated("⊂", NOT),
    "⊅" => negated("⊃", NOT),
    "⋢" => negated("⊑", NOT),
    "⋣" => negated("⊒", NOT),
};

pub static COMPACTED_COMPOSITES: phf::Map<&'static str, CompactedComposite> = phf_map! {
    "≔" => CompactedComposite { left: ":", right: "=", spacing: -0.06667 },
    "≕" => CompactedComposite { left: "=", right: ":", spacing: -0.06667 },
    "∹" => CompactedComposite { left: "−", right: ":", spacing: -0.06667 },
};

pub static DECORATED_EQUALS: phf::Map<&'static str, EqualDecoration> = phf_map! {
    "≘" => EqualDecoration::Arc,
    "≙" => EqualDecoration::Wedge,
    "≚" => EqualDecoration::Vee,
    "≛" => EqualDecoration::Star,
    "≝" => EqualDecoration::Def,
    "≞" => EqualDecoration::Measured,
    "≟" => EqualDecoration::Question,
};

/// Plain-character spellings used by the fixed-width font
pub static LIGATURES: phf::Map<&'static str, &'static str> = phf_map! {
    "–" => "--",
    "—" => "---",
    "“" => "``",
    "”" => "''",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_domains_are_disjoint() {
        for key in NEGATED_OPERATORS.keys() {
            assert!(!COMPACTED_COMPOSITES.contains_key(key), "{}", key);
            assert!(!DECORATED_EQUALS.contains_key(key), "{}", key);
        }
        for key in COMPACTED_COMPOSITES.keys() {
            assert!(!DECORATED_EQUALS.contains_key(key), "{}", key);
        }
    }

    #[test]
    fn test_negated_lookup() {
        let not_in = NEGATED_OPERATORS.get("∉").unwrap();
        assert_eq!(not_in.base, "∈");
        assert_eq!(not_in.overlay, "\u{0338}");
    }

    #[test]
    fn test_decorations() {
        assert_eq!(DECORATED_EQUALS.get("≝"), Some(&EqualDecoration::Def));
        assert!(EqualDecoration::Def.is_textual());
        assert!(!EqualDecoration::Star.is_textual());
        assert_eq!(EqualDecoration::Question.glyphs(), "?");
    }

    #[test]
    fn test_ligature_expansions() {
        assert_eq!(LIGATURES.get("—"), Some(&"---"));
        assert!(LIGATURES.get("-").is_none());
    }
}
