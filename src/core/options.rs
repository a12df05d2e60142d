//! Request vocabulary shared by the resolver and the alignment engine
//!
//! This module contains the closed enumerations describing a symbol request
//! (mode, atom type, font weight/shape), the font selection record and the
//! per-call rendering options.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Family name of the fixed-width font. Ligature expansion only happens here.
pub const FIXED_WIDTH_FAMILY: &str = "Typewriter";

/// Family used when nothing more specific is known
pub const DEFAULT_FAMILY: &str = "Main";

/// Typesetting context that requested a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Math,
    Text,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Math => write!(f, "math"),
            Mode::Text => write!(f, "text"),
        }
    }
}

/// Semantic role of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomType {
    Ordinary,
    Operator,
    Binary,
    Relation,
    Open,
    Close,
    Punctuation,
    Inner,
    Spacing,
}

impl AtomType {
    /// Parse the short names used by TeX-style symbol tables (`ord`, `bin`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let atom = match name {
            "ord" | "mathord" | "textord" | "ordinary" => AtomType::Ordinary,
            "op" | "operator" => AtomType::Operator,
            "bin" | "binary" => AtomType::Binary,
            "rel" | "relation" => AtomType::Relation,
            "open" => AtomType::Open,
            "close" => AtomType::Close,
            "punct" | "punctuation" => AtomType::Punctuation,
            "inner" => AtomType::Inner,
            "spacing" => AtomType::Spacing,
            _ => return None,
        };
        Some(atom)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AtomType::Ordinary => "ord",
            AtomType::Operator => "op",
            AtomType::Binary => "bin",
            AtomType::Relation => "rel",
            AtomType::Open => "open",
            AtomType::Close => "close",
            AtomType::Punctuation => "punct",
            AtomType::Inner => "inner",
            AtomType::Spacing => "spacing",
        }
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontShape {
    #[default]
    Upright,
    Italic,
}

/// Font selection: family, weight, shape and an ordered fallback list
///
/// Two `FontOptions` are the same font when family, weight and shape match;
/// the fallback list does not take part in equality or hashing.
#[derive(Debug, Clone)]
pub struct FontOptions {
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_shape: FontShape,
    /// Tried left to right when the font has no metrics for a character
    pub fallback: Vec<FontOptions>,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FAMILY.to_string(),
            font_weight: FontWeight::Normal,
            font_shape: FontShape::Upright,
            fallback: Vec::new(),
        }
    }
}

impl FontOptions {
    /// Create an upright, normal weight font of the given family
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            font_family: family.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.font_shape = FontShape::Italic;
        self
    }

    pub fn with_fallback(mut self, fallback: Vec<FontOptions>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Key under which the metrics table stores this font, e.g. `Main-BoldItalic`
    pub fn font_name(&self) -> String {
        let postfix = match (self.font_weight, self.font_shape) {
            (FontWeight::Bold, FontShape::Italic) => "BoldItalic",
            (FontWeight::Bold, FontShape::Upright) => "Bold",
            (FontWeight::Normal, FontShape::Italic) => "Italic",
            (FontWeight::Normal, FontShape::Upright) => "Regular",
        };
        format!("{}-{}", self.font_family, postfix)
    }

    pub fn is_fixed_width(&self) -> bool {
        self.font_family == FIXED_WIDTH_FAMILY
    }
}

impl PartialEq for FontOptions {
    fn eq(&self, other: &Self) -> bool {
        self.font_family == other.font_family
            && self.font_weight == other.font_weight
            && self.font_shape == other.font_shape
    }
}

impl Eq for FontOptions {}

impl Hash for FontOptions {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.font_family.hash(state);
        self.font_weight.hash(state);
        self.font_shape.hash(state);
    }
}

impl fmt::Display for FontOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.font_name())
    }
}

/// Opaque ARGB color handed through to the element factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

// =============================================================================
// Render Options
// =============================================================================

/// Per-call rendering context. The engine reads it and never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Font applied to ordinary math symbols (and to text when set)
    /// Default: None
    pub math_font_override: Option<FontOptions>,

    /// Font applied to ordinary text-mode symbols
    /// Default: None
    pub text_font_override: Option<FontOptions>,

    /// Shift short operators, relations and variables onto the math axis
    /// Default: true
    pub center_operators: bool,

    /// Keep short variables on the numeral baseline (e.g. a coefficient's neighbour)
    /// Default: false
    pub force_variable_baseline: bool,

    /// Default: black
    pub color: Color,

    /// Device units per em
    /// Default: 1.0
    pub em_scale: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            math_font_override: None,
            text_font_override: None,
            center_operators: true,
            force_variable_baseline: false,
            color: Color::default(),
            em_scale: 1.0,
        }
    }
}

impl RenderOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that keep every glyph on its font baseline
    pub fn flat() -> Self {
        Self {
            center_operators: false,
            ..Self::default()
        }
    }

    /// Options scaled for a given font size in device units
    pub fn sized(em_scale: f64) -> Self {
        Self {
            em_scale,
            ..Self::default()
        }
    }

    pub fn with_math_font(mut self, font: FontOptions) -> Self {
        self.math_font_override = Some(font);
        self
    }

    pub fn with_text_font(mut self, font: FontOptions) -> Self {
        self.text_font_override = Some(font);
        self
    }

    pub fn with_center_operators(mut self, center: bool) -> Self {
        self.center_operators = center;
        self
    }

    pub fn with_force_variable_baseline(mut self, force: bool) -> Self {
        self.force_variable_baseline = force;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Convert an em length to device units under this context
    pub fn em_to_device(&self, em: f64) -> f64 {
        em * self.em_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_font_name() {
        assert_eq!(FontOptions::default().font_name(), "Main-Regular");
        assert_eq!(FontOptions::new("Math").italic().font_name(), "Math-Italic");
        assert_eq!(FontOptions::new("Main").bold().font_name(), "Main-Bold");
        assert_eq!(
            FontOptions::new("Math").bold().italic().font_name(),
            "Math-BoldItalic"
        );
    }

    #[test]
    fn test_font_equality_ignores_fallback() {
        let a = FontOptions::new("SansSerif").with_fallback(vec![FontOptions::default()]);
        let b = FontOptions::new("SansSerif");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&FontOptions::new("SansSerif").bold()));
    }

    #[test]
    fn test_fixed_width() {
        assert!(FontOptions::new(FIXED_WIDTH_FAMILY).is_fixed_width());
        assert!(!FontOptions::default().is_fixed_width());
    }

    #[test]
    fn test_atom_names() {
        assert_eq!(AtomType::from_name("bin"), Some(AtomType::Binary));
        assert_eq!(AtomType::from_name("rel"), Some(AtomType::Relation));
        assert_eq!(AtomType::from_name("mathord"), Some(AtomType::Ordinary));
        assert_eq!(AtomType::from_name("nope"), None);
        assert_eq!(AtomType::Punctuation.to_string(), "punct");
    }

    #[test]
    fn test_render_option_presets() {
        let opts = RenderOptions::default();
        assert!(opts.center_operators);
        assert!(!opts.force_variable_baseline);

        let flat = RenderOptions::flat();
        assert!(!flat.center_operators);

        let sized = RenderOptions::sized(20.0);
        assert_eq!(sized.em_to_device(0.5), 10.0);
    }
}
