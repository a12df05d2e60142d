//! Font metrics lookup
//!
//! The resolver treats metrics as a pure function
//! `metrics(char, font_name, mode) -> Option<CharacterMetrics>`, expressed by the
//! [`MetricsSource`] trait. [`MetricsTable`] is the in-memory implementation,
//! and [`BUILTIN_METRICS`] carries the TeX font metrics for the glyphs used by
//! the builtin symbol table.
//!
//! All values are in em units relative to a 1em font size.

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use phf::phf_map;

use crate::core::options::Mode;

#[cfg(feature = "data-loading")]
use serde::Deserialize;

/// Vertical and horizontal measurements of one glyph
///
/// With `data-loading`, deserializes from the `[depth, height, italic, skew, width]`
/// array used by KaTeX metric files.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "data-loading", derive(Deserialize), serde(from = "[f64; 5]"))]
pub struct CharacterMetrics {
    /// Extent below the baseline; negative when the glyph floats above it
    pub depth: f64,
    /// Extent above the baseline
    pub height: f64,
    pub italic: f64,
    pub skew: f64,
    pub width: f64,
}

impl CharacterMetrics {
    pub const fn new(depth: f64, height: f64, italic: f64, skew: f64, width: f64) -> Self {
        Self {
            depth,
            height,
            italic,
            skew,
            width,
        }
    }

    const fn from_array(values: [f64; 5]) -> Self {
        Self::new(values[0], values[1], values[2], values[3], values[4])
    }

    pub fn is_finite(&self) -> bool {
        [self.depth, self.height, self.italic, self.skew, self.width]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl From<[f64; 5]> for CharacterMetrics {
    fn from(values: [f64; 5]) -> Self {
        Self::from_array(values)
    }
}

/// Source of glyph metrics consulted by the resolver
pub trait MetricsSource {
    /// Metrics of `ch` in the font named `font_name` (e.g. `Main-Regular`),
    /// or `None` when the font has no entry for it
    fn metrics(&self, ch: &str, font_name: &str, mode: Mode) -> Option<CharacterMetrics>;
}

impl<F> MetricsSource for F
where
    F: Fn(&str, &str, Mode) -> Option<CharacterMetrics>,
{
    fn metrics(&self, ch: &str, font_name: &str, mode: Mode) -> Option<CharacterMetrics> {
        self(ch, font_name, mode)
    }
}

// ============================================================================
// Lookup helpers
// ============================================================================

/// Accented and look-alike letters measured through their base letter
static EXTRA_CHARACTER_MAP: phf::Map<char, char> = phf_map! {
    // Latin-1
    'Å' => 'A',
    'Ç' => 'C',
    'Ð' => 'D',
    'Þ' => 'o',
    'å' => 'a',
    'ç' => 'c',
    'ð' => 'd',
    'þ' => 'o',
    'é' => 'e',
    'è' => 'e',
    'ü' => 'u',
    'ö' => 'o',
    // Cyrillic
    'А' => 'A',
    'Б' => 'B',
    'В' => 'B',
    'Г' => 'F',
    'Д' => 'A',
    'Е' => 'E',
    'К' => 'K',
    'М' => 'M',
    'Н' => 'H',
    'О' => 'O',
    'Р' => 'P',
    'С' => 'C',
    'Т' => 'T',
    'Х' => 'X',
    'а' => 'a',
    'е' => 'e',
    'о' => 'o',
    'р' => 'p',
    'с' => 'c',
    'х' => 'x',
};

/// Scripts whose glyphs borrow the metrics of `M` in text mode
const SUPPORTED_SCRIPTS: &[(&str, &[(u32, u32)])] = &[
    ("latin", &[(0x0100, 0x024F), (0x0300, 0x036F)]),
    ("cyrillic", &[(0x0400, 0x04FF)]),
    ("armenian", &[(0x0530, 0x058F)]),
    ("brahmic", &[(0x0900, 0x109F)]),
    ("georgian", &[(0x10A0, 0x10FF)]),
    ("cjk", &[(0x3000, 0x30FF), (0x4E00, 0x9FAF), (0xFF00, 0xFF60)]),
    ("hangul", &[(0xAC00, 0xD7AF)]),
];

/// Name of the supported script containing `code`, if any
pub fn script_from_codepoint(code: u32) -> Option<&'static str> {
    SUPPORTED_SCRIPTS
        .iter()
        .find(|(_, blocks)| blocks.iter().any(|&(lo, hi)| (lo..=hi).contains(&code)))
        .map(|(name, _)| *name)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let first = chars.next()?;
    match chars.next() {
        None => Some(first),
        Some(_) => None,
    }
}

// ============================================================================
// Metrics Table
// ============================================================================

/// In-memory metrics keyed by font name, then code point
#[derive(Debug, Clone, Default)]
pub struct MetricsTable {
    fonts: FxHashMap<String, FxHashMap<u32, CharacterMetrics>>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, font_name: &str, ch: char, metrics: CharacterMetrics) {
        self.fonts
            .entry(font_name.to_string())
            .or_default()
            .insert(ch as u32, metrics);
    }

    pub fn has_font(&self, font_name: &str) -> bool {
        self.fonts.contains_key(font_name)
    }

    pub fn font_names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    /// Number of glyph entries across all fonts
    pub fn len(&self) -> usize {
        self.fonts.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, ch: &str, font_name: &str, mode: Mode) -> Option<CharacterMetrics> {
        let glyph = single_char(ch)?;
        let font = self.fonts.get(font_name)?;

        if let Some(m) = font.get(&(glyph as u32)) {
            return Some(*m);
        }
        if let Some(base) = EXTRA_CHARACTER_MAP.get(&glyph) {
            return font.get(&(*base as u32)).copied();
        }
        if mode == Mode::Text && script_from_codepoint(glyph as u32).is_some() {
            return font.get(&('M' as u32)).copied();
        }
        None
    }

    /// Parse metrics in the `{font: {codepoint: [depth, height, italic, skew, width]}}` layout
    #[cfg(feature = "data-loading")]
    pub fn from_json(input: &str) -> crate::utils::error::TableResult<Self> {
        use crate::utils::error::TableError;
        use std::collections::HashMap;

        let raw: HashMap<String, HashMap<String, CharacterMetrics>> =
            serde_json::from_str(input).map_err(|e| TableError::parse(e.to_string()))?;

        let mut table = MetricsTable::new();
        for (font_name, glyphs) in raw {
            for (code, metrics) in glyphs {
                let glyph = code
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        TableError::parse(format!("invalid code point '{}' in {}", code, font_name))
                    })?;
                if !metrics.is_finite() {
                    return Err(TableError::invalid_metrics(&font_name, glyph));
                }
                table.insert(&font_name, glyph, metrics);
            }
        }
        log::debug!("loaded {} glyph metrics from JSON", table.len());
        Ok(table)
    }

    /// Table holding the builtin TeX font metrics
    pub fn builtin() -> Self {
        let mut table = MetricsTable::new();
        for (font, glyphs) in GLYPH_DATA {
            for &(ch, values) in *glyphs {
                table.insert(font, ch, CharacterMetrics::from_array(values));
            }
        }
        for family in LETTER_FAMILIES {
            for ch in ('a'..='z').chain('A'..='Z') {
                let key = family.font_name;
                let present = table
                    .fonts
                    .get(key)
                    .is_some_and(|f| f.contains_key(&(ch as u32)));
                if !present {
                    table.insert(key, ch, family.letter(ch));
                }
            }
        }
        table
    }
}

impl MetricsSource for MetricsTable {
    fn metrics(&self, ch: &str, font_name: &str, mode: Mode) -> Option<CharacterMetrics> {
        self.lookup(ch, font_name, mode)
    }
}

lazy_static! {
    /// Metrics for every glyph referenced by the builtin symbol table
    pub static ref BUILTIN_METRICS: MetricsTable = MetricsTable::builtin();
}

// ============================================================================
// Builtin Data
// ============================================================================

type GlyphRow = (char, [f64; 5]);

const fn digits(height: f64, width: f64) -> [GlyphRow; 10] {
    let mut rows = [('0', [0.0; 5]); 10];
    let mut i = 0;
    while i < 10 {
        rows[i] = ((b'0' + i as u8) as char, [0.0, height, 0.0, 0.0, width]);
        i += 1;
    }
    rows
}

const MAIN_REGULAR_DIGITS: [GlyphRow; 10] = digits(0.64444, 0.5);
const MAIN_BOLD_DIGITS: [GlyphRow; 10] = digits(0.64444, 0.575);
const SANS_DIGITS: [GlyphRow; 10] = digits(0.65556, 0.5);
const TYPEWRITER_DIGITS: [GlyphRow; 10] = digits(0.61111, 0.525);

/// [depth, height, italic, skew, width]
const MAIN_REGULAR: &[GlyphRow] = &[
    ('!', [0.0, 0.69444, 0.0, 0.0, 0.27778]),
    ('\'', [0.0, 0.69444, 0.0, 0.0, 0.27778]),
    ('(', [0.25, 0.75, 0.0, 0.0, 0.38889]),
    (')', [0.25, 0.75, 0.0, 0.0, 0.38889]),
    ('*', [0.0, 0.75, 0.0, 0.0, 0.5]),
    ('+', [0.08333, 0.58333, 0.0, 0.0, 0.77778]),
    (',', [0.19444, 0.10556, 0.0, 0.0, 0.27778]),
    ('-', [0.0, 0.43056, 0.0, 0.0, 0.33333]),
    ('.', [0.0, 0.10556, 0.0, 0.0, 0.27778]),
    ('/', [0.25, 0.75, 0.0, 0.0, 0.5]),
    (':', [0.0, 0.43056, 0.0, 0.0, 0.27778]),
    (';', [0.19444, 0.43056, 0.0, 0.0, 0.27778]),
    ('<', [0.0391, 0.5391, 0.0, 0.0, 0.77778]),
    ('=', [-0.13313, 0.36687, 0.0, 0.0, 0.77778]),
    ('>', [0.0391, 0.5391, 0.0, 0.0, 0.77778]),
    ('?', [0.0, 0.69444, 0.0, 0.0, 0.47222]),
    ('[', [0.25, 0.75, 0.0, 0.0, 0.27778]),
    (']', [0.25, 0.75, 0.0, 0.0, 0.27778]),
    ('`', [0.0, 0.69444, 0.0, 0.0, 0.5]),
    ('{', [0.25, 0.75, 0.0, 0.0, 0.5]),
    ('|', [0.25, 0.75, 0.0, 0.0, 0.27778]),
    ('}', [0.25, 0.75, 0.0, 0.0, 0.5]),
    ('±', [0.08333, 0.58333, 0.0, 0.0, 0.77778]),
    ('×', [0.08333, 0.58333, 0.0, 0.0, 0.77778]),
    ('÷', [0.08333, 0.58333, 0.0, 0.0, 0.77778]),
    ('\u{0338}', [0.19444, 0.69444, 0.0, 0.0, 0.0]),
    ('–', [0.0, 0.43056, 0.02778, 0.0, 0.5]),
    ('—', [0.0, 0.43056, 0.02778, 0.0, 1.0]),
    ('‘', [0.0, 0.69444, 0.0, 0.0, 0.27778]),
    ('’', [0.0, 0.69444, 0.0, 0.0, 0.27778]),
    ('“', [0.0, 0.69444, 0.0, 0.0, 0.5]),
    ('”', [0.0, 0.69444, 0.0, 0.0, 0.5]),
    ('←', [-0.13313, 0.36687, 0.0, 0.0, 1.0]),
    ('→', [-0.13313, 0.36687, 0.0, 0.0, 1.0]),
    ('↔', [-0.13313, 0.36687, 0.0, 0.0, 1.0]),
    ('⇐', [-0.13313, 0.36687, 0.0, 0.0, 1.0]),
    ('⇒', [-0.13313, 0.36687, 0.0, 0.0, 1.0]),
    ('⇔', [-0.13313, 0.36687, 0.0, 0.0, 1.0]),
    ('∀', [0.0, 0.69444, 0.0, 0.0, 0.55556]),
    ('∂', [0.0, 0.69444, 0.0, 0.0, 0.44445]),
    ('∃', [0.0, 0.69444, 0.0, 0.0, 0.55556]),
    ('∅', [0.05556, 0.75, 0.0, 0.0, 0.5]),
    ('∇', [0.0, 0.68333, 0.0, 0.0, 0.83334]),
    ('∈', [0.0391, 0.5391, 0.0, 0.0, 0.66667]),
    ('∋', [0.0391, 0.5391, 0.0, 0.0, 0.66667]),
    ('−', [0.08333, 0.58333, 0.0, 0.0, 0.77778]),
    ('∖', [0.25, 0.75, 0.0, 0.0, 0.5]),
    ('∗', [-0.03472, 0.46528, 0.0, 0.0, 0.5]),
    ('∘', [-0.05555, 0.44445, 0.0, 0.0, 0.5]),
    ('∞', [0.0, 0.43056, 0.0, 0.0, 1.0]),
    ('∣', [0.25, 0.75, 0.0, 0.0, 0.27778]),
    ('∥', [0.25, 0.75, 0.0, 0.0, 0.5]),
    ('∧', [0.0, 0.55556, 0.0, 0.0, 0.66667]),
    ('∨', [0.0, 0.55556, 0.0, 0.0, 0.66667]),
    ('∼', [-0.13313, 0.36687, 0.0, 0.0, 0.77778]),
    ('≃', [-0.03625, 0.46375, 0.0, 0.0, 0.77778]),
    ('≅', [0.022, 0.589, 0.0, 0.0, 0.77778]),
    ('≈', [-0.01688, 0.48312, 0.0, 0.0, 0.77778]),
    ('≍', [-0.03625, 0.46375, 0.0, 0.0, 0.77778]),
    ('≠', [0.21875, 0.71875, 0.0, 0.0, 0.77778]),
    ('≡', [-0.03625, 0.46375, 0.0, 0.0, 0.77778]),
    ('≤', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('≥', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('⊂', [0.0391, 0.5391, 0.0, 0.0, 0.77778]),
    ('⊃', [0.0391, 0.5391, 0.0, 0.0, 0.77778]),
    ('⊆', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('⊇', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('⊑', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('⊒', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('⋅', [-0.05555, 0.44445, 0.0, 0.0, 0.27778]),
    ('⋆', [-0.03472, 0.46528, 0.0, 0.0, 0.5]),
    ('⌢', [-0.14236, 0.35764, 0.0, 0.0, 1.0]),
];

const MAIN_BOLD: &[GlyphRow] = &[
    ('+', [0.13333, 0.63333, 0.0, 0.0, 0.89444]),
    ('-', [0.0, 0.44444, 0.0, 0.0, 0.38333]),
    ('=', [-0.10889, 0.39111, 0.0, 0.0, 0.89444]),
    ('<', [0.08556, 0.58556, 0.0, 0.0, 0.89444]),
    ('>', [0.08556, 0.58556, 0.0, 0.0, 0.89444]),
    ('−', [0.13333, 0.63333, 0.0, 0.0, 0.89444]),
];

const MATH_ITALIC: &[GlyphRow] = &[
    ('a', [0.0, 0.43056, 0.0, 0.0, 0.52859]),
    ('b', [0.0, 0.69444, 0.0, 0.0, 0.42917]),
    ('c', [0.0, 0.43056, 0.0, 0.05556, 0.43276]),
    ('d', [0.0, 0.69444, 0.0, 0.16667, 0.52049]),
    ('e', [0.0, 0.43056, 0.0, 0.05556, 0.46563]),
    ('f', [0.19444, 0.69444, 0.10764, 0.16667, 0.48959]),
    ('g', [0.19444, 0.43056, 0.03588, 0.02778, 0.47697]),
    ('h', [0.0, 0.69444, 0.0, 0.0, 0.57616]),
    ('i', [0.0, 0.65952, 0.0, 0.0, 0.34451]),
    ('j', [0.19444, 0.65952, 0.05724, 0.0, 0.41181]),
    ('k', [0.0, 0.69444, 0.03148, 0.0, 0.5206]),
    ('l', [0.0, 0.69444, 0.01968, 0.08334, 0.29838]),
    ('m', [0.0, 0.43056, 0.0, 0.0, 0.87801]),
    ('n', [0.0, 0.43056, 0.0, 0.0, 0.60023]),
    ('o', [0.0, 0.43056, 0.0, 0.05556, 0.48472]),
    ('p', [0.19444, 0.43056, 0.0, 0.08334, 0.50313]),
    ('q', [0.19444, 0.43056, 0.03588, 0.08334, 0.44641]),
    ('r', [0.0, 0.43056, 0.02778, 0.05556, 0.45116]),
    ('s', [0.0, 0.43056, 0.0, 0.05556, 0.46875]),
    ('t', [0.0, 0.61508, 0.0, 0.08334, 0.36111]),
    ('u', [0.0, 0.43056, 0.0, 0.02778, 0.57246]),
    ('v', [0.0, 0.43056, 0.03588, 0.02778, 0.48472]),
    ('w', [0.0, 0.43056, 0.02691, 0.08334, 0.71592]),
    ('x', [0.0, 0.43056, 0.0, 0.02778, 0.57153]),
    ('y', [0.19444, 0.43056, 0.03588, 0.05556, 0.49028]),
    ('z', [0.0, 0.43056, 0.04398, 0.05556, 0.46505]),
    ('A', [0.0, 0.68333, 0.0, 0.13889, 0.75]),
    ('α', [0.0, 0.43056, 0.0037, 0.02778, 0.6397]),
    ('β', [0.19444, 0.69444, 0.05278, 0.08334, 0.56563]),
    ('γ', [0.19444, 0.43056, 0.05556, 0.0, 0.51773]),
    ('δ', [0.0, 0.69444, 0.03785, 0.05556, 0.44444]),
    ('ε', [0.0, 0.43056, 0.0, 0.08334, 0.46632]),
    ('θ', [0.0, 0.69444, 0.02778, 0.08334, 0.46944]),
    ('λ', [0.0, 0.69444, 0.0, 0.0, 0.58333]),
    ('μ', [0.19444, 0.43056, 0.0, 0.02778, 0.60278]),
    ('π', [0.0, 0.43056, 0.03588, 0.0, 0.57003]),
    ('σ', [0.0, 0.43056, 0.03588, 0.0, 0.57141]),
    ('φ', [0.19444, 0.43056, 0.0, 0.08334, 0.65417]),
    ('ω', [0.0, 0.43056, 0.03588, 0.0, 0.62245]),
    ('ϵ', [0.0, 0.43056, 0.0, 0.05556, 0.40487]),
    ('∂', [0.0, 0.69444, 0.05556, 0.08334, 0.5309]),
];

const AMS_REGULAR: &[GlyphRow] = &[
    ('∅', [0.08167, 0.58167, 0.0, 0.0, 0.77778]),
    ('∴', [0.0, 0.69224, 0.0, 0.0, 0.66667]),
    ('∵', [0.0, 0.69224, 0.0, 0.0, 0.66667]),
    ('≲', [0.22958, 0.72958, 0.0, 0.0, 0.77778]),
    ('≳', [0.22958, 0.72958, 0.0, 0.0, 0.77778]),
    ('≶', [0.1808, 0.675, 0.0, 0.0, 0.77778]),
    ('≷', [0.1808, 0.675, 0.0, 0.0, 0.77778]),
    ('⊊', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('⊋', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('⊏', [0.03517, 0.54986, 0.0, 0.0, 0.77778]),
    ('⊐', [0.03517, 0.54986, 0.0, 0.0, 0.77778]),
    ('⩽', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('⩾', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('\u{E006}', [0.08198, 0.58198, 0.0, 0.0, 0.77778]),
    ('\u{E01A}', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
    ('\u{E01B}', [0.13597, 0.63597, 0.0, 0.0, 0.77778]),
];

const TYPEWRITER_REGULAR: &[GlyphRow] = &[
    ('\'', [0.0, 0.61111, 0.0, 0.0, 0.525]),
    ('-', [-0.08556, 0.35444, 0.0, 0.0, 0.525]),
    ('`', [0.0, 0.61111, 0.0, 0.0, 0.525]),
    ('+', [-0.08056, 0.53055, 0.0, 0.0, 0.525]),
    ('=', [-0.19549, 0.41562, 0.0, 0.0, 0.525]),
];

const SANS_REGULAR: &[GlyphRow] = &[
    ('+', [0.08333, 0.58333, 0.0, 0.0, 0.77778]),
    ('=', [-0.13313, 0.36687, 0.0, 0.0, 0.77778]),
    ('(', [0.25, 0.75, 0.0, 0.0, 0.38889]),
    (')', [0.25, 0.75, 0.0, 0.0, 0.38889]),
];

const GLYPH_DATA: &[(&str, &[GlyphRow])] = &[
    ("Main-Regular", &MAIN_REGULAR_DIGITS),
    ("Main-Regular", MAIN_REGULAR),
    ("Main-Bold", &MAIN_BOLD_DIGITS),
    ("Main-Bold", MAIN_BOLD),
    ("Math-Italic", MATH_ITALIC),
    ("AMS-Regular", AMS_REGULAR),
    ("SansSerif-Regular", &SANS_DIGITS),
    ("SansSerif-Regular", SANS_REGULAR),
    ("Typewriter-Regular", &TYPEWRITER_DIGITS),
    ("Typewriter-Regular", TYPEWRITER_REGULAR),
];

/// Proportions used to fill in Latin letters a font table does not list
struct LetterFamily {
    font_name: &'static str,
    x_height: f64,
    ascender: f64,
    cap_height: f64,
    italic: f64,
    width: f64,
}

impl LetterFamily {
    fn letter(&self, ch: char) -> CharacterMetrics {
        if ch.is_ascii_uppercase() {
            return CharacterMetrics::new(0.0, self.cap_height, self.italic, 0.0, self.width * 1.4);
        }
        let depth = if "gjpqy".contains(ch) { 0.19444 } else { 0.0 };
        let height = match ch {
            'b' | 'd' | 'f' | 'h' | 'k' | 'l' => self.ascender,
            'i' | 'j' => 0.66786,
            't' => 0.61508,
            _ => self.x_height,
        };
        CharacterMetrics::new(depth, height, self.italic, 0.0, self.width)
    }
}

const LETTER_FAMILIES: &[LetterFamily] = &[
    LetterFamily {
        font_name: "Main-Regular",
        x_height: 0.43056,
        ascender: 0.69444,
        cap_height: 0.68333,
        italic: 0.0,
        width: 0.5,
    },
    LetterFamily {
        font_name: "Main-Bold",
        x_height: 0.44444,
        ascender: 0.69444,
        cap_height: 0.68611,
        italic: 0.0,
        width: 0.575,
    },
    LetterFamily {
        font_name: "Main-Italic",
        x_height: 0.43056,
        ascender: 0.69444,
        cap_height: 0.68333,
        italic: 0.03056,
        width: 0.51111,
    },
    LetterFamily {
        font_name: "Math-Italic",
        x_height: 0.43056,
        ascender: 0.69444,
        cap_height: 0.68333,
        italic: 0.05017,
        width: 0.55,
    },
    LetterFamily {
        font_name: "Math-BoldItalic",
        x_height: 0.44444,
        ascender: 0.69444,
        cap_height: 0.68611,
        italic: 0.04835,
        width: 0.6,
    },
    LetterFamily {
        font_name: "SansSerif-Regular",
        x_height: 0.44444,
        ascender: 0.69444,
        cap_height: 0.69444,
        italic: 0.0,
        width: 0.5,
    },
    LetterFamily {
        font_name: "Typewriter-Regular",
        x_height: 0.43056,
        ascender: 0.61111,
        cap_height: 0.61111,
        italic: 0.0,
        width: 0.525,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeral_metrics() {
        let m = BUILTIN_METRICS
            .metrics("7", "Main-Regular", Mode::Math)
            .unwrap();
        assert_eq!(m.height, 0.64444);
        assert_eq!(m.depth, 0.0);
    }

    #[test]
    fn test_math_italic_letter() {
        let m = BUILTIN_METRICS.metrics("f", "Math-Italic", Mode::Math).unwrap();
        assert_eq!(m.italic, 0.10764);
        assert_eq!(m.skew, 0.16667);
    }

    #[test]
    fn test_generated_letters_fill_gaps() {
        assert!(BUILTIN_METRICS.metrics("Q", "Math-Italic", Mode::Math).is_some());
        assert!(BUILTIN_METRICS.metrics("g", "SansSerif-Regular", Mode::Math).is_some());
        let y = BUILTIN_METRICS.metrics("y", "Main-Bold", Mode::Math).unwrap();
        assert_eq!(y.depth, 0.19444);
    }

    #[test]
    fn test_unknown_font_or_char() {
        assert!(BUILTIN_METRICS.metrics("x", "Fraktur-Regular", Mode::Math).is_none());
        assert!(BUILTIN_METRICS.metrics("☃", "Main-Regular", Mode::Math).is_none());
    }

    #[test]
    fn test_multi_char_has_no_metrics() {
        assert!(BUILTIN_METRICS.metrics("ab", "Main-Regular", Mode::Text).is_none());
        assert!(BUILTIN_METRICS.metrics("", "Main-Regular", Mode::Text).is_none());
    }

    #[test]
    fn test_extra_character_map() {
        let base = BUILTIN_METRICS.metrics("c", "Main-Regular", Mode::Text);
        let accented = BUILTIN_METRICS.metrics("ç", "Main-Regular", Mode::Text);
        assert!(base.is_some());
        assert_eq!(base, accented);
    }

    #[test]
    fn test_supported_script_borrows_m_in_text_mode() {
        let m = BUILTIN_METRICS.metrics("M", "Main-Regular", Mode::Text);
        assert_eq!(BUILTIN_METRICS.metrics("中", "Main-Regular", Mode::Text), m);
        assert!(BUILTIN_METRICS.metrics("中", "Main-Regular", Mode::Math).is_none());
        assert_eq!(script_from_codepoint('中' as u32), Some("cjk"));
        assert_eq!(script_from_codepoint('a' as u32), None);
    }

    #[test]
    fn test_closure_source() {
        let source = |ch: &str, font: &str, _mode: Mode| {
            (ch == "x" && font == "Custom-Regular")
                .then(|| CharacterMetrics::new(0.0, 0.5, 0.0, 0.0, 0.5))
        };
        assert!(source.metrics("x", "Custom-Regular", Mode::Math).is_some());
        assert!(source.metrics("y", "Custom-Regular", Mode::Math).is_none());
    }

    #[cfg(feature = "data-loading")]
    #[test]
    fn test_from_json() {
        let table =
            MetricsTable::from_json(r#"{"Main-Regular": {"43": [0.08333, 0.58333, 0, 0, 0.77778]}}"#)
                .unwrap();
        let plus = table.metrics("+", "Main-Regular", Mode::Math).unwrap();
        assert_eq!(plus.height, 0.58333);

        assert!(MetricsTable::from_json(r#"{"Main-Regular": {"x": [0, 0, 0, 0, 0]}}"#).is_err());
        assert!(MetricsTable::from_json("not json").is_err());
    }

    #[cfg(feature = "data-loading")]
    #[test]
    fn test_metrics_deserialize_from_array() {
        let m: CharacterMetrics = serde_json::from_str("[0.19444, 0.69444, 0.10764, 0.16667, 0.48959]").unwrap();
        assert_eq!(m, CharacterMetrics::new(0.19444, 0.69444, 0.10764, 0.16667, 0.48959));

        // Short arrays are rejected
        assert!(serde_json::from_str::<CharacterMetrics>("[0.0, 0.5]").is_err());
        let err = MetricsTable::from_json(r#"{"Main-Regular": {"43": [0.1, 0.2]}}"#).unwrap_err();
        assert!(matches!(err, crate::utils::error::TableError::Parse { .. }));
    }
}
