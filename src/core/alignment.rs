//! Vertical alignment onto the math axis
//!
//! Numerals anchor the baseline. Short binary operators and relations are
//! shifted so that their visual center lines up with the center of a numeral,
//! and so are short stand-alone variables unless the caller asks to keep them
//! on the numeral baseline (a variable next to a coefficient, say).
//!
//! All lengths are in em.

use crate::core::options::{AtomType, RenderOptions};
use crate::data::metrics::CharacterMetrics;

/// Height of a numeral in the primary text font
pub const NUMBER_HEIGHT: f64 = 0.64444;

/// Depth of a numeral in the primary text font
pub const NUMBER_DEPTH: f64 = 0.0;

/// Vertical center of a numeral
pub const NUMBER_VISUAL_CENTER: f64 = (NUMBER_HEIGHT - NUMBER_DEPTH) / 2.0;

/// Glyphs shorter than this are eligible for axis centering
pub const HEIGHT_THRESHOLD: f64 = NUMBER_HEIGHT - 0.05;

/// Where a glyph sits relative to its baseline
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Upward shift; positive raises the glyph
    pub vertical_offset: f64,
    /// Height to report for line-box computation; `None` when metrics are unknown
    pub reported_height: Option<f64>,
}

impl Placement {
    fn unshifted(metrics: Option<&CharacterMetrics>) -> Self {
        Self {
            vertical_offset: 0.0,
            reported_height: metrics.map(|m| m.height),
        }
    }

    pub fn is_shifted(&self) -> bool {
        self.vertical_offset != 0.0
    }
}

/// Whether a glyph with these metrics and role is moved onto the axis
pub fn should_center(metrics: &CharacterMetrics, atom_type: AtomType, options: &RenderOptions) -> bool {
    let is_short = metrics.height < HEIGHT_THRESHOLD;
    if !is_short {
        return false;
    }
    match atom_type {
        AtomType::Binary | AtomType::Relation => true,
        AtomType::Ordinary => !options.force_variable_baseline,
        AtomType::Operator
        | AtomType::Open
        | AtomType::Close
        | AtomType::Punctuation
        | AtomType::Inner
        | AtomType::Spacing => false,
    }
}

/// Compute the vertical offset and reported height of a glyph
pub fn placement_offset(
    metrics: Option<&CharacterMetrics>,
    atom_type: Option<AtomType>,
    options: &RenderOptions,
) -> Placement {
    let (m, atom) = match (metrics, atom_type) {
        (Some(m), Some(atom)) if options.center_operators => (m, atom),
        _ => return Placement::unshifted(metrics),
    };

    if !should_center(m, atom, options) {
        return Placement::unshifted(metrics);
    }

    let char_visual_center = (m.height - m.depth) / 2.0;
    Placement {
        vertical_offset: NUMBER_VISUAL_CENTER - char_visual_center,
        reported_height: Some(NUMBER_HEIGHT),
    }
}

/// Trailing space appended after a glyph that asked for italic compensation,
/// in device units
pub fn italic_padding(
    metrics: Option<&CharacterMetrics>,
    need_italic: bool,
    options: &RenderOptions,
) -> f64 {
    match metrics {
        Some(m) if need_italic => options.em_to_device(m.italic),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn metrics(height: f64, depth: f64) -> CharacterMetrics {
        CharacterMetrics::new(depth, height, 0.0, 0.0, 0.5)
    }

    #[test]
    fn test_constants() {
        assert!((NUMBER_VISUAL_CENTER - 0.32222).abs() < EPS);
        assert!((HEIGHT_THRESHOLD - 0.59444).abs() < EPS);
    }

    #[test]
    fn test_binary_operator_is_centered() {
        let plus = metrics(0.58333, 0.08333);
        let p = placement_offset(Some(&plus), Some(AtomType::Binary), &RenderOptions::default());
        assert!((p.vertical_offset - 0.07222).abs() < EPS);
        assert_eq!(p.reported_height, Some(NUMBER_HEIGHT));
    }

    #[test]
    fn test_relation_with_negative_depth() {
        let equals = metrics(0.36687, -0.13313);
        let p = placement_offset(Some(&equals), Some(AtomType::Relation), &RenderOptions::default());
        assert!((p.vertical_offset - 0.07222).abs() < EPS);
        assert_eq!(p.reported_height, Some(NUMBER_HEIGHT));
    }

    #[test]
    fn test_numerals_are_never_centered() {
        let seven = metrics(0.64444, 0.0);
        for atom in [
            AtomType::Ordinary,
            AtomType::Binary,
            AtomType::Relation,
            AtomType::Operator,
        ] {
            let p = placement_offset(Some(&seven), Some(atom), &RenderOptions::default());
            assert_eq!(p.vertical_offset, 0.0);
            assert_eq!(p.reported_height, Some(0.64444));
        }
    }

    #[test]
    fn test_short_variable_is_centered() {
        let x = metrics(0.43056, 0.0);
        let p = placement_offset(Some(&x), Some(AtomType::Ordinary), &RenderOptions::default());
        assert!((p.vertical_offset - (0.32222 - 0.21528)).abs() < EPS);
        assert_eq!(p.reported_height, Some(NUMBER_HEIGHT));
    }

    #[test]
    fn test_force_variable_baseline() {
        let x = metrics(0.43056, 0.0);
        let opts = RenderOptions::default().with_force_variable_baseline(true);
        let p = placement_offset(Some(&x), Some(AtomType::Ordinary), &opts);
        assert_eq!(p.vertical_offset, 0.0);
        assert_eq!(p.reported_height, Some(0.43056));

        // Operators are still centered
        let plus = metrics(0.58333, 0.08333);
        let p = placement_offset(Some(&plus), Some(AtomType::Binary), &opts);
        assert!(p.is_shifted());
    }

    #[test]
    fn test_centering_disabled() {
        let plus = metrics(0.58333, 0.08333);
        let p = placement_offset(Some(&plus), Some(AtomType::Binary), &RenderOptions::flat());
        assert_eq!(p, Placement { vertical_offset: 0.0, reported_height: Some(0.58333) });
    }

    #[test]
    fn test_missing_inputs() {
        let opts = RenderOptions::default();
        assert_eq!(placement_offset(None, Some(AtomType::Binary), &opts), Placement::default());

        let plus = metrics(0.58333, 0.08333);
        let p = placement_offset(Some(&plus), None, &opts);
        assert_eq!(p.vertical_offset, 0.0);
        assert_eq!(p.reported_height, Some(0.58333));
    }

    #[test]
    fn test_other_atoms_stay_put() {
        let paren = metrics(0.5, 0.1);
        for atom in [AtomType::Open, AtomType::Close, AtomType::Punctuation, AtomType::Operator] {
            let p = placement_offset(Some(&paren), Some(atom), &RenderOptions::default());
            assert!(!p.is_shifted());
        }
    }

    #[test]
    fn test_idempotent() {
        let m = metrics(0.5391, 0.0391);
        let opts = RenderOptions::default();
        let a = placement_offset(Some(&m), Some(AtomType::Relation), &opts);
        let b = placement_offset(Some(&m), Some(AtomType::Relation), &opts);
        assert_eq!(a.vertical_offset.to_bits(), b.vertical_offset.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_italic_padding() {
        let f = CharacterMetrics::new(0.19444, 0.69444, 0.10764, 0.16667, 0.49);
        let opts = RenderOptions::sized(10.0);
        assert!((italic_padding(Some(&f), true, &opts) - 1.0764).abs() < EPS);
        assert_eq!(italic_padding(Some(&f), false, &opts), 0.0);
        assert_eq!(italic_padding(None, true, &opts), 0.0);
    }
}
