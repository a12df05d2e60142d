//! Visual element construction
//!
//! The engine decides which character, font and offset to use; turning that
//! decision into something drawable is left to a [`RenderBackend`].
//! [`TreeBackend`] is a data-only backend that records every decision as a
//! [`GlyphNode`] tree.

use crate::core::options::{AtomType, Color, FontOptions, Mode, RenderOptions};
use crate::data::composites::EqualDecoration;
use crate::data::metrics::CharacterMetrics;

/// Everything a backend needs to draw one positioned glyph
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRequest<'a> {
    pub font: &'a FontOptions,
    pub text: &'a str,
    pub metrics: Option<CharacterMetrics>,
    pub mode: Mode,
    /// Upward shift in em
    pub vertical_offset: f64,
    /// Height for line-box purposes in em
    pub reported_height: Option<f64>,
    /// Trailing space in device units
    pub italic_padding: f64,
    pub color: Color,
}

/// Result of resolving one symbol
#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult<E> {
    /// The options the symbol was resolved under
    pub options: RenderOptions,
    /// Italic correction in device units
    pub italic: f64,
    /// Skew in device units
    pub skew: f64,
    pub element: E,
}

/// Role and context a composite symbol was requested with
#[derive(Debug, Clone, Copy)]
pub struct CompositeContext<'a> {
    pub atom_type: AtomType,
    pub mode: Mode,
    pub options: &'a RenderOptions,
}

/// Factory for visual elements and composite symbols
pub trait RenderBackend {
    type Element;

    /// Build a single positioned glyph
    fn glyph(&self, request: &GlyphRequest<'_>) -> Self::Element;

    /// Lay glyphs out left to right on one shared baseline
    fn glyph_row(&self, glyphs: Vec<Self::Element>, options: &RenderOptions) -> Self::Element;

    /// Draw `overlay` centered on top of `base`
    fn overlay(
        &self,
        base: BuildResult<Self::Element>,
        overlay: BuildResult<Self::Element>,
        ctx: &CompositeContext<'_>,
    ) -> BuildResult<Self::Element>;

    /// Place two characters side by side, `spacing` em apart
    ///
    /// Both parts arrive already resolved and placed: each one carries the
    /// vertical offset of its own metrics, so implementations only join them
    /// horizontally and must not re-center the pair.
    fn compacted(
        &self,
        left: BuildResult<Self::Element>,
        right: BuildResult<Self::Element>,
        spacing: f64,
        ctx: &CompositeContext<'_>,
    ) -> BuildResult<Self::Element>;

    /// Stack a decoration mark above an equal sign
    fn decorated_equal(
        &self,
        symbol: &str,
        decoration: EqualDecoration,
        equal: BuildResult<Self::Element>,
        mark: BuildResult<Self::Element>,
        ctx: &CompositeContext<'_>,
    ) -> BuildResult<Self::Element>;
}

// ============================================================================
// Tree Backend
// ============================================================================

/// A glyph as recorded by [`TreeBackend`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub font: FontOptions,
    pub text: String,
    pub metrics: Option<CharacterMetrics>,
    pub vertical_offset: f64,
    pub reported_height: Option<f64>,
    pub italic_padding: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GlyphNode {
    Glyph(PlacedGlyph),
    Row(Vec<GlyphNode>),
    Overlay {
        base: Box<GlyphNode>,
        overlay: Box<GlyphNode>,
    },
    Compacted {
        left: Box<GlyphNode>,
        right: Box<GlyphNode>,
        /// Gap in device units
        spacing: f64,
    },
    DecoratedEqual {
        decoration: EqualDecoration,
        equal: Box<GlyphNode>,
        mark: Box<GlyphNode>,
    },
}

impl GlyphNode {
    /// All glyphs in drawing order
    pub fn glyphs(&self) -> Vec<&PlacedGlyph> {
        let mut out = Vec::new();
        self.collect_glyphs(&mut out);
        out
    }

    fn collect_glyphs<'a>(&'a self, out: &mut Vec<&'a PlacedGlyph>) {
        match self {
            GlyphNode::Glyph(g) => out.push(g),
            GlyphNode::Row(children) => children.iter().for_each(|c| c.collect_glyphs(out)),
            GlyphNode::Overlay { base, overlay } => {
                base.collect_glyphs(out);
                overlay.collect_glyphs(out);
            }
            GlyphNode::Compacted { left, right, .. } => {
                left.collect_glyphs(out);
                right.collect_glyphs(out);
            }
            GlyphNode::DecoratedEqual { equal, mark, .. } => {
                equal.collect_glyphs(out);
                mark.collect_glyphs(out);
            }
        }
    }

    /// The single glyph, if this node is one
    pub fn as_glyph(&self) -> Option<&PlacedGlyph> {
        match self {
            GlyphNode::Glyph(g) => Some(g),
            _ => None,
        }
    }

    /// Concatenated text of every glyph
    pub fn text(&self) -> String {
        self.glyphs().iter().map(|g| g.text.as_str()).collect()
    }
}

/// Backend that records resolution decisions as a [`GlyphNode`] tree
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBackend;

impl RenderBackend for TreeBackend {
    type Element = GlyphNode;

    fn glyph(&self, request: &GlyphRequest<'_>) -> GlyphNode {
        GlyphNode::Glyph(PlacedGlyph {
            font: request.font.clone(),
            text: request.text.to_string(),
            metrics: request.metrics,
            vertical_offset: request.vertical_offset,
            reported_height: request.reported_height,
            italic_padding: request.italic_padding,
            color: request.color,
        })
    }

    fn glyph_row(&self, glyphs: Vec<GlyphNode>, _options: &RenderOptions) -> GlyphNode {
        GlyphNode::Row(glyphs)
    }

    fn overlay(
        &self,
        base: BuildResult<GlyphNode>,
        overlay: BuildResult<GlyphNode>,
        ctx: &CompositeContext<'_>,
    ) -> BuildResult<GlyphNode> {
        BuildResult {
            options: ctx.options.clone(),
            italic: base.italic,
            skew: base.skew,
            element: GlyphNode::Overlay {
                base: Box::new(base.element),
                overlay: Box::new(overlay.element),
            },
        }
    }

    fn compacted(
        &self,
        left: BuildResult<GlyphNode>,
        right: BuildResult<GlyphNode>,
        spacing: f64,
        ctx: &CompositeContext<'_>,
    ) -> BuildResult<GlyphNode> {
        BuildResult {
            options: ctx.options.clone(),
            italic: right.italic,
            skew: 0.0,
            element: GlyphNode::Compacted {
                left: Box::new(left.element),
                right: Box::new(right.element),
                spacing: ctx.options.em_to_device(spacing),
            },
        }
    }

    fn decorated_equal(
        &self,
        _symbol: &str,
        decoration: EqualDecoration,
        equal: BuildResult<GlyphNode>,
        mark: BuildResult<GlyphNode>,
        ctx: &CompositeContext<'_>,
    ) -> BuildResult<GlyphNode> {
        BuildResult {
            options: ctx.options.clone(),
            italic: equal.italic,
            skew: equal.skew,
            element: GlyphNode::DecoratedEqual {
                decoration,
                equal: Box::new(equal.element),
                mark: Box::new(mark.element),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(text: &str) -> GlyphNode {
        glyph_at(text, 0.0)
    }

    fn glyph_at(text: &str, vertical_offset: f64) -> GlyphNode {
        let font = FontOptions::default();
        TreeBackend.glyph(&GlyphRequest {
            font: &font,
            text,
            metrics: None,
            mode: Mode::Math,
            vertical_offset,
            reported_height: None,
            italic_padding: 0.0,
            color: Color::BLACK,
        })
    }

    fn result(element: GlyphNode, italic: f64) -> BuildResult<GlyphNode> {
        BuildResult {
            options: RenderOptions::default(),
            italic,
            skew: 0.0,
            element,
        }
    }

    #[test]
    fn test_row_text() {
        let row = TreeBackend.glyph_row(vec![glyph("-"), glyph("-")], &RenderOptions::default());
        assert_eq!(row.text(), "--");
        assert_eq!(row.glyphs().len(), 2);
        assert!(row.as_glyph().is_none());
    }

    #[test]
    fn test_compacted_scales_spacing() {
        let opts = RenderOptions::sized(18.0);
        let ctx = CompositeContext {
            atom_type: AtomType::Relation,
            mode: Mode::Math,
            options: &opts,
        };
        let built = TreeBackend.compacted(
            result(glyph(":"), 0.0),
            result(glyph("="), 0.25),
            -0.5,
            &ctx,
        );
        assert_eq!(built.italic, 0.25);
        assert_eq!(built.options, opts);
        match built.element {
            GlyphNode::Compacted { spacing, .. } => assert_eq!(spacing, -9.0),
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_compacted_keeps_part_offsets() {
        let opts = RenderOptions::default();
        let ctx = CompositeContext {
            atom_type: AtomType::Relation,
            mode: Mode::Math,
            options: &opts,
        };
        let built = TreeBackend.compacted(
            result(glyph_at(":", 0.1), 0.0),
            result(glyph_at("=", 0.07222), 0.0),
            -0.06667,
            &ctx,
        );
        let offsets: Vec<f64> = built.element.glyphs().iter().map(|g| g.vertical_offset).collect();
        assert_eq!(offsets, vec![0.1, 0.07222]);
    }

    #[test]
    fn test_overlay_keeps_base_corrections() {
        let opts = RenderOptions::default();
        let ctx = CompositeContext {
            atom_type: AtomType::Relation,
            mode: Mode::Math,
            options: &opts,
        };
        let built = TreeBackend.overlay(result(glyph("∈"), 0.1), result(glyph("/"), 0.0), &ctx);
        assert_eq!(built.italic, 0.1);
        assert_eq!(built.element.text(), "∈/");
    }
}
