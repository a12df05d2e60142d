//! Symbol resolution
//!
//! Maps a symbol request to a font, a (possibly substituted) character and its
//! metrics, then hands the positioned glyph to a [`RenderBackend`]. The rules
//! are tried in priority order and the first one that produces a result wins:
//!
//! 1. configured symbol with a user font override (or one of its fallbacks)
//! 2. configured symbol spelled as a ligature in the fixed-width font
//! 3. configured symbol in its default font
//! 4. composite synthesis (negated operator, compacted pair, decorated equal)
//! 5. the raw symbol in the unstyled font
//!
//! Missing metrics are never an error, only a reason to try the next rule.

use log::{debug, trace};

use crate::core::alignment::{italic_padding, placement_offset};
use crate::core::backend::{BuildResult, CompositeContext, GlyphRequest, RenderBackend};
use crate::core::options::{AtomType, FontOptions, Mode, RenderOptions};
use crate::data::composites::EqualDecoration;
use crate::data::metrics::{CharacterMetrics, MetricsSource};
use crate::data::symbols::RenderConfig;
use crate::data::tables::SymbolTables;

/// Mathematical alphanumeric symbols (UTF-16 lead surrogate U+D835)
const MATH_ALPHANUMERIC: std::ops::RangeInclusive<u32> = 0x1D400..=0x1D7FF;

/// Whether a symbol starts with a mathematical alphanumeric code point.
/// Those carry their own styling and ignore user font overrides.
pub fn is_math_alphanumeric(symbol: &str) -> bool {
    symbol
        .chars()
        .next()
        .is_some_and(|c| MATH_ALPHANUMERIC.contains(&(c as u32)))
}

/// One symbol to resolve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolRequest<'a> {
    pub symbol: &'a str,
    /// Ask for the symbol's stylistic variant; ignored when it has none
    pub variant_form: bool,
    pub atom_type: AtomType,
    pub mode: Mode,
    /// Font taking precedence over the options' overrides
    pub font_override: Option<&'a FontOptions>,
}

impl<'a> SymbolRequest<'a> {
    pub fn new(symbol: &'a str, atom_type: AtomType, mode: Mode) -> Self {
        Self {
            symbol,
            variant_form: false,
            atom_type,
            mode,
            font_override: None,
        }
    }

    pub fn math(symbol: &'a str, atom_type: AtomType) -> Self {
        Self::new(symbol, atom_type, Mode::Math)
    }

    pub fn text(symbol: &'a str) -> Self {
        Self::new(symbol, AtomType::Ordinary, Mode::Text)
    }

    pub fn with_variant(mut self) -> Self {
        self.variant_form = true;
        self
    }

    pub fn with_font(mut self, font: &'a FontOptions) -> Self {
        self.font_override = Some(font);
        self
    }

    /// A component character of a composite, in the same role and mode
    fn component(&self, symbol: &'a str) -> Self {
        Self::new(symbol, self.atom_type, self.mode)
    }
}

/// Which rule produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionPath {
    OverrideFont,
    FallbackFont,
    Ligature,
    DefaultFont,
    NegatedOperator,
    CompactedComposite,
    DecoratedEqual,
    Unstyled,
}

impl ResolutionPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionPath::OverrideFont => "override-font",
            ResolutionPath::FallbackFont => "fallback-font",
            ResolutionPath::Ligature => "ligature",
            ResolutionPath::DefaultFont => "default-font",
            ResolutionPath::NegatedOperator => "negated-operator",
            ResolutionPath::CompactedComposite => "compacted-composite",
            ResolutionPath::DecoratedEqual => "decorated-equal",
            ResolutionPath::Unstyled => "unstyled",
        }
    }
}

/// Pick the user font for a request: the per-call override, else the math or
/// text override from the options
fn override_font<'o>(
    font_override: Option<&'o FontOptions>,
    mode: Mode,
    options: &'o RenderOptions,
) -> Option<&'o FontOptions> {
    if font_override.is_some() {
        return font_override;
    }
    let use_math_font = mode == Mode::Math || options.math_font_override.is_some();
    if use_math_font {
        options.math_font_override.as_ref()
    } else {
        options.text_font_override.as_ref()
    }
}

type Resolved<E> = (BuildResult<E>, ResolutionPath);

/// Resolves symbols against a set of tables, a metrics source and a backend
///
/// The resolver only borrows its collaborators; one instance can serve any
/// number of calls, from any number of threads when they are `Sync`.
pub struct SymbolResolver<'a, M: ?Sized, B> {
    tables: &'a SymbolTables,
    metrics: &'a M,
    backend: &'a B,
}

impl<'a, M, B> SymbolResolver<'a, M, B>
where
    M: MetricsSource + ?Sized,
    B: RenderBackend,
{
    pub fn new(tables: &'a SymbolTables, metrics: &'a M, backend: &'a B) -> Self {
        Self {
            tables,
            metrics,
            backend,
        }
    }

    pub fn tables(&self) -> &SymbolTables {
        self.tables
    }

    /// Resolve a symbol. Always produces a renderable result.
    pub fn resolve(&self, request: &SymbolRequest<'_>, options: &RenderOptions) -> BuildResult<B::Element> {
        self.resolve_traced(request, options).0
    }

    /// Resolve a symbol and report which rule produced it
    pub fn resolve_traced(
        &self,
        request: &SymbolRequest<'_>,
        options: &RenderOptions,
    ) -> Resolved<B::Element> {
        let (result, path) = self
            .resolve_configured(request, options)
            .or_else(|| self.resolve_composite(request, options))
            .unwrap_or_else(|| (self.unstyled(request, options), ResolutionPath::Unstyled));

        trace!(
            "resolved {:?} ({} {}) via {}",
            request.symbol,
            request.mode,
            request.atom_type,
            path.as_str()
        );
        (result, path)
    }

    // ------------------------------------------------------------------------
    // Configured symbols
    // ------------------------------------------------------------------------

    fn resolve_configured(
        &self,
        request: &SymbolRequest<'_>,
        options: &RenderOptions,
    ) -> Option<Resolved<B::Element>> {
        let config = self
            .tables
            .config(request.symbol)?
            .select(request.variant_form);
        let record = config.for_mode(request.mode);
        let ch = record
            .and_then(|r| r.replace_char)
            .unwrap_or(request.symbol);

        let resolved = self
            .resolve_with_override(request, ch, options)
            .unwrap_or_else(|| self.resolve_default_font(request, record, ch, options));
        Some(resolved)
    }

    fn resolve_with_override(
        &self,
        request: &SymbolRequest<'_>,
        ch: &str,
        options: &RenderOptions,
    ) -> Option<Resolved<B::Element>> {
        if request.atom_type != AtomType::Ordinary || is_math_alphanumeric(request.symbol) {
            return None;
        }
        let font = override_font(request.font_override, request.mode, options)?;

        if let Some((found, metrics, path)) = self.find_metrics(ch, font, request.mode) {
            let need_italic = request.mode == Mode::Math;
            let result = self.single_glyph(ch, found, Some(metrics), request, need_italic, options);
            return Some((result, path));
        }

        let expansion = self.tables.ligature(request.symbol)?;
        if !font.is_fixed_width() {
            return None;
        }
        Some((
            self.ligature_row(expansion, font, request, options),
            ResolutionPath::Ligature,
        ))
    }

    /// Metrics of `ch` in `font`, else in the first of its fallbacks that has them
    fn find_metrics<'f>(
        &self,
        ch: &str,
        font: &'f FontOptions,
        mode: Mode,
    ) -> Option<(&'f FontOptions, CharacterMetrics, ResolutionPath)> {
        if let Some(metrics) = self.metrics.metrics(ch, &font.font_name(), mode) {
            return Some((font, metrics, ResolutionPath::OverrideFont));
        }
        font.fallback.iter().find_map(|fallback| {
            self.metrics
                .metrics(ch, &fallback.font_name(), mode)
                .map(|metrics| (fallback, metrics, ResolutionPath::FallbackFont))
        })
    }

    fn resolve_default_font(
        &self,
        request: &SymbolRequest<'_>,
        record: Option<&RenderConfig>,
        ch: &str,
        options: &RenderOptions,
    ) -> Resolved<B::Element> {
        let unstyled = FontOptions::default();
        let font = record.map_or(&unstyled, |r| &r.default_font);
        // Default-font metrics only exist for the math glyph set
        let metrics = self.metrics.metrics(ch, &font.font_name(), Mode::Math);
        if metrics.is_none() {
            debug!("no metrics for {:?} in {}", ch, font);
        }
        let need_italic = request.mode == Mode::Math;
        (
            self.single_glyph(ch, font, metrics, request, need_italic, options),
            ResolutionPath::DefaultFont,
        )
    }

    // ------------------------------------------------------------------------
    // Composite symbols
    // ------------------------------------------------------------------------

    fn resolve_composite(
        &self,
        request: &SymbolRequest<'_>,
        options: &RenderOptions,
    ) -> Option<Resolved<B::Element>> {
        if request.mode != Mode::Math || request.variant_form {
            return None;
        }
        let ctx = CompositeContext {
            atom_type: request.atom_type,
            mode: request.mode,
            options,
        };

        if let Some(negated) = self.tables.negated_operator(request.symbol) {
            let base = self.resolve_component(&request.component(negated.base), options);
            let overlay = self.resolve_component(&request.component(negated.overlay), options);
            return Some((
                self.backend.overlay(base, overlay, &ctx),
                ResolutionPath::NegatedOperator,
            ));
        }

        if let Some(composite) = self.tables.compacted_composite(request.symbol) {
            let left = self.resolve_component(&request.component(composite.left), options);
            let right = self.resolve_component(&request.component(composite.right), options);
            return Some((
                self.backend.compacted(left, right, composite.spacing, &ctx),
                ResolutionPath::CompactedComposite,
            ));
        }

        if let Some(decoration) = self.tables.decorated_equal(request.symbol) {
            let equal = self.resolve_component(&request.component("="), options);
            let mark = self.decoration_mark(decoration, options);
            return Some((
                self.backend
                    .decorated_equal(request.symbol, decoration, equal, mark, &ctx),
                ResolutionPath::DecoratedEqual,
            ));
        }

        None
    }

    /// Components never recurse into composite synthesis
    fn resolve_component(
        &self,
        request: &SymbolRequest<'_>,
        options: &RenderOptions,
    ) -> BuildResult<B::Element> {
        match self.resolve_configured(request, options) {
            Some((result, _)) => result,
            None => self.unstyled(request, options),
        }
    }

    /// The mark drawn above a decorated equal sign, kept on its own baseline
    fn decoration_mark(
        &self,
        decoration: EqualDecoration,
        options: &RenderOptions,
    ) -> BuildResult<B::Element> {
        let flat = options.clone().with_center_operators(false);
        let glyphs = decoration.glyphs();

        if !decoration.is_textual() {
            let request = SymbolRequest::math(glyphs, AtomType::Ordinary);
            return self.resolve_component(&request, &flat);
        }

        let letters = split_chars(glyphs)
            .map(|letter| {
                self.resolve_component(&SymbolRequest::text(letter), &flat)
                    .element
            })
            .collect();
        BuildResult {
            options: flat.clone(),
            italic: 0.0,
            skew: 0.0,
            element: self.backend.glyph_row(letters, &flat),
        }
    }

    // ------------------------------------------------------------------------
    // Glyph construction
    // ------------------------------------------------------------------------

    fn single_glyph(
        &self,
        ch: &str,
        font: &FontOptions,
        metrics: Option<CharacterMetrics>,
        request: &SymbolRequest<'_>,
        need_italic: bool,
        options: &RenderOptions,
    ) -> BuildResult<B::Element> {
        let placement = placement_offset(metrics.as_ref(), Some(request.atom_type), options);
        let glyph = GlyphRequest {
            font,
            text: ch,
            metrics,
            mode: request.mode,
            vertical_offset: placement.vertical_offset,
            reported_height: placement.reported_height,
            italic_padding: italic_padding(metrics.as_ref(), need_italic, options),
            color: options.color,
        };
        BuildResult {
            options: options.clone(),
            italic: metrics.map_or(0.0, |m| options.em_to_device(m.italic)),
            skew: metrics.map_or(0.0, |m| options.em_to_device(m.skew)),
            element: self.backend.glyph(&glyph),
        }
    }

    /// Spell a symbol as a run of characters sharing one baseline
    fn ligature_row(
        &self,
        expansion: &str,
        font: &FontOptions,
        request: &SymbolRequest<'_>,
        options: &RenderOptions,
    ) -> BuildResult<B::Element> {
        let font_name = font.font_name();
        let glyphs = split_chars(expansion)
            .map(|ch| {
                let metrics = self.metrics.metrics(ch, &font_name, request.mode);
                let placement = placement_offset(metrics.as_ref(), None, options);
                self.backend.glyph(&GlyphRequest {
                    font,
                    text: ch,
                    metrics,
                    mode: request.mode,
                    vertical_offset: placement.vertical_offset,
                    reported_height: placement.reported_height,
                    italic_padding: 0.0,
                    color: options.color,
                })
            })
            .collect();
        BuildResult {
            options: options.clone(),
            italic: 0.0,
            skew: 0.0,
            element: self.backend.glyph_row(glyphs, options),
        }
    }

    fn unstyled(&self, request: &SymbolRequest<'_>, options: &RenderOptions) -> BuildResult<B::Element> {
        debug!(
            "no rule for {:?} in {} mode; drawing it unstyled",
            request.symbol, request.mode
        );
        self.single_glyph(
            request.symbol,
            &FontOptions::default(),
            None,
            request,
            false,
            options,
        )
    }
}

/// Each character of `s` as its own string slice
fn split_chars(s: &str) -> impl Iterator<Item = &str> {
    s.char_indices().map(move |(i, c)| &s[i..i + c.len_utf8()])
}
