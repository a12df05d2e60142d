//! # mathsym
//!
//! Math symbol resolution and axis alignment for typesetting engines.
//!
//! ## Features
//!
//! - **Font Resolution**: user font overrides with fallback chains, falling
//!   back to each symbol's configured default font
//! - **Typewriter Ligatures**: dashes and quotes spelled as plain characters
//!   in the fixed-width font
//! - **Composite Synthesis**: negated relations, compacted pairs such as `≔`
//!   and decorated equal signs built from their parts
//! - **Axis Alignment**: short operators and variables centered on numerals
//! - **Pluggable Output**: any [`RenderBackend`] can receive the result
//!
//! ## Usage Examples
//!
//! ```rust
//! use mathsym::{resolve_symbol, AtomType, RenderOptions, SymbolRequest};
//!
//! let plus = resolve_symbol(&SymbolRequest::math("+", AtomType::Binary), &RenderOptions::default());
//! let glyph = plus.element.as_glyph().unwrap();
//! assert_eq!(glyph.font.font_name(), "Main-Regular");
//! assert!(glyph.vertical_offset > 0.0);
//! ```
//!
//! ### Custom Tables
//!
//! ```rust
//! use mathsym::data::{symbols::main_font, RenderConfig, SymbolRenderConfig, SymbolTables};
//! use mathsym::{AtomType, CharacterMetrics, Mode, RenderOptions, SymbolRequest, SymbolResolver, TreeBackend};
//!
//! let tables = SymbolTables::builder()
//!     .config("★", SymbolRenderConfig::math(RenderConfig::new(main_font())))
//!     .build()
//!     .unwrap();
//! let metrics = |_: &str, _: &str, _: Mode| -> Option<CharacterMetrics> { None };
//! let resolver = SymbolResolver::new(&tables, &metrics, &TreeBackend);
//! let star = resolver.resolve(&SymbolRequest::math("★", AtomType::Ordinary), &RenderOptions::default());
//! assert_eq!(star.element.text(), "★");
//! ```

/// Core resolution engine
pub mod core;

/// Data layer - static tables and metrics
pub mod data;

/// Utility modules
pub mod utils;

pub use crate::core::alignment::{placement_offset, Placement};
pub use crate::core::backend::{BuildResult, GlyphNode, PlacedGlyph, RenderBackend, TreeBackend};
pub use crate::core::options::{AtomType, Color, FontOptions, Mode, RenderOptions};
pub use crate::core::resolver::{ResolutionPath, SymbolRequest, SymbolResolver};

pub use crate::data::metrics::{CharacterMetrics, MetricsSource, MetricsTable};
pub use crate::data::tables::SymbolTables;

// Re-export utilities
pub use crate::utils::diagnostics;
pub use crate::utils::error::{TableError, TableResult};

use crate::data::metrics::BUILTIN_METRICS;
use crate::data::tables::BUILTIN_TABLES;
use crate::utils::diagnostics::CheckResult;

static TREE_BACKEND: TreeBackend = TreeBackend;

/// Resolver over the builtin tables and metrics, producing a [`GlyphNode`] tree
pub fn builtin_resolver() -> SymbolResolver<'static, MetricsTable, TreeBackend> {
    SymbolResolver::new(&BUILTIN_TABLES, &*BUILTIN_METRICS, &TREE_BACKEND)
}

/// Resolve a symbol against the builtin data
pub fn resolve_symbol(request: &SymbolRequest<'_>, options: &RenderOptions) -> BuildResult<GlyphNode> {
    builtin_resolver().resolve(request, options)
}

/// Resolve a symbol against the builtin data and report which rule was used
pub fn resolve_symbol_traced(
    request: &SymbolRequest<'_>,
    options: &RenderOptions,
) -> (BuildResult<GlyphNode>, ResolutionPath) {
    builtin_resolver().resolve_traced(request, options)
}

/// Run the table diagnostics over the builtin data
pub fn check_builtin_tables() -> CheckResult {
    diagnostics::check_tables(&BUILTIN_TABLES, &*BUILTIN_METRICS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_symbol() {
        let result = resolve_symbol(&SymbolRequest::math("x", AtomType::Ordinary), &RenderOptions::default());
        assert_eq!(result.element.text(), "x");
    }

    #[test]
    fn test_resolve_symbol_traced() {
        let (result, path) = resolve_symbol_traced(
            &SymbolRequest::math("∉", AtomType::Relation),
            &RenderOptions::default(),
        );
        assert_eq!(path, ResolutionPath::NegatedOperator);
        assert_eq!(result.element.text(), "∈\u{0338}");
    }

    #[test]
    fn test_unknown_symbol_is_unstyled() {
        let (result, path) = resolve_symbol_traced(
            &SymbolRequest::math("☃", AtomType::Ordinary),
            &RenderOptions::default(),
        );
        assert_eq!(path, ResolutionPath::Unstyled);
        assert_eq!(result.italic, 0.0);
        assert_eq!(result.skew, 0.0);
        assert_eq!(result.element.as_glyph().unwrap().metrics, None);
    }

    #[test]
    fn test_check_builtin_tables() {
        assert!(!check_builtin_tables().has_errors());
    }
}
