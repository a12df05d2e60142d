//! Core resolution engine
//!
//! This module contains the pieces that turn a symbol into a drawable glyph:
//! - `options`: fonts, modes, atom types and per-call render options
//! - `alignment`: vertical centering on the math axis
//! - `backend`: the element factory seam and a data-only tree backend
//! - `resolver`: the priority-ordered symbol resolution pipeline

pub mod alignment;
pub mod backend;
pub mod options;
pub mod resolver;

// Re-export main types and functions
pub use alignment::{
    placement_offset, Placement, HEIGHT_THRESHOLD, NUMBER_DEPTH, NUMBER_HEIGHT,
    NUMBER_VISUAL_CENTER,
};
pub use backend::{
    BuildResult, CompositeContext, GlyphNode, GlyphRequest, PlacedGlyph, RenderBackend,
    TreeBackend,
};
pub use options::{AtomType, Color, FontOptions, FontShape, FontWeight, Mode, RenderOptions};
pub use resolver::{is_math_alphanumeric, ResolutionPath, SymbolRequest, SymbolResolver};
