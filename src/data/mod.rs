//! Data layer - Static tables
//!
//! This module contains all static data consulted during resolution:
//! - Symbol render configuration
//! - Composite and ligature tables
//! - Font metrics
//! - The validated table bundle

pub mod composites;
pub mod metrics;
pub mod symbols;
pub mod tables;

// Re-export commonly used items
pub use composites::{
    CompactedComposite, CompositeKind, EqualDecoration, NegatedOperator, COMPACTED_COMPOSITES,
    DECORATED_EQUALS, LIGATURES, NEGATED_OPERATORS,
};
pub use metrics::{CharacterMetrics, MetricsSource, MetricsTable, BUILTIN_METRICS};
pub use symbols::{lookup_symbol_config, RenderConfig, SymbolRenderConfig, SYMBOL_RENDER_CONFIGS};
pub use tables::{SymbolTables, SymbolTablesBuilder, BUILTIN_TABLES};
