//! The read-only table bundle consulted by the resolver
//!
//! `SymbolTables` is assembled once through [`SymbolTablesBuilder`], which
//! validates the data before handing out the finished bundle. There is no
//! mutation API on a built bundle, so it can be shared across threads by
//! reference.

use fxhash::FxHashMap;
use indexmap::IndexMap;
use lazy_static::lazy_static;

use crate::data::composites::{
    CompactedComposite, CompositeKind, EqualDecoration, NegatedOperator, COMPACTED_COMPOSITES,
    DECORATED_EQUALS, LIGATURES, NEGATED_OPERATORS,
};
use crate::data::symbols::{SymbolRenderConfig, SYMBOL_RENDER_CONFIGS};
use crate::utils::error::{TableError, TableResult};

/// Symbol configuration plus the composite and ligature tables
#[derive(Debug, Clone, Default)]
pub struct SymbolTables {
    configs: FxHashMap<&'static str, SymbolRenderConfig>,
    negated_operators: IndexMap<&'static str, NegatedOperator>,
    compacted_composites: IndexMap<&'static str, CompactedComposite>,
    decorated_equals: IndexMap<&'static str, EqualDecoration>,
    ligatures: FxHashMap<&'static str, &'static str>,
}

impl SymbolTables {
    pub fn builder() -> SymbolTablesBuilder {
        SymbolTablesBuilder::default()
    }

    /// Builder pre-filled with the builtin data
    pub fn builtin() -> SymbolTablesBuilder {
        let mut builder = SymbolTablesBuilder::default();
        for (symbol, config) in SYMBOL_RENDER_CONFIGS.iter() {
            builder = builder.config(*symbol, config.clone());
        }
        for (symbol, negated) in NEGATED_OPERATORS.entries() {
            builder = builder.negated_operator(*symbol, negated.base, negated.overlay);
        }
        for (symbol, composite) in COMPACTED_COMPOSITES.entries() {
            builder = builder.compacted_composite(*symbol, *composite);
        }
        for (symbol, decoration) in DECORATED_EQUALS.entries() {
            builder = builder.decorated_equal(*symbol, *decoration);
        }
        for (symbol, expansion) in LIGATURES.entries() {
            builder = builder.ligature(*symbol, *expansion);
        }
        builder
    }

    pub fn config(&self, symbol: &str) -> Option<&SymbolRenderConfig> {
        self.configs.get(symbol)
    }

    pub fn negated_operator(&self, symbol: &str) -> Option<&NegatedOperator> {
        self.negated_operators.get(symbol)
    }

    pub fn compacted_composite(&self, symbol: &str) -> Option<&CompactedComposite> {
        self.compacted_composites.get(symbol)
    }

    pub fn decorated_equal(&self, symbol: &str) -> Option<EqualDecoration> {
        self.decorated_equals.get(symbol).copied()
    }

    pub fn ligature(&self, symbol: &str) -> Option<&'static str> {
        self.ligatures.get(symbol).copied()
    }

    /// The composite table owning `symbol`, in resolution priority order
    pub fn composite_kind(&self, symbol: &str) -> Option<CompositeKind> {
        if self.negated_operators.contains_key(symbol) {
            Some(CompositeKind::NegatedOperator)
        } else if self.compacted_composites.contains_key(symbol) {
            Some(CompositeKind::CompactedComposite)
        } else if self.decorated_equals.contains_key(symbol) {
            Some(CompositeKind::DecoratedEqual)
        } else {
            None
        }
    }

    pub fn configs(&self) -> impl Iterator<Item = (&'static str, &SymbolRenderConfig)> {
        self.configs.iter().map(|(k, v)| (*k, v))
    }

    pub fn negated_operators(&self) -> impl Iterator<Item = (&'static str, &NegatedOperator)> {
        self.negated_operators.iter().map(|(k, v)| (*k, v))
    }

    pub fn compacted_composites(
        &self,
    ) -> impl Iterator<Item = (&'static str, &CompactedComposite)> {
        self.compacted_composites.iter().map(|(k, v)| (*k, v))
    }

    pub fn decorated_equals(&self) -> impl Iterator<Item = (&'static str, EqualDecoration)> + '_ {
        self.decorated_equals.iter().map(|(k, v)| (*k, *v))
    }

    pub fn ligatures(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.ligatures.iter().map(|(k, v)| (*k, *v))
    }

    /// Symbols listed in more than one composite table, in first-seen order
    pub fn collisions(&self) -> Vec<(&'static str, Vec<CompositeKind>)> {
        let mut owners: IndexMap<&'static str, Vec<CompositeKind>> = IndexMap::new();
        for key in self.negated_operators.keys() {
            owners.entry(*key).or_default().push(CompositeKind::NegatedOperator);
        }
        for key in self.compacted_composites.keys() {
            owners.entry(*key).or_default().push(CompositeKind::CompactedComposite);
        }
        for key in self.decorated_equals.keys() {
            owners.entry(*key).or_default().push(CompositeKind::DecoratedEqual);
        }
        owners.into_iter().filter(|(_, kinds)| kinds.len() > 1).collect()
    }

    /// Check the invariants the resolver relies on
    pub fn validate(&self) -> TableResult<()> {
        if let Some((symbol, kinds)) = self.collisions().into_iter().next() {
            return Err(TableError::collision(symbol, kinds));
        }
        if let Some((symbol, _)) = self.ligatures().find(|(_, expansion)| expansion.is_empty()) {
            return Err(TableError::empty_expansion(symbol));
        }
        Ok(())
    }
}

/// Accumulates table entries and validates them on [`build`](Self::build)
#[derive(Debug, Clone, Default)]
pub struct SymbolTablesBuilder {
    tables: SymbolTables,
}

impl SymbolTablesBuilder {
    pub fn config(mut self, symbol: &'static str, config: SymbolRenderConfig) -> Self {
        self.tables.configs.insert(symbol, config);
        self
    }

    pub fn negated_operator(
        mut self,
        symbol: &'static str,
        base: &'static str,
        overlay: &'static str,
    ) -> Self {
        self.tables
            .negated_operators
            .insert(symbol, NegatedOperator { base, overlay });
        self
    }

    pub fn compacted_composite(mut self, symbol: &'static str, composite: CompactedComposite) -> Self {
        self.tables.compacted_composites.insert(symbol, composite);
        self
    }

    pub fn decorated_equal(mut self, symbol: &'static str, decoration: EqualDecoration) -> Self {
        self.tables.decorated_equals.insert(symbol, decoration);
        self
    }

    pub fn ligature(mut self, symbol: &'static str, expansion: &'static str) -> Self {
        self.tables.ligatures.insert(symbol, expansion);
        self
    }

    /// Validate and freeze the tables
    pub fn build(self) -> TableResult<SymbolTables> {
        self.tables.validate()?;
        log::debug!(
            "symbol tables built: {} configs, {} negated, {} compacted, {} decorated, {} ligatures",
            self.tables.configs.len(),
            self.tables.negated_operators.len(),
            self.tables.compacted_composites.len(),
            self.tables.decorated_equals.len(),
            self.tables.ligatures.len()
        );
        Ok(self.tables)
    }

    /// Freeze the tables without validation, for inspecting bad data
    pub fn build_unchecked(self) -> SymbolTables {
        self.tables
    }
}

lazy_static! {
    /// Builtin tables, validated once on first use
    pub static ref BUILTIN_TABLES: SymbolTables = SymbolTables::builtin()
        .build()
        .unwrap_or_else(|err| panic!("builtin symbol tables are inconsistent: {}", err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::symbols::{main_font, RenderConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_tables_validate() {
        assert!(BUILTIN_TABLES.validate().is_ok());
        assert!(BUILTIN_TABLES.collisions().is_empty());
        assert!(BUILTIN_TABLES.config("+").is_some());
        assert_eq!(BUILTIN_TABLES.ligature("–"), Some("--"));
    }

    #[test]
    fn test_composite_kind() {
        assert_eq!(
            BUILTIN_TABLES.composite_kind("∉"),
            Some(CompositeKind::NegatedOperator)
        );
        assert_eq!(
            BUILTIN_TABLES.composite_kind("≔"),
            Some(CompositeKind::CompactedComposite)
        );
        assert_eq!(
            BUILTIN_TABLES.composite_kind("≟"),
            Some(CompositeKind::DecoratedEqual)
        );
        assert_eq!(BUILTIN_TABLES.composite_kind("+"), None);
    }

    #[test]
    fn test_collision_is_rejected() {
        let result = SymbolTables::builder()
            .negated_operator("≔", "=", "/")
            .compacted_composite(
                "≔",
                CompactedComposite {
                    left: ":",
                    right: "=",
                    spacing: -0.06667,
                },
            )
            .build();

        assert_eq!(
            result.unwrap_err(),
            TableError::collision(
                "≔",
                vec![
                    CompositeKind::NegatedOperator,
                    CompositeKind::CompactedComposite
                ]
            )
        );
    }

    #[test]
    fn test_empty_ligature_is_rejected() {
        let result = SymbolTables::builder().ligature("–", "").build();
        assert_eq!(result.unwrap_err(), TableError::empty_expansion("–"));
    }

    #[test]
    fn test_unchecked_build_keeps_bad_data() {
        let tables = SymbolTables::builder()
            .decorated_equal("≟", EqualDecoration::Question)
            .negated_operator("≟", "=", "/")
            .build_unchecked();
        assert_eq!(tables.collisions().len(), 1);
        assert_eq!(
            tables.composite_kind("≟"),
            Some(CompositeKind::NegatedOperator)
        );
    }

    #[test]
    fn test_custom_config() {
        let tables = SymbolTables::builder()
            .config("★", SymbolRenderConfig::math(RenderConfig::new(main_font())))
            .build()
            .unwrap();
        assert!(tables.config("★").is_some());
        assert!(tables.config("+").is_none());
    }
}
