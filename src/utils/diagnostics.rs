//! Symbol table diagnostics
//!
//! This module inspects a [`SymbolTables`] bundle against a metrics source and
//! reports data problems. It can identify:
//!
//! - Symbols claimed by more than one composite table
//! - Configuration entries with no math or text record
//! - Composite entries shadowed by a direct configuration
//! - Composite components and configured glyphs without metrics
//! - Ligature expansions the fixed-width font cannot draw
//!
//! ## Example
//!
//! ```rust
//! use mathsym::diagnostics::check_tables;
//! use mathsym::data::{BUILTIN_METRICS, BUILTIN_TABLES};
//!
//! let result = check_tables(&BUILTIN_TABLES, &*BUILTIN_METRICS);
//! assert!(!result.has_errors());
//! ```

use std::fmt;

use crate::core::options::{FontOptions, Mode, FIXED_WIDTH_FAMILY};
use crate::data::metrics::MetricsSource;
use crate::data::symbols::SymbolRenderConfig;
use crate::data::tables::SymbolTables;

/// Severity of a table finding, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Harmless, e.g. a ligature nobody can reach
    Info,
    /// Some symbols render through a poorer rule than intended
    Warning,
    /// The tables break an invariant the resolver relies on
    Error,
}

impl DiagnosticLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticLevel::Info => "note",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Error => "error",
        }
    }

    fn ansi_color(&self) -> &'static str {
        match self {
            DiagnosticLevel::Info => "\x1b[34m",
            DiagnosticLevel::Warning => "\x1b[33m",
            DiagnosticLevel::Error => "\x1b[31m",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding about one table entry
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    /// Table key the finding is about
    pub symbol: Option<String>,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            symbol: None,
            hint: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => {
                let codes: Vec<String> = symbol.chars().map(|c| format!("U+{:04X}", c as u32)).collect();
                write!(f, "{} '{}' ({}): {}", self.level, symbol, codes.join(" "), self.message)?;
            }
            None => write!(f, "{}: {}", self.level, self.message)?,
        }
        if let Some(hint) = &self.hint {
            write!(f, " [{}]", hint)?;
        }
        Ok(())
    }
}

/// Findings of one table check, most severe first
#[derive(Debug, Default)]
pub struct CheckResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }

    /// Number of findings at exactly `level`
    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(DiagnosticLevel::Error) > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Counts per level, e.g. `0 error(s), 2 warning(s), 1 note(s)`
    pub fn summary(&self) -> String {
        [DiagnosticLevel::Error, DiagnosticLevel::Warning, DiagnosticLevel::Info]
            .iter()
            .map(|level| format!("{} {}(s)", self.count(*level), level))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then_with(|| a.symbol.cmp(&b.symbol))
                .then_with(|| a.message.cmp(&b.message))
        });
    }
}

/// Inspect symbol tables for inconsistencies
pub fn check_tables<M: MetricsSource + ?Sized>(tables: &SymbolTables, metrics: &M) -> CheckResult {
    let mut result = CheckResult::new();

    check_collisions(tables, &mut result);
    check_configs(tables, metrics, &mut result);
    check_components(tables, metrics, &mut result);
    check_ligatures(tables, metrics, &mut result);

    result.sort();
    result
}

fn check_collisions(tables: &SymbolTables, result: &mut CheckResult) {
    for (symbol, kinds) in tables.collisions() {
        let names: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
        result.push(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!("symbol listed in several composite tables: {}", names.join(", ")),
            )
            .with_symbol(symbol)
            .with_hint("Keep the symbol in exactly one composite table"),
        );
    }
}

fn check_configs<M: MetricsSource + ?Sized>(tables: &SymbolTables, metrics: &M, result: &mut CheckResult) {
    for (symbol, config) in tables.configs() {
        if config.is_empty() {
            result.push(
                Diagnostic::new(DiagnosticLevel::Warning, "configuration has no math or text record")
                    .with_symbol(symbol),
            );
        }

        if let Some(kind) = tables.composite_kind(symbol) {
            result.push(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("{} entry is shadowed by a direct configuration", kind),
                )
                .with_symbol(symbol),
            );
        }

        let variant = config.variant_form.as_deref();
        for (cfg, label) in [(Some(config), "base"), (variant, "variant")] {
            let Some(cfg) = cfg else { continue };
            check_default_glyphs(symbol, cfg, label, metrics, result);
        }
    }
}

fn check_default_glyphs<M: MetricsSource + ?Sized>(
    symbol: &str,
    config: &SymbolRenderConfig,
    label: &str,
    metrics: &M,
    result: &mut CheckResult,
) {
    for (record, mode) in [(&config.math, Mode::Math), (&config.text, Mode::Text)] {
        let Some(record) = record else { continue };
        let ch = record.replace_char.unwrap_or(symbol);
        let font_name = record.default_font.font_name();
        if metrics.metrics(ch, &font_name, Mode::Math).is_none() {
            result.push(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    format!("{} {} record draws '{}' without metrics in {}", label, mode, ch, font_name),
                )
                .with_symbol(symbol),
            );
        }
    }
}

fn check_components<M: MetricsSource + ?Sized>(tables: &SymbolTables, metrics: &M, result: &mut CheckResult) {
    let mut components: Vec<(&'static str, &'static str)> = Vec::new();
    for (symbol, negated) in tables.negated_operators() {
        components.push((symbol, negated.base));
        components.push((symbol, negated.overlay));
    }
    for (symbol, composite) in tables.compacted_composites() {
        components.push((symbol, composite.left));
        components.push((symbol, composite.right));
    }
    for (symbol, _) in tables.decorated_equals() {
        components.push((symbol, "="));
    }

    for (symbol, component) in components {
        let Some(record) = tables.config(component).and_then(|c| c.for_mode(Mode::Math)) else {
            result.push(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("component '{}' has no configuration and is drawn unstyled", component),
                )
                .with_symbol(symbol)
                .with_hint(format!("Add a math configuration for '{}'", component)),
            );
            continue;
        };
        let ch = record.replace_char.unwrap_or(component);
        let font_name = record.default_font.font_name();
        if metrics.metrics(ch, &font_name, Mode::Math).is_none() {
            result.push(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("component '{}' has no metrics in {}", ch, font_name),
                )
                .with_symbol(symbol),
            );
        }
    }
}

fn check_ligatures<M: MetricsSource + ?Sized>(tables: &SymbolTables, metrics: &M, result: &mut CheckResult) {
    let font_name = FontOptions::new(FIXED_WIDTH_FAMILY).font_name();
    for (symbol, expansion) in tables.ligatures() {
        if tables.config(symbol).is_none() {
            result.push(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    "ligature for an unconfigured symbol is never used",
                )
                .with_symbol(symbol),
            );
        }
        let missing: String = expansion
            .chars()
            .filter(|c| metrics.metrics(c.encode_utf8(&mut [0; 4]), &font_name, Mode::Text).is_none())
            .collect();
        if !missing.is_empty() {
            result.push(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    format!("ligature characters '{}' have no metrics in {}", missing, font_name),
                )
                .with_symbol(symbol),
            );
        }
    }
}

/// One line per finding followed by the per-level counts
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    const RESET: &str = "\x1b[0m";

    let mut lines: Vec<String> = result
        .diagnostics
        .iter()
        .map(|diag| match use_color {
            true => format!("{}{}{}", diag.level.ansi_color(), diag, RESET),
            false => diag.to_string(),
        })
        .collect();
    lines.push(result.summary());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::composites::{CompactedComposite, EqualDecoration};
    use crate::data::metrics::{MetricsTable, BUILTIN_METRICS};
    use crate::data::symbols::{main_font, RenderConfig};
    use crate::data::tables::BUILTIN_TABLES;

    #[test]
    fn test_builtin_tables_are_clean() {
        let result = check_tables(&BUILTIN_TABLES, &*BUILTIN_METRICS);
        assert!(!result.has_errors(), "{}", format_diagnostics(&result, false));
        assert_eq!(result.count(DiagnosticLevel::Warning), 0, "{}", format_diagnostics(&result, false));
    }

    #[test]
    fn test_collision_reported_as_error() {
        let tables = SymbolTables::builder()
            .negated_operator("≟", "=", "/")
            .decorated_equal("≟", EqualDecoration::Question)
            .build_unchecked();
        let result = check_tables(&tables, &MetricsTable::new());
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Error);
        assert_eq!(result.diagnostics[0].symbol.as_deref(), Some("≟"));
    }

    #[test]
    fn test_unconfigured_component_warns() {
        let tables = SymbolTables::builder()
            .compacted_composite(
                "≔",
                CompactedComposite {
                    left: ":",
                    right: "=",
                    spacing: -0.06667,
                },
            )
            .build()
            .unwrap();
        let result = check_tables(&tables, &MetricsTable::new());
        assert!(!result.has_errors());
        assert_eq!(result.count(DiagnosticLevel::Warning), 2);
    }

    #[test]
    fn test_shadowed_composite_and_empty_config() {
        let tables = SymbolTables::builder()
            .config("≟", Default::default())
            .config("∉", SymbolRenderConfig::math(RenderConfig::new(main_font())))
            .negated_operator("∉", "∈", "/")
            .build_unchecked();
        let result = check_tables(&tables, &MetricsTable::new());
        let messages: Vec<&str> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("shadowed")));
        assert!(messages.iter().any(|m| m.contains("no math or text record")));
    }

    #[test]
    fn test_summary_format() {
        let mut result = CheckResult::new();
        result.push(Diagnostic::new(DiagnosticLevel::Error, "test"));
        result.push(Diagnostic::new(DiagnosticLevel::Warning, "test"));

        assert_eq!(result.summary(), "1 error(s), 1 warning(s), 0 note(s)");
        assert_eq!(CheckResult::new().summary(), "0 error(s), 0 warning(s), 0 note(s)");
    }

    #[test]
    fn test_format_diagnostics_color() {
        let mut result = CheckResult::new();
        result.push(Diagnostic::new(DiagnosticLevel::Warning, "unused").with_symbol("≔"));

        let plain = format_diagnostics(&result, false);
        assert!(!plain.contains('\x1b'));
        assert_eq!(
            plain,
            "warning '≔' (U+2254): unused\n0 error(s), 1 warning(s), 0 note(s)"
        );

        let colored = format_diagnostics(&result, true);
        assert!(colored.starts_with("\x1b[33mwarning"));
        assert!(colored.contains("unused\x1b[0m\n"));
    }

    #[test]
    fn test_display_includes_code_points() {
        let diag = Diagnostic::new(DiagnosticLevel::Info, "note").with_symbol("≔");
        assert!(diag.to_string().contains("U+2254"));
    }
}
