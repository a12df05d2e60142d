//! Error handling for symbol table construction
//!
//! Resolving a symbol never fails: every missing entry is routed through the
//! fallback chain. Errors only arise while building or loading the static
//! tables, where they signal inconsistent input data.

use std::fmt;

use crate::data::composites::CompositeKind;

/// Table construction error type
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// A symbol appears in more than one composite table
    CompositeCollision {
        symbol: String,
        tables: Vec<CompositeKind>,
    },
    /// A ligature entry expands to nothing
    EmptyExpansion { symbol: String },
    /// Metrics that are not finite numbers
    InvalidMetrics { font: String, glyph: char },
    /// Malformed metrics data
    Parse { message: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::CompositeCollision { symbol, tables } => {
                let names: Vec<String> = tables.iter().map(|t| t.to_string()).collect();
                write!(
                    f,
                    "Composite collision: '{}' appears in {}",
                    symbol,
                    names.join(", ")
                )
            }
            TableError::EmptyExpansion { symbol } => {
                write!(f, "Empty ligature expansion for '{}'", symbol)
            }
            TableError::InvalidMetrics { font, glyph } => {
                write!(f, "Invalid metrics for U+{:04X} in {}", *glyph as u32, font)
            }
            TableError::Parse { message } => {
                write!(f, "Parse error: {}", message)
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

// Convenience constructors for errors
impl TableError {
    pub fn collision(symbol: impl Into<String>, tables: Vec<CompositeKind>) -> Self {
        TableError::CompositeCollision {
            symbol: symbol.into(),
            tables,
        }
    }

    pub fn empty_expansion(symbol: impl Into<String>) -> Self {
        TableError::EmptyExpansion {
            symbol: symbol.into(),
        }
    }

    pub fn invalid_metrics(font: impl Into<String>, glyph: char) -> Self {
        TableError::InvalidMetrics {
            font: font.into(),
            glyph,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        TableError::Parse {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_display() {
        let err = TableError::collision(
            "≔",
            vec![CompositeKind::NegatedOperator, CompositeKind::DecoratedEqual],
        );
        let msg = err.to_string();
        assert!(msg.contains("≔"));
        assert!(msg.contains("negated-operator"));
        assert!(msg.contains("decorated-equal"));
    }

    #[test]
    fn test_invalid_metrics_display() {
        let err = TableError::invalid_metrics("Main-Regular", '+');
        assert_eq!(err.to_string(), "Invalid metrics for U+002B in Main-Regular");
    }

    #[test]
    fn test_parse_error_display() {
        let err = TableError::parse("unexpected token");
        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("unexpected token"));
    }
}
