//! Classifier error types.
//!
//! Every failure is a named variant, and every failure is fatal to the whole
//! call: the classifier never emits a partially processed table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AbcError {
    /// One or more required columns are absent after synonym renaming.
    /// The message carries the complete list so the caller can show the
    /// user exactly what the upload is missing.
    #[error("missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The aggregate value total is zero — either every value was zero or
    /// nothing survived the quantity filter. There is no Pareto curve to
    /// draw from this, and dividing by the total would manufacture NaN.
    #[error("degenerate dataset: total value is zero across {items} item(s)")]
    DegenerateDataset { items: usize },

    /// A numeric column held text that does not read as a number.
    #[error("malformed numeric data in column '{column}' at line {line}: '{found}'")]
    Coercion {
        column: String,
        line: usize,
        found: String,
    },

    /// The table itself is malformed (ragged rows, duplicate column names).
    #[error("invalid table: {reason}")]
    InvalidTable { reason: String },
}

pub type AbcResult<T> = Result<T, AbcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_missing_column() {
        let err = AbcError::Schema {
            missing: vec!["value".into(), "qty".into()],
        };
        assert_eq!(err.to_string(), "missing required column(s): value, qty");
    }

    #[test]
    fn coercion_error_names_column_and_line() {
        let err = AbcError::Coercion {
            column: "qty".into(),
            line: 7,
            found: "a dozen".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed numeric data in column 'qty' at line 7: 'a dozen'"
        );
    }
}
