//! Dynamic tabular input model.
//!
//! Sales data arrives from spreadsheet-shaped sources where column types are
//! whatever the exporting tool felt like that day. `RawTable` keeps that
//! looseness at the edge: an ordered set of named columns, each a vector of
//! dynamically typed [`Cell`]s. Nothing downstream touches a `Cell` until the
//! schema step coerces it into a typed record, so every coercion decision
//! lives in exactly one place.

use crate::error::{AbcError, AbcResult};

/// Spellings that external text sources use for "no value here".
const NULL_SPELLINGS: [&str; 4] = ["na", "n/a", "nan", "null"];

/// A single dynamically typed cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Parse one cell of external text.
    ///
    /// Empty strings and the usual null spellings become [`Cell::Null`];
    /// anything that parses as a finite number becomes [`Cell::Number`];
    /// the rest stays [`Cell::Text`]. Non-finite numerics (`inf`, `-inf`)
    /// stay text so that monetary columns reject them loudly instead of
    /// poisoning sums.
    pub fn parse(raw: &str) -> Cell {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || NULL_SPELLINGS
                .iter()
                .any(|s| trimmed.eq_ignore_ascii_case(s))
        {
            return Cell::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// The numeric reading of this cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// A display string for label-like columns. Integral numbers print
    /// without a trailing `.0` so numeric identifiers round-trip cleanly.
    pub fn display(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            Cell::Number(n) => Some(format!("{}", n)),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

/// A named column of cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: usize) -> &Cell {
        &self.cells[row]
    }
}

/// An ordered, column-major table: the "mapping from column name to column of
/// values" the classifier accepts. Column order is preserved from the source
/// so synonym resolution and error messages stay deterministic.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RawTable {
    columns: Vec<Column>,
    rows: usize,
}

impl RawTable {
    /// Build a table from named columns. Every column must have the same
    /// length and names must be unique.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Cell>)>) -> AbcResult<RawTable> {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(name, cells)| Column {
                name: name.into(),
                cells,
            })
            .collect();

        let rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        for col in &columns {
            if col.cells.len() != rows {
                return Err(AbcError::InvalidTable {
                    reason: format!(
                        "column '{}' has {} row(s), expected {}",
                        col.name,
                        col.cells.len(),
                        rows
                    ),
                });
            }
        }
        check_unique_names(&columns)?;

        Ok(RawTable { columns, rows })
    }

    /// Build a table from a header row plus data rows. Every row must match
    /// the header width.
    pub fn from_rows<S: Into<String>>(header: Vec<S>, rows: Vec<Vec<Cell>>) -> AbcResult<RawTable> {
        let mut columns: Vec<Column> = header
            .into_iter()
            .map(|name| Column {
                name: name.into(),
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();
        check_unique_names(&columns)?;

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(AbcError::InvalidTable {
                    reason: format!(
                        "row {} has {} field(s), expected {}",
                        i + 1,
                        row.len(),
                        columns.len()
                    ),
                });
            }
            for (col, cell) in columns.iter_mut().zip(row) {
                col.cells.push(cell);
            }
        }

        let rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        Ok(RawTable { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Exact (case-sensitive) column lookup.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

fn check_unique_names(columns: &[Column]) -> AbcResult<()> {
    for (i, col) in columns.iter().enumerate() {
        if columns[..i].iter().any(|c| c.name == col.name) {
            return Err(AbcError::InvalidTable {
                reason: format!("duplicate column name '{}'", col.name),
            });
        }
    }
    Ok(())
}
