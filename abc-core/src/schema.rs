//! Schema normalization and row coercion.
//!
//! The input table is checked and typed in one pass before any aggregation
//! logic runs: resolve the sales-value column (vendor exports name it half a
//! dozen ways), verify the required schema, drop rows with a null quantity,
//! and coerce what remains into [`SalesRecord`]s — failing loudly on text
//! where a number belongs.
//!
//! Only the quantity filter removes rows. Null `value`, `item_id` or
//! `description` cells pass through untouched; that asymmetry is load-bearing
//! (quantity nulls mark voided lines) and covered by tests.

use crate::error::{AbcError, AbcResult};
use crate::table::{Cell, Column, RawTable};
use crate::types::{ItemId, SalesRecord};

/// Columns that must exist after synonym renaming, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 4] = ["item_id", "value", "qty", "description"];

/// Alternate spellings of the sales-value column, matched case-insensitively.
/// `LINeSales` is the vendor export this tool grew up around.
pub const VALUE_SYNONYMS: [&str; 3] = ["linesales", "line_sales", "sales_value"];

/// Normalize a raw table into typed sales records.
///
/// Fails with [`AbcError::Schema`] naming every missing required column, or
/// [`AbcError::Coercion`] on non-numeric text in `qty` or `value`. The input
/// table is never mutated.
pub fn normalize(table: &RawTable) -> AbcResult<Vec<SalesRecord>> {
    let item_id = table.column("item_id");
    let value = resolve_value_column(table);
    let qty = table.column("qty");
    let description = table.column("description");

    let mut missing = Vec::new();
    for (name, col) in [
        ("item_id", &item_id),
        ("value", &value),
        ("qty", &qty),
        ("description", &description),
    ] {
        if col.is_none() {
            missing.push(name.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(AbcError::Schema { missing });
    }
    // Unwraps are guarded by the missing check above.
    let (item_id, value, qty, description) = (
        item_id.unwrap(),
        value.unwrap(),
        qty.unwrap(),
        description.unwrap(),
    );

    let mut records = Vec::with_capacity(table.row_count());
    for i in 0..table.row_count() {
        let line = i + 2; // header is line 1

        // The one row filter in the whole pipeline.
        if qty.get(i).is_null() {
            continue;
        }

        records.push(SalesRecord {
            item_id: ItemId::from_cell(item_id.get(i)),
            description: description.get(i).display(),
            qty: require_number(qty.get(i), qty.name(), line)?,
            value: optional_number(value.get(i), value.name(), line)?,
            row: line,
        });
    }

    Ok(records)
}

/// Find the column serving as `value`: an exact `value` column wins, else
/// the first case-insensitive synonym in column order. At most one column
/// is ever treated as a rename.
fn resolve_value_column(table: &RawTable) -> Option<&Column> {
    if let Some(col) = table.column("value") {
        return Some(col);
    }
    table.columns().iter().find(|c| {
        VALUE_SYNONYMS
            .iter()
            .any(|s| c.name().eq_ignore_ascii_case(s))
    })
}

fn require_number(cell: &Cell, column: &str, line: usize) -> AbcResult<f64> {
    match cell.as_number() {
        Some(n) => Ok(n),
        None => Err(coercion(cell, column, line)),
    }
}

fn optional_number(cell: &Cell, column: &str, line: usize) -> AbcResult<Option<f64>> {
    match cell {
        Cell::Null => Ok(None),
        _ => require_number(cell, column, line).map(Some),
    }
}

fn coercion(cell: &Cell, column: &str, line: usize) -> AbcError {
    AbcError::Coercion {
        column: column.to_string(),
        line,
        found: cell.display().unwrap_or_default(),
    }
}
